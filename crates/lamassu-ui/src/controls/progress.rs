use std::any::Any;

use crate::controls::stack::Orientation;
use crate::object::{BindError, Category, ChildError, LmlObject, PropertySpec};
use crate::values::{Value, ValueKind};

/// Progress indicator that represents progress as a linear distance.
///
/// `Value` runs from 0 to 1. Inline numeric text is an alternative way to
/// set it: `<ProgressBar>0.4</ProgressBar>`.
#[derive(Debug, Default)]
pub struct ProgressBar {
    name: Option<String>,
    value: f64,
    orientation: Orientation,
}

const PROPS: &[PropertySpec] = &[
    PropertySpec::new("Name", ValueKind::Str),
    PropertySpec::new("Value", ValueKind::Float),
    PropertySpec::new("Orientation", ValueKind::Enum(Orientation::VARIANTS)),
    // Derived from Value; readable by hosts, never set from markup.
    PropertySpec::read_only("Complete", ValueKind::Bool),
];

impl ProgressBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn complete(&self) -> bool {
        self.value >= 1.0
    }

    fn store_value(&mut self, v: f64) -> Result<(), BindError> {
        if !(0.0..=1.0).contains(&v) {
            return Err(BindError::Rejected {
                key: "Value".to_string(),
                reason: "progress must be within 0 and 1",
            });
        }
        self.value = v;
        Ok(())
    }
}

impl LmlObject for ProgressBar {
    fn type_name(&self) -> &'static str {
        "ProgressBar"
    }

    fn category(&self) -> Category {
        Category::Control
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn properties(&self) -> &'static [PropertySpec] {
        PROPS
    }

    fn set_property(&mut self, key: &str, value: Value) -> Result<(), BindError> {
        match (key, value) {
            ("Name", Value::Str(s)) => self.name = Some(s),
            ("Value", Value::Float(v)) => self.store_value(v)?,
            ("Orientation", Value::Enum(v)) => {
                self.orientation = Orientation::from_name(v)
                    .ok_or(BindError::Rejected { key: key.to_string(), reason: "unknown orientation" })?;
            }
            (key, _) => return Err(BindError::NoSlot { key: key.to_string() }),
        }
        Ok(())
    }

    fn add_child(&mut self, child: &dyn LmlObject) -> Result<(), ChildError> {
        Err(ChildError {
            child_type: child.type_name(),
            reason: "ProgressBar does not accept children",
        })
    }

    fn accepts_text(&self) -> bool {
        true
    }

    fn parse_text(&mut self, raw: &str) -> Result<(), BindError> {
        let v: f64 = raw
            .parse()
            .map_err(|_| BindError::BadText { reason: format!("invalid number {:?}", raw) })?;
        self.store_value(v)
            .map_err(|_| BindError::BadText { reason: "progress must be within 0 and 1".to_string() })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
