use std::any::Any;

use crate::object::{BindError, Category, ChildError, LmlObject, PropertySpec};
use crate::values::{Value, ValueKind};

// ── Orientation ───────────────────────────────────────────────────────────

/// Layout direction for linear containers and indicators.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Variant names as written in markup.
    pub const VARIANTS: &'static [&'static str] = &["Horizontal", "Vertical"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Horizontal" => Some(Self::Horizontal),
            "Vertical" => Some(Self::Vertical),
            _ => None,
        }
    }
}

// ── Stack ─────────────────────────────────────────────────────────────────

/// A linear container that lays its children out along one axis.
#[derive(Debug, Default)]
pub struct Stack {
    name: Option<String>,
    orientation: Orientation,
    spacing: f64,
}

const PROPS: &[PropertySpec] = &[
    PropertySpec::new("Name", ValueKind::Str),
    PropertySpec::new("Orientation", ValueKind::Enum(Orientation::VARIANTS)),
    PropertySpec::new("Spacing", ValueKind::Float),
];

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }
}

impl LmlObject for Stack {
    fn type_name(&self) -> &'static str {
        "Stack"
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
            ("Orientation", Value::Enum(v)) => {
                self.orientation = Orientation::from_name(v)
                    .ok_or(BindError::Rejected { key: key.to_string(), reason: "unknown orientation" })?;
            }
            ("Spacing", Value::Float(v)) => self.spacing = v,
            (key, _) => return Err(BindError::NoSlot { key: key.to_string() }),
        }
        Ok(())
    }

    fn add_child(&mut self, child: &dyn LmlObject) -> Result<(), ChildError> {
        if child.category() == Category::Control {
            Ok(())
        } else {
            Err(ChildError {
                child_type: child.type_name(),
                reason: "Stack children must be 2D controls",
            })
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
