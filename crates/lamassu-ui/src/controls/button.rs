use std::any::Any;

use crate::object::{BindError, Category, ChildError, LmlObject, PropertySpec};
use crate::values::{Value, ValueKind};

/// A push button.
///
/// Content is either the `Label` property or a single nested control.
/// `OnClick` names the event the host application dispatches on activation.
#[derive(Debug, Default)]
pub struct Button {
    name: Option<String>,
    label: String,
    on_click: Option<String>,
    child_count: usize,
}

const PROPS: &[PropertySpec] = &[
    PropertySpec::new("Name", ValueKind::Str),
    PropertySpec::new("Label", ValueKind::Str),
    PropertySpec::new("OnClick", ValueKind::Str),
];

impl Button {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn on_click(&self) -> Option<&str> {
        self.on_click.as_deref()
    }
}

impl LmlObject for Button {
    fn type_name(&self) -> &'static str {
        "Button"
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
            ("Label", Value::Str(s)) => self.label = s,
            ("OnClick", Value::Str(s)) => self.on_click = Some(s),
            (key, _) => return Err(BindError::NoSlot { key: key.to_string() }),
        }
        Ok(())
    }

    fn add_child(&mut self, child: &dyn LmlObject) -> Result<(), ChildError> {
        if child.category() != Category::Control {
            return Err(ChildError {
                child_type: child.type_name(),
                reason: "Button content must be a 2D control",
            });
        }
        if self.child_count > 0 {
            return Err(ChildError {
                child_type: child.type_name(),
                reason: "Button holds a single content control",
            });
        }
        self.child_count += 1;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
