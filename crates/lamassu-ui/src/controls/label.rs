use std::any::Any;

use crate::object::{BindError, Category, ChildError, LmlObject, PropertySpec};
use crate::values::{Value, ValueKind};

/// A static text run.
///
/// Inline element text is an alternative way to set `Text`:
/// `<Label>Hello</Label>` and `<Label Text="Hello" />` are equivalent.
#[derive(Debug)]
pub struct Label {
    name: Option<String>,
    text: String,
    font_size: f64,
}

const PROPS: &[PropertySpec] = &[
    PropertySpec::new("Name", ValueKind::Str),
    PropertySpec::new("Text", ValueKind::Str),
    PropertySpec::new("FontSize", ValueKind::Float),
    // Text color belongs to the style system; the entry exists so documents
    // that try to set it fail with "not bindable" rather than "unknown".
    PropertySpec::read_only("Color", ValueKind::Color),
];

impl Label {
    pub fn new() -> Self {
        Self { name: None, text: String::new(), font_size: 14.0 }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::new()
    }
}

impl LmlObject for Label {
    fn type_name(&self) -> &'static str {
        "Label"
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
            ("Text", Value::Str(s)) => self.text = s,
            ("FontSize", Value::Float(v)) => self.font_size = v,
            (key, _) => return Err(BindError::NoSlot { key: key.to_string() }),
        }
        Ok(())
    }

    fn add_child(&mut self, child: &dyn LmlObject) -> Result<(), ChildError> {
        Err(ChildError {
            child_type: child.type_name(),
            reason: "Label does not accept children",
        })
    }

    fn accepts_text(&self) -> bool {
        true
    }

    fn parse_text(&mut self, raw: &str) -> Result<(), BindError> {
        self.text = raw.to_string();
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
