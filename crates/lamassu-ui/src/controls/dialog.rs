use std::any::Any;

use crate::object::{BindError, Category, ChildError, LmlObject, PropertySpec};
use crate::values::{Value, ValueKind};

/// A modal dialog: the top-level container for a page of controls.
///
/// ```xml
/// <Dialog Title="Settings" CloseOnOutsideClick="true">
///     <Label Text="Hello" />
/// </Dialog>
/// ```
#[derive(Debug)]
pub struct Dialog {
    name: Option<String>,
    title: String,
    gray_background: bool,
    close_on_outside_click: bool,
}

const PROPS: &[PropertySpec] = &[
    PropertySpec::new("Name", ValueKind::Str),
    PropertySpec::new("Title", ValueKind::Str),
    PropertySpec::new("GrayBackground", ValueKind::Bool),
    PropertySpec::new("CloseOnOutsideClick", ValueKind::Bool),
];

impl Dialog {
    pub fn new() -> Self {
        Self {
            name: None,
            title: String::new(),
            // Modal by default: dim the scene behind, keep the dialog up
            // until explicitly closed.
            gray_background: true,
            close_on_outside_click: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn gray_background(&self) -> bool {
        self.gray_background
    }

    pub fn close_on_outside_click(&self) -> bool {
        self.close_on_outside_click
    }
}

impl Default for Dialog {
    fn default() -> Self {
        Self::new()
    }
}

impl LmlObject for Dialog {
    fn type_name(&self) -> &'static str {
        "Dialog"
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
            ("Title", Value::Str(s)) => self.title = s,
            ("GrayBackground", Value::Bool(b)) => self.gray_background = b,
            ("CloseOnOutsideClick", Value::Bool(b)) => self.close_on_outside_click = b,
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
                reason: "Dialog children must be 2D controls",
            })
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
