use std::any::Any;

use lamassu_core::coords::Vector;

use crate::object::{BindError, Category, ChildError, LmlObject, PropertySpec};
use crate::values::{Value, ValueKind};

/// A transform group: positions a subtree of scene objects together.
#[derive(Debug, Default)]
pub struct Group {
    name: Option<String>,
    pub position: Vector,
}

const PROPS: &[PropertySpec] = &[
    PropertySpec::new("Name", ValueKind::Str),
    PropertySpec::new("Position", ValueKind::Vector),
];

impl Group {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LmlObject for Group {
    fn type_name(&self) -> &'static str {
        "Group"
    }

    fn category(&self) -> Category {
        Category::Scene
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
            ("Position", Value::Vector(v)) => self.position = v,
            (key, _) => return Err(BindError::NoSlot { key: key.to_string() }),
        }
        Ok(())
    }

    fn add_child(&mut self, child: &dyn LmlObject) -> Result<(), ChildError> {
        if child.category() == Category::Scene {
            Ok(())
        } else {
            Err(ChildError {
                child_type: child.type_name(),
                reason: "Group children must be scene objects",
            })
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
