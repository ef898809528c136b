use std::any::Any;

use lamassu_core::coords::{Angle, Vector};

use crate::object::{BindError, Category, ChildError, LmlObject, PropertySpec};
use crate::values::{Value, ValueKind};

/// The viewpoint a scene is rendered from.
///
/// ```xml
/// <s:Camera Name="main" Position="[0,-5,2]" Target="[0,0,0]" FieldOfView="45deg" />
/// ```
#[derive(Debug)]
pub struct Camera {
    name: Option<String>,
    pub position: Vector,
    pub target: Vector,
    pub field_of_view: Angle,
}

const PROPS: &[PropertySpec] = &[
    PropertySpec::new("Name", ValueKind::Str),
    PropertySpec::new("Position", ValueKind::Vector),
    PropertySpec::new("Target", ValueKind::Vector),
    PropertySpec::new("FieldOfView", ValueKind::Angle),
];

impl Camera {
    pub fn new() -> Self {
        Self {
            name: None,
            position: Vector::new(0.0, -1.0, 0.0),
            target: Vector::zero(),
            field_of_view: Angle::from_degrees(60.0),
        }
    }

    /// Unit vector from the camera toward its target.
    pub fn direction(&self) -> Vector {
        (self.target - self.position).normalized()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl LmlObject for Camera {
    fn type_name(&self) -> &'static str {
        "Camera"
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
            ("Target", Value::Vector(v)) => self.target = v,
            ("FieldOfView", Value::Angle(a)) => self.field_of_view = a,
            (key, _) => return Err(BindError::NoSlot { key: key.to_string() }),
        }
        Ok(())
    }

    fn add_child(&mut self, child: &dyn LmlObject) -> Result<(), ChildError> {
        Err(ChildError {
            child_type: child.type_name(),
            reason: "Camera does not accept children",
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
