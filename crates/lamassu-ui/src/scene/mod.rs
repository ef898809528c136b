//! Built-in 3D scene vocabulary.
//!
//! These types load from the `http://lamassu-project.org/lml/scene`
//! namespace. Rendering them is a backend concern; this module only models
//! what a document can declare.

pub mod camera;
pub mod group;

pub use camera::Camera;
pub use group::Group;
