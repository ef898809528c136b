use std::collections::HashMap;
use std::fmt;

use crate::object::LmlObject;
use crate::{controls, scene};

/// Base URI of the lml vocabulary. Every loadable namespace starts with
/// this prefix; anything else is rejected.
pub const BASE_URI: &str = "http://lamassu-project.org/lml";

/// Root module identifier the base URI maps to.
const ROOT_MODULE: &str = "lamassu";

/// Produces a fresh, default-initialized loadable object.
pub type Factory = fn() -> Box<dyn LmlObject>;

// ── ResolveError ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// The element's namespace does not extend [`BASE_URI`]. Foreign
    /// vocabularies are a documented non-goal, rejected rather than
    /// silently skipped.
    UnsupportedNamespace { uri: String },
    /// No factory is registered for this (module, tag) pair.
    UnknownType { module: String, name: String },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::UnsupportedNamespace { uri } => {
                write!(f, "namespace {:?} is not part of the lml vocabulary", uri)
            }
            ResolveError::UnknownType { module, name } => {
                write!(f, "no loadable type {} registered in module {}", name, module)
            }
        }
    }
}

impl std::error::Error for ResolveError {}

// ── TypeRegistry ──────────────────────────────────────────────────────────

/// Maps (module path, tag name) pairs to object factories.
///
/// The registry is a plain value owned by whoever drives a load; there is
/// no process-wide registration. It must be fully populated before the
/// load begins; the loader never discovers types dynamically beyond this
/// table.
pub struct TypeRegistry {
    table: HashMap<(String, String), Factory>,
}

impl TypeRegistry {
    /// An empty registry. Useful for hosts with a fully custom vocabulary.
    pub fn new() -> Self {
        Self { table: HashMap::new() }
    }

    /// A registry pre-populated with every built-in loadable type.
    pub fn standard() -> Self {
        let mut reg = Self::new();

        reg.register("lamassu::controls", "Button", || Box::new(controls::Button::new()));
        reg.register("lamassu::controls", "Dialog", || Box::new(controls::Dialog::new()));
        reg.register("lamassu::controls", "Label", || Box::new(controls::Label::new()));
        reg.register("lamassu::controls", "ProgressBar", || {
            Box::new(controls::ProgressBar::new())
        });
        reg.register("lamassu::controls", "Stack", || Box::new(controls::Stack::new()));

        reg.register("lamassu::scene", "Camera", || Box::new(scene::Camera::new()));
        reg.register("lamassu::scene", "Group", || Box::new(scene::Group::new()));

        reg
    }

    /// Register a factory under a module path (e.g. `lamassu::controls`)
    /// and tag name. Later registrations replace earlier ones.
    pub fn register(&mut self, module: &str, name: &str, factory: Factory) {
        self.table.insert((module.to_string(), name.to_string()), factory);
    }

    /// Resolve an element's namespace URI and tag name to a factory.
    ///
    /// The URI must extend [`BASE_URI`]; its remainder maps onto a module
    /// path (`.../lml/controls` resolves in `lamassu::controls`).
    pub fn resolve(&self, namespace_uri: &str, local_name: &str) -> Result<Factory, ResolveError> {
        let unsupported = || ResolveError::UnsupportedNamespace { uri: namespace_uri.to_string() };
        let rest = namespace_uri.strip_prefix(BASE_URI).ok_or_else(unsupported)?;
        if !(rest.is_empty() || rest.starts_with('/')) {
            return Err(unsupported());
        }
        let module = module_path(rest);
        match self.table.get(&(module.clone(), local_name.to_string())) {
            Some(factory) => Ok(*factory),
            None => Err(ResolveError::UnknownType { module, name: local_name.to_string() }),
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// `""` maps to `lamassu`, `"/controls"` to `lamassu::controls`, and so on
/// down arbitrary path depth.
fn module_path(rest: &str) -> String {
    let mut path = String::from(ROOT_MODULE);
    for seg in rest.split('/').filter(|s| !s.is_empty()) {
        path.push_str("::");
        path.push_str(seg);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_mapping() {
        assert_eq!(module_path(""), "lamassu");
        assert_eq!(module_path("/controls"), "lamassu::controls");
        assert_eq!(module_path("/a/b"), "lamassu::a::b");
    }

    #[test]
    fn resolves_standard_types() {
        let reg = TypeRegistry::standard();
        let uri = format!("{}/controls", BASE_URI);
        reg.resolve(&uri, "Dialog").unwrap();
        reg.resolve(&format!("{}/scene", BASE_URI), "Camera").unwrap();
    }

    #[test]
    fn unknown_type() {
        let reg = TypeRegistry::standard();
        let uri = format!("{}/controls", BASE_URI);
        assert_eq!(
            reg.resolve(&uri, "Bogus").unwrap_err(),
            ResolveError::UnknownType {
                module: "lamassu::controls".to_string(),
                name: "Bogus".to_string()
            }
        );
    }

    #[test]
    fn foreign_namespace_rejected() {
        let reg = TypeRegistry::standard();
        assert!(matches!(
            reg.resolve("http://example.com/other", "Dialog").unwrap_err(),
            ResolveError::UnsupportedNamespace { .. }
        ));
        // Sharing the prefix without a path separator is not an extension.
        assert!(matches!(
            reg.resolve("http://lamassu-project.org/lmlish", "Dialog").unwrap_err(),
            ResolveError::UnsupportedNamespace { .. }
        ));
    }
}
