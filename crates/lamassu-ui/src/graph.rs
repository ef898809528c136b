use std::collections::HashMap;
use std::fmt;

use crate::object::LmlObject;

// ── ObjectId ──────────────────────────────────────────────────────────────

/// Non-owning handle to an object in a [`UiGraph`] arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) usize);

#[derive(Debug)]
struct Node {
    object: Box<dyn LmlObject>,
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
}

// ── LookupError ───────────────────────────────────────────────────────────

/// A failed registry query after a successful load. Recoverable by the
/// caller; never a load failure.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    NotFound { name: String },
    TypeMismatch { name: String, expected: &'static str, actual: &'static str },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::NotFound { name } => {
                write!(f, "there is no object named {} in the document", name)
            }
            LookupError::TypeMismatch { name, expected, actual } => {
                write!(f, "object {} is a {}, not a {}", name, actual, expected)
            }
        }
    }
}

impl std::error::Error for LookupError {}

// ── UiGraph ───────────────────────────────────────────────────────────────

/// The loaded object graph: an arena of objects with parent/child links,
/// plus the name registry populated during the load.
///
/// Invariants upheld by construction:
/// - every object is attached exactly once, at creation time, in document
///   order, so the graph is always a tree;
/// - a parent link, once set, never changes.
#[derive(Debug)]
pub struct UiGraph {
    nodes: Vec<Node>,
    roots: Vec<ObjectId>,
    names: HashMap<String, ObjectId>,
}

impl UiGraph {
    pub(crate) fn new() -> Self {
        Self { nodes: Vec::new(), roots: Vec::new(), names: HashMap::new() }
    }

    /// Append an object, linking it under `parent` (or as a root).
    pub(crate) fn push(&mut self, object: Box<dyn LmlObject>, parent: Option<ObjectId>) -> ObjectId {
        let id = ObjectId(self.nodes.len());
        self.nodes.push(Node { object, parent, children: Vec::new() });
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Register `id` under `name`, last write wins.
    ///
    /// A shadowed object stays reachable through the tree, just not by
    /// name. This overlay behavior is intentional; the warning makes it
    /// visible.
    pub(crate) fn bind_name(&mut self, name: &str, id: ObjectId) {
        if let Some(prev) = self.names.insert(name.to_string(), id) {
            log::warn!("object name {:?} rebound from #{} to #{}", name, prev.0, id.0);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The document's top-level objects, in document order.
    pub fn roots(&self) -> &[ObjectId] {
        &self.roots
    }

    pub fn object(&self, id: ObjectId) -> &dyn LmlObject {
        self.nodes[id.0].object.as_ref()
    }

    pub fn object_mut(&mut self, id: ObjectId) -> &mut dyn LmlObject {
        self.nodes[id.0].object.as_mut()
    }

    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: ObjectId) -> &[ObjectId] {
        &self.nodes[id.0].children
    }

    /// Iterate over registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = (&str, ObjectId)> {
        self.names.iter().map(|(n, id)| (n.as_str(), *id))
    }

    /// Look up a named object's id.
    pub fn get_id(&self, name: &str) -> Result<ObjectId, LookupError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| LookupError::NotFound { name: name.to_string() })
    }

    /// Look up an object by name.
    ///
    /// This isn't type safe; you generally want [`get_typed`](Self::get_typed).
    pub fn get(&self, name: &str) -> Result<&dyn LmlObject, LookupError> {
        self.get_id(name).map(|id| self.object(id))
    }

    /// Look up an object by name and check its concrete type.
    pub fn get_typed<T: LmlObject>(&self, name: &str) -> Result<&T, LookupError> {
        let obj = self.get(name)?;
        obj.as_any().downcast_ref::<T>().ok_or_else(|| LookupError::TypeMismatch {
            name: name.to_string(),
            expected: short_type_name::<T>(),
            actual: obj.type_name(),
        })
    }
}

/// Last path segment of a Rust type name, matching the `type_name()`
/// strings objects report about themselves.
fn short_type_name<T>() -> &'static str {
    std::any::type_name::<T>().rsplit("::").next().unwrap_or("?")
}
