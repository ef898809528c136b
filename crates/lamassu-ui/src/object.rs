use std::any::Any;
use std::fmt;

use crate::values::{Value, ValueKind};

// ── PropertySpec ──────────────────────────────────────────────────────────

/// A bindable-property descriptor: one named, typed slot the loader may set
/// from a markup literal.
#[derive(Debug, Clone, Copy)]
pub struct PropertySpec {
    pub name: &'static str,
    pub kind: ValueKind,
    /// Whether the loader may write this slot. Non-bindable entries exist so
    /// documents that touch them fail with a precise error instead of
    /// "unknown property".
    pub bindable: bool,
}

impl PropertySpec {
    pub const fn new(name: &'static str, kind: ValueKind) -> Self {
        Self { name, kind, bindable: true }
    }

    pub const fn read_only(name: &'static str, kind: ValueKind) -> Self {
        Self { name, kind, bindable: false }
    }
}

// ── Category ──────────────────────────────────────────────────────────────

/// Broad family an object belongs to. Containers validate nesting against
/// it in [`LmlObject::add_child`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Category {
    /// 2D controls.
    Control,
    /// 3D scene objects.
    Scene,
}

// ── Errors ────────────────────────────────────────────────────────────────

/// Rejection from [`LmlObject::set_property`] or [`LmlObject::parse_text`].
#[derive(Debug, Clone, PartialEq)]
pub enum BindError {
    /// No slot with this key accepts the value's kind.
    NoSlot { key: String },
    /// The object rejected the value (range or domain checks).
    Rejected { key: String, reason: &'static str },
    /// Inline text content could not be interpreted.
    BadText { reason: String },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::NoSlot { key } => write!(f, "no bindable slot for property {}", key),
            BindError::Rejected { key, reason } => write!(f, "{} rejected: {}", key, reason),
            BindError::BadText { reason } => write!(f, "{}", reason),
        }
    }
}

impl std::error::Error for BindError {}

/// Rejection from [`LmlObject::add_child`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChildError {
    pub child_type: &'static str,
    pub reason: &'static str,
}

impl fmt::Display for ChildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot adopt {}: {}", self.child_type, self.reason)
    }
}

impl std::error::Error for ChildError {}

// ── LmlObject ─────────────────────────────────────────────────────────────

/// The capability every markup-loadable object implements.
///
/// The loader is the only caller of these hooks: it instantiates objects
/// through the type registry, binds attributes through
/// [`properties`](Self::properties)/[`set_property`](Self::set_property),
/// validates nesting through [`add_child`](Self::add_child), and feeds
/// inline text through [`accepts_text`](Self::accepts_text)/
/// [`parse_text`](Self::parse_text).
///
/// Objects do not own their children or a parent pointer. Structural links
/// live in the [`UiGraph`](crate::graph::UiGraph) arena; `add_child` is the
/// compatibility check a parent applies before the loader records the link.
///
/// # Implementing a custom loadable type
///
/// ```rust,ignore
/// pub struct Badge { name: Option<String>, radius: f64 }
///
/// const PROPS: &[PropertySpec] = &[
///     PropertySpec::new("Name", ValueKind::Str),
///     PropertySpec::new("Radius", ValueKind::Float),
/// ];
///
/// impl LmlObject for Badge {
///     fn type_name(&self) -> &'static str { "Badge" }
///     fn category(&self) -> Category { Category::Control }
///     fn name(&self) -> Option<&str> { self.name.as_deref() }
///     fn properties(&self) -> &'static [PropertySpec] { PROPS }
///     fn set_property(&mut self, key: &str, value: Value) -> Result<(), BindError> {
///         match (key, value) {
///             ("Name", Value::Str(s)) => self.name = Some(s),
///             ("Radius", Value::Float(v)) => self.radius = v,
///             (key, _) => return Err(BindError::NoSlot { key: key.to_string() }),
///         }
///         Ok(())
///     }
///     fn add_child(&mut self, child: &dyn LmlObject) -> Result<(), ChildError> {
///         Err(ChildError { child_type: child.type_name(), reason: "Badge does not accept children" })
///     }
///     fn as_any(&self) -> &dyn Any { self }
/// }
/// ```
pub trait LmlObject: Any + fmt::Debug {
    /// The tag name this object loads from, used in diagnostics and
    /// type-checked registry lookups.
    fn type_name(&self) -> &'static str;

    /// The family this object belongs to.
    fn category(&self) -> Category;

    /// The user-assigned name, if the document bound one.
    fn name(&self) -> Option<&str>;

    /// The object's property table.
    fn properties(&self) -> &'static [PropertySpec];

    /// Store a parsed value. `value` has already been validated against the
    /// matching [`PropertySpec`] kind by the loader.
    fn set_property(&mut self, key: &str, value: Value) -> Result<(), BindError>;

    /// Validate that `child` may nest under this object.
    fn add_child(&mut self, child: &dyn LmlObject) -> Result<(), ChildError>;

    /// Whether inline text content is meaningful for this object.
    fn accepts_text(&self) -> bool {
        false
    }

    /// Consume trimmed inline text content.
    fn parse_text(&mut self, raw: &str) -> Result<(), BindError> {
        let _ = raw;
        Err(BindError::BadText { reason: "element does not accept text content".into() })
    }

    fn as_any(&self) -> &dyn Any;
}
