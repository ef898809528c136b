use std::fmt;
use std::path::Path;

use lamassu_lml::{LmlReader, ParseError, Token};

use crate::graph::{ObjectId, UiGraph};
use crate::object::ChildError;
use crate::registry::{ResolveError, TypeRegistry};
use crate::values::parse_value;

/// The reserved root wrapper tag. It exists purely to open and close a
/// document and is never instantiated, named, or linked into the graph.
pub const ROOT_TAG: &str = "Ui";

// ── LoadError ─────────────────────────────────────────────────────────────

/// A whole-document load failure.
///
/// Loading is fail-fast: the first error aborts the pass and the partially
/// built graph is dropped. There is no best-effort mode; a malformed
/// document never produces a half-built graph.
#[derive(Debug)]
pub enum LoadError {
    /// The token reader rejected the document.
    Markup(ParseError),
    Io(std::io::Error),
    UnsupportedNamespace { tag: String, uri: String },
    UnknownType { tag: String, module: String },
    UnknownProperty { type_name: &'static str, key: String },
    NotBindable { type_name: &'static str, key: String },
    BindFailure { type_name: &'static str, key: String, detail: String },
    IncompatibleChild { parent: &'static str, error: ChildError },
    TextOutsideElement,
    UnsupportedTextContent { type_name: &'static str },
    TextBindFailure { type_name: &'static str, detail: String },
    /// The document ended with elements still open, or held no elements
    /// at all.
    UnexpectedEof,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Markup(e) => write!(f, "{}", e),
            LoadError::Io(e) => write!(f, "cannot read document: {}", e),
            LoadError::UnsupportedNamespace { tag, uri } => {
                write!(f, "unable to resolve element {}: {:?} is not a lamassu namespace", tag, uri)
            }
            LoadError::UnknownType { tag, module } => {
                write!(f, "unable to resolve element {} in module {} into a concrete object type", tag, module)
            }
            LoadError::UnknownProperty { type_name, key } => {
                write!(f, "no property named {} on {}", key, type_name)
            }
            LoadError::NotBindable { type_name, key } => {
                write!(f, "property {} on {} is not bindable", key, type_name)
            }
            LoadError::BindFailure { type_name, key, detail } => {
                write!(f, "cannot bind property {} on {}: {}", key, type_name, detail)
            }
            LoadError::IncompatibleChild { parent, error } => {
                write!(f, "{} {}", parent, error)
            }
            LoadError::TextOutsideElement => {
                write!(f, "text content outside of any element")
            }
            LoadError::UnsupportedTextContent { type_name } => {
                write!(f, "{} does not accept text content", type_name)
            }
            LoadError::TextBindFailure { type_name, detail } => {
                write!(f, "cannot parse text content into {}: {}", type_name, detail)
            }
            LoadError::UnexpectedEof => {
                write!(f, "unexpected end of document with unclosed elements")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Markup(e) => Some(e),
            LoadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for LoadError {
    fn from(e: ParseError) -> Self {
        LoadError::Markup(e)
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────

/// Loader progress. A failed transition is represented by the error return
/// itself, so no `Failed` variant is needed here.
#[derive(Debug, PartialEq, Eq)]
enum State {
    /// Nothing seen yet.
    AwaitingRoot,
    /// At least one element (the root wrapper included) has been opened.
    InDocument,
    Done,
}

/// One-shot builder that folds a token stream into a [`UiGraph`].
///
/// A single forward pass with no suspension points: each token either
/// advances the build or aborts it. The parse stack is a cursor down the
/// tree: it owns nothing and tracks only where new objects attach.
struct GraphBuilder<'t> {
    types: &'t TypeRegistry,
    graph: UiGraph,
    stack: Vec<ObjectId>,
    state: State,
}

impl<'t> GraphBuilder<'t> {
    fn new(types: &'t TypeRegistry) -> Self {
        Self { types, graph: UiGraph::new(), stack: Vec::new(), state: State::AwaitingRoot }
    }

    fn feed(&mut self, token: Token) -> Result<(), LoadError> {
        match token {
            Token::StartElement { namespace, local_name, attributes, self_closing } => {
                self.start_element(&namespace, &local_name, &attributes, self_closing)
            }
            Token::EndElement => {
                // Climb one level. Popping past the bottom is a no-op: it
                // absorbs the root wrapper's closing tag.
                self.stack.pop();
                Ok(())
            }
            Token::Text(raw) => self.text(&raw),
            Token::EndOfDocument => {
                if self.state == State::InDocument && self.stack.is_empty() {
                    self.state = State::Done;
                    Ok(())
                } else {
                    Err(LoadError::UnexpectedEof)
                }
            }
        }
    }

    fn start_element(
        &mut self,
        namespace: &str,
        local_name: &str,
        attributes: &[(String, String)],
        self_closing: bool,
    ) -> Result<(), LoadError> {
        self.state = State::InDocument;

        // Document scaffolding: no instance, no parent frame.
        if local_name == ROOT_TAG {
            return Ok(());
        }

        let factory = self.types.resolve(namespace, local_name).map_err(|e| match e {
            ResolveError::UnsupportedNamespace { uri } => {
                LoadError::UnsupportedNamespace { tag: local_name.to_string(), uri }
            }
            ResolveError::UnknownType { module, .. } => {
                LoadError::UnknownType { tag: local_name.to_string(), module }
            }
        })?;
        let mut object = factory();
        let type_name = object.type_name();

        // Bind every attribute in document order.
        for (key, raw) in attributes {
            let desc = object
                .properties()
                .iter()
                .find(|p| p.name == key)
                .copied()
                .ok_or_else(|| LoadError::UnknownProperty { type_name, key: key.clone() })?;
            if !desc.bindable {
                return Err(LoadError::NotBindable { type_name, key: key.clone() });
            }
            let value = parse_value(desc.kind, raw).map_err(|e| LoadError::BindFailure {
                type_name,
                key: key.clone(),
                detail: e.to_string(),
            })?;
            object.set_property(key, value).map_err(|e| LoadError::BindFailure {
                type_name,
                key: key.clone(),
                detail: e.to_string(),
            })?;
        }

        // Let the current parent validate the adoption before anything is
        // recorded.
        let parent = self.stack.last().copied();
        if let Some(pid) = parent {
            let parent_obj = self.graph.object_mut(pid);
            let parent_name = parent_obj.type_name();
            parent_obj
                .add_child(object.as_ref())
                .map_err(|error| LoadError::IncompatibleChild { parent: parent_name, error })?;
        }

        // Attach (parent set exactly once, here) and register the name,
        // last write wins.
        let object_name = object.name().map(str::to_string);
        let id = self.graph.push(object, parent);
        if let Some(name) = object_name.filter(|n| !n.is_empty()) {
            self.graph.bind_name(&name, id);
        }

        if !self_closing {
            self.stack.push(id);
        }
        Ok(())
    }

    fn text(&mut self, raw: &str) -> Result<(), LoadError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        let Some(&id) = self.stack.last() else {
            return Err(LoadError::TextOutsideElement);
        };
        let object = self.graph.object_mut(id);
        let type_name = object.type_name();
        if !object.accepts_text() {
            return Err(LoadError::UnsupportedTextContent { type_name });
        }
        object
            .parse_text(trimmed)
            .map_err(|e| LoadError::TextBindFailure { type_name, detail: e.to_string() })
    }
}

// ── Entry points ──────────────────────────────────────────────────────────

/// Load a document from an in-memory string.
///
/// `types` must already hold a factory for every tag the document uses.
/// On success the caller owns the whole graph; on failure nothing of the
/// partial build is observable.
pub fn load_str(src: &str, types: &TypeRegistry) -> Result<UiGraph, LoadError> {
    let mut reader = LmlReader::new(src);
    let mut builder = GraphBuilder::new(types);
    loop {
        let token = reader.next_token()?;
        let done = token == Token::EndOfDocument;
        builder.feed(token)?;
        if done {
            break;
        }
    }
    log::debug!(
        "loaded {} objects ({} top-level)",
        builder.graph.len(),
        builder.graph.roots().len()
    );
    Ok(builder.graph)
}

/// Load a document from a file path. Equivalent to [`load_str`] once read.
pub fn load_file(path: impl AsRef<Path>, types: &TypeRegistry) -> Result<UiGraph, LoadError> {
    let src = std::fs::read_to_string(path).map_err(LoadError::Io)?;
    load_str(&src, types)
}
