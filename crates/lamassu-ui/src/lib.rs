//! Lamassu UI — markup-loaded object graphs.
//!
//! Documents are written in the Lamassu Markup Language (`.lml`), an
//! XML-based format tokenized by the `lamassu-lml` crate. This crate turns
//! a token stream into a live, strongly typed object graph: each element
//! resolves to a concrete type through the [`TypeRegistry`], attributes
//! bind onto object properties, parent/child links are recorded, and named
//! objects become retrievable from the resulting [`UiGraph`].
//!
//! # Quick start
//!
//! ```rust
//! use lamassu_ui::prelude::*;
//!
//! let src = r#"<Ui xmlns="http://lamassu-project.org/lml/controls">
//!     <Dialog Title="Hello">
//!         <Label Name="greet" Text="Hi there" />
//!     </Dialog>
//! </Ui>"#;
//!
//! let graph = load_str(src, &TypeRegistry::standard()).unwrap();
//! let greet: &Label = graph.get_typed("greet").unwrap();
//! assert_eq!(greet.text(), "Hi there");
//! ```
//!
//! # Extending the vocabulary
//!
//! Implement [`LmlObject`](object::LmlObject) for your type and register a
//! factory for it; the loader never calls anything else:
//!
//! ```rust,ignore
//! let mut types = TypeRegistry::standard();
//! types.register("lamassu::controls", "Badge", || Box::new(Badge::new()));
//! let graph = load_str(src, &types)?;
//! ```
//!
//! Loading is a one-shot, single-threaded pass; each call owns its own
//! registries and hands the finished graph to the caller. Any error aborts
//! the whole document; there is no partial loading.

pub mod controls;
pub mod graph;
pub mod loader;
pub mod object;
pub mod registry;
pub mod scene;
pub mod values;

// Top-level re-exports for the common entry points.
pub use graph::UiGraph;
pub use loader::{load_file, load_str, LoadError};
pub use registry::TypeRegistry;

/// Everything you need to load documents and define loadable types.
pub mod prelude {
    pub use crate::controls::{Button, Dialog, Label, Orientation, ProgressBar, Stack};
    pub use crate::graph::{LookupError, ObjectId, UiGraph};
    pub use crate::loader::{load_file, load_str, LoadError, ROOT_TAG};
    pub use crate::object::{BindError, Category, ChildError, LmlObject, PropertySpec};
    pub use crate::registry::{Factory, ResolveError, TypeRegistry, BASE_URI};
    pub use crate::scene::{Camera, Group};
    pub use crate::values::{parse_value, Value, ValueError, ValueKind};

    // Re-export the core primitives everyone needs.
    pub use lamassu_core::coords::{Angle, Vector};
    pub use lamassu_core::paint::Color;
}

#[cfg(test)]
mod load_tests {
    use std::collections::HashSet;

    use crate::controls::{Dialog, Label, Orientation, ProgressBar, Stack};
    use crate::graph::{LookupError, ObjectId, UiGraph};
    use crate::loader::{load_str, LoadError};
    use crate::registry::TypeRegistry;
    use crate::scene::Camera;

    fn load(src: &str) -> Result<UiGraph, LoadError> {
        load_str(src, &TypeRegistry::standard())
    }

    fn ok(src: &str) -> UiGraph {
        load(src).unwrap()
    }

    // ── the §8 example scenario ───────────────────────────────────────────

    #[test]
    fn dialog_with_named_label() {
        let g = ok(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls">
                <Dialog Title="Hello">
                    <Label Name="greet" />
                </Dialog>
            </Ui>
        "#);

        assert_eq!(g.roots().len(), 1);
        let root = g.roots()[0];
        let dialog = g.object(root).as_any().downcast_ref::<Dialog>().unwrap();
        assert_eq!(dialog.title(), "Hello");

        assert_eq!(g.children(root).len(), 1);
        let _label: &Label = g.get_typed("greet").unwrap();
        assert_eq!(g.get_id("greet").unwrap(), g.children(root)[0]);

        // The dialog declared no name, so only one registry entry exists.
        assert_eq!(g.names().count(), 1);
    }

    #[test]
    fn unbindable_property_fails_the_load() {
        let err = load(r##"
            <Ui xmlns="http://lamassu-project.org/lml/controls">
                <Dialog Title="Hello">
                    <Label Name="greet" Color="#ff0000" />
                </Dialog>
            </Ui>
        "##)
        .unwrap_err();
        assert!(matches!(err, LoadError::NotBindable { type_name: "Label", .. }));
    }

    // ── type resolution ───────────────────────────────────────────────────

    #[test]
    fn unknown_type_fails_fast() {
        let err = load(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls">
                <Dialog><Wobble /></Dialog>
            </Ui>
        "#)
        .unwrap_err();
        assert!(matches!(err, LoadError::UnknownType { .. }));
    }

    #[test]
    fn foreign_namespace_fails() {
        let err = load(r#"
            <Ui xmlns="http://example.com/foreign">
                <Dialog />
            </Ui>
        "#)
        .unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedNamespace { .. }));
    }

    #[test]
    fn root_wrapper_is_skipped_in_any_namespace() {
        // `Ui` is scaffolding: never resolved, never part of the graph.
        let g = ok(r#"<Ui xmlns="http://lamassu-project.org/lml/controls"></Ui>"#);
        assert!(g.is_empty());
        assert!(g.roots().is_empty());
    }

    // ── property binding ──────────────────────────────────────────────────

    #[test]
    fn unknown_property_fails() {
        let err = load(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls">
                <Label Wobble="3" />
            </Ui>
        "#)
        .unwrap_err();
        assert!(matches!(err, LoadError::UnknownProperty { type_name: "Label", .. }));
    }

    #[test]
    fn bool_and_float_binding() {
        let g = ok(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls">
                <Dialog Name="d" GrayBackground="false">
                    <Label Name="l" FontSize="22.5" />
                </Dialog>
            </Ui>
        "#);
        assert!(!g.get_typed::<Dialog>("d").unwrap().gray_background());
        assert_eq!(g.get_typed::<Label>("l").unwrap().font_size(), 22.5);
    }

    #[test]
    fn enum_binding() {
        let g = ok(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls">
                <Stack Name="s" Orientation="Vertical" Spacing="4" />
            </Ui>
        "#);
        let s: &Stack = g.get_typed("s").unwrap();
        assert_eq!(s.orientation(), Orientation::Vertical);
        assert_eq!(s.spacing(), 4.0);
    }

    #[test]
    fn bad_enum_variant_is_a_bind_failure() {
        let err = load(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls">
                <Stack Orientation="Sideways" />
            </Ui>
        "#)
        .unwrap_err();
        assert!(matches!(err, LoadError::BindFailure { type_name: "Stack", .. }));
    }

    #[test]
    fn bad_number_is_a_bind_failure() {
        let err = load(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls">
                <Label FontSize="abc" />
            </Ui>
        "#)
        .unwrap_err();
        assert!(matches!(err, LoadError::BindFailure { .. }));
    }

    #[test]
    fn out_of_range_value_is_a_bind_failure() {
        let err = load(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls">
                <ProgressBar Value="1.5" />
            </Ui>
        "#)
        .unwrap_err();
        assert!(matches!(err, LoadError::BindFailure { type_name: "ProgressBar", .. }));
    }

    #[test]
    fn vector_and_angle_binding() {
        let g = ok(r#"
            <Ui xmlns:s="http://lamassu-project.org/lml/scene">
                <s:Camera Name="cam" Position="[1,2,3]" Target="[0,0,0]" FieldOfView="45deg" />
            </Ui>
        "#);
        let cam: &Camera = g.get_typed("cam").unwrap();
        assert_eq!(cam.position, lamassu_core::coords::Vector::new(1.0, 2.0, 3.0));
        assert!((cam.field_of_view.degrees() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn vector_arity_is_a_bind_failure() {
        let err = load(r#"
            <Ui xmlns:s="http://lamassu-project.org/lml/scene">
                <s:Camera Position="[1,2]" />
            </Ui>
        "#)
        .unwrap_err();
        assert!(matches!(err, LoadError::BindFailure { key, .. } if key == "Position"));
    }

    // ── the object registry ───────────────────────────────────────────────

    #[test]
    fn named_objects_round_trip() {
        let g = ok(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls">
                <Dialog Name="settings">
                    <Label Name="a" Text="a-text" />
                    <Label Name="b" Text="b-text" />
                </Dialog>
            </Ui>
        "#);
        for (name, id) in g.names() {
            assert_eq!(g.object(id).name(), Some(name));
        }
        assert_eq!(g.get_typed::<Label>("a").unwrap().text(), "a-text");
        assert_eq!(g.get_typed::<Label>("b").unwrap().text(), "b-text");
    }

    #[test]
    fn duplicate_names_last_write_wins() {
        let g = ok(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls">
                <Label Name="x" Text="first" />
                <Label Name="x" Text="second" />
            </Ui>
        "#);
        // Lookup sees only the later object...
        assert_eq!(g.get_typed::<Label>("x").unwrap().text(), "second");
        // ...while the earlier one is still reachable through the tree.
        assert_eq!(g.len(), 2);
        assert_eq!(g.roots().len(), 2);
    }

    #[test]
    fn lookup_errors_are_recoverable_results() {
        let g = ok(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls">
                <Label Name="greet" />
            </Ui>
        "#);
        assert!(matches!(g.get("missing").unwrap_err(), LookupError::NotFound { .. }));
        let err = g.get_typed::<Dialog>("greet").unwrap_err();
        assert_eq!(
            err,
            LookupError::TypeMismatch {
                name: "greet".to_string(),
                expected: "Dialog",
                actual: "Label"
            }
        );
    }

    // ── tree structure ────────────────────────────────────────────────────

    fn walk(g: &UiGraph, id: ObjectId, visited: &mut HashSet<ObjectId>) {
        assert!(visited.insert(id), "graph revisited a node");
        for &child in g.children(id) {
            assert_eq!(g.parent(child), Some(id));
            walk(g, child, visited);
        }
    }

    #[test]
    fn loaded_graph_is_a_well_formed_tree() {
        let g = ok(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls"
                xmlns:s="http://lamassu-project.org/lml/scene">
                <Dialog Title="Main">
                    <Stack Orientation="Vertical">
                        <Label Text="one" />
                        <Button Label="two" />
                    </Stack>
                    <ProgressBar Value="0.5" />
                </Dialog>
                <s:Group Position="[0,0,1]">
                    <s:Camera Name="cam" />
                </s:Group>
            </Ui>
        "#);
        let mut visited = HashSet::new();
        for &root in g.roots() {
            assert_eq!(g.parent(root), None);
            walk(&g, root, &mut visited);
        }
        assert_eq!(visited.len(), g.len());
    }

    #[test]
    fn self_closing_elements_never_gain_children() {
        let g = ok(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls">
                <Dialog Name="d">
                    <Stack Name="s" />
                    <Label Name="l" />
                </Dialog>
            </Ui>
        "#);
        let s = g.get_id("s").unwrap();
        let l = g.get_id("l").unwrap();
        // The stack was self-closing, so the label is its sibling, not its
        // child.
        assert!(g.children(s).is_empty());
        assert_eq!(g.parent(l), g.parent(s));
        assert_eq!(g.parent(l), g.get_id("d").ok());
    }

    #[test]
    fn incompatible_child_is_rejected() {
        let err = load(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls"
                xmlns:s="http://lamassu-project.org/lml/scene">
                <Dialog><s:Camera /></Dialog>
            </Ui>
        "#)
        .unwrap_err();
        assert!(matches!(err, LoadError::IncompatibleChild { parent: "Dialog", .. }));
    }

    #[test]
    fn button_holds_a_single_content_control() {
        let err = load(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls">
                <Button><Label /><Label /></Button>
            </Ui>
        "#)
        .unwrap_err();
        assert!(matches!(err, LoadError::IncompatibleChild { parent: "Button", .. }));
    }

    // ── inline text ───────────────────────────────────────────────────────

    #[test]
    fn label_text_content() {
        let g = ok(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls">
                <Label Name="l">Hello, world</Label>
            </Ui>
        "#);
        assert_eq!(g.get_typed::<Label>("l").unwrap().text(), "Hello, world");
    }

    #[test]
    fn progress_numeric_text_content() {
        let g = ok(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls">
                <ProgressBar Name="p">0.4</ProgressBar>
            </Ui>
        "#);
        assert_eq!(g.get_typed::<ProgressBar>("p").unwrap().value(), 0.4);
    }

    #[test]
    fn text_on_a_non_text_element_fails() {
        let err = load(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls">
                <Dialog>oops</Dialog>
            </Ui>
        "#)
        .unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedTextContent { type_name: "Dialog" }));
    }

    #[test]
    fn text_outside_any_element_fails() {
        let err = load("<Ui>stray</Ui>").unwrap_err();
        assert!(matches!(err, LoadError::TextOutsideElement));
    }

    #[test]
    fn unparseable_text_content_fails() {
        let err = load(r#"
            <Ui xmlns="http://lamassu-project.org/lml/controls">
                <ProgressBar>high</ProgressBar>
            </Ui>
        "#)
        .unwrap_err();
        assert!(matches!(err, LoadError::TextBindFailure { .. }));
    }

    // ── document balance ──────────────────────────────────────────────────

    #[test]
    fn truncated_document_fails() {
        let err = load(r#"<Ui xmlns="http://lamassu-project.org/lml/controls"><Dialog Title="x">"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedEof));
    }

    #[test]
    fn empty_input_fails() {
        assert!(matches!(load("").unwrap_err(), LoadError::UnexpectedEof));
    }

    #[test]
    fn empty_wrapper_is_a_valid_empty_document() {
        let g = ok("<Ui></Ui>");
        assert!(g.is_empty());
    }
}
