//! Tokens and streaming reader for the **Lamassu Markup Language** (`.lml`).
//!
//! This crate is intentionally dependency-free so it can be consumed by
//! language-server tooling, editors, and linters without pulling in any
//! engine or UI code.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`error`] | `ParseError` |
//! | [`reader`] | `LmlReader`, `Token`, `tokenize` entry point |
//!
//! # Quick start
//!
//! ```rust
//! use lamassu_lml::{tokenize, Token};
//!
//! let src = r#"<Ui xmlns="http://lamassu-project.org/lml/controls">
//!     <Label Name="greet" Text="Hello" />
//! </Ui>"#;
//!
//! let tokens = tokenize(src).unwrap();
//! assert!(matches!(&tokens[0], Token::StartElement { local_name, .. } if local_name == "Ui"));
//! ```
//!
//! The reader resolves namespace prefixes itself: every
//! [`Token::StartElement`] carries the full namespace URI its tag resolved
//! to, never a raw prefix.

pub mod error;
pub mod reader;

pub use error::ParseError;
pub use reader::{tokenize, LmlReader, Token};

#[cfg(test)]
mod read_tests {
    use super::*;

    fn ok(src: &str) -> Vec<Token> { tokenize(src).unwrap() }
    fn err(src: &str) { tokenize(src).unwrap_err(); }

    const NS: &str = "http://lamassu-project.org/lml/controls";

    #[test]
    fn empty_input_is_just_eof() {
        assert_eq!(ok(""), vec![Token::EndOfDocument]);
    }

    #[test]
    fn simple_element() {
        let tokens = ok(r#"<Label Text="hi"></Label>"#);
        assert_eq!(tokens.len(), 3);
        match &tokens[0] {
            Token::StartElement { namespace, local_name, attributes, self_closing } => {
                assert_eq!(namespace, "");
                assert_eq!(local_name, "Label");
                assert_eq!(attributes, &[("Text".to_string(), "hi".to_string())]);
                assert!(!self_closing);
            }
            other => panic!("expected StartElement, got {:?}", other),
        }
        assert_eq!(tokens[1], Token::EndElement);
    }

    #[test]
    fn self_closing_flag() {
        let tokens = ok("<Label/>");
        assert!(matches!(&tokens[0], Token::StartElement { self_closing: true, .. }));
    }

    #[test]
    fn default_namespace_applies_to_subtree() {
        let tokens = ok(&format!(r#"<Ui xmlns="{NS}"><Label/></Ui>"#));
        for tok in &tokens {
            if let Token::StartElement { namespace, .. } = tok {
                assert_eq!(namespace, NS);
            }
        }
    }

    #[test]
    fn prefixed_namespace() {
        let tokens = ok(&format!(r#"<c:Label xmlns:c="{NS}" Text="x"/>"#));
        match &tokens[0] {
            Token::StartElement { namespace, local_name, attributes, .. } => {
                assert_eq!(namespace, NS);
                assert_eq!(local_name, "Label");
                // xmlns:c must not leak into the attribute list
                assert_eq!(attributes.len(), 1);
            }
            other => panic!("expected StartElement, got {:?}", other),
        }
    }

    #[test]
    fn attribute_order_preserved() {
        let tokens = ok(r#"<Dialog Title="t" Name="n" GrayBackground="true"/>"#);
        match &tokens[0] {
            Token::StartElement { attributes, .. } => {
                let keys: Vec<&str> = attributes.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, ["Title", "Name", "GrayBackground"]);
            }
            other => panic!("expected StartElement, got {:?}", other),
        }
    }

    #[test]
    fn text_is_entity_decoded() {
        let tokens = ok("<Label>a &lt;b&gt; &amp; &#33;</Label>");
        assert_eq!(tokens[1], Token::Text("a <b> & !".to_string()));
    }

    #[test]
    fn attribute_entities() {
        let tokens = ok(r#"<Label Text="&quot;q&quot; &apos;a&apos;"/>"#);
        match &tokens[0] {
            Token::StartElement { attributes, .. } => {
                assert_eq!(attributes[0].1, "\"q\" 'a'");
            }
            other => panic!("expected StartElement, got {:?}", other),
        }
    }

    #[test]
    fn single_quoted_attributes() {
        ok("<Label Text='hi'/>");
    }

    #[test]
    fn prolog_comments_doctype_skipped() {
        let tokens = ok("<?xml version=\"1.0\"?><!-- header --><Ui><!-- body --></Ui>");
        assert_eq!(tokens.len(), 3); // start, end, eof
    }

    #[test]
    fn unclosed_elements_still_reach_eof() {
        // Balance is the consumer's concern; the reader just runs out.
        let tokens = ok("<Ui><Dialog>");
        assert_eq!(tokens.last(), Some(&Token::EndOfDocument));
    }

    #[test]
    fn error_positions_are_tracked() {
        let e = tokenize("<Ui>\n  <Label Text=oops/>\n</Ui>").unwrap_err();
        assert_eq!(e.line, 2);
    }

    #[test] fn err_mismatched_close() { err("<A></B>"); }
    #[test] fn err_stray_close() { err("</A>"); }
    #[test] fn err_undeclared_prefix() { err("<c:Label/>"); }
    #[test] fn err_unterminated_attr() { err(r#"<Label Text="oops/>"#); }
    #[test] fn err_unterminated_comment() { err("<!-- oops"); }
    #[test] fn err_unknown_entity() { err("<a>&bogus;</a>"); }
    #[test] fn err_raw_lt_in_attr() { err(r#"<a b="<"/>"#); }
}
