use crate::error::ParseError;

// ── Token ─────────────────────────────────────────────────────────────────

/// One event pulled from an `.lml` document.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// An opening (or self-closing) element tag.
    StartElement {
        /// Resolved namespace URI of the element. Empty when no default
        /// namespace is in scope.
        namespace: String,
        local_name: String,
        /// Attributes in document order. `xmlns` declarations are consumed
        /// by the reader and never appear here.
        attributes: Vec<(String, String)>,
        self_closing: bool,
    },
    EndElement,
    /// Character data between tags, entity-decoded but not trimmed.
    Text(String),
    EndOfDocument,
}

// ── Namespace scope ───────────────────────────────────────────────────────

/// Namespace declarations introduced by a single element, live for its
/// subtree.
struct Scope {
    default_ns: Option<String>,
    prefixes: Vec<(String, String)>,
}

// ── LmlReader ─────────────────────────────────────────────────────────────

/// Single-pass pull reader over an `.lml` document.
///
/// Call [`next_token`](Self::next_token) repeatedly until it returns
/// [`Token::EndOfDocument`], or use [`tokenize`](Self::tokenize) to collect
/// everything at once.
///
/// The reader enforces tag-name matching (`<A></B>` is an error) but does
/// *not* reject input that ends with elements still open: it reports
/// `EndOfDocument` and leaves document-level balance to the consumer, which
/// knows whether a truncated document is fatal.
pub struct LmlReader<'s> {
    src: &'s str,
    pos: usize,
    line: usize,
    col: usize,
    /// Qualified names of open elements, awaiting their closing tags.
    open: Vec<String>,
    scopes: Vec<Scope>,
    done: bool,
}

impl<'s> LmlReader<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0, line: 1, col: 1, open: Vec::new(), scopes: Vec::new(), done: false }
    }

    /// Collect every token up to and including [`Token::EndOfDocument`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let eof = tok == Token::EndOfDocument;
            tokens.push(tok);
            if eof {
                break;
            }
        }
        Ok(tokens)
    }

    /// Pull the next token. Idempotent after `EndOfDocument`.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        if self.done {
            return Ok(Token::EndOfDocument);
        }
        loop {
            match self.peek() {
                None => {
                    self.done = true;
                    return Ok(Token::EndOfDocument);
                }
                Some('<') => {
                    if self.starts_with("<?") {
                        self.skip_until("?>")?;
                    } else if self.starts_with("<!--") {
                        self.skip_until("-->")?;
                    } else if self.starts_with("<!") {
                        // DOCTYPE and friends carry nothing we need.
                        self.skip_until(">")?;
                    } else if self.starts_with("</") {
                        return self.read_end_tag();
                    } else {
                        return self.read_start_tag();
                    }
                }
                Some(_) => {
                    let text = self.read_text()?;
                    if !text.is_empty() {
                        return Ok(Token::Text(text));
                    }
                }
            }
        }
    }

    // ── cursor ────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.src[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn starts_with(&self, pat: &str) -> bool {
        self.src[self.pos..].starts_with(pat)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    /// Advance past the next occurrence of `end` (ASCII-only patterns).
    fn skip_until(&mut self, end: &str) -> Result<(), ParseError> {
        loop {
            if self.starts_with(end) {
                for _ in 0..end.len() {
                    self.advance();
                }
                return Ok(());
            }
            if self.advance().is_none() {
                return Err(self.err(format!("unterminated markup, expected {:?}", end)));
            }
        }
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        ParseError::new(msg, self.line, self.col)
    }

    // ── character data ────────────────────────────────────────────────────

    fn read_text(&mut self) -> Result<String, ParseError> {
        let mut s = String::new();
        loop {
            match self.peek() {
                None | Some('<') => break,
                Some('&') => s.push(self.read_entity()?),
                Some(c) => {
                    self.advance();
                    s.push(c);
                }
            }
        }
        Ok(s)
    }

    /// Decode an entity reference starting at `&`.
    ///
    /// The five predefined XML entities plus numeric character references
    /// (`&#NN;`, `&#xHH;`) are supported.
    fn read_entity(&mut self) -> Result<char, ParseError> {
        self.advance(); // consume `&`
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c != ';' && c != '<' && !c.is_whitespace()) {
            self.advance();
        }
        let src = self.src;
        let name = &src[start..self.pos];
        if self.peek() != Some(';') {
            return Err(self.err(format!("unterminated entity reference &{}", name)));
        }
        self.advance(); // consume `;`
        match name {
            "lt" => Ok('<'),
            "gt" => Ok('>'),
            "amp" => Ok('&'),
            "quot" => Ok('"'),
            "apos" => Ok('\''),
            _ => {
                let code = if let Some(hex) = name.strip_prefix("#x") {
                    u32::from_str_radix(hex, 16).ok()
                } else if let Some(dec) = name.strip_prefix('#') {
                    dec.parse::<u32>().ok()
                } else {
                    None
                };
                code.and_then(char::from_u32)
                    .ok_or_else(|| self.err(format!("unknown entity &{};", name)))
            }
        }
    }

    // ── tags ──────────────────────────────────────────────────────────────

    fn read_start_tag(&mut self) -> Result<Token, ParseError> {
        self.advance(); // consume `<`
        let qname = self.read_name()?;
        let mut scope = Scope { default_ns: None, prefixes: Vec::new() };
        let mut attributes = Vec::new();
        let self_closing;

        loop {
            self.skip_ws();
            match self.peek() {
                Some('>') => {
                    self.advance();
                    self_closing = false;
                    break;
                }
                Some('/') => {
                    self.advance();
                    if self.peek() != Some('>') {
                        return Err(self.err(format!("expected '>' after '/' in <{}>", qname)));
                    }
                    self.advance();
                    self_closing = true;
                    break;
                }
                Some(c) if is_name_char(c) => {
                    let name = self.read_name()?;
                    self.skip_ws();
                    if self.peek() != Some('=') {
                        return Err(self.err(format!("attribute {} is missing '='", name)));
                    }
                    self.advance();
                    self.skip_ws();
                    let value = self.read_quoted()?;
                    if name == "xmlns" {
                        scope.default_ns = Some(value);
                    } else if let Some(prefix) = name.strip_prefix("xmlns:") {
                        scope.prefixes.push((prefix.to_string(), value));
                    } else {
                        attributes.push((name, value));
                    }
                }
                Some(c) => {
                    return Err(self.err(format!("unexpected character {:?} in tag <{}>", c, qname)));
                }
                None => return Err(self.err(format!("unterminated tag <{}>", qname))),
            }
        }

        // Declarations on the element itself are in scope for its own name.
        self.scopes.push(scope);
        let (namespace, local_name) = self.resolve_qname(&qname)?;
        if self_closing {
            self.scopes.pop();
        } else {
            self.open.push(qname);
        }

        Ok(Token::StartElement { namespace, local_name, attributes, self_closing })
    }

    fn read_end_tag(&mut self) -> Result<Token, ParseError> {
        self.advance(); // consume `<`
        self.advance(); // consume `/`
        let qname = self.read_name()?;
        self.skip_ws();
        if self.peek() != Some('>') {
            return Err(self.err(format!("malformed closing tag </{}>", qname)));
        }
        self.advance();
        match self.open.pop() {
            Some(expected) if expected == qname => {
                self.scopes.pop();
                Ok(Token::EndElement)
            }
            Some(expected) => Err(self.err(format!(
                "mismatched closing tag: expected </{}>, got </{}>",
                expected, qname
            ))),
            None => Err(self.err(format!("closing tag </{}> with no open element", qname))),
        }
    }

    fn read_name(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if is_name_char(c)) {
            self.advance();
        }
        if self.pos == start {
            return Err(self.err("expected a name"));
        }
        let src = self.src;
        Ok(src[start..self.pos].to_string())
    }

    fn read_quoted(&mut self) -> Result<String, ParseError> {
        let quote = match self.peek() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.err("expected a quoted attribute value")),
        };
        self.advance();
        let mut s = String::new();
        loop {
            match self.peek() {
                None => return Err(self.err("unterminated attribute value")),
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('&') => s.push(self.read_entity()?),
                Some('<') => return Err(self.err("raw '<' in attribute value")),
                Some(c) => {
                    self.advance();
                    s.push(c);
                }
            }
        }
        Ok(s)
    }

    // ── namespaces ────────────────────────────────────────────────────────

    fn resolve_qname(&self, qname: &str) -> Result<(String, String), ParseError> {
        match qname.split_once(':') {
            Some((prefix, local)) => {
                for scope in self.scopes.iter().rev() {
                    if let Some((_, uri)) = scope.prefixes.iter().rev().find(|(p, _)| p == prefix) {
                        return Ok((uri.clone(), local.to_string()));
                    }
                }
                Err(self.err(format!("undeclared namespace prefix {:?}", prefix)))
            }
            None => {
                let ns = self
                    .scopes
                    .iter()
                    .rev()
                    .find_map(|s| s.default_ns.clone())
                    .unwrap_or_default();
                Ok((ns, qname.to_string()))
            }
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
}

// ── Public entry point ────────────────────────────────────────────────────

/// Tokenize an `.lml` source string in one call.
pub fn tokenize(src: &str) -> Result<Vec<Token>, ParseError> {
    LmlReader::new(src).tokenize()
}
