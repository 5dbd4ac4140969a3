//! CSS-like selectors over draw commands.
//!
//! Supports:
//! - `"rect"` - by element (`rect`, `text`, `g`)
//! - `"#tooltip"` - by ID
//! - `".tile"` - by class
//! - `"[data-name='Action']"` / `"[data-value]"` - by attribute value or presence
//! - `"rect.tile[data-category='Drama']"` - compounds of the above
//! - `"g.g rect"` / `"g > text"` - descendant and child combinators

use canopy_core::DrawCommand;

/// Parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Match by element name
    Type(String),
    /// Match by ID (e.g., `#tooltip`)
    Id(String),
    /// Match by class (e.g., `.tile`)
    Class(String),
    /// Match by attribute (e.g., `[data-value='500']`), or its presence
    Attribute {
        /// Attribute name
        name: String,
        /// Required value; `None` only checks presence
        value: Option<String>,
    },
    /// All parts must match the same element
    Compound(Vec<Selector>),
    /// Right side matches an element nested anywhere inside a left-side match
    Descendant(Box<Selector>, Box<Selector>),
    /// Right side matches an element directly inside a left-side match
    Child(Box<Selector>, Box<Selector>),
}

impl Selector {
    /// Parse selector text such as `rect.tile[data-name='Action']`.
    ///
    /// # Errors
    ///
    /// [`SelectorError`] describing the first malformed part.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        SelectorParser::new(input).parse()
    }

    /// Check a single command, ignoring combinators.
    #[must_use]
    pub fn matches_command(&self, command: &DrawCommand) -> bool {
        match self {
            Self::Type(name) => command.element() == Some(name.as_str()),
            Self::Id(id) => command.attrs().and_then(|a| a.get("id")) == Some(id.as_str()),
            Self::Class(class) => command.attrs().is_some_and(|a| a.has_class(class)),
            Self::Attribute { name, value } => {
                let actual = command.attrs().and_then(|a| a.get(name));
                match value {
                    Some(expected) => actual == Some(expected.as_str()),
                    None => actual.is_some(),
                }
            }
            Self::Compound(parts) => parts.iter().all(|p| p.matches_command(command)),
            Self::Descendant(_, subject) | Self::Child(_, subject) => {
                subject.matches_command(command)
            }
        }
    }

    /// Check a command given its enclosing groups, innermost last.
    #[must_use]
    pub fn matches(&self, command: &DrawCommand, ancestors: &[&DrawCommand]) -> bool {
        match self {
            Self::Descendant(ancestor, subject) => {
                subject.matches(command, ancestors)
                    && (0..ancestors.len())
                        .rev()
                        .any(|i| ancestor.matches(ancestors[i], &ancestors[..i]))
            }
            Self::Child(parent, subject) => {
                subject.matches(command, ancestors)
                    && ancestors.split_last().is_some_and(|(last, rest)| parent.matches(last, rest))
            }
            _ => self.matches_command(command),
        }
    }
}

/// Recursive-descent reader for [`Selector`] text.
pub struct SelectorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parse everything, combinators included.
    pub fn parse(&mut self) -> Result<Selector, SelectorError> {
        self.skip_whitespace();
        if self.peek_char().is_none() {
            return Err(SelectorError::Empty);
        }

        let mut selector = self.parse_compound()?;
        loop {
            let had_space = self.skip_whitespace();
            match self.peek_char() {
                None => return Ok(selector),
                Some('>') => {
                    self.advance();
                    self.skip_whitespace();
                    let subject = self.parse_compound()?;
                    selector = Selector::Child(Box::new(selector), Box::new(subject));
                }
                Some(_) if had_space => {
                    let subject = self.parse_compound()?;
                    selector = Selector::Descendant(Box::new(selector), Box::new(subject));
                }
                Some(c) => return Err(SelectorError::UnexpectedChar(c)),
            }
        }
    }

    fn parse_compound(&mut self) -> Result<Selector, SelectorError> {
        let mut parts = vec![self.parse_simple()?];
        while let Some(c) = self.peek_char() {
            if matches!(c, '#' | '.' | '[') {
                parts.push(self.parse_simple()?);
            } else {
                break;
            }
        }
        Ok(if parts.len() == 1 {
            parts.remove(0)
        } else {
            Selector::Compound(parts)
        })
    }

    fn parse_simple(&mut self) -> Result<Selector, SelectorError> {
        let first = self.peek_char().ok_or(SelectorError::ExpectedIdentifier)?;

        match first {
            '#' => {
                self.advance();
                Ok(Selector::Id(self.read_identifier()?))
            }
            '.' => {
                self.advance();
                Ok(Selector::Class(self.read_identifier()?))
            }
            '[' => self.parse_attribute(),
            _ if first.is_alphabetic() => Ok(Selector::Type(self.read_identifier()?)),
            _ => Err(SelectorError::UnexpectedChar(first)),
        }
    }

    fn parse_attribute(&mut self) -> Result<Selector, SelectorError> {
        self.advance();

        let name = self.read_until_any(&['=', ']']).trim().to_string();
        if name.is_empty() {
            return Err(SelectorError::InvalidAttribute);
        }

        let value = if self.peek_char() == Some('=') {
            self.advance();
            let quote = self.peek_char().filter(|c| *c == '\'' || *c == '"');
            let value = match quote {
                Some(q) => {
                    self.advance();
                    let value = self.read_until_any(&[q]);
                    if self.peek_char() != Some(q) {
                        return Err(SelectorError::UnclosedAttribute);
                    }
                    self.advance();
                    value
                }
                None => self.read_until_any(&[']']).trim().to_string(),
            };
            Some(value)
        } else {
            None
        };

        if self.peek_char() != Some(']') {
            return Err(SelectorError::UnclosedAttribute);
        }
        self.advance();

        Ok(Selector::Attribute { name, value })
    }

    fn read_identifier(&mut self) -> Result<String, SelectorError> {
        let rest = &self.input[self.pos..];
        let len = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(SelectorError::ExpectedIdentifier);
        }
        self.pos += len;
        Ok(rest[..len].to_string())
    }

    fn read_until_any(&mut self, stops: &[char]) -> String {
        let rest = &self.input[self.pos..];
        let len = rest.find(stops).unwrap_or(rest.len());
        self.pos += len;
        rest[..len].to_string()
    }

    fn skip_whitespace(&mut self) -> bool {
        let rest = &self.input[self.pos..];
        let skipped = rest.len() - rest.trim_start().len();
        self.pos += skipped;
        skipped > 0
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }
}

/// Why selector text was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// Nothing but whitespace
    Empty,
    /// A character no selector part starts with
    UnexpectedChar(char),
    /// `#`, `.` or a combinator not followed by a name
    ExpectedIdentifier,
    /// `[]` or `[=value]`
    InvalidAttribute,
    /// Missing `]` or closing quote
    UnclosedAttribute,
}

impl std::fmt::Display for SelectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("selector is empty"),
            Self::UnexpectedChar(c) => write!(f, "'{c}' cannot start a selector part"),
            Self::ExpectedIdentifier => f.write_str("name expected"),
            Self::InvalidAttribute => f.write_str("attribute selector has no name"),
            Self::UnclosedAttribute => f.write_str("attribute selector is not closed"),
        }
    }
}

impl std::error::Error for SelectorError {}
