use fnv::FnvHashSet;
use errors::*;

/// Value of a role as written in the text, before variables are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// a nested `(var / concept ...)` definition, holds the variable
    Node(String),
    /// a bare token: a back-reference when a variable of that name exists, a constant otherwise
    Symbol(String),
    /// a double-quoted literal, without the quotes
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEdge {
    pub source: String,
    pub role: String,
    pub target: RawValue,
}

/// Tree-shaped reading of a PENMAN string: variables with their concepts in order of
/// definition, and edges exactly as they are written (inverse roles are kept).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGraph {
    pub top: String,
    pub instances: Vec<(String, String)>,
    pub edges: Vec<RawEdge>,
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    instances: Vec<(String, String)>,
    edges: Vec<RawEdge>,
    defined_vars: FnvHashSet<String>,
}

/// Parse a PENMAN string, e.g. `(t00000 / tombstone.n.01 :ent (x1 / male.n.02 :nam "JAN"))`.
///
/// Whitespace is insignificant and `#` starts a comment that runs to the end of the line.
pub fn parse_raw(text: &str) -> Result<RawGraph> {
    let mut parser = Parser {
        chars: text.chars().collect(),
        pos: 0,
        instances: Vec::new(),
        edges: Vec::new(),
        defined_vars: Default::default(),
    };

    parser.skip_whitespaces();
    match parser.peek() {
        None => return Err(parser.error("empty input")),
        Some('(') => {},
        Some(c) => return Err(parser.error(format!("expected `(` but found `{}`", c))),
    }

    let top = parser.parse_node()?;
    parser.skip_whitespaces();
    match parser.peek() {
        None => {},
        Some(')') => return Err(parser.error("unbalanced parentheses: unmatched trailing `)`")),
        Some(c) => return Err(parser.error(format!("unexpected trailing input starting with `{}`", c))),
    }

    Ok(RawGraph { top, instances: parser.instances, edges: parser.edges })
}

impl Parser {
    #[inline]
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).cloned()
    }

    fn error<S: Into<String>>(&self, message: S) -> Error {
        ErrorKind::MalformedGraph(message.into(), self.pos).into()
    }

    fn skip_whitespaces(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += 1;
            } else if c == '#' {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    /// Read a bare token, stopping at whitespace, parentheses, quotes, `:` and extra `stops`
    fn read_symbol(&mut self, stops: &[char]) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == '(' || c == ')' || c == '"' || c == ':' || stops.contains(&c) {
                break;
            }
            self.pos += 1;
        }

        self.chars[start..self.pos].iter().collect()
    }

    fn read_quoted(&mut self) -> Result<String> {
        let start = self.pos;
        // skip the opening quote
        self.pos += 1;
        let mut value = String::new();

        loop {
            match self.peek() {
                None => {
                    self.pos = start;
                    return Err(self.error("unterminated quoted literal"));
                },
                Some('\\') => {
                    self.pos += 1;
                    match self.peek() {
                        None => {
                            self.pos = start;
                            return Err(self.error("unterminated quoted literal"));
                        },
                        Some(c) => value.push(c),
                    }
                },
                Some('"') => {
                    self.pos += 1;
                    return Ok(value);
                },
                Some(c) => value.push(c),
            }
            self.pos += 1;
        }
    }

    /// Parse `(var / concept :role value ...)` and return the variable
    fn parse_node(&mut self) -> Result<String> {
        // skip the opening parenthesis
        self.pos += 1;
        self.skip_whitespaces();

        let var = self.read_symbol(&['/']);
        if var.is_empty() {
            return Err(self.error("expected a variable after `(`"));
        }

        self.skip_whitespaces();
        if self.peek() != Some('/') {
            return Err(self.error(format!("missing `/` after variable `{}`", var)));
        }
        self.pos += 1;
        self.skip_whitespaces();

        let concept = if self.peek() == Some('"') {
            self.read_quoted()?
        } else {
            self.read_symbol(&[])
        };
        if concept.is_empty() {
            return Err(self.error(format!("missing concept after `/` of variable `{}`", var)));
        }

        if !self.defined_vars.insert(var.clone()) {
            return Err(self.error(format!("variable `{}` is defined twice", var)));
        }
        self.instances.push((var.clone(), concept));

        loop {
            self.skip_whitespaces();
            match self.peek() {
                None => return Err(self.error(format!("unbalanced parentheses: node `{}` is never closed", var))),
                Some(')') => {
                    self.pos += 1;
                    return Ok(var);
                },
                Some(':') => {
                    self.pos += 1;
                    let role = self.read_symbol(&[]);
                    if role.is_empty() {
                        return Err(self.error("empty role label"));
                    }

                    self.skip_whitespaces();
                    let target = match self.peek() {
                        Some('(') => RawValue::Node(self.parse_node()?),
                        Some('"') => RawValue::Literal(self.read_quoted()?),
                        None | Some(')') | Some(':') => {
                            return Err(self.error(format!("role `:{}` has no value", role)));
                        },
                        Some(_) => RawValue::Symbol(self.read_symbol(&[])),
                    };

                    self.edges.push(RawEdge { source: var.clone(), role, target });
                },
                Some(c) => return Err(self.error(format!("unexpected `{}` inside node `{}`", c, var))),
            }
        }
    }
}
