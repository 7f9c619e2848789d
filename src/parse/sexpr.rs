//! Nested parenthesis tokenizer.
//!
//! Reads groups such as `(arXiv:2301.00001 [hep-th] (note) UPDATED)` into a
//! tree of [`Node`]s. Atoms are maximal runs of characters that are neither
//! whitespace nor parentheses. The parser keeps an explicit stack instead of
//! recursing, and caps nesting at [`MAX_DEPTH`].

use thiserror::Error;

/// Maximum nesting depth accepted for a single group.
pub const MAX_DEPTH: usize = 32;

/// One element of a parenthesized group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Atom(String),
    List(Vec<Node>),
}

impl Node {
    /// Returns the atom text, or `None` for a nested list.
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Node::Atom(text) => Some(text),
            Node::List(_) => None,
        }
    }
}

/// Errors raised while reading a parenthesized group.
///
/// Byte offsets refer to the string handed to the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SexprError {
    #[error("expected `(` at start of group")]
    ExpectedOpen,

    #[error("unbalanced parentheses: {0} group(s) never closed")]
    Unbalanced(usize),

    #[error("unexpected `)` at byte {0}")]
    UnexpectedClose(usize),

    #[error("unexpected trailing input: {0:?}")]
    TrailingInput(String),

    #[error("nesting exceeds maximum of {max} levels")]
    TooDeep { max: usize },
}

/// Parses one balanced group from the start of `input`.
///
/// Leading whitespace is skipped. Returns the elements of the outermost
/// group together with whatever follows its closing `)`.
///
/// ```
/// use arxfeed::parse::sexpr::{parse_prefix, Node};
///
/// let (nodes, rest) = parse_prefix("(a (b c)) tail").unwrap();
/// assert_eq!(nodes[0], Node::Atom("a".into()));
/// assert_eq!(rest, " tail");
/// ```
pub fn parse_prefix(input: &str) -> Result<(Vec<Node>, &str), SexprError> {
    let body = input.trim_start();
    let offset = input.len() - body.len();

    if !body.starts_with('(') {
        return Err(SexprError::ExpectedOpen);
    }

    let mut stack: Vec<Vec<Node>> = Vec::new();
    let mut atom_start: Option<usize> = None;

    for (i, c) in body.char_indices() {
        let is_boundary = c == '(' || c == ')' || c.is_whitespace();

        if is_boundary {
            if let Some(start) = atom_start.take() {
                // The first byte is `(`, so an atom always has an open group.
                if let Some(top) = stack.last_mut() {
                    top.push(Node::Atom(body[start..i].to_string()));
                }
            }
        }

        match c {
            '(' => {
                if stack.len() >= MAX_DEPTH {
                    return Err(SexprError::TooDeep { max: MAX_DEPTH });
                }
                stack.push(Vec::new());
            }
            ')' => {
                // Never empty here: the outer group returns on its own `)`.
                let finished = stack
                    .pop()
                    .ok_or(SexprError::UnexpectedClose(offset + i))?;
                match stack.last_mut() {
                    Some(parent) => parent.push(Node::List(finished)),
                    None => return Ok((finished, &body[i + 1..])),
                }
            }
            _ if is_boundary => {}
            _ => {
                if atom_start.is_none() {
                    atom_start = Some(i);
                }
            }
        }
    }

    Err(SexprError::Unbalanced(stack.len()))
}

/// Parses `input` as exactly one group, allowing only whitespace after it.
pub fn parse_group(input: &str) -> Result<Vec<Node>, SexprError> {
    let (nodes, rest) = parse_prefix(input)?;
    let trailing = rest.trim_start();

    if trailing.is_empty() {
        Ok(nodes)
    } else if trailing.starts_with(')') {
        Err(SexprError::UnexpectedClose(input.len() - trailing.len()))
    } else {
        Err(SexprError::TrailingInput(trailing.to_string()))
    }
}
