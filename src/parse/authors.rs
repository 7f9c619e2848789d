use thiserror::Error;

use crate::feed::RawAuthor;

/// Author names recovered from an entry's author markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAuthors {
    /// Display names in the order they appear in the markup.
    pub names: Vec<String>,
    /// The raw author string, unmodified.
    pub joined: String,
}

impl ParsedAuthors {
    /// Returns `(names, joined)`.
    pub fn into_parts(self) -> (Vec<String>, String) {
        (self.names, self.joined)
    }
}

/// Errors that can occur while splitting author markup.
///
/// Fragment variants carry the zero-based position of the offending
/// fragment and its raw text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorError {
    #[error("entry has no author field")]
    Missing,

    #[error("author {index} has no opening tag: {fragment:?}")]
    NoOpeningTag { index: usize, fragment: String },

    #[error("author {index} does not end with a closing tag: {fragment:?}")]
    NoClosingTag { index: usize, fragment: String },

    #[error("author {index} has an empty name: {fragment:?}")]
    EmptyName { index: usize, fragment: String },
}

/// Splits the author markup of a feed entry into display names.
///
/// arXiv publishes all authors of an entry as one string in the first
/// author's `name`, each wrapped in an anchor and separated by commas:
///
/// ```text
/// <a href="http://arxiv.org/a/doe_j_1">Jane Doe</a>, <a href="http://arxiv.org/a/roe_j_1">John Roe</a>
/// ```
///
/// Each comma-separated fragment must look like `<tag ...>Name</tag>`. The
/// name runs from just after the first `>` to the start of the closing tag
/// that ends the fragment. Names therefore must not contain commas, and
/// unwrapped plain-text names are rejected rather than guessed at.
///
/// # Errors
///
/// Returns [`AuthorError::Missing`] for an empty author list. Otherwise the
/// first malformed fragment fails the whole list with [`AuthorError::NoOpeningTag`],
/// [`AuthorError::NoClosingTag`] or [`AuthorError::EmptyName`].
pub fn parse_authors(authors: &[RawAuthor]) -> Result<ParsedAuthors, AuthorError> {
    let joined = authors.first().ok_or(AuthorError::Missing)?.name.as_str();

    let names = joined
        .split(',')
        .enumerate()
        .map(|(index, fragment)| strip_markup(index, fragment))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedAuthors {
        names,
        joined: joined.to_string(),
    })
}

fn strip_markup(index: usize, fragment: &str) -> Result<String, AuthorError> {
    let (_, inner) = fragment
        .split_once('>')
        .ok_or_else(|| AuthorError::NoOpeningTag {
            index,
            fragment: fragment.to_string(),
        })?;

    let inner = inner.trim_end();
    let close = inner
        .rfind("</")
        .filter(|&at| is_closing_tag(&inner[at..]))
        .ok_or_else(|| AuthorError::NoClosingTag {
            index,
            fragment: fragment.to_string(),
        })?;

    let name = &inner[..close];
    if name.trim().is_empty() {
        return Err(AuthorError::EmptyName {
            index,
            fragment: fragment.to_string(),
        });
    }

    Ok(name.to_string())
}

/// `</name>` with a non-empty name and nothing after the final `>`.
fn is_closing_tag(tag: &str) -> bool {
    tag.strip_prefix("</")
        .and_then(|rest| rest.strip_suffix('>'))
        .is_some_and(|name| !name.is_empty() && !name.contains(['<', '>']))
}
