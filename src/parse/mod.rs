//! Text parsing for arXiv feed entries.
//!
//! - [`title`] - splits an entry title into clean text and its
//!   `(arXiv:... [subject] UPDATED)` metadata block
//! - [`authors`] - strips anchor markup from the comma-joined author string
//! - [`sexpr`] - the nested parenthesis tokenizer the title parser is built on
//!
//! All functions here are pure and independent per entry.

mod authors;
pub mod sexpr;
mod title;

pub use authors::{parse_authors, AuthorError, ParsedAuthors};
pub use title::{parse_title, ParsedTitle, TitleError};
