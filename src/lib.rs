//! Structured records from arXiv RSS feeds.
//!
//! arXiv announces preprints through per-category RSS feeds whose entry
//! titles carry a parenthesized metadata suffix and whose author field is a
//! single comma-joined string of HTML anchors:
//!
//! ```text
//! title:   Quantum Gravity Revisited (arXiv:2301.00001v1 [hep-th] UPDATED)
//! authors: <a href="http://arxiv.org/a/doe_j_1">Jane Doe</a>, <a href="...">John Roe</a>
//! ```
//!
//! - [`parse`] turns those two fields into a clean title, subject, update
//!   flag and an ordered author list
//! - [`feed`] assembles whole feeds into [`feed::ParsedRecord`]s
//! - [`config`] loads the optional TOML config used by the `arxfeed` binary
//!
//! # Example
//!
//! ```
//! use arxfeed::parse::parse_title;
//!
//! let parsed = parse_title("Foo (arXiv:2301.00002 [hep-th] UPDATED)").unwrap();
//! assert_eq!(parsed.title, "Foo ");
//! assert!(parsed.updated);
//! assert_eq!(parsed.subject, "hep-th");
//! ```

pub mod config;
pub mod feed;
pub mod parse;
pub mod util;
