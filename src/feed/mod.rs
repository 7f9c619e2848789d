//! Feed-level assembly of arXiv entries into parsed records.
//!
//! - **Source**: load an RSS/Atom document and turn it into [`RawEntry`]s
//! - **Assembly**: run the title and author parsers over every entry and
//!   build [`ParsedRecord`]s, skipping or aborting on malformed entries
//!
//! # Architecture
//!
//! - [`source`] - feed document loading and parsing via the `feed-rs` crate
//! - [`assemble`] - per-entry record building and failure policy
//! - [`record`] - input and output data types
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use arxfeed::feed::{assemble, parse_feed, read_feed};
//!
//! let entries = parse_feed(&read_feed(Path::new("hep-th.xml"))?)?;
//! let assembly = assemble(&entries);
//! for record in assembly.records.iter().filter(|r| r.is_new_in("hep-th")) {
//!     println!("{}", record.title);
//! }
//! ```

mod assemble;
mod record;
mod source;

pub use assemble::{
    assemble, assemble_entry, assemble_strict, assemble_with, Assembly, EntryError, EntryFailure,
    FailurePolicy,
};
pub use record::{ParsedRecord, RawAuthor, RawEntry};
pub use source::{feed_url, parse_feed, read_feed, SourceError, MAX_FEED_SIZE};
