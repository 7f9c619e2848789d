use serde::Deserialize;
use thiserror::Error;

use super::record::{ParsedRecord, RawEntry};
use crate::parse::{parse_authors, parse_title, AuthorError, TitleError};

/// What to do when a single entry fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Drop the entry, keep going, and report it in [`Assembly::failures`].
    #[default]
    Skip,
    /// Stop at the first malformed entry.
    Abort,
}

/// Why one entry could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("bad title: {0}")]
    Title(#[from] TitleError),

    #[error("bad authors: {0}")]
    Authors(#[from] AuthorError),
}

/// A failed entry, identified by its position in the feed and its link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("entry {index} ({link}): {error}")]
pub struct EntryFailure {
    pub index: usize,
    pub link: String,
    #[source]
    pub error: EntryError,
}

/// Output of a skip-and-report assembly run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    /// Records for every well-formed entry, in feed order.
    pub records: Vec<ParsedRecord>,
    /// Entries that were skipped, in feed order.
    pub failures: Vec<EntryFailure>,
}

/// Builds the record for a single entry.
pub fn assemble_entry(entry: &RawEntry) -> Result<ParsedRecord, EntryError> {
    let title = parse_title(&entry.title)?;
    let (authors, authors_html_string) = parse_authors(&entry.authors)?.into_parts();

    Ok(ParsedRecord {
        link: entry.id.clone(),
        title: title.title,
        authors,
        authors_html_string,
        abstract_text: entry.summary.clone(),
        subject: title.subject,
        updated: title.updated,
        arxiv_id: title.arxiv_id,
    })
}

/// Assembles every entry, skipping and reporting the malformed ones.
///
/// Entries are independent: a bad entry never affects the records of its
/// neighbours, and output order matches input order.
pub fn assemble(entries: &[RawEntry]) -> Assembly {
    let mut assembly = Assembly::default();

    for (index, entry) in entries.iter().enumerate() {
        match assemble_entry(entry) {
            Ok(record) => assembly.records.push(record),
            Err(error) => {
                tracing::warn!(
                    index = index,
                    link = %entry.id,
                    error = %error,
                    "Skipping malformed feed entry"
                );
                assembly.failures.push(EntryFailure {
                    index,
                    link: entry.id.clone(),
                    error,
                });
            }
        }
    }

    tracing::debug!(
        records = assembly.records.len(),
        skipped = assembly.failures.len(),
        "Assembled feed entries"
    );
    assembly
}

/// Assembles every entry, aborting on the first malformed one.
pub fn assemble_strict(entries: &[RawEntry]) -> Result<Vec<ParsedRecord>, EntryFailure> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            assemble_entry(entry).map_err(|error| EntryFailure {
                index,
                link: entry.id.clone(),
                error,
            })
        })
        .collect()
}

/// Assembles `entries` under the given [`FailurePolicy`].
///
/// With [`FailurePolicy::Abort`] a successful run never has failures.
pub fn assemble_with(
    entries: &[RawEntry],
    policy: FailurePolicy,
) -> Result<Assembly, EntryFailure> {
    match policy {
        FailurePolicy::Skip => Ok(assemble(entries)),
        FailurePolicy::Abort => Ok(Assembly {
            records: assemble_strict(entries)?,
            failures: Vec::new(),
        }),
    }
}
