use serde::{Deserialize, Serialize};

/// One person entry of a feed item.
///
/// For arXiv feeds the first author's `name` holds every author of the
/// preprint as comma-joined anchor markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawAuthor {
    pub name: String,
}

/// A feed entry as supplied by the feed source, before any parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawEntry {
    /// Title including the trailing `(arXiv:... [subject])` block.
    pub title: String,
    pub authors: Vec<RawAuthor>,
    /// Link to the preprint's abstract page.
    pub id: String,
    /// Abstract text.
    pub summary: String,
}

/// A fully parsed feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParsedRecord {
    pub link: String,
    /// Title with the metadata block removed.
    pub title: String,
    pub authors: Vec<String>,
    /// The raw author markup the names were taken from.
    pub authors_html_string: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Subject code without brackets, e.g. `hep-th`.
    pub subject: String,
    /// True when the entry revises a previously announced preprint.
    pub updated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arxiv_id: Option<String>,
}

impl ParsedRecord {
    /// A new submission whose primary subject is `category`.
    pub fn is_new_in(&self, category: &str) -> bool {
        !self.updated && self.subject == category
    }

    /// Listed in the `category` feed but filed under another subject.
    pub fn is_cross_list(&self, category: &str) -> bool {
        self.subject != category
    }
}
