use std::io::Read;
use std::path::Path;

use feed_rs::parser;
use thiserror::Error;

use super::record::{RawAuthor, RawEntry};

/// Largest feed document accepted from a file or stdin.
pub const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB

const ARXIV_RSS_BASE: &str = "http://export.arxiv.org/rss/";

/// Errors that can occur while loading a feed document.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read feed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Feed too large (max {0} bytes)")]
    TooLarge(usize),

    /// Not parseable as RSS or Atom
    #[error("Parse error: {0}")]
    Parse(#[from] parser::ParseFeedError),
}

/// The conventional arXiv RSS URL for a category, e.g. `http://export.arxiv.org/rss/hep-th`.
pub fn feed_url(category: &str) -> String {
    format!("{ARXIV_RSS_BASE}{category}")
}

/// Reads a feed document from `path`, or from stdin when `path` is `-`.
pub fn read_feed(path: &Path) -> Result<Vec<u8>, SourceError> {
    if path == Path::new("-") {
        read_limited(std::io::stdin().lock(), MAX_FEED_SIZE)
    } else {
        read_limited(std::fs::File::open(path)?, MAX_FEED_SIZE)
    }
}

fn read_limited<R: Read>(reader: R, limit: usize) -> Result<Vec<u8>, SourceError> {
    let mut bytes = Vec::new();
    // One byte past the limit is enough to tell an oversized document apart.
    reader.take(limit as u64 + 1).read_to_end(&mut bytes)?;

    if bytes.len() > limit {
        return Err(SourceError::TooLarge(limit));
    }
    Ok(bytes)
}

/// Parses an RSS/Atom document into raw entries, in document order.
///
/// - `title`: the entry title text, empty when absent
/// - `authors`: one [`RawAuthor`] per person (`dc:creator`, `<author>`)
/// - `id`: the first link, falling back to the entry id
/// - `summary`: the summary text, falling back to the content body
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<RawEntry>, SourceError> {
    let feed = parser::parse(bytes)?;

    let entries: Vec<RawEntry> = feed
        .entries
        .into_iter()
        .map(|entry| {
            let link = entry
                .links
                .first()
                .map(|l| l.href.trim().to_string())
                .filter(|href| !href.is_empty());
            let summary = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .unwrap_or_default();

            RawEntry {
                title: entry.title.map(|t| t.content).unwrap_or_default(),
                authors: entry
                    .authors
                    .into_iter()
                    .map(|person| RawAuthor { name: person.name })
                    .collect(),
                id: link.unwrap_or(entry.id),
                summary,
            }
        })
        .collect();

    tracing::debug!(entries = entries.len(), "Parsed feed document");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SINGLE_ITEM_RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/"><channel>
    <title>hep-th updates on arXiv.org</title>
    <item>
        <title>Foo. (arXiv:2301.00001v1 [hep-th])</title>
        <link>http://arxiv.org/abs/2301.00001</link>
        <description>We study foo.</description>
        <dc:creator>&lt;a href="http://arxiv.org/a/doe_j_1"&gt;Jane Doe&lt;/a&gt;</dc:creator>
    </item>
</channel></rss>"#;

    #[test]
    fn test_parse_single_item() {
        let entries = parse_feed(SINGLE_ITEM_RSS.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.title, "Foo. (arXiv:2301.00001v1 [hep-th])");
        assert_eq!(entry.id, "http://arxiv.org/abs/2301.00001");
        assert_eq!(entry.summary, "We study foo.");
        assert_eq!(
            entry.authors[0].name,
            "<a href=\"http://arxiv.org/a/doe_j_1\">Jane Doe</a>"
        );
    }

    #[test]
    fn test_id_falls_back_to_guid_without_link() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
    <item><guid isPermaLink="false">oai:arXiv.org:2301.00002</guid><title>Test</title></item>
</channel></rss>"#;
        let entries = parse_feed(rss.as_bytes()).unwrap();
        assert_eq!(entries[0].id, "oai:arXiv.org:2301.00002");
        assert!(entries[0].authors.is_empty());
        assert_eq!(entries[0].summary, "");
    }

    #[test]
    fn test_empty_channel() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel></channel></rss>"#;
        assert!(parse_feed(rss.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_xml_is_parse_error() {
        let err = parse_feed(b"<not valid xml").unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn test_read_limited_accepts_exact_limit() {
        let bytes = read_limited(&b"abcd"[..], 4).unwrap();
        assert_eq!(bytes, b"abcd");
    }

    #[test]
    fn test_read_limited_rejects_oversized() {
        let err = read_limited(&b"abcde"[..], 4).unwrap_err();
        assert!(matches!(err, SourceError::TooLarge(4)));
    }

    #[test]
    fn test_read_feed_missing_file() {
        let err = read_feed(Path::new("/tmp/arxfeed_test_nonexistent_feed.xml")).unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[test]
    fn test_read_feed_from_file() {
        let dir = std::env::temp_dir().join("arxfeed_source_test_read");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("hep-th.xml");
        std::fs::write(&path, SINGLE_ITEM_RSS).unwrap();

        let bytes = read_feed(&path).unwrap();
        assert_eq!(parse_feed(&bytes).unwrap().len(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_feed_url() {
        assert_eq!(feed_url("hep-th"), "http://export.arxiv.org/rss/hep-th");
    }
}
