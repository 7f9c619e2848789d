use thiserror::Error;

use super::sexpr::{self, Node, SexprError};

/// Last token of the metadata block when an entry revises an earlier announcement.
const UPDATED_MARKER: &str = "UPDATED";
const ARXIV_ID_PREFIX: &str = "arXiv:";

/// A feed entry title split into its text and metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle {
    /// Everything before the metadata block, untrimmed (usually ends with a space).
    pub title: String,
    /// Whether the metadata block ends with `UPDATED`.
    pub updated: bool,
    /// Subject code with its brackets removed, e.g. `hep-th`.
    pub subject: String,
    /// Identifier from a leading `arXiv:` token, e.g. `2301.00001v1`.
    pub arxiv_id: Option<String>,
}

impl ParsedTitle {
    /// Returns `(title, updated, subject)`.
    pub fn into_parts(self) -> (String, bool, String) {
        (self.title, self.updated, self.subject)
    }
}

/// Errors that can occur while splitting a feed entry title.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TitleError {
    /// The title contains no `(`, so there is no metadata block to split off.
    #[error("title has no parenthesized metadata block")]
    NoMetadataBlock,

    /// The metadata block is not a balanced parenthesized group.
    #[error("metadata block is not a balanced group: {0}")]
    Metadata(#[from] SexprError),

    /// The group parsed but carries no usable subject.
    #[error("malformed metadata block: {0}")]
    MalformedMetadata(String),
}

/// Splits an arXiv feed title into clean title, update flag and subject.
///
/// The metadata block starts at the last `(` of the title. Its final element
/// is either the bracketed subject or `UPDATED`, in which case the subject is
/// the element before it. Text after the block's closing `)` is ignored.
///
/// Re-parsing the returned `title` is not supported: a clean title without any
/// `(` fails with [`TitleError::NoMetadataBlock`].
///
/// # Errors
///
/// - [`TitleError::NoMetadataBlock`] if the title has no `(`
/// - [`TitleError::Metadata`] if the block is unbalanced
/// - [`TitleError::MalformedMetadata`] if the block is empty, holds only
///   `UPDATED`, or its subject token is not of the form `[code]`
///
/// # Examples
///
/// ```
/// use arxfeed::parse::parse_title;
///
/// let parsed = parse_title("Quantum Gravity Revisited (arXiv:2301.00001 [hep-th])").unwrap();
/// assert_eq!(
///     parsed.into_parts(),
///     ("Quantum Gravity Revisited ".to_string(), false, "hep-th".to_string())
/// );
/// ```
pub fn parse_title(raw: &str) -> Result<ParsedTitle, TitleError> {
    let split = raw.rfind('(').ok_or(TitleError::NoMetadataBlock)?;
    let (title, metadata) = raw.split_at(split);
    let (group, _trailing) = sexpr::parse_prefix(metadata)?;

    let (updated, subject) = match group.as_slice() {
        [.., subject, Node::Atom(marker)] if marker == UPDATED_MARKER => (true, subject),
        [Node::Atom(marker)] if marker == UPDATED_MARKER => {
            return Err(TitleError::MalformedMetadata(format!(
                "`{UPDATED_MARKER}` without a subject"
            )));
        }
        [.., subject] => (false, subject),
        [] => {
            return Err(TitleError::MalformedMetadata(
                "empty metadata block".to_string(),
            ));
        }
    };

    let arxiv_id = group
        .first()
        .and_then(Node::as_atom)
        .and_then(|token| token.strip_prefix(ARXIV_ID_PREFIX))
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    Ok(ParsedTitle {
        title: title.to_string(),
        updated,
        subject: unbracket_subject(subject)?.to_string(),
        arxiv_id,
    })
}

fn unbracket_subject(node: &Node) -> Result<&str, TitleError> {
    let token = node.as_atom().ok_or_else(|| {
        TitleError::MalformedMetadata("subject position holds a nested group".to_string())
    })?;

    token
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .filter(|inner| !inner.is_empty())
        .ok_or_else(|| {
            TitleError::MalformedMetadata(format!("subject `{token}` is not of the form [code]"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn parts(raw: &str) -> (String, bool, String) {
        parse_title(raw).unwrap().into_parts()
    }

    #[test]
    fn test_new_submission() {
        assert_eq!(
            parts("Quantum Gravity Revisited (arXiv:2301.00001 [hep-th])"),
            ("Quantum Gravity Revisited ".to_string(), false, "hep-th".to_string())
        );
    }

    #[test]
    fn test_updated_submission() {
        assert_eq!(
            parts("Foo (arXiv:2301.00002 [hep-th] UPDATED)"),
            ("Foo ".to_string(), true, "hep-th".to_string())
        );
    }

    #[test]
    fn test_cross_list_subject() {
        let parsed = parse_title("Black Hole Entropy. (arXiv:2301.00003v2 [gr-qc])").unwrap();
        assert_eq!(parsed.subject, "gr-qc");
        assert!(!parsed.updated);
    }

    #[test]
    fn test_arxiv_id_extracted() {
        let parsed = parse_title("Foo (arXiv:2301.00004v1 [hep-th] UPDATED)").unwrap();
        assert_eq!(parsed.arxiv_id.as_deref(), Some("2301.00004v1"));
    }

    #[test]
    fn test_arxiv_id_absent_without_prefix() {
        let parsed = parse_title("Foo ([hep-th])").unwrap();
        assert_eq!(parsed.arxiv_id, None);
        assert_eq!(parsed.subject, "hep-th");
    }

    #[test]
    fn test_parentheses_inside_title_use_last_block() {
        let parsed = parse_title("Gravity in (2+1) Dimensions (arXiv:2301.00005 [hep-th])").unwrap();
        assert_eq!(parsed.title, "Gravity in (2+1) Dimensions ");
        assert_eq!(parsed.subject, "hep-th");
    }

    #[test]
    fn test_text_after_block_ignored() {
        let parsed = parse_title("Foo (arXiv:2301.00006 [hep-th]) trailing").unwrap();
        assert_eq!(parsed.title, "Foo ");
        assert_eq!(parsed.subject, "hep-th");
    }

    #[test]
    fn test_no_paren_is_no_metadata_block() {
        assert_eq!(
            parse_title("A Title Without Metadata"),
            Err(TitleError::NoMetadataBlock)
        );
        assert_eq!(parse_title(""), Err(TitleError::NoMetadataBlock));
    }

    #[test]
    fn test_reparsing_clean_title_is_rejected() {
        let clean = parse_title("Foo (arXiv:2301.00007 [hep-th])").unwrap().title;
        assert_eq!(parse_title(&clean), Err(TitleError::NoMetadataBlock));
    }

    #[test]
    fn test_unbalanced_block() {
        assert_eq!(
            parse_title("Foo (arXiv:2301.00008 [hep-th]"),
            Err(TitleError::Metadata(SexprError::Unbalanced(1)))
        );
    }

    #[test]
    fn test_empty_block() {
        assert!(matches!(
            parse_title("Foo ()"),
            Err(TitleError::MalformedMetadata(_))
        ));
    }

    #[test]
    fn test_updated_without_subject() {
        assert!(matches!(
            parse_title("Foo (UPDATED)"),
            Err(TitleError::MalformedMetadata(_))
        ));
    }

    #[test]
    fn test_subject_without_brackets() {
        let err = parse_title("Foo (arXiv:2301.00009 hep-th)").unwrap_err();
        assert!(matches!(err, TitleError::MalformedMetadata(_)));
        assert!(err.to_string().contains("hep-th"));
    }

    #[test]
    fn test_empty_subject_brackets() {
        assert!(matches!(
            parse_title("Foo (arXiv:2301.00010 [])"),
            Err(TitleError::MalformedMetadata(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_new_submission_roundtrip(
            text in "[A-Za-z0-9 ,.:'-]{0,60}",
            id in "[0-9]{4}\\.[0-9]{5}",
            subject in "[a-z]{2,5}(-[a-z]{2})?",
        ) {
            let raw = format!("{text} (arXiv:{id} [{subject}])");
            let parsed = parse_title(&raw).unwrap();
            prop_assert_eq!(parsed.title, format!("{text} "));
            prop_assert!(!parsed.updated);
            prop_assert_eq!(parsed.subject, subject);
        }

        #[test]
        fn prop_updated_submission_roundtrip(
            text in "[A-Za-z0-9 ,.:'-]{0,60}",
            id in "[0-9]{4}\\.[0-9]{5}",
            subject in "[a-z]{2,5}(-[a-z]{2})?",
        ) {
            let raw = format!("{text} (arXiv:{id} [{subject}] UPDATED)");
            let parsed = parse_title(&raw).unwrap();
            prop_assert_eq!(parsed.title, format!("{text} "));
            prop_assert!(parsed.updated);
            prop_assert_eq!(parsed.subject, subject);
        }

        #[test]
        fn prop_no_paren_always_no_metadata_block(raw in "[^(]{0,80}") {
            prop_assert_eq!(parse_title(&raw), Err(TitleError::NoMetadataBlock));
        }
    }
}
