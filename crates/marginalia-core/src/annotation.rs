//! Annotation payload types shared between the save flows and their callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The annotation payload carried neither a body nor a comment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("annotation payload must carry a non-empty body or comment")]
pub struct InvalidAnnotationPayload;

/// Anchor into the source page a highlight was taken from.
///
/// `descriptor` is an opaque re-anchoring strategy blob owned by the
/// highlighting layer; this crate never inspects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selector {
    pub quote: String,
    pub descriptor: serde_json::Value,
}

/// User-authored text of an annotation: a highlighted `body`, a free-text
/// `comment`, or both.
///
/// Construction enforces that at least one of the two is non-empty, so a
/// content-less annotation is unrepresentable and save flows never have to
/// re-validate.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotationContent {
    body: Option<String>,
    comment: Option<String>,
}

impl AnnotationContent {
    /// Build content from optional body and comment.
    ///
    /// Empty strings count as absent. Fails with [`InvalidAnnotationPayload`]
    /// when both are absent.
    pub fn new(
        body: Option<String>,
        comment: Option<String>,
    ) -> Result<Self, InvalidAnnotationPayload> {
        let body = body.filter(|s| !s.is_empty());
        let comment = comment.filter(|s| !s.is_empty());
        if body.is_none() && comment.is_none() {
            return Err(InvalidAnnotationPayload);
        }
        Ok(Self { body, comment })
    }

    /// Content for a highlight with no attached note.
    pub fn highlight(body: impl Into<String>) -> Result<Self, InvalidAnnotationPayload> {
        Self::new(Some(body.into()), None)
    }

    /// Content for a note with no highlighted text.
    pub fn note(comment: impl Into<String>) -> Result<Self, InvalidAnnotationPayload> {
        Self::new(None, Some(comment.into()))
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// Payload for creating a new annotation.
///
/// Provenance fields (`full_page_url`, `page_title`, `selector`,
/// `created_when`) are set once here and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct NewAnnotation {
    pub full_page_url: String,
    pub page_title: Option<String>,
    /// Caller-chosen local id hint; the local store assigns one when absent.
    pub local_id: Option<String>,
    pub created_when: Option<DateTime<Utc>>,
    pub selector: Option<Selector>,
    /// Local lists the annotation is filed under at creation time.
    pub local_list_ids: Vec<u64>,
    pub content: AnnotationContent,
}

impl NewAnnotation {
    pub fn new(full_page_url: impl Into<String>, content: AnnotationContent) -> Self {
        Self {
            full_page_url: full_page_url.into(),
            page_title: None,
            local_id: None,
            created_when: None,
            selector: None,
            local_list_ids: Vec::new(),
            content,
        }
    }
}

/// Patch for editing an existing annotation's text.
///
/// `comment: None` means the text is untouched and only sharing/privacy
/// state changes.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotationEdit {
    pub local_id: String,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_requires_body_or_comment() {
        assert_eq!(
            AnnotationContent::new(None, None).unwrap_err(),
            InvalidAnnotationPayload
        );
        assert_eq!(
            AnnotationContent::new(Some(String::new()), Some(String::new())).unwrap_err(),
            InvalidAnnotationPayload
        );
    }

    #[test]
    fn body_only_is_valid() {
        let content = AnnotationContent::highlight("the quoted text").unwrap();
        assert_eq!(content.body(), Some("the quoted text"));
        assert_eq!(content.comment(), None);
    }

    #[test]
    fn comment_only_is_valid() {
        let content = AnnotationContent::note("my note").unwrap();
        assert_eq!(content.body(), None);
        assert_eq!(content.comment(), Some("my note"));
    }

    #[test]
    fn empty_string_counts_as_absent() {
        let content = AnnotationContent::new(Some("kept".into()), Some(String::new())).unwrap();
        assert_eq!(content.body(), Some("kept"));
        assert_eq!(content.comment(), None);
    }
}
