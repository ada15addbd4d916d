//! Shareable-link construction for remote annotation identifiers.

/// Default public base for shared-note links.
pub const DEFAULT_SHARE_BASE_URL: &str = "https://share.marginalia.app";

/// Builds shareable URLs from remote annotation identifiers.
#[derive(Debug, Clone)]
pub struct ShareLinkBuilder {
    base_url: String,
}

impl ShareLinkBuilder {
    /// Create a builder for the given base URL (trailing slash tolerated).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Shareable link for a single annotation.
    pub fn note_url(&self, remote_annotation_id: &str) -> String {
        format!("{}/a/{}", self.base_url, remote_annotation_id)
    }
}

impl Default for ShareLinkBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SHARE_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_url_format() {
        let links = ShareLinkBuilder::default();
        assert_eq!(
            links.note_url("rem-123"),
            "https://share.marginalia.app/a/rem-123"
        );
    }

    #[test]
    fn trims_trailing_slash() {
        let links = ShareLinkBuilder::new("https://notes.local/");
        assert_eq!(links.note_url("x"), "https://notes.local/a/x");
    }
}
