//! Best-effort copy of share links to the system clipboard.

use std::sync::Arc;

use marginalia_core::ShareLinkBuilder;
use tracing::{debug, warn};

use crate::Clipboard;

/// Copies shareable links to the clipboard as a side effect of save flows.
///
/// Clipboard failures never abort a save: a save must not be blocked by a
/// missing or denied clipboard, so errors are logged and swallowed.
#[derive(Clone)]
pub struct ClipboardNotifier {
    clipboard: Arc<dyn Clipboard>,
    links: ShareLinkBuilder,
}

impl ClipboardNotifier {
    pub fn new(clipboard: Arc<dyn Clipboard>, links: ShareLinkBuilder) -> Self {
        Self { clipboard, links }
    }

    /// Build the share link for `remote_annotation_id` and try to copy it.
    pub async fn copy_share_link(&self, remote_annotation_id: &str) {
        let url = self.links.note_url(remote_annotation_id);
        match self.clipboard.copy_to_clipboard(&url).await {
            Ok(true) => debug!(%url, "share link copied to clipboard"),
            Ok(false) => warn!(%url, "clipboard rejected share link"),
            Err(error) => warn!(%error, "failed to copy share link to clipboard"),
        }
    }
}
