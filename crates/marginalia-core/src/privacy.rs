//! Privacy levels and the share-intent configuration that resolves to them.

use serde::{Deserialize, Serialize};

/// Visibility and bulk-share protection of an annotation.
///
/// `Protected` variants are pinned: bulk share/unshare operations skip them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyLevel {
    Private,
    Protected,
    Shared,
    SharedProtected,
}

/// Caller-supplied sharing intent for one save operation.
///
/// Drives, but is distinct from, the persisted [`PrivacyLevel`]. All flags
/// default to off; an absent flag and a false flag resolve identically.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareIntent {
    pub should_share: bool,
    pub should_copy_share_link: bool,
    pub is_bulk_share_protected: bool,
    pub skip_privacy_level_update: bool,
}

impl ShareIntent {
    /// Resolve the privacy level this intent persists as.
    pub fn privacy_level(&self) -> PrivacyLevel {
        match (self.should_share, self.is_bulk_share_protected) {
            (true, true) => PrivacyLevel::SharedProtected,
            (true, false) => PrivacyLevel::Shared,
            (false, true) => PrivacyLevel::Protected,
            (false, false) => PrivacyLevel::Private,
        }
    }
}
