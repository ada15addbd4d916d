//! Contracts for the external services the save flows orchestrate.
//!
//! The local annotation store and the sharing service are independently
//! consistent backends owned elsewhere; this crate only composes calls to
//! them and holds no cache of their state.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use marginalia_core::{PrivacyLevel, Selector};

/// Fields written to the local store when creating an annotation.
///
/// `comment` arrives already sanitised by the flow.
#[derive(Debug, Clone)]
pub struct AnnotationFields {
    pub local_id: Option<String>,
    pub created_when: Option<DateTime<Utc>>,
    pub page_url: String,
    pub page_title: Option<String>,
    pub selector: Option<Selector>,
    pub body: Option<String>,
    pub comment: Option<String>,
}

/// Local annotation store.
#[async_trait]
pub trait AnnotationStore: Send + Sync {
    /// Persist a new annotation, returning its local id.
    async fn create_annotation(
        &self,
        fields: AnnotationFields,
        skip_page_indexing: bool,
    ) -> anyhow::Result<String>;

    /// Overwrite an existing annotation's comment text.
    async fn edit_annotation(&self, local_id: &str, comment: &str) -> anyhow::Result<()>;
}

/// Remote metadata known for a locally-stored annotation.
#[derive(Debug, Clone, Default)]
pub struct RemoteAnnotationMetadata {
    pub remote_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ShareAnnotationRequest {
    pub local_id: String,
    pub remote_id: Option<String>,
    /// Inherit sharing state from lists the parent page already belongs to.
    pub share_to_parent_page_lists: bool,
    /// Leave the collaborator-side privacy level untouched; the flow writes
    /// it authoritatively in a separate call.
    pub skip_privacy_level_update: bool,
}

#[derive(Debug, Clone)]
pub struct SharedAnnotation {
    pub remote_id: String,
}

#[derive(Debug, Clone)]
pub struct PrivacyLevelRequest {
    pub local_id: String,
    pub privacy_level: PrivacyLevel,
    /// When transitioning to a non-shared level, keep existing list
    /// associations instead of stripping them.
    pub keep_lists_if_unsharing: bool,
}

#[derive(Debug, Clone)]
pub struct ListShareRequest {
    pub local_id: String,
    pub local_list_ids: Vec<u64>,
    /// Callers that already validated list existence can skip the check.
    pub skip_list_existence_check: bool,
}

/// Remote sharing service.
#[async_trait]
pub trait SharingService: Send + Sync {
    /// Allocate a fresh, stable remote annotation identifier.
    async fn generate_remote_annotation_id(&self) -> anyhow::Result<String>;

    /// Look up remote metadata for the given local ids. Ids with no remote
    /// identity may be absent from the map or map to empty metadata.
    async fn remote_annotation_metadata(
        &self,
        local_ids: &[String],
    ) -> anyhow::Result<HashMap<String, RemoteAnnotationMetadata>>;

    /// Publish an annotation under its remote identifier.
    async fn share_annotation(
        &self,
        request: ShareAnnotationRequest,
    ) -> anyhow::Result<SharedAnnotation>;

    /// Authoritative write of an annotation's privacy level.
    async fn set_annotation_privacy_level(
        &self,
        request: PrivacyLevelRequest,
    ) -> anyhow::Result<()>;

    /// Propagate an annotation into the given local lists.
    async fn share_annotation_to_lists(&self, request: ListShareRequest) -> anyhow::Result<()>;
}

/// System clipboard. Returns whether the write was accepted.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn copy_to_clipboard(&self, text: &str) -> anyhow::Result<bool>;
}
