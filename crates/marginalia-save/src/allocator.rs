//! Remote identifier allocation.
//!
//! Once an annotation has been shared, later edits that re-share it must not
//! fragment its remote identity, so the update path reuses any identifier the
//! sharing service already knows before allocating a fresh one.

use crate::{SaveError, SharingService};

/// Allocate a fresh remote identifier for a brand-new annotation.
pub(crate) async fn allocate_for_create(
    sharing: &dyn SharingService,
) -> Result<String, SaveError> {
    sharing
        .generate_remote_annotation_id()
        .await
        .map_err(SaveError::RemoteServiceUnavailable)
}

/// Reuse the remote identifier already recorded for `local_id`, or allocate
/// a fresh one when the annotation has never been shared.
pub(crate) async fn allocate_for_update(
    sharing: &dyn SharingService,
    local_id: &str,
) -> Result<String, SaveError> {
    let ids = [local_id.to_string()];
    let metadata = sharing
        .remote_annotation_metadata(&ids)
        .await
        .map_err(SaveError::RemoteServiceUnavailable)?;

    match metadata.get(local_id).and_then(|m| m.remote_id.clone()) {
        Some(existing) => Ok(existing),
        None => allocate_for_create(sharing).await,
    }
}
