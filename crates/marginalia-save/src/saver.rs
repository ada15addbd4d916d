//! Create and update flows for annotation saves.
//!
//! Both flows return a [`SaveOutcome`] whose remote identifier is available
//! immediately while the rest of the save (local persistence, sharing, list
//! propagation, the authoritative privacy write) continues in a background
//! task.

use std::sync::Arc;

use marginalia_core::{
    AnnotationEdit, NewAnnotation, PrivacyLevel, ShareIntent, ShareLinkBuilder,
    unescape_markdown_delimiters,
};
use tracing::info;

use crate::allocator;
use crate::clipboard::ClipboardNotifier;
use crate::collaborators::{
    AnnotationFields, AnnotationStore, Clipboard, ListShareRequest, PrivacyLevelRequest,
    ShareAnnotationRequest, SharingService,
};
use crate::outcome::{SaveCompletion, SaveOutcome};
use crate::SaveError;

/// Parameters for [`AnnotationSaver::create_annotation`].
#[derive(Debug, Clone)]
pub struct CreateParams {
    pub annotation: NewAnnotation,
    pub share: ShareIntent,
    /// Skip full-text indexing of the parent page in the local store.
    pub skip_page_indexing: bool,
    /// Skip the sharing service's list-existence check; for callers that
    /// already validated the lists.
    pub skip_list_existence_check: bool,
    /// Explicit privacy level, bypassing resolution from the share intent.
    pub privacy_override: Option<PrivacyLevel>,
}

impl CreateParams {
    pub fn new(annotation: NewAnnotation) -> Self {
        Self {
            annotation,
            share: ShareIntent::default(),
            skip_page_indexing: false,
            skip_list_existence_check: false,
            privacy_override: None,
        }
    }
}

/// Parameters for [`AnnotationSaver::update_annotation`].
#[derive(Debug, Clone)]
pub struct UpdateParams {
    pub edit: AnnotationEdit,
    pub share: ShareIntent,
    /// When the intent unshares the annotation, keep its list associations.
    pub keep_lists_if_unsharing: bool,
}

impl UpdateParams {
    pub fn new(edit: AnnotationEdit) -> Self {
        Self {
            edit,
            share: ShareIntent::default(),
            keep_lists_if_unsharing: false,
        }
    }
}

/// Orchestrates annotation saves across the local store, the sharing
/// service, and the clipboard.
///
/// Stateless: every invocation re-queries the collaborators as needed and
/// nothing is cached between calls. Concurrent saves for the same local id
/// are not serialised here; callers must not overlap edits of one
/// annotation (e.g. disable the edit affordance while a save is in flight).
#[derive(Clone)]
pub struct AnnotationSaver {
    store: Arc<dyn AnnotationStore>,
    sharing: Arc<dyn SharingService>,
    clipboard: ClipboardNotifier,
}

impl AnnotationSaver {
    pub fn new(
        store: Arc<dyn AnnotationStore>,
        sharing: Arc<dyn SharingService>,
        clipboard: Arc<dyn Clipboard>,
        links: ShareLinkBuilder,
    ) -> Self {
        Self {
            store,
            sharing,
            clipboard: ClipboardNotifier::new(clipboard, links),
        }
    }

    /// Create a new annotation.
    ///
    /// A remote identifier is allocated and its share link copied to the
    /// clipboard up front, whatever the share intent says, so the caller can
    /// offer "copy link" before the publish decision is final. The returned
    /// identifier does not imply the annotation is shared.
    ///
    /// The completion persists the annotation locally, shares it when
    /// requested, propagates explicit list memberships, and finally writes
    /// the privacy level. That last write is the single authoritative one:
    /// the share call is made with its own privacy update suppressed.
    pub async fn create_annotation(&self, params: CreateParams) -> Result<SaveOutcome, SaveError> {
        let CreateParams {
            annotation,
            share,
            skip_page_indexing,
            skip_list_existence_check,
            privacy_override,
        } = params;

        let remote_annotation_id = allocator::allocate_for_create(self.sharing.as_ref()).await?;
        self.clipboard.copy_share_link(&remote_annotation_id).await;

        let store = Arc::clone(&self.store);
        let sharing = Arc::clone(&self.sharing);
        let remote_id = remote_annotation_id.clone();

        let handle = tokio::spawn(async move {
            let NewAnnotation {
                full_page_url,
                page_title,
                local_id,
                created_when,
                selector,
                local_list_ids,
                content,
            } = annotation;

            let fields = AnnotationFields {
                local_id,
                created_when,
                page_url: full_page_url,
                page_title,
                selector,
                body: content.body().map(str::to_owned),
                comment: content.comment().map(unescape_markdown_delimiters),
            };
            let local_id = store
                .create_annotation(fields, skip_page_indexing)
                .await
                .map_err(SaveError::Store)?;

            if share.should_share {
                // Establish remote visibility first; the access policy is
                // written separately below. New annotations have no parent
                // page list context to inherit yet.
                sharing
                    .share_annotation(ShareAnnotationRequest {
                        local_id: local_id.clone(),
                        remote_id: Some(remote_id),
                        share_to_parent_page_lists: false,
                        skip_privacy_level_update: true,
                    })
                    .await
                    .map_err(SaveError::RemoteServiceUnavailable)?;
            }

            if !local_list_ids.is_empty() {
                sharing
                    .share_annotation_to_lists(ListShareRequest {
                        local_id: local_id.clone(),
                        local_list_ids,
                        skip_list_existence_check,
                    })
                    .await
                    .map_err(SaveError::RemoteServiceUnavailable)?;
            }

            let privacy_level = privacy_override.unwrap_or_else(|| share.privacy_level());
            sharing
                .set_annotation_privacy_level(PrivacyLevelRequest {
                    local_id: local_id.clone(),
                    privacy_level,
                    keep_lists_if_unsharing: false,
                })
                .await
                .map_err(SaveError::RemoteServiceUnavailable)?;

            info!(%local_id, ?privacy_level, "annotation created");
            Ok(local_id)
        });

        Ok(SaveOutcome {
            remote_annotation_id: Some(remote_annotation_id),
            completion: SaveCompletion::new(handle),
        })
    }

    /// Update an existing annotation's text and/or sharing state.
    ///
    /// When sharing is requested, any remote identifier the sharing service
    /// already knows for this annotation is reused so repeated shares never
    /// fragment its remote identity, and the share link is copied only when
    /// the intent opts in.
    ///
    /// The completion persists the text edit first, then runs the share call
    /// (with parent-page-list propagation, since the page may have gained
    /// shared lists since creation) and the privacy write concurrently,
    /// failing fast if either fails.
    pub async fn update_annotation(&self, params: UpdateParams) -> Result<SaveOutcome, SaveError> {
        let UpdateParams {
            edit,
            share,
            keep_lists_if_unsharing,
        } = params;

        let mut remote_annotation_id = None;
        if share.should_share {
            let remote_id =
                allocator::allocate_for_update(self.sharing.as_ref(), &edit.local_id).await?;
            if share.should_copy_share_link {
                self.clipboard.copy_share_link(&remote_id).await;
            }
            remote_annotation_id = Some(remote_id);
        }

        let store = Arc::clone(&self.store);
        let sharing = Arc::clone(&self.sharing);
        let remote_id = remote_annotation_id.clone();

        let handle = tokio::spawn(async move {
            let AnnotationEdit { local_id, comment } = edit;

            if let Some(comment) = comment {
                store
                    .edit_annotation(&local_id, &unescape_markdown_delimiters(&comment))
                    .await
                    .map_err(SaveError::Store)?;
            }

            let share_task = async {
                if share.should_share {
                    sharing
                        .share_annotation(ShareAnnotationRequest {
                            local_id: local_id.clone(),
                            remote_id: remote_id.clone(),
                            share_to_parent_page_lists: true,
                            skip_privacy_level_update: false,
                        })
                        .await
                        .map_err(SaveError::RemoteServiceUnavailable)?;
                }
                Ok::<_, SaveError>(())
            };
            let privacy_task = async {
                if !share.skip_privacy_level_update {
                    sharing
                        .set_annotation_privacy_level(PrivacyLevelRequest {
                            local_id: local_id.clone(),
                            privacy_level: share.privacy_level(),
                            keep_lists_if_unsharing,
                        })
                        .await
                        .map_err(SaveError::RemoteServiceUnavailable)?;
                }
                Ok::<_, SaveError>(())
            };
            tokio::try_join!(share_task, privacy_task)?;

            info!(%local_id, "annotation updated");
            Ok(local_id)
        });

        Ok(SaveOutcome {
            remote_annotation_id,
            completion: SaveCompletion::new(handle),
        })
    }
}
