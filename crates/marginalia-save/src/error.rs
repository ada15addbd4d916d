use marginalia_core::InvalidAnnotationPayload;
use thiserror::Error;

/// Failure modes of the save flows.
///
/// Remote failures reject the completion after local persistence may already
/// have succeeded; callers must treat a failed completion as "local state may
/// have changed, remote state may not have" and reconcile. No rollback is
/// performed here.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    InvalidAnnotationPayload(#[from] InvalidAnnotationPayload),

    #[error("sharing service unavailable: {0}")]
    RemoteServiceUnavailable(anyhow::Error),

    #[error("local annotation store failed: {0}")]
    Store(anyhow::Error),

    #[error("save completion task aborted before finishing")]
    CompletionAborted,
}
