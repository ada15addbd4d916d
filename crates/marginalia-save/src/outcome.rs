//! The two-part result of a save operation.

use tokio::task::JoinHandle;

use crate::SaveError;

/// Result of a create or update flow.
///
/// `remote_annotation_id` is available as soon as the flow returns, so a
/// caller can surface a share link optimistically. `completion` finishes the
/// remaining persistence and remote reconciliation in the background.
#[derive(Debug)]
pub struct SaveOutcome {
    /// Populated iff the operation required a remote identity: always on
    /// create, on update only when sharing was requested.
    pub remote_annotation_id: Option<String>,
    pub completion: SaveCompletion,
}

/// The deferred half of a [`SaveOutcome`].
///
/// Backed by a spawned task: it runs to completion or failure regardless of
/// whether the caller awaits it, and there is no cancellation.
#[derive(Debug)]
pub struct SaveCompletion {
    handle: JoinHandle<Result<String, SaveError>>,
}

impl SaveCompletion {
    pub(crate) fn new(handle: JoinHandle<Result<String, SaveError>>) -> Self {
        Self { handle }
    }

    /// Wait for the save to finish, yielding the annotation's local id.
    pub async fn join(self) -> Result<String, SaveError> {
        match self.handle.await {
            Ok(result) => result,
            Err(_) => Err(SaveError::CompletionAborted),
        }
    }
}
