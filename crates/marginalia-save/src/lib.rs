//! Save/share orchestration for annotations: the create and update flows
//! that coordinate the local annotation store, the remote sharing service,
//! and the clipboard.

mod allocator;
mod clipboard;
mod collaborators;
mod error;
mod outcome;
mod saver;

pub use clipboard::ClipboardNotifier;
pub use collaborators::{
    AnnotationFields, AnnotationStore, Clipboard, ListShareRequest, PrivacyLevelRequest,
    RemoteAnnotationMetadata, ShareAnnotationRequest, SharedAnnotation, SharingService,
};
pub use error::SaveError;
pub use outcome::{SaveCompletion, SaveOutcome};
pub use saver::{AnnotationSaver, CreateParams, UpdateParams};
