//! HTTP implementation of the sharing-service collaborator.

mod http;

pub use http::{RemoteError, SharingClient};
