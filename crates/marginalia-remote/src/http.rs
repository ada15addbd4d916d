//! HTTP client for the annotation sharing service.

use std::collections::HashMap;

use async_trait::async_trait;
use marginalia_core::PrivacyLevel;
use marginalia_save::{
    ListShareRequest, PrivacyLevelRequest, RemoteAnnotationMetadata, ShareAnnotationRequest,
    SharedAnnotation, SharingService,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// HTTP client for the sharing service's annotation endpoints.
pub struct SharingClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteIdResponse {
    remote_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetadataQuery<'a> {
    local_ids: &'a [String],
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct MetadataEntry {
    remote_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShareBody<'a> {
    local_id: &'a str,
    remote_id: Option<&'a str>,
    share_to_parent_page_lists: bool,
    skip_privacy_level_update: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PrivacyLevelBody<'a> {
    local_id: &'a str,
    privacy_level: PrivacyLevel,
    keep_lists_if_unsharing: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListShareBody<'a> {
    local_id: &'a str,
    local_list_ids: &'a [u64],
    skip_list_existence_check: bool,
}

impl SharingClient {
    /// Create a client for the given sharing-service base URL.
    ///
    /// `base_url` should be like `https://api.example.com` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, RemoteError> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RemoteError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }

    /// Allocate a fresh remote annotation identifier.
    pub async fn allocate_remote_id(&self) -> Result<String, RemoteError> {
        let resp = self
            .post_json("/api/annotations/remote-id", &serde_json::json!({}))
            .await?;
        let parsed: RemoteIdResponse = resp.json().await?;
        info!(remote_id = %parsed.remote_id, "allocated remote annotation id");
        Ok(parsed.remote_id)
    }

    /// Fetch remote metadata for the given local annotation ids.
    pub async fn remote_metadata(
        &self,
        local_ids: &[String],
    ) -> Result<HashMap<String, RemoteAnnotationMetadata>, RemoteError> {
        let resp = self
            .post_json("/api/annotations/metadata", &MetadataQuery { local_ids })
            .await?;
        let parsed: HashMap<String, MetadataEntry> = resp.json().await?;
        info!(count = parsed.len(), "fetched remote annotation metadata");
        Ok(parsed
            .into_iter()
            .map(|(local_id, entry)| {
                (
                    local_id,
                    RemoteAnnotationMetadata {
                        remote_id: entry.remote_id,
                    },
                )
            })
            .collect())
    }

    /// Publish an annotation under its remote identifier.
    pub async fn share(
        &self,
        request: &ShareAnnotationRequest,
    ) -> Result<SharedAnnotation, RemoteError> {
        let resp = self
            .post_json(
                "/api/annotations/share",
                &ShareBody {
                    local_id: &request.local_id,
                    remote_id: request.remote_id.as_deref(),
                    share_to_parent_page_lists: request.share_to_parent_page_lists,
                    skip_privacy_level_update: request.skip_privacy_level_update,
                },
            )
            .await?;
        let parsed: RemoteIdResponse = resp.json().await?;
        info!(local_id = %request.local_id, remote_id = %parsed.remote_id, "shared annotation");
        Ok(SharedAnnotation {
            remote_id: parsed.remote_id,
        })
    }

    /// Write an annotation's privacy level.
    pub async fn set_privacy_level(
        &self,
        request: &PrivacyLevelRequest,
    ) -> Result<(), RemoteError> {
        self.post_json(
            "/api/annotations/privacy-level",
            &PrivacyLevelBody {
                local_id: &request.local_id,
                privacy_level: request.privacy_level,
                keep_lists_if_unsharing: request.keep_lists_if_unsharing,
            },
        )
        .await?;
        info!(local_id = %request.local_id, privacy_level = ?request.privacy_level, "set privacy level");
        Ok(())
    }

    /// Propagate an annotation into the given local lists.
    pub async fn share_to_lists(&self, request: &ListShareRequest) -> Result<(), RemoteError> {
        self.post_json(
            "/api/annotations/lists",
            &ListShareBody {
                local_id: &request.local_id,
                local_list_ids: &request.local_list_ids,
                skip_list_existence_check: request.skip_list_existence_check,
            },
        )
        .await?;
        info!(
            local_id = %request.local_id,
            count = request.local_list_ids.len(),
            "propagated annotation to lists"
        );
        Ok(())
    }
}

#[async_trait]
impl SharingService for SharingClient {
    async fn generate_remote_annotation_id(&self) -> anyhow::Result<String> {
        Ok(self.allocate_remote_id().await?)
    }

    async fn remote_annotation_metadata(
        &self,
        local_ids: &[String],
    ) -> anyhow::Result<HashMap<String, RemoteAnnotationMetadata>> {
        Ok(self.remote_metadata(local_ids).await?)
    }

    async fn share_annotation(
        &self,
        request: ShareAnnotationRequest,
    ) -> anyhow::Result<SharedAnnotation> {
        Ok(self.share(&request).await?)
    }

    async fn set_annotation_privacy_level(
        &self,
        request: PrivacyLevelRequest,
    ) -> anyhow::Result<()> {
        Ok(self.set_privacy_level(&request).await?)
    }

    async fn share_annotation_to_lists(&self, request: ListShareRequest) -> anyhow::Result<()> {
        Ok(self.share_to_lists(&request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sharing_client_trims_trailing_slash() {
        let client = SharingClient::new("http://localhost:4000/".into());
        assert_eq!(client.base_url, "http://localhost:4000");
        assert_eq!(
            client.url("/api/annotations/share"),
            "http://localhost:4000/api/annotations/share"
        );
    }

    #[test]
    fn share_body_json_shape() {
        let body = ShareBody {
            local_id: "local-1",
            remote_id: Some("remote-9"),
            share_to_parent_page_lists: true,
            skip_privacy_level_update: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["localId"], "local-1");
        assert_eq!(json["remoteId"], "remote-9");
        assert_eq!(json["shareToParentPageLists"], true);
        assert_eq!(json["skipPrivacyLevelUpdate"], false);
    }

    #[test]
    fn privacy_level_serialises_snake_case() {
        let body = PrivacyLevelBody {
            local_id: "local-1",
            privacy_level: PrivacyLevel::SharedProtected,
            keep_lists_if_unsharing: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["privacyLevel"], "shared_protected");
        assert_eq!(json["keepListsIfUnsharing"], true);
    }

    #[test]
    fn metadata_entry_parses_missing_remote_id() {
        let parsed: HashMap<String, MetadataEntry> =
            serde_json::from_str(r#"{"local-1": {"remoteId": "r-1"}, "local-2": {}}"#).unwrap();
        assert_eq!(parsed["local-1"].remote_id.as_deref(), Some("r-1"));
        assert!(parsed["local-2"].remote_id.is_none());
    }

    #[test]
    fn remote_id_response_parses() {
        let parsed: RemoteIdResponse =
            serde_json::from_str(r#"{"remoteId": "abc123"}"#).unwrap();
        assert_eq!(parsed.remote_id, "abc123");
    }
}
