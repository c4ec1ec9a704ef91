use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::cloudinary_config::CloudinaryConfig;
use super::signature::sign_params;
use crate::multimedia::application::domain::entities::{MediaKind, MediaPayload, StoredObject};
use crate::multimedia::application::domain::policies::UploadPolicy;
use crate::multimedia::application::ports::outgoing::{MediaStore, MediaStoreError};

/// Raw reply from the media service.
#[derive(Debug, Clone)]
struct HttpReply {
    status: u16,
    body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TransportFailure {
    Timeout,
    Other(String),
}

#[derive(Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

#[derive(Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorMessage,
}

#[derive(Deserialize)]
struct ErrorMessage {
    message: String,
}

fn map_transport_error(failure: TransportFailure) -> MediaStoreError {
    match failure {
        TransportFailure::Timeout => MediaStoreError::Timeout,
        TransportFailure::Other(msg) => MediaStoreError::Transport(msg),
    }
}

fn map_rejection(reply: &HttpReply) -> MediaStoreError {
    let message = serde_json::from_str::<ErrorEnvelope>(&reply.body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("HTTP {}", reply.status));
    MediaStoreError::Rejected(message)
}

/// Internal seam so the adapter can be tested without a live HTTP endpoint.
#[async_trait]
trait MediaHttpClient: Send + Sync {
    async fn post_multipart(
        &self,
        url: &str,
        fields: Vec<(String, String)>,
        file: &MediaPayload,
    ) -> Result<HttpReply, TransportFailure>;

    async fn post_form(
        &self,
        url: &str,
        fields: Vec<(String, String)>,
    ) -> Result<HttpReply, TransportFailure>;
}

struct ReqwestMediaClient {
    http: reqwest::Client,
}

impl ReqwestMediaClient {
    fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    async fn into_reply(
        result: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<HttpReply, TransportFailure> {
        let response = result.map_err(classify_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_reqwest_error)?;
        Ok(HttpReply { status, body })
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> TransportFailure {
    if err.is_timeout() {
        TransportFailure::Timeout
    } else {
        TransportFailure::Other(err.to_string())
    }
}

#[async_trait]
impl MediaHttpClient for ReqwestMediaClient {
    async fn post_multipart(
        &self,
        url: &str,
        fields: Vec<(String, String)>,
        file: &MediaPayload,
    ) -> Result<HttpReply, TransportFailure> {
        let mut part =
            reqwest::multipart::Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        if let Some(content_type) = &file.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| TransportFailure::Other(e.to_string()))?;
        }

        let mut form = reqwest::multipart::Form::new().part("file", part);
        for (name, value) in fields {
            form = form.text(name, value);
        }

        Self::into_reply(self.http.post(url).multipart(form).send().await).await
    }

    async fn post_form(
        &self,
        url: &str,
        fields: Vec<(String, String)>,
    ) -> Result<HttpReply, TransportFailure> {
        Self::into_reply(self.http.post(url).form(&fields).send().await).await
    }
}

/// Media store backed by a Cloudinary-compatible upload API.
#[derive(Clone)]
pub struct CloudinaryMediaStore {
    config: CloudinaryConfig,
    policy: UploadPolicy,
    client: Arc<dyn MediaHttpClient>,
}

impl CloudinaryMediaStore {
    pub fn new(config: CloudinaryConfig, policy: UploadPolicy) -> Result<Self, MediaStoreError> {
        let client = ReqwestMediaClient::new(policy.upload_timeout)
            .map_err(|e| MediaStoreError::Transport(e.to_string()))?;

        Ok(Self {
            config,
            policy,
            client: Arc::new(client),
        })
    }

    #[cfg(test)]
    fn with_client(
        config: CloudinaryConfig,
        policy: UploadPolicy,
        client: Arc<dyn MediaHttpClient>,
    ) -> Self {
        Self {
            config,
            policy,
            client,
        }
    }

    fn signed_fields(&self, mut fields: Vec<(String, String)>) -> Vec<(String, String)> {
        fields.push((
            "timestamp".to_string(),
            chrono::Utc::now().timestamp().to_string(),
        ));
        fields.push(("signature_algorithm".to_string(), "sha256".to_string()));

        let signature = sign_params(&fields, &self.config.api_secret);
        fields.push(("signature".to_string(), signature));
        fields.push(("api_key".to_string(), self.config.api_key.clone()));
        fields
    }

    fn upload_fields(&self, kind: MediaKind) -> Vec<(String, String)> {
        let mut fields = vec![
            ("folder".to_string(), self.policy.folder_for(kind).to_string()),
            ("use_filename".to_string(), "true".to_string()),
            ("unique_filename".to_string(), "true".to_string()),
            ("overwrite".to_string(), "false".to_string()),
        ];
        if let Some(preset) = self.policy.preset_for(kind) {
            fields.push(("upload_preset".to_string(), preset.to_string()));
        }
        self.signed_fields(fields)
    }
}

#[async_trait]
impl MediaStore for CloudinaryMediaStore {
    async fn upload(
        &self,
        payload: &MediaPayload,
        kind: MediaKind,
    ) -> Result<StoredObject, MediaStoreError> {
        let url = self.config.endpoint(kind.as_str(), "upload");
        let fields = self.upload_fields(kind);

        debug!(file_name = %payload.file_name, kind = %kind, size = payload.size(), "Uploading media");

        let reply = self
            .client
            .post_multipart(&url, fields, payload)
            .await
            .map_err(map_transport_error)?;

        if !(200..300).contains(&reply.status) {
            return Err(map_rejection(&reply));
        }

        let parsed: UploadResponse = serde_json::from_str(&reply.body)
            .map_err(|e| MediaStoreError::InvalidResponse(e.to_string()))?;

        if parsed.public_id.trim().is_empty() || !parsed.secure_url.starts_with("https://") {
            return Err(MediaStoreError::InvalidResponse(
                "missing public_id or secure_url".to_string(),
            ));
        }

        Ok(StoredObject {
            remote_id: parsed.public_id,
            url: parsed.secure_url,
            kind,
        })
    }

    async fn delete(&self, remote_id: &str, kind: MediaKind) -> bool {
        let remote_id = remote_id.trim();
        if remote_id.is_empty() {
            return false;
        }

        let url = self.config.endpoint(kind.as_str(), "destroy");
        let fields = self.signed_fields(vec![("public_id".to_string(), remote_id.to_string())]);

        let reply = match self.client.post_form(&url, fields).await {
            Ok(reply) => reply,
            Err(failure) => {
                warn!(public_id = %remote_id, error = ?failure, "Remote delete failed");
                return false;
            }
        };

        if !(200..300).contains(&reply.status) {
            warn!(public_id = %remote_id, status = reply.status, "Remote delete rejected");
            return false;
        }

        match serde_json::from_str::<DestroyResponse>(&reply.body) {
            Ok(parsed) => parsed.result == "ok",
            Err(e) => {
                warn!(public_id = %remote_id, error = %e, "Unreadable remote delete response");
                false
            }
        }
    }
}
