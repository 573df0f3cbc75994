use std::time::Duration;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use reqwest::{multipart, Client};
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    config::ServiceConfig,
    data::models::{
        document_upload_model::DocumentUploadModel,
        service_response_model::{interpret_response, ExtractionResponseModel},
    },
    errors::{InvalidUpstreamResponse, UpstreamRequestFailed},
};

pub(crate) const EXTRACTION_SERVICE: &str = "extraction service";

#[async_trait]
pub(crate) trait ExtractionServiceDatasource: Send + Sync {
    /// Uploads a document and returns the extracted statements JSON. No
    /// retries; cancel by dropping the future.
    async fn extract(&self, upload: DocumentUploadModel) -> Result<Value, ServerError>;
}

pub(crate) struct ExtractionServiceDatasourceImpl {
    client: Client,
    base_url: String,
    max_upload_bytes: u64,
}

impl ExtractionServiceDatasourceImpl {
    pub(crate) fn new(config: &ServiceConfig) -> Result<Self, ServerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamRequestFailed::with_debug(EXTRACTION_SERVICE, &e))?;
        Ok(Self::with_client(client, config))
    }

    fn with_client(client: Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

#[async_trait]
impl ExtractionServiceDatasource for ExtractionServiceDatasourceImpl {
    async fn extract(&self, upload: DocumentUploadModel) -> Result<Value, ServerError> {
        upload.validate(self.max_upload_bytes)?;
        info!(
            file_name = %upload.file_name,
            size = upload.bytes.len(),
            "uploading document for extraction"
        );

        let part = multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str("application/pdf")
            .map_err(|e| UpstreamRequestFailed::with_debug(EXTRACTION_SERVICE, &e))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/api/process-pdf", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "extraction request failed");
                UpstreamRequestFailed::with_debug(EXTRACTION_SERVICE, &e)
            })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| InvalidUpstreamResponse::with_debug(EXTRACTION_SERVICE, &e))?;

        interpret_response::<ExtractionResponseModel>(EXTRACTION_SERVICE, status, &body)
            .inspect_err(|_| warn!(status, "extraction service returned an error"))
    }
}
