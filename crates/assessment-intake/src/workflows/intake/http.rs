use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use crate::config::EndpointConfig;

use super::gateway::{GatewayError, IntakeGateway, RemoteReference, UploadFile};
use super::submission::SubmissionPayload;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// `IntakeGateway` backed by the deployment's HTTP endpoints.
#[derive(Debug, Clone)]
pub struct HttpIntakeGateway {
    client: Client,
    upload_url: String,
    submit_url: String,
}

impl HttpIntakeGateway {
    pub fn new(config: &EndpointConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|err| GatewayError::Transport {
                endpoint: config.upload_url.clone(),
                message: err.to_string(),
            })?;

        Ok(Self::with_client(
            client,
            config.upload_url.clone(),
            config.submit_url.clone(),
        ))
    }

    pub fn with_client(
        client: Client,
        upload_url: impl Into<String>,
        submit_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            upload_url: upload_url.into(),
            submit_url: submit_url.into(),
        }
    }

    fn transport(endpoint: &str, err: reqwest::Error) -> GatewayError {
        GatewayError::Transport {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }

    fn ensure_success(endpoint: &str, response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(GatewayError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl IntakeGateway for HttpIntakeGateway {
    async fn upload_file(&self, file: UploadFile) -> Result<RemoteReference, GatewayError> {
        let endpoint = self.upload_url.as_str();
        debug!(endpoint, file = %file.file_name, bytes = file.size(), "uploading document");

        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|err| Self::transport(endpoint, err))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| Self::transport(endpoint, err))?;
        let response = Self::ensure_success(endpoint, response)?;

        let body: UploadResponse =
            response
                .json()
                .await
                .map_err(|err| GatewayError::MalformedBody {
                    endpoint: endpoint.to_string(),
                    message: err.to_string(),
                })?;

        Ok(RemoteReference(body.url))
    }

    async fn submit_form(&self, payload: &SubmissionPayload) -> Result<(), GatewayError> {
        let endpoint = self.submit_url.as_str();
        debug!(endpoint, "posting application payload");

        let response = self
            .client
            .post(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|err| Self::transport(endpoint, err))?;
        Self::ensure_success(endpoint, response)?;
        Ok(())
    }
}
