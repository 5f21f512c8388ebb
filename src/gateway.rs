//! The inference gateway boundary: a capability trait consumed by the HTTP
//! routes, plus the thin SageMaker-shaped client behind it. Every call is a
//! single attempt with immediate failure reporting, no retry, no backoff.

use async_trait::async_trait;
use reqwest::header;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::debug;

use crate::detection::Detection;
use crate::request::InferenceRequest;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("inference endpoint returned {status}: {message}")]
    Endpoint { status: u16, message: String },

    #[error("malformed gateway response: {0}")]
    MalformedResponse(String),

    #[error("image spool failed: {0}")]
    Spool(#[from] std::io::Error),
}

/// One entry of the endpoint catalog, as the management API names it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointInfo {
    #[serde(rename = "EndpointName")]
    pub name: String,

    #[serde(rename = "EndpointStatus", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// The external inference service, injected into the routes so they can be
/// exercised against a test double.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Forward a normalized request and return the parsed detection list.
    async fn invoke(&self, request: &InferenceRequest) -> Result<Vec<Detection>, GatewayError>;

    /// Currently serving inference targets for a region, sorted descending
    /// by name upstream. Never cached; refetched on every region change.
    async fn list_endpoints(&self, region: &str) -> Result<Vec<EndpointInfo>, GatewayError>;
}

/// The real cloud client. Base URLs are derived from the request region
/// unless overridden (there is no credential/signing layer here).
pub struct SageMakerGateway {
    client: reqwest::Client,
    runtime_base: Option<String>,
    api_base: Option<String>,
}

impl SageMakerGateway {
    pub fn new(runtime_base: Option<String>, api_base: Option<String>) -> Self {
        SageMakerGateway {
            client: reqwest::Client::new(),
            runtime_base,
            api_base,
        }
    }

    fn runtime_url(&self, region: &str, endpoint_id: &str) -> String {
        let base = match &self.runtime_base {
            Some(base) => base.clone(),
            None => format!("https://runtime.sagemaker.{region}.amazonaws.com"),
        };
        format!("{base}/endpoints/{endpoint_id}/invocations")
    }

    fn api_url(&self, region: &str) -> String {
        match &self.api_base {
            Some(base) => base.clone(),
            None => format!("https://api.sagemaker.{region}.amazonaws.com"),
        }
    }
}

#[async_trait]
impl InferenceGateway for SageMakerGateway {
    async fn invoke(&self, request: &InferenceRequest) -> Result<Vec<Detection>, GatewayError> {
        // stage the decoded payload on disk, then read it back for upload
        let body = spool(&request.image_bytes)?;

        let url = self.runtime_url(&request.region, &request.endpoint_id);
        debug!("forwarding {} byte payload to {url}", body.len());

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, request.mime_type.clone())
            .header(header::ACCEPT, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(GatewayError::Endpoint {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        parse_prediction_body(&bytes)
    }

    async fn list_endpoints(&self, region: &str) -> Result<Vec<EndpointInfo>, GatewayError> {
        let url = self.api_url(region);
        debug!("fetching serving endpoints from {url}");

        let response = self
            .client
            .post(&url)
            .header("x-amz-target", "SageMaker.ListEndpoints")
            .header(header::CONTENT_TYPE, "application/x-amz-json-1.1")
            .json(&serde_json::json!({
                "SortBy": "Name",
                "SortOrder": "Descending",
                "StatusEquals": "InService",
            }))
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(GatewayError::Endpoint {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let body: EndpointListBody = serde_json::from_slice(&bytes)
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
        Ok(body.endpoints)
    }
}

/// The raw response body: bytes that decode as JSON with a `prediction`
/// field holding the detection tuples.
#[derive(Deserialize)]
struct PredictionBody {
    prediction: Vec<Detection>,
}

#[derive(Deserialize)]
struct EndpointListBody {
    #[serde(rename = "Endpoints")]
    endpoints: Vec<EndpointInfo>,
}

fn parse_prediction_body(bytes: &[u8]) -> Result<Vec<Detection>, GatewayError> {
    let body: PredictionBody = serde_json::from_slice(bytes)
        .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
    Ok(body.prediction)
}

fn spool(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(bytes)?;
    file.flush()?;
    std::fs::read(file.path())
}
