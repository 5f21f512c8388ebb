//! Wire shapes of the HTTP surface. Field names follow the original API
//! contract (`imageBase64`, `statusCode`, `internalIp`, `EndpointName`), so
//! several fields carry explicit renames.

use serde::{Deserialize, Serialize};

use crate::detection::Detection;
use crate::gateway::EndpointInfo;

/// Body of an inference submission.
#[derive(Debug, Deserialize)]
pub struct InferencePayload {
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    /// The image as a `data:<mime>;base64,...` URL.
    #[serde(default, rename = "imageBase64")]
    pub image_base64: Option<String>,
}

/// Body of an endpoint catalog request.
#[derive(Debug, Deserialize)]
pub struct RegionPayload {
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,

    #[serde(rename = "internalIp")]
    pub internal_ip: String,
}

#[derive(Debug, Serialize)]
pub struct InferenceResponse {
    pub status: &'static str,

    #[serde(rename = "statusCode")]
    pub status_code: u16,

    pub predictions: Vec<Detection>,
}

impl InferenceResponse {
    pub fn success(predictions: Vec<Detection>) -> Self {
        InferenceResponse {
            status: "success",
            status_code: 200,
            predictions,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EndpointsResponse {
    pub status: &'static str,

    #[serde(rename = "statusCode")]
    pub status_code: u16,

    pub result: Vec<EndpointInfo>,
}

impl EndpointsResponse {
    pub fn success(result: Vec<EndpointInfo>) -> Self {
        EndpointsResponse {
            status: "success",
            status_code: 200,
            result,
        }
    }
}

/// The uniform embedded-error body, always delivered with HTTP 200.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,

    #[serde(rename = "statusCode")]
    pub status_code: u16,

    pub error_message: String,
    pub error_trace: String,
}

impl ErrorBody {
    pub fn from_error(err: &anyhow::Error) -> Self {
        ErrorBody {
            status: "error",
            status_code: 500,
            error_message: err.to_string(),
            // the debug form carries the full cause chain
            error_trace: format!("{err:?}"),
        }
    }

    pub fn from_message(message: String) -> Self {
        ErrorBody {
            status: "error",
            status_code: 500,
            error_trace: message.clone(),
            error_message: message,
        }
    }
}
