//! Validation and assembly of inference requests. User-supplied parameters
//! arrive straight off the wire and are checked in a fixed order before the
//! image payload is decoded.

use crate::codec::{self, CodecError};

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("no image provided")]
    NoImage,

    #[error("no endpoint provided")]
    NoEndpoint,

    #[error("no region provided")]
    NoRegion,

    #[error(transparent)]
    Image(#[from] CodecError),
}

/// A normalized inference request, constructed per submission and discarded
/// after the gateway call resolves.
#[derive(Debug, Clone)]
pub struct InferenceRequest {
    pub endpoint_id: String,
    pub region: String,
    pub image_bytes: Vec<u8>,
    pub mime_type: String,
}

/// Validate the raw submission and assemble an [`InferenceRequest`].
///
/// Fail fast, first violation wins: image, then endpoint, then region, then
/// the image decode itself. The endpoint is stripped of all whitespace,
/// interior included, to tolerate copy-paste artifacts.
pub fn build(
    raw_endpoint: Option<&str>,
    raw_region: Option<&str>,
    image_data_url: Option<&str>,
) -> Result<InferenceRequest, ValidationError> {
    let image_data_url = match image_data_url {
        Some(url) if !url.is_empty() => url,
        _ => return Err(ValidationError::NoImage),
    };

    let endpoint_id = match raw_endpoint {
        Some(ep) if !ep.is_empty() => ep.chars().filter(|c| !c.is_whitespace()).collect(),
        _ => return Err(ValidationError::NoEndpoint),
    };

    let region = match raw_region {
        Some(r) if !r.is_empty() => r.to_string(),
        _ => return Err(ValidationError::NoRegion),
    };

    let (mime_type, image_bytes) = codec::decode(image_data_url)?;

    Ok(InferenceRequest {
        endpoint_id,
        region,
        image_bytes,
        mime_type,
    })
}
