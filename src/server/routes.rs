use actix_web::{get, post, web, Responder};
use tracing::info;

use super::protocol;
use super::WebError;
use crate::gateway::InferenceGateway;
use crate::request::{self, ValidationError};

type Result<T> = std::result::Result<T, WebError>;

#[post("/api/v1/sagemaker/inference")]
pub async fn inference(
    req: web::Json<protocol::InferencePayload>,
    gateway: web::Data<dyn InferenceGateway>,
) -> Result<impl Responder> {
    // Validate and normalize the submission
    let request = request::build(
        req.endpoint.as_deref(),
        req.region.as_deref(),
        req.image_base64.as_deref(),
    )?;

    info!(
        "submitting {} byte {} image to endpoint {} ({})",
        request.image_bytes.len(),
        request.mime_type,
        request.endpoint_id,
        request.region,
    );

    let predictions = gateway.invoke(&request).await?;

    info!(
        "finished serving inference request ({} detections)",
        predictions.len()
    );

    Ok(web::Json(protocol::InferenceResponse::success(predictions)))
}

#[post("/api/v1/sagemaker/endpoints")]
pub async fn endpoints(
    req: web::Json<protocol::RegionPayload>,
    gateway: web::Data<dyn InferenceGateway>,
) -> Result<impl Responder> {
    let region = match req.region.as_deref() {
        Some(region) if !region.is_empty() => region,
        _ => return Err(ValidationError::NoRegion.into()),
    };

    let result = gateway.list_endpoints(region).await?;

    info!("listed {} serving endpoints in {region}", result.len());

    Ok(web::Json(protocol::EndpointsResponse::success(result)))
}

#[get("/api/v1/sagemaker/health")]
pub async fn sagemaker_health() -> impl Responder {
    web::Json(health_body())
}

#[get("/api/v1/health")]
pub async fn health() -> impl Responder {
    web::Json(health_body())
}

fn health_body() -> protocol::HealthResponse {
    let internal_ip = local_ip_address::local_ip()
        .map(|ip| ip.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    protocol::HealthResponse {
        status: "successful",
        internal_ip,
    }
}
