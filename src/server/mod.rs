//! The user-facing JSON web server that accepts inference submissions and
//! forwards them to the gateway.
//!
//! Failures never surface as non-200 HTTP statuses: every error is caught at
//! the request boundary, logged, and reported inside a 200 body with an
//! embedded status field.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use anyhow::anyhow;
use tracing::error;

use crate::gateway::GatewayError;
use crate::request::ValidationError;

pub mod protocol;
pub mod routes;

#[derive(Debug)]
pub struct WebError {
    err: anyhow::Error,
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.err)
    }
}

impl actix_web::error::ResponseError for WebError {
    fn error_response(&self) -> HttpResponse {
        error!("request failed: {:#}", self.err);

        HttpResponse::build(self.status_code()).json(protocol::ErrorBody::from_error(&self.err))
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::OK
    }
}

impl From<anyhow::Error> for WebError {
    fn from(err: anyhow::Error) -> WebError {
        WebError { err }
    }
}

impl From<ValidationError> for WebError {
    fn from(err: ValidationError) -> Self {
        WebError { err: anyhow!(err) }
    }
}

impl From<GatewayError> for WebError {
    fn from(err: GatewayError) -> Self {
        WebError { err: anyhow!(err) }
    }
}

/// JSON extractor configuration: the body cap sized for inlined base64
/// images, and deserialization failures reported in the uniform embedded
/// error shape.
pub fn json_config(limit: usize) -> actix_web::web::JsonConfig {
    actix_web::web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let body = protocol::ErrorBody::from_message(err.to_string());
            actix_web::error::InternalError::from_response(err, HttpResponse::Ok().json(body))
                .into()
        })
}
