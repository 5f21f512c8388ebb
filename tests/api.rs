//! Route-level tests: the full actix service driven against an in-process
//! gateway double, checking the embedded-status response contract.

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use async_trait::async_trait;
use std::sync::Arc;

use inferscope::codec;
use inferscope::detection::Detection;
use inferscope::gateway::{EndpointInfo, GatewayError, InferenceGateway};
use inferscope::request::InferenceRequest;
use inferscope::server::{self, routes};

struct StubGateway {
    detections: Vec<Detection>,
    fail: bool,
}

impl StubGateway {
    fn ok(detections: Vec<Detection>) -> Self {
        StubGateway {
            detections,
            fail: false,
        }
    }

    fn failing() -> Self {
        StubGateway {
            detections: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl InferenceGateway for StubGateway {
    async fn invoke(&self, _request: &InferenceRequest) -> Result<Vec<Detection>, GatewayError> {
        if self.fail {
            return Err(GatewayError::MalformedResponse("stub failure".to_string()));
        }
        Ok(self.detections.clone())
    }

    async fn list_endpoints(&self, _region: &str) -> Result<Vec<EndpointInfo>, GatewayError> {
        if self.fail {
            return Err(GatewayError::MalformedResponse("stub failure".to_string()));
        }
        Ok(vec![
            EndpointInfo {
                name: "zebra-detector".to_string(),
                status: Some("InService".to_string()),
            },
            EndpointInfo {
                name: "aardvark-detector".to_string(),
                status: Some("InService".to_string()),
            },
        ])
    }
}

macro_rules! init_app {
    ($stub:expr) => {{
        let gateway: Arc<dyn InferenceGateway> = Arc::new($stub);
        test::init_service(
            App::new()
                .app_data(web::Data::from(gateway))
                .app_data(server::json_config(25 * 1024 * 1024))
                .service(routes::inference)
                .service(routes::endpoints)
                .service(routes::sagemaker_health)
                .service(routes::health),
        )
        .await
    }};
}

#[actix_web::test]
async fn health_reports_status_and_ip() {
    let app = init_app!(StubGateway::ok(Vec::new()));

    for uri in ["/api/v1/sagemaker/health", "/api/v1/health"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "successful");
        assert!(body["internalIp"].is_string());
    }
}

#[actix_web::test]
async fn inference_returns_positional_predictions() {
    let detections = vec![
        Detection::new(0, 0.95, [0.0, 0.0, 0.5, 0.5]),
        Detection::new(1, 0.3, [0.5, 0.5, 1.0, 1.0]),
    ];
    let app = init_app!(StubGateway::ok(detections));

    let payload = serde_json::json!({
        "endpoint": "sm endpoint v2",
        "region": "us-east-1",
        "imageBase64": codec::encode(b"pixels", "image/png"),
    });
    let req = test::TestRequest::post()
        .uri("/api/v1/sagemaker/inference")
        .set_json(&payload)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["statusCode"], 200);

    let predictions = body["predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 2);
    // fixed-position tuples, not keyed objects
    assert_eq!(predictions[0][0].as_f64().unwrap(), 0.0);
    assert!((predictions[0][1].as_f64().unwrap() - 0.95).abs() < 1e-6);
    assert_eq!(predictions[1][0].as_f64().unwrap(), 1.0);
}

#[actix_web::test]
async fn validation_failure_is_embedded_in_a_200() {
    let app = init_app!(StubGateway::ok(Vec::new()));

    // everything missing: the image violation must be the one reported
    let req = test::TestRequest::post()
        .uri("/api/v1/sagemaker/inference")
        .set_json(serde_json::json!({}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["statusCode"], 500);
    assert_eq!(body["error_message"], "no image provided");
    assert!(body["error_trace"].is_string());
}

#[actix_web::test]
async fn gateway_failure_is_embedded_in_a_200() {
    let app = init_app!(StubGateway::failing());

    let payload = serde_json::json!({
        "endpoint": "ep",
        "region": "us-east-1",
        "imageBase64": codec::encode(b"pixels", "image/png"),
    });
    let req = test::TestRequest::post()
        .uri("/api/v1/sagemaker/inference")
        .set_json(&payload)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert!(body["error_message"]
        .as_str()
        .unwrap()
        .contains("stub failure"));
}

#[actix_web::test]
async fn endpoints_lists_the_serving_catalog() {
    let app = init_app!(StubGateway::ok(Vec::new()));

    let req = test::TestRequest::post()
        .uri("/api/v1/sagemaker/endpoints")
        .set_json(serde_json::json!({"region": "us-east-1"}))
        .to_request();

    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["result"][0]["EndpointName"], "zebra-detector");
    assert_eq!(body["result"][1]["EndpointName"], "aardvark-detector");
}

#[actix_web::test]
async fn endpoints_requires_a_region() {
    let app = init_app!(StubGateway::ok(Vec::new()));

    let req = test::TestRequest::post()
        .uri("/api/v1/sagemaker/endpoints")
        .set_json(serde_json::json!({}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["error_message"], "no region provided");
}
