//! Tests for HTTP error mapping.

use super::*;
use crate::domain::TraceId;
use actix_web::body::to_bytes;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-00000000abcd";

#[fixture]
fn trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no token"), StatusCode::UNAUTHORIZED)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

async fn body_of(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error JSON")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(trace_id: String) {
    let error = Error::internal("connection string leaked")
        .with_trace_id(trace_id.clone())
        .with_details(json!({ "secret": "x" }));
    let response = error.error_response();

    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body_of(response).await,
        json!({
            "code": "internal_error",
            "message": "Internal server error",
            "traceId": trace_id
        })
    );
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details(trace_id: String) {
    let error = Error::invalid_request("email must not be empty")
        .with_trace_id(trace_id)
        .with_details(json!({ "field": "email" }));
    let body = body_of(error.error_response()).await;
    assert_eq!(body["message"], "email must not be empty");
    assert_eq!(body["details"]["field"], "email");
}

#[actix_web::test]
async fn errors_without_trace_id_omit_the_header() {
    let response = Error::invalid_request("missing").error_response();
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
}

#[actix_web::test]
async fn errors_raised_in_scope_carry_the_scoped_trace_id() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid uuid");
    let error = TraceId::scope(trace_id, async { Error::unauthorized("nope") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[actix_web::test]
async fn malformed_json_bodies_use_the_error_shape() {
    #[derive(serde::Deserialize)]
    struct Body {
        #[expect(dead_code, reason = "only deserialisation is exercised")]
        name: String,
    }

    async fn handler(_body: web::Json<Body>) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    let app = actix_test::init_service(
        App::new()
            .app_data(json_config())
            .route("/", web::post().to(handler)),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
}
