//! Tests for HTTP error mapping.

use actix_web::body::to_bytes;
use actix_web::test as actix_test;
use actix_web::{App, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn body_of(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error JSON")
}

#[rstest]
#[case(DomainError::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(DomainError::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(DomainError::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(DomainError::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(DomainError::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: DomainError, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[actix_web::test]
async fn internal_errors_are_redacted() {
    let error = DomainError::internal("db password leaked")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": "x"}));

    let response = ResponseError::error_response(&error);
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(TRACE_ID)
    );

    let body = body_of(response).await;
    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["message"], REDACTED_MESSAGE);
    assert_eq!(body["traceId"], TRACE_ID);
    assert!(body.get("details").is_none());
}

#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = DomainError::invalid_request("career does not belong to the selected university")
        .with_details(json!({"careerId": 2}));

    let body = body_of(ResponseError::error_response(&error)).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(
        body["message"],
        "career does not belong to the selected university"
    );
    assert_eq!(body["details"], json!({"careerId": 2}));
}

#[actix_web::test]
async fn errors_without_trace_omit_the_header() {
    let response = ResponseError::error_response(&DomainError::not_found("missing"));
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
}

#[actix_web::test]
async fn unmatched_routes_return_json_404() {
    let app = actix_test::init_service(App::new().default_service(web::to(not_found))).await;
    let req = actix_test::TestRequest::get().uri("/nope").to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["message"], "no route for GET /nope");
}

#[actix_web::test]
async fn malformed_json_becomes_invalid_request() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route(
                "/echo",
                web::post().to(|body: web::Json<Value>| async move { HttpResponse::Ok().json(body.0) }),
            ),
    )
    .await;
    let req = actix_test::TestRequest::post()
        .uri("/echo")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}
