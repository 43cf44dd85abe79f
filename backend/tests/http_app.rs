//! End-to-end coverage of the assembled application.
//!
//! Requests flow through the production middleware stack and the real
//! domain services; only the driven ports are swapped for in-memory doubles.

use std::sync::Arc;

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::http::{StatusCode, header};
use actix_web::{test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use prisma_backend::domain::{
    AuthCallbackService, ContactRelayService, Deployment, OnboardingService, PortfolioService,
    ReferenceId, SignOutService, TRACE_ID_HEADER,
};
use prisma_backend::inbound::http::health::HealthState;
use prisma_backend::inbound::http::state::{CallbackSettings, HttpState, HttpStatePorts};

#[path = "../src/server/mod.rs"]
#[allow(dead_code)]
mod server;
mod support;

use server::{AppDependencies, build_app};
use support::{
    FRESH_CODE, FRESH_USER, MemoryStore, ONBOARDED_CODE, RecordingMailer, StubIdentity,
};

const MAIL_FROM: &str = "Prisma <onboarding@resend.dev>";

struct Harness {
    identity: Arc<StubIdentity>,
    store: Arc<MemoryStore>,
    mailer: Arc<RecordingMailer>,
    health: web::Data<HealthState>,
    deps: AppDependencies,
}

#[fixture]
fn harness() -> Harness {
    let identity = Arc::new(StubIdentity::default());
    let store = Arc::new(MemoryStore::default());
    let mailer = Arc::new(RecordingMailer::default());
    let onboarding = Arc::new(OnboardingService::new(store.clone(), store.clone()));
    let state = HttpState::new(
        HttpStatePorts {
            sign_in: Arc::new(AuthCallbackService::new(identity.clone(), store.clone())),
            sign_out: Arc::new(SignOutService::new(identity.clone())),
            contact: Arc::new(ContactRelayService::new(mailer.clone(), MAIL_FROM)),
            catalogue: onboarding.clone(),
            onboarding,
            portfolio: Arc::new(PortfolioService::new(store.clone())),
        },
        CallbackSettings {
            deployment: Deployment::Production,
            code_verifier_cookie: "sb-test-auth-token-code-verifier".to_owned(),
        },
    );
    let health = web::Data::new(HealthState::new());
    let deps = AppDependencies {
        health_state: health.clone(),
        http_state: web::Data::new(state),
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    };
    Harness {
        identity,
        store,
        mailer,
        health,
        deps,
    }
}

fn location(res: &actix_web::dev::ServiceResponse) -> &str {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
}

fn session_cookie(res: &actix_web::dev::ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}

#[rstest]
#[actix_web::test]
async fn onboarded_student_signs_in_reads_dashboard_and_signs_out(harness: Harness) {
    let app = test::init_service(build_app(harness.deps.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/auth/callback?code={ONBOARDED_CODE}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "http://localhost:8080/dashboard");
    let cookie = session_cookie(&res);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/dashboard")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["profile"]["username"], json!("ana.lopez"));
    assert_eq!(body["featuredProjects"][0]["title"], json!("Compiler"));
    assert_eq!(body["topSkills"][0], json!({"name": "Rust", "count": 1}));

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/signout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "http://localhost:8080/");
    assert_eq!(harness.identity.revoked(), vec!["token-onboarded".to_owned()]);
}

#[rstest]
#[actix_web::test]
async fn new_student_is_sent_through_onboarding(harness: Harness) {
    let app = test::init_service(build_app(harness.deps.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/auth/callback?code={FRESH_CODE}&next=/projects"))
            .to_request(),
    )
    .await;
    assert_eq!(location(&res), "http://localhost:8080/onboarding");
    let cookie = session_cookie(&res);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/universities/1/careers")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let careers: Value = test::read_body_json(res).await;
    assert_eq!(careers.as_array().map(Vec::len), Some(1));

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/onboarding")
            .cookie(cookie)
            .set_json(json!({"universityId": 1, "careerId": 10}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"redirectTo": "/dashboard"}));

    let saved = harness.store.selection_of(FRESH_USER).expect("selection");
    assert_eq!(saved.career_id, Some(ReferenceId::Numeric(10)));
    assert!(saved.is_complete());
}

#[rstest]
#[actix_web::test]
async fn rejected_code_lands_on_the_login_error(harness: Harness) {
    let app = test::init_service(build_app(harness.deps.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/auth/callback?code=stale")
            .insert_header(("x-forwarded-host", "prisma.app"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "https://prisma.app/login?error=auth-code-error");
    assert!(
        res.response()
            .cookies()
            .all(|cookie| cookie.name() != "session")
    );
}

#[rstest]
#[actix_web::test]
async fn onboarding_requires_a_session(harness: Harness) {
    let app = test::init_service(build_app(harness.deps.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/onboarding")
            .set_json(json!({"universityId": 1, "careerId": 10}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn contact_form_is_relayed(harness: Harness) {
    let app = test::init_service(build_app(harness.deps.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/send")
            .set_json(json!({
                "name": "Ana",
                "email": "a@x.com",
                "message": "<b>hola</b>",
                "toEmail": "b@x.com"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], json!(true));
    assert!(body["data"]["id"].is_string());

    let sent = harness.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from, MAIL_FROM);
    assert_eq!(sent[0].to[0].as_str(), "b@x.com");
    assert!(!sent[0].html.contains("<b>hola</b>"));
}

#[rstest]
#[actix_web::test]
async fn incomplete_contact_form_is_rejected(harness: Harness) {
    let app = test::init_service(build_app(harness.deps.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/send")
            .set_json(json!({"name": "Ana", "email": "a@x.com"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"error": "Missing required fields"}));
    assert!(harness.mailer.sent().is_empty());
}

#[rstest]
#[case("/api/v1/profiles/ana.lopez", StatusCode::OK)]
#[case("/api/v1/profiles/nobody", StatusCode::NOT_FOUND)]
#[case("/api/v1/universities", StatusCode::OK)]
#[actix_web::test]
async fn public_reads_need_no_session(
    harness: Harness,
    #[case] uri: &str,
    #[case] expected: StatusCode,
) {
    let app = test::init_service(build_app(harness.deps.clone())).await;
    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(res.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn unknown_routes_get_a_json_404_with_a_trace_id(harness: Harness) {
    let app = test::init_service(build_app(harness.deps.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/nope").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], json!("not_found"));
}

#[rstest]
#[actix_web::test]
async fn readiness_follows_the_health_state(harness: Harness) {
    let app = test::init_service(build_app(harness.deps.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    harness.health.mark_ready();
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}
