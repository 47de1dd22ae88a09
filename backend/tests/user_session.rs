//! End-to-end account flows over the page router with in-memory storage.

use actix_web::http::StatusCode;
use actix_web::http::header::{CONTENT_TYPE, LOCATION};
use rstest::rstest;

use feedeyes::domain::ports::{ACCOUNT_EXISTS, INVALID_CREDENTIALS};
use feedeyes::domain::{EmailAddress, PASSWORD_MISMATCH, Role, TRACE_ID_HEADER, Username};

#[macro_use]
mod support;

use support::Harness;

fn location<B>(response: &actix_web::dev::ServiceResponse<B>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
}

#[rstest]
#[actix_web::test]
async fn signup_login_and_logout_round_trip() {
    let harness = Harness::new();
    let app = app!(harness);

    let created = signup!(&app, "alice");
    assert_eq!(created.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&created), "/");
    assert!(support::session_cookie(&created).is_none());
    let stored = harness.users.find_by_username("alice").expect("stored");
    assert_eq!(stored.role(), Role::Standard);

    let cookie = signed_in!(&app, "alice", "pw1");
    let dashboard = get!(&app, "/dashboard", cookie);
    assert_eq!(dashboard.status(), StatusCode::OK);
    let body = body_text!(dashboard);
    assert!(body.contains("Welcome back, alice"));
    assert!(!body.contains("/admin-dashboard"));

    let logout = get!(&app, "/logout", cookie);
    assert_eq!(logout.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&logout), "/");
    let cleared = support::session_cookie(&logout).expect("removal cookie");
    assert!(cleared.value().is_empty());
}

#[rstest]
#[actix_web::test]
async fn login_accepts_the_email_address() {
    let harness = Harness::new();
    let app = app!(harness);
    signup!(&app, "bob");

    let cookie = signed_in!(&app, "bob@example.com", "pw1");
    let profile = get!(&app, "/profile", cookie);
    assert_eq!(profile.status(), StatusCode::OK);
    assert!(body_text!(profile).contains("bob@example.com"));
}

#[rstest]
#[case("alice", "wrong")]
#[case("nobody", "pw1")]
#[case("", "pw1")]
#[case("alice", "")]
#[actix_web::test]
async fn bad_credentials_are_rejected_without_detail(
    #[case] identifier: &str,
    #[case] password: &str,
) {
    let harness = Harness::new();
    let app = app!(harness);
    signup!(&app, "alice");

    let response = login!(&app, identifier, password);
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(support::session_cookie(&response).is_none());
    assert_eq!(body_text!(response), INVALID_CREDENTIALS);
}

#[rstest]
#[actix_web::test]
async fn duplicate_signup_conflicts_with_a_traced_plain_text_error() {
    let harness = Harness::new();
    let app = app!(harness);
    signup!(&app, "alice");

    let response = signup!(&app, "alice");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    assert!(
        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("text/plain"))
    );
    assert_eq!(body_text!(response), ACCOUNT_EXISTS);
}

#[rstest]
#[actix_web::test]
async fn mismatched_passwords_create_nothing() {
    let harness = Harness::new();
    let app = app!(harness);

    let request = actix_web::test::TestRequest::post()
        .uri("/signup")
        .set_form([
            ("username", "carol"),
            ("email", "carol@example.com"),
            ("password", "pw1"),
            ("confirm_password", "pw2"),
        ])
        .to_request();
    let response = actix_web::test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text!(response), PASSWORD_MISMATCH);
    assert!(harness.users.find_by_username("carol").is_none());
}

#[rstest]
#[case("/dashboard", "/")]
#[case("/admin-dashboard", "/")]
#[case("/feedeyes", "/")]
#[case("/reports", "/")]
#[case("/report/new", "/")]
#[case("/profile", "/login")]
#[actix_web::test]
async fn anonymous_visitors_are_redirected(#[case] uri: &str, #[case] target: &str) {
    let harness = Harness::new();
    let app = app!(harness);

    let response = get!(&app, uri);
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), target);
}

#[rstest]
#[actix_web::test]
async fn only_admins_reach_the_admin_dashboard() {
    let harness = Harness::new();
    harness
        .directory
        .seed_admin(
            Username::new("admin").expect("username"),
            EmailAddress::new("admin@feedeyes.local").expect("email"),
            "s3cret",
        )
        .await
        .expect("seeded");
    let app = app!(harness);
    signup!(&app, "alice");

    let standard = signed_in!(&app, "alice", "pw1");
    let denied = get!(&app, "/admin-dashboard", standard);
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_text!(denied), "Unauthorized");

    let admin = signed_in!(&app, "admin", "s3cret");
    let allowed = get!(&app, "/admin-dashboard", admin);
    assert_eq!(allowed.status(), StatusCode::OK);
    let body = body_text!(allowed);
    assert!(body.contains("alice@example.com"));
    assert!(body.contains("admin@feedeyes.local"));
}

#[rstest]
#[actix_web::test]
async fn landing_page_offers_both_forms_to_visitors() {
    let harness = Harness::new();
    let app = app!(harness);

    let response = get!(&app, "/");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text!(response);
    assert!(body.contains(r#"action="/signup""#));
    assert!(body.contains(r#"action="/login""#));
}
