//! Shared helpers for the integration suites.
//!
//! Integration tests compile as separate crates, so the crate's own
//! `cfg(test)` mocks are unavailable here; these helpers wire the real
//! services over in-memory repositories instead.

#![allow(dead_code, unused_macros)]

pub mod in_memory;

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::web;
use mockable::DefaultClock;

use feedeyes::domain::{FeedReportService, UserDirectoryService};
use feedeyes::inbound::http::state::HttpState;

use in_memory::{InMemoryFeedReports, InMemoryUsers};

/// Services and their backing stores, so tests can seed and inspect state.
pub struct Harness {
    pub users: Arc<InMemoryUsers>,
    pub reports: Arc<InMemoryFeedReports>,
    pub directory: Arc<UserDirectoryService<InMemoryUsers>>,
}

impl Harness {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUsers::default());
        let reports = Arc::new(InMemoryFeedReports::new(Arc::clone(&users)));
        let directory = Arc::new(UserDirectoryService::new(Arc::clone(&users)));
        Self {
            users,
            reports,
            directory,
        }
    }

    pub fn state(&self) -> web::Data<HttpState> {
        let reports = FeedReportService::new(Arc::clone(&self.reports), Arc::new(DefaultClock));
        web::Data::new(HttpState::from_services(
            Arc::clone(&self.directory),
            Arc::new(reports),
        ))
    }
}

pub fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by a response, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Build the page router over `harness` with a throwaway session key.
macro_rules! app {
    ($harness:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap($crate::support::session_middleware())
                .app_data($harness.state())
                .configure(feedeyes::inbound::http::configure)
                .wrap(feedeyes::Trace),
        )
        .await
    };
}

/// Submit the signup form for `username` with password `pw1`.
macro_rules! signup {
    ($app:expr, $username:expr) => {{
        let username: &str = $username;
        let email = format!("{username}@example.com");
        let request = actix_web::test::TestRequest::post()
            .uri("/signup")
            .set_form([
                ("username", username),
                ("email", email.as_str()),
                ("password", "pw1"),
                ("confirm_password", "pw1"),
            ])
            .to_request();
        actix_web::test::call_service($app, request).await
    }};
}

/// Submit the login form.
macro_rules! login {
    ($app:expr, $identifier:expr, $password:expr) => {{
        let request = actix_web::test::TestRequest::post()
            .uri("/login")
            .set_form([("username", $identifier), ("password", $password)])
            .to_request();
        actix_web::test::call_service($app, request).await
    }};
}

/// Log in and return the session cookie.
macro_rules! signed_in {
    ($app:expr, $identifier:expr, $password:expr) => {{
        let response = login!($app, $identifier, $password);
        assert_eq!(response.status(), actix_web::http::StatusCode::SEE_OTHER);
        $crate::support::session_cookie(&response).expect("session cookie")
    }};
}

/// GET `uri`, optionally presenting a session cookie.
macro_rules! get {
    ($app:expr, $uri:expr) => {{
        let request = actix_web::test::TestRequest::get().uri($uri).to_request();
        actix_web::test::call_service($app, request).await
    }};
    ($app:expr, $uri:expr, $cookie:expr) => {{
        let request = actix_web::test::TestRequest::get()
            .uri($uri)
            .cookie($cookie.clone())
            .to_request();
        actix_web::test::call_service($app, request).await
    }};
}

/// Read a response body as UTF-8.
macro_rules! body_text {
    ($response:expr) => {{
        let bytes = actix_web::test::read_body($response).await;
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }};
}
