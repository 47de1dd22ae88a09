//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use chrono::Utc;

use crate::domain::ports::{
    MockFeedReportsCommand, MockFeedReportsQuery, MockLoginService, MockRegistrationService,
    MockUsersQuery,
};
use crate::domain::{EmailAddress, Role, User, UserId, Username};

use super::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Mock ports with no expectations; set the ones a test needs.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub registration: MockRegistrationService,
    pub users: MockUsersQuery,
    pub reports: MockFeedReportsCommand,
    pub reports_query: MockFeedReportsQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            login: Arc::new(self.login),
            registration: Arc::new(self.registration),
            users: Arc::new(self.users),
            reports: Arc::new(self.reports),
            reports_query: Arc::new(self.reports_query),
        })
    }
}

/// A stored account for handler tests.
pub fn fixture_user(username: &str, role: Role) -> User {
    User::new(
        UserId::random(),
        Username::new(username).expect("fixture username"),
        EmailAddress::new(format!("{username}@example.com")).expect("fixture email"),
        role,
        Utc::now(),
    )
}

/// Initialise the full page router over `state` with a test session store.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap($crate::inbound::http::test_utils::test_session_middleware())
                .app_data(actix_web::web::Data::new($state))
                .configure($crate::inbound::http::configure),
        )
    };
}
pub(crate) use init_app;

/// Post the login form and return the session cookie it sets. The login
/// port mock decides who signs in.
macro_rules! login_cookie {
    ($app:expr) => {{
        let response = actix_web::test::call_service(
            $app,
            actix_web::test::TestRequest::post()
                .uri("/login")
                .set_form([("username", "alice"), ("password", "pw1")])
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::SEE_OTHER);
        $crate::inbound::http::test_utils::session_cookie(&response)
    }};
}
pub(crate) use login_cookie;
