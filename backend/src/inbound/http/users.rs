//! Account pages and handlers.
//!
//! ```text
//! GET  /                landing page with signup and login forms
//! POST /signup          username, email, password, confirm_password
//! POST /login           username (or email), password
//! GET  /logout
//! GET  /dashboard       signed in
//! GET  /admin-dashboard signed in, admin only
//! GET  /profile         signed in, otherwise redirected to /login
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::info;

use crate::domain::ports::RECENT_USERS_LIMIT;
use crate::domain::{ApiResult, Error, LoginCredentials, Registration};

use super::gate::RequireSession;
use super::session::{SessionContext, SessionUser};
use super::state::HttpState;
use super::{see_other, views};

/// Signup form body. Absent fields deserialize as empty so validation can
/// report them uniformly.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Login form body; `username` also accepts an email address.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[get("/")]
pub async fn index(session: SessionContext) -> ApiResult<HttpResponse> {
    let user = session.user()?;
    Ok(views::page(views::landing(user.as_ref())))
}

#[get("/signup")]
pub async fn signup_form() -> HttpResponse {
    views::page(views::signup())
}

/// Register a standard account, then send the visitor back to the landing
/// page to log in.
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    form: web::Form<SignupForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let registration = Registration::try_from_parts(
        &form.username,
        &form.email,
        &form.password,
        &form.confirm_password,
    )?;
    let user = state.registration.register(&registration).await?;
    info!(user_id = %user.id(), "account registered");
    Ok(see_other("/"))
}

#[get("/login")]
pub async fn login_form() -> HttpResponse {
    views::page(views::login())
}

/// Authenticate and establish a session.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&form.username, &form.password)?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(&user)?;
    info!(user_id = %user.id(), role = %user.role(), "signed in");
    Ok(see_other("/dashboard"))
}

#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    see_other("/")
}

#[get("/dashboard", wrap = "RequireSession::to_landing()")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    user: SessionUser,
) -> ApiResult<HttpResponse> {
    let reports = state.reports_query.dashboard_reports(&user.actor()).await?;
    Ok(views::page(views::dashboard(&user, &reports)))
}

/// The newest accounts, for administrators only.
#[get("/admin-dashboard", wrap = "RequireSession::to_landing()")]
pub async fn admin_dashboard(
    state: web::Data<HttpState>,
    user: SessionUser,
) -> ApiResult<HttpResponse> {
    if !user.role.is_admin() {
        return Err(Error::forbidden("Unauthorized"));
    }
    let users = state.users.list_recent_users(RECENT_USERS_LIMIT).await?;
    Ok(views::page(views::admin_dashboard(&user, &users)))
}

#[get("/feedeyes", wrap = "RequireSession::to_landing()")]
pub async fn feedeyes(user: SessionUser) -> HttpResponse {
    views::page(views::feedeyes(&user))
}

#[get("/profile", wrap = "RequireSession::to_login()")]
pub async fn profile(state: web::Data<HttpState>, user: SessionUser) -> ApiResult<HttpResponse> {
    let account = state.users.profile(&user.id).await?;
    Ok(views::page(views::profile(&user, &account)))
}
