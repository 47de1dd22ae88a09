//! HTTP inbound adapter serving the server-rendered pages.
//!
//! [`configure`] registers every route; the caller supplies the session
//! middleware and the shared [`state::HttpState`].

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, web};

pub mod error;
pub mod gate;
pub mod health;
pub mod reports;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod views;

/// `303 See Other` to `location`.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

/// Register the page routes.
///
/// `/report/new` is registered ahead of `/report/{id}` so the literal path
/// wins.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use feedeyes::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::index)
        .service(users::signup_form)
        .service(users::signup)
        .service(users::login_form)
        .service(users::login)
        .service(users::logout)
        .service(users::dashboard)
        .service(users::admin_dashboard)
        .service(users::feedeyes)
        .service(users::profile)
        .service(reports::new_report_form)
        .service(reports::create_report)
        .service(reports::list_reports)
        .service(reports::report_detail)
        .service(health::ready)
        .service(health::live);
}
