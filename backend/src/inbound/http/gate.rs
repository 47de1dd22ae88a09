//! Session gate for pages that need a signed-in user.
//!
//! [`RequireSession`] wraps individual resources. Requests without a valid
//! session identity never reach the handler; they get `303 See Other` to the
//! configured location with an empty body.

use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::LOCATION;
use actix_web::{Error, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, warn};

use super::session::SessionContext;

/// Redirect anonymous requests away from the wrapped resource.
///
/// # Examples
/// ```
/// use actix_web::{web, HttpResponse};
/// use feedeyes::inbound::http::gate::RequireSession;
///
/// let _resource = web::resource("/dashboard")
///     .wrap(RequireSession::to_landing())
///     .route(web::get().to(HttpResponse::Ok));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequireSession {
    location: &'static str,
}

impl RequireSession {
    /// Redirect to an arbitrary location.
    #[must_use]
    pub const fn redirect_to(location: &'static str) -> Self {
        Self { location }
    }

    /// Redirect to the landing page.
    #[must_use]
    pub const fn to_landing() -> Self {
        Self::redirect_to("/")
    }

    /// Redirect to the login form.
    #[must_use]
    pub const fn to_login() -> Self {
        Self::redirect_to("/login")
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service,
            location: self.location,
        }))
    }
}

/// Service wrapper produced by [`RequireSession`].
pub struct RequireSessionMiddleware<S> {
    service: S,
    location: &'static str,
}

fn is_signed_in(req: &ServiceRequest) -> bool {
    match SessionContext::new(req.get_session()).user() {
        Ok(user) => user.is_some(),
        Err(error) => {
            warn!(%error, "unreadable session treated as anonymous");
            false
        }
    }
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !is_signed_in(&req) {
            debug!(path = req.path(), location = self.location, "redirecting anonymous request");
            let redirect = HttpResponse::SeeOther()
                .insert_header((LOCATION, self.location))
                .finish();
            let response = req.into_response(redirect).map_into_right_body();
            return Box::pin(async move { Ok(response) });
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
