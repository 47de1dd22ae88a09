//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! [`SessionContext`] wraps the Actix session so handlers only deal with
//! domain-friendly operations: persisting the signed-in user, reading it
//! back and purging it on logout. [`SessionUser`] is the authenticated
//! identity handed to handlers behind the session gate.

use actix_session::{Session, SessionExt};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Actor, Error, Role, User, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const USERNAME_KEY: &str = "username";
pub(crate) const ROLE_KEY: &str = "role";

/// Authenticated identity stored in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}

impl SessionUser {
    /// The identity as seen by the domain's authorization checks.
    #[must_use]
    pub fn actor(&self) -> Actor {
        Actor::new(self.id, self.role)
    }
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the signed-in user, rotating the session first so an identifier
    /// issued before login is never reused afterwards.
    pub fn persist_user(&self, user: &User) -> Result<(), Error> {
        self.0.renew();
        self.insert(USER_ID_KEY, user.id().to_string())?;
        self.insert(USERNAME_KEY, user.username().as_ref().to_owned())?;
        self.insert(ROLE_KEY, user.role().as_str().to_owned())
    }

    /// Drop every value and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }

    fn insert(&self, key: &str, value: String) -> Result<(), Error> {
        self.0
            .insert(key, value)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        self.0
            .get::<String>(key)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// Fetch the signed-in user, if the session holds a well-formed one.
    ///
    /// A cookie carrying an unparseable id or role is treated as anonymous.
    pub fn user(&self) -> Result<Option<SessionUser>, Error> {
        let Some(raw_id) = self.read(USER_ID_KEY)? else {
            return Ok(None);
        };
        let id = match UserId::new(&raw_id) {
            Ok(id) => id,
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                return Ok(None);
            }
        };
        let role = match self.read(ROLE_KEY)?.as_deref().map(str::parse::<Role>) {
            Some(Ok(role)) => role,
            Some(Err(error)) => {
                warn!(%error, "invalid role in session cookie");
                return Ok(None);
            }
            None => {
                warn!(user_id = %id, "session cookie without a role");
                return Ok(None);
            }
        };
        let username = self.read(USERNAME_KEY)?.unwrap_or_default();

        Ok(Some(SessionUser { id, username, role }))
    }

    /// Require a signed-in user or return `401 Unauthorized`.
    pub fn require_user(&self) -> Result<SessionUser, Error> {
        self.user()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

impl FromRequest for SessionUser {
    type Error = actix_web::Error;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = SessionContext::new(req.get_session());
        std::future::ready(session.require_user().map_err(actix_web::Error::from))
    }
}
