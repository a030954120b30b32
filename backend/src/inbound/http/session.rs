//! Session-backed caller identity for HTTP handlers.
//!
//! Login lives elsewhere in the storefront; this subsystem only reads the
//! user id the auth gateway stored in the session cookie. The write helper
//! exists so tests can mint authenticated sessions.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Extractor exposing the caller identity stored in the session.
#[derive(Clone)]
pub struct SessionContext {
    session: Session,
}

impl SessionContext {
    /// Store a user id in the session, replacing any existing identity.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.session
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("session write failed: {error}")))
    }

    /// The caller's id, or `None` for anonymous sessions.
    ///
    /// A stored value that fails UUID parsing is treated as absent so a
    /// tampered cookie degrades to 401, never 500.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let stored = self
            .session
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("session read failed: {error}")))?;
        let Some(raw) = stored else {
            return Ok(None);
        };
        match Uuid::parse_str(&raw) {
            Ok(id) => Ok(Some(UserId::from_uuid(id))),
            Err(error) => {
                warn!(%error, "session carries an unparseable user id");
                Ok(None)
            }
        }
    }

    /// The caller's id, or `401 Unauthorized` for anonymous sessions.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let inner = Session::from_request(req, payload);
        Box::pin(async move { inner.await.map(|session| SessionContext { session }) })
    }
}
