//! Shared helpers for handler unit tests.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;

/// Session middleware for in-process test apps.
///
/// Uses a throwaway key and a plain-HTTP cookie so tests never depend on
/// TLS or external key material. The cookie name matches production so the
/// session helpers see the same shape they do at runtime.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    let key = Key::generate();
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}
