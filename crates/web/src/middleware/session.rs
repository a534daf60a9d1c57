//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions, with signed
//! cookies keyed by the configured session secret.

use secrecy::ExposeSecret;
use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::AppConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "lookbook_session";

/// Session lifetime in seconds (one hour).
///
/// The layer-level expiry is the default for anonymous sessions; logins pin
/// their own fixed `AtDateTime` expiry so the authenticated window is counted
/// from issuance, not from last activity.
pub const SESSION_LIFETIME_SECONDS: i64 = 60 * 60;

/// Error creating the session layer.
#[derive(Debug, thiserror::Error)]
pub enum SessionLayerError {
    #[error("session secret is not a valid signing key: {0}")]
    InvalidKey(#[from] tower_sessions::cookie::KeyError),
}

/// Create the session layer around a `PostgreSQL` store.
///
/// The store's own migration (`PostgresStore::migrate`) must have been run
/// before the first request.
///
/// # Errors
///
/// Returns an error if the configured session secret cannot be used as a
/// cookie signing key (it must be at least 64 bytes; config validation
/// already guarantees this).
pub fn create_session_layer(
    store: PostgresStore,
    config: &AppConfig,
) -> Result<SessionManagerLayer<PostgresStore, SignedCookie>, SessionLayerError> {
    let key = Key::try_from(config.session_secret.expose_secret().as_bytes())?;

    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_LIFETIME_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}
