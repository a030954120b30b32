//! Backend entry point: loads configuration, builds the service graph, and
//! serves the restock coordination API.

use actix_web::cookie::Key;
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use backend::api::health::HealthState;
use backend::server::{build_runtime, create_server, RuntimeParts, ServerConfig, ServerSettings};

fn session_key(settings: &ServerSettings) -> std::io::Result<Key> {
    let Some(path) = settings.session_key_file.as_deref() else {
        if cfg!(debug_assertions) {
            warn!("no session key file configured; using temporary key (dev only)");
            return Ok(Key::generate());
        }
        return Err(std::io::Error::other(
            "session_key_file must be configured in release builds",
        ));
    };

    match std::fs::read(path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(error) => {
            if cfg!(debug_assertions) {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {}: {error}",
                    path.display()
                )))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|error| std::io::Error::other(format!("failed to load configuration: {error}")))?;
    let key = session_key(&settings)?;

    let RuntimeParts {
        http_state,
        coordinator_worker: _coordinator_worker,
        dispatch_worker: _dispatch_worker,
    } = build_runtime(&settings)
        .await
        .map_err(|error| std::io::Error::other(error.to_string()))?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig {
            key,
            cookie_secure: settings.cookie_secure,
            bind_addr: settings.bind_addr().to_owned(),
            http_state,
        },
    )?;

    server.await
}
