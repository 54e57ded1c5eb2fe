//! quizbot - a single-channel IRC trivia bot shell.
//!
//! Connects to one chat channel, performs the registration handshake, and
//! drives the protocol engine from a blocking poll loop. The poll cadence
//! is set by the engine's receive timeout, so an idle server costs one
//! bounded wait per step and nothing else.

mod config;
mod quiz;

use std::time::Duration;

use quiz_irc::{Connection, Engine, NetContext, Registration, TcpByteStream};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::quiz::{IdleQuizmaster, TracePresenter};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        channel = %config.channel.name,
        nick = %config.identity.nick,
        "Starting quizbot"
    );

    let net = NetContext::acquire()?;
    let stream = TcpByteStream::connect(
        &net,
        &config.server.host,
        config.server.port,
        Duration::from_millis(config.timeouts.recv_timeout_ms),
    )?;

    let conn = Connection::new(stream, config.channel.name.clone());
    let mut engine = Engine::new(conn, IdleQuizmaster::default(), TracePresenter);

    engine.join(&Registration {
        nick: config.identity.nick.clone(),
        username: config.identity.user().to_string(),
        password: config.server.password.clone(),
        greeting: quiz::greeting(),
    })?;

    // Reconnection policy belongs to whoever runs us; on transport failure
    // we log and exit.
    while engine.is_active() {
        if let Err(e) = engine.poll() {
            error!(error = %e, "Connection lost");
            break;
        }
    }

    info!("Connection closed, shutting down");
    Ok(())
}
