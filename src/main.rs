// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use quill_server::{
    api::router,
    auth::{PasswordHasher, SigningSecret, TokenCodec},
    config::{Config, ConfigError},
    logging::init_logging,
    state::AppState,
    storage::{Database, StoreError},
};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
    #[error("failed to generate a signing secret")]
    Secret,
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };
    init_logging(config.log_format);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server stopped");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), StartupError> {
    let secret = match config.jwt_secret.clone() {
        Some(secret) => secret,
        None => {
            tracing::warn!("JWT_SECRET not set, generated a random secret; tokens will not survive a restart");
            SigningSecret::generate().map_err(|_| StartupError::Secret)?
        }
    };

    let db_path = config.database_path();
    let db = Database::open(&db_path)?;
    let accounts = db.count_accounts()?;
    tracing::info!(path = %db_path.display(), accounts, "Database opened");
    if accounts == 0 {
        tracing::warn!("No accounts yet; the first POST /api/v1/accounts creates the admin");
    }

    let state = AppState::new(
        Arc::new(db),
        Arc::new(TokenCodec::new(&secret)),
        PasswordHasher::new(config.bcrypt_cost),
    );
    let app = router(state);

    let addr = config.bind_address()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Quill server listening (docs at /docs)");

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

/// Cancel `shutdown` on Ctrl-C or SIGTERM.
async fn wait_for_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
    shutdown.cancel();
}
