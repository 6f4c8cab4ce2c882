//! Serve command - runs the HTTP API

use std::net::SocketAddr;

use clap::Args;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::api::create_router;
use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Overrides applied on top of the loaded configuration
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Storage backend (`memory` or `mongo`)
    #[arg(long)]
    pub storage: Option<String>,

    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(storage) = &self.storage {
            config.storage.backend = storage.clone();
        }

        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Run the API server until a shutdown signal arrives
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_config(&args, AppConfig::environment())?;
    logging::init_logging(&logging::LoggingConfig::from(&config));

    let state = crate::create_app_state(&config).await?;
    let app = create_router(state);

    let addr = build_socket_addr(&config)?;
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

fn load_config(args: &ServeArgs, environment: config::Environment) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load_with(environment)?;
    args.apply(&mut config);

    Ok(config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides() {
        let mut config = AppConfig::default();
        let args = ServeArgs {
            storage: Some("mongo".to_string()),
            port: Some(3000),
        };

        args.apply(&mut config);

        assert_eq!(config.storage.backend, "mongo");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_apply_without_overrides_keeps_config() {
        let mut config = AppConfig::default();

        ServeArgs::default().apply(&mut config);

        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.server.port, 8080);
    }

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        AppConfig::environment().source(Some(map))
    }

    #[test]
    fn test_load_config_applies_args_over_environment() {
        let args = ServeArgs {
            storage: None,
            port: Some(4000),
        };

        let config = load_config(
            &args,
            environment(&[("APP__STORAGE__BACKEND", "mongo"), ("APP__SERVER__PORT", "9090")]),
        )
        .unwrap();

        assert_eq!(config.storage.backend, "mongo");
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_load_config_rejects_invalid_environment() {
        let result = load_config(
            &ServeArgs::default(),
            environment(&[("APP__STORAGE__BACKEND", "mongo"), ("APP__SERVER__PORT", "notaport")]),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_build_socket_addr() {
        let addr = build_socket_addr(&AppConfig::default()).unwrap();
        assert_eq!(addr.port(), 8080);
        assert!(addr.ip().is_unspecified());
    }

    #[test]
    fn test_build_socket_addr_rejects_bad_host() {
        let mut config = AppConfig::default();
        config.server.host = "not-an-ip".to_string();

        assert!(build_socket_addr(&config).is_err());
    }
}
