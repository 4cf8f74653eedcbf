use axum::extract::FromRef;
use config::{Environment, File};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tower_sessions::ExpiredDeletion;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{Layer, layer::SubscriberExt};

use crate::{
    gateway::{RestStore, bill::BillStore},
    web::session::InMemSessionStore,
};

mod gateway;
mod web;

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Config {
    pub address: std::net::SocketAddr,
    pub domain: String,
    pub cookie_secure: bool,
    pub log_level: String,
    pub bills_api_url: url::Url,
}

impl Config {
    pub fn new() -> Self {
        let s = config::Config::builder()
            .add_source(File::with_name(&format!(
                "{}/config/config.toml",
                env!("CARGO_MANIFEST_DIR")
            )))
            .add_source(Environment::with_prefix("BILLDESK").separator("__"))
            .build()
            .expect("failed to build config");

        s.try_deserialize().expect("failed to parse config")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, FromRef)]
pub struct Ctx {
    pub bill_store: Arc<dyn BillStore>,
    pub config: Config,
    pub session_store: InMemSessionStore,
}

impl Ctx {
    pub fn new(cfg: &Config) -> Result<Self, anyhow::Error> {
        let store = RestStore::new(cfg.bills_api_url.clone())?;

        let session_store = InMemSessionStore::default();

        // Delete expired sessions regularly
        let session_store_clone = session_store.clone();
        tokio::spawn(async move {
            if let Err(e) = session_store_clone
                .continuously_delete_expired(tokio::time::Duration::from_secs(60))
                .await
            {
                tracing::error!("Error deleting expired sessions: {e}");
            }
        });

        Ok(Self {
            bill_store: Arc::new(store),
            config: cfg.to_owned(),
            session_store,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cfg = Config::new();

    tracing_log::LogTracer::init().expect("LogTracer init");
    let level_filter = LevelFilter::from_str(&cfg.log_level).expect("log level");
    let stdout_log = tracing_subscriber::fmt::layer().with_filter(level_filter);
    let subscriber = tracing_subscriber::registry().with(stdout_log);
    tracing::subscriber::set_global_default(subscriber)
        .expect("tracing::subscriber::set_global_default");

    if let Ok(listener) = tokio::net::TcpListener::bind(&cfg.address).await {
        info!(
            "Server running at http://{} against bills API {} with log-level={}",
            cfg.address, cfg.bills_api_url, cfg.log_level
        );
        let ctx = Ctx::new(&cfg)?;
        let router = web::router(ctx, &cfg);
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_handler())
        .await?;
    } else {
        error!("Failed to bind to listen address {}", &cfg.address);
    }

    Ok(())
}

async fn shutdown_handler() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("to install ctrl_c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
