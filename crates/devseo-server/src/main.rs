mod api;
mod middleware;

use std::sync::Arc;

use devseo_core::{Environment, SiteConfig};
use devseo_dataforseo::DataForSeoClient;
use devseo_research::ReferenceDataStore;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::{AuthState, RateLimitState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = devseo_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = Arc::new(DataForSeoClient::with_base_url(
        &config.dataforseo_auth_token,
        config.dataforseo_timeout_secs,
        &config.user_agent,
        &config.dataforseo_base_url,
    )?);

    let catalog = Arc::new(ReferenceDataStore::new());
    {
        let catalog = Arc::clone(&catalog);
        let client = Arc::clone(&client);
        tokio::spawn(async move { catalog.initialize(client.as_ref()).await });
    }

    let auth = AuthState::from_env(matches!(config.env, Environment::Development))?;
    let rate_limit = RateLimitState::per_minute(config.rate_limit_per_minute);
    let state = AppState {
        site: Arc::new(SiteConfig::new(&config.site_url, config.default_locale)),
        catalog,
        source: client,
    };
    let app = build_app(state, auth, rate_limit);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "devseo-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
