use std::net::SocketAddr;

use axum::Router;
use common::{admin_http::spawn_admin_server, metrics::encode_metrics};
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the application router over fresh storage reporting into the default registry.
pub fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let state = AppState::instrumented(&cfg.storage, prometheus::default_registry())?;
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP server until it fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    if cfg.admin.enabled {
        spawn_admin_server(&cfg.admin.addr, encode_metrics);
    }

    let app = build_app(&cfg)?;
    let addr: SocketAddr = cfg.bind_addr().parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, default_ttl_secs = cfg.storage.default_ttl_secs, "starting ncco storage server");
    axum::serve(listener, app).await?;
    Ok(())
}
