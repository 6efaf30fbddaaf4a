use route_matcher::catalog::{RouteCatalog, load_catalog};
use route_matcher::config::AppConfig;
use route_matcher::matcher::MatcherConfig;
use route_matcher::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "route_matcher=debug,tower_http=info";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    // Serve an empty catalog rather than refusing to start
    let catalog = load_catalog(&config.catalog_path, config.origin).unwrap_or_else(|e| {
        error!(
            path = %config.catalog_path.display(),
            error = %e,
            "failed to load route catalog"
        );
        RouteCatalog::empty(config.origin)
    });

    let state = AppState::new(catalog, MatcherConfig::default(), config.request_budget);
    let app = create_router(state, &config.static_dir);

    let addr = config.socket_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!("Route matcher listening on http://{addr}");
    info!("  GET  /           - Map page");
    info!("  GET  /health     - Health check");
    info!("  POST /get_route  - Best route to a clicked position");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
    }
}
