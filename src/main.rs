use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use friend_ratings::{
    api::ApiClient, config::Config, handlers, panel::Panel, pins::PinStore, store::FileStore,
};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,friend_ratings=debug"));
    fmt().with_env_filter(env_filter).with_target(true).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let client = ApiClient::new(&config.api);
    let pins = PinStore::new(FileStore::new(&config.pin_store_path));
    let panel = Arc::new(Panel::new(client, config.self_handles.clone(), pins));
    let app = handlers::router(panel);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    info!("Server running on http://localhost:{}", config.port);
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {e}");
    }
}
