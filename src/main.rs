mod config;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::remote::PlaceholderRemote;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::StoreConfig::from_env();
    let catalog = config.load_catalog().expect("catalog load failed");
    tracing::info!(
        products = catalog.products().len(),
        source = %config.catalog_path.as_ref().map_or("seed".into(), |p| p.display().to_string()),
        "catalog loaded"
    );

    let port = config.port;
    let state = state::AppState::new(config, catalog, Arc::new(PlaceholderRemote));

    // Spawn background session eviction.
    let _sweeper = services::sweeper::spawn_session_sweeper(state.clone());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "doces listening");
    axum::serve(listener, app).await.expect("server failed");
}
