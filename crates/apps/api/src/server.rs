use crate::api_state::ApiContext;
use crate::create_router;
use app_state::{AppSettings, StorageKind};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get_service;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::build_backend;
use http::{HeaderValue, header};
use std::iter::once;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors;
use tower_http::cors::CorsLayer;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Connect the configured backend and serve the api until ctrl-c.
pub async fn serve(settings: AppSettings) -> Result<()> {
    info!("🚀 Initializing server...");
    let backend = build_backend(&settings).await?;

    let addr: SocketAddr = format!("{}:{}", settings.api.host, settings.api.port)
        .parse()
        .map_err(|e| eyre!("Invalid address: {}", e))?;
    let listener = TcpListener::bind(addr).await?;

    serve_with_listener(listener, ApiContext::new(backend, settings)).await
}

/// Serve the api on an already bound listener.
pub async fn serve_with_listener(listener: TcpListener, api_state: ApiContext) -> Result<()> {
    let app = build_app(api_state);
    info!("🐸 Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// The router with every layer applied.
pub fn build_app(api_state: ApiContext) -> Router {
    let settings = api_state.settings.clone();

    // --- CORS Configuration ---
    let allowed_origins: Vec<HeaderValue> = settings
        .api
        .allowed_origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(hv) => Some(hv),
            Err(e) => {
                error!("Invalid CORS origin configured: {} - Error: {}", s, e);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_origin(allowed_origins)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::CACHE_CONTROL,
        ]);

    let mut app = create_router(api_state)
        .layer(DefaultBodyLimit::max(settings.api.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetSensitiveRequestHeadersLayer::new(once(
            header::AUTHORIZATION,
        )));

    if settings.backend.storage == StorageKind::Local {
        // Uploaded files, when the bucket is a local folder.
        let serve_dir = ServeDir::new(&settings.backend.local_storage_folder);
        let cache_layer = SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_str(&format!(
                "public, max-age={}",
                settings.constants.storage.cache_control
            ))
            .unwrap_or_else(|_| HeaderValue::from_static("public, max-age=3600")),
        );
        app = app.nest_service("/storage", get_service(serve_dir).layer(cache_layer));
    }

    app
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Could not listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
