use skywatch::{
    config::Config,
    infrastructure::{
        spool::image_spool::ImageSpool, vision::roboflow::RoboflowDetector,
        weather::openweather::OpenWeatherClient,
    },
    presentation::http::{routes::create_router, state::AppState},
};
use axum::extract::DefaultBodyLimit;
use http::{HeaderValue, Method, header};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging with safe environment filter
    // Uses RUST_LOG if set, otherwise uses sensible defaults
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,skywatch=debug,tower_http=debug"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    if !config.missing_keys().is_empty() {
        // Boot anyway; credentials are validated lazily on first use and
        // /health reports what is missing.
        tracing::warn!(missing = ?config.missing_keys(), "Starting without full provider configuration");
    }

    let detector = Arc::new(RoboflowDetector::new(
        config.roboflow_api_url.clone(),
        config.roboflow_model_id.clone(),
        config.roboflow_api_key.clone(),
        Duration::from_secs(config.detection_timeout_seconds),
    )?);
    let weather = Arc::new(OpenWeatherClient::new(
        config.openweather_base_url.clone(),
        config.openweather_api_key.clone(),
        Duration::from_secs(config.weather_timeout_seconds),
    )?);
    let spool = Arc::new(ImageSpool::new(config.spool_dir.clone()));
    let detect_permits = Arc::new(Semaphore::new(config.detect_concurrency));

    let state = AppState {
        config: config.clone(),
        spool,
        detector,
        weather,
        detect_permits,
    };

    // When a frontend origin is configured, restrict CORS to it; otherwise
    // stay permissive for local development.
    let cors = match config.frontend_url.as_deref() {
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .map_err(|e| anyhow::anyhow!("Invalid FRONTEND_URL: {}", e))?;
            CorsLayer::new()
                .allow_origin(AllowOrigin::exact(origin))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .max_age(Duration::from_secs(600))
        }
        None => CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .max_age(Duration::from_secs(600)),
    };

    let app = create_router(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Cloud Detection & Weather API listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, initiating graceful shutdown");
        }
    }
}
