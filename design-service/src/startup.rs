//! Application startup and lifecycle management.

use crate::config::Settings;
use crate::handlers::{
    designs::save_design,
    fallback::{method_not_allowed, not_found},
    health::{health_check, index},
    metrics::metrics,
    suggestions::ai_suggestions,
};
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::TextProvider;
use axum::{
    http::StatusCode,
    middleware::from_fn,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use secrecy::Secret;
use service_core::error::{AppError, ErrorResponse, INTERNAL_ERROR_MESSAGE};
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared, read-only application state built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    /// `None` when no API key was configured; AI suggestions then answer 503.
    pub text_provider: Option<Arc<dyn TextProvider>>,
}

impl AppState {
    pub fn new(settings: Settings, text_provider: Option<Arc<dyn TextProvider>>) -> Self {
        Self {
            settings: Arc::new(settings),
            text_provider,
        }
    }

    /// Build state from settings, creating the Gemini provider when a key is set.
    pub fn from_settings(settings: Settings) -> Self {
        let text_provider = build_text_provider(&settings);
        Self::new(settings, text_provider)
    }
}

fn build_text_provider(settings: &Settings) -> Option<Arc<dyn TextProvider>> {
    let Some(api_key) = settings.api_key() else {
        tracing::warn!("API_KEY environment variable not set. AI features will not work.");
        return None;
    };

    let gemini_config = GeminiConfig {
        api_key: Secret::new(api_key.to_string()),
        model: settings.genai_model.clone(),
        api_base: settings.genai_api_base.clone(),
        timeout: Duration::from_secs(settings.genai_timeout_secs),
    };

    match GeminiTextProvider::new(gemini_config) {
        Ok(provider) => {
            tracing::info!(model = %settings.genai_model, "Initialized Gemini text provider");
            Some(Arc::new(provider))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize Gemini text provider");
            None
        }
    }
}

/// Turns a handler panic into the generic 500 body.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: INTERNAL_ERROR_MESSAGE.to_string(),
        }),
    )
        .into_response()
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).fallback(method_not_allowed))
        .route("/health", get(health_check).fallback(method_not_allowed))
        .route("/metrics", get(metrics).fallback(method_not_allowed))
        .route(
            "/api/save-design",
            post(save_design).fallback(method_not_allowed),
        )
        .route(
            "/api/ai-suggestions",
            post(ai_suggestions).fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin),
        )
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        let state = AppState::from_settings(settings);
        Self::build_with_state(state).await
    }

    /// Build the application around prepared state. Port 0 picks a random port.
    pub async fn build_with_state(state: AppState) -> Result<Self, AppError> {
        let address = state.settings.bind_address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Design service listening on {}:{}", state.settings.host, port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}
