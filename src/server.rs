//! HTTP surface of the gateway
//!
//! `GET /` answers with a readiness string and `POST /api/generate-image`
//! relays to [`Gateway::generate`]. Every failure is rendered as
//! `{"error": "..."}` with a 400 or 500 status.

use crate::gateway::Gateway;
use crate::models::{Config, GenerationRequest, GenerationResponse};
use crate::{Error, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

pub const READY_MESSAGE: &str = "Backend running with Stability AI. Use POST /api/generate-image";

#[derive(Clone)]
pub struct AppState {
    gateway: Arc<Gateway>,
}

impl AppState {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }
}

/// Build the router. With no `allowed_origin` any origin may call the API.
pub fn create_app(state: AppState, allowed_origin: Option<&str>) -> Result<Router> {
    Ok(Router::new()
        .route("/", get(ready_handler))
        .route("/api/generate-image", post(generate_handler))
        .layer(cors_layer(allowed_origin)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    match allowed_origin {
        Some(origin) => {
            let origin = HeaderValue::from_str(origin).map_err(|e| {
                Error::Config(format!("Invalid ALLOWED_ORIGIN '{}': {}", origin, e))
            })?;
            Ok(layer.allow_origin(origin))
        }
        None => Ok(layer.allow_origin(Any)),
    }
}

/// Bind the configured port and serve until Ctrl-C.
pub async fn serve(config: &Config, gateway: Gateway) -> Result<()> {
    let app = create_app(AppState::new(gateway), config.allowed_origin.as_deref())?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    run(listener, app, shutdown_signal()).await
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Backend running at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Unable to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

async fn ready_handler() -> &'static str {
    READY_MESSAGE
}

async fn generate_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GenerationRequest>, JsonRejection>,
) -> Response {
    let span = tracing::info_span!("generate_image", request_id = %Uuid::new_v4());

    async move {
        let request = match payload {
            Ok(Json(request)) => request,
            Err(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
                return ApiErrorResponse(Error::Validation(rejection.body_text())).into_response();
            }
        };

        match state.gateway.generate(request).await {
            Ok(images) => Json(GenerationResponse::images(images)).into_response(),
            Err(e) => ApiErrorResponse(e).into_response(),
        }
    }
    .instrument(span)
    .await
}

// Error response wrapper
struct ApiErrorResponse(Error);

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(GenerationResponse::error(self.0.to_string()))).into_response()
    }
}
