//! HTTP server for the grid adapter
//!
//! Routes requests to the shared [`GridEngine`](crate::engine::GridEngine) and answers
//! with the full post-operation grid. Uses axum on tokio.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{AllowHeaders, CorsLayer};
use tracing::{debug, info, warn};

use crate::engine::{GridEngine, SharedEngine};
use crate::error::ApiError;
use crate::protocol::*;
use crate::types::{is_valid_dimension, Dimensions, MAX_STEPS_PER_REQUEST};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin allowed by the CORS layer
    pub cors_origin: String,
    /// Ping interval on idle live-feed connections
    pub heartbeat_interval: Duration,
    /// Size of the grid created at startup
    pub default_dimensions: Dimensions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_origin: "http://localhost:3000".to_string(),
            heartbeat_interval: Duration::from_secs(5),
            default_dimensions: Dimensions::default(),
        }
    }
}

impl ServerConfig {
    /// Create from environment variables, falling back to defaults on missing or bad values
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any `LIFE_*` key lookup. Values are trimmed; unparseable or
    /// out-of-range values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let trimmed = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let host = trimmed("LIFE_HOST").unwrap_or(defaults.host);
        let port = trimmed("LIFE_PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let cors_origin = trimmed("LIFE_CORS_ORIGIN").unwrap_or(defaults.cors_origin);

        let heartbeat_interval = trimmed("LIFE_HEARTBEAT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.heartbeat_interval);

        let dimension = |key: &str, fallback: usize| {
            trimmed(key)
                .and_then(|s| s.parse::<usize>().ok())
                .filter(|&v| is_valid_dimension(v))
                .unwrap_or(fallback)
        };
        let default_dimensions = Dimensions::new(
            dimension("LIFE_DEFAULT_ROWS", defaults.default_dimensions.rows),
            dimension("LIFE_DEFAULT_COLS", defaults.default_dimensions.cols),
        );

        Self {
            host,
            port,
            cors_origin,
            heartbeat_interval,
            default_dimensions,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }

    /// Engine holding an empty grid of the configured default size
    pub fn build_engine(&self) -> anyhow::Result<SharedEngine> {
        let Dimensions { rows, cols } = self.default_dimensions;
        let engine = GridEngine::with_size(rows as i64, cols as i64)?;
        Ok(engine.shared())
    }
}

/// Fail fast when `host:port` cannot be bound (e.g. already in use).
pub fn check_tcp_listen_available(host: &str, port: u16) -> std::io::Result<()> {
    let listener = std::net::TcpListener::bind((host, port))?;
    drop(listener);
    Ok(())
}

/// State shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    engine: SharedEngine,
    heartbeat_interval: Duration,
    feed_counter: Arc<AtomicUsize>,
}

impl AppState {
    pub fn new(engine: SharedEngine, heartbeat_interval: Duration) -> Self {
        Self {
            engine,
            heartbeat_interval,
            feed_counter: Arc::new(AtomicUsize::new(0)),
        }
    }
}

/// CORS policy for the configured browser origin
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)
        .with_context(|| format!("invalid CORS origin {:?}", origin))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        // Credentials rule out a `*` header list, so echo whatever the browser asks for.
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Routes without middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/grid", get(get_grid).post(resize_grid))
        .route("/api/grid/reset", post(reset_grid))
        .route("/api/cell", post(set_cell))
        .route("/api/next", post(next_generation))
        .route("/ws", get(live_feed))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Full application: routes plus the CORS layer
pub fn build_app(config: &ServerConfig, engine: SharedEngine) -> anyhow::Result<Router> {
    let state = AppState::new(engine, config.heartbeat_interval);
    Ok(router(state).layer(cors_layer(&config.cors_origin)?))
}

/// Start the HTTP server and serve until `shutdown` resolves.
///
/// `ready_tx` receives the bound address once the listener is up (useful with port 0).
pub async fn run_server<F>(
    config: ServerConfig,
    engine: SharedEngine,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&config, engine)?;

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    let bound = listener.local_addr()?;
    info!(addr = %bound, cors_origin = %config.cors_origin, "HTTP server listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn get_grid(State(state): State<AppState>) -> Json<GridMessage> {
    Json(state.engine.snapshot().into())
}

async fn resize_grid(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<GridMessage>), ApiError> {
    let req: ResizeRequest = parse_request(&body).inspect_err(|e| {
        warn!(error = %e, "rejected resize body");
    })?;

    match state.engine.create(req.rows, req.cols) {
        Ok(snap) => {
            info!(rows = req.rows, cols = req.cols, "grid resized");
            Ok((StatusCode::CREATED, Json(snap.into())))
        }
        Err(e) => {
            warn!(rows = req.rows, cols = req.cols, "rejected resize");
            Err(e.into())
        }
    }
}

async fn reset_grid(State(state): State<AppState>) -> Json<GridMessage> {
    debug!("grid cleared");
    Json(state.engine.clear().into())
}

async fn set_cell(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GridMessage>, ApiError> {
    let req: CellRequest = parse_request(&body).inspect_err(|e| {
        warn!(error = %e, "rejected cell body");
    })?;

    let snap = state.engine.set_cell(req.row, req.col, req.state);
    debug!(row = req.row, col = req.col, state = req.state, "cell set");
    Ok(Json(snap.into()))
}

async fn next_generation(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GridMessage>, ApiError> {
    let req: AdvanceRequest = parse_optional_request(&body).inspect_err(|e| {
        warn!(error = %e, "rejected advance body");
    })?;

    let steps = u32::try_from(req.steps)
        .ok()
        .filter(|&s| s <= MAX_STEPS_PER_REQUEST)
        .ok_or(ApiError::InvalidSteps(req.steps))?;

    let snap = state.engine.advance_by(steps);
    debug!(steps, generation = snap.generation(), "advanced");
    Ok(Json(snap.into()))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn live_feed(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| run_feed(socket, state))
}

/// Send one snapshot, then keep the connection alive with pings until the
/// client goes away. The grid lock is held only while the snapshot is taken.
async fn run_feed(mut socket: WebSocket, state: AppState) {
    let feed_id = state.feed_counter.fetch_add(1, Ordering::Relaxed) + 1;
    info!(feed_id, "live feed connected");

    let initial = GridMessage::from(state.engine.snapshot());
    match serde_json::to_string(&initial) {
        Ok(text) => {
            if let Err(e) = socket.send(Message::Text(text)).await {
                warn!(feed_id, error = %e, "failed to send initial grid");
                return;
            }
        }
        Err(e) => {
            warn!(feed_id, error = %e, "failed to encode initial grid");
            return;
        }
    }

    let mut heartbeat = tokio::time::interval(state.heartbeat_interval);
    // The first tick completes immediately.
    heartbeat.tick().await;

    loop {
        tokio::select! {
            _ = heartbeat.tick() => {
                if socket.send(Message::Ping(Vec::new())).await.is_err() {
                    break;
                }
            }
            inbound = socket.recv() => match inbound {
                None | Some(Ok(Message::Close(_))) => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!(feed_id, error = %e, "live feed receive error");
                    break;
                }
            },
        }
    }

    info!(feed_id, "live feed disconnected");
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert_eq!(config.heartbeat_interval, Duration::from_secs(5));
        assert_eq!(config.default_dimensions, Dimensions::new(5, 5));
        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:8080".parse().unwrap()
        );
    }

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_server_config_empty_lookup_is_default() {
        let config = config_from(&[]);
        let defaults = ServerConfig::default();
        assert_eq!(config.host, defaults.host);
        assert_eq!(config.port, defaults.port);
        assert_eq!(config.cors_origin, defaults.cors_origin);
        assert_eq!(config.heartbeat_interval, defaults.heartbeat_interval);
        assert_eq!(config.default_dimensions, defaults.default_dimensions);
    }

    #[test]
    fn test_server_config_bad_values_fall_back() {
        let config = config_from(&[
            ("LIFE_PORT", "abc"),
            ("LIFE_HEARTBEAT_SECS", "0"),
            ("LIFE_DEFAULT_ROWS", "0"),
            ("LIFE_DEFAULT_COLS", "21"),
            ("LIFE_CORS_ORIGIN", "   "),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.heartbeat_interval, Duration::from_secs(5));
        assert_eq!(config.default_dimensions, Dimensions::new(5, 5));
        assert_eq!(config.cors_origin, "http://localhost:3000");

        let config = config_from(&[("LIFE_DEFAULT_ROWS", "abc"), ("LIFE_DEFAULT_COLS", "-3")]);
        assert_eq!(config.default_dimensions, Dimensions::new(5, 5));
    }

    #[test]
    fn test_server_config_values_are_trimmed() {
        let config = config_from(&[
            ("LIFE_HOST", " 0.0.0.0 "),
            ("LIFE_PORT", " 9001 "),
            ("LIFE_HEARTBEAT_SECS", " 7 "),
            ("LIFE_DEFAULT_ROWS", " 7 "),
            ("LIFE_DEFAULT_COLS", "20"),
            ("LIFE_CORS_ORIGIN", " http://example.test "),
        ]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9001);
        assert_eq!(config.heartbeat_interval, Duration::from_secs(7));
        assert_eq!(config.default_dimensions, Dimensions::new(7, 20));
        assert_eq!(config.cors_origin, "http://example.test");
    }

    #[test]
    fn test_bad_host_is_an_error() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_build_engine_uses_default_dimensions() {
        let config = ServerConfig {
            default_dimensions: Dimensions::new(3, 9),
            ..ServerConfig::default()
        };
        let engine = config.build_engine().unwrap();
        assert_eq!(engine.dimensions(), Dimensions::new(3, 9));
    }

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        assert!(cors_layer("http://localhost:3000").is_ok());
        assert!(cors_layer("bad\norigin").is_err());
    }
}
