//! Local stand-in for the Open-Meteo forecast endpoint.
//!
//! Binds an axum server to `127.0.0.1:0` and answers every forecast query
//! through a caller-supplied closure, so tests can script per-coordinate
//! successes, error statuses, malformed bodies and slow responses.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use tokio::task::JoinHandle;

/// Path the stub serves, mirroring the real endpoint.
pub const STUB_FORECAST_PATH: &str = "/v1/forecast";

/// What the stub sends back for one query.
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

impl StubResponse {
    /// 200 with a JSON body.
    pub fn json(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: None,
        }
    }

    /// Arbitrary status with a short JSON error body.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: r#"{"error":true,"reason":"stub"}"#.to_string(),
            delay: None,
        }
    }

    /// 200 with a body that is not valid JSON.
    pub fn garbage() -> Self {
        Self {
            status: 200,
            body: "<html>not json</html>".to_string(),
            delay: None,
        }
    }

    /// Delay the response by `delay`.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

type Responder = dyn Fn(f64, f64) -> StubResponse + Send + Sync;

#[derive(Clone)]
struct StubState {
    respond: Arc<Responder>,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

/// Handle to a running stub provider.
pub struct StubProvider {
    pub addr: SocketAddr,
    state: StubState,
    handle: JoinHandle<()>,
}

impl StubProvider {
    /// Forecast endpoint URL to hand to the fetcher.
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, STUB_FORECAST_PATH)
    }

    /// Number of forecast queries received so far.
    pub fn request_count(&self) -> usize {
        self.state.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Query parameters of every request received, in arrival order.
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.state
            .requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Highest number of queries observed in flight at once.
    pub fn peak_in_flight(&self) -> usize {
        self.state.peak_in_flight.load(Ordering::SeqCst)
    }
}

impl Drop for StubProvider {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start a stub provider answering each `(lat, lon)` query with `respond`.
///
/// Queries missing a parseable latitude or longitude receive a 400.
pub async fn spawn_stub_provider<F>(respond: F) -> StubProvider
where
    F: Fn(f64, f64) -> StubResponse + Send + Sync + 'static,
{
    let state = StubState {
        respond: Arc::new(respond),
        requests: Arc::new(Mutex::new(Vec::new())),
        in_flight: Arc::new(AtomicUsize::new(0)),
        peak_in_flight: Arc::new(AtomicUsize::new(0)),
    };

    let app = Router::new()
        .route(STUB_FORECAST_PATH, get(forecast_handler))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub provider");
    let addr = listener.local_addr().expect("Stub provider has no address");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    StubProvider {
        addr,
        state,
        handle,
    }
}

async fn forecast_handler(
    State(state): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if let Ok(mut requests) = state.requests.lock() {
        requests.push(params.clone());
    }

    let coords = (
        params.get("latitude").and_then(|v| v.parse::<f64>().ok()),
        params.get("longitude").and_then(|v| v.parse::<f64>().ok()),
    );
    let (Some(lat), Some(lon)) = coords else {
        return (
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"error":true,"reason":"missing coordinates"}"#.to_string(),
        );
    };

    let current = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    state.peak_in_flight.fetch_max(current, Ordering::SeqCst);

    let response = (state.respond)(lat, lon);
    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }

    state.in_flight.fetch_sub(1, Ordering::SeqCst);

    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        response.body,
    )
}
