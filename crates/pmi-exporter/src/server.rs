//! The probe HTTP endpoint.
//!
//! `GET /probe?address=<url>` fetches the maintenance-info CSV from the
//! printer at `address`, classifies it, and answers with the rendered
//! exposition. Parameter problems are client errors; upstream fetch problems
//! map to 502; classification failures map to 500 with the error
//! description.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tracing::{debug, info, warn};

use pmi_classify::{SchemaRegistry, probe_reader};
use pmi_output::{EXPOSITION_CONTENT_TYPE, render};

/// Content type printers use for the maintenance-info CSV.
pub const SNAPSHOT_CONTENT_TYPE: &str = "text/comma-separated-values";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared server state: the immutable registry and the upstream client.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SchemaRegistry>,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(registry: SchemaRegistry) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            registry: Arc::new(registry),
            client,
        })
    }
}

/// A failed probe, carrying the response status to answer with.
#[derive(Debug)]
pub struct ProbeFailure {
    pub status: StatusCode,
    pub message: String,
}

impl ProbeFailure {
    fn bad_gateway(message: String) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message,
        }
    }
}

impl std::fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/probe", get(probe_handler))
        .with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn serve(listen: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen).await?;
    info!(%listen, models = state.registry.len(), "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for shutdown signal");
    }
}

async fn probe_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let address = match single_address(&params) {
        Ok(address) => address,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };
    debug!(address, "probe");
    match fetch_exposition(&state, address).await {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
            body,
        )
            .into_response(),
        Err(failure) => {
            warn!(address, status = %failure.status, error = %failure, "probe failed");
            (failure.status, failure.message).into_response()
        }
    }
}

/// Extract the single `address` query parameter.
pub fn single_address(params: &[(String, String)]) -> Result<&str, &'static str> {
    let mut values = params
        .iter()
        .filter(|(key, _)| key == "address")
        .map(|(_, value)| value.as_str());
    let Some(first) = values.next() else {
        return Err("missing 'address' query parameter");
    };
    if values.next().is_some() {
        return Err("duplicate 'address' query parameter");
    }
    Ok(first)
}

/// Fetch, classify, and render one snapshot.
pub async fn fetch_exposition(state: &AppState, address: &str) -> Result<String, ProbeFailure> {
    let url = reqwest::Url::parse(address).map_err(|error| ProbeFailure {
        status: StatusCode::BAD_REQUEST,
        message: format!("bad 'address': {error}"),
    })?;

    let response = state
        .client
        .get(url)
        .send()
        .await
        .map_err(|error| ProbeFailure::bad_gateway(format!("GET {address} failed: {error}")))?;

    let status = response.status();
    if status.as_u16() != 200 {
        return Err(ProbeFailure::bad_gateway(format!(
            "GET {address} returned {status}"
        )));
    }
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if media_type(&content_type) != SNAPSHOT_CONTENT_TYPE {
        return Err(ProbeFailure::bad_gateway(format!(
            "expected Content-Type {SNAPSHOT_CONTENT_TYPE} from {address}, got {content_type:?}"
        )));
    }

    let body = response
        .bytes()
        .await
        .map_err(|error| ProbeFailure::bad_gateway(format!("read from {address} failed: {error}")))?;

    let observations =
        probe_reader(body.as_ref(), &state.registry).map_err(|error| ProbeFailure {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("failed to classify snapshot: {error}"),
        })?;
    Ok(render(&observations))
}

/// The media type of a Content-Type value, parameters ignored.
pub fn media_type(value: &str) -> &str {
    value.split(';').next().unwrap_or("").trim()
}
