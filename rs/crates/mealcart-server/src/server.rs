use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use mealcart_core::Snapshot;
use mealcart_render_html::{render_page, HtmlCanvas, PageOptions, SurfacePatch};

use crate::error::AppError;
use crate::sessions::{Lookup, Sessions, SESSION_COOKIE};

const CLIENT_JS: &str = include_str!("../assets/client.js");
const STYLES_CSS: &str = include_str!("../assets/styles.css");

// ── Shared state ────────────────────────────────────────────────────

pub struct ServerState {
    pub sessions: Sessions,
}

// ── Router ──────────────────────────────────────────────────────────

pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(homepage))
        .route("/health", get(health))
        .route("/snapshot", get(snapshot))
        .route("/actions/:name", post(action))
        .route("/settle/:seq", post(settle))
        .route("/client.js", get(client_js))
        .route("/styles.css", get(styles_css))
        .with_state(state)
}

// ── Request types ───────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ActionRequest {
    #[serde(default)]
    pub payload: serde_json::Value,
    /// Surfaces present on the caller's page; all of them when absent.
    pub mounted: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SettleRequest {
    pub mounted: Option<Vec<String>>,
}

// ── Response types ──────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ActionResponse {
    #[serde(flatten)]
    patch: SurfacePatch,
    /// Catalog request to settle with `POST /settle/{pending}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pending: Option<u64>,
}

// ── Handlers ────────────────────────────────────────────────────────

async fn health() -> &'static str {
    "ok"
}

async fn homepage(State(state): State<Arc<ServerState>>, headers: HeaderMap) -> Response {
    let session = state.sessions.resolve(session_id(&headers)).await;
    let root = session.storefront.snapshot().await.root;
    let page = render_page(&PageOptions {
        root,
        title: Some("Mealcart".into()),
        description: Some("Order from the table".into()),
        inline_css: None,
        styles: vec!["/styles.css".into()],
        scripts: vec!["/client.js".into()],
        mount_selector: None,
    });
    with_session_cookie(&session, Html(page))
}

async fn snapshot(State(state): State<Arc<ServerState>>, headers: HeaderMap) -> Response {
    let session = state.sessions.resolve(session_id(&headers)).await;
    let snap: Snapshot = session.storefront.snapshot().await;
    with_session_cookie(&session, Json(snap))
}

async fn action(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: ActionRequest = parse_body(&body)?;

    let session = state.sessions.resolve(session_id(&headers)).await;
    let mut canvas = canvas_for(req.mounted);
    let handled = session
        .storefront
        .handle(&name, &req.payload, &mut canvas)
        .await;
    tracing::debug!(
        action = %name,
        painted = handled.report.painted.len(),
        skipped = handled.report.skipped.len(),
        pending = ?handled.pending,
        "action handled"
    );

    let resp = ActionResponse {
        patch: canvas.into_patch(),
        pending: handled.pending,
    };
    Ok(with_session_cookie(&session, Json(resp)))
}

async fn settle(
    State(state): State<Arc<ServerState>>,
    Path(seq): Path<u64>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: SettleRequest = parse_body(&body)?;

    let session = state.sessions.resolve(session_id(&headers)).await;
    let mut canvas = canvas_for(req.mounted);
    let report = session.storefront.settle(seq, &mut canvas).await;
    tracing::debug!(seq, painted = report.painted.len(), "request settled");

    let patch: SurfacePatch = canvas.into_patch();
    Ok(with_session_cookie(&session, Json(patch)))
}

fn parse_body<T: Default + serde::de::DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    if body.is_empty() {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(body)?)
}

fn canvas_for(mounted: Option<Vec<String>>) -> HtmlCanvas {
    match mounted {
        Some(mounted) => HtmlCanvas::with_mounted(mounted),
        None => HtmlCanvas::new(),
    }
}

async fn client_js() -> impl IntoResponse {
    (
        [
            (CONTENT_TYPE, "application/javascript"),
            (CACHE_CONTROL, "no-cache"),
        ],
        CLIENT_JS,
    )
}

async fn styles_css() -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/css"), (CACHE_CONTROL, "no-cache")],
        STYLES_CSS,
    )
}

// ── Cookies ─────────────────────────────────────────────────────────

fn session_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}

fn with_session_cookie(session: &Lookup, body: impl IntoResponse) -> Response {
    let mut resp = body.into_response();
    if session.created {
        let cookie = format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", session.id);
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            resp.headers_mut().append(SET_COOKIE, value);
        }
    }
    resp
}
