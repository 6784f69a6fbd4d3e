//! HTTP request handlers

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use super::cache::BpmCache;
use super::models::{BpmResponse, BPM_HEADER, MAX_DRAINED_BODY, POST_ACK};
use crate::store::{parse_bpm, BpmFile};

/// Shared state for the HTTP server
#[derive(Clone)]
pub struct AppState {
    cache: BpmCache,
    store: BpmFile,
}

impl AppState {
    pub fn new(cache: BpmCache, store: BpmFile) -> Self {
        Self { cache, store }
    }
}

/// Every path is served by the same method-dispatching handler.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", any(handle_request))
        .fallback(handle_request)
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}

pub async fn handle_request(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Response {
    match method {
        Method::GET => get_bpm(&state).await,
        Method::POST => post_bpm(&state, &headers, body).await,
        other => {
            tracing::debug!("rejecting {} request", other);
            (StatusCode::METHOD_NOT_ALLOWED, "method not allowed").into_response()
        }
    }
}

/// Re-read the file and answer with the freshest value we have.
///
/// File problems are never reported to the client: the last known value is
/// served instead.
async fn get_bpm(state: &AppState) -> Response {
    let mut last_known = state.cache.lock().await;

    match state.store.read().await {
        Ok(bpm) => *last_known = bpm,
        Err(e) if e.is_file_access() => {
            tracing::warn!("{}, serving last known value {}", e, *last_known);
        }
        Err(e) => {
            tracing::error!("{}, serving last known value {}", e, *last_known);
        }
    }

    BpmResponse { bpm: *last_known }.into_response()
}

async fn post_bpm(state: &AppState, headers: &HeaderMap, body: Body) -> Response {
    // body is not used, only drained, and never while the cache is locked
    if let Err(e) = axum::body::to_bytes(body, MAX_DRAINED_BODY).await {
        tracing::warn!("failed to read request body: {}", e);
    }

    let mut last_known = state.cache.lock().await;

    match headers.get(BPM_HEADER) {
        Some(value) => match value.to_str().ok().and_then(parse_bpm) {
            Some(bpm) => {
                *last_known = bpm;
                tracing::info!("Received new heart rate: {}", bpm);

                if let Err(e) = state.store.write(bpm).await {
                    tracing::error!("{}", e);
                }
            }
            None => tracing::debug!("ignoring malformed bpm header: {:?}", value),
        },
        None => tracing::debug!("POST without bpm header"),
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain")],
        POST_ACK,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_app(dir: &tempfile::TempDir, cache: BpmCache) -> (Router, std::path::PathBuf) {
        let path = dir.path().join("heartrate.txt");
        let app = router(AppState::new(cache, BpmFile::new(&path)));
        (app, path)
    }

    async fn body_string(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_get_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = BpmCache::new(0);
        let (app, path) = test_app(&dir, cache.clone());
        std::fs::write(&path, "67\n").unwrap();

        let resp = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = body_string(resp).await;
        assert_eq!(body, "{\"bpm\": 67}");
        let parsed: BpmResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.bpm, 67);
        assert_eq!(cache.get().await, 67);
    }

    #[tokio::test]
    async fn test_get_falls_back_to_cache() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _path) = test_app(&dir, BpmCache::new(42));

        let resp = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let parsed: BpmResponse = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(parsed.bpm, 42);
    }

    #[tokio::test]
    async fn test_post_updates_cache_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = BpmCache::new(0);
        let (app, path) = test_app(&dir, cache.clone());

        let resp = app
            .oneshot(
                Request::post("/")
                    .header("bpm", "88")
                    .body(Body::from("ignored payload"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "text/plain");
        assert_eq!(body_string(resp).await, POST_ACK);
        assert_eq!(cache.get().await, 88);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "88");
    }

    #[tokio::test]
    async fn test_post_malformed_header_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let cache = BpmCache::new(70);
        let (app, path) = test_app(&dir, cache.clone());

        let resp = app
            .oneshot(Request::post("/").header("bpm", "abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(cache.get().await, 70);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_post_signed_header_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let cache = BpmCache::new(70);
        let (app, path) = test_app(&dir, cache.clone());

        for value in ["+5", "-5"] {
            let resp = app
                .clone()
                .oneshot(Request::post("/").header("bpm", value).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
        }

        assert_eq!(cache.get().await, 70);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_post_oversized_body_still_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let cache = BpmCache::new(0);
        let (app, path) = test_app(&dir, cache.clone());
        let payload = vec![b'x'; MAX_DRAINED_BODY * 4];

        let resp = app
            .oneshot(
                Request::post("/")
                    .header("bpm", "101")
                    .body(Body::from(payload))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, POST_ACK);
        assert_eq!(cache.get().await, 101);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "101");
    }

    #[tokio::test]
    async fn test_post_persistence_failure_still_ok() {
        let dir = tempfile::tempdir().unwrap();
        let cache = BpmCache::new(0);
        let path = dir.path().join("missing-dir").join("heartrate.txt");
        let app = router(AppState::new(cache.clone(), BpmFile::new(&path)));

        let resp = app
            .oneshot(Request::post("/").header("bpm", "99").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(cache.get().await, 99);
    }

    #[tokio::test]
    async fn test_other_methods_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _path) = test_app(&dir, BpmCache::default());

        for method in [Method::PUT, Method::DELETE, Method::PATCH] {
            let resp = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri("/")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        }
    }

    #[tokio::test]
    async fn test_any_path_is_served() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _path) = test_app(&dir, BpmCache::new(55));

        let resp = app
            .oneshot(Request::get("/heartrate").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let parsed: BpmResponse = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(parsed.bpm, 55);
    }
}
