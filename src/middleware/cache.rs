//! Response Cache Middleware
//!
//! Read-through cache for JSON GET responses, keyed by the request path and
//! query string.
//!
//! On a hit the stored body is returned and the handler never runs. On a
//! miss the handler runs as usual and its JSON body is copied into the cache
//! by a detached task, so the response never waits on the store.

use axum::{
    body::Body,
    extract::{OriginalUri, Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::de::IgnoredAny;
use tracing::{debug, error, info, warn};

use crate::cache::{cache_key, ResponseCache};
use crate::error::ApiError;

// == Constants ==
/// Default lifetime of a cached response in seconds
pub const DEFAULT_EXPIRATION_SECS: u64 = 300;

// == Cache Layer ==
/// Per-route-group cache configuration handed to [`cache_response`].
#[derive(Clone)]
pub struct CacheLayer {
    /// Shared cache access layer
    pub cache: ResponseCache,
    /// Lifetime of every entry this layer writes
    pub expiration_secs: u64,
}

impl CacheLayer {
    /// Creates a layer with the default five minute expiration.
    pub fn new(cache: ResponseCache) -> Self {
        Self {
            cache,
            expiration_secs: DEFAULT_EXPIRATION_SECS,
        }
    }

    /// Overrides the expiration applied to new entries.
    pub fn with_expiration(mut self, expiration_secs: u64) -> Self {
        self.expiration_secs = expiration_secs;
        self
    }
}

// == Middleware ==
/// Serves GET requests from the cache and populates it on a miss.
///
/// Non-GET requests pass straight through. Cache failures of any kind are
/// logged and the request is handled as a miss.
///
/// # Usage
/// ```ignore
/// Router::new()
///     .route("/", get(list_products))
///     .route_layer(middleware::from_fn_with_state(layer, cache_response))
/// ```
pub async fn cache_response(
    State(layer): State<CacheLayer>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let key = cache_key(&original_path_and_query(&request));

    if let Some(cached) = layer.cache.get(&key).await {
        match serde_json::from_str::<IgnoredAny>(&cached) {
            Ok(_) => {
                info!("Cache HIT: {}", key);
                return json_response(cached);
            }
            Err(err) => warn!(key = %key, error = %err, "Discarding cached value that is not JSON"),
        }
    }

    info!("Cache MISS: {}", key);

    let response = next.run(request).await;
    capture(layer, key, response).await
}

/// Path and query as the client sent them, before any router nesting.
fn original_path_and_query(request: &Request) -> String {
    let uri = request
        .extensions()
        .get::<OriginalUri>()
        .map(|original| &original.0)
        .unwrap_or_else(|| request.uri());

    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

/// Copies a successful JSON response into the cache without delaying it.
async fn capture(layer: CacheLayer, key: String, response: Response) -> Response {
    if !response.status().is_success() || !is_json(&response) {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            // The handler's own body stream broke; nothing is cached
            error!(key = %key, error = %err, "Failed to read response body for caching");
            return ApiError::Internal("response body could not be read".to_string())
                .into_response();
        }
    };

    match std::str::from_utf8(&bytes) {
        Ok(text) => {
            let value = text.to_string();
            let cache = layer.cache;
            let ttl = layer.expiration_secs;
            // Detached: the response goes out whether or not this finishes
            tokio::spawn(async move {
                cache.set(&key, &value, Some(ttl)).await;
                debug!(key = %key, "Cached response");
            });
        }
        Err(err) => warn!(key = %key, error = %err, "Response body is not UTF-8, not caching"),
    }

    Response::from_parts(parts, Body::from(bytes))
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

/// Replays a stored body as a 200 JSON response.
fn json_response(body: String) -> Response {
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        body,
    )
        .into_response()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::{CountingStore, FailingStore};
    use crate::store::KvStore;
    use axum::{
        body::Bytes,
        http::StatusCode,
        middleware,
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use tower::ServiceExt;

    #[derive(Clone, Default)]
    struct Hits(Arc<AtomicUsize>);

    impl Hits {
        fn count(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn app(store: Arc<dyn KvStore>, expiration_secs: u64, hits: Hits) -> Router {
        let layer = CacheLayer::new(ResponseCache::new(store)).with_expiration(expiration_secs);

        let books = {
            let hits = hits.clone();
            move || {
                let hits = hits.clone();
                async move {
                    hits.0.fetch_add(1, Ordering::SeqCst);
                    Json(json!([{ "title": "Dune" }]))
                }
            }
        };
        let created = {
            let hits = hits.clone();
            move || {
                let hits = hits.clone();
                async move {
                    hits.0.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::CREATED, Json(json!({ "created": true })))
                }
            }
        };
        let missing = {
            let hits = hits.clone();
            move || {
                let hits = hits.clone();
                async move {
                    hits.0.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::NOT_FOUND, Json(json!({ "error": "Product not found" })))
                }
            }
        };
        let broken = {
            let hits = hits.clone();
            move || {
                let hits = hits.clone();
                async move {
                    hits.0.fetch_add(1, Ordering::SeqCst);
                    let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
                        Ok(Bytes::from_static(b"[{")),
                        Err(std::io::Error::other("upstream reset")),
                    ];
                    Response::builder()
                        .header(header::CONTENT_TYPE, "application/json")
                        .body(Body::from_stream(futures::stream::iter(chunks)))
                        .unwrap()
                }
            }
        };
        let plain = {
            let hits = hits.clone();
            move || {
                let hits = hits.clone();
                async move {
                    hits.0.fetch_add(1, Ordering::SeqCst);
                    "ok"
                }
            }
        };

        Router::new()
            .route("/api/products", get(books).post(created))
            .route("/api/products/missing", get(missing))
            .route("/api/products/broken", get(broken))
            .route("/plain", get(plain))
            .route_layer(middleware::from_fn_with_state(layer, cache_response))
    }

    fn get_request(uri: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Lets the detached cache write finish.
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let store = Arc::new(CountingStore::new());
        let hits = Hits::default();
        let app = app(store.clone(), 60, hits.clone());

        let first = app
            .clone()
            .oneshot(get_request("/api/products?category=fiction"))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let first_body = body_text(first).await;
        settle().await;

        assert_eq!(
            store
                .inner
                .get("cache:/api/products?category=fiction")
                .await
                .unwrap()
                .as_deref(),
            Some(first_body.as_str())
        );

        let second = app
            .oneshot(get_request("/api/products?category=fiction"))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(
            second.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(body_text(second).await, first_body);
        assert_eq!(hits.count(), 1, "handler must not run on a hit");
    }

    #[tokio::test]
    async fn test_hit_on_falsy_json_value() {
        let store = Arc::new(CountingStore::new());
        store.inner.set("cache:/api/products", "[]").await.unwrap();
        let hits = Hits::default();

        let response = app(store, 60, hits.clone())
            .oneshot(get_request("/api/products"))
            .await
            .unwrap();

        assert_eq!(body_text(response).await, "[]");
        assert_eq!(hits.count(), 0);
    }

    #[tokio::test]
    async fn test_query_strings_are_separate_entries() {
        let store = Arc::new(CountingStore::new());
        let hits = Hits::default();
        let app = app(store.clone(), 60, hits.clone());

        app.clone()
            .oneshot(get_request("/api/products?a=1&b=2"))
            .await
            .unwrap();
        settle().await;
        app.oneshot(get_request("/api/products?b=2&a=1"))
            .await
            .unwrap();
        settle().await;

        assert_eq!(hits.count(), 2);
        assert_eq!(store.inner.len().await, 2);
    }

    #[tokio::test]
    async fn test_non_get_is_untouched() {
        let store = Arc::new(CountingStore::new());
        let hits = Hits::default();

        let response = app(store.clone(), 60, hits.clone())
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/api/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        settle().await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(store.calls.gets(), 0);
        assert_eq!(store.calls.writes(), 0);
        assert_eq!(hits.count(), 1);
    }

    #[tokio::test]
    async fn test_error_responses_not_cached() {
        let store = Arc::new(CountingStore::new());
        let hits = Hits::default();
        let app = app(store.clone(), 60, hits.clone());

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(get_request("/api/products/missing"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            settle().await;
        }

        assert_eq!(store.calls.writes(), 0);
        assert_eq!(hits.count(), 2);
    }

    #[tokio::test]
    async fn test_non_json_response_not_cached() {
        let store = Arc::new(CountingStore::new());
        let hits = Hits::default();

        let response = app(store.clone(), 60, hits)
            .oneshot(get_request("/plain"))
            .await
            .unwrap();
        settle().await;

        assert_eq!(body_text(response).await, "ok");
        assert_eq!(store.calls.gets(), 1);
        assert_eq!(store.calls.writes(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_body_yields_json_error_and_no_entry() {
        let store = Arc::new(CountingStore::new());
        let hits = Hits::default();

        let response = app(store.clone(), 60, hits.clone())
            .oneshot(get_request("/api/products/broken"))
            .await
            .unwrap();
        settle().await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert!(body["error"].as_str().unwrap().contains("response body"));
        assert_eq!(hits.count(), 1);
        assert_eq!(store.calls.writes(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_entry_treated_as_miss() {
        let store = Arc::new(CountingStore::new());
        store
            .inner
            .set("cache:/api/products", "{not json")
            .await
            .unwrap();
        let hits = Hits::default();

        let response = app(store.clone(), 60, hits.clone())
            .oneshot(get_request("/api/products"))
            .await
            .unwrap();
        settle().await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body, json!([{ "title": "Dune" }]));
        assert_eq!(hits.count(), 1);
        // Fresh result replaces the corrupt entry
        let stored = store.inner.get("cache:/api/products").await.unwrap().unwrap();
        assert!(serde_json::from_str::<Value>(&stored).is_ok());
    }

    #[tokio::test]
    async fn test_store_down_fails_open() {
        let hits = Hits::default();
        let app = app(Arc::new(FailingStore), 60, hits.clone());

        for _ in 0..3 {
            let response = app
                .clone()
                .oneshot(get_request("/api/products"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
            assert_eq!(body, json!([{ "title": "Dune" }]));
        }

        assert_eq!(hits.count(), 3);
    }

    #[tokio::test]
    async fn test_slow_store_does_not_delay_response() {
        let store = Arc::new(CountingStore::with_write_delay(Duration::from_secs(2)));
        let hits = Hits::default();

        let started = Instant::now();
        let response = app(store.clone(), 60, hits)
            .oneshot(get_request("/api/products"))
            .await
            .unwrap();
        let body = body_text(response).await;

        assert!(started.elapsed() < Duration::from_millis(500));
        assert!(body.contains("Dune"));
        assert!(store.inner.is_empty().await, "write still in flight");
    }

    #[tokio::test]
    async fn test_entry_expires() {
        let store = Arc::new(CountingStore::new());
        let hits = Hits::default();
        let app = app(store, 1, hits.clone());

        app.clone().oneshot(get_request("/api/products")).await.unwrap();
        settle().await;
        app.clone().oneshot(get_request("/api/products")).await.unwrap();
        assert_eq!(hits.count(), 1);

        tokio::time::sleep(Duration::from_millis(1100)).await;

        app.oneshot(get_request("/api/products")).await.unwrap();
        assert_eq!(hits.count(), 2);
    }

    #[test]
    fn test_cache_layer_defaults() {
        let layer = CacheLayer::new(ResponseCache::new(Arc::new(FailingStore)));
        assert_eq!(layer.expiration_secs, 300);
        assert_eq!(layer.with_expiration(2).expiration_secs, 2);
    }
}
