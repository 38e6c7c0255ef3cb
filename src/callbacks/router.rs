use axum::Router;
use axum::extract::{DefaultBodyLimit, Request};
use axum::http::HeaderValue;
use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use tower_http::limit::RequestBodyLimitLayer;

use super::handlers::callback_handler;
use super::server::AppState;

pub(crate) fn build_router(state: AppState, max_body_size: usize) -> Router {
    let router = Router::new()
        .route("/", get(callback_handler).post(callback_handler))
        .layer(middleware::from_fn(cors_headers))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_size));

    #[cfg(feature = "tracing")]
    let router = router.layer(tower_http::trace::TraceLayer::new_for_http());

    router.with_state(state)
}

async fn cors_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("X-Requested-With"),
    );
    response
}
