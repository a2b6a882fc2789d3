use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::Request,
    http::Method,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/index.html", get(handlers::index))
        .route("/chart.svg", get(handlers::chart_svg))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/viewport", post(handlers::set_viewport))
        .layer(middleware::from_fn(log_pageview))
        .with_state(state)
}

pub(crate) fn is_pageview(method: &Method, path: &str) -> bool {
    method == Method::GET && (path == "/" || path == "/index.html")
}

async fn log_pageview(req: Request, next: Next) -> Response {
    if is_pageview(req.method(), req.uri().path()) {
        info!(path = %req.uri().path(), "pageview");
    }
    next.run(req).await
}
