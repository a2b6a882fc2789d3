use crate::dashboard::PageView;
use crate::errors::AppError;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ViewportRequest {
    pub width: u32,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let view = state.dashboard.view().await;
    Html(render_index(&view))
}

pub async fn chart_svg(State(state): State<AppState>) -> impl IntoResponse {
    let view = state.dashboard.view().await;
    ([(header::CONTENT_TYPE, "image/svg+xml")], view.chart)
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<PageView> {
    Json(state.dashboard.view().await)
}

pub async fn set_viewport(
    State(state): State<AppState>,
    Json(payload): Json<ViewportRequest>,
) -> Result<StatusCode, AppError> {
    if payload.width == 0 {
        return Err(AppError::bad_request("width must be positive"));
    }

    state.dashboard.resize(payload.width).await;
    Ok(StatusCode::ACCEPTED)
}
