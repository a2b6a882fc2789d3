use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("unexpected response from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("chart renderer unavailable")]
    RenderUnavailable,
}

impl ClientError {
    pub fn transport(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    pub fn parse(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
