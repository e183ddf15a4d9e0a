// src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures talking to the conversational webhook.
#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("malformed webhook reply: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Outcome delivered to a dispatch completion handler on failure.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Webhook(#[from] WebhookError),

    #[error("dispatch cancelled")]
    Cancelled,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    #[error("no FAQ entry with payload {0:?}")]
    UnknownFaq(String),

    #[error("no quick reply at bubble {bubble}, button {button}")]
    UnknownQuickReply { bubble: usize, button: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Error type returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("widget not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),
}

impl From<WidgetError> for AppError {
    fn from(err: WidgetError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}
