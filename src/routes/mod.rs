// src/routes/mod.rs
pub mod widget;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use widget::{
    close_handler, faq_handler, new_widget_handler, open_handler, page_handler, panel_handler,
    quick_reply_handler, select_handler, send_handler, talk_handler,
};

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/", get(new_widget_handler))
        .route("/w/{id}", get(page_handler))
        .route("/w/{id}/panel.json", get(panel_handler))
        .route("/w/{id}/open", post(open_handler))
        .route("/w/{id}/close", post(close_handler))
        .route("/w/{id}/faq", post(faq_handler))
        .route("/w/{id}/talk", post(talk_handler))
        .route("/w/{id}/select", post(select_handler))
        .route("/w/{id}/send", post(send_handler))
        .route("/w/{id}/reply", post(quick_reply_handler))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
}
