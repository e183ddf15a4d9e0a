use axum::{
    Form, Json,
    extract::{Path, State},
    response::{Html, Redirect},
};

use crate::{
    error::AppError,
    message::{QuickReplyForm, SelectForm, SendForm},
    render::{END_ANCHOR_ID, render_page},
    services::widget::ChatWidget,
    state::SharedState,
    view::Panel,
};

async fn widget(state: &SharedState, id: &str) -> Result<ChatWidget, AppError> {
    state.widgets.get(id).await.ok_or(AppError::NotFound)
}

fn back_to(id: &str) -> Redirect {
    Redirect::to(&format!("/w/{id}#{END_ANCHOR_ID}"))
}

// A fresh page load gets a fresh widget and session.
pub async fn new_widget_handler(State(state): State<SharedState>) -> Redirect {
    let (id, _) = state.widgets.create().await;
    Redirect::to(&format!("/w/{id}"))
}

pub async fn page_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let panel = widget(&state, &id).await?.panel().await;
    Ok(Html(render_page(&id, &panel, &state.faqs)))
}

pub async fn panel_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Panel>, AppError> {
    Ok(Json(widget(&state, &id).await?.panel().await))
}

pub async fn open_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    widget(&state, &id).await?.open().await;
    Ok(back_to(&id))
}

pub async fn close_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    widget(&state, &id).await?.close().await;
    Ok(back_to(&id))
}

pub async fn faq_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    widget(&state, &id).await?.show_faq_view().await;
    Ok(back_to(&id))
}

pub async fn talk_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    widget(&state, &id).await?.show_free_text_view().await;
    Ok(back_to(&id))
}

pub async fn select_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Form(form): Form<SelectForm>,
) -> Result<Redirect, AppError> {
    widget(&state, &id).await?.select_faq(&form.payload).await?;
    Ok(back_to(&id))
}

pub async fn send_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Form(form): Form<SendForm>,
) -> Result<Redirect, AppError> {
    if widget(&state, &id).await?.submit_user_text(&form.message).await.is_none() {
        tracing::debug!(widget_id = %id, "ignored empty message");
    }
    Ok(back_to(&id))
}

pub async fn quick_reply_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Form(form): Form<QuickReplyForm>,
) -> Result<Redirect, AppError> {
    widget(&state, &id)
        .await?
        .press_quick_reply(form.bubble, form.button)
        .await?;
    Ok(back_to(&id))
}
