// src/services/widget.rs
use std::{fmt::Debug, sync::Arc};

use tokio::sync::RwLock;

use crate::{
    error::{DispatchError, WidgetError},
    message::{OutboundMessage, ReplyButton, ReplyItem},
    services::{
        dispatch::{self, DispatchHandle},
        faq::FaqCatalog,
        session::SessionContext,
        webhook::Webhook,
    },
    view::{Block, Panel, Side, ViewMode},
};

/// Controller for one page view's chat widget.
///
/// Cloning is cheap and every clone drives the same panel.
#[derive(Clone)]
pub struct ChatWidget {
    panel: Arc<RwLock<Panel>>,
    session: Arc<SessionContext>,
    faqs: Arc<FaqCatalog>,
    webhook: Arc<dyn Webhook>,
}

impl Debug for ChatWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatWidget")
            .field("session", &self.session)
            .field("faqs", &self.faqs.len())
            .finish()
    }
}

impl ChatWidget {
    pub fn new(faqs: Arc<FaqCatalog>, webhook: Arc<dyn Webhook>) -> Self {
        Self {
            panel: Arc::new(RwLock::new(Panel::default())),
            session: Arc::new(SessionContext::new()),
            faqs,
            webhook,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn faqs(&self) -> &FaqCatalog {
        &self.faqs
    }

    /// Snapshot of the current view model.
    pub async fn panel(&self) -> Panel {
        self.panel.read().await.clone()
    }

    // Show the panel, always starting from the FAQ menu.
    pub async fn open(&self) {
        let mut panel = self.panel.write().await;
        panel.visible = true;
        faq_view(&mut panel);
    }

    // Hide the panel. Rendered content stays.
    pub async fn close(&self) {
        self.panel.write().await.visible = false;
    }

    pub async fn show_faq_view(&self) {
        faq_view(&mut *self.panel.write().await);
    }

    pub async fn show_free_text_view(&self) {
        let mut panel = self.panel.write().await;
        panel.content.clear();
        panel.mode = ViewMode::FreeText;
        panel.input_visible = true;
    }

    /// Echo an FAQ's title as the user's message and send its payload.
    pub async fn select_faq(&self, payload: &str) -> Result<DispatchHandle, WidgetError> {
        let Some(entry) = self.faqs.find(payload) else {
            tracing::warn!(payload, "selected payload is not in the FAQ catalog");
            return Err(WidgetError::UnknownFaq(payload.to_string()));
        };
        let (title, payload) = (entry.title.clone(), entry.payload.clone());

        self.render_user_message(title).await;
        Ok(self.dispatch(payload).await)
    }

    /// Activate a quick reply attached to a bot bubble.
    ///
    /// The button carries its own title, so payloads outside the FAQ catalog
    /// work too.
    pub async fn press_quick_reply(
        &self,
        block: usize,
        button: usize,
    ) -> Result<DispatchHandle, WidgetError> {
        let ReplyButton { title, payload } = self
            .panel
            .read()
            .await
            .quick_reply(block, button)
            .cloned()
            .ok_or(WidgetError::UnknownQuickReply { bubble: block, button })?;

        self.render_user_message(title).await;
        Ok(self.dispatch(payload).await)
    }

    /// Send free text typed by the user. Whitespace-only input does nothing.
    pub async fn submit_user_text(&self, text: &str) -> Option<DispatchHandle> {
        // U+FEFF counts as blank too, matching browser input trimming
        let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
        if text.is_empty() {
            return None;
        }
        self.render_user_message(text.to_string()).await;
        Some(self.dispatch(text.to_string()).await)
    }

    pub async fn render_user_message(&self, text: String) {
        self.panel.write().await.push_bubble(Side::User, text, Vec::new());
    }

    pub async fn render_bot_message(&self, text: Option<String>, buttons: Vec<ReplyButton>) {
        bot_message(&mut *self.panel.write().await, text, buttons);
    }

    /// Forward `message` to the webhook on a background task. Replies are
    /// appended as bot bubbles in the order the webhook returned them.
    pub async fn dispatch(&self, message: String) -> DispatchHandle {
        let outbound = OutboundMessage { sender: self.session.sender(), message };
        tracing::info!(sender = %outbound.sender, text = %outbound.message, "dispatching message");

        let panel = Arc::clone(&self.panel);
        panel.write().await.pending += 1;

        dispatch::spawn(Arc::clone(&self.webhook), outbound, move |outcome| async move {
            let mut panel = panel.write().await;
            panel.pending = panel.pending.saturating_sub(1);
            match outcome {
                Ok(replies) => append_replies(&mut panel, replies),
                Err(DispatchError::Cancelled) => tracing::debug!("dispatch cancelled"),
                Err(err) => tracing::warn!(error = %err, "webhook delivery failed"),
            }
        })
    }
}

fn faq_view(panel: &mut Panel) {
    panel.content = vec![Block::FaqMenu];
    panel.mode = ViewMode::Faq;
    panel.input_visible = false;
}

fn bot_message(panel: &mut Panel, text: Option<String>, buttons: Vec<ReplyButton>) {
    panel.push_bubble(Side::Bot, text.unwrap_or_default(), buttons);
}

// All items of one reply land together, in array order.
fn append_replies(panel: &mut Panel, replies: Vec<ReplyItem>) {
    for item in replies {
        bot_message(panel, item.text, item.buttons.unwrap_or_default());
    }
}
