#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use async_trait::async_trait;
use billmart_widget::{
    error::WebhookError,
    message::{OutboundMessage, ReplyButton, ReplyItem},
    services::webhook::Webhook,
};
use tokio::sync::{Mutex, Notify};

/// In-memory webhook: records what it was sent and answers from a script.
///
/// Replies scripted for a specific message win over the shared queue. A
/// message with a gate waits for `notify_one` on it before answering.
#[derive(Default)]
pub struct FakeWebhook {
    pub sent: Mutex<Vec<OutboundMessage>>,
    replies: Mutex<VecDeque<Result<Vec<ReplyItem>, WebhookError>>>,
    per_message: Mutex<HashMap<String, Vec<ReplyItem>>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl FakeWebhook {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn script(&self, reply: Vec<ReplyItem>) {
        self.replies.lock().await.push_back(Ok(reply));
    }

    pub async fn script_err(&self, err: WebhookError) {
        self.replies.lock().await.push_back(Err(err));
    }

    pub async fn script_for(&self, message: &str, reply: Vec<ReplyItem>) {
        self.per_message.lock().await.insert(message.to_string(), reply);
    }

    /// Hold back the answer to `message` until the returned gate is notified.
    pub async fn gate(&self, message: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().await.insert(message.to_string(), Arc::clone(&gate));
        gate
    }

    pub async fn messages(&self) -> Vec<String> {
        self.sent.lock().await.iter().map(|m| m.message.clone()).collect()
    }
}

#[async_trait]
impl Webhook for FakeWebhook {
    async fn send(&self, message: &OutboundMessage) -> Result<Vec<ReplyItem>, WebhookError> {
        self.sent.lock().await.push(message.clone());

        let gate = self.gates.lock().await.get(&message.message).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if let Some(reply) = self.per_message.lock().await.remove(&message.message) {
            return Ok(reply);
        }
        self.replies.lock().await.pop_front().unwrap_or(Ok(Vec::new()))
    }
}

pub fn text(t: &str) -> ReplyItem {
    ReplyItem { text: Some(t.to_string()), buttons: None }
}

pub fn with_buttons(t: &str, buttons: &[(&str, &str)]) -> ReplyItem {
    ReplyItem {
        text: Some(t.to_string()),
        buttons: Some(
            buttons
                .iter()
                .map(|(title, payload)| ReplyButton { title: title.to_string(), payload: payload.to_string() })
                .collect(),
        ),
    }
}
