// src/message.rs
use serde::{Deserialize, Serialize};

/// Body POSTed to the conversational webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub sender: String,
    pub message: String,
}

/// One element of the webhook's reply array. Extra fields the backend may
/// send (`recipient_id`, `image`, `custom`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<ReplyButton>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyButton {
    pub title: String,
    pub payload: String,
}

// Form bodies posted by the rendered widget.

#[derive(Debug, Deserialize)]
pub struct SelectForm {
    pub payload: String,
}

#[derive(Debug, Deserialize)]
pub struct SendForm {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct QuickReplyForm {
    pub bubble: usize,
    pub button: usize,
}
