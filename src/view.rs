// src/view.rs
use serde::Serialize;

use crate::message::ReplyButton;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Faq,
    FreeText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    User,
    Bot,
}

/// A chat bubble. Text is kept raw; escaping is the renderer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bubble {
    pub side: Side,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<ReplyButton>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// The static FAQ list followed by the "talk with chatbot" control.
    FaqMenu,
    Bubble(Bubble),
}

/// Everything the view layer needs to draw the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub visible: bool,
    pub mode: ViewMode,
    pub content: Vec<Block>,
    pub input_visible: bool,
    /// Dispatches sent but not yet completed.
    pub pending: usize,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            visible: false,
            mode: ViewMode::Faq,
            content: Vec::new(),
            input_visible: false,
            pending: 0,
        }
    }
}

impl Panel {
    pub fn push_bubble(&mut self, side: Side, text: String, buttons: Vec<ReplyButton>) {
        self.content.push(Block::Bubble(Bubble { side, text, buttons }));
    }

    pub fn bubbles(&self) -> impl Iterator<Item = &Bubble> {
        self.content.iter().filter_map(|b| match b {
            Block::Bubble(bubble) => Some(bubble),
            Block::FaqMenu => None,
        })
    }

    /// Quick reply `button` of the bot bubble at content index `block`.
    pub fn quick_reply(&self, block: usize, button: usize) -> Option<&ReplyButton> {
        match self.content.get(block)? {
            Block::Bubble(Bubble { side: Side::Bot, buttons, .. }) => buttons.get(button),
            _ => None,
        }
    }
}
