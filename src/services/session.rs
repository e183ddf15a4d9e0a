// src/services/session.rs
use std::sync::OnceLock;

use rand::Rng;

pub const SESSION_ID_LEN: usize = 8;
const SENDER_PREFIX: &str = "user_";
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Per-page-view conversation identity.
///
/// The identifier is created on first use and never changes afterwards. One
/// context is created with each widget and handed to every outbound call.
#[derive(Debug, Default)]
pub struct SessionContext {
    id: OnceLock<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The session identifier, generating it on the first call.
    pub fn id(&self) -> &str {
        self.id.get_or_init(generate_session_id)
    }

    /// Whether an identifier has been generated yet.
    pub fn is_started(&self) -> bool {
        self.id.get().is_some()
    }

    /// Sender identity used on the wire: `user_<id>`.
    pub fn sender(&self) -> String {
        format!("{SENDER_PREFIX}{}", self.id())
    }
}

/// Eight random lowercase alphanumeric characters.
fn generate_session_id() -> String {
    let mut rng = rand::thread_rng();
    (0..SESSION_ID_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
