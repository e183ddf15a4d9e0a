use serde::Serialize;

/// A predefined question shown in the FAQ menu. The payload is forwarded to
/// the webhook verbatim instead of free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqEntry {
    pub title: String,
    pub payload: String,
}

impl FaqEntry {
    pub fn new(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Self { title: title.into(), payload: payload.into() }
    }
}

/// Fixed, ordered FAQ list. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqCatalog {
    entries: Vec<FaqEntry>,
}

impl Default for FaqCatalog {
    fn default() -> Self {
        Self::new(vec![
            FaqEntry::new("What is GigCash?", "/ask_gigcash_info"),
            FaqEntry::new("How to apply for EmpCash?", "/ask_empcash_info"),
            FaqEntry::new("What documents are needed?", "/ask_documents"),
        ])
    }
}

impl FaqCatalog {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    /// First entry whose payload matches exactly.
    pub fn find(&self, payload: &str) -> Option<&FaqEntry> {
        self.entries.iter().find(|e| e.payload == payload)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
