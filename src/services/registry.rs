// src/services/registry.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::services::{faq::FaqCatalog, webhook::Webhook, widget::ChatWidget};

#[derive(Clone, Debug)]
struct Entry {
    widget: ChatWidget,
    last_active: Instant,
}

/// One chat widget per page view, dropped after `ttl` of inactivity.
#[derive(Clone)]
pub struct WidgetRegistry {
    inner: Arc<RwLock<HashMap<String, Entry>>>,
    faqs: Arc<FaqCatalog>,
    webhook: Arc<dyn Webhook>,
    ttl: Duration,
}

impl Debug for WidgetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetRegistry")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl WidgetRegistry {
    pub fn new(faqs: Arc<FaqCatalog>, webhook: Arc<dyn Webhook>, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            faqs,
            webhook,
            ttl,
        }
    }

    // Create a widget for a new page view and return its id.
    pub async fn create(&self) -> (String, ChatWidget) {
        let id = Uuid::new_v4().to_string();
        let widget = ChatWidget::new(Arc::clone(&self.faqs), Arc::clone(&self.webhook));

        let entry = Entry { widget: widget.clone(), last_active: Instant::now() };
        self.inner.write().await.insert(id.clone(), entry);
        tracing::debug!(widget_id = %id, "widget created");
        (id, widget)
    }

    /// Look up a widget and mark it active.
    pub async fn get(&self, id: &str) -> Option<ChatWidget> {
        let mut guard = self.inner.write().await;
        let entry = guard.get_mut(id)?;
        entry.last_active = Instant::now();
        Some(entry.widget.clone())
    }

    pub async fn remove(&self, id: &str) -> bool {
        self.inner.write().await.remove(id).is_some()
    }

    /// Remove widgets idle longer than ttl. Returns number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, e| now.duration_since(e.last_active) < self.ttl);
        before - guard.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Purge expired widgets every `every` until the runtime shuts down.
    pub fn spawn_reaper(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let removed = registry.purge_expired().await;
                if removed > 0 {
                    tracing::info!(removed, "purged idle widgets");
                }
            }
        })
    }
}
