// src/state.rs
use std::sync::Arc;
use std::time::Duration;

use crate::services::faq::FaqCatalog;
use crate::services::registry::WidgetRegistry;
use crate::services::webhook::Webhook;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub widgets: WidgetRegistry,
    pub faqs: Arc<FaqCatalog>,
}

impl AppState {
    pub fn new(faqs: FaqCatalog, webhook: Arc<dyn Webhook>, widget_ttl: Duration) -> Self {
        let faqs = Arc::new(faqs);
        Self {
            widgets: WidgetRegistry::new(Arc::clone(&faqs), webhook, widget_ttl),
            faqs,
        }
    }
}
