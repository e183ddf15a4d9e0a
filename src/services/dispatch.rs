//! Background delivery of one outbound message.
//!
//! Every dispatch runs on its own task. Its completion handler is invoked
//! exactly once, with the replies or with the reason it failed, including
//! cancellation. Tasks are independent: nothing orders their completions.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{
    error::DispatchError,
    message::{OutboundMessage, ReplyItem},
    services::webhook::Webhook,
};

pub type DispatchResult = Result<Vec<ReplyItem>, DispatchError>;

#[derive(Debug)]
pub struct DispatchHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl DispatchHandle {
    /// Abandon the request. The completion handler still runs, with
    /// `DispatchError::Cancelled`, unless the reply already arrived.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait until the completion handler has returned.
    pub async fn join(self) {
        if let Err(err) = self.task.await {
            tracing::error!(error = %err, "dispatch task panicked");
        }
    }
}

/// Send `message` through `webhook` on a new task, then hand the outcome to
/// `on_complete`.
pub fn spawn<F, Fut>(webhook: Arc<dyn Webhook>, message: OutboundMessage, on_complete: F) -> DispatchHandle
where
    F: FnOnce(DispatchResult) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    let cancel = CancellationToken::new();
    let token = cancel.clone();

    let task = tokio::spawn(async move {
        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => Err(DispatchError::Cancelled),
            res = webhook.send(&message) => res.map_err(DispatchError::from),
        };
        on_complete(outcome).await;
    });

    DispatchHandle { cancel, task }
}
