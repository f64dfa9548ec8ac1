//! Outbound notifications for card creation.
//!
//! Delivery is best-effort: [`dispatch`] runs the send on a detached task
//! and only logs failures, so a slow or broken chat service never affects
//! the HTTP response.

pub mod slack;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::NotifyError;

pub use slack::SlackNotifier;

/// A sink for human-readable event messages.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Deliver one message.
    async fn notify(&self, text: &str) -> Result<(), NotifyError>;
}

/// Notifier that drops every message. Used when notifications are disabled.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    fn name(&self) -> &str {
        "noop"
    }

    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        debug!(text, "Notification dropped (notifier disabled)");
        Ok(())
    }
}

/// Send `text` on a detached task. Errors are logged and swallowed.
pub fn dispatch(notifier: Arc<dyn Notifier>, text: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.notify(&text).await {
            Ok(()) => debug!(notifier = notifier.name(), "Notification delivered"),
            Err(e) => warn!(notifier = notifier.name(), error = %e, "Notification failed"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Mutex;

    struct Recording(Mutex<Vec<String>>);

    #[async_trait]
    impl Notifier for Recording {
        fn name(&self) -> &str {
            "recording"
        }

        async fn notify(&self, text: &str) -> Result<(), NotifyError> {
            self.0.lock().await.push(text.to_string());
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl Notifier for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        async fn notify(&self, _text: &str) -> Result<(), NotifyError> {
            Err(NotifyError::MissingToken {
                var: "SLACK_TOKEN".into(),
            })
        }
    }

    #[tokio::test]
    async fn dispatch_delivers_in_background() {
        let recorder = Arc::new(Recording(Mutex::new(Vec::new())));
        dispatch(recorder.clone(), "hello".into()).await.unwrap();
        assert_eq!(*recorder.0.lock().await, vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn dispatch_swallows_errors() {
        // The task completes normally even though delivery failed.
        dispatch(Arc::new(Failing), "lost".into()).await.unwrap();
    }

    #[tokio::test]
    async fn noop_accepts_everything() {
        assert!(NoopNotifier.notify("anything").await.is_ok());
    }
}
