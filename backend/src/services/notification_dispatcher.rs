//! Service for dispatching confirmation emails.
//!
//! Sends are either awaited by the caller or detached onto the runtime. A
//! detached send reports its outcome only through logs.

use crate::auth::traits::ConfirmationNotifier;
use crate::errors::ServiceResult;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Dispatches confirmation codes through a [`ConfirmationNotifier`].
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn ConfirmationNotifier>,
}

impl NotificationDispatcher {
    /// Creates a new NotificationDispatcher instance.
    pub fn new(notifier: Arc<dyn ConfirmationNotifier>) -> Self {
        Self { notifier }
    }

    /// Sends and waits for delivery.
    pub async fn send(&self, email: &str, code: &str) -> ServiceResult<()> {
        self.notifier.send_confirmation(email, code).await?;
        info!("Confirmation email sent to {}", email);
        Ok(())
    }

    /// Spawns the send as an independent task. There is no retry.
    ///
    /// The returned handle may be dropped; dropping it does not cancel the send.
    pub fn dispatch_detached(&self, email: String, code: String) -> JoinHandle<()> {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            match notifier.send_confirmation(&email, &code).await {
                Ok(()) => info!("Confirmation email sent to {}", email),
                Err(e) => error!("Failed to send confirmation email to {}: {}", email, e),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ServiceError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        fail: bool,
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ConfirmationNotifier for RecordingNotifier {
        async fn send_confirmation(&self, email: &str, code: &str) -> ServiceResult<()> {
            self.sent
                .lock()
                .unwrap()
                .push((email.to_string(), code.to_string()));
            if self.fail {
                return Err(ServiceError::external_service("smtp down"));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_send_propagates_failure() {
        let notifier = Arc::new(RecordingNotifier {
            fail: true,
            ..Default::default()
        });
        let dispatcher = NotificationDispatcher::new(notifier.clone());

        assert!(dispatcher.send("a@x.com", "abc").await.is_err());
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_detached_failure_is_swallowed() {
        let notifier = Arc::new(RecordingNotifier {
            fail: true,
            ..Default::default()
        });
        let dispatcher = NotificationDispatcher::new(notifier.clone());

        dispatcher
            .dispatch_detached("a@x.com".to_string(), "abc".to_string())
            .await
            .unwrap();

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.as_slice(), &[("a@x.com".to_string(), "abc".to_string())]);
    }
}
