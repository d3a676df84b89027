//! Notification dispatch seam.

use stockroom_core::DomainResult;

use crate::request::NotificationRequest;

/// Sends notifications.
///
/// Implementations validate the request, then fire-and-forget: a returned
/// `Ok` means the send was handed to the channel, not that it arrived.
pub trait Notifier: Send + Sync {
    fn send(&self, request: &NotificationRequest) -> DomainResult<()>;
}

/// Simulated notifier: validates and logs the send.
///
/// Stands in for the email/SMS gateway during development and tests.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for LogNotifier {
    fn send(&self, request: &NotificationRequest) -> DomainResult<()> {
        request.validate()?;

        tracing::info!(
            recipients = %request.recipients,
            subject = %request.subject,
            method = request.method.describe(),
            "notification sent"
        );
        Ok(())
    }
}
