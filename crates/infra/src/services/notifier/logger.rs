use super::IReminderNotifier;
use agenda_domain::EventReminderNotification;
use tracing::info;

/// Used when no mail relay is configured
pub struct LogReminderNotifier {}

#[async_trait::async_trait]
impl IReminderNotifier for LogReminderNotifier {
    async fn send(&self, notification: &EventReminderNotification) -> anyhow::Result<()> {
        info!(
            to = %notification.recipient_email,
            subject = %notification.subject,
            event_id = %notification.payload.event_id,
            "Reminder mail:\n{}",
            notification.to_text()
        );
        Ok(())
    }
}
