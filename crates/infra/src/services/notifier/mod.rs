mod inmemory;
mod logger;
mod webhook;

use agenda_domain::EventReminderNotification;
pub use inmemory::InMemoryReminderNotifier;
pub use logger::LogReminderNotifier;
pub use webhook::{ReminderWebhookBody, WebhookReminderNotifier, REMINDER_WEBHOOK_KEY_HEADER};

/// Delivers reminders to the owners of events
#[async_trait::async_trait]
pub trait IReminderNotifier: Send + Sync {
    async fn send(&self, notification: &EventReminderNotification) -> anyhow::Result<()>;
}
