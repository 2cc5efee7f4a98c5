mod notifier;

pub use notifier::{
    IReminderNotifier, InMemoryReminderNotifier, LogReminderNotifier, ReminderWebhookBody,
    WebhookReminderNotifier, REMINDER_WEBHOOK_KEY_HEADER,
};
