use super::IReminderNotifier;
use agenda_domain::EventReminderNotification;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::error;

pub const REMINDER_WEBHOOK_KEY_HEADER: &str = "agenda-webhook-key";

/// Body posted to the mail relay for every reminder
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderWebhookBody<'a> {
    pub to_name: &'a str,
    pub to_email: &'a str,
    pub subject: &'a str,
    /// Plain text rendering of the mail
    pub text: String,
    pub notification: &'a EventReminderNotification,
}

impl<'a> ReminderWebhookBody<'a> {
    pub fn new(notification: &'a EventReminderNotification) -> Self {
        Self {
            to_name: &notification.recipient_name,
            to_email: &notification.recipient_email,
            subject: &notification.subject,
            text: notification.to_text(),
            notification,
        }
    }
}

/// Hands reminders over to a mail relay over http
pub struct WebhookReminderNotifier {
    client: Client,
    url: String,
    key: String,
}

impl WebhookReminderNotifier {
    pub fn new(url: String, key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, url, key }
    }
}

#[async_trait::async_trait]
impl IReminderNotifier for WebhookReminderNotifier {
    async fn send(&self, notification: &EventReminderNotification) -> anyhow::Result<()> {
        match self
            .client
            .post(&self.url)
            .header(REMINDER_WEBHOOK_KEY_HEADER, &self.key)
            .json(&ReminderWebhookBody::new(notification))
            .send()
            .await
        {
            Ok(res) => res.error_for_status().map(|_| ()).map_err(|e| {
                error!(
                    "[Unexpected Response] Reminder webhook POST error. Error message: {:?}",
                    e
                );
                anyhow::Error::new(e)
            }),
            Err(e) => {
                error!(
                    "[Network Error] Reminder webhook POST error. Error message: {:?}",
                    e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }
}
