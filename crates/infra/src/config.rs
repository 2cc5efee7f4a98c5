use agenda_domain::{ReminderWindow, MINUTE_MILLIS};
use agenda_utils::{create_random_secret, parse_flag};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Public base url of the application, used for the deep links in reminders
    pub app_base_url: String,
    /// Mail relay that reminders are posted to. Reminders are only logged
    /// when this is not set.
    pub reminder_webhook_url: Option<String>,
    /// Shared secret sent along with every request to the mail relay
    pub reminder_webhook_key: String,
    /// Whether the server itself should dispatch reminders every minute.
    /// Turn this off when the `send_event_reminders` binary is scheduled externally.
    pub send_reminders_job: bool,
    /// How far ahead a dispatch run looks for events with a reminder and
    /// how much scheduler jitter is tolerated around the reminder time
    pub reminder_window: ReminderWindow,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                5000
            }
        };

        let app_base_url = match std::env::var("APP_BASE_URL") {
            Ok(url) => url,
            Err(_) => {
                let url = format!("http://localhost:{}", port);
                info!(
                    "Did not find APP_BASE_URL environment variable. Falling back to: {}",
                    url
                );
                url
            }
        };

        let reminder_webhook_url = std::env::var("REMINDER_WEBHOOK_URL").ok();
        if reminder_webhook_url.is_none() {
            info!("Did not find REMINDER_WEBHOOK_URL environment variable. Reminders will only be logged.");
        }

        let reminder_webhook_key = match std::env::var("REMINDER_WEBHOOK_KEY") {
            Ok(key) => key,
            Err(_) => {
                if reminder_webhook_url.is_some() {
                    info!("Did not find REMINDER_WEBHOOK_KEY environment variable. Going to create one.");
                }
                create_random_secret(32)
            }
        };

        let send_reminders_job = match std::env::var("SEND_REMINDERS_JOB") {
            Ok(value) => match parse_flag(&value) {
                Some(flag) => flag,
                None => {
                    warn!(
                        "The given SEND_REMINDERS_JOB: {} is not a valid flag, falling back to: true.",
                        value
                    );
                    true
                }
            },
            Err(_) => true,
        };

        Self {
            port,
            app_base_url,
            reminder_webhook_url,
            reminder_webhook_key,
            send_reminders_job,
            reminder_window: ReminderWindow {
                lookahead: 30 * MINUTE_MILLIS,
                tolerance: MINUTE_MILLIS,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
