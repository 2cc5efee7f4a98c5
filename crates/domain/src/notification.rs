use crate::{
    date::{format_long_date, format_time},
    event::CalendarEvent,
    event_type::EventType,
    shared::entity::ID,
    user::User,
};
use serde::{Deserialize, Serialize};

/// Machine readable form of a reminder for non email channels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReminderPayload {
    pub event_id: ID,
    pub event_title: String,
    pub event_date: i64,
    pub event_type: EventType,
    pub reminder_minutes: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationAction {
    pub text: String,
    pub url: String,
}

/// The reminder mail sent to the owner of an event shortly before it starts.
/// Dates are rendered in the timezone of the recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReminderNotification {
    pub recipient_name: String,
    pub recipient_email: String,
    pub subject: String,
    pub greeting: String,
    pub lines: Vec<String>,
    pub action: NotificationAction,
    pub outro_lines: Vec<String>,
    pub payload: EventReminderPayload,
}

/// Deep link to the detail view of an event
pub fn event_view_url(app_base_url: &str, event_id: &ID) -> String {
    format!("{}/events/{}", app_base_url.trim_end_matches('/'), event_id)
}

impl EventReminderNotification {
    pub fn new(event: &CalendarEvent, recipient: &User, app_base_url: &str) -> Self {
        let tz = &recipient.timezone;
        let mut lines = vec![
            format!(
                "This is a reminder that your event **{}** is starting soon.",
                event.title
            ),
            "**Event Details:**".to_string(),
            format!("📅 **Date:** {}", format_long_date(event.start_ts, tz)),
            format!("🕐 **Time:** {}", format_time(event.start_ts, tz)),
        ];
        if let Some(location) = non_blank(&event.location) {
            lines.push(format!("📍 **Location:** {}", location));
        }
        if let Some(description) = non_blank(&event.description) {
            lines.push(format!("📝 **Description:** {}", description));
        }
        lines.push(format!("**Event Type:** {}", event.event_type.label()));
        if event.is_recurring {
            lines.push("🔄 This is a recurring event".to_string());
        }

        Self {
            recipient_name: recipient.name.clone(),
            recipient_email: recipient.email.clone(),
            subject: format!("Reminder: {} starts soon", event.title),
            greeting: format!("Hello {}!", recipient.name),
            lines,
            action: NotificationAction {
                text: "View Event Details".to_string(),
                url: event_view_url(app_base_url, &event.id),
            },
            outro_lines: vec!["Thank you for using our application!".to_string()],
            payload: EventReminderPayload {
                event_id: event.id.clone(),
                event_title: event.title.clone(),
                event_date: event.start_ts,
                event_type: event.event_type,
                reminder_minutes: event.reminder.map(|r| r.minutes_before),
            },
        }
    }

    /// Plain text body of the mail
    pub fn to_text(&self) -> String {
        let mut body = vec![self.greeting.clone(), String::new()];
        body.extend(self.lines.iter().cloned());
        body.push(String::new());
        body.push(format!("{}: {}", self.action.text, self.action.url));
        body.push(String::new());
        body.extend(self.outro_lines.iter().cloned());
        body.join("\n")
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}
