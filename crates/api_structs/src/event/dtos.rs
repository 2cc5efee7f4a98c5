use agenda_domain::{CalendarEvent, EventType, RecurrencePattern, ID};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventDTO {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_ts: i64,
    pub event_type: EventType,
    pub event_type_label: String,
    pub badge_color: String,
    pub calendar_color: String,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<RecurrencePattern>,
    /// Minutes before `start_ts`
    pub reminder: Option<i64>,
    pub reminder_label: Option<String>,
    /// `Jan 15, 2024 2:30 PM` in the timezone of the owner
    pub formatted_date: String,
    /// `2:30 PM` in the timezone of the owner
    pub formatted_time: String,
    pub created: i64,
    pub updated: i64,
}

impl CalendarEventDTO {
    pub fn new(event: CalendarEvent, tz: &Tz) -> Self {
        Self {
            formatted_date: event.formatted_date(tz),
            formatted_time: event.formatted_time(tz),
            event_type_label: event.event_type.label().to_string(),
            badge_color: event.event_type.badge_color().to_string(),
            calendar_color: event.calendar_color().to_string(),
            reminder: event.reminder.map(|r| r.minutes_before),
            reminder_label: event.reminder.map(|r| r.label()),
            id: event.id,
            user_id: event.user_id,
            title: event.title,
            description: event.description,
            location: event.location,
            start_ts: event.start_ts,
            event_type: event.event_type,
            is_recurring: event.is_recurring,
            recurrence_pattern: event.recurrence_pattern,
            created: event.created,
            updated: event.updated,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthDTO {
    pub month: u32,
    pub year: i32,
}
