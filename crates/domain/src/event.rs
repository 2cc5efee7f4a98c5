use crate::{
    date::{format_datetime, format_time},
    event_type::EventType,
    reminder::{EventReminder, ReminderWindow},
    shared::{
        entity::{Entity, ID},
        recurrence::RecurrencePattern,
    },
};
use chrono_tz::Tz;
use thiserror::Error;

pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;
pub const MAX_LOCATION_LENGTH: usize = 255;

#[derive(Debug, Clone)]
pub struct CalendarEvent {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_ts: i64,
    pub event_type: EventType,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<RecurrencePattern>,
    pub reminder: Option<EventReminder>,
    /// `remind_at` of the last reminder that was dispatched for this event
    pub reminder_sent_for: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

impl Entity for CalendarEvent {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum EventValidationError {
    #[error("The title is required")]
    EmptyTitle,
    #[error("The title may not be greater than {0} characters")]
    TitleTooLong(usize),
    #[error("The description may not be greater than {0} characters")]
    DescriptionTooLong(usize),
    #[error("The location may not be greater than {0} characters")]
    LocationTooLong(usize),
    #[error("Invalid reminder: {0} minutes before is not one of the available options")]
    InvalidReminder(i64),
}

impl CalendarEvent {
    pub fn new(user_id: ID, title: String, start_ts: i64, created: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            title,
            description: None,
            location: None,
            start_ts,
            event_type: Default::default(),
            is_recurring: false,
            recurrence_pattern: None,
            reminder: None,
            reminder_sent_for: None,
            created,
            updated: created,
        }
    }

    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        if self.title.chars().count() > MAX_TITLE_LENGTH {
            return Err(EventValidationError::TitleTooLong(MAX_TITLE_LENGTH));
        }
        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LENGTH {
                return Err(EventValidationError::DescriptionTooLong(
                    MAX_DESCRIPTION_LENGTH,
                ));
            }
        }
        if let Some(location) = &self.location {
            if location.chars().count() > MAX_LOCATION_LENGTH {
                return Err(EventValidationError::LocationTooLong(MAX_LOCATION_LENGTH));
            }
        }
        if let Some(reminder) = &self.reminder {
            if !reminder.is_valid() {
                return Err(EventValidationError::InvalidReminder(
                    reminder.minutes_before,
                ));
            }
        }
        Ok(())
    }

    /// A recurrence pattern is only kept for recurring events
    pub fn set_recurrence(&mut self, is_recurring: bool, pattern: Option<RecurrencePattern>) {
        self.is_recurring = is_recurring;
        self.recurrence_pattern = if is_recurring { pattern } else { None };
    }

    pub fn remind_at(&self) -> Option<i64> {
        self.reminder.map(|r| r.remind_at(self.start_ts))
    }

    pub fn is_reminder_candidate(&self, window: &ReminderWindow, now: i64) -> bool {
        match &self.reminder {
            Some(reminder) => window.is_candidate(self.start_ts, reminder, now),
            None => false,
        }
    }

    pub fn is_reminder_due(&self, window: &ReminderWindow, now: i64) -> bool {
        match self.remind_at() {
            Some(remind_at) => window.is_due(remind_at, now),
            None => false,
        }
    }

    /// Whether the reminder for the current schedule has already been dispatched.
    /// Changing the date or the reminder of the event moves `remind_at`, which
    /// makes the reminder pending again.
    pub fn is_reminder_sent(&self) -> bool {
        match (self.remind_at(), self.reminder_sent_for) {
            (Some(remind_at), Some(sent_for)) => remind_at == sent_for,
            _ => false,
        }
    }

    pub fn calendar_color(&self) -> &'static str {
        self.event_type.calendar_color()
    }

    pub fn formatted_date(&self, tz: &Tz) -> String {
        format_datetime(self.start_ts, tz)
    }

    pub fn formatted_time(&self, tz: &Tz) -> String {
        format_time(self.start_ts, tz)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::MINUTE_MILLIS;

    const NOW: i64 = 1_700_000_000_000;

    fn event_at(start_ts: i64, reminder: Option<i64>) -> CalendarEvent {
        let mut event = CalendarEvent::new(Default::default(), "Standup".into(), start_ts, 0);
        event.reminder = reminder.map(EventReminder::new);
        event
    }

    #[test]
    fn validates_field_lengths() {
        let mut event = event_at(NOW, None);
        assert!(event.validate().is_ok());

        event.title = "  ".into();
        assert_eq!(event.validate(), Err(EventValidationError::EmptyTitle));

        event.title = "a".repeat(MAX_TITLE_LENGTH);
        assert!(event.validate().is_ok());
        event.title = "a".repeat(MAX_TITLE_LENGTH + 1);
        assert_eq!(
            event.validate(),
            Err(EventValidationError::TitleTooLong(MAX_TITLE_LENGTH))
        );

        event.title = "Standup".into();
        event.description = Some("d".repeat(MAX_DESCRIPTION_LENGTH + 1));
        assert!(event.validate().is_err());
        event.description = None;
        event.location = Some("l".repeat(MAX_LOCATION_LENGTH + 1));
        assert!(event.validate().is_err());
    }

    #[test]
    fn rejects_unknown_reminder_offsets() {
        let event = event_at(NOW, Some(-5));
        assert_eq!(
            event.validate(),
            Err(EventValidationError::InvalidReminder(-5))
        );
        let event = event_at(NOW, Some(45));
        assert!(event.validate().is_err());
    }

    #[test]
    fn drops_recurrence_pattern_for_non_recurring_events() {
        let mut event = event_at(NOW, None);
        event.set_recurrence(false, Some(RecurrencePattern::Weekly));
        assert_eq!(event.recurrence_pattern, None);
        event.set_recurrence(true, Some(RecurrencePattern::Weekly));
        assert_eq!(event.recurrence_pattern, Some(RecurrencePattern::Weekly));
    }

    #[test]
    fn events_without_reminder_are_never_candidates() {
        let window = ReminderWindow::default();
        let event = event_at(NOW + 30 * MINUTE_MILLIS, None);
        assert!(!event.is_reminder_candidate(&window, NOW));
        assert!(!event.is_reminder_due(&window, NOW));
    }

    #[test]
    fn reminder_scenarios() {
        let window = ReminderWindow::default();

        let later = event_at(NOW + 45 * MINUTE_MILLIS, Some(30));
        assert!(!later.is_reminder_candidate(&window, NOW));
        let now_of_reminder = NOW + 15 * MINUTE_MILLIS;
        assert!(later.is_reminder_candidate(&window, now_of_reminder));
        assert!(later.is_reminder_due(&window, now_of_reminder));

        let missed = event_at(NOW + 25 * MINUTE_MILLIS, Some(30));
        assert!(missed.is_reminder_candidate(&window, NOW));
        assert!(!missed.is_reminder_due(&window, NOW));

        let due = event_at(NOW + 30 * MINUTE_MILLIS, Some(30));
        assert!(due.is_reminder_candidate(&window, NOW));
        assert!(due.is_reminder_due(&window, NOW));
    }

    #[test]
    fn moving_the_event_makes_the_reminder_pending_again() {
        let mut event = event_at(NOW + 30 * MINUTE_MILLIS, Some(30));
        assert!(!event.is_reminder_sent());
        event.reminder_sent_for = event.remind_at();
        assert!(event.is_reminder_sent());
        event.start_ts += 60 * MINUTE_MILLIS;
        assert!(!event.is_reminder_sent());
    }
}
