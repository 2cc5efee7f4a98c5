use serde::{Deserialize, Serialize};
use std::cmp::max;

pub const MINUTE_MILLIS: i64 = 1000 * 60;

/// The lead times (in minutes) offered when setting a reminder on an event
pub const REMINDER_OPTIONS: [i64; 5] = [15, 30, 60, 120, 1440];

/// A reminder of a `CalendarEvent` owner some minutes before the event starts
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventReminder {
    pub minutes_before: i64,
}

impl EventReminder {
    pub fn new(minutes_before: i64) -> Self {
        Self { minutes_before }
    }

    /// Only the lead times offered by the event form are accepted
    pub fn is_valid(&self) -> bool {
        REMINDER_OPTIONS.contains(&self.minutes_before)
    }

    pub fn millis_before(&self) -> i64 {
        self.minutes_before * MINUTE_MILLIS
    }

    /// Timestamp at which the reminder for an event starting at `start_ts` is due
    pub fn remind_at(&self, start_ts: i64) -> i64 {
        start_ts - self.millis_before()
    }

    pub fn label(&self) -> String {
        reminder_option_label(self.minutes_before)
    }
}

pub fn reminder_option_label(minutes: i64) -> String {
    match minutes {
        1440 => "1 day before".into(),
        60 => "1 hour before".into(),
        m if m > 60 && m % 60 == 0 => format!("{} hours before", m / 60),
        m => format!("{} minutes before", m),
    }
}

/// The time bounds used by the reminder dispatcher.
///
/// A dispatch run only looks at events starting within `lookahead`
/// of now, and a reminder fires when now is within `tolerance` of
/// its `remind_at`. The tolerance absorbs the jitter of the scheduler
/// invoking the dispatcher about once a minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderWindow {
    pub lookahead: i64,
    pub tolerance: i64,
}

impl Default for ReminderWindow {
    fn default() -> Self {
        Self {
            lookahead: 30 * MINUTE_MILLIS,
            tolerance: MINUTE_MILLIS,
        }
    }
}

impl ReminderWindow {
    /// How far ahead of now an event with this reminder may start and still be a candidate.
    /// Never shorter than the lead time of the reminder.
    pub fn horizon(&self, reminder: &EventReminder) -> i64 {
        max(self.lookahead, reminder.millis_before() + self.tolerance)
    }

    /// Whether an event starting at `start_ts` should be fetched by a run at `now`
    pub fn is_candidate(&self, start_ts: i64, reminder: &EventReminder, now: i64) -> bool {
        start_ts > now && start_ts <= now + self.horizon(reminder)
    }

    /// Whether the reminder due at `remind_at` should fire at `now`
    pub fn is_due(&self, remind_at: i64, now: i64) -> bool {
        remind_at - self.tolerance <= now && now <= remind_at + self.tolerance
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn only_form_options_are_valid() {
        for minutes in REMINDER_OPTIONS.iter() {
            assert!(EventReminder::new(*minutes).is_valid());
        }
        assert!(!EventReminder::new(0).is_valid());
        assert!(!EventReminder::new(-15).is_valid());
        assert!(!EventReminder::new(45).is_valid());
    }

    #[test]
    fn option_labels() {
        assert_eq!(reminder_option_label(15), "15 minutes before");
        assert_eq!(reminder_option_label(30), "30 minutes before");
        assert_eq!(reminder_option_label(60), "1 hour before");
        assert_eq!(reminder_option_label(120), "2 hours before");
        assert_eq!(reminder_option_label(1440), "1 day before");
    }

    #[test]
    fn due_exactly_within_tolerance() {
        let window = ReminderWindow::default();
        let reminder = EventReminder::new(30);
        let start_ts = NOW + 30 * MINUTE_MILLIS;
        let remind_at = reminder.remind_at(start_ts);
        assert_eq!(remind_at, NOW);

        assert!(window.is_due(remind_at, NOW));
        assert!(window.is_due(remind_at, NOW - MINUTE_MILLIS));
        assert!(window.is_due(remind_at, NOW + MINUTE_MILLIS));
        assert!(!window.is_due(remind_at, NOW - MINUTE_MILLIS - 1));
        assert!(!window.is_due(remind_at, NOW + MINUTE_MILLIS + 1));
    }

    #[test]
    fn candidate_bounds() {
        let window = ReminderWindow::default();
        let reminder = EventReminder::new(30);

        // Starts in 45 minutes, outside of the lookahead
        assert!(!window.is_candidate(NOW + 45 * MINUTE_MILLIS, &reminder, NOW));
        // Starts in 25 minutes
        assert!(window.is_candidate(NOW + 25 * MINUTE_MILLIS, &reminder, NOW));
        // Already started
        assert!(!window.is_candidate(NOW, &reminder, NOW));
        assert!(!window.is_candidate(NOW - 1, &reminder, NOW));
    }

    #[test]
    fn long_reminders_extend_the_horizon() {
        let window = ReminderWindow::default();
        let reminder = EventReminder::new(1440);
        let start_ts = NOW + 1440 * MINUTE_MILLIS;
        assert!(window.is_candidate(start_ts, &reminder, NOW));
        assert!(window.is_due(reminder.remind_at(start_ts), NOW));
        assert!(!window.is_candidate(start_ts + 2 * MINUTE_MILLIS, &reminder, NOW));
    }
}
