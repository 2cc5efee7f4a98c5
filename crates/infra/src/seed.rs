use crate::AgendaContext;
use agenda_domain::{
    date::DAY_MILLIS, CalendarEvent, EventReminder, EventType, RecurrencePattern, User, ID,
    REMINDER_OPTIONS,
};
use chrono::{Datelike, Duration, NaiveDate, TimeZone};
use chrono_tz::Tz;
use rand::{seq::SliceRandom, Rng};
use tracing::info;

const TITLE_WORDS: [&str; 12] = [
    "Planning", "Review", "Lunch", "Workshop", "Call", "Brunch", "Practice", "Catch-up",
    "Session", "Visit", "Party", "Meeting",
];
const TITLE_SUBJECTS: [&str; 10] = [
    "Quarterly", "Project", "Birthday", "Book club", "Budget", "Garden", "Team", "Yoga",
    "Dentist", "Holiday",
];
const DESCRIPTIONS: [&str; 6] = [
    "Bring the notes from last time.",
    "Remember to confirm the booking the day before.",
    "Agenda will be shared in advance.",
    "Casual, no need to prepare anything.",
    "Please arrive ten minutes early.",
    "Follow up on the open questions from the previous session.",
];
const LOCATIONS: [&str; 8] = [
    "Oslo", "Berlin", "Lisbon", "Copenhagen", "Stockholm", "Amsterdam", "Vienna", "Prague",
];

/// Narrows down the random events produced by an `EventFactory`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventFactoryState {
    OfType(EventType),
    /// Starts during the current day of the owner
    Today,
    /// Starts within the next week
    ThisWeek,
    /// Starts within the next month
    ThisMonth,
}

/// Produces random but valid events for an owner
pub struct EventFactory {
    user_id: ID,
    now: i64,
    tz: Tz,
    states: Vec<EventFactoryState>,
}

impl EventFactory {
    pub fn new(user_id: ID, now: i64, tz: Tz) -> Self {
        Self {
            user_id,
            now,
            tz,
            states: Vec::new(),
        }
    }

    pub fn state(mut self, state: EventFactoryState) -> Self {
        self.states.push(state);
        self
    }

    pub fn personal(self) -> Self {
        self.state(EventFactoryState::OfType(EventType::Personal))
    }

    pub fn work(self) -> Self {
        self.state(EventFactoryState::OfType(EventType::Work))
    }

    pub fn social(self) -> Self {
        self.state(EventFactoryState::OfType(EventType::Social))
    }

    pub fn family(self) -> Self {
        self.state(EventFactoryState::OfType(EventType::Family))
    }

    pub fn today(self) -> Self {
        self.state(EventFactoryState::Today)
    }

    pub fn this_week(self) -> Self {
        self.state(EventFactoryState::ThisWeek)
    }

    pub fn this_month(self) -> Self {
        self.state(EventFactoryState::ThisMonth)
    }

    pub fn make<R: Rng>(&self, rng: &mut R) -> CalendarEvent {
        let title = format!(
            "{} {}",
            TITLE_SUBJECTS.choose(rng).unwrap_or(&"Team"),
            TITLE_WORDS.choose(rng).unwrap_or(&"Meeting")
        );
        let mut start_ts = rng.gen_range(self.now..self.now + 61 * DAY_MILLIS);
        let mut event = CalendarEvent::new(self.user_id.clone(), title, start_ts, self.now);

        if rng.gen_bool(0.7) {
            event.description = DESCRIPTIONS.choose(rng).map(|d| d.to_string());
        }
        if rng.gen_bool(0.6) {
            event.location = LOCATIONS.choose(rng).map(|l| l.to_string());
        }
        event.event_type = *EventType::ALL.choose(rng).unwrap_or(&EventType::Personal);
        if rng.gen_bool(0.2) {
            event.set_recurrence(true, RecurrencePattern::ALL.choose(rng).copied());
        }
        if rng.gen_bool(0.4) {
            event.reminder = REMINDER_OPTIONS.choose(rng).map(|m| EventReminder::new(*m));
        }

        for state in &self.states {
            match state {
                EventFactoryState::OfType(event_type) => event.event_type = *event_type,
                EventFactoryState::Today => {
                    let today = agenda_domain::date::day_span(self.now, &self.tz);
                    start_ts = rng.gen_range(today.start()..today.end());
                }
                EventFactoryState::ThisWeek => {
                    start_ts = rng.gen_range(self.now..self.now + 7 * DAY_MILLIS);
                }
                EventFactoryState::ThisMonth => {
                    start_ts = rng.gen_range(self.now..self.now + 30 * DAY_MILLIS);
                }
            }
        }
        // Whole minutes so that reminder times line up with the dispatcher ticks
        event.start_ts = start_ts - start_ts.rem_euclid(60 * 1000);
        event
    }

    pub fn make_many<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<CalendarEvent> {
        (0..count).map(|_| self.make(rng)).collect()
    }
}

fn local_ts(tz: &Tz, date: NaiveDate, hour: u32, minute: u32) -> i64 {
    let naive = date.and_hms_opt(hour, minute, 0).unwrap_or_default();
    match tz.from_local_datetime(&naive).earliest() {
        Some(dt) => dt.timestamp_millis(),
        None => tz.from_utc_datetime(&naive).timestamp_millis(),
    }
}

/// The first Sunday strictly after `date`
fn next_sunday(date: NaiveDate) -> NaiveDate {
    let days_ahead = 7 - date.weekday().num_days_from_sunday() as i64;
    date + Duration::days(days_ahead)
}

/// The sample events every fresh installation is seeded with
pub fn sample_events(user: &User, now: i64) -> Vec<CalendarEvent> {
    let tz = &user.timezone;
    let today = agenda_domain::date::to_datetime(now, tz).date_naive();

    let samples = [
        (
            "Team Meeting",
            "Weekly team sync meeting",
            local_ts(tz, today + Duration::days(1), 9, 0),
            "Conference Room A",
            EventType::Work,
            Some(RecurrencePattern::Weekly),
            30,
        ),
        (
            "Dinner with Friends",
            "Catch up with old friends",
            local_ts(tz, today + Duration::days(2), 19, 0),
            "Local Restaurant",
            EventType::Social,
            None,
            60,
        ),
        (
            "Doctor Appointment",
            "Annual checkup",
            local_ts(tz, today + Duration::days(5), 14, 30),
            "Medical Center",
            EventType::Personal,
            None,
            120,
        ),
        (
            "Family Dinner",
            "Sunday family dinner",
            local_ts(tz, next_sunday(today), 18, 0),
            "Home",
            EventType::Family,
            Some(RecurrencePattern::Weekly),
            60,
        ),
    ];

    samples
        .iter()
        .map(
            |(title, description, start_ts, location, event_type, pattern, reminder)| {
                let mut event =
                    CalendarEvent::new(user.id.clone(), title.to_string(), *start_ts, now);
                event.description = Some(description.to_string());
                event.location = Some(location.to_string());
                event.event_type = *event_type;
                event.set_recurrence(pattern.is_some(), *pattern);
                event.reminder = Some(EventReminder::new(*reminder));
                event
            },
        )
        .collect()
}

/// Stores the sample events and `random_count` factory events for the user
pub async fn seed_sample_events(
    ctx: &AgendaContext,
    user: &User,
    random_count: usize,
) -> anyhow::Result<Vec<CalendarEvent>> {
    let now = ctx.sys.get_timestamp_millis();
    let mut events = sample_events(user, now);
    let factory = EventFactory::new(user.id.clone(), now, user.timezone);
    events.extend(factory.make_many(random_count, &mut rand::thread_rng()));

    for event in &events {
        ctx.repos.events.insert(event).await?;
    }
    info!(
        "Seeded {} events for user: {} ({})",
        events.len(),
        user.name,
        user.id
    );
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_domain::{date::day_span, Entity, EventQuery, MINUTE_MILLIS};
    use chrono::TimeZone;
    use chrono_tz::{Europe::Oslo, UTC};

    const NOW: i64 = 1_705_320_000_000; // Mon Jan 15 2024 12:00:00 UTC

    fn user() -> User {
        User::new("Jane".into(), "jane@example.com".into(), Some(UTC), NOW)
    }

    #[test]
    fn factory_makes_valid_events() {
        let mut rng = rand::thread_rng();
        let factory = EventFactory::new(ID::default(), NOW, UTC);
        for event in factory.make_many(200, &mut rng) {
            assert!(event.validate().is_ok());
            assert!(event.start_ts >= NOW - MINUTE_MILLIS);
            assert!(event.start_ts < NOW + 61 * DAY_MILLIS);
            if !event.is_recurring {
                assert!(event.recurrence_pattern.is_none());
            }
        }
    }

    #[test]
    fn factory_states() {
        let mut rng = rand::thread_rng();
        let today = day_span(NOW, &Oslo);
        let factory = EventFactory::new(ID::default(), NOW, Oslo).work().today();
        for event in factory.make_many(50, &mut rng) {
            assert_eq!(event.event_type, EventType::Work);
            assert!(today.contains(event.start_ts));
        }

        let factory = EventFactory::new(ID::default(), NOW, UTC).this_week();
        for event in factory.make_many(50, &mut rng) {
            assert!(event.start_ts < NOW + 7 * DAY_MILLIS);
        }
    }

    #[test]
    fn sample_events_are_scheduled_relative_to_today() {
        let user = user();
        let events = sample_events(&user, NOW);
        assert_eq!(events.len(), 4);

        let team_meeting = &events[0];
        assert_eq!(team_meeting.title, "Team Meeting");
        assert_eq!(
            team_meeting.start_ts,
            UTC.with_ymd_and_hms(2024, 1, 16, 9, 0, 0)
                .unwrap()
                .timestamp_millis()
        );
        assert_eq!(team_meeting.recurrence_pattern, Some(RecurrencePattern::Weekly));

        let family_dinner = &events[3];
        assert_eq!(
            family_dinner.start_ts,
            UTC.with_ymd_and_hms(2024, 1, 21, 18, 0, 0)
                .unwrap()
                .timestamp_millis()
        );
        assert!(events.iter().all(|e| e.validate().is_ok()));
    }

    #[test]
    fn next_sunday_is_strictly_after() {
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 21).unwrap();
        assert_eq!(next_sunday(sunday), NaiveDate::from_ymd_opt(2024, 1, 28).unwrap());
    }

    #[tokio::test]
    async fn seeds_events_for_user() {
        let ctx = AgendaContext::create_inmemory();
        let user = user();
        ctx.repos.users.insert(&user).await.unwrap();
        let events = seed_sample_events(&ctx, &user, 5).await.unwrap();
        assert_eq!(events.len(), 9);

        let stored = ctx
            .repos
            .events
            .count_by_query(&EventQuery::for_user(user.id().clone()))
            .await
            .unwrap();
        assert_eq!(stored, 9);
    }
}
