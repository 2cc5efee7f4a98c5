mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
use agenda_domain::{CalendarEvent, EventQuery, ReminderWindow, ID};
pub use inmemory::InMemoryEventRepo;
pub use postgres::PostgresEventRepo;

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, e: &CalendarEvent) -> anyhow::Result<()>;
    async fn save(&self, e: &CalendarEvent) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> Option<CalendarEvent>;
    /// Events matching the query ordered by `start_ts` ascending
    async fn find_by_query(
        &self,
        query: &EventQuery,
        skip: u64,
        limit: Option<u32>,
    ) -> anyhow::Result<Vec<CalendarEvent>>;
    async fn count_by_query(&self, query: &EventQuery) -> anyhow::Result<u64>;
    /// Events with a reminder that start after `now` and within the horizon
    /// of their reminder, ordered by `start_ts` ascending
    async fn find_reminder_candidates(
        &self,
        now: i64,
        window: &ReminderWindow,
    ) -> anyhow::Result<Vec<CalendarEvent>>;
    /// Marks the reminder due at `remind_at` as dispatched. Returns `false` when it
    /// was already marked or the event no longer has that reminder time.
    async fn claim_reminder(&self, event_id: &ID, remind_at: i64) -> anyhow::Result<bool>;
    /// Undoes a claim after a failed delivery
    async fn release_reminder_claim(
        &self,
        event_id: &ID,
        remind_at: i64,
        previous: Option<i64>,
    ) -> anyhow::Result<()>;
    async fn delete(&self, event_id: &ID) -> Option<CalendarEvent>;
    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult>;
}

#[cfg(test)]
mod tests {
    use crate::AgendaContext;
    use agenda_domain::{
        CalendarEvent, Entity, EventQuery, EventReminder, EventType, ReminderWindow, ID,
        MINUTE_MILLIS,
    };

    const NOW: i64 = 1_700_000_000_000;

    fn generate_event(user_id: &ID, start_ts: i64, reminder: Option<i64>) -> CalendarEvent {
        let mut event = CalendarEvent::new(user_id.clone(), "Standup".into(), start_ts, NOW);
        event.reminder = reminder.map(EventReminder::new);
        event
    }

    #[tokio::test]
    async fn create_update_and_delete() {
        let ctx = AgendaContext::create_inmemory();
        let mut event = generate_event(&ID::default(), NOW, None);

        assert!(ctx.repos.events.insert(&event).await.is_ok());
        let found = ctx.repos.events.find(&event.id).await.expect("To find event");
        assert!(found.eq(&event));

        event.title = "Retro".into();
        assert!(ctx.repos.events.save(&event).await.is_ok());
        let found = ctx.repos.events.find(&event.id).await.expect("To find event");
        assert_eq!(found.title, "Retro");

        let deleted = ctx.repos.events.delete(&event.id).await.expect("To delete");
        assert!(deleted.eq(&event));
        assert!(ctx.repos.events.find(&event.id).await.is_none());
    }

    #[tokio::test]
    async fn delete_by_user() {
        let ctx = AgendaContext::create_inmemory();
        let user_id = ID::default();
        let other_user_id = ID::default();
        for ts in [NOW, NOW + 1].iter() {
            let event = generate_event(&user_id, *ts, None);
            ctx.repos.events.insert(&event).await.unwrap();
        }
        let other = generate_event(&other_user_id, NOW, None);
        ctx.repos.events.insert(&other).await.unwrap();

        let res = ctx.repos.events.delete_by_user(&user_id).await.unwrap();
        assert_eq!(res.deleted_count, 2);
        assert!(ctx.repos.events.find(&other.id).await.is_some());
    }

    #[tokio::test]
    async fn queries_are_sorted_paginated_and_counted() {
        let ctx = AgendaContext::create_inmemory();
        let user_id = ID::default();
        for offset in [3, 1, 2, 0].iter() {
            let mut event = generate_event(&user_id, NOW + offset * MINUTE_MILLIS, None);
            if *offset % 2 == 0 {
                event.event_type = EventType::Work;
            }
            ctx.repos.events.insert(&event).await.unwrap();
        }

        let query = EventQuery::for_user(user_id.clone());
        let events = ctx
            .repos
            .events
            .find_by_query(&query, 1, Some(2))
            .await
            .unwrap();
        assert_eq!(
            events.iter().map(|e| e.start_ts).collect::<Vec<_>>(),
            vec![NOW + MINUTE_MILLIS, NOW + 2 * MINUTE_MILLIS]
        );
        assert_eq!(ctx.repos.events.count_by_query(&query).await.unwrap(), 4);

        let work = query.by_type(EventType::Work);
        assert_eq!(ctx.repos.events.count_by_query(&work).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn finds_reminder_candidates() {
        let ctx = AgendaContext::create_inmemory();
        let window = ReminderWindow::default();
        let user_id = ID::default();

        let due = generate_event(&user_id, NOW + 30 * MINUTE_MILLIS, Some(30));
        let too_far = generate_event(&user_id, NOW + 45 * MINUTE_MILLIS, Some(30));
        let no_reminder = generate_event(&user_id, NOW + 10 * MINUTE_MILLIS, None);
        let started = generate_event(&user_id, NOW, Some(15));
        let day_before = generate_event(&user_id, NOW + 1440 * MINUTE_MILLIS, Some(1440));
        for e in [&due, &too_far, &no_reminder, &started, &day_before].iter() {
            ctx.repos.events.insert(e).await.unwrap();
        }

        let candidates = ctx
            .repos
            .events
            .find_reminder_candidates(NOW, &window)
            .await
            .unwrap();
        let ids = candidates.iter().map(|e| e.id().clone()).collect::<Vec<_>>();
        assert_eq!(ids, vec![due.id.clone(), day_before.id.clone()]);
    }

    #[tokio::test]
    async fn claims_a_reminder_once() {
        let ctx = AgendaContext::create_inmemory();
        let event = generate_event(&ID::default(), NOW + 30 * MINUTE_MILLIS, Some(30));
        ctx.repos.events.insert(&event).await.unwrap();
        let remind_at = event.remind_at().unwrap();

        assert!(ctx.repos.events.claim_reminder(&event.id, remind_at).await.unwrap());
        assert!(!ctx.repos.events.claim_reminder(&event.id, remind_at).await.unwrap());
        // Stale reminder time
        assert!(!ctx
            .repos
            .events
            .claim_reminder(&event.id, remind_at - MINUTE_MILLIS)
            .await
            .unwrap());

        ctx.repos
            .events
            .release_reminder_claim(&event.id, remind_at, None)
            .await
            .unwrap();
        let found = ctx.repos.events.find(&event.id).await.unwrap();
        assert_eq!(found.reminder_sent_for, None);
        assert!(ctx.repos.events.claim_reminder(&event.id, remind_at).await.unwrap());
    }
}
