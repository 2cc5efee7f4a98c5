use super::IEventRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use agenda_domain::{CalendarEvent, EventQuery, ReminderWindow, ID};

pub struct InMemoryEventRepo {
    events: std::sync::Mutex<Vec<CalendarEvent>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }
}

fn sort_by_start(events: &mut Vec<CalendarEvent>) {
    events.sort_by(|a, b| {
        a.start_ts
            .cmp(&b.start_ts)
            .then_with(|| a.created.cmp(&b.created))
    });
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        insert(e, &self.events);
        Ok(())
    }

    async fn save(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        save(e, &self.events);
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<CalendarEvent> {
        find(event_id, &self.events)
    }

    async fn find_by_query(
        &self,
        query: &EventQuery,
        skip: u64,
        limit: Option<u32>,
    ) -> anyhow::Result<Vec<CalendarEvent>> {
        let mut events = find_by(&self.events, |e| query.matches(e));
        sort_by_start(&mut events);
        let events = events.into_iter().skip(skip as usize);
        let events = match limit {
            Some(limit) => events.take(limit as usize).collect(),
            None => events.collect(),
        };
        Ok(events)
    }

    async fn count_by_query(&self, query: &EventQuery) -> anyhow::Result<u64> {
        Ok(find_by(&self.events, |e| query.matches(e)).len() as u64)
    }

    async fn find_reminder_candidates(
        &self,
        now: i64,
        window: &ReminderWindow,
    ) -> anyhow::Result<Vec<CalendarEvent>> {
        let mut events = find_by(&self.events, |e| e.is_reminder_candidate(window, now));
        sort_by_start(&mut events);
        Ok(events)
    }

    async fn claim_reminder(&self, event_id: &ID, remind_at: i64) -> anyhow::Result<bool> {
        let claimed = update_one(event_id, &self.events, |e| {
            if e.remind_at() == Some(remind_at) && e.reminder_sent_for != Some(remind_at) {
                e.reminder_sent_for = Some(remind_at);
                true
            } else {
                false
            }
        });
        Ok(claimed)
    }

    async fn release_reminder_claim(
        &self,
        event_id: &ID,
        remind_at: i64,
        previous: Option<i64>,
    ) -> anyhow::Result<()> {
        update_one(event_id, &self.events, |e| {
            if e.reminder_sent_for == Some(remind_at) {
                e.reminder_sent_for = previous;
                true
            } else {
                false
            }
        });
        Ok(())
    }

    async fn delete(&self, event_id: &ID) -> Option<CalendarEvent> {
        delete(event_id, &self.events)
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
        let deleted = find_and_delete_by(&self.events, |e| e.user_id == *user_id);
        Ok(DeleteResult {
            deleted_count: deleted.len() as i64,
        })
    }
}
