use super::IEventRepo;
use crate::repos::shared::repo::DeleteResult;
use agenda_domain::{
    CalendarEvent, EventQuery, EventReminder, EventType, RecurrencePattern, ReminderWindow, ID,
};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::warn;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    event_uid: Uuid,
    user_uid: Uuid,
    title: String,
    description: Option<String>,
    location: Option<String>,
    start_ts: i64,
    event_type: String,
    is_recurring: bool,
    recurrence_pattern: Option<String>,
    reminder: Option<i64>,
    reminder_sent_for: Option<i64>,
    created: i64,
    updated: i64,
}

impl From<EventRaw> for CalendarEvent {
    fn from(e: EventRaw) -> Self {
        let event_type = e.event_type.parse::<EventType>().unwrap_or_else(|_| {
            warn!(
                "Event: {} has unknown event type: {}, falling back to the default",
                e.event_uid, e.event_type
            );
            EventType::default()
        });
        let recurrence_pattern = e
            .recurrence_pattern
            .and_then(|p| p.parse::<RecurrencePattern>().ok());
        Self {
            id: e.event_uid.into(),
            user_id: e.user_uid.into(),
            title: e.title,
            description: e.description,
            location: e.location,
            start_ts: e.start_ts,
            event_type,
            is_recurring: e.is_recurring,
            recurrence_pattern,
            reminder: e.reminder.map(EventReminder::new),
            reminder_sent_for: e.reminder_sent_for,
            created: e.created,
            updated: e.updated,
        }
    }
}

/// `%term%` with the LIKE wildcards of the term escaped
fn search_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

const QUERY_FILTER: &str = r#"
    e.user_uid = $1
    AND ($2::bigint IS NULL OR e.start_ts >= $2)
    AND ($3::bigint IS NULL OR e.start_ts < $3)
    AND ($4::text IS NULL OR e.event_type = $4)
    AND ($5::boolean IS NULL OR (e.reminder IS NOT NULL) = $5)
    AND ($6::text IS NULL OR e.title ILIKE $6 OR e.description ILIKE $6)
"#;

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn insert(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO events(
                event_uid,
                user_uid,
                title,
                description,
                location,
                start_ts,
                event_type,
                is_recurring,
                recurrence_pattern,
                reminder,
                reminder_sent_for,
                created,
                updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(*e.id.inner_ref())
        .bind(*e.user_id.inner_ref())
        .bind(&e.title)
        .bind(&e.description)
        .bind(&e.location)
        .bind(e.start_ts)
        .bind(e.event_type.as_str())
        .bind(e.is_recurring)
        .bind(e.recurrence_pattern.map(|p| p.as_str()))
        .bind(e.reminder.map(|r| r.minutes_before))
        .bind(e.reminder_sent_for)
        .bind(e.created)
        .bind(e.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE events SET
                user_uid = $2,
                title = $3,
                description = $4,
                location = $5,
                start_ts = $6,
                event_type = $7,
                is_recurring = $8,
                recurrence_pattern = $9,
                reminder = $10,
                reminder_sent_for = $11,
                created = $12,
                updated = $13
            WHERE event_uid = $1
            "#,
        )
        .bind(*e.id.inner_ref())
        .bind(*e.user_id.inner_ref())
        .bind(&e.title)
        .bind(&e.description)
        .bind(&e.location)
        .bind(e.start_ts)
        .bind(e.event_type.as_str())
        .bind(e.is_recurring)
        .bind(e.recurrence_pattern.map(|p| p.as_str()))
        .bind(e.reminder.map(|r| r.minutes_before))
        .bind(e.reminder_sent_for)
        .bind(e.created)
        .bind(e.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<CalendarEvent> {
        let event: EventRaw = match sqlx::query_as::<_, EventRaw>(
            r#"
            SELECT * FROM events AS e
            WHERE e.event_uid = $1
            "#,
        )
        .bind(*event_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(event) => event,
            Err(_) => return None,
        };
        Some(event.into())
    }

    async fn find_by_query(
        &self,
        query: &EventQuery,
        skip: u64,
        limit: Option<u32>,
    ) -> anyhow::Result<Vec<CalendarEvent>> {
        let sql = format!(
            r#"
            SELECT * FROM events AS e
            WHERE {}
            ORDER BY e.start_ts ASC, e.created ASC
            OFFSET $7
            LIMIT $8
            "#,
            QUERY_FILTER
        );
        let events: Vec<EventRaw> = sqlx::query_as::<_, EventRaw>(&sql)
            .bind(*query.user_id.inner_ref())
            .bind(query.start_ts)
            .bind(query.end_ts)
            .bind(query.event_type.map(|t| t.as_str()))
            .bind(query.has_reminder)
            .bind(query.search.as_deref().map(search_pattern))
            .bind(skip as i64)
            .bind(limit.map(|l| l as i64))
            .fetch_all(&self.pool)
            .await?;
        Ok(events.into_iter().map(|e| e.into()).collect())
    }

    async fn count_by_query(&self, query: &EventQuery) -> anyhow::Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM events AS e WHERE {}", QUERY_FILTER);
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(*query.user_id.inner_ref())
            .bind(query.start_ts)
            .bind(query.end_ts)
            .bind(query.event_type.map(|t| t.as_str()))
            .bind(query.has_reminder)
            .bind(query.search.as_deref().map(search_pattern))
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn find_reminder_candidates(
        &self,
        now: i64,
        window: &ReminderWindow,
    ) -> anyhow::Result<Vec<CalendarEvent>> {
        let events: Vec<EventRaw> = sqlx::query_as::<_, EventRaw>(
            r#"
            SELECT * FROM events AS e
            WHERE e.reminder IS NOT NULL
            AND e.start_ts > $1
            AND e.start_ts <= $1 + GREATEST($2, e.reminder * 60000 + $3)
            ORDER BY e.start_ts ASC, e.created ASC
            "#,
        )
        .bind(now)
        .bind(window.lookahead)
        .bind(window.tolerance)
        .fetch_all(&self.pool)
        .await?;
        Ok(events.into_iter().map(|e| e.into()).collect())
    }

    async fn claim_reminder(&self, event_id: &ID, remind_at: i64) -> anyhow::Result<bool> {
        let claimed: Option<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE events SET reminder_sent_for = $2
            WHERE event_uid = $1
            AND reminder IS NOT NULL
            AND start_ts - reminder * 60000 = $2
            AND reminder_sent_for IS DISTINCT FROM $2
            RETURNING event_uid
            "#,
        )
        .bind(*event_id.inner_ref())
        .bind(remind_at)
        .fetch_optional(&self.pool)
        .await?;
        Ok(claimed.is_some())
    }

    async fn release_reminder_claim(
        &self,
        event_id: &ID,
        remind_at: i64,
        previous: Option<i64>,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE events SET reminder_sent_for = $3
            WHERE event_uid = $1 AND reminder_sent_for = $2
            "#,
        )
        .bind(*event_id.inner_ref())
        .bind(remind_at)
        .bind(previous)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, event_id: &ID) -> Option<CalendarEvent> {
        match sqlx::query_as::<_, EventRaw>(
            r#"
            DELETE FROM events AS e
            WHERE e.event_uid = $1
            RETURNING *
            "#,
        )
        .bind(*event_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(e) => Some(e.into()),
            Err(_) => None,
        }
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM events AS e
            WHERE e.user_uid = $1
            "#,
        )
        .bind(*user_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::search_pattern;

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(search_pattern("team"), "%team%");
        assert_eq!(search_pattern("50%_off"), "%50\\%\\_off%");
    }
}
