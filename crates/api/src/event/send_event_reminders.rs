use crate::shared::usecase::UseCase;
use agenda_domain::{EventReminderNotification, User, ID};
use agenda_infra::AgendaContext;
use std::collections::HashMap;
use tracing::{error, info, warn};

/// Sends the reminders that are due at the time of the run.
///
/// Every due reminder is claimed in the store before it is handed to the
/// notifier, so a reminder is delivered at most once per schedule even when
/// runs overlap. A failing event never aborts the run.
#[derive(Debug)]
pub struct SendEventRemindersUseCase {}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchFailure {
    pub event_id: ID,
    pub message: String,
}

#[derive(Debug, Default, PartialEq)]
pub struct DispatchSummary {
    /// Reminders handed to the notifier
    pub sent: usize,
    /// Due reminders that were already dispatched
    pub skipped: usize,
    pub failed: Vec<DispatchFailure>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl DispatchSummary {
    fn fail(&mut self, event_id: &ID, message: String) {
        error!(
            "Failed to send reminder for event: {}. Error: {}",
            event_id, message
        );
        self.failed.push(DispatchFailure {
            event_id: event_id.clone(),
            message,
        });
    }
}

async fn find_owners(
    mut user_ids: Vec<ID>,
    ctx: &AgendaContext,
) -> anyhow::Result<HashMap<ID, User>> {
    user_ids.sort_by_key(|id| id.as_string());
    user_ids.dedup();
    let owners = ctx.repos.users.find_many(&user_ids).await?;
    Ok(owners.into_iter().map(|u| (u.id.clone(), u)).collect())
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendEventRemindersUseCase {
    type Response = DispatchSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "SendEventReminders";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let window = ctx.config.reminder_window;

        let candidates = ctx
            .repos
            .events
            .find_reminder_candidates(now, &window)
            .await
            .map_err(|e| {
                error!("Unable to fetch reminder candidates. Error: {:?}", e);
                UseCaseError::StorageError
            })?;
        let owners = find_owners(candidates.iter().map(|e| e.user_id.clone()).collect(), ctx)
            .await
            .map_err(|e| {
                error!("Unable to fetch the owners of the reminders. Error: {:?}", e);
                UseCaseError::StorageError
            })?;

        let mut summary = DispatchSummary::default();
        for event in candidates {
            if !event.is_reminder_due(&window, now) {
                continue;
            }
            let remind_at = match event.remind_at() {
                Some(remind_at) => remind_at,
                None => continue,
            };
            if event.is_reminder_sent() {
                summary.skipped += 1;
                continue;
            }
            let owner = match owners.get(&event.user_id) {
                Some(owner) => owner,
                None => {
                    summary.fail(&event.id, "Owner not found".into());
                    continue;
                }
            };

            match ctx.repos.events.claim_reminder(&event.id, remind_at).await {
                Ok(true) => (),
                Ok(false) => {
                    warn!(
                        "Reminder for event: {} was already claimed by another run",
                        event.id
                    );
                    summary.skipped += 1;
                    continue;
                }
                Err(e) => {
                    summary.fail(&event.id, e.to_string());
                    continue;
                }
            }

            let notification =
                EventReminderNotification::new(&event, owner, &ctx.config.app_base_url);
            match ctx.notifier.send(&notification).await {
                Ok(()) => {
                    info!(
                        "Reminder sent for event: {} to user: {}",
                        event.id, owner.id
                    );
                    summary.sent += 1;
                }
                Err(e) => {
                    if let Err(release_error) = ctx
                        .repos
                        .events
                        .release_reminder_claim(&event.id, remind_at, event.reminder_sent_for)
                        .await
                    {
                        error!(
                            "Unable to release the reminder claim of event: {}. Error: {:?}",
                            event.id, release_error
                        );
                    }
                    summary.fail(&event.id, e.to_string());
                }
            }
        }

        info!(
            "Event reminders processed. Sent: {}, skipped: {}, failed: {}",
            summary.sent,
            summary.skipped,
            summary.failed.len()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use agenda_domain::{CalendarEvent, EventReminder, MINUTE_MILLIS};
    use agenda_infra::{InMemoryReminderNotifier, StaticTimeSys};
    use std::sync::Arc;

    const NOW: i64 = 1_700_000_040_000;

    struct TestContext {
        ctx: AgendaContext,
        notifier: Arc<InMemoryReminderNotifier>,
        user: User,
    }

    async fn setup() -> TestContext {
        let mut ctx = AgendaContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys { timestamp: NOW });
        let notifier = Arc::new(InMemoryReminderNotifier::new());
        ctx.notifier = notifier.clone();
        let user = User::new("Jane".into(), "jane@example.com".into(), None, 0);
        ctx.repos.users.insert(&user).await.unwrap();
        TestContext {
            ctx,
            notifier,
            user,
        }
    }

    async fn insert(
        ctx: &AgendaContext,
        user_id: &ID,
        minutes_ahead: i64,
        reminder: Option<i64>,
    ) -> CalendarEvent {
        let mut event = CalendarEvent::new(
            user_id.clone(),
            format!("In {} minutes", minutes_ahead),
            NOW + minutes_ahead * MINUTE_MILLIS,
            0,
        );
        event.reminder = reminder.map(EventReminder::new);
        ctx.repos.events.insert(&event).await.unwrap();
        event
    }

    async fn run(ctx: &AgendaContext) -> DispatchSummary {
        let mut usecase = SendEventRemindersUseCase {};
        usecase.execute(ctx).await.unwrap()
    }

    #[actix_web::test]
    async fn fires_only_due_reminders() {
        let TestContext {
            ctx,
            notifier,
            user,
        } = setup().await;
        let due = insert(&ctx, &user.id, 30, Some(30)).await;
        // Not a candidate yet
        insert(&ctx, &user.id, 45, Some(30)).await;
        // A candidate that is not due yet
        insert(&ctx, &user.id, 25, Some(30)).await;
        insert(&ctx, &user.id, 20, None).await;
        insert(&ctx, &user.id, -5, Some(15)).await;

        let summary = run(&ctx).await;
        assert_eq!(summary.sent, 1);
        assert!(summary.failed.is_empty());

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].payload.event_id, due.id);
        assert_eq!(sent[0].recipient_email, "jane@example.com");
        assert_eq!(sent[0].subject, "Reminder: In 30 minutes starts soon");
    }

    #[actix_web::test]
    async fn fires_within_tolerance() {
        let TestContext {
            ctx,
            notifier,
            user,
        } = setup().await;
        let mut early = CalendarEvent::new(
            user.id.clone(),
            "Early".into(),
            NOW + 15 * MINUTE_MILLIS + MINUTE_MILLIS,
            0,
        );
        early.reminder = Some(EventReminder::new(15));
        ctx.repos.events.insert(&early).await.unwrap();
        let mut late = CalendarEvent::new(
            user.id.clone(),
            "Late".into(),
            NOW + 15 * MINUTE_MILLIS - MINUTE_MILLIS - 1,
            0,
        );
        late.reminder = Some(EventReminder::new(15));
        ctx.repos.events.insert(&late).await.unwrap();

        let summary = run(&ctx).await;
        assert_eq!(summary.sent, 1);
        assert_eq!(notifier.sent()[0].payload.event_id, early.id);
    }

    #[actix_web::test]
    async fn fires_reminders_longer_than_lookahead() {
        let TestContext {
            ctx,
            notifier,
            user,
        } = setup().await;
        let day_before = insert(&ctx, &user.id, 1440, Some(1440)).await;
        let two_hours = insert(&ctx, &user.id, 120, Some(120)).await;

        let summary = run(&ctx).await;
        assert_eq!(summary.sent, 2);
        let ids = notifier
            .sent()
            .into_iter()
            .map(|n| n.payload.event_id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![two_hours.id, day_before.id]);
    }

    #[actix_web::test]
    async fn sends_each_reminder_once() {
        let TestContext {
            ctx,
            notifier,
            user,
        } = setup().await;
        let event = insert(&ctx, &user.id, 30, Some(30)).await;

        assert_eq!(run(&ctx).await.sent, 1);
        let summary = run(&ctx).await;
        assert_eq!(summary.sent, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(notifier.sent().len(), 1);

        let stored = ctx.repos.events.find(&event.id).await.unwrap();
        assert_eq!(stored.reminder_sent_for, event.remind_at());
    }

    #[actix_web::test]
    async fn isolates_failing_deliveries() {
        let TestContext {
            ctx,
            notifier,
            user,
        } = setup().await;
        let failing = insert(&ctx, &user.id, 30, Some(30)).await;
        let other = insert(&ctx, &user.id, 15, Some(15)).await;
        notifier.fail_for(&failing.id);

        let summary = run(&ctx).await;
        assert_eq!(summary.sent, 1);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].event_id, failing.id);
        assert_eq!(notifier.sent()[0].payload.event_id, other.id);

        // The claim is released so a later run can try again
        let stored = ctx.repos.events.find(&failing.id).await.unwrap();
        assert_eq!(stored.reminder_sent_for, None);
    }

    #[actix_web::test]
    async fn missing_owner_is_a_failure() {
        let TestContext {
            ctx,
            notifier,
            user,
        } = setup().await;
        let orphan = insert(&ctx, &ID::default(), 30, Some(30)).await;
        insert(&ctx, &user.id, 30, Some(30)).await;

        let summary = run(&ctx).await;
        assert_eq!(summary.sent, 1);
        assert_eq!(
            summary.failed,
            vec![DispatchFailure {
                event_id: orphan.id,
                message: "Owner not found".into()
            }]
        );
        assert_eq!(notifier.sent().len(), 1);
    }
}
