use super::create_event::non_blank;
use crate::{
    error::AgendaError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use agenda_api_structs::update_event::*;
use agenda_domain::{
    CalendarEvent, EventReminder, EventType, EventValidationError, RecurrencePattern, User, ID,
};
use agenda_infra::AgendaContext;

fn handle_error(e: UseCaseError) -> AgendaError {
    match e {
        UseCaseError::NotFound(event_id) => AgendaError::NotFound(format!(
            "The calendar event with id: {}, was not found.",
            event_id
        )),
        UseCaseError::InvalidEvent(e) => AgendaError::BadClientData(e.to_string()),
        UseCaseError::StorageError => AgendaError::InternalError,
    }
}

pub async fn update_event_controller(
    body: web::Json<RequestBody>,
    path_params: web::Path<PathParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let body = body.0;
    let usecase = UpdateEventUseCase {
        event_id: path_params.event_id.clone(),
        title: body.title,
        description: body.description,
        location: body.location,
        start_ts: body.start_ts,
        event_type: body.event_type,
        is_recurring: body.is_recurring,
        recurrence_pattern: body.recurrence_pattern,
        reminder: body.reminder,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.event, &res.owner.timezone)))
        .map_err(handle_error)
}

/// Partial update of an event. `None` leaves a field untouched while
/// `Some(None)` clears an optional field.
#[derive(Debug, Default)]
pub struct UpdateEventUseCase {
    pub event_id: ID,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub start_ts: Option<i64>,
    pub event_type: Option<EventType>,
    pub is_recurring: Option<bool>,
    pub recurrence_pattern: Option<Option<RecurrencePattern>>,
    pub reminder: Option<Option<i64>>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub event: CalendarEvent,
    pub owner: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidEvent(EventValidationError),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateEventUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateEvent";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let UpdateEventUseCase {
            event_id,
            title,
            description,
            location,
            start_ts,
            event_type,
            is_recurring,
            recurrence_pattern,
            reminder,
        } = self;

        let mut e = match ctx.repos.events.find(event_id).await {
            Some(event) => event,
            None => return Err(UseCaseError::NotFound(event_id.clone())),
        };
        let owner = match ctx.repos.users.find(&e.user_id).await {
            Some(owner) => owner,
            None => return Err(UseCaseError::NotFound(event_id.clone())),
        };

        if let Some(title) = title {
            e.title = title.clone();
        }
        if let Some(description) = description {
            e.description = non_blank(description.clone());
        }
        if let Some(location) = location {
            e.location = non_blank(location.clone());
        }
        if let Some(start_ts) = start_ts {
            e.start_ts = *start_ts;
        }
        if let Some(event_type) = event_type {
            e.event_type = *event_type;
        }
        if let Some(reminder) = reminder {
            e.reminder = reminder.map(EventReminder::new);
        }

        let is_recurring = is_recurring.unwrap_or(e.is_recurring);
        let pattern = match recurrence_pattern {
            Some(pattern) => *pattern,
            None => e.recurrence_pattern,
        };
        e.set_recurrence(is_recurring, pattern);

        e.validate().map_err(UseCaseError::InvalidEvent)?;

        // `reminder_sent_for` is left as is. It is keyed on the old reminder
        // time, so a new date or reminder is dispatched again.
        e.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .events
            .save(&e)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { event: e, owner })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use agenda_domain::MINUTE_MILLIS;

    const START: i64 = 1_700_000_000_000;

    async fn setup() -> (AgendaContext, CalendarEvent) {
        let ctx = AgendaContext::create_inmemory();
        let user = User::new("Jane".into(), "jane@example.com".into(), None, 0);
        ctx.repos.users.insert(&user).await.unwrap();
        let mut event = CalendarEvent::new(user.id.clone(), "Team Meeting".into(), START, 0);
        event.location = Some("Conference Room A".into());
        event.reminder = Some(EventReminder::new(30));
        event.set_recurrence(true, Some(RecurrencePattern::Weekly));
        ctx.repos.events.insert(&event).await.unwrap();
        (ctx, event)
    }

    #[actix_web::test]
    async fn updates_only_given_fields() {
        let (ctx, event) = setup().await;

        let mut usecase = UpdateEventUseCase {
            event_id: event.id.clone(),
            title: Some("Retro".into()),
            location: Some(None),
            ..Default::default()
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.event.title, "Retro");
        assert_eq!(res.event.location, None);
        assert_eq!(res.event.reminder, Some(EventReminder::new(30)));
        assert_eq!(res.event.recurrence_pattern, Some(RecurrencePattern::Weekly));

        let stored = ctx.repos.events.find(&event.id).await.unwrap();
        assert_eq!(stored.title, "Retro");
    }

    #[actix_web::test]
    async fn turning_off_recurrence_drops_pattern() {
        let (ctx, event) = setup().await;

        let mut usecase = UpdateEventUseCase {
            event_id: event.id.clone(),
            is_recurring: Some(false),
            ..Default::default()
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert!(!res.event.is_recurring);
        assert_eq!(res.event.recurrence_pattern, None);
    }

    #[actix_web::test]
    async fn rescheduling_makes_reminder_pending_again() {
        let (ctx, event) = setup().await;
        let remind_at = event.remind_at().unwrap();
        assert!(ctx
            .repos
            .events
            .claim_reminder(&event.id, remind_at)
            .await
            .unwrap());
        assert!(ctx.repos.events.find(&event.id).await.unwrap().is_reminder_sent());

        let mut usecase = UpdateEventUseCase {
            event_id: event.id.clone(),
            start_ts: Some(START + 60 * MINUTE_MILLIS),
            ..Default::default()
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.event.reminder_sent_for, Some(remind_at));
        assert!(!res.event.is_reminder_sent());
    }

    #[actix_web::test]
    async fn rejects_invalid_update() {
        let (ctx, event) = setup().await;

        let mut usecase = UpdateEventUseCase {
            event_id: event.id.clone(),
            title: Some("a".repeat(256)),
            ..Default::default()
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidEvent(EventValidationError::TitleTooLong(255))
        );
        let stored = ctx.repos.events.find(&event.id).await.unwrap();
        assert_eq!(stored.title, "Team Meeting");
    }
}
