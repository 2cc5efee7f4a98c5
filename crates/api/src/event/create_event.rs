use crate::error::AgendaError;
use crate::shared::{
    guard::Guard,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use agenda_api_structs::create_event::*;
use agenda_domain::{
    CalendarEvent, EventReminder, EventType, EventValidationError, RecurrencePattern, User,
};
use agenda_infra::AgendaContext;

pub async fn create_event_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = Guard::against_missing_user(&path_params.user_id, &ctx).await?;

    let body = body.0;
    let usecase = CreateEventUseCase {
        user,
        title: body.title,
        description: body.description,
        location: body.location,
        start_ts: body.start_ts,
        event_type: body.event_type.unwrap_or_default(),
        is_recurring: body.is_recurring.unwrap_or(false),
        recurrence_pattern: body.recurrence_pattern,
        reminder: body.reminder,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Created().json(APIResponse::new(res.event, &res.user.timezone))
        })
        .map_err(AgendaError::from)
}

#[derive(Debug)]
pub struct CreateEventUseCase {
    pub user: User,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_ts: i64,
    pub event_type: EventType,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<RecurrencePattern>,
    pub reminder: Option<i64>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub event: CalendarEvent,
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidEvent(EventValidationError),
    StorageError,
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEvent(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

/// Blank optional texts from forms are stored as missing
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEventUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEvent";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let mut e =
            CalendarEvent::new(self.user.id.clone(), self.title.clone(), self.start_ts, now);
        e.description = non_blank(self.description.clone());
        e.location = non_blank(self.location.clone());
        e.event_type = self.event_type;
        e.set_recurrence(self.is_recurring, self.recurrence_pattern);
        e.reminder = self.reminder.map(EventReminder::new);

        e.validate().map_err(UseCaseError::InvalidEvent)?;

        ctx.repos
            .events
            .insert(&e)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes {
            event: e,
            user: self.user.clone(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct TestContext {
        ctx: AgendaContext,
        user: User,
    }

    async fn setup() -> TestContext {
        let ctx = AgendaContext::create_inmemory();
        let user = User::new("Jane".into(), "jane@example.com".into(), None, 0);
        ctx.repos.users.insert(&user).await.unwrap();
        TestContext { ctx, user }
    }

    fn usecase(user: User) -> CreateEventUseCase {
        CreateEventUseCase {
            user,
            title: "Team Meeting".into(),
            description: Some("Weekly team sync meeting".into()),
            location: Some("  ".into()),
            start_ts: 1000 * 60 * 60,
            event_type: EventType::Work,
            is_recurring: false,
            recurrence_pattern: Some(RecurrencePattern::Weekly),
            reminder: Some(30),
        }
    }

    #[actix_web::test]
    async fn creates_event() {
        let TestContext { ctx, user } = setup().await;

        let mut usecase = usecase(user);
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.event.location, None);
        assert_eq!(res.event.recurrence_pattern, None);
        assert_eq!(res.event.reminder, Some(EventReminder::new(30)));
        assert!(ctx.repos.events.find(&res.event.id).await.is_some());
    }

    #[actix_web::test]
    async fn keeps_pattern_of_recurring_event() {
        let TestContext { ctx, user } = setup().await;

        let mut usecase = usecase(user);
        usecase.is_recurring = true;
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.event.recurrence_pattern, Some(RecurrencePattern::Weekly));
    }

    #[actix_web::test]
    async fn rejects_invalid_events() {
        let TestContext { ctx, user } = setup().await;

        let mut empty_title = usecase(user.clone());
        empty_title.title = " ".into();
        assert_eq!(
            empty_title.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidEvent(EventValidationError::EmptyTitle)
        );

        let mut long_description = usecase(user.clone());
        long_description.description = Some("a".repeat(1001));
        assert_eq!(
            long_description.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidEvent(EventValidationError::DescriptionTooLong(1000))
        );

        let mut odd_reminder = usecase(user);
        odd_reminder.reminder = Some(45);
        assert_eq!(
            odd_reminder.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidEvent(EventValidationError::InvalidReminder(45))
        );
    }
}
