use crate::{
    error::AgendaError,
    shared::{
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use agenda_api_structs::get_events::*;
use agenda_domain::{
    date::{is_valid_month, is_valid_year},
    CalendarEvent, EventQuery, EventScope, EventType, Page, Pagination, User,
};
use agenda_infra::AgendaContext;

fn handle_error(e: UseCaseError) -> AgendaError {
    match e {
        UseCaseError::InvalidMonth(month) => {
            AgendaError::BadClientData(format!("Invalid month: {}, expected 1 to 12", month))
        }
        UseCaseError::InvalidYear(year) => {
            AgendaError::BadClientData(format!("Invalid year: {}", year))
        }
        UseCaseError::StorageError => AgendaError::InternalError,
    }
}

/// Parses the comma separated `scopes` query parameter
fn parse_scopes(scopes: Option<&str>) -> Result<Vec<EventScope>, AgendaError> {
    match scopes {
        None => Ok(Vec::new()),
        Some(scopes) => scopes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<EventScope>()
                    .map_err(|e| AgendaError::BadClientData(e.to_string()))
            })
            .collect(),
    }
}

pub async fn get_events_controller(
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = Guard::against_missing_user(&path_params.user_id, &ctx).await?;
    let query_params = query_params.0;
    let scopes = parse_scopes(query_params.scopes.as_deref())?;
    let pagination = Pagination::new(query_params.page, query_params.per_page)
        .map_err(|e| AgendaError::BadClientData(e.to_string()))?;

    let usecase = GetEventsUseCase {
        user,
        scopes,
        event_type: query_params.event_type,
        has_reminder: query_params.has_reminder,
        search: query_params.search,
        month: query_params.month,
        year: query_params.year,
        pagination,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.events, &res.user.timezone)))
        .map_err(handle_error)
}

/// Scoped, filtered and paginated listing of the events of a user
#[derive(Debug)]
pub struct GetEventsUseCase {
    pub user: User,
    pub scopes: Vec<EventScope>,
    pub event_type: Option<EventType>,
    pub has_reminder: Option<bool>,
    pub search: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub pagination: Pagination,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub events: Page<CalendarEvent>,
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidMonth(u32),
    InvalidYear(i32),
    StorageError,
}

/// Runs the query for one page of events together with the total count
pub(crate) async fn find_page(
    query: &EventQuery,
    pagination: &Pagination,
    ctx: &AgendaContext,
) -> anyhow::Result<Page<CalendarEvent>> {
    if query.is_empty_range() {
        return Ok(Page::new(Vec::new(), pagination, 0));
    }
    let total = ctx.repos.events.count_by_query(query).await?;
    let events = ctx
        .repos
        .events
        .find_by_query(query, pagination.offset(), Some(pagination.per_page()))
        .await?;
    Ok(Page::new(events, pagination, total))
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventsUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvents";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        if let Some(month) = self.month {
            if !is_valid_month(month) {
                return Err(UseCaseError::InvalidMonth(month));
            }
        }
        if let Some(year) = self.year {
            if !is_valid_year(year) {
                return Err(UseCaseError::InvalidYear(year));
            }
        }

        let now = ctx.sys.get_timestamp_millis();
        let tz = self.user.timezone;
        let mut query = self
            .scopes
            .iter()
            .fold(EventQuery::for_user(self.user.id.clone()), |query, scope| {
                query.scope(*scope, now, &tz)
            })
            .in_period(self.year, self.month, now, &tz);
        if let Some(event_type) = self.event_type {
            query = query.by_type(event_type);
        }
        if let Some(has_reminder) = self.has_reminder {
            query = query.with_reminder(has_reminder);
        }
        if let Some(search) = &self.search {
            query = query.search(search);
        }

        let events = find_page(&query, &self.pagination, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes {
            events,
            user: self.user.clone(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use agenda_domain::{date::DAY_MILLIS, EventReminder};
    use agenda_infra::StaticTimeSys;
    use chrono::TimeZone;
    use chrono_tz::{America::New_York, UTC};
    use std::sync::Arc;

    // Mon Jan 15 2024 12:00:00 UTC
    const NOW: i64 = 1_705_320_000_000;

    struct TestContext {
        ctx: AgendaContext,
        user: User,
    }

    async fn setup(tz: chrono_tz::Tz) -> TestContext {
        let mut ctx = AgendaContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys { timestamp: NOW });
        let user = User::new("Jane".into(), "jane@example.com".into(), Some(tz), 0);
        ctx.repos.users.insert(&user).await.unwrap();
        TestContext { ctx, user }
    }

    async fn insert(ctx: &AgendaContext, user: &User, title: &str, start_ts: i64) {
        let event = CalendarEvent::new(user.id.clone(), title.into(), start_ts, 0);
        ctx.repos.events.insert(&event).await.unwrap();
    }

    fn usecase(user: User) -> GetEventsUseCase {
        GetEventsUseCase {
            user,
            scopes: Vec::new(),
            event_type: None,
            has_reminder: None,
            search: None,
            month: None,
            year: None,
            pagination: Pagination::default(),
        }
    }

    fn titles(page: &Page<CalendarEvent>) -> Vec<&str> {
        page.items.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn parses_scopes() {
        assert!(parse_scopes(None).unwrap().is_empty());
        assert_eq!(
            parse_scopes(Some("upcoming, thisMonth")).unwrap(),
            vec![EventScope::Upcoming, EventScope::ThisMonth]
        );
        assert!(parse_scopes(Some("upcoming,yesterday")).is_err());
    }

    #[actix_web::test]
    async fn today_scope_uses_owner_timezone() {
        let TestContext { ctx, user } = setup(New_York).await;
        // 23:59 and 00:01 of Jan 15 and Jan 16 in New York
        let late = New_York
            .with_ymd_and_hms(2024, 1, 15, 23, 59, 0)
            .unwrap()
            .timestamp_millis();
        let next_day = New_York
            .with_ymd_and_hms(2024, 1, 16, 0, 1, 0)
            .unwrap()
            .timestamp_millis();
        insert(&ctx, &user, "Late", late).await;
        insert(&ctx, &user, "Tomorrow", next_day).await;

        let mut usecase = usecase(user);
        usecase.scopes = vec![EventScope::Today];
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(titles(&res.events), vec!["Late"]);
    }

    #[actix_web::test]
    async fn combines_scopes_and_filters() {
        let TestContext { ctx, user } = setup(UTC).await;
        insert(&ctx, &user, "Past standup", NOW - DAY_MILLIS).await;
        let mut review =
            CalendarEvent::new(user.id.clone(), "Budget review".into(), NOW + DAY_MILLIS, 0);
        review.event_type = EventType::Work;
        review.reminder = Some(EventReminder::new(15));
        ctx.repos.events.insert(&review).await.unwrap();
        insert(&ctx, &user, "Next month", NOW + 20 * DAY_MILLIS).await;

        let mut upcoming_this_month = usecase(user.clone());
        upcoming_this_month.scopes = vec![EventScope::Upcoming, EventScope::ThisMonth];
        let res = upcoming_this_month.execute(&ctx).await.unwrap();
        assert_eq!(titles(&res.events), vec!["Budget review"]);

        let mut by_type = usecase(user.clone());
        by_type.event_type = Some(EventType::Work);
        by_type.has_reminder = Some(true);
        let res = by_type.execute(&ctx).await.unwrap();
        assert_eq!(res.events.total, 1);

        let mut search = usecase(user.clone());
        search.search = Some("BUDGET".into());
        let res = search.execute(&ctx).await.unwrap();
        assert_eq!(titles(&res.events), vec!["Budget review"]);

        let mut february = usecase(user);
        february.month = Some(2);
        february.year = Some(2024);
        let res = february.execute(&ctx).await.unwrap();
        assert_eq!(titles(&res.events), vec!["Next month"]);
    }

    #[actix_web::test]
    async fn paginates_in_ascending_order() {
        let TestContext { ctx, user } = setup(UTC).await;
        for i in (0..12).rev() {
            insert(&ctx, &user, &format!("Event {:02}", i), NOW + i * 1000).await;
        }

        let mut usecase = usecase(user);
        usecase.pagination = Pagination::new(Some(2), Some(10)).unwrap();
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(titles(&res.events), vec!["Event 10", "Event 11"]);
        assert_eq!(res.events.total, 12);
        assert_eq!(res.events.last_page(), 2);
    }

    #[actix_web::test]
    async fn rejects_invalid_month() {
        let TestContext { ctx, user } = setup(UTC).await;
        let mut usecase = usecase(user);
        usecase.month = Some(13);
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidMonth(13)
        );
    }
}
