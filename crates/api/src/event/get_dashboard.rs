use super::get_events::find_page;
use crate::{
    error::AgendaError,
    shared::{
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use agenda_api_structs::get_dashboard::*;
use agenda_domain::{
    date::is_valid_year, CalendarEvent, EventQuery, MonthCursor, Page, Pagination, User,
    DEFAULT_PAGE_SIZE,
};
use agenda_infra::AgendaContext;

/// Number of upcoming events listed next to the calendar
pub const UPCOMING_EVENTS_LIMIT: u32 = 5;

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

pub async fn get_dashboard_controller(
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = Guard::against_missing_user(&path_params.user_id, &ctx).await?;
    let query_params = query_params.0;

    let usecase = GetDashboardUseCase {
        user,
        month: query_params.month,
        year: query_params.year,
        search: query_params.search,
        page: query_params.page,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse::new(
                res.cursor,
                res.events,
                res.today_events,
                res.upcoming_events,
                &res.user.timezone,
            ))
        })
        .map_err(handle_error)
}

/// The month calendar of a user together with the events of today
/// and the next upcoming events
#[derive(Debug)]
pub struct GetDashboardUseCase {
    pub user: User,
    /// Defaults to the current month of the user
    pub month: Option<u32>,
    /// Defaults to the current year of the user
    pub year: Option<i32>,
    pub search: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub cursor: MonthCursor,
    pub events: Page<CalendarEvent>,
    pub today_events: Vec<CalendarEvent>,
    pub upcoming_events: Vec<CalendarEvent>,
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidMonth(u32),
    InvalidYear(i32),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetDashboardUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetDashboard";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let tz = self.user.timezone;

        let current = MonthCursor::containing(now, &tz);
        let year = self.year.unwrap_or_else(|| current.year());
        if !is_valid_year(year) {
            return Err(UseCaseError::InvalidYear(year));
        }
        let month = self.month.unwrap_or_else(|| current.month());
        let cursor = MonthCursor::new(year, month).ok_or(UseCaseError::InvalidMonth(month))?;

        let mut month_query =
            EventQuery::for_user(self.user.id.clone()).in_month(cursor.year(), cursor.month(), &tz);
        if let Some(search) = &self.search {
            month_query = month_query.search(search);
        }
        // Page sizes are always valid here
        let pagination = Pagination::new(self.page, Some(DEFAULT_PAGE_SIZE)).unwrap_or_default();
        let events = find_page(&month_query, &pagination, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let today_query = EventQuery::for_user(self.user.id.clone()).today(now, &tz);
        let today_events = ctx
            .repos
            .events
            .find_by_query(&today_query, 0, None)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let upcoming_query = EventQuery::for_user(self.user.id.clone()).upcoming(now);
        let upcoming_events = ctx
            .repos
            .events
            .find_by_query(&upcoming_query, 0, Some(UPCOMING_EVENTS_LIMIT))
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes {
            cursor,
            events,
            today_events,
            upcoming_events,
            user: self.user.clone(),
        })
    }
}
