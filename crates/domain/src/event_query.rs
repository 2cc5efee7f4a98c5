use crate::{
    date::{current_month_span, day_span, month_span},
    event::CalendarEvent,
    event_type::EventType,
    shared::entity::ID,
    timespan::TimeSpan,
};
use chrono::{Datelike, NaiveDate, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

pub const PAGE_SIZE_OPTIONS: [u32; 3] = [10, 25, 50];
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Named filters over the events of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventScope {
    /// Starting now or later
    Upcoming,
    /// Starting on the current calendar day of the owner
    Today,
    /// Starting in the current calendar month of the owner
    ThisMonth,
}

impl EventScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Today => "today",
            Self::ThisMonth => "thisMonth",
        }
    }
}

impl Display for EventScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid event scope: {0}")]
pub struct InvalidEventScopeError(pub String);

impl FromStr for EventScope {
    type Err = InvalidEventScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "today" => Ok(Self::Today),
            "thisMonth" | "this_month" => Ok(Self::ThisMonth),
            _ => Err(InvalidEventScopeError(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid page size: {0}, expected one of 10, 25 or 50")]
pub struct InvalidPageSizeError(pub u32);

/// 1-based page number and page size of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Result<Self, InvalidPageSizeError> {
        let per_page = per_page.unwrap_or(DEFAULT_PAGE_SIZE);
        if !PAGE_SIZE_OPTIONS.contains(&per_page) {
            return Err(InvalidPageSizeError(per_page));
        }
        Ok(Self {
            page: page.unwrap_or(1).max(1),
            per_page,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.per_page as u64
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, pagination: &Pagination, total: u64) -> Self {
        Self {
            items,
            page: pagination.page(),
            per_page: pagination.per_page(),
            total,
        }
    }

    pub fn last_page(&self) -> u32 {
        let per_page = self.per_page.max(1) as u64;
        std::cmp::max(1, ((self.total + per_page - 1) / per_page) as u32)
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

/// A combination of filters over the events of one user.
///
/// Every time based filter narrows down a half-open `[start_ts, end_ts)`
/// window so that a store only has to evaluate one range, a type, a reminder
/// flag and a text search. Results are ordered by `start_ts` ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct EventQuery {
    pub user_id: ID,
    pub start_ts: Option<i64>,
    pub end_ts: Option<i64>,
    pub event_type: Option<EventType>,
    pub has_reminder: Option<bool>,
    pub search: Option<String>,
}

impl EventQuery {
    pub fn for_user(user_id: ID) -> Self {
        Self {
            user_id,
            start_ts: None,
            end_ts: None,
            event_type: None,
            has_reminder: None,
            search: None,
        }
    }

    fn restrict(mut self, span: TimeSpan) -> Self {
        self.start_ts = Some(match self.start_ts {
            Some(start_ts) => start_ts.max(span.start()),
            None => span.start(),
        });
        self.end_ts = Some(match self.end_ts {
            Some(end_ts) => end_ts.min(span.end()),
            None => span.end(),
        });
        self
    }

    pub fn scope(self, scope: EventScope, now: i64, tz: &Tz) -> Self {
        match scope {
            EventScope::Upcoming => self.upcoming(now),
            EventScope::Today => self.today(now, tz),
            EventScope::ThisMonth => self.this_month(now, tz),
        }
    }

    pub fn upcoming(mut self, now: i64) -> Self {
        self.start_ts = Some(self.start_ts.map_or(now, |start_ts| start_ts.max(now)));
        self
    }

    pub fn today(self, now: i64, tz: &Tz) -> Self {
        self.restrict(day_span(now, tz))
    }

    pub fn this_month(self, now: i64, tz: &Tz) -> Self {
        self.restrict(current_month_span(now, tz))
    }

    pub fn in_month(self, year: i32, month: u32, tz: &Tz) -> Self {
        self.restrict(month_span(year, month, tz))
    }

    pub fn in_year(self, year: i32, tz: &Tz) -> Self {
        let start = month_span(year, 1, tz).start();
        let end = month_span(year + 1, 1, tz).start();
        self.restrict(TimeSpan::new(start, end))
    }

    /// Month and year filters of a listing. A month without a year is
    /// resolved within the current year of the owner.
    pub fn in_period(self, year: Option<i32>, month: Option<u32>, now: i64, tz: &Tz) -> Self {
        match (year, month) {
            (Some(year), Some(month)) => self.in_month(year, month, tz),
            (Some(year), None) => self.in_year(year, tz),
            (None, Some(month)) => {
                let year = current_year(now, tz);
                self.in_month(year, month, tz)
            }
            (None, None) => self,
        }
    }

    pub fn by_type(mut self, event_type: EventType) -> Self {
        self.event_type = Some(event_type);
        self
    }

    pub fn with_reminder(mut self, has_reminder: bool) -> Self {
        self.has_reminder = Some(has_reminder);
        self
    }

    /// Blank search terms are ignored
    pub fn search(mut self, term: &str) -> Self {
        let term = term.trim();
        self.search = if term.is_empty() {
            None
        } else {
            Some(term.to_string())
        };
        self
    }

    /// Whether the window collapsed so that nothing can match
    pub fn is_empty_range(&self) -> bool {
        match (self.start_ts, self.end_ts) {
            (Some(start_ts), Some(end_ts)) => start_ts >= end_ts,
            _ => false,
        }
    }

    pub fn matches(&self, event: &CalendarEvent) -> bool {
        if event.user_id != self.user_id {
            return false;
        }
        if let Some(start_ts) = self.start_ts {
            if event.start_ts < start_ts {
                return false;
            }
        }
        if let Some(end_ts) = self.end_ts {
            if event.start_ts >= end_ts {
                return false;
            }
        }
        if let Some(event_type) = self.event_type {
            if event.event_type != event_type {
                return false;
            }
        }
        if let Some(has_reminder) = self.has_reminder {
            if event.reminder.is_some() != has_reminder {
                return false;
            }
        }
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let in_title = event.title.to_lowercase().contains(&term);
            let in_description = event
                .description
                .as_ref()
                .map(|d| d.to_lowercase().contains(&term))
                .unwrap_or(false);
            if !in_title && !in_description {
                return false;
            }
        }
        true
    }
}

fn current_year(now: i64, tz: &Tz) -> i32 {
    match chrono::Utc.timestamp_millis_opt(now).single() {
        Some(dt) => dt.with_timezone(tz).year(),
        None => NaiveDate::default().year(),
    }
}
