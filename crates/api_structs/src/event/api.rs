use crate::dtos::{CalendarEventDTO, MonthDTO};
use agenda_domain::{CalendarEvent, EventType, MonthCursor, Page, RecurrencePattern, ID};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventResponse {
    pub event: CalendarEventDTO,
}

impl CalendarEventResponse {
    pub fn new(event: CalendarEvent, tz: &Tz) -> Self {
        Self {
            event: CalendarEventDTO::new(event, tz),
        }
    }
}

/// A page of events together with the numbers needed to paginate further
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPageDTO {
    pub events: Vec<CalendarEventDTO>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub last_page: u32,
}

impl EventPageDTO {
    pub fn new(page: Page<CalendarEvent>, tz: &Tz) -> Self {
        let last_page = page.last_page();
        Self {
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            last_page,
            events: page
                .items
                .into_iter()
                .map(|e| CalendarEventDTO::new(e, tz))
                .collect(),
        }
    }
}

/// Tells a field that was explicitly set to `null` apart from a missing one
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

pub mod create_event {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub location: Option<String>,
        pub start_ts: i64,
        #[serde(default)]
        pub event_type: Option<EventType>,
        #[serde(default)]
        pub is_recurring: Option<bool>,
        #[serde(default)]
        pub recurrence_pattern: Option<RecurrencePattern>,
        /// Minutes before `start_ts`
        #[serde(default)]
        pub reminder: Option<i64>,
    }

    pub type APIResponse = CalendarEventResponse;
}

pub mod delete_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = CalendarEventResponse;
}

pub mod get_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = CalendarEventResponse;
}

pub mod update_event {
    use super::*;

    /// Fields that are left out are not changed. The optional fields of an
    /// event are cleared by setting them to `null`.
    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub title: Option<String>,
        #[serde(
            default,
            deserialize_with = "deserialize_some",
            skip_serializing_if = "Option::is_none"
        )]
        pub description: Option<Option<String>>,
        #[serde(
            default,
            deserialize_with = "deserialize_some",
            skip_serializing_if = "Option::is_none"
        )]
        pub location: Option<Option<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub start_ts: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub event_type: Option<EventType>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub is_recurring: Option<bool>,
        #[serde(
            default,
            deserialize_with = "deserialize_some",
            skip_serializing_if = "Option::is_none"
        )]
        pub recurrence_pattern: Option<Option<RecurrencePattern>>,
        #[serde(
            default,
            deserialize_with = "deserialize_some",
            skip_serializing_if = "Option::is_none"
        )]
        pub reminder: Option<Option<i64>>,
    }

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = CalendarEventResponse;
}

pub mod get_events {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        /// Comma separated list of `upcoming`, `today` and `thisMonth`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub scopes: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub event_type: Option<EventType>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub has_reminder: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub search: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub month: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub year: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub page: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub per_page: Option<u32>,
    }

    pub type APIResponse = EventPageDTO;
}

pub mod get_dashboard {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub month: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub year: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub search: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub page: Option<u32>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub month: u32,
        pub year: i32,
        pub month_name: String,
        pub previous: MonthDTO,
        pub next: MonthDTO,
        /// Events of the selected month matching the search
        pub events: EventPageDTO,
        pub today_events: Vec<CalendarEventDTO>,
        pub upcoming_events: Vec<CalendarEventDTO>,
    }

    impl APIResponse {
        pub fn new(
            cursor: MonthCursor,
            events: Page<CalendarEvent>,
            today_events: Vec<CalendarEvent>,
            upcoming_events: Vec<CalendarEvent>,
            tz: &Tz,
        ) -> Self {
            let previous = cursor.previous();
            let next = cursor.next();
            Self {
                month: cursor.month(),
                year: cursor.year(),
                month_name: cursor.month_name().to_string(),
                previous: MonthDTO {
                    month: previous.month(),
                    year: previous.year(),
                },
                next: MonthDTO {
                    month: next.month(),
                    year: next.year(),
                },
                events: EventPageDTO::new(events, tz),
                today_events: today_events
                    .into_iter()
                    .map(|e| CalendarEventDTO::new(e, tz))
                    .collect(),
                upcoming_events: upcoming_events
                    .into_iter()
                    .map(|e| CalendarEventDTO::new(e, tz))
                    .collect(),
            }
        }
    }
}

pub mod get_event_admin_schema {
    pub type APIResponse = crate::event::admin::EventAdminSchema;
}

#[cfg(test)]
mod tests {
    use super::update_event::RequestBody;

    #[test]
    fn update_body_tells_null_from_missing() {
        let body: RequestBody = serde_json::from_str(r#"{"reminder": null}"#).unwrap();
        assert_eq!(body.reminder, Some(None));
        assert_eq!(body.location, None);

        let body: RequestBody =
            serde_json::from_str(r#"{"reminder": 30, "location": "Home"}"#).unwrap();
        assert_eq!(body.reminder, Some(Some(30)));
        assert_eq!(body.location, Some(Some("Home".to_string())));

        let untouched = serde_json::to_string(&RequestBody::default()).unwrap();
        assert_eq!(untouched, "{}");
    }
}
