pub mod date;
mod dashboard;
mod event;
mod event_query;
mod event_type;
mod notification;
mod reminder;
mod shared;
mod timespan;
mod user;

pub use dashboard::MonthCursor;
pub use event::{
    CalendarEvent, EventValidationError, MAX_DESCRIPTION_LENGTH, MAX_LOCATION_LENGTH,
    MAX_TITLE_LENGTH,
};
pub use event_query::{
    EventQuery, EventScope, InvalidEventScopeError, InvalidPageSizeError, Page, Pagination,
    DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS,
};
pub use event_type::{EventType, InvalidEventTypeError, DEFAULT_EVENT_TYPE_COLOR};
pub use notification::{
    event_view_url, EventReminderNotification, EventReminderPayload, NotificationAction,
};
pub use reminder::{
    reminder_option_label, EventReminder, ReminderWindow, MINUTE_MILLIS, REMINDER_OPTIONS,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::recurrence::{InvalidRecurrencePatternError, RecurrencePattern};
pub use timespan::TimeSpan;
pub use user::{is_valid_email, User, MAX_USER_NAME_LENGTH};
