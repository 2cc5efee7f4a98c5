mod base;
mod event;
mod status;
mod user;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use event::CalendarEventClient;
pub use event::{CreateEventInput, GetDashboardInput, GetEventsInput, UpdateEventInput};
use status::StatusClient;
use std::sync::Arc;
use user::UserClient;
pub use user::{CreateUserInput, UpdateUserInput};

pub use agenda_api_structs::admin::EventAdminSchema;
pub use agenda_api_structs::dtos::*;
pub use agenda_api_structs::{
    create_event, get_dashboard, get_events, update_event, update_user, EventPageDTO,
};
pub use agenda_domain::{EventScope, EventType, RecurrencePattern, ID, REMINDER_OPTIONS};

// Domain
pub use agenda_api_structs::dtos::CalendarEventDTO as CalendarEvent;
pub use agenda_api_structs::dtos::UserDTO as User;

/// Agenda Server SDK
///
/// The SDK contains methods for interacting with the Agenda server
/// API.
#[derive(Clone)]
pub struct AgendaSDK {
    pub event: CalendarEventClient,
    pub status: StatusClient,
    pub user: UserClient,
}

impl AgendaSDK {
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));
        let event = CalendarEventClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let user = UserClient::new(base);

        Self {
            event,
            status,
            user,
        }
    }
}
