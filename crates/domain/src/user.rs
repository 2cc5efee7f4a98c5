use crate::shared::entity::{Entity, ID};
use chrono_tz::{Tz, UTC};

pub const MAX_USER_NAME_LENGTH: usize = 255;

/// The owner of `CalendarEvent`s and the recipient of their reminders
#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub email: String,
    /// Used to resolve calendar days and months and to format dates in notifications
    pub timezone: Tz,
    pub created: i64,
}

impl User {
    pub fn new(name: String, email: String, timezone: Option<Tz>, created: i64) -> Self {
        Self {
            id: Default::default(),
            name,
            email,
            timezone: timezone.unwrap_or(UTC),
            created,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Very loose check, delivery is what really validates an address
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        _ => false,
    }
}
