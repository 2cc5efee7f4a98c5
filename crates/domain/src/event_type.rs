use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Color used for unknown or legacy event type values
pub const DEFAULT_EVENT_TYPE_COLOR: &str = "gray";

/// The category of a `CalendarEvent`
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Personal,
    Work,
    Social,
    Family,
}

impl Default for EventType {
    fn default() -> Self {
        Self::Personal
    }
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::Personal,
        EventType::Work,
        EventType::Social,
        EventType::Family,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Social => "social",
            Self::Family => "family",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Personal => "Personal",
            Self::Work => "Work",
            Self::Social => "Social",
            Self::Family => "Family",
        }
    }

    /// Semantic color of the badge shown in the admin table and detail view
    pub fn badge_color(&self) -> &'static str {
        match self {
            Self::Personal => "info",
            Self::Work => "danger",
            Self::Social => "warning",
            Self::Family => "success",
        }
    }

    /// Color tag of the dot shown next to the event in the dashboard calendar
    pub fn calendar_color(&self) -> &'static str {
        match self {
            Self::Personal => "blue",
            Self::Work => "green",
            Self::Social => "purple",
            Self::Family => "orange",
        }
    }

    /// Resolves the calendar color of a raw stored value.
    /// Anything that is not a known event type gets the default color.
    pub fn calendar_color_of(value: &str) -> &'static str {
        value
            .parse::<EventType>()
            .map(|t| t.calendar_color())
            .unwrap_or(DEFAULT_EVENT_TYPE_COLOR)
    }

    /// Resolves the badge color of a raw stored value
    pub fn badge_color_of(value: &str) -> &'static str {
        value
            .parse::<EventType>()
            .map(|t| t.badge_color())
            .unwrap_or(DEFAULT_EVENT_TYPE_COLOR)
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid event type: {0}")]
pub struct InvalidEventTypeError(pub String);

impl FromStr for EventType {
    type Err = InvalidEventTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal" => Ok(Self::Personal),
            "work" => Ok(Self::Work),
            "social" => Ok(Self::Social),
            "family" => Ok(Self::Family),
            _ => Err(InvalidEventTypeError(s.to_string())),
        }
    }
}
