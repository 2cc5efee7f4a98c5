use crate::date::{is_valid_month, month_name, month_span, to_datetime};
use crate::timespan::TimeSpan;
use chrono::Datelike;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// The month selected in the dashboard calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCursor {
    month: u32,
    year: i32,
}

impl MonthCursor {
    /// `None` when `month` is not in `1..=12`
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if is_valid_month(month) {
            Some(Self { month, year })
        } else {
            None
        }
    }

    /// The month containing `ts` in `tz`
    pub fn containing(ts: i64, tz: &Tz) -> Self {
        let date = to_datetime(ts, tz);
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                month: 1,
                year: self.year + 1,
            }
        } else {
            Self {
                month: self.month + 1,
                year: self.year,
            }
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                month: 12,
                year: self.year - 1,
            }
        } else {
            Self {
                month: self.month - 1,
                year: self.year,
            }
        }
    }

    pub fn span(&self, tz: &Tz) -> TimeSpan {
        month_span(self.year, self.month, tz)
    }
}
