use serde::{Deserialize, Serialize};

/// A half-open interval of millisecond timestamps: `[start_ts, end_ts)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSpan {
    start_ts: i64,
    end_ts: i64,
}

impl TimeSpan {
    pub fn new(start_ts: i64, end_ts: i64) -> Self {
        Self { start_ts, end_ts }
    }

    pub fn start(&self) -> i64 {
        self.start_ts
    }

    pub fn end(&self) -> i64 {
        self.end_ts
    }

    pub fn contains(&self, ts: i64) -> bool {
        self.start_ts <= ts && ts < self.end_ts
    }

    /// The overlap of two spans, if any
    pub fn intersect(&self, other: &TimeSpan) -> Option<TimeSpan> {
        let start_ts = std::cmp::max(self.start_ts, other.start_ts);
        let end_ts = std::cmp::min(self.end_ts, other.end_ts);
        if start_ts < end_ts {
            Some(Self { start_ts, end_ts })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let span = TimeSpan::new(10, 20);
        assert!(span.contains(10));
        assert!(span.contains(19));
        assert!(!span.contains(20));
        assert!(!span.contains(9));
    }

    #[test]
    fn intersects_spans() {
        let a = TimeSpan::new(10, 20);
        assert_eq!(a.intersect(&TimeSpan::new(15, 30)), Some(TimeSpan::new(15, 20)));
        assert_eq!(a.intersect(&TimeSpan::new(20, 30)), None);
    }
}
