//! Calendar events as delivered by an event source.
//!
//! Boundaries are kept in their wire shape (`dateTime` or `date` strings)
//! and only interpreted when a duration is asked for, so one malformed
//! event cannot spoil a whole fetch.

use chrono::{DateTime, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::date_range::anchor;

/// Display name used for events without a summary.
pub const UNKNOWN_EVENT_NAME: &str = "Unknown";

/// One boundary of an event: either a precise timestamp or a whole day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBoundary {
    /// RFC 3339 timestamp, e.g. `2024-09-02T09:00:00+08:00`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// Whole-day date, e.g. `2024-09-02`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl EventBoundary {
    pub fn timed(date_time: impl Into<String>) -> Self {
        EventBoundary {
            date_time: Some(date_time.into()),
            date: None,
        }
    }

    pub fn whole_day(date: impl Into<String>) -> Self {
        EventBoundary {
            date_time: None,
            date: Some(date.into()),
        }
    }
}

/// A calendar event (read-only, sourced externally).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub summary: Option<String>,
    /// The source's color identifier. `None` means the calendar's default color.
    #[serde(default)]
    pub color_id: Option<String>,
    #[serde(default)]
    pub start: EventBoundary,
    #[serde(default)]
    pub end: EventBoundary,
}

/// Problems with a single event. None of these stop a report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EventIssue {
    #[error("event '{summary}' has unsupported time format")]
    UnsupportedShape { summary: String },

    #[error("error processing event '{summary}': invalid {field} '{value}'")]
    Malformed {
        summary: String,
        field: &'static str,
        value: String,
    },

    #[error("event '{summary}' ends before it starts; counted as 0 hours")]
    NegativeDuration { summary: String },
}

impl Event {
    pub fn display_name(&self) -> &str {
        self.summary
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_EVENT_NAME)
    }

    /// Elapsed time of the event.
    ///
    /// Timed events count end − start. Whole-day events count
    /// (end − start) days, the end date being exclusive. Negative durations
    /// of either kind are clamped to zero and reported alongside the result.
    pub fn duration(&self) -> Result<(Duration, Option<EventIssue>), EventIssue> {
        match (&self.start, &self.end) {
            (
                EventBoundary {
                    date_time: Some(start),
                    ..
                },
                EventBoundary {
                    date_time: Some(end),
                    ..
                },
            ) => {
                let start = self.parse_timestamp("start dateTime", start)?;
                let end = self.parse_timestamp("end dateTime", end)?;
                Ok(self.clamp(end - start))
            }
            (
                EventBoundary {
                    date_time: None,
                    date: Some(start),
                },
                EventBoundary {
                    date_time: None,
                    date: Some(end),
                },
            ) => {
                let start = anchor(self.parse_day("start date", start)?);
                let end = anchor(self.parse_day("end date", end)?);
                Ok(self.clamp(Duration::days((end - start).num_days())))
            }
            _ => Err(EventIssue::UnsupportedShape {
                summary: self.display_name().to_string(),
            }),
        }
    }

    fn clamp(&self, elapsed: Duration) -> (Duration, Option<EventIssue>) {
        if elapsed < Duration::zero() {
            let issue = EventIssue::NegativeDuration {
                summary: self.display_name().to_string(),
            };
            return (Duration::zero(), Some(issue));
        }
        (elapsed, None)
    }

    fn parse_timestamp(
        &self,
        field: &'static str,
        value: &str,
    ) -> Result<DateTime<chrono::FixedOffset>, EventIssue> {
        DateTime::parse_from_rfc3339(value.trim()).map_err(|_| self.malformed(field, value))
    }

    fn parse_day(&self, field: &'static str, value: &str) -> Result<NaiveDate, EventIssue> {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| self.malformed(field, value))
    }

    fn malformed(&self, field: &'static str, value: &str) -> EventIssue {
        EventIssue::Malformed {
            summary: self.display_name().to_string(),
            field,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(start: EventBoundary, end: EventBoundary) -> Event {
        Event {
            summary: Some("Deep work".to_string()),
            color_id: None,
            start,
            end,
        }
    }

    #[test]
    fn test_timed_duration() {
        let e = event(
            EventBoundary::timed("2024-09-02T09:00:00+08:00"),
            EventBoundary::timed("2024-09-02T11:30:00+08:00"),
        );
        let (duration, issue) = e.duration().unwrap();
        assert_eq!(duration, Duration::minutes(150));
        assert_eq!(issue, None);
    }

    #[test]
    fn test_timed_duration_across_offsets() {
        let e = event(
            EventBoundary::timed("2024-09-02T01:00:00Z"),
            EventBoundary::timed("2024-09-02T10:00:00+08:00"),
        );
        assert_eq!(e.duration().unwrap().0, Duration::hours(1));
    }

    #[test]
    fn test_zero_length_timed_event() {
        let e = event(
            EventBoundary::timed("2024-09-02T09:00:00+08:00"),
            EventBoundary::timed("2024-09-02T09:00:00+08:00"),
        );
        assert_eq!(e.duration().unwrap(), (Duration::zero(), None));
    }

    #[test]
    fn test_negative_duration_is_clamped() {
        let e = event(
            EventBoundary::timed("2024-09-02T11:00:00+08:00"),
            EventBoundary::timed("2024-09-02T09:00:00+08:00"),
        );
        let (duration, issue) = e.duration().unwrap();
        assert_eq!(duration, Duration::zero());
        assert!(matches!(issue, Some(EventIssue::NegativeDuration { .. })));
    }

    #[test]
    fn test_single_whole_day_is_24_hours() {
        let e = event(
            EventBoundary::whole_day("2024-09-05"),
            EventBoundary::whole_day("2024-09-06"),
        );
        assert_eq!(e.duration().unwrap().0, Duration::hours(24));
    }

    #[test]
    fn test_multi_day_event_spans_month_boundary() {
        let e = event(
            EventBoundary::whole_day("2024-09-29"),
            EventBoundary::whole_day("2024-10-02"),
        );
        assert_eq!(e.duration().unwrap().0, Duration::days(3));
    }

    #[test]
    fn test_backwards_whole_day_event_is_clamped() {
        let e = event(
            EventBoundary::whole_day("2024-09-10"),
            EventBoundary::whole_day("2024-09-08"),
        );
        let (duration, issue) = e.duration().unwrap();
        assert_eq!(duration, Duration::zero());
        assert_eq!(
            issue,
            Some(EventIssue::NegativeDuration {
                summary: "Deep work".to_string()
            })
        );
    }

    #[test]
    fn test_mixed_shapes_are_unsupported() {
        let e = event(
            EventBoundary::timed("2024-09-02T09:00:00+08:00"),
            EventBoundary::whole_day("2024-09-03"),
        );
        assert!(matches!(
            e.duration(),
            Err(EventIssue::UnsupportedShape { .. })
        ));

        let empty = event(EventBoundary::default(), EventBoundary::default());
        assert!(matches!(
            empty.duration(),
            Err(EventIssue::UnsupportedShape { .. })
        ));
    }

    #[test]
    fn test_malformed_timestamp_names_the_event() {
        let e = event(
            EventBoundary::timed("2024-09-02T09:00:00+08:00"),
            EventBoundary::timed("half past nine"),
        );
        let err = e.duration().unwrap_err();
        assert_eq!(
            err.to_string(),
            "error processing event 'Deep work': invalid end dateTime 'half past nine'"
        );
    }

    #[test]
    fn test_display_name_defaults_to_unknown() {
        let mut e = event(EventBoundary::default(), EventBoundary::default());
        e.summary = None;
        assert_eq!(e.display_name(), "Unknown");
        e.summary = Some(String::new());
        assert_eq!(e.display_name(), "Unknown");
    }

    #[test]
    fn test_deserializes_api_shape() {
        let json = r#"{
            "summary": "Gym",
            "colorId": "11",
            "start": {"dateTime": "2024-09-02T18:00:00+08:00", "timeZone": "Asia/Taipei"},
            "end": {"dateTime": "2024-09-02T19:00:00+08:00"}
        }"#;
        let e: Event = serde_json::from_str(json).unwrap();
        assert_eq!(e.color_id.as_deref(), Some("11"));
        assert_eq!(e.duration().unwrap().0, Duration::hours(1));
    }
}
