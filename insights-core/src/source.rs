//! The calendar data source seam.
//!
//! Anything that can list events for a date range and describe its color
//! palette can feed a report. The Google provider is the real
//! implementation; tests use an in-memory one.

use std::collections::HashMap;

use crate::date_range::DateRange;
use crate::event::Event;

#[allow(async_fn_in_trait)]
pub trait EventSource {
    type Error;

    /// Events overlapping `range` (start of the first day up to the end of
    /// the last day, UTC+8), ordered by start time, recurring events
    /// expanded into single occurrences.
    async fn list_events(&self, range: &DateRange) -> Result<Vec<Event>, Self::Error>;

    /// The source's event color identifiers mapped to background hex codes.
    async fn event_colors(&self) -> Result<HashMap<String, String>, Self::Error>;
}
