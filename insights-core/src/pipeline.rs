//! Fetch → resolve → aggregate.

use crate::aggregate::aggregate;
use crate::category::CategoryMapping;
use crate::date_range::DateRange;
use crate::report::Report;
use crate::source::EventSource;

/// Build the report for `range` from `source`, using the user's color labels.
///
/// Source failures are returned as-is: without events there is nothing to
/// report.
pub async fn run_report<S: EventSource>(
    source: &S,
    mapping: &CategoryMapping,
    range: DateRange,
) -> Result<Report, S::Error> {
    let events = source.list_events(&range).await?;
    let id_to_hex = source.event_colors().await?;

    tracing::info!(
        events = events.len(),
        colors = id_to_hex.len(),
        from = %range.start(),
        to = %range.end(),
        "fetched calendar data"
    );

    let color_ids = mapping.resolve_color_ids(&id_to_hex);
    let result = aggregate(&events, &color_ids, &range);

    Ok(Report::new(range, result))
}
