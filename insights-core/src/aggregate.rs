//! Per-category time totals and averages.

use std::collections::HashMap;

use chrono::Duration;

use crate::category::Category;
use crate::date_range::DateRange;
use crate::event::{Event, EventIssue};

const DAYS_PER_WEEK: f64 = 7.0;
/// Fixed-length month, not calendar-accurate.
const DAYS_PER_MONTH: f64 = 30.0;
const DAYS_PER_YEAR: f64 = 365.0;

/// Time spent on one category over the reporting period.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStats {
    pub category: Category,
    pub total_hours: f64,
    pub daily_average: f64,
    pub weekly_average: f64,
    pub monthly_average: f64,
    pub yearly_average: f64,
}

impl CategoryStats {
    fn new(category: Category, total: Duration, days: f64) -> Self {
        let total_hours = total.num_milliseconds() as f64 / 1000.0 / 3600.0;

        CategoryStats {
            category,
            total_hours,
            daily_average: total_hours / days,
            weekly_average: total_hours / (days / DAYS_PER_WEEK),
            monthly_average: total_hours / (days / DAYS_PER_MONTH),
            yearly_average: total_hours / (days / DAYS_PER_YEAR),
        }
    }
}

/// Result of one aggregation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    /// Days the averages were divided by (never less than 1).
    pub total_days: i64,
    /// One entry per category, in the order categories were first seen.
    pub stats: Vec<CategoryStats>,
    /// Events that were skipped or adjusted.
    pub issues: Vec<EventIssue>,
}

impl AggregateResult {
    #[cfg(test)]
    pub fn get(&self, category: &str) -> Option<&CategoryStats> {
        self.stats.iter().find(|s| s.category.as_str() == category)
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

/// Sum event durations per category and derive averages over `range`.
///
/// Events whose color id is missing or not in `color_ids` count towards the
/// default category. An event whose times can't be interpreted contributes
/// nothing, but its category is still listed.
pub fn aggregate(
    events: &[Event],
    color_ids: &HashMap<String, Category>,
    range: &DateRange,
) -> AggregateResult {
    let mut totals: Vec<(Category, Duration)> = Vec::new();
    let mut issues = Vec::new();

    for event in events {
        let category = event
            .color_id
            .as_ref()
            .and_then(|id| color_ids.get(id))
            .cloned()
            .unwrap_or_else(Category::fallback);

        let index = match totals.iter().position(|(c, _)| *c == category) {
            Some(index) => index,
            None => {
                totals.push((category, Duration::zero()));
                totals.len() - 1
            }
        };

        match event.duration() {
            Ok((duration, adjustment)) => {
                totals[index].1 = totals[index].1 + duration;
                if let Some(issue) = adjustment {
                    tracing::warn!(event = event.display_name(), "{issue}");
                    issues.push(issue);
                }
            }
            Err(issue) => {
                tracing::warn!(event = event.display_name(), "{issue}");
                issues.push(issue);
            }
        }
    }

    let total_days = range.total_days().max(1);
    let days = total_days as f64;

    tracing::debug!(
        events = events.len(),
        categories = totals.len(),
        skipped = issues.len(),
        total_days,
        "aggregated events"
    );

    AggregateResult {
        total_days,
        stats: totals
            .into_iter()
            .map(|(category, total)| CategoryStats::new(category, total, days))
            .collect(),
        issues,
    }
}
