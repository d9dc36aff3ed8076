//! Report layout: header fields, section rules and fixed-width rows.
//!
//! Only the text lives here. The CLI decides how each piece is colored.

use crate::aggregate::{AggregateResult, CategoryStats};
use crate::date_range::DateRange;

/// Title line above the header fields.
pub const RESULTS_TITLE: &str = "========== Results ==========";

/// Width of the left-aligned category column.
pub const CATEGORY_COLUMN_WIDTH: usize = 20;

/// One of the five figures reported per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    TotalHours,
    DailyAverage,
    WeeklyAverage,
    MonthlyAverage,
    YearlyAverage,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::TotalHours,
        Metric::DailyAverage,
        Metric::WeeklyAverage,
        Metric::MonthlyAverage,
        Metric::YearlyAverage,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Metric::TotalHours => "Total hours spent",
            Metric::DailyAverage => "Daily average",
            Metric::WeeklyAverage => "Weekly average",
            Metric::MonthlyAverage => "Monthly average",
            Metric::YearlyAverage => "Yearly average",
        }
    }

    pub fn value(&self, stats: &CategoryStats) -> f64 {
        match self {
            Metric::TotalHours => stats.total_hours,
            Metric::DailyAverage => stats.daily_average,
            Metric::WeeklyAverage => stats.weekly_average,
            Metric::MonthlyAverage => stats.monthly_average,
            Metric::YearlyAverage => stats.yearly_average,
        }
    }
}

/// A titled list of formatted `category  hours` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub title: &'static str,
    pub rows: Vec<String>,
}

impl ReportSection {
    /// The `--------- Title ---------` line above the rows.
    pub fn rule(&self) -> String {
        format!("--------- {} ---------", self.title)
    }
}

/// Format one row: category padded to the column width, hours to 2 decimals.
pub fn format_row(category: &str, hours: f64) -> String {
    format!("{category:<width$} {hours:6.2} hours", width = CATEGORY_COLUMN_WIDTH)
}

/// Aggregated results for a period, ready to print.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub range: DateRange,
    pub result: AggregateResult,
}

impl Report {
    pub fn new(range: DateRange, result: AggregateResult) -> Self {
        Report { range, result }
    }

    /// Header fields as (label, value) pairs: From, To, Total days.
    pub fn header(&self) -> [(&'static str, String); 3] {
        [
            ("From: ", self.range.start().to_string()),
            ("To  : ", self.range.end().to_string()),
            ("Total days: ", self.range.total_days().to_string()),
        ]
    }

    /// The five sections: total hours, then daily/weekly/monthly/yearly averages.
    pub fn sections(&self) -> Vec<ReportSection> {
        Metric::ALL
            .iter()
            .map(|metric| ReportSection {
                title: metric.title(),
                rows: self
                    .result
                    .stats
                    .iter()
                    .map(|stats| format_row(stats.category.as_str(), metric.value(stats)))
                    .collect(),
            })
            .collect()
    }
}
