//! Core types for gcal-insights.
//!
//! This crate holds everything that doesn't talk to the network:
//! - `date_range` parses reporting periods
//! - `palette` and `category` turn event colors into user-defined categories
//! - `aggregate` sums event durations per category and derives averages
//! - `report` lays the result out as text sections
//! - `source` is the seam calendar providers implement, `pipeline` ties it together

pub mod aggregate;
pub mod category;
pub mod config;
pub mod constants;
pub mod date_range;
pub mod error;
pub mod event;
pub mod palette;
pub mod pipeline;
pub mod report;
pub mod source;

pub use aggregate::{AggregateResult, CategoryStats, aggregate};
pub use category::{Category, CategoryMapping};
pub use date_range::{DateRange, PeriodInput};
pub use error::{InsightsError, InsightsResult};
pub use event::{Event, EventBoundary, EventIssue};
pub use palette::PaletteColor;
pub use report::Report;
pub use source::EventSource;
