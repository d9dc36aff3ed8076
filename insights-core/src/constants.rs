//! Fixed values shared across gcal-insights.

/// Category used when an event's color has no label assigned.
pub const DEFAULT_CATEGORY: &str = "Work";

/// Reports are anchored to UTC+8 regardless of the machine's local timezone.
pub const REPORT_UTC_OFFSET_HOURS: i32 = 8;

/// Name of the directory under the platform config dir (e.g. ~/.config/gcal-insights).
pub const APP_DIR_NAME: &str = "gcal-insights";

/// Google's alias for the user's main calendar.
pub const DEFAULT_CALENDAR_ID: &str = "primary";
