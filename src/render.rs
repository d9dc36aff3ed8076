//! Colored terminal rendering for insights-core types.

use insights_core::report::{RESULTS_TITLE, ReportSection};
use insights_core::{EventIssue, Report};
use owo_colors::OwoColorize;

const LETTER_HEIGHT: usize = 6;

const G: [&str; LETTER_HEIGHT] = [
    "  _____ ",
    " / ____|",
    "| |  __ ",
    "| | |_ |",
    "| |__| |",
    " \\_____|",
];

const C: [&str; LETTER_HEIGHT] = [
    "   _____ ",
    "  / ____|",
    " | |     ",
    " | |     ",
    " | |____ ",
    "  \\_____|",
];

const A: [&str; LETTER_HEIGHT] = [
    "          ",
    "     /\\   ",
    "    /  \\  ",
    "   / /\\ \\ ",
    "  / ____ \\",
    " /_/    \\_\\",
];

const L: [&str; LETTER_HEIGHT] = [
    "  _      ",
    " | |     ",
    " | |     ",
    " | |     ",
    " | |____ ",
    " |______|",
];

const DASH: [&str; LETTER_HEIGHT] = [
    "         ",
    "         ",
    "  ______ ",
    " |______|",
    "         ",
    "         ",
];

const I: [&str; LETTER_HEIGHT] = [
    "  _____ ",
    " |_   _|",
    "   | |  ",
    "   | |  ",
    "  _| |_ ",
    " |_____|",
];

const INTRO: &str =
    "This program calculates how much time you have spent on a task in Google Calendar, sorted by color.";

/// "GCAL-I" in block letters, one color per letter.
pub fn banner() -> String {
    (0..LETTER_HEIGHT)
        .map(|i| {
            format!(
                "{}  {}  {}  {}  {}  {}",
                G[i].bright_blue(),
                C[i].bright_red(),
                A[i].bright_yellow(),
                L[i].bright_blue(),
                DASH[i].bright_white(),
                I[i].bright_green(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Intro line framed by horizontal rules.
pub fn intro(width: usize) -> String {
    let rule = "=".repeat(width);
    format!(
        "\n{}\n\n{}\n\n{}\n",
        rule.white(),
        INTRO.green(),
        rule.white()
    )
}

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventIssue {
    fn render(&self) -> String {
        format!("Warning: {self}").red().to_string()
    }
}

impl Render for ReportSection {
    fn render(&self) -> String {
        let mut lines = vec![self.rule().cyan().to_string()];
        lines.extend(self.rows.iter().cloned());
        lines.join("\n")
    }
}

impl Render for Report {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        for issue in &self.result.issues {
            lines.push(issue.render());
        }

        lines.push(String::new());
        lines.push(RESULTS_TITLE.green().to_string());
        for (label, value) in self.header() {
            lines.push(format!("{label}{}", value.yellow()));
        }

        if self.result.is_empty() {
            lines.push(String::new());
            lines.push("   No events found".dimmed().to_string());
            return lines.join("\n");
        }

        for section in self.sections() {
            lines.push(String::new());
            lines.push(section.render());
        }

        lines.join("\n")
    }
}
