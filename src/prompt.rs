//! Interactive questions: the reporting period and the color labels.
//!
//! Bad answers never end the run; the question is asked again.

use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;
use insights_core::date_range::parse_date;
use insights_core::{CategoryMapping, DateRange, InsightsResult, PaletteColor, PeriodInput};
use owo_colors::OwoColorize;

const PERIOD_PROMPT: &str = "Enter period (YYYY-MM) OR date range start (YYYY-MM-DD)";
const END_DATE_PROMPT: &str = "Please enter end date (YYYY-MM-DD)";

fn ask(prompt: &str) -> Result<String> {
    let answer: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?;
    Ok(answer)
}

/// Print a validation error and tell the caller to ask again.
/// Anything that isn't an input problem is passed on.
fn retry_on_input_error<T>(result: InsightsResult<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_input_error() => {
            eprintln!("{}", format!("{e}. Try again.").red());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Ask for a month or a start date (plus an end date) until a valid range is given.
/// An end date before the start date sends the user back to the first question.
pub fn date_range() -> Result<DateRange> {
    date_range_with(ask)
}

/// Ask only for the end date of a range whose start is already known.
pub fn end_date(start: NaiveDate) -> Result<DateRange> {
    end_date_with(start, ask)
}

fn date_range_with(mut answer: impl FnMut(&str) -> Result<String>) -> Result<DateRange> {
    loop {
        let first = answer(PERIOD_PROMPT)?;

        let Some(first) = retry_on_input_error(PeriodInput::parse(&first))? else {
            continue;
        };

        let range = match first {
            PeriodInput::Month(range) => Ok(range),
            PeriodInput::Start(start) => {
                let end = answer(END_DATE_PROMPT)?;
                parse_date(&end).and_then(|end| DateRange::new(start, end))
            }
        };

        if let Some(range) = retry_on_input_error(range)? {
            return Ok(range);
        }
    }
}

fn end_date_with(
    start: NaiveDate,
    mut answer: impl FnMut(&str) -> Result<String>,
) -> Result<DateRange> {
    loop {
        let end = answer(END_DATE_PROMPT)?;
        let range = parse_date(&end).and_then(|end| DateRange::new(start, end));
        if let Some(range) = retry_on_input_error(range)? {
            return Ok(range);
        }
    }
}

/// One question per palette color. Blank answers leave the color unassigned.
pub fn category_mapping() -> Result<CategoryMapping> {
    let mut mapping = CategoryMapping::new();

    for color in PaletteColor::all() {
        let label: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Enter category corresponding to '{}'", color))
            .allow_empty(true)
            .interact_text()?;
        mapping.assign(color, &label);
    }

    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Answers handed out in order, recording which prompt each one answered.
    struct Script {
        answers: VecDeque<&'static str>,
        prompts: Vec<String>,
    }

    impl Script {
        fn new(answers: &[&'static str]) -> Self {
            Script {
                answers: answers.iter().copied().collect(),
                prompts: Vec::new(),
            }
        }

        fn answer(&mut self, prompt: &str) -> Result<String> {
            self.prompts.push(prompt.to_string());
            self.answers
                .pop_front()
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("ran out of answers"))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_answer_needs_no_end_date() {
        let mut script = Script::new(&["2024-02"]);
        let range = date_range_with(|p| script.answer(p)).unwrap();
        assert_eq!(range, DateRange::new(date(2024, 2, 1), date(2024, 2, 29)).unwrap());
        assert_eq!(script.prompts, vec![PERIOD_PROMPT]);
    }

    #[test]
    fn test_end_before_start_restarts_from_first_question() {
        let mut script = Script::new(&["2024-01-20", "2024-01-10", "2024-01-01", "2024-01-05"]);
        let range = date_range_with(|p| script.answer(p)).unwrap();

        assert_eq!(range, DateRange::new(date(2024, 1, 1), date(2024, 1, 5)).unwrap());
        assert_eq!(
            script.prompts,
            vec![PERIOD_PROMPT, END_DATE_PROMPT, PERIOD_PROMPT, END_DATE_PROMPT]
        );
    }

    #[test]
    fn test_garbage_and_bad_month_are_asked_again() {
        let mut script = Script::new(&["soon", "2024-13", "2024-09"]);
        let range = date_range_with(|p| script.answer(p)).unwrap();
        assert_eq!(range.total_days(), 30);
        assert_eq!(script.prompts.len(), 3);
    }

    #[test]
    fn test_end_date_loops_until_valid() {
        let mut script = Script::new(&["2024-01-01", "not a date", "2024-01-31"]);
        let range = end_date_with(date(2024, 1, 10), |p| script.answer(p)).unwrap();
        assert_eq!(range, DateRange::new(date(2024, 1, 10), date(2024, 1, 31)).unwrap());
        assert_eq!(script.prompts, vec![END_DATE_PROMPT; 3]);
    }

    #[test]
    fn test_prompt_failure_ends_the_loop() {
        let mut script = Script::new(&["2024-01-20"]);
        assert!(date_range_with(|p| script.answer(p)).is_err());
    }
}
