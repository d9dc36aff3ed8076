use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use insights_core::config::AppConfig;
use insights_core::pipeline::run_report;
use insights_core::{CategoryMapping, DateRange, PeriodInput};
use owo_colors::OwoColorize;

use crate::prompt;
use crate::render::{self, Render};
use crate::utils::tui;

pub struct ReportArgs {
    pub from: Option<String>,
    pub to: Option<String>,
    pub calendar: Option<String>,
    pub remap: bool,
}

/// What `--from`/`--to` settle on their own.
#[derive(Debug, PartialEq)]
enum RangeArgs {
    Complete(DateRange),
    NeedsEnd(NaiveDate),
}

pub async fn run(args: ReportArgs) -> Result<()> {
    println!("{}", render::banner());
    println!("{}", render::intro(tui::rule_width()));

    let mut config = AppConfig::load().context("Failed to load config")?;
    if let Some(calendar) = args.calendar {
        config.calendar_id = calendar;
    }

    let categories_path = config.categories_path()?;
    let mapping = load_or_create_mapping(&categories_path, args.remap)?;

    let range = match args.from.as_deref() {
        Some(from) => match parse_range_args(from, args.to.as_deref())? {
            RangeArgs::Complete(range) => range,
            RangeArgs::NeedsEnd(start) => prompt::end_date(start)?,
        },
        None if args.to.is_some() => bail!("--to needs --from"),
        None => prompt::date_range()?,
    };
    tracing::debug!(
        from = %range.start(),
        to = %range.end(),
        calendar = %config.calendar_id,
        "report parameters resolved"
    );

    let calendar = insights_provider_google::connect(&config).await?;

    let spinner = tui::create_spinner(format!("Fetching events from {}", calendar.calendar_id()));
    let report = run_report(&calendar, &mapping, range).await;
    spinner.finish_and_clear();

    let report = report.context("Failed to fetch events")?;
    println!("{}", report.render());

    Ok(())
}

/// Reuse the saved labels unless asked to remap; otherwise prompt and save.
fn load_or_create_mapping(path: &Path, remap: bool) -> Result<CategoryMapping> {
    if !remap {
        if let Some(mapping) = CategoryMapping::load(path)? {
            println!(
                "{}",
                format!("[*] Using existing category mapping at '{}'.", path.display()).yellow()
            );
            return Ok(mapping);
        }
        println!("{}", "You do not have a category mapping yet.".yellow());
    }

    let mapping = prompt::category_mapping()?;
    mapping.save(path)?;
    println!("{}", format!("Saved category mapping to {}", path.display()).dimmed());
    Ok(mapping)
}

/// Flag values are not re-prompted: a bad value ends the run.
fn parse_range_args(from: &str, to: Option<&str>) -> Result<RangeArgs> {
    match (PeriodInput::parse(from)?, to) {
        (PeriodInput::Month(range), None) => Ok(RangeArgs::Complete(range)),
        (PeriodInput::Month(_), Some(_)) => {
            bail!("--to can only be used when --from is a date (YYYY-MM-DD)")
        }
        (PeriodInput::Start(_), Some(end)) => {
            Ok(RangeArgs::Complete(DateRange::from_args(from, end)?))
        }
        (PeriodInput::Start(start), None) => Ok(RangeArgs::NeedsEnd(start)),
    }
}
