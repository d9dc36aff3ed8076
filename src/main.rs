mod commands;
mod prompt;
mod render;
mod utils;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gcal-insights")]
#[command(about = "See how much time you spend on each task in Google Calendar, sorted by event color")]
struct Cli {
    /// Period to analyze: a month (YYYY-MM) or a start date (YYYY-MM-DD). Prompted for if omitted.
    #[arg(long)]
    from: Option<String>,

    /// End date (YYYY-MM-DD) when --from is a start date
    #[arg(long)]
    to: Option<String>,

    /// Calendar to analyze (defaults to calendar_id from config, "primary" otherwise)
    #[arg(short, long)]
    calendar: Option<String>,

    /// Ask for the color -> category labels again and overwrite the saved ones
    #[arg(long)]
    remap: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    commands::report::run(commands::report::ReportArgs {
        from: cli.from,
        to: cli.to,
        calendar: cli.calendar,
        remap: cli.remap,
    })
    .await
}
