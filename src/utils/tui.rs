use dialoguer::console::Term;
use indicatif::{ProgressBar, ProgressStyle};

const RULE_WIDTH: usize = 80;

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/"])
        .template("{msg} {spinner}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Width for horizontal rules, capped so wide terminals don't get a wall of `=`.
pub fn rule_width() -> usize {
    Term::stdout()
        .size_checked()
        .map(|(_, cols)| usize::from(cols).min(RULE_WIDTH))
        .unwrap_or(RULE_WIDTH)
}
