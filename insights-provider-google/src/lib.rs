//! insights-provider-google - Google Calendar event source for gcal-insights
//!
//! The provider manages its own credentials and tokens:
//!   ~/.config/gcal-insights/credentials.json   (OAuth client, user-provided)
//!   ~/.config/gcal-insights/session.toml       (token cache)

pub mod api;
pub mod app_config;
pub mod authenticate;
pub mod session;

use anyhow::Result;
use insights_core::config::AppConfig;

pub use api::GoogleCalendar;
use session::Session;

/// Produce a calendar handle with a valid access token.
///
/// A cached session is reused, refreshed when expired, and replaced by a new
/// interactive consent when it is missing or can't be refreshed.
pub async fn connect(config: &AppConfig) -> Result<GoogleCalendar> {
    let creds = app_config::load()?;
    let session_path = Session::default_path()?;

    let session = match Session::load(&session_path)? {
        Some(mut session) if session.is_expired() && session.has_refresh_token() => {
            match session.refresh(&creds).await {
                Ok(()) => session,
                Err(e) => {
                    tracing::warn!("refresh failed, re-authenticating: {e:#}");
                    authenticate::authenticate(&creds, config.redirect_port, session_path).await?
                }
            }
        }
        Some(session) if !session.is_expired() => session,
        _ => authenticate::authenticate(&creds, config.redirect_port, session_path).await?,
    };

    Ok(GoogleCalendar::new(
        session.access_token(),
        config.calendar_id.clone(),
    ))
}
