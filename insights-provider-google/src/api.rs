//! Calendar v3 REST calls: event listing and the event color palette.

use std::collections::HashMap;

use anyhow::{Context, Result};
use insights_core::date_range::DateRange;
use insights_core::event::Event;
use insights_core::source::EventSource;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

const API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Largest page the events endpoint allows.
const MAX_RESULTS: &str = "2500";

/// One Google calendar, read with an already-valid access token.
pub struct GoogleCalendar {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
    calendar_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventsPage {
    #[serde(default)]
    items: Vec<serde_json::Value>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ColorsResponse {
    #[serde(default)]
    event: HashMap<String, ColorDefinition>,
}

#[derive(Debug, Deserialize)]
struct ColorDefinition {
    background: String,
}

impl GoogleCalendar {
    pub fn new(access_token: impl Into<String>, calendar_id: impl Into<String>) -> Self {
        GoogleCalendar {
            http: reqwest::Client::new(),
            base_url: API_BASE.to_string(),
            access_token: access_token.into(),
            calendar_id: calendar_id.into(),
        }
    }

    /// Point at a different API root (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid API base URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("API base URL cannot have a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, &str)]) -> Result<T> {
        let response = self
            .http
            .get(url.clone())
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url.path()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Google Calendar API returned {}: {}", status, error_text);
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", url.path()))
    }

    /// Fetch every page of single (expanded) events in `[time_min, time_max)`.
    pub async fn fetch_events(&self, time_min: &str, time_max: &str) -> Result<Vec<Event>> {
        let url = self.endpoint(&["calendars", &self.calendar_id, "events"])?;
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("timeMin", time_min),
                ("timeMax", time_max),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
                ("maxResults", MAX_RESULTS),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let page: EventsPage = self
                .get_json(url.clone(), &query)
                .await
                .context("Failed to fetch events")?;

            tracing::debug!(items = page.items.len(), "fetched events page");
            events.extend(page.items.into_iter().filter_map(event_from_json));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(events)
    }

    /// Event color id → background hex.
    pub async fn fetch_colors(&self) -> Result<HashMap<String, String>> {
        let url = self.endpoint(&["colors"])?;
        let colors: ColorsResponse = self
            .get_json(url, &[])
            .await
            .context("Failed to fetch calendar colors")?;

        Ok(colors
            .event
            .into_iter()
            .map(|(id, color)| (id, color.background))
            .collect())
    }
}

impl EventSource for GoogleCalendar {
    type Error = anyhow::Error;

    async fn list_events(&self, range: &DateRange) -> Result<Vec<Event>> {
        let time_min = range.start_instant().to_rfc3339();
        let time_max = range.end_instant_exclusive().to_rfc3339();
        self.fetch_events(&time_min, &time_max).await
    }

    async fn event_colors(&self) -> Result<HashMap<String, String>> {
        self.fetch_colors().await
    }
}

/// Convert one API item. Cancelled events are dropped; items whose shape
/// doesn't fit keep their title and lose their times, so the aggregator
/// reports them instead of the whole page failing.
fn event_from_json(value: serde_json::Value) -> Option<Event> {
    if value.get("status").and_then(|s| s.as_str()) == Some("cancelled") {
        return None;
    }

    match serde_json::from_value::<Event>(value.clone()) {
        Ok(event) => Some(event),
        Err(e) => {
            let summary = value
                .get("summary")
                .and_then(|s| s.as_str())
                .map(str::to_string);
            tracing::warn!(summary = summary.as_deref().unwrap_or("Unknown"), "unreadable event: {e}");
            Some(Event {
                summary,
                ..Event::default()
            })
        }
    }
}
