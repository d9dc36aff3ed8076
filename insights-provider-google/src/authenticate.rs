//! Interactive OAuth consent: open the browser, catch the redirect on
//! localhost, exchange the code for tokens.

use std::path::PathBuf;

use anyhow::{Context, Result};
use google_calendar::Client;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use crate::app_config::Credentials;
use crate::session::{Session, SessionData};

pub const SCOPES: &[&str] = &["https://www.googleapis.com/auth/calendar.readonly"];

pub fn redirect_uri(port: u16) -> String {
    format!("http://localhost:{}/callback", port)
}

pub fn redirect_address(port: u16) -> String {
    format!("127.0.0.1:{}", port)
}

/// Run the consent flow and persist the resulting session at `session_path`.
pub async fn authenticate(creds: &Credentials, port: u16, session_path: PathBuf) -> Result<Session> {
    let scopes: Vec<String> = SCOPES.iter().map(|s| s.to_string()).collect();

    let mut client = Client::new(
        creds.client_id.clone(),
        creds.client_secret.clone(),
        redirect_uri(port),
        String::new(),
        String::new(),
    );

    let auth_url = client.user_consent_url(&scopes);
    let expected_state = query_param(&auth_url, "state")?;

    eprintln!("\nOpen this URL in your browser to authenticate:\n");
    eprintln!("{}\n", auth_url);

    // Try to open the browser automatically
    if open::that(&auth_url).is_err() {
        eprintln!("(Could not open browser automatically, please copy the URL above)");
    }

    let (code, state) = wait_for_callback(port).await?;

    if expected_state.as_deref().is_some_and(|expected| expected != state) {
        anyhow::bail!("OAuth state mismatch - possible CSRF attack");
    }

    eprintln!("\nReceived authorization code, exchanging for tokens...");

    let access_token = client
        .get_access_token(&code, &state)
        .await
        .context("Failed to exchange authorization code for tokens")?;

    let session = Session::new(session_path, SessionData::from(&access_token));
    session.save()?;

    eprintln!("Authentication successful!");
    tracing::info!("stored new Google session");

    Ok(session)
}

fn query_param(url: &str, key: &str) -> Result<Option<String>> {
    let url = url::Url::parse(url).context("Invalid consent URL")?;
    Ok(url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.to_string()))
}

async fn wait_for_callback(port: u16) -> Result<(String, String)> {
    let listener = TcpListener::bind(redirect_address(port))
        .await
        .context("Failed to bind OAuth callback listener")?;

    let (stream, _) = listener
        .accept()
        .await
        .context("Failed to accept OAuth callback")?;

    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .await
        .context("Failed to read OAuth callback request line")?;

    let (code, state) = parse_callback(&request_line)?;

    // Send a response to the browser
    let response = "HTTP/1.1 200 OK\r\n\
        Content-Type: text/html\r\n\
        Connection: close\r\n\
        \r\n\
        <html><body>\
        <h1>Authentication successful!</h1>\
        <p>You can close this window and return to the terminal.</p>\
        </body></html>";

    let mut stream = reader.into_inner();
    stream
        .write_all(response.as_bytes())
        .await
        .context("Failed to write OAuth callback response")?;
    stream.flush().await?;

    Ok((code, state))
}

/// Pull `code` and `state` out of `GET /callback?code=...&state=... HTTP/1.1`.
fn parse_callback(request_line: &str) -> Result<(String, String)> {
    let url_part = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Invalid HTTP request"))?;

    let url = format!("http://localhost{}", url_part);

    if let Some(error) = query_param(&url, "error")? {
        anyhow::bail!("Authorization was denied: {}", error);
    }

    let code = query_param(&url, "code")?.ok_or_else(|| anyhow::anyhow!("No code in callback"))?;
    let state =
        query_param(&url, "state")?.ok_or_else(|| anyhow::anyhow!("No state in callback"))?;

    Ok((code, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_callback() {
        let (code, state) =
            parse_callback("GET /callback?state=xyz&code=4%2F0Ab&scope=calendar HTTP/1.1\r\n")
                .unwrap();
        assert_eq!(code, "4/0Ab");
        assert_eq!(state, "xyz");
    }

    #[test]
    fn test_parse_callback_denied() {
        let err = parse_callback("GET /callback?error=access_denied HTTP/1.1\r\n").unwrap_err();
        assert!(err.to_string().contains("access_denied"));
    }

    #[test]
    fn test_parse_callback_missing_code() {
        assert!(parse_callback("GET /callback?state=xyz HTTP/1.1\r\n").is_err());
        assert!(parse_callback("garbage").is_err());
    }

    #[test]
    fn test_redirect_uri_uses_port() {
        assert_eq!(redirect_uri(8085), "http://localhost:8085/callback");
        assert_eq!(redirect_address(9000), "127.0.0.1:9000");
    }
}
