//! Player status fetching for diagnostic display.
//!
//! BluOS players expose their state as XML on `/Status`. Only the handful of
//! fields the diagnostics actually print are modeled here.

use crate::error::{ClientError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const STATUS_ENDPOINT: &str = "/Status";
const FETCH_ATTEMPTS: usize = 3;
const RETRY_PAUSE: Duration = Duration::from_millis(500);
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Subset of the BluOS status document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayerStatus {
    /// Transport state: "play", "pause", "stop", "stream", "connecting"
    pub state: String,
    pub name: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub service: Option<String>,
    pub volume: Option<i32>,
}

impl PlayerStatus {
    /// One-line now-playing summary for diagnostic output.
    pub fn summary(&self) -> String {
        match (&self.name, &self.artist) {
            (Some(name), Some(artist)) => format!("{}: {} - {}", self.state, artist, name),
            (Some(name), None) => format!("{}: {}", self.state, name),
            _ => self.state.clone(),
        }
    }
}

/// Fetches the status document from one player.
#[derive(Debug, Clone)]
pub struct StatusClient {
    base_url: String,
    client: Client,
}

impl StatusClient {
    /// Creates a status client for a player base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    /// Fetches and parses the player's status document.
    pub async fn fetch_status(&self) -> Result<PlayerStatus> {
        let url = format!("{}{}", self.base_url, STATUS_ENDPOINT);
        let body = self.fetch_with_retry(&url).await?;
        let status = quick_xml::de::from_str(&body)?;
        Ok(status)
    }

    /// GETs `url`, retrying a bounded number of times with a short pause
    /// between attempts.
    async fn fetch_with_retry(&self, url: &str) -> Result<String> {
        let mut last_reason = String::new();

        for attempt in 1..=FETCH_ATTEMPTS {
            debug!(url = %url, attempt, "fetching");

            match self.client.get(url).timeout(FETCH_TIMEOUT).send().await {
                Ok(response) if response.status().is_success() => {
                    match response.text().await {
                        Ok(body) => return Ok(body),
                        Err(e) => last_reason = format!("read body: {e}"),
                    }
                }
                Ok(response) => last_reason = format!("status {}", response.status()),
                Err(e) => last_reason = e.to_string(),
            }

            if attempt < FETCH_ATTEMPTS {
                tokio::time::sleep(RETRY_PAUSE).await;
            }
        }

        Err(ClientError::Fetch {
            url: url.to_string(),
            attempts: FETCH_ATTEMPTS,
            reason: last_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_playing_status() {
        let xml = r#"<status etag="abcd">
            <album>Blue Train</album>
            <artist>John Coltrane</artist>
            <name>Moment's Notice</name>
            <service>Qobuz</service>
            <state>play</state>
            <volume>42</volume>
        </status>"#;

        let status: PlayerStatus = quick_xml::de::from_str(xml).unwrap();

        assert_eq!(status.state, "play");
        assert_eq!(status.artist.as_deref(), Some("John Coltrane"));
        assert_eq!(status.volume, Some(42));
        assert_eq!(
            status.summary(),
            "play: John Coltrane - Moment's Notice"
        );
    }

    #[test]
    fn test_parse_tolerates_missing_fields() {
        let xml = r#"<status><state>stop</state></status>"#;

        let status: PlayerStatus = quick_xml::de::from_str(xml).unwrap();

        assert_eq!(status.state, "stop");
        assert!(status.name.is_none());
        assert_eq!(status.summary(), "stop");
    }
}
