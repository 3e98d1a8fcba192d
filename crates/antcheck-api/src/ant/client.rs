use std::time::Duration;

use reqwest::Client;
use tracing::{debug, error};

use super::error::AntError;
use super::types::{SearchResponse, TorrentCandidate};
use crate::limit::RateGate;
use crate::retry::{retry_async, RetryConfig};
use crate::traits::CatalogSearch;

/// Status codes worth retrying: the tracker occasionally serves these
/// during load spikes and recovers within seconds.
const TRANSIENT_STATUSES: &[u16] = &[500, 502, 503, 504];

/// ANT search API client.
///
/// Every request passes through one [`RateGate`], so the whole batch is
/// serialized to the tracker's allowed rate no matter who calls.
pub struct AntClient {
    api_key: String,
    base_url: String,
    http: Client,
    gate: RateGate,
    retry: RetryConfig,
}

impl AntClient {
    pub fn new(api_key: String, base_url: String, search_interval: Duration) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
            gate: RateGate::new(search_interval),
            retry: RetryConfig::default(),
        }
    }

    /// One rate-limited, retried search request. `q` is either a title or
    /// a TMDB identifier; the endpoint treats both the same way.
    async fn search(&self, q: &str) -> Result<Vec<TorrentCandidate>, AntError> {
        let result = retry_async(&self.retry, || self.request(q), is_transient).await;

        if let Err(err) = &result {
            log_hints(err);
        }
        result
    }

    async fn request(&self, q: &str) -> Result<Vec<TorrentCandidate>, AntError> {
        self.gate.wait().await;
        debug!(query = %q, "Querying ANT");

        let resp = self
            .http
            .get(&self.base_url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("q", q),
                ("t", "movie"),
                ("o", "json"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(AntError::Api { status, message });
        }

        let body = resp.text().await?;
        decode_body(&body)
    }
}

/// Decode a successful response body.
///
/// The tracker answers maintenance windows with 200 and a human-readable
/// page, which must not pass as "zero results", so that check comes before
/// the JSON decode.
fn decode_body(body: &str) -> Result<Vec<TorrentCandidate>, AntError> {
    if body.to_ascii_lowercase().contains("maintenance") {
        return Err(AntError::Maintenance);
    }
    match serde_json::from_str::<SearchResponse>(body) {
        Ok(envelope) => Ok(envelope.hits()),
        Err(err) => Err(AntError::Parse(err.to_string())),
    }
}

/// Whether a failed attempt is worth another try. Load-spike statuses and
/// connection-level transport failures clear within seconds; anything else
/// would repeat identically.
fn is_transient(err: &AntError) -> bool {
    match err {
        AntError::Api { status, .. } => TRANSIENT_STATUSES.contains(status),
        AntError::Http(e) => e.is_connect() || e.is_timeout(),
        _ => false,
    }
}

fn log_hints(err: &AntError) {
    match err {
        AntError::Api { status: 429, .. } => {
            error!("Rate limited by ANT. Try increasing search_interval_secs beyond 2.");
        }
        AntError::Api { status: 403, .. } => {
            error!("ANT rejected the request. The configured API key may be invalid.");
        }
        AntError::Maintenance => {
            error!("ANT is in maintenance mode, try again later.");
        }
        _ => {}
    }
}

impl CatalogSearch for AntClient {
    async fn search_title(&self, title: &str) -> Result<Vec<TorrentCandidate>, AntError> {
        self.search(title).await
    }

    async fn search_tmdb_id(&self, tmdb_id: u64) -> Result<Vec<TorrentCandidate>, AntError> {
        self.search(&tmdb_id.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_hit_envelope() {
        let body = r#"{
            "response": { "total": 1 },
            "item": [{ "guid": "https://example.invalid/torrent/1" }]
        }"#;
        let hits = decode_body(body).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].guid.as_deref(), Some("https://example.invalid/torrent/1"));
    }

    #[test]
    fn maintenance_page_is_flagged_before_decoding() {
        let body = "<html><body>Down for MAINTENANCE, back soon.</body></html>";
        assert!(matches!(decode_body(body), Err(AntError::Maintenance)));
    }

    #[test]
    fn other_garbage_is_a_parse_error() {
        assert!(matches!(decode_body("<html>oops</html>"), Err(AntError::Parse(_))));
    }

    #[test]
    fn server_load_statuses_are_transient() {
        for status in [500u16, 502, 503, 504] {
            assert!(is_transient(&AntError::Api {
                status,
                message: String::new()
            }));
        }
        assert!(!is_transient(&AntError::Api {
            status: 403,
            message: String::new()
        }));
        assert!(!is_transient(&AntError::Maintenance));
        assert!(!is_transient(&AntError::Parse("missing field".into())));
    }

    #[tokio::test]
    async fn connection_failures_are_transient() {
        // Nothing listens on the discard port, so the send fails at
        // connect time.
        let err = Client::new()
            .get("http://127.0.0.1:9/api.php")
            .send()
            .await
            .unwrap_err();
        assert!(is_transient(&AntError::Http(err)));
    }
}
