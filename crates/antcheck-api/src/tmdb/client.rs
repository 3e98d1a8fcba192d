use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use super::error::TmdbError;
use super::types::{MovieHit, MovieListResponse};
use crate::limit::RateGate;
use crate::traits::MetadataLookup;

/// TMDB movie search client.
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    http: Client,
    gate: RateGate,
}

impl TmdbClient {
    pub fn new(api_key: String, base_url: String, request_interval: Duration) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
            gate: RateGate::new(request_interval),
        }
    }

    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, TmdbError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            Err(TmdbError::Api { status, message })
        }
    }
}

impl MetadataLookup for TmdbClient {
    async fn search_movie(
        &self,
        title: &str,
        year: Option<u32>,
    ) -> Result<Vec<MovieHit>, TmdbError> {
        self.gate.wait().await;
        debug!(query = %title, year, "Querying TMDB");

        let mut query = vec![
            ("api_key", self.api_key.clone()),
            ("query", title.to_string()),
        ];
        if let Some(year) = year {
            query.push(("year", year.to_string()));
        }

        let resp = self
            .http
            .get(format!("{}/search/movie", self.base_url))
            .query(&query)
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let body: MovieListResponse = resp
            .json()
            .await
            .map_err(|e| TmdbError::Parse(e.to_string()))?;

        Ok(body.results)
    }
}
