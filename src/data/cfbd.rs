//! Win-probability provider client (CFBD metrics API).
//!
//! Requires a bearer credential; running without one is an expected
//! degradation where the probability stage simply has nothing to apply.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;

use crate::data::WinProbability;

pub struct CfbdClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl CfbdClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Pregame win probabilities for every modeled game of one team's season.
    /// Empty when no credential is configured.
    pub async fn pregame_win_probabilities(
        &self,
        season: u16,
        team: &str,
    ) -> Result<Vec<WinProbability>> {
        let Some(api_key) = &self.api_key else {
            warn!("CFBD_API_KEY not set — skipping win probability fetch");
            return Ok(Vec::new());
        };

        let url = format!(
            "{}/metrics/wp/pregame?year={season}&team={}",
            self.base_url,
            urlencoding::encode(team)
        );

        let probabilities: Vec<WinProbability> = self
            .client
            .get(&url)
            .bearer_auth(api_key)
            .send()
            .await
            .context("CFBD pregame request failed")?
            .error_for_status()
            .context("Non-success status from CFBD")?
            .json()
            .await
            .context("Failed to parse CFBD pregame response")?;

        Ok(probabilities)
    }
}
