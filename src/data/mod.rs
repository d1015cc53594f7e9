pub mod cfbd;
pub mod espn;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::docs::models::{GameResult, TopPlayer};

/// One schedule entry as mapped from the scores provider.
/// Lives only for the duration of a run; discarded after the merge.
#[derive(Debug, Clone)]
pub struct ExternalGame {
    pub espn_id: String,
    /// `YYYY-MM-DD`, when the provider supplied a date.
    pub date: Option<String>,
    pub opponent: String,
    pub opponent_espn_id: Option<String>,
    pub home: bool,
    pub venue: Option<String>,
    pub result: Option<GameResult>,
    pub gt_score: Option<i64>,
    pub opp_score: Option<i64>,
    pub completed: bool,
}

/// Current record and ranking for one team.
#[derive(Debug, Clone, Copy)]
pub struct TeamSummary {
    pub wins: i64,
    pub losses: i64,
    pub ranking: Option<i64>,
}

/// Roster entry as fetched for our own team, overlaid onto the curated roster.
#[derive(Debug, Clone)]
pub struct ExternalPlayer {
    pub name: String,
    pub number: String,
    pub position: String,
    pub year: String,
}

/// Pregame win probability from the metrics provider, keyed by team names.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinProbability {
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub home_win_prob: Option<f64>,
    pub away_win_prob: Option<f64>,
}

/// One rankings collection (AP, Coaches, ...) from the scores provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollGroup {
    pub name: Option<String>,
    pub short_name: Option<String>,
    #[serde(default)]
    pub ranks: Vec<PollRank>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollRank {
    pub current: i64,
    pub team: Option<TeamRef>,
    pub record_summary: Option<String>,
    pub points: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub name: Option<String>,
}

/// One division of a conference standings response.
#[derive(Debug, Clone, Deserialize)]
pub struct Division {
    pub standings: Option<DivisionStandings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DivisionStandings {
    #[serde(default)]
    pub entries: Vec<StandingRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StandingRow {
    pub team: Option<TeamRef>,
    #[serde(default)]
    pub stats: Vec<StatPair>,
}

/// Named stat as the provider reports it; `type` scopes a stat to
/// conference-only flavors.
#[derive(Debug, Clone, Deserialize)]
pub struct StatPair {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: Option<f64>,
}

/// Per-team lookups the opponent enricher fans out over. A trait seam so
/// enrichment is testable without a live provider.
#[async_trait]
pub trait TeamProvider: Send + Sync {
    /// Current won-loss record and ranking, `None` when the provider has no
    /// summary for this team.
    async fn team_summary(&self, espn_id: &str) -> Result<Option<TeamSummary>>;

    /// Up to three notable players in the provider's feed order.
    async fn notable_players(&self, espn_id: &str) -> Result<Vec<TopPlayer>>;
}
