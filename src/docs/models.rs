//! Persisted document types.
//!
//! Field names are a contract with the site that renders these files:
//! everything serializes to the exact camelCase keys the components read.
//! Each record carries a flattened `extra` map so hand-curated fields the
//! providers know nothing about survive a merge round-trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `schedule.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    pub games: Vec<Game>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    /// Opponent display name as curated; the fuzzy-match key on every merge.
    pub opponent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opponent_id: Option<String>,
    pub date: Option<String>,
    pub venue: Option<String>,
    pub home: bool,
    #[serde(default)]
    pub conference: bool,
    pub result: Option<GameResult>,
    pub gt_score: Option<i64>,
    pub opp_score: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt_win_probability: Option<i64>,
    /// Curated-only; no provider supplies it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_prediction: Option<Value>,
    /// Curated-only; no provider supplies it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matchup_summary: Option<String>,
    /// Linkage stamped by the schedule merge, consumed by opponent enrichment.
    #[serde(rename = "_espnId", skip_serializing_if = "Option::is_none")]
    pub espn_game_id: Option<String>,
    #[serde(rename = "_opponentEspnId", skip_serializing_if = "Option::is_none")]
    pub opponent_espn_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    W,
    L,
}

/// `opponents.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentsDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    pub opponents: Vec<Opponent>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opponent {
    pub id: String,
    pub name: String,
    /// Absent on fresh seeds; backfilled from schedule linkage on the first
    /// run that matches a game against this opponent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub espn_id: Option<String>,
    pub record: Option<TeamRecord>,
    pub ranking: Option<i64>,
    #[serde(default)]
    pub top_players: Vec<TopPlayer>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub wins: i64,
    pub losses: i64,
}

/// Replaced wholesale, never merged field-by-field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopPlayer {
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub note: String,
}

/// `roster.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    pub position_groups: Vec<PositionGroup>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionGroup {
    pub group: String,
    #[serde(default)]
    pub abbr: String,
    pub players: Vec<RosterPlayer>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterPlayer {
    pub name: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub year: String,
    /// Curated-only depth-chart slot (1 = starter).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<i64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub transfer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_from: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn is_false(b: &bool) -> bool {
    !b
}

/// `standings.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ap_poll: Vec<ApPollEntry>,
    #[serde(default)]
    pub acc_standings: Vec<StandingsEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApPollEntry {
    pub rank: i64,
    pub team: String,
    pub espn_id: String,
    #[serde(default)]
    pub record: String,
    pub points: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsEntry {
    pub team: String,
    pub espn_id: String,
    pub conf_wins: i64,
    pub conf_losses: i64,
    pub total_wins: i64,
    pub total_losses: i64,
    pub pct: f64,
}
