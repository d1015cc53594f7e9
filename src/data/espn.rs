//! Scores-provider client (ESPN site API).
//!
//! Fetches the season schedule, per-team summaries, rosters, poll rankings,
//! and conference standings. Responses are deserialized into typed structs
//! and mapped to transient records; the merge stages never see raw JSON.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::data::{
    Division, ExternalGame, ExternalPlayer, PollGroup, TeamProvider, TeamSummary,
};
use crate::docs::models::{GameResult, TopPlayer};

pub struct EspnClient {
    client: reqwest::Client,
    base_url: String,
    team_id: String,
}

impl EspnClient {
    pub fn new(base_url: &str, team_id: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            team_id: team_id.to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request failed: {url}"))?
            .error_for_status()
            .with_context(|| format!("Non-success status from {url}"))?
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {url}"))
    }

    /// Our team's full season schedule, mapped to transient game records.
    pub async fn season_schedule(&self, season: u16) -> Result<Vec<ExternalGame>> {
        let url = format!(
            "{}/teams/{}/schedule?season={season}",
            self.base_url, self.team_id
        );
        let response: ScheduleResponse = self.get_json(&url).await?;

        Ok(response
            .events
            .iter()
            .filter_map(|event| self.map_event(event))
            .collect())
    }

    fn map_event(&self, event: &ScheduleEvent) -> Option<ExternalGame> {
        let comp = event.competitions.first()?;

        let us = comp
            .competitors
            .iter()
            .find(|c| c.id.as_deref() == Some(self.team_id.as_str()));
        let opp = comp
            .competitors
            .iter()
            .find(|c| c.id.as_deref() != Some(self.team_id.as_str()));

        let home = us
            .map(|c| c.home_away.as_deref() == Some("home"))
            .unwrap_or(false);
        let completed = comp
            .status
            .as_ref()
            .and_then(|s| s.kind.as_ref())
            .and_then(|k| k.completed)
            .unwrap_or(false);

        let (result, gt_score, opp_score) = match (completed, us, opp) {
            (true, Some(us), Some(opp)) => {
                let gt = us.score.as_ref().and_then(ScoreField::as_i64);
                let op = opp.score.as_ref().and_then(ScoreField::as_i64);
                let result = match (gt, op) {
                    (Some(gt), Some(op)) => {
                        Some(if gt > op { GameResult::W } else { GameResult::L })
                    }
                    _ => None,
                };
                (result, gt, op)
            }
            _ => (None, None, None),
        };

        let opp_team = opp.and_then(|c| c.team.as_ref());

        Some(ExternalGame {
            espn_id: event.id.clone(),
            date: event
                .date
                .as_deref()
                .map(|d| d.chars().take(10).collect()),
            opponent: opp_team
                .and_then(|t| t.display_name.clone())
                .unwrap_or_else(|| "TBD".to_string()),
            opponent_espn_id: opp_team.and_then(|t| t.id.clone()),
            home,
            venue: comp.venue.as_ref().and_then(|v| v.full_name.clone()),
            result,
            gt_score,
            opp_score,
            completed,
        })
    }

    /// Roster of our own team, flattened across position groups.
    pub async fn team_roster(&self) -> Result<Vec<ExternalPlayer>> {
        let url = format!("{}/teams/{}/roster", self.base_url, self.team_id);
        let response: RosterResponse = self.get_json(&url).await?;

        Ok(response
            .athletes
            .iter()
            .flat_map(|group| &group.items)
            .map(|athlete| ExternalPlayer {
                name: athlete.name(),
                number: athlete.jersey.clone().unwrap_or_default(),
                position: athlete.position_abbr(),
                year: athlete
                    .experience
                    .as_ref()
                    .and_then(|e| e.display_value.clone())
                    .unwrap_or_default(),
            })
            .collect())
    }

    /// Every published rankings collection; the standings assembler picks
    /// the AP poll out of these.
    pub async fn poll_rankings(&self) -> Result<Vec<PollGroup>> {
        let url = format!("{}/rankings", self.base_url);
        let response: RankingsResponse = self.get_json(&url).await?;
        Ok(response.rankings)
    }

    /// Standings divisions for one conference group.
    pub async fn conference_standings(&self, group: &str, season: u16) -> Result<Vec<Division>> {
        let url = format!("{}/standings?group={group}&season={season}", self.base_url);
        let response: StandingsResponse = self.get_json(&url).await?;
        Ok(response.children)
    }
}

#[async_trait]
impl TeamProvider for EspnClient {
    async fn team_summary(&self, espn_id: &str) -> Result<Option<TeamSummary>> {
        let url = format!("{}/teams/{espn_id}", self.base_url);
        let response: TeamResponse = self.get_json(&url).await?;

        let Some(team) = response.team else {
            return Ok(None);
        };

        let total = team
            .record
            .as_ref()
            .and_then(|r| r.items.iter().find(|i| i.kind.as_deref() == Some("total")));
        let stat = |name: &str| -> i64 {
            total
                .and_then(|t| t.stats.iter().find(|s| s.name.as_deref() == Some(name)))
                .and_then(|s| s.value)
                .map(|v| v as i64)
                .unwrap_or(0)
        };

        Ok(Some(TeamSummary {
            wins: stat("wins"),
            losses: stat("losses"),
            // rank 0 means unranked in this API
            ranking: team.rank.filter(|r| *r != 0),
        }))
    }

    async fn notable_players(&self, espn_id: &str) -> Result<Vec<TopPlayer>> {
        let url = format!("{}/teams/{espn_id}/roster", self.base_url);
        let response: RosterResponse = self.get_json(&url).await?;

        Ok(response
            .athletes
            .iter()
            .flat_map(|group| &group.items)
            .take(3)
            .map(|athlete| TopPlayer {
                name: athlete.name(),
                position: athlete.position_abbr(),
                note: athlete.description.clone().unwrap_or_default(),
            })
            .collect())
    }
}

// --- ESPN API Response Types ---

#[derive(Debug, Deserialize)]
struct ScheduleResponse {
    #[serde(default)]
    events: Vec<ScheduleEvent>,
}

#[derive(Debug, Deserialize)]
struct ScheduleEvent {
    id: String,
    date: Option<String>,
    #[serde(default)]
    competitions: Vec<EspnCompetition>,
}

#[derive(Debug, Deserialize)]
struct EspnCompetition {
    #[serde(default)]
    competitors: Vec<EspnCompetitor>,
    venue: Option<EspnVenue>,
    status: Option<EspnStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EspnCompetitor {
    id: Option<String>,
    home_away: Option<String>,
    score: Option<ScoreField>,
    team: Option<crate::data::TeamRef>,
}

/// The schedule endpoint reports scores either as a bare string or as an
/// object with a numeric `value`, depending on game state.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScoreField {
    Text(String),
    Number(f64),
    Detail { value: Option<f64> },
}

impl ScoreField {
    fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Text(s) => s.parse::<i64>().ok(),
            Self::Number(n) => Some(*n as i64),
            Self::Detail { value } => value.map(|v| v as i64),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EspnVenue {
    full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EspnStatus {
    #[serde(rename = "type")]
    kind: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize)]
struct EspnStatusType {
    completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct TeamResponse {
    team: Option<TeamDetail>,
}

#[derive(Debug, Deserialize)]
struct TeamDetail {
    record: Option<TeamRecordBlock>,
    rank: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TeamRecordBlock {
    #[serde(default)]
    items: Vec<RecordItem>,
}

#[derive(Debug, Deserialize)]
struct RecordItem {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    stats: Vec<crate::data::StatPair>,
}

#[derive(Debug, Deserialize)]
struct RosterResponse {
    #[serde(default)]
    athletes: Vec<AthleteGroup>,
}

#[derive(Debug, Deserialize)]
struct AthleteGroup {
    #[serde(default)]
    items: Vec<Athlete>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Athlete {
    display_name: Option<String>,
    full_name: Option<String>,
    jersey: Option<String>,
    description: Option<String>,
    position: Option<PositionRef>,
    experience: Option<ExperienceRef>,
}

impl Athlete {
    fn name(&self) -> String {
        self.display_name
            .clone()
            .or_else(|| self.full_name.clone())
            .unwrap_or_default()
    }

    fn position_abbr(&self) -> String {
        self.position
            .as_ref()
            .and_then(|p| p.abbreviation.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct PositionRef {
    abbreviation: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExperienceRef {
    display_value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RankingsResponse {
    #[serde(default)]
    rankings: Vec<PollGroup>,
}

#[derive(Debug, Deserialize)]
struct StandingsResponse {
    #[serde(default)]
    children: Vec<Division>,
}
