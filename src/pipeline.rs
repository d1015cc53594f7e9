//! One full fetch-and-reconcile run.
//!
//! Stages run in a fixed order (schedule, probabilities, opponents, roster,
//! standings), each consuming the previous stage's output. A provider
//! failure degrades its own stage to a no-op and the run continues; only a
//! missing seed document aborts before any fetch. Documents already written
//! when a later stage fails stay written.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{AppConfig, Secrets};
use crate::data::cfbd::CfbdClient;
use crate::data::espn::EspnClient;
use crate::data::TeamProvider;
use crate::docs::models::{OpponentsDoc, RosterDoc, ScheduleDoc, StandingsDoc};
use crate::docs::store::DocumentStore;
use crate::merge::opponents::enrich_opponents;
use crate::merge::probability::apply_win_probabilities;
use crate::merge::roster::merge_roster;
use crate::merge::schedule::merge_schedule;
use crate::merge::standings::{ap_poll, assemble_standings, conference_standings};

pub const SCHEDULE_DOC: &str = "schedule.json";
pub const OPPONENTS_DOC: &str = "opponents.json";
pub const ROSTER_DOC: &str = "roster.json";
pub const STANDINGS_DOC: &str = "standings.json";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("required seed document '{0}' is missing or unreadable")]
    MissingSeed(&'static str),
}

pub struct Pipeline {
    config: AppConfig,
    espn: Arc<EspnClient>,
    cfbd: CfbdClient,
    store: DocumentStore,
}

impl Pipeline {
    pub fn new(config: AppConfig, secrets: &Secrets) -> Self {
        let espn = Arc::new(EspnClient::new(
            &config.providers.espn_base_url,
            &config.team.espn_id,
        ));
        let cfbd = CfbdClient::new(
            &config.providers.cfbd_base_url,
            secrets.cfbd_api_key.clone(),
        );
        let store = DocumentStore::new(config.store.data_dir.clone());

        Self {
            config,
            espn,
            cfbd,
            store,
        }
    }

    pub async fn run(&self, now: DateTime<Utc>) -> Result<()> {
        let season = self.config.season.year;

        // Seed documents. Schedule and opponents are the product's spine;
        // roster and standings may not exist yet for a fresh season.
        let schedule: ScheduleDoc = self
            .store
            .load(SCHEDULE_DOC)
            .ok_or(PipelineError::MissingSeed(SCHEDULE_DOC))?;
        let opponents: OpponentsDoc = self
            .store
            .load(OPPONENTS_DOC)
            .ok_or(PipelineError::MissingSeed(OPPONENTS_DOC))?;
        let roster: Option<RosterDoc> = self.store.load(ROSTER_DOC);
        let standings: Option<StandingsDoc> = self.store.load(STANDINGS_DOC);

        // 1. Season schedule from the scores provider.
        info!(season, "Fetching season schedule");
        let external_games = match self.espn.season_schedule(season).await {
            Ok(games) => games,
            Err(e) => {
                warn!(error = %e, "Schedule fetch failed — keeping curated schedule");
                Vec::new()
            }
        };
        let mut schedule = merge_schedule(schedule, &external_games, now);

        // 2. Pregame win probabilities.
        let probabilities = match self
            .cfbd
            .pregame_win_probabilities(season, &self.config.team.name)
            .await
        {
            Ok(probabilities) => probabilities,
            Err(e) => {
                warn!(error = %e, "Win probability fetch failed");
                Vec::new()
            }
        };
        schedule = apply_win_probabilities(schedule, &probabilities);

        // 3. Opponent records, rankings, and notable players. Concurrent,
        // with per-opponent failure isolation.
        info!(count = opponents.opponents.len(), "Enriching opponents");
        let provider: Arc<dyn TeamProvider> = self.espn.clone();
        let opponents = enrich_opponents(opponents, &schedule.games, provider, now).await;

        // 4. Our own roster, only when a curated roster document exists.
        let roster = match roster {
            Some(doc) => {
                let players = match self.espn.team_roster().await {
                    Ok(players) => players,
                    Err(e) => {
                        warn!(error = %e, "Roster fetch failed — keeping curated roster");
                        Vec::new()
                    }
                };
                Some(merge_roster(doc, &players, now))
            }
            None => None,
        };

        // 5. AP poll + conference standings.
        let poll = match self.espn.poll_rankings().await {
            Ok(groups) => ap_poll(&groups),
            Err(e) => {
                warn!(error = %e, "Rankings fetch failed");
                Vec::new()
            }
        };
        let conference = match self
            .espn
            .conference_standings(&self.config.team.conference_group_id, season)
            .await
        {
            Ok(divisions) => conference_standings(&divisions),
            Err(e) => {
                warn!(error = %e, "Standings fetch failed");
                Vec::new()
            }
        };
        let standings = assemble_standings(standings, poll, conference, now);

        // 6. Persist. No rollback across documents: whatever was written
        // before a failure stays written.
        self.store.save(SCHEDULE_DOC, &schedule)?;
        self.store.save(OPPONENTS_DOC, &opponents)?;
        if let Some(roster) = &roster {
            self.store.save(ROSTER_DOC, roster)?;
        }
        self.store.save(STANDINGS_DOC, &standings)?;

        info!("Run complete");
        Ok(())
    }
}
