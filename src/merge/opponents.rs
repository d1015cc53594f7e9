//! Per-opponent enrichment: current record, ranking, and notable players.
//!
//! Every opponent is an independent unit of work; all of them are spawned
//! concurrently and the stage settles once each task has either produced an
//! enriched opponent or fallen back to the curated one. One opponent's
//! provider failure never touches its siblings.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::data::TeamProvider;
use crate::docs::models::{Game, Opponent, OpponentsDoc, TeamRecord};

pub async fn enrich_opponents(
    mut doc: OpponentsDoc,
    games: &[Game],
    provider: Arc<dyn TeamProvider>,
    now: DateTime<Utc>,
) -> OpponentsDoc {
    doc.last_updated = Some(now);

    let mut tasks = Vec::with_capacity(doc.opponents.len());
    for opponent in doc.opponents.drain(..) {
        // Prefer the id stamped on a matched schedule game this run; fall
        // back to whatever a previous run stored on the opponent.
        let linked_id = games
            .iter()
            .find(|g| g.opponent_id.as_deref() == Some(opponent.id.as_str()))
            .and_then(|g| g.opponent_espn_id.clone());

        let fallback = opponent.clone();
        let provider = Arc::clone(&provider);
        let handle = tokio::spawn(enrich_one(opponent, linked_id, provider));
        tasks.push((fallback, handle));
    }

    let mut enriched = Vec::with_capacity(tasks.len());
    for (fallback, handle) in tasks {
        match handle.await {
            Ok(opponent) => enriched.push(opponent),
            Err(e) => {
                warn!(opponent = %fallback.name, error = %e, "Enrichment task failed");
                enriched.push(fallback);
            }
        }
    }
    doc.opponents = enriched;

    doc
}

async fn enrich_one(
    mut opponent: Opponent,
    linked_id: Option<String>,
    provider: Arc<dyn TeamProvider>,
) -> Opponent {
    let Some(espn_id) = linked_id.or_else(|| opponent.espn_id.clone()) else {
        debug!(opponent = %opponent.name, "No external id resolved — skipping");
        return opponent;
    };

    debug!(opponent = %opponent.name, espn_id = %espn_id, "Fetching opponent record");
    let summary = match provider.team_summary(&espn_id).await {
        Ok(Some(summary)) => summary,
        Ok(None) => return opponent,
        Err(e) => {
            warn!(opponent = %opponent.name, error = %e, "Record fetch failed");
            return opponent;
        }
    };

    // Top players are replaced wholesale, and only when the curated set is
    // missing descriptive text somewhere. Never downgrade a richer set.
    if opponent.top_players.iter().any(|p| p.note.is_empty()) {
        match provider.notable_players(&espn_id).await {
            Ok(players) if !players.is_empty() => opponent.top_players = players,
            Ok(_) => {}
            Err(e) => {
                warn!(opponent = %opponent.name, error = %e, "Top player fetch failed");
            }
        }
    }

    opponent.record = Some(TeamRecord {
        wins: summary.wins,
        losses: summary.losses,
    });
    // An unranked response never clears a previously known ranking.
    opponent.ranking = summary.ranking.or(opponent.ranking);
    opponent.espn_id = Some(espn_id);

    opponent
}
