//! Builds the AP poll and conference standings lists.
//!
//! Both lists are regenerated from scratch each run and replace the prior
//! lists wholesale, except that an empty fetch never overwrites previously
//! persisted data.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::data::{Division, PollGroup, StatPair, TeamRef};
use crate::docs::models::{ApPollEntry, StandingsDoc, StandingsEntry};

/// Pick the Associated Press poll out of the provider's rankings collections
/// and flatten it. Empty when no AP collection is published.
pub fn ap_poll(groups: &[PollGroup]) -> Vec<ApPollEntry> {
    let Some(poll) = groups.iter().find(|g| {
        g.name
            .as_deref()
            .is_some_and(|n| n.to_lowercase().contains("associated press"))
            || g.short_name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains("ap"))
    }) else {
        return Vec::new();
    };

    poll.ranks
        .iter()
        .map(|rank| ApPollEntry {
            rank: rank.current,
            team: team_name(rank.team.as_ref()),
            espn_id: team_id(rank.team.as_ref()),
            record: rank.record_summary.clone().unwrap_or_default(),
            points: rank.points,
        })
        .collect()
}

/// Flatten every division into one table sorted by conference win
/// percentage, total wins breaking ties.
pub fn conference_standings(divisions: &[Division]) -> Vec<StandingsEntry> {
    let mut teams = Vec::new();

    for division in divisions {
        let Some(standings) = &division.standings else {
            continue;
        };
        for entry in &standings.entries {
            let conf_wins = stat(&entry.stats, "wins", Some("conf"));
            let conf_losses = stat(&entry.stats, "losses", Some("conf"));
            let total_wins = stat(&entry.stats, "wins", None);
            let total_losses = stat(&entry.stats, "losses", None);

            let played = conf_wins + conf_losses;
            let pct = if played > 0 {
                conf_wins as f64 / played as f64
            } else {
                0.0
            };

            teams.push(StandingsEntry {
                team: team_name(entry.team.as_ref()),
                espn_id: team_id(entry.team.as_ref()),
                conf_wins,
                conf_losses,
                total_wins,
                total_losses,
                pct: (pct * 1000.0).round() / 1000.0,
            });
        }
    }

    teams.sort_by(|a, b| {
        b.pct
            .partial_cmp(&a.pct)
            .unwrap_or(Ordering::Equal)
            .then(b.total_wins.cmp(&a.total_wins))
    });
    teams
}

/// Assemble the standings document: fresh lists replace the prior ones
/// wholesale, empty lists leave them untouched.
pub fn assemble_standings(
    prior: Option<StandingsDoc>,
    ap_poll: Vec<ApPollEntry>,
    conference: Vec<StandingsEntry>,
    now: DateTime<Utc>,
) -> StandingsDoc {
    let mut doc = prior.unwrap_or_default();
    doc.last_updated = Some(now);
    if !ap_poll.is_empty() {
        doc.ap_poll = ap_poll;
    }
    if !conference.is_empty() {
        doc.acc_standings = conference;
    }
    doc
}

/// First stat with the given name, optionally constrained to a scope
/// (`type` in the provider's stat pairs). Missing stats read as 0.
fn stat(stats: &[StatPair], name: &str, scope: Option<&str>) -> i64 {
    stats
        .iter()
        .find(|s| {
            s.name.as_deref() == Some(name)
                && scope.map_or(true, |sc| s.kind.as_deref() == Some(sc))
        })
        .and_then(|s| s.value)
        .map(|v| v as i64)
        .unwrap_or(0)
}

fn team_name(team: Option<&TeamRef>) -> String {
    team.and_then(|t| t.display_name.clone().or_else(|| t.name.clone()))
        .unwrap_or_default()
}

fn team_id(team: Option<&TeamRef>) -> String {
    team.and_then(|t| t.id.clone()).unwrap_or_default()
}
