//! Attaches pregame win probabilities to the merged schedule.
//!
//! Probability records are keyed by home/away team names; the curated
//! opponent name is matched against whichever side is populated, then the
//! probability for our side is selected by the game's own `home` flag.

use crate::data::WinProbability;
use crate::docs::models::ScheduleDoc;
use crate::merge::matcher::find_match;

pub fn apply_win_probabilities(mut doc: ScheduleDoc, probs: &[WinProbability]) -> ScheduleDoc {
    if probs.is_empty() {
        return doc;
    }

    for game in &mut doc.games {
        let Some(record) = find_match(&game.opponent, probs, |p| {
            p.away_team
                .as_deref()
                .or(p.home_team.as_deref())
                .unwrap_or("")
        }) else {
            continue;
        };

        let our_prob = if game.home {
            record.home_win_prob
        } else {
            record.away_win_prob
        }
        .unwrap_or(0.5);

        game.gt_win_probability = Some((our_prob * 100.0).round() as i64);
    }

    doc
}
