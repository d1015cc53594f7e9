//! Folds the fetched season schedule into the curated one.
//!
//! The curated game list is the authoritative set of fixtures: games are
//! never added or removed here, only overlaid field by field. Overlay rules:
//!
//! | field                       | rule                                          |
//! |-----------------------------|-----------------------------------------------|
//! | `date`, `venue`             | overlay only when the provider supplied one   |
//! | `result`, scores            | always taken from the matched record (a game  |
//! |                             | reverting to scheduled clears a stale result) |
//! | `_espnId`, `_opponentEspnId`| stamped for the enrichment stage              |
//! | everything else             | curated value untouched                       |

use chrono::{DateTime, Utc};

use crate::data::ExternalGame;
use crate::docs::models::ScheduleDoc;
use crate::merge::matcher::find_match;

pub fn merge_schedule(
    mut doc: ScheduleDoc,
    external: &[ExternalGame],
    now: DateTime<Utc>,
) -> ScheduleDoc {
    if external.is_empty() {
        return doc;
    }

    doc.last_updated = Some(now);

    for game in &mut doc.games {
        let Some(fetched) = find_match(&game.opponent, external, |g| g.opponent.as_str())
        else {
            continue;
        };

        if let Some(date) = &fetched.date {
            game.date = Some(date.clone());
        }
        if let Some(venue) = &fetched.venue {
            game.venue = Some(venue.clone());
        }
        game.result = fetched.result;
        game.gt_score = fetched.gt_score;
        game.opp_score = fetched.opp_score;
        game.espn_game_id = Some(fetched.espn_id.clone());
        game.opponent_espn_id = fetched.opponent_espn_id.clone();
    }

    doc
}
