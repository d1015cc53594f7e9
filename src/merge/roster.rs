//! Overlays fetched jersey numbers and class years onto the curated roster.
//!
//! Matching here is exact case-insensitive name equality, no fuzzing. The
//! curated depth chart (group structure, ordering, depth/transfer notes) is
//! the product; the provider only fills in the two fields it knows.

use chrono::{DateTime, Utc};

use crate::data::ExternalPlayer;
use crate::docs::models::RosterDoc;

pub fn merge_roster(
    mut doc: RosterDoc,
    external: &[ExternalPlayer],
    now: DateTime<Utc>,
) -> RosterDoc {
    if external.is_empty() {
        return doc;
    }

    doc.last_updated = Some(now);

    for group in &mut doc.position_groups {
        for player in &mut group.players {
            let Some(fetched) = external
                .iter()
                .find(|ep| ep.name.to_lowercase() == player.name.to_lowercase())
            else {
                continue;
            };

            if !fetched.number.is_empty() {
                player.number = fetched.number.clone();
            }
            if !fetched.year.is_empty() {
                player.year = fetched.year.clone();
            }
        }
    }

    doc
}
