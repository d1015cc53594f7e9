//! Cross-provider entity resolution for team names.
//!
//! The two providers and the curated seed share no key space, so records are
//! aligned by normalized-name containment: "NC State" matches "North Carolina
//! State", "Wake Forest" matches "Wake Forest University". Containment is
//! checked both ways and the first match in source order wins, which can
//! misfire on short or nested names ("Miami" vs "Miami (OH)"). Callers
//! accept that in exchange for zero curation of alias tables.

/// Canonical comparison key: lowercase, letters only. Never persisted.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

/// First record whose normalized name contains, or is contained by, the
/// candidate's normalized name. `None` when nothing matches.
pub fn find_match<'a, T, F>(candidate: &str, records: &'a [T], name_of: F) -> Option<&'a T>
where
    F: Fn(&T) -> &str,
{
    let seed = normalize(candidate);
    records.iter().find(|record| {
        let ext = normalize(name_of(record));
        ext.contains(&seed) || seed.contains(&ext)
    })
}
