use crate::models::plant::{PlantVariant, Sun, Water};

pub const MATCH_SCORE: i32 = 1;
pub const CLASH_SCORE: i32 = -2;

/// Best and worst possible [`pair_score`].
pub const MAX_PAIR_SCORE: i32 = 2 * MATCH_SCORE;
pub const MIN_PAIR_SCORE: i32 = 2 * CLASH_SCORE;

fn sun_score(a: Sun, b: Sun) -> i32 {
    match (a, b) {
        _ if a == b => MATCH_SCORE,
        (Sun::Full, Sun::Shade) | (Sun::Shade, Sun::Full) => CLASH_SCORE,
        _ => 0,
    }
}

fn water_score(a: Water, b: Water) -> i32 {
    match (a, b) {
        _ if a == b => MATCH_SCORE,
        (Water::Low, Water::High) | (Water::High, Water::Low) => CLASH_SCORE,
        _ => 0,
    }
}

/// Growing-condition affinity of two neighbouring plants.
/// +1 per matching need (sun, water), -2 per opposite need, 0 otherwise.
pub fn pair_score(a: &PlantVariant, b: &PlantVariant) -> i32 {
    sun_score(a.sun, b.sun) + water_score(a.water, b.water)
}

/// True when neither need is opposite.
pub fn is_compatible(a: &PlantVariant, b: &PlantVariant) -> bool {
    sun_score(a.sun, b.sun) != CLASH_SCORE && water_score(a.water, b.water) != CLASH_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::builtin_catalog;

    fn get(id: &str) -> PlantVariant {
        builtin_catalog()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_else(|| panic!("Variant '{}' not found", id))
    }

    #[test]
    fn test_identical_needs_score_max() {
        // rose and peony: full sun, medium water
        assert_eq!(pair_score(&get("rose"), &get("peony")), MAX_PAIR_SCORE);
    }

    #[test]
    fn test_opposite_needs_score_min() {
        // lavender (full, low) next to hosta (shade, high)
        assert_eq!(pair_score(&get("lavender"), &get("hosta")), MIN_PAIR_SCORE);
        assert!(!is_compatible(&get("lavender"), &get("hosta")));
    }

    #[test]
    fn test_partial_match() {
        // rose (full, medium) and camellia (partial, medium): sun neutral, water match
        assert_eq!(pair_score(&get("rose"), &get("camellia")), MATCH_SCORE);
        assert!(is_compatible(&get("rose"), &get("camellia")));
    }

    #[test]
    fn test_compatibility_is_symmetric() {
        let ids = ["rose", "hosta", "lavender", "fern", "hydrangea"];
        for a in ids {
            for b in ids {
                assert_eq!(pair_score(&get(a), &get(b)), pair_score(&get(b), &get(a)));
                assert_eq!(is_compatible(&get(a), &get(b)), is_compatible(&get(b), &get(a)));
            }
        }
    }
}
