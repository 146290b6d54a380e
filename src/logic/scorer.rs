use std::collections::{BTreeSet, HashSet};

use crate::config::DEFAULT_TARGET_COVERAGE;
use crate::logic::compat::{pair_score, MAX_PAIR_SCORE, MIN_PAIR_SCORE};
use crate::logic::occupancy::{build_occupancy, build_ownership};
use crate::models::{
    garden::Garden,
    plant::{PlantCatalog, PlantVariant, Season},
    score::{LayoutScore, ScoreBreakdown},
};

pub const COVERAGE_WEIGHT: f64 = 30.0;
pub const DIVERSITY_WEIGHT: f64 = 20.0;
pub const SEASONAL_BLOOM_WEIGHT: f64 = 20.0;
pub const MAINTENANCE_WEIGHT: f64 = 15.0;
pub const ADJACENCY_WEIGHT: f64 = 15.0;

/// Coverage within this distance of the target earns full credit.
pub const COVERAGE_TOLERANCE: f64 = 0.05;

const MAX_MAINTENANCE: f64 = 5.0;
const MIN_MAINTENANCE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    pub target_coverage: f64,
    pub tolerance: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            target_coverage: DEFAULT_TARGET_COVERAGE,
            tolerance: COVERAGE_TOLERANCE,
        }
    }
}

pub fn score_layout(garden: &Garden, catalog: &PlantCatalog) -> LayoutScore {
    score_layout_with(garden, catalog, &ScoringConfig::default())
}

/// Five-factor score of a garden snapshot. Pure; each factor is defined (and
/// finite) for a garden without any plant.
pub fn score_layout_with(
    garden: &Garden,
    catalog: &PlantCatalog,
    config: &ScoringConfig,
) -> LayoutScore {
    let occupancy = build_occupancy(garden, catalog);
    let ids: Vec<&str> = garden.anchors().map(|(_, id)| id).collect();
    let known: Vec<&PlantVariant> = ids.iter().filter_map(|id| catalog.get(id)).collect();

    let breakdown = ScoreBreakdown {
        coverage: COVERAGE_WEIGHT * coverage_ratio(occupancy.coverage(), config),
        diversity: DIVERSITY_WEIGHT * diversity_ratio(&ids, catalog.len()),
        seasonal_bloom: SEASONAL_BLOOM_WEIGHT * bloom_ratio(&known, garden.season),
        maintenance: MAINTENANCE_WEIGHT * maintenance_ratio(&known),
        adjacency: ADJACENCY_WEIGHT * adjacency_ratio(garden, catalog),
    };
    LayoutScore {
        total: breakdown.sum().clamp(0.0, 100.0),
        breakdown,
    }
}

fn coverage_ratio(actual: f64, config: &ScoringConfig) -> f64 {
    let target = config.target_coverage.clamp(0.0, 1.0);
    let tolerance = config.tolerance.max(0.0);
    let deviation = (actual - target).abs();
    if deviation <= tolerance {
        return 1.0;
    }
    // Furthest reachable deviation from the target.
    let span = target.max(1.0 - target);
    if span <= tolerance {
        return 1.0;
    }
    ((span - deviation) / (span - tolerance)).clamp(0.0, 1.0)
}

fn diversity_ratio(ids: &[&str], catalog_size: usize) -> f64 {
    if ids.is_empty() {
        return 0.0;
    }
    let distinct = ids.iter().collect::<HashSet<_>>().len();
    let achievable = ids.len().min(catalog_size).max(1);
    (distinct as f64 / achievable as f64).min(1.0)
}

fn bloom_ratio(known: &[&PlantVariant], season: Season) -> f64 {
    if known.is_empty() {
        return 0.0;
    }
    let blooming = known.iter().filter(|v| v.blooms_in(season)).count();
    blooming as f64 / known.len() as f64
}

fn maintenance_ratio(known: &[&PlantVariant]) -> f64 {
    if known.is_empty() {
        return 0.0;
    }
    let mean = known.iter().map(|v| v.maintenance as f64).sum::<f64>() / known.len() as f64;
    ((MAX_MAINTENANCE - mean) / (MAX_MAINTENANCE - MIN_MAINTENANCE)).clamp(0.0, 1.0)
}

/// Unordered pairs of anchor indices (in `Garden::anchors` order) whose
/// footprints share at least one edge. Each pair appears once.
pub fn adjacent_pairs(garden: &Garden, catalog: &PlantCatalog) -> Vec<(usize, usize)> {
    let owners = build_ownership(garden, catalog);
    let mut pairs = BTreeSet::new();
    for row in 0..garden.rows {
        for col in 0..garden.cols {
            let Some(here) = owners[row][col] else {
                continue;
            };
            let right = owners[row].get(col + 1).copied().flatten();
            let below = owners.get(row + 1).and_then(|line| line[col]);
            for other in [right, below].into_iter().flatten() {
                if other != here {
                    pairs.insert((here.min(other), here.max(other)));
                }
            }
        }
    }
    pairs.into_iter().collect()
}

fn adjacency_ratio(garden: &Garden, catalog: &PlantCatalog) -> f64 {
    let anchors: Vec<&str> = garden.anchors().map(|(_, id)| id).collect();
    if anchors.is_empty() {
        return 0.0;
    }
    let scores: Vec<i32> = adjacent_pairs(garden, catalog)
        .into_iter()
        .filter_map(|(a, b)| {
            let left = catalog.get(anchors[a])?;
            let right = catalog.get(anchors[b])?;
            Some(pair_score(left, right))
        })
        .collect();
    if scores.is_empty() {
        // Nothing touches: neither reward nor penalty.
        return 0.5;
    }
    let mean = scores.iter().sum::<i32>() as f64 / scores.len() as f64;
    let range = (MAX_PAIR_SCORE - MIN_PAIR_SCORE) as f64;
    ((mean - MIN_PAIR_SCORE as f64) / range).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::builtin_catalog;
    use crate::logic::mutator::apply_placement;
    use crate::models::Coordinate;

    fn plant(garden: &Garden, catalog: &PlantCatalog, row: usize, col: usize, id: &str) -> Garden {
        apply_placement(garden, catalog, Some(Coordinate::new(row, col)), Some(id))
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_empty_garden_scores_are_defined() {
        let catalog = builtin_catalog().unwrap();
        let garden = Garden::new(5, 5, Season::Spring).unwrap();
        let score = score_layout(&garden, &catalog);
        let b = score.breakdown;
        for value in [score.total, b.coverage, b.diversity, b.seasonal_bloom, b.maintenance, b.adjacency] {
            assert!(value.is_finite());
            assert!(value >= 0.0);
        }
        assert_close(b.diversity, 0.0);
        assert_close(b.seasonal_bloom, 0.0);
        assert_close(b.maintenance, 0.0);
        assert_close(b.adjacency, 0.0);
    }

    #[test]
    fn test_single_spring_rose_blooms() {
        let catalog = builtin_catalog().unwrap();
        let garden = plant(&Garden::new(5, 5, Season::Spring).unwrap(), &catalog, 2, 2, "rose");
        let score = score_layout(&garden, &catalog);
        assert_close(score.breakdown.seasonal_bloom, SEASONAL_BLOOM_WEIGHT);
        assert_close(score.breakdown.diversity, DIVERSITY_WEIGHT);
        // Rose maintenance is 4: (5 - 4) / 4 of the weight.
        assert_close(score.breakdown.maintenance, MAINTENANCE_WEIGHT * 0.25);
        // A lone plant touches nothing.
        assert_close(score.breakdown.adjacency, ADJACENCY_WEIGHT * 0.5);
    }

    #[test]
    fn test_coverage_full_credit_near_target() {
        let config = ScoringConfig::default();
        assert_close(coverage_ratio(0.62, &config), 1.0);
        assert_close(coverage_ratio(0.66, &config), 1.0);
        assert_close(coverage_ratio(0.0, &config), 0.0);
        assert!(coverage_ratio(1.0, &config) < 1.0);
        assert!(coverage_ratio(0.3, &config) < coverage_ratio(0.5, &config));
    }

    #[test]
    fn test_coverage_penalises_overplanting() {
        let config = ScoringConfig {
            target_coverage: 0.5,
            tolerance: 0.0,
        };
        assert_close(coverage_ratio(1.0, &config), 0.0);
        assert_close(coverage_ratio(0.75, &config), 0.5);
    }

    #[test]
    fn test_monoculture_scores_lower_diversity() {
        let catalog = builtin_catalog().unwrap();
        let base = Garden::new(5, 5, Season::Summer).unwrap();
        let mut mono = base.clone();
        let mut mixed = base.clone();
        for (i, id) in ["rose", "tulip", "peony", "aster"].iter().enumerate() {
            mono = plant(&mono, &catalog, 0, i, "rose");
            mixed = plant(&mixed, &catalog, 0, i, id);
        }
        let mono_score = score_layout(&mono, &catalog).breakdown.diversity;
        let mixed_score = score_layout(&mixed, &catalog).breakdown.diversity;
        assert_close(mono_score, DIVERSITY_WEIGHT / 4.0);
        assert_close(mixed_score, DIVERSITY_WEIGHT);
    }

    #[test]
    fn test_low_maintenance_scores_higher() {
        let catalog = builtin_catalog().unwrap();
        let base = Garden::new(3, 3, Season::Summer).unwrap();
        let easy = plant(&base, &catalog, 0, 0, "lavender");
        let fussy = plant(&base, &catalog, 0, 0, "climbing-rose");
        assert_close(score_layout(&easy, &catalog).breakdown.maintenance, MAINTENANCE_WEIGHT);
        assert_close(score_layout(&fussy, &catalog).breakdown.maintenance, 0.0);
    }

    #[test]
    fn test_adjacency_rewards_matching_needs() {
        let catalog = builtin_catalog().unwrap();
        let base = Garden::new(3, 3, Season::Summer).unwrap();
        let matched = plant(&plant(&base, &catalog, 0, 0, "rose"), &catalog, 0, 1, "peony");
        let clashing = plant(&plant(&base, &catalog, 0, 0, "lavender"), &catalog, 0, 1, "hosta");
        assert_close(score_layout(&matched, &catalog).breakdown.adjacency, ADJACENCY_WEIGHT);
        assert_close(score_layout(&clashing, &catalog).breakdown.adjacency, 0.0);
    }

    #[test]
    fn test_diagonal_plants_are_not_adjacent() {
        let catalog = builtin_catalog().unwrap();
        let base = Garden::new(3, 3, Season::Summer).unwrap();
        let garden = plant(&plant(&base, &catalog, 0, 0, "rose"), &catalog, 1, 1, "peony");
        assert!(adjacent_pairs(&garden, &catalog).is_empty());
    }

    #[test]
    fn test_multi_cell_contact_counts_one_pair() {
        let catalog = builtin_catalog().unwrap();
        let base = Garden::new(4, 4, Season::Summer).unwrap();
        // The grass (2x1) touches both right-hand cells of the hydrangea.
        let garden = plant(
            &plant(&base, &catalog, 0, 0, "hydrangea"),
            &catalog,
            0,
            2,
            "fountain-grass",
        );
        assert_eq!(adjacent_pairs(&garden, &catalog), vec![(0, 1)]);
    }

    #[test]
    fn test_unknown_variants_only_count_for_coverage() {
        let catalog = builtin_catalog().unwrap();
        let garden = plant(&Garden::new(2, 2, Season::Winter).unwrap(), &catalog, 0, 0, "triffid");
        let score = score_layout(&garden, &catalog);
        assert_close(score.breakdown.seasonal_bloom, 0.0);
        assert_close(score.breakdown.maintenance, 0.0);
        assert!(score.breakdown.coverage > 0.0);
    }

    #[test]
    fn test_total_is_sum_of_breakdown() {
        let catalog = builtin_catalog().unwrap();
        let base = Garden::new(4, 4, Season::Summer).unwrap();
        let garden = plant(&plant(&base, &catalog, 0, 0, "hydrangea"), &catalog, 2, 2, "lavender");
        let score = score_layout(&garden, &catalog);
        assert_close(score.total, score.breakdown.sum());
        assert!(score.total <= 100.0);
    }
}
