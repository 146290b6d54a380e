use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{DEFAULT_MAX_ATTEMPTS, DEFAULT_TARGET_COVERAGE};
use crate::logic::compat::is_compatible;
use crate::logic::occupancy::OccupancyGrid;
use crate::logic::validator::reason_blocked;
use crate::models::{
    garden::{CellContent, Garden},
    plant::{PlantCatalog, PlantVariant},
    Coordinate, Matrix,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorOptions {
    /// Desired fraction of covered cells, clamped to `0..=1`.
    pub target_coverage: f64,
    /// Placement attempts before giving up on the target.
    pub max_attempts: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            target_coverage: DEFAULT_TARGET_COVERAGE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

pub fn generate_auto_layout(
    garden: &Garden,
    catalog: &PlantCatalog,
    options: &GeneratorOptions,
) -> Garden {
    generate_auto_layout_with_rng(garden, catalog, options, &mut rand::thread_rng())
}

/// Greedy randomized fill of a fresh grid (same size and season as `garden`)
/// toward `options.target_coverage`.
///
/// Runs at most `options.max_attempts` placement attempts. The result always
/// has one cell per position and no overlapping or off-grid footprint; when
/// the target cannot be reached the best layout found is returned.
pub fn generate_auto_layout_with_rng<R: Rng + ?Sized>(
    garden: &Garden,
    catalog: &PlantCatalog,
    options: &GeneratorOptions,
    rng: &mut R,
) -> Garden {
    if garden.rows == 0 || garden.cols == 0 {
        log::warn!(
            "Cannot generate a layout for a {}x{} garden.",
            garden.rows,
            garden.cols
        );
        return garden.clone();
    }
    let (rows, cols) = (garden.rows, garden.cols);
    let mut layout = Garden::blank(rows, cols, garden.season);
    let mut occupancy = OccupancyGrid::new(rows, cols);

    let target = if options.target_coverage.is_finite() {
        options.target_coverage.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let target_cells = (target * (rows * cols) as f64).round() as usize;

    let variants: Vec<&PlantVariant> = catalog.variants().collect();
    let mut uses = vec![0usize; variants.len()];
    let mut owners: Matrix<Option<usize>> = vec![vec![None; cols]; rows];
    let strict_until = options.max_attempts / 2;

    let mut covered = 0usize;
    let mut attempts = 0usize;
    while attempts < options.max_attempts {
        let remaining = target_cells.saturating_sub(covered);
        if remaining == 0 {
            break;
        }
        let fitting: Vec<usize> = (0..variants.len())
            .filter(|&i| variants[i].footprint.area() <= remaining)
            .collect();
        if fitting.is_empty() {
            // Every footprint would overshoot: within one footprint of the target.
            break;
        }
        let free = occupancy.free_cells();
        if free.is_empty() {
            break;
        }
        attempts += 1;

        // Shift toward small footprints as the remaining area shrinks, and
        // away from variants already used.
        let pressure = 1.0 - remaining as f64 / target_cells as f64;
        let weights: Vec<f64> = fitting
            .iter()
            .map(|&i| {
                let area = variants[i].footprint.area() as f64;
                1.0 / (area.powf(pressure) * (1 + uses[i]) as f64)
            })
            .collect();
        let Ok(picker) = WeightedIndex::new(&weights) else {
            break;
        };
        let pick = fitting[picker.sample(rng)];
        let variant = variants[pick];
        let Some(&anchor) = free.choose(rng) else {
            break;
        };

        if reason_blocked(&layout, &occupancy, Some(anchor), variant.footprint).is_blocked() {
            continue;
        }
        if attempts <= strict_until && clashes_with_neighbours(&owners, &variants, anchor, variant)
        {
            continue;
        }

        for (row, col) in variant.footprint.cells(anchor.row, anchor.col) {
            owners[row][col] = Some(pick);
            if let Some(cell) = layout.cell_mut(row, col) {
                cell.content = if (row, col) == (anchor.row, anchor.col) {
                    CellContent::anchored(variant.id.as_str())
                } else {
                    CellContent::Covered
                };
            }
        }
        occupancy.mark_footprint(anchor, variant.footprint);
        covered += variant.footprint.area();
        uses[pick] += 1;
        log::debug!(
            "Generator placed '{}' at ({}, {}): {covered}/{target_cells} cells",
            variant.id,
            anchor.row,
            anchor.col
        );
    }

    if covered < target_cells && attempts >= options.max_attempts {
        log::warn!(
            "Generator stopped after {attempts} attempts at {covered}/{target_cells} cells."
        );
    }
    log::debug!(
        "Generated {}x{} layout: {} plants, {covered} cells covered",
        rows,
        cols,
        layout.anchor_count()
    );
    layout
}

/// True when some plant edge-adjacent to the candidate footprint has opposite
/// sun or water needs.
fn clashes_with_neighbours(
    owners: &Matrix<Option<usize>>,
    variants: &[&PlantVariant],
    anchor: Coordinate,
    candidate: &PlantVariant,
) -> bool {
    let rows = owners.len();
    let cols = owners.first().map_or(0, Vec::len);
    for (row, col) in candidate.footprint.cells(anchor.row, anchor.col) {
        let neighbours = [
            row.checked_sub(1).map(|r| (r, col)),
            Some((row + 1, col)),
            col.checked_sub(1).map(|c| (row, c)),
            Some((row, col + 1)),
        ];
        for (nr, nc) in neighbours.into_iter().flatten() {
            if nr >= rows || nc >= cols {
                continue;
            }
            if let Some(owner) = owners[nr][nc] {
                if !is_compatible(variants[owner], candidate) {
                    return true;
                }
            }
        }
    }
    false
}
