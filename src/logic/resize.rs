use crate::error::GardenError;
use crate::logic::mutator::apply_placement;
use crate::models::{garden::Garden, plant::PlantCatalog};

/// Re-keys `garden` over `rows x cols`.
///
/// Plants whose whole footprint still fits are kept where they are; the rest
/// are dropped. New cells start empty.
pub fn resize_garden(
    garden: &Garden,
    catalog: &PlantCatalog,
    rows: usize,
    cols: usize,
) -> Result<Garden, GardenError> {
    let mut resized = Garden::new(rows, cols, garden.season)?;
    let mut dropped = 0usize;
    for (anchor, id) in garden.anchors() {
        let footprint = catalog.footprint_of(id);
        let fits = footprint
            .cells(anchor.row, anchor.col)
            .all(|(row, col)| resized.in_bounds(row, col));
        if fits {
            resized = apply_placement(&resized, catalog, Some(anchor), Some(id));
        } else {
            dropped += 1;
        }
    }
    if dropped > 0 {
        log::info!(
            "Resize {}x{} -> {rows}x{cols} dropped {dropped} plant(s) that no longer fit.",
            garden.rows,
            garden.cols
        );
    }
    Ok(resized)
}
