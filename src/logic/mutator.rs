use crate::error::GardenError;
use crate::logic::validator::{placement_reason, BlockReason};
use crate::models::{
    garden::{CellContent, Garden},
    plant::PlantCatalog,
    Coordinate,
};

/// Commits a placement (`Some(id)`) or removal (`None`) at `anchor` and
/// returns the new garden. The input is never modified.
///
/// Callers validate first; no bounds or overlap check happens here. Cells
/// missing from the garden are skipped.
pub fn apply_placement(
    garden: &Garden,
    catalog: &PlantCatalog,
    anchor: Option<Coordinate>,
    new_plant: Option<&str>,
) -> Garden {
    let mut next = garden.clone();
    let Some(anchor) = anchor else {
        return next;
    };
    let Some(target) = next.content_at(anchor).cloned() else {
        log::warn!(
            "No cell at ({}, {}), placement ignored.",
            anchor.row,
            anchor.col
        );
        return next;
    };

    let wanted = match new_plant {
        Some(id) if !CellContent::is_sentinel(id) => CellContent::anchored(id),
        _ => CellContent::Empty,
    };
    if target.legacy_plant() == wanted.legacy_plant() {
        return next;
    }

    if let CellContent::Anchored(old) = &target {
        let footprint = catalog.footprint_of(old);
        log::debug!(
            "Removing '{old}' ({}x{}) anchored at ({}, {})",
            footprint.height,
            footprint.width,
            anchor.row,
            anchor.col
        );
        for (row, col) in footprint.cells(anchor.row, anchor.col) {
            if let Some(cell) = next.cell_mut(row, col) {
                cell.content = CellContent::Empty;
            }
        }
    }

    if let CellContent::Anchored(new) = &wanted {
        let footprint = catalog.footprint_of(new);
        log::debug!(
            "Placing '{new}' ({}x{}) at ({}, {})",
            footprint.height,
            footprint.width,
            anchor.row,
            anchor.col
        );
        for (row, col) in footprint.cells(anchor.row, anchor.col) {
            if (row, col) == (anchor.row, anchor.col) {
                continue;
            }
            if let Some(cell) = next.cell_mut(row, col) {
                cell.content = CellContent::Covered;
            }
        }
        if let Some(cell) = next.cell_mut(anchor.row, anchor.col) {
            cell.content = wanted.clone();
        }
    }

    next
}

/// Removes whatever is anchored at `anchor`.
pub fn clear_cell(garden: &Garden, catalog: &PlantCatalog, anchor: Option<Coordinate>) -> Garden {
    apply_placement(garden, catalog, anchor, None)
}

/// Validates, then commits. Unknown ids and blocked placements are rejected
/// without touching the garden; `"empty"` (or any other sentinel) clears.
pub fn place_variant(
    garden: &Garden,
    catalog: &PlantCatalog,
    anchor: Option<Coordinate>,
    plant: Option<&str>,
) -> Result<Garden, GardenError> {
    let Some(id) = plant.filter(|id| !CellContent::is_sentinel(id)) else {
        if anchor.is_none() {
            return Err(GardenError::Blocked(BlockReason::NoSelection));
        }
        return Ok(clear_cell(garden, catalog, anchor));
    };
    let variant = catalog
        .get(id)
        .ok_or_else(|| GardenError::UnknownVariant(id.to_string()))?;

    let already_there = anchor
        .and_then(|a| garden.content_at(a))
        .and_then(|content| content.plant_id())
        == Some(id);
    if !already_there {
        let reason = placement_reason(garden, catalog, anchor, variant.footprint);
        if reason.is_blocked() {
            return Err(GardenError::Blocked(reason));
        }
    }
    Ok(apply_placement(garden, catalog, anchor, Some(id)))
}
