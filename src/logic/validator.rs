use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::logic::occupancy::{build_occupancy, OccupancyGrid};
use crate::models::{
    garden::{CellContent, Garden},
    plant::{Footprint, PlantCatalog, PlantVariant},
    Coordinate,
};

/// Why a footprint cannot be anchored at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockReason {
    None,
    NoSelection,
    OutOfBounds,
    Occupied,
}

impl BlockReason {
    pub fn is_blocked(&self) -> bool {
        *self != BlockReason::None
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BlockReason::None => "placement allowed",
            BlockReason::NoSelection => "no anchor cell selected",
            BlockReason::OutOfBounds => "footprint extends past the grid edge",
            BlockReason::Occupied => "footprint overlaps another plant",
        };
        f.write_str(text)
    }
}

/// Whether a catalog entry may be picked for the selected anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariantAvailability {
    pub id: String,
    pub name: String,
    pub selectable: bool,
    pub reason: BlockReason,
}

/// Checks `footprint` anchored at `anchor` against `occupancy` as given.
/// Every target is bounds-checked before any occupancy lookup.
pub fn reason_blocked(
    garden: &Garden,
    occupancy: &OccupancyGrid,
    anchor: Option<Coordinate>,
    footprint: Footprint,
) -> BlockReason {
    let Some(anchor) = anchor else {
        return BlockReason::NoSelection;
    };
    if !footprint
        .cells(anchor.row, anchor.col)
        .all(|(row, col)| garden.in_bounds(row, col))
    {
        return BlockReason::OutOfBounds;
    }
    if footprint
        .cells(anchor.row, anchor.col)
        .any(|(row, col)| occupancy.is_occupied(row, col))
    {
        return BlockReason::Occupied;
    }
    BlockReason::None
}

pub fn can_place(
    garden: &Garden,
    occupancy: &OccupancyGrid,
    anchor: Option<Coordinate>,
    footprint: Footprint,
) -> bool {
    !reason_blocked(garden, occupancy, anchor, footprint).is_blocked()
}

/// Occupancy with the footprint of the variant currently anchored at `anchor`
/// removed, so a replacement is not blocked by the plant it replaces.
fn occupancy_without_anchor(
    garden: &Garden,
    catalog: &PlantCatalog,
    anchor: Option<Coordinate>,
) -> OccupancyGrid {
    let mut working = build_occupancy(garden, catalog);
    if let Some(anchor) = anchor {
        if let Some(CellContent::Anchored(current)) = garden.content_at(anchor) {
            working.clear_footprint(anchor, catalog.footprint_of(current));
        }
    }
    working
}

/// Like [`reason_blocked`], for replacing whatever is anchored at `anchor`.
pub fn placement_reason(
    garden: &Garden,
    catalog: &PlantCatalog,
    anchor: Option<Coordinate>,
    footprint: Footprint,
) -> BlockReason {
    let working = occupancy_without_anchor(garden, catalog, anchor);
    reason_blocked(garden, &working, anchor, footprint)
}

fn variant_reason(
    garden: &Garden,
    working: &OccupancyGrid,
    anchor: Option<Coordinate>,
    variant: &PlantVariant,
) -> BlockReason {
    // Re-picking the plant already anchored here is a no-op commit.
    if let Some(current) = anchor.and_then(|a| garden.content_at(a)) {
        if current.plant_id() == Some(variant.id.as_str()) {
            return BlockReason::None;
        }
    }
    reason_blocked(garden, working, anchor, variant.footprint)
}

pub fn can_select_variant(
    garden: &Garden,
    catalog: &PlantCatalog,
    anchor: Option<Coordinate>,
    variant: &PlantVariant,
) -> bool {
    let working = occupancy_without_anchor(garden, catalog, anchor);
    !variant_reason(garden, &working, anchor, variant).is_blocked()
}

/// Availability of every catalog variant for the selected anchor.
pub fn selectable_variants(
    garden: &Garden,
    catalog: &PlantCatalog,
    anchor: Option<Coordinate>,
) -> Vec<VariantAvailability> {
    let working = occupancy_without_anchor(garden, catalog, anchor);
    catalog
        .variants()
        .map(|variant| {
            let reason = variant_reason(garden, &working, anchor, variant);
            VariantAvailability {
                id: variant.id.clone(),
                name: variant.name.clone(),
                selectable: !reason.is_blocked(),
                reason,
            }
        })
        .collect()
}
