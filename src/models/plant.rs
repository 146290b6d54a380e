use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

use crate::error::GardenError;
use crate::models::garden::CellContent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sun {
    #[default]
    Full,
    Partial,
    Shade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Water {
    Low,
    #[default]
    Medium,
    High,
}

/// Number of cells a variant covers when anchored, as `[height, width]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Footprint {
    pub height: usize,
    pub width: usize,
}

impl Footprint {
    pub const UNIT: Footprint = Footprint {
        height: 1,
        width: 1,
    };

    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    pub fn area(&self) -> usize {
        self.height * self.width
    }

    /// Absolute `(row, col)` positions covered when anchored at `(row, col)`.
    /// Positions are not clipped to any grid.
    pub fn cells(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        let width = self.width;
        (0..self.height).flat_map(move |dr| (0..width).map(move |dc| (row + dr, col + dc)))
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::UNIT
    }
}

impl From<[usize; 2]> for Footprint {
    fn from([height, width]: [usize; 2]) -> Self {
        Self { height, width }
    }
}

impl From<Footprint> for [usize; 2] {
    fn from(fp: Footprint) -> Self {
        [fp.height, fp.width]
    }
}

fn default_maintenance() -> u8 {
    3
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlantVariant {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    /// Mature height in centimetres, used by the front view.
    #[serde(default)]
    pub base_height: u32,
    #[serde(default)]
    #[schema(value_type = Vec<usize>)]
    pub footprint: Footprint,
    #[serde(default)]
    pub sun: Sun,
    #[serde(default)]
    pub water: Water,
    #[serde(default)]
    pub bloom_seasons: Vec<Season>,
    /// Care effort from 1 (easy) to 5 (demanding).
    #[serde(default = "default_maintenance")]
    pub maintenance: u8,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PlantVariant {
    pub fn blooms_in(&self, season: Season) -> bool {
        self.bloom_seasons.contains(&season)
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlantCategory {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub variants: Vec<PlantVariant>,
}

/// Raw on-disk shape of a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub categories: Vec<PlantCategory>,
}

/// Immutable, validated lookup of plant variants grouped by category.
#[derive(Debug, Clone)]
pub struct PlantCatalog {
    categories: Vec<PlantCategory>,
    index: HashMap<String, (usize, usize)>,
}

impl PlantCatalog {
    pub fn new(categories: Vec<PlantCategory>) -> Result<Self, GardenError> {
        let mut index = HashMap::new();
        let mut category_ids = HashSet::new();
        for (ci, category) in categories.iter().enumerate() {
            if !category_ids.insert(category.id.as_str()) {
                return Err(GardenError::InvalidCatalog(format!(
                    "duplicate category id '{}'",
                    category.id
                )));
            }
            for (vi, variant) in category.variants.iter().enumerate() {
                validate_variant(variant)?;
                if index.insert(variant.id.clone(), (ci, vi)).is_some() {
                    return Err(GardenError::InvalidCatalog(format!(
                        "duplicate variant id '{}'",
                        variant.id
                    )));
                }
            }
        }
        Ok(Self { categories, index })
    }

    pub fn from_json(json: &str) -> Result<Self, GardenError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::new(data.categories)
    }

    pub fn categories(&self) -> &[PlantCategory] {
        &self.categories
    }

    /// All variants in category order.
    pub fn variants(&self) -> impl Iterator<Item = &PlantVariant> {
        self.categories.iter().flat_map(|c| c.variants.iter())
    }

    pub fn get(&self, id: &str) -> Option<&PlantVariant> {
        self.index
            .get(id)
            .map(|&(ci, vi)| &self.categories[ci].variants[vi])
    }

    /// Footprint of `id`, falling back to a single cell for ids the catalog
    /// does not know.
    pub fn footprint_of(&self, id: &str) -> Footprint {
        match self.get(id) {
            Some(variant) => variant.footprint,
            None => {
                log::warn!("Variant '{id}' not found in the catalog, assuming a 1x1 footprint.");
                Footprint::UNIT
            }
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn validate_variant(variant: &PlantVariant) -> Result<(), GardenError> {
    if CellContent::is_sentinel(&variant.id) {
        return Err(GardenError::InvalidCatalog(format!(
            "'{}' is not a valid variant id",
            variant.id
        )));
    }
    if variant.footprint.height == 0 || variant.footprint.width == 0 {
        return Err(GardenError::InvalidCatalog(format!(
            "variant '{}' has an empty footprint",
            variant.id
        )));
    }
    if !(1..=5).contains(&variant.maintenance) {
        return Err(GardenError::InvalidCatalog(format!(
            "variant '{}' has maintenance {} outside 1..=5",
            variant.id, variant.maintenance
        )));
    }
    Ok(())
}
