use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::GardenError;
use crate::models::{plant::Season, Coordinate};

/// Wire value of a cell holding nothing.
pub const EMPTY_SENTINEL: &str = "empty";
/// Wire value of a secondary cell of a multi-cell footprint.
pub const COVERED_SENTINEL: &str = "covered";
/// Largest grid accepted, in cells.
pub const MAX_GARDEN_CELLS: usize = 10_000;

/// What a cell holds.
///
/// Only the anchor (top-left) cell of a footprint carries the variant id; the
/// remaining cells of the footprint are `Covered`. Whether a cell is actually
/// occupied is always derived from anchors and footprints, never from
/// `Covered` alone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CellContent {
    #[default]
    Empty,
    Anchored(String),
    Covered,
}

impl CellContent {
    /// True for the wire values that never name a plant.
    pub fn is_sentinel(value: &str) -> bool {
        value.is_empty() || value == EMPTY_SENTINEL || value == COVERED_SENTINEL
    }

    pub fn anchored(id: impl Into<String>) -> Self {
        CellContent::Anchored(id.into())
    }

    /// Variant id when this is an anchor cell.
    pub fn plant_id(&self) -> Option<&str> {
        match self {
            CellContent::Anchored(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_anchor(&self) -> bool {
        matches!(self, CellContent::Anchored(_))
    }

    /// The stored `plant` value of the single-sentinel model: the variant id
    /// for an anchor, `"empty"` for both free and covered cells.
    pub fn legacy_plant(&self) -> &str {
        self.plant_id().unwrap_or(EMPTY_SENTINEL)
    }
}

impl From<String> for CellContent {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" | EMPTY_SENTINEL => CellContent::Empty,
            COVERED_SENTINEL => CellContent::Covered,
            _ => CellContent::Anchored(value),
        }
    }
}

impl From<CellContent> for String {
    fn from(content: CellContent) -> Self {
        match content {
            CellContent::Empty => EMPTY_SENTINEL.to_string(),
            CellContent::Covered => COVERED_SENTINEL.to_string(),
            CellContent::Anchored(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    /// Variant id for an anchor cell, `"empty"` or `"covered"` otherwise.
    #[serde(rename = "plant", default)]
    #[schema(value_type = String, example = "empty")]
    pub content: CellContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Garden {
    pub rows: usize,
    pub cols: usize,
    pub season: Season,
    pub cells: Vec<Cell>,
}

impl Garden {
    pub fn new(rows: usize, cols: usize, season: Season) -> Result<Self, GardenError> {
        check_dimensions(rows, cols)?;
        Ok(Self::blank(rows, cols, season))
    }

    /// All-empty grid; callers guarantee non-zero dimensions.
    pub(crate) fn blank(rows: usize, cols: usize, season: Season) -> Self {
        let cells = (0..rows)
            .flat_map(|row| {
                (0..cols).map(move |col| Cell {
                    row,
                    col,
                    content: CellContent::Empty,
                })
            })
            .collect();
        Self {
            rows,
            cols,
            season,
            cells,
        }
    }

    /// Checks that `cells` holds exactly one entry per in-bounds position.
    pub fn validate(&self) -> Result<(), GardenError> {
        check_dimensions(self.rows, self.cols)?;
        if self.rows * self.cols != self.cells.len() {
            return Err(GardenError::InvariantViolation(format!(
                "a {}x{} grid needs one cell per position, got {}",
                self.rows,
                self.cols,
                self.cells.len()
            )));
        }
        let mut seen = vec![false; self.cells.len()];
        for cell in &self.cells {
            if !self.in_bounds(cell.row, cell.col) {
                return Err(GardenError::InvariantViolation(format!(
                    "cell ({}, {}) lies outside the {}x{} grid",
                    cell.row, cell.col, self.rows, self.cols
                )));
            }
            let slot = &mut seen[cell.row * self.cols + cell.col];
            if *slot {
                return Err(GardenError::InvariantViolation(format!(
                    "cell ({}, {}) appears more than once",
                    cell.row, cell.col
                )));
            }
            *slot = true;
        }
        if let Some(missing) = seen.iter().position(|present| !present) {
            return Err(GardenError::InvariantViolation(format!(
                "cell ({}, {}) is missing",
                missing / self.cols,
                missing % self.cols
            )));
        }
        Ok(())
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        let guess = row.checked_mul(self.cols)?.checked_add(col)?;
        match self.cells.get(guess) {
            Some(cell) if cell.row == row && cell.col == col => Some(guess),
            // Externally supplied cells may arrive in any order.
            _ => self
                .cells
                .iter()
                .position(|cell| cell.row == row && cell.col == col),
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index_of(row, col).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.index_of(row, col).map(move |i| &mut self.cells[i])
    }

    pub fn content_at(&self, coord: Coordinate) -> Option<&CellContent> {
        self.cell(coord.row, coord.col).map(|c| &c.content)
    }

    /// Anchor cells with the variant id they hold, in storage order.
    pub fn anchors(&self) -> impl Iterator<Item = (Coordinate, &str)> {
        self.cells.iter().filter_map(|cell| {
            cell.content.plant_id().map(|id| {
                (
                    Coordinate {
                        row: cell.row,
                        col: cell.col,
                    },
                    id,
                )
            })
        })
    }

    pub fn anchor_count(&self) -> usize {
        self.anchors().count()
    }

    pub fn with_season(&self, season: Season) -> Self {
        Self {
            season,
            ..self.clone()
        }
    }
}

/// Both sides non-zero and at most `MAX_GARDEN_CELLS` cells in total.
fn check_dimensions(rows: usize, cols: usize) -> Result<(), GardenError> {
    match rows.checked_mul(cols) {
        Some(cells) if rows > 0 && cols > 0 && cells <= MAX_GARDEN_CELLS => Ok(()),
        _ => Err(GardenError::InvalidDimensions { rows, cols }),
    }
}
