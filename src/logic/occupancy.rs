use crate::models::{
    garden::Garden,
    plant::{Footprint, PlantCatalog},
    Coordinate, Matrix,
};

/// Derived view of which cells are covered by some anchor's footprint.
///
/// Always rebuilt from a garden snapshot; never kept across mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    rows: usize,
    cols: usize,
    cells: Matrix<bool>,
}

impl OccupancyGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![false; cols]; rows],
        }
    }

    /// Out-of-bounds positions are reported as free.
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn mark_footprint(&mut self, anchor: Coordinate, footprint: Footprint) {
        self.fill(anchor, footprint, true);
    }

    pub fn clear_footprint(&mut self, anchor: Coordinate, footprint: Footprint) {
        self.fill(anchor, footprint, false);
    }

    fn fill(&mut self, anchor: Coordinate, footprint: Footprint, value: bool) {
        for (row, col) in footprint.cells(anchor.row, anchor.col) {
            if row < self.rows && col < self.cols {
                self.cells[row][col] = value;
            }
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&o| o).count()
    }

    /// Fraction of cells covered, in `0..=1`.
    pub fn coverage(&self) -> f64 {
        let total = self.rows * self.cols;
        if total == 0 {
            return 0.0;
        }
        self.occupied_count() as f64 / total as f64
    }

    /// Free positions in row-major order.
    pub fn free_cells(&self) -> Vec<Coordinate> {
        let mut free = Vec::new();
        for (row, line) in self.cells.iter().enumerate() {
            for (col, occupied) in line.iter().enumerate() {
                if !occupied {
                    free.push(Coordinate { row, col });
                }
            }
        }
        free
    }

    pub fn into_matrix(self) -> Matrix<bool> {
        self.cells
    }
}

/// Marks every in-bounds cell covered by an anchor's footprint.
/// Footprints running off the grid are clipped.
pub fn build_occupancy(garden: &Garden, catalog: &PlantCatalog) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(garden.rows, garden.cols);
    for (anchor, id) in garden.anchors() {
        grid.mark_footprint(anchor, catalog.footprint_of(id));
    }
    grid
}

/// For each cell, the index (in `Garden::anchors` order) of the anchor whose
/// footprint covers it.
pub fn build_ownership(garden: &Garden, catalog: &PlantCatalog) -> Matrix<Option<usize>> {
    let mut owners = vec![vec![None; garden.cols]; garden.rows];
    for (index, (anchor, id)) in garden.anchors().enumerate() {
        for (row, col) in catalog.footprint_of(id).cells(anchor.row, anchor.col) {
            if garden.in_bounds(row, col) {
                owners[row][col] = Some(index);
            }
        }
    }
    owners
}
