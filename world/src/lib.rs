#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Read-only ocean world model for Abyssal.
//!
//! The world is built once by the [`loader`] and never mutated afterwards.
//! Systems receive `&OceanGrid` and use the [`query`] helpers to inspect it.

use abyssal_core::{
    Biome, CellCoord, CoralMetrics, CurrentVector, Hazard, LifeForm, PointOfInterest, Reading,
    Resource,
};

pub mod loader;
pub mod stats;
mod table;

pub use loader::{load_world, LoadError, LoadedWorld, WorldMetadata};
pub use stats::WorldStats;

/// Environmental and entity data attached to a single grid cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    /// Seabed depth in metres.
    pub depth_m: Reading,
    /// Water pressure in atmospheres.
    pub pressure_atm: Reading,
    /// Water temperature in degrees Celsius.
    pub temperature_c: Reading,
    /// Habitat category.
    pub biome: Biome,
    /// Ambient light intensity.
    pub light_intensity: Reading,
    /// Seabed roughness.
    pub terrain_roughness: Reading,
    /// Easting of the cell centre in kilometres.
    pub x_km: Reading,
    /// Northing of the cell centre in kilometres.
    pub y_km: Reading,
    /// Latitude of the cell centre.
    pub lat: Reading,
    /// Longitude of the cell centre.
    pub lon: Reading,
    /// Ocean current flowing through the cell, if measured.
    pub current: Option<CurrentVector>,
    /// Hazards in data order.
    pub hazards: Vec<Hazard>,
    /// Coral metrics, if surveyed.
    pub corals: Option<CoralMetrics>,
    /// Resource deposits.
    pub resources: Vec<Resource>,
    /// Observed life forms.
    pub life: Vec<LifeForm>,
    /// Points of interest.
    pub points_of_interest: Vec<PointOfInterest>,
}

impl Cell {
    /// Reports whether the cell carries at least one hazard.
    #[must_use]
    pub fn has_hazard(&self) -> bool {
        !self.hazards.is_empty()
    }

    /// Reports whether the cell carries a point of interest, optionally of a given category.
    #[must_use]
    pub fn has_point_of_interest(&self, category: Option<&str>) -> bool {
        match category {
            None => !self.points_of_interest.is_empty(),
            Some(category) => self
                .points_of_interest
                .iter()
                .any(|poi| poi.category == category),
        }
    }
}

/// Dense row-major grid of cells.
#[derive(Clone, Debug)]
pub struct OceanGrid {
    rows: u32,
    columns: u32,
    cells: Vec<Cell>,
}

impl OceanGrid {
    /// Creates a grid of default (unknown) cells.
    #[must_use]
    pub fn empty(rows: u32, columns: u32) -> Self {
        let count = (rows as usize).saturating_mul(columns as usize);
        Self {
            rows,
            columns,
            cells: vec![Cell::default(); count],
        }
    }

    /// Builds a grid by invoking `build` for every coordinate in row-major order.
    #[must_use]
    pub fn from_fn<F>(rows: u32, columns: u32, mut build: F) -> Self
    where
        F: FnMut(CellCoord) -> Cell,
    {
        let mut cells = Vec::with_capacity((rows as usize).saturating_mul(columns as usize));
        for row in 0..rows {
            for column in 0..columns {
                cells.push(build(CellCoord::new(row, column)));
            }
        }
        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Returns the cell at the provided coordinate, if it lies inside the grid.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.index(coord).and_then(|index| self.cells.get(index))
    }

    /// Converts signed coordinates into a cell coordinate when both lie inside the grid.
    #[must_use]
    pub fn checked_coord(&self, row: i64, column: i64) -> Option<CellCoord> {
        let row = u32::try_from(row).ok()?;
        let column = u32::try_from(column).ok()?;
        (row < self.rows && column < self.columns).then_some(CellCoord::new(row, column))
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row() < self.rows && coord.column() < self.columns
    }

    /// Centre cell of the grid; `None` for an empty grid.
    #[must_use]
    pub fn center(&self) -> Option<CellCoord> {
        (self.rows > 0 && self.columns > 0)
            .then(|| CellCoord::new(self.rows / 2, self.columns / 2))
    }

    /// Iterates over all cells in row-major order together with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &Cell)> + '_ {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let index = index as u32;
            (CellCoord::new(index / columns, index % columns), cell)
        })
    }

    pub(crate) fn cell_mut(&mut self, coord: CellCoord) -> Option<&mut Cell> {
        self.index(coord).and_then(|index| self.cells.get_mut(index))
    }

    fn index(&self, coord: CellCoord) -> Option<usize> {
        if self.contains(coord) {
            let row = usize::try_from(coord.row()).ok()?;
            let column = usize::try_from(coord.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Query functions that provide read-only access to the world.
pub mod query {
    use abyssal_core::{CellCoord, CurrentVector};

    use super::{Cell, OceanGrid};

    /// Retrieves the cell at the provided coordinate.
    #[must_use]
    pub fn cell_at(grid: &OceanGrid, coord: CellCoord) -> Option<&Cell> {
        grid.cell(coord)
    }

    /// Retrieves the current vector of the cell, if one was measured.
    #[must_use]
    pub fn current_at(grid: &OceanGrid, coord: CellCoord) -> Option<&CurrentVector> {
        grid.cell(coord).and_then(|cell| cell.current.as_ref())
    }

    /// Enumerates the coordinates of every hazard-bearing cell.
    #[must_use]
    pub fn hazard_cells(grid: &OceanGrid) -> Vec<CellCoord> {
        grid.iter()
            .filter(|(_, cell)| cell.has_hazard())
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Enumerates the coordinates of every cell carrying a point of interest.
    #[must_use]
    pub fn point_of_interest_cells(grid: &OceanGrid) -> Vec<CellCoord> {
        grid.iter()
            .filter(|(_, cell)| cell.has_point_of_interest(None))
            .map(|(coord, _)| coord)
            .collect()
    }
}
