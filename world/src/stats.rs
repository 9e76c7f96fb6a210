//! Summary statistics computed once after the world loads.

use std::collections::BTreeMap;

use abyssal_core::{Biome, Reading};

use crate::OceanGrid;

/// Minimum, maximum and mean over the known values of a reading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    /// Smallest known value.
    pub min: f64,
    /// Largest known value.
    pub max: f64,
    /// Arithmetic mean of known values.
    pub mean: f64,
    /// Number of cells with a known value.
    pub known: usize,
}

#[derive(Default)]
struct RangeBuilder {
    min: f64,
    max: f64,
    sum: f64,
    known: usize,
}

impl RangeBuilder {
    fn push(&mut self, reading: Reading) {
        let Some(value) = reading.value() else {
            return;
        };
        if self.known == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.sum += value;
        self.known += 1;
    }

    fn finish(self) -> Option<Range> {
        (self.known > 0).then(|| Range {
            min: self.min,
            max: self.max,
            mean: self.sum / self.known as f64,
            known: self.known,
        })
    }
}

/// Aggregate description of a loaded world.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldStats {
    /// Depth range in metres; `None` when no depth is known.
    pub depth_m: Option<Range>,
    /// Pressure range in atmospheres.
    pub pressure_atm: Option<Range>,
    /// Temperature range in degrees Celsius.
    pub temperature_c: Option<Range>,
    /// Number of cells per biome.
    pub biome_counts: BTreeMap<Biome, usize>,
    /// Total hazards over all cells.
    pub hazards: usize,
    /// Number of cells carrying at least one hazard.
    pub hazard_cells: usize,
    /// Total points of interest.
    pub points_of_interest: usize,
    /// Total resource deposits.
    pub resources: usize,
    /// Total life-form records.
    pub life_forms: usize,
    /// Number of cells with a measured current.
    pub current_cells: usize,
}

impl WorldStats {
    /// Computes statistics for the provided grid.
    #[must_use]
    pub fn compute(grid: &OceanGrid) -> Self {
        let mut depth = RangeBuilder::default();
        let mut pressure = RangeBuilder::default();
        let mut temperature = RangeBuilder::default();
        let mut biome_counts = BTreeMap::new();
        let mut stats = Self {
            depth_m: None,
            pressure_atm: None,
            temperature_c: None,
            biome_counts: BTreeMap::new(),
            hazards: 0,
            hazard_cells: 0,
            points_of_interest: 0,
            resources: 0,
            life_forms: 0,
            current_cells: 0,
        };

        for (_, cell) in grid.iter() {
            depth.push(cell.depth_m);
            pressure.push(cell.pressure_atm);
            temperature.push(cell.temperature_c);
            *biome_counts.entry(cell.biome.clone()).or_insert(0) += 1;
            stats.hazards += cell.hazards.len();
            stats.hazard_cells += usize::from(cell.has_hazard());
            stats.points_of_interest += cell.points_of_interest.len();
            stats.resources += cell.resources.len();
            stats.life_forms += cell.life.len();
            stats.current_cells += usize::from(cell.current.is_some());
        }

        stats.depth_m = depth.finish();
        stats.pressure_atm = pressure.finish();
        stats.temperature_c = temperature.finish();
        stats.biome_counts = biome_counts;
        stats
    }
}
