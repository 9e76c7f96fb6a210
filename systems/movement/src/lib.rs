#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that combines player input with current drift.
//!
//! Drift is read from the cell the submersible is leaving and is never
//! re-applied at the destination within the same step. A candidate that
//! leaves the grid on either axis rejects the whole move; positions are never
//! clamped.

use abyssal_core::{CellCoord, CurrentVector, GridDelta, Reading};
use abyssal_world::{query, OceanGrid};

/// Current speed (in metres per second) a component must exceed to push the submersible.
pub const DEFAULT_DRIFT_THRESHOLD_MPS: f64 = 0.2;

/// Configuration parameters required to construct the movement system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    drift_threshold_mps: f64,
}

impl Config {
    /// Creates a configuration using the provided drift threshold.
    #[must_use]
    pub const fn new(drift_threshold_mps: f64) -> Self {
        Self {
            drift_threshold_mps,
        }
    }

    /// Magnitude a current component must strictly exceed to cause drift.
    #[must_use]
    pub const fn drift_threshold_mps(&self) -> f64 {
        self.drift_threshold_mps
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_DRIFT_THRESHOLD_MPS)
    }
}

/// Result of a move attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move stays inside the grid and should be committed.
    Committed {
        /// Destination cell.
        to: CellCoord,
        /// Offset contributed by the origin cell's current.
        drift: GridDelta,
    },
    /// The combined offset would leave the grid; the player stays put.
    Rejected {
        /// Combined input and drift offset that was rejected.
        delta: GridDelta,
    },
}

/// Pure system that resolves player steps against the ocean grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct Movement {
    config: Config,
}

impl Movement {
    /// Creates a movement system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Resolves a player-initiated step from `from` by `input`.
    #[must_use]
    pub fn attempt(&self, grid: &OceanGrid, from: CellCoord, input: GridDelta) -> MoveOutcome {
        let drift = self.drift(query::current_at(grid, from));
        let delta = input.combine(drift);
        let (row, column) = from.offset(delta);

        match grid.checked_coord(row, column) {
            Some(to) => MoveOutcome::Committed { to, drift },
            None => MoveOutcome::Rejected { delta },
        }
    }

    /// Offset produced by a current; absent currents produce no drift.
    #[must_use]
    pub fn drift(&self, current: Option<&CurrentVector>) -> GridDelta {
        let Some(current) = current else {
            return GridDelta::ZERO;
        };

        GridDelta::new(
            self.component_drift(current.v_mps),
            self.component_drift(current.u_mps),
        )
    }

    fn component_drift(&self, component: Reading) -> i64 {
        match component.value() {
            Some(speed) if speed.abs() > self.config.drift_threshold_mps => {
                if speed > 0.0 {
                    1
                } else {
                    -1
                }
            }
            _ => 0,
        }
    }
}
