#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Abyssal exploration engine.
//!
//! This crate defines the message surface that connects adapters, the
//! orchestrating session, and pure systems. Adapters submit [`Command`]
//! values describing player intent, the session executes those commands via
//! its `apply` entry point, and then reports [`Event`] values that adapters
//! route to an [`Assistant`] and to the HUD.

use std::time::Duration;


mod mission;
mod records;

pub use mission::{MissionId, MissionNarrative, MissionObjective, MissionTemplate};
pub use records::{
    Biome, CoralMetrics, CurrentVector, Hazard, LifeForm, PointOfInterest, Reading, Resource,
};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome aboard. Abyssal World is loading...";

/// Display duration applied to free-text assistant messages by default.
pub const DEFAULT_SAY_DURATION: Duration = Duration::from_millis(3000);

/// Display duration applied to biome facts.
pub const FACT_SAY_DURATION: Duration = Duration::from_millis(5000);

/// Upper bound of the health and hunger scales.
pub const MAX_VITAL: u8 = 100;

/// Commands that express all permissible session mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Requests a single player-initiated step.
    MovePlayer {
        /// Offset requested by the player before current drift is applied.
        delta: GridDelta,
    },
    /// Relays a click on a grid tile from the presentation layer.
    SelectCell {
        /// Cell that was clicked.
        cell: CellCoord,
    },
    /// Requests that the mission with the provided identifier becomes active.
    StartMission {
        /// Identifier of the mission template to start.
        mission: MissionId,
    },
    /// Requests the hint attached to the active mission.
    RequestHint,
    /// Advances the session clock by the provided delta time.
    Tick {
        /// Duration of time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events reported by the session after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the session clock advanced.
    TimeAdvanced {
        /// Duration of time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the submersible moved between two cells.
    PlayerMoved {
        /// Cell occupied before the move.
        from: CellCoord,
        /// Cell occupied after the move.
        to: CellCoord,
        /// Offset contributed by the ocean current of the origin cell.
        drift: GridDelta,
    },
    /// Reports that a move would have left the grid and was discarded.
    MoveRejected {
        /// Cell the player remains in.
        from: CellCoord,
        /// Combined player and drift offset that was rejected.
        delta: GridDelta,
    },
    /// Reports that a non-adjacent tile was selected for inspection.
    CellInspected {
        /// Cell that was selected.
        cell: CellCoord,
    },
    /// Warns about a hazard present in the cell the player entered.
    HazardEncountered {
        /// Cell carrying the hazard.
        cell: CellCoord,
        /// Hazard descriptor.
        hazard: Hazard,
    },
    /// Shares a fact about the biome the player entered.
    FactShared {
        /// Biome the fact describes.
        biome: Biome,
        /// Fact text.
        text: String,
    },
    /// Confirms that a mission became active.
    MissionStarted {
        /// Identifier of the mission.
        mission: MissionId,
        /// Countdown armed for the mission, if timed.
        time_limit: Option<Duration>,
    },
    /// Reports that a mission recorded a new distinct cell.
    MissionProgressed {
        /// Identifier of the mission.
        mission: MissionId,
        /// Number of distinct cells recorded so far.
        visited: u32,
        /// Number of distinct cells required for success.
        target: u32,
    },
    /// Reports the remaining time of a timed mission after a countdown step.
    CountdownTicked {
        /// Identifier of the mission.
        mission: MissionId,
        /// Whole seconds left before failure.
        remaining_secs: u32,
    },
    /// Announces that the active mission succeeded.
    MissionSucceeded {
        /// Identifier of the mission.
        mission: MissionId,
    },
    /// Announces that the active mission ran out of time.
    MissionFailed {
        /// Identifier of the mission.
        mission: MissionId,
    },
    /// Announces that the active mission was replaced by a newly started one.
    MissionAbandoned {
        /// Identifier of the discarded mission.
        mission: MissionId,
    },
    /// Reports that a mission start request referenced no known template.
    MissionUnknown {
        /// Identifier that failed to resolve.
        mission: MissionId,
    },
    /// Shares the hint of the active mission.
    HintShared {
        /// Identifier of the mission the hint belongs to.
        mission: MissionId,
        /// Hint text.
        text: String,
    },
    /// Free-text notice for the player.
    Notice {
        /// Message to display.
        message: String,
    },
}

/// Cardinal movement directions available to the submersible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Unit offset describing a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> GridDelta {
        match self {
            Self::North => GridDelta::new(-1, 0),
            Self::East => GridDelta::new(0, 1),
            Self::South => GridDelta::new(1, 0),
            Self::West => GridDelta::new(0, -1),
        }
    }
}

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Offset that leads from `self` to `other`.
    #[must_use]
    pub fn delta_to(self, other: CellCoord) -> GridDelta {
        GridDelta::new(
            i64::from(other.row) - i64::from(self.row),
            i64::from(other.column) - i64::from(self.column),
        )
    }

    /// Applies the offset, returning signed coordinates that may fall outside any grid.
    #[must_use]
    pub fn offset(self, delta: GridDelta) -> (i64, i64) {
        (
            i64::from(self.row) + delta.rows(),
            i64::from(self.column) + delta.columns(),
        )
    }
}

/// Signed offset between two cells measured in rows and columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridDelta {
    rows: i64,
    columns: i64,
}

impl GridDelta {
    /// Offset that leaves a position untouched.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a new offset.
    #[must_use]
    pub const fn new(rows: i64, columns: i64) -> Self {
        Self { rows, columns }
    }

    /// Row component of the offset.
    #[must_use]
    pub const fn rows(&self) -> i64 {
        self.rows
    }

    /// Column component of the offset.
    #[must_use]
    pub const fn columns(&self) -> i64 {
        self.columns
    }

    /// Component-wise sum of two offsets.
    #[must_use]
    pub const fn combine(self, other: GridDelta) -> Self {
        Self::new(self.rows + other.rows, self.columns + other.columns)
    }

    /// Reports whether the offset is a single orthogonal step.
    #[must_use]
    pub fn is_unit_step(&self) -> bool {
        self.rows.abs() + self.columns.abs() == 1
    }
}

/// Mutable state of the submersible.
///
/// Health and hunger are displayed but no rule currently consumes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerState {
    /// Cell occupied by the submersible.
    pub position: CellCoord,
    /// Hull integrity on a 0–100 scale.
    pub health: u8,
    /// Supply level on a 0–100 scale.
    pub hunger: u8,
}

impl PlayerState {
    /// Creates a player at the provided cell with full vitals.
    #[must_use]
    pub const fn new(position: CellCoord) -> Self {
        Self {
            position,
            health: MAX_VITAL,
            hunger: MAX_VITAL,
        }
    }
}

/// Notification sink that voices session events to the player.
///
/// Only [`Assistant::say`] is required; the named hooks fall back to
/// free-text messages built from the mission template or hazard.
pub trait Assistant {
    /// Displays a free-text message for roughly `duration`.
    fn say(&mut self, message: &str, duration: Duration);

    /// Announces a newly started mission.
    fn mission_start(&mut self, mission: &MissionTemplate) {
        let message = mission
            .narrative
            .start
            .clone()
            .unwrap_or_else(|| format!("Mission started: {}", mission.title));
        self.say(&message, DEFAULT_SAY_DURATION);
    }

    /// Announces a completed mission.
    fn mission_success(&mut self, mission: &MissionTemplate) {
        let message = mission
            .narrative
            .success
            .clone()
            .unwrap_or_else(|| format!("Mission complete: {}", mission.title));
        self.say(&message, DEFAULT_SAY_DURATION);
    }

    /// Announces a failed mission.
    fn mission_fail(&mut self, mission: &MissionTemplate) {
        let message = mission
            .narrative
            .failure
            .clone()
            .unwrap_or_else(|| format!("Mission failed: {}", mission.title));
        self.say(&message, DEFAULT_SAY_DURATION);
    }

    /// Warns about a hazard in the current cell.
    fn hazard_warning(&mut self, hazard: &Hazard) {
        let message = match hazard.severity {
            Some(severity) => format!("Warning: {} (severity {severity})", hazard.kind),
            None => format!("Warning: {}", hazard.kind),
        };
        self.say(&message, DEFAULT_SAY_DURATION);
    }

    /// Shares a mission hint.
    fn hint(&mut self, text: &str) {
        self.say(&format!("Hint: {text}"), DEFAULT_SAY_DURATION);
    }
}
