//! Static mission configuration shared by the mission engine and adapters.

use std::{fmt, time::Duration};

use serde::Deserialize;

const DEFAULT_VISIT_TARGET: u32 = 3;
const DEFAULT_DEPTH_THRESHOLD_M: f64 = 6000.0;
const DEFAULT_PRESSURE_THRESHOLD_ATM: f64 = 500.0;

/// Unique identifier assigned to a mission template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct MissionId(u32);

impl MissionId {
    /// Creates a new mission identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Success condition of a mission, evaluated against each cell the player enters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MissionObjective {
    /// Enter any cell carrying a point of interest.
    ReachPointOfInterest {
        /// Restricts matching points of interest to this category.
        #[serde(default)]
        category: Option<String>,
    },
    /// Enter `target` distinct cells carrying a point of interest.
    VisitPointsOfInterest {
        /// Number of distinct cells required.
        #[serde(default = "default_visit_target")]
        target: u32,
        /// Restricts matching points of interest to this category.
        #[serde(default)]
        category: Option<String>,
    },
    /// Enter a cell at least `threshold_m` metres deep.
    ReachDepth {
        /// Minimum depth in metres.
        #[serde(default = "default_depth_threshold")]
        threshold_m: f64,
    },
    /// Enter a cell with at least `threshold_atm` atmospheres of pressure.
    ReachPressure {
        /// Minimum pressure in atmospheres.
        #[serde(default = "default_pressure_threshold")]
        threshold_atm: f64,
    },
    /// Enter `target` distinct hazard-bearing cells.
    VisitHazards {
        /// Number of distinct cells required.
        #[serde(default = "default_visit_target")]
        target: u32,
    },
}

impl MissionObjective {
    /// Number of distinct cells the objective counts toward, if it counts any.
    #[must_use]
    pub fn target_count(&self) -> Option<u32> {
        match self {
            Self::VisitPointsOfInterest { target, .. } | Self::VisitHazards { target } => {
                Some(*target)
            }
            Self::ReachPointOfInterest { .. }
            | Self::ReachDepth { .. }
            | Self::ReachPressure { .. } => None,
        }
    }

    /// Short human-readable summary used by mission listings.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::ReachPointOfInterest { category: None } => "reach a point of interest".to_owned(),
            Self::ReachPointOfInterest {
                category: Some(category),
            } => format!("reach a {category}"),
            Self::VisitPointsOfInterest {
                target,
                category: None,
            } => format!("visit {target} distinct points of interest"),
            Self::VisitPointsOfInterest {
                target,
                category: Some(category),
            } => format!("visit {target} distinct {category} sites"),
            Self::ReachDepth { threshold_m } => format!("reach {threshold_m:.0} m depth"),
            Self::ReachPressure { threshold_atm } => format!("reach {threshold_atm:.0} atm"),
            Self::VisitHazards { target } => format!("survey {target} distinct hazard zones"),
        }
    }
}

/// Text voiced by the assistant at each stage of a mission.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MissionNarrative {
    /// Spoken when the mission starts.
    pub start: Option<String>,
    /// Spoken when the mission succeeds.
    pub success: Option<String>,
    /// Spoken when the mission fails.
    pub failure: Option<String>,
    /// Returned when the player asks for a hint.
    pub hint: Option<String>,
}

/// Read-only mission definition.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MissionTemplate {
    /// Identifier used to start the mission.
    pub id: MissionId,
    /// Display title.
    pub title: String,
    /// Briefing shown in the mission panel.
    #[serde(default)]
    pub description: String,
    /// Success condition.
    pub objective: MissionObjective,
    /// Countdown length in whole seconds; untimed when absent.
    #[serde(default)]
    pub time_limit_secs: Option<u32>,
    /// Assistant narration.
    #[serde(default)]
    pub narrative: MissionNarrative,
}

impl MissionTemplate {
    /// Countdown length as a duration.
    #[must_use]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs
            .map(|secs| Duration::from_secs(u64::from(secs)))
    }
}

fn default_visit_target() -> u32 {
    DEFAULT_VISIT_TARGET
}

fn default_depth_threshold() -> f64 {
    DEFAULT_DEPTH_THRESHOLD_M
}

fn default_pressure_threshold() -> f64 {
    DEFAULT_PRESSURE_THRESHOLD_ATM
}
