//! Per-cell records describing the ocean environment.

use std::fmt;

/// Environmental measurement that may be unknown.
///
/// Values that failed to parse are stored as NaN and never satisfy a
/// threshold comparison, including a threshold of zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading(f64);

impl Reading {
    /// Measurement that could not be determined.
    pub const UNKNOWN: Self = Self(f64::NAN);

    /// Wraps a raw value. NaN is treated as unknown.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Parses a textual field, mapping malformed or empty input to [`Reading::UNKNOWN`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.trim().parse::<f64>().map_or(Self::UNKNOWN, Self)
    }

    /// Returns the value when it is known.
    #[must_use]
    pub fn value(self) -> Option<f64> {
        if self.0.is_nan() {
            None
        } else {
            Some(self.0)
        }
    }

    /// Reports whether the measurement is known.
    #[must_use]
    pub fn is_known(self) -> bool {
        !self.0.is_nan()
    }

    /// Reports whether the measurement is known and at least `threshold`.
    #[must_use]
    pub fn at_least(self, threshold: f64) -> bool {
        self.value().is_some_and(|value| value >= threshold)
    }
}

impl Default for Reading {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

/// Broad habitat category assigned to a cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Biome {
    /// Flat abyssal plain.
    Plain,
    /// Continental slope.
    Slope,
    /// Underwater mountain.
    Seamount,
    /// Deep oceanic trench.
    Trench,
    /// Hydrothermal vent field.
    Hydrothermal,
    /// Category not covered by the known habitats.
    Other(String),
    /// No category was recorded.
    #[default]
    Unknown,
}

impl Biome {
    /// Maps a textual biome label onto a category.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" => Self::Unknown,
            "plain" => Self::Plain,
            "slope" => Self::Slope,
            "seamount" => Self::Seamount,
            "trench" => Self::Trench,
            "hydrothermal" => Self::Hydrothermal,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Label used in data files and displays.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain => "plain",
            Self::Slope => "slope",
            Self::Seamount => "seamount",
            Self::Trench => "trench",
            Self::Hydrothermal => "hydrothermal",
            Self::Other(label) => label,
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ocean current flowing through a cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurrentVector {
    /// East-west component in metres per second; positive flows east.
    pub u_mps: Reading,
    /// North-south component in metres per second; positive pushes toward higher rows.
    pub v_mps: Reading,
    /// Magnitude reported by the data source.
    pub speed_mps: Reading,
    /// Free-form stability label.
    pub stability: String,
}

/// Danger descriptor attached to a cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hazard {
    /// Hazard category such as `"vent_plume"`.
    pub kind: String,
    /// Severity rating when recorded.
    pub severity: Option<i32>,
    /// Free-form notes.
    pub notes: String,
}

/// Coral reef health metrics; at most one record per cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoralMetrics {
    /// Percentage of the seabed covered by coral.
    pub cover_pct: Reading,
    /// Composite reef health index.
    pub health_index: Reading,
    /// Likelihood of bleaching.
    pub bleaching_risk: Reading,
    /// Biodiversity index.
    pub biodiversity_index: Reading,
}

/// Extractable resource deposit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resource {
    /// Resource family such as `"mineral"`.
    pub family: String,
    /// Specific resource type.
    pub kind: String,
    /// Relative abundance.
    pub abundance: Reading,
    /// Purity of the deposit.
    pub purity: Reading,
    /// Difficulty of extraction.
    pub extraction_difficulty: Reading,
    /// Environmental cost of extraction.
    pub environmental_impact: Reading,
    /// Estimated economic value.
    pub economic_value: Reading,
    /// Free-form description.
    pub description: String,
}

/// Species observed in a cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LifeForm {
    /// Species name.
    pub species: String,
    /// Typical depth in metres.
    pub avg_depth_m: Reading,
    /// Population density.
    pub density: Reading,
    /// Threat posed to the submersible.
    pub threat_level: Option<i32>,
    /// Behaviour label.
    pub behavior: String,
    /// Trophic level in the food web.
    pub trophic_level: Option<i32>,
    /// Species this life form preys on, in data order.
    pub prey_species: Vec<String>,
}

/// Notable feature that missions can target.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointOfInterest {
    /// Identifier assigned by the data source.
    pub id: String,
    /// Category such as `"vent"` or `"wreck"`.
    pub category: String,
    /// Short display label.
    pub label: String,
    /// Longer description.
    pub description: String,
    /// Scientific value of visiting the feature.
    pub research_value: Reading,
}

#[cfg(test)]
mod tests {
    use super::{Biome, Reading};

    #[test]
    fn unknown_reading_never_meets_threshold() {
        let reading = Reading::parse("n/a");
        assert!(!reading.is_known());
        assert!(!reading.at_least(0.0));
        assert!(!reading.at_least(f64::NEG_INFINITY));
    }

    #[test]
    fn threshold_comparison_is_inclusive() {
        assert!(Reading::new(6000.0).at_least(6000.0));
        assert!(!Reading::new(5999.9).at_least(6000.0));
    }

    #[test]
    fn empty_field_is_unknown() {
        assert_eq!(Reading::parse("  ").value(), None);
        assert_eq!(Reading::parse(" 12.5 ").value(), Some(12.5));
    }

    #[test]
    fn biome_labels_round_trip() {
        for label in ["plain", "slope", "seamount", "trench", "hydrothermal", "reef"] {
            assert_eq!(Biome::parse(label).as_str(), label);
        }
        assert_eq!(Biome::parse(""), Biome::Unknown);
    }
}
