//! Static mission templates, either built in or read from a TOML file.

use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};

use abyssal_core::{MissionId, MissionNarrative, MissionObjective, MissionTemplate};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while reading a mission catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read mission catalog {}: {source}", .path.display())]
    Io {
        /// Catalog path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The catalog is not valid TOML or uses an unknown objective type.
    #[error("failed to parse mission catalog: {0}")]
    Parse(#[from] toml::de::Error),
    /// Two templates share an identifier.
    #[error("mission id {0} is defined more than once")]
    DuplicateId(MissionId),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    missions: Vec<MissionTemplate>,
}

/// Ordered collection of mission templates keyed by identifier.
#[derive(Clone, Debug, PartialEq)]
pub struct MissionCatalog {
    missions: Vec<MissionTemplate>,
}

impl MissionCatalog {
    /// Builds a catalog, rejecting duplicate identifiers.
    pub fn new(missions: Vec<MissionTemplate>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for mission in &missions {
            if !seen.insert(mission.id) {
                return Err(CatalogError::DuplicateId(mission.id));
            }
        }
        Ok(Self { missions })
    }

    /// Parses a catalog from TOML text containing `[[missions]]` tables.
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::new(file.missions)
    }

    /// Reads and parses the catalog stored at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Built-in expedition missions.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            missions: vec![
                template(
                    1,
                    "Vent Hunter",
                    "Find 3 hydrothermal vents.",
                    MissionObjective::VisitPointsOfInterest {
                        target: 3,
                        category: Some("vent".to_owned()),
                    },
                    Some(120),
                    MissionNarrative {
                        start: Some(
                            "Sonar shows vent activity nearby. Locate three vents.".to_owned(),
                        ),
                        success: Some(
                            "Three vents logged. The chemosynthesis team owes you one.".to_owned(),
                        ),
                        failure: Some("Out of time. The vent survey will have to wait.".to_owned()),
                        hint: Some(
                            "Vents cluster in hydrothermal fields; follow the warm water."
                                .to_owned(),
                        ),
                    },
                ),
                template(
                    2,
                    "Into the Trench",
                    "Descend to at least 6000 m.",
                    MissionObjective::ReachDepth {
                        threshold_m: 6000.0,
                    },
                    Some(90),
                    MissionNarrative {
                        start: Some("Ballast ready. Take us below 6000 metres.".to_owned()),
                        success: Some("Hadal depth reached. Hull holding.".to_owned()),
                        failure: Some(
                            "Dive window closed before we reached the trench floor.".to_owned(),
                        ),
                        hint: Some("Trench cells are the deepest on the map.".to_owned()),
                    },
                ),
                template(
                    3,
                    "First Contact",
                    "Reach any point of interest.",
                    MissionObjective::ReachPointOfInterest { category: None },
                    None,
                    MissionNarrative {
                        start: Some("Find something worth a closer look.".to_owned()),
                        success: Some("Point of interest reached.".to_owned()),
                        failure: None,
                        hint: Some("Marked tiles carry points of interest.".to_owned()),
                    },
                ),
                template(
                    4,
                    "Crush Depth",
                    "Withstand at least 500 atm of pressure.",
                    MissionObjective::ReachPressure {
                        threshold_atm: 500.0,
                    },
                    Some(150),
                    MissionNarrative {
                        start: Some("Test the hull: find 500 atmospheres.".to_owned()),
                        success: Some(
                            "500 atm recorded. The hull engineers will be thrilled.".to_owned(),
                        ),
                        failure: Some("Pressure test aborted on time.".to_owned()),
                        hint: Some("Pressure rises with depth.".to_owned()),
                    },
                ),
                template(
                    5,
                    "Hazard Survey",
                    "Survey 3 distinct hazard zones.",
                    MissionObjective::VisitHazards { target: 3 },
                    Some(180),
                    MissionNarrative {
                        start: Some("Chart three hazard zones for the next crew.".to_owned()),
                        success: Some("Hazard survey complete.".to_owned()),
                        failure: Some("Survey incomplete. Return to base.".to_owned()),
                        hint: Some("Hazard tiles have a red border.".to_owned()),
                    },
                ),
            ],
        }
    }

    /// Looks up a template by identifier.
    #[must_use]
    pub fn get(&self, id: MissionId) -> Option<&MissionTemplate> {
        self.missions.iter().find(|mission| mission.id == id)
    }

    /// Iterates over the templates in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &MissionTemplate> {
        self.missions.iter()
    }

    /// Number of templates in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.missions.len()
    }

    /// Reports whether the catalog holds no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }
}

impl Default for MissionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn template(
    id: u32,
    title: &str,
    description: &str,
    objective: MissionObjective,
    time_limit_secs: Option<u32>,
    narrative: MissionNarrative,
) -> MissionTemplate {
    MissionTemplate {
        id: MissionId::new(id),
        title: title.to_owned(),
        description: description.to_owned(),
        objective,
        time_limit_secs,
        narrative,
    }
}
