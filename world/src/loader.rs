//! Builds the ocean grid from a directory of tabular data files.
//!
//! The directory holds `metadata.json` plus one CSV file per record family,
//! each keyed by integer `row` and `col` columns. Numeric fields that fail to
//! parse become [`Reading::UNKNOWN`]; only unreadable files, malformed
//! metadata, and unusable coordinates abort the load.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use abyssal_core::{
    Biome, CellCoord, CoralMetrics, CurrentVector, Hazard, LifeForm, PointOfInterest, Reading,
    Resource,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    table::{Record, Table},
    Cell, OceanGrid,
};

const METADATA_FILE: &str = "metadata.json";
const CELLS_FILE: &str = "cells.csv";
const CURRENTS_FILE: &str = "currents.csv";
const HAZARDS_FILE: &str = "hazards.csv";
const CORALS_FILE: &str = "corals.csv";
const RESOURCES_FILE: &str = "resources.csv";
const LIFE_FILE: &str = "life.csv";
const POI_FILE: &str = "poi.csv";

const PREY_SEPARATOR: char = ';';

/// Errors that abort loading the world.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A data file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The metadata file is not valid JSON of the expected shape.
    #[error("failed to parse {}: {source}", .path.display())]
    Metadata {
        /// Metadata file path.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// A row or column field is not an integer.
    #[error("{file}:{line}: invalid {field} `{value}`")]
    InvalidCoordinate {
        /// File containing the record.
        file: &'static str,
        /// Line number of the record.
        line: usize,
        /// Name of the offending column.
        field: &'static str,
        /// Raw field contents.
        value: String,
    },
    /// A record addresses a cell outside the declared grid.
    #[error("{file}:{line}: cell ({row}, {column}) lies outside the {rows}x{columns} grid")]
    OutOfBounds {
        /// File containing the record.
        file: &'static str,
        /// Line number of the record.
        line: usize,
        /// Row addressed by the record.
        row: i64,
        /// Column addressed by the record.
        column: i64,
        /// Declared grid rows.
        rows: u32,
        /// Declared grid columns.
        columns: u32,
    },
}

/// Grid dimensions declared by the metadata file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct GridMetadata {
    /// Number of rows.
    pub rows: u32,
    /// Number of columns.
    pub cols: u32,
}

/// Contents of `metadata.json`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct WorldMetadata {
    /// Grid dimensions.
    pub grid: GridMetadata,
    /// Biome labels present in the data set.
    #[serde(default)]
    pub biomes: Vec<String>,
}

/// Result of a successful load.
#[derive(Clone, Debug)]
pub struct LoadedWorld {
    /// Immutable ocean grid.
    pub grid: OceanGrid,
    /// Metadata the grid was built from.
    pub metadata: WorldMetadata,
}

/// Loads the world stored in `dir`.
pub fn load_world(dir: impl AsRef<Path>) -> Result<LoadedWorld, LoadError> {
    let dir = dir.as_ref();
    let metadata = read_metadata(&dir.join(METADATA_FILE))?;
    let mut grid = OceanGrid::empty(metadata.grid.rows, metadata.grid.cols);

    apply_table(&mut grid, dir, CELLS_FILE, apply_environment)?;
    apply_table(&mut grid, dir, CURRENTS_FILE, |cell, record| {
        cell.current = Some(CurrentVector {
            u_mps: Reading::parse(record.get("u_mps")),
            v_mps: Reading::parse(record.get("v_mps")),
            speed_mps: Reading::parse(record.get("speed_mps")),
            stability: record.get("stability").to_owned(),
        });
    })?;
    apply_table(&mut grid, dir, HAZARDS_FILE, |cell, record| {
        cell.hazards.push(Hazard {
            kind: record.get("type").to_owned(),
            severity: parse_integer(record.get("severity")),
            notes: record.get("notes").to_owned(),
        });
    })?;
    apply_table(&mut grid, dir, CORALS_FILE, |cell, record| {
        cell.corals = Some(CoralMetrics {
            cover_pct: Reading::parse(record.get("coral_cover_pct")),
            health_index: Reading::parse(record.get("health_index")),
            bleaching_risk: Reading::parse(record.get("bleaching_risk")),
            biodiversity_index: Reading::parse(record.get("biodiversity_index")),
        });
    })?;
    apply_table(&mut grid, dir, RESOURCES_FILE, |cell, record| {
        cell.resources.push(Resource {
            family: record.get("family").to_owned(),
            kind: record.get("type").to_owned(),
            abundance: Reading::parse(record.get("abundance")),
            purity: Reading::parse(record.get("purity")),
            extraction_difficulty: Reading::parse(record.get("extraction_difficulty")),
            environmental_impact: Reading::parse(record.get("environmental_impact")),
            economic_value: Reading::parse(record.get("economic_value")),
            description: record.get("description").to_owned(),
        });
    })?;
    apply_table(&mut grid, dir, LIFE_FILE, |cell, record| {
        cell.life.push(LifeForm {
            species: record.get("species").to_owned(),
            avg_depth_m: Reading::parse(record.get("avg_depth_m")),
            density: Reading::parse(record.get("density")),
            threat_level: parse_integer(record.get("threat_level")),
            behavior: record.get("behavior").to_owned(),
            trophic_level: parse_integer(record.get("trophic_level")),
            prey_species: split_prey(record.get("prey_species")),
        });
    })?;
    apply_table(&mut grid, dir, POI_FILE, |cell, record| {
        cell.points_of_interest.push(PointOfInterest {
            id: record.get("id").to_owned(),
            category: record.get("category").to_owned(),
            label: record.get("label").to_owned(),
            description: record.get("description").to_owned(),
            research_value: Reading::parse(record.get("research_value")),
        });
    })?;

    info!(
        rows = grid.rows(),
        columns = grid.columns(),
        biomes = ?metadata.biomes,
        dir = %dir.display(),
        "world_loaded"
    );

    Ok(LoadedWorld { grid, metadata })
}

fn read_metadata(path: &Path) -> Result<WorldMetadata, LoadError> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|source| LoadError::Metadata {
        path: path.to_path_buf(),
        source,
    })
}

fn read_text(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_table<F>(
    grid: &mut OceanGrid,
    dir: &Path,
    file: &'static str,
    mut apply: F,
) -> Result<(), LoadError>
where
    F: FnMut(&mut Cell, Record<'_>),
{
    let table = Table::parse(&read_text(&dir.join(file))?);
    let mut applied = 0_usize;
    for record in table.records() {
        let coord = locate(grid, file, record)?;
        if let Some(cell) = grid.cell_mut(coord) {
            apply(cell, record);
            applied += 1;
        }
    }
    debug!(file, records = applied, "table_applied");
    Ok(())
}

fn apply_environment(cell: &mut Cell, record: Record<'_>) {
    cell.x_km = Reading::parse(record.get("x_km"));
    cell.y_km = Reading::parse(record.get("y_km"));
    cell.lat = Reading::parse(record.get("lat"));
    cell.lon = Reading::parse(record.get("lon"));
    cell.depth_m = Reading::parse(record.get("depth_m"));
    cell.pressure_atm = Reading::parse(record.get("pressure_atm"));
    cell.biome = Biome::parse(record.get("biome"));
    cell.temperature_c = Reading::parse(record.get("temperature_c"));
    cell.light_intensity = Reading::parse(record.get("light_intensity"));
    cell.terrain_roughness = Reading::parse(record.get("terrain_roughness"));
}

fn locate(
    grid: &OceanGrid,
    file: &'static str,
    record: Record<'_>,
) -> Result<CellCoord, LoadError> {
    let row = coordinate_field(file, record, "row")?;
    let column = coordinate_field(file, record, "col")?;
    grid.checked_coord(row, column).ok_or(LoadError::OutOfBounds {
        file,
        line: record.line(),
        row,
        column,
        rows: grid.rows(),
        columns: grid.columns(),
    })
}

fn coordinate_field(
    file: &'static str,
    record: Record<'_>,
    field: &'static str,
) -> Result<i64, LoadError> {
    let raw = record.get(field);
    raw.parse::<i64>().map_err(|_| LoadError::InvalidCoordinate {
        file,
        line: record.line(),
        field,
        value: raw.to_owned(),
    })
}

fn parse_integer(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    raw.parse::<i32>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(|value| value.trunc() as i32)
    })
}

fn split_prey(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(PREY_SEPARATOR)
        .map(|species| species.trim().to_owned())
        .collect()
}
