//! Text rendering of the player HUD, cell details and world summary.

use abyssal_core::{CellCoord, Reading, MAX_VITAL};
use abyssal_session::{query, Session};
use abyssal_system_missions::MissionCatalog;
use abyssal_world::{stats::Range, Cell, LoadedWorld, WorldStats};

/// Formats `value` with `decimals` places, or `N/A` when it is unknown.
pub(crate) fn fmt(value: Reading, decimals: usize, suffix: &str) -> String {
    match value.value() {
        Some(value) => format!("{value:.decimals$}{suffix}"),
        None => format!("N/A{suffix}"),
    }
}

fn depth(value: Reading) -> String {
    fmt(value, 1, "m")
}

fn pressure(value: Reading) -> String {
    fmt(value, 1, " atm")
}

fn temperature(value: Reading) -> String {
    fmt(value, 2, "°C")
}

fn vital(value: u8) -> String {
    format!("{}%", value.min(MAX_VITAL))
}

/// Lines describing the player and the active mission.
pub(crate) fn status(session: &Session) -> Vec<String> {
    let player = query::player(session);
    let position = player.position;
    let mut lines = vec![format!(
        "Position ({}, {}) | Health {} | Hunger {}",
        position.row(),
        position.column(),
        vital(player.health),
        vital(player.hunger),
    )];

    if let Some(cell) = query::current_cell(session) {
        lines.push(format!(
            "Depth {} | Pressure {} | Temp {} | Biome {}",
            depth(cell.depth_m),
            pressure(cell.pressure_atm),
            temperature(cell.temperature_c),
            cell.biome,
        ));
    }

    match query::active_mission(session) {
        Some(active) => {
            let template = active.template();
            let mut line = format!(
                "Mission: {} ({})",
                template.title,
                template.objective.summary()
            );
            if let Some(target) = template.objective.target_count() {
                let visited = active.visited_points().len() + active.visited_hazards().len();
                line.push_str(&format!(" {visited}/{target}"));
            }
            if let Some(countdown) = active.countdown() {
                line.push_str(&format!(" | {}s left", countdown.remaining_secs()));
            }
            lines.push(line);
        }
        None => lines.push("Mission: none".to_owned()),
    }
    lines
}

/// Lines describing the cell at `coord`.
pub(crate) fn inspect(coord: CellCoord, cell: &Cell) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Cell ({}, {}): {} | Depth {} | Pressure {} | Temp {}",
            coord.row(),
            coord.column(),
            cell.biome,
            depth(cell.depth_m),
            pressure(cell.pressure_atm),
            temperature(cell.temperature_c),
        ),
        format!(
            "Light {} | Roughness {}",
            fmt(cell.light_intensity, 2, ""),
            fmt(cell.terrain_roughness, 2, ""),
        ),
    ];

    if let Some(current) = &cell.current {
        lines.push(format!(
            "Current u {} v {} ({})",
            fmt(current.u_mps, 2, " m/s"),
            fmt(current.v_mps, 2, " m/s"),
            fmt(current.speed_mps, 2, " m/s"),
        ));
    }
    for hazard in &cell.hazards {
        lines.push(format!("Hazard: {}", hazard.kind));
    }
    if let Some(corals) = &cell.corals {
        lines.push(format!(
            "Coral cover {} | health {}",
            fmt(corals.cover_pct, 1, "%"),
            fmt(corals.health_index, 2, ""),
        ));
    }
    for poi in &cell.points_of_interest {
        lines.push(format!("Point of interest: {} [{}]", poi.label, poi.category));
    }
    for resource in &cell.resources {
        lines.push(format!("Resource: {} ({})", resource.kind, resource.family));
    }
    for life in &cell.life {
        lines.push(format!("Life: {}", life.species));
    }
    lines
}

/// Lines listing every mission in the catalog.
pub(crate) fn missions(catalog: &MissionCatalog) -> Vec<String> {
    catalog
        .iter()
        .map(|mission| {
            let limit = mission
                .time_limit_secs
                .map_or_else(|| "untimed".to_owned(), |secs| format!("{secs}s"));
            format!(
                "{:>3}  {} ({limit}): {}",
                mission.id, mission.title, mission.description
            )
        })
        .collect()
}

fn range(label: &str, range: Option<&Range>, suffix: &str) -> String {
    match range {
        Some(range) => format!(
            "{label} {:.1}..{:.1}{suffix} (mean {:.1})",
            range.min, range.max, range.mean
        ),
        None => format!("{label} N/A"),
    }
}

/// Lines summarising a freshly loaded world.
pub(crate) fn world_summary(world: &LoadedWorld, stats: &WorldStats) -> Vec<String> {
    let declared = if world.metadata.biomes.is_empty() {
        "N/A".to_owned()
    } else {
        world.metadata.biomes.join(", ")
    };
    let counts = stats
        .biome_counts
        .iter()
        .map(|(biome, count)| format!("{biome} {count}"))
        .collect::<Vec<_>>()
        .join(", ");
    vec![
        format!(
            "Ocean grid {}x{}",
            world.grid.rows(),
            world.grid.columns()
        ),
        range("Depth", stats.depth_m.as_ref(), "m"),
        range("Pressure", stats.pressure_atm.as_ref(), " atm"),
        format!("Biomes from metadata: {declared}"),
        format!("Biome cells: {counts}"),
        format!(
            "Hazards {} in {} cells | Points of interest {}",
            stats.hazards, stats.hazard_cells, stats.points_of_interest
        ),
    ]
}
