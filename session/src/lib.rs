#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Orchestrating session for an Abyssal expedition.
//!
//! A [`Session`] owns the immutable ocean grid, the player, and every system.
//! Adapters submit [`Command`] values through [`apply`], which reports
//! [`Event`] values in the order side effects happened. [`dispatch`] then
//! voices those events through an [`Assistant`].

use std::time::Duration;

use abyssal_core::{
    Assistant, CellCoord, Command, Event, GridDelta, PlayerState, DEFAULT_SAY_DURATION,
    FACT_SAY_DURATION,
};
use abyssal_system_facts::{self as facts, Facts};
use abyssal_system_missions::{MissionCatalog, Missions};
use abyssal_system_movement::{self as movement, MoveOutcome, Movement};
use abyssal_world::OceanGrid;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while creating a session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The grid has no cells for the player to occupy.
    #[error("the ocean grid is empty")]
    EmptyGrid,
    /// The configured start cell lies outside the grid.
    #[error(
        "start cell ({}, {}) lies outside the {rows}x{columns} grid",
        .start.row(),
        .start.column()
    )]
    StartOutsideGrid {
        /// Requested start cell.
        start: CellCoord,
        /// Grid rows.
        rows: u32,
        /// Grid columns.
        columns: u32,
    },
}

/// Tuning applied when constructing a session.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionConfig {
    /// Movement system configuration.
    pub movement: movement::Config,
    /// Fact system configuration.
    pub facts: facts::Config,
    /// Start cell; the grid centre when absent.
    pub start: Option<CellCoord>,
}

/// Authoritative state of a single expedition.
#[derive(Debug)]
pub struct Session {
    grid: OceanGrid,
    catalog: MissionCatalog,
    player: PlayerState,
    movement: Movement,
    missions: Missions,
    facts: Facts,
    clock: Duration,
}

impl Session {
    /// Creates a session with the player at the configured start cell.
    pub fn new(
        grid: OceanGrid,
        catalog: MissionCatalog,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let start = match config.start {
            Some(start) if grid.contains(start) => start,
            Some(start) => {
                return Err(SessionError::StartOutsideGrid {
                    start,
                    rows: grid.rows(),
                    columns: grid.columns(),
                })
            }
            None => grid.center().ok_or(SessionError::EmptyGrid)?,
        };

        info!(
            row = start.row(),
            column = start.column(),
            missions = catalog.len(),
            "session_started"
        );

        Ok(Self {
            grid,
            catalog,
            player: PlayerState::new(start),
            movement: Movement::new(config.movement),
            missions: Missions::new(),
            facts: Facts::new(config.facts),
            clock: Duration::ZERO,
        })
    }
}

/// Applies the provided command to the session, reporting events in order.
pub fn apply(session: &mut Session, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MovePlayer { delta } => move_player(session, delta, out_events),
        Command::SelectCell { cell } => select_cell(session, cell, out_events),
        Command::StartMission { mission } => match session.catalog.get(mission).cloned() {
            Some(template) => session.missions.start(template, session.clock, out_events),
            None => {
                warn!(mission = %mission, "mission_not_found");
                out_events.push(Event::MissionUnknown { mission });
            }
        },
        Command::RequestHint => {
            let message = match session.missions.active() {
                None => Err("No mission active."),
                Some(active) => match &active.template().narrative.hint {
                    Some(text) => Ok(Event::HintShared {
                        mission: active.id(),
                        text: text.clone(),
                    }),
                    None => Err("No hint available for this mission."),
                },
            };
            out_events.push(message.unwrap_or_else(|notice| Event::Notice {
                message: notice.to_owned(),
            }));
        }
        Command::Tick { dt } => {
            session.clock = session.clock.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });
            session.missions.advance(dt, out_events);
        }
    }
}

fn move_player(session: &mut Session, delta: GridDelta, out_events: &mut Vec<Event>) {
    let from = session.player.position;
    match session.movement.attempt(&session.grid, from, delta) {
        MoveOutcome::Rejected { delta } => {
            debug!(row = from.row(), column = from.column(), ?delta, "move_rejected");
            out_events.push(Event::MoveRejected { from, delta });
        }
        MoveOutcome::Committed { to, drift } => {
            session.player.position = to;
            debug!(row = to.row(), column = to.column(), ?drift, "player_moved");
            out_events.push(Event::PlayerMoved { from, to, drift });

            let Some(cell) = session.grid.cell(to) else {
                return;
            };
            for hazard in &cell.hazards {
                out_events.push(Event::HazardEncountered {
                    cell: to,
                    hazard: hazard.clone(),
                });
            }
            if let Some(text) = session.facts.lookup(&cell.biome) {
                out_events.push(Event::FactShared {
                    biome: cell.biome.clone(),
                    text: text.to_owned(),
                });
            }
            session.missions.evaluate_progress(cell, to, out_events);
        }
    }
}

fn select_cell(session: &mut Session, cell: CellCoord, out_events: &mut Vec<Event>) {
    if !session.grid.contains(cell) {
        warn!(row = cell.row(), column = cell.column(), "selection_outside_grid");
        return;
    }

    let delta = session.player.position.delta_to(cell);
    if delta.is_unit_step() {
        move_player(session, delta, out_events);
    } else {
        out_events.push(Event::CellInspected { cell });
    }
}

/// Voices events through the assistant's named hooks.
pub fn dispatch<A>(session: &Session, events: &[Event], assistant: &mut A)
where
    A: Assistant + ?Sized,
{
    for event in events {
        match event {
            Event::MissionStarted { mission, .. } => {
                if let Some(template) = session.catalog.get(*mission) {
                    assistant.mission_start(template);
                }
            }
            Event::MissionSucceeded { mission } => {
                if let Some(template) = session.catalog.get(*mission) {
                    assistant.mission_success(template);
                }
            }
            Event::MissionFailed { mission } => {
                if let Some(template) = session.catalog.get(*mission) {
                    assistant.mission_fail(template);
                }
            }
            Event::MissionAbandoned { mission } => {
                let title = session
                    .catalog
                    .get(*mission)
                    .map_or_else(|| mission.to_string(), |template| template.title.clone());
                assistant.say(&format!("Mission abandoned: {title}"), DEFAULT_SAY_DURATION);
            }
            Event::MissionUnknown { mission } => {
                assistant.say(&format!("Mission {mission} not found."), DEFAULT_SAY_DURATION);
            }
            Event::MissionProgressed {
                visited, target, ..
            } => {
                assistant.say(&format!("Progress: {visited}/{target}"), DEFAULT_SAY_DURATION);
            }
            Event::HazardEncountered { hazard, .. } => assistant.hazard_warning(hazard),
            Event::FactShared { text, .. } => assistant.say(text, FACT_SAY_DURATION),
            Event::HintShared { text, .. } => assistant.hint(text),
            Event::Notice { message } => assistant.say(message, DEFAULT_SAY_DURATION),
            Event::TimeAdvanced { .. }
            | Event::PlayerMoved { .. }
            | Event::MoveRejected { .. }
            | Event::CellInspected { .. }
            | Event::CountdownTicked { .. } => {}
        }
    }
}

/// Query functions that provide read-only access to the session.
pub mod query {
    use std::time::Duration;

    use abyssal_core::PlayerState;
    use abyssal_system_missions::{ActiveMission, MissionCatalog};
    use abyssal_world::{Cell, OceanGrid};

    use super::Session;

    /// Current player state.
    #[must_use]
    pub fn player(session: &Session) -> &PlayerState {
        &session.player
    }

    /// Ocean grid the session plays on.
    #[must_use]
    pub fn grid(session: &Session) -> &OceanGrid {
        &session.grid
    }

    /// Cell the player currently occupies.
    #[must_use]
    pub fn current_cell(session: &Session) -> Option<&Cell> {
        session.grid.cell(session.player.position)
    }

    /// Mission currently being played.
    #[must_use]
    pub fn active_mission(session: &Session) -> Option<&ActiveMission> {
        session.missions.active()
    }

    /// Missions that can be started.
    #[must_use]
    pub fn catalog(session: &Session) -> &MissionCatalog {
        &session.catalog
    }

    /// Total time applied through tick commands.
    #[must_use]
    pub fn clock(session: &Session) -> Duration {
        session.clock
    }
}
