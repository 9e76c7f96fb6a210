#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Mission engine that owns the lifecycle of the single active mission.
//!
//! The engine moves between `Idle` and `Active`. Success and failure both
//! discard the active instance and return to `Idle`. Starting a mission while
//! another is active discards the previous instance and reports it as
//! abandoned. The countdown lives inside the active instance, so discarding
//! the instance cancels it and no stale countdown can fire afterwards.

use std::{collections::BTreeSet, time::Duration};

use abyssal_core::{CellCoord, Event, MissionId, MissionObjective, MissionTemplate};
use abyssal_world::Cell;
use tracing::{debug, info};

mod catalog;

pub use catalog::{CatalogError, MissionCatalog};

const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

/// One-second countdown armed for a timed mission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining_secs: u32,
    carry: Duration,
}

impl Countdown {
    fn armed(limit_secs: u32) -> Self {
        Self {
            remaining_secs: limit_secs,
            carry: Duration::ZERO,
        }
    }

    /// Whole seconds left before the mission fails.
    #[must_use]
    pub const fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }
}

/// Runtime state of the mission currently being played.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveMission {
    template: MissionTemplate,
    visited_points: BTreeSet<CellCoord>,
    visited_hazards: BTreeSet<CellCoord>,
    started_at: Duration,
    countdown: Option<Countdown>,
}

impl ActiveMission {
    fn new(template: MissionTemplate, started_at: Duration) -> Self {
        let countdown = template.time_limit_secs.map(Countdown::armed);
        Self {
            template,
            visited_points: BTreeSet::new(),
            visited_hazards: BTreeSet::new(),
            started_at,
            countdown,
        }
    }

    /// Template the mission was started from.
    #[must_use]
    pub fn template(&self) -> &MissionTemplate {
        &self.template
    }

    /// Identifier of the mission.
    #[must_use]
    pub fn id(&self) -> MissionId {
        self.template.id
    }

    /// Distinct point-of-interest cells recorded so far.
    #[must_use]
    pub fn visited_points(&self) -> &BTreeSet<CellCoord> {
        &self.visited_points
    }

    /// Distinct hazard cells recorded so far.
    #[must_use]
    pub fn visited_hazards(&self) -> &BTreeSet<CellCoord> {
        &self.visited_hazards
    }

    /// Session time at which the mission started.
    #[must_use]
    pub const fn started_at(&self) -> Duration {
        self.started_at
    }

    /// Countdown of a timed mission.
    #[must_use]
    pub const fn countdown(&self) -> Option<Countdown> {
        self.countdown
    }

    fn evaluate(&mut self, cell: &Cell, position: CellCoord, out: &mut Vec<Event>) -> bool {
        let mission = self.template.id;
        match &self.template.objective {
            MissionObjective::ReachPointOfInterest { category } => {
                cell.has_point_of_interest(category.as_deref())
            }
            MissionObjective::VisitPointsOfInterest { target, category } => {
                if !cell.has_point_of_interest(category.as_deref()) {
                    return false;
                }
                record_visit(&mut self.visited_points, position, mission, *target, out)
            }
            MissionObjective::ReachDepth { threshold_m } => cell.depth_m.at_least(*threshold_m),
            MissionObjective::ReachPressure { threshold_atm } => {
                cell.pressure_atm.at_least(*threshold_atm)
            }
            MissionObjective::VisitHazards { target } => {
                if !cell.has_hazard() {
                    return false;
                }
                record_visit(&mut self.visited_hazards, position, mission, *target, out)
            }
        }
    }
}

/// Records `position` in `visited` and reports whether the target is reached.
fn record_visit(
    visited: &mut BTreeSet<CellCoord>,
    position: CellCoord,
    mission: MissionId,
    target: u32,
    out: &mut Vec<Event>,
) -> bool {
    if visited.insert(position) {
        let count = u32::try_from(visited.len()).unwrap_or(u32::MAX);
        out.push(Event::MissionProgressed {
            mission,
            visited: count,
            target,
        });
    }
    u32::try_from(visited.len()).map_or(true, |count| count >= target)
}

/// Mission engine holding at most one active mission.
#[derive(Clone, Debug, Default)]
pub struct Missions {
    active: Option<ActiveMission>,
}

impl Missions {
    /// Creates an idle mission engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mission currently being played, if any.
    #[must_use]
    pub fn active(&self) -> Option<&ActiveMission> {
        self.active.as_ref()
    }

    /// Starts `template`, discarding any mission that is still active.
    pub fn start(&mut self, template: MissionTemplate, now: Duration, out: &mut Vec<Event>) {
        if let Some(previous) = self.active.take() {
            info!(mission = %previous.id(), "mission_abandoned");
            out.push(Event::MissionAbandoned {
                mission: previous.id(),
            });
        }

        let mission = ActiveMission::new(template, now);
        info!(
            mission = %mission.id(),
            title = %mission.template.title,
            time_limit_secs = ?mission.template.time_limit_secs,
            "mission_started"
        );
        out.push(Event::MissionStarted {
            mission: mission.id(),
            time_limit: mission.template.time_limit(),
        });
        self.active = Some(mission);
    }

    /// Evaluates the active mission against the cell the player just entered.
    pub fn evaluate_progress(&mut self, cell: &Cell, position: CellCoord, out: &mut Vec<Event>) {
        let Some(active) = self.active.as_mut() else {
            return;
        };

        if active.evaluate(cell, position, out) {
            self.complete(true, out);
        }
    }

    /// Advances the countdown by one second, failing the mission when it runs out.
    pub fn tick(&mut self, out: &mut Vec<Event>) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let mission = active.id();
        let Some(countdown) = active.countdown.as_mut() else {
            return;
        };

        countdown.remaining_secs = countdown.remaining_secs.saturating_sub(1);
        let remaining_secs = countdown.remaining_secs;
        debug!(mission = %mission, remaining_secs, "countdown_ticked");
        out.push(Event::CountdownTicked {
            mission,
            remaining_secs,
        });

        if remaining_secs == 0 {
            self.complete(false, out);
        }
    }

    /// Accumulates elapsed time and runs one [`Missions::tick`] per whole second.
    pub fn advance(&mut self, dt: Duration, out: &mut Vec<Event>) {
        let Some(countdown) = self
            .active
            .as_mut()
            .and_then(|active| active.countdown.as_mut())
        else {
            return;
        };

        countdown.carry = countdown.carry.saturating_add(dt);
        let steps = countdown.carry.as_secs() / COUNTDOWN_STEP.as_secs();
        countdown.carry -= Duration::from_secs(steps * COUNTDOWN_STEP.as_secs());

        for _ in 0..steps {
            if self.active.is_none() {
                break;
            }
            self.tick(out);
        }
    }

    /// Ends the active mission; a no-op when idle.
    pub fn complete(&mut self, success: bool, out: &mut Vec<Event>) {
        let Some(finished) = self.active.take() else {
            return;
        };

        let mission = finished.id();
        if success {
            info!(mission = %mission, "mission_succeeded");
            out.push(Event::MissionSucceeded { mission });
        } else {
            info!(mission = %mission, "mission_failed");
            out.push(Event::MissionFailed { mission });
        }
    }
}
