use std::time::Duration;

use abyssal_core::{
    CellCoord, Event, Hazard, MissionId, MissionNarrative, MissionObjective, MissionTemplate,
    PointOfInterest, Reading,
};
use abyssal_system_missions::Missions;
use abyssal_world::Cell;

fn mission(id: u32, objective: MissionObjective, time_limit_secs: Option<u32>) -> MissionTemplate {
    MissionTemplate {
        id: MissionId::new(id),
        title: format!("Mission {id}"),
        description: String::new(),
        objective,
        time_limit_secs,
        narrative: MissionNarrative::default(),
    }
}

fn hazard_cell() -> Cell {
    Cell {
        hazards: vec![Hazard {
            kind: "vent_plume".to_owned(),
            severity: Some(2),
            notes: String::new(),
        }],
        ..Cell::default()
    }
}

fn poi_cell(category: &str) -> Cell {
    Cell {
        points_of_interest: vec![PointOfInterest {
            category: category.to_owned(),
            ..PointOfInterest::default()
        }],
        ..Cell::default()
    }
}

fn depth_cell(depth_m: f64) -> Cell {
    Cell {
        depth_m: Reading::new(depth_m),
        ..Cell::default()
    }
}

fn succeeded(events: &[Event]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, Event::MissionSucceeded { .. }))
}

fn failed(events: &[Event]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, Event::MissionFailed { .. }))
}

#[test]
fn start_emits_started_event_and_arms_countdown() {
    let mut missions = Missions::new();
    let mut events = Vec::new();

    missions.start(
        mission(1, MissionObjective::VisitHazards { target: 3 }, Some(30)),
        Duration::from_secs(7),
        &mut events,
    );

    assert_eq!(
        events,
        vec![Event::MissionStarted {
            mission: MissionId::new(1),
            time_limit: Some(Duration::from_secs(30)),
        }]
    );
    let active = missions.active().expect("active mission");
    assert_eq!(active.started_at(), Duration::from_secs(7));
    assert_eq!(active.countdown().map(|c| c.remaining_secs()), Some(30));
    assert!(active.visited_hazards().is_empty());
}

#[test]
fn repeated_hazard_tile_counts_once() {
    let mut missions = Missions::new();
    let mut events = Vec::new();
    missions.start(
        mission(1, MissionObjective::VisitHazards { target: 3 }, None),
        Duration::ZERO,
        &mut events,
    );

    let cell = hazard_cell();
    missions.evaluate_progress(&cell, CellCoord::new(1, 1), &mut events);
    missions.evaluate_progress(&cell, CellCoord::new(1, 1), &mut events);
    missions.evaluate_progress(&cell, CellCoord::new(1, 2), &mut events);

    assert!(!succeeded(&events), "two distinct tiles must not succeed");
    let active = missions.active().expect("still active");
    assert_eq!(active.visited_hazards().len(), 2);

    missions.evaluate_progress(&cell, CellCoord::new(4, 0), &mut events);
    assert!(succeeded(&events), "third distinct tile succeeds");
    assert!(missions.active().is_none());

    let progress: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::MissionProgressed {
                visited, target, ..
            } => Some((*visited, *target)),
            _ => None,
        })
        .collect();
    assert_eq!(progress, vec![(1, 3), (2, 3), (3, 3)]);
}

#[test]
fn hazard_free_cells_do_not_count() {
    let mut missions = Missions::new();
    let mut events = Vec::new();
    missions.start(
        mission(1, MissionObjective::VisitHazards { target: 1 }, None),
        Duration::ZERO,
        &mut events,
    );

    missions.evaluate_progress(&Cell::default(), CellCoord::new(0, 0), &mut events);
    assert!(missions.active().expect("active").visited_hazards().is_empty());
    assert!(!succeeded(&events));
}

#[test]
fn multi_poi_respects_category_and_distinct_cells() {
    let mut missions = Missions::new();
    let mut events = Vec::new();
    missions.start(
        mission(
            2,
            MissionObjective::VisitPointsOfInterest {
                target: 2,
                category: Some("vent".to_owned()),
            },
            None,
        ),
        Duration::ZERO,
        &mut events,
    );

    missions.evaluate_progress(&poi_cell("wreck"), CellCoord::new(0, 0), &mut events);
    missions.evaluate_progress(&poi_cell("vent"), CellCoord::new(0, 1), &mut events);
    missions.evaluate_progress(&poi_cell("vent"), CellCoord::new(0, 1), &mut events);
    assert!(!succeeded(&events));

    missions.evaluate_progress(&poi_cell("vent"), CellCoord::new(2, 2), &mut events);
    assert!(succeeded(&events));
}

#[test]
fn reach_poi_succeeds_on_any_point_of_interest() {
    let mut missions = Missions::new();
    let mut events = Vec::new();
    missions.start(
        mission(3, MissionObjective::ReachPointOfInterest { category: None }, None),
        Duration::ZERO,
        &mut events,
    );

    missions.evaluate_progress(&Cell::default(), CellCoord::new(0, 0), &mut events);
    assert!(!succeeded(&events));
    missions.evaluate_progress(&poi_cell("wreck"), CellCoord::new(0, 1), &mut events);
    assert_eq!(
        events.last(),
        Some(&Event::MissionSucceeded {
            mission: MissionId::new(3)
        })
    );
}

#[test]
fn depth_threshold_is_inclusive() {
    let mut missions = Missions::new();
    let mut events = Vec::new();
    missions.start(
        mission(
            4,
            MissionObjective::ReachDepth {
                threshold_m: 6000.0,
            },
            None,
        ),
        Duration::ZERO,
        &mut events,
    );

    missions.evaluate_progress(&depth_cell(5999.9), CellCoord::new(0, 0), &mut events);
    assert!(!succeeded(&events));
    missions.evaluate_progress(&depth_cell(6000.0), CellCoord::new(0, 1), &mut events);
    assert!(succeeded(&events));
}

#[test]
fn unknown_pressure_never_satisfies_threshold() {
    for threshold_atm in [0.0, 500.0, -1.0] {
        let mut missions = Missions::new();
        let mut events = Vec::new();
        missions.start(
            mission(5, MissionObjective::ReachPressure { threshold_atm }, None),
            Duration::ZERO,
            &mut events,
        );

        let cell = Cell {
            pressure_atm: Reading::parse("garbled"),
            ..Cell::default()
        };
        missions.evaluate_progress(&cell, CellCoord::new(0, 0), &mut events);
        assert!(
            !succeeded(&events),
            "unknown pressure satisfied threshold {threshold_atm}"
        );
    }
}

#[test]
fn timed_mission_fails_exactly_at_last_tick() {
    let mut missions = Missions::new();
    let mut events = Vec::new();
    missions.start(
        mission(6, MissionObjective::VisitHazards { target: 3 }, Some(3)),
        Duration::ZERO,
        &mut events,
    );
    events.clear();

    missions.tick(&mut events);
    missions.tick(&mut events);
    assert!(!failed(&events), "failed before the third tick");
    assert!(missions.active().is_some());

    missions.tick(&mut events);
    assert!(failed(&events), "expected failure at the third tick");
    assert!(missions.active().is_none());

    let remaining: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::CountdownTicked { remaining_secs, .. } => Some(*remaining_secs),
            _ => None,
        })
        .collect();
    assert_eq!(remaining, vec![2, 1, 0]);
}

#[test]
fn advance_accumulates_partial_seconds() {
    let mut missions = Missions::new();
    let mut events = Vec::new();
    missions.start(
        mission(7, MissionObjective::VisitHazards { target: 3 }, Some(2)),
        Duration::ZERO,
        &mut events,
    );
    events.clear();

    missions.advance(Duration::from_millis(600), &mut events);
    assert!(events.is_empty());
    missions.advance(Duration::from_millis(600), &mut events);
    assert_eq!(
        events,
        vec![Event::CountdownTicked {
            mission: MissionId::new(7),
            remaining_secs: 1,
        }]
    );

    missions.advance(Duration::from_secs(5), &mut events);
    assert!(failed(&events));
    let failures = events
        .iter()
        .filter(|event| matches!(event, Event::MissionFailed { .. }))
        .count();
    assert_eq!(failures, 1, "a large step fails the mission only once");
}

#[test]
fn restarting_cancels_previous_countdown() {
    let mut missions = Missions::new();
    let mut events = Vec::new();
    missions.start(
        mission(8, MissionObjective::VisitHazards { target: 3 }, Some(5)),
        Duration::ZERO,
        &mut events,
    );
    missions.advance(Duration::from_secs(3), &mut events);

    events.clear();
    missions.start(
        mission(9, MissionObjective::VisitHazards { target: 3 }, Some(60)),
        Duration::from_secs(3),
        &mut events,
    );
    assert_eq!(
        events[0],
        Event::MissionAbandoned {
            mission: MissionId::new(8)
        }
    );

    missions.advance(Duration::from_secs(10), &mut events);
    assert!(!failed(&events), "discarded mission must not fail");
    let active = missions.active().expect("replacement active");
    assert_eq!(active.id(), MissionId::new(9));
    assert_eq!(active.countdown().map(|c| c.remaining_secs()), Some(50));
}

#[test]
fn untimed_mission_ignores_ticks() {
    let mut missions = Missions::new();
    let mut events = Vec::new();
    missions.start(
        mission(10, MissionObjective::ReachPointOfInterest { category: None }, None),
        Duration::ZERO,
        &mut events,
    );
    events.clear();

    missions.tick(&mut events);
    missions.advance(Duration::from_secs(1000), &mut events);
    assert!(events.is_empty());
    assert!(missions.active().is_some());
}

#[test]
fn operations_without_active_mission_are_no_ops() {
    let mut missions = Missions::new();
    let mut events = Vec::new();

    missions.evaluate_progress(&hazard_cell(), CellCoord::new(0, 0), &mut events);
    missions.tick(&mut events);
    missions.advance(Duration::from_secs(3), &mut events);
    missions.complete(true, &mut events);
    missions.complete(false, &mut events);

    assert!(events.is_empty());
}

#[test]
fn success_cancels_countdown() {
    let mut missions = Missions::new();
    let mut events = Vec::new();
    missions.start(
        mission(11, MissionObjective::ReachPointOfInterest { category: None }, Some(2)),
        Duration::ZERO,
        &mut events,
    );
    missions.evaluate_progress(&poi_cell("wreck"), CellCoord::new(0, 0), &mut events);
    assert!(succeeded(&events));

    events.clear();
    missions.advance(Duration::from_secs(10), &mut events);
    assert!(events.is_empty());
}
