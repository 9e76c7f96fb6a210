use std::time::Duration;

use abyssal_core::{
    Biome, CellCoord, Command, CurrentVector, Direction, Event, Hazard, MissionId, Reading,
};
use abyssal_session::{apply, query, Session, SessionConfig};
use abyssal_system_facts as facts;
use abyssal_system_missions::MissionCatalog;
use abyssal_world::{Cell, OceanGrid};

const INTO_THE_TRENCH: MissionId = MissionId::new(2);
const HAZARD_SURVEY: MissionId = MissionId::new(5);

#[test]
fn deterministic_replay_reproduces_event_stream() {
    let script = scripted_commands();
    let first = replay(script.clone());
    let second = replay(script);

    assert_eq!(first, second, "replay diverged between runs");

    assert!(
        first
            .iter()
            .any(|event| matches!(event, Event::FactShared { .. })),
        "expected the seeded generator to share at least one fact"
    );
    assert!(first.iter().any(|event| matches!(
        event,
        Event::MissionAbandoned { mission } if *mission == INTO_THE_TRENCH
    )));
    assert!(first
        .iter()
        .any(|event| matches!(event, Event::HazardEncountered { .. })));
    assert!(first
        .iter()
        .any(|event| matches!(event, Event::CountdownTicked { .. })));
}

#[test]
fn replay_sessions_end_in_the_same_state() {
    let script = scripted_commands();
    let (first, _) = run_session(script.clone());
    let (second, _) = run_session(script);

    assert_eq!(query::player(&first), query::player(&second));
    assert_eq!(query::clock(&first), query::clock(&second));
    assert_eq!(
        query::active_mission(&first).map(|mission| mission.id()),
        query::active_mission(&second).map(|mission| mission.id())
    );
}

fn replay(commands: Vec<Command>) -> Vec<Event> {
    run_session(commands).1
}

fn run_session(commands: Vec<Command>) -> (Session, Vec<Event>) {
    let config = SessionConfig {
        facts: facts::Config::new(0.5, 42),
        start: Some(CellCoord::new(0, 0)),
        ..SessionConfig::default()
    };
    let mut session =
        Session::new(replay_grid(), MissionCatalog::standard(), config).expect("session");

    let mut events = Vec::new();
    for command in commands {
        apply(&mut session, command, &mut events);
    }
    (session, events)
}

/// 6x6 grid: vent fields west, trench east, hazards along the first row and the
/// last column, and an eastward current through row 2.
fn replay_grid() -> OceanGrid {
    OceanGrid::from_fn(6, 6, |coord| {
        let mut cell = Cell {
            depth_m: Reading::new(4000.0 + f64::from(coord.row()) * 500.0),
            biome: if coord.column() < 3 {
                Biome::Hydrothermal
            } else {
                Biome::Trench
            },
            ..Cell::default()
        };
        if coord.row() == 0 || coord.column() == 5 {
            cell.hazards.push(Hazard {
                kind: "vent_plume".to_owned(),
                severity: Some(2),
                notes: String::new(),
            });
        }
        if coord.row() == 2 {
            cell.current = Some(CurrentVector {
                u_mps: Reading::new(0.6),
                v_mps: Reading::new(0.0),
                speed_mps: Reading::new(0.6),
                stability: "steady".to_owned(),
            });
        }
        cell
    })
}

fn scripted_commands() -> Vec<Command> {
    let step = |direction: Direction| Command::MovePlayer {
        delta: direction.delta(),
    };
    let tick = |secs| Command::Tick {
        dt: Duration::from_secs(secs),
    };

    let mut commands = vec![
        Command::StartMission {
            mission: INTO_THE_TRENCH,
        },
        Command::RequestHint,
    ];
    commands.extend([Direction::South, Direction::East].repeat(2).into_iter().map(step));
    commands.push(tick(3));
    commands.push(Command::StartMission {
        mission: HAZARD_SURVEY,
    });
    commands.extend(
        [Direction::North, Direction::West, Direction::East]
            .repeat(4)
            .into_iter()
            .map(step),
    );
    commands.push(Command::SelectCell {
        cell: CellCoord::new(5, 0),
    });
    commands.push(tick(1));
    commands.extend([Direction::South; 6].into_iter().map(step));
    commands.push(tick(500));
    commands
}
