use dead_grid_board::{self as board, query, Board};
use dead_grid_core::{Action, Health, Position, RulesConfig};
use dead_grid_system_spawning::{Config, ScriptedSource, Spawning};
use dead_grid_system_turn::{StepOutcome, TurnEngine};

const ARENA: &[&[&str]] = &[
    &[" ", " ", " ", " ", " "],
    &[" ", " ", "R", " ", " "],
    &[" ", "1", " ", "2", " "],
    &[" ", " ", " ", " ", " "],
];

#[test]
fn emits_one_spawn_per_interval() {
    let candidates = vec![Position::new(0, 0), Position::new(4, 3)];
    let mut spawning = Spawning::seeded(Config::new(3, 0x1234_5678));
    let mut actions = Vec::new();

    for turn in 0..9 {
        spawning.handle(turn, &candidates, &mut actions);
    }

    assert_eq!(actions.len(), 3, "expected spawns on turns 0, 3 and 6");
    for action in &actions {
        match action {
            Action::ZombieSpawn { position } => assert!(candidates.contains(position)),
            other => panic!("unexpected action emitted: {other:?}"),
        }
    }
}

#[test]
fn seeded_spawning_is_deterministic() {
    let board = Board::parse(ARENA).expect("valid grid");
    let candidates = query::spawn_candidates(&board);

    let run = |seed: u64| {
        let mut spawning = Spawning::seeded(Config::new(1, seed));
        let mut actions = Vec::new();
        for turn in 0..16 {
            spawning.handle(turn, &candidates, &mut actions);
        }
        actions
    };

    assert_eq!(run(0x4d59_5df4_d0f3_3173), run(0x4d59_5df4_d0f3_3173));
    assert_eq!(run(9).len(), 16);
}

#[test]
fn no_spawn_without_free_border_cells() {
    let mut spawning = Spawning::seeded(Config::new(1, 1));
    let mut actions = Vec::new();

    spawning.handle(0, &[], &mut actions);

    assert!(actions.is_empty());
}

#[test]
fn spawned_zombie_joins_the_next_turn() {
    let rules = RulesConfig::default().with_zombie_health(Health::new(5));
    let mut board = Board::with_config(ARENA, rules).expect("valid grid");
    let mut engine = TurnEngine::new();
    let mut spawning = Spawning::new(
        Config::new(2, 0),
        ScriptedSource::new([Position::new(4, 0), Position::new(0, 3)]),
    );
    let mut actions = Vec::new();

    assert!(board.finished(), "no zombies yet");

    let mut spawns = Vec::new();
    spawning.handle(engine.turns(), &query::spawn_candidates(&board), &mut spawns);
    assert_eq!(
        spawns,
        vec![Action::ZombieSpawn {
            position: Position::new(4, 0),
        }]
    );
    for spawn in spawns {
        board::apply(&mut board, &spawn, engine.pathfinder_mut()).expect("spawn cell is free");
        actions.push(spawn);
    }

    assert!(!board.finished());
    let zombie = board.zombies().next().expect("spawned zombie");
    assert_eq!(zombie.health(), board.config().zombie_health());

    let outcome = engine.step(&mut board, &mut actions).expect("turn plays");
    assert_eq!(outcome, StepOutcome::Advanced { finished: false });

    let zombie = board.zombies().next().expect("spawned zombie");
    assert_eq!(zombie.health(), Health::new(3));
    assert_eq!(zombie.position(), Position::new(4, 1));
    assert_eq!(
        query::compact_snapshot(&board),
        "     |  R Z:3| 1 2 |     "
    );
}
