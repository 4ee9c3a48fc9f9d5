use std::time::Duration;

use maze_escape_core::{Actor, Command, Event, Position, TileGrid, Trigger};
use maze_escape_system_pursuit::Pursuit;
use maze_escape_world::{self as world, query, World, WorldConfig};

fn playing_world(config: WorldConfig) -> World {
    let mut world = World::new(TileGrid::default(), config).expect("valid config");
    let mut events = Vec::new();
    for trigger in [Trigger::Start, Trigger::Begin] {
        world::apply(&mut world, Command::Transition { trigger }, &mut events);
    }
    world
}

fn pump(world: &mut World, pursuit: &mut Pursuit) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::Tick {
            dt: Duration::from_millis(16),
        },
        &mut events,
    );

    let mut commands = Vec::new();
    pursuit.handle(
        &events,
        query::position(world, Actor::Pursuer),
        query::position(world, Actor::Player),
        &mut commands,
    );
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn steers_straight_toward_stationary_target() {
    let config = WorldConfig {
        player_spawn: Position::new(100.0, 0.0),
        pursuer_spawn: Position::new(0.0, 0.0),
        pursuer_alternate_spawn: Position::new(0.0, 300.0),
        pursuer_speed: 1.0,
        ..WorldConfig::default()
    };
    let mut world = playing_world(config);
    let mut pursuit = Pursuit;

    let mut tick_events = Vec::new();
    world::apply(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(16),
        },
        &mut tick_events,
    );
    let mut commands = Vec::new();
    pursuit.handle(
        &tick_events,
        query::position(&world, Actor::Pursuer),
        query::position(&world, Actor::Player),
        &mut commands,
    );
    assert_eq!(commands.len(), 1);
    let Command::SteerPursuer { dx, dy } = commands[0] else {
        panic!("expected a steer command, got {commands:?}");
    };
    assert!((dx - 1.0).abs() < 1e-6);
    assert!(dy.abs() < 1e-6);

    for command in commands {
        world::apply(&mut world, command, &mut tick_events);
    }
    for _ in 0..9 {
        let _ = pump(&mut world, &mut pursuit);
    }

    let pursuer = query::position(&world, Actor::Pursuer);
    assert!((pursuer.x() - 10.0).abs() < 1e-4, "pursuer at {pursuer:?}");
    assert!(pursuer.y().abs() < 1e-4, "pursuer at {pursuer:?}");
}

#[test]
fn distance_strictly_decreases_in_open_space_until_capture() {
    let mut world = playing_world(WorldConfig::default());
    let mut pursuit = Pursuit;
    let mut previous = query::position(&world, Actor::Pursuer)
        .distance(query::position(&world, Actor::Player));

    loop {
        let events = pump(&mut world, &mut pursuit);
        if events
            .iter()
            .any(|event| matches!(event, Event::PlayerCaught { .. }))
        {
            break;
        }

        let distance = query::position(&world, Actor::Pursuer)
            .distance(query::position(&world, Actor::Player));
        assert!(
            distance < previous,
            "distance grew from {previous} to {distance} at tick {}",
            query::tick_index(&world)
        );
        previous = distance;
        assert!(query::tick_index(&world) < 2_000, "pursuer never arrived");
    }

    assert_eq!(query::captures(&world), 1);
    assert_eq!(
        query::position(&world, Actor::Pursuer),
        Position::new(390.0, 400.0)
    );
}
