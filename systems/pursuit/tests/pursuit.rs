use act_man_core::{ActorState, CellCoord, Command, Dice, Event, MonsterId};
use act_man_system_pursuit::Pursuit;
use act_man_world::{self as world, layout, query, World};

/// Dice that replays a fixed visiting order and refuses every roll.
struct FixedOrder {
    order: Vec<usize>,
    permutations_drawn: usize,
}

impl FixedOrder {
    fn new(order: Vec<usize>) -> Self {
        Self {
            order,
            permutations_drawn: 0,
        }
    }
}

impl Dice for FixedOrder {
    fn roll(&mut self, sides: u32) -> u32 {
        panic!("pursuit must not roll dice (asked for d{sides})");
    }

    fn permutation(&mut self, len: usize) -> Vec<usize> {
        self.permutations_drawn += 1;
        if self.order.len() == len {
            self.order.clone()
        } else {
            (0..len).collect()
        }
    }
}

fn world_from(text: &str) -> World {
    World::from_grid(layout::parse(text).expect("layout parses")).expect("world builds")
}

fn plan(world: &World, pursuit: &mut Pursuit, dice: &mut FixedOrder) -> Vec<Command> {
    let grid = query::grid(world);
    let mut commands = Vec::new();
    pursuit.handle(
        query::actor(world),
        &query::monster_view(world),
        grid.dimensions(),
        |cell| grid.is_wall(cell),
        dice,
        &mut commands,
    );
    commands
}

fn pump(world: &mut World, pursuit: &mut Pursuit) -> Vec<Event> {
    let mut dice = FixedOrder::new(Vec::new());
    let commands = plan(world, pursuit, &mut dice);
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn monsters_are_visited_in_drawn_order() {
    let world = world_from("3 5\n#####\n#DAG#\n#####\n");
    let mut pursuit = Pursuit::new();
    let mut dice = FixedOrder::new(vec![1, 0]);

    let commands = plan(&world, &mut pursuit, &mut dice);

    let visited: Vec<MonsterId> = commands
        .iter()
        .map(|command| match command {
            Command::StepMonster { monster, .. } => *monster,
            other => panic!("unexpected command {other:?}"),
        })
        .collect();
    assert_eq!(visited, vec![MonsterId::new(1), MonsterId::new(0)]);
    assert_eq!(dice.permutations_drawn, 1);
}

#[test]
fn walls_leave_only_the_corridor_cell() {
    let world = world_from("3 6\n######\n#A  D#\n######\n");
    let mut pursuit = Pursuit::new();
    let mut dice = FixedOrder::new(Vec::new());

    let commands = plan(&world, &mut pursuit, &mut dice);

    assert_eq!(
        commands,
        vec![Command::StepMonster {
            monster: MonsterId::new(0),
            candidates: vec![CellCoord::new(3, 1)],
        }]
    );
}

#[test]
fn no_draws_when_the_actor_is_dead_or_alone() {
    let mut pursuit = Pursuit::new();
    let mut dice = FixedOrder::new(Vec::new());
    let mut commands = Vec::new();

    let alone = world_from("1 3\n A \n");
    pursuit.handle(
        query::actor(&alone),
        &query::monster_view(&alone),
        query::grid(&alone).dimensions(),
        |_| false,
        &mut dice,
        &mut commands,
    );

    let haunted = world_from("1 3\nDA \n");
    pursuit.handle(
        ActorState::Dead {
            at: CellCoord::new(1, 0),
        },
        &query::monster_view(&haunted),
        query::grid(&haunted).dimensions(),
        |_| false,
        &mut dice,
        &mut commands,
    );

    assert!(commands.is_empty());
    assert_eq!(dice.permutations_drawn, 0);
}

#[test]
fn pursuit_closes_in_and_catches_the_actor() {
    let mut world = world_from("3 6\n######\n#A  D#\n######\n");
    let mut pursuit = Pursuit::new();

    let first = pump(&mut world, &mut pursuit);
    assert_eq!(
        first,
        vec![Event::MonsterAdvanced {
            monster: MonsterId::new(0),
            from: CellCoord::new(4, 1),
            to: CellCoord::new(3, 1),
        }]
    );

    let _ = pump(&mut world, &mut pursuit);
    let last = pump(&mut world, &mut pursuit);
    assert_eq!(
        last,
        vec![Event::ActorKilled {
            at: CellCoord::new(1, 1),
            monster: MonsterId::new(0),
        }]
    );
    assert_eq!(
        layout::render(query::grid(&world))[1],
        "#XD  #".to_owned()
    );
    assert!(query::is_consistent(&world));
}

#[test]
fn blocked_monster_waits_for_a_cell_to_free_up() {
    // Ogre 1 can only reach the Demon's cell; the Demon moves first and frees it.
    let mut world = world_from("3 6\n######\n#A DG#\n######\n");
    let mut pursuit = Pursuit::new();

    let events = pump(&mut world, &mut pursuit);

    assert_eq!(
        events,
        vec![
            Event::MonsterAdvanced {
                monster: MonsterId::new(0),
                from: CellCoord::new(3, 1),
                to: CellCoord::new(2, 1),
            },
            Event::MonsterAdvanced {
                monster: MonsterId::new(1),
                from: CellCoord::new(4, 1),
                to: CellCoord::new(3, 1),
            },
        ]
    );
}
