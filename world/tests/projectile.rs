use act_man_core::{Cardinal, CellCoord, Command, Event, MonsterId, HIT_COST, STARTING_SCORE};
use act_man_world::{self as world, layout, query, World};

fn world_from(text: &str) -> World {
    World::from_grid(layout::parse(text).expect("layout parses")).expect("world builds")
}

fn fire(world: &mut World, heading: Cardinal) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::FireBullet { heading }, &mut events);
    events
}

#[test]
fn bullet_strikes_first_monster_in_line() {
    let mut world = world_from("1 6\nA  DG \n");

    let events = fire(&mut world, Cardinal::East);

    assert_eq!(
        events,
        vec![Event::BulletHit {
            monster: MonsterId::new(0),
            cell: CellCoord::new(3, 0),
        }]
    );
    assert_eq!(layout::render(query::grid(&world)), vec!["A  @G "]);
    assert_eq!(query::score(&world), STARTING_SCORE - HIT_COST);
    assert_eq!(query::monster_count(&world), 1);
    assert_eq!(query::monster_at(&world, CellCoord::new(3, 0)), None);
    assert!(query::bullet_spent(&world));
    assert!(query::is_consistent(&world));
}

#[test]
fn walls_stop_the_bullet() {
    let mut world = world_from("1 5\nA #D \n");

    let events = fire(&mut world, Cardinal::East);

    assert_eq!(
        events,
        vec![Event::BulletMissed {
            heading: Cardinal::East
        }]
    );
    assert_eq!(query::monster_count(&world), 1);
    assert_eq!(query::score(&world), STARTING_SCORE);
}

#[test]
fn bullet_travels_along_columns() {
    let mut world = world_from("4 1\nG\n \nA\n \n");

    let missed = fire(&mut world.clone(), Cardinal::South);
    assert_eq!(
        missed,
        vec![Event::BulletMissed {
            heading: Cardinal::South
        }]
    );

    let hit = fire(&mut world, Cardinal::North);
    assert_eq!(
        hit,
        vec![Event::BulletHit {
            monster: MonsterId::new(0),
            cell: CellCoord::new(0, 0),
        }]
    );
    assert_eq!(layout::render(query::grid(&world)), vec!["@", " ", "A", " "]);
}

#[test]
fn second_shot_is_ignored() {
    let mut world = world_from("1 4\nAD G\n");

    let _ = fire(&mut world, Cardinal::East);
    let events = fire(&mut world, Cardinal::East);

    assert!(events.is_empty());
    assert_eq!(query::monster_count(&world), 1);
    assert_eq!(query::score(&world), STARTING_SCORE - HIT_COST);
}
