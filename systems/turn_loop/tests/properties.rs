use act_man_core::{CellCoord, CellKind, Event, HIT_COST, MOVE_COST};
use act_man_system_turn_loop::{Config, RunState, SeededDice, Simulation};
use act_man_world::{layout, query, World};
use proptest::prelude::*;

const DUNGEONS: [&str; 3] = [
    "7 9\n#########\n#A   D  #\n# ##  # #\n#   G   #\n# #  ## #\n#  D   G#\n#########\n",
    "5 7\n#######\n#D   G#\n#  A  #\n#G   D#\n#######\n",
    "4 6\nA     \n  ##  \n  ##  \n     D\n",
];

fn walls(world: &World) -> Vec<CellCoord> {
    query::grid(world)
        .iter()
        .filter(|(_, kind)| *kind == CellKind::Wall)
        .map(|(cell, _)| cell)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn seeded_runs_keep_their_invariants(seed in any::<u64>(), map in 0usize..DUNGEONS.len()) {
        let world = World::from_grid(layout::parse(DUNGEONS[map]).expect("layout parses"))
            .expect("world builds");
        let initial_walls = walls(&world);
        let config = Config::new().with_max_turns(Some(500));
        let mut simulation = Simulation::new(world, SeededDice::new(seed), config);

        let mut score = query::score(simulation.world());
        let mut shots = 0usize;
        loop {
            let state = simulation.step();
            let world = simulation.world();
            prop_assert!(query::is_consistent(world));

            let moves = simulation
                .last_events()
                .iter()
                .filter(|event| matches!(event, Event::ActorMoved { .. }))
                .count() as i32;
            let hits = simulation
                .last_events()
                .iter()
                .filter(|event| matches!(event, Event::BulletHit { .. }))
                .count() as i32;
            shots += simulation
                .last_events()
                .iter()
                .filter(|event| matches!(event, Event::BulletHit { .. } | Event::BulletMissed { .. }))
                .count();

            let current = query::score(world);
            prop_assert_eq!(score - current, moves * MOVE_COST + hits * HIT_COST);
            prop_assert!(current <= score);
            prop_assert!(shots <= 1);
            score = current;

            if state.is_terminal() {
                break;
            }
        }

        let report = simulation.report();
        let world = simulation.world();
        prop_assert_eq!(walls(world), initial_walls);
        prop_assert_eq!(report.actions.len() as u64, report.turns);

        let actor = query::actor(world);
        match report.outcome {
            RunState::ActorDied => {
                prop_assert!(!actor.is_alive());
                let dead = report.grid.iter().filter(|(_, kind)| *kind == CellKind::ActorDead).count();
                prop_assert!(dead >= 1);
            }
            RunState::AllMonstersCleared => {
                prop_assert!(actor.is_alive());
                prop_assert_eq!(report.monsters_remaining, 0);
            }
            RunState::ScoreDepleted => {
                prop_assert!(actor.is_alive());
                prop_assert!(report.score <= 0);
                prop_assert!(report.monsters_remaining > 0);
            }
            RunState::TurnLimitReached => {
                prop_assert_eq!(report.turns, 500);
                prop_assert!(actor.is_alive());
            }
            RunState::Running => prop_assert!(false, "run ended while still running"),
        }
    }
}
