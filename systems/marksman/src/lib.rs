#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fire-control system that decides when the actor spends its single bullet.

use act_man_core::{ActorState, Cardinal, Command, Dice, FIRE_CHANCE_PERCENT};

const PERCENT_SIDES: u32 = 100;

/// Configuration parameters required to construct the marksman system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    fire_chance_percent: u32,
}

impl Config {
    /// Creates a configuration that fires with the given percentage chance.
    ///
    /// Values above 100 behave like 100.
    #[must_use]
    pub const fn new(fire_chance_percent: u32) -> Self {
        Self {
            fire_chance_percent,
        }
    }

    /// Percentage chance that an available bullet is fired in a turn.
    #[must_use]
    pub const fn fire_chance_percent(&self) -> u32 {
        self.fire_chance_percent
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(FIRE_CHANCE_PERCENT)
    }
}

/// Pure system that rolls for a shot and picks its heading.
#[derive(Debug)]
pub struct Marksman {
    fire_chance_percent: u32,
}

impl Marksman {
    /// Creates a new marksman system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            fire_chance_percent: config.fire_chance_percent,
        }
    }

    /// Emits `Command::FireBullet` when the fire roll succeeds.
    ///
    /// A dead actor or a spent bullet consumes no randomness. Otherwise a
    /// percentage die is rolled, and only a successful roll draws the heading
    /// as an index into [`Cardinal::ALL`].
    pub fn handle<D>(
        &mut self,
        actor: ActorState,
        bullet_spent: bool,
        dice: &mut D,
        out: &mut Vec<Command>,
    ) where
        D: Dice + ?Sized,
    {
        if !actor.is_alive() || bullet_spent {
            return;
        }

        if dice.roll(PERCENT_SIDES) >= self.fire_chance_percent {
            return;
        }

        let headings = Cardinal::ALL.len();
        let index = dice.roll(headings as u32) as usize;
        let heading = Cardinal::ALL[index % headings];
        out.push(Command::FireBullet { heading });
    }
}

impl Default for Marksman {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use act_man_core::CellCoord;

    #[derive(Default)]
    struct Rolls {
        queued: Vec<u32>,
        sides_seen: Vec<u32>,
    }

    impl Dice for Rolls {
        fn roll(&mut self, sides: u32) -> u32 {
            self.sides_seen.push(sides);
            self.queued.remove(0)
        }

        fn permutation(&mut self, _len: usize) -> Vec<usize> {
            unreachable!("marksman never shuffles")
        }
    }

    const ALIVE: ActorState = ActorState::Alive(CellCoord::new(1, 1));

    #[test]
    fn fires_below_threshold_with_drawn_heading() {
        let mut marksman = Marksman::default();
        let mut dice = Rolls {
            queued: vec![29, 3],
            ..Rolls::default()
        };
        let mut commands = Vec::new();

        marksman.handle(ALIVE, false, &mut dice, &mut commands);

        assert_eq!(
            commands,
            vec![Command::FireBullet {
                heading: Cardinal::West
            }]
        );
        assert_eq!(dice.sides_seen, vec![100, 4]);
    }

    #[test]
    fn holds_fire_at_threshold_without_drawing_heading() {
        let mut marksman = Marksman::default();
        let mut dice = Rolls {
            queued: vec![30],
            ..Rolls::default()
        };
        let mut commands = Vec::new();

        marksman.handle(ALIVE, false, &mut dice, &mut commands);

        assert!(commands.is_empty());
        assert_eq!(dice.sides_seen, vec![100]);
    }

    #[test]
    fn spent_bullet_or_dead_actor_draws_nothing() {
        let mut marksman = Marksman::new(Config::new(100));
        let mut dice = Rolls::default();
        let mut commands = Vec::new();

        marksman.handle(ALIVE, true, &mut dice, &mut commands);
        marksman.handle(
            ActorState::Dead {
                at: CellCoord::new(1, 1),
            },
            false,
            &mut dice,
            &mut commands,
        );

        assert!(commands.is_empty());
        assert!(dice.sides_seen.is_empty());
    }

    #[test]
    fn zero_chance_never_fires() {
        let mut marksman = Marksman::new(Config::new(0));
        let mut dice = Rolls {
            queued: vec![0],
            ..Rolls::default()
        };
        let mut commands = Vec::new();

        marksman.handle(ALIVE, false, &mut dice, &mut commands);

        assert!(commands.is_empty());
        assert_eq!(Config::default().fire_chance_percent(), 30);
    }
}
