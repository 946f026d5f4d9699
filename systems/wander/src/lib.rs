#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Random-walk system that picks the actor's step for each turn.

use act_man_core::{ActorState, Command, Dice, Direction};

/// Pure system that proposes one uniformly random step for the living actor.
#[derive(Debug, Default)]
pub struct Wander;

impl Wander {
    /// Emits a single `Command::MoveActor` while the actor is alive.
    ///
    /// Exactly one die with eight sides is rolled per call; the result indexes
    /// [`Direction::ALL`]. A dead actor consumes no randomness.
    pub fn handle<D>(&mut self, actor: ActorState, dice: &mut D, out: &mut Vec<Command>)
    where
        D: Dice + ?Sized,
    {
        if !actor.is_alive() {
            return;
        }

        let sides = Direction::ALL.len() as u32;
        let roll = dice.roll(sides) as usize;
        debug_assert!(roll < Direction::ALL.len(), "die rolled out of range");
        let direction = Direction::ALL[roll % Direction::ALL.len()];
        out.push(Command::MoveActor { direction });
    }
}
