//! Concrete [`Dice`] implementations.

use std::collections::VecDeque;

use act_man_core::Dice;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Pseudorandom dice backed by a seeded ChaCha stream.
///
/// Two instances created from the same seed produce the same draws, which is
/// what makes a run replayable from its seed alone.
#[derive(Clone, Debug)]
pub struct SeededDice {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededDice {
    /// Creates dice seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed the dice were created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl Dice for SeededDice {
    fn roll(&mut self, sides: u32) -> u32 {
        debug_assert!(sides > 0, "dice need at least one side");
        self.rng.gen_range(0..sides.max(1))
    }

    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut self.rng);
        order
    }
}

/// Dice that replay a fixed script of draws.
///
/// Intended for tests that need to force a particular sequence of turns.
/// Running out of scripted draws, or scripting a roll that does not fit the
/// die being rolled, panics.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
    permutations: VecDeque<Vec<usize>>,
}

impl ScriptedDice {
    /// Creates dice that return `rolls` and `permutations` in order.
    #[must_use]
    pub fn new<R, P>(rolls: R, permutations: P) -> Self
    where
        R: IntoIterator<Item = u32>,
        P: IntoIterator<Item = Vec<usize>>,
    {
        Self {
            rolls: rolls.into_iter().collect(),
            permutations: permutations.into_iter().collect(),
        }
    }

    /// Number of scripted rolls not yet consumed.
    #[must_use]
    pub fn remaining_rolls(&self) -> usize {
        self.rolls.len()
    }

    /// Number of scripted permutations not yet consumed.
    #[must_use]
    pub fn remaining_permutations(&self) -> usize {
        self.permutations.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, sides: u32) -> u32 {
        let value = self
            .rolls
            .pop_front()
            .unwrap_or_else(|| panic!("scripted dice ran out of rolls (asked for d{sides})"));
        assert!(value < sides, "scripted roll {value} does not fit a d{sides}");
        value
    }

    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let order = self.permutations.pop_front().unwrap_or_else(|| {
            panic!("scripted dice ran out of permutations (asked for {len} items)")
        });
        assert_eq!(order.len(), len, "scripted permutation has the wrong length");
        order
    }
}
