#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn loop that drives a single Act-Man run to completion.
//!
//! A [`Simulation`] owns the world, the dice and the three pure systems. Each
//! turn it asks the systems for commands in a fixed order, applies those
//! commands through `act_man_world::apply`, and evaluates the terminal
//! conditions:
//!
//! 1. the actor takes one random step (a collision with a monster ends the run
//!    in [`RunState::ActorDied`]);
//! 2. every monster steps toward the actor in a freshly drawn order (a
//!    monster stepping onto the actor also ends the run in
//!    [`RunState::ActorDied`]);
//! 3. the run ends in [`RunState::AllMonstersCleared`] when no monsters remain
//!    or in [`RunState::ScoreDepleted`] when the score reaches zero;
//! 4. the actor may fire its single bullet, after which step 3 is checked
//!    again.
//!
//! The loop draws all randomness from the injected [`Dice`], so a run is fully
//! determined by its layout, its dice and its [`Config`].

mod dice;

use act_man_core::{Action, Command, Dice, Event, FIRE_CHANCE_PERCENT};
use act_man_system_marksman::{self as marksman, Marksman};
use act_man_system_pursuit::Pursuit;
use act_man_system_wander::Wander;
use act_man_world::{self as world, layout, query, Grid, World};
use serde::Serialize;
use tracing::{debug, info, warn};

pub use dice::{ScriptedDice, SeededDice};

/// Tunable parameters of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    max_turns: Option<u64>,
    fire_chance_percent: u32,
}

impl Config {
    /// Creates the default configuration: unbounded turns and a 30% fire chance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_turns: None,
            fire_chance_percent: FIRE_CHANCE_PERCENT,
        }
    }

    /// Caps the number of turns; `None` lets the run continue until a
    /// gameplay condition ends it.
    #[must_use]
    pub const fn with_max_turns(self, max_turns: Option<u64>) -> Self {
        Self { max_turns, ..self }
    }

    /// Overrides the percentage chance of firing while the bullet is unspent.
    #[must_use]
    pub const fn with_fire_chance_percent(self, fire_chance_percent: u32) -> Self {
        Self {
            fire_chance_percent,
            ..self
        }
    }

    /// Maximum number of turns before the run is stopped, if any.
    #[must_use]
    pub const fn max_turns(&self) -> Option<u64> {
        self.max_turns
    }

    /// Percentage chance of firing while the bullet is unspent.
    #[must_use]
    pub const fn fire_chance_percent(&self) -> u32 {
        self.fire_chance_percent
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Life cycle of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// The run has not reached a terminal condition yet.
    Running,
    /// The actor collided with a monster.
    ActorDied,
    /// Every monster was removed while the actor survived.
    AllMonstersCleared,
    /// The score dropped to zero or below while the actor survived.
    ScoreDepleted,
    /// The configured turn limit stopped the run.
    TurnLimitReached,
}

impl RunState {
    /// Reports whether the run is over.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Final snapshot of a run, handed to report writers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// State the run stopped in.
    pub outcome: RunState,
    /// Number of turns that were started.
    pub turns: u64,
    /// Final score.
    pub score: i32,
    /// One entry per turn, in order.
    pub actions: Vec<Action>,
    /// Final grid, tombstones included.
    pub grid: Grid,
    /// Number of monsters still alive.
    pub monsters_remaining: usize,
}

impl RunReport {
    /// Numeric action codes in turn order.
    #[must_use]
    pub fn action_codes(&self) -> Vec<i32> {
        self.actions.iter().map(|action| action.code()).collect()
    }

    /// Final grid encoded one glyph string per row.
    #[must_use]
    pub fn grid_rows(&self) -> Vec<String> {
        layout::render(&self.grid)
    }
}

/// A single run: the world, its dice and the systems that drive it.
#[derive(Debug)]
pub struct Simulation<D> {
    world: World,
    dice: D,
    config: Config,
    wander: Wander,
    pursuit: Pursuit,
    marksman: Marksman,
    state: RunState,
    turns: u64,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl<D: Dice> Simulation<D> {
    /// Creates a simulation that has not played any turn yet.
    #[must_use]
    pub fn new(world: World, dice: D, config: Config) -> Self {
        Self {
            world,
            dice,
            config,
            wander: Wander,
            pursuit: Pursuit::new(),
            marksman: Marksman::new(marksman::Config::new(config.fire_chance_percent)),
            state: RunState::Running,
            turns: 0,
            commands: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Current state of the run.
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Number of turns started so far.
    #[must_use]
    pub const fn turns(&self) -> u64 {
        self.turns
    }

    /// Read-only access to the world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Read-only access to the dice.
    #[must_use]
    pub const fn dice(&self) -> &D {
        &self.dice
    }

    /// Events produced by the most recent turn.
    #[must_use]
    pub fn last_events(&self) -> &[Event] {
        &self.events
    }

    /// Plays one turn and returns the resulting state.
    ///
    /// Calling `step` after the run has ended does nothing.
    pub fn step(&mut self) -> RunState {
        if self.state.is_terminal() {
            return self.state;
        }
        self.events.clear();

        if let Some(limit) = self.config.max_turns {
            if self.turns >= limit {
                warn!(limit, "turn limit reached before a terminal condition");
                return self.finish(RunState::TurnLimitReached);
            }
        }
        self.turns += 1;

        self.wander
            .handle(query::actor(&self.world), &mut self.dice, &mut self.commands);
        self.apply_pending();
        if !query::actor(&self.world).is_alive() {
            return self.finish(RunState::ActorDied);
        }

        let grid = query::grid(&self.world);
        self.pursuit.handle(
            query::actor(&self.world),
            &query::monster_view(&self.world),
            grid.dimensions(),
            |cell| grid.is_wall(cell),
            &mut self.dice,
            &mut self.commands,
        );
        self.apply_pending();
        if !query::actor(&self.world).is_alive() {
            return self.finish(RunState::ActorDied);
        }
        if let Some(state) = self.settled() {
            return self.finish(state);
        }

        self.marksman.handle(
            query::actor(&self.world),
            query::bullet_spent(&self.world),
            &mut self.dice,
            &mut self.commands,
        );
        self.apply_pending();
        if let Some(state) = self.settled() {
            return self.finish(state);
        }

        debug!(
            turn = self.turns,
            score = query::score(&self.world),
            monsters = query::monster_count(&self.world),
            "turn resolved"
        );
        self.state
    }

    /// Plays turns until the run ends and returns the final report.
    pub fn run(&mut self) -> RunReport {
        let (columns, rows) = query::grid(&self.world).dimensions();
        info!(
            columns,
            rows,
            monsters = query::monster_count(&self.world),
            max_turns = ?self.config.max_turns,
            "starting run"
        );

        while !self.step().is_terminal() {}

        self.report()
    }

    /// Captures the current state of the run as a report.
    #[must_use]
    pub fn report(&self) -> RunReport {
        RunReport {
            outcome: self.state,
            turns: self.turns,
            score: query::score(&self.world),
            actions: query::actions(&self.world).to_vec(),
            grid: query::grid(&self.world).clone(),
            monsters_remaining: query::monster_count(&self.world),
        }
    }

    fn apply_pending(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    fn settled(&self) -> Option<RunState> {
        if query::monster_count(&self.world) == 0 {
            Some(RunState::AllMonstersCleared)
        } else if query::score(&self.world) <= 0 {
            Some(RunState::ScoreDepleted)
        } else {
            None
        }
    }

    fn finish(&mut self, state: RunState) -> RunState {
        self.state = state;
        info!(
            outcome = ?state,
            turns = self.turns,
            score = query::score(&self.world),
            "run finished"
        );
        state
    }
}
