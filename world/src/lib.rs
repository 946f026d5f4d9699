#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Act-Man.
//!
//! The world owns the grid, the actor, the live monster registry, the score
//! and the action log. It is mutated exclusively through [`apply`], which
//! validates each [`Command`] against the current state and reports the
//! outcome as [`Event`] values.

mod grid;
pub mod layout;

use act_man_core::{
    Action, ActorState, Cardinal, CellCoord, CellKind, Command, Direction, Event, MonsterId,
    MonsterKind, HIT_COST, MOVE_COST, STARTING_SCORE,
};
use tracing::trace;

pub use grid::{BoundsError, Grid};
pub use layout::LayoutError;

/// Represents the authoritative Act-Man world state.
#[derive(Clone, Debug)]
pub struct World {
    grid: Grid,
    actor: ActorState,
    monsters: Vec<Monster>,
    occupancy: OccupancyGrid,
    score: i32,
    bullet_spent: bool,
    actions: Vec<Action>,
}

impl World {
    /// Builds a world from a parsed grid.
    ///
    /// The grid must contain exactly one actor marker. Monster identifiers are
    /// allocated in row-major order starting at zero.
    pub fn from_grid(grid: Grid) -> Result<Self, LayoutError> {
        let mut actor: Option<CellCoord> = None;
        let mut monsters = Vec::new();

        for (cell, kind) in grid.iter() {
            match kind {
                CellKind::Actor => {
                    if let Some(first) = actor {
                        return Err(LayoutError::MultipleActors {
                            first,
                            second: cell,
                        });
                    }
                    actor = Some(cell);
                }
                CellKind::Monster(monster_kind) => {
                    let id = u32::try_from(monsters.len())
                        .map(MonsterId::new)
                        .map_err(|_| LayoutError::TooManyMonsters)?;
                    monsters.push(Monster {
                        id,
                        cell,
                        kind: monster_kind,
                    });
                }
                _ => {}
            }
        }

        let actor = actor.ok_or(LayoutError::MissingActor)?;
        let (columns, rows) = grid.dimensions();
        let mut occupancy = OccupancyGrid::new(columns, rows);
        occupancy.fill_with(&monsters);

        Ok(Self {
            grid,
            actor: ActorState::Alive(actor),
            monsters,
            occupancy,
            score: STARTING_SCORE,
            bullet_spent: false,
            actions: Vec::new(),
        })
    }

    fn paint(&mut self, cell: CellCoord, kind: CellKind) {
        self.grid
            .set_cell_at(cell, kind)
            .expect("resolved cells lie inside the grid");
    }

    fn kind_at(&self, cell: CellCoord) -> CellKind {
        self.grid
            .cell_at(cell)
            .expect("resolved cells lie inside the grid")
    }

    fn monster_index(&self, monster: MonsterId) -> Option<usize> {
        self.monsters.iter().position(|entry| entry.id == monster)
    }

    fn resolve_actor_move(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let ActorState::Alive(from) = self.actor else {
            return;
        };

        let target = from
            .step(direction)
            .filter(|cell| self.grid.contains(*cell));
        let Some(target) = target else {
            self.actions.push(Action::Blocked);
            out_events.push(Event::ActorBlocked { direction });
            return;
        };

        match self.kind_at(target) {
            CellKind::Wall => {
                self.actions.push(Action::Blocked);
                out_events.push(Event::ActorBlocked { direction });
            }
            CellKind::Monster(_) => {
                let monster = self
                    .occupancy
                    .occupant(target)
                    .expect("monster cells are registered");
                self.actions.push(Action::Step(direction));
                self.kill_actor(from, monster, out_events);
            }
            CellKind::Empty | CellKind::ActorDead | CellKind::MonsterHit | CellKind::Actor => {
                self.paint(from, CellKind::Empty);
                self.paint(target, CellKind::Actor);
                self.actor = ActorState::Alive(target);
                self.score -= MOVE_COST;
                self.actions.push(Action::Step(direction));
                out_events.push(Event::ActorMoved {
                    from,
                    to: target,
                    direction,
                });
            }
        }
    }

    /// Moves `monster` into the first usable cell among `candidates`.
    ///
    /// Candidates off the grid, on walls, not adjacent to the monster, or held
    /// by another monster are skipped. The actor's cell is a usable candidate:
    /// choosing it catches the actor, which dies in place and leaves its `X`
    /// marker while the monster keeps its current cell. Besides a collision in
    /// `resolve_actor_move`, this is the only way the actor dies.
    fn resolve_monster_step(
        &mut self,
        monster: MonsterId,
        candidates: &[CellCoord],
        out_events: &mut Vec<Event>,
    ) {
        let ActorState::Alive(actor_cell) = self.actor else {
            return;
        };
        let Some(index) = self.monster_index(monster) else {
            return;
        };
        let from = self.monsters[index].cell;

        for &candidate in candidates {
            if !self.grid.contains(candidate) || self.grid.is_wall(candidate) {
                continue;
            }
            if candidate.squared_distance(from) > 2 || candidate == from {
                continue;
            }
            if !self.occupancy.can_enter(candidate) {
                continue;
            }

            if candidate == actor_cell {
                self.kill_actor(actor_cell, monster, out_events);
                return;
            }

            let kind = self.monsters[index].kind;
            self.paint(from, CellKind::Empty);
            self.paint(candidate, CellKind::Monster(kind));
            self.occupancy.vacate(from);
            self.occupancy.occupy(monster, candidate);
            self.monsters[index].cell = candidate;
            out_events.push(Event::MonsterAdvanced {
                monster,
                from,
                to: candidate,
            });
            return;
        }

        out_events.push(Event::MonsterHeld { monster });
    }

    fn resolve_fire(&mut self, heading: Cardinal, out_events: &mut Vec<Event>) {
        let ActorState::Alive(origin) = self.actor else {
            return;
        };
        if self.bullet_spent {
            return;
        }
        self.bullet_spent = true;

        let direction = heading.direction();
        let mut cell = origin;
        loop {
            let Some(next) = cell.step(direction).filter(|next| self.grid.contains(*next)) else {
                out_events.push(Event::BulletMissed { heading });
                return;
            };
            cell = next;

            match self.kind_at(cell) {
                CellKind::Wall => {
                    out_events.push(Event::BulletMissed { heading });
                    return;
                }
                CellKind::Monster(_) => {
                    let monster = self
                        .occupancy
                        .occupant(cell)
                        .expect("monster cells are registered");
                    self.paint(cell, CellKind::MonsterHit);
                    self.occupancy.vacate(cell);
                    self.monsters.retain(|entry| entry.id != monster);
                    self.score -= HIT_COST;
                    out_events.push(Event::BulletHit { monster, cell });
                    return;
                }
                _ => {}
            }
        }
    }

    fn kill_actor(&mut self, at: CellCoord, monster: MonsterId, out_events: &mut Vec<Event>) {
        self.paint(at, CellKind::ActorDead);
        self.actor = ActorState::Dead { at };
        out_events.push(Event::ActorKilled { at, monster });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    trace!(?command, "applying command");
    let first_event = out_events.len();

    match command {
        Command::MoveActor { direction } => world.resolve_actor_move(direction, out_events),
        Command::StepMonster {
            monster,
            candidates,
        } => world.resolve_monster_step(monster, &candidates, out_events),
        Command::FireBullet { heading } => world.resolve_fire(heading, out_events),
    }

    for event in &out_events[first_event..] {
        trace!(?event, "world event");
    }
    debug_assert!(
        query::is_consistent(world),
        "grid and occupant registry diverged"
    );
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use act_man_core::{
        Action, ActorState, CellCoord, CellKind, MonsterId, MonsterSnapshot, MonsterView,
    };

    use super::{Grid, World};

    /// Provides read-only access to the world's grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Reports the actor's life cycle state.
    #[must_use]
    pub fn actor(world: &World) -> ActorState {
        world.actor
    }

    /// Current score of the run.
    #[must_use]
    pub fn score(world: &World) -> i32 {
        world.score
    }

    /// Reports whether the single projectile of the run has been used.
    #[must_use]
    pub fn bullet_spent(world: &World) -> bool {
        world.bullet_spent
    }

    /// Ordered log of the actor's attempted actions.
    #[must_use]
    pub fn actions(world: &World) -> &[Action] {
        &world.actions
    }

    /// Number of monsters still alive.
    #[must_use]
    pub fn monster_count(world: &World) -> usize {
        world.monsters.len()
    }

    /// Captures a read-only view of the living monsters.
    #[must_use]
    pub fn monster_view(world: &World) -> MonsterView {
        MonsterView::from_snapshots(
            world
                .monsters
                .iter()
                .map(|monster| MonsterSnapshot {
                    id: monster.id,
                    cell: monster.cell,
                    kind: monster.kind,
                })
                .collect(),
        )
    }

    /// Returns the monster occupying the provided cell, if any.
    #[must_use]
    pub fn monster_at(world: &World, cell: CellCoord) -> Option<MonsterId> {
        world.occupancy.occupant(cell)
    }

    /// Verifies that the grid, the actor state and the monster registry agree.
    ///
    /// Checks that exactly one actor marker exists while the actor lives and
    /// none afterwards, that every live monster is the sole registered
    /// occupant of a cell carrying its marker, and that no other cell carries
    /// a monster marker.
    #[must_use]
    pub fn is_consistent(world: &World) -> bool {
        let mut actor_cells = 0usize;
        let mut monster_cells = 0usize;
        for (cell, kind) in world.grid.iter() {
            match kind {
                CellKind::Actor => {
                    actor_cells += 1;
                    if world.actor != ActorState::Alive(cell) {
                        return false;
                    }
                }
                CellKind::Monster(_) => monster_cells += 1,
                _ => {}
            }
        }

        let expected_actor_cells = usize::from(world.actor.is_alive());
        if actor_cells != expected_actor_cells || monster_cells != world.monsters.len() {
            return false;
        }
        if let ActorState::Dead { at } = world.actor {
            if world.grid.cell_at(at) != Ok(CellKind::ActorDead) {
                return false;
            }
        }

        let registered = world.occupancy.cells().iter().flatten().count();
        registered == world.monsters.len()
            && world.monsters.iter().all(|monster| {
                world.occupancy.occupant(monster.cell) == Some(monster.id)
                    && world.grid.cell_at(monster.cell) == Ok(CellKind::Monster(monster.kind))
            })
    }
}

#[derive(Clone, Copy, Debug)]
struct Monster {
    id: MonsterId,
    cell: CellCoord,
    kind: MonsterKind,
}

#[derive(Clone, Debug)]
struct OccupancyGrid {
    columns: u32,
    rows: u32,
    cells: Vec<Option<MonsterId>>,
}

impl OccupancyGrid {
    fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![None; capacity],
        }
    }

    fn fill_with(&mut self, monsters: &[Monster]) {
        self.cells.fill(None);
        for monster in monsters {
            self.occupy(monster.id, monster.cell);
        }
    }

    fn can_enter(&self, cell: CellCoord) -> bool {
        self.occupant(cell).is_none()
    }

    fn occupant(&self, cell: CellCoord) -> Option<MonsterId> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    fn occupy(&mut self, monster: MonsterId, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                debug_assert!(slot.is_none(), "cell already holds a monster");
                *slot = Some(monster);
            }
        }
    }

    fn vacate(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = None;
            }
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    fn cells(&self) -> &[Option<MonsterId>] {
        &self.cells
    }
}
