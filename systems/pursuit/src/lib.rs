#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Greedy pursuit system that proposes one step per monster each turn.
//!
//! Every turn the monsters are visited in a freshly drawn random order. For
//! each monster the eight surrounding cells are scored by squared distance to
//! the actor and emitted, nearest first, as the candidate list of a
//! [`Command::StepMonster`]. The world walks that list and moves the monster
//! into the first candidate that is still free when the command is applied,
//! so cells vacated by monsters earlier in the same turn become available to
//! monsters later in the turn.

use act_man_core::{ActorState, CellCoord, Command, Dice, MonsterSnapshot, MonsterView};

/// Pure system that reacts to the actor's position and emits monster steps.
#[derive(Debug, Default)]
pub struct Pursuit {
    scratch: Vec<Candidate>,
}

impl Pursuit {
    /// Creates a new pursuit system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one `Command::StepMonster` per living monster, in random order.
    ///
    /// Nothing is emitted, and no randomness is consumed, when the actor is
    /// dead or no monsters remain. `dimensions` is the `(columns, rows)` size
    /// of the grid and `is_wall` reports whether an in-bounds cell is a wall.
    pub fn handle<D, F>(
        &mut self,
        actor: ActorState,
        monsters: &MonsterView,
        dimensions: (u32, u32),
        is_wall: F,
        dice: &mut D,
        out: &mut Vec<Command>,
    ) where
        D: Dice + ?Sized,
        F: Fn(CellCoord) -> bool,
    {
        let Some(actor_cell) = actor.cell() else {
            return;
        };
        if monsters.is_empty() {
            return;
        }

        let order = dice.permutation(monsters.len());
        debug_assert_eq!(order.len(), monsters.len(), "permutation length mismatch");

        for index in order {
            let Some(monster) = monsters.get(index) else {
                continue;
            };
            let candidates = self.rank_candidates(monster, actor_cell, dimensions, &is_wall);
            out.push(Command::StepMonster {
                monster: monster.id,
                candidates,
            });
        }
    }

    fn rank_candidates<F>(
        &mut self,
        monster: &MonsterSnapshot,
        actor_cell: CellCoord,
        dimensions: (u32, u32),
        is_wall: &F,
    ) -> Vec<CellCoord>
    where
        F: Fn(CellCoord) -> bool,
    {
        self.scratch.clear();
        let (columns, rows) = dimensions;
        for neighbor in surrounding_cells(monster.cell, columns, rows) {
            if is_wall(neighbor) {
                continue;
            }
            self.scratch.push(Candidate {
                cell: neighbor,
                distance: neighbor.squared_distance(actor_cell),
            });
        }

        // Stable: equal distances keep their enumeration order.
        self.scratch.sort_by_key(|candidate| candidate.distance);
        self.scratch.iter().map(|candidate| candidate.cell).collect()
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    cell: CellCoord,
    distance: u32,
}

/// In-bounds cells around `cell`, rows top to bottom, columns left to right.
fn surrounding_cells(cell: CellCoord, columns: u32, rows: u32) -> NeighborIter {
    let mut neighbors = NeighborIter::default();

    for row_delta in -1i32..=1 {
        for column_delta in -1i32..=1 {
            if row_delta == 0 && column_delta == 0 {
                continue;
            }
            let Some(row) = cell.row().checked_add_signed(row_delta) else {
                continue;
            };
            let Some(column) = cell.column().checked_add_signed(column_delta) else {
                continue;
            };
            if row < rows && column < columns {
                neighbors.push(CellCoord::new(column, row));
            }
        }
    }

    neighbors
}

#[derive(Clone, Debug, Default)]
struct NeighborIter {
    buffer: [Option<CellCoord>; 8],
    len: usize,
    cursor: usize,
}

impl NeighborIter {
    fn push(&mut self, cell: CellCoord) {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = Some(cell);
            self.len += 1;
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }

        let value = self.buffer[self.cursor];
        self.cursor += 1;
        value
    }
}
