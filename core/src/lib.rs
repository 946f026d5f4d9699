#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Act-Man engine.
//!
//! This crate defines the message surface that connects the turn loop, the
//! authoritative world, and pure systems. Systems inspect read-only views and
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then reports [`Event`]
//! values describing what actually happened. Every random decision is drawn
//! through the [`Dice`] seam so that a run can be replayed exactly.

use serde::{Deserialize, Serialize};

/// Score the actor starts every run with.
pub const STARTING_SCORE: i32 = 50;

/// Score deducted for every successful actor move.
pub const MOVE_COST: i32 = 1;

/// Score deducted when the projectile strikes a monster.
pub const HIT_COST: i32 = 20;

/// Percentage chance that the actor attempts to fire during a turn.
pub const FIRE_CHANCE_PERCENT: u32 = 30;

/// Action code recorded when the actor's target cell was invalid or a wall.
pub const BLOCKED_ACTION_CODE: i32 = -1;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the actor attempt a single step in the given direction.
    MoveActor {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that a monster advance to the first free cell among the candidates.
    StepMonster {
        /// Identifier of the monster attempting to move.
        monster: MonsterId,
        /// Adjacent cells ordered from most to least preferred.
        candidates: Vec<CellCoord>,
    },
    /// Requests that the actor fire the single projectile of the run.
    FireBullet {
        /// Cardinal direction the projectile travels in.
        heading: Cardinal,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the actor moved between two cells.
    ActorMoved {
        /// Cell the actor occupied before moving.
        from: CellCoord,
        /// Cell the actor occupies after the move.
        to: CellCoord,
        /// Direction that was travelled.
        direction: Direction,
    },
    /// Reports that the actor's target cell was outside the grid or a wall.
    ActorBlocked {
        /// Direction of the rejected step.
        direction: Direction,
    },
    /// Reports that the actor and a monster met, ending the actor's life.
    ActorKilled {
        /// Cell that now carries the death marker.
        at: CellCoord,
        /// Monster involved in the collision.
        monster: MonsterId,
    },
    /// Confirms that a monster moved between two cells.
    MonsterAdvanced {
        /// Identifier of the monster that advanced.
        monster: MonsterId,
        /// Cell the monster occupied before moving.
        from: CellCoord,
        /// Cell the monster occupies after the move.
        to: CellCoord,
    },
    /// Reports that a monster found no free candidate cell this turn.
    MonsterHeld {
        /// Identifier of the monster that stayed in place.
        monster: MonsterId,
    },
    /// Reports that the projectile struck and removed a monster.
    BulletHit {
        /// Identifier of the monster that was removed.
        monster: MonsterId,
        /// Cell that now carries the hit marker.
        cell: CellCoord,
    },
    /// Reports that the projectile left the grid or struck a wall.
    BulletMissed {
        /// Heading the projectile travelled in.
        heading: Cardinal,
    },
}

/// Compass directions available to the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Diagonal movement up and to the right.
    NorthEast,
    /// Movement toward increasing column indices.
    East,
    /// Diagonal movement down and to the right.
    SouthEast,
    /// Movement toward increasing row indices.
    South,
    /// Diagonal movement down and to the left.
    SouthWest,
    /// Movement toward decreasing column indices.
    West,
    /// Diagonal movement up and to the left.
    NorthWest,
}

impl Direction {
    /// Every direction, in the order used to map a die roll onto a direction.
    pub const ALL: [Direction; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Numeric code written to the action log for a step in this direction.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::North => 8,
            Self::NorthEast => 9,
            Self::East => 6,
            Self::SouthEast => 3,
            Self::South => 2,
            Self::SouthWest => 4,
            Self::West => 7,
            Self::NorthWest => 1,
        }
    }

    /// Row and column displacement produced by a single step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (-1, 0),
            Self::NorthEast => (-1, 1),
            Self::East => (0, 1),
            Self::SouthEast => (1, 1),
            Self::South => (1, 0),
            Self::SouthWest => (1, -1),
            Self::West => (0, -1),
            Self::NorthWest => (-1, -1),
        }
    }
}

/// Cardinal headings available to the projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinal {
    /// Travel toward decreasing row indices.
    North,
    /// Travel toward increasing column indices.
    East,
    /// Travel toward increasing row indices.
    South,
    /// Travel toward decreasing column indices.
    West,
}

impl Cardinal {
    /// Every heading, in the order used to map a die roll onto a heading.
    pub const ALL: [Cardinal; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Converts the heading into the equivalent compass direction.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::North => Direction::North,
            Self::East => Direction::East,
            Self::South => Direction::South,
            Self::West => Direction::West,
        }
    }
}

/// Entry appended to the actor's action log once per turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// The actor attempted a step into an open or occupied cell.
    Step(Direction),
    /// The target cell was outside the grid or a wall.
    Blocked,
}

impl Action {
    /// Numeric code written to the report for this entry.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Step(direction) => direction.code(),
            Self::Blocked => BLOCKED_ACTION_CODE,
        }
    }
}

/// Unique identifier assigned to a monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId(u32);

impl MonsterId {
    /// Creates a new monster identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// The two monster species. Both move identically and differ only in glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    /// Rendered as `D`.
    Demon,
    /// Rendered as `G`.
    Ogre,
}

/// Contents of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Open floor.
    Empty,
    /// Impassable wall.
    Wall,
    /// The living actor.
    Actor,
    /// A living monster of the given kind.
    Monster(MonsterKind),
    /// Marker left where the actor died.
    ActorDead,
    /// Marker left where a monster was shot.
    MonsterHit,
}

impl CellKind {
    /// Character used for this cell in layouts and reports.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Wall => '#',
            Self::Actor => 'A',
            Self::Monster(MonsterKind::Demon) => 'D',
            Self::Monster(MonsterKind::Ogre) => 'G',
            Self::ActorDead => 'X',
            Self::MonsterHit => '@',
        }
    }

    /// Decodes a layout character, returning `None` for reserved characters.
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            ' ' => Some(Self::Empty),
            '#' => Some(Self::Wall),
            'A' => Some(Self::Actor),
            'D' => Some(Self::Monster(MonsterKind::Demon)),
            'G' => Some(Self::Monster(MonsterKind::Ogre)),
            'X' => Some(Self::ActorDead),
            '@' => Some(Self::MonsterHit),
            _ => None,
        }
    }

    /// Reports whether the cell blocks every kind of movement.
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Cell reached by one step in `direction`.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    /// Upper bounds are a property of the grid and are not checked here.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (row_delta, column_delta) = direction.delta();
        let row = self.row.checked_add_signed(row_delta)?;
        let column = self.column.checked_add_signed(column_delta)?;
        Some(Self::new(column, row))
    }

    /// Squared Euclidean distance between two cells.
    #[must_use]
    pub fn squared_distance(self, other: CellCoord) -> u32 {
        let columns = self.column.abs_diff(other.column);
        let rows = self.row.abs_diff(other.row);
        columns * columns + rows * rows
    }
}

/// Life cycle of the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorState {
    /// The actor is on the grid at the given cell.
    Alive(CellCoord),
    /// The actor died; the cell carries the death marker.
    Dead {
        /// Cell where the actor died.
        at: CellCoord,
    },
}

impl ActorState {
    /// Cell occupied by the living actor, if any.
    #[must_use]
    pub const fn cell(&self) -> Option<CellCoord> {
        match self {
            Self::Alive(cell) => Some(*cell),
            Self::Dead { .. } => None,
        }
    }

    /// Reports whether the actor is still alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        matches!(self, Self::Alive(_))
    }
}

/// Immutable representation of a single monster's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonsterSnapshot {
    /// Unique identifier assigned to the monster.
    pub id: MonsterId,
    /// Grid cell currently occupied by the monster.
    pub cell: CellCoord,
    /// Species of the monster.
    pub kind: MonsterKind,
}

/// Read-only snapshot describing all living monsters.
#[derive(Clone, Debug, Default)]
pub struct MonsterView {
    snapshots: Vec<MonsterSnapshot>,
}

impl MonsterView {
    /// Creates a new monster view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<MonsterSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured monster snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &MonsterSnapshot> {
        self.snapshots.iter()
    }

    /// Number of living monsters captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no monsters remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot at the provided position in identifier order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MonsterSnapshot> {
        self.snapshots.get(index)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<MonsterSnapshot> {
        self.snapshots
    }
}

/// Source of every random decision made during a run.
///
/// Implementations must be deterministic for a given seed or script so that a
/// run can be replayed by feeding the same draws in the same order.
pub trait Dice {
    /// Returns a value drawn uniformly from `0..sides`. `sides` is never zero.
    fn roll(&mut self, sides: u32) -> u32;

    /// Returns a uniformly random permutation of `0..len`.
    fn permutation(&mut self, len: usize) -> Vec<usize>;
}
