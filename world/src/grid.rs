//! Dense cell grid that owns the layout of the dungeon.

use act_man_core::{CellCoord, CellKind};
use thiserror::Error;

/// Raised when a position outside the grid is read or written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("cell ({}, {}) lies outside the {columns}x{rows} grid", .cell.column(), .cell.row())]
pub struct BoundsError {
    /// Position that was requested.
    pub cell: CellCoord,
    /// Number of columns in the grid.
    pub columns: u32,
    /// Number of rows in the grid.
    pub rows: u32,
}

/// Rectangular array of cell kinds with fixed dimensions.
///
/// Every read and write of a cell funnels through [`Grid::cell_at`] and
/// [`Grid::set_cell_at`], which reject positions outside the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Creates a grid from cells listed in row-major order.
    ///
    /// Returns `None` unless `cells` holds exactly `columns * rows` entries.
    #[must_use]
    pub fn from_cells(columns: u32, rows: u32, cells: Vec<CellKind>) -> Option<Self> {
        let expected = u64::from(columns) * u64::from(rows);
        let found = u64::try_from(cells.len()).ok()?;
        (found == expected).then_some(Self {
            columns,
            rows,
            cells,
        })
    }

    /// Provides the `(columns, rows)` dimensions of the grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Reads the kind stored at `cell`.
    pub fn cell_at(&self, cell: CellCoord) -> Result<CellKind, BoundsError> {
        let index = self.index(cell)?;
        Ok(self.cells[index])
    }

    /// Overwrites the kind stored at `cell`.
    pub fn set_cell_at(&mut self, cell: CellCoord, kind: CellKind) -> Result<(), BoundsError> {
        let index = self.index(cell)?;
        self.cells[index] = kind;
        Ok(())
    }

    /// Reports whether `cell` is inside the grid and holds a wall.
    #[must_use]
    pub fn is_wall(&self, cell: CellCoord) -> bool {
        self.cell_at(cell).is_ok_and(CellKind::is_wall)
    }

    /// Iterates over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellKind)> + '_ {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, kind)| {
            let index = index as u32;
            (CellCoord::new(index % columns, index / columns), *kind)
        })
    }

    /// Iterates over the rows of the grid, left to right.
    pub fn row_slices(&self) -> impl Iterator<Item = &[CellKind]> {
        let width = usize::try_from(self.columns).unwrap_or(0).max(1);
        self.cells.chunks(width)
    }

    fn index(&self, cell: CellCoord) -> Result<usize, BoundsError> {
        if !self.contains(cell) {
            return Err(BoundsError {
                cell,
                columns: self.columns,
                rows: self.rows,
            });
        }
        let row = cell.row() as usize;
        let column = cell.column() as usize;
        Ok(row * self.columns as usize + column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use act_man_core::MonsterKind;

    fn filled(columns: u32, rows: u32, fill: CellKind) -> Grid {
        let cells = vec![fill; (columns * rows) as usize];
        Grid::from_cells(columns, rows, cells).expect("cell count matches")
    }

    #[test]
    fn reads_and_writes_inside_bounds() {
        let mut grid = filled(4, 3, CellKind::Empty);
        let cell = CellCoord::new(3, 2);

        grid.set_cell_at(cell, CellKind::Monster(MonsterKind::Ogre))
            .expect("cell inside grid");

        assert_eq!(
            grid.cell_at(cell),
            Ok(CellKind::Monster(MonsterKind::Ogre))
        );
        assert_eq!(grid.cell_at(CellCoord::new(0, 0)), Ok(CellKind::Empty));
    }

    #[test]
    fn rejects_positions_outside_bounds() {
        let mut grid = filled(4, 3, CellKind::Empty);
        let outside = CellCoord::new(4, 0);

        let error = grid.cell_at(outside).expect_err("column 4 is outside");
        assert_eq!(error.cell, outside);
        assert_eq!((error.columns, error.rows), (4, 3));
        assert!(grid.set_cell_at(CellCoord::new(0, 3), CellKind::Wall).is_err());
        assert!(grid.iter().all(|(_, kind)| kind == CellKind::Empty));
    }

    #[test]
    fn is_wall_is_false_outside_the_grid() {
        let grid = filled(2, 2, CellKind::Wall);
        assert!(grid.is_wall(CellCoord::new(1, 1)));
        assert!(!grid.is_wall(CellCoord::new(2, 1)));
    }

    #[test]
    fn cell_count_must_match_dimensions() {
        assert!(Grid::from_cells(3, 2, vec![CellKind::Empty; 5]).is_none());
        assert!(Grid::from_cells(u32::MAX, u32::MAX, Vec::new()).is_none());
        assert!(Grid::from_cells(0, 0, Vec::new()).is_some());
    }

    #[test]
    fn iteration_is_row_major() {
        let grid = filled(3, 2, CellKind::Empty);
        let cells: Vec<CellCoord> = grid.iter().map(|(cell, _)| cell).collect();
        assert_eq!(cells[0], CellCoord::new(0, 0));
        assert_eq!(cells[2], CellCoord::new(2, 0));
        assert_eq!(cells[3], CellCoord::new(0, 1));
        assert_eq!(grid.row_slices().count(), 2);
    }
}
