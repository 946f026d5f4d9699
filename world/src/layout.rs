//! Text encoding of dungeon layouts.
//!
//! A layout starts with a header line holding the row and column counts,
//! followed by exactly that many rows of glyphs:
//!
//! ```text
//! 3 5
//! #####
//! #A D#
//! #####
//! ```
//!
//! `#` is a wall, a space is open floor, `A` is the actor and `D`/`G` are
//! monsters. The tombstone glyphs `X` and `@` are accepted as well so that the
//! grid section of a finished report can be loaded again.

use act_man_core::{CellCoord, CellKind};
use thiserror::Error;

use crate::grid::Grid;

/// Reasons a textual layout is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The input contained no header line.
    #[error("layout is missing the `rows cols` header")]
    MissingHeader,
    /// The header did not contain two unsigned integers.
    #[error("could not parse layout header '{0}'")]
    InvalidHeader(String),
    /// The header declared zero rows or zero columns.
    #[error("layout declares an empty {rows}x{columns} grid")]
    EmptyGrid {
        /// Declared row count.
        rows: u32,
        /// Declared column count.
        columns: u32,
    },
    /// Fewer rows followed the header than it declared.
    #[error("layout declares {expected} rows but only {found} were provided")]
    MissingRow {
        /// Declared row count.
        expected: u32,
        /// Number of rows present.
        found: u32,
    },
    /// A row did not have the declared width.
    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidthMismatch {
        /// Zero-based row index.
        row: u32,
        /// Declared column count.
        expected: u32,
        /// Number of glyphs present.
        found: u32,
    },
    /// A row contained a reserved character.
    #[error("unknown glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph {
        /// Zero-based row index.
        row: u32,
        /// Zero-based column index.
        column: u32,
        /// Offending character.
        glyph: char,
    },
    /// No actor marker was present.
    #[error("layout has no actor marker 'A'")]
    MissingActor,
    /// More monsters were present than identifiers can address.
    #[error("layout holds more monsters than can be identified")]
    TooManyMonsters,
    /// More than one actor marker was present.
    #[error("layout has a second actor marker at row {}, column {}", .second.row(), .second.column())]
    MultipleActors {
        /// Cell of the first marker found in row-major order.
        first: CellCoord,
        /// Cell of the second marker found in row-major order.
        second: CellCoord,
    },
}

/// Decodes a textual layout into a grid.
///
/// Line endings may be `\n` or `\r\n`. Lines after the declared rows are
/// ignored.
pub fn parse(text: &str) -> Result<Grid, LayoutError> {
    let mut lines = text.lines();
    let header = lines.next().ok_or(LayoutError::MissingHeader)?;
    let (rows, columns) = parse_header(header)?;

    // Only rows actually present contribute cells.
    let mut cells = Vec::new();
    for row in 0..rows {
        let line = lines.next().ok_or(LayoutError::MissingRow {
            expected: rows,
            found: row,
        })?;
        let found = u32::try_from(line.chars().count()).unwrap_or(u32::MAX);
        if found != columns {
            return Err(LayoutError::RowWidthMismatch {
                row,
                expected: columns,
                found,
            });
        }

        for (column, glyph) in (0..columns).zip(line.chars()) {
            let kind = CellKind::from_glyph(glyph).ok_or(LayoutError::UnknownGlyph {
                row,
                column,
                glyph,
            })?;
            cells.push(kind);
        }
    }

    Ok(Grid::from_cells(columns, rows, cells).expect("every declared row was read in full"))
}

/// Encodes every grid row back into its glyph string.
#[must_use]
pub fn render(grid: &Grid) -> Vec<String> {
    grid.row_slices()
        .map(|row| row.iter().map(|kind| kind.glyph()).collect())
        .collect()
}

fn parse_header(header: &str) -> Result<(u32, u32), LayoutError> {
    let invalid = || LayoutError::InvalidHeader(header.trim().to_owned());
    let mut fields = header.split_whitespace();
    let rows = fields
        .next()
        .and_then(|value| value.parse::<u32>().ok())
        .ok_or_else(invalid)?;
    let columns = fields
        .next()
        .and_then(|value| value.parse::<u32>().ok())
        .ok_or_else(invalid)?;
    if fields.next().is_some() {
        return Err(invalid());
    }
    if rows == 0 || columns == 0 {
        return Err(LayoutError::EmptyGrid { rows, columns });
    }
    Ok((rows, columns))
}
