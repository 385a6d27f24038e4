#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative tile world for Gridwalk.
//!
//! The world is a fixed-size grid of [`TileCode`] values stored row-major. It
//! is only mutated through explicit fill, random placement and text layout
//! operations; during a frame every consumer reads it immutably.

pub mod collision;

use gridwalk_core::{InputEvent, TileCode, TileCoord, EMPTY_TILE, SOLID_TILE};
use rand::Rng;
use thiserror::Error;

/// Errors raised while parsing a text grid layout.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridFormatError {
    /// The layout contained no non-empty lines.
    #[error("grid layout contains no rows")]
    Empty,
    /// A row's length differs from the first row.
    #[error("row on line {line} has {found} tiles, expected {expected}")]
    RaggedRow {
        /// 1-based line number of the offending row.
        line: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A row contained something other than an ASCII digit.
    #[error("invalid tile {character:?} at line {line}, column {column}")]
    InvalidCharacter {
        /// 1-based line number of the offending row.
        line: usize,
        /// 1-based character position within the row.
        column: usize,
        /// Character that failed to parse.
        character: char,
    },
    /// The layout dimensions do not fit the grid's index range.
    #[error("grid layout of {columns}x{rows} tiles is too large")]
    TooLarge {
        /// Number of columns in the layout.
        columns: usize,
        /// Number of rows in the layout.
        rows: usize,
    },
}

/// Fixed-size grid of tile codes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    tile_side: i32,
    cells: Vec<TileCode>,
}

impl TileGrid {
    /// Creates an all-empty grid with the provided dimensions.
    ///
    /// `tile_side` is clamped to at least one pixel.
    #[must_use]
    pub fn new(columns: u32, rows: u32, tile_side: u32) -> Self {
        let capacity = cell_capacity(columns, rows);
        Self {
            columns,
            rows,
            tile_side: i32::try_from(tile_side.max(1)).unwrap_or(i32::MAX),
            cells: vec![EMPTY_TILE; capacity],
        }
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square tile in pixels.
    #[must_use]
    pub const fn tile_side(&self) -> i32 {
        self.tile_side
    }

    /// Width of the whole grid in pixels.
    #[must_use]
    pub fn pixel_width(&self) -> i64 {
        i64::from(self.columns) * i64::from(self.tile_side)
    }

    /// Height of the whole grid in pixels.
    #[must_use]
    pub fn pixel_height(&self) -> i64 {
        i64::from(self.rows) * i64::from(self.tile_side)
    }

    /// Reports whether the coordinate lies inside `[0, columns) × [0, rows)`.
    #[must_use]
    pub fn contains(&self, coord: TileCoord) -> bool {
        self.index(coord).is_some()
    }

    /// Returns the code stored at `coord`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, coord: TileCoord) -> Option<TileCode> {
        self.index(coord).map(|index| self.cells[index])
    }

    /// Returns the code stored at `coord`, or `default` outside the grid.
    #[must_use]
    pub fn get_or(&self, coord: TileCoord, default: TileCode) -> TileCode {
        self.get(coord).unwrap_or(default)
    }

    /// Stores `code` at `coord`. Returns `false` when the coordinate is outside the grid.
    pub fn set(&mut self, coord: TileCoord, code: TileCode) -> bool {
        match self.index(coord) {
            Some(index) => {
                self.cells[index] = code;
                true
            }
            None => false,
        }
    }

    /// Resets every tile to `code`.
    pub fn fill(&mut self, code: TileCode) {
        self.cells.fill(code);
    }

    /// Marks `count` uniformly random tiles as solid.
    ///
    /// Coordinates are drawn with replacement, so repeated draws collapse onto
    /// the same tile and fewer than `count` distinct tiles may become solid.
    pub fn randomize<R: Rng + ?Sized>(&mut self, count: u32, rng: &mut R) {
        if self.cells.is_empty() {
            return;
        }

        for _ in 0..count {
            let column = rng.gen_range(0..self.columns);
            let row = rng.gen_range(0..self.rows);
            let index = self.flat_index(column, row);
            self.cells[index] = SOLID_TILE;
        }

        tracing::debug!(
            requested = count,
            solid = self.solid_count(),
            "randomized tile grid"
        );
    }

    /// Replaces the grid with a text layout of one digit per tile.
    ///
    /// Empty lines are skipped. The width is taken from the first row and the
    /// height from the number of rows. The existing grid is left untouched when
    /// the layout is rejected.
    pub fn load_from_text(&mut self, text: &str) -> Result<(), GridFormatError> {
        let mut width: Option<usize> = None;
        let mut rows = 0_usize;
        let mut cells = Vec::new();

        for (line_index, raw) in text.split('\n').enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if line.is_empty() {
                continue;
            }

            let mut found = 0_usize;
            for (column_index, character) in line.chars().enumerate() {
                let Some(digit) = character.to_digit(10) else {
                    return Err(GridFormatError::InvalidCharacter {
                        line: line_index + 1,
                        column: column_index + 1,
                        character,
                    });
                };
                cells.push(digit as TileCode);
                found += 1;
            }

            let expected = *width.get_or_insert(found);
            if found != expected {
                return Err(GridFormatError::RaggedRow {
                    line: line_index + 1,
                    expected,
                    found,
                });
            }
            rows += 1;
        }

        let Some(width) = width else {
            return Err(GridFormatError::Empty);
        };

        let too_large = || GridFormatError::TooLarge {
            columns: width,
            rows,
        };
        let columns = u32::try_from(width).map_err(|_| too_large())?;
        let rows = u32::try_from(rows).map_err(|_| too_large())?;

        self.columns = columns;
        self.rows = rows;
        self.cells = cells;
        tracing::debug!(columns, rows, solid = self.solid_count(), "loaded text grid");
        Ok(())
    }

    /// Renders the grid in the text layout format accepted by [`TileGrid::load_from_text`].
    #[must_use]
    pub fn to_text(&self) -> String {
        let width = usize::try_from(self.columns).unwrap_or(0);
        let mut text = String::with_capacity(self.cells.len() + self.cells.len() / width.max(1));
        if width == 0 {
            return text;
        }
        for row in self.cells.chunks(width) {
            for code in row {
                text.push(char::from(b'0' + *code % 10));
            }
            text.push('\n');
        }
        text
    }

    /// Number of tiles holding the solid code.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|code| **code == SOLID_TILE).count()
    }

    /// Iterates over every solid tile in row-major order.
    pub fn solid_tiles(&self) -> impl Iterator<Item = TileCoord> + '_ {
        let width = usize::try_from(self.columns).unwrap_or(1).max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, code)| **code == SOLID_TILE)
            .map(move |(index, _)| TileCoord::new((index % width) as i32, (index / width) as i32))
    }

    /// Hook for discrete input events. The grid currently ignores them.
    pub fn handle_event(&mut self, _event: &InputEvent) {}

    fn index(&self, coord: TileCoord) -> Option<usize> {
        let column = u32::try_from(coord.column()).ok()?;
        let row = u32::try_from(coord.row()).ok()?;
        if column < self.columns && row < self.rows {
            Some(self.flat_index(column, row))
        } else {
            None
        }
    }

    fn flat_index(&self, column: u32, row: u32) -> usize {
        row as usize * self.columns as usize + column as usize
    }
}

fn cell_capacity(columns: u32, rows: u32) -> usize {
    let capacity = u64::from(columns) * u64::from(rows);
    usize::try_from(capacity).unwrap_or(0)
}
