/*!
 * Banded dynamic programming matrix.
 *
 * Only cells within `band` of the main diagonal are stored. Rows are laid out
 * back to back in one flat vector, each row holding `2 * band + 1` cells
 * centered on the diagonal.
 */

use std::fmt;

/// Score assigned to cells outside the band
pub const OUT_OF_BAND_SCORE: i32 = -1000;

/// Traceback direction of a matrix cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arrow {
    /// Top left corner, end of the traceback
    #[default]
    Origin,
    /// Pair a from record with a to record
    Diagonal,
    /// Consume a from record, gap in the to sequence
    Up,
    /// Consume a to record, gap in the from sequence
    Left,
}

impl Arrow {
    /// Glyph used when rendering the traceback grid
    pub fn glyph(&self) -> char {
        match self {
            Self::Origin => '·',
            Self::Diagonal => '⬉',
            Self::Up => '↑',
            Self::Left => '←',
        }
    }
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// A computed matrix cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    /// Best cumulative score reaching this cell
    pub score: i32,
    /// Where that score came from
    pub arrow: Arrow,
}

/// Flat storage for the cells of a banded matrix
#[derive(Debug, Clone)]
pub struct BandedMatrix {
    rows: usize,
    cols: usize,
    band: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl BandedMatrix {
    /// Create a matrix of `rows` x `cols` cells with the given band
    pub fn new(rows: usize, cols: usize, band: usize) -> Self {
        let width = 2 * band + 1;
        Self {
            rows,
            cols,
            band,
            width,
            cells: vec![Cell::default(); rows * width],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn band(&self) -> usize {
        self.band
    }

    /// Whether a cell lies within the matrix and the band
    pub fn in_band(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && row.abs_diff(col) <= self.band
    }

    /// Whether a cell lies exactly on the band edge
    pub fn on_band_edge(&self, row: usize, col: usize) -> bool {
        row.abs_diff(col) == self.band
    }

    /// Range of columns stored for a row
    pub fn col_range(&self, row: usize) -> std::ops::RangeInclusive<usize> {
        let start = row.saturating_sub(self.band);
        let end = (row + self.band).min(self.cols.saturating_sub(1));
        start..=end
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.width + (col + self.band - row)
    }

    /// Cell at a position, `None` when outside the band
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if !self.in_band(row, col) {
            return None;
        }
        self.cells.get(self.offset(row, col))
    }

    /// Score at a position, `OUT_OF_BAND_SCORE` when outside the band
    pub fn score(&self, row: usize, col: usize) -> i32 {
        self.get(row, col).map_or(OUT_OF_BAND_SCORE, |cell| cell.score)
    }

    /// Store a cell; positions outside the band are ignored
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if self.in_band(row, col) {
            let offset = self.offset(row, col);
            self.cells[offset] = cell;
        }
    }

    /// Number of stored cells
    pub fn stored_cells(&self) -> usize {
        self.cells.len()
    }
}
