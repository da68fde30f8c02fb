/*!
 * Banded global alignment of two subtitle sequences.
 *
 * Needleman-Wunsch over subtitle records: pairing two records scores by how
 * well their beginnings or endings agree, leaving a record unmatched costs
 * the gap penalty. Only cells near the diagonal are computed, which bounds
 * the work to O(n * band).
 */

use log::{debug, warn};

use crate::alignment::enricher::AlignedPair;
use crate::alignment::matrix::{Arrow, BandedMatrix, Cell, OUT_OF_BAND_SCORE};
use crate::app_config::AlignmentConfig;
use crate::errors::AlignmentError;
use crate::strings::similarity::{similarity, TextAlignment};
use crate::subtitle::record::SubtitleRecord;

/// Which view of the matrix `inspect_matrix` renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixKind {
    /// Direction glyphs
    Traceback,
    /// Cumulative scores
    Score,
}

/// Result of aligning two sequences
#[derive(Debug, Clone)]
pub struct Alignment {
    /// Aligned pairs in sequence order
    pub pairs: Vec<AlignedPair>,
    /// Score of the optimal path
    pub score: i32,
    /// Traceback cells lying on the edge of a restricting band
    pub band_edge_hits: usize,
}

/// Aligns a from sequence (matrix rows) with a to sequence (matrix columns)
#[derive(Debug, Clone)]
pub struct SubtitleAligner<'a> {
    left_seq: &'a [SubtitleRecord],
    top_seq: &'a [SubtitleRecord],
    config: AlignmentConfig,
    band: usize,
}

impl<'a> SubtitleAligner<'a> {
    /// Create an aligner for two record sequences
    pub fn new(
        left_seq: &'a [SubtitleRecord],
        top_seq: &'a [SubtitleRecord],
        config: AlignmentConfig,
    ) -> Self {
        // A band wider than the longer sequence covers the full matrix
        let band = config
            .diagonal_band_range
            .min(left_seq.len().max(top_seq.len()));
        Self {
            left_seq,
            top_seq,
            config,
            band,
        }
    }

    /// Effective band after clamping to the sequence lengths
    pub fn band(&self) -> usize {
        self.band
    }

    /// Whether the band leaves part of the matrix uncomputed
    fn band_is_restricting(&self) -> bool {
        self.band < self.left_seq.len().max(self.top_seq.len())
    }

    /// Score of pairing `left_record` with `top_record` at a matrix position.
    ///
    /// The ratio is the better of the beginnings (left-truncated) and the
    /// endings (right-truncated) comparison. Right-aligned pairs only share
    /// their endings, so a left-only ratio would score them as mismatches.
    ///
    /// Indexes are record indexes, i.e. matrix coordinates minus one.
    pub fn compute_score(
        &self,
        left_record: &SubtitleRecord,
        top_record: &SubtitleRecord,
        row_index: usize,
        col_index: usize,
    ) -> i32 {
        if row_index.abs_diff(col_index) > self.band {
            return OUT_OF_BAND_SCORE;
        }

        let (a, b) = (&left_record.content_sim, &top_record.content_sim);
        let left = similarity(a, b, Some(usize::MAX), TextAlignment::Left);
        let right = similarity(a, b, Some(usize::MAX), TextAlignment::Right);
        let ratio = left.lcs_ratio.max(right.lcs_ratio);

        if ratio >= self.config.min_match_ratio {
            (100.0 * ratio).round() as i32
        } else {
            self.config.mismatch_penalty
        }
    }

    /// Fill the score matrix
    fn fill_matrix(&self) -> Result<BandedMatrix, AlignmentError> {
        let rows = self.left_seq.len();
        let cols = self.top_seq.len();
        if rows.abs_diff(cols) > self.band {
            return Err(AlignmentError::BandTooNarrow {
                band: self.band,
                rows,
                cols,
            });
        }

        let gap = self.config.gap_penalty;
        let mut matrix = BandedMatrix::new(rows + 1, cols + 1, self.band);
        debug!(
            "Aligning {} x {} subtitles with band {} ({} cells)",
            rows,
            cols,
            self.band,
            matrix.stored_cells()
        );

        matrix.set(0, 0, Cell { score: 0, arrow: Arrow::Origin });
        for col in 1..=cols.min(self.band) {
            matrix.set(0, col, Cell { score: col as i32 * gap, arrow: Arrow::Left });
        }
        for row in 1..=rows.min(self.band) {
            matrix.set(row, 0, Cell { score: row as i32 * gap, arrow: Arrow::Up });
        }

        for row in 1..=rows {
            for col in matrix.col_range(row) {
                if col == 0 {
                    continue;
                }

                let diagonal = matrix.score(row - 1, col - 1).saturating_add(self.compute_score(
                    &self.left_seq[row - 1],
                    &self.top_seq[col - 1],
                    row - 1,
                    col - 1,
                ));
                let mut best = Cell { score: diagonal, arrow: Arrow::Diagonal };

                if matrix.in_band(row - 1, col) {
                    let up = matrix.score(row - 1, col) + gap;
                    if up > best.score {
                        best = Cell { score: up, arrow: Arrow::Up };
                    }
                }
                if matrix.in_band(row, col - 1) {
                    let left = matrix.score(row, col - 1) + gap;
                    if left > best.score {
                        best = Cell { score: left, arrow: Arrow::Left };
                    }
                }

                matrix.set(row, col, best);
            }
        }

        Ok(matrix)
    }

    /// Compute the optimal alignment, inserting gap records where one side has no match
    pub fn get_optimal_alignment(&self) -> Result<Alignment, AlignmentError> {
        let matrix = self.fill_matrix()?;
        let restricting = self.band_is_restricting();

        let mut pairs = Vec::with_capacity(self.left_seq.len() + self.top_seq.len());
        let mut band_edge_hits = 0;
        let (mut row, mut col) = (self.left_seq.len(), self.top_seq.len());

        while row > 0 || col > 0 {
            if restricting && matrix.on_band_edge(row, col) {
                band_edge_hits += 1;
            }

            let arrow = matrix.get(row, col).map_or(Arrow::Left, |cell| cell.arrow);
            match arrow {
                Arrow::Diagonal => {
                    pairs.push(AlignedPair::new(
                        self.left_seq[row - 1].clone(),
                        self.top_seq[col - 1].clone(),
                    ));
                    row -= 1;
                    col -= 1;
                }
                Arrow::Up => {
                    pairs.push(AlignedPair::new(
                        self.left_seq[row - 1].clone(),
                        SubtitleRecord::gap(col),
                    ));
                    row -= 1;
                }
                Arrow::Left | Arrow::Origin => {
                    pairs.push(AlignedPair::new(
                        SubtitleRecord::gap(row),
                        self.top_seq[col - 1].clone(),
                    ));
                    col -= 1;
                }
            }
        }
        pairs.reverse();

        if band_edge_hits > 0 {
            warn!(
                "Alignment path touches the edge of diagonal band {} in {} cells, consider a wider band",
                self.band, band_edge_hits
            );
        }

        Ok(Alignment {
            pairs,
            score: matrix.score(self.left_seq.len(), self.top_seq.len()),
            band_edge_hits,
        })
    }

    /// Render the matrix as text, one line per row.
    ///
    /// Traceback cells outside the band render as `←`, score cells as `.`.
    pub fn inspect_matrix(&self, kind: MatrixKind) -> Result<String, AlignmentError> {
        let matrix = self.fill_matrix()?;

        let lines: Vec<String> = (0..matrix.rows())
            .map(|row| {
                let cells: Vec<String> = (0..matrix.cols())
                    .map(|col| match (kind, matrix.get(row, col)) {
                        (MatrixKind::Traceback, Some(cell)) => cell.arrow.to_string(),
                        (MatrixKind::Traceback, None) => Arrow::Left.to_string(),
                        (MatrixKind::Score, Some(cell)) => format!("{:>6}", cell.score),
                        (MatrixKind::Score, None) => format!("{:>6}", "."),
                    })
                    .collect();
                cells.join(" ")
            })
            .collect();

        Ok(lines.join("\n"))
    }
}
