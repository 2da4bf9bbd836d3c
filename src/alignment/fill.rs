//! Dynamic-programming fill of the score and pointer matrices.

use serde::Serialize;
use tracing::debug;

use crate::alignment::engine::AlignError;
use crate::alignment::matrix::{
    build_pointer_matrix, build_score_matrix, Direction, PointerMatrix, ScoreMatrix,
};
use crate::alignment::scoring::LabelScorer;
use crate::core::label::Label;

/// How gap steps are charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum GapModel {
    /// Every gap step costs `open`
    Linear { open: i32 },
    /// The first step of a gap run costs `open`, each further step `extend`
    Affine { open: i32, extend: i32 },
}

impl GapModel {
    /// Penalty used for the matrix boundary, always the opening penalty
    pub fn open(&self) -> i32 {
        match *self {
            Self::Linear { open } | Self::Affine { open, .. } => open,
        }
    }

    /// Penalty for a step that continues a gap run in the same direction
    pub fn extend(&self) -> i32 {
        match *self {
            Self::Linear { open } => open,
            Self::Affine { extend, .. } => extend,
        }
    }
}

/// Filled matrices for one alignment.
///
/// `scores` and `pointers` hold the best value of each cell and the move
/// that produced it. A gap run is followed through `left_from` and `up_from`:
/// the move that preceded a LEFT (or UP) step into the cell on the best path
/// ending with that step.
#[derive(Debug)]
pub struct DpMatrices {
    pub scores: ScoreMatrix,
    pub pointers: PointerMatrix,
    pub left_from: PointerMatrix,
    pub up_from: PointerMatrix,
}

/// Score of a lane no path can reach
const UNREACHABLE: i64 = i64::MIN / 4;

/// Best scores of the paths into one cell, by their last move
#[derive(Debug, Clone, Copy)]
struct Lanes {
    diag: i64,
    left: i64,
    up: i64,
}

impl Lanes {
    const NONE: Self = Self {
        diag: UNREACHABLE,
        left: UNREACHABLE,
        up: UNREACHABLE,
    };

    /// Best lane, ties resolved DIAG, then LEFT, then UP
    fn best(&self) -> (i64, Direction) {
        if self.diag >= self.left && self.diag >= self.up {
            (self.diag, Direction::Diag)
        } else if self.left >= self.up {
            (self.left, Direction::Left)
        } else {
            (self.up, Direction::Up)
        }
    }

    /// Best path ending with one more gap step in direction `step` after a
    /// cell with these lanes. Coming from the `step` lane extends the run,
    /// any other lane opens a new one.
    fn gap_step(&self, step: Direction, open: i64, extend: i64) -> (i64, Direction) {
        let charge = |lane: Direction| if lane == step { extend } else { open };
        Lanes {
            diag: self.diag + open,
            left: self.left + charge(Direction::Left),
            up: self.up + charge(Direction::Up),
        }
        .best()
    }
}

/// Fill the score and pointer matrices for `seq1` (columns) against `seq2`
/// (rows).
///
/// Every cell keeps three lanes: the best path ending with a DIAG, a LEFT or
/// an UP move. A gap step continuing a run in the same direction costs the
/// extension penalty, any other gap step the opening penalty (the two are
/// equal under the linear model). The cell value is the best lane, with ties
/// resolved DIAG, then LEFT, then UP; the same priority picks the origin of
/// each gap lane. Row 0 and column 0 hold `open * index`.
///
/// Cells are visited row by row; only the lanes of the previous and current
/// rows are kept.
///
/// # Errors
///
/// Returns `AlignError::Allocation` if the matrices cannot be allocated, or
/// `AlignError::ScoreOverflow` if a cell value does not fit in an `i32`.
pub fn fill(
    seq1: &[Label],
    seq2: &[Label],
    scorer: &LabelScorer,
    gaps: GapModel,
) -> Result<DpMatrices, AlignError> {
    let (n1, n2) = (seq1.len(), seq2.len());
    let mut scores = build_score_matrix(n1, n2)?;
    let mut pointers = build_pointer_matrix(n1, n2)?;
    let mut left_from = build_pointer_matrix(n1, n2)?;
    let mut up_from = build_pointer_matrix(n1, n2)?;

    debug!(rows = n2 + 1, cols = n1 + 1, ?gaps, "Filling alignment matrices");

    let open = i64::from(gaps.open());
    let extend = i64::from(gaps.extend());

    let mut prev: Vec<Lanes> = Vec::with_capacity(n1 + 1);
    prev.push(Lanes { diag: 0, ..Lanes::NONE });
    for j in 1..=n1 {
        let left = boundary_penalty(open, j);
        scores.set(0, j, to_cell(left, 0, j)?);
        prev.push(Lanes { left, ..Lanes::NONE });
    }

    for i in 1..=n2 {
        let up = boundary_penalty(open, i);
        scores.set(i, 0, to_cell(up, i, 0)?);

        let mut curr: Vec<Lanes> = Vec::with_capacity(n1 + 1);
        curr.push(Lanes { up, ..Lanes::NONE });

        for j in 1..=n1 {
            let pair = i64::from(scorer.score(&seq2[i - 1], &seq1[j - 1]));
            let diag = prev[j - 1].best().0 + pair;
            let (left, left_origin) = curr[j - 1].gap_step(Direction::Left, open, extend);
            let (up, up_origin) = prev[j].gap_step(Direction::Up, open, extend);

            let lanes = Lanes { diag, left, up };
            let (value, direction) = lanes.best();

            scores.set(i, j, to_cell(value, i, j)?);
            pointers.set(i, j, direction);
            left_from.set(i, j, left_origin);
            up_from.set(i, j, up_origin);
            curr.push(lanes);
        }

        prev = curr;
    }

    Ok(DpMatrices {
        scores,
        pointers,
        left_from,
        up_from,
    })
}

#[inline]
fn boundary_penalty(open: i64, index: usize) -> i64 {
    #[allow(clippy::cast_possible_wrap)] // Lengths are bounded by the matrix size limit
    let index = index as i64;
    open * index
}

#[inline]
fn to_cell(value: i64, row: usize, col: usize) -> Result<i32, AlignError> {
    i32::try_from(value).map_err(|_| AlignError::ScoreOverflow { row, col })
}
