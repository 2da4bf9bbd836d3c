use crate::alignment::engine::AlignError;
use crate::alignment::fill::DpMatrices;
use crate::alignment::matrix::Direction;
use crate::core::label::Label;
use crate::core::types::AlignedLabel;

/// Path recovered from a filled pointer matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Traceback {
    /// Aligned stream of sequence 1 (matrix columns)
    pub aligned1: Vec<AlignedLabel>,

    /// Aligned stream of sequence 2 (matrix rows)
    pub aligned2: Vec<AlignedLabel>,

    /// Score in the bottom-right cell
    pub raw_score: i32,

    /// Columns where both sequences are unlabeled
    pub zero_zero_matches: usize,

    pub diag_steps: usize,
    pub left_steps: usize,
    pub up_steps: usize,
}

impl Traceback {
    /// Number of alignment columns, gaps included
    pub fn len(&self) -> usize {
        self.aligned1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned1.is_empty()
    }
}

/// Walk the filled matrices from `(n2, n1)` back to `(0, 0)`.
///
/// The walk starts in the lane of the bottom-right cell's pointer. After a
/// DIAG step it continues in the lane of the next cell's pointer; after a
/// LEFT or UP step it continues in the lane that preceded the gap step, as
/// recorded in `left_from` or `up_from`. Once one index reaches zero the walk
/// continues along the boundary regardless of the (unset) pointer there.
///
/// # Errors
///
/// Returns `AlignError::InconsistentTraceback` if a cell offers no valid
/// move, which means the matrices were not produced by `fill` for these
/// sequences.
pub fn traceback(
    dp: &DpMatrices,
    seq1: &[Label],
    seq2: &[Label],
) -> Result<Traceback, AlignError> {
    let (mut i, mut j) = (seq2.len(), seq1.len());
    let fits = |rows: usize, cols: usize| rows == i + 1 && cols == j + 1;
    if !fits(dp.scores.rows(), dp.scores.cols())
        || !fits(dp.pointers.rows(), dp.pointers.cols())
        || !fits(dp.left_from.rows(), dp.left_from.cols())
        || !fits(dp.up_from.rows(), dp.up_from.cols())
    {
        return Err(AlignError::InconsistentTraceback { row: i, col: j });
    }

    let mut aligned1 = Vec::with_capacity(i + j);
    let mut aligned2 = Vec::with_capacity(i + j);
    let mut zero_zero_matches = 0;
    let (mut diag_steps, mut left_steps, mut up_steps) = (0, 0, 0);
    let mut lane = dp.pointers.get(i, j);

    while i > 0 || j > 0 {
        let step = if i == 0 {
            Direction::Left
        } else if j == 0 {
            Direction::Up
        } else {
            lane
        };

        match step {
            Direction::Diag => {
                let (a, b) = (&seq2[i - 1], &seq1[j - 1]);
                if a.is_unlabeled() && b.is_unlabeled() {
                    zero_zero_matches += 1;
                }
                aligned2.push(AlignedLabel::Label(a.clone()));
                aligned1.push(AlignedLabel::Label(b.clone()));
                i -= 1;
                j -= 1;
                lane = dp.pointers.get(i, j);
                diag_steps += 1;
            }
            Direction::Left => {
                aligned2.push(AlignedLabel::Gap);
                aligned1.push(AlignedLabel::Label(seq1[j - 1].clone()));
                lane = dp.left_from.get(i, j);
                j -= 1;
                left_steps += 1;
            }
            Direction::Up => {
                aligned2.push(AlignedLabel::Label(seq2[i - 1].clone()));
                aligned1.push(AlignedLabel::Gap);
                lane = dp.up_from.get(i, j);
                i -= 1;
                up_steps += 1;
            }
            Direction::Unset => {
                return Err(AlignError::InconsistentTraceback { row: i, col: j });
            }
        }
    }

    aligned1.reverse();
    aligned2.reverse();

    Ok(Traceback {
        aligned1,
        aligned2,
        raw_score: dp.scores.get(seq2.len(), seq1.len()),
        zero_zero_matches,
        diag_steps,
        left_steps,
        up_steps,
    })
}
