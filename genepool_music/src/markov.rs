// First-order Markov transition matrices for the utterance composer.
//
// Two matrices drive composition:
// - the 3x3 duration matrix, over short/medium/long inter-onset bands;
// - the 9x9 interval matrix, over scale degrees of the voice's interval set.
//   It is a sharp bell centred on state 4, so voices mostly repeat or step.
//
// The base matrices are constants. Each organism gets a mutated copy: one
// mutation pass moves a random fraction of probability mass between two
// distinct cells of every row, which keeps every row sum unchanged. Sampling
// is inverse-CDF on a single uniform draw. A row that sums short of the draw
// falls back to the last state and logs a warning rather than failing.

use crate::error::ComposeError;
use genepool_prng::PoolRng;
use serde::{Deserialize, Serialize};

pub const DURATION_STATES: usize = 3;
pub const INTERVAL_STATES: usize = 9;

/// Interval state every utterance starts from.
pub const CENTRE_INTERVAL_STATE: usize = INTERVAL_STATES / 2;

/// Row sums may drift from 1 by at most this much.
pub const ROW_SUM_TOLERANCE: f64 = 1e-6;

const BASE_DURATION_ROWS: [[f64; DURATION_STATES]; DURATION_STATES] = [
    [0.7, 0.2, 0.1], // from short
    [0.5, 0.3, 0.2], // from medium
    [0.1, 0.4, 0.5], // from long
];

// Rows 3-5 as written sum to 1.035, 0.93 and 1.035; `base_interval`
// rescales every row to sum to 1 so the sampling fallback never fires.
const BASE_INTERVAL_ROWS: [[f64; INTERVAL_STATES]; INTERVAL_STATES] = [
    [0.80, 0.15, 0.03, 0.01, 0.005, 0.003, 0.001, 0.0005, 0.0005],
    [0.15, 0.70, 0.10, 0.03, 0.01, 0.005, 0.003, 0.001, 0.001],
    [0.03, 0.10, 0.65, 0.15, 0.05, 0.01, 0.005, 0.003, 0.002],
    [0.01, 0.03, 0.15, 0.60, 0.15, 0.07, 0.015, 0.007, 0.003],
    [0.005, 0.01, 0.05, 0.15, 0.50, 0.15, 0.05, 0.01, 0.005],
    [0.003, 0.007, 0.015, 0.07, 0.15, 0.60, 0.15, 0.03, 0.01],
    [0.002, 0.003, 0.005, 0.01, 0.05, 0.15, 0.65, 0.10, 0.03],
    [0.001, 0.001, 0.003, 0.005, 0.01, 0.03, 0.10, 0.70, 0.15],
    [0.0005, 0.0005, 0.001, 0.003, 0.005, 0.01, 0.03, 0.15, 0.80],
];

/// A square row-stochastic matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionMatrix {
    rows: Vec<Vec<f64>>,
}

impl TransitionMatrix {
    /// Build from explicit rows, checking shape, entries, and row sums.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ComposeError> {
        let matrix = TransitionMatrix { rows };
        matrix.validate()?;
        Ok(matrix)
    }

    pub fn base_duration() -> Self {
        Self::normalized(BASE_DURATION_ROWS.iter().map(|r| r.to_vec()).collect())
    }

    pub fn base_interval() -> Self {
        Self::normalized(BASE_INTERVAL_ROWS.iter().map(|r| r.to_vec()).collect())
    }

    fn normalized(mut rows: Vec<Vec<f64>>) -> Self {
        for row in &mut rows {
            let sum: f64 = row.iter().sum();
            if sum > 0.0 {
                row.iter_mut().for_each(|p| *p /= sum);
            }
        }
        TransitionMatrix { rows }
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, from: usize) -> &[f64] {
        &self.rows[from]
    }

    pub fn row_sum(&self, from: usize) -> f64 {
        self.rows[from].iter().sum()
    }

    /// Check that the matrix is square with finite, non-negative entries
    /// and rows summing to 1 within `ROW_SUM_TOLERANCE`.
    pub fn validate(&self) -> Result<(), ComposeError> {
        let n = self.rows.len();
        if n == 0 {
            return Err(ComposeError::MatrixShape {
                expected: 1,
                rows: 0,
                cols: 0,
            });
        }
        for (row, values) in self.rows.iter().enumerate() {
            if values.len() != n {
                return Err(ComposeError::MatrixShape {
                    expected: n,
                    rows: n,
                    cols: values.len(),
                });
            }
            if values.iter().any(|p| !p.is_finite() || *p < 0.0) {
                return Err(ComposeError::InvalidProbability { row });
            }
            let sum: f64 = values.iter().sum();
            if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(ComposeError::MatrixInvariant { row, sum });
            }
        }
        Ok(())
    }

    /// Check `validate` and additionally require an `expected`-state matrix.
    pub fn validate_size(&self, expected: usize) -> Result<(), ComposeError> {
        if self.rows.len() != expected {
            return Err(ComposeError::MatrixShape {
                expected,
                rows: self.rows.len(),
                cols: self.rows.first().map_or(0, Vec::len),
            });
        }
        self.validate()
    }

    /// One mutation pass: in every row, pick two distinct columns and move
    /// `rand * min(source, max_delta)` from one to the other. A negative
    /// `max_delta` moves nothing.
    pub fn mutated(&self, rng: &mut PoolRng, max_delta: f64) -> Self {
        let mut rows = self.rows.clone();
        for row in &mut rows {
            let len = row.len();
            if len < 2 {
                continue;
            }
            let i = rng.index(len);
            let j = (i + 1 + rng.index(len - 1)) % len;
            let (src, dst) = if rng.chance(0.5) { (i, j) } else { (j, i) };
            let delta = rng.next_f64() * row[src].min(max_delta.max(0.0));
            row[src] -= delta;
            row[dst] += delta;
        }
        TransitionMatrix { rows }
    }

    /// Inverse-CDF sample of the next state from `from` using one uniform
    /// draw in [0, 1). Falls back to the last state if the cumulative sum
    /// never exceeds the draw.
    pub fn sample(&self, from: usize, draw: f64) -> usize {
        let row = &self.rows[from];
        let mut cumulative = 0.0;
        for (state, p) in row.iter().enumerate() {
            cumulative += p;
            if draw < cumulative {
                return state;
            }
        }
        log::warn!(
            "transition row {from} sums to {cumulative}, below draw {draw}; using last state"
        );
        row.len() - 1
    }
}
