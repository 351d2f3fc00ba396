//! Treated-outcome sampler: \((x_1, d)\) pairs for the target side of a perturbation flow.
//!
//! Both vectors come from row `i` of two tables the caller promises are row-aligned.
//! Access is deterministic: no RNG, no interior state.

use crate::dataset::{Pair, PairedDataset};
use crate::matrix::Matrix;
use crate::{Error, Result};
use log::debug;

#[derive(Debug, Clone)]
pub struct PairedOutcomeSampler {
    expression: Matrix,
    dosage: Matrix,
}

impl PairedOutcomeSampler {
    /// Pair `treated_x1` with `treated_d`.
    ///
    /// Row alignment is not checked. If `treated_d` is shorter, the tail indices of
    /// `treated_x1` fail in `get` with a range error on `"treated_d"`.
    pub fn new(treated_x1: Matrix, treated_d: Matrix) -> Self {
        debug!(
            "outcome sampler: treated_x1 {}x{}, treated_d {}x{}",
            treated_x1.nrows(),
            treated_x1.ncols(),
            treated_d.nrows(),
            treated_d.ncols()
        );
        Self {
            expression: treated_x1,
            dosage: treated_d,
        }
    }

    /// Like `new`, but rejects tables whose row counts differ.
    pub fn new_aligned(treated_x1: Matrix, treated_d: Matrix) -> Result<Self> {
        if treated_x1.nrows() != treated_d.nrows() {
            return Err(Error::Shape(
                "treated_x1 and treated_d must have the same number of rows",
            ));
        }
        Ok(Self::new(treated_x1, treated_d))
    }

    /// Convenience: convert row tables, then `new`.
    pub fn from_rows<A, B, T, U>(treated_x1: &[A], treated_d: &[B]) -> Result<Self>
    where
        A: AsRef<[T]>,
        B: AsRef<[U]>,
        T: Copy + Into<f64>,
        U: Copy + Into<f64>,
    {
        Ok(Self::new(
            Matrix::from_rows(treated_x1)?,
            Matrix::from_rows(treated_d)?,
        ))
    }

    pub fn expression(&self) -> &Matrix {
        &self.expression
    }

    pub fn dosage(&self) -> &Matrix {
        &self.dosage
    }
}

impl PairedDataset for PairedOutcomeSampler {
    fn len(&self) -> usize {
        self.expression.nrows()
    }

    fn primary_table(&self) -> &'static str {
        "treated_x1"
    }

    fn x_dim(&self) -> usize {
        self.expression.ncols()
    }

    fn d_dim(&self) -> usize {
        self.dosage.ncols()
    }

    fn get(&self, index: usize) -> Result<Pair> {
        let x1 = self.expression.row_in("treated_x1", index)?;
        let d = self.dosage.row_in("treated_d", index)?;
        Ok(Pair {
            x: x1.to_owned(),
            d: d.to_owned(),
        })
    }
}
