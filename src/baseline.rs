//! Control-baseline sampler: \((x_0, d)\) pairs for the source side of a perturbation flow.
//!
//! Index `i` addresses treated cell `i` through its dosage vector `d = treated_d[i]`. The
//! baseline `x_0` is **not** tied to `i`: every `get` draws a control row
//! `j ~ Uniform{0, .., N_control - 1}` afresh. Two calls with the same index can return
//! different `x_0`; only `d` is a function of the index.
//!
//! The RNG is owned by the sampler and seeded explicitly, so a fixed seed plus a fixed access
//! order reproduces the same draws.

use crate::dataset::{Pair, PairedDataset};
use crate::matrix::Matrix;
use crate::{Error, Result};
use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::{Mutex, PoisonError};

/// Configuration for `PairedBaselineSampler`.
#[derive(Debug, Clone)]
pub struct BaselineSamplerConfig {
    /// RNG seed for the control-row draws.
    pub seed: u64,
}

impl Default for BaselineSamplerConfig {
    fn default() -> Self {
        Self { seed: 123 }
    }
}

/// Pairs treated-cell dosages with uniformly drawn control expression rows.
///
/// `get(&self)` is safe to call from several threads: draws serialize on an internal lock.
#[derive(Debug)]
pub struct PairedBaselineSampler<R = ChaCha8Rng> {
    control: Matrix,
    dosage: Matrix,
    rng: Mutex<R>,
}

impl PairedBaselineSampler<ChaCha8Rng> {
    /// Build from converted tables, seeding a `ChaCha8Rng` from `cfg.seed`.
    ///
    /// Fails with `Error::EmptySource` if `control` has no rows.
    pub fn new(control: Matrix, dosage: Matrix, cfg: &BaselineSamplerConfig) -> Result<Self> {
        Self::with_rng(control, dosage, ChaCha8Rng::seed_from_u64(cfg.seed))
    }

    /// Convenience: convert row tables, then `new`.
    pub fn from_rows<A, B, T, U>(
        control_x: &[A],
        treated_d: &[B],
        cfg: &BaselineSamplerConfig,
    ) -> Result<Self>
    where
        A: AsRef<[T]>,
        B: AsRef<[U]>,
        T: Copy + Into<f64>,
        U: Copy + Into<f64>,
    {
        Self::new(
            Matrix::from_rows(control_x)?,
            Matrix::from_rows(treated_d)?,
            cfg,
        )
    }
}

impl<R: Rng> PairedBaselineSampler<R> {
    /// Build with a caller-supplied random source.
    pub fn with_rng(control: Matrix, dosage: Matrix, rng: R) -> Result<Self> {
        if control.is_empty() {
            return Err(Error::EmptySource("control_x has no rows to draw a baseline from"));
        }
        debug!(
            "baseline sampler: control {}x{}, treated_d {}x{}",
            control.nrows(),
            control.ncols(),
            dosage.nrows(),
            dosage.ncols()
        );
        Ok(Self {
            control,
            dosage,
            rng: Mutex::new(rng),
        })
    }

    pub fn control(&self) -> &Matrix {
        &self.control
    }

    pub fn dosage(&self) -> &Matrix {
        &self.dosage
    }

    /// Draw one control row index uniformly from `0..control().nrows()`.
    pub fn draw_control_index(&self) -> usize {
        // Poison is ignored: the RNG state is valid after any panic.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(0..self.control.nrows())
    }
}

impl<R: Rng> PairedDataset for PairedBaselineSampler<R> {
    fn len(&self) -> usize {
        self.dosage.nrows()
    }

    fn primary_table(&self) -> &'static str {
        "treated_d"
    }

    fn x_dim(&self) -> usize {
        self.control.ncols()
    }

    fn d_dim(&self) -> usize {
        self.dosage.ncols()
    }

    fn get(&self, index: usize) -> Result<Pair> {
        // Range check first so a rejected index consumes no entropy.
        let d = self.dosage.row_in("treated_d", index)?;
        let j = self.draw_control_index();
        trace!("baseline get({index}): control row {j}");
        let x0 = self.control.row_in("control_x", j)?;
        Ok(Pair {
            x: x0.to_owned(),
            d: d.to_owned(),
        })
    }
}
