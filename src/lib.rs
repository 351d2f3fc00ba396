//! # doseflow
//!
//! Paired sampling primitives for dosage-conditioned flow matching on single-cell data.
//!
//! A perturbation flow model learns to transport a baseline expression state \(x_0\) (a
//! control cell) to a post-perturbation state \(x_1\) (a treated cell), conditioned on a
//! transcription-factor dosage vector \(d\). The training loop needs two views of the data:
//!
//! - `baseline::PairedBaselineSampler`: yields \((x_0, d)\). `d` is the dosage of treated cell
//!   `i`, and `x_0` is a control cell drawn **uniformly at random, fresh on every access**.
//! - `outcome::PairedOutcomeSampler`: yields \((x_1, d)\), both taken from row `i` of two
//!   row-aligned treated tables.
//!
//! This crate is intentionally small:
//!
//! - it wraps caller-supplied numeric tables as immutable `f32` matrices (`matrix`),
//! - it exposes them as finite indexable sequences of pairs (`dataset::PairedDataset`),
//! - it does not load files, shuffle, batch across epochs, or train anything.
//!
//! ## Public invariants (must not change)
//!
//! - **Determinism knobs are explicit**: the baseline sampler owns a seedable RNG
//!   (`BaselineSamplerConfig::seed`, or an injected `rand::Rng`). There is no global RNG.
//! - **No hidden normalization**: values are converted to `f32` and otherwise untouched.
//! - **Errors, not panics**: every bad index or malformed table surfaces as an `Error`.
//!
//! ## Module map
//!
//! - `matrix`: rectangular `f32` tables (expression and dosage matrices)
//! - `dataset`: the `PairedDataset` trait plus `Pair` / `Batch`
//! - `baseline`: control-baseline sampler with per-access random draws
//! - `outcome`: aligned treated-outcome sampler

pub mod baseline;
pub mod dataset;
pub mod matrix;
pub mod outcome;

pub use baseline::{BaselineSamplerConfig, PairedBaselineSampler};
pub use dataset::{Batch, Pair, PairedDataset};
pub use matrix::Matrix;
pub use outcome::PairedOutcomeSampler;

/// doseflow error variants.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input could not be turned into a rectangular `f32` matrix.
    #[error("construction error: {0}")]
    Construction(String),
    /// Index outside `[0, len)` for the named table.
    #[error("index {index} out of range for {table} with {len} rows")]
    IndexOutOfRange {
        table: &'static str,
        index: i64,
        len: usize,
    },
    /// Random draw requested from a table with no rows.
    #[error("empty source: {0}")]
    EmptySource(&'static str),
    #[error("shape mismatch: {0}")]
    Shape(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
