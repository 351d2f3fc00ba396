//! Immutable `f32` tables: expression matrices (cells × genes) and dosage matrices
//! (cells × transcription factors).
//!
//! Construction is the only place where shape is checked. After that a `Matrix` is read-only.

use crate::{Error, Result};
use ndarray::{Array2, ArrayView1, ArrayView2};

/// A rectangular, row-major `f32` matrix. Rows are cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Array2<f32>,
}

impl Matrix {
    /// Convert a table given as rows (e.g. `&[Vec<f64>]`, `&[[i32; 3]]`) to `f32`.
    ///
    /// Every row must have the length of the first one. An empty table becomes `0 × 0`.
    pub fn from_rows<R, T>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[T]>,
        T: Copy + Into<f64>,
    {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut flat = Vec::with_capacity(nrows * ncols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(Error::Construction(format!(
                    "ragged rows: row {i} has {} columns, expected {ncols}",
                    row.len()
                )));
            }
            flat.extend(row.iter().map(|&v| v.into() as f32));
        }
        Self::from_flat(nrows, ncols, flat)
    }

    /// Adopt a row-major buffer of `nrows * ncols` values.
    pub fn from_flat(nrows: usize, ncols: usize, data: Vec<f32>) -> Result<Self> {
        let len = data.len();
        Array2::from_shape_vec((nrows, ncols), data)
            .map(|data| Self { data })
            .map_err(|_| {
                Error::Construction(format!(
                    "buffer of length {len} does not fill a {nrows}x{ncols} matrix"
                ))
            })
    }

    /// Convert any numeric ndarray view to `f32`.
    pub fn from_array<T>(a: &ArrayView2<T>) -> Self
    where
        T: Copy + Into<f64>,
    {
        Self {
            data: a.mapv(|v| v.into() as f32),
        }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    pub fn row(&self, i: usize) -> Option<ArrayView1<'_, f32>> {
        (i < self.nrows()).then(|| self.data.row(i))
    }

    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.data.view()
    }

    /// Row lookup that reports failures against `table`.
    pub(crate) fn row_in(&self, table: &'static str, i: usize) -> Result<ArrayView1<'_, f32>> {
        self.row(i).ok_or_else(|| Error::IndexOutOfRange {
            table,
            index: i as i64,
            len: self.nrows(),
        })
    }
}

impl From<Array2<f32>> for Matrix {
    fn from(data: Array2<f32>) -> Self {
        Self { data }
    }
}
