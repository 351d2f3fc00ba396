//! The indexable-sequence contract shared by both samplers.
//!
//! A training loop sees a sampler as `len()` pairs addressable by index. Shuffling and epoch
//! logic live in the caller; `gather` only stacks the pairs for indices the caller chose.

use crate::{Error, Result};
use ndarray::{Array1, Array2};

/// One training record: a state vector `x` (either \(x_0\) or \(x_1\)) and its dosage `d`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub x: Array1<f32>,
    pub d: Array1<f32>,
}

/// Row-stacked pairs: `xs` is `n × G`, `ds` is `n × n_TF`.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub xs: Array2<f32>,
    pub ds: Array2<f32>,
}

impl Batch {
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.nrows()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.nrows() == 0
    }
}

/// A finite sequence of `(x, d)` pairs.
pub trait PairedDataset {
    /// Number of addressable pairs.
    fn len(&self) -> usize;

    /// Name of the table `len()` is measured on; used in range errors.
    fn primary_table(&self) -> &'static str;

    /// Width of `x`.
    fn x_dim(&self) -> usize;

    /// Width of `d`.
    fn d_dim(&self) -> usize;

    /// Fetch the pair at `index`, or `Error::IndexOutOfRange`.
    fn get(&self, index: usize) -> Result<Pair>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Like `get`, for callers holding signed indices. Negative indices are out of range;
    /// there is no wrap-around from the end.
    fn get_signed(&self, index: isize) -> Result<Pair> {
        match usize::try_from(index) {
            Ok(i) => self.get(i),
            Err(_) => Err(Error::IndexOutOfRange {
                table: self.primary_table(),
                index: index as i64,
                len: self.len(),
            }),
        }
    }

    /// Stack the pairs at `indices` into a `Batch`, in the given order.
    ///
    /// Fails on the first bad index. Duplicated indices are fetched again (and, for samplers
    /// with random components, redrawn).
    fn gather(&self, indices: &[usize]) -> Result<Batch> {
        let mut xs = Array2::<f32>::zeros((indices.len(), self.x_dim()));
        let mut ds = Array2::<f32>::zeros((indices.len(), self.d_dim()));
        for (k, &i) in indices.iter().enumerate() {
            let pair = self.get(i)?;
            xs.row_mut(k).assign(&pair.x);
            ds.row_mut(k).assign(&pair.d);
        }
        Ok(Batch { xs, ds })
    }

    /// Sequential pass over `0..len()`.
    fn iter(&self) -> Iter<'_, Self>
    where
        Self: Sized,
    {
        Iter {
            dataset: self,
            next: 0,
        }
    }
}

/// Iterator returned by `PairedDataset::iter`.
#[derive(Debug)]
pub struct Iter<'a, D> {
    dataset: &'a D,
    next: usize,
}

impl<D: PairedDataset> Iterator for Iter<'_, D> {
    type Item = Result<Pair>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.dataset.len() {
            return None;
        }
        let i = self.next;
        self.next += 1;
        Some(self.dataset.get(i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.dataset.len().saturating_sub(self.next);
        (rest, Some(rest))
    }
}

impl<D: PairedDataset> ExactSizeIterator for Iter<'_, D> {}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// `x = [i, i]`, `d = [-i]` for `i < n`.
    struct Ramp {
        n: usize,
    }

    impl PairedDataset for Ramp {
        fn len(&self) -> usize {
            self.n
        }
        fn primary_table(&self) -> &'static str {
            "ramp"
        }
        fn x_dim(&self) -> usize {
            2
        }
        fn d_dim(&self) -> usize {
            1
        }
        fn get(&self, index: usize) -> Result<Pair> {
            if index >= self.n {
                return Err(Error::IndexOutOfRange {
                    table: "ramp",
                    index: index as i64,
                    len: self.n,
                });
            }
            let v = index as f32;
            Ok(Pair {
                x: array![v, v],
                d: array![-v],
            })
        }
    }

    #[test]
    fn negative_signed_index_is_out_of_range() {
        let ds = Ramp { n: 5 };
        match ds.get_signed(-1) {
            Err(Error::IndexOutOfRange { table, index, len }) => {
                assert_eq!((table, index, len), ("ramp", -1, 5));
            }
            other => panic!("expected range error, got {other:?}"),
        }
        assert!(ds.get_signed(4).is_ok());
        assert!(ds.get_signed(5).is_err());
    }

    #[test]
    fn gather_stacks_in_request_order() -> Result<()> {
        let ds = Ramp { n: 4 };
        let b = ds.gather(&[3, 0, 3])?;
        assert_eq!(b.len(), 3);
        assert_eq!(b.xs, array![[3.0f32, 3.0], [0.0, 0.0], [3.0, 3.0]]);
        assert_eq!(b.ds, array![[-3.0f32], [0.0], [-3.0]]);
        Ok(())
    }

    #[test]
    fn gather_empty_keeps_column_counts() -> Result<()> {
        let b = Ramp { n: 4 }.gather(&[])?;
        assert!(b.is_empty());
        assert_eq!(b.xs.dim(), (0, 2));
        assert_eq!(b.ds.dim(), (0, 1));
        Ok(())
    }

    #[test]
    fn gather_fails_on_first_bad_index() {
        assert!(Ramp { n: 2 }.gather(&[0, 2, 1]).is_err());
    }

    #[test]
    fn iter_visits_every_index_once() {
        let ds = Ramp { n: 3 };
        let it = ds.iter();
        assert_eq!(it.len(), 3);
        let ds_col: Vec<f32> = it.map(|p| p.unwrap().d[0]).collect();
        assert_eq!(ds_col, vec![0.0, -1.0, -2.0]);
    }
}
