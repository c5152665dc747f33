use super::{Coord};
use super::coord::{Axes};

/// Selects which axis varies fastest, both when iterating over a [`Shape`]
/// and when laying out an [`Array`] in memory.
///
/// [`Shape`]: super::Shape
/// [`Array`]: super::Array
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Order {
    /// The last axis varies fastest, and is contiguous in storage.
    #[default]
    RowMajor,

    /// The first axis varies fastest, and is contiguous in storage.
    ColumnMajor,
}

impl Order {
    /// Returns the storage offset of `coord` in an array of size `shape`.
    ///
    /// For `RowMajor` this is `Σ coord[i] * Π shape[i+1..]`; for
    /// `ColumnMajor` it is `Σ coord[i] * Π shape[..i]`.
    ///
    /// No bounds checking is done. If `coord` is not within `shape` the result
    /// is unspecified, and may be negative.
    ///
    /// ```
    /// use ndtuple::{Order};
    /// assert_eq!(Order::RowMajor.to_offset(&[1, 2], &[2, 3]), 5);
    /// assert_eq!(Order::ColumnMajor.to_offset(&[1, 2], &[2, 3]), 5);
    /// assert_eq!(Order::RowMajor.to_offset(&[1, 0], &[2, 3]), 3);
    /// assert_eq!(Order::ColumnMajor.to_offset(&[1, 0], &[2, 3]), 1);
    /// ```
    pub fn to_offset(self, coord: &[isize], shape: &[usize]) -> isize {
        debug_assert_eq!(coord.len(), shape.len());
        let step = |offset: isize, (&index, &extent): (&isize, &usize)| {
            offset * extent as isize + index
        };
        let pairs = coord.iter().zip(shape);
        match self {
            Order::RowMajor => pairs.fold(0, step),
            Order::ColumnMajor => pairs.rev().fold(0, step),
        }
    }

    /// The inverse of [`Self::to_offset()`]: returns the `Coord` whose offset
    /// in an array of size `shape` is `offset`.
    ///
    /// `offset` must be less than the total size of `shape`.
    pub fn from_offset(self, shape: &[usize], offset: usize) -> Coord {
        let mut coord: Axes<isize> = smallvec::smallvec![0; shape.len()];
        let mut rest = offset;
        let mut step = |slot: &mut isize, &extent: &usize| {
            let (q, r) = div_mod(rest, extent);
            *slot = r as isize;
            rest = q;
        };
        match self {
            Order::RowMajor => coord.iter_mut().zip(shape).rev().for_each(|(s, e)| step(s, e)),
            Order::ColumnMajor => coord.iter_mut().zip(shape).for_each(|(s, e)| step(s, e)),
        }
        debug_assert_eq!(rest, 0, "Offset {} is out of bounds for shape {:?}", offset, shape);
        Coord::from_axes(coord)
    }

    /// The axes of a `ndim`-dimensional grid, fastest-varying first.
    pub(crate) fn axes_fastest_first(self, ndim: usize) -> impl Iterator<Item=usize> {
        let reverse = self == Order::RowMajor;
        (0..ndim).map(move |i| if reverse { ndim - 1 - i } else { i })
    }
}

/// Returns `(index / length, index % length)`, tolerating `length == 0`.
fn div_mod(index: usize, length: usize) -> (usize, usize) {
    if length == 0 { (index, 0) } else { (index / length, index % length) }
}

// ----------------------------------------------------------------------------
