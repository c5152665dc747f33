//! [`Coord`]inates and [`Shape`]s.
//!
//! Both are short sequences of integers, one per axis, stored inline for up to
//! four axes.

use std::fmt::{self, Debug, Display};
use std::ops::{Deref};

use smallvec::{SmallVec};

use super::{Error, Result, Order, Coords};

/// Inline storage for one integer per axis.
pub(crate) type Axes<T> = SmallVec<[T; 4]>;

/// A point in the grid defined by a [`Shape`].
///
/// Components may be negative or too large; validity is checked where the
/// `Coord` is used, e.g. by [`View::get()`].
///
/// [`View::get()`]: super::View::get()
#[derive(Default, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Coord(Axes<isize>);

impl Coord {
    /// The origin of an `ndim`-dimensional grid.
    pub fn zeros(ndim: usize) -> Self { Coord(smallvec::smallvec![0; ndim]) }

    /// The number of components.
    pub fn ndim(&self) -> usize { self.0.len() }

    /// Componentwise sum of `self` and `other`, which must have the same
    /// number of components.
    pub fn offset_by(&self, other: &[isize]) -> Coord {
        debug_assert_eq!(self.ndim(), other.len());
        Coord(self.0.iter().zip(other).map(|(&a, &b)| a + b).collect())
    }

    pub(crate) fn from_axes(axes: Axes<isize>) -> Self { Coord(axes) }

    pub(crate) fn axes_mut(&mut self) -> &mut [isize] { &mut self.0 }
}

impl Deref for Coord {
    type Target = [isize];
    fn deref(&self) -> &[isize] { &self.0 }
}

impl AsRef<[isize]> for Coord {
    fn as_ref(&self) -> &[isize] { &self.0 }
}

impl<const N: usize> From<[isize; N]> for Coord {
    fn from(c: [isize; N]) -> Self { Coord(c.into_iter().collect()) }
}

impl From<&[isize]> for Coord {
    fn from(c: &[isize]) -> Self { Coord(c.iter().copied().collect()) }
}

impl From<Vec<isize>> for Coord {
    fn from(c: Vec<isize>) -> Self { Coord(c.into()) }
}

impl FromIterator<isize> for Coord {
    fn from_iter<I: IntoIterator<Item=isize>>(iter: I) -> Self { Coord(iter.into_iter().collect()) }
}

impl Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { Debug::fmt(&*self.0, f) }
}

// ----------------------------------------------------------------------------

/// The per-axis extents of an array. Every extent is non-negative.
#[derive(Default, Clone, Hash, PartialEq, Eq)]
pub struct Shape(Axes<usize>);

impl Shape {
    /// Constructs a `Shape` from signed extents.
    ///
    /// Fails with [`Error::NegativeExtent`] if any extent is negative, and
    /// with [`Error::SizeOverflow`] if the total size does not fit in a
    /// `usize`.
    ///
    /// ```
    /// use ndtuple::{Shape, ErrorKind};
    /// assert_eq!(Shape::new(&[2, 3]).unwrap().total_size(), 6);
    /// assert_eq!(Shape::new(&[2, -3]).unwrap_err().kind(), ErrorKind::InvalidArgument);
    /// ```
    pub fn new(extents: &[isize]) -> Result<Self> {
        let extents = extents.iter().enumerate().map(|(axis, &extent)| {
            usize::try_from(extent).map_err(|_| Error::NegativeExtent {axis, extent})
        }).collect::<Result<Axes<usize>>>()?;
        if checked_size(&extents).is_none() {
            return Err(Error::SizeOverflow {extents: extents.to_vec()});
        }
        Ok(Shape(extents))
    }

    /// Wraps `extents`, which came from an infallible conversion.
    ///
    /// Panics if the total size does not fit in a `usize`.
    fn from_extents(extents: Axes<usize>) -> Self {
        assert!(checked_size(&extents).is_some(), "Shape {:?} has more than usize::MAX elements", &*extents);
        Shape(extents)
    }

    /// The number of axes.
    pub fn ndim(&self) -> usize { self.0.len() }

    /// The number of elements in an array of this `Shape`: the product of the
    /// extents.
    pub fn total_size(&self) -> usize {
        // Every constructor has checked that this fits.
        checked_size(&self.0).unwrap_or(usize::MAX)
    }

    /// Returns `true` if some extent is zero.
    pub fn is_empty(&self) -> bool { self.total_size() == 0 }

    /// Checks that `coord` has the right number of components and that each
    /// lies within its axis.
    pub fn check(&self, coord: &[isize]) -> Result<()> {
        self.check_ndim(coord.len())?;
        for (axis, (&index, &extent)) in coord.iter().zip(&self.0).enumerate() {
            if index < 0 || index as usize >= extent {
                return Err(Error::OutOfRange {axis, index, extent});
            }
        }
        Ok(())
    }

    /// Returns `true` if [`Self::check()`] would succeed.
    pub fn contains(&self, coord: &[isize]) -> bool { self.check(coord).is_ok() }

    pub(crate) fn check_ndim(&self, got: usize) -> Result<()> {
        if got != self.ndim() {
            return Err(Error::DimensionMismatch {expected: self.ndim(), got});
        }
        Ok(())
    }

    /// Validates the bounds of a sub-region `from .. to` of `self`, and
    /// returns its origin and `Shape`.
    ///
    /// Every axis must satisfy `0 <= from <= to <= extent`.
    pub fn sub_region(&self, from: &[isize], to: &[isize]) -> Result<(Coord, Shape)> {
        self.check_ndim(from.len())?;
        self.check_ndim(to.len())?;
        let mut extents = Axes::new();
        for (axis, ((&from, &to), &extent)) in from.iter().zip(to).zip(&self.0).enumerate() {
            if from < 0 { return Err(Error::NegativeOrigin {axis, from}); }
            if to > extent as isize { return Err(Error::EndOutOfBounds {axis, to, extent}); }
            if from > to { return Err(Error::InvertedBounds {axis, from, to}); }
            extents.push((to - from) as usize);
        }
        Ok((Coord::from(from), Shape(extents)))
    }

    /// Iterate over all `Coord`s of this `Shape` in `order`.
    ///
    /// ```
    /// use ndtuple::{Shape, Order, Coord};
    /// let cs: Vec<Coord> = Shape::from([2, 2]).coords(Order::ColumnMajor).collect();
    /// assert_eq!(cs, [[0, 0], [1, 0], [0, 1], [1, 1]].map(Coord::from));
    /// ```
    pub fn coords(&self, order: Order) -> Coords { Coords::new(self.clone(), order) }

    /// The `index`th `Coord` visited by [`Self::coords()`].
    pub fn coord_at(&self, order: Order, index: usize) -> Coord { order.from_offset(self, index) }
}

/// The product of `extents`, or `None` if it overflows. Zero if any extent is
/// zero, whatever the others are.
fn checked_size(extents: &[usize]) -> Option<usize> {
    if extents.contains(&0) { return Some(0); }
    extents.iter().try_fold(1usize, |size, &extent| size.checked_mul(extent))
}

impl Deref for Shape {
    type Target = [usize];
    fn deref(&self) -> &[usize] { &self.0 }
}

impl AsRef<[usize]> for Shape {
    fn as_ref(&self) -> &[usize] { &self.0 }
}

/// The conversions from unsigned extents panic if the total size does not fit
/// in a `usize`. Use [`Shape::new()`] to get an [`Error`] instead.
impl<const N: usize> From<[usize; N]> for Shape {
    fn from(s: [usize; N]) -> Self { Shape::from_extents(s.into_iter().collect()) }
}

impl From<&[usize]> for Shape {
    fn from(s: &[usize]) -> Self { Shape::from_extents(s.iter().copied().collect()) }
}

impl From<Vec<usize>> for Shape {
    fn from(s: Vec<usize>) -> Self { Shape::from_extents(s.into()) }
}

impl From<&Shape> for Shape {
    fn from(s: &Shape) -> Self { s.clone() }
}

impl Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { Debug::fmt(&*self.0, f) }
}

impl Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { Debug::fmt(&*self.0, f) }
}

// ----------------------------------------------------------------------------
