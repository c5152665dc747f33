use super::{Result, Shape, Order, Coords, Element, Array};

/// Implemented by types that behave like a rectangular array of
/// [`Self::T`]s, addressed by [`Coord`]inates.
///
/// A `View` has a fixed [`Shape`] and a preferred [`Order`], which is the
/// order in which [`Self::coords()`] visits its elements. Elements are read by
/// value.
///
/// ### Bounds checking
///
/// [`Self::get()`] always checks its argument and reports an [`Error`].
/// [`Self::at()`] is the unchecked accessor that implementations provide;
/// invalid coordinates are caught only by `debug_assert!`s and by the bounds
/// checks of whatever memory backs the `View`, which panic.
///
/// ### Implementing `View`
///
/// ```
/// use ndtuple::{Shape, View};
///
/// /// The multiplication table of `0..n`.
/// struct Times(Shape);
///
/// impl View for Times {
///     type T = i64;
///     fn shape(&self) -> &Shape { &self.0 }
///     fn at(&self, c: &[isize]) -> i64 { (c[0] * c[1]) as i64 }
/// }
///
/// let t = Times(Shape::from([4, 4]));
/// assert_eq!(t.get(&[3, 2]), Ok(6));
/// assert!(t.get(&[4, 2]).is_err());
/// ```
///
/// [`Coord`]: super::Coord
/// [`Error`]: super::Error
pub trait View {
    /// The element type.
    type T: Element;

    /// The size of the array. This never changes.
    fn shape(&self) -> &Shape;

    /// The order in which [`Self::coords()`] visits elements.
    fn order(&self) -> Order { Order::RowMajor }

    /// Returns the element at `coord`, which must be within [`Self::shape()`].
    fn at(&self, coord: &[isize]) -> Self::T;

    /// The number of elements.
    fn len(&self) -> usize { self.shape().total_size() }

    /// Returns `true` if there are no elements.
    fn is_empty(&self) -> bool { self.len() == 0 }

    /// Returns the element at `coord`.
    ///
    /// Fails with [`Error::DimensionMismatch`] if `coord` has the wrong number
    /// of components, and with [`Error::OutOfRange`] if any component is
    /// outside its axis.
    ///
    /// [`Error::DimensionMismatch`]: super::Error::DimensionMismatch
    /// [`Error::OutOfRange`]: super::Error::OutOfRange
    fn get(&self, coord: &[isize]) -> Result<Self::T> {
        self.shape().check(coord)?;
        Ok(self.at(coord))
    }

    /// Iterate over every `Coord` in [`Self::order()`].
    fn coords(&self) -> Coords { self.shape().coords(self.order()) }

    /// Apply `f` to every element in turn, in [`Self::order()`].
    fn each(&self, mut f: impl FnMut(Self::T)) where Self: Sized {
        for c in self.coords() { f(self.at(&c)); }
    }

    /// Returns every element, in [`Self::order()`].
    ///
    /// ```
    /// use ndtuple::{Array, Order, View};
    /// let a = Array::from_fn([2, 3], Order::ColumnMajor, |c| 10 * c[0] + c[1]);
    /// assert_eq!(a.to_vec(), [0, 10, 1, 11, 2, 12]);
    /// ```
    fn to_vec(&self) -> Vec<Self::T> where Self: Sized {
        self.coords().map(|c| self.at(&c)).collect()
    }

    /// Copies `self` into a new [`Array`] with the same `Shape` and `Order`.
    fn to_array(&self) -> Array<'static, Self::T> where Self: Sized {
        Array::from_fn(self.shape(), self.order(), |c| self.at(c))
    }
}

// ----------------------------------------------------------------------------

/// A [`View`] whose elements are stored in memory and can be modified.
///
/// `at_mut(coord)` must refer to the same element that `at(coord)` reads.
pub trait ViewMut: View {
    /// Returns the element at `coord`, which must be within [`View::shape()`].
    fn at_mut(&mut self, coord: &[isize]) -> &mut Self::T;

    /// Replaces the element at `coord`. The change is visible through every
    /// view of the same memory.
    ///
    /// Fails in the same cases as [`View::get()`].
    fn set(&mut self, coord: &[isize], value: Self::T) -> Result<()> {
        self.shape().check(coord)?;
        *self.at_mut(coord) = value;
        Ok(())
    }

    /// Returns the elements as a contiguous slice, if they are stored that
    /// way. The element at `coord` is then at offset
    /// `self.order().to_offset(coord, self.shape())`.
    fn as_mut_slice(&mut self) -> Option<&mut [Self::T]> { None }

    /// Constructs a view of the elements of `self` from `from` (inclusive) to
    /// `to` (exclusive) on every axis. The view aliases `self`: writes through
    /// either are visible through both.
    ///
    /// Fails with an [`ErrorKind::InvalidArgument`] error if `from` or `to`
    /// has the wrong number of components, or if some axis does not satisfy
    /// `0 <= from <= to <= extent`.
    ///
    /// ```
    /// use ndtuple::{Array, View, ViewMut};
    /// let mut a = Array::<i32>::new([4, 4]);
    /// let mut v = a.sub_array(&[1, 1], &[3, 3]).unwrap();
    /// v.set(&[0, 0], 7).unwrap();
    /// assert_eq!(v.shape().as_ref(), [2, 2]);
    /// assert_eq!(a.get(&[1, 1]), Ok(7));
    /// ```
    ///
    /// [`ErrorKind::InvalidArgument`]: super::ErrorKind::InvalidArgument
    fn sub_array(&mut self, from: &[isize], to: &[isize]) -> Result<Array<'_, Self::T>> where
        Self: Sized + Send + Sync,
    {
        let (offset, shape) = self.shape().sub_region(from, to)?;
        log::trace!("sub-array of {} at {:?} with shape {}", self.shape(), offset, shape);
        Ok(Array::sub(self, offset, shape))
    }
}
