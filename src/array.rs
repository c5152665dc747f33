use std::fmt::{self, Debug};

use super::{Error, Result, Coord, Shape, Order, Element, View, ViewMut};

/// The array that a sub-array view borrows its elements from.
type Parent<'a, T> = &'a mut (dyn ViewMut<T=T> + Send + Sync + 'a);

/// Where the elements of an [`Array`] live.
enum Storage<'a, T: Element> {
    /// Dense, laid out by the `Array`'s `Order`.
    Owned(Box<[T]>),

    /// Like `Owned`, but borrowed from the caller.
    Wrapped(&'a mut [T]),

    /// A borrowed two-dimensional array of rows, all of the same length.
    Rows(&'a mut [Vec<T>]),

    /// A rectangular region of `parent` whose origin is `offset`.
    Sub {parent: Parent<'a, T>, offset: Coord},
}

/// A rectangular array of `T`s.
///
/// An `Array` either owns its elements (`Array<'static, T>`), or aliases
/// memory that it borrows for `'a`: a caller's buffer (see [`Self::wrap()`]
/// and [`Self::wrap_rows()`]) or a region of another array (see
/// [`ViewMut::sub_array()`]). The borrow checker ensures that no `Array`
/// outlives the memory it aliases.
///
/// ```
/// use ndtuple::{Array, Order, View, ViewMut};
/// let mut a = Array::<f64>::with_order([2, 3], Order::ColumnMajor);
/// a.set(&[1, 2], 0.5).unwrap();
/// assert_eq!(a.get(&[1, 2]), Ok(0.5));
/// assert_eq!(a.len(), 6);
/// ```
pub struct Array<'a, T: Element> {
    shape: Shape,
    order: Order,
    storage: Storage<'a, T>,
}

/// The storage offset of `coord`, which must be within `shape`.
fn offset(shape: &Shape, order: Order, coord: &[isize]) -> usize {
    debug_assert!(shape.contains(coord), "Coordinate {:?} is out of bounds for shape {}", coord, shape);
    order.to_offset(coord, shape) as usize
}

/// The row and column of `coord`, which must be within `shape`.
fn row_col(shape: &Shape, coord: &[isize]) -> (usize, usize) {
    debug_assert!(shape.contains(coord), "Coordinate {:?} is out of bounds for shape {}", coord, shape);
    (coord[0] as usize, coord[1] as usize)
}

impl<T: Element> Array<'static, T> {
    /// Constructs an `Array` of size `shape` filled with zeros, laid out in
    /// `Order::RowMajor`.
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self::with_order(shape, Order::RowMajor)
    }

    /// Constructs an `Array` of size `shape` filled with zeros, laid out in
    /// `order`.
    pub fn with_order(shape: impl Into<Shape>, order: Order) -> Self {
        Self::filled(shape, order, T::zero())
    }

    /// Constructs an `Array` of size `shape` with every element equal to
    /// `value`.
    pub fn filled(shape: impl Into<Shape>, order: Order, value: T) -> Self {
        let shape = shape.into();
        let items = vec![value; shape.total_size()];
        Self {shape, order, storage: Storage::Owned(items.into())}
    }

    /// Constructs an `Array` of size `shape` from a function. `f` is called
    /// once for each `Coord`, in `order`.
    ///
    /// ```
    /// use ndtuple::{Array, Order, View};
    /// let a = Array::from_fn([2, 2], Order::RowMajor, |c| (c[0] - c[1]) as i32);
    /// assert_eq!(a.to_vec(), [0, -1, 1, 0]);
    /// ```
    pub fn from_fn(shape: impl Into<Shape>, order: Order, mut f: impl FnMut(&Coord) -> T) -> Self {
        let shape = shape.into();
        // Visiting `Coord`s in `order` visits storage offsets in sequence.
        let items: Vec<T> = shape.coords(order).map(|c| f(&c)).collect();
        Self {shape, order, storage: Storage::Owned(items.into())}
    }

    /// Constructs an `Array` of size `shape` given its elements, laid out in
    /// `order`.
    ///
    /// Fails with [`Error::BufferLength`] if the number of elements is not
    /// the total size of `shape`.
    pub fn from_vec(shape: impl Into<Shape>, order: Order, items: Vec<T>) -> Result<Self> {
        let shape = shape.into();
        check_length(&shape, items.len())?;
        Ok(Self {shape, order, storage: Storage::Owned(items.into())})
    }
}

impl<'a, T: Element> Array<'a, T> {
    /// Constructs an `Array` of size `shape` that aliases `items`, which are
    /// laid out in `order`. Nothing is copied; writes to the `Array` are
    /// writes to `items`.
    ///
    /// Fails with [`Error::BufferLength`] if `items.len()` is not the total
    /// size of `shape`.
    ///
    /// ```
    /// use ndtuple::{Array, Order, ViewMut, ErrorKind};
    /// let mut buffer = [1, 2, 3, 4, 5, 6];
    /// let mut a = Array::wrap([3, 2], Order::RowMajor, &mut buffer).unwrap();
    /// a.set(&[2, 0], 50).unwrap();
    /// assert_eq!(buffer, [1, 2, 3, 4, 50, 6]);
    ///
    /// let e = Array::wrap([4, 2], Order::RowMajor, &mut buffer).unwrap_err();
    /// assert_eq!(e.kind(), ErrorKind::InvalidArgument);
    /// ```
    pub fn wrap(shape: impl Into<Shape>, order: Order, items: &'a mut [T]) -> Result<Self> {
        let shape = shape.into();
        check_length(&shape, items.len())?;
        Ok(Self {shape, order, storage: Storage::Wrapped(items)})
    }

    /// Constructs a two-dimensional `Array` that aliases `rows`. The first
    /// axis selects a row and the second selects an element of that row.
    ///
    /// Fails with [`Error::RaggedRows`] unless all rows have the same length.
    pub fn wrap_rows(rows: &'a mut [Vec<T>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(Error::RaggedRows {row, expected: width, got: r.len()});
        }
        let shape = Shape::from([rows.len(), width]);
        Ok(Self {shape, order: Order::RowMajor, storage: Storage::Rows(rows)})
    }

    /// Constructs a view of size `shape` of `parent`, with origin `offset`.
    ///
    /// The caller must already have checked that the view fits in `parent`.
    pub(crate) fn sub(parent: Parent<'a, T>, offset: Coord, shape: Shape) -> Self {
        debug_assert_eq!(parent.shape().ndim(), offset.ndim());
        let order = parent.order();
        Self {shape, order, storage: Storage::Sub {parent, offset}}
    }

    /// Returns the elements as a contiguous slice, if they are stored that
    /// way, i.e. if `self` is not a view of rows or of another array.
    pub fn as_slice(&self) -> Option<&[T]> {
        match &self.storage {
            Storage::Owned(items) => Some(items),
            Storage::Wrapped(items) => Some(items),
            _ => None,
        }
    }

    /// Returns `true` if `self` borrows its elements from another `Array`.
    pub fn is_sub_array(&self) -> bool { matches!(self.storage, Storage::Sub {..}) }

    /// Returns the elements, in `self.order()`.
    ///
    /// This is free for an `Array` that owns its elements, and copies them
    /// otherwise.
    pub fn into_vec(self) -> Vec<T> {
        match self.storage {
            Storage::Owned(items) => items.into_vec(),
            _ => self.to_vec(),
        }
    }

    fn storage_name(&self) -> &'static str {
        match self.storage {
            Storage::Owned(_) => "owned",
            Storage::Wrapped(_) => "wrapped",
            Storage::Rows(_) => "rows",
            Storage::Sub {..} => "sub-array",
        }
    }
}

fn check_length(shape: &Shape, got: usize) -> Result<()> {
    let expected = shape.total_size();
    if got != expected {
        return Err(Error::BufferLength {shape: shape.clone(), expected, got});
    }
    Ok(())
}

impl<'a, T: Element> View for Array<'a, T> {
    type T = T;

    #[inline(always)]
    fn shape(&self) -> &Shape { &self.shape }

    #[inline(always)]
    fn order(&self) -> Order { self.order }

    fn at(&self, coord: &[isize]) -> T {
        match &self.storage {
            Storage::Owned(items) => items[offset(&self.shape, self.order, coord)],
            Storage::Wrapped(items) => items[offset(&self.shape, self.order, coord)],
            Storage::Rows(rows) => {
                let (row, col) = row_col(&self.shape, coord);
                rows[row][col]
            },
            Storage::Sub {parent, offset} => parent.at(&offset.offset_by(coord)),
        }
    }
}

impl<'a, T: Element> ViewMut for Array<'a, T> {
    fn at_mut(&mut self, coord: &[isize]) -> &mut T {
        match &mut self.storage {
            Storage::Owned(items) => &mut items[offset(&self.shape, self.order, coord)],
            Storage::Wrapped(items) => &mut items[offset(&self.shape, self.order, coord)],
            Storage::Rows(rows) => {
                let (row, col) = row_col(&self.shape, coord);
                &mut rows[row][col]
            },
            Storage::Sub {parent, offset} => parent.at_mut(&offset.offset_by(coord)),
        }
    }

    fn as_mut_slice(&mut self) -> Option<&mut [T]> {
        match &mut self.storage {
            Storage::Owned(items) => Some(items),
            Storage::Wrapped(items) => Some(items),
            _ => None,
        }
    }
}

/// A one-dimensional `Array`.
impl<T: Element> From<Vec<T>> for Array<'static, T> {
    fn from(items: Vec<T>) -> Self {
        let shape = Shape::from([items.len()]);
        Self {shape, order: Order::RowMajor, storage: Storage::Owned(items.into())}
    }
}

/// `Array`s are equal if they have the same `Shape` and the same element at
/// every `Coord`, however they are stored.
impl<'a, 'b, T: Element> PartialEq<Array<'b, T>> for Array<'a, T> {
    fn eq(&self, other: &Array<'b, T>) -> bool {
        self.shape == other.shape && self.coords().all(|c| self.at(&c) == other.at(&c))
    }
}

impl<'a, T: Element> Debug for Array<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("shape", &self.shape)
            .field("order", &self.order)
            .field("storage", &self.storage_name())
            .field("items", &self.to_vec())
            .finish()
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind};

    const ORDERS: [Order; 2] = [Order::RowMajor, Order::ColumnMajor];

    #[test]
    fn zeros() {
        let a = Array::<i32>::new([2, 3]);
        assert_eq!(a.shape(), &Shape::from([2, 3]));
        assert_eq!(a.len(), 6);
        assert_eq!(a.order(), Order::RowMajor);
        assert_eq!(a.as_slice(), Some(&[0; 6][..]));
        let e = Array::<f64>::new([0, 3]);
        assert!(e.is_empty());
        assert!(e.to_vec().is_empty());
    }

    #[test]
    fn layout() {
        let a = Array::from_fn([2, 3], Order::RowMajor, |c| 10 * c[0] as i64 + c[1] as i64);
        assert_eq!(a.as_slice().unwrap(), [0, 1, 2, 10, 11, 12]);
        let b = Array::from_fn([2, 3], Order::ColumnMajor, |c| 10 * c[0] as i64 + c[1] as i64);
        assert_eq!(b.as_slice().unwrap(), [0, 10, 1, 11, 2, 12]);
        assert_eq!(a, b);
    }

    #[test]
    fn round_trip() {
        for order in ORDERS {
            let mut a = Array::<i64>::with_order([3, 4, 2], order);
            let cs: Vec<Coord> = a.coords().collect();
            for (i, c) in cs.iter().enumerate() {
                a.set(c, i as i64 * 7).unwrap();
            }
            for (i, c) in cs.iter().enumerate() {
                assert_eq!(a.get(c), Ok(i as i64 * 7));
            }
        }
    }

    #[test]
    fn access_errors() {
        let mut a = Array::<f64>::new([2, 2]);
        assert_eq!(a.get(&[0]), Err(Error::DimensionMismatch {expected: 2, got: 1}));
        assert_eq!(a.get(&[0, 2]), Err(Error::OutOfRange {axis: 1, index: 2, extent: 2}));
        assert_eq!(a.set(&[-1, 0], 1.0).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(a.set(&[0, 0, 0], 1.0).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(a.to_vec(), [0.0; 4]);
    }

    #[test]
    #[should_panic]
    fn unchecked_out_of_bounds() {
        let a = Array::<i32>::new([2, 2]);
        a.at(&[5, 5]);
    }

    #[test]
    fn from_vec() {
        let a = Array::from_vec([2, 2], Order::ColumnMajor, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(a.get(&[0, 1]), Ok(3));
        assert_eq!(a.into_vec(), [1, 2, 3, 4]);
        assert_eq!(
            Array::from_vec([2, 2], Order::RowMajor, vec![1, 2, 3]).unwrap_err(),
            Error::BufferLength {shape: Shape::from([2, 2]), expected: 4, got: 3},
        );
        let t = Array::from(vec![1.5, 2.5]);
        assert_eq!(t.shape(), &Shape::from([2]));
        assert_eq!(t.get(&[1]), Ok(2.5));
    }

    #[test]
    fn wrap() {
        let mut buffer = vec![0i32; 6];
        {
            let mut a = Array::wrap([2, 3], Order::ColumnMajor, &mut buffer).unwrap();
            a.set(&[1, 0], 4).unwrap();
            a.set(&[0, 2], 5).unwrap();
            assert!(a.as_slice().is_some());
        }
        assert_eq!(buffer, [0, 4, 0, 0, 5, 0]);
        let e = Array::wrap([2, 2], Order::RowMajor, &mut buffer).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn wrap_rows() {
        let mut rows = vec![vec![1, 2, 3], vec![4, 5, 6]];
        {
            let mut a = Array::wrap_rows(&mut rows).unwrap();
            assert_eq!(a.shape(), &Shape::from([2, 3]));
            assert_eq!(a.get(&[1, 0]), Ok(4));
            a.set(&[0, 2], 30).unwrap();
            assert_eq!(a.as_slice(), None);
            assert_eq!(a.to_vec(), [1, 2, 30, 4, 5, 6]);
        }
        assert_eq!(rows[0], [1, 2, 30]);

        let mut ragged = vec![vec![1.0, 2.0], vec![3.0]];
        assert_eq!(
            Array::wrap_rows(&mut ragged).unwrap_err(),
            Error::RaggedRows {row: 1, expected: 2, got: 1},
        );
        let mut none: Vec<Vec<i64>> = Vec::new();
        assert!(Array::wrap_rows(&mut none).unwrap().is_empty());
    }

    #[test]
    fn write_through() {
        let mut a = Array::<i32>::new([4, 4]);
        {
            let mut v = a.sub_array(&[1, 1], &[3, 3]).unwrap();
            assert!(v.is_sub_array());
            assert_eq!(v.shape(), &Shape::from([2, 2]));
            v.set(&[0, 0], 11).unwrap();
            assert_eq!(v.get(&[0, 0]), Ok(11));
        }
        assert_eq!(a.get(&[1, 1]), Ok(11));
        a.set(&[2, 2], 22).unwrap();
        let v = a.sub_array(&[1, 1], &[3, 3]).unwrap();
        assert_eq!(v.get(&[1, 1]), Ok(22));
        assert_eq!(v.get(&[2, 0]).unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn nested_write_through() {
        let mut a = Array::<i64>::new([4, 4]);
        {
            let mut v = a.sub_array(&[1, 1], &[4, 4]).unwrap();
            {
                let mut w = v.sub_array(&[1, 0], &[3, 2]).unwrap();
                w.set(&[0, 1], 9).unwrap();
                assert_eq!(w.get(&[0, 1]), Ok(9));
                // Bounds are checked against the immediate parent.
                assert_eq!(
                    w.sub_array(&[0, 0], &[3, 1]).unwrap_err(),
                    Error::EndOutOfBounds {axis: 0, to: 3, extent: 2},
                );
                let mut x = w.sub_array(&[1, 1], &[2, 2]).unwrap();
                x.set(&[0, 0], -3).unwrap();
            }
            assert_eq!(v.get(&[1, 1]), Ok(9));
            assert_eq!(v.get(&[2, 1]), Ok(-3));
        }
        assert_eq!(a.get(&[2, 2]), Ok(9));
        assert_eq!(a.get(&[3, 2]), Ok(-3));
        assert_eq!(a.to_vec().iter().filter(|&&x| x != 0).count(), 2);
    }

    #[test]
    fn nested_matches_flattened() {
        let mut a = Array::from_fn([5, 6], Order::ColumnMajor, |c| (c[0] * 100 + c[1]) as i32);
        let expected = a.to_array();
        let mut v = a.sub_array(&[1, 2], &[5, 6]).unwrap();
        let w = v.sub_array(&[2, 1], &[4, 3]).unwrap();
        assert_eq!(w.order(), Order::ColumnMajor);
        for c in w.coords() {
            let flat = c.offset_by(&[3, 3]);
            assert_eq!(w.get(&c), expected.get(&flat));
        }
    }

    #[test]
    fn sub_array_errors() {
        let mut a = Array::<f64>::new([4, 4]);
        fn kind(r: Result<Array<'_, f64>>) -> ErrorKind { r.unwrap_err().kind() }
        assert_eq!(kind(a.sub_array(&[-1, 0], &[2, 2])), ErrorKind::InvalidArgument);
        assert_eq!(kind(a.sub_array(&[0, 0], &[5, 2])), ErrorKind::InvalidArgument);
        assert_eq!(kind(a.sub_array(&[3, 0], &[2, 2])), ErrorKind::InvalidArgument);
        assert_eq!(kind(a.sub_array(&[0, 0, 0], &[2, 2, 2])), ErrorKind::InvalidArgument);
        assert!(a.sub_array(&[2, 2], &[2, 2]).unwrap().is_empty());
    }

    #[test]
    fn sub_array_of_rows() {
        let mut rows = vec![vec![0.0; 3]; 3];
        let mut a = Array::wrap_rows(&mut rows).unwrap();
        let mut v = a.sub_array(&[1, 1], &[3, 3]).unwrap();
        v.set(&[1, 0], 2.5).unwrap();
        drop(v);
        drop(a);
        assert_eq!(rows[2][1], 2.5);
    }

    #[test]
    fn equality() {
        let owned = Array::from_vec([2, 2], Order::RowMajor, vec![1, 2, 3, 4]).unwrap();
        let mut buffer = [1, 3, 2, 4];
        let wrapped = Array::wrap([2, 2], Order::ColumnMajor, &mut buffer).unwrap();
        assert_eq!(owned, wrapped);
        assert_ne!(owned, Array::new([2, 2]));
        assert_ne!(owned, Array::from(vec![1, 2, 3, 4]));
    }

    #[test]
    fn debug() {
        let a = Array::from(vec![1, 2]);
        assert_eq!(
            format!("{:?}", a),
            "Array { shape: [2], order: RowMajor, storage: \"owned\", items: [1, 2] }",
        );
    }
}
