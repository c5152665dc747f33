//! A pure-Rust library of rectangular multi-dimensional arrays of primitive
//! numbers, with aliased sub-array views and parallel bulk operations.
//!
//! [`Array<'a, T>`] represents an array of `T` addressed by [`Coord`]inates.
//! Its size is a [`Shape`], which is fixed when the `Array` is constructed.
//! `T` can be any [`Element`], which includes `i32`, `i64` and `f64`; there
//! is one generic implementation for all of them.
//!
//! An `Array` either owns its elements in a dense 1-dimensional buffer, or
//! borrows them: from a caller's buffer ([`Array::wrap()`]), from a caller's
//! rows ([`Array::wrap_rows()`]), or from a rectangular region of another
//! array ([`ViewMut::sub_array()`]). Sub-arrays of sub-arrays are fine, to any
//! depth. Writes through any of these are immediately visible through all the
//! others, and the borrow checker ensures that no `Array` outlives the memory
//! it aliases.
//!
//! Trait [`View`] is the read-only interface to an `Array`, and [`ViewMut`] is
//! the read-write interface. You are encouraged to implement `View` for your
//! own types; the bulk operations in [`bulk`] accept any `View`.
//!
//! An [`Order`] chooses which axis varies fastest. `Order::RowMajor` means the
//! last axis, and `Order::ColumnMajor` the first. Each `Array` has an `Order`,
//! which determines both its memory layout and the order in which
//! [`View::coords()`] visits its elements.
//!
//! ```
//! use ndtuple::{Array, View, ViewMut, bulk};
//! let mut a = Array::<i64>::new([4, 4]);
//! {
//!     let mut v = a.sub_array(&[1, 1], &[3, 3]).unwrap();
//!     bulk::fill(&mut v, || 5);
//!     let mut w = v.sub_array(&[1, 1], &[2, 2]).unwrap();
//!     w.set(&[0, 0], 7).unwrap();
//! }
//! assert_eq!(a.get(&[2, 2]), Ok(7));
//! assert_eq!(bulk::sum(&a), 22);
//! ```

mod error;
pub use error::{Error, ErrorKind, Result};

mod coord;
pub use coord::{Coord, Shape};

mod index;
pub use index::{Order};

mod iter;
pub use iter::{Coords};

pub mod ops;
pub use ops::{Element, Binary, Reduce};

mod view;
pub use view::{View, ViewMut};

mod array;
pub use array::{Array};

pub mod bulk;
pub use bulk::{Bulk, PARALLEL_THRESHOLD};
