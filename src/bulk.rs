//! Element-wise operations over every [`Coord`] of an array.
//!
//! The operations are methods of [`Bulk`], which decides whether to run them
//! on a rayon thread pool. Each is also available as a free function that uses
//! `Bulk::default()`.
//!
//! The functions passed to these operations may be called in any order, and
//! concurrently. They are called exactly once for each `Coord`.
//!
//! ### Aliasing
//!
//! Where an operation reads and writes the same array, e.g. `a = a + b`, use
//! the `_in_place` variant: [`Bulk::map_in_place()`], [`Bulk::zip_in_place()`].
//! Each element is read and then overwritten by the same call, so the result
//! does not depend on the order of the calls.

use std::sync::{Arc};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::{Error, Result, Coord, Element, View, ViewMut, Array};
use super::ops::{Reduce, Add, Min, Max};

/// The default value of [`Bulk::threshold()`].
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Runs element-wise operations, in parallel if they are large enough.
///
/// ```
/// use ndtuple::{Array, Bulk, View};
/// let a = Array::from(vec![3, 1, 4, 1, 5, 9, 2, 6]);
/// let bulk = Bulk::sequential();
/// assert_eq!(bulk.max(&a), 9);
/// let b = bulk.map_with(&a, |x| x * 2);
/// assert_eq!(b.to_vec(), [6, 2, 8, 2, 10, 18, 4, 12]);
/// ```
#[derive(Debug, Clone)]
pub struct Bulk {
    threshold: usize,
    pool: Option<Arc<ThreadPool>>,
}

impl Default for Bulk {
    /// Uses the global rayon thread pool for operations on at least
    /// [`PARALLEL_THRESHOLD`] elements.
    fn default() -> Self { Self {threshold: PARALLEL_THRESHOLD, pool: None} }
}

impl Bulk {
    /// A `Bulk` that never runs anything in parallel.
    pub fn sequential() -> Self { Self {threshold: usize::MAX, pool: None} }

    /// A `Bulk` that runs operations on its own pool of `threads` workers.
    ///
    /// Fails with [`Error::ThreadPool`] if the workers cannot be started.
    pub fn with_threads(threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
        log::debug!("built a pool of {} workers", pool.current_num_threads());
        Ok(Self {threshold: PARALLEL_THRESHOLD, pool: Some(Arc::new(pool))})
    }

    /// Sets the smallest number of elements that is worth processing in
    /// parallel.
    pub fn threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// The number of workers that parallel operations are shared between.
    pub fn workers(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Decides whether an operation on `len` elements should run in parallel.
    fn is_parallel(&self, len: usize) -> bool {
        let parallel = len >= self.threshold && self.workers() > 1;
        log::debug!(
            "{} elements: {}",
            len,
            if parallel { "parallel" } else { "sequential" },
        );
        parallel
    }

    /// Run `op` on `self`'s thread pool.
    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Replace every element `t` of `out` with `f(coord, t)`.
    fn update<V, F>(&self, out: &mut V, f: F) where
        V: ViewMut + Sync,
        F: Fn(&Coord, V::T) -> V::T + Sync + Send,
    {
        let shape = out.shape().clone();
        let order = out.order();
        let parallel = self.is_parallel(shape.total_size());
        if let Some(items) = out.as_mut_slice() {
            // Offset `i` of `items` holds the `i`th `Coord` in `order`.
            if parallel {
                self.install(|| items.par_iter_mut().enumerate().for_each(|(i, t)| {
                    *t = f(&shape.coord_at(order, i), *t);
                }));
            } else {
                for (c, t) in shape.coords(order).zip(items.iter_mut()) {
                    *t = f(&c, *t);
                }
            }
        } else if parallel {
            // Compute in parallel, then scatter.
            let view: &V = out;
            let values: Vec<V::T> = self.install(|| {
                shape.par_coords(order).map(|c| f(&c, view.at(&c))).collect()
            });
            for (c, value) in shape.coords(order).zip(values) {
                *out.at_mut(&c) = value;
            }
        } else {
            for c in shape.coords(order) {
                let t = out.at_mut(&c);
                *t = f(&c, *t);
            }
        }
    }

    /// Sets every element of `out` to a value returned by `supplier`.
    pub fn fill<V: ViewMut + Sync>(&self, out: &mut V, supplier: impl Fn() -> V::T + Sync + Send) {
        self.update(out, |_, _| supplier());
    }

    /// Sets every element of `out` to `f(coord)`.
    pub fn fill_with<V: ViewMut + Sync>(&self, out: &mut V, f: impl Fn(&Coord) -> V::T + Sync + Send) {
        self.update(out, |c, _| f(c));
    }

    /// Returns a new [`Array`] with the `Shape` and `Order` of `a0` whose
    /// elements are `op(a0[c])`.
    pub fn map_with<A, T>(&self, a0: &A, op: impl Fn(A::T) -> T + Sync + Send) -> Array<'static, T> where
        A: View + Sync,
        T: Element,
    {
        let mut out = Array::with_order(a0.shape(), a0.order());
        self.update(&mut out, |c, _| op(a0.at(c)));
        out
    }

    /// Sets each element `out[c]` to `op(a0[c])`.
    ///
    /// Fails with [`Error::ShapeMismatch`] if `out` and `a0` have different
    /// `Shape`s.
    pub fn map_with_into<A, V>(&self, a0: &A, op: impl Fn(A::T) -> V::T + Sync + Send, out: &mut V) -> Result<()> where
        A: View + Sync,
        V: ViewMut + Sync,
    {
        Error::check_shapes(a0.shape(), out.shape())?;
        self.update(out, |c, _| op(a0.at(c)));
        Ok(())
    }

    /// Replaces each element `t` of `out` with `op(t)`.
    pub fn map_in_place<V: ViewMut + Sync>(&self, out: &mut V, op: impl Fn(V::T) -> V::T + Sync + Send) {
        self.update(out, |_, t| op(t));
    }

    /// Returns a new [`Array`] with the `Shape` and `Order` of `a0` whose
    /// elements are `op(a0[c], a1[c])`.
    ///
    /// Fails with [`Error::ShapeMismatch`] if `a0` and `a1` have different
    /// `Shape`s.
    ///
    /// ```
    /// use ndtuple::{Array, Order, View, bulk};
    /// let a = Array::from_vec([2, 2], Order::RowMajor, vec![1, 2, 3, 4]).unwrap();
    /// let b = Array::from_vec([2, 2], Order::ColumnMajor, vec![10, 20, 30, 40]).unwrap();
    /// let c = bulk::zip_with(&a, &b, |x, y| x + y).unwrap();
    /// assert_eq!(c.to_vec(), [11, 32, 23, 44]);
    /// assert!(bulk::zip_with(&a, &Array::<i32>::new([4]), |x, y| x + y).is_err());
    /// ```
    pub fn zip_with<A0, A1, T>(&self, a0: &A0, a1: &A1, op: impl Fn(A0::T, A1::T) -> T + Sync + Send) -> Result<Array<'static, T>> where
        A0: View + Sync,
        A1: View + Sync,
        T: Element,
    {
        Error::check_shapes(a0.shape(), a1.shape())?;
        let mut out = Array::with_order(a0.shape(), a0.order());
        self.update(&mut out, |c, _| op(a0.at(c), a1.at(c)));
        Ok(out)
    }

    /// Sets each element `out[c]` to `op(a0[c], a1[c])`.
    ///
    /// Fails with [`Error::ShapeMismatch`] unless `a0`, `a1` and `out` all
    /// have the same `Shape`.
    pub fn zip_with_into<A0, A1, V>(
        &self,
        a0: &A0,
        a1: &A1,
        op: impl Fn(A0::T, A1::T) -> V::T + Sync + Send,
        out: &mut V,
    ) -> Result<()> where
        A0: View + Sync,
        A1: View + Sync,
        V: ViewMut + Sync,
    {
        Error::check_shapes(a0.shape(), a1.shape())?;
        Error::check_shapes(a0.shape(), out.shape())?;
        self.update(out, |c, _| op(a0.at(c), a1.at(c)));
        Ok(())
    }

    /// Replaces each element `out[c]` with `op(out[c], a1[c])`.
    ///
    /// Fails with [`Error::ShapeMismatch`] if `out` and `a1` have different
    /// `Shape`s.
    pub fn zip_in_place<A1, V>(&self, out: &mut V, a1: &A1, op: impl Fn(V::T, A1::T) -> V::T + Sync + Send) -> Result<()> where
        A1: View + Sync,
        V: ViewMut + Sync,
    {
        Error::check_shapes(out.shape(), a1.shape())?;
        self.update(out, |c, t| op(t, a1.at(c)));
        Ok(())
    }

    /// Copies every element of `src` into `out`.
    ///
    /// Fails with [`Error::ShapeMismatch`] if they have different `Shape`s.
    pub fn copy_into<A, V>(&self, src: &A, out: &mut V) -> Result<()> where
        A: View<T=V::T> + Sync,
        V: ViewMut + Sync,
    {
        self.map_with_into(src, |t| t, out)
    }

    /// Folds every element of `a` using `R`, starting from `R::identity()`.
    ///
    /// The elements are combined in an unspecified grouping.
    pub fn reduce<R: Reduce<A::T>, A: View + Sync>(&self, a: &A) -> A::T {
        let shape = a.shape();
        let order = a.order();
        if self.is_parallel(shape.total_size()) {
            self.install(|| {
                shape.par_coords(order).map(|c| a.at(&c)).reduce(R::identity, R::call)
            })
        } else {
            shape.coords(order).fold(R::identity(), |acc, c| R::call(acc, a.at(&c)))
        }
    }

    /// The smallest element of `a`, or the largest value of `A::T` if `a` is
    /// empty.
    pub fn min<A: View + Sync>(&self, a: &A) -> A::T { self.reduce::<Min, A>(a) }

    /// The largest element of `a`, or the smallest value of `A::T` if `a` is
    /// empty.
    pub fn max<A: View + Sync>(&self, a: &A) -> A::T { self.reduce::<Max, A>(a) }

    /// The sum of the elements of `a`, or zero if `a` is empty.
    pub fn sum<A: View + Sync>(&self, a: &A) -> A::T { self.reduce::<Add, A>(a) }
}

// ----------------------------------------------------------------------------

/// Calls [`Bulk::fill()`] on `Bulk::default()`.
pub fn fill<V: ViewMut + Sync>(out: &mut V, supplier: impl Fn() -> V::T + Sync + Send) {
    Bulk::default().fill(out, supplier)
}

/// Calls [`Bulk::fill_with()`] on `Bulk::default()`.
pub fn fill_with<V: ViewMut + Sync>(out: &mut V, f: impl Fn(&Coord) -> V::T + Sync + Send) {
    Bulk::default().fill_with(out, f)
}

/// Calls [`Bulk::map_with()`] on `Bulk::default()`.
pub fn map_with<A, T>(a0: &A, op: impl Fn(A::T) -> T + Sync + Send) -> Array<'static, T> where
    A: View + Sync,
    T: Element,
{
    Bulk::default().map_with(a0, op)
}

/// Calls [`Bulk::map_with_into()`] on `Bulk::default()`.
pub fn map_with_into<A, V>(a0: &A, op: impl Fn(A::T) -> V::T + Sync + Send, out: &mut V) -> Result<()> where
    A: View + Sync,
    V: ViewMut + Sync,
{
    Bulk::default().map_with_into(a0, op, out)
}

/// Calls [`Bulk::map_in_place()`] on `Bulk::default()`.
pub fn map_in_place<V: ViewMut + Sync>(out: &mut V, op: impl Fn(V::T) -> V::T + Sync + Send) {
    Bulk::default().map_in_place(out, op)
}

/// Calls [`Bulk::zip_with()`] on `Bulk::default()`.
pub fn zip_with<A0, A1, T>(a0: &A0, a1: &A1, op: impl Fn(A0::T, A1::T) -> T + Sync + Send) -> Result<Array<'static, T>> where
    A0: View + Sync,
    A1: View + Sync,
    T: Element,
{
    Bulk::default().zip_with(a0, a1, op)
}

/// Calls [`Bulk::zip_with_into()`] on `Bulk::default()`.
pub fn zip_with_into<A0, A1, V>(
    a0: &A0,
    a1: &A1,
    op: impl Fn(A0::T, A1::T) -> V::T + Sync + Send,
    out: &mut V,
) -> Result<()> where
    A0: View + Sync,
    A1: View + Sync,
    V: ViewMut + Sync,
{
    Bulk::default().zip_with_into(a0, a1, op, out)
}

/// Calls [`Bulk::zip_in_place()`] on `Bulk::default()`.
pub fn zip_in_place<A1, V>(out: &mut V, a1: &A1, op: impl Fn(V::T, A1::T) -> V::T + Sync + Send) -> Result<()> where
    A1: View + Sync,
    V: ViewMut + Sync,
{
    Bulk::default().zip_in_place(out, a1, op)
}

/// Calls [`Bulk::copy_into()`] on `Bulk::default()`.
pub fn copy_into<A, V>(src: &A, out: &mut V) -> Result<()> where
    A: View<T=V::T> + Sync,
    V: ViewMut + Sync,
{
    Bulk::default().copy_into(src, out)
}

/// Calls [`Bulk::min()`] on `Bulk::default()`.
pub fn min<A: View + Sync>(a: &A) -> A::T { Bulk::default().min(a) }

/// Calls [`Bulk::max()`] on `Bulk::default()`.
pub fn max<A: View + Sync>(a: &A) -> A::T { Bulk::default().max(a) }

/// Calls [`Bulk::sum()`] on `Bulk::default()`.
pub fn sum<A: View + Sync>(a: &A) -> A::T { Bulk::default().sum(a) }

// ----------------------------------------------------------------------------
