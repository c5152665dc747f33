//! Iteration over every [`Coord`] of a [`Shape`].

use std::iter::{FusedIterator};

use rayon::prelude::*;

use super::{Coord, Shape, Order};

/// The return type of [`Shape::coords()`].
///
/// Each call to `next()` returns a fresh `Coord`, so callers may keep them.
/// `Coords` is `Clone`; a clone restarts from wherever the original was.
#[derive(Debug, Clone)]
pub struct Coords {
    shape: Shape,
    order: Order,
    /// The next `Coord` to return, unless `remaining == 0`.
    next: Coord,
    remaining: usize,
}

impl Coords {
    pub(crate) fn new(shape: Shape, order: Order) -> Self {
        let remaining = shape.total_size();
        let next = Coord::zeros(shape.ndim());
        Self {shape, order, next, remaining}
    }

    /// The `Shape` being iterated over.
    pub fn shape(&self) -> &Shape { &self.shape }

    /// The order in which `Coord`s are visited.
    pub fn order(&self) -> Order { self.order }

    /// Advance `self.next` like an odometer.
    fn step(&mut self) {
        let next = self.next.axes_mut();
        for axis in self.order.axes_fastest_first(self.shape.ndim()) {
            next[axis] += 1;
            if (next[axis] as usize) < self.shape[axis] { break; }
            next[axis] = 0;
        }
    }
}

impl Iterator for Coords {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.remaining == 0 { return None; }
        let ret = self.next.clone();
        self.remaining -= 1;
        if self.remaining > 0 { self.step(); }
        Some(ret)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl ExactSizeIterator for Coords {}

impl FusedIterator for Coords {}

// ----------------------------------------------------------------------------

impl Shape {
    /// Visit every `Coord` of this `Shape` on the rayon thread pool.
    ///
    /// Each `Coord` is produced exactly once, by exactly one worker. The
    /// [`IndexedParallelIterator`] is ordered as [`Self::coords()`] would be,
    /// so `collect()` returns the same sequence.
    ///
    /// ```
    /// use rayon::prelude::*;
    /// use ndtuple::{Shape, Order, Coord};
    /// let s = Shape::from([3, 2]);
    /// let cs: Vec<Coord> = s.par_coords(Order::RowMajor).collect();
    /// assert_eq!(cs, s.coords(Order::RowMajor).collect::<Vec<_>>());
    /// ```
    pub fn par_coords(&self, order: Order) -> impl IndexedParallelIterator<Item=Coord> + '_ {
        (0..self.total_size()).into_par_iter().map(move |i| self.coord_at(order, i))
    }
}

// ----------------------------------------------------------------------------
