//! Element types, and generic programming over binary operators on them.
//!
//! For a few binary operators this module contains a type of the same name
//! that cannot be instantiated and that implements [`Binary`]. For example,
//! [`Add`] corresponds to [`std::ops::Add`]. This can be passed as a type
//! parameter to generic code, e.g. [`Bulk::reduce()`].
//!
//! [`Bulk::reduce()`]: super::Bulk::reduce()

use std::fmt::{Debug};

use num_traits::{Bounded, Zero};

/// Implemented by the primitive numbers that can be stored in an [`Array`].
///
/// This is implemented automatically for every type with the required
/// bounds, including `i32`, `i64` and `f64`.
///
/// [`Array`]: super::Array
pub trait Element: 'static + Copy + Debug + PartialOrd + Send + Sync + Bounded + Zero {}

impl<T> Element for T where T: 'static + Copy + Debug + PartialOrd + Send + Sync + Bounded + Zero {}

// ----------------------------------------------------------------------------

/// A function that combines `T` with `U`.
///
/// This trait has no methods that take `self`. It makes sense to implement it
/// for types that cannot be instantiated, such as empty enumerations.
pub trait Binary<T, U> {
    type Output;

    fn call(t: T, u: U) -> Self::Output;
}

/// A [`Binary`] operator with an identity, suitable for folding an array.
///
/// `call(identity(), t)` must equal `t`, and `call` must be associative, since
/// parallel reductions combine partial results in an unspecified grouping.
pub trait Reduce<T>: Binary<T, T, Output=T> {
    fn identity() -> T;
}

// ----------------------------------------------------------------------------

pub enum Add {}

impl<T, U> Binary<T, U> for Add where T: std::ops::Add<U> {
    type Output = T::Output;
    #[inline(always)]
    fn call(t: T, u: U) -> Self::Output { t.add(u) }
}

impl<T: Element> Reduce<T> for Add {
    fn identity() -> T { T::zero() }
}

// ----------------------------------------------------------------------------

pub enum Sub {}

impl<T, U> Binary<T, U> for Sub where T: std::ops::Sub<U> {
    type Output = T::Output;
    #[inline(always)]
    fn call(t: T, u: U) -> Self::Output { t.sub(u) }
}

// ----------------------------------------------------------------------------

pub enum Mul {}

impl<T, U> Binary<T, U> for Mul where T: std::ops::Mul<U> {
    type Output = T::Output;
    #[inline(always)]
    fn call(t: T, u: U) -> Self::Output { t.mul(u) }
}

// ----------------------------------------------------------------------------

pub enum Div {}

impl<T, U> Binary<T, U> for Div where T: std::ops::Div<U> {
    type Output = T::Output;
    #[inline(always)]
    fn call(t: T, u: U) -> Self::Output { t.div(u) }
}

// ----------------------------------------------------------------------------

/// The smaller of two elements. On a tie, or if they are unordered, the first.
pub enum Min {}

impl<T: PartialOrd> Binary<T, T> for Min {
    type Output = T;
    #[inline(always)]
    fn call(t: T, u: T) -> T { if u < t { u } else { t } }
}

/// The identity is the largest representable value.
impl<T: Element> Reduce<T> for Min {
    fn identity() -> T { T::max_value() }
}

// ----------------------------------------------------------------------------

/// The larger of two elements. On a tie, or if they are unordered, the first.
pub enum Max {}

impl<T: PartialOrd> Binary<T, T> for Max {
    type Output = T;
    #[inline(always)]
    fn call(t: T, u: T) -> T { if u > t { u } else { t } }
}

/// The identity is the smallest representable value.
impl<T: Element> Reduce<T> for Max {
    fn identity() -> T { T::min_value() }
}

// ----------------------------------------------------------------------------
