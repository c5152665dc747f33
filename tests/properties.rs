//! Property-based tests of indexing, views and bulk operations.

use std::collections::{HashSet};

use ndtuple::{Array, Bulk, Coord, Order, Shape, View, ViewMut, bulk};
use proptest::prelude::*;

fn shape_strategy() -> impl Strategy<Value=Vec<usize>> {
    prop::collection::vec(0usize..6, 0..=4)
}

fn order_strategy() -> impl Strategy<Value=Order> {
    prop_oneof![Just(Order::RowMajor), Just(Order::ColumnMajor)]
}

/// A 2-D extent and a region `from .. to` within it.
fn region_strategy() -> impl Strategy<Value=([usize; 2], [isize; 2], [isize; 2])> {
    (1usize..8, 1usize..8).prop_flat_map(|(h, w)| {
        (Just([h, w]), 0..=h as isize, 0..=w as isize).prop_flat_map(|(extent, r0, c0)| {
            (Just(extent), Just([r0, c0]), (r0..=extent[0] as isize, c0..=extent[1] as isize))
                .prop_map(|(extent, from, (r1, c1))| (extent, from, [r1, c1]))
        })
    })
}

proptest! {
    #[test]
    fn prop_indexer_bijection(extents in shape_strategy(), indexer in order_strategy(), walk in order_strategy()) {
        let shape = Shape::from(extents);
        let mut offsets: Vec<isize> = shape.coords(walk).map(|c| indexer.to_offset(&c, &shape)).collect();
        offsets.sort();
        let expected: Vec<isize> = (0..shape.total_size() as isize).collect();
        prop_assert_eq!(offsets, expected);
    }

    #[test]
    fn prop_from_offset_inverts(extents in shape_strategy(), order in order_strategy()) {
        let shape = Shape::from(extents);
        for (i, c) in shape.coords(order).enumerate() {
            prop_assert_eq!(order.to_offset(&c, &shape), i as isize);
            prop_assert_eq!(order.from_offset(&shape, i), c);
        }
    }

    #[test]
    fn prop_par_coords_once(extents in shape_strategy(), order in order_strategy()) {
        let shape = Shape::from(extents);
        let seen: HashSet<Coord> = rayon::iter::ParallelIterator::collect(shape.par_coords(order));
        prop_assert_eq!(seen.len(), shape.total_size());
    }

    #[test]
    fn prop_set_get_round_trip(extents in shape_strategy(), order in order_strategy(), seed in any::<i32>()) {
        let mut a = Array::<i32>::with_order(extents.as_slice(), order);
        let cs: Vec<Coord> = a.coords().collect();
        for (i, c) in cs.iter().enumerate() {
            a.set(c, seed.wrapping_add(i as i32)).unwrap();
        }
        for (i, c) in cs.iter().enumerate() {
            prop_assert_eq!(a.get(c), Ok(seed.wrapping_add(i as i32)));
        }
    }

    #[test]
    fn prop_sub_array_aliases_parent(
        (extent, from, to) in region_strategy(),
        order in order_strategy(),
        value in any::<i64>(),
    ) {
        let mut a = Array::<i64>::with_order(extent, order);
        let mut v = a.sub_array(&from, &to).unwrap();
        prop_assert_eq!(v.shape().as_ref(), [(to[0] - from[0]) as usize, (to[1] - from[1]) as usize]);
        let local: Vec<Coord> = v.coords().collect();
        for c in &local {
            v.set(c, value).unwrap();
        }
        drop(v);
        let written: HashSet<Coord> = local.iter().map(|c| c.offset_by(&from)).collect();
        for c in a.coords() {
            let expected = if written.contains(&c) { value } else { 0 };
            prop_assert_eq!(a.get(&c), Ok(expected));
        }
    }

    #[test]
    fn prop_nested_equals_flattened(
        (extent, from, to) in region_strategy(),
        (inner_from, inner_to) in (0isize..3, 0isize..3),
    ) {
        let original = Array::from_fn(extent, Order::RowMajor, |c| (c[0] * 1000 + c[1]) as i64);
        let mut a = original.to_array();
        let mut v = a.sub_array(&from, &to).unwrap();
        let (h, w) = ((to[0] - from[0]), (to[1] - from[1]));
        let lo = [inner_from.min(h), inner_from.min(w)];
        let hi = [(inner_from + inner_to).min(h), (inner_from + inner_to).min(w)];
        let mut nested = v.sub_array(&lo, &hi).unwrap();
        let origin = Coord::from(from).offset_by(&lo);
        for c in nested.coords() {
            prop_assert_eq!(nested.get(&c), original.get(&c.offset_by(&origin)));
        }
        for c in nested.coords() {
            nested.set(&c, -1).unwrap();
        }
        drop(nested);
        drop(v);
        let changed = a.coords().filter(|c| a.at(c) == -1).count();
        prop_assert_eq!(changed, ((hi[0] - lo[0]) * (hi[1] - lo[1])) as usize);
    }

    #[test]
    fn prop_reductions_match_scan(items in prop::collection::vec(-1000i64..1000, 0..64)) {
        let a = Array::from(items.clone());
        let parallel = Bulk::default().threshold(1);
        let expected_min = items.iter().copied().fold(i64::MAX, i64::min);
        let expected_max = items.iter().copied().fold(i64::MIN, i64::max);
        prop_assert_eq!(parallel.min(&a), expected_min);
        prop_assert_eq!(parallel.max(&a), expected_max);
        prop_assert_eq!(bulk::min(&a), expected_min);
        prop_assert_eq!(bulk::max(&a), expected_max);
        prop_assert_eq!(parallel.sum(&a), items.iter().sum::<i64>());
    }

    #[test]
    fn prop_zip_with_elementwise(extents in shape_strategy(), order in order_strategy()) {
        let a = Array::from_fn(extents.as_slice(), order, |c| c.iter().sum::<isize>() as f64);
        let b = Array::from_fn(extents.as_slice(), Order::RowMajor, |c| c.len() as f64 + 0.5);
        let c = Bulk::default().threshold(1).zip_with(&a, &b, |x, y| x * y).unwrap();
        prop_assert_eq!(c.shape(), a.shape());
        for coord in a.coords() {
            prop_assert_eq!(c.at(&coord), a.at(&coord) * b.at(&coord));
        }
    }
}
