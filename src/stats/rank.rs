// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Ranking along an axis, treating NaN as missing.

use std::cmp::Ordering;

use ndarray::{Array, ArrayView, ArrayView1, ArrayViewMut1, Axis, Dimension, RemoveAxis, Zip};
use num_traits::Float;

use super::nanfunc::from_usize;

/// Normalization of ranks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Norm
{
    /// Ranks scaled to `0 ..= N - 1`, where `N` is the length of the axis
    /// including missing values.
    ZeroToN1,
    /// Ranks scaled to `-1 ..= 1`.
    MinusOneToOne,
}

fn cmp_float<A: Float>(a: &A, b: &A) -> Ordering
{
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Rank one lane into `out`.
fn rank_lane<A: Float>(x: ArrayView1<'_, A>, mut out: ArrayViewMut1<'_, A>, norm: Norm, ties: bool)
{
    let len = x.len();
    let mut order: Vec<(usize, A)> = x
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .collect();
    out.fill(A::nan());
    let n = order.len();
    if n == 0 {
        return;
    }
    // stable, so unaveraged ties keep position order
    order.sort_by(|a, b| cmp_float(&a.1, &b.1));
    let mut ranks = vec![A::zero(); n];
    if ties {
        let mut start = 0;
        while start < n {
            let mut end = start + 1;
            while end < n && order[end].1 == order[start].1 {
                end += 1;
            }
            let avg = from_usize::<A>(start + end - 1) / from_usize(2);
            for r in &mut ranks[start..end] {
                *r = avg;
            }
            start = end;
        }
    } else {
        for (i, r) in ranks.iter_mut().enumerate() {
            *r = from_usize(i);
        }
    }
    let two = from_usize::<A>(2);
    for ((pos, _), rank) in order.into_iter().zip(ranks) {
        out[pos] = if n == 1 {
            match norm {
                Norm::ZeroToN1 => from_usize::<A>(len - 1) / two,
                Norm::MinusOneToOne => A::zero(),
            }
        } else {
            let span = from_usize::<A>(n - 1);
            match norm {
                Norm::ZeroToN1 => rank * from_usize(len - 1) / span,
                Norm::MinusOneToOne => two * rank / span - A::one(),
            }
        };
    }
}

/// Rank the elements of every lane along `axis`.
///
/// NaN elements stay NaN. When `ties` is true, equal elements get the
/// average of their ranks; otherwise they are ranked by position. A lane
/// with a single non-NaN element maps it to the midpoint of the
/// normalization.
pub fn ranking<A, D>(x: ArrayView<'_, A, D>, axis: Axis, norm: Norm, ties: bool) -> Array<A, D>
where
    A: Float,
    D: Dimension,
{
    let mut out = Array::from_elem(x.raw_dim(), A::nan());
    Zip::from(x.lanes(axis))
        .and(out.lanes_mut(axis))
        .for_each(|lane, out| rank_lane(lane, out, norm, ties));
    out
}

/// Decay weighted rank of the last element of a lane among all its
/// non-NaN elements, in `-1 ..= 1`.
fn lastrank_lane<A: Float>(x: ArrayView1<'_, A>, decay: A) -> A
{
    let len = x.len();
    if len == 0 {
        return A::nan();
    }
    let last = x[len - 1];
    if last.is_nan() {
        return A::nan();
    }
    let (mut g, mut e, mut n) = (A::zero(), A::zero(), A::zero());
    for (j, &v) in x.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        let w = (-decay * from_usize(len - 1 - j)).exp();
        n = n + w;
        if v < last {
            g = g + w;
        } else if v == last {
            e = e + w;
        }
    }
    // the last element itself always has weight one
    let rest = n - A::one();
    if rest <= A::zero() {
        return A::nan();
    }
    let two = from_usize::<A>(2);
    let r = (g + g + e - A::one()) / two / rest;
    two * (r - A::one() / two)
}

/// Rank of the last element of every lane along `axis`, in `-1 ..= 1`.
///
/// The result is NaN where the last element is NaN or is the only non-NaN
/// element of its lane.
pub fn lastrank<A, D>(x: ArrayView<'_, A, D>, axis: Axis) -> Array<A, D::Smaller>
where
    A: Float,
    D: RemoveAxis,
{
    x.map_axis(axis, |lane| lastrank_lane(lane, A::zero()))
}

/// Like [`lastrank`], with each element weighted by
/// `exp(-decay * distance to the last element)`.
///
/// Returns `None` if `decay` is negative.
pub fn lastrank_decay<A, D>(x: ArrayView<'_, A, D>, decay: A, axis: Axis) -> Option<Array<A, D::Smaller>>
where
    A: Float,
    D: RemoveAxis,
{
    if decay < A::zero() {
        return None;
    }
    Some(x.map_axis(axis, |lane| lastrank_lane(lane, decay)))
}

/// `lastrank` over a moving window of `window` elements along `axis`.
///
/// The first `window - 1` positions are NaN.
pub fn movingrank<A, D>(x: ArrayView<'_, A, D>, window: usize, axis: Axis) -> Array<A, D>
where
    A: Float,
    D: Dimension,
{
    let mut out = Array::from_elem(x.raw_dim(), A::nan());
    if window == 0 {
        return out;
    }
    Zip::from(x.lanes(axis))
        .and(out.lanes_mut(axis))
        .for_each(|lane, mut out| {
            for end in window..=lane.len() {
                let win = lane.slice(ndarray::s![end - window..end]);
                out[end - 1] = lastrank_lane(win, A::zero());
            }
        });
    out
}

#[cfg(test)]
mod tests
{
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};

    const NAN: f64 = f64::NAN;

    fn assert_nan_eq(a: &Array2<f64>, b: &Array2<f64>)
    {
        assert_eq!(a.shape(), b.shape());
        for (x, y) in a.iter().zip(b) {
            if y.is_nan() {
                assert!(x.is_nan(), "{} vs {}", a, b);
            } else {
                assert_abs_diff_eq!(*x, *y, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn ranking_axis0_with_nan()
    {
        let x = array![[1.0, NAN, 2.0, NAN, NAN], [2.0, 2.0, NAN, NAN, NAN], [3.0, 3.0, 3.0, 3.0, NAN]];
        let expected = array![[-1.0, NAN, -1.0, NAN, NAN], [0.0, -1.0, NAN, NAN, NAN], [1.0, 1.0, 1.0, 0.0, NAN]];
        assert_nan_eq(&ranking(x.view(), Axis(0), Norm::MinusOneToOne, true), &expected);
        let expected = array![[0.0, NAN, 0.0, NAN, NAN], [1.0, 0.0, NAN, NAN, NAN], [2.0, 2.0, 2.0, 1.0, NAN]];
        assert_nan_eq(&ranking(x.view(), Axis(0), Norm::ZeroToN1, true), &expected);
    }

    #[test]
    fn ranking_averages_ties()
    {
        let x = array![[1.0, 1.0, 1.0, 1.0], [1.0, 1.0, 2.0, 2.0], [2.0, 2.0, 3.0, 2.0], [2.0, 3.0, 3.0, 3.0]];
        let t = 2.0 / 3.0;
        let expected = array![[-t, -t, -1.0, -1.0], [-t, -t, -1.0 / 3.0, 0.0], [t, 1.0 / 3.0, t, 0.0], [t, 1.0, t, 1.0]];
        assert_nan_eq(&ranking(x.view(), Axis(0), Norm::MinusOneToOne, true), &expected);
    }

    #[test]
    fn ranking_by_position()
    {
        let x = array![[3.0, 3.0, 3.0, 3.0, NAN]];
        let expected = array![[0.0, 4.0 / 3.0, 8.0 / 3.0, 4.0, NAN]];
        assert_nan_eq(&ranking(x.view(), Axis(1), Norm::ZeroToN1, false), &expected);
    }

    #[test]
    fn movingrank_rows()
    {
        let x = array![[1.0, NAN, 6.0, 0.0, 8.0], [2.0, 4.0, 8.0, 0.0, -1.0]];
        let expected = array![[NAN, NAN, NAN, -1.0, 1.0], [NAN, 1.0, 1.0, -1.0, -1.0]];
        assert_nan_eq(&movingrank(x.view(), 2, Axis(1)), &expected);
        let expected = array![[NAN, NAN, NAN, NAN, NAN], [1.0, NAN, 1.0, 0.0, -1.0]];
        assert_nan_eq(&movingrank(x.view(), 2, Axis(0)), &expected);
    }

    #[test]
    fn lastrank_and_decay()
    {
        let x = array![[1.0, 2.0, 3.0], [3.0, 2.0, 1.0], [1.0, NAN, 2.0], [NAN, NAN, 1.0]];
        let r = lastrank(x.view(), Axis(1));
        assert_eq!(r[0], 1.0);
        assert_eq!(r[1], -1.0);
        assert_eq!(r[2], 1.0);
        assert!(r[3].is_nan());
        let d = lastrank_decay(x.view(), 0.0, Axis(1)).unwrap();
        assert_eq!(d[0], 1.0);
        assert!(lastrank_decay(x.view(), -1.0, Axis(1)).is_none());
        let y = array![[2.0, 1.0, 3.0, 1.5]];
        let slow = lastrank_decay(y.view(), 10.0, Axis(1)).unwrap()[0];
        // old elements weigh almost nothing, the larger previous one wins
        assert_abs_diff_eq!(slow, -1.0, epsilon = 1e-3);
    }
}
