// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Moving window sums and forward filling.

use ndarray::{s, Array, Array2, ArrayView, ArrayView1, ArrayView2, Axis, Dimension, Zip};
use num_traits::Float;

use super::nanfunc::from_usize;

/// Sum of a window with NaN counted as zero; NaN if every element is NaN.
///
/// With `norm`, the sum is scaled by `window / count` to make up for the
/// missing elements.
fn window_sum<A: Float>(win: ArrayView1<'_, A>, norm: bool) -> A
{
    let (sum, count) = win
        .iter()
        .filter(|v| !v.is_nan())
        .fold((A::zero(), 0usize), |(s, n), &v| (s + v, n + 1));
    if count == 0 {
        A::nan()
    } else if norm {
        sum * from_usize(win.len()) / from_usize(count)
    } else {
        sum
    }
}

/// Moving sum over the trailing `window` elements along `axis`.
///
/// Position `i` holds the sum of the elements `i + 1 - window ..= i`; the
/// first `window - 1` positions are NaN.
pub fn movingsum<A, D>(x: ArrayView<'_, A, D>, window: usize, axis: Axis, norm: bool) -> Array<A, D>
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
                out[end - 1] = window_sum(lane.slice(s![end - window..end]), norm);
            }
        });
    out
}

/// Moving sum over the `window` elements that start `skip` positions
/// after each position, along `axis`.
///
/// Positions whose window runs past the end of the axis are NaN.
pub fn movingsum_forward<A, D>(x: ArrayView<'_, A, D>, window: usize, skip: usize, axis: Axis, norm: bool)
    -> Array<A, D>
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
            let n = lane.len();
            for i in 0..n {
                let start = i + skip;
                if start + window > n {
                    break;
                }
                out[i] = window_sum(lane.slice(s![start..start + window]), norm);
            }
        });
    out
}

/// Fill NaN with the most recent non-NaN value along each row, as long as
/// that value is at most `window` columns back.
pub fn fillforward_partially<A: Float>(x: ArrayView2<'_, A>, window: usize) -> Array2<A>
{
    let mut out = x.to_owned();
    for mut row in out.rows_mut() {
        let mut recent: Option<(usize, A)> = None;
        for (j, v) in row.iter_mut().enumerate() {
            if !v.is_nan() {
                recent = Some((j, *v));
            } else if let Some((k, value)) = recent {
                if j - k <= window {
                    *v = value;
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests
{
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    const NAN: f64 = f64::NAN;

    fn assert_nan_eq(a: &Array2<f64>, b: &Array2<f64>)
    {
        for (x, y) in a.iter().zip(b) {
            if y.is_nan() {
                assert!(x.is_nan(), "{} vs {}", a, b);
            } else {
                assert_abs_diff_eq!(*x, *y, epsilon = 1e-10);
            }
        }
    }

    fn sample() -> Array2<f64>
    {
        array![[1.0, NAN, 6.0, 0.0, 8.0], [2.0, 4.0, 8.0, 0.0, -1.0]]
    }

    #[test]
    fn movingsum_rows()
    {
        let x = sample();
        let normed = array![[NAN, 2.0, 12.0, 6.0, 8.0], [NAN, 6.0, 12.0, 8.0, -1.0]];
        assert_nan_eq(&movingsum(x.view(), 2, Axis(1), true), &normed);
        let raw = array![[NAN, 1.0, 6.0, 6.0, 8.0], [NAN, 6.0, 12.0, 8.0, -1.0]];
        assert_nan_eq(&movingsum(x.view(), 2, Axis(1), false), &raw);
        let cols = array![[NAN, NAN, NAN, NAN, NAN], [3.0, 4.0, 14.0, 0.0, 7.0]];
        assert_nan_eq(&movingsum(x.view(), 2, Axis(0), false), &cols);
    }

    #[test]
    fn movingsum_all_nan()
    {
        let x = Array2::from_elem((2, 5), NAN);
        assert!(movingsum(x.view(), 2, Axis(1), true).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn movingsum_forward_skip()
    {
        let x = sample();
        let expected = array![[2.0, 12.0, 6.0, 8.0, NAN], [6.0, 12.0, 8.0, -1.0, NAN]];
        assert_nan_eq(&movingsum_forward(x.view(), 2, 0, Axis(1), true), &expected);
        let expected = array![[6.0, 6.0, 8.0, NAN, NAN], [12.0, 8.0, -1.0, NAN, NAN]];
        assert_nan_eq(&movingsum_forward(x.view(), 2, 1, Axis(1), false), &expected);
        let expected = array![[2.0, 4.0, 8.0, 0.0, -1.0], [NAN, NAN, NAN, NAN, NAN]];
        assert_nan_eq(&movingsum_forward(x.view(), 1, 1, Axis(0), false), &expected);
    }

    #[test]
    fn fillforward_within_window()
    {
        let x = array![[1.0, NAN, NAN, NAN], [NAN, 2.0, NAN, 3.0]];
        let expected = array![[1.0, 1.0, 1.0, NAN], [NAN, 2.0, 2.0, 3.0]];
        assert_nan_eq(&fillforward_partially(x.view(), 2), &expected);
    }
}
