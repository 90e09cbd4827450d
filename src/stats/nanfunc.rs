// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reductions that skip NaN.

use ndarray::{Array, ArrayView, Axis, Dimension, RemoveAxis};
use num_traits::Float;

fn finite_values<'a, A, D>(x: &'a ArrayView<'_, A, D>) -> impl Iterator<Item = A> + 'a
where
    A: Float,
    D: Dimension,
{
    x.iter().copied().filter(|v| !v.is_nan())
}

/// Sum of the non-NaN elements; zero if there are none.
pub fn nansum<A: Float, D: Dimension>(x: ArrayView<'_, A, D>) -> A
{
    finite_values(&x).fold(A::zero(), |acc, v| acc + v)
}

/// Product of the non-NaN elements; one if there are none.
pub fn nanprod<A: Float, D: Dimension>(x: ArrayView<'_, A, D>) -> A
{
    finite_values(&x).fold(A::one(), |acc, v| acc * v)
}

/// Mean of the non-NaN elements; NaN if there are none.
pub fn nanmean<A: Float, D: Dimension>(x: ArrayView<'_, A, D>) -> A
{
    let (sum, count) = finite_values(&x).fold((A::zero(), 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        A::nan()
    } else {
        sum / from_usize(count)
    }
}

/// Median of the non-NaN elements; NaN if there are none.
pub fn nanmedian<A: Float, D: Dimension>(x: ArrayView<'_, A, D>) -> A
{
    let mut values: Vec<A> = finite_values(&x).collect();
    let n = values.len();
    if n == 0 {
        return A::nan();
    }
    values.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / from_usize(2)
    }
}

/// Population variance of the non-NaN elements; NaN if there are none.
pub fn nanvar<A: Float, D: Dimension>(x: ArrayView<'_, A, D>) -> A
{
    let mean = nanmean(x.view());
    if mean.is_nan() {
        return mean;
    }
    let (ss, count) = finite_values(&x).fold((A::zero(), 0usize), |(s, n), v| {
        let d = v - mean;
        (s + d * d, n + 1)
    });
    ss / from_usize(count)
}

/// Population standard deviation of the non-NaN elements.
pub fn nanstd<A: Float, D: Dimension>(x: ArrayView<'_, A, D>) -> A
{
    nanvar(x).sqrt()
}

/// Largest non-NaN element; NaN if there are none.
pub fn nanmax<A: Float, D: Dimension>(x: ArrayView<'_, A, D>) -> A
{
    finite_values(&x).reduce(A::max).unwrap_or_else(A::nan)
}

/// Smallest non-NaN element; NaN if there are none.
pub fn nanmin<A: Float, D: Dimension>(x: ArrayView<'_, A, D>) -> A
{
    finite_values(&x).reduce(A::min).unwrap_or_else(A::nan)
}

macro_rules! axis_reduction {
    ($($name:ident => $lane:ident,)*) => {
        $(
        #[doc = concat!("`", stringify!($lane), "` of every lane along `axis`.")]
        pub fn $name<A, D>(x: ArrayView<'_, A, D>, axis: Axis) -> Array<A, D::Smaller>
        where
            A: Float,
            D: RemoveAxis,
        {
            x.map_axis(axis, |lane| $lane(lane))
        }
        )*
    };
}

axis_reduction! {
    nansum_axis => nansum,
    nanprod_axis => nanprod,
    nanmean_axis => nanmean,
    nanmedian_axis => nanmedian,
    nanvar_axis => nanvar,
    nanstd_axis => nanstd,
    nanmax_axis => nanmax,
    nanmin_axis => nanmin,
}

#[inline]
pub(crate) fn from_usize<A: Float>(n: usize) -> A
{
    A::from(n).unwrap_or_else(A::nan)
}
