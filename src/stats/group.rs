// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Statistics over groups of rows, and covariance with missing data.

use std::collections::HashMap;
use std::hash::Hash;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use num_traits::Float;

use super::nanfunc::{from_usize, nanmean, nanmedian};
use super::rank::{ranking, Norm};

/// Row positions of each group, in order of first appearance.
fn group_rows<G: Eq + Hash>(groups: &[Option<G>]) -> Vec<Vec<usize>>
{
    let mut index: HashMap<&G, usize> = HashMap::new();
    let mut rows: Vec<Vec<usize>> = Vec::new();
    for (i, g) in groups.iter().enumerate() {
        if let Some(g) = g {
            let k = *index.entry(g).or_insert_with(|| {
                rows.push(Vec::new());
                rows.len() - 1
            });
            rows[k].push(i);
        }
    }
    rows
}

/// Apply `f` to the column values of every group and write its result
/// back to the rows of the group. Rows without a group are NaN.
fn group_apply<A, G, F>(x: ArrayView2<'_, A>, groups: &[Option<G>], mut f: F) -> Array2<A>
where
    A: Float,
    G: Eq + Hash,
    F: FnMut(ArrayView1<'_, A>) -> Array1<A>,
{
    debug_assert_eq!(x.nrows(), groups.len());
    let mut out = Array2::from_elem(x.raw_dim(), A::nan());
    for rows in group_rows(groups) {
        let block = x.select(Axis(0), &rows);
        for (j, col) in block.columns().into_iter().enumerate() {
            let values = f(col);
            for (&i, &v) in rows.iter().zip(&values) {
                out[[i, j]] = v;
            }
        }
    }
    out
}

/// Rank every column within each group, normalized to `-1 ..= 1` with
/// ties averaged.
pub fn group_ranking<A, G>(x: ArrayView2<'_, A>, groups: &[Option<G>]) -> Array2<A>
where
    A: Float,
    G: Eq + Hash,
{
    group_apply(x, groups, |col| ranking(col, Axis(0), Norm::MinusOneToOne, true))
}

/// Replace every element by the NaN-skipping mean of its column within
/// its group.
pub fn group_mean<A, G>(x: ArrayView2<'_, A>, groups: &[Option<G>]) -> Array2<A>
where
    A: Float,
    G: Eq + Hash,
{
    group_apply(x, groups, |col| Array1::from_elem(col.len(), nanmean(col)))
}

/// Replace every element by the NaN-skipping median of its column within
/// its group.
pub fn group_median<A, G>(x: ArrayView2<'_, A>, groups: &[Option<G>]) -> Array2<A>
where
    A: Float,
    G: Eq + Hash,
{
    group_apply(x, groups, |col| Array1::from_elem(col.len(), nanmedian(col)))
}

/// Covariance of the rows of `x`, assuming each row has zero mean.
///
/// Entry `(i, j)` is the sum of `x[i, k] * x[j, k]` over the columns where
/// both are not NaN, divided by the number of such columns.
pub fn cov_missing<A: Float>(x: ArrayView2<'_, A>) -> Array2<A>
{
    let n = x.nrows();
    let mut out = Array2::from_elem((n, n), A::nan());
    for i in 0..n {
        for j in i..n {
            let (sum, count) = x
                .row(i)
                .iter()
                .zip(x.row(j))
                .filter(|(a, b)| !a.is_nan() && !b.is_nan())
                .fold((A::zero(), 0usize), |(s, c), (&a, &b)| (s + a * b, c + 1));
            let cov = if count == 0 { A::nan() } else { sum / from_usize(count) };
            out[[i, j]] = cov;
            out[[j, i]] = cov;
        }
    }
    out
}
