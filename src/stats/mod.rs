// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Statistical functions on raw data blocks.
//!
//! Every function here takes an unlabeled `ndarray` array and returns a
//! new one; the methods of [`Larry`](crate::Larry) call them and wrap the
//! result with the appropriate labels. Missing values are NaN.

mod group;
mod moving;
mod nanfunc;
mod rank;

use ndarray::{Array, Axis, RemoveAxis};
use rand::seq::SliceRandom;
use rand::Rng;

pub use self::group::{cov_missing, group_mean, group_median, group_ranking};
pub use self::moving::{fillforward_partially, movingsum, movingsum_forward};
pub use self::nanfunc::{
    nanmax, nanmax_axis, nanmean, nanmean_axis, nanmedian, nanmedian_axis, nanmin, nanmin_axis, nanprod,
    nanprod_axis, nanstd, nanstd_axis, nansum, nansum_axis, nanvar, nanvar_axis,
};
pub use self::rank::{lastrank, lastrank_decay, movingrank, ranking, Norm};

/// Shuffle `x` in place along `axis` with one random permutation.
pub fn shuffle_axis<A, D, R>(x: &mut Array<A, D>, axis: Axis, rng: &mut R)
where
    A: Clone,
    D: RemoveAxis,
    R: Rng + ?Sized,
{
    let mut perm: Vec<usize> = (0..x.len_of(axis)).collect();
    perm.shuffle(rng);
    let shuffled = x.select(axis, &perm);
    x.assign(&shuffled);
}
