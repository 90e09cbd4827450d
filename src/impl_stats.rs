// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Labeled wrappers of the functions in [`crate::stats`].

use std::hash::Hash;

use ndarray::{ArrayView2, Axis, Ix2};
use num_traits::Float;

use crate::error::{from_kind, ErrorKind};
use crate::label::position_map;
use crate::stats::{self, Norm};
use crate::{Element, Larry, LarryResult};

fn check_window(window: usize) -> LarryResult<()>
{
    if window == 0 {
        Err(from_kind(ErrorKind::InvalidArgument, "window must be at least 1"))
    } else {
        Ok(())
    }
}

/// # Statistics For Float Arrays
impl<A> Larry<A>
where A: Float + Element
{
    fn view2(&self) -> LarryResult<ArrayView2<'_, A>>
    {
        self.require_2d()?;
        Ok(self.data.view().into_dimensionality::<Ix2>()?)
    }

    /// Rank the elements along `axis`; see [`stats::ranking`].
    ///
    /// ```
    /// use larry::prelude::*;
    ///
    /// let lar = Larry::from_vec(vec![3., f64::NAN, 1., 2.], labels![["a", "b", "c", "d"]]).unwrap();
    /// let r = lar.ranking(0, Norm::MinusOneToOne, true).unwrap();
    /// assert_eq!(r.data()[0], 1.);
    /// assert!(r.data()[1].is_nan());
    /// assert_eq!(r.data()[2], -1.);
    /// ```
    pub fn ranking(&self, axis: usize, norm: Norm, ties: bool) -> LarryResult<Self>
    {
        self.check_axis(axis)?;
        Ok(self.with_data(stats::ranking(self.data.view(), Axis(axis), norm, ties)))
    }

    /// Moving sum over a trailing window along `axis`; see
    /// [`stats::movingsum`].
    ///
    /// **Errors** with `InvalidArgument` if `window` is zero.
    pub fn movingsum(&self, window: usize, axis: usize, norm: bool) -> LarryResult<Self>
    {
        check_window(window)?;
        self.check_axis(axis)?;
        Ok(self.with_data(stats::movingsum(self.data.view(), window, Axis(axis), norm)))
    }

    /// Moving sum over a leading window, skipping `skip` positions; see
    /// [`stats::movingsum_forward`]. Two dimensional arrays only.
    pub fn movingsum_forward(&self, window: usize, skip: usize, axis: usize, norm: bool) -> LarryResult<Self>
    {
        let x = self.view2()?;
        check_window(window)?;
        self.check_axis(axis)?;
        let out = stats::movingsum_forward(x, window, skip, Axis(axis), norm);
        Ok(self.with_data(out.into_dyn()))
    }

    /// Rank of the last element of every trailing window along `axis`; see
    /// [`stats::movingrank`]. Two dimensional arrays only.
    pub fn movingrank(&self, window: usize, axis: usize) -> LarryResult<Self>
    {
        let x = self.view2()?;
        check_window(window)?;
        self.check_axis(axis)?;
        Ok(self.with_data(stats::movingrank(x, window, Axis(axis)).into_dyn()))
    }

    /// Rank of the last column within every row, as a one column array
    /// labeled with the last column label. Two dimensional arrays only.
    pub fn lastrank(&self) -> LarryResult<Self>
    {
        let x = self.view2()?;
        self.last_column(stats::lastrank(x, Axis(1)))
    }

    /// Like [`Larry::lastrank`], with older columns weighted down by
    /// `exp(-decay * age)`.
    ///
    /// **Errors** with `InvalidArgument` if `decay` is negative.
    pub fn lastrank_decay(&self, decay: A) -> LarryResult<Self>
    {
        let x = self.view2()?;
        let ranks = stats::lastrank_decay(x, decay, Axis(1))
            .ok_or_else(|| from_kind(ErrorKind::InvalidArgument, "decay must not be negative"))?;
        self.last_column(ranks)
    }

    fn last_column(&self, ranks: ndarray::Array1<A>) -> LarryResult<Self>
    {
        let last = self.labels[1]
            .last()
            .cloned()
            .ok_or_else(|| from_kind(ErrorKind::InvalidArgument, "array has no columns"))?;
        let data = ranks.insert_axis(Axis(1)).into_dyn();
        Ok(Larry::from_parts_unchecked(data, self.labels_with(1, vec![last])))
    }

    /// Group values per row, aligned to the row labels of `self`. Missing
    /// group values leave their row out of every group.
    ///
    /// **Errors** with `InvalidArgument` unless `group` is one dimensional
    /// and with `LabelNotFound` unless every row label of `self` is a label
    /// of `group`.
    fn group_align<G>(&self, group: &Larry<G>) -> LarryResult<Vec<Option<G>>>
    where G: Element
    {
        if group.ndim() != 1 {
            return Err(from_kind(ErrorKind::InvalidArgument, "group must be a 1d array"));
        }
        let known = position_map(&group.labels[0]);
        self.labels[0]
            .iter()
            .map(|label| {
                let pos = known.get(label).ok_or_else(|| {
                    from_kind(
                        ErrorKind::LabelNotFound,
                        format!("row label `{}` is not a group label", label),
                    )
                })?;
                let g = &group.data[&[*pos][..]];
                Ok(if g.is_finite() { Some(g.clone()) } else { None })
            })
            .collect()
    }

    /// Rank every column within the groups of rows given by `group`; see
    /// [`stats::group_ranking`]. Two dimensional arrays only.
    pub fn group_ranking<G>(&self, group: &Larry<G>) -> LarryResult<Self>
    where G: Element + Eq + Hash
    {
        let x = self.view2()?;
        let groups = self.group_align(group)?;
        Ok(self.with_data(stats::group_ranking(x, &groups).into_dyn()))
    }

    /// Replace every element by the mean of its column within its group;
    /// see [`stats::group_mean`]. Two dimensional arrays only.
    pub fn group_mean<G>(&self, group: &Larry<G>) -> LarryResult<Self>
    where G: Element + Eq + Hash
    {
        let x = self.view2()?;
        let groups = self.group_align(group)?;
        Ok(self.with_data(stats::group_mean(x, &groups).into_dyn()))
    }

    /// Replace every element by the median of its column within its group;
    /// see [`stats::group_median`]. Two dimensional arrays only.
    pub fn group_median<G>(&self, group: &Larry<G>) -> LarryResult<Self>
    where G: Element + Eq + Hash
    {
        let x = self.view2()?;
        let groups = self.group_align(group)?;
        Ok(self.with_data(stats::group_median(x, &groups).into_dyn()))
    }

    /// Covariance of the rows, assuming zero mean rows and skipping missing
    /// values; see [`stats::cov_missing`]. Both axes of the result carry
    /// the row labels. Two dimensional arrays only.
    pub fn cov(&self) -> LarryResult<Self>
    {
        let x = self.view2()?;
        let rows = self.labels[0].clone();
        Ok(Larry::from_parts_unchecked(
            stats::cov_missing(x).into_dyn(),
            vec![rows.clone(), rows],
        ))
    }

    /// Fill missing values with the most recent value along each row, if
    /// it is at most `window` columns back. Two dimensional arrays only.
    pub fn push(&self, window: usize) -> LarryResult<Self>
    {
        let x = self.view2()?;
        Ok(self.with_data(stats::fillforward_partially(x, window).into_dyn()))
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::label::to_labels;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    const NAN: f64 = f64::NAN;

    fn sample() -> Larry<f64>
    {
        Larry::new(
            array![[1.0, NAN, 6.0, 0.0, 8.0], [2.0, 4.0, 8.0, 0.0, -1.0]],
            vec![to_labels(["r0", "r1"]), to_labels([1, 2, 3, 4, 5])],
        )
        .unwrap()
    }

    #[test]
    fn moving_windows_keep_labels()
    {
        let lar = sample();
        let m = lar.movingsum(2, 1, false).unwrap();
        assert_eq!(m.to_labels(), lar.to_labels());
        assert_eq!(m.data()[[1, 1]], 6.0);
        assert!(m.data()[[0, 0]].is_nan());
        assert_eq!(lar.movingsum(0, 1, false).unwrap_err().kind(), ErrorKind::InvalidArgument);
        let f = lar.movingsum_forward(2, 0, 1, true).unwrap();
        assert_eq!(f.data()[[0, 0]], 2.0);
        let r = lar.movingrank(2, 1).unwrap();
        assert_eq!(r.data()[[1, 1]], 1.0);
        let one_d = Larry::from_array(array![1.0, 2.0]);
        assert_eq!(one_d.movingrank(2, 0).unwrap_err().kind(), ErrorKind::NotTwoDimensional);
    }

    #[test]
    fn lastrank_keeps_last_column_label()
    {
        let lar = sample();
        let r = lar.lastrank().unwrap();
        assert_eq!(r.shape(), &[2, 1]);
        assert_eq!(r.label(1).unwrap(), &to_labels([5])[..]);
        assert_eq!(r.data()[[0, 0]], 1.0);
        assert_eq!(r.data()[[1, 0]], -1.0);
        assert_eq!(lar.lastrank_decay(-1.0).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(lar.lastrank_decay(0.0).unwrap(), r);
    }

    #[test]
    fn groups_are_aligned_to_rows()
    {
        let lar = Larry::new(
            array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]],
            vec![to_labels(["x", "y", "z"]), to_labels([0, 1])],
        )
        .unwrap();
        let group = Larry::from_vec(
            vec!["a".to_string(), "b".to_string(), "a".to_string(), "c".to_string()],
            vec![to_labels(["z", "y", "x", "w"])],
        )
        .unwrap();
        let mean = lar.group_mean(&group).unwrap();
        assert_eq!(mean.data(), &array![[3.0, 4.0], [3.0, 4.0], [3.0, 4.0]].into_dyn());
        let median = lar.group_median(&group).unwrap();
        assert_eq!(median.data(), mean.data());
        let rank = lar.group_ranking(&group).unwrap();
        assert_eq!(rank.data()[[0, 0]], -1.0);
        assert_eq!(rank.data()[[2, 0]], 1.0);
        assert_eq!(rank.data()[[1, 0]], 0.0);

        let partial = Larry::from_vec(vec!["a".to_string()], vec![to_labels(["x"])]).unwrap();
        assert_eq!(lar.group_mean(&partial).unwrap_err().kind(), ErrorKind::LabelNotFound);
        let flat = Larry::from_array(array![["a".to_string()]]);
        assert_eq!(lar.group_mean(&flat).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn covariance_and_push()
    {
        let lar = Larry::new(
            array![[1.0, 2.0, NAN], [2.0, NAN, 3.0]],
            vec![to_labels(["a", "b"]), to_labels([1, 2, 3])],
        )
        .unwrap();
        let c = lar.cov().unwrap();
        assert_eq!(c.label(1).unwrap(), &to_labels(["a", "b"])[..]);
        assert_abs_diff_eq!(c.data()[[0, 1]], 2.0);
        let p = lar.push(1).unwrap();
        assert_eq!(p.data()[[0, 2]], 2.0);
        assert_eq!(p.data()[[1, 1]], 2.0);
    }
}
