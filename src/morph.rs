// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reindexing: morph, merge, vacuum, cut_missing and lag.

use std::sync::Arc;

use log::debug;
use ndarray::{ArrayD, Axis, Zip};

use crate::align::select_axes;
use crate::error::{dimension_mismatch, from_kind, ErrorKind};
use crate::label::{position_map, sorted_union};
use crate::{Element, Label, Larry, LarryResult, Missing};

impl<A: Clone> Larry<A>
{
    /// Reindex `axis` to `labels`, converting every element with `conv`.
    /// Positions whose label is new hold the missing marker.
    fn reindex_axis<F, C>(&self, axis: usize, labels: Vec<Label>, conv: C) -> LarryResult<Larry<F>>
    where
        F: Missing,
        C: Fn(&A) -> F,
    {
        self.check_axis(axis)?;
        let old = position_map(&self.labels[axis]);
        let sources: Vec<Option<usize>> = labels.iter().map(|l| old.get(l).copied()).collect();
        let present = sources.iter().filter(|s| s.is_some()).count();
        debug!(
            "reindex axis {}: {} of {} labels present in {}",
            axis,
            present,
            labels.len(),
            self.labels[axis].len()
        );

        let mut shape = self.shape().to_vec();
        shape[axis] = labels.len();
        let mut data = ArrayD::from_elem(shape, F::missing());
        for (i, src) in sources.into_iter().enumerate() {
            if let Some(j) = src {
                Zip::from(data.index_axis_mut(Axis(axis), i))
                    .and(self.data.index_axis(Axis(axis), j))
                    .for_each(|dst, x| *dst = conv(x));
            }
        }
        Larry::from_parts(data, self.labels_with(axis, labels))
    }

    /// Keep the given positions along every axis that has a pick.
    fn select_positions(&self, picks: Vec<Option<Vec<usize>>>) -> Self
    {
        let views: Vec<Option<&[usize]>> = picks.iter().map(|p| p.as_deref()).collect();
        let data = select_axes(self.data.view(), &views);
        let labels = picks
            .iter()
            .zip(&self.labels)
            .map(|(pick, list)| match pick {
                None => list.clone(),
                Some(positions) => Arc::new(positions.iter().map(|&p| list[p].clone()).collect()),
            })
            .collect();
        Larry::from_parts_unchecked(data, labels)
    }

    /// Drop the first `nlag` labels of `axis` and the last `nlag`
    /// elements of the data, shifting the data forward relative to the
    /// labels.
    ///
    /// A lag of zero is the identity; a lag longer than the axis leaves an
    /// empty axis.
    ///
    /// **Errors** with `InvalidArgument` if `nlag` is negative.
    ///
    /// ```
    /// use larry::prelude::*;
    ///
    /// let lar = Larry::from_vec(vec![1, 2, 3], labels![["a", "b", "c"]]).unwrap();
    /// let lagged = lar.lag(1, 0).unwrap();
    /// assert_eq!(lagged.label(0).unwrap(), &[Label::from("b"), Label::from("c")]);
    /// assert_eq!(lagged.data().as_slice().unwrap(), &[1, 2]);
    /// ```
    pub fn lag(&self, nlag: isize, axis: usize) -> LarryResult<Self>
    {
        if nlag < 0 {
            return Err(from_kind(ErrorKind::InvalidArgument, "nlag cannot be negative"));
        }
        self.check_axis(axis)?;
        let len = self.data.len_of(Axis(axis));
        let nlag = (nlag as usize).min(len);
        let data = self
            .data
            .slice_axis(Axis(axis), (0..len - nlag).into())
            .to_owned();
        let labels = self.labels[axis][nlag..].to_vec();
        Ok(Larry::from_parts_unchecked(data, self.labels_with(axis, labels)))
    }
}

/// # Reindexing
impl<A> Larry<A>
where A: Element
{
    /// Reindex `axis` to exactly `labels`.
    ///
    /// Data of labels present in `self` is carried over; new labels get the
    /// missing marker, so integers and booleans are promoted to `f64`.
    ///
    /// **Errors** with `AxisOutOfBounds` for a bad axis and `DuplicateLabel`
    /// if `labels` repeats a label.
    ///
    /// ```
    /// use larry::prelude::*;
    ///
    /// let lar = Larry::from_vec(vec![1i64, 2], labels![["a", "b"]]).unwrap();
    /// let m = lar.morph(labels![["b", "z"]].remove(0), 0).unwrap();
    /// assert_eq!(m.data()[0], 2.);
    /// assert!(m.data()[1].is_nan());
    /// ```
    pub fn morph(&self, labels: Vec<Label>, axis: usize) -> LarryResult<Larry<A::Filled>>
    {
        self.reindex_axis(axis, labels, |x| x.clone().into_filled())
    }

    /// Morph every axis to the labels of `other`.
    ///
    /// **Errors** with `DimensionMismatch` if the number of axes differs.
    pub fn morph_like<B>(&self, other: &Larry<B>) -> LarryResult<Larry<A::Filled>>
    {
        if self.ndim() != other.ndim() {
            return Err(dimension_mismatch(self.ndim(), other.ndim()));
        }
        let mut out = self.mapv(Element::into_filled);
        for (axis, target) in other.labels.iter().enumerate() {
            if out.labels[axis] != *target {
                out = out.reindex_axis(axis, target.to_vec(), Clone::clone)?;
            }
        }
        Ok(out)
    }

    /// Merge `other` into `self`.
    ///
    /// Every axis whose labels differ becomes the sorted union of both
    /// label lists. Non missing elements of `other` are copied over.
    ///
    /// **Errors** with `Overlap` if `update` is false and some position
    /// holds a non missing element in both arrays; nothing is written in
    /// that case. **Errors** with `DimensionMismatch` if the number of axes
    /// differs.
    ///
    /// ```
    /// use larry::prelude::*;
    ///
    /// let a = Larry::from_vec(vec![1f64, 2.], labels![["a", "b"]]).unwrap();
    /// let b = Larry::from_vec(vec![3.], labels![["c"]]).unwrap();
    /// let m = a.merge(&b, false).unwrap();
    /// assert_eq!(m.data().as_slice().unwrap(), &[1., 2., 3.]);
    ///
    /// let c = Larry::from_vec(vec![9.], labels![["b"]]).unwrap();
    /// assert_eq!(a.merge(&c, false).unwrap_err().kind(), ErrorKind::Overlap);
    /// assert_eq!(a.merge(&c, true).unwrap().data().as_slice().unwrap(), &[1., 9.]);
    /// ```
    pub fn merge(&self, other: &Larry<A>, update: bool) -> LarryResult<Larry<A::Filled>>
    {
        if self.ndim() != other.ndim() {
            return Err(dimension_mismatch(self.ndim(), other.ndim()));
        }
        let mut lhs = self.mapv(Element::into_filled);
        let mut rhs = other.mapv(Element::into_filled);
        for axis in 0..self.ndim() {
            if lhs.labels[axis] != rhs.labels[axis] {
                let union = sorted_union(&lhs.labels[axis], &rhs.labels[axis]);
                debug!("merge axis {}: union of {} labels", axis, union.len());
                lhs = lhs.reindex_axis(axis, union.clone(), Clone::clone)?;
                rhs = rhs.reindex_axis(axis, union, Clone::clone)?;
            }
        }
        if !update {
            let overlap = Zip::from(&lhs.data)
                .and(&rhs.data)
                .fold(false, |acc, a, b| acc || (a.is_finite() && b.is_finite()));
            if overlap {
                return Err(from_kind(ErrorKind::Overlap, "overlapping values"));
            }
        }
        Zip::from(&mut lhs.data).and(&rhs.data).for_each(|a, b| {
            if b.is_finite() {
                *a = b.clone();
            }
        });
        Ok(lhs)
    }

    /// Positions along `axis` where the slice of the data has more than
    /// `min_count` non missing elements.
    fn positions_with_data(&self, axis: usize, min_count: impl Fn(usize) -> f64) -> Vec<usize>
    {
        (0..self.data.len_of(Axis(axis)))
            .filter(|&i| {
                let slice = self.data.index_axis(Axis(axis), i);
                let finite = slice.iter().filter(|x| x.is_finite()).count();
                finite as f64 > min_count(slice.len())
            })
            .collect()
    }

    /// Axes to prune: every axis but `axis`, or all of them for `None`.
    fn target_axes(&self, axis: Option<usize>) -> LarryResult<Vec<usize>>
    {
        match axis {
            Some(axis) => {
                self.check_axis(axis)?;
                Ok((0..self.ndim()).filter(|&ax| ax != axis).collect())
            }
            None => Ok((0..self.ndim()).collect()),
        }
    }

    /// Remove the slices that hold no non missing element.
    ///
    /// `axis` is the axis searched for data: with `Some(0)` the columns of
    /// a 2-D array are checked and empty columns removed, with `Some(1)` the
    /// rows. In general every axis except `axis` is pruned, and `None`
    /// prunes every axis.
    ///
    /// ```
    /// use larry::prelude::*;
    /// use ndarray::array;
    ///
    /// let nan = f64::NAN;
    /// let lar = Larry::new(array![[1., nan], [nan, nan]], labels![["a", "b"], [1, 2]]).unwrap();
    /// let v = lar.vacuum(None).unwrap();
    /// assert_eq!(v.shape(), &[1, 1]);
    /// let cols = lar.vacuum(Some(0)).unwrap();
    /// assert_eq!(cols.shape(), &[2, 1]);
    /// let rows = lar.vacuum(Some(1)).unwrap();
    /// assert_eq!(rows.shape(), &[1, 2]);
    /// ```
    pub fn vacuum(&self, axis: Option<usize>) -> LarryResult<Self>
    {
        let axes = self.target_axes(axis)?;
        let picks = (0..self.ndim())
            .map(|ax| {
                if axes.contains(&ax) {
                    Some(self.positions_with_data(ax, |_| 0.))
                } else {
                    None
                }
            })
            .collect();
        Ok(self.select_positions(picks))
    }

    /// Remove the slices with too many missing elements.
    ///
    /// `axis` selects the axes to prune as in [`Larry::vacuum`]: with
    /// `Some(0)` the missing data of each column is counted and columns
    /// are cut, and `None` prunes every axis. A position is kept if its count of non missing elements exceeds
    /// `(1 - fraction)` times the size of its slice.
    pub fn cut_missing(&self, fraction: f64, axis: Option<usize>) -> LarryResult<Self>
    {
        let axes = self.target_axes(axis)?;
        let picks = (0..self.ndim())
            .map(|ax| {
                if axes.contains(&ax) {
                    Some(self.positions_with_data(ax, |size| (1. - fraction) * size as f64))
                } else {
                    None
                }
            })
            .collect();
        Ok(self.select_positions(picks))
    }
}
