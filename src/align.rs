// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Alignment of two labeled arrays to a common label space.

use std::sync::Arc;

use log::{debug, trace};
use ndarray::{ArrayD, ArrayViewD, Axis};

use crate::error::{dimension_mismatch, from_kind, ErrorKind};
use crate::label::position_map;
use crate::{Label, Larry, LarryResult};

/// How one axis of both operands is mapped onto the common label list.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum AxisPlan
{
    /// Both label lists are equal; positions map to themselves.
    Identity,
    /// Sorted intersection with the positions of every common label in
    /// each operand.
    Select
    {
        lhs: Vec<usize>,
        rhs: Vec<usize>,
        labels: Vec<Label>,
    },
}

/// Plan the alignment of a single axis.
pub(crate) fn plan_axis(axis: usize, a: &[Label], b: &[Label]) -> LarryResult<AxisPlan>
{
    if a == b {
        return Ok(AxisPlan::Identity);
    }
    let in_b = position_map(b);
    let mut common: Vec<(&Label, usize, usize)> = a
        .iter()
        .enumerate()
        .filter_map(|(ia, label)| in_b.get(label).map(|&ib| (label, ia, ib)))
        .collect();
    if common.is_empty() {
        return Err(from_kind(ErrorKind::NoOverlap, format!("no matching labels on axis {}", axis)));
    }
    common.sort_unstable_by(|x, y| x.0.cmp(y.0));
    trace!("axis {}: {} of {} x {} labels in common", axis, common.len(), a.len(), b.len());
    let mut lhs = Vec::with_capacity(common.len());
    let mut rhs = Vec::with_capacity(common.len());
    let mut labels = Vec::with_capacity(common.len());
    for (label, ia, ib) in common {
        labels.push(label.clone());
        lhs.push(ia);
        rhs.push(ib);
    }
    Ok(AxisPlan::Select { lhs, rhs, labels })
}

/// Gather positions along several axes at once.
///
/// `picks[i]` is `None` to keep axis `i` as it is.
pub(crate) fn select_axes<A: Clone>(view: ArrayViewD<'_, A>, picks: &[Option<&[usize]>]) -> ArrayD<A>
{
    let mut out: Option<ArrayD<A>> = None;
    for (i, pick) in picks.iter().enumerate() {
        if let Some(positions) = pick {
            out = Some(match out {
                None => view.select(Axis(i), positions),
                Some(data) => data.select(Axis(i), positions),
            });
        }
    }
    out.unwrap_or_else(|| view.to_owned())
}

/// Both operands reindexed to their common labels.
#[derive(Debug)]
pub(crate) struct Aligned<A, B>
{
    pub lhs: ArrayD<A>,
    pub rhs: ArrayD<B>,
    pub labels: Vec<Arc<Vec<Label>>>,
}

/// Align `a` and `b` on every axis.
///
/// Axes with identical labels keep their order; every other axis becomes
/// the sorted intersection of both label lists.
pub(crate) fn align<A, B>(a: &Larry<A>, b: &Larry<B>) -> LarryResult<Aligned<A, B>>
where
    A: Clone,
    B: Clone,
{
    if a.ndim() != b.ndim() {
        return Err(dimension_mismatch(a.ndim(), b.ndim()));
    }
    let plans = a
        .labels
        .iter()
        .zip(&b.labels)
        .enumerate()
        .map(|(axis, (la, lb))| {
            if Arc::ptr_eq(la, lb) {
                Ok(AxisPlan::Identity)
            } else {
                plan_axis(axis, la, lb)
            }
        })
        .collect::<LarryResult<Vec<_>>>()?;

    let mut lhs_picks = Vec::with_capacity(plans.len());
    let mut rhs_picks = Vec::with_capacity(plans.len());
    let mut labels = Vec::with_capacity(plans.len());
    for (axis, plan) in plans.iter().enumerate() {
        match plan {
            AxisPlan::Identity => {
                lhs_picks.push(None);
                rhs_picks.push(None);
                labels.push(a.labels[axis].clone());
            }
            AxisPlan::Select { lhs, rhs, labels: common } => {
                debug!("aligning axis {}: {} common labels", axis, common.len());
                lhs_picks.push(Some(&lhs[..]));
                rhs_picks.push(Some(&rhs[..]));
                labels.push(Arc::new(common.clone()));
            }
        }
    }
    Ok(Aligned {
        lhs: select_axes(a.data.view(), &lhs_picks),
        rhs: select_axes(b.data.view(), &rhs_picks),
        labels,
    })
}

impl<A> Larry<A>
{
    /// Return `true` if `other` carries exactly the same labels, in the
    /// same order, on every axis.
    ///
    /// Binary operations between such arrays take the fast path and never
    /// build index lists. When the same pair is combined many times, align
    /// it once with [`Larry::align`] and check this before each use.
    ///
    /// ```
    /// use larry::prelude::*;
    ///
    /// let a = Larry::from_vec(vec![1., 2., 3.], labels![["a", "b", "c"]]).unwrap();
    /// let b = Larry::from_vec(vec![4., 5.], labels![["c", "b"]]).unwrap();
    /// assert!(!a.is_aligned_with(&b));
    /// let (a, b) = a.align(&b).unwrap();
    /// assert!(a.is_aligned_with(&b));
    /// ```
    pub fn is_aligned_with<B>(&self, other: &Larry<B>) -> bool
    {
        self.labels.len() == other.labels.len()
            && self
                .labels
                .iter()
                .zip(&other.labels)
                .all(|(a, b)| Arc::ptr_eq(a, b) || a == b)
    }

    /// Align `self` and `other` and return both reindexed copies.
    ///
    /// Axes whose labels are identical keep their order. Every other axis
    /// is reduced to the sorted intersection of the two label lists.
    ///
    /// An axis that is not already aligned costs a hash lookup per label of
    /// the union of both label lists, plus a gather of the whole data
    /// block: `O(union length × product of the other axis lengths)` for
    /// each such axis. Every binary operation between unaligned arrays pays
    /// this again, so repeated operations on the same large pair should
    /// align once and then combine the aligned copies, which
    /// [`Larry::is_aligned_with`] confirms take the fast path.
    ///
    /// **Errors** with `DimensionMismatch` if the arrays have a different
    /// number of axes, and `NoOverlap` if an axis has no label in common.
    ///
    /// ```
    /// use larry::prelude::*;
    ///
    /// let a = Larry::from_vec(vec![1, 2, 3], labels![["a", "b", "c"]]).unwrap();
    /// let b = Larry::from_vec(vec![10, 20, 30], labels![["d", "c", "b"]]).unwrap();
    /// let (a2, b2) = a.align(&b).unwrap();
    /// assert_eq!(a2.label(0).unwrap(), &labels![["b", "c"]][0][..]);
    /// assert_eq!(a2.data().as_slice().unwrap(), &[2, 3]);
    /// assert_eq!(b2.data().as_slice().unwrap(), &[30, 20]);
    /// ```
    pub fn align<B>(&self, other: &Larry<B>) -> LarryResult<(Larry<A>, Larry<B>)>
    where
        A: Clone,
        B: Clone,
    {
        let Aligned { lhs, rhs, labels } = align(self, other)?;
        Ok((
            Larry::from_parts_unchecked(lhs, labels.clone()),
            Larry::from_parts_unchecked(rhs, labels),
        ))
    }
}
