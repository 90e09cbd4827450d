// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Positional and label based indexing.

use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};
use std::sync::Arc;

use itertools::Itertools;
use ndarray::{ArrayBase, Axis, Data, Dimension, Ix0, IxDyn, Slice, Zip};

use crate::align::select_axes;
use crate::error::{from_kind, ErrorKind};
use crate::{Condition, Element, Item, Label, Larry, LarryResult};

/// An index along one axis.
///
/// Negative positions count from the end of the axis. Ranges follow
/// `ndarray` slicing: a negative step walks the selected range backwards.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisIndex
{
    /// A single position; the axis is removed from the result.
    Pos(isize),
    /// Gather the listed positions, in order.
    List(Vec<isize>),
    /// Keep the positions where the mask is `true`. The mask must be as
    /// long as the axis.
    Mask(Vec<bool>),
    Range(Slice),
}

macro_rules! pos_from {
    ($($t:ty),*) => {
        $(
        impl From<$t> for AxisIndex
        {
            #[inline]
            fn from(i: $t) -> Self
            {
                AxisIndex::Pos(i as isize)
            }
        }

        impl From<Vec<$t>> for AxisIndex
        {
            fn from(v: Vec<$t>) -> Self
            {
                AxisIndex::List(v.into_iter().map(|i| i as isize).collect())
            }
        }
        )*
    };
}

pos_from!(isize, usize, i32);

macro_rules! range_from {
    ($($r:ty),*) => {
        $(
        impl From<$r> for AxisIndex
        {
            #[inline]
            fn from(r: $r) -> Self
            {
                AxisIndex::Range(Slice::from(r))
            }
        }
        )*
    };
}

range_from!(
    Range<isize>, RangeFrom<isize>, RangeTo<isize>, RangeInclusive<isize>, RangeToInclusive<isize>,
    Range<usize>, RangeFrom<usize>, RangeTo<usize>, RangeInclusive<usize>, RangeToInclusive<usize>,
    Range<i32>, RangeFrom<i32>, RangeTo<i32>, RangeInclusive<i32>, RangeToInclusive<i32>,
    RangeFull
);

impl From<Vec<bool>> for AxisIndex
{
    fn from(mask: Vec<bool>) -> Self
    {
        AxisIndex::Mask(mask)
    }
}

impl From<Slice> for AxisIndex
{
    fn from(s: Slice) -> Self
    {
        AxisIndex::Range(s)
    }
}

/// Positions selected along one axis.
#[derive(Debug, PartialEq)]
struct Resolved
{
    positions: Vec<usize>,
    /// The axis is removed from the result.
    drop: bool,
}

fn out_of_bounds(axis: usize, index: isize, len: usize) -> crate::LarryError
{
    from_kind(
        ErrorKind::IndexOutOfBounds,
        format!("index {} is out of bounds for axis {} with length {}", index, axis, len),
    )
}

/// Resolve a possibly negative position.
fn abs_position(axis: usize, index: isize, len: usize) -> LarryResult<usize>
{
    let abs = if index < 0 { index + len as isize } else { index };
    if abs < 0 || abs as usize >= len {
        Err(out_of_bounds(axis, index, len))
    } else {
        Ok(abs as usize)
    }
}

/// Positions of a slice along an axis of length `len`.
fn slice_positions(axis: usize, s: Slice, len: usize) -> LarryResult<Vec<usize>>
{
    if s.step == 0 {
        return Err(from_kind(ErrorKind::InvalidArgument, "slice step must not be zero"));
    }
    let bound = |i: isize| -> LarryResult<usize> {
        let abs = if i < 0 { i + len as isize } else { i };
        if abs < 0 || abs as usize > len {
            Err(out_of_bounds(axis, i, len))
        } else {
            Ok(abs as usize)
        }
    };
    let start = bound(s.start)?;
    let end = bound(s.end.unwrap_or(len as isize))?.max(start);
    let step = s.step.unsigned_abs();
    let range = start..end;
    Ok(if s.step > 0 {
        range.step_by(step).collect()
    } else {
        range.rev().step_by(step).collect()
    })
}

impl AxisIndex
{
    fn resolve(&self, axis: usize, len: usize) -> LarryResult<Resolved>
    {
        let (positions, drop) = match self {
            AxisIndex::Pos(i) => (vec![abs_position(axis, *i, len)?], true),
            AxisIndex::List(list) => (
                list.iter()
                    .map(|&i| abs_position(axis, i, len))
                    .collect::<LarryResult<_>>()?,
                false,
            ),
            AxisIndex::Mask(mask) => {
                if mask.len() != len {
                    return Err(from_kind(
                        ErrorKind::IndexOutOfBounds,
                        format!("mask of length {} for axis {} with length {}", mask.len(), axis, len),
                    ));
                }
                (mask.iter().positions(|&m| m).collect(), false)
            }
            AxisIndex::Range(s) => (slice_positions(axis, *s, len)?, false),
        };
        Ok(Resolved { positions, drop })
    }
}

/// # Indexing
impl<A> Larry<A>
{
    /// Resolve `index` against every axis; missing trailing entries select
    /// the whole axis.
    fn resolve_index(&self, index: &[AxisIndex]) -> LarryResult<Vec<Resolved>>
    {
        if index.len() > self.ndim() {
            return Err(from_kind(
                ErrorKind::IndexOutOfBounds,
                format!("{} indices for a {}d array", index.len(), self.ndim()),
            ));
        }
        let full = AxisIndex::Range(Slice::from(..));
        self.shape()
            .iter()
            .enumerate()
            .map(|(axis, &len)| index.get(axis).unwrap_or(&full).resolve(axis, len))
            .collect()
    }

    /// Select with one [`AxisIndex`] per leading axis.
    ///
    /// Axes indexed by a single position are removed; every other axis
    /// keeps the labels of the selected positions, in selection order. If
    /// every axis is removed the element itself is returned.
    ///
    /// **Errors** with `IndexOutOfBounds` for a position outside its axis,
    /// a mask of the wrong length or more indices than axes, and with
    /// `DuplicateLabel` if a list repeats a position.
    ///
    /// ```
    /// use larry::prelude::*;
    ///
    /// let lar = Larry::from_vec(vec![1., 2., 3.], labels![["a", "b", "c"]]).unwrap();
    /// let tail = lar.get_item(&idx![1..]).unwrap().into_larry().unwrap();
    /// assert_eq!(tail.label(0).unwrap(), &[Label::from("b"), Label::from("c")]);
    /// assert_eq!(lar.get_item(&idx![-1]).unwrap(), Item::Scalar(3.));
    /// ```
    pub fn get_item(&self, index: &[AxisIndex]) -> LarryResult<Item<A>>
    where A: Clone
    {
        let resolved = self.resolve_index(index)?;
        let picks: Vec<Option<&[usize]>> = resolved
            .iter()
            .zip(self.shape())
            .map(|(r, &len)| {
                if !r.drop && r.positions.iter().copied().eq(0..len) {
                    None
                } else {
                    Some(&r.positions[..])
                }
            })
            .collect();
        let mut data = select_axes(self.data.view(), &picks);
        for (axis, r) in resolved.iter().enumerate().rev() {
            if r.drop {
                data = data.index_axis_move(Axis(axis), 0);
            }
        }
        if data.ndim() == 0 {
            return Ok(Item::Scalar(data.into_dimensionality::<Ix0>()?.into_scalar()));
        }
        let labels = resolved
            .iter()
            .zip(picks)
            .enumerate()
            .filter(|(_, (r, _))| !r.drop)
            .map(|(axis, (r, pick))| match pick {
                None => self.labels[axis].clone(),
                Some(_) => Arc::new(r.positions.iter().map(|&p| self.labels[axis][p].clone()).collect()),
            })
            .collect();
        Larry::from_parts(data, labels).map(Item::Array)
    }

    /// Set every element selected by `index` to `value`.
    ///
    /// The whole index is checked before the first write, so on error the
    /// array is unchanged.
    pub fn set_item(&mut self, index: &[AxisIndex], value: A) -> LarryResult<()>
    where A: Clone
    {
        let resolved = self.resolve_index(index)?;
        for pos in resolved
            .iter()
            .map(|r| r.positions.iter().copied())
            .multi_cartesian_product()
        {
            if let Some(x) = self.data.get_mut(&pos[..]) {
                *x = value.clone();
            }
        }
        Ok(())
    }

    /// Write `value` into the elements selected by `index`.
    ///
    /// `value` is broadcast to the shape of the selection, which is the
    /// shape [`Larry::get_item`] would return for `index`. The labels are
    /// not touched.
    ///
    /// **Errors** with `InvalidArgument` if `value` does not broadcast to
    /// the selection; nothing is written in that case.
    ///
    /// ```
    /// use larry::prelude::*;
    /// use ndarray::array;
    ///
    /// let mut lar = Larry::new(array![[1, 2, 3], [4, 5, 6]], labels![["a", "b"], [1, 2, 3]]).unwrap();
    /// lar.assign_item(&idx![.., 1..], &array![[20, 30], [50, 60]]).unwrap();
    /// assert_eq!(lar.data(), &array![[1, 20, 30], [4, 50, 60]].into_dyn());
    /// lar.assign_item(&idx![0], &array![7, 8, 9]).unwrap();
    /// assert_eq!(lar.data().as_slice().unwrap(), &[7, 8, 9, 4, 50, 60]);
    /// ```
    pub fn assign_item<S, E>(&mut self, index: &[AxisIndex], value: &ArrayBase<S, E>) -> LarryResult<()>
    where
        A: Clone,
        S: Data<Elem = A>,
        E: Dimension,
    {
        let resolved = self.resolve_index(index)?;
        let shape: Vec<usize> = resolved
            .iter()
            .filter(|r| !r.drop)
            .map(|r| r.positions.len())
            .collect();
        let value = value.broadcast(IxDyn(&shape)).ok_or_else(|| {
            from_kind(
                ErrorKind::InvalidArgument,
                format!("cannot broadcast value of shape {:?} to selection of shape {:?}", value.shape(), shape),
            )
        })?;
        let targets = resolved
            .iter()
            .map(|r| r.positions.iter().copied())
            .multi_cartesian_product();
        for (pos, x) in targets.zip(value.iter()) {
            if let Some(dst) = self.data.get_mut(&pos[..]) {
                *dst = x.clone();
            }
        }
        Ok(())
    }

    /// Return the position of the label `name` along `axis`.
    ///
    /// With `exact` false and `name` absent, return the last position whose
    /// label is not greater than `name`.
    ///
    /// **Errors** with `AxisOutOfBounds` for a bad axis and `LabelNotFound`
    /// if no position qualifies.
    ///
    /// ```
    /// use larry::prelude::*;
    ///
    /// let lar = Larry::from_vec(vec![1., 2., 3.], labels![[1, 3, 5]]).unwrap();
    /// assert_eq!(lar.label_index(&Label::from(3), 0, true).unwrap(), 1);
    /// assert_eq!(lar.label_index(&Label::from(4), 0, false).unwrap(), 1);
    /// assert!(lar.label_index(&Label::from(0), 0, false).is_err());
    /// ```
    pub fn label_index(&self, name: &Label, axis: usize, exact: bool) -> LarryResult<usize>
    {
        let labels = self.label(axis)?;
        let found = match labels.iter().position(|l| l == name) {
            Some(i) => Some(i),
            None if exact => None,
            None => labels.iter().rposition(|l| l <= name),
        };
        found.ok_or_else(|| {
            from_kind(
                ErrorKind::LabelNotFound,
                format!("label `{}` not found along axis {}", name, axis),
            )
        })
    }

    fn cell(&self, names: &[Label], exact: bool) -> LarryResult<Vec<usize>>
    {
        if names.len() != self.ndim() {
            return Err(from_kind(
                ErrorKind::InvalidArgument,
                format!("{} labels given for a {}d array, need one per axis", names.len(), self.ndim()),
            ));
        }
        names
            .iter()
            .enumerate()
            .map(|(axis, name)| self.label_index(name, axis, exact))
            .collect()
    }

    /// Return the element with one label per axis.
    ///
    /// **Errors** with `InvalidArgument` unless `names` has one label per
    /// axis, and with `LabelNotFound` for an unknown label.
    pub fn get(&self, names: &[Label]) -> LarryResult<A>
    where A: Clone
    {
        let pos = self.cell(names, true)?;
        Ok(self.data[&pos[..]].clone())
    }

    /// Like [`Larry::get`], resolving each label with the nearest smaller
    /// rule of [`Larry::label_index`].
    pub fn get_asof(&self, names: &[Label]) -> LarryResult<A>
    where A: Clone
    {
        let pos = self.cell(names, false)?;
        Ok(self.data[&pos[..]].clone())
    }

    /// Set the element with one label per axis.
    pub fn set(&mut self, names: &[Label], value: A) -> LarryResult<()>
    {
        let pos = self.cell(names, true)?;
        self.data[&pos[..]] = value;
        Ok(())
    }

    /// Select the label `name` along `axis`, removing that axis.
    ///
    /// A one dimensional array yields the element itself.
    ///
    /// ```
    /// use larry::prelude::*;
    /// use ndarray::array;
    ///
    /// let lar = Larry::new(array![[1, 2], [3, 4]], labels![["r0", "r1"], ["c0", "c1"]]).unwrap();
    /// let row = lar.pull(&"r0".into(), 0).unwrap().into_larry().unwrap();
    /// assert_eq!(row.label(0).unwrap(), &[Label::from("c0"), Label::from("c1")]);
    /// assert_eq!(row.data().as_slice().unwrap(), &[1, 2]);
    /// ```
    pub fn pull(&self, name: &Label, axis: usize) -> LarryResult<Item<A>>
    where A: Clone
    {
        let pos = self.label_index(name, axis, true)?;
        let data = self.data.index_axis(Axis(axis), pos).to_owned();
        if data.ndim() == 0 {
            return Ok(Item::Scalar(data.into_dimensionality::<Ix0>()?.into_scalar()));
        }
        Ok(Item::Array(Larry::from_parts_unchecked(data, self.labels_without(axis))))
    }

    /// Keep the labels along `axis` that satisfy `cond`, with their data.
    ///
    /// ```
    /// use larry::prelude::*;
    ///
    /// let lar = Larry::from_vec(vec![1, 2, 3, 4], labels![["a", "b", "c", "d"]]).unwrap();
    /// let kept = lar.keep_label(&Condition::Cmp(CmpOp::Lt, "c".into()), 0).unwrap();
    /// assert_eq!(kept.data().as_slice().unwrap(), &[1, 2]);
    /// ```
    pub fn keep_label(&self, cond: &Condition<Label>, axis: usize) -> LarryResult<Self>
    where A: Clone
    {
        let labels = self.label(axis)?;
        let positions: Vec<usize> = labels.iter().positions(|l| cond.test(l)).collect();
        let kept = positions.iter().map(|&p| labels[p].clone()).collect();
        let data = self.data.select(Axis(axis), &positions);
        Ok(Larry::from_parts_unchecked(data, self.labels_with(axis, kept)))
    }

    /// Replace the elements that fail `cond` by the missing marker,
    /// promoting integers to floats. With `vacuum`, rows and columns left
    /// without any non missing element are removed.
    ///
    /// **Errors** with `NotTwoDimensional` if `vacuum` is requested for an
    /// array that is not two dimensional.
    pub fn keep_x(&self, cond: &Condition<A>, vacuum: bool) -> LarryResult<Larry<A::Filled>>
    where A: Element + PartialOrd
    {
        if vacuum {
            self.require_2d()?;
        }
        let kept = self.with_data(self.data.map(|x| {
            if cond.test(x) {
                x.clone().into_filled()
            } else {
                crate::Missing::missing()
            }
        }));
        if vacuum {
            kept.vacuum(None)
        } else {
            Ok(kept)
        }
    }

    /// Set the elements where `mask` is `true` to `value`.
    ///
    /// **Errors** with `Unaligned` unless `mask` has exactly the labels of
    /// `self`.
    pub fn assign_where(&mut self, mask: &Larry<bool>, value: A) -> LarryResult<()>
    where A: Clone
    {
        if !self.is_aligned_with(mask) {
            return Err(from_kind(ErrorKind::Unaligned, "indexing with a labeled mask that is not aligned"));
        }
        Zip::from(&mut self.data).and(&mask.data).for_each(|x, &m| {
            if m {
                *x = value.clone();
            }
        });
        Ok(())
    }
}
