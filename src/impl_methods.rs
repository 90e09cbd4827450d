// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::sync::Arc;

use ndarray::{ArrayD, ArrayViewMutD, Axis};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{axis_out_of_bounds, from_kind, not_2d, ErrorKind};
use crate::impl_constructors::validate;
use crate::stats::shuffle_axis;
use crate::{Element, Kind, Label, Larry, LarryResult};

/// # Methods For All Labeled Arrays
impl<A> Larry<A>
{
    /// Return the shape of the data block.
    pub fn shape(&self) -> &[usize]
    {
        self.data.shape()
    }

    /// Return the number of axes.
    pub fn ndim(&self) -> usize
    {
        self.data.ndim()
    }

    /// Return the total number of elements.
    pub fn size(&self) -> usize
    {
        self.data.len()
    }

    /// Return the kind of the elements.
    pub fn kind(&self) -> Kind
    where A: Element
    {
        A::KIND
    }

    /// Return the number of finite (non missing) elements.
    pub fn nx(&self) -> usize
    where A: Element
    {
        self.data.iter().filter(|x| x.is_finite()).count()
    }

    /// Return a reference to the data block.
    pub fn data(&self) -> &ArrayD<A>
    {
        &self.data
    }

    /// Return a copy of the data block.
    pub fn to_data(&self) -> ArrayD<A>
    where A: Clone
    {
        self.data.clone()
    }

    /// Return a mutable view of the data block.
    ///
    /// The view cannot change the shape, so the labels stay valid.
    pub fn data_view_mut(&mut self) -> ArrayViewMutD<'_, A>
    {
        self.data.view_mut()
    }

    pub fn into_data(self) -> ArrayD<A>
    {
        self.data
    }

    /// Return the data block and the label lists.
    pub fn into_parts(self) -> (ArrayD<A>, Vec<Vec<Label>>)
    {
        let labels = self
            .labels
            .into_iter()
            .map(|l| Arc::try_unwrap(l).unwrap_or_else(|shared| (*shared).clone()))
            .collect();
        (self.data, labels)
    }

    /// Return the labels of `axis`.
    ///
    /// **Errors** with `AxisOutOfBounds` if `axis` is not an axis of the array.
    pub fn label(&self, axis: usize) -> LarryResult<&[Label]>
    {
        self.check_axis(axis)?;
        Ok(&self.labels[axis])
    }

    /// Return a copy of the labels of `axis`.
    pub fn to_label(&self, axis: usize) -> LarryResult<Vec<Label>>
    {
        self.label(axis).map(<[Label]>::to_vec)
    }

    /// Iterate over the label lists, one per axis.
    pub fn labels(&self) -> impl ExactSizeIterator<Item = &[Label]> + '_
    {
        self.labels.iter().map(|l| &l[..])
    }

    /// Return a copy of all label lists.
    pub fn to_labels(&self) -> Vec<Vec<Label>>
    {
        self.labels.iter().map(|l| l.to_vec()).collect()
    }

    /// Replace the labels of `axis` in place.
    ///
    /// **Errors** if `labels` has the wrong length or repeats a label; the
    /// array is unchanged in that case.
    pub fn set_label(&mut self, axis: usize, labels: Vec<Label>) -> LarryResult<()>
    {
        self.check_axis(axis)?;
        let mut candidate = self.labels.clone();
        candidate[axis] = Arc::new(labels);
        validate(self.data.shape(), &candidate)?;
        self.labels = candidate;
        Ok(())
    }

    /// Return a copy of the array.
    ///
    /// This is `clone`: the data block is copied, and the label lists are
    /// shared until either array changes them.
    pub fn copy(&self) -> Self
    where A: Clone
    {
        self.clone()
    }

    /// Reverse the order of the axes, together with their labels.
    pub fn transpose(&self) -> Self
    where A: Clone
    {
        let labels = self.labels.iter().rev().cloned().collect();
        Larry::from_parts_unchecked(self.data.t().to_owned(), labels)
    }

    /// Remove all axes of length one.
    pub fn squeeze(&self) -> Self
    where A: Clone
    {
        let mut data = self.data.clone();
        let mut labels = self.labels.clone();
        for axis in (0..self.ndim()).rev() {
            if self.data.len_of(Axis(axis)) == 1 {
                data = data.index_axis_move(Axis(axis), 0);
                labels.remove(axis);
            }
        }
        Larry::from_parts_unchecked(data, labels)
    }

    /// Apply `f` to every element, keeping the labels.
    ///
    /// ```
    /// use larry::prelude::*;
    ///
    /// let lar = Larry::from_vec(vec![1, 2], labels![["a", "b"]]).unwrap();
    /// let lar = lar.mapv(|x| x as f64 / 2.);
    /// assert_eq!(lar.data().as_slice().unwrap(), &[0.5, 1.]);
    /// ```
    pub fn mapv<B, F>(&self, f: F) -> Larry<B>
    where
        A: Clone,
        F: FnMut(A) -> B,
    {
        self.with_data(self.data.mapv(f))
    }

    /// Apply `f` to the labels of `axis`, or of every axis if `None`.
    ///
    /// **Errors** with `DuplicateLabel` if the mapped labels are not unique.
    pub fn maplabel<F>(&self, mut f: F, axis: Option<usize>) -> LarryResult<Self>
    where
        A: Clone,
        F: FnMut(&Label) -> Label,
    {
        if let Some(axis) = axis {
            self.check_axis(axis)?;
        }
        let labels = self
            .labels
            .iter()
            .enumerate()
            .map(|(i, list)| {
                if axis.map_or(true, |a| a == i) {
                    Arc::new(list.iter().map(&mut f).collect())
                } else {
                    list.clone()
                }
            })
            .collect();
        Larry::from_parts(self.data.clone(), labels)
    }

    /// Return the largest label along `axis`, or along all axes if `None`.
    pub fn maxlabel(&self, axis: Option<usize>) -> LarryResult<Label>
    {
        self.labels_of(axis)?
            .max()
            .cloned()
            .ok_or_else(|| from_kind(ErrorKind::LabelNotFound, "no labels"))
    }

    /// Return the smallest label along `axis`, or along all axes if `None`.
    pub fn minlabel(&self, axis: Option<usize>) -> LarryResult<Label>
    {
        self.labels_of(axis)?
            .min()
            .cloned()
            .ok_or_else(|| from_kind(ErrorKind::LabelNotFound, "no labels"))
    }

    fn labels_of(&self, axis: Option<usize>) -> LarryResult<impl Iterator<Item = &Label> + '_>
    {
        if let Some(axis) = axis {
            self.check_axis(axis)?;
        }
        Ok(self
            .labels
            .iter()
            .enumerate()
            .filter(move |&(i, _)| axis.map_or(true, |a| a == i))
            .flat_map(|(_, list)| list.iter()))
    }

    /// Set every element to `value`.
    pub fn fill_in_place(&mut self, value: A)
    where A: Clone
    {
        self.data.fill(value);
    }

    /// Return a copy with every element set to `value`.
    pub fn filled(&self, value: A) -> Self
    where A: Clone
    {
        self.with_data(ArrayD::from_elem(self.data.raw_dim(), value))
    }

    /// Shuffle the data in place along `axis`, or every element if `None`.
    /// The labels are not changed.
    pub fn shuffle_in_place(&mut self, axis: Option<usize>) -> LarryResult<()>
    where A: Clone
    {
        self.shuffle_in_place_using(axis, &mut rand::rng())
    }

    /// Like `shuffle_in_place`, with an explicit random number generator.
    pub fn shuffle_in_place_using<R>(&mut self, axis: Option<usize>, rng: &mut R) -> LarryResult<()>
    where
        A: Clone,
        R: Rng + ?Sized,
    {
        match axis {
            Some(axis) => {
                self.check_axis(axis)?;
                shuffle_axis(&mut self.data, Axis(axis), rng);
            }
            None => {
                let mut flat: Vec<A> = self.data.iter().cloned().collect();
                flat.shuffle(rng);
                for (dst, src) in self.data.iter_mut().zip(flat) {
                    *dst = src;
                }
            }
        }
        Ok(())
    }

    /// Shuffle the labels of `axis` in place, or of every axis if `None`.
    /// The data is not changed.
    pub fn shuffle_labels_in_place(&mut self, axis: Option<usize>) -> LarryResult<()>
    {
        self.shuffle_labels_in_place_using(axis, &mut rand::rng())
    }

    /// Like `shuffle_labels_in_place`, with an explicit random number generator.
    pub fn shuffle_labels_in_place_using<R>(&mut self, axis: Option<usize>, rng: &mut R) -> LarryResult<()>
    where R: Rng + ?Sized
    {
        if let Some(axis) = axis {
            self.check_axis(axis)?;
        }
        for (i, list) in self.labels.iter_mut().enumerate() {
            if axis.map_or(true, |a| a == i) {
                Arc::make_mut(list).shuffle(rng);
            }
        }
        Ok(())
    }

    pub(crate) fn check_axis(&self, axis: usize) -> LarryResult<()>
    {
        if axis < self.ndim() {
            Ok(())
        } else {
            Err(axis_out_of_bounds(axis, self.ndim()))
        }
    }

    pub(crate) fn require_2d(&self) -> LarryResult<()>
    {
        if self.ndim() == 2 {
            Ok(())
        } else {
            Err(not_2d(self.ndim()))
        }
    }

    /// The label lists with `axis` removed.
    pub(crate) fn labels_without(&self, axis: usize) -> Vec<Arc<Vec<Label>>>
    {
        let mut labels = self.labels.clone();
        labels.remove(axis);
        labels
    }

    /// Replace the labels of one axis, keeping the others shared.
    pub(crate) fn labels_with(&self, axis: usize, list: Vec<Label>) -> Vec<Arc<Vec<Label>>>
    {
        let mut labels = self.labels.clone();
        labels[axis] = Arc::new(list);
        labels
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::label::to_labels;
    use ndarray::array;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn sample() -> Larry<i64>
    {
        Larry::new(array![[1, 2, 3], [4, 5, 6]], vec![to_labels(["a", "b"]), to_labels([1, 2, 3])]).unwrap()
    }

    #[test]
    fn transpose_and_squeeze()
    {
        let t = sample().transpose();
        assert_eq!(t.shape(), &[3, 2]);
        assert_eq!(t.label(0).unwrap(), &to_labels([1, 2, 3])[..]);
        let s = Larry::new(array![[1, 2]], vec![to_labels([0]), to_labels(["x", "y"])])
            .unwrap()
            .squeeze();
        assert_eq!(s.ndim(), 1);
        assert_eq!(s.label(0).unwrap(), &to_labels(["x", "y"])[..]);
    }

    #[test]
    fn maplabel_must_stay_unique()
    {
        let lar = sample();
        let err = lar.maplabel(|_| Label::from(0), Some(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateLabel);
        let ok = lar
            .maplabel(|l| Label::from(l.as_int().unwrap_or(0) * 10), Some(1))
            .unwrap();
        assert_eq!(ok.label(1).unwrap(), &to_labels([10, 20, 30])[..]);
        assert_eq!(ok.maxlabel(Some(1)).unwrap(), Label::from(30));
        assert_eq!(lar.maxlabel(None).unwrap(), Label::from("b"));
        assert_eq!(lar.minlabel(None).unwrap(), Label::from(1));
    }

    #[test]
    fn shuffle_labels_does_not_leak_into_clones()
    {
        let lar = sample();
        let mut other = lar.clone();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..8 {
            other.shuffle_labels_in_place_using(Some(1), &mut rng).unwrap();
        }
        assert_eq!(lar.label(1).unwrap(), &to_labels([1, 2, 3])[..]);
        let mut sorted = other.to_label(1).unwrap();
        sorted.sort();
        assert_eq!(sorted, to_labels([1, 2, 3]));
    }

    #[test]
    fn shuffle_keeps_rows_intact()
    {
        let mut lar = sample();
        lar.shuffle_in_place_using(Some(0), &mut SmallRng::seed_from_u64(1)).unwrap();
        let first: i64 = lar.data().index_axis(Axis(0), 0).sum();
        assert!(first == 6 || first == 15);
        assert_eq!(lar.data().sum(), 21);
    }

    #[test]
    fn set_label_is_checked()
    {
        let mut lar = sample();
        assert!(lar.set_label(0, to_labels(["x", "x"])).is_err());
        assert_eq!(lar.label(0).unwrap(), &to_labels(["a", "b"])[..]);
        lar.set_label(0, to_labels(["x", "y"])).unwrap();
        assert_eq!(lar.label(0).unwrap(), &to_labels(["x", "y"])[..]);
        assert_eq!(lar.set_label(2, vec![]).unwrap_err().kind(), ErrorKind::AxisOutOfBounds);
    }
}
