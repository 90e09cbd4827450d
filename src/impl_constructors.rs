// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Constructor methods for labeled arrays.

use std::sync::Arc;

use ndarray::{Array, ArrayD, Dimension, IxDyn};

use crate::error::{duplicate_label, from_kind, ErrorKind};
use crate::label::{default_labels, first_duplicate};
use crate::{Label, Larry, LarryResult};

/// Check the label invariants of a data block with shape `shape`.
pub(crate) fn validate(shape: &[usize], labels: &[Arc<Vec<Label>>]) -> LarryResult<()>
{
    if labels.len() != shape.len() {
        return Err(from_kind(
            ErrorKind::LabelCount,
            format!("{} label lists for a {}d array", labels.len(), shape.len()),
        ));
    }
    for (axis, (list, &len)) in labels.iter().zip(shape).enumerate() {
        if list.len() != len {
            return Err(from_kind(
                ErrorKind::LabelLength,
                format!("axis {}: {} labels for length {}", axis, list.len(), len),
            ));
        }
        if let Some((label, count)) = first_duplicate(list) {
            return Err(duplicate_label(axis, label, count));
        }
    }
    Ok(())
}

impl<A> Larry<A>
{
    /// Create a labeled array from a data block and one label list per
    /// axis.
    ///
    /// **Errors** with `LabelCount` if the number of label lists differs
    /// from the number of axes, `LabelLength` if a label list does not
    /// match the length of its axis, and `DuplicateLabel` if an axis has a
    /// repeated label.
    ///
    /// ```
    /// use larry::prelude::*;
    /// use ndarray::array;
    ///
    /// let lar = Larry::new(array![[1., 2.], [3., 4.]], labels![["a", "b"], [1, 2]]).unwrap();
    /// assert_eq!(lar.shape(), &[2, 2]);
    ///
    /// let err = Larry::new(array![1., 2.], labels![["a", "a"]]).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::DuplicateLabel);
    /// ```
    pub fn new<D>(data: Array<A, D>, labels: Vec<Vec<Label>>) -> LarryResult<Self>
    where D: Dimension
    {
        Self::from_parts(data.into_dyn(), labels.into_iter().map(Arc::new).collect())
    }

    /// Create a labeled array with the default labels `0..n` on every axis.
    pub fn from_array<D>(data: Array<A, D>) -> Self
    where D: Dimension
    {
        let data = data.into_dyn();
        let labels = data
            .shape()
            .iter()
            .map(|&n| Arc::new(default_labels(n)))
            .collect();
        Larry { data, labels }
    }

    /// Create a one dimensional labeled array.
    ///
    /// ```
    /// use larry::prelude::*;
    ///
    /// let lar = Larry::from_vec(vec![1, 2], labels![["a", "b"]]).unwrap();
    /// assert_eq!(lar.get(&["b".into()]).unwrap(), 2);
    /// ```
    pub fn from_vec(v: Vec<A>, labels: Vec<Vec<Label>>) -> LarryResult<Self>
    {
        Self::new(Array::from(v), labels)
    }

    /// Create a labeled array of the given shape from a vector in row
    /// major order, with default labels.
    ///
    /// **Errors** with `InvalidData` if the length of `v` does not match
    /// the shape.
    pub fn from_shape_vec(shape: &[usize], v: Vec<A>) -> LarryResult<Self>
    {
        let data = ArrayD::from_shape_vec(IxDyn(shape), v)?;
        Ok(Self::from_array(data))
    }

    /// Create a labeled array filled with `elem`.
    pub fn from_elem(labels: Vec<Vec<Label>>, elem: A) -> LarryResult<Self>
    where A: Clone
    {
        let shape: Vec<usize> = labels.iter().map(Vec::len).collect();
        Self::new(ArrayD::from_elem(IxDyn(&shape), elem), labels)
    }

    pub(crate) fn from_parts(data: ArrayD<A>, labels: Vec<Arc<Vec<Label>>>) -> LarryResult<Self>
    {
        validate(data.shape(), &labels)?;
        Ok(Larry { data, labels })
    }

    /// Wrap parts that are valid by construction.
    pub(crate) fn from_parts_unchecked(data: ArrayD<A>, labels: Vec<Arc<Vec<Label>>>) -> Self
    {
        debug_assert_eq!(validate(data.shape(), &labels), Ok(()));
        Larry { data, labels }
    }

    /// Return a new labeled array with the labels of `self` and the data
    /// block `data`, which must have the same shape.
    pub(crate) fn with_data<B>(&self, data: ArrayD<B>) -> Larry<B>
    {
        debug_assert_eq!(data.shape(), self.data.shape());
        Larry {
            data,
            labels: self.labels.clone(),
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::label::to_labels;
    use ndarray::array;

    #[test]
    fn label_count_and_length()
    {
        let err = Larry::new(array![[1, 2]], vec![to_labels([0])]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LabelCount);
        let err = Larry::new(array![[1, 2]], vec![to_labels([0]), to_labels([0, 1, 2])]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LabelLength);
        assert!(err.to_string().contains("axis 1"));
    }

    #[test]
    fn duplicate_names_axis_and_count()
    {
        let err = Larry::new(array![[1, 2, 3]], vec![to_labels([0]), to_labels(["x", "y", "x"])]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateLabel);
        assert!(err.to_string().contains("axis 1"));
        assert!(err.to_string().contains("2 labels named `x`"));
    }

    #[test]
    fn default_labels_per_axis()
    {
        let lar = Larry::from_array(array![[1, 2, 3], [4, 5, 6]]);
        assert_eq!(lar.label(1).unwrap(), &to_labels([0, 1, 2])[..]);
        let lar = Larry::from_shape_vec(&[2, 2], vec![1., 2., 3., 4.]).unwrap();
        assert_eq!(lar.shape(), &[2, 2]);
        assert_eq!(
            Larry::from_shape_vec(&[3], vec![1.]).unwrap_err().kind(),
            ErrorKind::InvalidData
        );
    }
}
