// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Flattening to tuple labels and back.

use std::sync::Arc;

use ndarray::{Array1, ArrayD, IxDyn, Order};

use crate::error::{from_kind, ErrorKind};
use crate::label::{flatten_labels, position_map, unique_in_order};
use crate::{Element, Kind, Label, Larry, LarryResult, Missing};

/// Rebuild an array from `(label tuple, value)` pairs of equal arity.
///
/// Each axis lists its labels in order of first appearance; combinations
/// that do not occur hold the missing marker, and a repeated combination
/// keeps its last value.
fn from_pairs<'a, A, I>(pairs: I, arity: usize) -> LarryResult<Larry<A::Filled>>
where
    A: Element,
    I: Iterator<Item = (&'a [Label], A)> + Clone,
{
    let axes: Vec<Vec<Label>> = (0..arity)
        .map(|k| unique_in_order(pairs.clone().map(|(tuple, _)| tuple[k].clone())))
        .collect();
    let positions: Vec<_> = axes.iter().map(|labels| position_map(labels)).collect();
    let shape: Vec<usize> = axes.iter().map(Vec::len).collect();
    let mut data = ArrayD::from_elem(IxDyn(&shape), <A::Filled as Missing>::missing());
    let mut index = vec![0; arity];
    for (tuple, value) in pairs {
        for (k, label) in tuple.iter().enumerate() {
            index[k] = positions[k][label];
        }
        data[&index[..]] = value.into_filled();
    }
    Ok(Larry::from_parts_unchecked(data, axes.into_iter().map(Arc::new).collect()))
}

/// Check that every label is a tuple of the same, nonzero arity.
fn tuple_arity(labels: &[Label]) -> LarryResult<usize>
{
    let not_tuples = || from_kind(ErrorKind::Unflattenable, "labels must be tuples of equal length");
    let arity = labels
        .first()
        .and_then(Label::as_tuple)
        .map(<[Label]>::len)
        .ok_or_else(not_tuples)?;
    if arity == 0 || labels.iter().any(|l| l.as_tuple().map(<[Label]>::len) != Some(arity)) {
        return Err(not_tuples());
    }
    Ok(arity)
}

/// # Flattening
impl<A: Clone> Larry<A>
{
    /// Collapse every axis into one, in row major (`RowMajor`) or column
    /// major (`ColumnMajor`) order. Each label becomes the tuple of the
    /// labels of the element along every original axis.
    ///
    /// ```
    /// use larry::prelude::*;
    /// use ndarray::array;
    ///
    /// let lar = Larry::new(array![[1, 2], [3, 4]], labels![["a", "b"], ["c", "d"]]).unwrap();
    /// let flat = lar.flatten(Order::RowMajor);
    /// assert_eq!(flat.label(0).unwrap()[1], Label::from(("a", "d")));
    /// assert_eq!(flat.data().as_slice().unwrap(), &[1, 2, 3, 4]);
    ///
    /// let flat = lar.flatten(Order::ColumnMajor);
    /// assert_eq!(flat.label(0).unwrap()[1], Label::from(("b", "c")));
    /// assert_eq!(flat.data().as_slice().unwrap(), &[1, 3, 2, 4]);
    /// ```
    pub fn flatten(&self, order: Order) -> Self
    {
        let values: Vec<A> = if order == Order::ColumnMajor {
            self.data.t().iter().cloned().collect()
        } else {
            self.data.iter().cloned().collect()
        };
        let labels = flatten_labels(&self.labels, order);
        Larry::from_parts_unchecked(Array1::from(values).into_dyn(), vec![Arc::new(labels)])
    }

    /// Return the `(label tuple, element)` pairs of the array in row major
    /// order.
    pub fn to_tuples(&self) -> Vec<(Vec<Label>, A)>
    {
        let flat = self.flatten(Order::RowMajor);
        flat.labels[0]
            .iter()
            .zip(flat.data.iter())
            .map(|(label, x)| (label.as_tuple().map(<[Label]>::to_vec).unwrap_or_default(), x.clone()))
            .collect()
    }

    /// Return the elements in row major order together with their tuple
    /// labels.
    pub fn to_list(&self) -> (Vec<A>, Vec<Label>)
    {
        let flat = self.flatten(Order::RowMajor);
        let labels = flat.labels[0].to_vec();
        (flat.data.into_iter().collect(), labels)
    }
}

impl<A: Element> Larry<A>
{
    /// Undo [`Larry::flatten`].
    ///
    /// The result has one axis per tuple component, whose labels appear in
    /// order of first appearance. Combinations missing from `self` hold the
    /// missing marker, so integer data is promoted to `f64`.
    ///
    /// **Errors** with `Unflattenable` unless `self` is one dimensional
    /// with tuple labels of equal length and elements of a scalar kind.
    pub fn unflatten(&self) -> LarryResult<Larry<A::Filled>>
    {
        if self.ndim() != 1 {
            return Err(from_kind(
                ErrorKind::Unflattenable,
                format!("only 1d arrays can be unflattened, not {}d", self.ndim()),
            ));
        }
        if A::KIND == Kind::Object {
            return Err(from_kind(ErrorKind::Unflattenable, "only scalar kinds can be unflattened"));
        }
        let arity = tuple_arity(&self.labels[0])?;
        let pairs = self.labels[0]
            .iter()
            .zip(self.data.iter())
            .map(|(label, x)| (label.as_tuple().unwrap_or(&[]), x.clone()));
        from_pairs(pairs, arity)
    }

    /// Build an array from `(label tuple, element)` pairs, the inverse of
    /// [`Larry::to_tuples`].
    ///
    /// **Errors** with `InvalidData` if `tuples` is empty or the label
    /// tuples differ in length.
    ///
    /// ```
    /// use larry::prelude::*;
    ///
    /// let tuples = vec![
    ///     (vec!["a".into(), "c".into()], 1i64),
    ///     (vec!["b".into(), "d".into()], 4),
    /// ];
    /// let lar = Larry::from_tuples(tuples).unwrap();
    /// assert_eq!(lar.shape(), &[2, 2]);
    /// assert_eq!(lar.get(&["a".into(), "c".into()]).unwrap(), 1.);
    /// assert!(lar.get(&["a".into(), "d".into()]).unwrap().is_nan());
    /// ```
    pub fn from_tuples(tuples: Vec<(Vec<Label>, A)>) -> LarryResult<Larry<A::Filled>>
    {
        let arity = tuples.first().map(|(t, _)| t.len()).unwrap_or(0);
        if arity == 0 || tuples.iter().any(|(t, _)| t.len() != arity) {
            return Err(from_kind(
                ErrorKind::InvalidData,
                "need at least one label tuple, all of the same nonzero length",
            ));
        }
        from_pairs(tuples.iter().map(|(t, x)| (&t[..], x.clone())), arity)
    }

    /// Build an array from elements and their tuple labels, the inverse of
    /// [`Larry::to_list`].
    ///
    /// **Errors** with `InvalidData` if the lengths differ and with
    /// `Unflattenable` if the labels are not tuples of equal length.
    pub fn from_list(values: Vec<A>, labels: Vec<Label>) -> LarryResult<Larry<A::Filled>>
    {
        if values.len() != labels.len() {
            return Err(from_kind(
                ErrorKind::InvalidData,
                format!("{} elements for {} labels", values.len(), labels.len()),
            ));
        }
        let arity = tuple_arity(&labels)?;
        let pairs = labels
            .iter()
            .zip(values.iter())
            .map(|(label, x)| (label.as_tuple().unwrap_or(&[]), x.clone()));
        from_pairs(pairs, arity)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::label::to_labels;
    use ndarray::array;

    fn sample() -> Larry<i64>
    {
        Larry::new(
            array![[1, 2, 3], [4, 5, 6]],
            vec![to_labels(["r0", "r1"]), to_labels([7, 8, 9])],
        )
        .unwrap()
    }

    #[test]
    fn tuple_arity_checks()
    {
        assert_eq!(tuple_arity(&[Label::from(("a", 1)), Label::from(("b", 2))]).unwrap(), 2);
        assert!(tuple_arity(&[Label::from(("a", 1)), Label::from(("b", 2, 3))]).is_err());
        assert!(tuple_arity(&[Label::from("a")]).is_err());
        assert!(tuple_arity(&[Label::Tuple(vec![])]).is_err());
        assert!(tuple_arity(&[]).is_err());
    }

    #[test]
    fn round_trip_both_orders()
    {
        let lar = sample();
        for &order in &[Order::RowMajor, Order::ColumnMajor] {
            let back = lar.flatten(order).unflatten().unwrap();
            assert_eq!(back.to_labels(), lar.to_labels());
            assert_eq!(back.data(), &lar.data().mapv(|x| x as f64));
        }
    }

    #[test]
    fn unflatten_fills_holes()
    {
        let flat = Larry::from_vec(
            vec![1f64, 4.],
            vec![vec![Label::from(("a", "x")), Label::from(("b", "y"))]],
        )
        .unwrap();
        let lar = flat.unflatten().unwrap();
        assert_eq!(lar.shape(), &[2, 2]);
        assert!(lar.data()[[0, 1]].is_nan());
        assert_eq!(lar.data()[[1, 1]], 4.);
    }

    #[test]
    fn unflatten_rejects()
    {
        let err = sample().unflatten().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unflattenable);
        let plain = Larry::from_vec(vec![1f64, 2.], vec![to_labels(["a", "b"])]).unwrap();
        assert_eq!(plain.unflatten().unwrap_err().kind(), ErrorKind::Unflattenable);
        let objects = Larry::from_vec(vec![Some(Label::from(1))], vec![vec![Label::from(("a", "b"))]]).unwrap();
        assert_eq!(objects.unflatten().unwrap_err().kind(), ErrorKind::Unflattenable);
    }

    #[test]
    fn tuples_and_lists()
    {
        let lar = sample();
        let tuples = lar.to_tuples();
        assert_eq!(tuples.len(), 6);
        assert_eq!(tuples[1], (vec![Label::from("r0"), Label::from(8)], 2));
        let back = Larry::from_tuples(tuples).unwrap();
        assert_eq!(back.to_labels(), lar.to_labels());

        let (values, labels) = lar.to_list();
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6]);
        let back = Larry::from_list(values, labels).unwrap();
        assert_eq!(back.get(&["r1".into(), 9.into()]).unwrap(), 6.);
        assert_eq!(
            Larry::from_list(vec![1f64], vec![]).unwrap_err().kind(),
            ErrorKind::InvalidData
        );
        assert_eq!(
            Larry::<f64>::from_tuples(vec![]).unwrap_err().kind(),
            ErrorKind::InvalidData
        );
    }
}
