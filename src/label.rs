// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Axis labels and operations on label lists.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use itertools::Itertools;
use ndarray::Order;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A label of one position along one axis.
///
/// Labels are totally ordered: integers sort before strings, strings
/// before tuples, and tuples compare lexicographically. Alignment relies
/// on this order to produce a canonical sorted intersection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Label
{
    Int(i64),
    Str(String),
    /// Produced by flattening: one component per original axis.
    Tuple(Vec<Label>),
}

impl Label
{
    /// Return the components of a tuple label.
    pub fn as_tuple(&self) -> Option<&[Label]>
    {
        match self {
            Label::Tuple(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str>
    {
        match self {
            Label::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64>
    {
        match *self {
            Label::Int(i) => Some(i),
            _ => None,
        }
    }
}

impl fmt::Display for Label
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Label::Int(i) => write!(f, "{}", i),
            Label::Str(s) => f.write_str(s),
            Label::Tuple(v) => {
                f.write_str("(")?;
                for (i, label) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", label)?;
                }
                f.write_str(")")
            }
        }
    }
}

macro_rules! int_label {
    ($($t:ty),*) => {
        $(
        impl From<$t> for Label
        {
            #[inline]
            fn from(i: $t) -> Self
            {
                Label::Int(i as i64)
            }
        }
        )*
    };
}

int_label!(i64, i32, u32, u8, usize);

impl From<&str> for Label
{
    fn from(s: &str) -> Self
    {
        Label::Str(s.to_owned())
    }
}

impl From<String> for Label
{
    fn from(s: String) -> Self
    {
        Label::Str(s)
    }
}

impl From<&String> for Label
{
    fn from(s: &String) -> Self
    {
        Label::Str(s.clone())
    }
}

impl From<Vec<Label>> for Label
{
    fn from(v: Vec<Label>) -> Self
    {
        Label::Tuple(v)
    }
}

impl<A, B> From<(A, B)> for Label
where
    A: Into<Label>,
    B: Into<Label>,
{
    fn from((a, b): (A, B)) -> Self
    {
        Label::Tuple(vec![a.into(), b.into()])
    }
}

impl<A, B, C> From<(A, B, C)> for Label
where
    A: Into<Label>,
    B: Into<Label>,
    C: Into<Label>,
{
    fn from((a, b, c): (A, B, C)) -> Self
    {
        Label::Tuple(vec![a.into(), b.into(), c.into()])
    }
}

/// Return the labels `0, 1, ..., n - 1`.
pub fn default_labels(n: usize) -> Vec<Label>
{
    (0..n).map(Label::from).collect()
}

/// Convert anything iterable into a label list.
pub fn to_labels<I>(iter: I) -> Vec<Label>
where
    I: IntoIterator,
    I::Item: Into<Label>,
{
    iter.into_iter().map(Into::into).collect()
}

/// Map each label to its position.
pub(crate) fn position_map(labels: &[Label]) -> HashMap<&Label, usize>
{
    labels.iter().enumerate().map(|(i, l)| (l, i)).collect()
}

/// Return the first label (in list order) that occurs more than once,
/// and the number of times it occurs.
pub(crate) fn first_duplicate(labels: &[Label]) -> Option<(&Label, usize)>
{
    let counts = labels.iter().counts();
    labels
        .iter()
        .find(|l| counts[l] > 1)
        .map(|l| (l, counts[l]))
}

/// Sorted union of two label lists.
pub(crate) fn sorted_union(a: &[Label], b: &[Label]) -> Vec<Label>
{
    let mut out: Vec<Label> = a.iter().chain(b).cloned().collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// First-appearance order of the distinct values of `iter`.
pub(crate) fn unique_in_order<T, I>(iter: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    iter.into_iter().unique().collect()
}

/// Tuple labels of every element, in the iteration order of `order`.
pub(crate) fn flatten_labels(labels: &[Arc<Vec<Label>>], order: Order) -> Vec<Label>
{
    if labels.is_empty() {
        return vec![Label::Tuple(Vec::new())];
    }
    if order == Order::ColumnMajor {
        labels
            .iter()
            .rev()
            .map(|axis| axis.iter().cloned())
            .multi_cartesian_product()
            .map(|mut tuple| {
                tuple.reverse();
                Label::Tuple(tuple)
            })
            .collect()
    } else {
        labels
            .iter()
            .map(|axis| axis.iter().cloned())
            .multi_cartesian_product()
            .map(Label::Tuple)
            .collect()
    }
}
