// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Create the label lists of a labeled array, one bracketed list per axis.
///
/// Every element is converted with `Label::from`, so integers, strings and
/// tuples can be used directly.
///
/// ```
/// use larry::prelude::*;
///
/// let labels = labels![["a", "b"], [1, 2, 3]];
/// assert_eq!(labels.len(), 2);
/// assert_eq!(labels[0][1], Label::from("b"));
/// assert_eq!(labels[1][2], Label::Int(3));
///
/// let lar = Larry::from_elem(labels, 0.).unwrap();
/// assert_eq!(lar.shape(), &[2, 3]);
/// ```
#[macro_export]
macro_rules! labels {
    ($([$($l:expr),* $(,)?]),* $(,)?) => {
        vec![$(vec![$($crate::Label::from($l)),*]),*]
    };
}

/// Create a positional index, one entry per axis.
///
/// Each entry is converted with `AxisIndex::from`: an integer selects one
/// position and drops the axis, a range or `..` slices it, a `Vec` of
/// integers gathers positions and a `Vec<bool>` is a mask.
///
/// ```
/// use larry::prelude::*;
///
/// let lar = Larry::from_shape_vec(&[2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
/// assert_eq!(lar.get_item(&idx![1, 2]).unwrap().scalar(), Some(6));
///
/// let sub = lar.get_item(&idx![.., vec![2, 0]]).unwrap().into_larry().unwrap();
/// assert_eq!(sub.label(1).unwrap(), &[Label::Int(2), Label::Int(0)]);
/// ```
#[macro_export]
macro_rules! idx {
    ($($e:expr),* $(,)?) => {
        vec![$($crate::AxisIndex::from($e)),*]
    };
}
