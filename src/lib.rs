// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#![crate_name = "larry"]
#![allow(
    clippy::many_single_char_names,
    clippy::deref_addrof,
    clippy::unreadable_literal,
    clippy::type_complexity,
    clippy::should_implement_trait
)]
#![doc(test(attr(deny(warnings))))]
#![doc(test(attr(allow(unused_variables))))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! The `larry` crate provides [`Larry`], a labeled n-dimensional array:
//! a dense [`ndarray`] data block with an ordered list of unique labels
//! along every axis.
//!
//! - Binary operations between two labeled arrays align them first. When
//!   the labels of both operands are identical the data blocks are combined
//!   directly (the *fast path*); otherwise each axis is reduced to the
//!   sorted intersection of both label lists.
//! - Reductions skip missing values (NaN).
//! - Reindexing with [`Larry::morph`] and [`Larry::merge`] introduces the
//!   missing marker of the element type, promoting integers to floats.
//!
//! ## Crate Summary and Status
//!
//! - Data of any [`Element`] type: `f64`, `f32`, `i64`, `i32`, `bool`,
//!   `String` and `Option<T>` for generic objects.
//! - Labels are [`Label`] values: integers, strings or tuples of labels.
//! - Label lists are shared between arrays until one of them changes its
//!   labels (copy on write), so cloning a `Larry` never aliases mutably.
//!
//! ## Crate Feature Flags
//!
//! - `serde`
//!   - Enables serialization support for serde 1.x
//! - `archive`
//!   - Enabled by default
//!   - Enables [`archive`], a file backed store of labeled arrays
//!
//! ## Example
//!
//! ```
//! use larry::prelude::*;
//!
//! let a = Larry::from_vec(vec![1., 2.], labels![["a", "b"]]).unwrap();
//! let b = Larry::from_vec(vec![1., 2.], labels![["b", "c"]]).unwrap();
//! let sum = (&a + &b).unwrap();
//! assert_eq!(sum.label(0).unwrap(), &[Label::from("b")]);
//! assert_eq!(sum.data().as_slice().unwrap(), &[3.]);
//! ```

use std::fmt;
use std::sync::Arc;

pub use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn, Order, Slice};

pub use crate::element::{Element, Kind, Missing};
pub use crate::error::{ErrorClass, ErrorKind, LarryError};
pub use crate::indexing::AxisIndex;
pub use crate::label::Label;
pub use crate::operand::Operand;
pub use crate::ops::{ArithOp, CmpOp, Condition, LogicOp};

#[macro_use]
mod macros;

mod align;
#[cfg(feature = "archive")]
#[cfg_attr(docsrs, doc(cfg(feature = "archive")))]
pub mod archive;
mod element;
mod error;
mod flatten;
mod impl_constructors;
mod impl_methods;
mod impl_numeric;
mod impl_ops;
mod impl_stats;
mod indexing;
pub mod label;
#[cfg(feature = "serde")]
mod larry_serde;
mod morph;
mod operand;
mod ops;
pub mod prelude;
pub mod stats;

/// Convenient alias for results of labeled array operations.
pub type LarryResult<T> = Result<T, LarryError>;

/// A labeled n-dimensional array.
///
/// A `Larry` pairs a data block of dynamic dimensionality with one list of
/// labels per axis. The following invariants hold for every value of this
/// type, and are checked on construction and by every mutating method:
///
/// - there is exactly one label list per axis,
/// - the label list of an axis is as long as that axis,
/// - the labels along one axis are pairwise distinct.
///
/// Operations that produce a new array never share mutable state with
/// their inputs; label lists are shared until written (see
/// [`Arc::make_mut`]).
#[derive(Clone, PartialEq)]
pub struct Larry<A>
{
    data: ArrayD<A>,
    labels: Vec<Arc<Vec<Label>>>,
}

/// The result of an operation that yields either a single element or a
/// labeled array.
///
/// Reductions over all axes, full positional indexes and reductions of a
/// one dimensional array produce [`Item::Scalar`]; everything else keeps
/// its labels and produces [`Item::Array`].
#[derive(Clone, Debug, PartialEq)]
pub enum Item<A>
{
    Scalar(A),
    Array(Larry<A>),
}

impl<A> Item<A>
{
    /// Return the element, if this is a scalar.
    pub fn scalar(self) -> Option<A>
    {
        match self {
            Item::Scalar(x) => Some(x),
            Item::Array(_) => None,
        }
    }

    /// Return the labeled array, if this is not a scalar.
    pub fn into_larry(self) -> Option<Larry<A>>
    {
        match self {
            Item::Scalar(_) => None,
            Item::Array(lar) => Some(lar),
        }
    }

    pub fn is_scalar(&self) -> bool
    {
        matches!(self, Item::Scalar(_))
    }
}

impl<A: fmt::Debug> fmt::Debug for Larry<A>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("Larry")
            .field("labels", &self.labels.iter().map(|l| &**l).collect::<Vec<_>>())
            .field("data", &self.data)
            .finish()
    }
}

impl<A: fmt::Debug> fmt::Display for Larry<A>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        for (axis, labels) in self.labels.iter().enumerate() {
            write!(f, "label_{}: ", axis)?;
            for (i, label) in labels.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", label)?;
            }
            writeln!(f)?;
        }
        write!(f, "x\n{:?}", self.data)
    }
}
