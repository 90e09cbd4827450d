// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! larry prelude.
//!
//! This module contains the most used types, traits and macros that you
//! can import easily as a group.
//!
//! ```
//! use larry::prelude::*;
//!
//! let lar = Larry::from_vec(vec![1., 2.], labels![["a", "b"]]).unwrap();
//! assert_eq!(lar.sum(None).unwrap(), Item::Scalar(3.));
//! ```

#[doc(no_inline)]
pub use crate::{Item, Label, Larry, LarryError, LarryResult, Operand};

#[doc(no_inline)]
pub use crate::{AxisIndex, ErrorClass, ErrorKind};

#[doc(no_inline)]
pub use crate::{Element, Kind, Missing};

#[doc(no_inline)]
pub use crate::{ArithOp, CmpOp, Condition, LogicOp};

#[doc(no_inline)]
pub use crate::stats::Norm;

#[doc(no_inline)]
pub use crate::{ArrayD, Axis, Order, Slice};

pub use crate::{idx, labels};
