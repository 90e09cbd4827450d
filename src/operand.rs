// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use ndarray::{ArrayBase, ArrayViewD, Data, Dimension};

use crate::Larry;

/// The right hand side of a binary operation on a labeled array.
///
/// - `Scalar` is combined with every element.
/// - `Raw` is an unlabeled data block; it must broadcast to the shape of
///   the labeled array and it adopts that array's labels.
/// - `Labeled` is aligned with the labeled array first, unless both carry
///   identical labels.
#[derive(Clone, Debug)]
pub enum Operand<'a, A>
{
    Scalar(A),
    Raw(ArrayViewD<'a, A>),
    Labeled(&'a Larry<A>),
}

impl<'a, A> From<&'a Larry<A>> for Operand<'a, A>
{
    fn from(lar: &'a Larry<A>) -> Self
    {
        Operand::Labeled(lar)
    }
}

impl<'a, A, S, D> From<&'a ArrayBase<S, D>> for Operand<'a, A>
where
    S: Data<Elem = A>,
    D: Dimension,
{
    fn from(array: &'a ArrayBase<S, D>) -> Self
    {
        Operand::Raw(array.view().into_dyn())
    }
}

macro_rules! scalar_operand {
    ($($t:ty),*) => {
        $(
        impl<'a> From<$t> for Operand<'a, $t>
        {
            #[inline]
            fn from(x: $t) -> Self
            {
                Operand::Scalar(x)
            }
        }
        )*
    };
}

scalar_operand!(f64, f32, i64, i32, bool, String);

impl<'a> From<&str> for Operand<'a, String>
{
    fn from(s: &str) -> Self
    {
        Operand::Scalar(s.to_owned())
    }
}
