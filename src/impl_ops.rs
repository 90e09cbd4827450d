// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Arithmetic, comparison and logical operators.
//!
//! Every binary operation dispatches on its right hand side, see
//! [`Operand`]. The `std::ops` impls return a `Result`, since aligning two
//! labeled arrays can fail.

use ndarray::Zip;
use num_traits::NumOps;

use crate::align::{align, Aligned};
use crate::error::{from_kind, ErrorKind};
use crate::{ArithOp, CmpOp, Element, Larry, LarryResult, LogicOp, Operand};

impl<A: Clone> Larry<A>
{
    /// Combine `self` with `rhs` elementwise through `f`.
    fn zip_with<'b, B, C, F>(&self, rhs: Operand<'b, B>, mut f: F) -> LarryResult<Larry<C>>
    where
        B: Clone,
        F: FnMut(&A, &B) -> C,
    {
        match rhs {
            Operand::Scalar(b) => Ok(self.with_data(self.data.map(|a| f(a, &b)))),
            Operand::Raw(view) => {
                let view = view.broadcast(self.data.raw_dim()).ok_or_else(|| {
                    from_kind(
                        ErrorKind::IncompatibleOperand,
                        format!("array of shape {:?} does not match shape {:?}", view.shape(), self.shape()),
                    )
                })?;
                Ok(self.with_data(Zip::from(&self.data).and(&view).map_collect(f)))
            }
            Operand::Labeled(other) if self.is_aligned_with(other) => {
                Ok(self.with_data(Zip::from(&self.data).and(&other.data).map_collect(f)))
            }
            Operand::Labeled(other) => {
                let Aligned { lhs, rhs, labels } = align(self, other)?;
                let data = Zip::from(&lhs).and(&rhs).map_collect(f);
                Ok(Larry::from_parts_unchecked(data, labels))
            }
        }
    }

    /// Apply the arithmetic operator `op` between `self` and `rhs`.
    ///
    /// `rhs` may be a scalar, an unlabeled array that broadcasts to the
    /// shape of `self`, or a labeled array. Two labeled arrays are aligned
    /// first unless their labels are identical.
    ///
    /// **Errors** with `IncompatibleOperand` if an unlabeled `rhs` does not
    /// broadcast, and with the alignment errors of [`Larry::align`].
    ///
    /// ```
    /// use larry::prelude::*;
    ///
    /// let a = Larry::from_vec(vec![1., 2., 3.], labels![["a", "b", "c"]]).unwrap();
    /// let b = Larry::from_vec(vec![10., 20., 30.], labels![["b", "c", "d"]]).unwrap();
    /// let c = a.arith(ArithOp::Add, &b).unwrap();
    /// assert_eq!(c.to_label(0).unwrap(), labels![["b", "c"]].remove(0));
    /// assert_eq!(c.data().as_slice().unwrap(), &[12., 23.]);
    /// ```
    pub fn arith<'b>(&self, op: ArithOp, rhs: impl Into<Operand<'b, A>>) -> LarryResult<Larry<A>>
    where A: NumOps + 'b
    {
        self.zip_with(rhs.into(), |a, b| op.apply(a.clone(), b.clone()))
    }

    /// Compute `lhs - self` for a scalar or unlabeled `lhs`.
    ///
    /// **Errors** with `Unsupported` if `lhs` is a labeled array: write
    /// `lhs - self` for that.
    pub fn rsub<'b>(&self, lhs: impl Into<Operand<'b, A>>) -> LarryResult<Larry<A>>
    where A: NumOps + 'b
    {
        self.reversed(ArithOp::Sub, lhs.into())
    }

    /// Compute `lhs / self` for a scalar or unlabeled `lhs`.
    ///
    /// **Errors** with `Unsupported` if `lhs` is a labeled array.
    pub fn rdiv<'b>(&self, lhs: impl Into<Operand<'b, A>>) -> LarryResult<Larry<A>>
    where A: NumOps + 'b
    {
        self.reversed(ArithOp::Div, lhs.into())
    }

    fn reversed<'b>(&self, op: ArithOp, lhs: Operand<'b, A>) -> LarryResult<Larry<A>>
    where A: NumOps + 'b
    {
        if let Operand::Labeled(_) = lhs {
            return Err(from_kind(
                ErrorKind::Unsupported,
                "reversed operation between two labeled arrays; apply the operator to the left operand",
            ));
        }
        self.zip_with(lhs, |a, b| op.apply(b.clone(), a.clone()))
    }

    /// Compare `self` with `rhs` elementwise.
    ///
    /// Dispatch on `rhs` is the same as for [`Larry::arith`].
    pub fn compare<'b>(&self, op: CmpOp, rhs: impl Into<Operand<'b, A>>) -> LarryResult<Larry<bool>>
    where A: PartialOrd + 'b
    {
        self.zip_with(rhs.into(), |a, b| op.apply(a, b))
    }

    pub fn elem_eq<'b>(&self, rhs: impl Into<Operand<'b, A>>) -> LarryResult<Larry<bool>>
    where A: PartialOrd + 'b
    {
        self.compare(CmpOp::Eq, rhs)
    }

    pub fn elem_ne<'b>(&self, rhs: impl Into<Operand<'b, A>>) -> LarryResult<Larry<bool>>
    where A: PartialOrd + 'b
    {
        self.compare(CmpOp::Ne, rhs)
    }

    pub fn elem_lt<'b>(&self, rhs: impl Into<Operand<'b, A>>) -> LarryResult<Larry<bool>>
    where A: PartialOrd + 'b
    {
        self.compare(CmpOp::Lt, rhs)
    }

    pub fn elem_gt<'b>(&self, rhs: impl Into<Operand<'b, A>>) -> LarryResult<Larry<bool>>
    where A: PartialOrd + 'b
    {
        self.compare(CmpOp::Gt, rhs)
    }

    pub fn elem_le<'b>(&self, rhs: impl Into<Operand<'b, A>>) -> LarryResult<Larry<bool>>
    where A: PartialOrd + 'b
    {
        self.compare(CmpOp::Le, rhs)
    }

    pub fn elem_ge<'b>(&self, rhs: impl Into<Operand<'b, A>>) -> LarryResult<Larry<bool>>
    where A: PartialOrd + 'b
    {
        self.compare(CmpOp::Ge, rhs)
    }

    /// Combine the truth values of `self` and `rhs` elementwise.
    pub fn logic<'b>(&self, op: LogicOp, rhs: impl Into<Operand<'b, A>>) -> LarryResult<Larry<bool>>
    where A: Element + 'b
    {
        self.zip_with(rhs.into(), |a, b| op.apply(a.is_truthy(), b.is_truthy()))
    }

    /// Elementwise logical and of the truth values.
    pub fn and<'b>(&self, rhs: impl Into<Operand<'b, A>>) -> LarryResult<Larry<bool>>
    where A: Element + 'b
    {
        self.logic(LogicOp::And, rhs)
    }

    /// Elementwise logical or of the truth values.
    pub fn or<'b>(&self, rhs: impl Into<Operand<'b, A>>) -> LarryResult<Larry<bool>>
    where A: Element + 'b
    {
        self.logic(LogicOp::Or, rhs)
    }
}

// Pick the expression $a for commutative and $b for ordered binop
macro_rules! if_commutative {
    (Commute { $a:expr } or { $b:expr }) => {
        $a
    };
    (Ordered { $a:expr } or { $b:expr }) => {
        $b
    };
}

macro_rules! impl_binary_op(
    ($trt:ident, $mth:ident, $op:expr, $doc:expr) => (
/// Perform elementwise
#[doc=$doc]
/// between two labeled arrays, aligning them first if their labels
/// differ.
impl<'a, 'b, A> $trt<&'b Larry<A>> for &'a Larry<A>
where A: Clone + NumOps
{
    type Output = LarryResult<Larry<A>>;
    fn $mth(self, rhs: &'b Larry<A>) -> Self::Output
    {
        self.arith($op, rhs)
    }
}

/// Perform elementwise
#[doc=$doc]
/// between a labeled array and an unlabeled array that broadcasts to its
/// shape. The result has the labels of `self`.
impl<'a, 'b, A, S, D> $trt<&'b ArrayBase<S, D>> for &'a Larry<A>
where
    A: Clone + NumOps + 'b,
    S: Data<Elem = A>,
    D: Dimension,
{
    type Output = LarryResult<Larry<A>>;
    fn $mth(self, rhs: &'b ArrayBase<S, D>) -> Self::Output
    {
        self.arith($op, rhs)
    }
}
    );
);

macro_rules! impl_raw_lhs_op(
    ($trt:ident, $mth:ident, $commutative:ident, $op:expr) => (
// An unlabeled left operand defers to the labeled array, so the result
// keeps its labels instead of going through array broadcasting.
impl<'a, 'b, A, S, D> $trt<&'b Larry<A>> for &'a ArrayBase<S, D>
where
    A: Clone + NumOps + 'a,
    S: Data<Elem = A>,
    D: Dimension,
{
    type Output = LarryResult<Larry<A>>;
    fn $mth(self, rhs: &'b Larry<A>) -> Self::Output
    {
        if_commutative!($commutative {
            rhs.arith($op, self)
        } or {
            rhs.reversed($op, Operand::from(self))
        })
    }
}
    );
);

macro_rules! impl_scalar_op {
    ($scalar:ty, $commutative:ident, $trt:ident, $mth:ident, $op:expr) => {
        impl<'a> $trt<$scalar> for &'a Larry<$scalar>
        {
            type Output = LarryResult<Larry<$scalar>>;
            fn $mth(self, rhs: $scalar) -> Self::Output
            {
                self.arith($op, rhs)
            }
        }

        impl<'a> $trt<&'a Larry<$scalar>> for $scalar
        {
            type Output = LarryResult<Larry<$scalar>>;
            fn $mth(self, rhs: &'a Larry<$scalar>) -> Self::Output
            {
                if_commutative!($commutative {
                    rhs.arith($op, self)
                } or {
                    rhs.reversed($op, Operand::Scalar(self))
                })
            }
        }
    };
}

mod arithmetic_ops
{
    use super::*;
    use ndarray::{ArrayBase, Data, Dimension};
    use std::ops::*;

    impl_binary_op!(Add, add, ArithOp::Add, "addition");
    impl_binary_op!(Sub, sub, ArithOp::Sub, "subtraction");
    impl_binary_op!(Mul, mul, ArithOp::Mul, "multiplication");
    impl_binary_op!(Div, div, ArithOp::Div, "division");

    impl_raw_lhs_op!(Add, add, Commute, ArithOp::Add);
    impl_raw_lhs_op!(Sub, sub, Ordered, ArithOp::Sub);
    impl_raw_lhs_op!(Mul, mul, Commute, ArithOp::Mul);
    impl_raw_lhs_op!(Div, div, Ordered, ArithOp::Div);

    macro_rules! all_scalar_ops {
        ($scalar:ty) => {
            impl_scalar_op!($scalar, Commute, Add, add, ArithOp::Add);
            impl_scalar_op!($scalar, Ordered, Sub, sub, ArithOp::Sub);
            impl_scalar_op!($scalar, Commute, Mul, mul, ArithOp::Mul);
            impl_scalar_op!($scalar, Ordered, Div, div, ArithOp::Div);
        };
    }
    all_scalar_ops!(f64);
    all_scalar_ops!(f32);
    all_scalar_ops!(i64);
    all_scalar_ops!(i32);

    impl<'a, A> Neg for &'a Larry<A>
    where A: Clone + Neg<Output = A>
    {
        type Output = Larry<A>;
        /// Perform an elementwise negation of `self` and return the result.
        fn neg(self) -> Larry<A>
        {
            self.mapv(Neg::neg)
        }
    }

    impl<A> Neg for Larry<A>
    where A: Clone + Neg<Output = A>
    {
        type Output = Larry<A>;
        fn neg(mut self) -> Larry<A>
        {
            self.data.mapv_inplace(Neg::neg);
            self
        }
    }

    impl<'a, 'b> BitAnd<&'b Larry<bool>> for &'a Larry<bool>
    {
        type Output = LarryResult<Larry<bool>>;
        fn bitand(self, rhs: &'b Larry<bool>) -> Self::Output
        {
            self.and(rhs)
        }
    }

    impl<'a, 'b> BitOr<&'b Larry<bool>> for &'a Larry<bool>
    {
        type Output = LarryResult<Larry<bool>>;
        fn bitor(self, rhs: &'b Larry<bool>) -> Self::Output
        {
            self.or(rhs)
        }
    }

    impl<'a> Not for &'a Larry<bool>
    {
        type Output = Larry<bool>;
        fn not(self) -> Larry<bool>
        {
            self.mapv(|x| !x)
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::label::to_labels;
    use ndarray::{arr1, array};

    fn lar(values: Vec<f64>, labels: &[&str]) -> Larry<f64>
    {
        Larry::from_vec(values, vec![to_labels(labels.iter().copied())]).unwrap()
    }

    #[test]
    fn fast_path_keeps_order()
    {
        let a = lar(vec![1., 2.], &["z", "a"]);
        let b = lar(vec![3., 4.], &["z", "a"]);
        let c = (&a + &b).unwrap();
        assert_eq!(c.label(0).unwrap(), &to_labels(["z", "a"])[..]);
        assert_eq!(c.data(), &arr1(&[4., 6.]).into_dyn());
    }

    #[test]
    fn slow_path_sorts_intersection()
    {
        let a = lar(vec![1., 2.], &["a", "b"]);
        let b = lar(vec![1., 2.], &["b", "c"]);
        let sum = (&a + &b).unwrap();
        assert_eq!(sum.label(0).unwrap(), &to_labels(["b"])[..]);
        assert_eq!(sum.data(), &arr1(&[3.]).into_dyn());
        let diff = (&a - &b).unwrap();
        assert_eq!(diff.data(), &arr1(&[1.]).into_dyn());
    }

    #[test]
    fn scalars_and_raw_arrays()
    {
        let a = lar(vec![1., 2.], &["a", "b"]);
        assert_eq!((&a * 2.).unwrap().data(), &arr1(&[2., 4.]).into_dyn());
        assert_eq!((10. - &a).unwrap().data(), &arr1(&[9., 8.]).into_dyn());
        assert_eq!((2. / &a).unwrap().data(), &arr1(&[2., 1.]).into_dyn());
        let raw = arr1(&[1., 1.]);
        let c = (&raw - &a).unwrap();
        assert_eq!(c.label(0).unwrap(), a.label(0).unwrap());
        assert_eq!(c.data(), &arr1(&[0., -1.]).into_dyn());
        let bad = array![1., 2., 3.];
        assert_eq!((&a + &bad).unwrap_err().kind(), ErrorKind::IncompatibleOperand);
    }

    #[test]
    fn reversed_labeled_is_unsupported()
    {
        let a = lar(vec![1., 2.], &["a", "b"]);
        assert_eq!(a.rdiv(&a).unwrap_err().kind(), ErrorKind::Unsupported);
        assert_eq!(a.rsub(1.).unwrap().data(), &arr1(&[0., -1.]).into_dyn());
    }

    #[test]
    fn compare_and_logic()
    {
        let a = lar(vec![1., f64::NAN, 0.], &["a", "b", "c"]);
        let gt = a.elem_gt(0.5).unwrap();
        assert_eq!(gt.data(), &arr1(&[true, false, false]).into_dyn());
        let truth = a.and(1.).unwrap();
        assert_eq!(truth.data(), &arr1(&[true, true, false]).into_dyn());
        let both = (&gt & &truth).unwrap();
        assert_eq!(both.data(), &arr1(&[true, false, false]).into_dyn());
        assert_eq!((!&both).data(), &arr1(&[false, true, true]).into_dyn());
    }

    #[test]
    fn negation()
    {
        let a = lar(vec![1., -2.], &["a", "b"]);
        assert_eq!((-&a).data(), &arr1(&[-1., 2.]).into_dyn());
        assert_eq!((-a).data(), &arr1(&[-1., 2.]).into_dyn());
    }
}
