// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Operator tables used by the binary operations and the filters.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Elementwise arithmetic operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArithOp
{
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp
{
    #[inline]
    pub fn apply<A>(self, a: A, b: A) -> A
    where A: Add<Output = A> + Sub<Output = A> + Mul<Output = A> + Div<Output = A>
    {
        match self {
            ArithOp::Add => a + b,
            ArithOp::Sub => a - b,
            ArithOp::Mul => a * b,
            ArithOp::Div => a / b,
        }
    }
}

/// Elementwise comparison operator.
///
/// Comparisons involving NaN are false, except `Ne` which is true.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CmpOp
{
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CmpOp
{
    #[inline]
    pub fn apply<T: PartialOrd + ?Sized>(self, a: &T, b: &T) -> bool
    {
        match self {
            CmpOp::Eq => a == b,
            CmpOp::Ne => a != b,
            CmpOp::Lt => a < b,
            CmpOp::Gt => a > b,
            CmpOp::Le => a <= b,
            CmpOp::Ge => a >= b,
        }
    }
}

impl fmt::Display for CmpOp
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Gt => ">",
            CmpOp::Le => "<=",
            CmpOp::Ge => ">=",
        })
    }
}

/// Elementwise logical operator on the truth value of elements.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LogicOp
{
    And,
    Or,
}

impl LogicOp
{
    #[inline]
    pub fn apply(self, a: bool, b: bool) -> bool
    {
        match self {
            LogicOp::And => a && b,
            LogicOp::Or => a || b,
        }
    }
}

/// A predicate on labels or elements, used by `keep_label` and `keep_x`.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition<T>
{
    /// `value op operand`
    Cmp(CmpOp, T),
    /// membership in a list
    In(Vec<T>),
    NotIn(Vec<T>),
}

impl<T: PartialOrd> Condition<T>
{
    pub fn test(&self, value: &T) -> bool
    {
        match self {
            Condition::Cmp(op, rhs) => op.apply(value, rhs),
            Condition::In(list) => list.iter().any(|x| x == value),
            Condition::NotIn(list) => list.iter().all(|x| x != value),
        }
    }

    /// Return the same condition with its operands converted.
    pub fn map<U, F>(self, mut f: F) -> Condition<U>
    where F: FnMut(T) -> U
    {
        match self {
            Condition::Cmp(op, rhs) => Condition::Cmp(op, f(rhs)),
            Condition::In(list) => Condition::In(list.into_iter().map(f).collect()),
            Condition::NotIn(list) => Condition::NotIn(list.into_iter().map(f).collect()),
        }
    }
}
