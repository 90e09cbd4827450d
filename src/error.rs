// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::error::Error;
use std::fmt;

use ndarray::ShapeError;

use crate::Label;

/// An error produced by an operation on a labeled array.
///
/// Every fallible operation either completes in full or leaves its
/// operands untouched; an error never signals a half-applied mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct LarryError
{
    kind: ErrorKind,
    detail: String,
}

impl LarryError
{
    /// Return the `ErrorKind` of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind
    {
        self.kind
    }

    /// Return the coarse class of this error.
    #[inline]
    pub fn class(&self) -> ErrorClass
    {
        self.kind.class()
    }

    /// Return the human readable detail, e.g. the offending axis.
    pub fn detail(&self) -> &str
    {
        &self.detail
    }
}

/// Error code for an error produced by a labeled array operation.
///
/// This enumeration is not exhaustive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind
{
    /// number of label lists differs from the number of axes
    LabelCount,
    /// length of a label list differs from the length of its axis
    LabelLength,
    /// a label occurs more than once along one axis
    DuplicateLabel,
    /// axis argument not valid for a reduction
    InvalidAxis,
    /// precondition on an argument violated
    InvalidArgument,
    /// merge found a finite value on both sides of the same cell
    Overlap,
    /// operation is only defined for two dimensional arrays
    NotTwoDimensional,
    /// array is not in flattened form
    Unflattenable,
    /// axis out of bounds
    AxisOutOfBounds,
    /// label not present along an axis
    LabelNotFound,
    /// positional index out of bounds
    IndexOutOfBounds,
    /// two arrays share no label along an axis
    NoOverlap,
    /// two arrays have a different number of axes
    DimensionMismatch,
    /// labeled mask does not carry the labels of the indexed array
    Unaligned,
    /// operand cannot be combined with a labeled array
    IncompatibleOperand,
    /// data cannot be turned into an array of the requested shape
    InvalidData,
    /// operation deliberately not supported
    Unsupported,
}

/// Coarse classification of an `ErrorKind`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass
{
    /// Structural errors and precondition violations.
    Value,
    /// Missing or ambiguous lookups.
    Index,
    /// Operand or input of the wrong type.
    Type,
    /// Deliberately unsupported operation.
    Unsupported,
}

impl ErrorKind
{
    /// Return the class of this kind of error.
    pub fn class(self) -> ErrorClass
    {
        match self {
            ErrorKind::LabelCount
            | ErrorKind::LabelLength
            | ErrorKind::DuplicateLabel
            | ErrorKind::InvalidAxis
            | ErrorKind::InvalidArgument
            | ErrorKind::Overlap
            | ErrorKind::NotTwoDimensional
            | ErrorKind::Unflattenable => ErrorClass::Value,
            ErrorKind::AxisOutOfBounds
            | ErrorKind::LabelNotFound
            | ErrorKind::IndexOutOfBounds
            | ErrorKind::NoOverlap
            | ErrorKind::DimensionMismatch
            | ErrorKind::Unaligned => ErrorClass::Index,
            ErrorKind::IncompatibleOperand | ErrorKind::InvalidData => ErrorClass::Type,
            ErrorKind::Unsupported => ErrorClass::Unsupported,
        }
    }

    fn description(self) -> &'static str
    {
        match self {
            ErrorKind::LabelCount => "exactly one label list per axis needed",
            ErrorKind::LabelLength => "length mismatch in label and data",
            ErrorKind::DuplicateLabel => "labels not unique along axis",
            ErrorKind::InvalidAxis => "axis should be an axis of the array or None",
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::Overlap => "overlapping values",
            ErrorKind::NotTwoDimensional => "operation only works on 2d arrays",
            ErrorKind::Unflattenable => "array is not in flattened form",
            ErrorKind::AxisOutOfBounds => "axis out of range",
            ErrorKind::LabelNotFound => "label not found",
            ErrorKind::IndexOutOfBounds => "index out of range",
            ErrorKind::NoOverlap => "no matching labels",
            ErrorKind::DimensionMismatch => "arrays have different number of axes",
            ErrorKind::Unaligned => "indexing with a labeled mask that is not aligned",
            ErrorKind::IncompatibleOperand => "operand must be a scalar, array or labeled array",
            ErrorKind::InvalidData => "data cannot be converted to an array",
            ErrorKind::Unsupported => "operation not supported",
        }
    }
}

#[inline]
pub(crate) fn from_kind(kind: ErrorKind, detail: impl Into<String>) -> LarryError
{
    LarryError {
        kind,
        detail: detail.into(),
    }
}

pub(crate) fn axis_out_of_bounds(axis: usize, ndim: usize) -> LarryError
{
    from_kind(ErrorKind::AxisOutOfBounds, format!("axis {} of a {}d array", axis, ndim))
}

pub(crate) fn duplicate_label(axis: usize, label: &Label, count: usize) -> LarryError
{
    from_kind(
        ErrorKind::DuplicateLabel,
        format!("axis {}: there are {} labels named `{}`", axis, count, label),
    )
}

pub(crate) fn dimension_mismatch(lhs: usize, rhs: usize) -> LarryError
{
    from_kind(ErrorKind::DimensionMismatch, format!("{}d and {}d", lhs, rhs))
}

pub(crate) fn not_2d(ndim: usize) -> LarryError
{
    from_kind(ErrorKind::NotTwoDimensional, format!("got a {}d array", ndim))
}

impl fmt::Display for LarryError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        if self.detail.is_empty() {
            f.write_str(self.kind.description())
        } else {
            write!(f, "{}: {}", self.kind.description(), self.detail)
        }
    }
}

impl Error for LarryError {}

impl From<ShapeError> for LarryError
{
    fn from(err: ShapeError) -> Self
    {
        from_kind(ErrorKind::InvalidData, err.to_string())
    }
}
