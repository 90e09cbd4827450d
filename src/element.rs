// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Label;

/// The kind of data held by a labeled array.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Kind
{
    Bool,
    Int,
    Float,
    Str,
    Object,
}

impl Kind
{
    /// Return `true` for the kinds that can be flattened and unflattened.
    pub fn is_scalar(self) -> bool
    {
        !matches!(self, Kind::Object)
    }
}

impl fmt::Display for Kind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let name = match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Str => "str",
            Kind::Object => "object",
        };
        f.write_str(name)
    }
}

/// Elements of a labeled array.
///
/// `Filled` is the element type an array converts to when an operation
/// may introduce missing values: integers and booleans become `f64`,
/// every other type keeps its own type.
pub trait Element: Clone + fmt::Debug + 'static
{
    type Filled: Missing;

    const KIND: Kind;

    /// Return `true` unless the element marks a missing value.
    ///
    /// Infinite floats are missing too.
    fn is_finite(&self) -> bool;

    /// Truth value used by `any`, `all`, `and` and `or`: non zero, non
    /// empty or present. NaN is true.
    fn is_truthy(&self) -> bool;

    fn into_filled(self) -> Self::Filled;
}

/// Element types that have a missing marker.
pub trait Missing: Element
{
    fn missing() -> Self;

    /// Return `true` if the element is the missing marker.
    fn is_missing(&self) -> bool;
}

macro_rules! float_element {
    ($($t:ty),*) => {
        $(
        impl Element for $t
        {
            type Filled = $t;
            const KIND: Kind = Kind::Float;

            #[inline]
            fn is_finite(&self) -> bool
            {
                <$t>::is_finite(*self)
            }

            #[inline]
            fn is_truthy(&self) -> bool
            {
                *self != 0.
            }

            #[inline]
            fn into_filled(self) -> $t
            {
                self
            }
        }

        impl Missing for $t
        {
            #[inline]
            fn missing() -> Self
            {
                <$t>::NAN
            }

            #[inline]
            fn is_missing(&self) -> bool
            {
                self.is_nan()
            }
        }
        )*
    };
}

float_element!(f64, f32);

macro_rules! int_element {
    ($($t:ty),*) => {
        $(
        impl Element for $t
        {
            type Filled = f64;
            const KIND: Kind = Kind::Int;

            #[inline]
            fn is_finite(&self) -> bool
            {
                true
            }

            #[inline]
            fn is_truthy(&self) -> bool
            {
                *self != 0
            }

            #[inline]
            fn into_filled(self) -> f64
            {
                self as f64
            }
        }
        )*
    };
}

int_element!(i64, i32);

impl Element for bool
{
    type Filled = f64;
    const KIND: Kind = Kind::Bool;

    fn is_finite(&self) -> bool
    {
        true
    }

    fn is_truthy(&self) -> bool
    {
        *self
    }

    fn into_filled(self) -> f64
    {
        if self {
            1.
        } else {
            0.
        }
    }
}

impl Element for String
{
    type Filled = String;
    const KIND: Kind = Kind::Str;

    fn is_finite(&self) -> bool
    {
        !self.is_empty()
    }

    fn is_truthy(&self) -> bool
    {
        !self.is_empty()
    }

    fn into_filled(self) -> String
    {
        self
    }
}

impl Missing for String
{
    fn missing() -> Self
    {
        String::new()
    }

    fn is_missing(&self) -> bool
    {
        self.is_empty()
    }
}

impl Element for Label
{
    type Filled = Option<Label>;
    const KIND: Kind = Kind::Object;

    fn is_finite(&self) -> bool
    {
        true
    }

    fn is_truthy(&self) -> bool
    {
        true
    }

    fn into_filled(self) -> Option<Label>
    {
        Some(self)
    }
}

impl<T: Element> Element for Option<T>
{
    type Filled = Option<T>;
    const KIND: Kind = Kind::Object;

    fn is_finite(&self) -> bool
    {
        self.is_some()
    }

    fn is_truthy(&self) -> bool
    {
        self.as_ref().is_some_and(T::is_truthy)
    }

    fn into_filled(self) -> Option<T>
    {
        self
    }
}

impl<T: Element> Missing for Option<T>
{
    fn missing() -> Self
    {
        None
    }

    fn is_missing(&self) -> bool
    {
        self.is_none()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn fill_policy()
    {
        assert!(f64::missing().is_nan());
        assert_eq!(String::missing(), "");
        assert_eq!(<Option<i64>>::missing(), None);
        assert_eq!(3i64.into_filled(), 3.);
        assert_eq!(<i32 as Element>::KIND, Kind::Int);
        assert_eq!(<Option<String> as Element>::KIND, Kind::Object);
    }

    #[test]
    fn truthiness()
    {
        assert!(f64::NAN.is_truthy());
        assert!(!0.0f64.is_truthy());
        assert!(!f64::NAN.is_finite());
        assert!(!f64::INFINITY.is_finite());
        assert!(!String::new().is_finite());
        assert!(!Some(0i64).is_truthy());
    }
}
