// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reductions and elementwise numeric methods.

use ndarray::{ArrayD, ArrayViewD, Axis, Ix0};
use num_traits::Float;

use crate::error::{from_kind, ErrorKind};
use crate::stats::{
    nanmax, nanmax_axis, nanmean, nanmean_axis, nanmedian, nanmedian_axis, nanmin, nanmin_axis, nanprod,
    nanprod_axis, nanstd, nanstd_axis, nansum, nansum_axis, nanvar, nanvar_axis,
};
use crate::{Element, Item, Larry, LarryResult, Missing};

type Whole<A, B> = fn(ArrayViewD<'_, A>) -> B;
type Along<A, B> = fn(ArrayViewD<'_, A>, Axis) -> ArrayD<B>;

/// # Reductions
impl<A> Larry<A>
{
    fn reduction_axis(&self, axis: Axis) -> LarryResult<Axis>
    {
        if axis.index() < self.ndim() {
            Ok(axis)
        } else {
            Err(from_kind(
                ErrorKind::InvalidAxis,
                format!("cannot reduce axis {} of a {}d array", axis.index(), self.ndim()),
            ))
        }
    }

    /// Reduce over everything with `whole`, or along one axis with `along`.
    ///
    /// A reduction that leaves no axis yields a scalar.
    fn reduce<B>(&self, axis: Option<Axis>, whole: Whole<A, B>, along: Along<A, B>) -> LarryResult<Item<B>>
    {
        let axis = match axis {
            None => return Ok(Item::Scalar(whole(self.data.view()))),
            Some(axis) => self.reduction_axis(axis)?,
        };
        let data = along(self.data.view(), axis);
        if data.ndim() == 0 {
            return Ok(Item::Scalar(data.into_dimensionality::<Ix0>()?.into_scalar()));
        }
        Ok(Item::Array(Larry::from_parts_unchecked(data, self.labels_without(axis.index()))))
    }

    /// Return `true` if any element is true, over everything or along
    /// `axis`. NaN counts as true.
    ///
    /// **Errors** with `InvalidAxis` if `axis` is not an axis of the array.
    pub fn any(&self, axis: impl Into<Option<Axis>>) -> LarryResult<Item<bool>>
    where A: Element
    {
        self.reduce(
            axis.into(),
            |x| x.iter().any(Element::is_truthy),
            |x, axis| x.map_axis(axis, |lane| lane.iter().any(Element::is_truthy)),
        )
    }

    /// Return `true` if every element is true, over everything or along
    /// `axis`. NaN counts as true.
    ///
    /// **Errors** with `InvalidAxis` if `axis` is not an axis of the array.
    pub fn all(&self, axis: impl Into<Option<Axis>>) -> LarryResult<Item<bool>>
    where A: Element
    {
        self.reduce(
            axis.into(),
            |x| x.iter().all(Element::is_truthy),
            |x, axis| x.map_axis(axis, |lane| lane.iter().all(Element::is_truthy)),
        )
    }
}

macro_rules! nan_reduction {
    ($($(#[$meta:meta])* $name:ident => $whole:ident, $along:ident;)*) => {
        $(
        $(#[$meta])*
        ///
        /// With `None` the whole array is reduced to a scalar. With an axis
        /// the result drops that axis and its labels; reducing the only axis
        /// of a one dimensional array yields a scalar.
        ///
        /// **Errors** with `InvalidAxis` if `axis` is not an axis of the array.
        pub fn $name(&self, axis: impl Into<Option<Axis>>) -> LarryResult<Item<A>>
        {
            self.reduce(axis.into(), $whole, $along)
        }
        )*
    };
}

/// # Numeric Methods For Float Arrays
///
/// Missing values are NaN and are skipped by the reductions.
impl<A> Larry<A>
where A: Float + Element
{
    nan_reduction! {
        /// Sum of the non missing elements; zero if there are none.
        ///
        /// ```
        /// use larry::prelude::*;
        ///
        /// let nan = f64::NAN;
        /// let lar = Larry::from_shape_vec(&[2, 2], vec![nan, 2., 3., 4.]).unwrap();
        /// assert_eq!(lar.sum(None).unwrap(), Item::Scalar(9.));
        /// let cols = lar.sum(Axis(0)).unwrap().into_larry().unwrap();
        /// assert_eq!(cols.data().as_slice().unwrap(), &[3., 6.]);
        /// ```
        sum => nansum, nansum_axis;
        /// Product of the non missing elements; missing values count as one.
        prod => nanprod, nanprod_axis;
        /// Mean of the non missing elements.
        mean => nanmean, nanmean_axis;
        /// Median of the non missing elements.
        median => nanmedian, nanmedian_axis;
        /// Population standard deviation of the non missing elements.
        std => nanstd, nanstd_axis;
        /// Population variance of the non missing elements.
        var => nanvar, nanvar_axis;
        /// Largest non missing element.
        max => nanmax, nanmax_axis;
        /// Smallest non missing element.
        min => nanmin, nanmin_axis;
    }

    pub fn log(&self) -> Self
    {
        self.mapv(A::ln)
    }

    pub fn exp(&self) -> Self
    {
        self.mapv(A::exp)
    }

    pub fn sqrt(&self) -> Self
    {
        self.mapv(A::sqrt)
    }

    pub fn abs(&self) -> Self
    {
        self.mapv(A::abs)
    }

    /// Sign of every element: `-1`, `0` or `1`. NaN stays NaN.
    pub fn sign(&self) -> Self
    {
        self.mapv(|x| {
            if x.is_nan() || x.is_zero() {
                x
            } else {
                x.signum()
            }
        })
    }

    /// Raise every element to the power `p`.
    pub fn powf(&self, p: A) -> Self
    {
        self.mapv(|x| x.powf(p))
    }

    /// Raise every element to the integer power `p`.
    pub fn powi(&self, p: i32) -> Self
    {
        self.mapv(|x| x.powi(p))
    }

    /// Limit every element to `lo ..= hi`. NaN stays NaN.
    ///
    /// **Errors** with `InvalidArgument` if `lo > hi`.
    pub fn clip(&self, lo: A, hi: A) -> LarryResult<Self>
    {
        if lo > hi {
            return Err(from_kind(ErrorKind::InvalidArgument, "clip: lo must not exceed hi"));
        }
        Ok(self.mapv(|x| if x.is_nan() { x } else { x.max(lo).min(hi) }))
    }

    /// Cumulative sum along `axis`; missing values count as zero.
    ///
    /// ```
    /// use larry::prelude::*;
    ///
    /// let lar = Larry::from_vec(vec![1., f64::NAN, 3.], labels![["a", "b", "c"]]).unwrap();
    /// assert_eq!(lar.cumsum(0).unwrap().data().as_slice().unwrap(), &[1., 1., 4.]);
    /// ```
    pub fn cumsum(&self, axis: usize) -> LarryResult<Self>
    {
        self.accumulate(axis, A::zero(), |acc, x| acc + x)
    }

    /// Cumulative product along `axis`; missing values count as one.
    pub fn cumprod(&self, axis: usize) -> LarryResult<Self>
    {
        self.accumulate(axis, A::one(), |acc, x| acc * x)
    }

    fn accumulate<F>(&self, axis: usize, identity: A, f: F) -> LarryResult<Self>
    where F: Fn(A, A) -> A
    {
        self.check_axis(axis)?;
        let mut data = self.data.mapv(|x| if x.is_nan() { identity } else { x });
        data.accumulate_axis_inplace(Axis(axis), |&prev, curr| *curr = f(prev, *curr));
        Ok(self.with_data(data))
    }

    pub fn isnan(&self) -> Larry<bool>
    {
        self.mapv(|x| x.is_nan())
    }

    pub fn isfinite(&self) -> Larry<bool>
    {
        self.mapv(|x| Float::is_finite(x))
    }

    pub fn isinf(&self) -> Larry<bool>
    {
        self.mapv(|x| x.is_infinite())
    }

    /// Subtract the mean, of everything or along `axis`.
    ///
    /// ```
    /// use larry::prelude::*;
    ///
    /// let lar = Larry::from_shape_vec(&[4], vec![1., 2., 3., 4.]).unwrap();
    /// assert_eq!(lar.demean(None).unwrap().data().as_slice().unwrap(), &[-1.5, -0.5, 0.5, 1.5]);
    /// ```
    pub fn demean(&self, axis: impl Into<Option<Axis>>) -> LarryResult<Self>
    {
        self.centered(axis.into(), nanmean, nanmean_axis, |x, m| x - m)
    }

    /// Subtract the median, of everything or along `axis`.
    pub fn demedian(&self, axis: impl Into<Option<Axis>>) -> LarryResult<Self>
    {
        self.centered(axis.into(), nanmedian, nanmedian_axis, |x, m| x - m)
    }

    /// Subtract the mean and divide by the standard deviation, of
    /// everything or along `axis`.
    pub fn zscore(&self, axis: impl Into<Option<Axis>>) -> LarryResult<Self>
    {
        let axis = axis.into();
        self.demean(axis)?
            .centered(axis, nanstd, nanstd_axis, |x, s| x / s)
    }

    /// Combine every element with a statistic computed over everything or
    /// along `axis`, broadcasting the statistic back along that axis.
    fn centered<F>(&self, axis: Option<Axis>, whole: Whole<A, A>, along: Along<A, A>, f: F) -> LarryResult<Self>
    where F: Fn(A, A) -> A
    {
        match axis {
            None => {
                let stat = whole(self.data.view());
                Ok(self.mapv(|x| f(x, stat)))
            }
            Some(axis) => {
                let axis = self.reduction_axis(axis)?;
                let stat = along(self.data.view(), axis).insert_axis(axis);
                let stat = stat
                    .broadcast(self.data.raw_dim())
                    .ok_or_else(|| from_kind(ErrorKind::InvalidData, "statistic does not broadcast"))?;
                let mut data = self.data.clone();
                data.zip_mut_with(&stat, |x, &s| *x = f(*x, s));
                Ok(self.with_data(data))
            }
        }
    }
}

impl<A> Larry<A>
where A: Missing
{
    /// Return a copy with every missing value replaced by `value`.
    pub fn nan_replace(&self, value: A) -> Self
    {
        self.mapv(|x| if x.is_missing() { value.clone() } else { x })
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::label::to_labels;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    const NAN: f64 = f64::NAN;

    fn sample() -> Larry<f64>
    {
        Larry::new(array![[NAN, 2.0], [3.0, 4.0]], vec![to_labels(["a", "b"]), to_labels([1, 2])]).unwrap()
    }

    #[test]
    fn reductions_skip_nan()
    {
        let lar = sample();
        assert_eq!(lar.sum(None).unwrap(), Item::Scalar(9.));
        let cols = lar.sum(Axis(0)).unwrap().into_larry().unwrap();
        assert_eq!(cols.data().as_slice().unwrap(), &[3., 6.]);
        assert_eq!(cols.label(0).unwrap(), &to_labels([1, 2])[..]);
        let rows = lar.mean(Axis(1)).unwrap().into_larry().unwrap();
        assert_eq!(rows.data().as_slice().unwrap(), &[2., 3.5]);
        assert_eq!(lar.max(None).unwrap(), Item::Scalar(4.));
        assert_eq!(lar.min(None).unwrap(), Item::Scalar(2.));
        assert_eq!(lar.prod(None).unwrap(), Item::Scalar(24.));
        assert_eq!(lar.median(None).unwrap(), Item::Scalar(3.));
        let var = lar.var(None).unwrap().scalar().unwrap();
        assert_abs_diff_eq!(var, 2.0 / 3.0, epsilon = 1e-12);
        let std = lar.std(None).unwrap().scalar().unwrap();
        assert_abs_diff_eq!(std * std, var, epsilon = 1e-12);
    }

    #[test]
    fn one_dimensional_reduction_is_scalar()
    {
        let lar = Larry::from_shape_vec(&[3], vec![1., NAN, 3.]).unwrap();
        assert_eq!(lar.sum(Axis(0)).unwrap(), Item::Scalar(4.));
        assert_eq!(lar.sum(Axis(1)).unwrap_err().kind(), ErrorKind::InvalidAxis);
    }

    #[test]
    fn any_all_treat_nan_as_true()
    {
        let lar = Larry::from_array(array![[NAN, 0.0], [0.0, 0.0]]);
        assert_eq!(lar.any(None).unwrap(), Item::Scalar(true));
        assert_eq!(lar.all(None).unwrap(), Item::Scalar(false));
        let rows = lar.any(Axis(1)).unwrap().into_larry().unwrap();
        assert_eq!(rows.data().as_slice().unwrap(), &[true, false]);
        let ints = Larry::from_array(array![1, 2, 3]);
        assert_eq!(ints.all(None).unwrap(), Item::Scalar(true));
    }

    #[test]
    fn clip_and_sign()
    {
        let lar = Larry::from_array(array![-2.0, 0.0, NAN, 5.0]);
        let c = lar.clip(-1., 1.).unwrap();
        assert_eq!(c.data()[0], -1.);
        assert!(c.data()[2].is_nan());
        assert_eq!(c.data()[3], 1.);
        assert_eq!(lar.clip(1., -1.).unwrap_err().kind(), ErrorKind::InvalidArgument);
        let s = lar.sign();
        assert_eq!(s.data()[0], -1.);
        assert_eq!(s.data()[1], 0.);
        assert!(s.data()[2].is_nan());
        assert_eq!(s.data()[3], 1.);
    }

    #[test]
    fn cumulative_along_axis()
    {
        let lar = sample();
        let c = lar.cumsum(0).unwrap();
        assert_eq!(c.data(), &array![[0.0, 2.0], [3.0, 6.0]].into_dyn());
        let p = lar.cumprod(1).unwrap();
        assert_eq!(p.data(), &array![[1.0, 2.0], [3.0, 12.0]].into_dyn());
        assert_eq!(lar.cumsum(2).unwrap_err().kind(), ErrorKind::AxisOutOfBounds);
    }

    #[test]
    fn demean_along_axis()
    {
        let lar = Larry::from_array(array![[1.0, 3.0], [10.0, 20.0]]);
        let d = lar.demean(Axis(1)).unwrap();
        assert_eq!(d.data(), &array![[-1.0, 1.0], [-5.0, 5.0]].into_dyn());
        let d = lar.demedian(Axis(0)).unwrap();
        assert_eq!(d.data(), &array![[-4.5, -8.5], [4.5, 8.5]].into_dyn());
        let z = Larry::from_array(array![1.0, 2.0, 3.0]).zscore(None).unwrap();
        assert_abs_diff_eq!(z.data()[0], -1.224744871391589, epsilon = 1e-12);
        assert_abs_diff_eq!(z.data()[1], 0.0);
    }

    #[test]
    fn missing_predicates()
    {
        let lar = Larry::from_array(array![1.0, NAN, f64::INFINITY]);
        assert_eq!(lar.isnan().data().as_slice().unwrap(), &[false, true, false]);
        assert_eq!(lar.isfinite().data().as_slice().unwrap(), &[true, false, false]);
        assert_eq!(lar.isinf().data().as_slice().unwrap(), &[false, false, true]);
        assert_eq!(lar.nan_replace(0.).data().as_slice().unwrap(), &[1., 0., f64::INFINITY]);
    }
}
