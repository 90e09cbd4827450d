// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use larry::{Label, Larry};
use ndarray::{Array, IxDyn, Order};

use num_traits::{Float, Num};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LarryBuilder
{
    shape: Vec<usize>,
    memory_order: Order,
    generator: ElementGenerator,
    labels: LabelStyle,
    label_offset: i64,
    descending: bool,
}

/// How to generate elements
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementGenerator
{
    Sequential,
    Zero,
}

/// How to generate the labels of each axis
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LabelStyle
{
    /// `offset, offset + 1, ...`
    Int,
    /// `a0, a1, ...` on axis 0, `b0, b1, ...` on axis 1 and so on.
    Str,
}

impl LarryBuilder
{
    pub fn new(shape: &[usize]) -> Self
    {
        LarryBuilder {
            shape: shape.to_vec(),
            memory_order: Order::RowMajor,
            generator: ElementGenerator::Sequential,
            labels: LabelStyle::Int,
            label_offset: 0,
            descending: false,
        }
    }

    /// Order in which sequential elements fill the array.
    pub fn memory_order(mut self, order: Order) -> Self
    {
        self.memory_order = order;
        self
    }

    pub fn generator(mut self, generator: ElementGenerator) -> Self
    {
        self.generator = generator;
        self
    }

    pub fn labels(mut self, style: LabelStyle) -> Self
    {
        self.labels = style;
        self
    }

    /// Start the label numbering of every axis at `offset`, so that two
    /// arrays built with different offsets overlap partially.
    pub fn label_offset(mut self, offset: i64) -> Self
    {
        self.label_offset = offset;
        self
    }

    /// Put the labels of every axis in descending order.
    pub fn descending(mut self, descending: bool) -> Self
    {
        self.descending = descending;
        self
    }

    fn axis_labels(&self, axis: usize, len: usize) -> Vec<Label>
    {
        let mut labels: Vec<Label> = (0..len as i64)
            .map(|i| {
                let n = self.label_offset + i;
                match self.labels {
                    LabelStyle::Int => Label::from(n),
                    LabelStyle::Str => Label::from(format!("{}{}", (b'a' + (axis % 26) as u8) as char, n)),
                }
            })
            .collect();
        if self.descending {
            labels.reverse();
        }
        labels
    }

    pub fn build<T>(&self) -> Larry<T>
    where T: Num + Clone
    {
        let mut current = T::zero();
        let size = self.shape.iter().product();
        let use_zeros = self.generator == ElementGenerator::Zero;
        let data = Array::from_iter((0..size).map(|_| {
            let ret = current.clone();
            if !use_zeros {
                current = ret.clone() + T::one();
            }
            ret
        }))
        .into_shape_with_order((IxDyn(&self.shape), self.memory_order))
        .unwrap();
        let labels = self
            .shape
            .iter()
            .enumerate()
            .map(|(axis, &len)| self.axis_labels(axis, len))
            .collect();
        Larry::new(data, labels).unwrap()
    }

    /// Like [`LarryBuilder::build`], with every `every`-th element (in row
    /// major order) set to NaN.
    pub fn build_with_missing<T>(&self, every: usize) -> Larry<T>
    where T: Float
    {
        let lar = self.build::<T>();
        let (data, labels) = lar.into_parts();
        let mut k = 0;
        let data = data.mapv_into(|x| {
            k += 1;
            if every > 0 && k % every == 0 {
                T::nan()
            } else {
                x
            }
        });
        Larry::new(data, labels).unwrap()
    }
}

#[test]
fn test_labels()
{
    let lar = LarryBuilder::new(&[2, 3])
        .labels(LabelStyle::Str)
        .label_offset(1)
        .build::<i32>();
    assert_eq!(lar.label(0).unwrap(), &[Label::from("a1"), Label::from("a2")]);
    assert_eq!(lar.label(1).unwrap()[2], Label::from("b3"));
    assert_eq!(lar.data()[[1, 0]], 3);

    let f = LarryBuilder::new(&[2, 3])
        .memory_order(Order::ColumnMajor)
        .descending(true)
        .build::<i32>();
    assert_eq!(f.data()[[1, 0]], 1);
    assert_eq!(f.label(1).unwrap()[0], Label::from(2));
}

#[test]
fn test_missing()
{
    let lar = LarryBuilder::new(&[4]).build_with_missing::<f64>(2);
    assert_eq!(lar.data()[0], 0.);
    assert!(lar.data()[1].is_nan());
    assert!(lar.data()[3].is_nan());
}
