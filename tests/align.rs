use larry::prelude::*;
use larry_gen::larry_builder::{LabelStyle, LarryBuilder};
use ndarray::array;
use quickcheck::quickcheck;

#[test]
fn intersection_is_sorted()
{
    let a = Larry::new(array![[1., 2.], [3., 4.], [5., 6.]], labels![["c", "a", "b"], [1, 2]]).unwrap();
    let b = Larry::new(array![[10., 20.], [30., 40.]], labels![["b", "c"], [1, 2]]).unwrap();
    let (a2, b2) = a.align(&b).unwrap();
    assert_eq!(a2.to_labels(), labels![["b", "c"], [1, 2]]);
    assert_eq!(b2.to_labels(), a2.to_labels());
    assert_eq!(a2.data(), &array![[5., 6.], [1., 2.]].into_dyn());
    assert_eq!(b2.data(), &array![[10., 20.], [30., 40.]].into_dyn());
}

#[test]
fn identical_labels_keep_their_order()
{
    let a = Larry::from_vec(vec![1, 2, 3], labels![["z", "x", "y"]]).unwrap();
    let b = Larry::from_vec(vec![4, 5, 6], labels![["z", "x", "y"]]).unwrap();
    assert!(a.is_aligned_with(&b));
    let (a2, b2) = a.align(&b).unwrap();
    assert_eq!(a2, a);
    assert_eq!(b2, b);
}

#[test]
fn alignment_errors()
{
    let a = Larry::from_vec(vec![1., 2.], labels![["a", "b"]]).unwrap();
    let disjoint = Larry::from_vec(vec![1., 2.], labels![["c", "d"]]).unwrap();
    assert_eq!(a.align(&disjoint).unwrap_err().kind(), ErrorKind::NoOverlap);
    let two_d = LarryBuilder::new(&[2, 2]).build::<f64>();
    let err = a.align(&two_d).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    assert_eq!(err.class(), ErrorClass::Index);
}

#[test]
fn partial_overlap_from_builder()
{
    let a = LarryBuilder::new(&[4, 3]).labels(LabelStyle::Str).build::<i32>();
    let b = LarryBuilder::new(&[4, 3])
        .labels(LabelStyle::Str)
        .label_offset(2)
        .descending(true)
        .build::<i32>();
    let (a2, b2) = a.align(&b).unwrap();
    assert_eq!(a2.shape(), &[2, 1]);
    assert_eq!(a2.to_labels(), labels![["a2", "a3"], ["b2"]]);
    assert_eq!(a2.data(), &array![[8], [11]].into_dyn());
    assert_eq!(b2.data(), &array![[11], [8]].into_dyn());
}

quickcheck! {
    fn fast_path_matches_aligned_path(values: Vec<i16>) -> bool {
        let n = values.len().min(8);
        if n == 0 {
            return true;
        }
        let x: Vec<f64> = values[..n].iter().map(|&v| f64::from(v)).collect();
        let labels: Vec<Label> = (0..n as i64).map(Label::from).collect();
        let mut reversed = labels.clone();
        reversed.reverse();
        let a = Larry::from_vec(x.clone(), vec![labels.clone()]).unwrap();
        let b = Larry::from_vec(x.iter().rev().copied().collect(), vec![reversed]).unwrap();
        // same labels in the same order take the fast path
        let fast = (&a + &a).unwrap();
        // reversed labels go through alignment, which sorts them back
        let slow = (&a + &b).unwrap();
        fast == slow
    }
}
