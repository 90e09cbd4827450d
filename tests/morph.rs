use larry::prelude::*;
use ndarray::array;

const NAN: f64 = f64::NAN;

#[test]
fn morph_promotes_and_fills()
{
    let lar = Larry::new(array![[1i64, 2], [3, 4]], labels![["a", "b"], [1, 2]]).unwrap();
    let m = lar.morph(labels![["c", "a"]].remove(0), 0).unwrap();
    assert_eq!(m.to_labels(), labels![["c", "a"], [1, 2]]);
    assert!(m.data()[[0, 1]].is_nan());
    assert_eq!(m.data()[[1, 1]], 2.);
    assert_eq!(lar.morph(vec![], 5).unwrap_err().kind(), ErrorKind::AxisOutOfBounds);
}

#[test]
fn morph_like_follows_every_axis()
{
    let lar = Larry::new(array![[1f64, 2.], [3., 4.]], labels![["a", "b"], [1, 2]]).unwrap();
    let target = Larry::new(array![[0., 0., 0.]], labels![["b"], [3, 2, 1]]).unwrap();
    let m = lar.morph_like(&target).unwrap();
    assert_eq!(m.to_labels(), target.to_labels());
    assert!(m.data()[[0, 0]].is_nan());
    assert_eq!(m.data()[[0, 1]], 4.);
    assert_eq!(m.data()[[0, 2]], 3.);
    let flat = Larry::from_vec(vec![1.], labels![["a"]]).unwrap();
    assert_eq!(lar.morph_like(&flat).unwrap_err().kind(), ErrorKind::DimensionMismatch);
}

#[test]
fn merge_unions_labels()
{
    let a = Larry::new(array![[1., NAN], [3., 4.]], labels![["a", "c"], [1, 2]]).unwrap();
    let b = Larry::new(array![[10.], [20.]], labels![["b", "a"], [2]]).unwrap();
    let m = a.merge(&b, false).unwrap();
    assert_eq!(m.to_labels(), labels![["a", "b", "c"], [1, 2]]);
    assert_eq!(m.data()[[0, 0]], 1.);
    assert_eq!(m.data()[[0, 1]], 20.);
    assert_eq!(m.data()[[1, 1]], 10.);
    assert!(m.data()[[1, 0]].is_nan());
    assert_eq!(m.data()[[2, 1]], 4.);

    let c = Larry::new(array![[5.]], labels![["c"], [2]]).unwrap();
    assert_eq!(a.merge(&c, false).unwrap_err().kind(), ErrorKind::Overlap);
    assert_eq!(a.merge(&c, true).unwrap().data()[[1, 1]], 5.);
}

#[test]
fn merge_strings_uses_empty_as_missing()
{
    let a = Larry::from_vec(vec!["x".to_string()], labels![[1]]).unwrap();
    let b = Larry::from_vec(vec!["y".to_string()], labels![[2]]).unwrap();
    let m = a.merge(&b, false).unwrap();
    assert_eq!(m.data().as_slice().unwrap(), &["x".to_string(), "y".to_string()]);
}

#[test]
fn vacuum_keeps_all_nan_column_slices()
{
    let lar = Larry::new(array![[1., NAN], [2., NAN]], labels![["r0", "r1"], ["c0", "c1"]]).unwrap();
    let v = lar.vacuum(Some(0)).unwrap();
    assert_eq!(v.shape(), &[2, 1]);
    assert_eq!(v.to_labels(), labels![["r0", "r1"], ["c0"]]);
    assert_eq!(lar.vacuum(Some(1)).unwrap().shape(), &[2, 2]);
}

#[test]
fn vacuum_and_cut_missing()
{
    let lar = Larry::new(
        array![[1., NAN, NAN], [NAN, NAN, NAN], [3., 4., NAN]],
        labels![["a", "b", "c"], [1, 2, 3]],
    )
    .unwrap();
    let v = lar.vacuum(None).unwrap();
    assert_eq!(v.to_labels(), labels![["a", "c"], [1, 2]]);
    // searching along rows removes empty columns
    let cols = lar.vacuum(Some(0)).unwrap();
    assert_eq!(cols.to_labels(), labels![["a", "b", "c"], [1, 2]]);
    let rows = lar.vacuum(Some(1)).unwrap();
    assert_eq!(rows.to_labels(), labels![["a", "c"], [1, 2, 3]]);
    // keep columns with more than half of their values present
    let cut = lar.cut_missing(0.5, Some(0)).unwrap();
    assert_eq!(cut.to_labels(), labels![["a", "b", "c"], [1]]);
    let cut = lar.cut_missing(0.5, Some(1)).unwrap();
    assert_eq!(cut.to_labels(), labels![["c"], [1, 2, 3]]);
    let all = lar.cut_missing(1.0, None).unwrap();
    assert_eq!(all.to_labels(), labels![["a", "c"], [1, 2]]);
}

#[test]
fn lag_shifts_data_against_labels()
{
    let lar = Larry::new(array![[1, 2, 3], [4, 5, 6]], labels![["a", "b"], [1, 2, 3]]).unwrap();
    let lagged = lar.lag(2, 1).unwrap();
    assert_eq!(lagged.to_labels(), labels![["a", "b"], [3]]);
    assert_eq!(lagged.data(), &array![[1], [4]].into_dyn());
    assert_eq!(lar.lag(0, 1).unwrap(), lar);
    assert_eq!(lar.lag(9, 0).unwrap().shape(), &[0, 3]);
    assert_eq!(lar.lag(-1, 0).unwrap_err().kind(), ErrorKind::InvalidArgument);
}
