use larry::prelude::*;
use ndarray::array;
use quickcheck::{quickcheck, TestResult};

#[test]
fn flatten_three_dimensions()
{
    let lar = Larry::new(
        array![[[1i64, 2], [3, 4]], [[5, 6], [7, 8]]],
        labels![["a", "b"], ["c", "d"], [1, 2]],
    )
    .unwrap();
    let flat = lar.flatten(Order::RowMajor);
    assert_eq!(flat.shape(), &[8]);
    assert_eq!(flat.label(0).unwrap()[5], Label::from(("b", "c", 2)));
    assert_eq!(flat.data()[5], 6);
    let back = flat.unflatten().unwrap();
    assert_eq!(back.to_labels(), lar.to_labels());
    assert_eq!(back.data(), &lar.data().mapv(|x| x as f64));
}

#[test]
fn flatten_strings()
{
    let lar = Larry::from_vec(vec!["p".to_string(), "q".to_string()], labels![[1, 2]]).unwrap();
    let back = lar.flatten(Order::ColumnMajor).unflatten().unwrap();
    assert_eq!(back, lar);
}

#[test]
fn tuples_skip_holes_in_order_of_appearance()
{
    let tuples = vec![
        (vec![Label::from("y"), Label::from(2)], 1f64),
        (vec![Label::from("x"), Label::from(1)], 2.),
        (vec![Label::from("y"), Label::from(1)], 3.),
    ];
    let lar = Larry::from_tuples(tuples).unwrap();
    assert_eq!(lar.to_labels(), labels![["y", "x"], [2, 1]]);
    assert!(lar.data()[[1, 0]].is_nan());
    assert_eq!(lar.data()[[0, 1]], 3.);
    let ragged = vec![(vec![Label::from("y")], 1f64), (vec![Label::from("x"), Label::from(1)], 2.)];
    assert_eq!(Larry::from_tuples(ragged).unwrap_err().kind(), ErrorKind::InvalidData);
}

quickcheck! {
    fn flatten_round_trip(values: Vec<i32>, cols: u8) -> TestResult {
        let cols = usize::from(cols % 4) + 1;
        if values.is_empty() || values.len() % cols != 0 {
            return TestResult::discard();
        }
        let rows = values.len() / cols;
        let lar = Larry::from_shape_vec(&[rows, cols], values.clone()).unwrap();
        let expected = lar.mapv(f64::from);
        let row_major = lar.flatten(Order::RowMajor).unflatten().unwrap();
        let col_major = lar.flatten(Order::ColumnMajor).unflatten().unwrap();
        TestResult::from_bool(row_major == expected && col_major == expected)
    }
}
