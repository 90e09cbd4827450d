use approx::assert_relative_eq;
use larry::prelude::*;
use larry::stats::{self, Norm};
use ndarray::{Array2, Axis};
use num_traits::Float;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, StandardNormal};

/// Random normal data with about `missing` of the elements set to NaN.
fn random_with_missing<A>(rows: usize, cols: usize, missing: f64, rng: &mut SmallRng) -> Array2<A>
where
    A: Float,
    StandardNormal: Distribution<A>,
{
    let normal = Normal::new(A::zero(), A::one()).unwrap();
    Array2::from_shape_fn((rows, cols), |_| {
        if rng.random::<f64>() < missing {
            A::nan()
        } else {
            normal.sample(&mut *rng)
        }
    })
}

fn finite(values: impl Iterator<Item = f64>) -> Vec<f64>
{
    values.filter(|v| !v.is_nan()).collect()
}

fn reference_mean(v: &[f64]) -> f64
{
    v.iter().sum::<f64>() / v.len() as f64
}

fn reference_var(v: &[f64]) -> f64
{
    let m = reference_mean(v);
    v.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / v.len() as f64
}

fn reference_median(v: &[f64]) -> f64
{
    let mut v = v.to_vec();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let n = v.len();
    if n % 2 == 1 {
        v[n / 2]
    } else {
        (v[n / 2 - 1] + v[n / 2]) / 2.
    }
}

#[test]
fn reductions_match_reference()
{
    let mut rng = SmallRng::seed_from_u64(42);
    for &(rows, cols) in &[(1, 1), (7, 3), (50, 40), (3, 101)] {
        let x = random_with_missing::<f64>(rows, cols, 0.2, &mut rng);
        let lar = Larry::from_array(x.clone());
        let v = finite(x.iter().copied());
        if v.is_empty() {
            continue;
        }
        let sum = lar.sum(None).unwrap().scalar().unwrap();
        assert_relative_eq!(sum, v.iter().sum::<f64>(), epsilon = 1e-9);
        let mean = lar.mean(None).unwrap().scalar().unwrap();
        assert_relative_eq!(mean, reference_mean(&v), epsilon = 1e-12);
        let var = lar.var(None).unwrap().scalar().unwrap();
        assert_relative_eq!(var, reference_var(&v), epsilon = 1e-10);
        let median = lar.median(None).unwrap().scalar().unwrap();
        assert_relative_eq!(median, reference_median(&v), epsilon = 1e-12);
    }
}

#[test]
fn axis_reductions_match_lanes()
{
    let mut rng = SmallRng::seed_from_u64(3);
    let x = random_with_missing::<f64>(30, 12, 0.3, &mut rng);
    let lar = Larry::from_array(x.clone());
    let means = lar.mean(Axis(0)).unwrap().into_larry().unwrap();
    let maxes = lar.max(Axis(0)).unwrap().into_larry().unwrap();
    for (j, col) in x.columns().into_iter().enumerate() {
        let v = finite(col.iter().copied());
        if v.is_empty() {
            assert!(means.data()[j].is_nan());
            continue;
        }
        assert_relative_eq!(means.data()[j], reference_mean(&v), epsilon = 1e-12);
        let max = v.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(maxes.data()[j], max);
    }
}

#[test]
fn single_precision_tracks_double()
{
    let mut rng = SmallRng::seed_from_u64(11);
    let x = random_with_missing::<f32>(100, 100, 0.1, &mut rng);
    let single = Larry::from_array(x.clone());
    let double = Larry::from_array(x.mapv(f64::from));
    let s = single.std(None).unwrap().scalar().unwrap();
    let d = double.std(None).unwrap().scalar().unwrap();
    assert_relative_eq!(f64::from(s), d, max_relative = 1e-3);
}

#[test]
fn zscore_is_standardized()
{
    let mut rng = SmallRng::seed_from_u64(5);
    let x = random_with_missing::<f64>(20, 200, 0.1, &mut rng);
    let z = Larry::from_array(x).zscore(Axis(1)).unwrap();
    for i in 0..20 {
        let row = finite(z.data().index_axis(Axis(0), i).iter().copied());
        assert_relative_eq!(reference_mean(&row), 0., epsilon = 1e-12);
        assert_relative_eq!(reference_var(&row), 1., epsilon = 1e-12);
    }
}

#[test]
fn ranks_are_uniform_without_ties()
{
    let mut rng = SmallRng::seed_from_u64(9);
    let x = random_with_missing::<f64>(1, 101, 0., &mut rng);
    let r = stats::ranking(x.view(), Axis(1), Norm::MinusOneToOne, true);
    let mut ranks = r.iter().copied().collect::<Vec<_>>();
    ranks.sort_by(|a, b| a.partial_cmp(b).unwrap());
    for (k, &rank) in ranks.iter().enumerate() {
        assert_relative_eq!(rank, -1. + k as f64 / 50., epsilon = 1e-12);
    }
}

#[test]
fn covariance_of_independent_rows()
{
    let mut rng = SmallRng::seed_from_u64(17);
    let x = random_with_missing::<f64>(3, 20000, 0.05, &mut rng);
    let cov = Larry::from_array(x).cov().unwrap();
    for i in 0..3 {
        assert_relative_eq!(cov.data()[[i, i]], 1., epsilon = 0.05);
        for j in 0..3 {
            if i != j {
                assert!(cov.data()[[i, j]].abs() < 0.05);
                assert_eq!(cov.data()[[i, j]], cov.data()[[j, i]]);
            }
        }
    }
}
