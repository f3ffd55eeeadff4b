use diminish_core::{BoundCurve, Curve, CurveKind};
use ndarray::{Array1, Array2};
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = CurveKind> {
    prop::sample::select(CurveKind::ALL.to_vec())
}

fn kernel_strategy() -> impl Strategy<Value = CurveKind> {
    prop::sample::select(vec![
        CurveKind::ExponentialKernel,
        CurveKind::GaussianKernel,
        CurveKind::PowerLawKernel,
        CurveKind::RectangularHyperbolaKernel,
        CurveKind::ExpPowerKernel,
    ])
}

proptest! {
    #[test]
    fn output_shape_matches_input(
        kind in kind_strategy(),
        rows in 1usize..6,
        cols in 1usize..6,
        seed in -50.0f64..50.0,
    ) {
        let x = Array2::from_shape_fn((rows, cols), |(i, j)| seed + (i * cols + j) as f64);
        let y = Curve::<f64>::default_for(kind).evaluate(&x).unwrap();
        prop_assert_eq!(y.shape(), x.shape());
    }

    #[test]
    fn non_positive_kernel_parameter_gives_all_nan(
        kind in kernel_strategy(),
        bad in -10.0f64..=0.0,
        which in 0usize..2,
        r in prop::collection::vec(-100.0f64..100.0, 1..40),
    ) {
        let names = kind.param_names();
        let name = names[which % names.len()];
        let curve = Curve::from_params(kind, [(name, bad)]).unwrap();
        let y = curve.evaluate(&Array1::from(r)).unwrap();
        prop_assert!(y.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn decay_and_growth_nan_exactly_outside_domain(
        growth in any::<bool>(),
        a in -5.0f64..5.0,
        p in 0.1f64..4.0,
        b in -5.0f64..5.0,
        x in prop::collection::vec(-10.0f64..10.0, 1..40),
    ) {
        let curve = if growth {
            Curve::from_params(CurveKind::LogGrowth, [("a", a), ("b", b)]).unwrap()
        } else {
            Curve::from_params(CurveKind::PowerLawDecay, [("a", a), ("p", p), ("b", b)]).unwrap()
        };
        let y = curve.evaluate_slice(&x).unwrap();
        for (xi, yi) in x.iter().zip(&y) {
            if xi + b > 0.0 {
                prop_assert!(!yi.is_nan(), "x={} b={} gave NaN", xi, b);
            } else {
                prop_assert!(yi.is_nan(), "x={} b={} gave {}", xi, b, yi);
            }
        }
    }

    #[test]
    fn math_str_is_independent_of_parameters(kind in kind_strategy(), value in -10.0f64..10.0) {
        let names = kind.param_names();
        let bound = Curve::from_params(kind, names.iter().map(|n| (*n, value))).unwrap();
        prop_assert_eq!(bound.math_str(), Curve::<f64>::default_for(kind).math_str());
        prop_assert!(!bound.params_str().unwrap().contains('x'));
    }
}

#[test]
fn end_to_end_power_law_decay() {
    let f = Curve::from_params(CurveKind::PowerLawDecay, [("a", 2.0), ("p", 1.5), ("b", 0.0)])
        .unwrap();
    let y = f.evaluate_slice(&[0.1, 1.0, 10.0]).unwrap();
    assert!((y[0] - 63.246).abs() < 1e-3);
    assert!((y[1] - 2.0).abs() < 1e-12);
    assert!((y[2] - 0.0632).abs() < 1e-4);

    let f = Curve::from_params(CurveKind::PowerLawDecay, [("a", 1.0), ("p", 1.0), ("b", 0.0)])
        .unwrap();
    assert!(f.evaluate_slice(&[-1.0]).unwrap()[0].is_nan());
}

#[test]
fn end_to_end_exponential_kernel() {
    let k = Curve::from_params(CurveKind::ExponentialKernel, [("lam", 2.0)]).unwrap();
    let y = k.evaluate_slice(&[0.0, 2.0, 10.0]).unwrap();
    assert_eq!(y[0], 1.0);
    assert!((y[1] - 0.3679).abs() < 1e-4);
    assert!((y[2] - 0.0067).abs() < 1e-4);
    assert_eq!(k.params_str().unwrap(), "lam=2.00");
}

#[test]
fn bound_curves_evaluate_concurrently() {
    let curve = Curve::from_params(CurveKind::GaussianKernel, [("sigma", 3.0)]).unwrap();
    let x: Vec<f64> = (0..500).map(|i| i as f64 * 0.05).collect();
    let expected = curve.evaluate_slice(&x).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| curve.evaluate_slice(&x).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
