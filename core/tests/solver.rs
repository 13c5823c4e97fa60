//! Linear solver tests: correctness, pivoting, singular inputs.

use airflow_core::{
    error::FlowError,
    model::ModelBuilder,
    solver::{residual, solve, solve_checked},
    synth::NetworkGenerator,
    types::Matrix,
};

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        let tol = 1e-9 * e.abs().max(1.0);
        assert!((a - e).abs() <= tol, "x[{i}] = {a}, expected {e}");
    }
}

#[test]
fn identity_with_zero_rhs_returns_exact_zeros() {
    let n = 5;
    let mut a = vec![vec![0.0; n]; n];
    for (i, row) in a.iter_mut().enumerate() {
        row[i] = 1.0;
    }
    let x = solve(a, vec![0.0; n]);
    assert_eq!(x, vec![0.0; n]);
}

/// Zero on the diagonal of row 0: only correct if rows are swapped.
#[test]
fn two_by_two_requires_pivoting() {
    let a = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
    let x = solve(a, vec![5.0, 3.0]);
    assert_eq!(x, vec![3.0, 5.0]);
}

#[test]
fn three_by_three_general_system() {
    // x + y + z = 6, 2x + y − z = 1, x − y + z = 2  →  (1, 2, 3)
    let a = vec![
        vec![1.0, 1.0, 1.0],
        vec![2.0, 1.0, -1.0],
        vec![1.0, -1.0, 1.0],
    ];
    let x = solve(a, vec![6.0, 1.0, 2.0]);
    assert_close(&x, &[1.0, 2.0, 3.0]);
}

/// Solving fresh copies of the same system gives bit-identical answers.
#[test]
fn solving_twice_is_deterministic() {
    let records = NetworkGenerator::new(99).generate(40, 4);
    let system = ModelBuilder::from_records(&records).build_system();

    let first = solve(system.a.clone(), system.b.clone());
    let second = solve(system.a.clone(), system.b.clone());
    assert_eq!(first, second);
}

/// Reordering the equations must not change the solution.
#[test]
fn row_order_does_not_change_solution() {
    let records = NetworkGenerator::new(5).generate(25, 3);
    let system = ModelBuilder::from_records(&records).build_system();
    let expected = solve(system.a.clone(), system.b.clone());

    let n = system.len();
    // Reverse, then rotate by a third: a permutation that moves every row.
    let perm: Vec<usize> = (0..n).rev().cycle().skip(n / 3).take(n).collect();
    let a: Matrix = perm.iter().map(|&i| system.a[i].clone()).collect();
    let b: Vec<f64> = perm.iter().map(|&i| system.b[i]).collect();

    let x = solve(a, b);
    assert_close(&x, &expected);
}

#[test]
fn generated_networks_satisfy_their_equations() {
    for seed in [1u64, 2, 3, 42, 0xDEAD_BEEF] {
        let records = NetworkGenerator::new(seed).generate(60, 5);
        let system = ModelBuilder::from_records(&records).build_system();
        let x = solve(system.a.clone(), system.b.clone());

        let scale = system.b.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
        let r = residual(&system.a, &x, &system.b);
        assert!(r <= 1e-9 * scale, "seed {seed}: residual {r:e}");
        assert!(x.iter().all(|v| v.is_finite() && *v >= -1e-9), "seed {seed}: bad volume");
    }
}

/// The solver does not guard against a zero pivot; the result is non-finite.
#[test]
fn singular_system_yields_non_finite_volumes() {
    let a = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
    let x = solve(a, vec![3.0, 6.0]);
    assert!(x.iter().any(|v| !v.is_finite()), "expected non-finite, got {x:?}");

    let original = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
    let r = residual(&original, &x, &[3.0, 6.0]);
    assert!(r.is_nan(), "expected NaN residual, got {r}");
}

#[test]
fn checked_solve_rejects_zero_pivot() {
    let a = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
    match solve_checked(a, vec![3.0, 6.0]) {
        Err(FlowError::SingularPivot { column }) => assert_eq!(column, 1),
        other => panic!("expected SingularPivot, got {other:?}"),
    }
}

#[test]
fn checked_solve_rejects_all_zero_column() {
    let a = vec![vec![0.0, 1.0], vec![0.0, 3.0]];
    match solve_checked(a, vec![1.0, 1.0]) {
        Err(FlowError::SingularPivot { column }) => assert_eq!(column, 0),
        other => panic!("expected SingularPivot, got {other:?}"),
    }
}

#[test]
fn checked_solve_rejects_bad_shapes() {
    let ragged = vec![vec![1.0, 0.0], vec![0.0]];
    assert!(matches!(
        solve_checked(ragged, vec![1.0, 1.0]),
        Err(FlowError::DimensionMismatch { rows: 2, cols: 1, rhs: 2 })
    ));

    let short_rhs = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
    assert!(matches!(
        solve_checked(short_rhs, vec![1.0]),
        Err(FlowError::DimensionMismatch { rows: 2, cols: 2, rhs: 1 })
    ));
}

#[test]
fn checked_and_unchecked_agree_on_regular_systems() {
    let records = NetworkGenerator::new(11).generate(30, 3);
    let system = ModelBuilder::from_records(&records).build_system();
    let plain = solve(system.a.clone(), system.b.clone());
    let checked = solve_checked(system.a, system.b).expect("non-singular");
    assert_eq!(plain, checked);
}
