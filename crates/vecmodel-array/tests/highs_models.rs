#![allow(clippy::float_cmp)]

use ndarray::{ArrayD, IxDyn, arr1, arr2};
use vecmodel_array::{ArrayError, ArrayModel, SolverConfig, SolverStatus, VarKind};
use vecmodel_core::ModelError;
use vecmodel_highs::HighsSolver;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn assert_close(actual: &ArrayD<f64>, expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-6, "got {actual:?}, expected {expected:?}");
    }
}

/// Two sources, three sinks, supply equals demand.
#[test]
fn test_transportation_lp() {
    init_tracing();
    let mut model = ArrayModel::new();
    let ship = model
        .add_var_named("ship", (2, 3), VarKind::Continuous, Some(0.0), None)
        .unwrap();
    let cost = arr2(&[[1.0, 3.0, 2.0], [4.0, 1.0, 3.0]]);

    let supply_rows = model
        .add_con(ship.sum_axis(1).unwrap().le(arr1(&[20.0, 30.0])))
        .unwrap();
    model
        .add_cons(vec![ship.sum_axis(0).unwrap().ge(arr1(&[10.0, 25.0, 15.0]))])
        .unwrap();
    assert!(model.activity(&supply_rows).is_none());
    model
        .minimize(ship.mul_elementwise(&cost).unwrap().sum())
        .unwrap();
    assert_eq!(model.inner().num_constraints(), 5);
    assert_eq!(
        model.inner().get_variable_name(ship.get(&[1, 2]).unwrap()),
        Some("ship[1,2]")
    );

    let status = model
        .optimize(&mut HighsSolver::new(), &SolverConfig::default())
        .unwrap();
    assert_eq!(status, SolverStatus::Optimal);

    let shipped = ship.value(&model).unwrap();
    assert_eq!(shipped.shape(), &[2, 3]);
    assert_close(&shipped, &[10.0, 0.0, 10.0, 0.0, 25.0, 5.0]);
    assert!((model.objective_value().unwrap() - 70.0).abs() < 1e-6);

    let supplied = model.activity(&supply_rows).unwrap();
    assert_close(&supplied, &[20.0, 30.0]);

    let delivered = ship.sum_axis(0).unwrap().value(&model).unwrap();
    assert_close(&delivered, &[10.0, 25.0, 15.0]);
}

/// minimize y0 + y1 + y2 subject to A·y >= b, y >= 0
#[test]
fn test_covering_lp_with_matrix_product() {
    init_tracing();
    let mut model = ArrayModel::new();
    let y = model
        .add_var(3, VarKind::Continuous, Some(0.0), None)
        .unwrap();
    let coverage = arr2(&[[1.0, 2.0, 0.0], [0.0, 1.0, 3.0]]);

    model
        .add_cons(vec![y.rmatmul(&coverage).unwrap().ge(arr1(&[4.0, 6.0]))])
        .unwrap();
    model
        .minimize(y.dot(&arr1(&[1.0, 1.0, 1.0])).unwrap())
        .unwrap();

    let status = model
        .optimize(&mut HighsSolver::new(), &SolverConfig::default())
        .unwrap();
    assert_eq!(status, SolverStatus::Optimal);
    assert_close(&y.value(&model).unwrap(), &[0.0, 2.0, 4.0 / 3.0]);
    assert!((model.objective_value().unwrap() - 10.0 / 3.0).abs() < 1e-6);
}

#[test]
fn test_binary_knapsack() {
    init_tracing();
    let mut model = ArrayModel::new();
    // Bounds are ignored for binaries.
    let take = model.add_var(4, "B", Some(-5.0), Some(5.0)).unwrap();
    let weights = arr1(&[2.0, 3.0, 4.0, 5.0]);
    let values = arr1(&[3.0, 4.0, 5.0, 6.0]);

    model
        .add_cons(vec![take.dot(&weights).unwrap().le(5.0)])
        .unwrap();
    model.maximize(take.dot(&values).unwrap()).unwrap();

    let status = model
        .optimize(&mut HighsSolver::new(), &SolverConfig::new().with_mip_gap(0.0))
        .unwrap();
    assert_eq!(status, SolverStatus::Optimal);
    assert_close(&take.value(&model).unwrap(), &[1.0, 1.0, 0.0, 0.0]);
    assert!((model.objective_value().unwrap() - 7.0).abs() < 1e-6);
}

#[test]
fn test_integer_grid_with_scalar_objective() {
    init_tracing();
    let mut model = ArrayModel::new();
    let x = model
        .add_var((2, 2), VarKind::Integer, Some(0.0), Some(10.0))
        .unwrap();

    model
        .add_cons(vec![
            x.scale(2.0).le(7.0),
            x.index_axis(0, 0).unwrap().sum().le(4.0),
        ])
        .unwrap();
    model.maximize(x.sum()).unwrap();

    model
        .optimize(&mut HighsSolver::new(), &SolverConfig::default())
        .unwrap();
    let values = x.value(&model).unwrap();
    for v in values.iter() {
        assert!((v - v.round()).abs() < 1e-6);
    }
    // Row 0 is capped at 4 in total, row 1 at 3 per element.
    assert!((model.objective_value().unwrap() - 10.0).abs() < 1e-6);
}

#[test]
fn test_infeasible_model_leaves_values_unavailable() {
    init_tracing();
    let mut model = ArrayModel::new();
    let x = model
        .add_var(2, VarKind::Continuous, Some(0.0), Some(1.0))
        .unwrap();
    model.add_cons(vec![x.ge(2.0)]).unwrap();

    let result = model.optimize(&mut HighsSolver::new(), &SolverConfig::default());
    assert!(result.is_err());
    assert!(matches!(
        x.value(&model),
        Err(ArrayError::Model(ModelError::ValueUnavailable { .. }))
    ));
}

#[test]
fn test_broadcast_error_registers_nothing() {
    init_tracing();
    let mut model = ArrayModel::new();
    let x = model
        .add_var(3, VarKind::Continuous, Some(0.0), None)
        .unwrap();

    let err = model
        .add_cons(vec![x.le(1.0), x.ge(arr1(&[1.0, 2.0]))])
        .unwrap_err();
    assert_eq!(err.code(), "ARRAY_BROADCAST");
    assert!(
        err.to_string()
            .contains("could not be broadcast together with shapes (3,) (2,)")
    );
    assert_eq!(model.inner().num_constraints(), 0);
}

#[test]
fn test_resolve_after_adding_constraints() {
    init_tracing();
    let mut model = ArrayModel::new();
    let x = model
        .add_var(2, VarKind::Continuous, Some(0.0), Some(3.0))
        .unwrap();
    model.maximize(x.sum()).unwrap();

    model
        .optimize(&mut HighsSolver::new(), &SolverConfig::default())
        .unwrap();
    assert_close(&x.value(&model).unwrap(), &[3.0, 3.0]);

    model.add_cons(vec![x.sum().le(4.0)]).unwrap();
    assert!(x.value(&model).is_err());

    model
        .optimize(&mut HighsSolver::new(), &SolverConfig::default())
        .unwrap();
    let total: f64 = x.value(&model).unwrap().sum();
    assert!((total - 4.0).abs() < 1e-6);
    let summed = x.sum().value(&model).unwrap();
    assert_eq!(summed.shape(), &[] as &[usize]);
    assert!((summed[IxDyn(&[])] - total).abs() < 1e-9);
}
