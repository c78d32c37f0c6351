use super::*;
use ndarray::{arr1, arr2, array};
use vecmodel_core::{ModelError, Solution};
use vecmodel_expr::{ComparisonSense, Expr};

/// Backend that assigns `value_of(index)` to every variable.
struct FixedSolver<F: Fn(usize) -> f64> {
    value_of: F,
}

impl<F: Fn(usize) -> f64> Solver for FixedSolver<F> {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn solve(&mut self, model: &Model, _config: &SolverConfig) -> Result<Solution, SolverError> {
        Ok(Solution {
            primal_values: (0..model.num_variables()).map(&self.value_of).collect(),
            row_values: Vec::new(),
            objective_value: 0.0,
            status: SolverStatus::Optimal,
            solve_time_seconds: 0.0,
        })
    }
}

fn solve_with<F: Fn(usize) -> f64>(model: &mut ArrayModel, value_of: F) {
    let mut solver = FixedSolver { value_of };
    let status = model.optimize(&mut solver, &SolverConfig::default()).unwrap();
    assert_eq!(status, SolverStatus::Optimal);
}

#[test]
fn test_add_var_shapes_and_counts() {
    let mut model = ArrayModel::new();
    let cases: Vec<(Vec<usize>, VarKind)> = vec![
        (vec![], VarKind::Continuous),
        (vec![3], VarKind::Binary),
        (vec![2, 3], VarKind::Continuous),
        (vec![2, 1, 2], VarKind::Binary),
    ];
    for (shape, kind) in cases {
        let before = model.inner().num_variables();
        let x = model.add_var(shape.clone(), kind, None, None).unwrap();
        assert_eq!(x.shape(), shape.as_slice());
        let expected: usize = shape.iter().product();
        assert_eq!(model.inner().num_variables() - before, expected);
    }
}

#[test]
fn test_add_var_allocates_row_major() {
    let mut model = ArrayModel::new();
    let x = model.add_var((2, 2), "C", Some(0.0), Some(4.0)).unwrap();
    let ids: Vec<u32> = x.iter().map(|id| id.inner()).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    let var = model.inner().get_variable(x.get(&[1, 0]).unwrap()).unwrap();
    assert_eq!((var.bounds.lower, var.bounds.upper), (0.0, 4.0));
    assert!(!var.is_integer);
}

#[test]
fn test_binary_add_var_ignores_bounds() {
    let mut model = ArrayModel::new();
    let x = model.add_var(3, 'B', Some(-5.0), Some(5.0)).unwrap();
    for var_id in x.iter() {
        let var = model.inner().get_variable(var_id).unwrap();
        assert_eq!((var.bounds.lower, var.bounds.upper), (0.0, 1.0));
        assert!(var.is_integer);
    }
}

#[test]
fn test_integer_kind_is_passed_through() {
    let mut model = ArrayModel::new();
    let x = model.add_var([2], "I", Some(1.0), Some(9.0)).unwrap();
    let var = model.inner().get_variable(x.get(&[0]).unwrap()).unwrap();
    assert!(var.is_integer);
    assert_eq!((var.bounds.lower, var.bounds.upper), (1.0, 9.0));
}

#[test]
fn test_unknown_kind_error_comes_from_model() {
    let mut model = ArrayModel::new();
    let err = model.add_var([2], "S", None, None).unwrap_err();
    assert_eq!(
        err,
        ArrayError::Model(ModelError::UnsupportedVariableKind {
            tag: "S".to_string()
        })
    );
    assert_eq!(model.inner().num_variables(), 0);
}

#[test]
fn test_add_var_named() {
    let mut model = ArrayModel::new();
    let x = model
        .add_var_named("flow", (2, 2), VarKind::Continuous, Some(0.0), None)
        .unwrap();
    let y = model
        .add_var_named("total", (), VarKind::Continuous, None, None)
        .unwrap();
    assert_eq!(
        model.inner().get_variable_name(x.get(&[1, 0]).unwrap()),
        Some("flow[1,0]")
    );
    assert_eq!(model.inner().get_variable_name(y.get(&[]).unwrap()), Some("total"));
    assert_eq!(model.inner().num_named_variables(), 5);
    assert_eq!(model.inner().get_variable_by_name("flow[0,1]"), x.get(&[0, 1]));
}

#[test]
fn test_array_wraps_existing_variables() {
    let mut model = ArrayModel::new();
    let a = model.inner_mut().add_variable(&VarKind::Continuous, None, None).unwrap();
    let b = model.inner_mut().add_variable(&VarKind::Continuous, None, None).unwrap();
    let before = model.inner().num_variables();

    let x = model.array(array![[a, b], [b, a]]).unwrap();

    assert_eq!(x.shape(), &[2, 2]);
    assert_eq!(x.get(&[1, 0]), Some(b));
    assert_eq!(x.token(), model.token());
    assert_eq!(model.inner().num_variables(), before);
}

#[test]
fn test_array_rejects_unknown_variables() {
    let model = ArrayModel::new();
    let ghost = VariableId::new(0);
    assert_eq!(
        model.array(arr1(&[ghost])).unwrap_err(),
        ArrayError::Model(ModelError::InvalidVariableId(ghost))
    );
}

#[test]
fn test_array_from_shape_vec_checks_length() {
    let mut model = ArrayModel::new();
    let x = model.add_var(3, VarKind::Continuous, None, None).unwrap();
    let ids: Vec<VariableId> = x.iter().collect();

    let wrapped = model.array_from_shape_vec([3, 1], ids.clone()).unwrap();
    assert_eq!(wrapped.shape(), &[3, 1]);

    let err = model.array_from_shape_vec((2, 2), ids).unwrap_err();
    assert!(matches!(err, ArrayError::Shape { .. }));
}

#[test]
fn test_comparison_does_not_mutate_model() {
    let mut model = ArrayModel::new();
    let x = model.add_var((2, 2), VarKind::Continuous, None, None).unwrap();
    let y = model.add_var((2, 2), VarKind::Continuous, None, None).unwrap();
    let before = (model.inner().num_variables(), model.inner().num_constraints());

    let cmp = x.le(&y);

    assert_eq!(cmp.sense(), ComparisonSense::LessEqual);
    assert_eq!(cmp.lhs(), &x.to_exprs());
    assert_eq!(
        (model.inner().num_variables(), model.inner().num_constraints()),
        before
    );
}

#[test]
fn test_add_cons_scalar_rhs_adds_one_row_per_element() {
    let mut model = ArrayModel::new();
    let x = model.add_var((2, 2), VarKind::Continuous, None, None).unwrap();

    model.add_cons(vec![x.le(7.0)]).unwrap();

    assert_eq!(model.inner().num_constraints(), 4);
    for ((constraint_id, row), var_id) in model.inner().constraints().zip(x.iter()) {
        assert_eq!(row.terms, vec![(var_id, 1.0)], "row {constraint_id}");
        assert_eq!(row.bounds.upper, 7.0);
        assert_eq!(row.bounds.lower, f64::NEG_INFINITY);
    }
}

#[test]
fn test_add_cons_scalar_variable_rhs() {
    let mut model = ArrayModel::new();
    let x = model.add_var((2, 2), VarKind::Continuous, None, None).unwrap();
    let y = model.add_var((), VarKind::Continuous, None, None).unwrap();
    let y_id = y.get(&[]).unwrap();

    model.add_cons(vec![x.le(y_id)]).unwrap();

    assert_eq!(model.inner().num_constraints(), 4);
    let (_, last) = model.inner().constraints().last().unwrap();
    assert_eq!(last.terms, vec![(x.get(&[1, 1]).unwrap(), 1.0), (y_id, -1.0)]);
    assert_eq!(last.bounds.upper, 0.0);
}

#[test]
fn test_add_cons_broadcast_failure_names_shapes_and_adds_nothing() {
    let mut model = ArrayModel::new();
    let x = model.add_var(3, VarKind::Continuous, None, None).unwrap();
    let y = model.add_var(2, VarKind::Continuous, None, None).unwrap();

    let err = model.add_cons(vec![x.ge(0.0), x.le(&y)]).unwrap_err();

    assert_eq!(
        err,
        ArrayError::Broadcast {
            lhs: vec![3],
            rhs: vec![2]
        }
    );
    assert!(err.to_string().contains("(3,) (2,)"));
    assert_eq!(model.inner().num_constraints(), 0);
}

#[test]
fn test_add_cons_preserves_list_and_element_order() {
    let mut model = ArrayModel::new();
    let x = model.add_var(2, VarKind::Continuous, None, None).unwrap();

    model
        .add_cons(vec![x.equal(arr1(&[1.0, 2.0])), x.ge(arr2(&[[0.5, 0.25]]))])
        .unwrap_err();
    assert_eq!(model.inner().num_constraints(), 0);

    model
        .add_cons(vec![x.equal(arr1(&[1.0, 2.0])), x.ge(arr1(&[0.5, 0.25]))])
        .unwrap();

    let bounds: Vec<(f64, f64)> = model
        .inner()
        .constraints()
        .map(|(_, row)| (row.bounds.lower, row.bounds.upper))
        .collect();
    assert_eq!(
        bounds,
        vec![
            (1.0, 1.0),
            (2.0, 2.0),
            (0.5, f64::INFINITY),
            (0.25, f64::INFINITY)
        ]
    );
}

#[test]
fn test_add_cons_not_equal_is_rejected_by_model() {
    let mut model = ArrayModel::new();
    let x = model.add_var(2, VarKind::Integer, Some(0.0), Some(3.0)).unwrap();
    let err = model.add_cons(vec![x.not_equal(1.0)]).unwrap_err();
    assert_eq!(
        err,
        ArrayError::Model(ModelError::UnsupportedComparison {
            sense: ComparisonSense::NotEqual
        })
    );
}

#[test]
fn test_add_cons_model_error_keeps_earlier_rows() {
    let mut model = ArrayModel::new();
    let x = model.add_var(2, VarKind::Continuous, None, None).unwrap();

    let err = model
        .add_cons(vec![x.ge(0.0), x.not_equal(1.0)])
        .unwrap_err();

    assert_eq!(
        err,
        ArrayError::Model(ModelError::UnsupportedComparison {
            sense: ComparisonSense::NotEqual
        })
    );
    assert_eq!(model.inner().num_constraints(), 2);
}

#[test]
fn test_add_cons_unknown_scalar_variable_adds_nothing() {
    let mut model = ArrayModel::new();
    let mut other = ArrayModel::new();
    let x = model.add_var(2, VarKind::Continuous, None, None).unwrap();
    let wide = other.add_var(5, VarKind::Continuous, None, None).unwrap();
    let ghost = wide.get(&[4]).unwrap();

    let err = model
        .add_cons(vec![x.ge(0.0), x.le(ghost)])
        .unwrap_err();

    assert_eq!(err, ArrayError::Model(ModelError::InvalidVariableId(ghost)));
    assert_eq!(model.inner().num_constraints(), 0);

    let err = model.add_con(x.equal(Expr::term(ghost, 2.0))).unwrap_err();
    assert_eq!(err.code(), "VARIABLE_INVALID_ID");
    assert_eq!(model.inner().num_constraints(), 0);
}

#[test]
fn test_set_objective_rejects_unknown_scalar_variable() {
    let mut model = ArrayModel::new();
    let mut other = ArrayModel::new();
    model.add_var(1, VarKind::Continuous, None, None).unwrap();
    let wide = other.add_var(3, VarKind::Continuous, None, None).unwrap();
    let ghost = wide.get(&[2]).unwrap();

    let err = model.maximize(ghost).unwrap_err();

    assert_eq!(err, ArrayError::Model(ModelError::InvalidVariableId(ghost)));
    assert!(model.inner().objective().sense.is_none());
}

#[test]
fn test_add_cons_rejects_foreign_arrays() {
    let mut model = ArrayModel::new();
    let mut other = ArrayModel::new();
    let x = other.add_var(2, VarKind::Continuous, None, None).unwrap();
    assert_eq!(
        model.add_cons(vec![x.le(1.0)]).unwrap_err(),
        ArrayError::ForeignModel
    );
}

#[test]
fn test_add_con_returns_ids_in_lhs_shape() {
    let mut model = ArrayModel::new();
    let x = model.add_var((2, 3), VarKind::Continuous, None, None).unwrap();
    let ids = model.add_con(x.sum_axis(1).unwrap().le(arr1(&[4.0, 5.0]))).unwrap();
    assert_eq!(ids.shape(), &[2]);
    let row = model.inner().get_constraint(ids[[1]]).unwrap();
    assert_eq!(row.terms.len(), 3);
    assert_eq!(row.bounds.upper, 5.0);
}

#[test]
fn test_set_objective_single_element_array_matches_element() {
    let mut model = ArrayModel::new();
    let x = model.add_var(1, VarKind::Continuous, None, None).unwrap();

    model.set_objective(&x, Sense::Maximize).unwrap();
    let from_array = model.inner().objective().clone();

    model
        .set_objective(x.get(&[0]).unwrap(), Sense::Maximize)
        .unwrap();
    assert_eq!(model.inner().objective(), &from_array);
    assert_eq!(from_array.sense, Some(Sense::Maximize));
}

#[test]
fn test_set_objective_accepts_zero_dimensional_sum() {
    let mut model = ArrayModel::new();
    let x = model.add_var((2, 2), VarKind::Binary, None, None).unwrap();
    model.minimize(x.sum()).unwrap();
    assert_eq!(model.inner().objective().terms.len(), 4);
}

#[test]
fn test_set_objective_rejects_larger_arrays() {
    let mut model = ArrayModel::new();
    let x = model.add_var(2, VarKind::Continuous, None, None).unwrap();
    let err = model.set_objective(&x, Sense::Minimize).unwrap_err();
    assert_eq!(err, ArrayError::ObjectiveShape { shape: vec![2] });
    assert!(err.to_string().contains("(2,)"));
    assert!(model.inner().objective().sense.is_none());
}

#[test]
fn test_set_objective_passes_scalar_expr_unchanged() {
    let mut model = ArrayModel::new();
    let x = model.add_var(2, VarKind::Continuous, None, None).unwrap();
    let expr = Expr::term(x.get(&[0]).unwrap(), 2.0).add_constant(3.0);
    model.minimize(expr).unwrap();
    assert_eq!(model.inner().objective().constant, 3.0);
}

#[test]
fn test_value_before_solve_propagates_model_error() {
    let mut model = ArrayModel::new();
    let x = model.add_var(2, VarKind::Continuous, None, None).unwrap();
    let first = x.get(&[0]).unwrap();
    assert_eq!(
        x.value(&model).unwrap_err(),
        ArrayError::Model(ModelError::ValueUnavailable { var_id: first })
    );
}

#[test]
fn test_value_after_solve_has_same_shape() {
    let mut model = ArrayModel::new();
    let x = model.add_var((2, 3), VarKind::Continuous, None, None).unwrap();
    solve_with(&mut model, |index| index as f64 * 10.0);

    let values = x.value(&model).unwrap();

    assert_eq!(values.shape(), &[2, 3]);
    assert_eq!(values[[1, 2]], 50.0);
    assert_eq!(x.value(&model).unwrap(), values);
}

#[test]
fn test_expr_array_value() {
    let mut model = ArrayModel::new();
    let x = model.add_var(3, VarKind::Continuous, None, None).unwrap();
    solve_with(&mut model, |index| index as f64 + 1.0);

    let weighted = x.dot(&arr1(&[1.0, 2.0, 3.0])).unwrap().add(0.5).unwrap();
    let value = weighted.value(&model).unwrap();

    assert_eq!(value.ndim(), 0);
    assert_eq!(value[[]], 1.0 + 4.0 + 9.0 + 0.5);
}

#[test]
fn test_value_with_other_model_is_rejected() {
    let mut model = ArrayModel::new();
    let other = ArrayModel::new();
    let x = model.add_var(1, VarKind::Continuous, None, None).unwrap();
    assert_eq!(x.value(&other).unwrap_err(), ArrayError::ForeignModel);
}

#[test]
fn test_bind_moves_handle_to_another_facade() {
    let mut model = ArrayModel::new();
    let x = model.add_var(2, VarKind::Continuous, None, None).unwrap();
    let inner = model.into_inner();
    let mut rewrapped = ArrayModel::from_model(inner);

    let mut handle = x.clone();
    handle.bind(&rewrapped);
    rewrapped.add_cons(vec![handle.ge(1.0)]).unwrap();

    assert_eq!(rewrapped.inner().num_constraints(), 2);
    assert_eq!(handle.token(), rewrapped.token());
}

#[test]
fn test_mutation_after_solve_invalidates_values() {
    let mut model = ArrayModel::new();
    let x = model.add_var(2, VarKind::Continuous, None, None).unwrap();
    solve_with(&mut model, |_| 1.0);
    assert!(x.value(&model).is_ok());

    model.add_cons(vec![x.le(3.0)]).unwrap();

    assert!(matches!(
        x.value(&model),
        Err(ArrayError::Model(ModelError::ValueUnavailable { .. }))
    ));
}
