//! Builders that fold many expressions into one.

use crate::expr::core::Expr;
use crate::expr::error::LinearExprError;

/// Sum expressions by concatenating their terms and adding their constants.
///
/// Duplicate variables are kept as separate terms; call `normalized_terms()`
/// on the result when a merged view is needed.
pub fn linear_sum<'a, I>(exprs: I) -> Expr
where
    I: IntoIterator<Item = &'a Expr>,
{
    let mut total = Expr::new_empty();
    for expr in exprs {
        total.add_assign_expr(expr);
    }
    total
}

/// Weighted sum `Σ weights[i] * exprs[i]`, as used by dot and matrix products.
pub fn weighted_sum<'a, I>(exprs: I, weights: &[f64]) -> Result<Expr, LinearExprError>
where
    I: IntoIterator<Item = &'a Expr>,
    I::IntoIter: ExactSizeIterator,
{
    let exprs = exprs.into_iter();
    if exprs.len() != weights.len() {
        return Err(LinearExprError::MismatchedLengths {
            exprs: exprs.len(),
            weights: weights.len(),
        });
    }
    if let Some(weight) = weights.iter().find(|w| !w.is_finite()) {
        return Err(LinearExprError::NonFiniteWeight { weight: *weight });
    }

    let mut total = Expr::new_empty();
    for (expr, weight) in exprs.zip(weights) {
        if *weight == 0.0 {
            continue;
        }
        total.add_assign_expr(&expr.scale(*weight));
    }
    Ok(total)
}
