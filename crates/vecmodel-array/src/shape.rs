//! Shape formatting and numpy-style broadcasting rules.

use ndarray::{ArrayD, ArrayViewD, IxDyn};

use crate::error::ArrayError;

/// Format a shape the way numpy prints it: `()`, `(3,)`, `(2, 2)`.
pub fn fmt_shape(shape: &[usize]) -> String {
    match shape {
        [] => "()".to_string(),
        [single] => format!("({single},)"),
        dims => {
            let parts: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
            format!("({})", parts.join(", "))
        }
    }
}

/// Result shape of broadcasting `lhs` and `rhs` together.
///
/// Dimensions are aligned from the right; each pair must be equal or
/// contain a `1`.
pub fn broadcast_shape(lhs: &[usize], rhs: &[usize]) -> Option<Vec<usize>> {
    let ndim = lhs.len().max(rhs.len());
    let mut out = vec![0; ndim];
    for (k, slot) in out.iter_mut().enumerate() {
        let l = dim_from_right(lhs, ndim - 1 - k);
        let r = dim_from_right(rhs, ndim - 1 - k);
        *slot = match (l, r) {
            (a, b) if a == b => a,
            (1, b) => b,
            (a, 1) => a,
            _ => return None,
        };
    }
    Some(out)
}

fn dim_from_right(shape: &[usize], from_right: usize) -> usize {
    if from_right < shape.len() {
        shape[shape.len() - 1 - from_right]
    } else {
        1
    }
}

/// Ok when `axis` names a dimension of `shape`.
pub(crate) fn check_axis(shape: &[usize], axis: usize) -> Result<(), ArrayError> {
    if axis < shape.len() {
        Ok(())
    } else {
        Err(ArrayError::AxisOutOfRange {
            axis,
            ndim: shape.len(),
        })
    }
}

/// Ok when `index` is a valid position along `axis`.
pub(crate) fn check_index(shape: &[usize], axis: usize, index: usize) -> Result<(), ArrayError> {
    check_axis(shape, axis)?;
    if index < shape[axis] {
        Ok(())
    } else {
        Err(ArrayError::IndexOutOfRange {
            axis,
            index,
            len: shape[axis],
        })
    }
}

/// View `array` with shape `target`, or report both shapes.
pub(crate) fn broadcast_to<'a, T>(
    array: &'a ArrayD<T>,
    target: &[usize],
) -> Result<ArrayViewD<'a, T>, ArrayError> {
    array
        .broadcast(IxDyn(target))
        .ok_or_else(|| ArrayError::Broadcast {
            lhs: target.to_vec(),
            rhs: array.shape().to_vec(),
        })
}

/// Apply `op` element-wise over two arrays broadcast against each other.
pub(crate) fn zip_broadcast<A, B, T, F>(
    lhs: &ArrayD<A>,
    rhs: &ArrayD<B>,
    mut op: F,
) -> Result<ArrayD<T>, ArrayError>
where
    F: FnMut(&A, &B) -> T,
{
    let shape = broadcast_shape(lhs.shape(), rhs.shape()).ok_or_else(|| {
        ArrayError::Broadcast {
            lhs: lhs.shape().to_vec(),
            rhs: rhs.shape().to_vec(),
        }
    })?;
    let left = broadcast_to(lhs, &shape)?;
    let right = broadcast_to(rhs, &shape)?;
    let values: Vec<T> = left.iter().zip(right.iter()).map(|(a, b)| op(a, b)).collect();
    Ok(ArrayD::from_shape_vec(IxDyn(&shape), values)?)
}
