//! Identity of the facade that created an array.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Process-unique id tying arrays to the [`ArrayModel`](crate::ArrayModel)
/// that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelToken(u64);

impl ModelToken {
    pub(crate) fn fresh() -> Self {
        ModelToken(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    pub fn inner(self) -> u64 {
        self.0
    }
}

/// Ok when both tokens name the same model.
pub(crate) fn ensure_same(
    expected: ModelToken,
    actual: ModelToken,
) -> Result<(), crate::ArrayError> {
    if expected == actual {
        Ok(())
    } else {
        tracing::warn!(
            component = "array",
            operation = "check_model",
            status = "error",
            expected = expected.inner(),
            actual = actual.inner(),
            "Array used with a model that did not create it"
        );
        Err(crate::ArrayError::ForeignModel)
    }
}
