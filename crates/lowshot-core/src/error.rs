use std::fmt;

use crate::labels::TaskAxis;
use crate::shape::Shape;

/// Which sampling pool a draw was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pool {
    /// Samples labelled 1 on the task.
    Positive,
    /// Samples labelled 0 on the task.
    Negative,
    /// Samples with a nonzero weight on the task.
    Task,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pool::Positive => write!(f, "positive"),
            Pool::Negative => write!(f, "negative"),
            Pool::Task => write!(f, "task"),
        }
    }
}

/// All errors that can occur within lowshot.
///
/// Sampling failures (`EmptyPool`, `InsufficientSamples`, `InvalidTaskIndex`)
/// are raised by the selection primitives and propagate unchanged through the
/// generators. The remaining variants guard dataset construction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A pool has no eligible rows but a nonzero count was requested.
    #[error("empty {pool} pool for task {task}: requested {requested} samples")]
    EmptyPool {
        task: usize,
        pool: Pool,
        requested: usize,
    },

    /// Sampling without replacement asked for more rows than the pool holds.
    #[error(
        "insufficient samples in {pool} pool for task {task}: requested {requested}, available {available}"
    )]
    InsufficientSamples {
        task: usize,
        pool: Pool,
        requested: usize,
        available: usize,
    },

    /// Task index outside the column range of `y`/`w`.
    #[error("invalid task index {task}: dataset has {n_tasks} tasks")]
    InvalidTaskIndex { task: usize, n_tasks: usize },

    /// One of the index-aligned collections has the wrong length.
    #[error("length mismatch for {what}: expected {expected}, got {got}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// `y` and `w` disagree on the number of task columns.
    #[error("task count mismatch: y has {y} tasks, w has {w}")]
    TaskCountMismatch { y: usize, w: usize },

    /// Same task count, but one side is a full matrix and the other a
    /// collapsed column.
    #[error("task layout mismatch: expected {expected:?}, got {got:?}")]
    TaskLayoutMismatch { expected: TaskAxis, got: TaskAxis },

    /// Label buffer does not split into whole rows of `n_tasks` values.
    #[error("ragged label matrix: {len} values do not form rows of {n_tasks} tasks")]
    RaggedLabels { len: usize, n_tasks: usize },

    /// Flat buffer is not a whole number of samples.
    #[error("element count mismatch: shape {shape} requires a multiple of {expected} elements, got {got}")]
    ElementCountMismatch {
        shape: Shape,
        expected: usize,
        got: usize,
    },

    /// Per-sample feature shapes differ (e.g. when concatenating).
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: Shape, got: Shape },

    /// Row index past the end of the dataset.
    #[error("index {index} out of bounds for dataset of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Generic message for cases not covered above.
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an error from any string message.
    pub fn msg(s: impl Into<String>) -> Self {
        Error::Msg(s.into())
    }

    /// Returns true if this error came from drawing a pool, as opposed to a
    /// malformed dataset.
    pub fn is_sampling_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyPool { .. }
                | Error::InsufficientSamples { .. }
                | Error::InvalidTaskIndex { .. }
        )
    }
}

/// Convenience Result type used throughout lowshot.
pub type Result<T> = std::result::Result<T, Error>;

/// Macro for early return with a formatted error message.
/// Usage: `bail!("something went wrong: {}", detail)`
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::Msg(format!($($arg)*)))
    };
}
