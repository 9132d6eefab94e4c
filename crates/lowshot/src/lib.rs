//! # lowshot
//!
//! Balanced support sampling for few-shot and low-shot learning.
//!
//! This is the facade crate that re-exports everything you need.
//!
//! ## Usage
//!
//! ```rust
//! use lowshot::prelude::*;
//!
//! let ds = Dataset::new(
//!     Features::scalars(vec![0.0, 1.0, 2.0, 3.0]),
//!     Labels::matrix(vec![1.0, 0.0, 1.0, 0.0], 1)?,
//!     Labels::matrix(vec![1.0; 4], 1)?,
//!     ["a", "b", "c", "d"],
//! )?;
//!
//! let config = SupportConfig::default().n_pos(1).n_neg(1).n_trials(2).seed(0);
//! for item in SupportGenerator::new(&ds, vec![0], config) {
//!     let TaskSupport { task, support } = item?;
//!     assert_eq!(task, 0);
//!     assert_eq!(support.len(), 2);
//! }
//! # Ok::<(), lowshot::Error>(())
//! ```
//!
//! ## Architecture
//!
//! | Crate | Purpose |
//! |-------|----------|
//! | `lowshot-core` | Dataset, Features, Labels, Shape, Error |
//! | `lowshot-data` | Selection primitives, TaskCycle, Support/Episode generators, configs |

/// Re-export core types.
pub use lowshot_core::{
    Dataset, Error, Features, Labels, Pool, Result, Shape, TaskAxis,
};

/// Re-export sampling.
pub mod data {
    pub use lowshot_data::*;
}

/// Prelude: import this for the most common types.
pub mod prelude {
    pub use crate::data::{
        balanced_task_support, random_task_batch, task_view, task_view_excluding_support,
    };
    pub use crate::data::{
        Episode, EpisodeConfig, EpisodeGenerator, SupportConfig, SupportGenerator, TaskCycle,
        TaskSupport,
    };
    pub use crate::{Dataset, Error, Features, Labels, Pool, Result, Shape, TaskAxis};
    pub use rand::rngs::StdRng;
    pub use rand::SeedableRng;
}
