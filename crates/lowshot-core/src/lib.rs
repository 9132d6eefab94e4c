//! # lowshot-core
//!
//! Value types shared by every lowshot crate.
//!
//! This crate provides:
//! - [`Dataset`]: immutable, index-aligned `(X, y, w, ids)` collections
//! - [`Features`]: 1-D or multi-D feature buffers with gather/concat
//! - [`Labels`]: per-task label and weight matrices, collapsible to a column
//! - [`Shape`]: per-sample feature shape
//! - [`Error`] / [`Result`]: the single error type used across lowshot

pub mod dataset;
pub mod error;
pub mod features;
pub mod labels;
pub mod shape;

pub use dataset::Dataset;
pub use error::{Error, Pool, Result};
pub use features::Features;
pub use labels::{Labels, TaskAxis};
pub use shape::Shape;
