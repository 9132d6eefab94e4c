//! # lowshot-data
//!
//! Support sampling for few-shot learning over multi-task datasets.
//!
//! This crate provides:
//! - Selection primitives: [`task_view`], [`task_view_excluding_support`],
//!   [`random_task_batch`], [`balanced_task_support`]
//! - [`TaskCycle`]: the permute / visit / re-permute task scheduler
//! - [`SupportGenerator`]: one balanced support per task per trial
//! - [`EpisodeGenerator`]: support plus a disjoint query batch per task
//! - [`SupportConfig`] / [`EpisodeConfig`]: serde-loadable sampling settings
//
// All randomness flows through an explicit `Rng`. Generators own a `StdRng`
// seeded from the config (or from entropy when no seed is set).

pub mod config;
pub mod cycle;
pub mod episode;
pub mod select;
pub mod support;

pub use config::{EpisodeConfig, SupportConfig};
pub use cycle::TaskCycle;
pub use episode::{Episode, EpisodeGenerator};
pub use select::{
    balanced_task_support, random_task_batch, task_view, task_view_excluding_support,
};
pub use support::{SupportGenerator, TaskSupport};
