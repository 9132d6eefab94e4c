// EpisodeGenerator: support plus disjoint query batch per task

use std::iter::FusedIterator;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use lowshot_core::{Dataset, Result};

use crate::config::EpisodeConfig;
use crate::cycle::TaskCycle;
use crate::select::{balanced_task_support, random_task_batch, task_view_excluding_support};

/// A single episode: a balanced support and a query batch for one task.
///
/// The query only holds samples measured on `task` and shares no id with
/// the support.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    pub task: usize,
    pub support: Dataset,
    pub query: Dataset,
}

/// Generates `(task, support, query)` episodes.
///
/// Tasks are scheduled exactly like [`SupportGenerator`](crate::SupportGenerator):
/// one episode per task per trial, in a new random order every trial. The
/// iterator likewise ends after yielding its first error.
pub struct EpisodeGenerator<'a, R: Rng = StdRng> {
    dataset: &'a Dataset,
    config: EpisodeConfig,
    cycle: TaskCycle,
    rng: R,
    // set once `next` has handed out an error
    failed: bool,
}

impl<'a> EpisodeGenerator<'a, StdRng> {
    pub fn new(dataset: &'a Dataset, tasks: Vec<usize>, config: EpisodeConfig) -> Self {
        let rng = config.support.rng();
        Self::with_rng(dataset, tasks, config, rng)
    }
}

impl<'a, R: Rng> EpisodeGenerator<'a, R> {
    pub fn with_rng(
        dataset: &'a Dataset,
        tasks: Vec<usize>,
        config: EpisodeConfig,
        mut rng: R,
    ) -> Self {
        let cycle = TaskCycle::new(tasks, config.support.n_trials, &mut rng);
        debug!(
            n_tasks = cycle.n_tasks(),
            n_trials = config.support.n_trials,
            n_query = config.n_query,
            "episode generator created"
        );
        Self {
            dataset,
            config,
            cycle,
            rng,
            failed: false,
        }
    }

    /// Draw the next episode, or `Ok(None)` once every trial has run.
    ///
    /// Either draw failing leaves the schedule where it was.
    pub fn advance(&mut self) -> Result<Option<Episode>> {
        let task = match self.cycle.current() {
            Some(task) => task,
            None => return Ok(None),
        };
        let support_cfg = &self.config.support;
        let support = balanced_task_support(
            self.dataset,
            support_cfg.n_pos,
            support_cfg.n_neg,
            task,
            support_cfg.replace,
            &mut self.rng,
        )?;
        let held_out = task_view_excluding_support(self.dataset, &support, task)?;
        // held_out is already collapsed to this task, so its only column is 0
        let query = random_task_batch(
            &held_out,
            self.config.n_query,
            0,
            self.config.query_replace,
            &mut self.rng,
        )
        .map_err(|e| relabel_task(e, task))?;
        debug!(
            task,
            trial = self.cycle.trial_num(),
            support = support.len(),
            query = query.len(),
            "drew episode"
        );
        if self.cycle.advance(&mut self.rng) {
            debug!(trial = self.cycle.trial_num(), "trial complete");
        }
        Ok(Some(Episode {
            task,
            support,
            query,
        }))
    }

    pub fn config(&self) -> &EpisodeConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        self.dataset
    }

    pub fn tasks(&self) -> &[usize] {
        self.cycle.tasks()
    }

    pub fn n_tasks(&self) -> usize {
        self.cycle.n_tasks()
    }

    pub fn n_trials(&self) -> usize {
        self.cycle.n_trials()
    }

    /// Task order for the current trial.
    pub fn perm_tasks(&self) -> &[usize] {
        self.cycle.perm_tasks()
    }

    pub fn task_num(&self) -> usize {
        self.cycle.task_num()
    }

    pub fn trial_num(&self) -> usize {
        self.cycle.trial_num()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cycle.is_finished()
    }

    pub fn remaining(&self) -> usize {
        self.cycle.remaining()
    }
}

/// Errors from the query draw refer to column 0 of the task view; report
/// the source task instead.
fn relabel_task(err: lowshot_core::Error, task: usize) -> lowshot_core::Error {
    use lowshot_core::Error;
    match err {
        Error::EmptyPool { pool, requested, .. } => Error::EmptyPool {
            task,
            pool,
            requested,
        },
        Error::InsufficientSamples {
            pool,
            requested,
            available,
            ..
        } => Error::InsufficientSamples {
            task,
            pool,
            requested,
            available,
        },
        other => other,
    }
}

impl<R: Rng> Iterator for EpisodeGenerator<'_, R> {
    type Item = Result<Episode>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.advance() {
            Ok(item) => item.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        match self.cycle.checked_remaining() {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

impl<R: Rng> ExactSizeIterator for EpisodeGenerator<'_, R> {
    fn len(&self) -> usize {
        self.size_hint().0
    }
}

impl<R: Rng> FusedIterator for EpisodeGenerator<'_, R> {}
