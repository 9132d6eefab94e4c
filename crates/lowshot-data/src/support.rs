// SupportGenerator: one balanced support per task per trial

use std::iter::FusedIterator;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use lowshot_core::{Dataset, Result};

use crate::config::SupportConfig;
use crate::cycle::TaskCycle;
use crate::select::balanced_task_support;

/// A support drawn for one task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSupport {
    pub task: usize,
    pub support: Dataset,
}

/// Generates support sets from a dataset.
///
/// Iterates over tasks and trials: every trial draws one support from each
/// task, visiting the tasks in a freshly randomized order. Over its lifetime
/// the generator yields exactly `tasks.len() * n_trials` supports and is then
/// exhausted for good; build a new one to iterate again.
///
/// A failed draw (see [`balanced_task_support`]) is returned as an error
/// without moving the generator, so [`advance`](Self::advance) attempts the
/// same task again on the next call. As an `Iterator` the generator ends
/// after yielding the first error.
pub struct SupportGenerator<'a, R: Rng = StdRng> {
    dataset: &'a Dataset,
    config: SupportConfig,
    cycle: TaskCycle,
    rng: R,
    // set once `next` has handed out an error
    failed: bool,
}

impl<'a> SupportGenerator<'a, StdRng> {
    /// Create a generator whose RNG comes from `config.seed` (or entropy).
    pub fn new(dataset: &'a Dataset, tasks: Vec<usize>, config: SupportConfig) -> Self {
        let rng = config.rng();
        Self::with_rng(dataset, tasks, config, rng)
    }
}

impl<'a, R: Rng> SupportGenerator<'a, R> {
    /// Create a generator driven by a caller-supplied RNG. `config.seed` is
    /// ignored.
    pub fn with_rng(
        dataset: &'a Dataset,
        tasks: Vec<usize>,
        config: SupportConfig,
        mut rng: R,
    ) -> Self {
        let cycle = TaskCycle::new(tasks, config.n_trials, &mut rng);
        debug!(
            n_tasks = cycle.n_tasks(),
            n_trials = config.n_trials,
            n_pos = config.n_pos,
            n_neg = config.n_neg,
            replace = config.replace,
            "support generator created"
        );
        Self {
            dataset,
            config,
            cycle,
            rng,
            failed: false,
        }
    }

    /// Draw the next support, or `Ok(None)` once every trial has run.
    pub fn advance(&mut self) -> Result<Option<TaskSupport>> {
        let task = match self.cycle.current() {
            Some(task) => task,
            None => return Ok(None),
        };
        let support = balanced_task_support(
            self.dataset,
            self.config.n_pos,
            self.config.n_neg,
            task,
            self.config.replace,
            &mut self.rng,
        )?;
        debug!(
            task,
            trial = self.cycle.trial_num(),
            rows = support.len(),
            "drew support"
        );
        if self.cycle.advance(&mut self.rng) {
            debug!(trial = self.cycle.trial_num(), "trial complete");
            if self.cycle.is_finished() {
                debug!("support generator exhausted");
            }
        }
        Ok(Some(TaskSupport { task, support }))
    }

    pub fn config(&self) -> &SupportConfig {
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

    /// Supports left to draw.
    pub fn remaining(&self) -> usize {
        self.cycle.remaining()
    }
}

impl<R: Rng> Iterator for SupportGenerator<'_, R> {
    type Item = Result<TaskSupport>;

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

impl<R: Rng> ExactSizeIterator for SupportGenerator<'_, R> {
    fn len(&self) -> usize {
        self.size_hint().0
    }
}

impl<R: Rng> FusedIterator for SupportGenerator<'_, R> {}
