// TaskCycle: permute, visit every task once, re-permute
//
// A trial is one full pass over `tasks` in the order of that trial's
// permutation. The permutation for trial 0 is drawn at construction; each
// later one is drawn right after the last task of the previous trial is
// consumed. After `n_trials` passes the cycle is finished for good.

use rand::seq::SliceRandom;
use rand::Rng;

/// Stateful cyclic scheduler over task indices.
///
/// Reading the next task ([`current`](Self::current)) and moving past it
/// ([`advance`](Self::advance)) are separate steps, so a caller can do
/// fallible work with the task in between and leave the cursor untouched
/// when that work fails.
#[derive(Debug, Clone)]
pub struct TaskCycle {
    tasks: Vec<usize>,
    n_trials: usize,
    perm_tasks: Vec<usize>,
    task_num: usize,
    trial_num: usize,
}

impl TaskCycle {
    pub fn new<R: Rng + ?Sized>(tasks: Vec<usize>, n_trials: usize, rng: &mut R) -> Self {
        let mut perm_tasks = tasks.clone();
        perm_tasks.shuffle(rng);
        Self {
            tasks,
            n_trials,
            perm_tasks,
            task_num: 0,
            trial_num: 0,
        }
    }

    /// The task at the cursor, or `None` once every trial has run.
    pub fn current(&self) -> Option<usize> {
        if self.is_finished() {
            return None;
        }
        self.perm_tasks.get(self.task_num).copied()
    }

    /// Move past the current task. Finishing a pass resets the cursor, draws a
    /// fresh permutation and counts the trial.
    ///
    /// Returns true if this call completed a trial.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.is_finished() {
            return false;
        }
        self.task_num += 1;
        if self.task_num == self.tasks.len() {
            self.task_num = 0;
            self.perm_tasks = self.tasks.clone();
            self.perm_tasks.shuffle(rng);
            self.trial_num += 1;
            return true;
        }
        false
    }

    /// True when `trial_num == n_trials`, or there is nothing to visit.
    pub fn is_finished(&self) -> bool {
        self.trial_num >= self.n_trials || self.tasks.is_empty()
    }

    /// Tasks still to be visited, counting the one at the cursor, or `None`
    /// if the count does not fit in a `usize`.
    pub fn checked_remaining(&self) -> Option<usize> {
        if self.is_finished() {
            return Some(0);
        }
        let n = self.tasks.len();
        // later trials in full, plus what is left of this one
        (self.n_trials - self.trial_num - 1)
            .checked_mul(n)?
            .checked_add(n - self.task_num)
    }

    /// Like [`checked_remaining`](Self::checked_remaining), saturating at
    /// `usize::MAX`.
    pub fn remaining(&self) -> usize {
        self.checked_remaining().unwrap_or(usize::MAX)
    }

    pub fn tasks(&self) -> &[usize] {
        &self.tasks
    }

    pub fn n_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    /// The permutation for the current trial.
    pub fn perm_tasks(&self) -> &[usize] {
        &self.perm_tasks
    }

    /// Cursor within the current trial.
    pub fn task_num(&self) -> usize {
        self.task_num
    }

    /// Completed trials.
    pub fn trial_num(&self) -> usize {
        self.trial_num
    }
}
