// Selection primitives: task views and balanced supports
//
// Every function here reads a source Dataset and returns a freshly
// materialized one; the source is never modified. Task-extracting functions
// collapse y/w to the selected column.

use std::collections::HashSet;

use rand::seq::index;
use rand::Rng;
use tracing::trace;

use lowshot_core::{Dataset, Error, Pool, Result};

/// Rows with a nonzero weight on `task`, in source order.
fn measured_rows(dataset: &Dataset, task: usize) -> Result<Vec<usize>> {
    let w_task = dataset.w().task_column(task)?;
    Ok(w_task
        .iter()
        .enumerate()
        .filter(|(_, &w)| w != 0.0)
        .map(|(i, _)| i)
        .collect())
}

/// Draw `count` positions from a pool of `pool_len` rows.
///
/// Without replacement the positions are distinct. A zero count always
/// succeeds, even from an empty pool.
pub(crate) fn sample_positions<R: Rng + ?Sized>(
    rng: &mut R,
    pool_len: usize,
    count: usize,
    replace: bool,
    task: usize,
    pool: Pool,
) -> Result<Vec<usize>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if pool_len == 0 {
        return Err(Error::EmptyPool {
            task,
            pool,
            requested: count,
        });
    }
    if replace {
        Ok((0..count).map(|_| rng.gen_range(0..pool_len)).collect())
    } else {
        if count > pool_len {
            return Err(Error::InsufficientSamples {
                task,
                pool,
                requested: count,
                available: pool_len,
            });
        }
        Ok(index::sample(rng, pool_len, count).into_vec())
    }
}

/// Samples measured on `task` (nonzero weight), with `y`/`w` reduced to
/// that task's column. Surviving rows keep their source order.
pub fn task_view(dataset: &Dataset, task: usize) -> Result<Dataset> {
    let rows = measured_rows(dataset, task)?;
    trace!(task, kept = rows.len(), total = dataset.len(), "task view");
    dataset.select_task(&rows, task)
}

/// Like [`task_view`], but first drops every sample whose id appears in
/// `support`. Useful for building an evaluation set disjoint from the
/// support a model was conditioned on.
pub fn task_view_excluding_support(
    dataset: &Dataset,
    support: &Dataset,
    task: usize,
) -> Result<Dataset> {
    let support_ids: HashSet<&str> = support.ids().iter().map(String::as_str).collect();
    let w_task = dataset.w().task_column(task)?;
    let rows: Vec<usize> = dataset
        .ids()
        .iter()
        .zip(&w_task)
        .enumerate()
        .filter(|(_, (id, &w))| !support_ids.contains(id.as_str()) && w != 0.0)
        .map(|(i, _)| i)
        .collect();
    trace!(
        task,
        kept = rows.len(),
        excluded_ids = support_ids.len(),
        "task view excluding support"
    );
    dataset.select_task(&rows, task)
}

/// Random batch of `batch_size` samples measured on `task`.
///
/// Fails with `EmptyPool` if nothing is measured on `task` and
/// `InsufficientSamples` if `replace` is false and `batch_size` exceeds the
/// measured population.
pub fn random_task_batch<R: Rng + ?Sized>(
    dataset: &Dataset,
    batch_size: usize,
    task: usize,
    replace: bool,
    rng: &mut R,
) -> Result<Dataset> {
    let rows = measured_rows(dataset, task)?;
    let picks = sample_positions(rng, rows.len(), batch_size, replace, task, Pool::Task)?;
    let batch: Vec<usize> = picks.into_iter().map(|p| rows[p]).collect();
    trace!(task, batch_size, pool = rows.len(), replace, "random task batch");
    dataset.select_task(&batch, task)
}

/// Class-balanced support for one task: `n_pos` rows labelled 1 followed by
/// `n_neg` rows labelled 0.
///
/// Labels other than 0 and 1 fall in neither pool. Pools are drawn
/// independently, each with or without replacement per `replace`.
pub fn balanced_task_support<R: Rng + ?Sized>(
    dataset: &Dataset,
    n_pos: usize,
    n_neg: usize,
    task: usize,
    replace: bool,
    rng: &mut R,
) -> Result<Dataset> {
    let y_task = dataset.y().task_column(task)?;

    let mut positives = Vec::new();
    let mut negatives = Vec::new();
    for (i, &label) in y_task.iter().enumerate() {
        if label == 1.0 {
            positives.push(i);
        } else if label == 0.0 {
            negatives.push(i);
        }
    }
    trace!(
        task,
        positives = positives.len(),
        negatives = negatives.len(),
        "support pools"
    );

    let pos_picks = sample_positions(rng, positives.len(), n_pos, replace, task, Pool::Positive)?;
    let neg_picks = sample_positions(rng, negatives.len(), n_neg, replace, task, Pool::Negative)?;

    let rows: Vec<usize> = pos_picks
        .into_iter()
        .map(|p| positives[p])
        .chain(neg_picks.into_iter().map(|p| negatives[p]))
        .collect();
    dataset.select_task(&rows, task)
}
