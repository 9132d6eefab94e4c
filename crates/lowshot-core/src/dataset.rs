// Dataset: immutable, index-aligned (X, y, w, ids)

use crate::error::{Error, Result};
use crate::features::Features;
use crate::labels::Labels;

/// A labelled multi-task dataset.
///
/// Four collections share the sample axis:
/// - `x`: features, 1-D or multi-D
/// - `y`: labels, `N × T` (or a collapsed column after task extraction)
/// - `w`: weights with the same layout as `y`; 0 means "not measured"
/// - `ids`: opaque sample identifiers
///
/// Values are never mutated after construction. Every selection copies the
/// rows it keeps into fresh buffers, so two datasets never share storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Features,
    y: Labels,
    w: Labels,
    ids: Vec<String>,
}

impl Dataset {
    /// Assemble a dataset from its four collections.
    ///
    /// Fails with `LengthMismatch` if the sample counts differ, with
    /// `TaskCountMismatch` if `y` and `w` have different task counts and with
    /// `TaskLayoutMismatch` if only one of them is collapsed.
    pub fn new<I, S>(x: Features, y: Labels, w: Labels, ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        let n = x.len();
        for (what, got) in [("y", y.len()), ("w", w.len()), ("ids", ids.len())] {
            if got != n {
                return Err(Error::LengthMismatch {
                    what,
                    expected: n,
                    got,
                });
            }
        }
        if y.n_tasks() != w.n_tasks() {
            return Err(Error::TaskCountMismatch {
                y: y.n_tasks(),
                w: w.n_tasks(),
            });
        }
        if y.axis() != w.axis() {
            return Err(Error::TaskLayoutMismatch {
                expected: y.axis(),
                got: w.axis(),
            });
        }
        Ok(Self { x, y, w, ids })
    }

    pub fn x(&self) -> &Features {
        &self.x
    }

    pub fn y(&self) -> &Labels {
        &self.y
    }

    pub fn w(&self) -> &Labels {
        &self.w
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of task columns in `y`/`w` (1 once collapsed).
    pub fn n_tasks(&self) -> usize {
        self.y.n_tasks()
    }

    /// Fail with `InvalidTaskIndex` unless `task` is a valid column.
    pub fn check_task(&self, task: usize) -> Result<()> {
        self.y.check_task(task)
    }

    /// Gather rows at `indices` (repeats allowed), keeping every task column.
    pub fn select(&self, indices: &[usize]) -> Result<Dataset> {
        self.check_indices(indices)?;
        Ok(Dataset {
            x: self.x.gather(indices),
            y: self.y.gather(indices),
            w: self.w.gather(indices),
            ids: self.gather_ids(indices),
        })
    }

    /// Gather rows at `indices` and collapse `y`/`w` to the `task` column.
    pub fn select_task(&self, indices: &[usize], task: usize) -> Result<Dataset> {
        self.check_task(task)?;
        self.check_indices(indices)?;
        Ok(Dataset {
            x: self.x.gather(indices),
            y: self.y.gather_column(indices, task)?,
            w: self.w.gather_column(indices, task)?,
            ids: self.gather_ids(indices),
        })
    }

    /// Concatenate two datasets along the sample axis.
    pub fn concat(&self, other: &Dataset) -> Result<Dataset> {
        let mut ids = Vec::with_capacity(self.ids.len() + other.ids.len());
        ids.extend_from_slice(&self.ids);
        ids.extend_from_slice(&other.ids);
        Ok(Dataset {
            x: self.x.concat(&other.x)?,
            y: self.y.concat(&other.y)?,
            w: self.w.concat(&other.w)?,
            ids,
        })
    }

    /// Split back into `(x, y, w, ids)`.
    pub fn into_parts(self) -> (Features, Labels, Labels, Vec<String>) {
        (self.x, self.y, self.w, self.ids)
    }

    fn check_indices(&self, indices: &[usize]) -> Result<()> {
        let len = self.len();
        match indices.iter().find(|&&i| i >= len) {
            Some(&index) => Err(Error::IndexOutOfBounds { index, len }),
            None => Ok(()),
        }
    }

    fn gather_ids(&self, indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| self.ids[i].clone()).collect()
    }
}
