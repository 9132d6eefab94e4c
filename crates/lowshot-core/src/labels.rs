// Labels: the y and w collections of a dataset

use crate::error::{Error, Result};

/// Layout of the task dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskAxis {
    /// `N × T` matrix, one column per task.
    Matrix(usize),
    /// Single column left over after a task was extracted.
    Collapsed,
}

impl TaskAxis {
    pub fn n_tasks(&self) -> usize {
        match self {
            TaskAxis::Matrix(t) => *t,
            TaskAxis::Collapsed => 1,
        }
    }
}

/// Per-sample, per-task values, used for both labels (`y`) and weights (`w`).
///
/// A collapsed column behaves as a one-task matrix for indexing, so task 0
/// of a support or task view addresses its only column.
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    data: Vec<f64>,
    axis: TaskAxis,
}

impl Labels {
    /// Row-major `N × n_tasks` matrix.
    pub fn matrix(data: Vec<f64>, n_tasks: usize) -> Result<Self> {
        if n_tasks == 0 {
            crate::bail!("label matrix needs at least one task column");
        }
        if data.len() % n_tasks != 0 {
            return Err(Error::RaggedLabels {
                len: data.len(),
                n_tasks,
            });
        }
        Ok(Self {
            data,
            axis: TaskAxis::Matrix(n_tasks),
        })
    }

    /// Matrix from one row per sample; the task count is taken from the first row.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n_tasks = match rows.first() {
            Some(first) => first.len(),
            None => crate::bail!("need at least one row to infer the task count"),
        };
        let mut data = Vec::with_capacity(n_tasks * rows.len());
        for row in rows {
            if row.len() != n_tasks {
                return Err(Error::LengthMismatch {
                    what: "label row",
                    expected: n_tasks,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::matrix(data, n_tasks)
    }

    /// Task-collapsed 1-D column.
    pub fn column(data: Vec<f64>) -> Self {
        Self {
            data,
            axis: TaskAxis::Collapsed,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.data.len() / self.axis.n_tasks()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn axis(&self) -> TaskAxis {
        self.axis
    }

    pub fn n_tasks(&self) -> usize {
        self.axis.n_tasks()
    }

    pub fn is_collapsed(&self) -> bool {
        self.axis == TaskAxis::Collapsed
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Fail with `InvalidTaskIndex` unless `task` addresses a column.
    pub fn check_task(&self, task: usize) -> Result<()> {
        let n_tasks = self.n_tasks();
        if task >= n_tasks {
            return Err(Error::InvalidTaskIndex { task, n_tasks });
        }
        Ok(())
    }

    /// Value at (`row`, `task`).
    pub fn get(&self, row: usize, task: usize) -> Result<f64> {
        self.check_task(task)?;
        let len = self.len();
        if row >= len {
            return Err(Error::IndexOutOfBounds { index: row, len });
        }
        Ok(self.data[row * self.n_tasks() + task])
    }

    /// Copy of one task column.
    pub fn task_column(&self, task: usize) -> Result<Vec<f64>> {
        self.check_task(task)?;
        let t = self.n_tasks();
        Ok(self.data.iter().skip(task).step_by(t).copied().collect())
    }

    /// Rows at `rows`, keeping every task column.
    ///
    /// # Panics
    /// Panics if any row is out of range.
    pub fn gather(&self, rows: &[usize]) -> Labels {
        let t = self.n_tasks();
        let mut data = Vec::with_capacity(rows.len() * t);
        for &r in rows {
            data.extend_from_slice(&self.data[r * t..(r + 1) * t]);
        }
        Labels {
            data,
            axis: self.axis,
        }
    }

    /// Rows at `rows`, reduced to the `task` column.
    ///
    /// # Panics
    /// Panics if any row is out of range.
    pub fn gather_column(&self, rows: &[usize], task: usize) -> Result<Labels> {
        self.check_task(task)?;
        let t = self.n_tasks();
        let data = rows.iter().map(|&r| self.data[r * t + task]).collect();
        Ok(Labels::column(data))
    }

    /// Concatenate along the sample axis. Both sides must share a task layout.
    pub fn concat(&self, other: &Labels) -> Result<Labels> {
        if self.axis != other.axis {
            return Err(Error::TaskLayoutMismatch {
                expected: self.axis,
                got: other.axis,
            });
        }
        let mut data = Vec::with_capacity(self.data.len() + other.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        Ok(Labels {
            data,
            axis: self.axis,
        })
    }
}
