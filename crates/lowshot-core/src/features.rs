// Features: the X collection of a dataset

use crate::error::{Error, Result};
use crate::shape::Shape;

/// Feature values for every sample, stored as one flat row-major buffer.
///
/// A scalar sample shape makes this a 1-D collection (one value per sample);
/// any other shape makes it an `[n, ...sample_shape]` array. Both forms
/// support gather and sample-axis concatenation.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    data: Vec<f64>,
    sample_shape: Shape,
    len: usize,
}

impl Features {
    /// 1-D features: one scalar per sample.
    pub fn scalars(values: Vec<f64>) -> Self {
        let len = values.len();
        Self {
            data: values,
            sample_shape: Shape::from(()),
            len,
        }
    }

    /// Multi-dimensional features from a flat buffer.
    ///
    /// `data.len()` must be a multiple of `sample_shape.elem_count()`.
    pub fn rows(data: Vec<f64>, sample_shape: impl Into<Shape>) -> Result<Self> {
        let sample_shape = sample_shape.into();
        let per_sample = sample_shape.elem_count();
        if per_sample == 0 {
            crate::bail!("sample shape {} has no elements", sample_shape);
        }
        if data.len() % per_sample != 0 {
            return Err(Error::ElementCountMismatch {
                shape: sample_shape,
                expected: per_sample,
                got: data.len(),
            });
        }
        let len = data.len() / per_sample;
        Ok(Self {
            data,
            sample_shape,
            len,
        })
    }

    /// Build row features from one vector per sample. All rows must have
    /// the same length.
    pub fn from_samples(samples: &[Vec<f64>]) -> Result<Self> {
        let width = match samples.first() {
            Some(first) => first.len(),
            None => return Ok(Self::empty(Shape::from(0))),
        };
        let mut data = Vec::with_capacity(width * samples.len());
        for row in samples {
            if row.len() != width {
                return Err(Error::ShapeMismatch {
                    expected: Shape::from(width),
                    got: Shape::from(row.len()),
                });
            }
            data.extend_from_slice(row);
        }
        Self::rows(data, width)
    }

    /// Zero samples with the given per-sample shape.
    pub fn empty(sample_shape: Shape) -> Self {
        Self {
            data: Vec::new(),
            sample_shape,
            len: 0,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn sample_shape(&self) -> &Shape {
        &self.sample_shape
    }

    /// Shape of the whole collection, sample axis first.
    pub fn shape(&self) -> Shape {
        self.sample_shape.with_samples(self.len)
    }

    /// True when X holds one scalar per sample.
    pub fn is_one_dimensional(&self) -> bool {
        self.sample_shape.is_scalar()
    }

    /// The flat row-major buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Values of sample `index`, or `None` if out of range.
    pub fn sample(&self, index: usize) -> Option<&[f64]> {
        if index >= self.len {
            return None;
        }
        let per = self.sample_shape.elem_count();
        Some(&self.data[index * per..(index + 1) * per])
    }

    /// Copy out the samples at `indices`, in that order. Indices may repeat.
    ///
    /// # Panics
    /// Panics if any index is out of range.
    pub fn gather(&self, indices: &[usize]) -> Features {
        let per = self.sample_shape.elem_count();
        let mut data = Vec::with_capacity(indices.len() * per);
        for &i in indices {
            data.extend_from_slice(&self.data[i * per..(i + 1) * per]);
        }
        Features {
            data,
            sample_shape: self.sample_shape.clone(),
            len: indices.len(),
        }
    }

    /// Concatenate along the sample axis.
    pub fn concat(&self, other: &Features) -> Result<Features> {
        if self.sample_shape != other.sample_shape {
            return Err(Error::ShapeMismatch {
                expected: self.sample_shape.clone(),
                got: other.sample_shape.clone(),
            });
        }
        let mut data = Vec::with_capacity(self.data.len() + other.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        Ok(Features {
            data,
            sample_shape: self.sample_shape.clone(),
            len: self.len + other.len,
        })
    }
}
