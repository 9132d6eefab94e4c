// Sampling configuration

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for a [`SupportGenerator`](crate::SupportGenerator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportConfig {
    /// Positive samples per support.
    pub n_pos: usize,
    /// Negative samples per support.
    pub n_neg: usize,
    /// Passes over the task list. Each pass yields one support per task.
    pub n_trials: usize,
    /// Whether pools are sampled with replacement.
    pub replace: bool,
    /// Optional random seed for a reproducible sequence.
    pub seed: Option<u64>,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            n_pos: 1,
            n_neg: 1,
            n_trials: 1,
            replace: true,
            seed: None,
        }
    }
}

impl SupportConfig {
    pub fn n_pos(mut self, n: usize) -> Self {
        self.n_pos = n;
        self
    }

    pub fn n_neg(mut self, n: usize) -> Self {
        self.n_neg = n;
        self
    }

    pub fn n_trials(mut self, n: usize) -> Self {
        self.n_trials = n;
        self
    }

    pub fn replace(mut self, r: bool) -> Self {
        self.replace = r;
        self
    }

    pub fn seed(mut self, s: u64) -> Self {
        self.seed = Some(s);
        self
    }

    /// Rows in every support this config draws.
    pub fn support_size(&self) -> usize {
        self.n_pos + self.n_neg
    }

    /// Seeded RNG if `seed` is set, otherwise one seeded from entropy.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Configuration for an [`EpisodeGenerator`](crate::EpisodeGenerator):
/// a support config plus the size of the held-out query batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeConfig {
    #[serde(flatten)]
    pub support: SupportConfig,
    /// Query rows drawn per episode.
    pub n_query: usize,
    /// Whether the query batch is sampled with replacement.
    pub query_replace: bool,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            support: SupportConfig::default(),
            n_query: 16,
            query_replace: false,
        }
    }
}

impl EpisodeConfig {
    pub fn support(mut self, support: SupportConfig) -> Self {
        self.support = support;
        self
    }

    pub fn n_query(mut self, n: usize) -> Self {
        self.n_query = n;
        self
    }

    pub fn query_replace(mut self, r: bool) -> Self {
        self.query_replace = r;
        self
    }
}
