//! Player configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// How long a tree search may run. Budgets are checked between iterations,
/// so a search always completes at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBudget {
    Iterations(u32),
    Time(Duration),
}

impl SearchBudget {
    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            SearchBudget::Iterations(0) => Err(ConfigError::NoIterations),
            SearchBudget::Time(d) if d.is_zero() => Err(ConfigError::NoTime),
            _ => Ok(()),
        }
    }
}

/// Statistic used to pick the root child once the search is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChildSelection {
    /// Total visit count. Lower variance at small budgets.
    #[default]
    MostVisits,
    /// Wins divided by visits.
    WinRate,
}

fn check_constant(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidConstant { name, value })
    }
}

/// Configuration for flat Monte Carlo.
#[derive(Debug, Clone)]
pub struct MonteCarloConfig {
    /// Random playouts per candidate move.
    pub playouts: u32,

    /// Threads the playouts of one candidate are split across.
    pub workers: usize,

    /// RNG seed; `None` seeds from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            playouts: 10_000,
            workers: 1,
            seed: None,
        }
    }
}

impl MonteCarloConfig {
    /// Small, seeded config for tests.
    pub fn for_testing() -> Self {
        Self {
            playouts: 40,
            workers: 1,
            seed: Some(42),
        }
    }

    pub fn with_playouts(mut self, n: u32) -> Self {
        self.playouts = n;
        self
    }

    pub fn with_workers(mut self, n: usize) -> Self {
        self.workers = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.playouts == 0 {
            return Err(ConfigError::NoPlayouts);
        }
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        Ok(())
    }
}

/// Configuration for MCTS with UCB1 selection.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    pub budget: SearchBudget,

    /// Multiplier on the UCB1 exploration term. 1.0 gives the textbook
    /// `sqrt(2 ln N / n)`.
    pub exploration: f64,

    pub selection: ChildSelection,

    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            budget: SearchBudget::Iterations(50_000),
            exploration: 1.0,
            selection: ChildSelection::MostVisits,
            seed: None,
        }
    }
}

impl MctsConfig {
    pub fn for_testing() -> Self {
        Self {
            budget: SearchBudget::Iterations(200),
            seed: Some(42),
            ..Self::default()
        }
    }

    pub fn with_iterations(mut self, n: u32) -> Self {
        self.budget = SearchBudget::Iterations(n);
        self
    }

    pub fn with_duration(mut self, d: Duration) -> Self {
        self.budget = SearchBudget::Time(d);
        self
    }

    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    pub fn with_selection(mut self, selection: ChildSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.budget.validate()?;
        check_constant("exploration", self.exploration)
    }
}

/// Configuration for MCTS with RAVE.
#[derive(Debug, Clone)]
pub struct RaveConfig {
    pub budget: SearchBudget,

    pub exploration: f64,

    /// `k` in `beta = k / (1 + rave_visits)`. Larger values trust the
    /// all-moves-as-first statistic for longer.
    pub rave_k: f64,

    pub seed: Option<u64>,
}

impl Default for RaveConfig {
    fn default() -> Self {
        Self {
            budget: SearchBudget::Iterations(3_000),
            exploration: 1.0,
            rave_k: 1.0,
            seed: None,
        }
    }
}

impl RaveConfig {
    pub fn for_testing() -> Self {
        Self {
            budget: SearchBudget::Iterations(200),
            seed: Some(42),
            ..Self::default()
        }
    }

    pub fn with_iterations(mut self, n: u32) -> Self {
        self.budget = SearchBudget::Iterations(n);
        self
    }

    pub fn with_duration(mut self, d: Duration) -> Self {
        self.budget = SearchBudget::Time(d);
        self
    }

    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    pub fn with_rave_k(mut self, k: f64) -> Self {
        self.rave_k = k;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.budget.validate()?;
        check_constant("exploration", self.exploration)?;
        check_constant("rave_k", self.rave_k)
    }
}
