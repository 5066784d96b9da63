use thiserror::Error;

/// Rejected player configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("playouts per move must be at least 1")]
    NoPlayouts,

    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("iteration budget must be at least 1")]
    NoIterations,

    #[error("time budget must be non-zero")]
    NoTime,

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidConstant { name: &'static str, value: f64 },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
