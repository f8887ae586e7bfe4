use thiserror::Error;
use validator::ValidationErrors;

/// Failures detected while validating simulation inputs.
///
/// Every variant is raised before any Monte Carlo work starts; a sweep that
/// has begun always runs its full warmup and measurement budget.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("lattice dimension must be 2 or 3, got {0}")]
    InvalidDimension(usize),

    #[error("invalid lattice linear size {0}: must be positive and L^dim must fit a u32 site index")]
    InvalidSize(usize),

    #[error("disorder probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("disorder width must be finite and non-negative, got {0}")]
    InvalidDisorderWidth(f64),

    #[error("coupling strength must be finite, got {0}")]
    InvalidCoupling(f64),

    #[error("unsupported number of spin states: {0}")]
    InvalidStateCount(usize),

    #[error("temperature at index {index} must be finite and positive, got {value}")]
    InvalidTemperature { index: usize, value: f64 },

    #[error("number of disorder runs must be >= 1")]
    InvalidRunCount,

    #[error("{what} has length {got}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },

    #[error("spin state covers {spins} sites but the lattice has {lattice}")]
    SiteCountMismatch { spins: usize, lattice: usize },

    #[error("invalid configuration: {0}")]
    Config(#[from] ValidationErrors),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, SimError>;
