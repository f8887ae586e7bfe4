use validator::{Validate, ValidationError};

/// Default number of discarded sweeps before measurement starts.
pub const DEFAULT_WARMUP: usize = 30_000;
/// Default number of measured sweeps.
pub const DEFAULT_MEASURE: usize = 500_000;
/// Default size of the temperature-grid worker pool.
pub const DEFAULT_WORKERS: usize = 4;
/// Default base seed for all random streams of a [`crate::Driver`].
pub const DEFAULT_SEED: u64 = 42;

fn validate_run_config(cfg: &RunConfig) -> Result<(), ValidationError> {
    if cfg.measure < 1 {
        return Err(ValidationError::new("measure must be >= 1"));
    }
    Ok(())
}

/// Sweep budget of one temperature point.
///
/// `warmup` sweeps are discarded, then `measure` sweeps are each followed by
/// one observable accumulation. Observables are normalized by `measure`, so a
/// zero measure count is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
#[validate(schema(function = "validate_run_config"))]
pub struct RunConfig {
    pub warmup: usize,
    pub measure: usize,
}

impl RunConfig {
    pub fn new(warmup: usize, measure: usize) -> Self {
        Self { warmup, measure }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            warmup: DEFAULT_WARMUP,
            measure: DEFAULT_MEASURE,
        }
    }
}

/// How a temperature grid is distributed over workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct DriverConfig {
    /// Number of workers; the grid is cut into this many contiguous chunks.
    #[validate(range(min = 1))]
    pub n_workers: usize,
    /// Base seed. Disorder draws and every worker stream derive from it.
    pub seed: u64,
    /// Process the chunks one after another on the calling thread.
    pub sequential: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            n_workers: DEFAULT_WORKERS,
            seed: DEFAULT_SEED,
            sequential: false,
        }
    }
}
