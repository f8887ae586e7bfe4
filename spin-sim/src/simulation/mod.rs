use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use rayon::{ThreadPool, ThreadPoolBuilder};
use validator::Validate;

use crate::config::DriverConfig;
use crate::couplings::Disorder;
use crate::error::{Result, SimError};
use crate::model::{BinderModel, DisorderedModel, Model, MonteCarloModel};
use crate::parallel::par_over_temperatures;
use crate::spins::SpinState;
use crate::statistics::Measurement;

/// Check a temperature grid: non-empty, every entry finite and positive.
///
/// An empty grid is reported as an invalid entry at index 0.
pub fn validate_temperatures(temperatures: &[f64]) -> Result<()> {
    if temperatures.is_empty() {
        return Err(SimError::InvalidTemperature {
            index: 0,
            value: f64::NAN,
        });
    }
    match temperatures
        .iter()
        .position(|t| !t.is_finite() || *t <= 0.0)
    {
        Some(index) => Err(SimError::InvalidTemperature {
            index,
            value: temperatures[index],
        }),
        None => Ok(()),
    }
}

/// Runs models over a temperature grid on a fixed-size worker pool and
/// averages over quenched disorder realizations.
///
/// Random streams all derive from [`DriverConfig::seed`]: disorder draws come
/// from [`Driver::disorder_rng`] and the stream of worker `w` in disorder run
/// `r` is seeded with `seed + 1 + r * n_workers + w`. Clean runs use `r = 0`.
pub struct Driver {
    config: DriverConfig,
    pool: ThreadPool,
    on_point: Option<Box<dyn Fn() + Send + Sync>>,
}

impl std::fmt::Debug for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("config", &self.config)
            .field("on_point", &self.on_point.is_some())
            .finish()
    }
}

impl Driver {
    pub fn new(config: DriverConfig) -> Result<Self> {
        config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.n_workers)
            .thread_name(|i| format!("spin-sim-{i}"))
            .build()?;
        Ok(Self {
            config,
            pool,
            on_point: None,
        })
    }

    /// Install a callback invoked once per finished temperature point, from
    /// whichever worker finished it.
    pub fn on_point(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_point = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// The stream that disorder realizations are drawn from, positioned at its
    /// start.
    pub fn disorder_rng(&self) -> Xoshiro256StarStar {
        Xoshiro256StarStar::seed_from_u64(self.config.seed)
    }

    fn run_seed(&self, run: usize) -> u64 {
        let offset = 1 + run as u64 * self.config.n_workers as u64;
        self.config.seed.wrapping_add(offset)
    }

    fn run_grid<M, T>(
        &self,
        temperatures: &[f64],
        model: &M,
        run: usize,
        body: impl Fn(&mut M, f64, &mut Xoshiro256StarStar) -> T + Send + Sync,
    ) -> Vec<T>
    where
        M: MonteCarloModel,
        T: Send + Default + Clone,
    {
        let seed = self.run_seed(run);
        let on_point = self.on_point.as_deref();
        self.pool.install(|| {
            par_over_temperatures(
                temperatures,
                model,
                self.config.n_workers,
                seed,
                self.config.sequential,
                |m, beta, rng| {
                    let value = body(m, beta, rng);
                    if let Some(cb) = on_point {
                        cb();
                    }
                    value
                },
            )
        })
    }

    /// One grid pass per disorder realization. Realizations are drawn in run
    /// order from a fresh [`Driver::disorder_rng`].
    fn disorder_runs<M, T>(
        &self,
        temperatures: &[f64],
        model: &M,
        disorder: &Disorder,
        n_run: usize,
        body: impl Fn(&mut M, f64, &mut Xoshiro256StarStar) -> T + Send + Sync,
    ) -> Result<Vec<Vec<T>>>
    where
        M: DisorderedModel,
        T: Send + Default + Clone,
    {
        validate_temperatures(temperatures)?;
        if n_run == 0 {
            return Err(SimError::InvalidRunCount);
        }
        disorder.validate()?;

        tracing::info!(
            n_temps = temperatures.len(),
            n_run,
            ?disorder,
            "starting disorder-averaged scan"
        );
        let mut disorder_rng = self.disorder_rng();
        let mut runs = Vec::with_capacity(n_run);
        for run in 0..n_run {
            let mut realized = model.clone();
            realized.set_exchange(disorder, &mut disorder_rng)?;
            tracing::debug!(run, "disorder realization drawn");
            runs.push(self.run_grid(temperatures, &realized, run, &body));
        }
        Ok(runs)
    }

    /// Energy density at every temperature for the model's current bonds.
    pub fn compute_energy<M: MonteCarloModel>(
        &self,
        temperatures: &[f64],
        model: &M,
    ) -> Result<Vec<f64>> {
        validate_temperatures(temperatures)?;
        tracing::info!(n_temps = temperatures.len(), "starting energy scan");
        Ok(self.run_grid(temperatures, model, 0, |m, beta, rng| {
            m.sweep_energy(beta, rng)
        }))
    }

    /// Energy density averaged over `n_run` continuous-disorder realizations
    /// of width `delta`.
    pub fn compute_energy_disordered<M: DisorderedModel>(
        &self,
        temperatures: &[f64],
        model: &M,
        delta: f64,
        n_run: usize,
    ) -> Result<Vec<f64>> {
        self.compute_energy_averaged(temperatures, model, &Disorder::Continuous { delta }, n_run)
    }

    pub fn compute_energy_averaged<M: DisorderedModel>(
        &self,
        temperatures: &[f64],
        model: &M,
        disorder: &Disorder,
        n_run: usize,
    ) -> Result<Vec<f64>> {
        let runs = self.disorder_runs(temperatures, model, disorder, n_run, |m, beta, rng| {
            m.sweep_energy(beta, rng)
        })?;
        Ok(mean_columns(&runs))
    }

    /// Binder cumulant at every temperature for the model's current bonds.
    pub fn compute_binder<M: BinderModel>(
        &self,
        temperatures: &[f64],
        model: &M,
    ) -> Result<Vec<f64>> {
        validate_temperatures(temperatures)?;
        tracing::info!(n_temps = temperatures.len(), "starting binder scan");
        Ok(self.run_grid(temperatures, model, 0, |m, beta, rng| {
            m.sweep_binder(beta, rng)
        }))
    }

    pub fn compute_binder_disordered<M: BinderModel + DisorderedModel>(
        &self,
        temperatures: &[f64],
        model: &M,
        delta: f64,
        n_run: usize,
    ) -> Result<Vec<f64>> {
        self.compute_binder_averaged(temperatures, model, &Disorder::Continuous { delta }, n_run)
    }

    /// Binder cumulant averaged over realizations. Each realization's cumulant
    /// is computed first, then the cumulants are averaged.
    pub fn compute_binder_averaged<M: BinderModel + DisorderedModel>(
        &self,
        temperatures: &[f64],
        model: &M,
        disorder: &Disorder,
        n_run: usize,
    ) -> Result<Vec<f64>> {
        let runs = self.disorder_runs(temperatures, model, disorder, n_run, |m, beta, rng| {
            m.sweep_binder(beta, rng)
        })?;
        Ok(mean_columns(&runs))
    }

    /// Full [`Measurement`] at every temperature for the model's current bonds.
    pub fn compute_observables<S: SpinState>(
        &self,
        temperatures: &[f64],
        model: &Model<S>,
    ) -> Result<Vec<Measurement>> {
        validate_temperatures(temperatures)?;
        tracing::info!(n_temps = temperatures.len(), "starting observable scan");
        Ok(self.run_grid(temperatures, model, 0, |m, beta, rng| {
            m.sweep_observables(beta, rng)
        }))
    }

    /// Measurements averaged moment by moment over realizations.
    pub fn compute_observables_averaged<S: SpinState>(
        &self,
        temperatures: &[f64],
        model: &Model<S>,
        disorder: &Disorder,
        n_run: usize,
    ) -> Result<Vec<Measurement>> {
        let runs = self.disorder_runs(temperatures, model, disorder, n_run, |m, beta, rng| {
            m.sweep_observables(beta, rng)
        })?;
        Ok((0..temperatures.len())
            .map(|t| {
                let column: Vec<Measurement> = runs.iter().map(|run| run[t]).collect();
                Measurement::aggregate(&column)
            })
            .collect())
    }
}

fn mean_columns(runs: &[Vec<f64>]) -> Vec<f64> {
    let Some(first) = runs.first() else {
        return Vec::new();
    };
    let mut sum = vec![0.0; first.len()];
    for run in runs {
        for (s, v) in sum.iter_mut().zip(run) {
            *s += v;
        }
    }
    let n = runs.len() as f64;
    sum.iter_mut().for_each(|s| *s /= n);
    sum
}
