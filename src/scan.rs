//! Temperature scans with optional progress reporting.

use indicatif::{ProgressBar, ProgressStyle};
use spin_sim::{
    BinderModel, Disorder, DisorderedModel, Driver, DriverConfig, MonteCarloModel, Result,
};

use crate::table::{energy_table, entropy_table, DataTable};
use crate::thermo::compute_entropy;

/// How bonds are sampled during a scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sampling {
    /// A single pass with the model's current bonds.
    Clean,
    /// Average over `n_run` fresh disorder realizations.
    Averaged { disorder: Disorder, n_run: usize },
}

impl Sampling {
    fn n_run(&self) -> usize {
        match self {
            Self::Clean => 1,
            Self::Averaged { n_run, .. } => *n_run,
        }
    }
}

/// Energies of a scan and the entropies integrated from them.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyScan {
    pub temperatures: Vec<f64>,
    pub energies: Vec<f64>,
    /// One entry per temperature except the highest.
    pub entropies: Vec<f64>,
    pub n_states: usize,
}

impl EnergyScan {
    pub fn energy_table(&self) -> Result<DataTable> {
        energy_table(&self.temperatures, &self.energies)
    }

    pub fn entropy_table(&self) -> Result<DataTable> {
        entropy_table(&self.temperatures, &self.energies, self.n_states)
    }
}

fn progress_bar(len: usize, message: String, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    match ProgressStyle::with_template(
        "{msg} [{bar:40}] {pos}/{len} [{elapsed_precise} < {eta_precise}, {per_sec}]",
    ) {
        Ok(style) => pb.set_style(style.progress_chars("=> ")),
        Err(err) => tracing::warn!(%err, "falling back to default progress style"),
    }
    pb.set_message(message);
    pb
}

fn driver_with_progress(config: DriverConfig, pb: &ProgressBar) -> Result<Driver> {
    let pb = pb.clone();
    Ok(Driver::new(config)?.on_point(move || pb.inc(1)))
}

/// Energy scan followed by entropy integration.
pub fn scan_energy<M: DisorderedModel>(
    config: DriverConfig,
    temperatures: &[f64],
    model: &M,
    sampling: &Sampling,
    progress: bool,
) -> Result<EnergyScan> {
    let pb = progress_bar(
        temperatures.len() * sampling.n_run(),
        "energy".to_string(),
        progress,
    );
    let driver = driver_with_progress(config, &pb)?;
    let energies = match *sampling {
        Sampling::Clean => driver.compute_energy(temperatures, model)?,
        Sampling::Averaged { disorder, n_run } => {
            driver.compute_energy_averaged(temperatures, model, &disorder, n_run)?
        }
    };
    pb.finish();

    let n_states = model.n_states();
    let entropies = compute_entropy(&energies, temperatures, n_states)?;
    tracing::info!(n_temps = temperatures.len(), n_states, "energy scan finished");
    Ok(EnergyScan {
        temperatures: temperatures.to_vec(),
        energies,
        entropies,
        n_states,
    })
}

/// Binder cumulant at every temperature.
pub fn scan_binder<M: BinderModel + DisorderedModel>(
    config: DriverConfig,
    temperatures: &[f64],
    model: &M,
    sampling: &Sampling,
    progress: bool,
) -> Result<Vec<f64>> {
    binder_with_message(config, temperatures, model, sampling, progress, "binder".to_string())
}

fn binder_with_message<M: BinderModel + DisorderedModel>(
    config: DriverConfig,
    temperatures: &[f64],
    model: &M,
    sampling: &Sampling,
    progress: bool,
    message: String,
) -> Result<Vec<f64>> {
    let pb = progress_bar(temperatures.len() * sampling.n_run(), message, progress);
    let driver = driver_with_progress(config, &pb)?;
    let binder = match *sampling {
        Sampling::Clean => driver.compute_binder(temperatures, model)?,
        Sampling::Averaged { disorder, n_run } => {
            driver.compute_binder_averaged(temperatures, model, &disorder, n_run)?
        }
    };
    pb.finish();
    Ok(binder)
}

/// Binder cumulant for several lattice sizes, one column per size.
///
/// `build` constructs the model for a linear size. Columns are named
/// `Temperature` then `L=<size>`.
pub fn scan_binder_sizes<M, F>(
    config: DriverConfig,
    temperatures: &[f64],
    sizes: &[usize],
    build: F,
    sampling: &Sampling,
    progress: bool,
) -> Result<DataTable>
where
    M: BinderModel + DisorderedModel,
    F: Fn(usize) -> Result<M>,
{
    let mut table = DataTable::new().with_column("Temperature", temperatures.to_vec())?;
    for &size in sizes {
        let model = build(size)?;
        tracing::info!(size, "binder scan for lattice size");
        let binder = binder_with_message(
            config,
            temperatures,
            &model,
            sampling,
            progress,
            format!("L = {size}"),
        )?;
        table.push_column(format!("L={size}"), binder)?;
    }
    Ok(table)
}
