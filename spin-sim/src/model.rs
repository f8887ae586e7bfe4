use std::sync::Arc;

use rand_xoshiro::Xoshiro256StarStar;
use validator::Validate;

use crate::config::RunConfig;
use crate::couplings::{BondTable, Disorder};
use crate::error::{Result, SimError};
use crate::geometry::Lattice;
use crate::mcmc::metropolis_sweep;
use crate::spins::energy::total_energy;
use crate::spins::{ClockSpins, IsingSpins, SpinState};
use crate::statistics::{binder_ratio, Measurement, Statistics};

/// What every simulated model can do: reinitialize and measure energy.
///
/// The temperature-grid driver clones one instance per worker, so clones must
/// own their mutable state.
pub trait MonteCarloModel: Clone + Send + Sync {
    /// Single-site state count, used as the entropy anchor `ln(n_states)`.
    fn n_states(&self) -> usize;

    fn n_sites(&self) -> usize;

    /// Reinitialize the spin configuration.
    fn set_spin(&mut self, rng: &mut Xoshiro256StarStar);

    /// Run the warmup/measure protocol at `beta` and return the mean energy
    /// per site.
    fn sweep_energy(&mut self, beta: f64, rng: &mut Xoshiro256StarStar) -> f64;
}

/// Models that can measure the Binder cumulant.
pub trait BinderModel: MonteCarloModel {
    fn sweep_binder(&mut self, beta: f64, rng: &mut Xoshiro256StarStar) -> f64;
}

/// Models that accept quenched bond disorder.
pub trait DisorderedModel: MonteCarloModel {
    /// Replace the bond table with a fresh disorder realization.
    fn set_exchange(&mut self, disorder: &Disorder, rng: &mut Xoshiro256StarStar) -> Result<()>;
}

/// Ising model on a periodic square or cubic lattice.
pub type Ising = Model<IsingSpins>;
/// q-state clock model; the XY model is a clock with [`crate::XY_STATES`].
pub type Clock = Model<ClockSpins>;

/// A spin configuration on a lattice with its bonds and sweep budget.
///
/// The lattice is shared; cloning deep-copies the bonds and spins.
#[derive(Debug, Clone)]
pub struct Model<S> {
    lattice: Arc<Lattice>,
    bonds: BondTable,
    spins: S,
    run: RunConfig,
}

impl Model<IsingSpins> {
    pub fn ising(linear_size: usize, n_dims: usize) -> Result<Self> {
        let lattice = Arc::new(Lattice::new(linear_size, n_dims)?);
        let spins = IsingSpins::new(lattice.n_sites);
        Self::new(lattice, spins)
    }
}

impl Model<ClockSpins> {
    pub fn clock(linear_size: usize, n_dims: usize, q: usize) -> Result<Self> {
        let lattice = Arc::new(Lattice::new(linear_size, n_dims)?);
        let spins = ClockSpins::new(lattice.n_sites, q)?;
        Self::new(lattice, spins)
    }

    pub fn xy(linear_size: usize, n_dims: usize) -> Result<Self> {
        let lattice = Arc::new(Lattice::new(linear_size, n_dims)?);
        let spins = ClockSpins::xy(lattice.n_sites)?;
        Self::new(lattice, spins)
    }
}

impl<S: SpinState> Model<S> {
    /// Assemble a clean model on a shared lattice with the default sweep
    /// budget.
    pub fn new(lattice: Arc<Lattice>, spins: S) -> Result<Self> {
        if spins.n_sites() != lattice.n_sites {
            return Err(SimError::SiteCountMismatch {
                spins: spins.n_sites(),
                lattice: lattice.n_sites,
            });
        }
        Ok(Self {
            bonds: BondTable::new(&lattice),
            lattice,
            spins,
            run: RunConfig::default(),
        })
    }

    pub fn with_run_config(mut self, run: RunConfig) -> Result<Self> {
        self.set_run_config(run)?;
        Ok(self)
    }

    pub fn set_run_config(&mut self, run: RunConfig) -> Result<()> {
        run.validate()?;
        self.run = run;
        Ok(())
    }

    pub fn run_config(&self) -> RunConfig {
        self.run
    }

    pub fn lattice(&self) -> &Arc<Lattice> {
        &self.lattice
    }

    pub fn bonds(&self) -> &BondTable {
        &self.bonds
    }

    pub fn spins(&self) -> &S {
        &self.spins
    }

    pub fn spins_mut(&mut self) -> &mut S {
        &mut self.spins
    }

    /// Draw continuous bond disorder of width `delta`.
    pub fn set_continuous_exchange(&mut self, delta: f64, rng: &mut Xoshiro256StarStar) -> Result<()> {
        self.bonds.generate_continuous(&self.lattice, delta, rng)
    }

    /// Draw ±`j` bond disorder with probability `p` of `+j`.
    pub fn set_discrete_exchange(
        &mut self,
        j: f64,
        p: f64,
        rng: &mut Xoshiro256StarStar,
    ) -> Result<()> {
        self.bonds.generate_discrete(&self.lattice, j, p, rng)
    }

    /// Energy per site of the current configuration.
    pub fn energy_density(&self) -> f64 {
        total_energy(&self.lattice, &self.bonds, &self.spins) / self.lattice.n_sites as f64
    }

    /// `|M| / N` of the current configuration.
    pub fn magnetization_density(&self) -> f64 {
        self.spins.magnetization() / self.lattice.n_sites as f64
    }

    /// One full lattice pass; returns the number of accepted moves.
    pub fn sweep(&mut self, beta: f64, rng: &mut Xoshiro256StarStar) -> usize {
        metropolis_sweep(&self.lattice, &self.bonds, &mut self.spins, beta, rng)
    }

    /// `warmup` unrecorded sweeps, then `measure` sweeps each followed by a
    /// call to `record`.
    fn run_protocol(
        &mut self,
        beta: f64,
        rng: &mut Xoshiro256StarStar,
        mut record: impl FnMut(&Lattice, &BondTable, &S),
    ) {
        for _ in 0..self.run.warmup {
            metropolis_sweep(&self.lattice, &self.bonds, &mut self.spins, beta, rng);
        }
        for _ in 0..self.run.measure {
            metropolis_sweep(&self.lattice, &self.bonds, &mut self.spins, beta, rng);
            record(self.lattice.as_ref(), &self.bonds, &self.spins);
        }
    }

    /// Energy, magnetization moments and derived estimators from a single
    /// warmup/measure protocol.
    pub fn sweep_observables(&mut self, beta: f64, rng: &mut Xoshiro256StarStar) -> Measurement {
        let n_sites = self.lattice.n_sites as f64;
        let mut energy_stat = Statistics::new(1);
        let mut energy2_stat = Statistics::new(2);
        let mut mag_stat = Statistics::new(1);
        let mut mag2_stat = Statistics::new(2);
        let mut mag4_stat = Statistics::new(4);

        self.run_protocol(beta, rng, |lattice, bonds, spins| {
            let e = total_energy(lattice, bonds, spins) / n_sites;
            let m = spins.magnetization() / n_sites;
            energy_stat.update(e);
            energy2_stat.update(e);
            mag_stat.update(m);
            mag2_stat.update(m);
            mag4_stat.update(m);
        });

        Measurement {
            energy: energy_stat.average(),
            energy2: energy2_stat.average(),
            mag: mag_stat.average(),
            mag2: mag2_stat.average(),
            mag4: mag4_stat.average(),
        }
    }
}

impl<S: SpinState> MonteCarloModel for Model<S> {
    fn n_states(&self) -> usize {
        self.spins.n_states()
    }

    fn n_sites(&self) -> usize {
        self.lattice.n_sites
    }

    fn set_spin(&mut self, rng: &mut Xoshiro256StarStar) {
        self.spins.reset(rng);
    }

    fn sweep_energy(&mut self, beta: f64, rng: &mut Xoshiro256StarStar) -> f64 {
        let mut energy_stat = Statistics::new(1);
        self.run_protocol(beta, rng, |lattice, bonds, spins| {
            energy_stat.update(total_energy(lattice, bonds, spins));
        });
        energy_stat.average() / self.lattice.n_sites as f64
    }
}

impl<S: SpinState> BinderModel for Model<S> {
    fn sweep_binder(&mut self, beta: f64, rng: &mut Xoshiro256StarStar) -> f64 {
        let mut m2_stat = Statistics::new(2);
        let mut m4_stat = Statistics::new(4);
        self.run_protocol(beta, rng, |_, _, spins| {
            let m = spins.magnetization();
            m2_stat.update(m);
            m4_stat.update(m);
        });
        binder_ratio(m2_stat.average(), m4_stat.average())
    }
}

impl<S: SpinState> DisorderedModel for Model<S> {
    fn set_exchange(&mut self, disorder: &Disorder, rng: &mut Xoshiro256StarStar) -> Result<()> {
        disorder.apply(&self.lattice, &mut self.bonds, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> Xoshiro256StarStar {
        Xoshiro256StarStar::seed_from_u64(seed)
    }

    #[test]
    fn test_frozen_ordered_energy_is_minus_dim() {
        for n_dims in [2, 3] {
            let mut model = Ising::ising(4, n_dims)
                .unwrap()
                .with_run_config(RunConfig::new(0, 1))
                .unwrap();
            model.set_spin(&mut rng(0));
            let e = model.sweep_energy(f64::INFINITY, &mut rng(1));
            assert_eq!(e, -(n_dims as f64));
        }
    }

    #[test]
    fn test_set_spin_is_idempotent() {
        let mut model = Ising::ising(5, 2)
            .unwrap()
            .with_run_config(RunConfig::new(5, 5))
            .unwrap();
        let mut r = rng(3);
        model.sweep_energy(0.1, &mut r);
        assert!(model.spins().as_slice().iter().any(|&s| s == -1));

        model.set_spin(&mut r);
        assert!(model.spins().as_slice().iter().all(|&s| s == 1));
        model.set_spin(&mut r);
        assert!(model.spins().as_slice().iter().all(|&s| s == 1));
    }

    #[test]
    fn test_ising_energy_at_unit_beta() {
        let mut model = Ising::ising(4, 2)
            .unwrap()
            .with_run_config(RunConfig::new(1000, 2000))
            .unwrap();
        let mut r = rng(2024);
        model.set_spin(&mut r);
        let e = model.sweep_energy(1.0, &mut r);
        assert!(e > -2.0 && e < 0.0, "energy density {e}");
    }

    #[test]
    fn test_binder_of_ordered_phase() {
        let mut model = Ising::ising(4, 2)
            .unwrap()
            .with_run_config(RunConfig::new(200, 1000))
            .unwrap();
        let mut r = rng(5);
        model.set_spin(&mut r);
        let b = model.sweep_binder(2.0, &mut r);
        assert!((0.0..=1.0).contains(&b), "binder {b}");
        assert!(b > 0.6, "ordered phase should approach 2/3, got {b}");
    }

    #[test]
    fn test_binder_of_xy_model_is_bounded() {
        let mut model = Clock::xy(4, 2)
            .unwrap()
            .with_run_config(RunConfig::new(200, 500))
            .unwrap();
        let mut r = rng(6);
        model.set_spin(&mut r);
        let b = model.sweep_binder(3.0, &mut r);
        assert!((0.0..=1.0).contains(&b), "binder {b}");
    }

    #[test]
    fn test_clock_energy_in_physical_range() {
        for (q, n_dims) in [(2, 2), (6, 2), (50, 3)] {
            let mut model = Clock::clock(4, n_dims, q)
                .unwrap()
                .with_run_config(RunConfig::new(100, 200))
                .unwrap();
            let mut r = rng(q as u64);
            model.set_spin(&mut r);
            let e = model.sweep_energy(0.5, &mut r);
            assert!(e > -(n_dims as f64) && e < 0.0, "q={q}: energy density {e}");
        }
    }

    #[test]
    fn test_observables_agree_with_energy_and_binder() {
        let run = RunConfig::new(50, 300);
        let mut a = Ising::ising(4, 2).unwrap().with_run_config(run).unwrap();
        let mut b = a.clone();

        let mut r = rng(9);
        a.set_spin(&mut r);
        let obs = a.sweep_observables(0.8, &mut r);

        let mut r = rng(9);
        b.set_spin(&mut r);
        let e = b.sweep_energy(0.8, &mut r);

        // same stream, same trajectory
        assert!((obs.energy - e).abs() < 1e-12);
        assert!(obs.energy2 >= obs.energy * obs.energy - 1e-12);
        assert!(obs.mag >= 0.0 && obs.mag <= 1.0);
        assert!(obs.mag2 >= obs.mag * obs.mag - 1e-12);
        assert!(obs.specific_heat(0.8, 16) >= -1e-9);
    }

    #[test]
    fn test_disorder_capabilities() {
        let mut model = Ising::ising(4, 3).unwrap();
        let mut r = rng(4);
        assert!(model.bonds().is_clean());
        model
            .set_exchange(&Disorder::Continuous { delta: 1.0 }, &mut r)
            .unwrap();
        assert!(!model.bonds().is_clean());

        assert!(matches!(
            model.set_discrete_exchange(1.0, 7.0, &mut r),
            Err(SimError::InvalidProbability(_))
        ));
        model.set_discrete_exchange(1.0, 0.0, &mut r).unwrap();
        // all-antiferromagnetic bonds: ordered state costs +Dim per site
        assert_eq!(model.energy_density(), 3.0);
    }

    #[test]
    fn test_clone_owns_bonds_and_spins() {
        let mut a = Clock::clock(3, 2, 5).unwrap();
        let b = a.clone();
        let mut r = rng(1);
        a.set_spin(&mut r);
        a.set_continuous_exchange(2.0, &mut r).unwrap();
        assert!(b.bonds().is_clean());
        assert!(b.spins().angles().iter().all(|&x| x == 0));
        assert!(Arc::ptr_eq(a.lattice(), b.lattice()));
    }

    #[test]
    fn test_invalid_construction() {
        assert!(matches!(
            Ising::ising(4, 5),
            Err(SimError::InvalidDimension(5))
        ));
        assert!(matches!(Clock::xy(0, 2), Err(SimError::InvalidSize(0))));

        let lattice = Arc::new(Lattice::new(3, 2).unwrap());
        assert!(matches!(
            Model::new(lattice, IsingSpins::new(10)),
            Err(SimError::SiteCountMismatch { spins: 10, lattice: 9 })
        ));

        let mut model = Ising::ising(3, 2).unwrap();
        assert!(matches!(
            model.set_run_config(RunConfig::new(10, 0)),
            Err(SimError::Config(_))
        ));
        assert_eq!(model.run_config(), RunConfig::default());
    }

    #[test]
    fn test_magnetization_density() {
        let model = Ising::ising(3, 3).unwrap();
        assert_eq!(model.magnetization_density(), 1.0);
        assert_eq!(model.n_states(), 2);
        assert_eq!(Clock::xy(2, 2).unwrap().n_states(), 50);
    }
}
