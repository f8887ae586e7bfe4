//! Metropolis Monte Carlo for Ising, clock and XY spin models on periodic
//! square and cubic lattices, with optional quenched bond disorder.
//!
//! A [`Model`] combines a shared [`Lattice`], a per-model [`BondTable`] and a
//! spin configuration. A [`Driver`] runs a model over a temperature grid on a
//! worker pool and averages over disorder realizations.

pub mod config;
pub mod couplings;
pub mod error;
pub mod geometry;
pub mod mcmc;
pub mod model;
pub mod parallel;
pub mod simulation;
pub mod spins;
pub mod statistics;

pub use config::{DriverConfig, RunConfig};
pub use couplings::{BondTable, Disorder};
pub use error::{Result, SimError};
pub use geometry::Lattice;
pub use model::{BinderModel, Clock, DisorderedModel, Ising, Model, MonteCarloModel};
pub use simulation::{validate_temperatures, Driver};
pub use spins::{AngleTable, ClockSpins, IsingSpins, SpinState, XY_STATES};
pub use statistics::{binder_ratio, Measurement};
