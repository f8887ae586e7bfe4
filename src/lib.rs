//! Energy, entropy and Binder-cumulant scans of clean and bond-disordered
//! Ising, clock and XY models, built on the [`spin_sim`] engine.

pub mod scan;
pub mod table;
pub mod thermo;

pub use scan::{scan_binder, scan_binder_sizes, scan_energy, EnergyScan, Sampling};
pub use spin_sim;
pub use table::{energy_table, entropy_table, DataTable};
pub use thermo::{compute_entropy, trapezoid};
