pub mod clock;
pub mod energy;
pub mod ising;

pub use clock::{AngleTable, ClockSpins, XY_STATES};
pub use ising::IsingSpins;

use crate::couplings::BondTable;
use crate::geometry::Lattice;
use rand_xoshiro::Xoshiro256StarStar;

/// Per-site state of one model family and its local Metropolis move.
///
/// The sweep engine only talks to a configuration through this trait: pick a
/// site, [`propose`](Self::propose) a new local state, price it with
/// [`delta_energy`](Self::delta_energy), and [`accept`](Self::accept) it or
/// drop it. Rejected proposals leave no trace.
pub trait SpinState: Clone + Send + Sync {
    /// A proposed new state for one site.
    type Proposal: Copy;

    fn n_sites(&self) -> usize;

    /// Number of single-site states; `ln(n_states)` is the per-site entropy
    /// at infinite temperature.
    fn n_states(&self) -> usize;

    /// Reinitialize the whole configuration.
    fn reset(&mut self, rng: &mut Xoshiro256StarStar);

    fn propose(&self, site: usize, rng: &mut Xoshiro256StarStar) -> Self::Proposal;

    /// Energy change of applying `proposal` at `site`, using only the bonds
    /// from `site` to its `2 * n_dims` neighbors.
    fn delta_energy(
        &self,
        lattice: &Lattice,
        bonds: &BondTable,
        site: usize,
        proposal: Self::Proposal,
    ) -> f64;

    fn accept(&mut self, site: usize, proposal: Self::Proposal);

    /// Alignment of sites `i` and `j` (`s_i s_j`, or `cos(θ_i - θ_j)`).
    fn coupling(&self, i: usize, j: usize) -> f64;

    /// Magnitude of the total magnetization: `|Σ s_i|` for scalar spins,
    /// `sqrt(Mx² + My²)` for planar ones.
    fn magnetization(&self) -> f64;
}
