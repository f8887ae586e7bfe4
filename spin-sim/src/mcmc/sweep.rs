use crate::couplings::BondTable;
use crate::geometry::Lattice;
use crate::spins::SpinState;
use rand::Rng;
use rand_xoshiro::Xoshiro256StarStar;

/// One Metropolis sweep: `n_sites` single-site update attempts.
///
/// Each attempt picks a site uniformly at random (not in scan order), asks
/// the configuration for a proposal, and accepts it when a fresh uniform draw
/// is below `exp(-beta * ΔE)`. Returns the number of accepted moves.
#[cfg_attr(feature = "profile", inline(never))]
pub fn metropolis_sweep<S: SpinState>(
    lattice: &Lattice,
    bonds: &BondTable,
    spins: &mut S,
    beta: f64,
    rng: &mut Xoshiro256StarStar,
) -> usize {
    let n_sites = lattice.n_sites;
    let mut accepted = 0;
    for _ in 0..n_sites {
        let site = rng.gen_range(0..n_sites);
        let proposal = spins.propose(site, rng);
        let eng_change = spins.delta_energy(lattice, bonds, site, proposal);
        if rng.gen::<f64>() < (-beta * eng_change).exp() {
            spins.accept(site, proposal);
            accepted += 1;
        }
    }
    accepted
}
