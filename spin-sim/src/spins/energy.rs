use super::SpinState;
use crate::couplings::BondTable;
use crate::geometry::Lattice;

/// Total energy of a configuration, `-Σ_<ij> J_ij · coupling(i, j)`.
///
/// Each site contributes the bonds along [`Lattice::energy_directions`], so
/// every undirected bond is counted exactly once.
pub fn total_energy<S: SpinState>(lattice: &Lattice, bonds: &BondTable, spins: &S) -> f64 {
    let dirs = lattice.energy_directions();
    let mut total = 0.0;
    for i in 0..lattice.n_sites {
        for &d in dirs {
            let j = lattice.neighbor(i, d);
            total += bonds.bond(i, d) * spins.coupling(i, j);
        }
    }
    -total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spins::{ClockSpins, IsingSpins};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_ordered_energy_is_minus_dim_per_site() {
        for n_dims in [2, 3] {
            let lat = Lattice::new(4, n_dims).unwrap();
            let bonds = BondTable::new(&lat);
            let ising = IsingSpins::new(lat.n_sites);
            let clock = ClockSpins::new(lat.n_sites, 5).unwrap();
            let expected = -(n_dims as f64) * lat.n_sites as f64;
            assert_eq!(total_energy(&lat, &bonds, &ising), expected);
            assert!((total_energy(&lat, &bonds, &clock) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_checkerboard_is_plus_two_per_site() {
        let lat = Lattice::new(4, 2).unwrap();
        let bonds = BondTable::new(&lat);
        let mut s = IsingSpins::new(lat.n_sites);
        for (i, x) in s.as_mut_slice().iter_mut().enumerate() {
            let (row, col) = (i / 4, i % 4);
            *x = if (row + col) % 2 == 0 { 1 } else { -1 };
        }
        assert_eq!(total_energy(&lat, &bonds, &s), 2.0 * lat.n_sites as f64);
    }

    #[test]
    fn test_energy_change_matches_delta_energy() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(21);
        let lat = Lattice::new(5, 3).unwrap();
        let mut bonds = BondTable::new(&lat);
        bonds.generate_continuous(&lat, 1.0, &mut rng).unwrap();

        let mut clock = ClockSpins::new(lat.n_sites, 7).unwrap();
        clock.reset(&mut rng);
        for site in [0, 31, 124] {
            let before = total_energy(&lat, &bonds, &clock);
            let proposal = clock.propose(site, &mut rng);
            let predicted = clock.delta_energy(&lat, &bonds, site, proposal);
            clock.accept(site, proposal);
            let after = total_energy(&lat, &bonds, &clock);
            assert!((after - before - predicted).abs() < 1e-9);
        }

        let mut ising = IsingSpins::new(lat.n_sites);
        for site in [3, 60] {
            let before = total_energy(&lat, &bonds, &ising);
            let predicted = ising.delta_energy(&lat, &bonds, site, ());
            ising.accept(site, ());
            let after = total_energy(&lat, &bonds, &ising);
            assert!((after - before - predicted).abs() < 1e-9);
        }
    }
}
