use super::SpinState;
use crate::couplings::BondTable;
use crate::geometry::Lattice;
use rand_xoshiro::Xoshiro256StarStar;

/// Ising configuration: one ±1 spin per site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsingSpins {
    spins: Vec<i8>,
}

impl IsingSpins {
    /// All spins up.
    pub fn new(n_sites: usize) -> Self {
        Self {
            spins: vec![1; n_sites],
        }
    }

    pub fn as_slice(&self) -> &[i8] {
        &self.spins
    }

    pub fn as_mut_slice(&mut self) -> &mut [i8] {
        &mut self.spins
    }
}

impl SpinState for IsingSpins {
    /// The only Ising move is a flip.
    type Proposal = ();

    fn n_sites(&self) -> usize {
        self.spins.len()
    }

    fn n_states(&self) -> usize {
        2
    }

    /// Ordered start: every spin is set to +1; the stream is not consumed.
    fn reset(&mut self, _rng: &mut Xoshiro256StarStar) {
        self.spins.fill(1);
    }

    #[inline]
    fn propose(&self, _site: usize, _rng: &mut Xoshiro256StarStar) -> Self::Proposal {}

    #[inline]
    fn delta_energy(&self, lattice: &Lattice, bonds: &BondTable, site: usize, _: ()) -> f64 {
        let mut h = 0.0;
        for (&j, &b) in lattice.neighbors(site).iter().zip(bonds.site_bonds(site)) {
            h += b * self.spins[j as usize] as f64;
        }
        2.0 * self.spins[site] as f64 * h
    }

    #[inline]
    fn accept(&mut self, site: usize, _: ()) {
        self.spins[site] = -self.spins[site];
    }

    #[inline]
    fn coupling(&self, i: usize, j: usize) -> f64 {
        (self.spins[i] * self.spins[j]) as f64
    }

    fn magnetization(&self) -> f64 {
        let sum: i64 = self.spins.iter().map(|&s| s as i64).sum();
        sum.abs() as f64
    }
}
