use super::SpinState;
use crate::couplings::BondTable;
use crate::error::{Result, SimError};
use crate::geometry::Lattice;
use rand::Rng;
use rand_xoshiro::Xoshiro256StarStar;
use std::f64::consts::PI;
use std::sync::Arc;

/// Number of discrete angles used to stand in for the continuous XY model.
pub const XY_STATES: usize = 50;

/// Cosine and sine of the `q` clock angles `2πk/q`, `k = 0..q`.
#[derive(Debug)]
pub struct AngleTable {
    q: usize,
    cos: Vec<f64>,
    sin: Vec<f64>,
}

impl AngleTable {
    pub fn new(q: usize) -> Result<Self> {
        if q < 2 {
            return Err(SimError::InvalidStateCount(q));
        }
        let dq = 2.0 * PI / q as f64;
        Ok(Self {
            q,
            cos: (0..q).map(|k| (k as f64 * dq).cos()).collect(),
            sin: (0..q).map(|k| (k as f64 * dq).sin()).collect(),
        })
    }

    pub fn q(&self) -> usize {
        self.q
    }

    #[inline]
    pub fn cos(&self, k: usize) -> f64 {
        self.cos[k]
    }

    #[inline]
    pub fn sin(&self, k: usize) -> f64 {
        self.sin[k]
    }

    /// `cos(θ_a - θ_b)` for angle indices `a` and `b`.
    #[inline]
    pub fn cos_diff(&self, a: u16, b: u16) -> f64 {
        self.cos[(a as usize + self.q - b as usize) % self.q]
    }
}

/// q-state clock configuration: one angle index in `[0, q)` per site.
///
/// The lookup table is immutable and shared between clones; the angles are
/// owned.
#[derive(Debug, Clone)]
pub struct ClockSpins {
    angles: Vec<u16>,
    table: Arc<AngleTable>,
}

impl ClockSpins {
    /// All angles at index 0; call [`SpinState::reset`] for a random start.
    pub fn new(n_sites: usize, q: usize) -> Result<Self> {
        if q > u16::MAX as usize {
            return Err(SimError::InvalidStateCount(q));
        }
        Ok(Self {
            angles: vec![0; n_sites],
            table: Arc::new(AngleTable::new(q)?),
        })
    }

    /// Clock model with [`XY_STATES`] angles.
    pub fn xy(n_sites: usize) -> Result<Self> {
        Self::new(n_sites, XY_STATES)
    }

    pub fn q(&self) -> usize {
        self.table.q
    }

    pub fn table(&self) -> &AngleTable {
        &self.table
    }

    pub fn angles(&self) -> &[u16] {
        &self.angles
    }

    pub fn angles_mut(&mut self) -> &mut [u16] {
        &mut self.angles
    }
}

impl SpinState for ClockSpins {
    /// New angle index.
    type Proposal = u16;

    fn n_sites(&self) -> usize {
        self.angles.len()
    }

    fn n_states(&self) -> usize {
        self.table.q
    }

    /// Independent uniform angle index per site.
    fn reset(&mut self, rng: &mut Xoshiro256StarStar) {
        let q = self.table.q as u16;
        for a in self.angles.iter_mut() {
            *a = rng.gen_range(0..q);
        }
    }

    /// Uniform over the `q - 1` indices that differ from the current one.
    #[inline]
    fn propose(&self, site: usize, rng: &mut Xoshiro256StarStar) -> u16 {
        let current = self.angles[site];
        let k = rng.gen_range(0..self.table.q as u16 - 1);
        if k >= current {
            k + 1
        } else {
            k
        }
    }

    #[inline]
    fn delta_energy(&self, lattice: &Lattice, bonds: &BondTable, site: usize, new: u16) -> f64 {
        let old = self.angles[site];
        let mut eng_change = 0.0;
        for (&j, &b) in lattice.neighbors(site).iter().zip(bonds.site_bonds(site)) {
            let neigh = self.angles[j as usize];
            eng_change += b * (self.table.cos_diff(old, neigh) - self.table.cos_diff(new, neigh));
        }
        eng_change
    }

    #[inline]
    fn accept(&mut self, site: usize, new: u16) {
        self.angles[site] = new;
    }

    #[inline]
    fn coupling(&self, i: usize, j: usize) -> f64 {
        self.table.cos_diff(self.angles[i], self.angles[j])
    }

    fn magnetization(&self) -> f64 {
        let (mut mx, mut my) = (0.0, 0.0);
        for &a in &self.angles {
            mx += self.table.cos(a as usize);
            my += self.table.sin(a as usize);
        }
        (mx * mx + my * my).sqrt()
    }
}
