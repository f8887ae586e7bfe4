use crate::error::{Result, SimError};
use crate::geometry::Lattice;
use rand::Rng;
use rand_xoshiro::Xoshiro256StarStar;

/// Per-site coupling strengths to each of the `2 * n_dims` neighbors.
///
/// Element `i * n_neighbors + d` is the bond between site `i` and
/// `lattice.neighbor(i, d)`. Each physical bond is stored twice, once at each
/// end, and the generators always write both copies with the same value:
/// `bond(i, d) == bond(neighbor(i, d), opposite(d))`.
///
/// A fresh table is clean (all bonds 1.0). Once disorder has been drawn the
/// table stays disordered; build a new table to get a clean system back.
#[derive(Debug, Clone)]
pub struct BondTable {
    n_neighbors: usize,
    bonds: Vec<f64>,
    clean: bool,
}

impl BondTable {
    pub fn new(lattice: &Lattice) -> Self {
        Self {
            n_neighbors: lattice.n_neighbors,
            bonds: vec![1.0; lattice.n_sites * lattice.n_neighbors],
            clean: true,
        }
    }

    #[inline]
    pub fn bond(&self, site: usize, dir: usize) -> f64 {
        self.bonds[site * self.n_neighbors + dir]
    }

    /// Bonds of `site` in direction order.
    #[inline]
    pub fn site_bonds(&self, site: usize) -> &[f64] {
        let base = site * self.n_neighbors;
        &self.bonds[base..base + self.n_neighbors]
    }

    pub fn is_clean(&self) -> bool {
        self.clean
    }

    /// Number of sites covered by the table.
    pub fn n_sites(&self) -> usize {
        self.bonds.len() / self.n_neighbors
    }

    /// Draw every bond uniformly from the band `[1 - delta/2, 1 + delta/2]`.
    ///
    /// For each bond a magnitude `r` and a coin are drawn; the coin picks
    /// `1 - delta * r / 2` or `1 + delta * r / 2`.
    pub fn generate_continuous(
        &mut self,
        lattice: &Lattice,
        delta: f64,
        rng: &mut Xoshiro256StarStar,
    ) -> Result<()> {
        if !delta.is_finite() || delta < 0.0 {
            return Err(SimError::InvalidDisorderWidth(delta));
        }
        tracing::debug!(delta, n_sites = lattice.n_sites, "drawing continuous bond disorder");

        self.fill_bonds(lattice, rng, |rng| {
            let r_val: f64 = rng.gen();
            if rng.gen::<f64>() > 0.5 {
                1.0 - delta * r_val / 2.0
            } else {
                1.0 + delta * r_val / 2.0
            }
        });
        Ok(())
    }

    /// Draw every bond as `+j` with probability `p`, otherwise `-j`.
    pub fn generate_discrete(
        &mut self,
        lattice: &Lattice,
        j: f64,
        p: f64,
        rng: &mut Xoshiro256StarStar,
    ) -> Result<()> {
        if !(0.0..=1.0).contains(&p) {
            return Err(SimError::InvalidProbability(p));
        }
        if !j.is_finite() {
            return Err(SimError::InvalidCoupling(j));
        }
        tracing::debug!(j, p, n_sites = lattice.n_sites, "drawing discrete bond disorder");

        self.fill_bonds(lattice, rng, |rng| {
            if rng.gen::<f64>() < p {
                j
            } else {
                -j
            }
        });
        Ok(())
    }

    /// Overwrite every bond with a fresh draw, mirroring it into the
    /// reciprocal slot of the neighboring site.
    fn fill_bonds(
        &mut self,
        lattice: &Lattice,
        rng: &mut Xoshiro256StarStar,
        mut draw: impl FnMut(&mut Xoshiro256StarStar) -> f64,
    ) {
        let n = self.n_neighbors;
        for i in 0..lattice.n_sites {
            for &d in lattice.bond_directions() {
                let value = draw(rng);
                let j = lattice.neighbor(i, d);
                self.bonds[i * n + d] = value;
                self.bonds[j * n + lattice.opposite(d)] = value;
            }
        }
        self.clean = false;
    }
}

/// A recipe for one disorder realization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Disorder {
    /// Uniform band of width `delta` centered at 1.
    Continuous { delta: f64 },
    /// `+j` with probability `p`, `-j` otherwise.
    Discrete { j: f64, p: f64 },
}

impl Disorder {
    /// Check the parameters without drawing anything.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Continuous { delta } if !delta.is_finite() || delta < 0.0 => {
                Err(SimError::InvalidDisorderWidth(delta))
            }
            Self::Discrete { p, .. } if !(0.0..=1.0).contains(&p) => {
                Err(SimError::InvalidProbability(p))
            }
            Self::Discrete { j, .. } if !j.is_finite() => Err(SimError::InvalidCoupling(j)),
            _ => Ok(()),
        }
    }

    pub fn apply(
        &self,
        lattice: &Lattice,
        bonds: &mut BondTable,
        rng: &mut Xoshiro256StarStar,
    ) -> Result<()> {
        match *self {
            Self::Continuous { delta } => bonds.generate_continuous(lattice, delta, rng),
            Self::Discrete { j, p } => bonds.generate_discrete(lattice, j, p, rng),
        }
    }
}
