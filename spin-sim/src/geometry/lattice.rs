use super::offsets::{square, EAST, NORTH, OPPOSITE, SOUTH, UP};
use crate::error::{Result, SimError};

const BOND_DIRS_2D: [usize; 2] = [NORTH, EAST];
const BOND_DIRS_3D: [usize; 3] = [NORTH, EAST, UP];
const ENERGY_DIRS_2D: [usize; 2] = [EAST, SOUTH];
const ENERGY_DIRS_3D: [usize; 3] = [EAST, SOUTH, UP];

/// Periodic square (2D) or cubic (3D) lattice with a precomputed neighbor table.
///
/// Sites are indexed in row-major order over `[row, col]` or
/// `[layer, row, col]`. Each site has `2 * n_dims` neighbors ordered
/// north, east, south, west, then up and down for 3D (see
/// [`super::offsets::square`]).
///
/// Built once per `(L, Dim)` and shared read-only (typically behind an `Arc`).
#[derive(Debug)]
pub struct Lattice {
    /// Number of sites along each axis.
    pub linear_size: usize,
    /// Number of spatial dimensions (2 or 3).
    pub n_dims: usize,
    /// Row-major strides over the lattice shape.
    pub strides: Vec<usize>,
    /// Total number of sites, `L^Dim`.
    pub n_sites: usize,
    /// Neighbors per site, `2 * n_dims`.
    pub n_neighbors: usize,
    /// Layout: `neighbors[i * n_neighbors + d]`.
    neighbors: Vec<u32>,
}

impl Lattice {
    /// Build the periodic neighbor table for linear size `linear_size` in
    /// `n_dims` dimensions.
    pub fn new(linear_size: usize, n_dims: usize) -> Result<Self> {
        if n_dims != 2 && n_dims != 3 {
            return Err(SimError::InvalidDimension(n_dims));
        }
        if linear_size == 0 {
            return Err(SimError::InvalidSize(linear_size));
        }
        let n_sites = linear_size
            .checked_pow(n_dims as u32)
            .filter(|&n| n <= u32::MAX as usize)
            .ok_or(SimError::InvalidSize(linear_size))?;

        let shape = vec![linear_size; n_dims];
        Ok(Self::with_offsets(shape, n_sites, square(n_dims)))
    }

    /// Periodic boundary conditions are applied via `rem_euclid`.
    fn with_offsets(shape: Vec<usize>, n_sites: usize, offsets: Vec<Vec<isize>>) -> Self {
        let n_dims = shape.len();
        let n_neighbors = offsets.len();

        let mut strides = vec![1usize; n_dims];
        for d in (0..n_dims.saturating_sub(1)).rev() {
            strides[d] = strides[d + 1] * shape[d + 1];
        }

        let mut neighbors = vec![0u32; n_sites * n_neighbors];

        for i in 0..n_sites {
            let coords: Vec<usize> = (0..n_dims).map(|d| (i / strides[d]) % shape[d]).collect();

            for (d, off) in offsets.iter().enumerate() {
                let mut flat = 0usize;
                for dim in 0..n_dims {
                    let c = (coords[dim] as isize + off[dim]).rem_euclid(shape[dim] as isize)
                        as usize;
                    flat += c * strides[dim];
                }
                neighbors[i * n_neighbors + d] = flat as u32;
            }
        }

        Self {
            linear_size: shape[0],
            n_dims,
            strides,
            n_sites,
            n_neighbors,
            neighbors,
        }
    }

    /// Neighbor of `site` in direction `dir`.
    #[inline]
    pub fn neighbor(&self, site: usize, dir: usize) -> usize {
        self.neighbors[site * self.n_neighbors + dir] as usize
    }

    /// All `2 * n_dims` neighbors of `site`, in direction order.
    #[inline]
    pub fn neighbors(&self, site: usize) -> &[u32] {
        let base = site * self.n_neighbors;
        &self.neighbors[base..base + self.n_neighbors]
    }

    /// Direction pointing back from `neighbor(i, dir)` to `i`.
    #[inline]
    pub fn opposite(&self, dir: usize) -> usize {
        OPPOSITE[dir]
    }

    /// Directions whose bonds are drawn explicitly by disorder generators.
    /// The remaining directions hold mirrored copies.
    pub fn bond_directions(&self) -> &'static [usize] {
        if self.n_dims == 2 {
            &BOND_DIRS_2D
        } else {
            &BOND_DIRS_3D
        }
    }

    /// Directions summed by the energy observable; every bond appears once.
    pub fn energy_directions(&self) -> &'static [usize] {
        if self.n_dims == 2 {
            &ENERGY_DIRS_2D
        } else {
            &ENERGY_DIRS_3D
        }
    }
}
