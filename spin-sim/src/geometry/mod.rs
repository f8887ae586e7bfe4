pub mod lattice;
pub mod offsets;

pub use lattice::Lattice;
pub use offsets::{DOWN, EAST, NORTH, OPPOSITE, SOUTH, UP, WEST};
