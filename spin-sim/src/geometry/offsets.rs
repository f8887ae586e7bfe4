pub const NORTH: usize = 0;
pub const EAST: usize = 1;
pub const SOUTH: usize = 2;
pub const WEST: usize = 3;
pub const UP: usize = 4;
pub const DOWN: usize = 5;

/// Reciprocal direction of each direction index.
pub const OPPOSITE: [usize; 6] = [SOUTH, WEST, NORTH, EAST, DOWN, UP];

/// Square/cubic neighbor offsets in direction order.
///
/// Coordinates are `[row, col]` in 2D and `[layer, row, col]` in 3D, row-major.
/// North decrements the row, east increments the column, up decrements the
/// layer:
///
/// ```text
///      0            4
///      |            | 0
///  3 - x - 1     3--x--1
///      |           /|
///      2          2 5
/// ```
pub fn square(n_dims: usize) -> Vec<Vec<isize>> {
    let planar: [[isize; 2]; 4] = [[-1, 0], [0, 1], [1, 0], [0, -1]];
    if n_dims == 2 {
        return planar.iter().map(|o| o.to_vec()).collect();
    }
    let mut offsets: Vec<Vec<isize>> = planar.iter().map(|&[r, c]| vec![0, r, c]).collect();
    offsets.push(vec![-1, 0, 0]);
    offsets.push(vec![1, 0, 0]);
    offsets
}
