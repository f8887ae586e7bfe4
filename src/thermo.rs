//! Thermodynamic integration of energy scans.

use spin_sim::{validate_temperatures, Result, SimError};

/// Composite trapezoid integral of `y(x)` from `x[start]` to the last sample.
///
/// The grid may be non-uniform. Samples past the shorter of the two slices
/// are ignored; a `start` at or beyond the end yields zero.
pub fn trapezoid(x: &[f64], y: &[f64], start: usize) -> f64 {
    let x = x.get(start..).unwrap_or_default();
    let y = y.get(start..).unwrap_or_default();
    x.windows(2)
        .zip(y.windows(2))
        .map(|(x, y)| 0.5 * (x[1] - x[0]) * (y[0] + y[1]))
        .sum()
}

/// Entropy per site at every temperature but the last.
///
/// `S(T_i) = ln(n_states) + E_i / T_i - ∫_{T_i}^{T_max} E(T) / T² dT`, anchored
/// at the highest simulated temperature where the entropy is taken to be
/// `ln(n_states)`. The result has one fewer entry than `temperatures`.
pub fn compute_entropy(
    energies: &[f64],
    temperatures: &[f64],
    n_states: usize,
) -> Result<Vec<f64>> {
    if energies.len() != temperatures.len() {
        return Err(SimError::LengthMismatch {
            what: "energies",
            got: energies.len(),
            expected: temperatures.len(),
        });
    }
    validate_temperatures(temperatures)?;
    if n_states == 0 {
        return Err(SimError::InvalidStateCount(n_states));
    }

    let integrand: Vec<f64> = energies
        .iter()
        .zip(temperatures)
        .map(|(e, t)| e / (t * t))
        .collect();
    let anchor = (n_states as f64).ln();

    let n = temperatures.len();
    Ok((0..n - 1)
        .map(|i| anchor + energies[i] / temperatures[i] - trapezoid(temperatures, &integrand, i))
        .collect())
}
