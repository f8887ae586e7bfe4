/// Binder cumulant `1 - ⟨M⁴⟩ / (3 ⟨M²⟩²)`.
#[inline]
pub fn binder_ratio(m2: f64, m4: f64) -> f64 {
    1.0 - m4 / (3.0 * m2 * m2)
}

/// Observables of one temperature point averaged over measurement sweeps.
///
/// All quantities are per site: `e = E / N`, `m = |M| / N`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    /// ⟨e⟩.
    pub energy: f64,
    /// ⟨e²⟩.
    pub energy2: f64,
    /// ⟨|m|⟩.
    pub mag: f64,
    /// ⟨m²⟩.
    pub mag2: f64,
    /// ⟨m⁴⟩.
    pub mag4: f64,
}

impl Measurement {
    pub fn binder(&self) -> f64 {
        binder_ratio(self.mag2, self.mag4)
    }

    /// `C/N = β² N (⟨e²⟩ - ⟨e⟩²)`.
    pub fn specific_heat(&self, beta: f64, n_sites: usize) -> f64 {
        beta * beta * n_sites as f64 * (self.energy2 - self.energy * self.energy)
    }

    /// `χ/N = β N (⟨m²⟩ - ⟨|m|⟩²)`.
    pub fn susceptibility(&self, beta: f64, n_sites: usize) -> f64 {
        beta * n_sites as f64 * (self.mag2 - self.mag * self.mag)
    }

    /// Unweighted average over disorder realizations.
    pub fn aggregate(results: &[Self]) -> Self {
        let mut agg = Self::default();
        if results.is_empty() {
            return agg;
        }
        for r in results {
            agg.energy += r.energy;
            agg.energy2 += r.energy2;
            agg.mag += r.mag;
            agg.mag2 += r.mag2;
            agg.mag4 += r.mag4;
        }
        let n = results.len() as f64;
        for v in [
            &mut agg.energy,
            &mut agg.energy2,
            &mut agg.mag,
            &mut agg.mag2,
            &mut agg.mag4,
        ] {
            *v /= n;
        }
        agg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binder_limits() {
        // sharp |M|: 1 - 1/3
        assert!((binder_ratio(4.0, 16.0) - 2.0 / 3.0).abs() < 1e-12);
        // gaussian moments: ⟨M⁴⟩ = 3⟨M²⟩²
        assert!(binder_ratio(2.0, 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_fluctuation_estimators() {
        let m = Measurement {
            energy: -1.0,
            energy2: 1.5,
            mag: 0.5,
            mag2: 0.5,
            mag4: 0.3,
        };
        assert!((m.specific_heat(2.0, 10) - 20.0).abs() < 1e-12);
        assert!((m.susceptibility(2.0, 10) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_aggregate_is_unweighted_mean() {
        let a = Measurement {
            energy: -2.0,
            energy2: 4.0,
            mag: 1.0,
            mag2: 1.0,
            mag4: 1.0,
        };
        let b = Measurement {
            energy: -1.0,
            energy2: 2.0,
            mag: 0.0,
            mag2: 0.5,
            mag4: 0.25,
        };
        let agg = Measurement::aggregate(&[a, b]);
        assert_eq!(agg.energy, -1.5);
        assert_eq!(agg.energy2, 3.0);
        assert_eq!(agg.mag, 0.5);
        assert_eq!(agg.mag2, 0.75);
        assert_eq!(agg.mag4, 0.625);
        assert_eq!(Measurement::aggregate(&[]), Measurement::default());
    }
}
