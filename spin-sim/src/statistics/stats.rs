/// Running accumulator of `⟨x^power⟩` over measurement sweeps.
#[derive(Debug, Clone)]
pub struct Statistics {
    pub count: usize,
    pub aggregate: f64,
    pub power: u32,
}

impl Statistics {
    pub fn new(power: u32) -> Self {
        Self {
            count: 0,
            aggregate: 0.0,
            power,
        }
    }

    pub fn update(&mut self, value: f64) {
        self.count += 1;
        self.aggregate += if self.power == 1 {
            value
        } else {
            value.powi(self.power as i32)
        };
    }

    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return self.aggregate;
        }
        self.aggregate / self.count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moments() {
        let mut m1 = Statistics::new(1);
        let mut m2 = Statistics::new(2);
        let mut m4 = Statistics::new(4);
        for v in [1.0, -2.0, 3.0] {
            m1.update(v);
            m2.update(v);
            m4.update(v);
        }
        assert_eq!(m1.count, 3);
        assert!((m1.average() - 2.0 / 3.0).abs() < 1e-12);
        assert!((m2.average() - 14.0 / 3.0).abs() < 1e-12);
        assert!((m4.average() - 98.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_average_is_zero() {
        assert_eq!(Statistics::new(2).average(), 0.0);
    }
}
