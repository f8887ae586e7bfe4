//! Column-oriented numeric tables rendered as whitespace-separated text.

use std::fmt;

use spin_sim::{Result, SimError};

use crate::thermo::compute_entropy;

/// Named `f64` columns sharing one row count.
///
/// Renders as a `#`-prefixed header line followed by one line per row, each
/// value left-aligned in a 12-character field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl DataTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. The first column fixes the row count.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        if let Some(first) = self.columns.first() {
            if values.len() != first.len() {
                return Err(SimError::LengthMismatch {
                    what: "column",
                    got: values.len(),
                    expected: first.len(),
                });
            }
        }
        self.names.push(name.into());
        self.columns.push(values);
        Ok(())
    }

    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        self.push_column(name, values)?;
        Ok(self)
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }

    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        (index < self.n_rows()).then(|| self.columns.iter().map(|c| c[index]).collect())
    }
}

impl fmt::Display for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#{}", self.names.join(" "))?;
        for i in 0..self.n_rows() {
            let last = self.columns.len() - 1;
            for (j, column) in self.columns.iter().enumerate() {
                if j == last {
                    writeln!(f, "{:.8}", column[i])?;
                } else {
                    write!(f, "{:<12.8} ", column[i])?;
                }
            }
        }
        Ok(())
    }
}

/// `#Temperature Energy` table of an energy scan.
pub fn energy_table(temperatures: &[f64], energies: &[f64]) -> Result<DataTable> {
    DataTable::new()
        .with_column("Temperature", temperatures.to_vec())?
        .with_column("Energy", energies.to_vec())
}

/// `#Temperature Entropy` table; the highest temperature has no row.
pub fn entropy_table(
    temperatures: &[f64],
    energies: &[f64],
    n_states: usize,
) -> Result<DataTable> {
    let entropies = compute_entropy(energies, temperatures, n_states)?;
    DataTable::new()
        .with_column("Temperature", temperatures[..entropies.len()].to_vec())?
        .with_column("Entropy", entropies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let table = energy_table(&[0.5, 1.0], &[-2.0, -1.75]).unwrap();
        assert_eq!(
            table.to_string(),
            "#Temperature Energy\n\
             0.50000000   -2.00000000\n\
             1.00000000   -1.75000000\n"
        );
    }

    #[test]
    fn test_column_length_must_match() {
        let mut table = DataTable::new();
        table.push_column("Temperature", vec![1.0, 2.0]).unwrap();
        assert!(matches!(
            table.push_column("L=4", vec![0.5]),
            Err(SimError::LengthMismatch { got: 1, expected: 2, .. })
        ));
        assert_eq!(table.n_columns(), 1);
    }

    #[test]
    fn test_lookup() {
        let table = DataTable::new()
            .with_column("a", vec![1.0, 2.0])
            .unwrap()
            .with_column("b", vec![3.0, 4.0])
            .unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.column("b"), Some(&[3.0, 4.0][..]));
        assert_eq!(table.column("c"), None);
        assert_eq!(table.row(1), Some(vec![2.0, 4.0]));
        assert_eq!(table.row(2), None);
    }

    #[test]
    fn test_entropy_table_drops_last_temperature() {
        let table = entropy_table(&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0], 2).unwrap();
        assert_eq!(table.names(), ["Temperature", "Entropy"]);
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.column("Temperature"), Some(&[1.0, 2.0][..]));
    }

    #[test]
    fn test_empty_table_renders_header_only() {
        assert_eq!(DataTable::new().to_string(), "#\n");
    }
}
