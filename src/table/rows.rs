//! Row-level operations: gather, masks, windows, sampling

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{rng, Rng, RngCore, SeedableRng};

use crate::error::{Error, Result};
use crate::table::Table;

impl Table {
    /// Gather the rows at `indices` into a new table
    ///
    /// Indices may repeat and appear in any order; each is bounds-checked.
    pub fn take(&self, indices: &[usize]) -> Result<Table> {
        let mut result = Table::new();
        for (name, column) in self.column_names.iter().zip(&self.columns) {
            result.add_column(name.clone(), column.take(indices)?)?;
        }
        if self.columns.is_empty() {
            // A table can have rows but no columns (e.g. after select(&[]))
            for &idx in indices {
                if idx >= self.row_count {
                    return Err(Error::IndexOutOfBounds {
                        index: idx,
                        size: self.row_count,
                    });
                }
            }
            result.row_count = indices.len();
        }
        Ok(result)
    }

    /// Keep the rows whose mask slot is true
    pub fn filter_by_mask(&self, mask: &[bool]) -> Result<Table> {
        if mask.len() != self.row_count {
            return Err(Error::LengthMismatch {
                expected: self.row_count,
                actual: mask.len(),
            });
        }

        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| if keep { Some(i) } else { None })
            .collect();
        self.take(&indices)
    }

    /// First `n` rows (fewer if the table is shorter)
    pub fn head(&self, n: usize) -> Result<Table> {
        let count = std::cmp::min(n, self.row_count);
        let indices: Vec<usize> = (0..count).collect();
        self.take(&indices)
    }

    /// Last `n` rows (fewer if the table is shorter)
    pub fn tail(&self, n: usize) -> Result<Table> {
        let count = std::cmp::min(n, self.row_count);
        let indices: Vec<usize> = (self.row_count - count..self.row_count).collect();
        self.take(&indices)
    }

    /// Sample `n` rows, with or without replacement
    ///
    /// A seed makes the draw deterministic. Without replacement the sample
    /// size is capped at the row count.
    pub fn sample_n(&self, n: usize, replace: bool, seed: Option<u64>) -> Result<Table> {
        if self.row_count == 0 {
            return self.take(&[]);
        }

        let mut rng = match seed {
            Some(seed_val) => StdRng::seed_from_u64(seed_val),
            None => {
                let mut seed_bytes = [0u8; 32];
                rng().fill_bytes(&mut seed_bytes);
                StdRng::from_seed(seed_bytes)
            }
        };

        let sampled: Vec<usize> = if replace {
            (0..n).map(|_| rng.random_range(0..self.row_count)).collect()
        } else {
            let sample_size = std::cmp::min(n, self.row_count);
            let mut indices: Vec<usize> = (0..self.row_count).collect();
            indices.shuffle(&mut rng);
            indices.truncate(sample_size);
            indices
        };

        self.take(&sampled)
    }
}
