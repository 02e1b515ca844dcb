//! Stable multi-key row sorting

use std::cmp::Ordering;

use crate::column::Scalar;
use crate::error::{Error, Result};
use crate::table::Table;

impl Table {
    /// Sort rows by the given key columns
    ///
    /// `ascending` holds one flag per key. The sort is stable, so rows with
    /// equal keys keep their original relative order. Null cells sort
    /// before every value.
    pub fn sort_by_columns(&self, keys: &[&str], ascending: &[bool]) -> Result<Table> {
        if keys.len() != ascending.len() {
            return Err(Error::LengthMismatch {
                expected: keys.len(),
                actual: ascending.len(),
            });
        }

        // Materialize the key cells once; comparisons then stay cheap.
        let mut key_cells: Vec<Vec<Scalar>> = Vec::with_capacity(keys.len());
        for &key in keys {
            key_cells.push(self.column(key)?.to_scalars());
        }

        let mut order: Vec<usize> = (0..self.row_count).collect();
        order.sort_by(|&a, &b| {
            for (cells, &asc) in key_cells.iter().zip(ascending) {
                let cmp = cells[a].cmp(&cells[b]);
                let cmp = if asc { cmp } else { cmp.reverse() };
                if cmp != Ordering::Equal {
                    return cmp;
                }
            }
            Ordering::Equal
        });

        self.take(&order)
    }
}
