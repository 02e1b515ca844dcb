//! Join engine: validated-key inner and left joins
//!
//! Key resolution, the right-side hash index, and suffixing of colliding
//! column names follow pandas merge semantics.

use std::collections::HashMap;

use log::debug;

use crate::column::Scalar;
use crate::error::{Error, Result};
use crate::table::Table;

/// Join type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// Only row pairs whose key tuples match in both tables
    Inner,
    /// Every left row at least once; unmatched rows get null right columns
    Left,
}

/// Suffixes applied to non-key columns whose names collide
const SUFFIXES: (&str, &str) = ("_x", "_y");

impl Table {
    /// Join two tables on shared key columns
    ///
    /// With `by = None` the key set is the intersection of both tables'
    /// column names, in this table's column order. Matching right rows are
    /// expanded Cartesian-style within each key group.
    pub fn join(&self, other: &Table, by: Option<&[&str]>, how: JoinType) -> Result<Table> {
        let keys = resolve_join_keys(self, other, by)?;

        // Hash the right table's key tuples once
        let mut right_index: HashMap<Vec<Scalar>, Vec<usize>> = HashMap::new();
        for row in 0..other.row_count {
            let tuple = key_tuple(other, &keys, row)?;
            right_index.entry(tuple).or_default().push(row);
        }

        // Collect matched row pairs in left row order
        let mut left_rows: Vec<usize> = Vec::new();
        let mut right_rows: Vec<Option<usize>> = Vec::new();
        for row in 0..self.row_count {
            let tuple = key_tuple(self, &keys, row)?;
            match right_index.get(&tuple) {
                Some(matches) => {
                    for &right_row in matches {
                        left_rows.push(row);
                        right_rows.push(Some(right_row));
                    }
                }
                None => {
                    if how == JoinType::Left {
                        left_rows.push(row);
                        right_rows.push(None);
                    }
                }
            }
        }

        // Non-key columns whose names appear on both sides get suffixed
        let is_key = |name: &str| keys.iter().any(|k| k == name);
        let overlapping: Vec<&String> = self
            .column_names
            .iter()
            .filter(|name| !is_key(name.as_str()) && other.contains_column(name.as_str()))
            .collect();

        let mut result = Table::new();
        for (name, column) in self.column_names.iter().zip(&self.columns) {
            let out_name = if overlapping.contains(&name) {
                format!("{}{}", name, SUFFIXES.0)
            } else {
                name.clone()
            };
            result.add_column(out_name, column.take(&left_rows)?)?;
        }
        for (name, column) in other.column_names.iter().zip(&other.columns) {
            if is_key(name) {
                continue;
            }
            let out_name = if overlapping.contains(&name) {
                format!("{}{}", name, SUFFIXES.1)
            } else {
                name.clone()
            };
            result.add_column(out_name, column.take_opt(&right_rows)?)?;
        }

        Ok(result)
    }

    /// Inner join on shared key columns
    pub fn inner_join(&self, other: &Table, by: Option<&[&str]>) -> Result<Table> {
        self.join(other, by, JoinType::Inner)
    }

    /// Left join on shared key columns
    pub fn left_join(&self, other: &Table, by: Option<&[&str]>) -> Result<Table> {
        self.join(other, by, JoinType::Left)
    }
}

fn key_tuple(table: &Table, keys: &[String], row: usize) -> Result<Vec<Scalar>> {
    keys.iter().map(|key| table.cell(row, key)).collect()
}

fn resolve_join_keys(left: &Table, right: &Table, by: Option<&[&str]>) -> Result<Vec<String>> {
    match by {
        Some(columns) => {
            if columns.is_empty() {
                return Err(Error::EmptyJoinKey);
            }
            for &name in columns {
                if !left.contains_column(name) || !right.contains_column(name) {
                    return Err(Error::UnknownJoinColumn(name.to_string()));
                }
            }
            Ok(columns.iter().map(|s| s.to_string()).collect())
        }
        None => {
            let keys: Vec<String> = left
                .column_names
                .iter()
                .filter(|name| right.contains_column(name.as_str()))
                .cloned()
                .collect();
            if keys.is_empty() {
                return Err(Error::EmptyJoinKey);
            }
            debug!("join keys auto-detected: {:?}", keys);
            Ok(keys)
        }
    }
}
