//! Grouping engine: key specification, partitioning, grouped mutation and
//! aggregation
//!
//! A partition is the set of rows sharing one key tuple. Partitions cover
//! the row set completely and disjointly, and are enumerated in ascending
//! lexicographic key order so that aggregation output is deterministic.

pub mod aggregate;
pub mod mutate;

use std::collections::HashMap;

use log::debug;

use crate::column::Scalar;
use crate::error::{Error, Result};
use crate::table::Table;

pub use aggregate::{aggregate, Aggregations};
pub use mutate::{mutate, Mutations};

/// Ordered list of key-column names defining the active partitioning
///
/// Empty means no grouping. Validated against a table when the grouping is
/// established, not at partition time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSpec {
    keys: Vec<String>,
}

impl GroupSpec {
    /// Grouping over the given key columns
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    /// No grouping
    pub fn empty() -> Self {
        Self { keys: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn contains(&self, name: &str) -> bool {
        self.keys.iter().any(|k| k == name)
    }

    /// Check every key exists in `table` and none is repeated
    pub fn validate(&self, table: &Table) -> Result<()> {
        for (i, key) in self.keys.iter().enumerate() {
            if !table.contains_column(key) {
                return Err(Error::InvalidGroupColumn(key.clone()));
            }
            if self.keys[..i].contains(key) {
                return Err(Error::InvalidGroupColumn(key.clone()));
            }
        }
        Ok(())
    }
}

/// One group: its key tuple and the rows that carry it
///
/// Row positions are ascending positions in the source table.
#[derive(Debug, Clone)]
pub struct Partition {
    pub key: Vec<Scalar>,
    pub rows: Vec<usize>,
}

/// Split a table into partitions according to `spec`
///
/// An empty spec yields a single partition covering every row. A null key
/// cell is a real key part: all null cells of a key column fall into the
/// same group. Partitions come back sorted ascending by key tuple.
pub fn partition(table: &Table, spec: &GroupSpec) -> Result<Vec<Partition>> {
    if spec.is_empty() {
        return Ok(vec![Partition {
            key: Vec::new(),
            rows: (0..table.row_count()).collect(),
        }]);
    }

    let mut key_columns = Vec::with_capacity(spec.keys().len());
    for key in spec.keys() {
        key_columns.push(table.column(key)?);
    }

    let mut groups: HashMap<Vec<Scalar>, Vec<usize>> = HashMap::new();
    for row in 0..table.row_count() {
        let mut tuple = Vec::with_capacity(key_columns.len());
        for column in &key_columns {
            tuple.push(column.get_scalar(row)?);
        }
        groups.entry(tuple).or_default().push(row);
    }

    let mut partitions: Vec<Partition> = groups
        .into_iter()
        .map(|(key, rows)| Partition { key, rows })
        .collect();
    partitions.sort_by(|a, b| a.key.cmp(&b.key));

    debug!(
        "partitioned {} rows into {} groups by {:?}",
        table.row_count(),
        partitions.len(),
        spec.keys()
    );
    Ok(partitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Column, Int64Column, StringColumn};

    fn sample_table() -> Table {
        let mut table = Table::new();
        table
            .add_column(
                "g",
                Column::String(StringColumn::new(vec![
                    "b".to_string(),
                    "a".to_string(),
                    "b".to_string(),
                ])),
            )
            .unwrap();
        table
            .add_column("v", Column::Int64(Int64Column::new(vec![1, 2, 3])))
            .unwrap();
        table
    }

    #[test]
    fn test_partitions_cover_rows_disjointly() {
        let table = sample_table();
        let spec = GroupSpec::new(vec!["g".to_string()]);
        let partitions = partition(&table, &spec).unwrap();

        let mut seen: Vec<usize> = partitions.iter().flat_map(|p| p.rows.clone()).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn test_partitions_sorted_by_key() {
        let table = sample_table();
        let spec = GroupSpec::new(vec!["g".to_string()]);
        let partitions = partition(&table, &spec).unwrap();

        assert_eq!(partitions.len(), 2);
        assert_eq!(partitions[0].key, vec![Scalar::Str("a".to_string())]);
        assert_eq!(partitions[1].key, vec![Scalar::Str("b".to_string())]);
        // Row positions ascend within a partition
        assert_eq!(partitions[1].rows, vec![0, 2]);
    }

    #[test]
    fn test_null_keys_collapse_into_one_group() {
        let mut table = Table::new();
        table
            .add_column(
                "k",
                Column::Int64(Int64Column::from_options(vec![
                    None,
                    Some(1),
                    None,
                    Some(1),
                ])),
            )
            .unwrap();
        let spec = GroupSpec::new(vec!["k".to_string()]);
        let partitions = partition(&table, &spec).unwrap();

        assert_eq!(partitions.len(), 2);
        // Null group sorts first
        assert_eq!(partitions[0].key, vec![Scalar::Null]);
        assert_eq!(partitions[0].rows, vec![0, 2]);
    }

    #[test]
    fn test_empty_spec_is_one_partition() {
        let table = sample_table();
        let partitions = partition(&table, &GroupSpec::empty()).unwrap();
        assert_eq!(partitions.len(), 1);
        assert_eq!(partitions[0].rows, vec![0, 1, 2]);
        assert!(partitions[0].key.is_empty());
    }

    #[test]
    fn test_validate_rejects_missing_and_repeated_keys() {
        let table = sample_table();
        assert!(matches!(
            GroupSpec::new(vec!["nope".to_string()]).validate(&table),
            Err(Error::InvalidGroupColumn(_))
        ));
        assert!(matches!(
            GroupSpec::new(vec!["g".to_string(), "g".to_string()]).validate(&table),
            Err(Error::InvalidGroupColumn(_))
        ));
    }
}
