//! Grouped aggregation: one output row per distinct key tuple

use rayon::prelude::*;

use crate::column::{Column, Scalar};
use crate::error::{Error, Result};
use crate::group::{partition, GroupSpec};
use crate::table::Table;

type AggFn = Box<dyn Fn(&Table) -> Result<Scalar> + Send + Sync>;

/// Ordered mapping from output-column name to per-group reducer
///
/// Declaration order fixes the output column order.
///
/// # Example
/// ```ignore
/// let a = Aggregations::new().with("m", |t: &Table| {
///     match t.column("x")? {
///         Column::Float64(col) => Ok(col.mean().map_or(Scalar::Null, Scalar::Float64)),
///         _ => Ok(Scalar::Null),
///     }
/// });
/// ```
#[derive(Default)]
pub struct Aggregations {
    items: Vec<(String, AggFn)>,
}

impl Aggregations {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a named reducer; returns self for chaining
    pub fn with(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&Table) -> Result<Scalar> + Send + Sync + 'static,
    ) -> Self {
        self.items.push((name.into(), Box::new(f)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Reduce each partition to one output row
///
/// Output columns are the key columns (in grouping order) followed by the
/// reducer columns (in declaration order); output rows ascend by key
/// tuple. An empty grouping reduces the whole table to a single row with
/// no key columns. A reducer error fails the whole aggregation — partitions
/// are never silently skipped.
pub fn aggregate(table: &Table, spec: &GroupSpec, aggs: &Aggregations) -> Result<Table> {
    let partitions = partition(table, spec)?;

    // Reducers run per partition on the thread pool; the indexed collect
    // reassembles results in partition order, so output ordering does not
    // depend on completion order.
    let reduced: Vec<Vec<Scalar>> = partitions
        .par_iter()
        .map(|part| {
            let sub = table.take(&part.rows)?;
            aggs.items
                .iter()
                .map(|(name, reduce)| {
                    reduce(&sub).map_err(|e| Error::ReducerFailure {
                        column: name.clone(),
                        message: e.to_string(),
                    })
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    let mut result = Table::new();

    // Key columns are gathered from a representative row per partition,
    // which keeps their original column types.
    if !spec.is_empty() {
        let representatives: Vec<usize> = partitions.iter().map(|p| p.rows[0]).collect();
        for key in spec.keys() {
            result.add_column(key.clone(), table.column(key)?.take(&representatives)?)?;
        }
    }

    for (i, (name, _)) in aggs.items.iter().enumerate() {
        let cells: Vec<Scalar> = reduced.iter().map(|row| row[i].clone()).collect();
        result.add_column(name.clone(), Column::from_scalars(cells, name)?)?;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Float64Column, Int64Column};

    fn sample_table() -> Table {
        let mut table = Table::new();
        table
            .add_column("id", Column::Int64(Int64Column::new(vec![1, 1, 2])))
            .unwrap();
        table
            .add_column(
                "x",
                Column::Float64(Float64Column::new(vec![10.0, 20.0, 30.0])),
            )
            .unwrap();
        table
    }

    fn mean_of_x() -> Aggregations {
        Aggregations::new().with("m", |t: &Table| match t.column("x")? {
            Column::Float64(col) => Ok(col.mean().map_or(Scalar::Null, Scalar::Float64)),
            _ => Ok(Scalar::Null),
        })
    }

    #[test]
    fn test_grouped_mean_rows_and_ordering() {
        let table = sample_table();
        let spec = GroupSpec::new(vec!["id".to_string()]);
        let result = aggregate(&table, &spec, &mean_of_x()).unwrap();

        assert_eq!(result.row_count(), 2);
        assert_eq!(result.column_names(), &["id", "m"]);
        assert_eq!(result.i64_values("id").unwrap(), vec![Some(1), Some(2)]);
        assert_eq!(
            result.f64_values("m").unwrap(),
            vec![Some(15.0), Some(30.0)]
        );
    }

    #[test]
    fn test_empty_spec_reduces_to_one_row() {
        let table = sample_table();
        let result = aggregate(&table, &GroupSpec::empty(), &mean_of_x()).unwrap();

        assert_eq!(result.row_count(), 1);
        assert_eq!(result.column_names(), &["m"]);
        assert_eq!(result.f64_values("m").unwrap(), vec![Some(20.0)]);
    }

    #[test]
    fn test_reducer_columns_keep_declaration_order() {
        let table = sample_table();
        let spec = GroupSpec::new(vec!["id".to_string()]);
        let aggs = Aggregations::new()
            .with("count", |t: &Table| Ok(Scalar::Int64(t.row_count() as i64)))
            .with("total", |t: &Table| match t.column("x")? {
                Column::Float64(col) => Ok(Scalar::Float64(col.sum())),
                _ => Ok(Scalar::Null),
            });
        let result = aggregate(&table, &spec, &aggs).unwrap();

        assert_eq!(result.column_names(), &["id", "count", "total"]);
        assert_eq!(
            result.i64_values("count").unwrap(),
            vec![Some(2), Some(1)]
        );
        assert_eq!(
            result.f64_values("total").unwrap(),
            vec![Some(30.0), Some(30.0)]
        );
    }

    #[test]
    fn test_reducer_error_propagates() {
        let table = sample_table();
        let spec = GroupSpec::new(vec!["id".to_string()]);
        let aggs = Aggregations::new().with("bad", |_t: &Table| {
            Err(Error::InvalidValue("reducer blew up".to_string()))
        });
        let err = aggregate(&table, &spec, &aggs);
        assert!(matches!(err, Err(Error::ReducerFailure { .. })));
    }

    #[test]
    fn test_agg_name_colliding_with_key_is_rejected() {
        let table = sample_table();
        let spec = GroupSpec::new(vec!["id".to_string()]);
        let aggs = Aggregations::new().with("id", |t: &Table| {
            Ok(Scalar::Int64(t.row_count() as i64))
        });
        let err = aggregate(&table, &spec, &aggs);
        assert!(matches!(err, Err(Error::DuplicateColumnName(_))));
    }
}
