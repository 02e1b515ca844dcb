//! Grouped mutation: per-partition transforms scattered back to the
//! original row positions

use rayon::prelude::*;

use crate::column::{Column, Scalar};
use crate::error::{Error, Result};
use crate::group::{partition, GroupSpec};
use crate::table::Table;

type MutateFn = Box<dyn Fn(&Table) -> Result<Column> + Send + Sync>;

/// Ordered mapping from new-column name to per-group transform
///
/// Declaration order is evaluation order; a later transform sees the
/// columns produced by earlier ones.
///
/// # Example
/// ```ignore
/// let m = Mutations::new().with("double", |t: &Table| {
///     let values = t.f64_values("x")?;
///     Ok(Column::Float64(Float64Column::from_options(
///         values.into_iter().map(|v| v.map(|x| x * 2.0)).collect(),
///     )))
/// });
/// ```
#[derive(Default)]
pub struct Mutations {
    items: Vec<(String, MutateFn)>,
}

impl Mutations {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a named transform; returns self for chaining
    pub fn with(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&Table) -> Result<Column> + Send + Sync + 'static,
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

/// Apply `mutations` per partition and scatter the results back
///
/// The output table has the input's row count and row order; each named
/// transform adds or overwrites one column. With an empty grouping the
/// whole table is a single partition, so grouped and ungrouped mutation
/// coincide when only one group exists.
pub fn mutate(table: &Table, spec: &GroupSpec, mutations: &Mutations) -> Result<Table> {
    let partitions = partition(table, spec)?;

    let mut result = table.clone();
    for (name, transform) in &mutations.items {
        // Single partition covers rows 0..n in order; skip the scatter.
        if partitions.len() == 1 {
            let column = transform(&result).map_err(|e| Error::ReducerFailure {
                column: name.clone(),
                message: e.to_string(),
            })?;
            if column.len() != result.row_count() {
                return Err(Error::PartitionLengthMismatch {
                    column: name.clone(),
                    expected: result.row_count(),
                    actual: column.len(),
                });
            }
            result = result.with_column(name.clone(), column)?;
            continue;
        }

        // Sub-tables come from the current result, so transforms declared
        // later see the columns produced by earlier ones.
        let outputs: Vec<Column> = partitions
            .par_iter()
            .map(|part| {
                let sub = result.take(&part.rows)?;
                let column = transform(&sub).map_err(|e| Error::ReducerFailure {
                    column: name.clone(),
                    message: e.to_string(),
                })?;
                if column.len() != part.rows.len() {
                    return Err(Error::PartitionLengthMismatch {
                        column: name.clone(),
                        expected: part.rows.len(),
                        actual: column.len(),
                    });
                }
                Ok(column)
            })
            .collect::<Result<Vec<_>>>()?;

        // Position-indexed scatter; completion order of partitions is
        // irrelevant because every row is written exactly once.
        let mut cells = vec![Scalar::Null; result.row_count()];
        for (part, column) in partitions.iter().zip(&outputs) {
            for (offset, &row) in part.rows.iter().enumerate() {
                cells[row] = column.get_scalar(offset)?;
            }
        }
        result = result.with_column(name.clone(), Column::from_scalars(cells, name)?)?;
    }

    Ok(result)
}
