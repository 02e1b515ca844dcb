//! Wide-to-long reshaping

use crate::column::{Column, Scalar, StringColumn};
use crate::error::{Error, Result};
use crate::table::Table;

impl Table {
    /// Melt every column not listed in `keep` into (`key`, `value`) pairs
    ///
    /// Output rows are column-major over the melted columns: all rows of
    /// the first melted column, then all rows of the second, and so on,
    /// with the `keep` columns replicated alongside. Melted cells must
    /// share a column type (integers widen to floats).
    pub fn gather(&self, key: &str, value: &str, keep: &[&str]) -> Result<Table> {
        for &name in keep {
            if !self.contains_column(name) {
                return Err(Error::ColumnNotFound(name.to_string()));
            }
        }
        for out_name in [key, value] {
            if keep.contains(&out_name) {
                return Err(Error::DuplicateColumnName(out_name.to_string()));
            }
        }
        if key == value {
            return Err(Error::DuplicateColumnName(key.to_string()));
        }

        let value_vars: Vec<&String> = self
            .column_names
            .iter()
            .filter(|name| !keep.contains(&name.as_str()))
            .collect();
        if value_vars.is_empty() {
            return Err(Error::InvalidValue(
                "no value columns to gather".to_string(),
            ));
        }

        let n_rows = self.row_count;
        let total_rows = n_rows * value_vars.len();

        // keep columns replicate once per melted column
        let mut keep_indices = Vec::with_capacity(total_rows);
        let mut var_names = Vec::with_capacity(total_rows);
        let mut cells: Vec<Scalar> = Vec::with_capacity(total_rows);
        for var in &value_vars {
            let column = self.column(var.as_str())?;
            for row in 0..n_rows {
                keep_indices.push(row);
                var_names.push(var.to_string());
                cells.push(column.get_scalar(row)?);
            }
        }

        let mut result = Table::new();
        for &name in keep {
            result.add_column(name, self.column(name)?.take(&keep_indices)?)?;
        }
        result.add_column(key, Column::String(StringColumn::new(var_names)))?;
        result.add_column(value, Column::from_scalars(cells, value)?)?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Float64Column, Int64Column};

    fn wide_table() -> Table {
        let mut table = Table::new();
        table
            .add_column("id", Column::Int64(Int64Column::new(vec![1, 2])))
            .unwrap();
        table
            .add_column("a", Column::Float64(Float64Column::new(vec![1.0, 2.0])))
            .unwrap();
        table
            .add_column("b", Column::Float64(Float64Column::new(vec![3.0, 4.0])))
            .unwrap();
        table
    }

    #[test]
    fn test_gather_shape_and_order() {
        let long = wide_table().gather("key", "value", &["id"]).unwrap();
        assert_eq!(long.row_count(), 4);
        assert_eq!(long.column_names(), &["id", "key", "value"]);
        assert_eq!(
            long.str_values("key").unwrap(),
            vec![
                Some("a".to_string()),
                Some("a".to_string()),
                Some("b".to_string()),
                Some("b".to_string())
            ]
        );
        assert_eq!(
            long.f64_values("value").unwrap(),
            vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]
        );
        assert_eq!(
            long.i64_values("id").unwrap(),
            vec![Some(1), Some(2), Some(1), Some(2)]
        );
    }

    #[test]
    fn test_gather_rejects_colliding_names() {
        let err = wide_table().gather("id", "value", &["id"]);
        assert!(matches!(err, Err(Error::DuplicateColumnName(_))));
    }

    #[test]
    fn test_gather_needs_value_columns() {
        let err = wide_table().gather("key", "value", &["id", "a", "b"]);
        assert!(matches!(err, Err(Error::InvalidValue(_))));
    }
}
