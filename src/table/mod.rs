//! In-memory table: an ordered collection of equal-length named columns
//!
//! Every transform builds a new `Table`; columns untouched by a transform
//! are shared with the source through `Arc`, never deep-copied.

pub mod join;
pub mod reshape;
pub mod rows;
pub mod sort;

use std::collections::HashMap;
use std::fmt::{self, Debug, Display};

use crate::column::{Column, Scalar};
use crate::error::{Error, Result};

pub use join::JoinType;

/// Columnar table with ordered, uniquely named columns
#[derive(Clone)]
pub struct Table {
    pub(crate) columns: Vec<Column>,
    pub(crate) column_indices: HashMap<String, usize>,
    pub(crate) column_names: Vec<String>,
    pub(crate) row_count: usize,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            column_indices: HashMap::new(),
            column_names: Vec::new(),
            row_count: 0,
        }
    }

    /// Append a column
    ///
    /// The first column fixes the table's row count; every later column
    /// must match it. Duplicate names are rejected.
    pub fn add_column(&mut self, name: impl Into<String>, column: Column) -> Result<()> {
        let name = name.into();
        if self.column_indices.contains_key(&name) {
            return Err(Error::DuplicateColumnName(name));
        }

        if self.columns.is_empty() {
            self.row_count = column.len();
        } else if column.len() != self.row_count {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count,
                found: column.len(),
            });
        }

        self.column_indices.insert(name.clone(), self.columns.len());
        self.column_names.push(name);
        self.columns.push(column);
        Ok(())
    }

    /// Copy of the table with `name` replaced (or appended) by `column`
    pub fn with_column(&self, name: impl Into<String>, column: Column) -> Result<Table> {
        let name = name.into();
        if column.len() != self.row_count && !self.columns.is_empty() {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count,
                found: column.len(),
            });
        }

        let mut result = self.clone();
        match result.column_indices.get(&name) {
            Some(&idx) => result.columns[idx] = column,
            None => result.add_column(name, column)?,
        }
        Ok(result)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.column_indices.contains_key(name)
    }

    /// Column by name
    pub fn column(&self, name: &str) -> Result<&Column> {
        let idx = self
            .column_indices
            .get(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        Ok(&self.columns[*idx])
    }

    /// Cell value at (`row`, `name`)
    pub fn cell(&self, row: usize, name: &str) -> Result<Scalar> {
        self.column(name)?.get_scalar(row)
    }

    /// Integer values of a column (`None` for null slots)
    pub fn i64_values(&self, name: &str) -> Result<Vec<Option<i64>>> {
        match self.column(name)? {
            Column::Int64(col) => Ok(col.to_options()),
            other => Err(Error::ColumnTypeMismatch {
                name: name.to_string(),
                expected: crate::column::ColumnType::Int64,
                found: other.column_type(),
            }),
        }
    }

    /// Float values of a column; integer columns are widened
    pub fn f64_values(&self, name: &str) -> Result<Vec<Option<f64>>> {
        match self.column(name)? {
            Column::Float64(col) => Ok(col.to_options()),
            Column::Int64(col) => Ok(col
                .to_options()
                .into_iter()
                .map(|v| v.map(|x| x as f64))
                .collect()),
            other => Err(Error::ColumnTypeMismatch {
                name: name.to_string(),
                expected: crate::column::ColumnType::Float64,
                found: other.column_type(),
            }),
        }
    }

    /// String values of a column
    pub fn str_values(&self, name: &str) -> Result<Vec<Option<String>>> {
        match self.column(name)? {
            Column::String(col) => Ok(col.to_options()),
            other => Err(Error::ColumnTypeMismatch {
                name: name.to_string(),
                expected: crate::column::ColumnType::String,
                found: other.column_type(),
            }),
        }
    }

    /// Boolean values of a column
    pub fn bool_values(&self, name: &str) -> Result<Vec<Option<bool>>> {
        match self.column(name)? {
            Column::Boolean(col) => Ok(col.to_options()),
            other => Err(Error::ColumnTypeMismatch {
                name: name.to_string(),
                expected: crate::column::ColumnType::Boolean,
                found: other.column_type(),
            }),
        }
    }

    /// New table with only the named columns, in the given order
    pub fn select_columns(&self, columns: &[&str]) -> Result<Table> {
        let mut result = Table::new();
        for &name in columns {
            let column = self.column(name)?;
            result.add_column(name, column.clone())?;
        }
        // A selection of zero columns still describes the same rows
        if columns.is_empty() {
            result.row_count = self.row_count;
        }
        Ok(result)
    }

    /// New table without the named columns
    pub fn drop_columns(&self, columns: &[&str]) -> Result<Table> {
        for &name in columns {
            if !self.contains_column(name) {
                return Err(Error::ColumnNotFound(name.to_string()));
            }
        }

        let keep: Vec<&str> = self
            .column_names
            .iter()
            .filter(|name| !columns.contains(&name.as_str()))
            .map(|name| name.as_str())
            .collect();
        self.select_columns(&keep)
    }

    /// New table with columns renamed according to `(old, new)` pairs
    pub fn rename_columns(&self, renames: &[(&str, &str)]) -> Result<Table> {
        for (old, _) in renames {
            if !self.contains_column(old) {
                return Err(Error::ColumnNotFound(old.to_string()));
            }
        }

        let mapping: HashMap<&str, &str> = renames.iter().copied().collect();
        let new_names: Vec<String> = self
            .column_names
            .iter()
            .map(|name| {
                mapping
                    .get(name.as_str())
                    .map(|new| new.to_string())
                    .unwrap_or_else(|| name.clone())
            })
            .collect();

        self.with_names(&new_names)
    }

    /// New table with all column names replaced positionally
    pub fn set_names(&self, names: &[&str]) -> Result<Table> {
        if names.len() != self.column_names.len() {
            return Err(Error::LengthMismatch {
                expected: self.column_names.len(),
                actual: names.len(),
            });
        }
        let owned: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        self.with_names(&owned)
    }

    fn with_names(&self, names: &[String]) -> Result<Table> {
        let mut result = Table::new();
        for (name, column) in names.iter().zip(&self.columns) {
            result.add_column(name.clone(), column.clone())?;
        }
        if names.is_empty() {
            result.row_count = self.row_count;
        }
        Ok(result)
    }
}

impl Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MAX_ROWS: usize = 10;

        if self.columns.is_empty() {
            return write!(f, "Table ({} rows x 0 columns)", self.row_count);
        }

        writeln!(
            f,
            "Table ({} rows x {} columns):",
            self.row_count,
            self.columns.len()
        )?;

        write!(f, "{:<5} |", "idx")?;
        for name in &self.column_names {
            write!(f, " {:<15} |", name)?;
        }
        writeln!(f)?;

        write!(f, "{:-<5}-+", "")?;
        for _ in &self.column_names {
            write!(f, "-{:-<15}-+", "")?;
        }
        writeln!(f)?;

        let display_rows = std::cmp::min(self.row_count, MAX_ROWS);
        for i in 0..display_rows {
            write!(f, "{:<5} |", i)?;
            for column in &self.columns {
                let value = match column.get_scalar(i) {
                    Ok(Scalar::Str(s)) => format!("\"{}\"", s),
                    Ok(v) => v.to_string(),
                    Err(_) => "?".to_string(),
                };
                write!(f, " {:<15} |", value)?;
            }
            writeln!(f)?;
        }

        if self.row_count > MAX_ROWS {
            writeln!(f, "... ({} more rows)", self.row_count - MAX_ROWS)?;
        }

        Ok(())
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Int64Column, StringColumn};

    fn sample_table() -> Table {
        let mut table = Table::new();
        table
            .add_column("id", Column::Int64(Int64Column::new(vec![1, 2, 3])))
            .unwrap();
        table
            .add_column(
                "name",
                Column::String(StringColumn::new(vec![
                    "a".to_string(),
                    "b".to_string(),
                    "c".to_string(),
                ])),
            )
            .unwrap();
        table
    }

    #[test]
    fn test_add_column_rejects_duplicates() {
        let mut table = sample_table();
        let err = table.add_column("id", Column::Int64(Int64Column::new(vec![4, 5, 6])));
        assert!(matches!(err, Err(Error::DuplicateColumnName(_))));
    }

    #[test]
    fn test_add_column_rejects_ragged_lengths() {
        let mut table = sample_table();
        let err = table.add_column("x", Column::Int64(Int64Column::new(vec![1])));
        assert!(matches!(err, Err(Error::InconsistentRowCount { .. })));
    }

    #[test]
    fn test_select_preserves_order() {
        let table = sample_table();
        let selected = table.select_columns(&["name", "id"]).unwrap();
        assert_eq!(selected.column_names(), &["name", "id"]);
        assert_eq!(selected.row_count(), 3);
    }

    #[test]
    fn test_rename_detects_collision() {
        let table = sample_table();
        let err = table.rename_columns(&[("id", "name")]);
        assert!(matches!(err, Err(Error::DuplicateColumnName(_))));
    }

    #[test]
    fn test_with_column_replaces_in_place() {
        let table = sample_table();
        let updated = table
            .with_column("id", Column::Int64(Int64Column::new(vec![7, 8, 9])))
            .unwrap();
        assert_eq!(updated.column_names(), &["id", "name"]);
        assert_eq!(
            updated.i64_values("id").unwrap(),
            vec![Some(7), Some(8), Some(9)]
        );
        // Source table untouched
        assert_eq!(
            table.i64_values("id").unwrap(),
            vec![Some(1), Some(2), Some(3)]
        );
    }
}
