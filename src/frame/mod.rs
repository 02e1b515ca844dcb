//! Fluent frame: a table plus its active grouping
//!
//! Every method validates its own preconditions, delegates to the table
//! and grouping engines, and returns a new `Frame`. Nothing mutates in
//! place; a failed call leaves the receiver untouched.

use std::fmt::{self, Debug, Display};

use log::debug;

use crate::error::{Error, Result};
use crate::group::{self, Aggregations, GroupSpec, Mutations};
use crate::table::{JoinType, Table};

/// A table with an active grouping specification
///
/// Grouping carries through `mutate`, `filter`, `sort`, `select` and the
/// row windows; it is cleared by `agg`, `gather`, the joins and `ungroup`.
#[derive(Clone)]
pub struct Frame {
    table: Table,
    groups: GroupSpec,
}

impl Frame {
    /// Wrap a table with no grouping
    pub fn new(table: Table) -> Self {
        Self {
            table,
            groups: GroupSpec::empty(),
        }
    }

    fn with_groups(table: Table, groups: GroupSpec) -> Self {
        Self { table, groups }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Active grouping key columns (empty when ungrouped)
    pub fn groups(&self) -> &[String] {
        self.groups.keys()
    }

    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    pub fn column_names(&self) -> &[String] {
        self.table.column_names()
    }

    /// Keep the named columns
    ///
    /// Active grouping keys not named are silently retained and placed
    /// before the selection, so the grouping stays valid.
    pub fn select(&self, columns: &[&str]) -> Result<Frame> {
        let retained: Vec<&str> = self
            .groups
            .keys()
            .iter()
            .filter(|key| !columns.contains(&key.as_str()))
            .map(|key| key.as_str())
            .collect();
        if !retained.is_empty() {
            debug!("select retains grouping columns {:?}", retained);
        }

        let mut full: Vec<&str> = retained;
        full.extend_from_slice(columns);
        Ok(Frame::with_groups(
            self.table.select_columns(&full)?,
            self.groups.clone(),
        ))
    }

    /// Remove the named columns
    ///
    /// Dropping an active grouping key is an error; `ungroup` first.
    pub fn drop(&self, columns: &[&str]) -> Result<Frame> {
        for &name in columns {
            if self.groups.contains(name) {
                return Err(Error::InvalidGroupColumn(name.to_string()));
            }
        }
        Ok(Frame::with_groups(
            self.table.drop_columns(columns)?,
            self.groups.clone(),
        ))
    }

    /// Rename columns via `(old, new)` pairs; grouping keys follow along
    pub fn rename(&self, renames: &[(&str, &str)]) -> Result<Frame> {
        let table = self.table.rename_columns(renames)?;
        let groups = GroupSpec::new(
            self.groups
                .keys()
                .iter()
                .map(|key| {
                    renames
                        .iter()
                        .find(|(old, _)| *old == key.as_str())
                        .map(|(_, new)| new.to_string())
                        .unwrap_or_else(|| key.clone())
                })
                .collect(),
        );
        Ok(Frame::with_groups(table, groups))
    }

    /// Replace every column name positionally; grouping keys are remapped
    pub fn set_names(&self, names: &[&str]) -> Result<Frame> {
        let old_names = self.table.column_names().to_vec();
        let table = self.table.set_names(names)?;
        let mut keys = Vec::with_capacity(self.groups.keys().len());
        for key in self.groups.keys() {
            let idx = old_names
                .iter()
                .position(|n| n == key)
                .ok_or_else(|| Error::InvalidGroupColumn(key.clone()))?;
            keys.push(names[idx].to_string());
        }
        Ok(Frame::with_groups(table, GroupSpec::new(keys)))
    }

    /// Sort ascending by the given columns
    ///
    /// Active grouping keys are implicitly sorted first, so grouped frames
    /// come out ordered group-by-group.
    pub fn sort(&self, columns: &[&str]) -> Result<Frame> {
        let ascending = vec![true; columns.len()];
        self.sort_by(columns, &ascending)
    }

    /// Sort by the given columns with a per-column direction
    pub fn sort_by(&self, columns: &[&str], ascending: &[bool]) -> Result<Frame> {
        if columns.len() != ascending.len() {
            return Err(Error::LengthMismatch {
                expected: columns.len(),
                actual: ascending.len(),
            });
        }

        let mut keys: Vec<&str> = self
            .groups
            .keys()
            .iter()
            .filter(|key| !columns.contains(&key.as_str()))
            .map(|key| key.as_str())
            .collect();
        let mut flags = vec![true; keys.len()];
        keys.extend_from_slice(columns);
        flags.extend_from_slice(ascending);

        Ok(Frame::with_groups(
            self.table.sort_by_columns(&keys, &flags)?,
            self.groups.clone(),
        ))
    }

    /// Keep the rows for which the predicate returns true
    ///
    /// The predicate sees the whole table and must return one flag per
    /// row.
    pub fn filter<F>(&self, predicate: F) -> Result<Frame>
    where
        F: Fn(&Table) -> Result<Vec<bool>>,
    {
        let mask = predicate(&self.table)?;
        Ok(Frame::with_groups(
            self.table.filter_by_mask(&mask)?,
            self.groups.clone(),
        ))
    }

    /// Create or overwrite columns, partition by partition when grouped
    pub fn mutate(&self, mutations: &Mutations) -> Result<Frame> {
        Ok(Frame::with_groups(
            group::mutate(&self.table, &self.groups, mutations)?,
            self.groups.clone(),
        ))
    }

    /// Set the active grouping
    pub fn group_by(&self, columns: &[&str]) -> Result<Frame> {
        let groups = GroupSpec::new(columns.iter().map(|s| s.to_string()).collect());
        groups.validate(&self.table)?;
        Ok(Frame::with_groups(self.table.clone(), groups))
    }

    /// Clear the active grouping
    pub fn ungroup(&self) -> Frame {
        Frame::new(self.table.clone())
    }

    /// Reduce each group to one row; always clears the grouping
    pub fn agg(&self, aggregations: &Aggregations) -> Result<Frame> {
        Ok(Frame::new(group::aggregate(
            &self.table,
            &self.groups,
            aggregations,
        )?))
    }

    /// Wide-to-long reshape; clears the grouping
    pub fn gather(&self, key: &str, value: &str, keep: &[&str]) -> Result<Frame> {
        Ok(Frame::new(self.table.gather(key, value, keep)?))
    }

    /// Sample `n` rows, with or without replacement
    pub fn sample_n(&self, n: usize, replace: bool) -> Result<Frame> {
        Ok(Frame::with_groups(
            self.table.sample_n(n, replace, None)?,
            self.groups.clone(),
        ))
    }

    /// Sample `n` rows deterministically from a seed
    pub fn sample_n_seeded(&self, n: usize, replace: bool, seed: u64) -> Result<Frame> {
        Ok(Frame::with_groups(
            self.table.sample_n(n, replace, Some(seed))?,
            self.groups.clone(),
        ))
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> Result<Frame> {
        Ok(Frame::with_groups(
            self.table.head(n)?,
            self.groups.clone(),
        ))
    }

    /// Last `n` rows
    pub fn tail(&self, n: usize) -> Result<Frame> {
        Ok(Frame::with_groups(
            self.table.tail(n)?,
            self.groups.clone(),
        ))
    }

    /// Pick rows by position
    pub fn slice(&self, indices: &[usize]) -> Result<Frame> {
        Ok(Frame::with_groups(
            self.table.take(indices)?,
            self.groups.clone(),
        ))
    }

    /// Left join against another frame; the result is ungrouped
    pub fn left_join(&self, other: &Frame, by: Option<&[&str]>) -> Result<Frame> {
        Ok(Frame::new(self.table.join(&other.table, by, JoinType::Left)?))
    }

    /// Inner join against another frame; the result is ungrouped
    pub fn inner_join(&self, other: &Frame, by: Option<&[&str]>) -> Result<Frame> {
        Ok(Frame::new(self.table.join(
            &other.table,
            by,
            JoinType::Inner,
        )?))
    }

    /// Pass the frame through a whole-pipeline function
    pub fn pipe<F>(self, f: F) -> Result<Frame>
    where
        F: FnOnce(Frame) -> Result<Frame>,
    {
        f(self)
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.groups.is_empty() {
            writeln!(f, "With groups {:?}", self.groups.keys())?;
        }
        write!(f, "{}", self.table)
    }
}

impl Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
