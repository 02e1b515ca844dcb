use std::sync::Arc;

use crate::column::common::utils;
use crate::error::{Error, Result};

/// Column of strings
#[derive(Debug, Clone)]
pub struct StringColumn {
    pub(crate) data: Arc<[String]>,
    pub(crate) null_mask: Option<Arc<[u8]>>,
    pub(crate) name: Option<String>,
}

impl StringColumn {
    /// Create a new StringColumn
    pub fn new(data: Vec<String>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
            name: None,
        }
    }

    /// Create a named StringColumn
    pub fn with_name(data: Vec<String>, name: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
            name: Some(name.into()),
        }
    }

    /// Create a StringColumn with null slots
    pub fn with_nulls(data: Vec<String>, nulls: Vec<bool>) -> Self {
        let null_mask = if nulls.iter().any(|&is_null| is_null) {
            Some(utils::create_bitmask(&nulls))
        } else {
            None
        };

        Self {
            data: data.into(),
            null_mask,
            name: None,
        }
    }

    /// Create a StringColumn from optional values
    pub fn from_options(values: Vec<Option<String>>) -> Self {
        let nulls: Vec<bool> = values.iter().map(|v| v.is_none()).collect();
        let data: Vec<String> = values.into_iter().map(|v| v.unwrap_or_default()).collect();
        Self::with_nulls(data, nulls)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `index`, `None` for a null slot
    pub fn get(&self, index: usize) -> Result<Option<&str>> {
        if index >= self.data.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.data.len(),
            });
        }

        if let Some(ref mask) = self.null_mask {
            if utils::bit_is_set(mask, index) {
                return Ok(None);
            }
        }

        Ok(Some(self.data[index].as_str()))
    }

    /// All values as options, in row order
    pub fn to_options(&self) -> Vec<Option<String>> {
        (0..self.data.len())
            .map(|i| self.get(i).unwrap_or(None).map(|s| s.to_string()))
            .collect()
    }

    /// Gather the rows at `indices` into a new column
    pub fn take(&self, indices: &[usize]) -> Result<Self> {
        let mut data = Vec::with_capacity(indices.len());
        let mut nulls = Vec::with_capacity(indices.len());
        for &idx in indices {
            match self.get(idx)? {
                Some(v) => {
                    data.push(v.to_string());
                    nulls.push(false);
                }
                None => {
                    data.push(String::new());
                    nulls.push(true);
                }
            }
        }
        let mut col = Self::with_nulls(data, nulls);
        col.name = self.name.clone();
        Ok(col)
    }

    /// Gather rows where `None` slots become nulls
    pub fn take_opt(&self, indices: &[Option<usize>]) -> Result<Self> {
        let mut data = Vec::with_capacity(indices.len());
        let mut nulls = Vec::with_capacity(indices.len());
        for idx in indices {
            match idx.map(|i| self.get(i)).transpose()?.flatten() {
                Some(v) => {
                    data.push(v.to_string());
                    nulls.push(false);
                }
                None => {
                    data.push(String::new());
                    nulls.push(true);
                }
            }
        }
        let mut col = Self::with_nulls(data, nulls);
        col.name = self.name.clone();
        Ok(col)
    }
}
