use std::sync::Arc;

use crate::column::common::utils;
use crate::error::{Error, Result};

/// Column of 64-bit integers
#[derive(Debug, Clone)]
pub struct Int64Column {
    pub(crate) data: Arc<[i64]>,
    pub(crate) null_mask: Option<Arc<[u8]>>,
    pub(crate) name: Option<String>,
}

impl Int64Column {
    /// Create a new Int64Column
    pub fn new(data: Vec<i64>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
            name: None,
        }
    }

    /// Create a named Int64Column
    pub fn with_name(data: Vec<i64>, name: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
            name: Some(name.into()),
        }
    }

    /// Create an Int64Column with null slots
    pub fn with_nulls(data: Vec<i64>, nulls: Vec<bool>) -> Self {
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

    /// Create an Int64Column from optional values
    pub fn from_options(values: Vec<Option<i64>>) -> Self {
        let nulls: Vec<bool> = values.iter().map(|v| v.is_none()).collect();
        let data: Vec<i64> = values.into_iter().map(|v| v.unwrap_or_default()).collect();
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
    pub fn get(&self, index: usize) -> Result<Option<i64>> {
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

        Ok(Some(self.data[index]))
    }

    /// All values as options, in row order
    pub fn to_options(&self) -> Vec<Option<i64>> {
        (0..self.data.len())
            .map(|i| self.get(i).unwrap_or(None))
            .collect()
    }

    /// Gather the rows at `indices` into a new column
    pub fn take(&self, indices: &[usize]) -> Result<Self> {
        let mut data = Vec::with_capacity(indices.len());
        let mut nulls = Vec::with_capacity(indices.len());
        for &idx in indices {
            match self.get(idx)? {
                Some(v) => {
                    data.push(v);
                    nulls.push(false);
                }
                None => {
                    data.push(0);
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
                    data.push(v);
                    nulls.push(false);
                }
                None => {
                    data.push(0);
                    nulls.push(true);
                }
            }
        }
        let mut col = Self::with_nulls(data, nulls);
        col.name = self.name.clone();
        Ok(col)
    }

    /// Sum of the non-null values
    pub fn sum(&self) -> i64 {
        match &self.null_mask {
            None => self.data.iter().sum(),
            Some(mask) => {
                let mut sum = 0;
                for i in 0..self.data.len() {
                    if !utils::bit_is_set(mask, i) {
                        sum += self.data[i];
                    }
                }
                sum
            }
        }
    }

    /// Mean of the non-null values
    pub fn mean(&self) -> Option<f64> {
        let (sum, count) = match &self.null_mask {
            None => (self.data.iter().sum::<i64>(), self.data.len()),
            Some(mask) => {
                let mut sum = 0;
                let mut count = 0;
                for i in 0..self.data.len() {
                    if !utils::bit_is_set(mask, i) {
                        sum += self.data[i];
                        count += 1;
                    }
                }
                (sum, count)
            }
        };

        if count == 0 {
            None
        } else {
            Some(sum as f64 / count as f64)
        }
    }

    /// Minimum of the non-null values
    pub fn min(&self) -> Option<i64> {
        self.to_options().into_iter().flatten().min()
    }

    /// Maximum of the non-null values
    pub fn max(&self) -> Option<i64> {
        self.to_options().into_iter().flatten().max()
    }
}
