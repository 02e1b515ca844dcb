use std::sync::Arc;

use crate::column::common::utils;
use crate::error::{Error, Result};

/// Column of 64-bit floats
#[derive(Debug, Clone)]
pub struct Float64Column {
    pub(crate) data: Arc<[f64]>,
    pub(crate) null_mask: Option<Arc<[u8]>>,
    pub(crate) name: Option<String>,
}

impl Float64Column {
    /// Create a new Float64Column
    pub fn new(data: Vec<f64>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
            name: None,
        }
    }

    /// Create a named Float64Column
    pub fn with_name(data: Vec<f64>, name: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
            name: Some(name.into()),
        }
    }

    /// Create a Float64Column with null slots
    pub fn with_nulls(data: Vec<f64>, nulls: Vec<bool>) -> Self {
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

    /// Create a Float64Column from optional values
    pub fn from_options(values: Vec<Option<f64>>) -> Self {
        let nulls: Vec<bool> = values.iter().map(|v| v.is_none()).collect();
        let data: Vec<f64> = values
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
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
    pub fn get(&self, index: usize) -> Result<Option<f64>> {
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
    pub fn to_options(&self) -> Vec<Option<f64>> {
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
                    data.push(f64::NAN);
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
                    data.push(f64::NAN);
                    nulls.push(true);
                }
            }
        }
        let mut col = Self::with_nulls(data, nulls);
        col.name = self.name.clone();
        Ok(col)
    }

    /// Sum of the non-null values
    pub fn sum(&self) -> f64 {
        match &self.null_mask {
            None => self.data.iter().sum(),
            Some(mask) => {
                let mut sum = 0.0;
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
            None => (self.data.iter().sum::<f64>(), self.data.len()),
            Some(mask) => {
                let mut sum = 0.0;
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
            Some(sum / count as f64)
        }
    }

    /// Minimum of the non-null finite values
    pub fn min(&self) -> Option<f64> {
        self.to_options()
            .into_iter()
            .flatten()
            .filter(|x| x.is_finite())
            .fold(None, |min, x| Some(min.map_or(x, |m: f64| m.min(x))))
    }

    /// Maximum of the non-null finite values
    pub fn max(&self) -> Option<f64> {
        self.to_options()
            .into_iter()
            .flatten()
            .filter(|x| x.is_finite())
            .fold(None, |max, x| Some(max.map_or(x, |m: f64| m.max(x))))
    }
}
