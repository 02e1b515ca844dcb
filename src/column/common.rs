use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::{Error, Result};

/// Enum identifying the type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int64,
    Float64,
    String,
    Boolean,
}

/// A single dynamically-typed cell value
///
/// Used for group-key tuples, reducer outputs, sort comparisons and cell
/// access. Equality and hashing treat floats by bit pattern so that key
/// tuples are usable as hash-map keys; ordering is total, with `Null`
/// sorting below every value.
#[derive(Debug, Clone)]
pub enum Scalar {
    Int64(i64),
    Float64(f64),
    Str(String),
    Bool(bool),
    Null,
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int64(v) => Some(*v as f64),
            Scalar::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(v) => Some(*v),
            _ => None,
        }
    }

    // Variant rank used as the cross-type ordering fallback.
    fn rank(&self) -> u8 {
        match self {
            Scalar::Null => 0,
            Scalar::Bool(_) => 1,
            Scalar::Int64(_) => 2,
            Scalar::Float64(_) => 3,
            Scalar::Str(_) => 4,
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Int64(a), Scalar::Int64(b)) => a == b,
            (Scalar::Float64(a), Scalar::Float64(b)) => a.to_bits() == b.to_bits(),
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Scalar::Int64(v) => v.hash(state),
            Scalar::Float64(v) => v.to_bits().hash(state),
            Scalar::Str(v) => v.hash(state),
            Scalar::Bool(v) => v.hash(state),
            Scalar::Null => {}
        }
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => Ordering::Equal,
            (Scalar::Null, _) => Ordering::Less,
            (_, Scalar::Null) => Ordering::Greater,
            (Scalar::Int64(a), Scalar::Int64(b)) => a.cmp(b),
            (Scalar::Float64(a), Scalar::Float64(b)) => a.total_cmp(b),
            // Numeric cross-type comparison; the variant rank breaks exact
            // ties so that cmp stays consistent with eq.
            (Scalar::Int64(a), Scalar::Float64(b)) => {
                (*a as f64).total_cmp(b).then(Ordering::Less)
            }
            (Scalar::Float64(a), Scalar::Int64(b)) => {
                a.total_cmp(&(*b as f64)).then(Ordering::Greater)
            }
            (Scalar::Str(a), Scalar::Str(b)) => a.cmp(b),
            (Scalar::Bool(a), Scalar::Bool(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int64(v) => write!(f, "{}", v),
            Scalar::Float64(v) => write!(f, "{}", v),
            Scalar::Str(v) => write!(f, "{}", v),
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::Null => write!(f, "NA"),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int64(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float64(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

/// Enum over the typed column representations
#[derive(Debug, Clone)]
pub enum Column {
    Int64(crate::column::Int64Column),
    Float64(crate::column::Float64Column),
    String(crate::column::StringColumn),
    Boolean(crate::column::BooleanColumn),
}

impl Column {
    /// Length of the column
    pub fn len(&self) -> usize {
        match self {
            Column::Int64(col) => col.len(),
            Column::Float64(col) => col.len(),
            Column::String(col) => col.len(),
            Column::Boolean(col) => col.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Type of the column
    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Int64(_) => ColumnType::Int64,
            Column::Float64(_) => ColumnType::Float64,
            Column::String(_) => ColumnType::String,
            Column::Boolean(_) => ColumnType::Boolean,
        }
    }

    /// Cell value at `index` as a `Scalar` (masked slots become `Null`)
    pub fn get_scalar(&self, index: usize) -> Result<Scalar> {
        Ok(match self {
            Column::Int64(col) => col.get(index)?.map_or(Scalar::Null, Scalar::Int64),
            Column::Float64(col) => col.get(index)?.map_or(Scalar::Null, Scalar::Float64),
            Column::String(col) => col
                .get(index)?
                .map_or(Scalar::Null, |s| Scalar::Str(s.to_string())),
            Column::Boolean(col) => col.get(index)?.map_or(Scalar::Null, Scalar::Bool),
        })
    }

    /// All cell values as `Scalar`s, in row order
    pub fn to_scalars(&self) -> Vec<Scalar> {
        (0..self.len())
            .map(|i| self.get_scalar(i).unwrap_or(Scalar::Null))
            .collect()
    }

    /// Gather the rows at `indices` into a new column of the same type
    pub fn take(&self, indices: &[usize]) -> Result<Column> {
        Ok(match self {
            Column::Int64(col) => Column::Int64(col.take(indices)?),
            Column::Float64(col) => Column::Float64(col.take(indices)?),
            Column::String(col) => Column::String(col.take(indices)?),
            Column::Boolean(col) => Column::Boolean(col.take(indices)?),
        })
    }

    /// Gather rows where `None` slots become nulls (used by left joins)
    pub fn take_opt(&self, indices: &[Option<usize>]) -> Result<Column> {
        Ok(match self {
            Column::Int64(col) => Column::Int64(col.take_opt(indices)?),
            Column::Float64(col) => Column::Float64(col.take_opt(indices)?),
            Column::String(col) => Column::String(col.take_opt(indices)?),
            Column::Boolean(col) => Column::Boolean(col.take_opt(indices)?),
        })
    }

    /// Build a column from scalar cells, inferring the column type
    ///
    /// `Null` cells become masked slots. A mix of `Int64` and `Float64`
    /// values promotes to `Float64`; any other mix is a type error naming
    /// `name`. An all-null input becomes a fully masked `Float64` column.
    pub fn from_scalars(values: Vec<Scalar>, name: &str) -> Result<Column> {
        let mut inferred: Option<ColumnType> = None;
        for v in &values {
            let ty = match v {
                Scalar::Null => continue,
                Scalar::Int64(_) => ColumnType::Int64,
                Scalar::Float64(_) => ColumnType::Float64,
                Scalar::Str(_) => ColumnType::String,
                Scalar::Bool(_) => ColumnType::Boolean,
            };
            inferred = Some(match inferred {
                None => ty,
                Some(cur) if cur == ty => cur,
                Some(ColumnType::Int64) if ty == ColumnType::Float64 => ColumnType::Float64,
                Some(ColumnType::Float64) if ty == ColumnType::Int64 => ColumnType::Float64,
                Some(cur) => {
                    return Err(Error::ColumnTypeMismatch {
                        name: name.to_string(),
                        expected: cur,
                        found: ty,
                    })
                }
            });
        }

        let column = match inferred.unwrap_or(ColumnType::Float64) {
            ColumnType::Int64 => {
                let mut data = Vec::with_capacity(values.len());
                let mut nulls = Vec::with_capacity(values.len());
                for v in &values {
                    data.push(v.as_i64().unwrap_or_default());
                    nulls.push(v.is_null());
                }
                Column::Int64(crate::column::Int64Column::with_nulls(data, nulls))
            }
            ColumnType::Float64 => {
                let mut data = Vec::with_capacity(values.len());
                let mut nulls = Vec::with_capacity(values.len());
                for v in &values {
                    data.push(v.as_f64().unwrap_or(f64::NAN));
                    nulls.push(v.is_null());
                }
                Column::Float64(crate::column::Float64Column::with_nulls(data, nulls))
            }
            ColumnType::String => {
                let mut data = Vec::with_capacity(values.len());
                let mut nulls = Vec::with_capacity(values.len());
                for v in &values {
                    data.push(v.as_str().unwrap_or_default().to_string());
                    nulls.push(v.is_null());
                }
                Column::String(crate::column::StringColumn::with_nulls(data, nulls))
            }
            ColumnType::Boolean => {
                let mut data = Vec::with_capacity(values.len());
                let mut nulls = Vec::with_capacity(values.len());
                for v in &values {
                    data.push(v.as_bool().unwrap_or_default());
                    nulls.push(v.is_null());
                }
                Column::Boolean(crate::column::BooleanColumn::with_nulls(data, nulls))
            }
        };

        Ok(column)
    }
}

impl From<crate::column::Int64Column> for Column {
    fn from(col: crate::column::Int64Column) -> Self {
        Column::Int64(col)
    }
}

impl From<crate::column::Float64Column> for Column {
    fn from(col: crate::column::Float64Column) -> Self {
        Column::Float64(col)
    }
}

impl From<crate::column::StringColumn> for Column {
    fn from(col: crate::column::StringColumn) -> Self {
        Column::String(col)
    }
}

impl From<crate::column::BooleanColumn> for Column {
    fn from(col: crate::column::BooleanColumn) -> Self {
        Column::Boolean(col)
    }
}

/// Null-mask helpers shared by the typed columns
pub(crate) mod utils {
    use super::*;

    /// Build a bitmask from per-row null flags
    pub fn create_bitmask(nulls: &[bool]) -> Arc<[u8]> {
        let bytes_needed = (nulls.len() + 7) / 8;
        let mut data = vec![0u8; bytes_needed];

        for (i, &is_null) in nulls.iter().enumerate() {
            if is_null {
                data[i / 8] |= 1 << (i % 8);
            }
        }

        data.into()
    }

    /// Whether the bit at `index` is set
    pub fn bit_is_set(mask: &[u8], index: usize) -> bool {
        let byte_idx = index / 8;
        byte_idx < mask.len() && (mask[byte_idx] & (1 << (index % 8))) != 0
    }
}
