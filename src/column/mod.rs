//! Typed column storage with null bitmasks
//!
//! Columns share their data through `Arc`, so a transform that leaves a
//! column untouched copies a pointer, not the values.

pub mod boolean_column;
pub mod common;
pub mod float64_column;
pub mod int64_column;
pub mod string_column;

pub use boolean_column::BooleanColumn;
pub use common::{Column, ColumnType, Scalar};
pub use float64_column::Float64Column;
pub use int64_column::Int64Column;
pub use string_column::StringColumn;
