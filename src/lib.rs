//! kadrs: fluent DataFrame transformations with dplyr-style grouping
//!
//! A `Frame` bundles a columnar `Table` with an active grouping. Every
//! fluent method returns a new `Frame`; grouping carries through mutation,
//! filtering and sorting, and is cleared by aggregation, reshaping and
//! joins.

pub mod column;
pub mod error;
pub mod frame;
pub mod group;
pub mod table;

// Re-export commonly used types
pub use column::{BooleanColumn, Column, ColumnType, Float64Column, Int64Column, Scalar, StringColumn};
pub use error::{Error, Result};
pub use frame::Frame;
pub use group::{Aggregations, GroupSpec, Mutations, Partition};
pub use table::{JoinType, Table};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
