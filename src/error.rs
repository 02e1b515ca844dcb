use thiserror::Error;

/// Error type covering every fallible operation in the crate
#[derive(Error, Debug)]
pub enum Error {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("Grouping column does not exist or is repeated: {0}")]
    InvalidGroupColumn(String),

    #[error("Join column '{0}' is not present in both tables")]
    UnknownJoinColumn(String),

    #[error("No join key: tables share no columns and none were given")]
    EmptyJoinKey,

    #[error("Grouped transform for '{column}' returned {actual} values, partition has {expected} rows")]
    PartitionLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Reducer for '{column}' failed: {message}")]
    ReducerFailure { column: String, message: String },

    #[error("Column type mismatch: column {name}, expected {expected:?}, found {found:?}")]
    ColumnTypeMismatch {
        name: String,
        expected: crate::column::ColumnType,
        found: crate::column::ColumnType,
    },

    #[error("Inconsistent row count: expected {expected}, found {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("Length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
