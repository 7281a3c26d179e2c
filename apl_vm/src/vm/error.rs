//! Runtime error types for the evaluation core.
//!
//! Every failure in the value model, the assignment engine and the primitives
//! is reported as an [`AplError`]. The assignment engine adds the name of the
//! offending variable, column or key with [`AplError::with_context`]; the
//! underlying [`ErrorKind`] stays reachable through [`AplError::kind`].

use thiserror::Error;

/// Runtime error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AplError {
    /// Flat index or path step outside the valid range.
    #[error("index error: index {index} out of range for size {size}")]
    IndexOutOfRange {
        /// Attempted index
        index: i64,
        /// Number of addressable positions
        size: usize,
    },

    /// Axis number outside `[0, rank)` after normalization.
    #[error("axis error: axis {axis} out of range for rank {rank}")]
    AxisOutOfRange {
        /// Axis as given (after origin adjustment)
        axis: i64,
        /// Rank of the argument
        rank: usize,
    },

    /// Shapes do not conform.
    #[error("length error: {0}")]
    NonConformant(String),

    /// A value cannot be stored in a uniform array or used in this position.
    #[error("type error: {0}")]
    TypeMismatch(String),

    /// A value cannot be converted to a required element type.
    #[error("conversion error: {0}")]
    ConversionError(String),

    /// Modified or indexed assignment to a name that is not bound.
    #[error("value error: variable {0} does not exist")]
    UndefinedVariable(String),

    /// Indexed assignment into a value that has no settable storage.
    #[error("type error: value is not settable: {0}")]
    NotSettable(String),

    /// The keys on the right do not match the selected keys.
    #[error("key error: {0}")]
    KeyMismatch(String),

    /// Depth assignment through a value kind that cannot be descended into.
    #[error("depth error: {0}")]
    UnsupportedDepth(String),

    /// Malformed axis specification.
    #[error("axis error: {0}")]
    InvalidAxis(String),

    /// No registered handle accepts the arguments.
    #[error("domain error: {0}")]
    DomainError(String),

    /// Symbol has no registered function or operator.
    #[error("syntax error: unknown symbol {0}")]
    UnknownSymbol(String),

    /// Session configuration could not be read or is out of range.
    #[error("config error: {0}")]
    InvalidConfig(String),

    /// An inner error annotated with the variable, column or key it concerns.
    #[error("{name}: {source}")]
    Context {
        /// Variable, column or key name
        name: String,
        /// Wrapped error
        #[source]
        source: Box<AplError>,
    },
}

/// Error kind without payload, stable across [`AplError::Context`] wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    IndexOutOfRange,
    AxisOutOfRange,
    NonConformant,
    TypeMismatch,
    ConversionError,
    UndefinedVariable,
    NotSettable,
    KeyMismatch,
    UnsupportedDepth,
    InvalidAxis,
    DomainError,
    UnknownSymbol,
    InvalidConfig,
}

impl AplError {
    /// Create an index error
    pub fn index_out_of_range(index: i64, size: usize) -> Self {
        AplError::IndexOutOfRange { index, size }
    }

    /// Create an axis range error
    pub fn axis_out_of_range(axis: i64, rank: usize) -> Self {
        AplError::AxisOutOfRange { axis, rank }
    }

    /// Create a conformance error
    pub fn non_conformant<S: Into<String>>(msg: S) -> Self {
        AplError::NonConformant(msg.into())
    }

    /// Create a type error
    pub fn type_mismatch<S: Into<String>>(msg: S) -> Self {
        AplError::TypeMismatch(msg.into())
    }

    /// Create a conversion error
    pub fn conversion<S: Into<String>>(msg: S) -> Self {
        AplError::ConversionError(msg.into())
    }

    /// Create a key mismatch error
    pub fn key_mismatch<S: Into<String>>(msg: S) -> Self {
        AplError::KeyMismatch(msg.into())
    }

    /// Create a domain error
    pub fn domain<S: Into<String>>(msg: S) -> Self {
        AplError::DomainError(msg.into())
    }

    /// Wrap this error with the name of the variable, column or key it
    /// concerns.
    pub fn with_context<S: Into<String>>(self, name: S) -> Self {
        AplError::Context {
            name: name.into(),
            source: Box::new(self),
        }
    }

    /// The kind of the innermost error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AplError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            AplError::AxisOutOfRange { .. } => ErrorKind::AxisOutOfRange,
            AplError::NonConformant(_) => ErrorKind::NonConformant,
            AplError::TypeMismatch(_) => ErrorKind::TypeMismatch,
            AplError::ConversionError(_) => ErrorKind::ConversionError,
            AplError::UndefinedVariable(_) => ErrorKind::UndefinedVariable,
            AplError::NotSettable(_) => ErrorKind::NotSettable,
            AplError::KeyMismatch(_) => ErrorKind::KeyMismatch,
            AplError::UnsupportedDepth(_) => ErrorKind::UnsupportedDepth,
            AplError::InvalidAxis(_) => ErrorKind::InvalidAxis,
            AplError::DomainError(_) => ErrorKind::DomainError,
            AplError::UnknownSymbol(_) => ErrorKind::UnknownSymbol,
            AplError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            AplError::Context { source, .. } => source.kind(),
        }
    }

    /// Unwrap all context layers.
    pub fn root(&self) -> &AplError {
        match self {
            AplError::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type alias for evaluation operations
pub type AplResult<T> = Result<T, AplError>;
