use core::fmt;

/// Result alias for `nnra`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by engine construction and the reclassification loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty.
    EmptyInput,

    /// Matrix or sequence dimension mismatch.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Shape mismatch (string description).
    ShapeMismatch {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        actual: String,
    },

    /// Invalid number of classes requested.
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of items.
        n_items: usize,
    },

    /// An initial label lies outside `0..n_classes`.
    LabelOutOfRange {
        /// Item index carrying the label.
        index: usize,
        /// Offending label.
        label: usize,
        /// Number of classes.
        n_classes: usize,
    },

    /// Similarity entry is negative, NaN or infinite.
    InvalidSimilarity {
        /// Row of the entry.
        row: usize,
        /// Column of the entry.
        col: usize,
        /// Offending value.
        value: f64,
    },

    /// `S[row][col] != S[col][row]`.
    AsymmetricSimilarity {
        /// Row of the entry.
        row: usize,
        /// Column of the entry.
        col: usize,
    },

    /// Total similarity mass is zero; affinities would be undefined.
    DegenerateInput,

    /// Reclassification did not converge within the round limit.
    ConvergenceFailure {
        /// Number of rounds applied.
        iterations: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: expected {expected}, actual {actual}")
            }
            Error::InvalidClusterCount { requested, n_items } => {
                write!(f, "cannot assign {n_items} items to {requested} classes")
            }
            Error::LabelOutOfRange {
                index,
                label,
                n_classes,
            } => write!(
                f,
                "label {label} of item {index} is out of range for {n_classes} classes"
            ),
            Error::InvalidSimilarity { row, col, value } => {
                write!(f, "invalid similarity {value} at ({row}, {col})")
            }
            Error::AsymmetricSimilarity { row, col } => {
                write!(f, "similarity matrix is not symmetric at ({row}, {col})")
            }
            Error::DegenerateInput => {
                write!(f, "degenerate input: total similarity mass is zero")
            }
            Error::ConvergenceFailure { iterations } => {
                write!(f, "did not converge after {iterations} rounds")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
