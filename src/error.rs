use thiserror::Error;

/// Invalid-input conditions detected while parsing parameter names or
/// reshaping sample columns. Raised on the first violation; no partial
/// results are produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// The raw name does not match `name` or `name[i,j,...]`.
    #[error("{0:?} is not a valid parameter name")]
    InvalidParamName(String),

    /// Bracket indices are 1-based, so `0` has no cell to land in.
    #[error("parameter {name:?} has a zero bracket index; indices are 1-based")]
    ZeroIndex { name: String },

    #[error("parameter {name:?} has {got} samples, expected {expected}")]
    SampleCountMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// Two columns of the same parameter disagree on its dimensionality,
    /// e.g. `a[1]` next to `a[1,1]`.
    #[error("parameter {name:?} is indexed with {got} indices, expected {expected}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("got {names} parameter names but {columns} sample columns")]
    MisalignedFit { names: usize, columns: usize },
}
