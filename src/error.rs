use core::fmt::{Display, Formatter};

/// The Cholesky decomposition failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CholeskyError {
    /// A zero or negative pivot was encountered; the matrix is not positive definite.
    NotPositiveDefinite {
        /// The row of the failing diagonal element.
        row: usize,
    },
}

/// Errors reported by [`KalmanFilter`](crate::KalmanFilter) and
/// [`Measurement`](crate::Measurement).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KalmanError {
    /// A buffer passed during construction does not have the size implied by the
    /// filter dimensions.
    BufferSize {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A measurement does not fit the filter it is applied to.
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// The forgetting factor lambda is outside of `(0, 1]`.
    InvalidLambda,
    /// The residual covariance S is not positive definite; the correction was rejected.
    NotPositiveDefinite { row: usize },
}

impl From<CholeskyError> for KalmanError {
    fn from(value: CholeskyError) -> Self {
        match value {
            CholeskyError::NotPositiveDefinite { row } => KalmanError::NotPositiveDefinite { row },
        }
    }
}

impl Display for CholeskyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            CholeskyError::NotPositiveDefinite { row } => {
                write!(f, "matrix is not positive definite (pivot in row {row})")
            }
        }
    }
}

impl Display for KalmanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            KalmanError::BufferSize {
                buffer,
                expected,
                actual,
            } => write!(
                f,
                "buffer {buffer} has {actual} elements, expected {expected}"
            ),
            KalmanError::DimensionMismatch {
                what,
                expected,
                actual,
            } => write!(f, "{what} is {actual}, expected {expected}"),
            KalmanError::InvalidLambda => write!(f, "lambda must be in the range (0, 1]"),
            KalmanError::NotPositiveDefinite { row } => write!(
                f,
                "residual covariance is not positive definite (pivot in row {row})"
            ),
        }
    }
}

#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[cfg(feature = "std")]
impl std::error::Error for CholeskyError {}

#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[cfg(feature = "std")]
impl std::error::Error for KalmanError {}
