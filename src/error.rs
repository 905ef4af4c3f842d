use crate::value::Value;
use std::fmt;

/// Failure modes of the mean computations.
///
/// Accumulators check their input before touching their state, so an error
/// returned from an update means the accumulator is exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum MeanError {
    /// Input is not a number the operation can work with: text that does not
    /// parse as a value, or a complex value where only reals are allowed.
    TypeMismatch {
        /// Offending input, as text.
        input: String,
        /// What the operation expected instead.
        expected: &'static str,
    },

    /// `weighted_mean` was given value and weight slices of different length.
    LengthMismatch {
        /// Number of values.
        values: usize,
        /// Number of weights.
        weights: usize,
    },

    /// A value of exactly zero was given to a harmonic mean.
    ZeroValue,

    /// A value that must be strictly positive was not.
    NegativeOrZeroValue(f64),

    /// The weights passed to `weighted_mean` sum to zero.
    ZeroWeightSum,

    /// A maximum window size could not be read as a positive integer.
    InvalidConfiguration(String),
}

impl MeanError {
    pub(crate) fn type_mismatch(input: impl fmt::Display, expected: &'static str) -> Self {
        Self::TypeMismatch {
            input: input.to_string(),
            expected,
        }
    }

    pub(crate) fn real_expected(value: &Value) -> Self {
        Self::type_mismatch(value, "a real number")
    }
}

impl fmt::Display for MeanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { input, expected } => {
                write!(f, "incompatible value {input:?}, expected {expected}")
            }
            Self::LengthMismatch { values, weights } => write!(
                f,
                "values and weights must have the same length ({values} values; {weights} weights)"
            ),
            Self::ZeroValue => f.write_str("values must not contain zero"),
            Self::NegativeOrZeroValue(val) => {
                write!(f, "values must be strictly positive, but found {val:?}")
            }
            Self::ZeroWeightSum => f.write_str("weights must not sum to zero"),
            Self::InvalidConfiguration(input) => {
                write!(f, "maximum size must be a positive integer, but is {input:?}")
            }
        }
    }
}

impl std::error::Error for MeanError {}
