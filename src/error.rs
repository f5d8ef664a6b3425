//! Errors raised while building or evaluating fuzzy systems.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    #[error("invalid domain [{min}, {max}]")]
    InvalidDomain { min: f64, max: f64 },

    #[error("invalid sample step {0}, must be finite, positive and yield at most MAX_SAMPLES samples")]
    InvalidStep(f64),

    #[error("malformed {shape} points {points:?}, expected finite non-decreasing corners")]
    MalformedPoints { shape: &'static str, points: Vec<f64> },

    #[error("invalid gaussian standard deviation {0}")]
    InvalidStdDev(f64),

    #[error("invalid peak value {0}, must lie in [0, 1]")]
    InvalidMaxValue(f64),

    #[error("invalid yager complement weight {0}")]
    InvalidComplementWeight(f64),

    #[error("membership function has zero total mass, centroid is undefined")]
    ZeroMass,

    #[error("aggregation operation {0} is invalid")]
    UnknownAggregation(String),

    #[error("implication operation {0} is invalid")]
    UnknownImplication(String),

    #[error("cannot defuzzify an empty rule set")]
    EmptyRuleSet,

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("relation models support 1 to 3 antecedents, got {0}")]
    UnsupportedDimension(usize),

    #[error("relation of {cells} cells exceeds the configured limit of {limit}")]
    RelationTooLarge { cells: usize, limit: usize },

    #[error("term does not belong to this controller")]
    UnknownTerm,

    #[error("input {0} does not belong to this controller")]
    UnknownInput(usize),
}

pub type Result<T> = std::result::Result<T, FuzzyError>;
