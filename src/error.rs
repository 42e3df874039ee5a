//! Validation errors raised while building distributions and models.
//!
//! Both kinds are construction-time failures: once a [`Cdf`](crate::distributions::Cdf)
//! or [`SequencerModel`](crate::models::SequencerModel) exists, sampling and simulation
//! cannot fail.

use crate::models::Strand;

/// Errors raised when a cumulative probability table is malformed.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CdfError {
    /// The table has no entries
    #[error("got empty cdf")]
    Empty,

    /// The last entry is not exactly 1
    #[error("last element is {0}, want 1")]
    LastNotOne(f64),

    /// An entry is negative or not a number
    #[error("cdf[{index}]={value}, want >=0")]
    Negative { index: usize, value: f64 },

    /// Two adjacent entries decrease
    #[error("cdf[{index}]>cdf[{}]: {previous}>{next}", .index + 1)]
    Decreasing {
        index: usize,
        previous: f64,
        next: f64,
    },

    /// Weights passed to [`Cdf::from_weights`](crate::distributions::Cdf::from_weights)
    /// do not sum to a positive, finite number
    #[error("weights sum to {0}, want a positive finite total")]
    ZeroMass(f64),
}

/// Errors raised when a sequencer model fails validation or lookup.
#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    /// Read length must be positive
    #[error("model {0:?} has read length 0")]
    ZeroReadLength(String),

    /// A position-indexed table does not cover the whole read
    #[error("{strand} {table} table has {len} positions, want at least {read_len}")]
    TableTooShort {
        strand: Strand,
        table: &'static str,
        len: usize,
        read_len: usize,
    },

    /// An insertion or deletion probability lies outside [0, 1]
    #[error("{strand} {table}[{position}][{base}]={value}, want a probability in [0, 1]")]
    Probability {
        strand: Strand,
        table: &'static str,
        position: usize,
        base: usize,
        value: f64,
    },

    /// The bin-selection distribution can pick a bin that does not exist
    #[error("{strand} bin selection has {choices} outcomes but only {bins} quality bins exist")]
    MissingBins {
        strand: Strand,
        bins: usize,
        choices: usize,
    },

    /// A distribution has more outcomes than its domain allows
    #[error("{strand} {table} distribution has {outcomes} outcomes, want at most {limit}")]
    TooManyOutcomes {
        strand: Strand,
        table: &'static str,
        outcomes: usize,
        limit: usize,
    },

    /// A distribution embedded in the model is malformed
    #[error(transparent)]
    Cdf(#[from] CdfError),

    /// The serialized model could not be parsed
    #[error("failed to parse model: {0}")]
    Json(#[from] serde_json::Error),

    /// No built-in model has this name
    #[error("unknown model {name:?}, need one of {known:?}")]
    UnknownModel {
        name: String,
        known: &'static [&'static str],
    },
}
