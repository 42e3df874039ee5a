//! Discrete probability distributions sampled by inverse transform.
//!
//! Every table in a sequencer model is stored as a [`Cdf`] and sampled
//! with a caller-supplied random number generator.

pub mod cdf;

pub use cdf::Cdf;
