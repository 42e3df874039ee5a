//! Paired-end short-read simulator.
//!
//! A [`SequencerModel`](models::SequencerModel) holds per-position, per-strand
//! distributions of quality scores, substitutions, insertions and deletions,
//! stored as validated [`Cdf`](distributions::Cdf) tables. Given a reference
//! sequence and a random number generator it simulates a forward read and a
//! reverse-complement read from one fragment.
//!
//! ```
//! use pairsim::models::registry;
//! use pairsim::utils::worker_rng;
//!
//! let model = registry::builtin("basic").unwrap();
//! let mut rng = worker_rng(42, 0);
//! let reference = b"ACGT".repeat(100);
//!
//! let pair = model.simulate_read(&reference, &mut rng).unwrap();
//! assert_eq!(pair.forward.sequence.len(), model.read_len());
//! assert_eq!(pair.reverse.quality.len(), model.read_len());
//! ```

pub mod cli;
pub mod distributions;
pub mod error;
pub mod generator;
pub mod io;
pub mod models;
pub mod utils;
