//! Empirical models of a sequencing instrument and the read-pair simulation built on them.

pub mod error;
pub mod length;
pub mod quality;
pub mod record;
pub mod registry;
pub mod sequencer;

use std::fmt;

pub use error::ErrorModel;
pub use length::InsertSizeModel;
pub use quality::QualityModel;
pub use record::ModelRecord;
pub use sequencer::{ReadPair, SequencerModel, SimulatedRead, StrandModel};

/// Read orientation within a pair; each has its own tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => f.write_str("forward"),
            Strand::Reverse => f.write_str("reverse"),
        }
    }
}
