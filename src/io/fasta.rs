// FASTA file reading using noodles

use crate::io::open_input;
use anyhow::{Context, Result};
use noodles::fasta;
use std::path::Path;

/// Represents a FASTA sequence with its name and bases
#[derive(Debug, Clone)]
pub struct FastaRecord {
    pub id: String,
    pub sequence: Vec<u8>,
}

/// Reader for FASTA files
pub struct FastaReader;

impl FastaReader {
    /// Read all sequences from a FASTA file (plain or gzip-compressed).
    ///
    /// Bases are uppercased so soft-masked regions are simulated like the rest.
    pub fn read(path: &Path) -> Result<Vec<FastaRecord>> {
        let mut reader = fasta::io::Reader::new(open_input(path)?);
        let mut records = Vec::new();

        for result in reader.records() {
            let record = result
                .with_context(|| format!("Failed to parse FASTA record in {}", path.display()))?;

            let id = String::from_utf8_lossy(record.name()).into_owned();
            let sequence = record.sequence().as_ref().to_ascii_uppercase();

            records.push(FastaRecord { id, sequence });
        }

        if records.is_empty() {
            anyhow::bail!("No sequences found in FASTA file: {}", path.display());
        }

        Ok(records)
    }

    /// Calculate the total length of all sequences
    pub fn total_length(records: &[FastaRecord]) -> usize {
        records.iter().map(|r| r.sequence.len()).sum()
    }
}
