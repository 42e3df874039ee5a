//! I/O module for reading references and models and writing simulated reads.
//!
//! Provides a FASTA reader, a paired FASTQ writer and JSON model files.
//! Inputs may be plain or gzip-compressed.

pub mod fasta;
pub mod fastq;
pub mod model;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// Re-export main types
pub use fasta::{FastaReader, FastaRecord};
pub use fastq::{FastqWriter, PairedFastqWriter};

/// Opens a file for buffered reading, decompressing it if it starts with the gzip magic bytes.
///
/// `MultiGzDecoder` handles both regular gzip and BGZF.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;

    let mut buffered = BufReader::new(file);
    let reader: Box<dyn BufRead> = if is_gzip_compressed(&mut buffered)? {
        Box::new(BufReader::new(MultiGzDecoder::new(buffered)))
    } else {
        Box::new(buffered)
    };

    Ok(reader)
}

/// Helper function to check if a file is gzip-compressed
fn is_gzip_compressed<R: std::io::Read>(reader: &mut BufReader<R>) -> Result<bool> {
    let buffer = reader.fill_buf().context("Failed to read file header")?;

    // Check for gzip magic bytes (0x1f 0x8b)
    Ok(buffer.len() >= 2 && buffer[0] == 0x1f && buffer[1] == 0x8b)
}
