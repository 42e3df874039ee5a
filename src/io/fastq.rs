//! FASTQ writing for simulated read pairs.

use anyhow::{Context, Result};
use noodles::bgzf;
use noodles::fastq;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::num::NonZero;
use std::path::{Path, PathBuf};

/// Internal writer implementation supporting both uncompressed and BGZF-compressed output.
enum FastqWriterInner {
    Uncompressed(fastq::io::Writer<BufWriter<File>>),
    Compressed(fastq::io::Writer<bgzf::io::MultithreadedWriter<File>>),
}

impl FastqWriterInner {
    fn write_record(&mut self, record: &fastq::Record) -> std::io::Result<()> {
        match self {
            FastqWriterInner::Uncompressed(w) => w.write_record(record),
            FastqWriterInner::Compressed(w) => w.write_record(record),
        }
    }

    fn finish(self) -> Result<()> {
        match self {
            FastqWriterInner::Uncompressed(mut w) => w
                .get_mut()
                .flush()
                .context("Failed to flush uncompressed writer"),
            FastqWriterInner::Compressed(w) => {
                // Get the underlying BGZF writer and finish it to shutdown threads and write EOF
                w.into_inner()
                    .finish()
                    .map(|_| ()) // Discard the returned File handle
                    .map_err(|e| anyhow::anyhow!("Failed to finish BGZF writer: {}", e))
            }
        }
    }
}

/// Writer for FASTQ files supporting both uncompressed and BGZF-compressed output.
///
/// Compression is enabled based on the file extension (`.gz`, `.bgz`, or `.bgzf`).
///
/// The buffer is flushed when the writer is dropped, but errors are silently
/// ignored then. Call `finish()` to handle them.
///
/// # Example
/// ```no_run
/// use pairsim::io::fastq::FastqWriter;
/// use noodles::fastq;
/// use std::path::PathBuf;
///
/// let mut writer = FastqWriter::new(&PathBuf::from("output.fastq.gz"), 4)?;
///
/// let record = fastq::Record::new(
///     fastq::record::Definition::new("read1", ""),
///     b"ACGT",
///     b"IIII",
/// );
/// writer.write_record(&record)?;
/// writer.finish()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct FastqWriter {
    writer: FastqWriterInner,
}

impl FastqWriter {
    /// Creates a new FASTQ writer for the specified file path.
    ///
    /// # Arguments
    /// * `path` - Path to the output FASTQ file
    /// * `compression_threads` - Number of compression threads (0 = auto-detect)
    pub fn new(path: &Path, compression_threads: usize) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create FASTQ file: {}", path.display()))?;

        let writer = if should_compress(path) {
            // Use specified threads or auto-detect CPU cores
            let worker_count = if compression_threads == 0 {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4) // Fallback to 4 threads
            } else {
                compression_threads
            };

            let bgzf_writer = bgzf::io::MultithreadedWriter::with_worker_count(
                NonZero::new(worker_count).unwrap_or(NonZero::<usize>::MIN),
                file,
            );

            FastqWriterInner::Compressed(fastq::io::Writer::new(bgzf_writer))
        } else {
            FastqWriterInner::Uncompressed(fastq::io::Writer::new(BufWriter::new(file)))
        };

        Ok(Self { writer })
    }

    /// Writes a single FASTQ record.
    pub fn write_record(&mut self, record: &fastq::Record) -> Result<()> {
        self.writer
            .write_record(record)
            .context("Failed to write FASTQ record")
    }

    /// Finishes the writer, properly shutting down compression threads if applicable.
    ///
    /// For compressed writers, this shuts down the thread pool and writes the final BGZF EOF block.
    pub fn finish(self) -> Result<()> {
        self.writer.finish()
    }
}

/// Destination for read pairs: separate R1/R2 files or one interleaved file.
pub struct PairedFastqWriter {
    forward: FastqWriter,
    reverse: Option<FastqWriter>,
    paths: Vec<PathBuf>,
}

impl PairedFastqWriter {
    /// Creates the output files for a prefix.
    ///
    /// Paired output goes to `{prefix}_R1.fastq` and `{prefix}_R2.fastq`,
    /// interleaved output to `{prefix}.fastq`. With `gzip`, `.gz` is appended
    /// and output is BGZF-compressed.
    ///
    /// # Arguments
    /// * `prefix` - Output path prefix
    /// * `interleaved` - Write both reads of a pair to one file
    /// * `gzip` - Compress output
    /// * `compression_threads` - Number of compression threads (0 = auto-detect)
    pub fn new(
        prefix: &Path,
        interleaved: bool,
        gzip: bool,
        compression_threads: usize,
    ) -> Result<Self> {
        let extension = if gzip { "fastq.gz" } else { "fastq" };
        let path = |suffix: &str| {
            let mut name = prefix.as_os_str().to_owned();
            name.push(format!("{suffix}.{extension}"));
            PathBuf::from(name)
        };

        if interleaved {
            let path = path("");
            Ok(Self {
                forward: FastqWriter::new(&path, compression_threads)?,
                reverse: None,
                paths: vec![path],
            })
        } else {
            let (r1, r2) = (path("_R1"), path("_R2"));
            Ok(Self {
                forward: FastqWriter::new(&r1, compression_threads)?,
                reverse: Some(FastqWriter::new(&r2, compression_threads)?),
                paths: vec![r1, r2],
            })
        }
    }

    /// Writes both reads of a pair.
    pub fn write_pair(&mut self, forward: &fastq::Record, reverse: &fastq::Record) -> Result<()> {
        self.forward.write_record(forward)?;
        self.reverse
            .as_mut()
            .unwrap_or(&mut self.forward)
            .write_record(reverse)
    }

    /// Paths of the files being written.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn finish(self) -> Result<()> {
        self.forward.finish()?;
        if let Some(reverse) = self.reverse {
            reverse.finish()?;
        }
        Ok(())
    }
}

/// Helper function to check if a file should be compressed based on its extension
fn should_compress(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ["gz", "bgz", "bgzf"]
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
}
