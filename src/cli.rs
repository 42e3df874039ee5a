// Command-line interface definition

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pairsim",
    version,
    about = "Simulate paired-end short reads with position-dependent errors and qualities",
    long_about = None
)]
pub struct Cli {
    /// Reference sequences (FASTA format) to sample reads from
    #[arg(short = 'r', long, value_name = "FASTA")]
    pub reference: PathBuf,

    /// Output prefix; writes PREFIX_R1.fastq and PREFIX_R2.fastq
    #[arg(short = 'o', long, value_name = "PREFIX")]
    pub output: PathBuf,

    /// Number of reads to generate (pairs are half of this, rounded up)
    #[arg(short = 'n', long, default_value = "10000", value_parser = clap::value_parser!(u64).range(1..))]
    pub num_reads: u64,

    /// Built-in sequencer model
    #[arg(short = 'm', long, default_value = "basic", value_parser = clap::builder::PossibleValuesParser::new(crate::models::registry::NAMES.iter().copied()))]
    pub model: String,

    /// Model file (JSON, optionally gzipped); overrides --model
    #[arg(short = 'f', long, value_name = "JSON")]
    pub model_file: Option<PathBuf>,

    /// Write the selected model as JSON to this path
    #[arg(long, value_name = "JSON")]
    pub export_model: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(short = 's', long)]
    pub seed: Option<u64>,

    /// Write both reads of each pair to a single PREFIX.fastq file
    #[arg(long)]
    pub single_output: bool,

    /// Compress output with BGZF (adds .gz)
    #[arg(short = 'z', long)]
    pub gzip: bool,

    /// Compression threads (0 = number of CPUs)
    #[arg(short = 't', long, default_value = "0")]
    pub threads: usize,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Number of read pairs to simulate.
    pub fn num_pairs(&self) -> u64 {
        self.num_reads.div_ceil(2)
    }
}

/// Arguments of the random read generator.
#[derive(Parser)]
#[command(
    name = "pairsim-random",
    version,
    about = "Generate reads of random bases with a given GC content",
    long_about = None
)]
pub struct RandomCli {
    /// Number of reads to generate
    #[arg(short = 'n', long, default_value = "10000")]
    pub num_reads: u64,

    /// Read length
    #[arg(short = 'l', long, default_value = "100", value_parser = clap::value_parser!(u64).range(1..))]
    pub read_len: u64,

    /// Output FASTQ file (BGZF-compressed if it ends with .gz)
    #[arg(short = 'o', long, value_name = "FASTQ")]
    pub output: PathBuf,

    /// GC percent
    #[arg(long, default_value = "50", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub gc: u8,

    /// Random seed for reproducibility
    #[arg(short = 's', long)]
    pub seed: Option<u64>,

    /// Compression threads (0 = number of CPUs)
    #[arg(short = 't', long, default_value = "0")]
    pub threads: usize,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Styled messages for verbose output on stderr.
pub mod fmt {
    use console::style;
    use std::fmt::Display;

    pub fn header(title: &str) -> String {
        style(title).bold().underlined().to_string()
    }

    /// Parameter name padded to `width` columns.
    pub fn param_aligned(name: &str, width: usize) -> String {
        style(format!("{name:<width$}")).cyan().to_string()
    }

    pub fn progress(message: impl Display) -> String {
        format!("{} {}", style("→").blue().bold(), message)
    }

    pub fn success(message: impl Display) -> String {
        format!("{} {}", style("✓").green().bold(), message)
    }

    pub fn warning(message: impl Display) -> String {
        format!("{} {}", style("!").yellow().bold(), message)
    }
}
