use anyhow::Result;
use clap::Parser;
use pairsim::cli::{Cli, fmt};
use pairsim::generator::{ReadGenerator, SkipReason};
use pairsim::io::model::{load_model, write_model};
use pairsim::io::{FastaReader, PairedFastqWriter};
use pairsim::models::registry;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Invalid models fail here, before any read is simulated
    let model = match &cli.model_file {
        Some(path) => load_model(path)?,
        None => registry::builtin(&cli.model)?,
    };

    if cli.verbose {
        eprintln!("{}", fmt::header("PairSim Configuration"));
        eprintln!("{}: {}", fmt::param_aligned("Reference", 16), cli.reference.display());
        eprintln!("{}: {}", fmt::param_aligned("Output prefix", 16), cli.output.display());
        eprintln!("{}: {}", fmt::param_aligned("Number of reads", 16), cli.num_reads);
        eprintln!("{}: {}", fmt::param_aligned("Model", 16), model.name());
        eprintln!("{}: {}", fmt::param_aligned("Read length", 16), model.read_len());
        eprintln!("{}: {}", fmt::param_aligned("Max insert gap", 16), model.insert_size().max_gap());
        if let Some(seed) = cli.seed {
            eprintln!("{}: {}", fmt::param_aligned("Random seed", 16), seed);
        }
        eprintln!();
    }

    if let Some(path) = &cli.export_model {
        write_model(&model, path)?;
        if cli.verbose {
            eprintln!("{}", fmt::success(format!("Model written to {}", path.display())));
        }
    }

    if cli.verbose {
        eprintln!("{}", fmt::progress("Reading reference sequences..."));
    }
    let references = FastaReader::read(&cli.reference)?;
    if cli.verbose {
        eprintln!(
            "{}",
            fmt::progress(format!(
                "{} sequences, {} bases",
                references.len(),
                FastaReader::total_length(&references)
            ))
        );
    }

    let mut generator = ReadGenerator::new(references, model, cli.seed)?;
    if cli.verbose {
        for (id, reason) in generator.skipped() {
            let reason = match reason {
                SkipReason::NonNucleotide => "contains non-ACGT bases".to_string(),
                SkipReason::TooShort(len) => format!("too short ({len} bases)"),
            };
            eprintln!("{}", fmt::warning(format!("Skipping {id}: {reason}")));
        }
    }

    let mut writer = PairedFastqWriter::new(&cli.output, cli.single_output, cli.gzip, cli.threads)?;

    if cli.verbose {
        eprintln!("{}", fmt::progress(format!("Generating {} read pairs...", cli.num_pairs())));
    }

    for _ in 0..cli.num_pairs() {
        let (forward, reverse) = generator.generate_pair()?;
        writer.write_pair(&forward, &reverse)?;
    }

    let paths: Vec<String> = writer.paths().iter().map(|p| p.display().to_string()).collect();
    writer.finish()?;

    if cli.verbose {
        eprintln!(
            "{}",
            fmt::success(format!(
                "{} reads written to {}",
                generator.read_count(),
                paths.join(", ")
            ))
        );
    }

    Ok(())
}
