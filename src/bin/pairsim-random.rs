use anyhow::Result;
use clap::Parser;
use pairsim::cli::{RandomCli, fmt};
use pairsim::generator::RandomReadGenerator;
use pairsim::io::FastqWriter;

fn main() -> Result<()> {
    let cli = RandomCli::parse();

    if cli.verbose {
        eprintln!("{}", fmt::header("PairSim Random Reads"));
        eprintln!("{}: {}", fmt::param_aligned("Output", 16), cli.output.display());
        eprintln!("{}: {}", fmt::param_aligned("Number of reads", 16), cli.num_reads);
        eprintln!("{}: {}", fmt::param_aligned("Read length", 16), cli.read_len);
        eprintln!("{}: {}%", fmt::param_aligned("GC content", 16), cli.gc);
        if let Some(seed) = cli.seed {
            eprintln!("{}: {}", fmt::param_aligned("Random seed", 16), seed);
        }
        eprintln!();
    }

    let read_len = usize::try_from(cli.read_len)?;
    let mut generator = RandomReadGenerator::new(cli.gc, read_len, cli.seed)?;
    let mut writer = FastqWriter::new(&cli.output, cli.threads)?;

    for _ in 0..cli.num_reads {
        writer.write_record(&generator.generate())?;
    }
    writer.finish()?;

    if cli.verbose {
        eprintln!(
            "{}",
            fmt::success(format!(
                "{} reads written to {}",
                generator.read_count(),
                cli.output.display()
            ))
        );
    }

    Ok(())
}
