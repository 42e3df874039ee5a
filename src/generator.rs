use crate::io::fasta::FastaRecord;
use crate::models::{SequencerModel, SimulatedRead};
use crate::utils::{is_nucleotides, phred_to_ascii, worker_rng};
use anyhow::{Result, bail};
use noodles::fastq;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Reason a reference sequence was left out of simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Contains bases other than A, C, G, T
    NonNucleotide,
    /// Shorter than twice the read length
    TooShort(usize),
}

/// Generates synthetic read pairs from reference sequences.
///
/// References are picked with probability proportional to their length, and
/// each pair is simulated with the sequencer model. Reads are named
/// `{n}.{position}.{reference}` where `n` counts reads (not pairs) from 1.
pub struct ReadGenerator {
    references: Vec<FastaRecord>,
    weights: WeightedIndex<usize>,
    model: SequencerModel,
    rng: ChaCha8Rng,
    skipped: Vec<(String, SkipReason)>,
    read_count: usize,
}

impl ReadGenerator {
    /// Creates a generator over the usable references.
    ///
    /// # Arguments
    /// * `sequences` - Reference sequences to sample from
    /// * `model` - Sequencer model to simulate with
    /// * `seed` - Optional random seed for reproducibility (random if absent)
    ///
    /// # Errors
    /// Returns an error if no reference is long enough and made of nucleotides only.
    pub fn new(
        sequences: Vec<FastaRecord>,
        model: SequencerModel,
        seed: Option<u64>,
    ) -> Result<Self> {
        let min_len = model.min_reference_len();
        let mut references = Vec::new();
        let mut skipped = Vec::new();

        for record in sequences {
            if !is_nucleotides(&record.sequence) {
                skipped.push((record.id, SkipReason::NonNucleotide));
            } else if record.sequence.len() < min_len {
                skipped.push((record.id, SkipReason::TooShort(record.sequence.len())));
            } else {
                references.push(record);
            }
        }

        if references.is_empty() {
            bail!(
                "No usable reference sequences: need A/C/G/T only and at least {} bases for model {}",
                min_len,
                model.name()
            );
        }

        let weights = WeightedIndex::new(references.iter().map(|r| r.sequence.len()))?;
        let rng = match seed {
            Some(seed) => worker_rng(seed, 0),
            None => ChaCha8Rng::from_os_rng(),
        };

        Ok(Self {
            references,
            weights,
            model,
            rng,
            skipped,
            read_count: 0,
        })
    }

    /// References left out of simulation, with the reason.
    pub fn skipped(&self) -> &[(String, SkipReason)] {
        &self.skipped
    }

    pub fn references(&self) -> &[FastaRecord] {
        &self.references
    }

    /// Generates the next read pair as FASTQ records.
    pub fn generate_pair(&mut self) -> Result<(fastq::Record, fastq::Record)> {
        let read_len = self.model.read_len();

        loop {
            let reference = &self.references[self.weights.sample(&mut self.rng)];
            let Some(pair) = self.model.simulate_read(&reference.sequence, &mut self.rng) else {
                continue; // Only possible for references shorter than 2 * read length
            };

            for read in [&pair.forward, &pair.reverse] {
                if read.sequence.len() != read_len {
                    bail!(
                        "bad read length: {}, want {}",
                        read.sequence.len(),
                        read_len
                    );
                }
            }

            let forward = to_record(self.read_count + 1, &reference.id, pair.forward);
            let reverse = to_record(self.read_count + 2, &reference.id, pair.reverse);
            self.read_count += 2;

            return Ok((forward, reverse));
        }
    }

    /// Number of reads generated so far.
    pub fn read_count(&self) -> usize {
        self.read_count
    }
}

/// Generates reads of uniformly random bases with a fixed GC content.
///
/// Reads are named by their 1-based number and carry a constant quality of
/// phred 40. Useful as a baseline that matches no reference.
pub struct RandomReadGenerator {
    alphabet: Vec<u8>,
    read_len: usize,
    rng: ChaCha8Rng,
    read_count: usize,
}

impl RandomReadGenerator {
    /// Creates a random read generator.
    ///
    /// # Arguments
    /// * `gc_percent` - Percentage of G and C bases, 0 to 100
    /// * `read_len` - Length of every read
    /// * `seed` - Optional random seed for reproducibility (random if absent)
    pub fn new(gc_percent: u8, read_len: usize, seed: Option<u64>) -> Result<Self> {
        if gc_percent > 100 {
            bail!("GC percent must be between 0 and 100, got {gc_percent}");
        }
        if read_len == 0 {
            bail!("Read length must be positive");
        }

        // Each percent contributes one base pair
        let gc = usize::from(gc_percent);
        let mut alphabet = Vec::with_capacity(200);
        alphabet.extend(b"GC".repeat(gc));
        alphabet.extend(b"AT".repeat(100 - gc));

        let rng = match seed {
            Some(seed) => worker_rng(seed, 0),
            None => ChaCha8Rng::from_os_rng(),
        };

        Ok(Self {
            alphabet,
            read_len,
            rng,
            read_count: 0,
        })
    }

    /// Generates the next read.
    pub fn generate(&mut self) -> fastq::Record {
        self.read_count += 1;
        let sequence: Vec<u8> = (0..self.read_len)
            .map(|_| self.alphabet[self.rng.random_range(0..self.alphabet.len())])
            .collect();

        fastq::Record::new(
            fastq::record::Definition::new(self.read_count.to_string(), ""),
            sequence,
            phred_to_ascii(&vec![40u8; self.read_len]),
        )
    }

    /// Number of reads generated so far.
    pub fn read_count(&self) -> usize {
        self.read_count
    }
}

fn to_record(number: usize, reference: &str, read: SimulatedRead) -> fastq::Record {
    let name = format!("{}.{}.{}", number, read.position, reference);
    fastq::Record::new(
        fastq::record::Definition::new(name, ""),
        read.sequence,
        read.quality,
    )
}
