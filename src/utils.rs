use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::LazyLock;

/// Number of phred scores with a known error probability.
pub const PHRED_LIMIT: usize = 100;

/// Offset added to phred scores in textual quality strings.
pub const PHRED_OFFSET: u8 = 33;

/// Error probability of each phred score, `10^(-q/10)`.
pub static PHRED_TO_PROB: LazyLock<[f64; PHRED_LIMIT]> =
    LazyLock::new(|| std::array::from_fn(|q| 10.0_f64.powf(-(q as f64) / 10.0)));

const NUCLEOTIDES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Returns the canonical index (A=0, C=1, G=2, T=3) of a base, or `None`
/// for ambiguity codes and other symbols.
pub fn base_index(base: u8) -> Option<usize> {
    match base {
        b'A' | b'a' => Some(0),
        b'C' | b'c' => Some(1),
        b'G' | b'g' => Some(2),
        b'T' | b't' => Some(3),
        _ => None,
    }
}

/// Inverse of [`base_index`].
///
/// # Panics
/// Panics if `index >= 4`.
pub fn index_base(index: usize) -> u8 {
    NUCLEOTIDES[index]
}

/// Returns true if every base is one of A, C, G, T.
pub fn is_nucleotides(sequence: &[u8]) -> bool {
    sequence.iter().all(|&b| base_index(b).is_some())
}

fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'a' => b't',
        b't' => b'a',
        b'c' => b'g',
        b'g' => b'c',
        b'R' => b'Y',
        b'Y' => b'R',
        b'K' => b'M',
        b'M' => b'K',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        b'r' => b'y',
        b'y' => b'r',
        b'k' => b'm',
        b'm' => b'k',
        b'b' => b'v',
        b'v' => b'b',
        b'd' => b'h',
        b'h' => b'd',
        // S, W, N and anything unknown are their own complement
        other => other,
    }
}

/// Appends the reverse complement of `sequence` to `dst`.
pub fn extend_reverse_complement(dst: &mut Vec<u8>, sequence: &[u8]) {
    dst.extend(sequence.iter().rev().map(|&b| complement(b)));
}

pub fn reverse_complement(sequence: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(sequence.len());
    extend_reverse_complement(&mut result, sequence);
    result
}

/// Encodes phred scores as printable quality characters (offset 33).
pub fn phred_to_ascii(phreds: &[u8]) -> Vec<u8> {
    phreds.iter().map(|&q| q + PHRED_OFFSET).collect()
}

/// Random stream for one worker.
///
/// Workers sharing a seed draw from independent ChaCha streams, so a run
/// split across workers is reproducible for a given seed and worker count.
pub fn worker_rng(seed: u64, worker: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(worker);
    rng
}

/// Scratch file path unique to this test process.
#[cfg(test)]
pub(crate) fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("pairsim_{}_test_{name}", std::process::id()))
}
