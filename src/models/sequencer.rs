use crate::error::ModelError;
use crate::models::{ErrorModel, InsertSizeModel, ModelRecord, QualityModel, Strand};
use crate::utils::{extend_reverse_complement, phred_to_ascii, reverse_complement};
use rand::Rng;
use std::io::Read;

/// One simulated read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedRead {
    /// 1-based reference position of the leftmost base the read covers
    pub position: usize,
    pub sequence: Vec<u8>,
    /// Phred+33 encoded quality scores
    pub quality: Vec<u8>,
}

/// Forward read and reverse-complement read simulated from one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadPair {
    pub forward: SimulatedRead,
    pub reverse: SimulatedRead,
}

/// Quality and error tables of one strand.
#[derive(Debug, Clone)]
pub struct StrandModel {
    pub quality: QualityModel,
    pub errors: ErrorModel,
}

impl StrandModel {
    /// Fails unless every quality and error table covers `read_len` positions.
    pub fn check_read_len(&self, strand: Strand, read_len: usize) -> Result<(), ModelError> {
        self.quality.check_read_len(strand, read_len)?;
        self.errors.check_read_len(strand, read_len)
    }
}

/// Statistical model of a paired-end sequencing instrument.
///
/// Holds read-only tables only, so one model can be shared by any number of
/// threads as long as each brings its own random number generator.
#[derive(Debug, Clone)]
pub struct SequencerModel {
    name: String,
    read_len: usize,
    insert_size: InsertSizeModel,
    forward: StrandModel,
    reverse: StrandModel,
}

impl SequencerModel {
    /// Assembles a model from validated parts.
    ///
    /// # Errors
    /// Returns an error if `read_len` is zero or a strand table covers fewer
    /// than `read_len` positions.
    pub fn new(
        name: impl Into<String>,
        read_len: usize,
        insert_size: InsertSizeModel,
        forward: StrandModel,
        reverse: StrandModel,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        if read_len == 0 {
            return Err(ModelError::ZeroReadLength(name));
        }
        forward.check_read_len(Strand::Forward, read_len)?;
        reverse.check_read_len(Strand::Reverse, read_len)?;
        Ok(Self {
            name,
            read_len,
            insert_size,
            forward,
            reverse,
        })
    }

    /// Parses and validates a JSON model record.
    pub fn from_json<R: Read>(reader: R) -> Result<Self, ModelError> {
        let record: ModelRecord = serde_json::from_reader(reader)?;
        Self::try_from(record)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn read_len(&self) -> usize {
        self.read_len
    }

    pub fn insert_size(&self) -> &InsertSizeModel {
        &self.insert_size
    }

    pub fn strand(&self, strand: Strand) -> &StrandModel {
        match strand {
            Strand::Forward => &self.forward,
            Strand::Reverse => &self.reverse,
        }
    }

    /// Shortest reference this model can simulate from.
    pub fn min_reference_len(&self) -> usize {
        2 * self.read_len
    }

    /// Simulates one read pair from a reference sequence.
    ///
    /// Draws an insert size and a fragment position, mutates both windows
    /// with strand-specific indels, corrects them back to the read length,
    /// then samples qualities and substitutions. Random draws always happen
    /// in the same order, so a seeded generator gives identical pairs.
    ///
    /// # Arguments
    /// * `sequence` - Reference bases
    /// * `rng` - Random number generator
    ///
    /// # Returns
    /// The simulated pair, or `None` if `sequence` is shorter than twice the read length
    ///
    /// # Example
    /// ```
    /// use pairsim::models::registry;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let model = registry::builtin("perfect").unwrap();
    /// let mut rng = StdRng::seed_from_u64(0);
    ///
    /// let pair = model.simulate_read(&[b'G'; 450], &mut rng).unwrap();
    /// assert_eq!(pair.forward.sequence, vec![b'G'; 125]);
    /// assert_eq!(pair.reverse.position, 326);
    ///
    /// assert!(model.simulate_read(&[b'G'; 249], &mut rng).is_none());
    /// ```
    pub fn simulate_read<R: Rng>(&self, sequence: &[u8], rng: &mut R) -> Option<ReadPair> {
        let read_len = self.read_len;
        if sequence.len() < self.min_reference_len() {
            return None;
        }

        // Short references get the longest fragment that fits
        let interval_len = (2 * read_len + self.insert_size.sample(rng)).min(sequence.len());
        let start = rng.random_range(0..=sequence.len() - interval_len);
        let mut reverse_start = start + interval_len - read_len;

        let window_end = start + read_len;
        let mut forward = self
            .forward
            .errors
            .introduce_indels(&sequence[start..window_end], rng);
        forward.truncate(read_len);
        let deficit = read_len - forward.len();
        forward.extend_from_slice(&sequence[window_end..window_end + deficit]);

        let window = reverse_complement(&sequence[reverse_start..reverse_start + read_len]);
        let mut reverse = self.reverse.errors.introduce_indels(&window, rng);
        reverse.truncate(read_len);
        let deficit = read_len - reverse.len();
        // The reverse read continues leftwards on the reference
        extend_reverse_complement(&mut reverse, &sequence[reverse_start - deficit..reverse_start]);
        reverse_start -= deficit;

        let forward_phreds = self.forward.quality.sample(read_len, rng);
        let reverse_phreds = self.reverse.quality.sample(read_len, rng);

        self.forward
            .errors
            .introduce_substitutions(&mut forward, &forward_phreds, rng);
        self.reverse
            .errors
            .introduce_substitutions(&mut reverse, &reverse_phreds, rng);

        Some(ReadPair {
            forward: SimulatedRead {
                position: start + 1,
                sequence: forward,
                quality: phred_to_ascii(&forward_phreds),
            },
            reverse: SimulatedRead {
                position: reverse_start + 1,
                sequence: reverse,
                quality: phred_to_ascii(&reverse_phreds),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::Cdf;
    use crate::models::registry;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn strand_model(strand: Strand, table_len: usize, ins: f64, del: f64) -> StrandModel {
        let subst: [Cdf; 4] = std::array::from_fn(|_| Cdf::from_weights(&[1.0; 4]).unwrap());
        StrandModel {
            quality: QualityModel::new(
                strand,
                Cdf::new(vec![1.0]).unwrap(),
                vec![vec![Cdf::from_weights(&[0.0, 0.0, 1.0, 1.0]).unwrap(); table_len]],
                table_len,
            )
            .unwrap(),
            errors: ErrorModel::new(
                strand,
                vec![subst; table_len],
                vec![[ins; 4]; table_len],
                vec![[del; 4]; table_len],
                table_len,
            )
            .unwrap(),
        }
    }

    fn fixed_gap(gap: usize) -> InsertSizeModel {
        let mut gaps = vec![0.0; gap];
        gaps.push(1.0);
        InsertSizeModel::new(Cdf::from_weights(&gaps).unwrap())
    }

    /// Small model with uniform indel rates on both strands.
    fn indel_model(read_len: usize, ins: f64, del: f64, gap: usize) -> SequencerModel {
        SequencerModel::new(
            "indel",
            read_len,
            fixed_gap(gap),
            strand_model(Strand::Forward, read_len, ins, del),
            strand_model(Strand::Reverse, read_len, ins, del),
        )
        .unwrap()
    }

    fn random_reference(len: usize, rng: &mut StdRng) -> Vec<u8> {
        (0..len).map(|_| b"ACGT"[rng.random_range(0..4)]).collect()
    }

    #[test]
    fn test_perfect_model() {
        let model = registry::builtin("perfect").unwrap();
        let sequence = vec![b'G'; 450];
        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..10 {
            let pair = model.simulate_read(&sequence, &mut rng).unwrap();
            assert_eq!(pair.forward.sequence, vec![b'G'; 125]);
            assert_eq!(pair.forward.quality, vec![73; 125]);
            assert_eq!(pair.forward.position, 1);
            assert_eq!(pair.reverse.sequence, vec![b'C'; 125]);
            assert_eq!(pair.reverse.quality, vec![73; 125]);
            assert_eq!(pair.reverse.position, 326);
        }
    }

    #[test]
    fn test_perfect_model_positions() {
        let model = registry::builtin("perfect").unwrap();
        let sequence = vec![b'A'; 451];
        let mut rng = StdRng::seed_from_u64(0);

        let mut forward = HashMap::new();
        let mut reverse = HashMap::new();
        for _ in 0..40 {
            let pair = model.simulate_read(&sequence, &mut rng).unwrap();
            *forward.entry(pair.forward.position).or_insert(0) += 1;
            *reverse.entry(pair.reverse.position).or_insert(0) += 1;
        }

        assert_eq!(forward.len(), 2);
        assert!(forward[&1] >= 5 && forward[&2] >= 5, "{forward:?}");
        assert_eq!(reverse.len(), 2);
        assert!(reverse[&326] >= 5 && reverse[&327] >= 5, "{reverse:?}");
    }

    #[test]
    fn test_reverse_read_is_reverse_complement() {
        let model = registry::builtin("perfect").unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let sequence = random_reference(2000, &mut rng);

        for _ in 0..20 {
            let pair = model.simulate_read(&sequence, &mut rng).unwrap();
            let start = pair.forward.position - 1;
            assert_eq!(pair.forward.sequence, &sequence[start..start + 125]);

            let start = pair.reverse.position - 1;
            assert_eq!(pair.reverse.sequence, reverse_complement(&sequence[start..start + 125]));
            // Fixed insert size of 200
            assert_eq!(pair.reverse.position + 124 - pair.forward.position + 1, 450);
        }
    }

    #[test]
    fn test_no_read_boundary() {
        let model = indel_model(10, 0.0, 0.0, 50);
        let mut rng = StdRng::seed_from_u64(42);

        for len in 0..20 {
            assert!(model.simulate_read(&vec![b'A'; len], &mut rng).is_none());
        }
        for len in 20..80 {
            assert!(model.simulate_read(&vec![b'A'; len], &mut rng).is_some());
        }
    }

    #[test]
    fn test_short_reference_clamps_fragment() {
        let model = registry::builtin("perfect").unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let sequence = random_reference(300, &mut rng);

        for _ in 0..10 {
            let pair = model.simulate_read(&sequence, &mut rng).unwrap();
            assert_eq!(pair.forward.position, 1);
            assert_eq!(pair.reverse.position, 176);
        }
    }

    #[test]
    fn test_length_invariant_with_extreme_indels() {
        let mut rng = StdRng::seed_from_u64(42);
        let sequence = random_reference(500, &mut rng);

        for (ins, del) in [(0.99, 0.0), (0.0, 0.99), (0.99, 0.99), (0.3, 0.7), (0.0, 1.0)] {
            let model = indel_model(30, ins, del, 100);
            for len in [60, 61, 75, 500] {
                for _ in 0..20 {
                    let pair = model.simulate_read(&sequence[..len], &mut rng).unwrap();
                    assert_eq!(pair.forward.sequence.len(), 30);
                    assert_eq!(pair.forward.quality.len(), 30);
                    assert_eq!(pair.reverse.sequence.len(), 30);
                    assert_eq!(pair.reverse.quality.len(), 30);
                    assert!(pair.reverse.position >= pair.forward.position);
                }
            }
        }
    }

    #[test]
    fn test_full_deletion_borrows_reference() {
        let model = indel_model(10, 0.0, 1.0, 0);
        let mut rng = StdRng::seed_from_u64(42);
        let sequence = b"AAAAACCCCCGGGGGTTTTTAAAAACCCCC";

        // Qualities are phred 2 or 3, so substitutions can change bases;
        // compare lengths and coordinates only
        for _ in 0..20 {
            let pair = model.simulate_read(sequence, &mut rng).unwrap();
            let start = pair.forward.position - 1;
            // Whole window deleted: the read is the next window, and the
            // reverse read is shifted a full read length to the left
            assert_eq!(pair.reverse.position, start + 1);
            assert_eq!(pair.forward.sequence.len(), 10);
            assert_eq!(pair.reverse.sequence.len(), 10);
        }
    }

    #[test]
    fn test_reverse_window_uses_reverse_indel_tables() {
        // Substitutions keep the base, so only indels can change a read
        let keep: [Cdf; 4] = std::array::from_fn(|base| {
            let mut weights = [0.0; 4];
            weights[base] = 1.0;
            Cdf::from_weights(&weights).unwrap()
        });
        let build = |strand: Strand, del: f64| {
            let mut model = strand_model(strand, 10, 0.0, del);
            model.errors = ErrorModel::new(
                strand,
                vec![keep.clone(); 10],
                vec![[0.0; 4]; 10],
                vec![[del; 4]; 10],
                10,
            )
            .unwrap();
            model
        };
        let model = SequencerModel::new(
            "reverse deletions",
            10,
            fixed_gap(0),
            build(Strand::Forward, 0.0),
            build(Strand::Reverse, 1.0),
        )
        .unwrap();

        let mut rng = StdRng::seed_from_u64(5);
        let sequence = random_reference(40, &mut rng);
        for _ in 0..20 {
            let pair = model.simulate_read(&sequence, &mut rng).unwrap();
            let start = pair.forward.position - 1;
            assert_eq!(pair.forward.sequence, &sequence[start..start + 10]);
            // Whole reverse window deleted: it is rebuilt from the forward window
            assert_eq!(pair.reverse.position, pair.forward.position);
            assert_eq!(
                pair.reverse.sequence,
                reverse_complement(&sequence[start..start + 10])
            );
        }
    }

    #[test]
    fn test_tables_shorter_than_read_len() {
        let result = SequencerModel::new(
            "short tables",
            10,
            fixed_gap(0),
            strand_model(Strand::Forward, 10, 0.0, 0.0),
            strand_model(Strand::Reverse, 5, 0.0, 0.0),
        );
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            ModelError::TableTooShort {
                strand: Strand::Reverse,
                len: 5,
                read_len: 10,
                ..
            }
        ));

        let result = SequencerModel::new(
            "short tables",
            10,
            fixed_gap(0),
            strand_model(Strand::Forward, 5, 0.0, 0.0),
            strand_model(Strand::Reverse, 10, 0.0, 0.0),
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "forward quality histogram table has 5 positions, want at least 10"
        );
    }

    #[test]
    fn test_deterministic_with_seed() {
        let model = registry::builtin("basic").unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        let sequence = random_reference(1000, &mut rng);

        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20)
                .map(|_| model.simulate_read(&sequence, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };

        assert_eq!(run(5), run(5));
        assert_ne!(run(5), run(6));
    }

    #[test]
    fn test_model_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SequencerModel>();

        let model = registry::builtin("basic").unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let sequence = random_reference(800, &mut rng);

        let sequential: Vec<Vec<ReadPair>> = (0..4)
            .map(|worker| {
                let mut rng = crate::utils::worker_rng(1, worker);
                (0..10)
                    .filter_map(|_| model.simulate_read(&sequence, &mut rng))
                    .collect()
            })
            .collect();

        let parallel: Vec<Vec<ReadPair>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|worker| {
                    let (model, sequence) = (&model, &sequence);
                    scope.spawn(move || {
                        let mut rng = crate::utils::worker_rng(1, worker);
                        (0..10)
                            .filter_map(|_| model.simulate_read(sequence, &mut rng))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(sequential, parallel);
    }
}
