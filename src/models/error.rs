use crate::distributions::Cdf;
use crate::error::ModelError;
use crate::models::Strand;
use crate::utils::{PHRED_TO_PROB, base_index, index_base};
use rand::Rng;

/// Position- and base-dependent sequencing errors for one strand.
///
/// # Tables
/// - `substitutions[pos][base]` is the distribution of the replacement base
///   when a substitution happens at `pos` on `base`
/// - `insertions[pos][base]` is the probability of inserting `base` after `pos`
/// - `deletions[pos][base]` is the probability of deleting `base` at `pos`
///
/// Bases are indexed A=0, C=1, G=2, T=3.
#[derive(Debug, Clone)]
pub struct ErrorModel {
    substitutions: Vec<[Cdf; 4]>,
    insertions: Vec<[f64; 4]>,
    deletions: Vec<[f64; 4]>,
}

impl ErrorModel {
    /// Creates a validated error model.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Any table covers fewer than `read_len` positions
    /// - A substitution distribution has more than 4 outcomes
    /// - An insertion or deletion probability is outside [0.0, 1.0]
    pub fn new(
        strand: Strand,
        substitutions: Vec<[Cdf; 4]>,
        insertions: Vec<[f64; 4]>,
        deletions: Vec<[f64; 4]>,
        read_len: usize,
    ) -> Result<Self, ModelError> {
        if let Some(cdf) = substitutions.iter().flatten().find(|cdf| cdf.len() > 4) {
            return Err(ModelError::TooManyOutcomes {
                strand,
                table: "substitution",
                outcomes: cdf.len(),
                limit: 4,
            });
        }

        for (table, rows) in [("insertion", &insertions), ("deletion", &deletions)] {
            for (position, row) in rows.iter().enumerate() {
                for (base, &value) in row.iter().enumerate() {
                    if !(0.0..=1.0).contains(&value) {
                        return Err(ModelError::Probability {
                            strand,
                            table,
                            position,
                            base,
                            value,
                        });
                    }
                }
            }
        }

        let model = Self {
            substitutions,
            insertions,
            deletions,
        };
        model.check_read_len(strand, read_len)?;
        Ok(model)
    }

    /// Fails unless every table covers `read_len` positions.
    pub fn check_read_len(&self, strand: Strand, read_len: usize) -> Result<(), ModelError> {
        let lengths = [
            ("substitution", self.substitutions.len()),
            ("insertion", self.insertions.len()),
            ("deletion", self.deletions.len()),
        ];
        for (table, len) in lengths {
            if len < read_len {
                return Err(ModelError::TableTooShort {
                    strand,
                    table,
                    len,
                    read_len,
                });
            }
        }
        Ok(())
    }

    /// Applies insertions and deletions to a window and returns the mutated sequence.
    ///
    /// Positions are visited left to right. A non-canonical base is dropped
    /// without any draw. Otherwise the base is kept unless a deletion fires,
    /// then each of the four bases is independently inserted after it.
    /// The result may be shorter or longer than `window`.
    ///
    /// # Arguments
    /// * `window` - Reference bases, at most the model's read length
    /// * `rng` - Random number generator
    pub fn introduce_indels<R: Rng>(&self, window: &[u8], rng: &mut R) -> Vec<u8> {
        let mut mutated = Vec::with_capacity(window.len() * 11 / 10);

        for (pos, &base) in window.iter().enumerate() {
            let Some(index) = base_index(base) else {
                continue;
            };
            if rng.random::<f64>() > self.deletions[pos][index] {
                mutated.push(base);
            }
            for (inserted, &p) in self.insertions[pos].iter().enumerate() {
                if rng.random::<f64>() < p {
                    mutated.push(index_base(inserted));
                }
            }
        }

        mutated
    }

    /// Substitutes bases in place with the error probability implied by each phred score.
    ///
    /// Non-canonical bases are never substituted.
    pub fn introduce_substitutions<R: Rng>(&self, read: &mut [u8], phreds: &[u8], rng: &mut R) {
        for (pos, (base, &phred)) in read.iter_mut().zip(phreds).enumerate() {
            if rng.random::<f64>() >= PHRED_TO_PROB[phred as usize] {
                continue;
            }
            let Some(index) = base_index(*base) else {
                continue;
            };
            *base = index_base(self.substitutions[pos][index].choose(rng));
        }
    }

    pub fn substitutions(&self) -> &[[Cdf; 4]] {
        &self.substitutions
    }

    pub fn insertions(&self) -> &[[f64; 4]] {
        &self.insertions
    }

    pub fn deletions(&self) -> &[[f64; 4]] {
        &self.deletions
    }
}
