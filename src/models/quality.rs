use crate::distributions::Cdf;
use crate::error::ModelError;
use crate::models::Strand;
use crate::utils::PHRED_LIMIT;
use rand::Rng;

/// Position-dependent phred score model for one strand.
///
/// Each read first picks a quality bin, modelling the local coverage and
/// quality regime, then draws one phred score per position from that bin's
/// histogram.
#[derive(Debug, Clone)]
pub struct QualityModel {
    bins: Cdf,
    histograms: Vec<Vec<Cdf>>,
}

impl QualityModel {
    /// Creates a validated quality model.
    ///
    /// # Arguments
    /// * `strand` - Strand the tables belong to, used in error messages
    /// * `bins` - Distribution over quality bin indices
    /// * `histograms` - Per-bin, per-position distributions over phred scores
    /// * `read_len` - Number of positions every bin must cover
    ///
    /// # Errors
    /// Returns an error if:
    /// - `bins` can pick a bin missing from `histograms`
    /// - A bin covers fewer than `read_len` positions
    /// - A phred distribution has more than 100 outcomes
    pub fn new(
        strand: Strand,
        bins: Cdf,
        histograms: Vec<Vec<Cdf>>,
        read_len: usize,
    ) -> Result<Self, ModelError> {
        if histograms.len() < bins.len() {
            return Err(ModelError::MissingBins {
                strand,
                bins: histograms.len(),
                choices: bins.len(),
            });
        }
        for bin in &histograms {
            if let Some(cdf) = bin.iter().find(|cdf| cdf.len() > PHRED_LIMIT) {
                return Err(ModelError::TooManyOutcomes {
                    strand,
                    table: "phred",
                    outcomes: cdf.len(),
                    limit: PHRED_LIMIT,
                });
            }
        }

        let model = Self { bins, histograms };
        model.check_read_len(strand, read_len)?;
        Ok(model)
    }

    /// Fails unless every bin covers `read_len` positions.
    pub fn check_read_len(&self, strand: Strand, read_len: usize) -> Result<(), ModelError> {
        match self.histograms.iter().find(|bin| bin.len() < read_len) {
            Some(bin) => Err(ModelError::TableTooShort {
                strand,
                table: "quality histogram",
                len: bin.len(),
                read_len,
            }),
            None => Ok(()),
        }
    }

    /// Samples `read_len` phred scores.
    ///
    /// # Arguments
    /// * `read_len` - Number of scores, at most the model's read length
    /// * `rng` - Random number generator
    pub fn sample<R: Rng>(&self, read_len: usize, rng: &mut R) -> Vec<u8> {
        let bin = &self.histograms[self.bins.choose(rng)];
        // Outcomes are below PHRED_LIMIT, so they fit in a byte
        bin[..read_len]
            .iter()
            .map(|cdf| cdf.choose(rng) as u8)
            .collect()
    }

    pub fn bins(&self) -> &Cdf {
        &self.bins
    }

    pub fn histograms(&self) -> &[Vec<Cdf>] {
        &self.histograms
    }
}
