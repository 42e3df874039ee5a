//! Built-in sequencer models.
//!
//! Each call builds and validates a fresh model; nothing is cached or
//! shared between calls.

use crate::distributions::Cdf;
use crate::error::{CdfError, ModelError};
use crate::models::{ModelRecord, SequencerModel};
use statrs::function::erf::erfc;

/// Names accepted by [`builtin`].
pub const NAMES: &[&str] = &["basic", "perfect"];

const READ_LEN: usize = 125;
const INSERT_LEN: usize = 200;
const MAX_PHRED: usize = 40;

// Error-free base fraction of the basic model, before conversion to phred
const BASIC_ACCURACY_MEAN: f64 = 0.999;
const BASIC_ACCURACY_STD: f64 = 0.01;

/// Returns the built-in model with the given name (case-insensitive).
///
/// # Errors
/// Returns [`ModelError::UnknownModel`] for names not in [`NAMES`].
///
/// # Example
/// ```
/// use pairsim::models::registry;
///
/// let model = registry::builtin("basic").unwrap();
/// assert_eq!(model.read_len(), 125);
/// assert!(registry::builtin("hiseq").is_err());
/// ```
pub fn builtin(name: &str) -> Result<SequencerModel, ModelError> {
    match name.to_ascii_lowercase().as_str() {
        "basic" => basic(),
        "perfect" => perfect(),
        _ => Err(ModelError::UnknownModel {
            name: name.to_string(),
            known: NAMES,
        }),
    }
}

/// Phred scores derived from a normally distributed accuracy, and uniform
/// substitutions to one of the three other bases. No indels.
fn basic() -> Result<SequencerModel, ModelError> {
    let phreds = phred_cdf(BASIC_ACCURACY_MEAN, BASIC_ACCURACY_STD)?;
    let substitutions = substitution_row(|from, to| if from == to { 0.0 } else { 1.0 })?;
    build("basic", phreds, substitutions)
}

/// Phred 40 everywhere and substitutions that keep the original base, so
/// reads are exact copies of the reference.
fn perfect() -> Result<SequencerModel, ModelError> {
    let mut weights = vec![0.0; MAX_PHRED];
    weights.push(1.0);
    let phreds = Cdf::from_weights(&weights)?;
    let substitutions = substitution_row(|from, to| if from == to { 1.0 } else { 0.0 })?;
    build("perfect", phreds, substitutions)
}

fn build(name: &str, phreds: Cdf, substitutions: [Cdf; 4]) -> Result<SequencerModel, ModelError> {
    let mut gaps = vec![0.0; INSERT_LEN];
    gaps.push(1.0);
    let quality_hist = vec![vec![phreds; READ_LEN]];
    let substitutions = vec![substitutions; READ_LEN];
    let no_indels = vec![[0.0; 4]; READ_LEN];

    let record = ModelRecord {
        name: name.to_string(),
        read_len: READ_LEN,
        insert_len: Cdf::from_weights(&gaps)?,
        mean_count_forward: Cdf::new(vec![1.0])?,
        mean_count_reverse: Cdf::new(vec![1.0])?,
        quality_hist_forward: quality_hist.clone(),
        quality_hist_reverse: quality_hist,
        subst_choices_forward: substitutions.clone(),
        subst_choices_reverse: substitutions,
        ins_forward: no_indels.clone(),
        ins_reverse: no_indels.clone(),
        del_forward: no_indels.clone(),
        del_reverse: no_indels,
    };

    SequencerModel::try_from(record)
}

fn substitution_row(weight: impl Fn(usize, usize) -> f64) -> Result<[Cdf; 4], CdfError> {
    let row = |from: usize| {
        let weights: Vec<f64> = (0..4).map(|to| weight(from, to)).collect();
        Cdf::from_weights(&weights)
    };
    Ok([row(0)?, row(1)?, row(2)?, row(3)?])
}

/// Distribution of `round(-10 * log10(1 - x))` for `x ~ Normal(mean, std)`,
/// with `x` capped so the score never exceeds phred 40.
fn phred_cdf(mean: f64, std: f64) -> Result<Cdf, CdfError> {
    let normal_cdf = |x: f64| 0.5 * erfc((mean - x) / (std * std::f64::consts::SQRT_2));
    // Accuracy at which the rounded score moves from q - 1 to q
    let threshold = |q: usize| 1.0 - 10.0_f64.powf(-(q as f64 - 0.5) / 10.0);

    let weights: Vec<f64> = (0..=MAX_PHRED)
        .map(|q| {
            let below = if q == 0 { 0.0 } else { normal_cdf(threshold(q)) };
            let above = if q == MAX_PHRED {
                1.0
            } else {
                normal_cdf(threshold(q + 1))
            };
            (above - below).max(0.0)
        })
        .collect();

    Cdf::from_weights(&weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Strand;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_all_builtin_models_validate() {
        for name in NAMES {
            let model = builtin(name).unwrap();
            assert_eq!(model.name(), *name);
            assert_eq!(model.read_len(), READ_LEN);
            assert_eq!(model.insert_size().max_gap(), INSERT_LEN);
        }
        assert!(builtin("PERFECT").is_ok());
    }

    #[test]
    fn test_unknown_model() {
        let err = builtin("novaseq").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown model \"novaseq\", need one of [\"basic\", \"perfect\"]"
        );
    }

    #[test]
    fn test_basic_phred_distribution() {
        let cdf = phred_cdf(BASIC_ACCURACY_MEAN, BASIC_ACCURACY_STD).unwrap();
        assert_eq!(cdf.len(), MAX_PHRED + 1);

        // Roughly half of the mass sits on the capped score
        let table = cdf.as_slice();
        let capped = 1.0 - table[MAX_PHRED - 1];
        assert!((0.4..0.6).contains(&capped), "P(q=40)={capped}");
        assert!(table[10] < 1e-6, "P(q<=10)={}", table[10]);
        assert!((0.1..0.3).contains(&table[20]), "P(q<=20)={}", table[20]);
    }

    #[test]
    fn test_basic_substitutions_change_base() {
        let model = builtin("basic").unwrap();
        let row = &model.strand(Strand::Forward).errors.substitutions()[0];
        let mut rng = StdRng::seed_from_u64(42);

        for (from, cdf) in row.iter().enumerate() {
            for _ in 0..50 {
                assert_ne!(cdf.choose(&mut rng), from);
            }
        }
    }
}
