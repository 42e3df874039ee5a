use crate::distributions::Cdf;
use rand::Rng;

/// Distribution of the extra gap between the end of the forward window and
/// the start of the reverse window.
///
/// The fragment spanned by a pair is `2 * read_len + gap`.
#[derive(Debug, Clone)]
pub struct InsertSizeModel {
    gaps: Cdf,
}

impl InsertSizeModel {
    pub fn new(gaps: Cdf) -> Self {
        Self { gaps }
    }

    /// Samples a gap length in bases.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        self.gaps.choose(rng)
    }

    /// Largest gap this model can produce.
    pub fn max_gap(&self) -> usize {
        self.gaps.len() - 1
    }

    pub fn cdf(&self) -> &Cdf {
        &self.gaps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_fixed_gap() {
        let mut weights = vec![0.0; 200];
        weights.push(1.0);
        let model = InsertSizeModel::new(Cdf::from_weights(&weights).unwrap());

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(model.sample(&mut rng), 200);
        }
        assert_eq!(model.max_gap(), 200);
    }

    #[test]
    fn test_deterministic_sampling() {
        let model = InsertSizeModel::new(Cdf::from_weights(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap());

        let mut rng1 = StdRng::seed_from_u64(12345);
        let samples1: Vec<usize> = (0..10).map(|_| model.sample(&mut rng1)).collect();

        let mut rng2 = StdRng::seed_from_u64(12345);
        let samples2: Vec<usize> = (0..10).map(|_| model.sample(&mut rng2)).collect();

        assert_eq!(samples1, samples2);
        assert!(samples1.iter().all(|&gap| gap <= 4));
    }
}
