use crate::error::CdfError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Discrete distribution over `0..n` stored as a cumulative probability table.
///
/// The probability of outcome `i` is `a[i] - a[i-1]` (with `a[-1] = 0`).
/// Tables are validated once at construction and never change afterwards,
/// so a `Cdf` can be shared freely between threads.
///
/// Serializes as a plain JSON array and validates on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Cdf {
    values: Vec<f64>,
}

impl Cdf {
    /// Creates a distribution from a cumulative probability table.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The table is empty
    /// - The last entry is not exactly 1
    /// - Any entry is negative (or NaN)
    /// - Any adjacent pair decreases
    ///
    /// # Example
    /// ```
    /// use pairsim::distributions::Cdf;
    ///
    /// let cdf = Cdf::new(vec![0.25, 0.5, 1.0]).unwrap();
    /// assert_eq!(cdf.index_of(0.3), 1);
    ///
    /// assert!(Cdf::new(vec![0.5, 0.25, 1.0]).is_err());
    /// ```
    pub fn new(values: impl Into<Vec<f64>>) -> Result<Self, CdfError> {
        let values = values.into();

        let Some(&last) = values.last() else {
            return Err(CdfError::Empty);
        };
        if last != 1.0 {
            return Err(CdfError::LastNotOne(last));
        }
        for (index, &value) in values.iter().enumerate() {
            // Negated comparison so NaN is rejected too
            if !(value >= 0.0) {
                return Err(CdfError::Negative { index, value });
            }
            if index > 0 && values[index - 1] > value {
                return Err(CdfError::Decreasing {
                    index: index - 1,
                    previous: values[index - 1],
                    next: value,
                });
            }
        }

        Ok(Self { values })
    }

    /// Creates a distribution from non-negative weights, one per outcome.
    ///
    /// Weights are accumulated and normalized by their total, so the last
    /// entry is exactly 1.
    ///
    /// # Errors
    /// Returns an error if the weights are empty, negative, or sum to zero.
    pub fn from_weights(weights: &[f64]) -> Result<Self, CdfError> {
        if weights.is_empty() {
            return Err(CdfError::Empty);
        }
        if let Some((index, &value)) = weights.iter().enumerate().find(|(_, w)| !(**w >= 0.0)) {
            return Err(CdfError::Negative { index, value });
        }

        let mut cumulative: Vec<f64> = weights
            .iter()
            .scan(0.0, |sum, &w| {
                *sum += w;
                Some(*sum)
            })
            .collect();

        let total = cumulative[cumulative.len() - 1];
        if !(total > 0.0 && total.is_finite()) {
            return Err(CdfError::ZeroMass(total));
        }
        for value in &mut cumulative {
            *value /= total;
        }

        Self::new(cumulative)
    }

    /// Returns the smallest index whose cumulative probability is at least `p`.
    ///
    /// This is the deterministic half of [`Cdf::choose`]: for `p` in `[0, 1)`
    /// it returns the unique `i` with `a[i] >= p` and (`i == 0` or `a[i-1] < p`).
    pub fn index_of(&self, p: f64) -> usize {
        self.values
            .partition_point(|&v| v < p)
            .min(self.values.len() - 1)
    }

    /// Samples an outcome by inverse transform of a uniform draw.
    ///
    /// # Arguments
    /// * `rng` - Random number generator
    ///
    /// # Returns
    /// An outcome index in `0..self.len()`
    pub fn choose<R: Rng>(&self, rng: &mut R) -> usize {
        self.index_of(rng.random::<f64>())
    }

    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a validated distribution.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Cumulative probabilities, one per outcome.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl TryFrom<Vec<f64>> for Cdf {
    type Error = CdfError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<Cdf> for Vec<f64> {
    fn from(cdf: Cdf) -> Self {
        cdf.values
    }
}
