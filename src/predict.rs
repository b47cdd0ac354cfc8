//! The opaque classifier boundary.
//!
//! The pipeline only ever talks to [`Predictor`]; it hands over the
//! assembler's vector in the assembler's column order and gets back a
//! label and a positive-class probability. `LogisticModel` is the shipped
//! implementation, loading a weights artifact exported from training.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::error::PredictorError;
use crate::schema::FEATURE_COUNT;

/// Classifier output: `label` 1 means predicted attrition, `probability`
/// is the positive-class probability in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: i32,
    pub probability: f64,
}

pub trait Predictor {
    fn predict(&self, features: &[f64]) -> Result<Prediction, PredictorError>;
}

/// Logistic-regression scorer over the 37-column feature vector. The
/// artifact is a JSON file with `weights` (one per column, schema order)
/// and `bias`, exported from the training run.
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticModel {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl LogisticModel {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read model artifact {}", path.display()))?;
        let model: LogisticModel = serde_json::from_str(&raw)
            .with_context(|| format!("malformed model artifact {}", path.display()))?;
        anyhow::ensure!(
            model.weights.len() == FEATURE_COUNT,
            "model artifact carries {} weights, schema expects {}",
            model.weights.len(),
            FEATURE_COUNT
        );
        Ok(model)
    }

    /// All-zero model: every input scores probability 0.5. Handy as a
    /// stand-in before a real artifact is exported.
    pub fn zeroed() -> Self {
        LogisticModel {
            weights: vec![0.0; FEATURE_COUNT],
            bias: 0.0,
        }
    }
}

impl Predictor for LogisticModel {
    fn predict(&self, features: &[f64]) -> Result<Prediction, PredictorError> {
        if features.len() != self.weights.len() {
            return Err(PredictorError::DimensionMismatch {
                expected: self.weights.len(),
                actual: features.len(),
            });
        }

        let logit: f64 = self
            .weights
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;
        let probability = 1.0 / (1.0 + (-logit).exp());

        if !(0.0..=1.0).contains(&probability) {
            return Err(PredictorError::ProbabilityOutOfRange(probability));
        }

        Ok(Prediction {
            label: i32::from(probability >= 0.5),
            probability,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_model_scores_one_half() {
        let model = LogisticModel::zeroed();
        let prediction = model.predict(&vec![3.0; FEATURE_COUNT]).unwrap();
        assert!((prediction.probability - 0.5).abs() < 1e-12);
        assert_eq!(prediction.label, 1);
    }

    #[test]
    fn weights_move_the_probability_the_right_way() {
        let mut model = LogisticModel::zeroed();
        model.weights[0] = 2.0;
        let mut features = vec![0.0; FEATURE_COUNT];

        features[0] = 3.0;
        let up = model.predict(&features).unwrap();
        assert!(up.probability > 0.99);
        assert_eq!(up.label, 1);

        features[0] = -3.0;
        let down = model.predict(&features).unwrap();
        assert!(down.probability < 0.01);
        assert_eq!(down.label, 0);
    }

    #[test]
    fn rejects_a_wrong_length_vector() {
        let model = LogisticModel::zeroed();
        let err = model.predict(&[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            PredictorError::DimensionMismatch {
                expected: FEATURE_COUNT,
                actual: 2,
            }
        );
    }
}
