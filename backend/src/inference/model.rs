use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use log::info;

use crate::inference::features::FEATURE_DIM;

/// Fixed multiplier converting the model's USD output into INR.
pub const USD_TO_INR: f32 = 83.5;

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("failed to load model artifact {path}: {reason}")]
    ArtifactLoad { path: String, reason: String },
    #[error("feature vector has {got} values, model expects {expected}")]
    ShapeMismatch { got: usize, expected: usize },
    #[error("model returned no prediction")]
    EmptyPrediction,
}

/// Wraps the externally trained regression model. The artifact is loaded
/// once at startup and shared read-only across workers; scoring takes
/// `&self`, so no locking is needed.
pub struct Predictor {
    model: GBDT,
    feature_dim: usize,
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("feature_dim", &self.feature_dim)
            .finish_non_exhaustive()
    }
}

impl Predictor {
    pub fn load(path: &str) -> Result<Self, PredictionError> {
        let model = GBDT::load_model(path).map_err(|e| PredictionError::ArtifactLoad {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        info!("loaded price model from {}", path);
        Ok(Self::from_model(model))
    }

    pub fn from_model(model: GBDT) -> Self {
        Self {
            model,
            feature_dim: FEATURE_DIM,
        }
    }

    /// Scores a single feature vector. No retries; a failed call surfaces
    /// immediately to the caller.
    pub fn predict(&self, features: &[f32]) -> Result<f32, PredictionError> {
        if features.len() != self.feature_dim {
            return Err(PredictionError::ShapeMismatch {
                got: features.len(),
                expected: self.feature_dim,
            });
        }

        let batch: DataVec = vec![Data::new_test_data(features.to_vec(), None)];
        let predictions = self.model.predict(&batch);
        predictions
            .first()
            .copied()
            .ok_or(PredictionError::EmptyPrediction)
    }

    /// Scores the vector and applies the fixed currency conversion,
    /// returning `(usd, inr)`.
    pub fn predict_price(&self, features: &[f32]) -> Result<(f32, f32), PredictionError> {
        let usd = self.predict(features)?;
        Ok((usd, usd * USD_TO_INR))
    }
}

/// Fits a small model on synthetic rows so tests can exercise the full
/// scoring path without a serialized artifact on disk.
#[cfg(test)]
pub(crate) fn test_predictor() -> Predictor {
    use gbdt::config::Config;

    let mut cfg = Config::new();
    cfg.set_feature_size(FEATURE_DIM);
    cfg.set_max_depth(3);
    cfg.set_iterations(20);
    cfg.set_shrinkage(0.3);
    cfg.set_loss("SquaredError");

    let mut training: DataVec = vec![
        Data::new_training_data(vec![800.0, 2.0, 0.0, 0.0], 1.0, 180000.0, None),
        Data::new_training_data(vec![1000.0, 3.0, 1.0, 0.0], 1.0, 210000.0, None),
        Data::new_training_data(vec![1200.0, 3.0, 0.0, 1.0], 1.0, 280000.0, None),
        Data::new_training_data(vec![1500.0, 4.0, 0.0, 0.0], 1.0, 300000.0, None),
        Data::new_training_data(vec![2000.0, 5.0, 1.0, 0.0], 1.0, 360000.0, None),
        Data::new_training_data(vec![2500.0, 5.0, 0.0, 1.0], 1.0, 450000.0, None),
        Data::new_training_data(vec![900.0, 2.0, 1.0, 0.0], 1.0, 190000.0, None),
        Data::new_training_data(vec![1800.0, 4.0, 0.0, 1.0], 1.0, 390000.0, None),
    ];

    let mut model = GBDT::new(&cfg);
    model.fit(&mut training);
    Predictor::from_model(model)
}
