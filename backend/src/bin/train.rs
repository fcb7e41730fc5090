//! Trains the price model from a CSV dataset and serializes it for the
//! server to load at startup.

use std::error::Error;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use shared::Location;

const TEST_FRACTION: f64 = 0.2;
const SPLIT_SEED: u64 = 42;
const FEATURE_DIM: usize = 4;

#[derive(Debug, Deserialize)]
struct Row {
    location: String,
    size: Option<f32>,
    rooms: Option<f32>,
    price: Option<f32>,
}

struct Sample {
    features: Vec<f32>,
    price: f32,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let data_path =
        std::env::var("DATA_PATH").unwrap_or_else(|_| "data/real_estate_data.csv".to_string());
    let model_path =
        std::env::var("MODEL_PATH").unwrap_or_else(|_| "models/price_model.gbdt".to_string());

    let samples = load_dataset(&data_path)?;
    info!("loaded {} usable rows from {}", samples.len(), data_path);
    if samples.is_empty() {
        return Err("dataset contains no usable rows".into());
    }

    let (train, test) = train_test_split(samples, TEST_FRACTION);
    info!("split into {} train / {} test rows", train.len(), test.len());

    let mut cfg = Config::new();
    cfg.set_feature_size(FEATURE_DIM);
    cfg.set_max_depth(4);
    cfg.set_iterations(100);
    cfg.set_shrinkage(0.1);
    cfg.set_loss("SquaredError");

    let mut training: DataVec = train
        .iter()
        .map(|s| Data::new_training_data(s.features.clone(), 1.0, s.price, None))
        .collect();
    let mut model = GBDT::new(&cfg);
    model.fit(&mut training);

    if !test.is_empty() {
        let holdout: DataVec = test
            .iter()
            .map(|s| Data::new_test_data(s.features.clone(), None))
            .collect();
        let predictions = model.predict(&holdout);
        let mse: f64 = predictions
            .iter()
            .zip(&test)
            .map(|(p, s)| {
                let err = (*p - s.price) as f64;
                err * err
            })
            .sum::<f64>()
            / test.len() as f64;
        info!("Model trained successfully. MSE: {:.2}", mse);
    }

    if let Some(parent) = Path::new(&model_path).parent() {
        fs::create_dir_all(parent)?;
    }
    model
        .save_model(&model_path)
        .map_err(|e| format!("failed to save model: {}", e))?;
    info!("Model saved at: {}", model_path);
    Ok(())
}

/// Loads the raw dataset and one-hot encodes the location column into the
/// `[size, rooms, location_Suburb, location_Uptown]` feature order. Rows
/// with missing values or an unknown category are dropped.
fn load_dataset(path: &str) -> Result<Vec<Sample>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut samples = Vec::new();
    let mut dropped = 0usize;

    for row in reader.deserialize::<Row>() {
        let row = row?;
        let (Some(size), Some(rooms), Some(price)) = (row.size, row.rooms, row.price) else {
            dropped += 1;
            continue;
        };
        let Ok(location) = Location::from_str(row.location.trim()) else {
            warn!("dropping row with unknown location {:?}", row.location);
            dropped += 1;
            continue;
        };

        let suburb = if location == Location::Suburb { 1.0 } else { 0.0 };
        let uptown = if location == Location::Uptown { 1.0 } else { 0.0 };
        samples.push(Sample {
            features: vec![size, rooms, suburb, uptown],
            price,
        });
    }

    if dropped > 0 {
        info!("dropped {} incomplete or unrecognized rows", dropped);
    }
    Ok(samples)
}

/// Deterministic shuffled split, seeded so reruns produce the same model.
fn train_test_split(mut samples: Vec<Sample>, test_fraction: f64) -> (Vec<Sample>, Vec<Sample>) {
    let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
    samples.shuffle(&mut rng);
    let test_len = (samples.len() as f64 * test_fraction).round() as usize;
    let train = samples.split_off(test_len);
    (train, samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(n: usize) -> Vec<Sample> {
        (0..n)
            .map(|i| Sample {
                features: vec![i as f32, 2.0, 0.0, 0.0],
                price: 1000.0 * i as f32,
            })
            .collect()
    }

    #[test]
    fn split_respects_the_test_fraction() {
        let (train, test) = train_test_split(samples(10), 0.2);
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);
    }

    #[test]
    fn split_is_deterministic() {
        let (train_a, _) = train_test_split(samples(20), 0.2);
        let (train_b, _) = train_test_split(samples(20), 0.2);
        let prices_a: Vec<f32> = train_a.iter().map(|s| s.price).collect();
        let prices_b: Vec<f32> = train_b.iter().map(|s| s.price).collect();
        assert_eq!(prices_a, prices_b);
    }
}
