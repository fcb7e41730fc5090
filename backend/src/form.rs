use std::str::FromStr;

use shared::{Location, PredictionResult};

use crate::inference::features::encode;
use crate::inference::model::Predictor;

pub const FILL_ALL_FIELDS: &str = "Please fill all fields to get a prediction.";

/// What the result block should render after a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRender {
    /// No submission has happened yet; render nothing.
    Empty,
    Error(String),
    Success(PredictionResult),
}

/// The submit action is allowed only once every field has a value. Presence
/// is the only rule here; zero or negative numbers pass the gate and are
/// left to the predictor stage.
pub fn submit_enabled(location: Option<&str>, size: Option<f32>, rooms: Option<f32>) -> bool {
    location.is_some_and(|l| !l.trim().is_empty()) && size.is_some() && rooms.is_some()
}

/// Runs one submit attempt: gate on completeness, encode the fields and
/// score them. Every failure is converted to a user-visible message; the
/// user may resubmit after changing fields.
pub fn submit(
    predictor: &Predictor,
    n_clicks: u32,
    location: Option<&str>,
    size: Option<f32>,
    rooms: Option<f32>,
) -> SubmitRender {
    if n_clicks == 0 {
        return SubmitRender::Empty;
    }

    if !submit_enabled(location, size, rooms) {
        return SubmitRender::Error(FILL_ALL_FIELDS.to_string());
    }
    let (Some(location), Some(size), Some(rooms)) = (location, size, rooms) else {
        return SubmitRender::Error(FILL_ALL_FIELDS.to_string());
    };

    // Unknown categories are rejected rather than silently encoded as the
    // Downtown baseline.
    let location = match Location::from_str(location.trim()) {
        Ok(location) => location,
        Err(_) => {
            return SubmitRender::Error(format!(
                "Unknown location \"{}\"; expected Downtown, Suburb or Uptown.",
                location.trim()
            ));
        }
    };

    let features = encode(location, size, rooms);
    match predictor.predict_price(&features) {
        Ok((usd, inr)) => SubmitRender::Success(PredictionResult {
            price_usd: usd,
            price_inr: inr,
            price_usd_display: format!("${}", format_currency(usd as f64)),
            price_inr_display: format!("₹{}", format_currency(inr as f64)),
        }),
        Err(e) => SubmitRender::Error(format!("Prediction failed: {}", e)),
    }
}

/// Formats a value with two decimal places and thousands separators,
/// e.g. `16700000.0` becomes `"16,700,000.00"`.
pub fn format_currency(value: f64) -> String {
    let magnitude = format!("{:.2}", value.abs());
    let (int_part, frac_part) = magnitude.split_once('.').unwrap_or((magnitude.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}
