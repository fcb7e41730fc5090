use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// The location categories the price model was trained on. Downtown is the
/// one-hot baseline: it sets neither indicator slot in the feature vector.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Location {
    Downtown,
    Suburb,
    Uptown,
}

/// Payload of an upload validation request. `contents` is a data-URL style
/// string, `"<content-type>,<base64 payload>"`, or absent when the user has
/// not picked a file yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadCheckRequest {
    pub contents: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadCheckResponse {
    pub message: String,
    pub form_visible: bool,
}

/// The form fields as the client last saw them. Fields are optional because
/// the server re-checks completeness rather than trusting the client's gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub n_clicks: u32,
    pub location: Option<String>,
    pub size: Option<f32>,
    pub rooms: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub price_usd: f32,
    pub price_inr: f32,
    pub price_usd_display: String,
    pub price_inr_display: String,
}
