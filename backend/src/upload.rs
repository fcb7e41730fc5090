use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::info;
use shared::UploadCheckResponse;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("payload is not a data URL (no content-type prefix)")]
    MalformedPayload,
    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("file is not valid UTF-8 text: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("spreadsheet parse failed: {0}")]
    Spreadsheet(#[from] csv::Error),
}

/// Validates an uploaded payload and decides whether the input form should
/// be shown. Pure function of the payload bytes, so re-validating the same
/// upload always yields the same response. The parsed table itself is
/// discarded; only the outcome propagates.
pub fn validate_upload(contents: Option<&str>) -> UploadCheckResponse {
    let Some(contents) = contents else {
        return UploadCheckResponse {
            message: String::new(),
            form_visible: false,
        };
    };

    match parse_spreadsheet(contents) {
        Ok(rows) => {
            info!("upload accepted ({} data rows)", rows);
            UploadCheckResponse {
                message: "Spreadsheet uploaded successfully! You can now enter details and predict."
                    .to_string(),
                form_visible: true,
            }
        }
        Err(e) => UploadCheckResponse {
            message: format!("Error reading spreadsheet: {}", e),
            form_visible: false,
        },
    }
}

/// Splits the data-URL payload on its first comma, base64-decodes the rest
/// and parses it as a CSV table with strict record lengths. Returns the
/// number of data rows.
fn parse_spreadsheet(contents: &str) -> Result<usize, UploadError> {
    let (_content_type, encoded) = contents
        .split_once(',')
        .ok_or(UploadError::MalformedPayload)?;
    let decoded = BASE64.decode(encoded.trim())?;
    let text = std::str::from_utf8(&decoded)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let mut rows = 0usize;
    for record in reader.records() {
        record?;
        rows += 1;
    }
    Ok(rows)
}
