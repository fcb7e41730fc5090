use shared::Location;

/// Width of the model's input: size, rooms, and the two location indicators.
pub const FEATURE_DIM: usize = 4;

/// One-hot encodes the form fields into the fixed feature order the model
/// was trained on: `[size, rooms, location_Suburb, location_Uptown]`.
/// Downtown is the baseline category and leaves both indicators at zero.
pub fn encode(location: Location, size: f32, rooms: f32) -> [f32; FEATURE_DIM] {
    let suburb = if location == Location::Suburb { 1.0 } else { 0.0 };
    let uptown = if location == Location::Uptown { 1.0 } else { 0.0 };
    [size, rooms, suburb, uptown]
}
