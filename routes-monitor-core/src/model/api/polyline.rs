//! decoder for the encoded polyline format returned by the Routes API.
//! see [https://developers.google.com/maps/documentation/utilities/polylinealgorithm]
use geo::{Coord, LineString};

use super::RoutesApiError;

const PRECISION: f64 = 1e5;
const MAX_LATITUDE: i64 = 90 * 100_000;
const MAX_LONGITUDE: i64 = 180 * 100_000;

/// decodes an encoded polyline into a LineString with x=longitude, y=latitude.
pub fn decode(encoded: &str) -> Result<LineString<f64>, RoutesApiError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut coords: Vec<Coord<f64>> = vec![];
    while index < bytes.len() {
        let start = index;
        lat = accumulate(lat, next_value(bytes, &mut index)?, MAX_LATITUDE, start)?;
        lng = accumulate(lng, next_value(bytes, &mut index)?, MAX_LONGITUDE, start)?;
        coords.push(Coord {
            x: lng as f64 / PRECISION,
            y: lat as f64 / PRECISION,
        });
    }
    Ok(LineString::new(coords))
}

/// adds a delta to a running coordinate, rejecting results beyond `limit` in either direction.
fn accumulate(total: i64, delta: i64, limit: i64, index: usize) -> Result<i64, RoutesApiError> {
    total
        .checked_add(delta)
        .filter(|v| (-limit..=limit).contains(v))
        .ok_or_else(|| {
            RoutesApiError::InvalidPolylineError(format!("coordinate out of range at {index}"))
        })
}

/// reads one zig-zag encoded, 5-bit chunked signed value starting at `index`.
fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, RoutesApiError> {
    let mut result: i64 = 0;
    let mut shift = 0;
    loop {
        let byte = *bytes.get(*index).ok_or_else(|| {
            RoutesApiError::InvalidPolylineError(format!("unexpected end of input at {index}"))
        })?;
        if !(63..=126).contains(&byte) {
            return Err(RoutesApiError::InvalidPolylineError(format!(
                "invalid character '{}' at {index}",
                byte as char
            )));
        }
        if shift > 60 {
            return Err(RoutesApiError::InvalidPolylineError(format!(
                "value overflow at {index}"
            )));
        }
        let chunk = (byte - 63) as i64;
        *index += 1;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }
    if result & 1 != 0 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}
