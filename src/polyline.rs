//! Polyline representation for segment geometries.
//!
//! The optimizer only knows straight lines between stops. Road-following
//! geometry comes from routing services outside this crate and replaces
//! the straight line on the segment.
//!
//! On the wire a polyline is the encoded polyline string used by map
//! clients (five decimal places, zigzag deltas in 5-bit chunks offset by
//! 63), so `{"polyline":"_p~iF~ps|U_ulLnnqC"}` reads and writes as-is.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PolylineError;
use crate::haversine::haversine_km;
use crate::model::Coordinate;

const PRECISION: f64 = 1e5;

/// A polyline as decoded (latitude, longitude) points.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Two-point straight line from `from` to `to`.
    pub fn straight(from: Coordinate, to: Coordinate) -> Self {
        Self::new(vec![from.as_tuple(), to.as_tuple()])
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    /// Sum of great-circle distances between consecutive points.
    pub fn length_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| haversine_km(pair[0].into(), pair[1].into()))
            .sum()
    }

    /// Encoded polyline string; coordinates are rounded to 1e-5 degrees.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(self.points.len() * 8);
        let (mut prev_lat, mut prev_lng) = (0_i64, 0_i64);

        for &(lat, lng) in &self.points {
            let lat = (lat * PRECISION).round() as i64;
            let lng = (lng * PRECISION).round() as i64;
            encode_value(lat.wrapping_sub(prev_lat), &mut out);
            encode_value(lng.wrapping_sub(prev_lng), &mut out);
            (prev_lat, prev_lng) = (lat, lng);
        }

        out
    }

    /// Parse an encoded polyline string.
    pub fn decode(encoded: &str) -> Result<Self, PolylineError> {
        let bytes = encoded.as_bytes();
        let mut offset = 0;
        let (mut lat, mut lng) = (0_i64, 0_i64);
        let mut points = Vec::new();

        while offset < bytes.len() {
            lat = lat.wrapping_add(decode_value(bytes, &mut offset)?);
            lng = lng.wrapping_add(decode_value(bytes, &mut offset)?);
            points.push((lat as f64 / PRECISION, lng as f64 / PRECISION));
        }

        Ok(Self { points })
    }
}

fn encode_value(delta: i64, out: &mut String) {
    let mut value = ((delta << 1) ^ (delta >> 63)) as u64;
    while value >= 0x20 {
        out.push(char::from(((0x20 | (value & 0x1f)) + 63) as u8));
        value >>= 5;
    }
    out.push(char::from((value + 63) as u8));
}

fn decode_value(bytes: &[u8], offset: &mut usize) -> Result<i64, PolylineError> {
    let start = *offset;
    let mut value = 0_u64;
    let mut shift = 0_u32;

    loop {
        let Some(&byte) = bytes.get(*offset) else {
            return Err(PolylineError::Truncated { offset: *offset });
        };
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidByte { offset: *offset, byte });
        }
        if shift >= 64 {
            return Err(PolylineError::Overflow { offset: start });
        }

        let chunk = u64::from(byte - 63);
        value |= (chunk & 0x1f) << shift;
        *offset += 1;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(((value >> 1) as i64) ^ -((value & 1) as i64))
}

impl Serialize for Polyline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Polyline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Polyline::decode(&encoded).map_err(serde::de::Error::custom)
    }
}
