use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// longitude is x, latitude is y
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct LonLat {
    pub longitude: f32,
    pub latitude: f32,
}

impl LonLat {
    pub fn new(lon: f32, lat: f32) -> LonLat {
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }

    /// `[longitude, latitude]`
    pub fn to_array(self) -> [f32; 2] {
        [self.longitude, self.latitude]
    }

    /// Degrees, minutes, seconds, and thousandths of a second, latitude first. For example,
    /// `N039.51.39.243,W075.16.29.511`.
    ///
    /// Every stage truncates; nothing is ever rounded up into the next unit. Zero is treated as
    /// south and west.
    pub fn to_dms_string(self) -> String {
        let mut s = String::with_capacity(29);
        s.push(if self.latitude > 0.0 { 'N' } else { 'S' });
        s.push_str(&dms_component(self.latitude.abs()));
        s.push_str(if self.longitude > 0.0 { ",E" } else { ",W" });
        s.push_str(&dms_component(self.longitude.abs()));
        s
    }

    /// The inverse of `to_dms_string`, good to about a thousandth of an arc-second.
    pub fn parse_dms(input: &str) -> Result<LonLat> {
        let (lat, lon) = match input.split_once(',') {
            Some(pair) => pair,
            None => bail!("{} isn't a latitude,longitude pair", input),
        };
        let latitude = parse_dms_component(lat, 'N', 'S')
            .with_context(|| format!("bad latitude in {}", input))?;
        let longitude = parse_dms_component(lon, 'E', 'W')
            .with_context(|| format!("bad longitude in {}", input))?;
        Ok(LonLat::new(longitude, latitude))
    }
}

// The magnitude must already be non-negative, so truncating and flooring agree.
fn dms_component(mut v: f32) -> String {
    let mut s = format!("{:03}", v as i32);
    v -= v.floor();
    v *= 60.0;
    s.push_str(&format!(".{:02}", v as i32));
    v -= v.floor();
    v *= 60.0;
    s.push_str(&format!(".{:02}", v as i32));
    v -= v.floor();
    v *= 1000.0;
    s.push_str(&format!(".{:03}", v as i32));
    s
}

fn parse_dms_component(input: &str, positive: char, negative: char) -> Result<f32> {
    let mut chars = input.chars();
    let sign = match chars.next() {
        Some(c) if c == positive => 1.0,
        Some(c) if c == negative => -1.0,
        _ => bail!("{} should start with {} or {}", input, positive, negative),
    };
    let parts: Vec<&str> = chars.as_str().split('.').collect();
    if parts.len() != 4 {
        bail!("{} should look like 000.00.00.000", input);
    }
    let mut nums = [0.0_f64; 4];
    for (num, part) in nums.iter_mut().zip(parts) {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            bail!("{} has a non-numeric piece {:?}", input, part);
        }
        *num = part.parse::<f64>()?;
    }
    let [deg, min, sec, millis] = nums;
    let degrees = deg + min / 60.0 + sec / 3600.0 + millis / 3_600_000.0;
    Ok((sign * degrees) as f32)
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_dms_string())
    }
}

// Consumers of the JSON want a single DMS token per point, not a pair of numbers.
impl Serialize for LonLat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_dms_string())
    }
}

impl<'de> Deserialize<'de> for LonLat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<LonLat, D::Error> {
        let raw = String::deserialize(deserializer)?;
        LonLat::parse_dms(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GPSBounds {
    pub min_lon: f32,
    pub min_lat: f32,
    pub max_lon: f32,
    pub max_lat: f32,
}

impl GPSBounds {
    pub fn new() -> GPSBounds {
        GPSBounds {
            min_lon: f32::MAX,
            min_lat: f32::MAX,
            max_lon: f32::MIN,
            max_lat: f32::MIN,
        }
    }

    pub fn update(&mut self, pt: LonLat) {
        self.min_lon = self.min_lon.min(pt.longitude);
        self.max_lon = self.max_lon.max(pt.longitude);
        self.min_lat = self.min_lat.min(pt.latitude);
        self.max_lat = self.max_lat.max(pt.latitude);
    }

    /// True until something has been added
    pub fn is_empty(&self) -> bool {
        self.min_lon > self.max_lon
    }
}

impl Default for GPSBounds {
    fn default() -> Self {
        GPSBounds::new()
    }
}

impl fmt::Display for GPSBounds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "GPSBounds(empty)");
        }
        write!(
            f,
            "GPSBounds({} to {})",
            LonLat::new(self.min_lon, self.min_lat),
            LonLat::new(self.max_lon, self.max_lat)
        )
    }
}
