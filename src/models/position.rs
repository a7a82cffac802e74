use serde::{Deserialize, Serialize};

/// Single location read handed out by the platform. Superseded, never merged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl GeoPosition {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self { latitude, longitude, altitude }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distance {
    pub meters: f64,
}

impl Distance {
    /// Whole meters as shown on screen.
    pub fn rounded_meters(&self) -> i64 {
        round_half_up(self.meters)
    }
}

/// Compass bearing in degrees, 0 to 360.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeadingSample {
    pub degrees: f32,
}

impl HeadingSample {
    pub fn new(degrees: f32) -> Self {
        Self { degrees }
    }

    pub fn rounded_degrees(&self) -> i64 {
        round_half_up(self.degrees as f64)
    }
}

/// Rounds .5 towards positive infinity, so -2.5 becomes -2.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
    }

    #[test]
    fn distance_rounds_to_whole_meters() {
        assert_eq!(Distance { meters: 111_195.08 }.rounded_meters(), 111_195);
        assert_eq!(Distance { meters: 0.4 }.rounded_meters(), 0);
    }

    #[test]
    fn heading_rounds_to_whole_degrees() {
        assert_eq!(HeadingSample::new(359.4).rounded_degrees(), 359);
        assert_eq!(HeadingSample::new(12.5).rounded_degrees(), 13);
    }
}
