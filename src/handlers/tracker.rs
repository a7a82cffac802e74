use crate::models::error::ScreenError;
use crate::models::position::{Distance, GeoPosition};

/// IUGG mean Earth radius in meters.
pub const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

/// Haversine great-circle distance in meters. Altitude is ignored.
pub fn great_circle_distance(from: &GeoPosition, to: &GeoPosition) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let delta_phi = (to.latitude - from.latitude).to_radians();
    let delta_lambda = (to.longitude - from.longitude).to_radians();

    // Rounding can push `a` just past 1.0 for antipodal points.
    let a = ((delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    MEAN_EARTH_RADIUS * c
}

/// Holds the marked reference position for the lifetime of the screen.
#[derive(Debug, Default)]
pub struct PositionTracker {
    reference: Option<GeoPosition>,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reference(&self) -> Option<&GeoPosition> {
        self.reference.as_ref()
    }

    pub fn mark_reference(&mut self, position: GeoPosition) {
        self.reference = Some(position);
    }

    pub fn compute_distance(&self, current: &GeoPosition) -> Result<Distance, ScreenError> {
        let reference = self.reference.as_ref().ok_or(ScreenError::NoReferenceSet)?;
        Ok(Distance { meters: great_circle_distance(reference, current) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [GeoPosition; 5] = [
        GeoPosition { latitude: 0.0, longitude: 0.0, altitude: 0.0 },
        GeoPosition { latitude: -23.5505, longitude: -46.6333, altitude: 760.0 },
        GeoPosition { latitude: 51.4779, longitude: -0.0015, altitude: 46.0 },
        GeoPosition { latitude: 89.9, longitude: 179.9, altitude: 0.0 },
        GeoPosition { latitude: -33.8688, longitude: 151.2093, altitude: 58.0 },
    ];

    fn tracker_at(reference: GeoPosition) -> PositionTracker {
        let mut tracker = PositionTracker::new();
        tracker.mark_reference(reference);
        tracker
    }

    #[test]
    fn refuses_without_reference() {
        let tracker = PositionTracker::new();
        assert_eq!(tracker.compute_distance(&SAMPLES[0]), Err(ScreenError::NoReferenceSet));
    }

    #[test]
    fn same_point_is_zero() {
        for sample in SAMPLES {
            let distance = tracker_at(sample).compute_distance(&sample).unwrap();
            assert_eq!(distance.rounded_meters(), 0);
        }
    }

    #[test]
    fn symmetric_under_swap() {
        for a in SAMPLES {
            for b in SAMPLES {
                let ab = tracker_at(a).compute_distance(&b).unwrap().meters;
                let ba = tracker_at(b).compute_distance(&a).unwrap().meters;
                assert!((ab - ba).abs() < 1e-6, "{:?} {:?}: {} vs {}", a, b, ab, ba);
            }
        }
    }

    #[test]
    fn one_degree_of_longitude_on_the_equator() {
        let distance = tracker_at(GeoPosition::new(0.0, 0.0, 0.0))
            .compute_distance(&GeoPosition::new(0.0, 1.0, 0.0))
            .unwrap();
        assert_eq!(distance.rounded_meters(), 111_195);
    }

    #[test]
    fn antipodal_points_are_half_the_circumference() {
        let half_circumference = std::f64::consts::PI * MEAN_EARTH_RADIUS;
        for i in -900..=900 {
            let latitude = i as f64 / 10.0;
            let from = GeoPosition::new(latitude, 20.0, 0.0);
            let to = GeoPosition::new(-latitude, -160.0, 0.0);
            let meters = great_circle_distance(&from, &to);
            assert!(meters.is_finite(), "non-finite distance at latitude {}", latitude);
            assert!((meters - half_circumference).abs() < 1.0, "latitude {}: {} m", latitude, meters);
        }
    }

    #[test]
    fn near_antipodal_points_stay_finite() {
        for i in -899..=899 {
            let latitude = i as f64 / 10.0 + 0.1;
            let from = GeoPosition::new(latitude, 20.0, 0.0);
            let to = GeoPosition::new(-latitude, -160.0, 0.0);
            let distance = tracker_at(from).compute_distance(&to).unwrap();
            assert!(distance.meters.is_finite(), "non-finite distance at latitude {}", latitude);
            assert!(distance.rounded_meters() > 20_000_000, "latitude {}: {} m", latitude, distance.meters);
        }
    }

    #[test]
    fn altitude_does_not_count() {
        let distance = tracker_at(GeoPosition::new(10.0, 10.0, 0.0))
            .compute_distance(&GeoPosition::new(10.0, 10.0, 8_000.0))
            .unwrap();
        assert_eq!(distance.rounded_meters(), 0);
    }

    #[test]
    fn second_mark_replaces_first() {
        let mut tracker = tracker_at(GeoPosition::new(0.0, 0.0, 0.0));
        tracker.mark_reference(GeoPosition::new(0.0, 1.0, 0.0));
        assert_eq!(tracker.reference(), Some(&GeoPosition::new(0.0, 1.0, 0.0)));
        let distance = tracker.compute_distance(&GeoPosition::new(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(distance.rounded_meters(), 0);
    }
}
