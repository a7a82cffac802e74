use serde::Serialize;

use crate::models::position::{round_half_up, Distance, GeoPosition, HeadingSample};

/// The four read-only text surfaces of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DisplayKind {
    CurrentPosition,
    InitialPosition,
    Distance,
    CompassAngle,
}

/// Short-lived user message, shown once and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Notification {
    InitialPositionMarked,
    MarkInitialPositionFirst,
    PermissionRequired,
    NoLocationAvailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Portuguese,
}

impl Locale {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en_us" => Some(Locale::English),
            "pt" | "pt-br" | "pt_br" => Some(Locale::Portuguese),
            _ => None,
        }
    }

    pub fn label(&self, kind: DisplayKind) -> &'static str {
        match (self, kind) {
            (Locale::English, DisplayKind::CurrentPosition) => "Current position",
            (Locale::English, DisplayKind::InitialPosition) => "Initial position",
            (Locale::English, DisplayKind::Distance) => "Distance",
            (Locale::English, DisplayKind::CompassAngle) => "Compass angle",
            (Locale::Portuguese, DisplayKind::CurrentPosition) => "Posição atual",
            (Locale::Portuguese, DisplayKind::InitialPosition) => "Posição inicial",
            (Locale::Portuguese, DisplayKind::Distance) => "Distância",
            (Locale::Portuguese, DisplayKind::CompassAngle) => "Ângulo da bússola",
        }
    }

    pub fn message(&self, notification: Notification) -> &'static str {
        match (self, notification) {
            (Locale::English, Notification::InitialPositionMarked) => "Initial position marked",
            (Locale::English, Notification::MarkInitialPositionFirst) => "Mark the initial position first",
            (Locale::English, Notification::PermissionRequired) => "Location permission is required",
            (Locale::English, Notification::NoLocationAvailable) => "No location available yet",
            (Locale::Portuguese, Notification::InitialPositionMarked) => "Posição inicial marcada",
            (Locale::Portuguese, Notification::MarkInitialPositionFirst) => "Marque a posição inicial primeiro",
            (Locale::Portuguese, Notification::PermissionRequired) => "A permissão de localização é necessária",
            (Locale::Portuguese, Notification::NoLocationAvailable) => "Nenhuma localização disponível ainda",
        }
    }

    /// Text a display shows before anything was written to it.
    pub fn placeholder(&self, kind: DisplayKind) -> String {
        format!("{}\n-", self.label(kind))
    }

    pub fn format_position(&self, kind: DisplayKind, position: &GeoPosition) -> String {
        format!(
            "{}\nLat: {:?}\nLon: {:?}\nAlt: {}m",
            self.label(kind),
            position.latitude,
            position.longitude,
            round_half_up(position.altitude)
        )
    }

    pub fn format_distance(&self, distance: &Distance) -> String {
        format!("{}: {} m", self.label(DisplayKind::Distance), distance.rounded_meters())
    }

    pub fn format_heading(&self, heading: &HeadingSample) -> String {
        format!("{}\n{}°", self.label(DisplayKind::CompassAngle), heading.rounded_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_position_block() {
        let text = Locale::English.format_position(
            DisplayKind::CurrentPosition,
            &GeoPosition::new(-23.5505, -46.6333, 760.6),
        );
        assert_eq!(text, "Current position\nLat: -23.5505\nLon: -46.6333\nAlt: 761m");
    }

    #[test]
    fn keeps_fractional_zero_in_coordinates() {
        let text = Locale::English.format_position(DisplayKind::InitialPosition, &GeoPosition::new(0.0, 1.0, 0.0));
        assert_eq!(text, "Initial position\nLat: 0.0\nLon: 1.0\nAlt: 0m");
    }

    #[test]
    fn every_string_follows_the_locale() {
        let pt = Locale::Portuguese;
        assert_eq!(pt.format_distance(&Distance { meters: 111_195.08 }), "Distância: 111195 m");
        assert_eq!(pt.format_heading(&HeadingSample::new(90.2)), "Ângulo da bússola\n90°");
        assert_eq!(pt.message(Notification::MarkInitialPositionFirst), "Marque a posição inicial primeiro");
        assert_eq!(Locale::English.message(Notification::MarkInitialPositionFirst), "Mark the initial position first");
    }

    #[test]
    fn parses_locale_tags() {
        assert_eq!(Locale::from_tag("pt-BR"), Some(Locale::Portuguese));
        assert_eq!(Locale::from_tag(" en "), Some(Locale::English));
        assert_eq!(Locale::from_tag("fr"), None);
    }
}
