use std::time::Duration;

use tracing::warn;

use crate::models::display::Locale;
use crate::models::error::ErrorWithMessage;

/// Whether a failure the user caused no visible change for gets a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackPolicy {
    /// Drop the action without telling the user.
    #[default]
    Silent,
    Notify,
}

impl FeedbackPolicy {
    fn parse(value: &str) -> Result<Self, ErrorWithMessage> {
        match value.trim().to_ascii_lowercase().as_str() {
            "silent" => Ok(FeedbackPolicy::Silent),
            "notify" => Ok(FeedbackPolicy::Notify),
            other => Err(ErrorWithMessage::new(format!("unknown feedback policy '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfig {
    pub locale: Locale,
    pub permission_feedback: FeedbackPolicy,
    pub no_fix_feedback: FeedbackPolicy,
    /// `None` waits for the provider forever.
    pub fetch_timeout: Option<Duration>,
    pub has_orientation_sensor: bool,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            permission_feedback: FeedbackPolicy::Silent,
            no_fix_feedback: FeedbackPolicy::Silent,
            fetch_timeout: None,
            has_orientation_sensor: true,
        }
    }
}

impl ScreenConfig {
    pub fn init() -> ScreenConfig {
        Self::parse(|key| std::env::var(key).ok())
    }

    /// Builds the config from a key lookup. Bad values keep their default.
    pub fn parse<F>(lookup: F) -> ScreenConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ScreenConfig::default();

        if let Some(tag) = lookup("GPS_LOCALE") {
            match Locale::from_tag(&tag) {
                Some(locale) => config.locale = locale,
                None => warn!("GPS_LOCALE: unsupported locale '{}', using default", tag),
            }
        }

        if let Some(value) = lookup("GPS_PERMISSION_FEEDBACK") {
            match FeedbackPolicy::parse(&value) {
                Ok(policy) => config.permission_feedback = policy,
                Err(e) => warn!("GPS_PERMISSION_FEEDBACK: {}, using default", e),
            }
        }

        if let Some(value) = lookup("GPS_NO_FIX_FEEDBACK") {
            match FeedbackPolicy::parse(&value) {
                Ok(policy) => config.no_fix_feedback = policy,
                Err(e) => warn!("GPS_NO_FIX_FEEDBACK: {}, using default", e),
            }
        }

        if let Some(value) = lookup("GPS_FETCH_TIMEOUT_MS") {
            match value.trim().parse::<u64>() {
                Ok(ms) => config.fetch_timeout = Some(Duration::from_millis(ms)),
                Err(e) => warn!("GPS_FETCH_TIMEOUT_MS: {}, waiting without timeout", e),
            }
        }

        if let Some(value) = lookup("GPS_SENSOR") {
            match value.trim().to_ascii_lowercase().as_str() {
                "on" => config.has_orientation_sensor = true,
                "off" => config.has_orientation_sensor = false,
                other => warn!("GPS_SENSOR: expected on/off, got '{}'", other),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn parse(pairs: &[(&str, &str)]) -> ScreenConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ScreenConfig::parse(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_keep_silent_parity() {
        let config = parse(&[]);
        assert_eq!(config, ScreenConfig::default());
        assert_eq!(config.permission_feedback, FeedbackPolicy::Silent);
        assert_eq!(config.no_fix_feedback, FeedbackPolicy::Silent);
        assert_eq!(config.fetch_timeout, None);
    }

    #[test]
    fn reads_every_key() {
        let config = parse(&[
            ("GPS_LOCALE", "pt"),
            ("GPS_PERMISSION_FEEDBACK", "notify"),
            ("GPS_NO_FIX_FEEDBACK", "NOTIFY"),
            ("GPS_FETCH_TIMEOUT_MS", "1500"),
            ("GPS_SENSOR", "off"),
        ]);
        assert_eq!(config.locale, Locale::Portuguese);
        assert_eq!(config.permission_feedback, FeedbackPolicy::Notify);
        assert_eq!(config.no_fix_feedback, FeedbackPolicy::Notify);
        assert_eq!(config.fetch_timeout, Some(Duration::from_millis(1500)));
        assert!(!config.has_orientation_sensor);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = parse(&[
            ("GPS_LOCALE", "de"),
            ("GPS_NO_FIX_FEEDBACK", "loud"),
            ("GPS_FETCH_TIMEOUT_MS", "soon"),
        ]);
        assert_eq!(config, ScreenConfig::default());
    }
}
