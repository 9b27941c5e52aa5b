//! Threshold configuration for the signal layer.
//!
//! Every tunable lives here once, as a named constant with an env-var
//! override, so call sites never carry scattered literals.

use std::env;

use chrono::Duration;

/// Minimum confidence at which an AI suggestion is trusted.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Slope magnitude beyond which a trend stops being "stable".
pub const DEFAULT_TREND_THRESHOLD: f64 = 0.1;

/// Length of a suggested follow-up window, in hours.
pub const DEFAULT_FOLLOW_UP_SPAN_HOURS: i64 = 2;

/// First business hour (inclusive) for engagement estimates.
pub const DEFAULT_BUSINESS_OPEN_HOUR: u32 = 9;

/// Last business hour (exclusive) for engagement estimates.
pub const DEFAULT_BUSINESS_CLOSE_HOUR: u32 = 17;

/// Tunable thresholds for trend labeling, confidence gating, and timing.
#[derive(Debug, Clone)]
pub struct SignalConfig {
    /// AI suggestions below this confidence trigger fallback.
    pub confidence_threshold: f64,
    /// Slopes within ±this value are labeled stable.
    pub trend_threshold: f64,
    /// Length of suggested follow-up windows, in hours.
    pub follow_up_span_hours: i64,
    /// Start of business hours (inclusive), 0-23.
    pub business_open_hour: u32,
    /// End of business hours (exclusive), 0-23.
    pub business_close_hour: u32,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            trend_threshold: DEFAULT_TREND_THRESHOLD,
            follow_up_span_hours: DEFAULT_FOLLOW_UP_SPAN_HOURS,
            business_open_hour: DEFAULT_BUSINESS_OPEN_HOUR,
            business_close_hour: DEFAULT_BUSINESS_CLOSE_HOUR,
        }
    }
}

impl SignalConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DEALDESK_CONFIDENCE_THRESHOLD` - Fallback confidence threshold
    /// - `DEALDESK_TREND_THRESHOLD` - Stable-band slope threshold
    /// - `DEALDESK_FOLLOW_UP_SPAN_HOURS` - Follow-up window length
    /// - `DEALDESK_BUSINESS_OPEN_HOUR` - First business hour (inclusive)
    /// - `DEALDESK_BUSINESS_CLOSE_HOUR` - Last business hour (exclusive)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(value) = env_f64("DEALDESK_CONFIDENCE_THRESHOLD") {
            config.confidence_threshold = value.clamp(0.0, 1.0);
        }
        if let Some(value) = env_f64("DEALDESK_TREND_THRESHOLD") {
            config.trend_threshold = value.clamp(0.0, 1.0);
        }
        if let Some(value) = env_i64("DEALDESK_FOLLOW_UP_SPAN_HOURS") {
            if value > 0 {
                config.follow_up_span_hours = value;
            }
        }
        if let Some(value) = env_u32("DEALDESK_BUSINESS_OPEN_HOUR") {
            if value < 24 {
                config.business_open_hour = value;
            }
        }
        if let Some(value) = env_u32("DEALDESK_BUSINESS_CLOSE_HOUR") {
            if value < 24 {
                config.business_close_hour = value;
            }
        }

        config
    }

    /// Follow-up window length as a duration.
    pub fn follow_up_span(&self) -> Duration {
        Duration::hours(self.follow_up_span_hours)
    }
}

fn env_f64(key: &str) -> Option<f64> {
    env::var(key).ok()?.parse().ok()
}

fn env_i64(key: &str) -> Option<i64> {
    env::var(key).ok()?.parse().ok()
}

fn env_u32(key: &str) -> Option<u32> {
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SignalConfig::default();
        assert_eq!(config.confidence_threshold, 0.5);
        assert_eq!(config.trend_threshold, 0.1);
        assert_eq!(config.follow_up_span_hours, 2);
        assert_eq!(config.business_open_hour, 9);
        assert_eq!(config.business_close_hour, 17);
    }

    #[test]
    fn test_follow_up_span() {
        let config = SignalConfig::default();
        assert_eq!(config.follow_up_span(), Duration::hours(2));
    }
}
