//! Follow-up timing estimation.
//!
//! Combines how quickly the customer has historically replied with a
//! business-hours heuristic to recommend when an agent should follow up.

use chat_core::ChatMessage;
use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SignalConfig;

/// Delay before the default window when there is no history, in hours.
const DEFAULT_WINDOW_DELAY_HOURS: i64 = 1;

/// Confidence reported when no history informs the estimate.
const DEFAULT_WINDOW_CONFIDENCE: f64 = 0.5;

/// Confidence reported when history informs the estimate.
const PATTERN_WINDOW_CONFIDENCE: f64 = 0.7;

/// A recommended follow-up window.
///
/// Ephemeral; computed per request and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingWindow {
    /// Recommended earliest follow-up time.
    pub start_time: DateTime<Utc>,
    /// Recommended latest follow-up time.
    pub end_time: DateTime<Utc>,
    /// Estimate confidence, in [0, 1].
    pub confidence: f64,
    /// Human-readable basis for the recommendation.
    pub reasoning: String,
}

impl TimingWindow {
    /// Window length.
    pub fn span(&self) -> Duration {
        self.end_time - self.start_time
    }
}

/// Estimates an optimal reply window from response latency history and
/// business-hour heuristics.
///
/// Pure over its inputs; `now` is supplied by the caller, already in
/// the tenant's local time frame.
#[derive(Debug, Clone, Default)]
pub struct TimingSuggester {
    config: SignalConfig,
}

impl TimingSuggester {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    /// Suggest a follow-up window.
    ///
    /// With no history at all, the window starts one hour out at default
    /// confidence. Otherwise the start is the earlier of the
    /// response-pattern estimate and the engagement-window estimate --
    /// business-hours alignment only ever pulls the start time earlier,
    /// never later.
    pub fn suggest(&self, messages: &[ChatMessage], now: DateTime<Utc>) -> TimingWindow {
        let span = self.config.follow_up_span();

        if messages.is_empty() {
            let start = now + Duration::hours(DEFAULT_WINDOW_DELAY_HOURS);
            return TimingWindow {
                start_time: start,
                end_time: start + span,
                confidence: DEFAULT_WINDOW_CONFIDENCE,
                reasoning: "Default timing window".to_string(),
            };
        }

        let pattern = self.response_pattern_estimate(messages, now);
        let engagement = self.engagement_window_estimate(now);

        let start = if engagement < pattern { engagement } else { pattern };

        TimingWindow {
            start_time: start,
            end_time: start + span,
            confidence: PATTERN_WINDOW_CONFIDENCE,
            reasoning: "Based on past response patterns and engagement windows".to_string(),
        }
    }

    /// Average gap between consecutive customer messages, added to now.
    ///
    /// Agent messages neither contribute deltas nor reset the last
    /// customer timestamp. Fewer than two customer messages yields no
    /// usable pattern, so the estimate collapses to `now`.
    fn response_pattern_estimate(
        &self,
        messages: &[ChatMessage],
        now: DateTime<Utc>,
    ) -> DateTime<Utc> {
        let mut last_customer: Option<DateTime<Utc>> = None;
        let mut total = Duration::zero();
        let mut deltas = 0i32;

        for message in messages {
            if !message.is_customer() {
                continue;
            }
            if let Some(previous) = last_customer {
                total += message.timestamp - previous;
                deltas += 1;
            }
            last_customer = Some(message.timestamp);
        }

        if deltas == 0 {
            return now;
        }

        now + total / deltas
    }

    /// Nearest time within business hours, never later than the next
    /// opening.
    fn engagement_window_estimate(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let hour = now.hour();
        let open = self.config.business_open_hour;
        let close = self.config.business_close_hour;

        if hour >= open && hour < close {
            now
        } else if hour < open {
            self.at_open_hour(now)
        } else {
            self.at_open_hour(now + Duration::days(1))
        }
    }

    /// The opening hour on the same calendar day as `reference`.
    fn at_open_hour(&self, reference: DateTime<Utc>) -> DateTime<Utc> {
        let time = NaiveTime::from_hms_opt(self.config.business_open_hour, 0, 0)
            .unwrap_or(NaiveTime::MIN);
        NaiveDateTime::new(reference.date_naive(), time).and_utc()
    }
}
