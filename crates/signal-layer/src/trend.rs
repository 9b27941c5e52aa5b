//! Sentiment and emotion trend analysis over conversation history.
//!
//! Decisions downstream (outcome scoring, escalation) must reflect
//! trends, not individual messages, so the analyzer compares an "early"
//! and a "recent" window of the history rather than reacting to the
//! latest message alone.

use chat_core::{ChatMessage, ConversationMetadata};
use serde::{Deserialize, Serialize};

use crate::config::SignalConfig;

/// Positive sentiment keywords, matched case-insensitively as substrings.
const POSITIVE_KEYWORDS: &[&str] = &[
    "great",
    "good",
    "excellent",
    "thanks",
    "appreciate",
    "love",
    "happy",
];

/// Negative sentiment keywords, matched case-insensitively as substrings.
const NEGATIVE_KEYWORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "disappointed",
    "frustrated",
    "hate",
    "angry",
];

/// Emotion tags counted against the conversation when present.
const NEGATIVE_EMOTIONS: &[&str] = &["frustration", "urgency"];

/// Per-keyword score adjustment applied within a window.
const KEYWORD_WEIGHT: f64 = 0.1;

/// Direction of a conversation trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Stable,
    Deteriorating,
}

/// Trend analysis for a conversation.
///
/// Derived on demand from the message history and the current metadata
/// snapshot; never persisted by this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysis {
    /// Direction of the sentiment trend.
    pub sentiment_trend: TrendDirection,
    /// Direction of the emotion trend.
    pub emotion_trend: TrendDirection,
    /// Signed sentiment change between windows, in [-1, 1].
    pub sentiment_slope: f64,
    /// Signed emotion change between windows, in [-1, 1].
    pub emotion_slope: f64,
}

impl TrendAnalysis {
    /// Neutral result returned when the history is too short to split.
    pub fn stable() -> Self {
        Self {
            sentiment_trend: TrendDirection::Stable,
            emotion_trend: TrendDirection::Stable,
            sentiment_slope: 0.0,
            emotion_slope: 0.0,
        }
    }

    /// Whether either signal is deteriorating.
    pub fn is_deteriorating(&self) -> bool {
        self.sentiment_trend == TrendDirection::Deteriorating
            || self.emotion_trend == TrendDirection::Deteriorating
    }
}

/// Computes trend direction from a conversation's history and its
/// current metadata snapshot.
///
/// Pure and stateless; safe to share across conversations.
#[derive(Debug, Clone, Default)]
pub struct TrendAnalyzer {
    config: SignalConfig,
}

impl TrendAnalyzer {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    /// Analyze sentiment and emotion trends.
    ///
    /// Fewer than two messages is not enough to compare windows, so the
    /// result degrades to stable with zero slopes rather than erroring.
    pub fn analyze(
        &self,
        messages: &[ChatMessage],
        metadata: &ConversationMetadata,
    ) -> TrendAnalysis {
        if messages.len() < 2 {
            return TrendAnalysis::stable();
        }

        // Recent window gets the larger half on odd counts.
        let mid = messages.len() / 2;
        let early = &messages[..mid];
        let recent = &messages[mid..];

        let sentiment_slope = self.sentiment_slope(early, recent, metadata);
        let emotion_slope = self.emotion_slope(early, recent, metadata);

        TrendAnalysis {
            sentiment_trend: self.label(sentiment_slope),
            emotion_trend: self.label(emotion_slope),
            sentiment_slope,
            emotion_slope,
        }
    }

    fn sentiment_slope(
        &self,
        early: &[ChatMessage],
        recent: &[ChatMessage],
        metadata: &ConversationMetadata,
    ) -> f64 {
        let early_score = window_sentiment_score(early, metadata.sentiment_score);
        let recent_score = window_sentiment_score(recent, metadata.sentiment_score);
        (recent_score - early_score).clamp(-1.0, 1.0)
    }

    /// Weighted negative-emotion ratio comparison between windows.
    ///
    /// The metadata carries a single current emotion snapshot, applied
    /// uniformly to both windows (weighted by each window's size). This
    /// is a known approximation of a true time-varying emotion trend and
    /// is kept as-is.
    fn emotion_slope(
        &self,
        early: &[ChatMessage],
        recent: &[ChatMessage],
        metadata: &ConversationMetadata,
    ) -> f64 {
        let early_ratio = window_emotion_ratio(early, metadata);
        let recent_ratio = window_emotion_ratio(recent, metadata);

        // Positive slope = improving: the negative-emotion ratio fell.
        ((early_ratio - recent_ratio) * 2.0).clamp(-1.0, 1.0)
    }

    fn label(&self, slope: f64) -> TrendDirection {
        if slope > self.config.trend_threshold {
            TrendDirection::Improving
        } else if slope < -self.config.trend_threshold {
            TrendDirection::Deteriorating
        } else {
            TrendDirection::Stable
        }
    }
}

/// Score a window: metadata sentiment as a base, adjusted per keyword
/// hit, normalized by window size, clamped to [0, 1].
fn window_sentiment_score(window: &[ChatMessage], base: f64) -> f64 {
    if window.is_empty() {
        return base.clamp(0.0, 1.0);
    }

    let mut adjustment = 0.0;
    for message in window {
        let content = message.content.to_lowercase();
        for keyword in POSITIVE_KEYWORDS {
            if content.contains(keyword) {
                adjustment += KEYWORD_WEIGHT;
            }
        }
        for keyword in NEGATIVE_KEYWORDS {
            if content.contains(keyword) {
                adjustment -= KEYWORD_WEIGHT;
            }
        }
    }

    (base + adjustment / window.len() as f64).clamp(0.0, 1.0)
}

/// Weighted negative-emotion presence ratio for a window.
fn window_emotion_ratio(window: &[ChatMessage], metadata: &ConversationMetadata) -> f64 {
    if window.is_empty() {
        return 0.0;
    }

    let window_len = window.len() as f64;
    let matches = NEGATIVE_EMOTIONS
        .iter()
        .filter(|emotion| metadata.emotions.contains(**emotion))
        .count() as f64;

    let weighted = matches * (window_len / 2.0);
    weighted / window_len
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::Sentiment;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
    }

    fn metadata(sentiment_score: f64) -> ConversationMetadata {
        ConversationMetadata::new(
            "conv-1",
            "buying",
            0.8,
            Sentiment::Neutral,
            sentiment_score,
            base_time(),
        )
    }

    fn customer_messages(contents: &[&str]) -> Vec<ChatMessage> {
        contents
            .iter()
            .enumerate()
            .map(|(i, content)| {
                ChatMessage::customer(
                    "conv-1",
                    *content,
                    base_time() + Duration::minutes(i as i64),
                )
            })
            .collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_history_is_stable() {
        let analyzer = TrendAnalyzer::default();
        let analysis = analyzer.analyze(&[], &metadata(0.5));

        assert_eq!(analysis.sentiment_trend, TrendDirection::Stable);
        assert_eq!(analysis.emotion_trend, TrendDirection::Stable);
        assert_eq!(analysis.sentiment_slope, 0.0);
        assert_eq!(analysis.emotion_slope, 0.0);
    }

    #[test]
    fn test_single_message_is_stable() {
        let analyzer = TrendAnalyzer::default();
        let messages = customer_messages(&["this is terrible"]);
        let analysis = analyzer.analyze(&messages, &metadata(0.5));

        assert_eq!(analysis.sentiment_trend, TrendDirection::Stable);
        assert_eq!(analysis.sentiment_slope, 0.0);
    }

    #[test]
    fn test_improving_sentiment() {
        let analyzer = TrendAnalyzer::default();
        // Early window: negative keywords. Recent window: positive ones.
        let messages = customer_messages(&[
            "this is terrible",
            "really awful service",
            "ok that looks great",
            "thanks so much",
        ]);
        let analysis = analyzer.analyze(&messages, &metadata(0.5));

        assert_eq!(analysis.sentiment_trend, TrendDirection::Improving);
        assert!(approx(analysis.sentiment_slope, 0.2));
    }

    #[test]
    fn test_deteriorating_sentiment() {
        let analyzer = TrendAnalyzer::default();
        let messages = customer_messages(&[
            "looks great so far",
            "thanks so much",
            "actually this is bad",
            "really disappointed now",
        ]);
        let analysis = analyzer.analyze(&messages, &metadata(0.5));

        assert_eq!(analysis.sentiment_trend, TrendDirection::Deteriorating);
        assert!(approx(analysis.sentiment_slope, -0.2));
    }

    #[test]
    fn test_no_keywords_is_stable() {
        let analyzer = TrendAnalyzer::default();
        let messages = customer_messages(&[
            "what sizes do you have?",
            "do you ship to Canada?",
            "how long does delivery take?",
            "what about returns?",
        ]);
        let analysis = analyzer.analyze(&messages, &metadata(0.5));

        assert_eq!(analysis.sentiment_trend, TrendDirection::Stable);
        assert_eq!(analysis.sentiment_slope, 0.0);
    }

    #[test]
    fn test_keyword_matching_is_case_insensitive() {
        let analyzer = TrendAnalyzer::default();
        let messages =
            customer_messages(&["no keywords here", "anything", "GREAT, THANKS", "LOVE it, HAPPY"]);
        let analysis = analyzer.analyze(&messages, &metadata(0.5));

        assert_eq!(analysis.sentiment_trend, TrendDirection::Improving);
    }

    #[test]
    fn test_window_scores_clamped_bounds_slope() {
        let analyzer = TrendAnalyzer::default();
        // Every negative keyword in one message pushes the early window
        // score to the 0.0 floor; every positive keyword pushes the
        // recent window to the 1.0 ceiling. Slope caps at 1.0.
        let messages = customer_messages(&[
            "bad terrible awful disappointed frustrated hate angry",
            "great good excellent thanks appreciate love happy",
        ]);
        let analysis = analyzer.analyze(&messages, &metadata(0.5));

        assert!(approx(analysis.sentiment_slope, 1.0));
        assert_eq!(analysis.sentiment_trend, TrendDirection::Improving);
    }

    #[test]
    fn test_odd_count_gives_recent_window_larger_half() {
        let analyzer = TrendAnalyzer::default();
        // 3 messages: early = [msg0], recent = [msg1, msg2].
        let messages = customer_messages(&["awful", "this is great", "thanks a lot"]);
        let analysis = analyzer.analyze(&messages, &metadata(0.5));

        // early = 0.5 - 0.1 = 0.4; recent = 0.5 + 0.2/2 = 0.6.
        assert!(approx(analysis.sentiment_slope, 0.2));
        assert_eq!(analysis.sentiment_trend, TrendDirection::Improving);
    }

    #[test]
    fn test_slope_at_threshold_is_stable() {
        let analyzer = TrendAnalyzer::default();
        // early = 0.5; recent = 0.6; slope ~0.1 which is not > 0.1.
        let messages = customer_messages(&["no signal here", "this is great"]);
        let analysis = analyzer.analyze(&messages, &metadata(0.5));

        assert!(analysis.sentiment_slope <= 0.1 + 1e-9);
        assert_eq!(analysis.sentiment_trend, TrendDirection::Stable);
    }

    #[test]
    fn test_emotion_snapshot_applies_uniformly() {
        let analyzer = TrendAnalyzer::default();
        let messages = customer_messages(&["one", "two", "three", "four"]);
        let meta = metadata(0.5).with_emotions(["frustration", "urgency"]);
        let analysis = analyzer.analyze(&messages, &meta);

        // One snapshot applied to both windows yields equal weighted
        // ratios, so the slope stays flat even with negative emotions.
        assert_eq!(analysis.emotion_slope, 0.0);
        assert_eq!(analysis.emotion_trend, TrendDirection::Stable);
    }

    #[test]
    fn test_unknown_emotions_ignored() {
        let analyzer = TrendAnalyzer::default();
        let messages = customer_messages(&["one", "two"]);
        let meta = metadata(0.5).with_emotions(["excitement", "curiosity"]);
        let analysis = analyzer.analyze(&messages, &meta);

        assert_eq!(analysis.emotion_slope, 0.0);
        assert_eq!(analysis.emotion_trend, TrendDirection::Stable);
    }

    #[test]
    fn test_slopes_stay_in_range() {
        let analyzer = TrendAnalyzer::default();
        let messages = customer_messages(&[
            "hate hate terrible awful bad angry frustrated disappointed",
            "love love great good excellent thanks appreciate happy",
            "great excellent",
            "thanks appreciate",
        ]);
        let meta = metadata(1.0).with_emotions(["frustration"]);
        let analysis = analyzer.analyze(&messages, &meta);

        assert!((-1.0..=1.0).contains(&analysis.sentiment_slope));
        assert!((-1.0..=1.0).contains(&analysis.emotion_slope));
    }

    #[test]
    fn test_is_deteriorating_helper() {
        assert!(!TrendAnalysis::stable().is_deteriorating());

        let analysis = TrendAnalysis {
            sentiment_trend: TrendDirection::Deteriorating,
            emotion_trend: TrendDirection::Stable,
            sentiment_slope: -0.3,
            emotion_slope: 0.0,
        };
        assert!(analysis.is_deteriorating());
    }
}
