//! Churn risk heuristic
//!
//! Fixed-rule scorer over the sentiment label and the combined
//! description + transcript text. Deterministic, no learned weights.

use crate::types::SentimentLabel;

/// Base score every submission starts from
const BASE_SCORE: f32 = 0.1;

/// Added when the classifier labels the text negative
const NEGATIVE_SENTIMENT_WEIGHT: f32 = 0.7;

/// Added when an attrition keyword appears in the combined text
const KEYWORD_WEIGHT: f32 = 0.2;

/// Case-insensitive attrition trigger keywords
const TRIGGER_KEYWORDS: [&str; 2] = ["cancel", "switch"];

/// Compute the churn risk score for one submission.
///
/// `combined_text` is the description concatenated with the final
/// (possibly translated) transcript. The result is clamped to 1.0; the
/// floor is the base score, so the range is 0.1-1.0.
pub fn churn_score(sentiment: &SentimentLabel, combined_text: &str) -> f32 {
    let mut score = BASE_SCORE;
    if *sentiment == SentimentLabel::Negative {
        score += NEGATIVE_SENTIMENT_WEIGHT;
    }
    if contains_trigger_keyword(combined_text) {
        score += KEYWORD_WEIGHT;
    }
    score.min(1.0)
}

/// Case-insensitive substring check for any trigger keyword
fn contains_trigger_keyword(text: &str) -> bool {
    let lowered = text.to_lowercase();
    TRIGGER_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_no_keywords_is_base_score() {
        let score = churn_score(&SentimentLabel::Positive, "everything is great");
        assert_eq!(score, 0.1, "Positive with no triggers should stay at base");
    }

    #[test]
    fn test_negative_sentiment_adds_weight() {
        let score = churn_score(&SentimentLabel::Negative, "this is terrible");
        assert!(
            (score - 0.8).abs() < f32::EPSILON,
            "Negative sentiment should score 0.8, got {}",
            score
        );
    }

    #[test]
    fn test_negative_always_at_least_point_eight() {
        for text in ["", "fine", "I might cancel"] {
            let score = churn_score(&SentimentLabel::Negative, text);
            assert!(score >= 0.8, "NEGATIVE should always score >= 0.8");
        }
    }

    #[test]
    fn test_keyword_adds_weight() {
        let score = churn_score(&SentimentLabel::Positive, "please cancel my plan");
        assert!((score - 0.3).abs() < f32::EPSILON);

        let score = churn_score(&SentimentLabel::Positive, "I may switch providers");
        assert!((score - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_keyword_check_is_case_insensitive() {
        let upper = churn_score(&SentimentLabel::Positive, "CANCEL");
        let lower = churn_score(&SentimentLabel::Positive, "cancel");
        assert_eq!(upper, lower, "CANCEL and cancel should score identically");
    }

    #[test]
    fn test_clamped_to_one() {
        // 0.1 + 0.7 + 0.2 = 1.0 exactly; clamp keeps it there
        let score = churn_score(
            &SentimentLabel::Negative,
            "\nI want to cancel my subscription",
        );
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_other_label_counts_as_non_negative() {
        let score = churn_score(&SentimentLabel::Other("NEUTRAL".to_string()), "all fine");
        assert_eq!(score, 0.1);
    }

    #[test]
    fn test_score_always_in_range() {
        let labels = [
            SentimentLabel::Positive,
            SentimentLabel::Negative,
            SentimentLabel::Other("MIXED".to_string()),
        ];
        for label in &labels {
            for text in ["", "cancel switch cancel", "hello"] {
                let score = churn_score(label, text);
                assert!((0.1..=1.0).contains(&score), "score {} out of range", score);
            }
        }
    }
}
