//! Data-driven feedback text generation.
//!
//! Each sentiment bucket carries five format strings with named slots.
//! The filler draws one word per distinct slot name from the matching
//! constant word table and substitutes it at every occurrence.
//! Negative text always embeds one pain-point phrase so the
//! downstream keyword scan has signal.

use crate::rng::StreamRng;

/// Sentiment bucket for template selection. Thresholds match the
/// label thresholds at ±0.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBucket {
    Positive,
    Negative,
    Neutral,
}

impl SentimentBucket {
    pub fn from_score(score: f64) -> Self {
        if score > 0.2 {
            Self::Positive
        } else if score < -0.2 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

pub const POSITIVE_WORDS: &[&str] = &[
    "excellent", "amazing", "fantastic", "love", "perfect", "outstanding",
    "impressed", "satisfied", "helpful", "efficient", "professional",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "terrible", "awful", "disappointed", "frustrated", "slow", "unhelpful",
    "confusing", "expensive", "difficult", "broken", "poor",
];

pub const NEUTRAL_WORDS: &[&str] = &[
    "okay", "average", "standard", "acceptable", "decent", "normal",
    "expected", "typical", "regular", "adequate",
];

pub const PAIN_POINTS: &[&str] = &[
    "slow response times", "complicated interface", "expensive pricing",
    "poor customer support", "technical issues", "billing problems",
    "lack of features", "integration difficulties", "training needed",
    "system downtime", "data migration issues", "security concerns",
];

const PRODUCT_NOUNS: &[&str] = &["platform", "software", "solution", "system"];

const POSITIVE_CATEGORIES: &[&str] = &["service", "support", "implementation", "training"];
const NEGATIVE_CATEGORIES: &[&str] = &["service", "support", "implementation", "pricing"];
const NEUTRAL_CATEGORIES: &[&str] = &["service", "support", "performance", "features"];

const POSITIVE_TEMPLATES: &[&str] = &[
    "The {product} has been {positive_word}! Our team is very {positive_word} with the results.",
    "Excellent {category}. The support team was {positive_word} and {positive_word}.",
    "We're {positive_word} with the {product}. It has {positive_word} our workflow significantly.",
    "Outstanding experience! The {category} exceeded our expectations.",
    "The platform is {positive_word} and our productivity has {positive_word} dramatically.",
];

const NEGATIVE_TEMPLATES: &[&str] = &[
    "Very {negative_word} experience. We're having issues with {pain_point}.",
    "The {product} is {negative_word} and we're experiencing {pain_point}.",
    "Frustrated with {pain_point}. The service has been {negative_word}.",
    "The {category} needs improvement. We're dealing with {pain_point}.",
    "Disappointed with the {negative_word} {category} and ongoing {pain_point}.",
];

const NEUTRAL_TEMPLATES: &[&str] = &[
    "The {product} is {neutral_word}. It meets our basic requirements.",
    "Average experience with {category}. Nothing exceptional but {neutral_word}.",
    "The service is {neutral_word}. Some areas could be improved.",
    "Standard {product} with {neutral_word} performance.",
    "The platform is {neutral_word} for our needs.",
];

/// Render one feedback text for the bucket the score falls in.
pub fn render_feedback_text(score: f64, rng: &mut StreamRng) -> String {
    let bucket = SentimentBucket::from_score(score);
    let template = match bucket {
        SentimentBucket::Positive => *rng.pick(POSITIVE_TEMPLATES),
        SentimentBucket::Negative => *rng.pick(NEGATIVE_TEMPLATES),
        SentimentBucket::Neutral => *rng.pick(NEUTRAL_TEMPLATES),
    };
    fill_slots(template, bucket, rng)
}

/// Replace every `{slot}` in the template with a word drawn from the
/// matching table. One draw per distinct slot name, so a template
/// that uses the same slot twice repeats the same word.
fn fill_slots(template: &str, bucket: SentimentBucket, rng: &mut StreamRng) -> String {
    let mut drawn: Vec<(&str, &'static str)> = Vec::new();
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').expect("unterminated template slot");
        let slot = &after[..close];
        let word = match drawn.iter().find(|(name, _)| *name == slot) {
            Some((_, word)) => *word,
            None => {
                let word = word_for_slot(slot, bucket, rng);
                drawn.push((slot, word));
                word
            }
        };
        out.push_str(word);
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

fn word_for_slot(slot: &str, bucket: SentimentBucket, rng: &mut StreamRng) -> &'static str {
    match slot {
        "product" => *rng.pick(PRODUCT_NOUNS),
        "positive_word" => *rng.pick(POSITIVE_WORDS),
        "negative_word" => *rng.pick(NEGATIVE_WORDS),
        "neutral_word" => *rng.pick(NEUTRAL_WORDS),
        "pain_point" => *rng.pick(PAIN_POINTS),
        "category" => match bucket {
            SentimentBucket::Positive => *rng.pick(POSITIVE_CATEGORIES),
            SentimentBucket::Negative => *rng.pick(NEGATIVE_CATEGORIES),
            SentimentBucket::Neutral => *rng.pick(NEUTRAL_CATEGORIES),
        },
        other => panic!("unknown template slot '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, TableSlot};

    #[test]
    fn rendered_text_has_no_unfilled_slots() {
        let mut rng = RngBank::new(3).for_table(TableSlot::Feedback);
        for score in [-0.9, -0.3, 0.0, 0.3, 0.9] {
            for _ in 0..50 {
                let text = render_feedback_text(score, &mut rng);
                assert!(!text.contains('{') && !text.contains('}'), "unfilled slot in: {text}");
                assert!(!text.is_empty());
            }
        }
    }

    #[test]
    fn negative_text_carries_a_pain_point_phrase() {
        let mut rng = RngBank::new(4).for_table(TableSlot::Feedback);
        for _ in 0..100 {
            let text = render_feedback_text(-0.6, &mut rng);
            let lowered = text.to_lowercase();
            assert!(
                PAIN_POINTS.iter().any(|p| lowered.contains(p)),
                "no pain-point phrase in: {text}"
            );
        }
    }

    #[test]
    fn repeated_slots_reuse_one_draw() {
        let mut rng = RngBank::new(9).for_table(TableSlot::Feedback);
        for _ in 0..50 {
            let text = fill_slots(
                "{positive_word}/{positive_word}",
                SentimentBucket::Positive,
                &mut rng,
            );
            let (first, second) = text.split_once('/').unwrap();
            assert_eq!(first, second, "same slot must repeat the same word");
        }
    }

    #[test]
    fn bucket_thresholds_match_label_thresholds() {
        assert_eq!(SentimentBucket::from_score(0.21), SentimentBucket::Positive);
        assert_eq!(SentimentBucket::from_score(0.2), SentimentBucket::Neutral);
        assert_eq!(SentimentBucket::from_score(-0.2), SentimentBucket::Neutral);
        assert_eq!(SentimentBucket::from_score(-0.21), SentimentBucket::Negative);
    }
}
