//! Layered mood classification.
//!
//! An ordered chain of stages, each returning a definitive result or
//! passing to the next:
//!
//! 1. crisis screening (always first, short-circuits everything)
//! 2. keyword rules on normalized text (first match wins)
//! 3. the optional statistical model on the *original* text
//! 4. Neutral default
//!
//! Keyword precedence over the model is intentional: common trigger words
//! get fast, deterministic, explainable results, and the heavier model only
//! sees ambiguous input.

use crate::crisis;
use crate::mood::Mood;
use crate::MoodModel;
use std::sync::Arc;

/// Result of classifying one piece of input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub is_crisis: bool,
    pub mood: Mood,
    pub glyph: &'static str,
}

impl Classification {
    fn crisis() -> Self {
        // Mood is irrelevant once crisis is flagged; callers must not
        // branch on it.
        Self {
            is_crisis: true,
            mood: Mood::Neutral,
            glyph: "😐",
        }
    }

    fn mood(mood: Mood, glyph: &'static str) -> Self {
        Self {
            is_crisis: false,
            mood,
            glyph,
        }
    }
}

/// Ordered keyword rules. First match wins.
const KEYWORD_RULES: &[(&str, Mood, &str)] = &[
    ("stress", Mood::Stressed, "😫"),
    ("sad", Mood::Depressed, "😔"),
    ("depress", Mood::Depressed, "😔"),
    ("happy", Mood::Happy, "😀"),
    ("joy", Mood::Happy, "😀"),
    ("angry", Mood::Angry, "😡"),
];

/// Fixed mapping from model output labels to (Mood, glyph).
const MODEL_LABEL_MAP: &[(&str, Mood, &str)] = &[
    ("anger", Mood::Angry, "😡"),
    ("fear", Mood::Fear, "😨"),
    ("sadness", Mood::Sad, "😔"),
    ("joy", Mood::Happy, "😀"),
    ("neutral", Mood::Neutral, "😐"),
    ("surprise", Mood::Happy, "🤩"),
    ("disgust", Mood::Angry, "😠"),
    ("trust", Mood::Neutral, "😌"),
];

/// Case-fold, strip punctuation, collapse whitespace.
fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn keyword_stage(normalized: &str) -> Option<(Mood, &'static str)> {
    KEYWORD_RULES
        .iter()
        .find(|(keyword, _, _)| normalized.contains(keyword))
        .map(|(_, mood, glyph)| (*mood, *glyph))
}

fn map_model_label(label: &str) -> Option<(Mood, &'static str)> {
    let folded = label.trim().to_lowercase();
    MODEL_LABEL_MAP
        .iter()
        .find(|(name, _, _)| *name == folded)
        .map(|(_, mood, glyph)| (*mood, *glyph))
}

/// The classifier chain. The statistical model is optional; without it the
/// keyword-miss case goes straight to Neutral.
#[derive(Clone, Default)]
pub struct MoodClassifier {
    model: Option<Arc<dyn MoodModel>>,
}

impl MoodClassifier {
    pub fn new() -> Self {
        Self { model: None }
    }

    pub fn with_model(model: Arc<dyn MoodModel>) -> Self {
        Self { model: Some(model) }
    }

    pub async fn classify(&self, text: &str) -> Classification {
        if crisis::is_crisis(text) {
            return Classification::crisis();
        }

        if let Some((mood, glyph)) = keyword_stage(&normalize(text)) {
            return Classification::mood(mood, glyph);
        }

        if let Some(model) = &self.model {
            // The model gets the original text; normalization is only for
            // the keyword rules.
            match model.classify(text).await {
                Ok(label) => match map_model_label(&label) {
                    Some((mood, glyph)) => return Classification::mood(mood, glyph),
                    None => {
                        tracing::warn!("Unmapped model label '{}', defaulting to Neutral", label);
                    }
                },
                Err(e) => {
                    tracing::warn!("Mood model failed, defaulting to Neutral: {}", e);
                }
            }
        }

        Classification::mood(Mood::Neutral, "😐")
    }
}
