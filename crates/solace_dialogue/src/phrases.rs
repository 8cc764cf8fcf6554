//! Fixed conversational phrasing, keyed by mood and category.
//!
//! Kept as plain tables so the dialogue flow stays deterministic and cheap;
//! only stories and tips go through the generative layer.

use solace_core::{Mood, MoodCategory, Role};

/// Short acknowledgment appended right after classification.
pub fn acknowledgment(mood: Mood) -> &'static str {
    match mood {
        Mood::Sad | Mood::Depressed => {
            "I hear you, friend. It takes courage to share that feeling. I'm here to listen \
             without judgment. Tell me more, or we can just sit quietly together."
        }
        Mood::Happy => {
            "That's fantastic news! I love hearing you sound so happy! What's the best part \
             of your day so far? Let's celebrate it!"
        }
        _ => "Thanks for sharing. What's on your mind right now? I'm all ears.",
    }
}

/// Follow-up line that precedes the quick-action offer.
pub fn follow_up(mood: Mood) -> String {
    match mood.category() {
        MoodCategory::Negative => {
            "I'm here for you. Take a moment, and let's find something to lift your spirits."
                .to_string()
        }
        MoodCategory::Anxious => {
            "That sounds rough. Let's find a way to center your mind right now.".to_string()
        }
        MoodCategory::Other => format!(
            "That's great! Let's boost that wonderful **{}** feeling even more.",
            mood.name()
        ),
    }
}

pub fn greeting(role: Role) -> String {
    format!(
        "Hello! I see you've identified as a **{}**. How are you feeling right now? \
         I'm here to listen.",
        role.label()
    )
}

pub fn story_lead_in(mood: Mood) -> String {
    format!(
        "That's a lovely idea! Let me tell you a story for your **{}** mood...",
        mood.name()
    )
}

pub fn exercise_lead_in(title: &str) -> String {
    format!(
        "Absolutely! Let's try the **{}** technique to recenter ourselves:",
        title
    )
}

pub const NO_EXERCISE_APOLOGY: &str = "I'm sorry, I don't have a specific exercise right now, \
     but a simple stretch or getting a glass of water can always help!";

pub fn suggestion_lead_in(mood: Mood) -> String {
    format!("Here is a suggestion to help shift your **{}** mood:", mood.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acknowledgment_keys() {
        assert!(acknowledgment(Mood::Sad).contains("courage"));
        assert!(acknowledgment(Mood::Depressed).contains("courage"));
        assert!(acknowledgment(Mood::Happy).contains("fantastic"));
        assert!(acknowledgment(Mood::Neutral).contains("all ears"));
    }

    #[test]
    fn test_follow_up_by_category() {
        assert!(follow_up(Mood::Angry).contains("lift your spirits"));
        assert!(follow_up(Mood::Fear).contains("center your mind"));
        assert!(follow_up(Mood::Cheerful).contains("Cheerful"));
    }
}
