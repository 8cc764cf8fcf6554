//! Crisis screening.
//!
//! Runs before any other classification and overrides every other dialogue
//! branch. A match is a priority override, not an error path: the caller
//! must surface the fixed safety message and nothing else.

/// Phrases that flag a message as a crisis. Matched as substrings on a
/// case-folded copy of the input.
pub const CRISIS_PHRASES: &[&str] = &[
    "hurt myself",
    "end my life",
    "suicide",
    "want to die",
    "kill myself",
    "crisis",
];

/// Fixed safety message surfaced whenever a crisis phrase is detected.
pub const CRISIS_MESSAGE: &str = "🚨 **IMMEDIATE ATTENTION REQUIRED** 🚨\n\n\
I am an AI companion, not a substitute for professional care. \
If you are in danger, please reach out now:\n\
\n\
📞 **Crisis Hotline (US):** 988\n\
📞 **Emergency Services:** 911 (or your local equivalent)\n\
\n\
Your safety is paramount. I am here when you are ready, but please seek immediate help.";

/// Check whether any crisis phrase occurs in the input, ignoring case.
pub fn is_crisis(text: &str) -> bool {
    let folded = text.to_lowercase();
    CRISIS_PHRASES.iter().any(|phrase| folded.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_detects_each_phrase() {
        for phrase in CRISIS_PHRASES {
            assert!(is_crisis(phrase), "missed phrase: {phrase}");
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_crisis("I want to KILL MYSELF"));
        assert!(is_crisis("This is a Crisis"));
    }

    #[test]
    fn test_embedded_in_longer_text() {
        assert!(is_crisis("honestly some days I just want to die, you know"));
    }

    #[test]
    fn test_ordinary_text_passes() {
        assert!(!is_crisis("I had a rough day at work"));
        assert!(!is_crisis(""));
    }

    proptest! {
        // Any input containing a crisis phrase is flagged, regardless of
        // what surrounds it or how the phrase is cased.
        #[test]
        fn prop_phrase_anywhere_is_flagged(
            prefix in ".{0,40}",
            suffix in ".{0,40}",
            idx in 0usize..CRISIS_PHRASES.len(),
            upper in proptest::bool::ANY,
        ) {
            let phrase = if upper {
                CRISIS_PHRASES[idx].to_uppercase()
            } else {
                CRISIS_PHRASES[idx].to_string()
            };
            let text = format!("{prefix}{phrase}{suffix}");
            prop_assert!(is_crisis(&text));
        }
    }
}
