//! Story and tip generation with guaranteed deterministic fallbacks.
//!
//! The external call is the only fallible, I/O-bound operation in the whole
//! core. This layer never lets a service error escape: callers always get a
//! non-empty string, either generated or from the fixed templates below.

use solace_core::config::GenerativeConfig;
use solace_core::{Mood, Role, TextGenerator};
use std::sync::Arc;
use std::time::Duration;

const STORY_SYSTEM: &str = "You are an empathetic, concise storyteller.";
const TIP_SYSTEM: &str =
    "You are a supportive coach. Respond with only the tip, starting with 'Tip: '";

/// Fixed story template for when the service is unconfigured or fails.
pub fn fallback_story(mood: Mood) -> &'static str {
    match mood {
        Mood::Angry | Mood::Stressed => {
            "The Whispering Stream: Once, a small stone was constantly buffeted by a river's \
             current, until it learned the water was not its enemy but its polish. \
             **Remember to let go and find your stillness.**"
        }
        Mood::Sad | Mood::Depressed => {
            "The Sun Under the Clouds: A little candle felt hopeless because a thick, dark \
             cloud covered the whole sky, yet its small flame was the only light the room \
             needed. **Your light is important; never let it dim.**"
        }
        _ => {
            "The small turtle worried about the finish line, forgetting that every slow step \
             was already carrying it there. **Remember, your strength comes from within, \
             every step of the way.**"
        }
    }
}

/// Fixed tip template, keyed by role.
pub fn fallback_tip(role: Role) -> &'static str {
    match role {
        Role::Student => "Tip: Try the Pomodoro Technique to manage study stress efficiently.",
        _ => "Tip: Focus on small, manageable steps today. You can do it!",
    }
}

/// The generative layer: optional service, bounded timeout, single attempt.
#[derive(Clone)]
pub struct GenerativeLayer {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
    story_temperature: f32,
    tip_temperature: f32,
}

impl GenerativeLayer {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, config: &GenerativeConfig) -> Self {
        Self {
            generator,
            timeout: Duration::from_secs(config.timeout_secs),
            story_temperature: config.story_temperature,
            tip_temperature: config.tip_temperature,
        }
    }

    /// A layer with no service configured; every call resolves to the
    /// deterministic template immediately.
    pub fn disabled() -> Self {
        Self::new(None, &GenerativeConfig::default())
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// A one-paragraph metaphorical story for the mood.
    pub async fn story(&self, mood: Mood) -> String {
        let Some(generator) = &self.generator else {
            return fallback_story(mood).to_string();
        };
        let prompt = format!(
            "Write a one-paragraph, uplifting, metaphorical story about coping with {} \
             that ends with a single, clear positive takeaway sentence.",
            mood.name().to_lowercase()
        );
        match self
            .request(generator.as_ref(), &prompt, STORY_SYSTEM, self.story_temperature)
            .await
        {
            Some(story) => story,
            None => fallback_story(mood).to_string(),
        }
    }

    /// A single actionable tip for the mood and role. Output must start
    /// with the literal "Tip:" prefix; anything else is replaced by the
    /// fixed fallback rather than surfaced malformed.
    pub async fn tip(&self, mood: Mood, role: Role) -> String {
        let Some(generator) = &self.generator else {
            return fallback_tip(role).to_string();
        };
        let prompt = format!(
            "Give a single, concise, actionable mental health tip for a {} feeling {}.",
            role.label(),
            mood.name()
        );
        match self
            .request(generator.as_ref(), &prompt, TIP_SYSTEM, self.tip_temperature)
            .await
        {
            Some(text) => {
                let tip = text.lines().next().unwrap_or("").trim().to_string();
                if tip.starts_with("Tip:") {
                    tip
                } else {
                    tracing::warn!("Generated tip missing 'Tip:' prefix, using fallback");
                    fallback_tip(role).to_string()
                }
            }
            None => fallback_tip(role).to_string(),
        }
    }

    /// One bounded attempt against the service. Returns None on error,
    /// timeout, or blank output; no retries.
    async fn request(
        &self,
        generator: &dyn TextGenerator,
        prompt: &str,
        system: &str,
        temperature: f32,
    ) -> Option<String> {
        match tokio::time::timeout(self.timeout, generator.generate(prompt, system, temperature))
            .await
        {
            Ok(Ok(text)) if !text.trim().is_empty() => Some(text),
            Ok(Ok(_)) => {
                tracing::warn!("Generative service returned empty output, using fallback");
                None
            }
            Ok(Err(e)) => {
                tracing::warn!("Generative service failed, using fallback: {}", e);
                None
            }
            Err(_) => {
                tracing::warn!(
                    "Generative call exceeded {:?}, using fallback",
                    self.timeout
                );
                None
            }
        }
    }
}
