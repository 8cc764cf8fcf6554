pub mod fallback;
pub mod gemini;

pub use fallback::{fallback_story, fallback_tip, GenerativeLayer};
pub use gemini::GeminiClient;
