pub mod classify;
pub mod config;
pub mod crisis;
pub mod mood;
pub mod session;

pub use classify::{Classification, MoodClassifier};
pub use config::CompanionConfig;
pub use mood::{Mood, MoodCategory};
pub use session::{HistoryEntry, QuickAction, Role, SessionState, Speaker};

use async_trait::async_trait;

/// Optional statistical emotion model, consumed as a black-box
/// text → label function. Treated as an enhancement: the classifier
/// works (keyword-only) when no model is wired in.
#[async_trait]
pub trait MoodModel: Send + Sync {
    /// Return the model's top emotion label for the given text.
    async fn classify(&self, text: &str) -> anyhow::Result<String>;
}

/// External text-generation service, consumed as a black-box
/// prompt → text function. A single attempt per call; callers are
/// expected to substitute deterministic fallbacks on failure.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        system: &str,
        temperature: f32,
    ) -> anyhow::Result<String>;
}

/// Presentation capability the shells implement. Dialogue logic never
/// renders anything itself — it appends history entries and the shell
/// decides how to show them and how to surface quick actions.
pub trait Renderer {
    fn display_entry(&mut self, entry: &HistoryEntry);
    fn offer_quick_actions(&mut self, actions: &[QuickAction]);
}
