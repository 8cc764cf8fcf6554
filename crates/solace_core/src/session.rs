//! Per-session dialogue state.
//!
//! One `SessionState` per conversation, owned exclusively by its session and
//! passed explicitly into the dialogue engine — no ambient or
//! framework-managed state, so the state machine is testable without any
//! presentation shell present.

use crate::mood::{Mood, MoodCategory};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who the user is talking as. Chosen once per session; affects only the
/// phrasing of generated tips, never the mood logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    WorkingProfessional,
    GeneralPublic,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::WorkingProfessional, Role::GeneralPublic];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::WorkingProfessional => "Working Professional",
            Role::GeneralPublic => "General Public",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
    /// Highlighted content blocks (quotes, exercise steps, safety notices)
    /// the shells render distinctly from plain assistant chat.
    Suggestion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub speaker: Speaker,
    pub text: String,
}

impl HistoryEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }

    pub fn suggestion(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Suggestion,
            text: text.into(),
        }
    }
}

/// The quick actions a shell can offer while a command is awaited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickAction {
    Story,
    Exercise,
    Song,
    Video,
    Movie,
    Tip,
}

impl QuickAction {
    /// The command word recognized in free text while awaiting a command,
    /// in the fixed scan order. "yes" is the legacy word for the generic
    /// suggestion path, surfaced as the Tip button.
    const COMMAND_WORDS: [(&'static str, QuickAction); 5] = [
        ("story", QuickAction::Story),
        ("exercise", QuickAction::Exercise),
        ("song", QuickAction::Song),
        ("video", QuickAction::Video),
        ("yes", QuickAction::Tip),
    ];

    /// Find the first recognized command word contained in (case-folded)
    /// free text.
    pub fn from_text(lowered: &str) -> Option<QuickAction> {
        Self::COMMAND_WORDS
            .iter()
            .find(|(word, _)| lowered.contains(word))
            .map(|(_, action)| *action)
    }

    /// Button label shown by the shells.
    pub fn label(&self) -> &'static str {
        match self {
            QuickAction::Story => "Story 📖",
            QuickAction::Exercise => "Exercise 🧘",
            QuickAction::Song => "Song 🎶",
            QuickAction::Video => "Calming Video 📽️",
            QuickAction::Movie => "Movie 🎬",
            QuickAction::Tip => "Quick Tip 🧠",
        }
    }

    /// User-echo text appended to history when the action is selected as a
    /// button rather than typed.
    pub fn echo_text(&self) -> &'static str {
        match self {
            QuickAction::Story => "I need a story.",
            QuickAction::Exercise => "I'll try an exercise.",
            QuickAction::Song => "I'd like a song or video.",
            QuickAction::Video => "I need a calming video.",
            QuickAction::Movie => "Yes, recommend a movie.",
            QuickAction::Tip => "Give me a quick tip.",
        }
    }

    /// The three actions offered for a mood category.
    pub fn offered_for(category: MoodCategory) -> [QuickAction; 3] {
        match category {
            MoodCategory::Negative => {
                [QuickAction::Story, QuickAction::Exercise, QuickAction::Song]
            }
            MoodCategory::Anxious => {
                [QuickAction::Video, QuickAction::Exercise, QuickAction::Tip]
            }
            MoodCategory::Other => [QuickAction::Song, QuickAction::Movie, QuickAction::Story],
        }
    }
}

/// Mutable per-conversation state. Created with no role; destroyed with the
/// session. Nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub role: Option<Role>,
    /// Last detected mood, Neutral until something is classified.
    pub last_mood: Mood,
    /// Glyph attached to the last classification (may differ from the
    /// mood's canonical glyph).
    pub last_glyph: String,
    /// Set while quick-action suggestions are offered; cleared the moment a
    /// command executes or the role resets.
    pub awaiting_command: Option<Mood>,
    pub history: Vec<HistoryEntry>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            role: None,
            last_mood: Mood::Neutral,
            last_glyph: "😐".to_string(),
            awaiting_command: None,
            history: Vec::new(),
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit role-change: back to no-role, history and pending command
    /// cleared.
    pub fn reset_role(&mut self) {
        self.role = None;
        self.awaiting_command = None;
        self.history.clear();
    }

    /// Quick actions currently on offer, if any.
    pub fn offered_actions(&self) -> Option<[QuickAction; 3]> {
        self.awaiting_command
            .map(|mood| QuickAction::offered_for(mood.category()))
    }
}
