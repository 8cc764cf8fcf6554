//! Mood vocabulary and the fixed related-mood clusters.
//!
//! Moods are discrete labels rather than a continuous affect space because
//! every downstream decision (content lookup, phrasing, quick-action sets)
//! is keyed by label. Each mood carries a display glyph, a hand-authored
//! cluster of related moods used to widen content search, and a coarse
//! category that drives the dialogue follow-up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Cheerful,
    Sad,
    Depressed,
    Angry,
    Fear,
    Stressed,
    Guilt,
    Lonely,
    Neutral,
}

/// Coarse grouping used for follow-up phrasing and quick-action sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodCategory {
    /// Angry / Sad / Depressed — offer direct intervention.
    Negative,
    /// Stressed / Fear — offer something to center the mind.
    Anxious,
    /// Everything else — offer a mood boost.
    Other,
}

impl Mood {
    pub const ALL: [Mood; 10] = [
        Mood::Happy,
        Mood::Cheerful,
        Mood::Sad,
        Mood::Depressed,
        Mood::Angry,
        Mood::Fear,
        Mood::Stressed,
        Mood::Guilt,
        Mood::Lonely,
        Mood::Neutral,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Cheerful => "Cheerful",
            Mood::Sad => "Sad",
            Mood::Depressed => "Depressed",
            Mood::Angry => "Angry",
            Mood::Fear => "Fear",
            Mood::Stressed => "Stressed",
            Mood::Guilt => "Guilt",
            Mood::Lonely => "Lonely",
            Mood::Neutral => "Neutral",
        }
    }

    /// Canonical display glyph for the mood.
    ///
    /// Note the classifier may attach a different glyph for the same mood
    /// (e.g. a surprised input maps to Happy with 🤩), so the glyph travels
    /// alongside the mood in classification results.
    pub fn glyph(&self) -> &'static str {
        match self {
            Mood::Happy => "😀",
            Mood::Cheerful => "😄",
            Mood::Sad => "😔",
            Mood::Depressed => "😔",
            Mood::Angry => "😡",
            Mood::Fear => "😨",
            Mood::Stressed => "😫",
            Mood::Guilt => "😞",
            Mood::Lonely => "🥺",
            Mood::Neutral => "😐",
        }
    }

    pub fn category(&self) -> MoodCategory {
        match self {
            Mood::Angry | Mood::Sad | Mood::Depressed => MoodCategory::Negative,
            Mood::Stressed | Mood::Fear => MoodCategory::Anxious,
            _ => MoodCategory::Other,
        }
    }

    /// The fixed cluster of moods whose content is considered relevant when
    /// searching for media. Invariant: the cluster always contains the mood
    /// itself and Neutral, so content search never comes up narrower than
    /// the exact mood plus the neutral baseline.
    pub fn related(&self) -> Vec<Mood> {
        let cluster: &[Mood] = match self {
            Mood::Sad => &[Mood::Sad, Mood::Neutral, Mood::Cheerful],
            Mood::Depressed => &[Mood::Depressed, Mood::Sad, Mood::Neutral, Mood::Cheerful],
            Mood::Angry => &[Mood::Angry, Mood::Neutral, Mood::Happy],
            Mood::Fear => &[Mood::Fear, Mood::Neutral, Mood::Happy],
            Mood::Stressed => &[Mood::Stressed, Mood::Neutral, Mood::Happy],
            Mood::Guilt => &[Mood::Guilt, Mood::Neutral, Mood::Happy],
            Mood::Lonely => &[Mood::Lonely, Mood::Neutral, Mood::Cheerful],
            other => {
                // Unmapped moods fall back to {mood, Neutral, Happy},
                // skipping duplicates when the mood already is one of them.
                let mut cluster = vec![*other];
                for m in [Mood::Neutral, Mood::Happy] {
                    if !cluster.contains(&m) {
                        cluster.push(m);
                    }
                }
                return cluster;
            }
        };
        cluster.to_vec()
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mood {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}
