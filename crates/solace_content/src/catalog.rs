//! The static resource catalog: quotes, media, and exercises keyed by mood.
//!
//! Loaded once at startup and immutable thereafter, so it is safe to share
//! across any number of sessions without locking. Loading never fails: a
//! missing or malformed file reduces that piece of the catalog to empty and
//! the retriever's fallback chains take over.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use solace_core::Mood;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Media names suggested for one mood.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MediaSet {
    pub songs: Vec<String>,
    pub movies: Vec<String>,
    pub videos: Vec<String>,
}

/// A guided exercise with the moods it targets.
#[derive(Debug, Clone)]
pub struct Exercise {
    pub title: String,
    pub steps: Vec<String>,
    pub target_moods: Vec<Mood>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawExercise {
    title: String,
    steps: Vec<String>,
    target_moods: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    pub quotes: HashMap<Mood, Vec<String>>,
    pub media: HashMap<Mood, MediaSet>,
    /// BTreeMap so the linear exercise scan has a deterministic order.
    pub exercises: BTreeMap<String, Exercise>,
}

impl ResourceCatalog {
    /// Load all three catalogs. Each piece degrades independently to empty
    /// on any read or parse failure; mood keys that don't name a known mood
    /// are skipped rather than rejected.
    pub fn load(quotes_path: &Path, media_path: &Path, exercises_path: &Path) -> Self {
        let quotes = load_json::<HashMap<String, Vec<String>>>(quotes_path)
            .map(by_mood)
            .unwrap_or_default();
        let media = load_json::<HashMap<String, MediaSet>>(media_path)
            .map(by_mood)
            .unwrap_or_default();
        let exercises: BTreeMap<String, Exercise> =
            load_json::<BTreeMap<String, RawExercise>>(exercises_path)
            .map(|raw| {
                raw.into_iter()
                    .map(|(id, ex)| {
                        let target_moods = ex
                            .target_moods
                            .iter()
                            .filter_map(|name| match name.parse::<Mood>() {
                                Ok(mood) => Some(mood),
                                Err(_) => {
                                    tracing::warn!(
                                        "Skipping unknown target mood '{}' in exercise '{}'",
                                        name,
                                        id
                                    );
                                    None
                                }
                            })
                            .collect();
                        (
                            id,
                            Exercise {
                                title: ex.title,
                                steps: ex.steps,
                                target_moods,
                            },
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        tracing::info!(
            "Catalog loaded: {} quote moods, {} media moods, {} exercises",
            quotes.len(),
            media.len(),
            exercises.len()
        );

        Self {
            quotes,
            media,
            exercises,
        }
    }

    /// Assemble a catalog directly, bypassing the filesystem. Used by tests
    /// and by embedders that ship their own content.
    pub fn from_parts(
        quotes: HashMap<Mood, Vec<String>>,
        media: HashMap<Mood, MediaSet>,
        exercises: BTreeMap<String, Exercise>,
    ) -> Self {
        Self {
            quotes,
            media,
            exercises,
        }
    }
}

/// Re-key a string-keyed map by parsed mood, skipping unknown names.
fn by_mood<V>(raw: HashMap<String, V>) -> HashMap<Mood, V> {
    raw.into_iter()
        .filter_map(|(name, value)| match name.parse::<Mood>() {
            Ok(mood) => Some((mood, value)),
            Err(_) => {
                tracing::warn!("Skipping unknown mood key '{}' in catalog", name);
                None
            }
        })
        .collect()
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Catalog file {} unavailable: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!("Catalog file {} is malformed: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_missing_files_degrade_to_empty() {
        let catalog = ResourceCatalog::load(
            Path::new("/nonexistent/quotes.json"),
            Path::new("/nonexistent/media.json"),
            Path::new("/nonexistent/exercises.json"),
        );
        assert!(catalog.quotes.is_empty());
        assert!(catalog.media.is_empty());
        assert!(catalog.exercises.is_empty());
    }

    #[test]
    fn test_malformed_json_degrades_to_empty() {
        let quotes = write_temp("not json at all {");
        let catalog = ResourceCatalog::load(
            quotes.path(),
            Path::new("/nonexistent/media.json"),
            Path::new("/nonexistent/exercises.json"),
        );
        assert!(catalog.quotes.is_empty());
    }

    #[test]
    fn test_unknown_mood_keys_are_skipped() {
        let quotes = write_temp(r#"{"Sad": ["q1"], "Melancholy": ["q2"]}"#);
        let catalog = ResourceCatalog::load(
            quotes.path(),
            Path::new("/nonexistent/media.json"),
            Path::new("/nonexistent/exercises.json"),
        );
        assert_eq!(catalog.quotes.len(), 1);
        assert_eq!(catalog.quotes[&Mood::Sad], vec!["q1".to_string()]);
    }

    #[test]
    fn test_exercises_parse_with_target_moods() {
        let exercises = write_temp(
            r#"{
                "box_breathing": {
                    "title": "Box Breathing",
                    "steps": ["Inhale 4", "Hold 4", "Exhale 4", "Hold 4"],
                    "target_moods": ["Stressed", "Fear", "Unknown"]
                }
            }"#,
        );
        let catalog = ResourceCatalog::load(
            Path::new("/nonexistent/quotes.json"),
            Path::new("/nonexistent/media.json"),
            exercises.path(),
        );
        let ex = &catalog.exercises["box_breathing"];
        assert_eq!(ex.title, "Box Breathing");
        assert_eq!(ex.steps.len(), 4);
        assert_eq!(ex.target_moods, vec![Mood::Stressed, Mood::Fear]);
    }
}
