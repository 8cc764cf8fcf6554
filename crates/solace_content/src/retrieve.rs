//! Mood-keyed content retrieval.
//!
//! A pure function of the catalog and the supplied random source: no I/O,
//! no state. The RNG is a parameter so tests can seed it and assert
//! deterministic picks.

use crate::catalog::{Exercise, ResourceCatalog};
use rand::seq::SliceRandom;
use rand::Rng;
use solace_core::Mood;
use std::collections::HashSet;
use std::sync::Arc;

/// Literal quotes used when the catalog has nothing for the mood or for
/// Neutral.
pub const DEFAULT_QUOTES: [&str; 2] = ["Stay positive!", "You are stronger than you think!"];

/// A named media item with its YouTube search link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLink {
    pub name: String,
    pub url: String,
}

/// One random media draw for a mood.
#[derive(Debug, Clone, Default)]
pub struct MediaSelection {
    pub song: Option<MediaLink>,
    pub movie: Option<String>,
    pub video: Option<MediaLink>,
}

/// The deduplicated candidate pools a selection is drawn from.
#[derive(Debug, Clone, Default)]
pub struct MediaPool {
    pub songs: Vec<String>,
    pub movies: Vec<String>,
    pub videos: Vec<String>,
}

pub fn youtube_search_url(name: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}",
        name.replace(' ', "+")
    )
}

#[derive(Clone)]
pub struct ContentRetriever {
    catalog: Arc<ResourceCatalog>,
}

impl ContentRetriever {
    pub fn new(catalog: Arc<ResourceCatalog>) -> Self {
        Self { catalog }
    }

    /// Pick a quote for the mood: mood's list, then Neutral's, then the
    /// fixed literals. Non-deterministic by design for variety.
    pub fn quote<R: Rng>(&self, mood: Mood, rng: &mut R) -> String {
        let from_catalog = self
            .catalog
            .quotes
            .get(&mood)
            .filter(|list| !list.is_empty())
            .or_else(|| {
                self.catalog
                    .quotes
                    .get(&Mood::Neutral)
                    .filter(|list| !list.is_empty())
            });
        match from_catalog {
            Some(list) => list.choose(rng).cloned().unwrap_or_default(),
            None => DEFAULT_QUOTES.choose(rng).copied().unwrap_or("").to_string(),
        }
    }

    /// Union the media sets of every related mood, deduplicated across the
    /// whole cluster so an item listed under two related moods is not
    /// over-weighted in the draw.
    pub fn media_pool(&self, mood: Mood) -> MediaPool {
        let mut pool = MediaPool::default();
        for related in mood.related() {
            if let Some(set) = self.catalog.media.get(&related) {
                pool.songs.extend(set.songs.iter().cloned());
                pool.movies.extend(set.movies.iter().cloned());
                pool.videos.extend(set.videos.iter().cloned());
            }
        }
        dedup_in_order(&mut pool.songs);
        dedup_in_order(&mut pool.movies);
        dedup_in_order(&mut pool.videos);
        pool
    }

    /// Draw one song, one movie, one video independently and uniformly from
    /// the pools; each is None when its pool is empty.
    pub fn media<R: Rng>(&self, mood: Mood, rng: &mut R) -> MediaSelection {
        let pool = self.media_pool(mood);
        MediaSelection {
            song: pool.songs.choose(rng).map(|name| MediaLink {
                name: name.clone(),
                url: youtube_search_url(name),
            }),
            movie: pool.movies.choose(rng).cloned(),
            video: pool.videos.choose(rng).map(|name| MediaLink {
                name: name.clone(),
                url: youtube_search_url(name),
            }),
        }
    }

    /// First exercise (in catalog iteration order) whose targets contain
    /// the mood.
    pub fn exercise_for(&self, mood: Mood) -> Option<&Exercise> {
        self.catalog
            .exercises
            .values()
            .find(|ex| ex.target_moods.contains(&mood))
    }

    /// Exercise for the quick-action path: always keyed to Stressed/Fear
    /// regardless of the originating mood, since the catalog's calming
    /// exercises are what every category's Exercise button offers.
    pub fn relief_exercise(&self) -> Option<&Exercise> {
        self.catalog
            .exercises
            .values()
            .find(|ex| {
                ex.target_moods.contains(&Mood::Stressed) || ex.target_moods.contains(&Mood::Fear)
            })
    }
}

fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}
