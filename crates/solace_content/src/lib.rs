pub mod catalog;
pub mod retrieve;

pub use catalog::{Exercise, MediaSet, ResourceCatalog};
pub use retrieve::{youtube_search_url, ContentRetriever, MediaLink, MediaPool, MediaSelection};
