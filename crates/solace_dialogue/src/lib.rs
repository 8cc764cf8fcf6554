pub mod engine;
pub mod phrases;

pub use engine::DialogueEngine;
