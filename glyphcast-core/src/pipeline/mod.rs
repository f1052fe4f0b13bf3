//! Text display pipeline

pub mod controller;
pub mod state;

pub use controller::{DisplayOptions, GlyphDisplay, ItemError, ItemReport};
pub use state::{ItemEvent, ItemState};
