//! Lyrics module - parsing and timeline resolution
//!
//! - `parser`: time-tagged XML lyric document parsing
//! - `timeline`: data model and per-tick highlight resolution

pub mod parser;
pub mod timeline;

// Re-export commonly used items
pub use parser::*;
pub use timeline::*;
