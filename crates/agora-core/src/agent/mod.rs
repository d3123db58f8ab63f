//! Agent-turn machinery: prompt assembly, mention extraction, the
//! summarizer, and the background turn scheduler.

pub mod mentions;
pub mod prompt;
pub mod scheduler;
pub mod summarizer;

pub use scheduler::{Pacing, TurnScheduler};
