//! Shared types for RLHF Quest: curriculum, progress tracking, storage and
//! configuration. Front ends live in `questctl`.

pub mod config;
pub mod curriculum;
pub mod display;
pub mod error;
pub mod progress;
pub mod storage;

pub use config::{ColorMode, EmojiMode, QuestConfig};
pub use curriculum::{Curriculum, Level, Resource, LEVELS};
pub use error::QuestError;
pub use progress::{
    compute_view, newly_unlocked, LevelStatus, LevelView, ProgressController, ProgressView,
    ToggleOutcome, UnlockPolicy,
};
pub use storage::{FileStorage, MemoryStorage, Storage, COMPLETED_KEY};
