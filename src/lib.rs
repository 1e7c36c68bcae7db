// src/lib.rs
// Library interface for kochcw

pub mod config;
pub mod content;
pub mod encoder;
pub mod error;
pub mod koch;
pub mod rng;
pub mod synth;
pub mod table;
pub mod timing;
pub mod trainer;
pub mod writer;

pub use config::GenerationConfig;
pub use content::{ContentGenerator, GroupLayout, WeightMode};
pub use encoder::{MorseElement, MorseEncoder};
pub use error::{KochError, Result};
pub use koch::{KOCH_SEQUENCE, KochPlanner, LessonDefinition};
pub use synth::{AudioBuffer, ToneSynthesizer};
pub use table::MorseTable;
pub use timing::TimingModel;
pub use trainer::{BatchReport, ItemId, KochTrainer, PracticeItem, Stage};
