// src/config.rs
// Generation settings passed explicitly into the engine

use crate::content::{GroupLayout, WeightMode};
use crate::error::{KochError, Result};
use crate::synth::ToneSynthesizer;
use crate::timing::TimingModel;
use std::path::PathBuf;

pub const DEFAULT_CHAR_WPM: u32 = 20;
pub const DEFAULT_EFFECTIVE_WPM: u32 = 10;
pub const DEFAULT_TONE_FREQ: f64 = 600.0;
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_FILES_PER_LESSON: usize = 10;
pub const MAX_FILES_PER_LESSON: usize = 20;
pub const DEFAULT_DRILL_REPEAT: usize = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub char_wpm: u32,
    pub effective_wpm: u32,
    pub tone_freq: f64,
    pub sample_rate: u32,
    pub weight_mode: WeightMode,
    pub files_per_lesson: usize,
    /// Repetitions of the character in each drill file.
    pub drill_repeat: usize,
    pub layout: GroupLayout,
    /// Root holding `Character/` and `Lesson-NN/`.
    pub output_dir: PathBuf,
    /// Fixed seed for reproducible practice text.
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            char_wpm: DEFAULT_CHAR_WPM,
            effective_wpm: DEFAULT_EFFECTIVE_WPM,
            tone_freq: DEFAULT_TONE_FREQ,
            sample_rate: DEFAULT_SAMPLE_RATE,
            weight_mode: WeightMode::default(),
            files_per_lesson: DEFAULT_FILES_PER_LESSON,
            drill_repeat: DEFAULT_DRILL_REPEAT,
            layout: GroupLayout::default(),
            output_dir: PathBuf::from("Resource"),
            seed: None,
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<()> {
        self.timing()?;
        self.synthesizer()?;
        if !(1..=MAX_FILES_PER_LESSON).contains(&self.files_per_lesson) {
            return Err(KochError::invalid_param(
                "files_per_lesson",
                format!(
                    "{} is outside 1..={MAX_FILES_PER_LESSON}",
                    self.files_per_lesson
                ),
            ));
        }
        if self.drill_repeat == 0 {
            return Err(KochError::invalid_param("drill_repeat", "must be positive"));
        }
        if self.layout.groups == 0 || self.layout.group_size == 0 {
            return Err(KochError::invalid_param(
                "layout",
                "groups and group size must be positive",
            ));
        }
        Ok(())
    }

    pub fn timing(&self) -> Result<TimingModel> {
        TimingModel::new(self.char_wpm, self.effective_wpm)
    }

    pub fn synthesizer(&self) -> Result<ToneSynthesizer> {
        ToneSynthesizer::new(self.tone_freq, self.sample_rate)
    }

    pub fn character_dir(&self) -> PathBuf {
        self.output_dir.join("Character")
    }
}
