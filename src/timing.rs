// src/timing.rs
// Words-per-minute to element durations, with Farnsworth spacing

use crate::error::{KochError, Result};

/// Seconds per dit at 1 WPM: "PARIS" is 50 dit units and there are 60 seconds a minute.
const DIT_SECONDS_AT_ONE_WPM: f64 = 1.2;
const SECONDS_PER_MINUTE: f64 = 60.0;

const DAH_UNITS: f64 = 3.0;
const CHAR_SPACE_UNITS: f64 = 3.0;
const WORD_SPACE_UNITS: f64 = 7.0;

// "PARIS " holds four character gaps (3 units each) and one word gap (7 units).
// Only valid for that reference word.
const PARIS_SPACE_UNITS: f64 = 19.0;

/// Durations in seconds derived from a character speed and an effective speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingModel {
    char_wpm: u32,
    effective_wpm: u32,
    dit_time: f64,
    dah_time: f64,
    element_space_time: f64,
    char_space_time: f64,
    word_space_time: f64,
}

impl TimingModel {
    pub fn new(char_wpm: u32, effective_wpm: u32) -> Result<Self> {
        if char_wpm == 0 {
            return Err(KochError::invalid_param("char_wpm", "must be positive"));
        }
        if effective_wpm == 0 {
            return Err(KochError::invalid_param("effective_wpm", "must be positive"));
        }
        if effective_wpm > char_wpm {
            return Err(KochError::invalid_param(
                "effective_wpm",
                format!("{effective_wpm} exceeds char_wpm {char_wpm}"),
            ));
        }

        let dit_time = DIT_SECONDS_AT_ONE_WPM / char_wpm as f64;
        let extra_per_unit = Self::farnsworth_extra_per_unit(char_wpm, effective_wpm);

        Ok(Self {
            char_wpm,
            effective_wpm,
            dit_time,
            dah_time: DAH_UNITS * dit_time,
            element_space_time: dit_time,
            char_space_time: CHAR_SPACE_UNITS * dit_time + CHAR_SPACE_UNITS * extra_per_unit,
            word_space_time: WORD_SPACE_UNITS * dit_time + WORD_SPACE_UNITS * extra_per_unit,
        })
    }

    /// Extra silence per spacing unit needed to stretch one reference word
    /// from `60 / char_wpm` to `60 / effective_wpm` seconds.
    fn farnsworth_extra_per_unit(char_wpm: u32, effective_wpm: u32) -> f64 {
        if effective_wpm >= char_wpm {
            return 0.0;
        }
        let char_time_per_word = SECONDS_PER_MINUTE / char_wpm as f64;
        let target_time_per_word = SECONDS_PER_MINUTE / effective_wpm as f64;
        let extra_time = target_time_per_word - char_time_per_word;
        extra_time / PARIS_SPACE_UNITS
    }

    pub fn char_wpm(&self) -> u32 {
        self.char_wpm
    }

    pub fn effective_wpm(&self) -> u32 {
        self.effective_wpm
    }

    pub fn is_farnsworth(&self) -> bool {
        self.effective_wpm < self.char_wpm
    }

    pub fn extra_per_unit(&self) -> f64 {
        Self::farnsworth_extra_per_unit(self.char_wpm, self.effective_wpm)
    }

    pub fn dit_time(&self) -> f64 {
        self.dit_time
    }

    pub fn dah_time(&self) -> f64 {
        self.dah_time
    }

    pub fn element_space_time(&self) -> f64 {
        self.element_space_time
    }

    pub fn char_space_time(&self) -> f64 {
        self.char_space_time
    }

    pub fn word_space_time(&self) -> f64 {
        self.word_space_time
    }
}
