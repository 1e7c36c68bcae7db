// src/content.rs
// Practice text selection: single-character drills and weighted random groups

use crate::encoder::MorseEncoder;
use crate::error::{KochError, Result};
use crate::synth::AudioBuffer;
use crate::table::{MorseTable, WORD_SEPARATOR};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use std::fmt;

/// How often each character of a lesson is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum WeightMode {
    /// Every character equally likely.
    Uniform,
    /// The newest character twice as likely.
    NewCharFocus,
    /// The newest character one and a half times as likely.
    #[default]
    Gradual,
    /// Longer codes more likely.
    Difficulty,
}

const NEW_CHAR_FOCUS_WEIGHT: f64 = 2.0;
const GRADUAL_WEIGHT: f64 = 1.5;
const DIFFICULTY_PER_SYMBOL: f64 = 0.15;

impl WeightMode {
    /// Weight vector aligned with `char_set`, or `None` for uniform draws.
    /// The newest character is the last one in the set.
    pub fn weights(&self, char_set: &[char]) -> Result<Option<Vec<f64>>> {
        let newest_weighted = |newest: f64| {
            let mut weights = vec![1.0; char_set.len()];
            if let Some(last) = weights.last_mut() {
                *last = newest;
            }
            Some(weights)
        };

        let weights = match self {
            WeightMode::Uniform => None,
            WeightMode::NewCharFocus => newest_weighted(NEW_CHAR_FOCUS_WEIGHT),
            WeightMode::Gradual => newest_weighted(GRADUAL_WEIGHT),
            WeightMode::Difficulty => Some(
                char_set
                    .iter()
                    .map(|&ch| {
                        let len = MorseTable::code_len(ch).ok_or(KochError::UnknownCharacter(ch))?;
                        Ok(1.0 + DIFFICULTY_PER_SYMBOL * len as f64)
                    })
                    .collect::<Result<Vec<f64>>>()?,
            ),
        };
        Ok(weights)
    }

    pub fn description(&self) -> &'static str {
        match self {
            WeightMode::Uniform => "uniform distribution",
            WeightMode::NewCharFocus => "new character focus (2x frequency)",
            WeightMode::Gradual => "gradual (new character 1.5x)",
            WeightMode::Difficulty => "difficulty weighted by code length",
        }
    }
}

impl fmt::Display for WeightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Shape of a practice text: `groups` blocks of `group_size` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupLayout {
    pub groups: usize,
    pub group_size: usize,
}

impl Default for GroupLayout {
    fn default() -> Self {
        Self {
            groups: 10,
            group_size: 5,
        }
    }
}

impl GroupLayout {
    /// Characters plus single separators, no trailing space.
    pub fn text_len(&self) -> usize {
        self.groups * self.group_size + self.groups.saturating_sub(1)
    }
}

pub struct ContentGenerator<'a> {
    encoder: &'a MorseEncoder,
}

impl<'a> ContentGenerator<'a> {
    pub fn new(encoder: &'a MorseEncoder) -> Self {
        Self { encoder }
    }

    pub fn single_character_text(ch: char, count: usize) -> String {
        std::iter::repeat_n(ch, count).collect()
    }

    /// `ch` repeated `count` times with no separators, and its audio.
    pub fn single_character_pattern(&self, ch: char, count: usize) -> (String, AudioBuffer) {
        let text = Self::single_character_text(ch, count);
        let audio = self.encoder.text_to_audio(&text);
        (text, audio)
    }

    /// Draws every character independently, with replacement.
    pub fn weighted_text<R: Rng + ?Sized>(
        char_set: &[char],
        weights: Option<&[f64]>,
        layout: GroupLayout,
        rng: &mut R,
    ) -> Result<String> {
        if char_set.is_empty() {
            return Err(KochError::invalid_param("char_set", "must not be empty"));
        }
        if layout.groups == 0 || layout.group_size == 0 {
            return Err(KochError::invalid_param(
                "layout",
                format!(
                    "{} groups of {} characters is empty",
                    layout.groups, layout.group_size
                ),
            ));
        }

        let dist = match weights {
            Some(weights) if weights.len() != char_set.len() => {
                return Err(KochError::invalid_param(
                    "weights",
                    format!(
                        "{} weights for {} characters",
                        weights.len(),
                        char_set.len()
                    ),
                ));
            }
            Some(weights) => Some(
                WeightedIndex::new(weights)
                    .map_err(|e| KochError::invalid_param("weights", e.to_string()))?,
            ),
            None => None,
        };

        let mut text = String::with_capacity(layout.text_len());
        for group in 0..layout.groups {
            if group > 0 {
                text.push(WORD_SEPARATOR);
            }
            for _ in 0..layout.group_size {
                let idx = match &dist {
                    Some(dist) => dist.sample(rng),
                    None => rng.gen_range(0..char_set.len()),
                };
                text.push(char_set[idx]);
            }
        }
        Ok(text)
    }

    /// Random groups drawn under `mode`, and their audio.
    pub fn weighted_pattern<R: Rng + ?Sized>(
        &self,
        char_set: &[char],
        layout: GroupLayout,
        mode: WeightMode,
        rng: &mut R,
    ) -> Result<(String, AudioBuffer)> {
        let weights = mode.weights(char_set)?;
        self.weighted_pattern_with(char_set, weights.as_deref(), layout, rng)
    }

    /// Same as [`ContentGenerator::weighted_pattern`] with a precomputed weight vector.
    pub fn weighted_pattern_with<R: Rng + ?Sized>(
        &self,
        char_set: &[char],
        weights: Option<&[f64]>,
        layout: GroupLayout,
        rng: &mut R,
    ) -> Result<(String, AudioBuffer)> {
        let text = Self::weighted_text(char_set, weights, layout, rng)?;
        let audio = self.encoder.text_to_audio(&text);
        Ok((text, audio))
    }
}
