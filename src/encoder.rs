// src/encoder.rs
// Text to Morse audio, built on the timing model and tone synthesizer

use crate::error::{KochError, Result};
use crate::synth::{AudioBuffer, ToneSynthesizer};
use crate::table::{MorseTable, WORD_SEPARATOR};
use crate::timing::TimingModel;

/// Silence before the first character so playback has time to start.
pub const LEAD_IN_SECONDS: f64 = 0.8;
/// Silence after the last character.
pub const TRAIL_OUT_SECONDS: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorseElement {
    Dot,
    Dash,
    ElementGap,
    LetterGap,
    WordGap,
    LeadIn,
    TrailOut,
}

impl MorseElement {
    /// Lead-in and trail-out padding, outside the keyed message.
    pub fn is_margin(&self) -> bool {
        matches!(self, MorseElement::LeadIn | MorseElement::TrailOut)
    }

    pub fn duration(&self, timing: &TimingModel) -> f64 {
        match self {
            MorseElement::Dot => timing.dit_time(),
            MorseElement::Dash => timing.dah_time(),
            MorseElement::ElementGap => timing.element_space_time(),
            MorseElement::LetterGap => timing.char_space_time(),
            MorseElement::WordGap => timing.word_space_time(),
            MorseElement::LeadIn => LEAD_IN_SECONDS,
            MorseElement::TrailOut => TRAIL_OUT_SECONDS,
        }
    }
}

pub struct MorseEncoder {
    timing: TimingModel,
    synth: ToneSynthesizer,
    dot: AudioBuffer,
    dash: AudioBuffer,
}

impl MorseEncoder {
    pub fn new(timing: TimingModel, synth: ToneSynthesizer) -> Self {
        // Every dit and every dah renders identically, so key them once.
        let dot = synth.generate_tone(timing.dit_time());
        let dash = synth.generate_tone(timing.dah_time());
        Self {
            timing,
            synth,
            dot,
            dash,
        }
    }

    pub fn timing(&self) -> &TimingModel {
        &self.timing
    }

    /// Tones with element gaps between them, none after the last.
    pub fn char_elements(&self, ch: char) -> Result<Vec<MorseElement>> {
        let code = MorseTable::lookup(ch).ok_or(KochError::UnknownCharacter(ch))?;
        let mut elements = Vec::with_capacity(code.len() * 2);
        for (idx, symbol) in code.chars().enumerate() {
            match symbol {
                '.' => elements.push(MorseElement::Dot),
                '-' => elements.push(MorseElement::Dash),
                _ => {}
            }
            if idx < code.len() - 1 {
                elements.push(MorseElement::ElementGap);
            }
        }
        Ok(elements)
    }

    /// The full element plan rendered by [`MorseEncoder::text_to_audio`].
    ///
    /// A space becomes a word gap. Any other character is followed by a letter
    /// gap unless it is the last character or the next one is a space, so a
    /// letter gap never stacks on a word gap. Characters missing from the table
    /// are logged and contribute no tones.
    pub fn text_elements(&self, text: &str) -> Vec<MorseElement> {
        let chars: Vec<char> = text.chars().collect();
        let mut result = vec![MorseElement::LeadIn];

        for (idx, &ch) in chars.iter().enumerate() {
            if ch == WORD_SEPARATOR {
                result.push(MorseElement::WordGap);
                continue;
            }

            match self.char_elements(ch) {
                Ok(elements) => result.extend(elements),
                Err(e) => log::warn!("Skipping character in {:?}: {}", text, e),
            }

            if let Some(&next) = chars.get(idx + 1) {
                if next != WORD_SEPARATOR {
                    result.push(MorseElement::LetterGap);
                }
            }
        }

        result.push(MorseElement::TrailOut);
        result
    }

    /// Exact keyed length in seconds, margins excluded and without sample rounding.
    pub fn keyed_duration(&self, text: &str) -> f64 {
        self.text_elements(text)
            .iter()
            .filter(|element| !element.is_margin())
            .map(|element| element.duration(&self.timing))
            .sum()
    }

    pub fn char_to_audio(&self, ch: char) -> Result<AudioBuffer> {
        let elements = self.char_elements(ch)?;
        Ok(self.render(&elements))
    }

    pub fn text_to_audio(&self, text: &str) -> AudioBuffer {
        self.render(&self.text_elements(text))
    }

    fn render(&self, elements: &[MorseElement]) -> AudioBuffer {
        let mut audio = AudioBuffer::new(self.synth.sample_rate());
        for &element in elements {
            match element {
                MorseElement::Dot => audio.append(&self.dot),
                MorseElement::Dash => audio.append(&self.dash),
                gap => audio.push_silence(self.synth.sample_count(gap.duration(&self.timing))),
            }
        }
        audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MorseElement::*;

    fn encoder(char_wpm: u32, effective_wpm: u32) -> MorseEncoder {
        MorseEncoder::new(
            TimingModel::new(char_wpm, effective_wpm).unwrap(),
            ToneSynthesizer::new(600.0, 44100).unwrap(),
        )
    }

    #[test]
    fn test_char_elements() {
        let encoder = encoder(20, 20);
        assert_eq!(
            encoder.char_elements('K').unwrap(),
            vec![Dash, ElementGap, Dot, ElementGap, Dash]
        );
        assert_eq!(encoder.char_elements('E').unwrap(), vec![Dot]);
        assert!(matches!(
            encoder.char_elements('#'),
            Err(KochError::UnknownCharacter('#'))
        ));
    }

    #[test]
    fn test_gap_before_word_gap_is_suppressed() {
        let encoder = encoder(20, 20);
        assert_eq!(
            encoder.text_elements("EE T"),
            vec![LeadIn, Dot, LetterGap, Dot, WordGap, Dash, TrailOut]
        );
        assert_eq!(encoder.text_elements(""), vec![LeadIn, TrailOut]);
    }

    #[test]
    fn test_unknown_character_keeps_spacing() {
        let encoder = encoder(20, 20);
        assert_eq!(
            encoder.text_elements("E#E"),
            vec![LeadIn, Dot, LetterGap, LetterGap, Dot, TrailOut]
        );
    }

    #[test]
    fn test_char_audio_length() {
        let encoder = encoder(20, 20);
        // K at 20 WPM: dah, gap, dit, gap, dah
        let audio = encoder.char_to_audio('K').unwrap();
        assert_eq!(audio.len(), 7938 + 2646 + 2646 + 2646 + 7938);
        assert!(encoder.char_to_audio('*').is_err());
    }

    #[test]
    fn test_text_audio_has_margins() {
        let encoder = encoder(20, 20);
        let audio = encoder.text_to_audio("E");
        let lead = (0.8f64 * 44100.0).round() as usize;
        let trail = (1.2f64 * 44100.0).round() as usize;
        assert_eq!(audio.len(), lead + 2646 + trail);
        assert!(audio.samples()[..lead].iter().all(|s| *s == 0.0));
        assert!(audio.samples()[lead + 2646..].iter().all(|s| *s == 0.0));
        assert!(audio.peak() > 0.9);
    }

    #[test]
    fn test_paris_keyed_duration() {
        for (c, e) in [(20, 20), (20, 10), (25, 7), (15, 13)] {
            let encoder = encoder(c, e);
            let expected = 60.0 / e as f64;
            let actual = encoder.keyed_duration("PARIS ");
            assert!(
                ((actual - expected) / expected).abs() < 1e-9,
                "{c}/{e} WPM: {actual} != {expected}"
            );
        }
    }
}
