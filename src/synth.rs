// src/synth.rs
// Sine tone and silence rendering

use crate::error::{KochError, Result};
use std::f64::consts::PI;

/// Length of the linear click-suppression ramp at each end of a tone.
const FADE_SECONDS: f64 = 0.005;

/// Mono float samples in roughly [-1, 1] at a fixed sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            samples: Vec::new(),
            sample_rate,
        }
    }

    pub fn from_samples(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value, zero for an empty buffer.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |peak, s| peak.max(s.abs()))
    }

    pub fn append(&mut self, other: &AudioBuffer) {
        debug_assert_eq!(self.sample_rate, other.sample_rate);
        self.samples.extend_from_slice(&other.samples);
    }

    pub fn push_silence(&mut self, samples: usize) {
        self.samples.resize(self.samples.len() + samples, 0.0);
    }
}

pub struct ToneSynthesizer {
    tone_freq: f64,
    sample_rate: u32,
}

impl ToneSynthesizer {
    pub fn new(tone_freq: f64, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(KochError::invalid_param("sample_rate", "must be positive"));
        }
        if !tone_freq.is_finite() || tone_freq <= 0.0 {
            return Err(KochError::invalid_param(
                "tone_freq",
                format!("{tone_freq} Hz is not a positive frequency"),
            ));
        }
        let nyquist = sample_rate as f64 / 2.0;
        if tone_freq >= nyquist {
            return Err(KochError::invalid_param(
                "tone_freq",
                format!("{tone_freq} Hz is at or above the Nyquist limit of {nyquist} Hz"),
            ));
        }
        Ok(Self {
            tone_freq,
            sample_rate,
        })
    }

    pub fn tone_freq(&self) -> f64 {
        self.tone_freq
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Sample count used for every rendered duration.
    pub fn sample_count(&self, duration: f64) -> usize {
        (self.sample_rate as f64 * duration).round().max(0.0) as usize
    }

    pub fn fade_samples(&self) -> usize {
        self.sample_count(FADE_SECONDS)
    }

    pub fn generate_tone(&self, duration: f64) -> AudioBuffer {
        let samples = self.sample_count(duration);
        let sample_rate = self.sample_rate as f64;
        let mut tone: Vec<f32> = (0..samples)
            .map(|i| {
                let t = i as f64 / sample_rate;
                (2.0 * PI * self.tone_freq * t).sin() as f32
            })
            .collect();

        let fade = self.fade_samples();
        if fade > 0 && tone.len() >= 2 * fade {
            let len = tone.len();
            for i in 0..fade {
                let gain = ramp(i, fade);
                tone[i] *= gain;
                tone[len - 1 - i] *= gain;
            }
        }

        AudioBuffer::from_samples(tone, self.sample_rate)
    }

    pub fn generate_silence(&self, duration: f64) -> AudioBuffer {
        AudioBuffer::from_samples(vec![0.0; self.sample_count(duration)], self.sample_rate)
    }
}

/// Linear 0..=1 ramp across `len` points.
fn ramp(i: usize, len: usize) -> f32 {
    if len < 2 {
        return 0.0;
    }
    (i as f64 / (len - 1) as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_counts_round() {
        let synth = ToneSynthesizer::new(600.0, 44100).unwrap();
        assert_eq!(synth.generate_tone(0.06).len(), 2646);
        assert_eq!(synth.generate_silence(0.8).len(), 35280);
        // 0.1 ms at 44.1 kHz is 4.41 samples
        assert_eq!(synth.sample_count(0.0001), 4);
        assert_eq!(synth.fade_samples(), 221);
        assert!(synth.generate_tone(0.0).is_empty());
    }

    #[test]
    fn test_tone_shape() {
        let synth = ToneSynthesizer::new(600.0, 44100).unwrap();
        let tone = synth.generate_tone(0.18);
        let samples = tone.samples();
        let fade = synth.fade_samples();

        assert_eq!(samples[0], 0.0);
        assert_eq!(*samples.last().unwrap(), 0.0);
        assert!(samples.iter().all(|s| s.abs() <= 1.0));
        // Body is unattenuated
        let body_peak = samples[fade..samples.len() - fade]
            .iter()
            .fold(0.0f32, |p, s| p.max(s.abs()));
        assert!(body_peak > 0.99);
        // Fade-in stays under the ramp
        for (i, s) in samples[..fade].iter().enumerate() {
            assert!(s.abs() <= ramp(i, fade) + 1e-6);
        }
    }

    #[test]
    fn test_short_tone_is_not_faded() {
        let synth = ToneSynthesizer::new(600.0, 44100).unwrap();
        // 8 ms is shorter than two 5 ms ramps
        let tone = synth.generate_tone(0.008);
        let t = 10.0 / 44100.0;
        let expected = (2.0 * PI * 600.0 * t).sin() as f32;
        assert_eq!(tone.samples()[10], expected);
    }

    #[test]
    fn test_silence_is_zero() {
        let synth = ToneSynthesizer::new(700.0, 8000).unwrap();
        let silence = synth.generate_silence(0.25);
        assert_eq!(silence.len(), 2000);
        assert_eq!(silence.peak(), 0.0);
        assert_eq!(silence.sample_rate(), 8000);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(ToneSynthesizer::new(600.0, 0).is_err());
        assert!(ToneSynthesizer::new(0.0, 44100).is_err());
        assert!(ToneSynthesizer::new(-5.0, 44100).is_err());
        assert!(ToneSynthesizer::new(f64::NAN, 44100).is_err());
        assert!(ToneSynthesizer::new(4000.0, 8000).is_err());
    }

    #[test]
    fn test_buffer_append() {
        let synth = ToneSynthesizer::new(100.0, 1000).unwrap();
        let mut buffer = AudioBuffer::new(1000);
        buffer.append(&synth.generate_tone(0.1));
        buffer.push_silence(50);
        assert_eq!(buffer.len(), 150);
        assert!((buffer.duration() - 0.15).abs() < 1e-12);
        assert!(buffer.peak() > 0.0);
    }
}
