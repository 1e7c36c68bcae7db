// src/trainer.rs
// Curriculum generation loop: drills and lessons, rendered in memory then written

use crate::config::GenerationConfig;
use crate::content::ContentGenerator;
use crate::encoder::MorseEncoder;
use crate::error::Result;
use crate::koch::{DRILL_COUNT, KOCH_SEQUENCE, KochPlanner, LESSON_COUNT, LessonDefinition};
use crate::rng::{create_rng, random_seed};
use crate::synth::AudioBuffer;
use crate::table::MorseTable;
use crate::writer;
use rand::Rng;
use rand_pcg::Pcg32;
use std::path::{Path, PathBuf};

/// Lessons whose weight vector is logged at info level.
const WEIGHT_LOG_LESSONS: usize = 5;

/// Which part of the curriculum to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Stage {
    /// Drills, then lessons.
    #[default]
    All,
    /// Only the single-character drills.
    Characters,
    /// Only the lesson practice files.
    Lessons,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemId {
    Drill { index: usize, character: char },
    Lesson { lesson: usize, file: usize },
}

impl ItemId {
    pub fn base_name(&self) -> String {
        match self {
            ItemId::Drill { index, .. } => format!("koch-{index:03}"),
            ItemId::Lesson { file, .. } => format!("koch-{file:03}"),
        }
    }

    pub fn dir(&self, root: &Path) -> PathBuf {
        match self {
            ItemId::Drill { .. } => root.join("Character"),
            ItemId::Lesson { lesson, .. } => root.join(format!("Lesson-{lesson:02}")),
        }
    }

    pub fn audio_path(&self, root: &Path) -> PathBuf {
        self.dir(root).join(format!("{}.wav", self.base_name()))
    }

    /// Drills ship audio only.
    pub fn text_path(&self, root: &Path) -> Option<PathBuf> {
        match self {
            ItemId::Drill { .. } => None,
            ItemId::Lesson { .. } => Some(self.dir(root).join(format!("{}.txt", self.base_name()))),
        }
    }
}

/// One rendered practice file, ready to be written.
#[derive(Debug, Clone)]
pub struct PracticeItem {
    pub id: ItemId,
    pub text: String,
    pub audio: AudioBuffer,
}

impl PracticeItem {
    /// Writes the audio and, for lessons, the text. Failures are logged and counted.
    pub fn write(self, root: &Path, report: &mut BatchReport) {
        let audio_path = self.id.audio_path(root);
        report.record(writer::save_audio(self.audio, &audio_path));
        if let Some(text_path) = self.id.text_path(root) {
            report.record(writer::save_text(&self.text, &text_path));
        }
    }
}

/// Files written and skipped over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub written: usize,
    pub skipped: usize,
}

impl BatchReport {
    pub fn record(&mut self, result: Result<()>) {
        match result {
            Ok(()) => self.written += 1,
            Err(e) => {
                log::warn!("Skipped: {}", e);
                self.skipped += 1;
            }
        }
    }

    pub fn total(&self) -> usize {
        self.written + self.skipped
    }
}

pub struct KochTrainer {
    config: GenerationConfig,
    encoder: MorseEncoder,
    planner: KochPlanner,
}

impl KochTrainer {
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        let timing = config.timing()?;
        let synth = config.synthesizer()?;
        log::debug!(
            "Timing: dit {:.4}s, dah {:.4}s, letter gap {:.4}s, word gap {:.4}s",
            timing.dit_time(),
            timing.dah_time(),
            timing.char_space_time(),
            timing.word_space_time()
        );
        Ok(Self {
            encoder: MorseEncoder::new(timing, synth),
            planner: KochPlanner::new(config.weight_mode),
            config,
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn planner(&self) -> &KochPlanner {
        &self.planner
    }

    /// Random source for the run: the configured seed, or a fresh one that is logged.
    pub fn seeded_rng(&self) -> Pcg32 {
        let seed = self.config.seed.unwrap_or_else(random_seed);
        log::info!("Practice text seed: {}", seed);
        create_rng(seed)
    }

    pub fn character_drill(&self, index: usize) -> Result<PracticeItem> {
        let character = KochPlanner::drill(index)?;
        let (text, audio) = ContentGenerator::new(&self.encoder)
            .single_character_pattern(character, self.config.drill_repeat);
        Ok(PracticeItem {
            id: ItemId::Drill { index, character },
            text,
            audio,
        })
    }

    pub fn lesson_practice<R: Rng + ?Sized>(
        &self,
        lesson: &LessonDefinition,
        file: usize,
        rng: &mut R,
    ) -> Result<PracticeItem> {
        let (text, audio) = ContentGenerator::new(&self.encoder).weighted_pattern_with(
            &lesson.characters,
            lesson.weights.as_deref(),
            self.config.layout,
            rng,
        )?;
        Ok(PracticeItem {
            id: ItemId::Lesson {
                lesson: lesson.number,
                file,
            },
            text,
            audio,
        })
    }

    pub fn create_character_drills(&self, report: &mut BatchReport) -> Result<()> {
        log::info!(
            "Generating {} character drills ({} repetitions each)",
            DRILL_COUNT,
            self.config.drill_repeat
        );
        for (index, character) in KochPlanner::drills() {
            let item = self.character_drill(index)?;
            log::info!(
                "{}.wav: '{}' ({}) x{}",
                item.id.base_name(),
                character,
                MorseTable::lookup(character).unwrap_or("?"),
                self.config.drill_repeat
            );
            item.write(&self.config.output_dir, report);
        }
        Ok(())
    }

    pub fn create_lessons<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        report: &mut BatchReport,
    ) -> Result<()> {
        log::info!(
            "Generating {} lessons, {} files each, {} groups of {}",
            LESSON_COUNT,
            self.config.files_per_lesson,
            self.config.layout.groups,
            self.config.layout.group_size
        );
        for lesson in self.planner.lessons() {
            let lesson = lesson?;
            log::info!("{}  characters: {}", lesson.dir_name(), lesson.char_set());
            if let Some(weights) = &lesson.weights {
                let rendered = lesson
                    .characters
                    .iter()
                    .zip(weights)
                    .map(|(c, w)| format!("{c}:{w:.2}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                if lesson.number <= WEIGHT_LOG_LESSONS {
                    log::info!("  weights: {}", rendered);
                } else {
                    log::debug!("  weights: {}", rendered);
                }
            }

            for file in 1..=self.config.files_per_lesson {
                let item = self.lesson_practice(&lesson, file, rng)?;
                log::info!("  {}: {}", item.id.base_name(), item.text);
                item.write(&self.config.output_dir, report);
            }
        }
        Ok(())
    }

    /// Runs `stage` and returns the file counts. Only configuration errors escape.
    pub fn run<R: Rng + ?Sized>(&self, stage: Stage, rng: &mut R) -> Result<BatchReport> {
        self.log_header();
        let mut report = BatchReport::default();
        if matches!(stage, Stage::All | Stage::Characters) {
            self.create_character_drills(&mut report)?;
        }
        if matches!(stage, Stage::All | Stage::Lessons) {
            self.create_lessons(rng, &mut report)?;
        }
        self.log_summary(stage, &report);
        Ok(report)
    }

    pub fn create_all<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<BatchReport> {
        self.run(Stage::All, rng)
    }

    fn log_header(&self) {
        let timing = self.encoder.timing();
        log::info!(
            "Character speed {} WPM, effective speed {} WPM{}",
            timing.char_wpm(),
            timing.effective_wpm(),
            if timing.is_farnsworth() {
                " (Farnsworth)"
            } else {
                ""
            }
        );
        log::info!(
            "Tone {} Hz at {} Hz, frequency mode: {}",
            self.config.tone_freq,
            self.config.sample_rate,
            self.config.weight_mode
        );
    }

    fn log_summary(&self, stage: Stage, report: &BatchReport) {
        let root = self.config.output_dir.display();
        if matches!(stage, Stage::All | Stage::Characters) {
            log::info!("{}/Character: koch-000.wav .. koch-{:03}.wav", root, DRILL_COUNT - 1);
        }
        if matches!(stage, Stage::All | Stage::Lessons) {
            log::info!(
                "{}/Lesson-01 .. Lesson-{:02}: koch-001 .. koch-{:03} (.wav + .txt)",
                root,
                LESSON_COUNT,
                self.config.files_per_lesson
            );
        }
        log::info!("Koch order: {}", KOCH_SEQUENCE.iter().collect::<String>());
        log::info!(
            "Done: {} files written, {} skipped",
            report.written,
            report.skipped
        );
    }
}
