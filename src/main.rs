use anyhow::Result;
use clap::Parser;
use clap::builder::TypedValueParser;
use kochcw::config::{
    DEFAULT_CHAR_WPM, DEFAULT_EFFECTIVE_WPM, DEFAULT_FILES_PER_LESSON, DEFAULT_SAMPLE_RATE,
    DEFAULT_TONE_FREQ, MAX_FILES_PER_LESSON,
};
use kochcw::{GenerationConfig, KochTrainer, Stage, WeightMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Character speed in words per minute
    #[arg(long, default_value_t = DEFAULT_CHAR_WPM)]
    char_wpm: u32,

    /// Effective (Farnsworth) speed in words per minute, at most the character speed
    #[arg(long, default_value_t = DEFAULT_EFFECTIVE_WPM)]
    effective_wpm: u32,

    /// Tone frequency in Hz
    #[arg(long, default_value_t = DEFAULT_TONE_FREQ)]
    tone: f64,

    /// Output sample rate in Hz
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// How often each lesson character is drawn
    #[arg(long, value_enum, default_value_t = WeightMode::Gradual)]
    mode: WeightMode,

    /// Practice files per lesson
    #[arg(long, default_value_t = DEFAULT_FILES_PER_LESSON,
          value_parser = clap::value_parser!(u16).range(1..=MAX_FILES_PER_LESSON as i64).map(usize::from))]
    files_per_lesson: usize,

    /// Output root for Character/ and Lesson-NN/
    #[arg(short, long, value_name = "DIR", default_value = "Resource")]
    output: PathBuf,

    /// Seed for the practice text; a random seed is used and logged when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Which part of the curriculum to generate
    #[arg(long, value_enum, default_value_t = Stage::All)]
    stage: Stage,
}

fn main() -> Result<()> {
    // Set up logging. Use `RUST_LOG=debug` for timing and weight detail.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = GenerationConfig {
        char_wpm: cli.char_wpm,
        effective_wpm: cli.effective_wpm,
        tone_freq: cli.tone,
        sample_rate: cli.sample_rate,
        weight_mode: cli.mode,
        files_per_lesson: cli.files_per_lesson,
        output_dir: cli.output,
        seed: cli.seed,
        ..Default::default()
    };

    let trainer = KochTrainer::new(config)?;
    let mut rng = trainer.seeded_rng();
    let report = trainer.run(cli.stage, &mut rng)?;

    println!("\n--- Koch Training Material ---");
    println!("Output:  {}", trainer.config().output_dir.display());
    println!("Written: {}", report.written);
    println!("Skipped: {}", report.skipped);

    Ok(())
}
