use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use narezka_core::{
    ApiCompleter, ApiTranslator, FfmpegEngine, Pipeline, PipelineConfig, PipelineOutcome,
    Provider, SuggestionClient, TransitionOutcome, WhisperCli, get_workdir,
};

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", secs / 60.0, secs % 60.0)
    }
}

/// CLI wrapper for Provider enum (needed for clap ValueEnum)
#[derive(Clone, Default, ValueEnum)]
enum CliProvider {
    #[default]
    Groq,
    Openai,
    Gemini,
}

impl From<CliProvider> for Provider {
    fn from(cli: CliProvider) -> Self {
        match cli {
            CliProvider::Groq => Provider::Groq,
            CliProvider::Openai => Provider::Openai,
            CliProvider::Gemini => Provider::Gemini,
        }
    }
}

#[derive(Parser)]
#[command(name = "narezka")]
#[command(
    about = "Cut a video into topic segments with Whisper, apply AI-suggested effects and transitions, and stitch the final cut"
)]
struct Cli {
    /// Input video file
    video: PathBuf,

    /// Language the transcript is translated to before topic analysis
    #[arg(short, long, default_value = "en")]
    lang: String,

    /// AI provider for translation and suggestions
    #[arg(short, long, default_value = "groq")]
    provider: CliProvider,

    /// Whisper model to transcribe with
    #[arg(short, long, default_value = "base")]
    model: String,

    /// Effects catalog file
    #[arg(long, default_value = "catalogs/effects.json")]
    effects: PathBuf,

    /// Transitions catalog file
    #[arg(long, default_value = "catalogs/transitions.json")]
    transitions: PathBuf,

    /// Working directory; defaults to a per-input cache directory
    #[arg(short, long)]
    workdir: Option<PathBuf>,

    /// Minimum delay in seconds before each uncached AI call
    #[arg(long, default_value_t = 2.0)]
    delay: f64,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let provider: Provider = cli.provider.into();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false),
        )
        .with(env_filter)
        .init();

    // Validate API key early
    if let Err(e) = provider.validate_api_key() {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    let workdir = cli.workdir.unwrap_or_else(|| get_workdir(&cli.video));

    println!(
        "\n{}  {}\n",
        style("narezka").cyan().bold(),
        style("Topic Cutter").dim()
    );
    println!(
        "{} {}",
        style("Input:").dim(),
        style(cli.video.display()).cyan()
    );
    println!(
        "{} {}",
        style("Workdir:").dim(),
        style(workdir.display()).cyan()
    );
    println!("{}", style("─".repeat(60)).dim());

    let completer = ApiCompleter::new(&provider)?;
    let client = SuggestionClient::new(Box::new(completer), Duration::from_secs_f64(cli.delay));
    let translator = ApiTranslator::new(&provider)?;

    let config = PipelineConfig {
        video_path: cli.video,
        workdir,
        effects_file: cli.effects,
        transitions_file: cli.transitions,
        target_language: cli.lang,
    };

    let mut pipeline = Pipeline::new(
        Box::new(FfmpegEngine),
        Box::new(WhisperCli { model: cli.model }),
        Box::new(translator),
        client,
        config,
    );

    let total_start = Instant::now();
    let spinner = create_spinner(&format!("Processing with {}...", provider.name()));
    let outcome = pipeline.run().await?;

    match outcome {
        PipelineOutcome::Completed(report) => {
            let applied = report
                .joins
                .iter()
                .filter(|j| matches!(j, TransitionOutcome::Applied { .. }))
                .count();
            spinner.finish_with_message(format!(
                "{} Assembled {} segments, {} transitions {}",
                style("✓").green().bold(),
                report.joins.len() + 1,
                applied,
                style(format!("[{}]", format_duration(total_start.elapsed()))).dim()
            ));
            println!(
                "\n{} {}",
                style("Saved:").dim(),
                style(report.output.display()).cyan()
            );
        }
        PipelineOutcome::NoTranscript => {
            spinner.finish_with_message(format!(
                "{} No speech recognized, nothing to cut",
                style("•").yellow().bold()
            ));
        }
        PipelineOutcome::NoSegments => {
            spinner.finish_with_message(format!(
                "{} No topic segments found, nothing to cut",
                style("•").yellow().bold()
            ));
        }
        PipelineOutcome::NoArtifacts => {
            spinner.finish_with_message(format!(
                "{} No segment clips could be built",
                style("•").yellow().bold()
            ));
        }
    }

    Ok(())
}
