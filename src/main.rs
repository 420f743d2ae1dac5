use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use colloquy::{
    extract_entities, parse_transcript, process_audio, write_json, Engines, ErrorBody,
    KeywordExtractor, PipelineConfig, MAX_KEYWORDS,
};

#[derive(Parser)]
#[command(name = "colloquy")]
#[command(author, version, about = "Speaker-attributed transcription and enrichment pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process an audio file into enriched per-speaker segments
    Process {
        /// Input audio file (any format ffmpeg can read)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the JSON response (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the noise reduction pass
        #[arg(long)]
        no_denoise: bool,

        /// ffmpeg executable (overrides FFMPEG_BIN)
        #[arg(long)]
        ffmpeg: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze a saved transcription dump without running any collaborator
    Analyze {
        /// Input transcript file (timestamped text lines)
        #[arg(short, long)]
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output,
            no_denoise,
            ffmpeg,
            verbose,
        } => {
            setup_logging(verbose);
            run_process(input, output, no_denoise, ffmpeg).await
        }
        Commands::Analyze { input, verbose } => {
            setup_logging(verbose);
            analyze_transcript(input)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn run_process(
    input: PathBuf,
    output: Option<PathBuf>,
    no_denoise: bool,
    ffmpeg: Option<PathBuf>,
) -> Result<()> {
    let engines = Engines::from_env()?;

    let mut config = PipelineConfig::from_env();
    if let Some(path) = ffmpeg {
        config.ffmpeg = path;
    }
    if no_denoise {
        config.denoise = false;
    }

    match process_audio(&input, &engines, &config).await {
        Ok(response) => {
            write_json(&response, output.as_deref())?;
            info!(results = response.results.len(), "output written");
            Ok(())
        }
        Err(err) => {
            write_json(&ErrorBody::from_error(&err), output.as_deref())?;
            Err(err.into())
        }
    }
}

fn analyze_transcript(input: PathBuf) -> Result<()> {
    info!("Analyzing transcript from {:?}", input);
    let raw = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read transcript file: {:?}", input))?;
    let parsed = parse_transcript(&raw);

    println!("Transcript Analysis");
    println!("==================");
    println!("Segments: {}", parsed.segments.len());
    println!("Skipped lines: {}", parsed.skipped_lines);
    println!("Span: {:.1}s", parsed.span_secs());
    println!(
        "Words: {}",
        parsed.full_text.split_whitespace().count()
    );
    println!();

    let extractor = KeywordExtractor::new();
    let keywords = extractor.extract(&parsed.full_text, MAX_KEYWORDS);
    println!("Top Keywords");
    println!("------------");
    if keywords.is_empty() {
        println!("(none)");
    }
    for keyword in &keywords {
        println!("- {}", keyword);
    }
    println!();

    let entities = extract_entities(&parsed.full_text);
    println!("Entities");
    println!("--------");
    if entities.is_empty() {
        println!("(none)");
    }
    for entity in &entities {
        println!("- {} [{}]", entity.name, entity.kind);
    }

    Ok(())
}
