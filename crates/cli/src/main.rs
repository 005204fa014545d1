mod config_file;

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use meetscribe_core::audio::infrastructure::ffmpeg_audio_reader::FfmpegAudioReader;
use meetscribe_core::cleanup::domain::cleanup_config::CleanupConfig;
use meetscribe_core::cleanup::domain::transcript_cleaner::TranscriptCleaner;
use meetscribe_core::diarization::domain::diarizer::{DiarizationToken, Diarizer};
use meetscribe_core::diarization::domain::speaker_bounds::SpeakerBounds;
use meetscribe_core::diarization::infrastructure::hosted_diarizer::HostedDiarizer;
use meetscribe_core::output::domain::transcript_formatter::{console_line, format_timestamp};
use meetscribe_core::output::domain::transcript_writer::TranscriptWriter;
use meetscribe_core::output::infrastructure::text_file_writer::TextFileWriter;
use meetscribe_core::pipeline::pipeline_logger::StderrPipelineLogger;
use meetscribe_core::pipeline::transcribe_recording_use_case::TranscribeRecordingUseCase;
use meetscribe_core::shared::constants::DEFAULT_DIARIZATION_ENDPOINT;
use meetscribe_core::shared::model_resolver;
use meetscribe_core::transcription::domain::model_size::ModelSize;
use meetscribe_core::transcription::domain::transcription_backend::{
    SegmentSink, TranscriptionBackend,
};
use meetscribe_core::transcription::infrastructure::backend_selector::BackendSelector;
use meetscribe_core::transcription::infrastructure::whisper_cli_backend::WhisperCliBackend;
use meetscribe_core::transcription::infrastructure::whisper_rs_backend::WhisperRsBackend;

use config_file::ConfigFile;

const TOKEN_ENV_VARS: &[&str] = &["MEETSCRIBE_DIARIZATION_TOKEN", "HF_TOKEN"];

/// Transcribe meeting recordings locally, with speaker identification.
#[derive(Parser)]
#[command(name = "meetscribe")]
struct Cli {
    /// Input audio or video file.
    input: PathBuf,

    /// Whisper model size: tiny, base, small, medium, large-v3, turbo.
    #[arg(long, short)]
    model: Option<String>,

    /// Transcription language (ISO 639-1).
    #[arg(long, default_value = "en")]
    language: String,

    /// Disable speaker identification.
    #[arg(long)]
    no_diarize: bool,

    /// Keep the raw transcript (no artifact cleanup).
    #[arg(long)]
    no_cleanup: bool,

    /// Force the CPU backend instead of trying GPU first.
    #[arg(long)]
    cpu: bool,

    /// Hide per-segment progress while transcribing.
    #[arg(long)]
    no_progress: bool,

    /// Minimum expected speakers.
    #[arg(long)]
    min_speakers: Option<u32>,

    /// Maximum expected speakers.
    #[arg(long)]
    max_speakers: Option<u32>,

    /// Output transcript file (default: next to the input).
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Path to a config.json file.
    #[arg(long, short)]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        let mut source = std::error::Error::source(&*e);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config_file::load(cli.config.as_deref())?;

    let (model, bounds) = validate(&cli, &config)?;

    let model_path = model_resolver::resolve(model, None, Some(Box::new(download_progress)))?;
    eprintln!();

    let selector = build_selector(&cli, &config, model_path);
    let diarizer = build_diarizer(&cli, &config)?;

    let cleanup = if cli.no_cleanup {
        CleanupConfig::disabled()
    } else {
        config.cleanup
    };

    let progress: Option<SegmentSink> = if cli.no_progress {
        None
    } else {
        Some(Box::new(|segment| {
            eprintln!(
                "[{} -> {}] {}",
                format_timestamp(segment.start_time),
                format_timestamp(segment.end_time),
                segment.text.trim()
            );
        }))
    };

    let mut use_case = TranscribeRecordingUseCase::new(
        Box::new(FfmpegAudioReader),
        selector,
        diarizer,
        bounds,
        TranscriptCleaner::new(cleanup),
        progress,
        Box::new(StderrPipelineLogger::new()),
    );

    let segments = use_case.run(&cli.input)?;

    for segment in &segments {
        println!("{}", console_line(segment));
    }

    let output = output_path(&cli, &config);
    TextFileWriter.write(&output, &segments)?;
    log::info!("Transcript saved to {}", output.display());

    Ok(())
}

fn validate(
    cli: &Cli,
    config: &ConfigFile,
) -> Result<(ModelSize, SpeakerBounds), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }

    let model_name = cli
        .model
        .clone()
        .or_else(|| config.model.clone())
        .unwrap_or_else(|| ModelSize::LargeV3.as_str().to_string());
    let model: ModelSize = model_name.parse()?;

    let defaults = SpeakerBounds::default();
    let min = cli
        .min_speakers
        .or(config.min_speakers)
        .unwrap_or_else(|| defaults.min());
    let max = cli
        .max_speakers
        .or(config.max_speakers)
        .unwrap_or_else(|| defaults.max());
    let bounds = SpeakerBounds::new(min, max)?;

    Ok((model, bounds))
}

/// GPU first unless forced to CPU; the selector handles the fallback.
fn build_selector(cli: &Cli, config: &ConfigFile, model_path: PathBuf) -> BackendSelector {
    let fallback: Box<dyn TranscriptionBackend> = Box::new(WhisperRsBackend::new(
        model_path.clone(),
        cli.language.clone(),
    ));

    if cli.cpu {
        return BackendSelector::new(None, fallback);
    }

    match &config.whisper_cli_exe {
        Some(exe) => {
            let primary: Box<dyn TranscriptionBackend> = Box::new(WhisperCliBackend::new(
                exe.clone(),
                model_path,
                cli.language.clone(),
            ));
            BackendSelector::new(Some(primary), fallback)
        }
        None => {
            log::info!("No whisper.cpp executable configured; using CPU backend");
            BackendSelector::new(None, fallback)
        }
    }
}

/// Resolve the diarization credential once, at build time. No credential
/// means diarization is skipped for the run, not a fatal error.
fn build_diarizer(
    cli: &Cli,
    config: &ConfigFile,
) -> Result<Option<Box<dyn Diarizer>>, Box<dyn std::error::Error>> {
    if cli.no_diarize {
        return Ok(None);
    }

    let token = config
        .diarization_token
        .clone()
        .or_else(|| TOKEN_ENV_VARS.iter().find_map(|var| env::var(var).ok()));

    let token = match token {
        Some(token) => DiarizationToken::new(token),
        None => {
            log::warn!(
                "No diarization token found (set {} or add diarization_token to config.json); \
                 skipping speaker identification",
                TOKEN_ENV_VARS[0]
            );
            return Ok(None);
        }
    };

    let endpoint = config
        .diarization_endpoint
        .clone()
        .unwrap_or_else(|| DEFAULT_DIARIZATION_ENDPOINT.to_string());

    let diarizer = HostedDiarizer::new(endpoint, token)?;
    Ok(Some(Box::new(diarizer)))
}

fn output_path(cli: &Cli, config: &ConfigFile) -> PathBuf {
    if let Some(output) = &cli.output {
        return output.clone();
    }

    let file_name = cli
        .input
        .file_stem()
        .map(|stem| {
            let mut name = stem.to_os_string();
            name.push(".txt");
            PathBuf::from(name)
        })
        .unwrap_or_else(|| PathBuf::from("transcript.txt"));

    match &config.output_dir {
        Some(dir) => dir.join(file_name),
        None => cli
            .input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(file_name),
    }
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading Whisper model... {pct}%");
    } else {
        eprint!("\rDownloading Whisper model... {downloaded} bytes");
    }
}
