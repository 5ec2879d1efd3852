//! `elevenlabs` - command line client for the ElevenLabs API

mod commands;
mod format;
mod playback;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use elevenlabs_lib::types::{Age, Gender, OutputFormat, TranscriptFormat};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "elevenlabs")]
#[command(about = "Text-to-speech, voices and dubbing from the ElevenLabs API", version)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// API key (defaults to config file, then ELEVEN_LABS_API_KEY)
    #[arg(long, global = true, value_name = "KEY")]
    api_key: Option<String>,

    /// Config file [default: ./.elevenlabs.toml, then the user config dir]
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the voices available to the account
    Voices {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one voice
    Voice {
        #[arg(value_name = "VOICE_ID")]
        voice_id: String,

        /// Include the voice's settings
        #[arg(long)]
        settings: bool,
    },

    /// List synthesis models
    Models {
        #[arg(long)]
        json: bool,
    },

    /// Show account information
    User,

    /// Show subscription quota and billing
    Subscription,

    /// List past syntheses
    History {
        /// Items per page
        #[arg(long, default_value_t = 20)]
        page_size: u32,

        /// Only show items for this voice
        #[arg(long, value_name = "VOICE_ID")]
        voice: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Synthesize speech
    Speak {
        #[arg(value_name = "VOICE_ID")]
        voice_id: String,

        /// Text to speak (use "-" to read from stdin)
        #[arg(value_name = "TEXT")]
        text: String,

        /// Model id, e.g. eleven_multilingual_v2
        #[arg(long)]
        model: Option<String>,

        /// Audio encoding
        #[arg(long, default_value_t = OutputFormat::default())]
        format: OutputFormat,

        /// Stream chunks as they arrive
        #[arg(long)]
        stream: bool,

        /// Latency optimization level (0-4), streaming only
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=4))]
        latency: Option<u8>,

        /// Also write the audio here ("-" for stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate a sound effect from a prompt
    Sfx {
        #[arg(value_name = "PROMPT")]
        prompt: String,

        /// Length in seconds (0.5-22)
        #[arg(long)]
        duration: Option<f64>,

        /// How closely to follow the prompt (0-1)
        #[arg(long)]
        influence: Option<f64>,
    },

    /// Generate a preview of a new voice
    DesignVoice {
        /// Sample text, 100-1000 characters
        #[arg(value_name = "TEXT")]
        text: String,

        #[arg(long)]
        gender: Gender,

        #[arg(long, default_value = "american")]
        accent: String,

        #[arg(long, default_value_t = Age::MiddleAged)]
        age: Age,

        /// Accent strength, clamped to 0.3-2.0
        #[arg(long, default_value_t = 1.0)]
        strength: f64,
    },

    /// Save a previewed voice to the account
    CreateVoice {
        #[arg(value_name = "NAME")]
        name: String,

        #[arg(value_name = "DESCRIPTION")]
        description: String,

        #[arg(value_name = "GENERATED_VOICE_ID")]
        generated_voice_id: String,
    },

    /// Dub a media file or URL into another language
    Dub {
        /// Local media file
        #[arg(value_name = "FILE", required_unless_present = "url", conflicts_with = "url")]
        file: Option<PathBuf>,

        /// Remote media URL
        #[arg(long)]
        url: Option<String>,

        /// Target language code, e.g. es
        #[arg(long = "to", value_name = "LANG")]
        target_language: String,

        /// Source language code [default: auto-detect]
        #[arg(long = "from", value_name = "LANG")]
        source_language: Option<String>,

        /// Media type of FILE
        #[arg(long, default_value = "video/mp4")]
        media_type: String,

        /// Wait for completion and download the result
        #[arg(long)]
        wait: bool,

        /// Also fetch the transcript in this format after waiting
        #[arg(long)]
        transcript: Option<TranscriptFormat>,
    },

    /// Copy history audio (and optionally voice samples) into an asset tree
    Import {
        #[arg(value_name = "TARGET_DIR")]
        target: PathBuf,

        /// History items to import
        #[arg(long, default_value_t = 100)]
        page_size: u32,

        /// Also import every sample of every cloned voice
        #[arg(long)]
        samples: bool,
    },
}

/// Log filter for a `-v` count, unless `RUST_LOG` is set.
fn filter_directive(verbose: u8) -> String {
    match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,elevenlabs_lib=info,elevenlabs=info".to_string(),
            2 => "info,elevenlabs_lib=debug,elevenlabs=debug".to_string(),
            _ => "debug,elevenlabs_lib=trace,elevenlabs=trace".to_string(),
        },
    }
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    let filter = EnvFilter::try_new(filter_directive(verbose)).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.json_logs);

    tokio::select! {
        result = commands::run(cli) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, cancelling in-flight request");
            eprintln!("Cancelled");
            std::process::exit(130);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_speak_with_format() {
        let cli = Cli::try_parse_from([
            "elevenlabs",
            "-vv",
            "speak",
            "21m00Tcm4TlvDq8ikWAM",
            "Hello",
            "--format",
            "pcm_24000",
            "--stream",
        ])
        .unwrap();
        assert_eq!(cli.log_verbosity, 2);
        match cli.command {
            Commands::Speak { format, stream, .. } => {
                assert_eq!(format, OutputFormat::Pcm24000);
                assert!(stream);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_latency_out_of_range_is_rejected() {
        let result = Cli::try_parse_from(["elevenlabs", "speak", "v", "hi", "--latency", "7"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_dub_requires_file_or_url() {
        assert!(Cli::try_parse_from(["elevenlabs", "dub", "--to", "es"]).is_err());
        assert!(
            Cli::try_parse_from(["elevenlabs", "dub", "--url", "https://x.test/a.mp4", "--to", "es"])
                .is_ok()
        );
    }

    #[test]
    fn test_design_voice_parses_enums() {
        let cli = Cli::try_parse_from([
            "elevenlabs",
            "design-voice",
            "text",
            "--gender",
            "female",
            "--age",
            "old",
        ])
        .unwrap();
        match cli.command {
            Commands::DesignVoice { gender, age, .. } => {
                assert_eq!(gender, Gender::Female);
                assert_eq!(age, Age::Old);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
