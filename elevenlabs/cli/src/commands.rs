//! Subcommand handlers.

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr, bail};
use elevenlabs_lib::import::import_clips;
use elevenlabs_lib::types::{
    CreateVoiceRequest, DubbingRequest, DubbingStatus, DubbingStream, GeneratedVoiceRequest,
    HistoryQuery, SoundGenerationRequest, TextToSpeechRequest, TranscriptFormat,
    Voice, VoiceClip,
};
use elevenlabs_lib::{ElevenLabsClient, ElevenLabsConfig};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::AsyncWrite;

use crate::playback;
use crate::{Cli, Commands, format};

const DUBBING_POLL_INTERVAL: Duration = Duration::from_secs(10);
const DUBBING_MAX_CHECKS: u32 = 180;

fn build_client(cli: &Cli) -> Result<ElevenLabsClient> {
    let config = match &cli.config {
        Some(path) => Some(ElevenLabsConfig::load_from_path(path)?),
        None => ElevenLabsConfig::discover()?.map(|(path, config)| {
            tracing::info!(path = %path.display(), "Using config file");
            config
        }),
    };
    ElevenLabsClient::from_config(cli.api_key.as_deref(), config.as_ref())
        .wrap_err("could not create ElevenLabs client")
}

pub async fn run(cli: Cli) -> Result<()> {
    let client = build_client(&cli)?;

    match cli.command {
        Commands::Voices { json } => {
            let voices = client.voices().get_all_voices().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&voices)?);
            } else {
                for voice in &voices {
                    println!("{}", format::voice_line(voice));
                }
            }
        }

        Commands::Voice { voice_id, settings } => {
            let voice = client.voices().get_voice(&voice_id, settings).await?;
            println!("{}", format::voice_detail(&voice));
        }

        Commands::Models { json } => {
            let models = client.models().get_models().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&models)?);
            } else {
                for model in &models {
                    println!("{}", format::model_line(model));
                }
            }
        }

        Commands::User => {
            let user = client.user().get_user_info().await?;
            println!("{}", format::user(&user));
        }

        Commands::Subscription => {
            let info = client.user().get_subscription_info().await?;
            println!("{}", format::subscription(&info));
        }

        Commands::History {
            page_size,
            voice,
            json,
        } => {
            let query = HistoryQuery {
                page_size: Some(page_size),
                voice_id: voice,
                ..Default::default()
            };
            let page = client.history().get_history(&query).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                println!("{}", format::history(&page));
            }
        }

        Commands::Speak {
            voice_id,
            text,
            model,
            format: output_format,
            stream,
            latency,
            output,
        } => {
            let text = if text == "-" { read_stdin()? } else { text };
            let mut request = TextToSpeechRequest::new(text)?.with_output_format(output_format);
            if let Some(model) = model {
                request = request.with_model(model);
            }
            if let Some(level) = latency {
                request = request.with_optimize_streaming_latency(level)?;
            }
            let voice = Voice::new(voice_id, "");

            let clip = if stream {
                speak_streaming(&client, &voice, &request, output.as_deref()).await?
            } else {
                let clip = client.text_to_speech().text_to_speech(&voice, &request).await?;
                if let Some(output) = output.as_deref() {
                    write_output(output, &clip).await?;
                }
                clip
            };
            eprintln!("{}", format::clip(&clip));
        }

        Commands::Sfx {
            prompt,
            duration,
            influence,
        } => {
            let request = SoundGenerationRequest::new(prompt, duration, influence)?;
            let clip = client.sound_generation().generate_sound(&request).await?;
            eprintln!("{}", format::clip(&clip));
        }

        Commands::DesignVoice {
            text,
            gender,
            accent,
            age,
            strength,
        } => {
            let request = GeneratedVoiceRequest::new(text, gender, accent.as_str(), age, strength)?;
            let (generated_voice_id, clip) = client
                .voice_generation()
                .generate_voice_preview(&request)
                .await?;
            eprintln!("{}", format::clip(&clip));
            println!("{generated_voice_id}");
        }

        Commands::CreateVoice {
            name,
            description,
            generated_voice_id,
        } => {
            let request = CreateVoiceRequest::new(name, description, generated_voice_id)?;
            let voice = client.voice_generation().create_voice(&request).await?;
            println!("{}", format::voice_line(&voice));
        }

        Commands::Dub {
            file,
            url,
            target_language,
            source_language,
            media_type,
            wait,
            transcript,
        } => {
            let mut request = match (file, url) {
                (Some(file), None) => {
                    let source = DubbingStream::from_path(&file, media_type)?;
                    DubbingRequest::from_files(vec![source], &target_language)?
                }
                (None, Some(url)) => DubbingRequest::from_url(url, &target_language)?,
                _ => bail!("pass exactly one of FILE or --url"),
            };
            if let Some(source_language) = source_language {
                request = request.with_source_language(source_language);
            }

            let dubbing = client.dubbing();
            let response = dubbing.dub(&request).await?;
            println!("{}", response.id());

            if wait {
                let metadata = dubbing
                    .wait_for_dubbing_completion(
                        response.id(),
                        DUBBING_POLL_INTERVAL,
                        DUBBING_MAX_CHECKS,
                    )
                    .await?;
                if metadata.status == DubbingStatus::Failed {
                    bail!(
                        "dubbing failed: {}",
                        metadata.error.as_deref().unwrap_or("unknown error")
                    );
                }
                let path = dubbing.get_dubbed_file(response.id(), &target_language).await?;
                eprintln!("dubbed file -> {}", path.display());

                if let Some(format) = transcript {
                    print_transcript(&client, response.id(), &target_language, format).await?;
                }
            }
        }

        Commands::Import {
            target,
            page_size,
            samples,
        } => {
            let clips = collect_import_clips(&client, page_size, samples).await?;
            let report = tokio::task::spawn_blocking(move || {
                let progress = import_progress_bar(clips.len() as u64);
                let report = import_clips(&target, &clips, |done, _, clip| {
                    progress.set_position(done as u64);
                    progress.set_message(clip.id.clone());
                });
                progress.finish_and_clear();
                report
            })
            .await?;
            println!("{}", format::import_report(&report));
            if !report.is_clean() {
                bail!("{} clip(s) failed to import", report.failed.len());
            }
        }
    }

    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .wrap_err("failed to read text from stdin")?;
    Ok(text.trim().to_string())
}

async fn open_sink(output: Option<&Path>) -> Result<Box<dyn AsyncWrite + Unpin + Send>> {
    Ok(match output {
        Some(path) if path.as_os_str() == "-" => Box::new(tokio::io::stdout()),
        Some(path) => Box::new(
            tokio::fs::File::create(path)
                .await
                .wrap_err_with(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(tokio::io::sink()),
    })
}

async fn speak_streaming(
    client: &ElevenLabsClient,
    voice: &Voice,
    request: &TextToSpeechRequest,
    output: Option<&Path>,
) -> Result<VoiceClip> {
    let mut stream = client
        .text_to_speech()
        .stream_text_to_speech(voice, request)
        .await?;
    let sink = open_sink(output).await?;
    let (written, _) = playback::pump(&mut stream, sink).await?;
    tracing::info!(clip_id = stream.id(), written, "Streamed speech");
    Ok(stream.finish().await?)
}

async fn write_output(output: &Path, clip: &VoiceClip) -> Result<()> {
    use tokio::io::AsyncWriteExt;

    let mut sink = open_sink(Some(output)).await?;
    sink.write_all(&clip.audio).await?;
    sink.flush().await?;
    Ok(())
}

async fn print_transcript(
    client: &ElevenLabsClient,
    dubbing_id: &str,
    language: &str,
    format: TranscriptFormat,
) -> Result<()> {
    let transcript = client
        .dubbing()
        .get_transcript_for_dub(dubbing_id, language, format)
        .await?;
    println!("{transcript}");
    Ok(())
}

/// Downloads the clips an import run copies: recent history and, on
/// request, every sample of every voice.
async fn collect_import_clips(
    client: &ElevenLabsClient,
    page_size: u32,
    samples: bool,
) -> Result<Vec<VoiceClip>> {
    let history = client.history();
    let query = HistoryQuery {
        page_size: Some(page_size),
        ..Default::default()
    };
    let page = history.get_history(&query).await?;

    let download = ProgressBar::new_spinner();
    download.set_style(spinner_style());
    download.set_message("Downloading history audio");
    download.enable_steady_tick(Duration::from_millis(100));

    let mut clips = Vec::with_capacity(page.history.len());
    for item in &page.history {
        match history.get_history_audio(item).await {
            Ok(clip) => clips.push(clip),
            Err(err) => tracing::warn!(history_item_id = item.id(), error = %err, "Skipping history item"),
        }
    }

    if samples {
        download.set_message("Downloading voice samples");
        let voices = client.voices();
        for voice in voices.get_all_voices().await? {
            for sample in &voice.samples {
                match voices.download_voice_sample_audio(&voice, sample).await {
                    Ok(clip) => clips.push(clip),
                    Err(err) => tracing::warn!(
                        voice_id = voice.id(),
                        sample_id = sample.id(),
                        error = %err,
                        "Skipping voice sample"
                    ),
                }
            }
        }
    }
    download.finish_and_clear();

    Ok(clips)
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn import_progress_bar(total: u64) -> ProgressBar {
    let progress = ProgressBar::new(total);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress
}
