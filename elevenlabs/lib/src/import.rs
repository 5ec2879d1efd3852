//! Copies cached clips into a project asset tree.
//!
//! Layout under the target root:
//!
//! ```text
//! {root}/{voice}/{clip}.mp3          synthesized speech
//! {root}/{voice}/Samples/{id}.mp3    voice samples (clips without text)
//! ```
//!
//! Existing files are never overwritten, so re-running an import is safe.
//! A failing clip is logged and recorded, and the rest of the batch still
//! runs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cache::{SAMPLES_DIR, sanitize_component, write_atomic};
use crate::error::CacheError;
use crate::types::VoiceClip;

/// A clip that could not be imported.
#[derive(Debug)]
pub struct ImportFailure {
    pub clip_id: String,
    pub error: CacheError,
}

/// Outcome of an [`import_clips`] run.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Files written by this run.
    pub imported: Vec<PathBuf>,
    /// Targets that already existed and were left alone.
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<ImportFailure>,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.imported.len() + self.skipped.len() + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Directory a clip is imported into.
pub fn target_dir(target_root: &Path, clip: &VoiceClip) -> PathBuf {
    let dir = target_root.join(sanitize_component(clip.voice_label()));
    if clip.has_text() {
        dir
    } else {
        dir.join(SAMPLES_DIR)
    }
}

/// Imports `clips` under `target_root`.
///
/// `on_progress(done, total, clip)` runs after each clip, whatever its
/// outcome.
///
/// ## Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use elevenlabs_lib::import::import_clips;
///
/// # fn run(clips: Vec<elevenlabs_lib::types::VoiceClip>) {
/// let report = import_clips(Path::new("assets/voices"), &clips, |done, total, clip| {
///     println!("[{done}/{total}] {}", clip.id);
/// });
/// assert!(report.is_clean());
/// # }
/// ```
pub fn import_clips<F>(target_root: &Path, clips: &[VoiceClip], mut on_progress: F) -> ImportReport
where
    F: FnMut(usize, usize, &VoiceClip),
{
    let total = clips.len();
    let mut report = ImportReport::default();

    for (index, clip) in clips.iter().enumerate() {
        match import_one(target_root, clip) {
            Ok(Imported::Written(path)) => {
                tracing::debug!(clip_id = %clip.id, path = %path.display(), "Imported clip");
                report.imported.push(path);
            }
            Ok(Imported::AlreadyPresent(path)) => {
                tracing::debug!(clip_id = %clip.id, path = %path.display(), "Clip already imported");
                report.skipped.push(path);
            }
            Err(error) => {
                tracing::error!(clip_id = %clip.id, error = %error, "Failed to import clip");
                report.failed.push(ImportFailure {
                    clip_id: clip.id.clone(),
                    error,
                });
            }
        }
        on_progress(index + 1, total, clip);
    }

    tracing::info!(
        imported = report.imported.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "Import finished"
    );
    report
}

enum Imported {
    Written(PathBuf),
    AlreadyPresent(PathBuf),
}

fn import_one(target_root: &Path, clip: &VoiceClip) -> Result<Imported, CacheError> {
    let dir = target_dir(target_root, clip);
    let file_name = clip
        .cached_path
        .as_deref()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| clip.file_name());
    let target = dir.join(sanitize_component(&file_name));

    if target.exists() {
        return Ok(Imported::AlreadyPresent(target));
    }
    fs::create_dir_all(&dir).map_err(|e| CacheError::io(&dir, e))?;

    match clip.cached_path.as_deref() {
        Some(source) if source.is_file() => {
            fs::copy(source, &target).map_err(|e| CacheError::io(source, e))?;
        }
        _ if !clip.audio.is_empty() => write_atomic(&target, &clip.audio)?,
        Some(source) => {
            return Err(CacheError::io(
                source,
                std::io::Error::new(std::io::ErrorKind::NotFound, "cached audio is missing"),
            ));
        }
        None => {
            return Err(CacheError::io(
                &target,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "clip has no audio"),
            ));
        }
    }
    Ok(Imported::Written(target))
}
