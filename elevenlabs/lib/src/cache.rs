//! Local audio cache.
//!
//! Synthesized audio is written under a single cache root:
//!
//! | Source | Path |
//! |--------|------|
//! | Text-to-speech | `{root}/{voice_id}/{clip_id}.{ext}` |
//! | Voice samples | `{root}/{voice_id}/Samples/{sample_id}.{ext}` |
//! | Voice previews | `{root}/VoiceGeneration/{generated_voice_id}.{ext}` |
//! | Sound effects | `{root}/SoundGeneration/{clip_id}.{ext}` |
//! | History audio | `{root}/History/{history_item_id}.{ext}` |
//! | Dubbing | `{root}/Dubbing/{dubbing_id}/{language}.{ext}` |
//!
//! Writes go through [`write_atomic`] so a crashed download never leaves a
//! truncated file behind under the final name.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use xxhash_rust::xxh64::xxh64;

use crate::error::CacheError;

/// Directory name used for voice samples under a voice directory.
pub const SAMPLES_DIR: &str = "Samples";

/// Deterministic identifier for a synthesis request.
///
/// Used as the clip id when the server does not return one, so the same
/// request always maps to the same file.
#[derive(Debug, Clone)]
pub struct CacheKey {
    voice_id: String,
    model_id: String,
    text: String,
    format: String,
    settings: Option<String>,
}

impl CacheKey {
    /// Creates a key from the request inputs that affect the audio.
    pub fn new(
        voice_id: impl Into<String>,
        model_id: impl Into<String>,
        text: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        Self {
            voice_id: voice_id.into(),
            model_id: model_id.into(),
            text: text.into(),
            format: format.into(),
            settings: None,
        }
    }

    /// Includes further serialized inputs (voice settings, language, context
    /// text) in the key.
    #[must_use]
    pub fn with_settings(mut self, settings: impl Into<String>) -> Self {
        self.settings = Some(settings.into());
        self
    }

    /// 16-character hex xxHash64 of the key.
    pub fn generate_hash(&self) -> String {
        let key = match &self.settings {
            Some(settings) => format!(
                "{}:{}:{}:{}:{}",
                self.voice_id, self.model_id, self.text, self.format, settings
            ),
            None => format!(
                "{}:{}:{}:{}",
                self.voice_id, self.model_id, self.text, self.format
            ),
        };
        format!("{:016x}", xxh64(key.as_bytes(), 0))
    }
}

/// Replaces characters that are unsafe in a single path component.
///
/// Voice names are user-chosen and may contain separators.
pub fn sanitize_component(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}

/// A cache root directory.
#[derive(Debug, Clone)]
pub struct AudioCache {
    root: PathBuf,
}

impl AudioCache {
    /// Creates a cache rooted at `root`. The directory is created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The cache root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path for a file named `{id}.{ext}` inside `dirs` under the root.
    pub fn path_for(&self, dirs: &[&str], id: &str, ext: &str) -> PathBuf {
        let mut path = self.root.clone();
        for dir in dirs {
            path.push(sanitize_component(dir));
        }
        path.push(format!("{}.{ext}", sanitize_component(id)));
        path
    }

    /// Writes `data` to `path`, replacing any stale file with the same name.
    pub async fn store(&self, path: &Path, data: &[u8]) -> Result<(), CacheError> {
        let path = path.to_path_buf();
        let data = data.to_vec();
        tokio::task::spawn_blocking(move || write_atomic(&path, &data))
            .await
            .map_err(|e| CacheError::io(self.root.clone(), std::io::Error::other(e)))?
    }
}

/// Atomically writes data to a file.
///
/// Writes to a temp file in the same directory, then renames it over the
/// destination. Missing parent directories are created.
///
/// ## Errors
///
/// Returns [`CacheError::Io`] if any step fails.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<(), CacheError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    if !parent.exists() {
        fs::create_dir_all(parent).map_err(|e| CacheError::io(parent, e))?;
    }

    let temp_path = parent.join(format!(
        ".elevenlabs-tmp-{}-{}.tmp",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0)
    ));

    {
        let mut file = fs::File::create(&temp_path).map_err(|e| CacheError::io(&temp_path, e))?;
        file.write_all(data)
            .and_then(|_| file.sync_all())
            .map_err(|e| CacheError::io(&temp_path, e))?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        CacheError::io(path, e)
    })?;

    tracing::trace!(path = %path.display(), bytes = data.len(), "Wrote cache file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_determinism() {
        let a = CacheKey::new("voice", "model", "Hello", "mp3").generate_hash();
        let b = CacheKey::new("voice", "model", "Hello", "mp3").generate_hash();
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_changes_with_inputs() {
        let base = CacheKey::new("voice", "model", "Hello", "mp3").generate_hash();
        assert_ne!(base, CacheKey::new("other", "model", "Hello", "mp3").generate_hash());
        assert_ne!(base, CacheKey::new("voice", "model2", "Hello", "mp3").generate_hash());
        assert_ne!(base, CacheKey::new("voice", "model", "Hello!", "mp3").generate_hash());
        assert_ne!(base, CacheKey::new("voice", "model", "Hello", "pcm").generate_hash());
        assert_ne!(
            base,
            CacheKey::new("voice", "model", "Hello", "mp3")
                .with_settings("{\"stability\":0.5}")
                .generate_hash()
        );
    }

    #[test]
    fn test_sanitize_component() {
        assert_eq!(sanitize_component("Rachel"), "Rachel");
        assert_eq!(sanitize_component("a/b\\c"), "a_b_c");
        assert_eq!(sanitize_component(".."), "_");
        assert_eq!(sanitize_component("  "), "_");
    }

    #[test]
    fn test_path_for_layout() {
        let cache = AudioCache::new("/cache");
        let path = cache.path_for(&["voice-1", SAMPLES_DIR], "sample-9", "mp3");
        assert_eq!(path, PathBuf::from("/cache/voice-1/Samples/sample-9.mp3"));
    }

    #[test]
    fn test_atomic_write_creates_dirs_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("deeper").join("clip.mp3");

        write_atomic(&file, b"initial").expect("first write");
        write_atomic(&file, b"updated").expect("second write");

        assert_eq!(fs::read(&file).unwrap(), b"updated");
        let leftovers: Vec<_> = fs::read_dir(file.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_store_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AudioCache::new(dir.path());
        let path = cache.path_for(&["VoiceGeneration"], "gen-1", "mp3");

        cache.store(&path, b"audio").await.unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"audio");
    }
}
