//! Validated binary uploads for multipart requests.

use std::io::Read;
use std::path::Path;

use bytes::Bytes;

use crate::error::ValidationError;

/// A named binary payload with a media type, ready for a multipart form.
///
/// Construction reads the source fully and validates:
/// - the name is not blank,
/// - the media type is `type/subtype` with exactly one `/` and both halves
///   non-empty,
/// - the source is readable and not empty.
#[derive(Clone)]
pub struct MediaUpload {
    data: Bytes,
    name: String,
    media_type: String,
}

impl std::fmt::Debug for MediaUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaUpload")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.data.len())
            .finish()
    }
}

impl MediaUpload {
    /// Reads `reader` to the end and wraps the result.
    ///
    /// ## Errors
    ///
    /// - [`ValidationError::EmptyField`] for a blank name
    /// - [`ValidationError::InvalidMediaType`] for a malformed media type
    /// - [`ValidationError::UnreadableStream`] if reading fails
    /// - [`ValidationError::EmptyStream`] if the reader yields no bytes
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use elevenlabs_lib::types::MediaUpload;
    ///
    /// let upload = MediaUpload::from_reader(&b"ID3..."[..], "clip.mp3", "audio/mpeg").unwrap();
    /// assert_eq!(upload.media_type(), "audio/mpeg");
    ///
    /// assert!(MediaUpload::from_reader(&b"ID3"[..], "clip.mp3", "audio").is_err());
    /// ```
    pub fn from_reader(
        mut reader: impl Read,
        name: impl Into<String>,
        media_type: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let media_type = media_type.into();
        Self::validate_meta(&name, &media_type)?;

        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|source| ValidationError::UnreadableStream {
                name: name.clone(),
                source,
            })?;

        Self::finish(Bytes::from(data), name, media_type)
    }

    /// Wraps bytes already in memory.
    pub fn from_bytes(
        data: impl Into<Bytes>,
        name: impl Into<String>,
        media_type: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let media_type = media_type.into();
        Self::validate_meta(&name, &media_type)?;
        Self::finish(data.into(), name, media_type)
    }

    /// Reads a file, using its file name as the upload name.
    pub fn from_path(path: impl AsRef<Path>, media_type: impl Into<String>) -> Result<Self, ValidationError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = std::fs::File::open(path).map_err(|source| ValidationError::UnreadableStream {
            name: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file, name, media_type)
    }

    fn validate_meta(name: &str, media_type: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "name" });
        }
        if !is_valid_media_type(media_type) {
            return Err(ValidationError::InvalidMediaType(media_type.to_string()));
        }
        Ok(())
    }

    fn finish(data: Bytes, name: String, media_type: String) -> Result<Self, ValidationError> {
        if data.is_empty() {
            return Err(ValidationError::EmptyStream { name });
        }
        Ok(Self {
            data,
            name,
            media_type,
        })
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Builds a multipart part from this upload.
    pub(crate) fn to_part(&self) -> Result<reqwest::multipart::Part, reqwest::Error> {
        reqwest::multipart::Part::bytes(self.data.to_vec())
            .file_name(self.name.clone())
            .mime_str(&self.media_type)
    }
}

/// `type/subtype` with exactly one separator and non-empty halves.
fn is_valid_media_type(media_type: &str) -> bool {
    let mut parts = media_type.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(kind), Some(subtype), None) => {
            !kind.trim().is_empty() && !subtype.trim().is_empty()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
        }
    }

    #[test]
    fn test_valid_upload() {
        let upload = MediaUpload::from_reader(&b"data"[..], "movie.mp4", "video/mp4").unwrap();
        assert_eq!(upload.name(), "movie.mp4");
        assert_eq!(upload.data().as_ref(), b"data");
    }

    #[test]
    fn test_empty_stream_rejected() {
        let result = MediaUpload::from_reader(&b""[..], "movie.mp4", "video/mp4");
        assert!(matches!(result, Err(ValidationError::EmptyStream { .. })));
    }

    #[test]
    fn test_unreadable_stream_rejected() {
        let result = MediaUpload::from_reader(FailingReader, "movie.mp4", "video/mp4");
        assert!(matches!(result, Err(ValidationError::UnreadableStream { .. })));
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = MediaUpload::from_reader(&b"data"[..], "  ", "video/mp4");
        assert!(matches!(result, Err(ValidationError::EmptyField { field: "name" })));
    }

    #[test]
    fn test_media_type_shapes() {
        for bad in ["", "video", "/mp4", "video/", "video/mp4/x", "a//b", " / "] {
            let result = MediaUpload::from_bytes(b"data".to_vec(), "f", bad);
            assert!(
                matches!(result, Err(ValidationError::InvalidMediaType(_))),
                "expected `{bad}` to be rejected"
            );
        }
        for good in ["audio/mpeg", "video/mp4", "application/octet-stream"] {
            assert!(MediaUpload::from_bytes(b"data".to_vec(), "f", good).is_ok());
        }
    }

    #[test]
    fn test_from_path_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voice.wav");
        std::fs::write(&path, b"RIFF").unwrap();

        let upload = MediaUpload::from_path(&path, "audio/wav").unwrap();
        assert_eq!(upload.name(), "voice.wav");
    }

    #[test]
    fn test_from_missing_path_is_unreadable() {
        let result = MediaUpload::from_path("/no/such/file.wav", "audio/wav");
        assert!(matches!(result, Err(ValidationError::UnreadableStream { .. })));
    }
}
