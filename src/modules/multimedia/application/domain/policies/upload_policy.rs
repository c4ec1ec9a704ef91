use std::time::Duration;

use crate::multimedia::application::domain::entities::{classify, MediaKind, MediaPayload};
use crate::shared::config::Lookup;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("File name is missing")]
    MissingFileName,

    #[error("File is empty")]
    EmptyFile,

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Expected a file of kind {expected}, received {actual}")]
    KindMismatch { expected: MediaKind, actual: MediaKind },

    #[error("File exceeds the maximum size of {max_bytes} bytes")]
    FileTooLarge { max_bytes: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_file_size_bytes: usize,
    pub image_folder: String,
    pub video_folder: String,
    pub image_preset: Option<String>,
    pub video_preset: Option<String>,
    pub upload_timeout: Duration,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size_bytes: Self::DEFAULT_MAX_FILE_SIZE_BYTES,
            image_folder: Self::DEFAULT_IMAGE_FOLDER.to_string(),
            video_folder: Self::DEFAULT_VIDEO_FOLDER.to_string(),
            image_preset: None,
            video_preset: None,
            upload_timeout: Self::DEFAULT_UPLOAD_TIMEOUT,
        }
    }
}

impl UploadPolicy {
    pub const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 16 * 1024 * 1024;
    pub const DEFAULT_IMAGE_FOLDER: &'static str = "listings/images";
    pub const DEFAULT_VIDEO_FOLDER: &'static str = "listings/videos";
    pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(10);

    /// Reads the optional `MEDIA_IMAGE_PRESET` / `MEDIA_VIDEO_PRESET` values.
    pub fn from_lookup(lookup: Lookup) -> Self {
        Self {
            image_preset: lookup("MEDIA_IMAGE_PRESET").map(|v| v.trim().to_string()),
            video_preset: lookup("MEDIA_VIDEO_PRESET").map(|v| v.trim().to_string()),
            ..Self::default()
        }
    }

    pub fn folder_for(&self, kind: MediaKind) -> &str {
        match kind {
            MediaKind::Image => &self.image_folder,
            MediaKind::Video => &self.video_folder,
        }
    }

    pub fn preset_for(&self, kind: MediaKind) -> Option<&str> {
        match kind {
            MediaKind::Image => self.image_preset.as_deref(),
            MediaKind::Video => self.video_preset.as_deref(),
        }
    }

    /// Checks a payload destined for the `expected` slot.
    pub fn check(
        &self,
        payload: &MediaPayload,
        expected: MediaKind,
    ) -> Result<MediaKind, UploadRejection> {
        let name = payload.file_name.trim();
        if name.is_empty() {
            return Err(UploadRejection::MissingFileName);
        }

        let kind =
            classify(name).ok_or_else(|| UploadRejection::UnsupportedFileType(name.to_string()))?;
        if kind != expected {
            return Err(UploadRejection::KindMismatch {
                expected,
                actual: kind,
            });
        }

        if payload.bytes.is_empty() {
            return Err(UploadRejection::EmptyFile);
        }
        if payload.size() > self.max_file_size_bytes {
            return Err(UploadRejection::FileTooLarge {
                max_bytes: self.max_file_size_bytes,
            });
        }

        Ok(kind)
    }
}
