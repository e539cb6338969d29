//! Post image storage
//!
//! Images arrive base64-encoded, are checked for size and content type, and
//! are written through a [`MediaStorage`] backend under `posts/`. Posts keep
//! only the relative path.

mod in_memory;
mod local;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use yatube_core::Snowflake;

pub use in_memory::MemoryMediaStorage;
pub use local::LocalMediaStorage;

/// Directory (relative to the media root) that holds post images
pub const POST_IMAGE_DIR: &str = "posts";

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("image data is not valid base64")]
    InvalidEncoding,

    #[error("image must be a GIF, PNG, JPEG or WEBP file")]
    UnsupportedFormat,

    #[error("image is larger than {max_bytes} bytes")]
    TooLarge { max_bytes: usize },

    #[error("invalid media path: {0}")]
    InvalidPath(String),

    #[error("media storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MediaResult<T> = Result<T, MediaError>;

/// Where uploaded files live
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Write `bytes` at `path` (relative to the media root)
    async fn save(&self, path: &str, bytes: &[u8]) -> MediaResult<()>;

    async fn read(&self, path: &str) -> MediaResult<Option<Vec<u8>>>;

    /// Remove the file at `path`; `false` when there was nothing to remove
    async fn delete(&self, path: &str) -> MediaResult<bool>;
}

/// Image types accepted for posts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Gif,
    Png,
    Jpeg,
    Webp,
}

impl ImageFormat {
    /// Detect the format from the leading bytes
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else {
            None
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Gif => "gif",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Gif => "image/gif",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A decoded and checked image, ready to be stored
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl ImageFile {
    /// Decode a base64 payload (a `data:` URL prefix is accepted) and check it
    pub fn decode(data: &str, max_bytes: usize) -> MediaResult<Self> {
        let encoded = match data.split_once(',') {
            Some((prefix, rest)) if prefix.starts_with("data:") => rest,
            _ => data,
        };
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|_| MediaError::InvalidEncoding)?;

        if bytes.len() > max_bytes {
            return Err(MediaError::TooLarge { max_bytes });
        }
        let format = ImageFormat::sniff(&bytes).ok_or(MediaError::UnsupportedFormat)?;

        Ok(Self { bytes, format })
    }

    /// Storage path for this image, e.g. `posts/1234_cat.png`
    pub fn storage_path(&self, id: Snowflake, filename: &str) -> String {
        let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();
        let cleaned: String = base
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            .collect();
        let mut name = cleaned.trim_start_matches('.').to_string();

        if name.is_empty() {
            name = format!("image.{}", self.format.extension());
        } else if !name.contains('.') {
            name = format!("{name}.{}", self.format.extension());
        }

        format!("{POST_IMAGE_DIR}/{id}_{name}")
    }
}

/// Reject absolute paths and parent-directory segments
fn check_relative(path: &str) -> MediaResult<()> {
    if path.is_empty()
        || path.starts_with('/')
        || path.split(['/', '\\']).any(|segment| segment == "..")
    {
        return Err(MediaError::InvalidPath(path.to_string()));
    }
    Ok(())
}
