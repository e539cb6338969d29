//! Serving stored post images

use tracing::instrument;

use crate::media::{ImageFormat, MediaError};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// A stored image with its detected type
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

pub struct MediaService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MediaService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Read an image by its path relative to the media root
    ///
    /// Paths escaping the root and files that are not images are reported as
    /// missing.
    #[instrument(skip(self))]
    pub async fn get_image(&self, path: &str) -> ServiceResult<StoredImage> {
        let bytes = match self.ctx.media_storage().read(path).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) | Err(MediaError::InvalidPath(_)) => {
                return Err(ServiceError::not_found("Image", path));
            }
            Err(e) => return Err(e.into()),
        };

        let format =
            ImageFormat::sniff(&bytes).ok_or_else(|| ServiceError::not_found("Image", path))?;

        Ok(StoredImage { bytes, format })
    }
}
