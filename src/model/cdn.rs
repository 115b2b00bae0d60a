//! Asset URLs on the CDN.

use std::fmt::{self, Write};
use crate::error::ValidationError;

pub const CDN_URL: &str = "https://cdn.discordapp.com";
pub const INVITE_URL: &str = "https://discord.gg";

pub const MIN_IMAGE_SIZE: u32 = 64;
pub const MAX_IMAGE_SIZE: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpg,
    Jpeg,
    Webp,
    Gif,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Webp => "webp",
            Self::Gif => "gif",
        }
    }

    pub fn is_animated(self) -> bool {
        matches!(self, Self::Gif)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// `path` is everything after the host, without the extension.
/// Static assets don't come in [`Gif`](ImageFormat::Gif).
pub(crate) fn cdn_url(
    path: &str,
    format: ImageFormat,
    size: Option<u32>,
    animated: bool,
) -> Result<String, ValidationError> {
    if format.is_animated() && !animated {
        return Err(ValidationError::UnsupportedImageFormat(format.extension()));
    }
    let mut url = format!("{}{}.{}", CDN_URL, path, format);
    if let Some(size) = size {
        if !(MIN_IMAGE_SIZE..=MAX_IMAGE_SIZE).contains(&size) || !size.is_power_of_two() {
            return Err(ValidationError::InvalidImageSize(size));
        }
        let _ = write!(url, "?size={}", size);
    }
    Ok(url)
}
