//! Error types used across the library.

use thiserror::Error;

/// The error type returned by pretty much everything in the library.
///
/// You can match on the variant to figure out what went wrong. Edits that
/// carry a bad value fail with [`Validation`](ClientError::Validation) before
/// anything is sent. Everything else comes back from the [`Rest`](crate::rest::Rest)
/// implementation unchanged; nothing in this crate retries.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid value: {0}")]
    Validation(#[from] ValidationError),

    /// The acting bot lacks a permission, like `manage_channels` for
    /// channel edits or `kick_members` for kicks.
    #[error("Missing permissions: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The string contains the status and body, like
    /// `"HTTP 400: {\"message\": \"Invalid Form Body\"}"`.
    #[error("API error: {0}")]
    Api(String),

    /// Not for bad status codes -- those show up as [`Api`](ClientError::Api),
    /// [`Forbidden`](ClientError::Forbidden) or [`NotFound`](ClientError::NotFound).
    /// This is for transport-level stuff like DNS failures, TLS errors, timeouts, etc.
    #[error("HTTP error: {0}")]
    Http(Box<dyn std::error::Error + Send + Sync>),

    /// A payload didn't have the shape of the entity it was meant to hydrate.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejected edit arguments. `None` means an explicit null was given for a
/// field that can't be cleared.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("channel type {0:?} is not supported here, only TEXT (0) and NEWS (5) are")]
    UnsupportedChannelType(Option<u32>),

    #[error("channel of type {0} can't be edited this way")]
    ChannelKindMismatch(u32),

    #[error("default_auto_archive_duration {0:?} is invalid, supported values are 60, 1440, 4320 and 10080")]
    InvalidAutoArchiveDuration(Option<u32>),

    #[error("bitrate {0:?} must be in range of 8000 and 128000")]
    BitrateOutOfRange(Option<u32>),

    #[error("image format {0} is not supported for this asset")]
    UnsupportedImageFormat(&'static str),

    #[error("image size {0} must be a power of 2 between 64 and 4096")]
    InvalidImageSize(u32),

    #[error("member search limit {0} must be between 1 and 1000")]
    SearchLimitOutOfRange(u32),
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
