//! Image upload checks run before an image reaches a document.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Largest accepted upload payload.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Reasons an image upload is rejected locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRejected {
    /// MIME type does not start with `image/`.
    NotAnImage(String),
    /// Payload exceeds `MAX_IMAGE_BYTES`.
    TooLarge { size: usize, max: usize },
    /// Payload has no bytes.
    Empty,
}

impl Display for ImageRejected {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnImage(mime) => write!(f, "please choose an image (got `{mime}`)"),
            Self::TooLarge { size, max } => write!(
                f,
                "image is too large ({size} bytes, max {} MB)",
                max / (1024 * 1024)
            ),
            Self::Empty => write!(f, "image file is empty"),
        }
    }
}

impl Error for ImageRejected {}

/// Validates MIME type and size of an upload.
pub fn validate_image_upload(mime_type: &str, size: usize) -> Result<(), ImageRejected> {
    let mime = mime_type.trim().to_ascii_lowercase();
    if !mime.starts_with("image/") {
        return Err(ImageRejected::NotAnImage(mime_type.to_string()));
    }
    if size == 0 {
        return Err(ImageRejected::Empty);
    }
    if size > MAX_IMAGE_BYTES {
        return Err(ImageRejected::TooLarge {
            size,
            max: MAX_IMAGE_BYTES,
        });
    }
    Ok(())
}

/// Validates an upload and encodes it as a `data:` URL suitable for
/// `Topic::images`.
pub fn image_data_url(mime_type: &str, bytes: &[u8]) -> Result<String, ImageRejected> {
    validate_image_upload(mime_type, bytes.len())?;
    Ok(format!(
        "data:{};base64,{}",
        mime_type.trim().to_ascii_lowercase(),
        STANDARD.encode(bytes)
    ))
}
