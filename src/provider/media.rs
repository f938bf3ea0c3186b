// src/provider/media.rs — Media attachments for completion requests
//
// Files are classified as image or video purely by extension and shipped
// as base64-encoded bytes tagged with the detected format string.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::path::Path;

use super::ContentBlock;
use crate::infra::errors::DraftmillError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaAttachment {
    pub kind: MediaKind,
    /// Lowercased file extension, sent verbatim as the wire format tag.
    pub format: String,
    pub bytes: Vec<u8>,
}

impl MediaAttachment {
    /// Read a media file from disk. `.jpg/.jpeg/.png` classify as image,
    /// `.mp4` as video; anything else is rejected.
    pub fn from_path(path: &Path) -> Result<Self, DraftmillError> {
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let kind = match format.as_str() {
            "jpg" | "jpeg" | "png" => MediaKind::Image,
            "mp4" => MediaKind::Video,
            _ => {
                return Err(DraftmillError::UnsupportedMedia {
                    path: path.display().to_string(),
                })
            }
        };

        let bytes = std::fs::read(path)?;
        Ok(Self {
            kind,
            format,
            bytes,
        })
    }

    pub fn into_block(self) -> ContentBlock {
        match self.kind {
            MediaKind::Image => ContentBlock::Image {
                format: self.format,
                bytes: self.bytes,
            },
            MediaKind::Video => ContentBlock::Video {
                format: self.format,
                bytes: self.bytes,
            },
        }
    }
}

/// Wire encoding for media bytes inside a JSON request body.
pub fn encode_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, DraftmillError> {
    BASE64
        .decode(encoded)
        .map_err(|e| DraftmillError::Config(format!("invalid base64 payload: {e}")))
}
