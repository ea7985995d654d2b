//! Error types for label generation and history storage

use thiserror::Error;

use crate::models::LogoSlot;

/// Errors surfaced by the core operations.
///
/// Print dispatch failures are not part of this enum: they are reported as
/// warnings through [`crate::print::PrintError`] and never invalidate a PDF.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field is missing or out of range
    #[error("invalid label: {0}")]
    Validation(String),

    /// Stored logo bytes are not a decodable image
    #[error("failed to decode {slot} logo: {source}")]
    AssetDecode {
        slot: LogoSlot,
        #[source]
        source: image::ImageError,
    },

    /// QR payload does not fit in any QR version
    #[error("QR payload of {payload_len} bytes cannot be encoded: {reason}")]
    Encoding {
        payload_len: usize,
        reason: qrcode::types::QrError,
    },

    /// Backing store unreachable, corrupt or rejected the statement
    #[error("storage fault: {0:#}")]
    Storage(anyhow::Error),

    /// Spreadsheet serialization failed
    #[error("spreadsheet export failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// Raster encoding of the preview failed
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// Settings file unreadable or unwritable
    #[error("settings: {0:#}")]
    Settings(anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for label operations
pub type Result<T> = std::result::Result<T, Error>;
