//! Error types for the rfxcodec library.

use thiserror::Error;

/// The main error type for rfxcodec operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Packet decoding error.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The requested command has no wire-level representation for this
    /// lighting family.
    #[error("operation unsupported for packet type {packet_type:#04x}: {reason}")]
    UnsupportedOperation {
        packet_type: u8,
        reason: &'static str,
    },

    /// The device belongs to a packet-type family the command encoder does
    /// not model.
    #[error("unsupported packet type {packet_type:#04x}")]
    UnsupportedPacketType { packet_type: u8 },

    /// Dim level outside the 0-100 percentage range.
    #[error("invalid dim level {level}, expected 0-100")]
    InvalidDimLevel { level: u8 },
}

/// Decode-specific errors for malformed buffers.
///
/// These only fire for buffers whose discriminator byte is recognized;
/// an unrecognized discriminator is skipped silently by the dispatcher.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Buffer size does not match the fixed size implied by the
    /// discriminator.
    #[error(
        "wrong buffer size for packet type {packet_type:#04x}: expected {expected} bytes, got {got}"
    )]
    WrongSize {
        packet_type: u8,
        expected: usize,
        got: usize,
    },

    /// The length byte at offset 0 disagrees with the discriminator-implied
    /// packet length.
    #[error(
        "length byte {header} disagrees with packet type {packet_type:#04x} (expected {expected})"
    )]
    LengthMismatch {
        packet_type: u8,
        expected: u8,
        header: u8,
    },
}

/// Result type alias for rfxcodec operations.
pub type Result<T> = std::result::Result<T, Error>;
