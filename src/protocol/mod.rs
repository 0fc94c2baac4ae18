//! Low-level packet definitions for the RFXtrx wire protocol.
//!
//! This module contains the per-family packet structs including:
//! - Lighting-control families (Lighting1/2/3)
//! - Sensor families (temperature, humidity, barometer and combinations)
//! - The dispatcher that routes a raw buffer to the matching decoder

pub mod lighting;
pub mod packet;
pub mod sensor;

pub use lighting::{Lighting1, Lighting2, Lighting3};
pub use packet::{Packet, parse};
pub use sensor::{Baro, BarometerReading, Humid, HumidityReading, Temp, TempHumid, TempHumidBaro};

use crate::error::DecodeError;

/// Validates the buffer against the fixed size implied by the discriminator.
///
/// The length byte at offset 0 excludes itself; it is cross-checked here
/// even though the bridge firmware always agrees with the discriminator.
pub(crate) fn check_frame(data: &[u8], packet_type: u8, size: usize) -> Result<(), DecodeError> {
    if data.len() != size {
        return Err(DecodeError::WrongSize {
            packet_type,
            expected: size,
            got: data.len(),
        });
    }
    let expected = (size - 1) as u8;
    if data[0] != expected {
        return Err(DecodeError::LengthMismatch {
            packet_type,
            expected,
            header: data[0],
        });
    }
    Ok(())
}

/// Fallback label for a subtype code missing from a family's table.
pub(crate) fn unknown_type_label(packet_type: u8, subtype: u8) -> String {
    format!("Unknown type ({packet_type:#04x}/{subtype:#04x})")
}

/// Fallback label for a command code missing from a family's table.
pub(crate) fn unknown_command_label(cmnd: u8) -> String {
    format!("Unknown command ({cmnd:#04x})")
}
