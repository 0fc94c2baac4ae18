//! Outgoing command packet construction for lighting devices.
//!
//! Builders select the wire format by the device's addressing variant and
//! enforce per-family capability constraints: not every family has a
//! variable-level command, and non-lighting devices cannot be commanded
//! at all.

use bytes::Bytes;

use crate::device::{Device, LightingAddress};
use crate::error::{Error, Result};
use crate::protocol::{Lighting1, Lighting2, Lighting3};

/// Builds the packet switching a lighting device on.
pub fn build_on(device: &Device) -> Result<Bytes> {
    tracing::debug!(device = %device, "building on packet");
    match device.address {
        Some(LightingAddress::HouseUnit {
            housecode,
            unitcode,
        }) => Ok(
            Lighting1::transmit(device.subtype, 0, housecode, unitcode, Lighting1::CMND_ON)
                .encode(),
        ),
        Some(LightingAddress::IdUnit { id, unitcode }) => Ok(Lighting2::transmit(
            device.subtype,
            0,
            id,
            unitcode,
            Lighting2::CMND_ON,
            0,
        )
        .encode()),
        Some(LightingAddress::SystemChannel { system, channel }) => Ok(Lighting3::transmit(
            device.subtype,
            0,
            system,
            channel,
            Lighting3::CMND_ON,
        )
        .encode()),
        None => Err(Error::UnsupportedPacketType {
            packet_type: device.packet_type,
        }),
    }
}

/// Builds the packet switching a lighting device off.
pub fn build_off(device: &Device) -> Result<Bytes> {
    tracing::debug!(device = %device, "building off packet");
    match device.address {
        Some(LightingAddress::HouseUnit {
            housecode,
            unitcode,
        }) => Ok(
            Lighting1::transmit(device.subtype, 0, housecode, unitcode, Lighting1::CMND_OFF)
                .encode(),
        ),
        Some(LightingAddress::IdUnit { id, unitcode }) => Ok(Lighting2::transmit(
            device.subtype,
            0,
            id,
            unitcode,
            Lighting2::CMND_OFF,
            0,
        )
        .encode()),
        Some(LightingAddress::SystemChannel { system, channel }) => Ok(Lighting3::transmit(
            device.subtype,
            0,
            system,
            channel,
            Lighting3::CMND_OFF,
        )
        .encode()),
        None => Err(Error::UnsupportedPacketType {
            packet_type: device.packet_type,
        }),
    }
}

/// Builds the packet dimming a lighting device to `level` percent (0-100).
///
/// Only Lighting2 has a wire-level variable command; the percentage is
/// rescaled to the wire's 0-15 range as `(level + 6) * 15 / 100`, the
/// inverse of the decode-side rescale (lossy in both directions).
pub fn build_dim(device: &Device, level: u8) -> Result<Bytes> {
    if level > 100 {
        return Err(Error::InvalidDimLevel { level });
    }
    tracing::debug!(device = %device, level, "building dim packet");
    match device.address {
        Some(LightingAddress::HouseUnit { .. }) => Err(Error::UnsupportedOperation {
            packet_type: device.packet_type,
            reason: "no variable-level command, and the bridge cannot send \
                     extended commands for this family",
        }),
        Some(LightingAddress::IdUnit { id, unitcode }) => {
            let wire_level = ((u16::from(level) + 6) * 15 / 100) as u8;
            Ok(Lighting2::transmit(
                device.subtype,
                0,
                id,
                unitcode,
                Lighting2::CMND_SET_LEVEL,
                wire_level,
            )
            .encode())
        }
        Some(LightingAddress::SystemChannel { .. }) => Err(Error::UnsupportedOperation {
            packet_type: device.packet_type,
            reason: "no defined mapping from a percentage to the level commands",
        }),
        None => Err(Error::UnsupportedPacketType {
            packet_type: device.packet_type,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Lighting2, Packet, parse};

    fn lighting1_device() -> Device {
        let data = [0x07, 0x10, 0x01, 0x2A, 0x43, 0x03, 0x01, 0x80];
        Device::from_packet(&parse(&data).unwrap().unwrap())
    }

    fn lighting2_device() -> Device {
        let data = [
            0x0B, 0x11, 0x00, 0x01, 0x01, 0x23, 0xAB, 0xCD, 0x05, 0x01, 0x00, 0x70,
        ];
        Device::from_packet(&parse(&data).unwrap().unwrap())
    }

    fn lighting3_device() -> Device {
        let data = [0x08, 0x12, 0x00, 0x01, 0x01, 0x0A, 0x02, 0x10, 0x74];
        Device::from_packet(&parse(&data).unwrap().unwrap())
    }

    fn temp_device() -> Device {
        let data = [0x08, 0x50, 0x02, 0x11, 0x96, 0x03, 0x00, 0xD7, 0x69];
        Device::from_packet(&parse(&data).unwrap().unwrap())
    }

    #[test]
    fn test_build_on_lighting1() {
        let data = build_on(&lighting1_device()).unwrap();
        assert_eq!(
            data.as_ref(),
            [0x07, 0x10, 0x01, 0x00, 0x43, 0x03, 0x01, 0x00]
        );
    }

    #[test]
    fn test_build_off_lighting2() {
        let data = build_off(&lighting2_device()).unwrap();
        assert_eq!(
            data.as_ref(),
            [0x0B, 0x11, 0x00, 0x00, 0x01, 0x23, 0xAB, 0xCD, 0x05, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_build_on_off_lighting3_command_codes() {
        let on = build_on(&lighting3_device()).unwrap();
        assert_eq!(on[7], 0x10);
        let off = build_off(&lighting3_device()).unwrap();
        assert_eq!(off[7], 0x1A);
    }

    #[test]
    fn test_build_dim_rescales_percentage() {
        // (50 + 6) * 15 / 100 = 8 with integer arithmetic
        let data = build_dim(&lighting2_device(), 50).unwrap();
        let Some(Packet::Lighting2(pkt)) = parse(&data).unwrap() else {
            panic!("expected a Lighting2 packet");
        };
        assert_eq!(pkt.cmnd, Lighting2::CMND_SET_LEVEL);
        assert_eq!(pkt.level, 8);
    }

    #[test]
    fn test_build_dim_bounds() {
        let device = lighting2_device();
        assert_eq!(build_dim(&device, 0).map(|d| d[10]).unwrap(), 0);
        assert_eq!(build_dim(&device, 100).map(|d| d[10]).unwrap(), 15);
        assert!(matches!(
            build_dim(&device, 101),
            Err(Error::InvalidDimLevel { level: 101 })
        ));
    }

    #[test]
    fn test_build_dim_unsupported_families() {
        assert!(matches!(
            build_dim(&lighting1_device(), 50),
            Err(Error::UnsupportedOperation {
                packet_type: 0x10,
                ..
            })
        ));
        assert!(matches!(
            build_dim(&lighting3_device(), 50),
            Err(Error::UnsupportedOperation {
                packet_type: 0x12,
                ..
            })
        ));
    }

    #[test]
    fn test_commands_rejected_for_non_lighting_device() {
        let device = temp_device();
        assert!(matches!(
            build_on(&device),
            Err(Error::UnsupportedPacketType { packet_type: 0x50 })
        ));
        assert!(matches!(
            build_off(&device),
            Err(Error::UnsupportedPacketType { packet_type: 0x50 })
        ));
        assert!(matches!(
            build_dim(&device, 10),
            Err(Error::UnsupportedPacketType { packet_type: 0x50 })
        ));
    }
}
