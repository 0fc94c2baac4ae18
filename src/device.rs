//! Device identity derived from decoded packets.

use std::fmt;

use crate::protocol::Packet;

/// Addressing fields needed to re-encode commands, one variant per
/// lighting family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingAddress {
    /// Lighting1: housecode plus unit code.
    HouseUnit {
        /// Housecode byte (ASCII 'A'-'P').
        housecode: u8,
        /// Unit code within the housecode.
        unitcode: u8,
    },
    /// Lighting2: combined 32-bit id plus unit code.
    IdUnit {
        /// Combined 32-bit device id.
        id: u32,
        /// Unit code within the device.
        unitcode: u8,
    },
    /// Lighting3: system code plus channel.
    SystemChannel {
        /// System code.
        system: u8,
        /// Channel number.
        channel: u16,
    },
}

/// A stable device identity derived from a decoded packet.
///
/// This is a value type, not an identity-bearing object: two devices are
/// equal when (packet type, subtype, id string) agree. Signal strength,
/// sequence numbers and command fields never enter the comparison.
#[derive(Debug, Clone)]
pub struct Device {
    /// Wire discriminator of the packet family.
    pub packet_type: u8,
    /// Subtype code narrowing the protocol variant.
    pub subtype: u8,
    /// Subtype rendered as a label.
    pub type_label: String,
    /// Canonical device identity string.
    pub id_string: String,
    /// Addressing fields, present for lighting families only.
    pub address: Option<LightingAddress>,
}

impl Device {
    /// Derives the device identity from a decoded packet. Lighting packets
    /// additionally carry the addressing fields needed to build outgoing
    /// commands.
    #[must_use]
    pub fn from_packet(packet: &Packet) -> Self {
        let address = match packet {
            Packet::Lighting1(p) => Some(LightingAddress::HouseUnit {
                housecode: p.housecode,
                unitcode: p.unitcode,
            }),
            Packet::Lighting2(p) => Some(LightingAddress::IdUnit {
                id: p.id_combined,
                unitcode: p.unitcode,
            }),
            Packet::Lighting3(p) => Some(LightingAddress::SystemChannel {
                system: p.system,
                channel: p.channel,
            }),
            _ => None,
        };
        Self {
            packet_type: packet.packet_type(),
            subtype: packet.subtype(),
            type_label: packet.type_label().to_owned(),
            id_string: packet.id_string().to_owned(),
            address,
        }
    }
}

impl PartialEq for Device {
    fn eq(&self, other: &Self) -> bool {
        self.packet_type == other.packet_type
            && self.subtype == other.subtype
            && self.id_string == other.id_string
    }
}

impl Eq for Device {}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type='{}' id='{}'", self.type_label, self.id_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Lighting2, parse};

    #[test]
    fn test_device_from_sensor_packet() {
        let data = [0x08, 0x50, 0x02, 0x11, 0x96, 0x03, 0x00, 0xD7, 0x69];
        let pkt = parse(&data).unwrap().unwrap();
        let device = Device::from_packet(&pkt);
        assert_eq!(device.packet_type, 0x50);
        assert_eq!(device.subtype, 0x02);
        assert_eq!(device.id_string, "96:03");
        assert_eq!(device.address, None);
    }

    #[test]
    fn test_device_from_lighting_packet_carries_address() {
        let data = [
            0x0B, 0x11, 0x00, 0x01, 0x01, 0x23, 0xAB, 0xCD, 0x05, 0x01, 0x00, 0x70,
        ];
        let pkt = parse(&data).unwrap().unwrap();
        let device = Device::from_packet(&pkt);
        assert_eq!(
            device.address,
            Some(LightingAddress::IdUnit {
                id: 0x0123_ABCD,
                unitcode: 5,
            })
        );
    }

    #[test]
    fn test_device_equality_ignores_seqnbr_and_rssi() {
        let a = Packet::Lighting2(Lighting2::decode(&[
            0x0B, 0x11, 0x00, 0x01, 0x01, 0x23, 0xAB, 0xCD, 0x05, 0x01, 0x00, 0x70,
        ])
        .unwrap());
        let b = Packet::Lighting2(Lighting2::decode(&[
            0x0B, 0x11, 0x00, 0x7F, 0x01, 0x23, 0xAB, 0xCD, 0x05, 0x00, 0x00, 0x30,
        ])
        .unwrap());
        assert_eq!(Device::from_packet(&a), Device::from_packet(&b));
    }

    #[test]
    fn test_device_inequality_on_subtype() {
        let a = Packet::Lighting2(Lighting2::transmit(0x00, 0, 0xAB, 1, 0x01, 0));
        let b = Packet::Lighting2(Lighting2::transmit(0x01, 0, 0xAB, 1, 0x01, 0));
        assert_ne!(Device::from_packet(&a), Device::from_packet(&b));
    }
}
