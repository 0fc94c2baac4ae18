//! Lighting-control packet families.
//!
//! These are the only families with a transmit path: each struct offers a
//! `transmit` constructor for outgoing packets (status byte zeroed) and an
//! `encode` method that is the exact inverse of `decode`.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use super::{check_frame, unknown_command_label, unknown_type_label};
use crate::error::DecodeError;

/// Renders a Lighting1 housecode byte for `id_string`.
///
/// Housecodes on the wire are the ASCII letters 'A'-'P' (0x41-0x50).
/// Anything else degrades to a hex rendering instead of failing.
fn housecode_letter(housecode: u8) -> String {
    if (0x41..=0x50).contains(&housecode) {
        char::from(housecode).to_string()
    } else {
        format!("{housecode:#04x}")
    }
}

/// Lighting1 packet (X10 and similar house/unit-code protocols).
///
/// Format:
/// ```text
/// [len=7:1] [type=0x10:1] [subtype:1] [seqnbr:1] [housecode:1]
/// [unitcode:1] [cmnd:1] [status:1]
/// ```
///
/// The status byte carries the signal-strength nibble in its high half;
/// the low half is unused for this family.
#[derive(Debug, Clone, PartialEq)]
pub struct Lighting1 {
    /// Protocol variant within the family.
    pub subtype: u8,
    /// Sequence number.
    pub seqnbr: u8,
    /// Housecode byte (ASCII 'A'-'P').
    pub housecode: u8,
    /// Unit code within the housecode.
    pub unitcode: u8,
    /// Command code.
    pub cmnd: u8,
    /// Signal strength (0-15).
    pub rssi: u8,
    /// Subtype rendered as a protocol name.
    pub type_label: String,
    /// Command rendered as a human-readable name.
    pub command_label: String,
    /// Canonical device identity, e.g. `"A1"`.
    pub id_string: String,
}

impl Lighting1 {
    /// Wire discriminator for this family.
    pub const PACKET_TYPE: u8 = 0x10;

    /// Fixed packet size including the length byte.
    pub const SIZE: usize = 8;

    /// Off command code.
    pub const CMND_OFF: u8 = 0x00;

    /// On command code.
    pub const CMND_ON: u8 = 0x01;

    /// Maps a subtype code to its protocol name.
    #[must_use]
    pub fn type_label(subtype: u8) -> String {
        let label = match subtype {
            0x00 => "X10 lighting",
            0x01 => "ARC",
            0x02 => "ELRO AB400D",
            0x03 => "Waveman",
            0x04 => "Chacon EMW200",
            0x05 => "IMPULS",
            0x06 => "RisingSun",
            0x07 => "Philips SBC",
            _ => return unknown_type_label(Self::PACKET_TYPE, subtype),
        };
        label.to_owned()
    }

    /// Maps a command code to a human-readable name.
    #[must_use]
    pub fn command_label(cmnd: u8) -> String {
        let label = match cmnd {
            0x00 => "Off",
            0x01 => "On",
            0x02 => "Dim",
            0x03 => "Bright",
            0x05 => "All/group Off",
            0x06 => "All/group On",
            0x07 => "Chime",
            0xFF => "Illegal command",
            _ => return unknown_command_label(cmnd),
        };
        label.to_owned()
    }

    /// Resolves a protocol or brand name to a subtype code.
    ///
    /// Several brands share a subtype on the wire, so multiple names map
    /// to the same code.
    #[must_use]
    pub fn subtype_from_name(name: &str) -> Option<u8> {
        match name {
            "X10 lighting" => Some(0x00),
            "ARC"
            | "KlikAanKlikUit code wheel"
            | "NEXA code wheel"
            | "CHACON code wheel"
            | "HomeEasy code wheel"
            | "Proove"
            | "DomiaLite"
            | "InterTechno"
            | "AB600" => Some(0x01),
            "ELRO AB400D" => Some(0x02),
            "Waveman" => Some(0x03),
            "Chacon EMW200" => Some(0x04),
            "IMPULS" => Some(0x05),
            "RisingSun" => Some(0x06),
            "Philips SBC" => Some(0x07),
            _ => None,
        }
    }

    /// Decodes a received buffer.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        check_frame(data, Self::PACKET_TYPE, Self::SIZE)?;
        let subtype = data[2];
        let housecode = data[4];
        let unitcode = data[5];
        let cmnd = data[6];
        Ok(Self {
            subtype,
            seqnbr: data[3],
            housecode,
            unitcode,
            cmnd,
            rssi: data[7] >> 4,
            type_label: Self::type_label(subtype),
            command_label: Self::command_label(cmnd),
            id_string: format!("{}{unitcode}", housecode_letter(housecode)),
        })
    }

    /// Builds a packet for transmission. The status byte is zeroed since
    /// signal strength only exists on the receive side.
    #[must_use]
    pub fn transmit(subtype: u8, seqnbr: u8, housecode: u8, unitcode: u8, cmnd: u8) -> Self {
        Self {
            subtype,
            seqnbr,
            housecode,
            unitcode,
            cmnd,
            rssi: 0,
            type_label: Self::type_label(subtype),
            command_label: Self::command_label(cmnd),
            id_string: format!("{}{unitcode}", housecode_letter(housecode)),
        }
    }

    /// Encodes the packet into its wire representation.
    #[must_use]
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::SIZE);
        buf.put_u8((Self::SIZE - 1) as u8);
        buf.put_u8(Self::PACKET_TYPE);
        buf.put_u8(self.subtype);
        buf.put_u8(self.seqnbr);
        buf.put_u8(self.housecode);
        buf.put_u8(self.unitcode);
        buf.put_u8(self.cmnd);
        buf.put_u8(self.rssi << 4);
        buf.freeze()
    }
}

impl fmt::Display for Lighting1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lighting1 [subtype={}, seqnbr={}, id={}, cmnd={}, rssi={}]",
            self.type_label, self.seqnbr, self.id_string, self.command_label, self.rssi
        )
    }
}

/// Lighting2 packet (AC/HomeEasy protocols with 32-bit device ids).
///
/// Format:
/// ```text
/// [len=11:1] [type=0x11:1] [subtype:1] [seqnbr:1] [id:4BE]
/// [unitcode:1] [cmnd:1] [level:1] [status:1]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lighting2 {
    /// Protocol variant within the family.
    pub subtype: u8,
    /// Sequence number.
    pub seqnbr: u8,
    /// Combined 32-bit device id.
    pub id_combined: u32,
    /// Unit code within the device.
    pub unitcode: u8,
    /// Command code.
    pub cmnd: u8,
    /// Dim level on the wire scale (0-15).
    pub level: u8,
    /// Signal strength (0-15).
    pub rssi: u8,
    /// Subtype rendered as a protocol name.
    pub type_label: String,
    /// Command rendered as a human-readable name.
    pub command_label: String,
    /// Canonical device identity, e.g. `"0123abc:5"`.
    pub id_string: String,
}

impl Lighting2 {
    /// Wire discriminator for this family.
    pub const PACKET_TYPE: u8 = 0x11;

    /// Fixed packet size including the length byte.
    pub const SIZE: usize = 12;

    /// Off command code.
    pub const CMND_OFF: u8 = 0x00;

    /// On command code.
    pub const CMND_ON: u8 = 0x01;

    /// Set-level (dim) command code.
    pub const CMND_SET_LEVEL: u8 = 0x02;

    /// Set-group-level command code.
    pub const CMND_SET_GROUP_LEVEL: u8 = 0x05;

    /// Maps a subtype code to its protocol name.
    #[must_use]
    pub fn type_label(subtype: u8) -> String {
        let label = match subtype {
            0x00 => "AC",
            0x01 => "HomeEasy EU",
            0x02 => "ANSLUT",
            _ => return unknown_type_label(Self::PACKET_TYPE, subtype),
        };
        label.to_owned()
    }

    /// Maps a command code to a human-readable name.
    #[must_use]
    pub fn command_label(cmnd: u8) -> String {
        let label = match cmnd {
            0x00 => "Off",
            0x01 => "On",
            0x02 => "Set level",
            0x03 => "Group off",
            0x04 => "Group on",
            0x05 => "Set group level",
            _ => return unknown_command_label(cmnd),
        };
        label.to_owned()
    }

    /// Resolves a protocol or brand name to a subtype code.
    #[must_use]
    pub fn subtype_from_name(name: &str) -> Option<u8> {
        match name {
            "AC"
            | "KlikAanKlikUit automatic"
            | "NEXA automatic"
            | "CHACON automatic"
            | "HomeEasy UK" => Some(0x00),
            "HomeEasy EU" => Some(0x01),
            "ANSLUT" => Some(0x02),
            _ => None,
        }
    }

    /// Decodes a received buffer.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        check_frame(data, Self::PACKET_TYPE, Self::SIZE)?;
        let subtype = data[2];
        let id_combined = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
        let unitcode = data[8];
        let cmnd = data[9];
        Ok(Self {
            subtype,
            seqnbr: data[3],
            id_combined,
            unitcode,
            cmnd,
            level: data[10],
            rssi: data[11] >> 4,
            type_label: Self::type_label(subtype),
            command_label: Self::command_label(cmnd),
            id_string: format!("{id_combined:07x}:{unitcode}"),
        })
    }

    /// Builds a packet for transmission. The status byte is zeroed since
    /// signal strength only exists on the receive side.
    #[must_use]
    pub fn transmit(
        subtype: u8,
        seqnbr: u8,
        id_combined: u32,
        unitcode: u8,
        cmnd: u8,
        level: u8,
    ) -> Self {
        Self {
            subtype,
            seqnbr,
            id_combined,
            unitcode,
            cmnd,
            level,
            rssi: 0,
            type_label: Self::type_label(subtype),
            command_label: Self::command_label(cmnd),
            id_string: format!("{id_combined:07x}:{unitcode}"),
        }
    }

    /// Encodes the packet into its wire representation.
    #[must_use]
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::SIZE);
        buf.put_u8((Self::SIZE - 1) as u8);
        buf.put_u8(Self::PACKET_TYPE);
        buf.put_u8(self.subtype);
        buf.put_u8(self.seqnbr);
        buf.put_u32(self.id_combined);
        buf.put_u8(self.unitcode);
        buf.put_u8(self.cmnd);
        buf.put_u8(self.level);
        buf.put_u8(self.rssi << 4);
        buf.freeze()
    }
}

impl fmt::Display for Lighting2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lighting2 [subtype={}, seqnbr={}, id={}, cmnd={}, level={}, rssi={}]",
            self.type_label, self.seqnbr, self.id_string, self.command_label, self.level, self.rssi
        )
    }
}

/// Lighting3 packet (Ikea Koppla system/channel protocol).
///
/// Format:
/// ```text
/// [len=8:1] [type=0x12:1] [subtype:1] [seqnbr:1] [system:1]
/// [channel_lo:1] [channel_hi:1] [cmnd:1] [status:1]
/// ```
///
/// Unlike the other lighting families the status byte carries a battery
/// nibble in its low half.
#[derive(Debug, Clone, PartialEq)]
pub struct Lighting3 {
    /// Protocol variant within the family.
    pub subtype: u8,
    /// Sequence number.
    pub seqnbr: u8,
    /// System code.
    pub system: u8,
    /// Channel number combined from the lo/hi byte pair.
    pub channel: u16,
    /// Command code.
    pub cmnd: u8,
    /// Battery level (0-15).
    pub battery: u8,
    /// Signal strength (0-15).
    pub rssi: u8,
    /// Subtype rendered as a protocol name.
    pub type_label: String,
    /// Command rendered as a human-readable name.
    pub command_label: String,
    /// Canonical device identity, e.g. `"1:00a"`.
    pub id_string: String,
}

impl Lighting3 {
    /// Wire discriminator for this family.
    pub const PACKET_TYPE: u8 = 0x12;

    /// Fixed packet size including the length byte.
    pub const SIZE: usize = 9;

    /// On command code.
    pub const CMND_ON: u8 = 0x10;

    /// Off command code.
    pub const CMND_OFF: u8 = 0x1A;

    /// Maps a subtype code to its protocol name.
    #[must_use]
    pub fn type_label(subtype: u8) -> String {
        let label = match subtype {
            0x00 => "Ikea Koppla",
            _ => return unknown_type_label(Self::PACKET_TYPE, subtype),
        };
        label.to_owned()
    }

    /// Maps a command code to a human-readable name.
    #[must_use]
    pub fn command_label(cmnd: u8) -> String {
        let label = match cmnd {
            0x00 => "Bright",
            0x08 => "Dim",
            0x10 => "On",
            0x11 => "Level 1",
            0x12 => "Level 2",
            0x13 => "Level 3",
            0x14 => "Level 4",
            0x15 => "Level 5",
            0x16 => "Level 6",
            0x17 => "Level 7",
            0x18 => "Level 8",
            0x19 => "Level 9",
            0x1A => "Off",
            0x1C => "Program",
            _ => return unknown_command_label(cmnd),
        };
        label.to_owned()
    }

    /// Decodes a received buffer.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        check_frame(data, Self::PACKET_TYPE, Self::SIZE)?;
        let subtype = data[2];
        let system = data[4];
        let channel = (u16::from(data[6]) << 8) | u16::from(data[5]);
        let cmnd = data[7];
        Ok(Self {
            subtype,
            seqnbr: data[3],
            system,
            channel,
            cmnd,
            battery: data[8] & 0x0F,
            rssi: data[8] >> 4,
            type_label: Self::type_label(subtype),
            command_label: Self::command_label(cmnd),
            id_string: format!("{system:1x}:{channel:03x}"),
        })
    }

    /// Builds a packet for transmission. The status byte is zeroed since
    /// signal strength and battery only exist on the receive side.
    #[must_use]
    pub fn transmit(subtype: u8, seqnbr: u8, system: u8, channel: u16, cmnd: u8) -> Self {
        Self {
            subtype,
            seqnbr,
            system,
            channel,
            cmnd,
            battery: 0,
            rssi: 0,
            type_label: Self::type_label(subtype),
            command_label: Self::command_label(cmnd),
            id_string: format!("{system:1x}:{channel:03x}"),
        }
    }

    /// Encodes the packet into its wire representation.
    #[must_use]
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::SIZE);
        buf.put_u8((Self::SIZE - 1) as u8);
        buf.put_u8(Self::PACKET_TYPE);
        buf.put_u8(self.subtype);
        buf.put_u8(self.seqnbr);
        buf.put_u8(self.system);
        buf.put_u8((self.channel & 0xFF) as u8);
        buf.put_u8((self.channel >> 8) as u8);
        buf.put_u8(self.cmnd);
        buf.put_u8((self.rssi << 4) | (self.battery & 0x0F));
        buf.freeze()
    }
}

impl fmt::Display for Lighting3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lighting3 [subtype={}, seqnbr={}, id={}, cmnd={}, battery={}, rssi={}]",
            self.type_label,
            self.seqnbr,
            self.id_string,
            self.command_label,
            self.battery,
            self.rssi
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lighting1_decode() {
        // ARC housecode 'C' unit 3, command On, rssi 8
        let data = [0x07, 0x10, 0x01, 0x2A, 0x43, 0x03, 0x01, 0x80];
        let pkt = Lighting1::decode(&data).unwrap();
        assert_eq!(pkt.subtype, 0x01);
        assert_eq!(pkt.seqnbr, 0x2A);
        assert_eq!(pkt.id_string, "C3");
        assert_eq!(pkt.type_label, "ARC");
        assert_eq!(pkt.command_label, "On");
        assert_eq!(pkt.rssi, 8);
    }

    #[test]
    fn test_lighting1_roundtrip() {
        let pkt = Lighting1::transmit(0x01, 0x05, 0x44, 2, Lighting1::CMND_OFF);
        let decoded = Lighting1::decode(&pkt.encode()).unwrap();
        assert_eq!(decoded, pkt);
    }

    #[test]
    fn test_lighting1_unknown_codes_degrade() {
        let data = [0x07, 0x10, 0x09, 0x00, 0x41, 0x01, 0x0E, 0x00];
        let pkt = Lighting1::decode(&data).unwrap();
        assert_eq!(pkt.subtype, 0x09);
        assert_eq!(pkt.type_label, "Unknown type (0x10/0x09)");
        assert_eq!(pkt.cmnd, 0x0E);
        assert_eq!(pkt.command_label, "Unknown command (0x0e)");
    }

    #[test]
    fn test_lighting1_housecode_outside_range_degrades() {
        let data = [0x07, 0x10, 0x00, 0x00, 0x20, 0x01, 0x00, 0x00];
        let pkt = Lighting1::decode(&data).unwrap();
        assert_eq!(pkt.id_string, "0x201");
    }

    #[test]
    fn test_lighting1_subtype_from_name() {
        assert_eq!(Lighting1::subtype_from_name("ARC"), Some(0x01));
        assert_eq!(Lighting1::subtype_from_name("Proove"), Some(0x01));
        assert_eq!(Lighting1::subtype_from_name("Waveman"), Some(0x03));
        assert_eq!(Lighting1::subtype_from_name("nonsense"), None);
    }

    #[test]
    fn test_lighting2_decode() {
        let data = [
            0x0B, 0x11, 0x00, 0x01, 0x01, 0x23, 0xAB, 0xCD, 0x05, 0x02, 0x08, 0x70,
        ];
        let pkt = Lighting2::decode(&data).unwrap();
        assert_eq!(pkt.id_combined, 0x0123_ABCD);
        assert_eq!(pkt.id_string, "123abcd:5");
        assert_eq!(pkt.command_label, "Set level");
        assert_eq!(pkt.level, 8);
        assert_eq!(pkt.rssi, 7);
    }

    #[test]
    fn test_lighting2_roundtrip() {
        let pkt = Lighting2::transmit(0x00, 3, 0x0012_3456, 10, Lighting2::CMND_SET_LEVEL, 12);
        let decoded = Lighting2::decode(&pkt.encode()).unwrap();
        assert_eq!(decoded, pkt);
    }

    #[test]
    fn test_lighting2_id_string_pads_to_seven_digits() {
        let pkt = Lighting2::transmit(0x00, 0, 0xAB, 1, Lighting2::CMND_ON, 0);
        assert_eq!(pkt.id_string, "00000ab:1");
    }

    #[test]
    fn test_lighting3_decode() {
        // system 1, channel 0x20A, command Off, battery 4, rssi 7
        let data = [0x08, 0x12, 0x00, 0x01, 0x01, 0x0A, 0x02, 0x1A, 0x74];
        let pkt = Lighting3::decode(&data).unwrap();
        assert_eq!(pkt.system, 1);
        assert_eq!(pkt.channel, 0x20A);
        assert_eq!(pkt.id_string, "1:20a");
        assert_eq!(pkt.command_label, "Off");
        assert_eq!(pkt.battery, 4);
        assert_eq!(pkt.rssi, 7);
    }

    #[test]
    fn test_lighting3_roundtrip() {
        let pkt = Lighting3::transmit(0x00, 7, 2, 0x155, Lighting3::CMND_ON);
        let decoded = Lighting3::decode(&pkt.encode()).unwrap();
        assert_eq!(decoded, pkt);
    }

    #[test]
    fn test_lighting3_channel_byte_order() {
        let pkt = Lighting3::transmit(0x00, 0, 1, 0x0102, 0x10);
        let data = pkt.encode();
        assert_eq!(data[5], 0x02); // channel low byte first
        assert_eq!(data[6], 0x01);
    }

    #[test]
    fn test_transmit_zeroes_status_byte() {
        let data = Lighting3::transmit(0x00, 0, 1, 1, Lighting3::CMND_ON).encode();
        assert_eq!(data[8], 0x00);
    }

    #[test]
    fn test_decode_rejects_short_buffer() {
        let data = [0x07, 0x10, 0x00, 0x00];
        assert!(matches!(
            Lighting1::decode(&data),
            Err(DecodeError::WrongSize { expected: 8, .. })
        ));
    }
}
