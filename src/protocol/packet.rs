//! The packet union and the dispatch-by-discriminator parser.
//!
//! Byte 1 of every buffer is the packet-type discriminator. [`parse`]
//! routes a framed buffer to the matching family decoder; buffers with a
//! discriminator the codec does not model are skipped, not failed, since
//! the bridge hardware emits more packet types than are implemented here.

use std::fmt;

use crate::error::DecodeError;

use super::lighting::{Lighting1, Lighting2, Lighting3};
use super::sensor::{
    Baro, BarometerReading, Humid, HumidityReading, Temp, TempHumid, TempHumidBaro,
};

/// A decoded packet, one variant per wire format.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    /// Lighting1 control packet (0x10).
    Lighting1(Lighting1),
    /// Lighting2 control packet (0x11).
    Lighting2(Lighting2),
    /// Lighting3 control packet (0x12).
    Lighting3(Lighting3),
    /// Temperature sensor packet (0x50).
    Temp(Temp),
    /// Humidity sensor packet (0x51).
    Humid(Humid),
    /// Temperature and humidity sensor packet (0x52).
    TempHumid(TempHumid),
    /// Barometer sensor packet (0x53).
    Baro(Baro),
    /// Temperature, humidity and barometer sensor packet (0x54).
    TempHumidBaro(TempHumidBaro),
}

/// Parses one framed buffer into a packet.
///
/// Returns `Ok(None)` when the discriminator byte is not one the codec
/// models; callers should ignore the buffer and wait for the next one.
/// A malformed buffer for a known discriminator is a hard error.
pub fn parse(data: &[u8]) -> Result<Option<Packet>, DecodeError> {
    let Some(&discriminator) = data.get(1) else {
        tracing::debug!(data = %hex::encode(data), "buffer too short for a discriminator, skipping");
        return Ok(None);
    };

    let packet = match discriminator {
        Lighting1::PACKET_TYPE => Packet::Lighting1(Lighting1::decode(data)?),
        Lighting2::PACKET_TYPE => Packet::Lighting2(Lighting2::decode(data)?),
        Lighting3::PACKET_TYPE => Packet::Lighting3(Lighting3::decode(data)?),
        Temp::PACKET_TYPE => Packet::Temp(Temp::decode(data)?),
        TempHumid::PACKET_TYPE => Packet::TempHumid(TempHumid::decode(data)?),
        other => {
            tracing::debug!(
                packet_type = %format_args!("{other:#04x}"),
                data = %hex::encode(data),
                "skipping unrecognized packet type"
            );
            return Ok(None);
        }
    };
    Ok(Some(packet))
}

impl Packet {
    /// The wire discriminator of this packet's family.
    #[must_use]
    pub const fn packet_type(&self) -> u8 {
        match self {
            Self::Lighting1(_) => Lighting1::PACKET_TYPE,
            Self::Lighting2(_) => Lighting2::PACKET_TYPE,
            Self::Lighting3(_) => Lighting3::PACKET_TYPE,
            Self::Temp(_) => Temp::PACKET_TYPE,
            Self::Humid(_) => Humid::PACKET_TYPE,
            Self::TempHumid(_) => TempHumid::PACKET_TYPE,
            Self::Baro(_) => Baro::PACKET_TYPE,
            Self::TempHumidBaro(_) => TempHumidBaro::PACKET_TYPE,
        }
    }

    /// The subtype code narrowing the protocol variant.
    #[must_use]
    pub const fn subtype(&self) -> u8 {
        match self {
            Self::Lighting1(p) => p.subtype,
            Self::Lighting2(p) => p.subtype,
            Self::Lighting3(p) => p.subtype,
            Self::Temp(p) => p.subtype,
            Self::Humid(p) => p.subtype,
            Self::TempHumid(p) => p.subtype,
            Self::Baro(p) => p.subtype,
            Self::TempHumidBaro(p) => p.subtype,
        }
    }

    /// The sequence number byte.
    #[must_use]
    pub const fn seqnbr(&self) -> u8 {
        match self {
            Self::Lighting1(p) => p.seqnbr,
            Self::Lighting2(p) => p.seqnbr,
            Self::Lighting3(p) => p.seqnbr,
            Self::Temp(p) => p.seqnbr,
            Self::Humid(p) => p.seqnbr,
            Self::TempHumid(p) => p.seqnbr,
            Self::Baro(p) => p.seqnbr,
            Self::TempHumidBaro(p) => p.seqnbr,
        }
    }

    /// Signal strength nibble (0-15).
    #[must_use]
    pub const fn rssi(&self) -> u8 {
        match self {
            Self::Lighting1(p) => p.rssi,
            Self::Lighting2(p) => p.rssi,
            Self::Lighting3(p) => p.rssi,
            Self::Temp(p) => p.rssi,
            Self::Humid(p) => p.rssi,
            Self::TempHumid(p) => p.rssi,
            Self::Baro(p) => p.rssi,
            Self::TempHumidBaro(p) => p.rssi,
        }
    }

    /// The subtype rendered as a label.
    #[must_use]
    pub fn type_label(&self) -> &str {
        match self {
            Self::Lighting1(p) => &p.type_label,
            Self::Lighting2(p) => &p.type_label,
            Self::Lighting3(p) => &p.type_label,
            Self::Temp(p) => &p.type_label,
            Self::Humid(p) => &p.type_label,
            Self::TempHumid(p) => &p.type_label,
            Self::Baro(p) => &p.type_label,
            Self::TempHumidBaro(p) => &p.type_label,
        }
    }

    /// The canonical device identity string.
    #[must_use]
    pub fn id_string(&self) -> &str {
        match self {
            Self::Lighting1(p) => &p.id_string,
            Self::Lighting2(p) => &p.id_string,
            Self::Lighting3(p) => &p.id_string,
            Self::Temp(p) => &p.id_string,
            Self::Humid(p) => &p.id_string,
            Self::TempHumid(p) => &p.id_string,
            Self::Baro(p) => &p.id_string,
            Self::TempHumidBaro(p) => &p.id_string,
        }
    }

    /// Whether this packet belongs to a lighting-control family.
    #[must_use]
    pub const fn is_lighting(&self) -> bool {
        matches!(
            self,
            Self::Lighting1(_) | Self::Lighting2(_) | Self::Lighting3(_)
        )
    }

    /// Whether this packet belongs to a sensor family.
    #[must_use]
    pub const fn is_sensor(&self) -> bool {
        !self.is_lighting()
    }

    /// Temperature reading, for variants with the temperature capability.
    #[must_use]
    pub const fn temperature(&self) -> Option<f32> {
        match self {
            Self::Temp(p) => Some(p.temperature),
            Self::TempHumid(p) => Some(p.temperature),
            Self::TempHumidBaro(p) => Some(p.temperature),
            _ => None,
        }
    }

    /// Humidity reading, for variants with the humidity capability.
    #[must_use]
    pub const fn humidity(&self) -> Option<HumidityReading> {
        match self {
            Self::Humid(p) => Some(HumidityReading {
                value: p.humidity,
                status: p.humidity_status,
                status_label: p.humidity_status_label,
            }),
            Self::TempHumid(p) => Some(HumidityReading {
                value: p.humidity,
                status: p.humidity_status,
                status_label: p.humidity_status_label,
            }),
            Self::TempHumidBaro(p) => Some(HumidityReading {
                value: p.humidity,
                status: p.humidity_status,
                status_label: p.humidity_status_label,
            }),
            _ => None,
        }
    }

    /// Barometer reading, for variants with the barometer capability.
    #[must_use]
    pub const fn barometer(&self) -> Option<BarometerReading> {
        match self {
            Self::Baro(p) => Some(BarometerReading {
                pressure: p.baro,
                forecast: p.forecast,
                forecast_label: p.forecast_label,
            }),
            Self::TempHumidBaro(p) => Some(BarometerReading {
                pressure: p.baro,
                forecast: p.forecast,
                forecast_label: p.forecast_label,
            }),
            _ => None,
        }
    }

    /// Battery nibble (0-15). Present for all sensor families and for
    /// Lighting3; the other lighting families do not report battery.
    #[must_use]
    pub const fn battery(&self) -> Option<u8> {
        match self {
            Self::Lighting3(p) => Some(p.battery),
            Self::Temp(p) => Some(p.battery),
            Self::Humid(p) => Some(p.battery),
            Self::TempHumid(p) => Some(p.battery),
            Self::Baro(p) => Some(p.battery),
            Self::TempHumidBaro(p) => Some(p.battery),
            Self::Lighting1(_) | Self::Lighting2(_) => None,
        }
    }

    /// Command label, for lighting families.
    #[must_use]
    pub fn command_label(&self) -> Option<&str> {
        match self {
            Self::Lighting1(p) => Some(&p.command_label),
            Self::Lighting2(p) => Some(&p.command_label),
            Self::Lighting3(p) => Some(&p.command_label),
            _ => None,
        }
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lighting1(p) => p.fmt(f),
            Self::Lighting2(p) => p.fmt(f),
            Self::Lighting3(p) => p.fmt(f),
            Self::Temp(p) => p.fmt(f),
            Self::Humid(p) => p.fmt(f),
            Self::TempHumid(p) => p.fmt(f),
            Self::Baro(p) => p.fmt(f),
            Self::TempHumidBaro(p) => p.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIGHTING1_FRAME: [u8; 8] = [0x07, 0x10, 0x00, 0x01, 0x41, 0x02, 0x01, 0x50];

    #[test]
    fn test_parse_dispatches_lighting1() {
        let pkt = parse(&LIGHTING1_FRAME).unwrap().unwrap();
        assert!(matches!(pkt, Packet::Lighting1(_)));
        assert_eq!(pkt.packet_type(), 0x10);
        assert_eq!(pkt.id_string(), "A2");
    }

    #[test]
    fn test_parse_dispatches_temp_humid() {
        let data = [
            0x0A, 0x52, 0x01, 0x2A, 0x96, 0x03, 0x00, 0xD7, 0x36, 0x02, 0x79,
        ];
        let pkt = parse(&data).unwrap().unwrap();
        assert!(matches!(pkt, Packet::TempHumid(_)));
    }

    #[test]
    fn test_parse_skips_unrecognized_discriminator() {
        // 0x5A is a real bridge packet type (energy) that this codec
        // does not model
        let data = [0x07, 0x5A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(parse(&data).unwrap(), None);
    }

    #[test]
    fn test_parse_skips_undispatched_sensor_families() {
        // Humid (0x51) decodes standalone but is not wired into dispatch
        let data = [0x08, 0x51, 0x01, 0x00, 0x00, 0x01, 0x32, 0x00, 0x00];
        assert_eq!(parse(&data).unwrap(), None);
    }

    #[test]
    fn test_parse_skips_empty_buffer() {
        assert_eq!(parse(&[]).unwrap(), None);
        assert_eq!(parse(&[0x07]).unwrap(), None);
    }

    #[test]
    fn test_parse_fails_on_malformed_known_packet() {
        let data = [0x07, 0x10, 0x00, 0x01];
        assert!(parse(&data).is_err());
    }

    #[test]
    fn test_capability_accessors() {
        let data = [
            0x0D, 0x54, 0x02, 0x07, 0xE9, 0x00, 0x00, 0xD2, 0x2D, 0x00, 0x03, 0xF9, 0x03, 0x59,
        ];
        let pkt = Packet::TempHumidBaro(TempHumidBaro::decode(&data).unwrap());
        assert!(pkt.temperature().is_some());
        assert!(pkt.humidity().is_some());
        assert!(pkt.barometer().is_some());
        assert_eq!(pkt.battery(), Some(9));

        let pkt = parse(&LIGHTING1_FRAME).unwrap().unwrap();
        assert_eq!(pkt.temperature(), None);
        assert!(pkt.humidity().is_none());
        assert!(pkt.barometer().is_none());
        assert_eq!(pkt.battery(), None);
        assert_eq!(pkt.command_label(), Some("On"));
    }
}
