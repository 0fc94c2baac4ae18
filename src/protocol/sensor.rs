//! Sensor packet families (temperature, humidity, barometer and their
//! combinations).
//!
//! Sensor packets are receive-only; there is no transmit path. All share a
//! 2-byte sensor id and a trailing status byte packing battery (low nibble)
//! and signal strength (high nibble).

use std::fmt;

use super::{check_frame, unknown_type_label};
use crate::error::DecodeError;

/// Decodes the signed 12.4-style temperature pair into tenths of a degree.
///
/// Bit 7 of the high byte is the sign flag; the magnitude is the remaining
/// 15 bits divided by 10.
fn decode_temperature(hi: u8, lo: u8) -> f32 {
    let magnitude = f32::from((u16::from(hi & 0x7F) << 8) | u16::from(lo)) / 10.0;
    if hi & 0x80 != 0 { -magnitude } else { magnitude }
}

/// Maps a humidity status code to a label, shared by all humidity-bearing
/// families. Codes outside 0-3 degrade to a fixed sentinel.
#[must_use]
pub fn humidity_status_label(status: u8) -> &'static str {
    match status {
        0x00 => "dry",
        0x01 => "comfort",
        0x02 => "normal",
        0x03 => "wet",
        _ => "unknown humidity",
    }
}

/// Maps a forecast code to a label, shared by all barometer-bearing
/// families. Codes outside 0-4 degrade to a fixed sentinel.
#[must_use]
pub fn forecast_label(forecast: u8) -> &'static str {
    match forecast {
        0x00 => "no forecast available",
        0x01 => "sunny",
        0x02 => "partly cloudy",
        0x03 => "cloudy",
        0x04 => "rain",
        _ => "unknown forecast",
    }
}

fn sensor_id_string(id1: u8, id2: u8) -> String {
    format!("{id1:02x}:{id2:02x}")
}

/// A humidity reading with its status annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumidityReading {
    /// Relative humidity in percent.
    pub value: u8,
    /// Raw status code.
    pub status: u8,
    /// Status rendered as a label.
    pub status_label: &'static str,
}

/// A barometric pressure reading with its forecast annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarometerReading {
    /// Pressure in hPa.
    pub pressure: u16,
    /// Raw forecast code.
    pub forecast: u8,
    /// Forecast rendered as a label.
    pub forecast_label: &'static str,
}

/// Temperature sensor packet.
///
/// Format:
/// ```text
/// [len=8:1] [type=0x50:1] [subtype:1] [seqnbr:1] [id1:1] [id2:1]
/// [temp_hi:1] [temp_lo:1] [status:1]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Temp {
    /// Protocol variant within the family.
    pub subtype: u8,
    /// Sequence number.
    pub seqnbr: u8,
    /// First sensor id byte.
    pub id1: u8,
    /// Second sensor id byte.
    pub id2: u8,
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    /// Battery level (0-15).
    pub battery: u8,
    /// Signal strength (0-15).
    pub rssi: u8,
    /// Subtype rendered as a sensor model list.
    pub type_label: String,
    /// Canonical device identity, e.g. `"96:03"`.
    pub id_string: String,
}

impl Temp {
    /// Wire discriminator for this family.
    pub const PACKET_TYPE: u8 = 0x50;

    /// Fixed packet size including the length byte.
    pub const SIZE: usize = 9;

    /// Maps a subtype code to the sensor models it covers.
    #[must_use]
    pub fn type_label(subtype: u8) -> String {
        let label = match subtype {
            0x01 => "THR128/138, THC138",
            0x02 => "THC238/268,THN132,THWR288,THRN122,THN122,AW129/131",
            0x03 => "THWR800",
            0x04 => "RTHN318",
            0x05 => "La Crosse TX2, TX3, TX4, TX17",
            0x06 => "TS15C",
            0x07 => "Viking 02811",
            0x08 => "La Crosse WS2300",
            0x09 => "RUBiCSON",
            0x0A => "TFA 30.3133",
            _ => return unknown_type_label(Self::PACKET_TYPE, subtype),
        };
        label.to_owned()
    }

    /// Decodes a received buffer.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        check_frame(data, Self::PACKET_TYPE, Self::SIZE)?;
        let subtype = data[2];
        Ok(Self {
            subtype,
            seqnbr: data[3],
            id1: data[4],
            id2: data[5],
            temperature: decode_temperature(data[6], data[7]),
            battery: data[8] & 0x0F,
            rssi: data[8] >> 4,
            type_label: Self::type_label(subtype),
            id_string: sensor_id_string(data[4], data[5]),
        })
    }
}

impl fmt::Display for Temp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Temp [subtype={}, seqnbr={}, id={}, temp={}, battery={}, rssi={}]",
            self.type_label, self.seqnbr, self.id_string, self.temperature, self.battery, self.rssi
        )
    }
}

/// Humidity sensor packet.
///
/// Format:
/// ```text
/// [len=8:1] [type=0x51:1] [subtype:1] [seqnbr:1] [id1:1] [id2:1]
/// [humidity:1] [hum_status:1] [status:1]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Humid {
    /// Protocol variant within the family.
    pub subtype: u8,
    /// Sequence number.
    pub seqnbr: u8,
    /// First sensor id byte.
    pub id1: u8,
    /// Second sensor id byte.
    pub id2: u8,
    /// Relative humidity in percent.
    pub humidity: u8,
    /// Raw humidity status code.
    pub humidity_status: u8,
    /// Battery level (0-15).
    pub battery: u8,
    /// Signal strength (0-15).
    pub rssi: u8,
    /// Subtype rendered as a sensor model list.
    pub type_label: String,
    /// Humidity status rendered as a label.
    pub humidity_status_label: &'static str,
    /// Canonical device identity.
    pub id_string: String,
}

impl Humid {
    /// Wire discriminator for this family.
    pub const PACKET_TYPE: u8 = 0x51;

    /// Fixed packet size including the length byte.
    pub const SIZE: usize = 9;

    /// Maps a subtype code to the sensor models it covers.
    #[must_use]
    pub fn type_label(subtype: u8) -> String {
        let label = match subtype {
            0x01 => "LaCrosse TX3",
            0x02 => "LaCrosse WS2300",
            _ => return unknown_type_label(Self::PACKET_TYPE, subtype),
        };
        label.to_owned()
    }

    /// Decodes a received buffer.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        check_frame(data, Self::PACKET_TYPE, Self::SIZE)?;
        let subtype = data[2];
        let humidity_status = data[7];
        Ok(Self {
            subtype,
            seqnbr: data[3],
            id1: data[4],
            id2: data[5],
            humidity: data[6],
            humidity_status,
            battery: data[8] & 0x0F,
            rssi: data[8] >> 4,
            type_label: Self::type_label(subtype),
            humidity_status_label: humidity_status_label(humidity_status),
            id_string: sensor_id_string(data[4], data[5]),
        })
    }
}

impl fmt::Display for Humid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Humid [subtype={}, seqnbr={}, id={}, humidity={}, humidity_status={}, battery={}, rssi={}]",
            self.type_label,
            self.seqnbr,
            self.id_string,
            self.humidity,
            self.humidity_status_label,
            self.battery,
            self.rssi
        )
    }
}

/// Combined temperature and humidity sensor packet.
///
/// Format:
/// ```text
/// [len=10:1] [type=0x52:1] [subtype:1] [seqnbr:1] [id1:1] [id2:1]
/// [temp_hi:1] [temp_lo:1] [humidity:1] [hum_status:1] [status:1]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TempHumid {
    /// Protocol variant within the family.
    pub subtype: u8,
    /// Sequence number.
    pub seqnbr: u8,
    /// First sensor id byte.
    pub id1: u8,
    /// Second sensor id byte.
    pub id2: u8,
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub humidity: u8,
    /// Raw humidity status code.
    pub humidity_status: u8,
    /// Battery level (0-15).
    pub battery: u8,
    /// Signal strength (0-15).
    pub rssi: u8,
    /// Subtype rendered as a sensor model list.
    pub type_label: String,
    /// Humidity status rendered as a label.
    pub humidity_status_label: &'static str,
    /// Canonical device identity.
    pub id_string: String,
}

impl TempHumid {
    /// Wire discriminator for this family.
    pub const PACKET_TYPE: u8 = 0x52;

    /// Fixed packet size including the length byte.
    pub const SIZE: usize = 11;

    /// Maps a subtype code to the sensor models it covers.
    #[must_use]
    pub fn type_label(subtype: u8) -> String {
        let label = match subtype {
            0x01 => "THGN122/123, THGN132, THGR122/228/238/268",
            0x02 => "THGR810, THGN800",
            0x03 => "RTGR328",
            0x04 => "THGR328",
            0x05 => "WTGR800",
            0x06 => "THGR918, THGRN228, THGN500",
            0x07 => "TFA TS34C, Cresta",
            0x08 => "WT260,WT260H,WT440H,WT450,WT450H",
            0x09 => "Viking 02035,02038",
            _ => return unknown_type_label(Self::PACKET_TYPE, subtype),
        };
        label.to_owned()
    }

    /// Decodes a received buffer.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        check_frame(data, Self::PACKET_TYPE, Self::SIZE)?;
        let subtype = data[2];
        let humidity_status = data[9];
        Ok(Self {
            subtype,
            seqnbr: data[3],
            id1: data[4],
            id2: data[5],
            temperature: decode_temperature(data[6], data[7]),
            humidity: data[8],
            humidity_status,
            battery: data[10] & 0x0F,
            rssi: data[10] >> 4,
            type_label: Self::type_label(subtype),
            humidity_status_label: humidity_status_label(humidity_status),
            id_string: sensor_id_string(data[4], data[5]),
        })
    }
}

impl fmt::Display for TempHumid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TempHumid [subtype={}, seqnbr={}, id={}, temp={}, humidity={}, humidity_status={}, battery={}, rssi={}]",
            self.type_label,
            self.seqnbr,
            self.id_string,
            self.temperature,
            self.humidity,
            self.humidity_status_label,
            self.battery,
            self.rssi
        )
    }
}

/// Barometric pressure sensor packet.
///
/// Format:
/// ```text
/// [len=9:1] [type=0x53:1] [subtype:1] [seqnbr:1] [id1:1] [id2:1]
/// [baro_hi:1] [baro_lo:1] [forecast:1] [status:1]
/// ```
///
/// No standalone barometer subtypes are documented in the SDK yet, so the
/// subtype table is empty and every code degrades to the fallback label.
#[derive(Debug, Clone, PartialEq)]
pub struct Baro {
    /// Protocol variant within the family.
    pub subtype: u8,
    /// Sequence number.
    pub seqnbr: u8,
    /// First sensor id byte.
    pub id1: u8,
    /// Second sensor id byte.
    pub id2: u8,
    /// Barometric pressure in hPa.
    pub baro: u16,
    /// Raw forecast code.
    pub forecast: u8,
    /// Battery level (0-15).
    pub battery: u8,
    /// Signal strength (0-15).
    pub rssi: u8,
    /// Subtype rendered as a label.
    pub type_label: String,
    /// Forecast rendered as a label.
    pub forecast_label: &'static str,
    /// Canonical device identity.
    pub id_string: String,
}

impl Baro {
    /// Wire discriminator for this family.
    pub const PACKET_TYPE: u8 = 0x53;

    /// Fixed packet size including the length byte.
    pub const SIZE: usize = 10;

    /// Maps a subtype code to a label.
    #[must_use]
    pub fn type_label(subtype: u8) -> String {
        unknown_type_label(Self::PACKET_TYPE, subtype)
    }

    /// Decodes a received buffer.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        check_frame(data, Self::PACKET_TYPE, Self::SIZE)?;
        let subtype = data[2];
        let forecast = data[8];
        Ok(Self {
            subtype,
            seqnbr: data[3],
            id1: data[4],
            id2: data[5],
            baro: u16::from_be_bytes([data[6], data[7]]),
            forecast,
            battery: data[9] & 0x0F,
            rssi: data[9] >> 4,
            type_label: Self::type_label(subtype),
            forecast_label: forecast_label(forecast),
            id_string: sensor_id_string(data[4], data[5]),
        })
    }
}

impl fmt::Display for Baro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Baro [subtype={}, seqnbr={}, id={}, baro={}, forecast={}, battery={}, rssi={}]",
            self.type_label,
            self.seqnbr,
            self.id_string,
            self.baro,
            self.forecast_label,
            self.battery,
            self.rssi
        )
    }
}

/// Combined temperature, humidity and barometric pressure sensor packet.
///
/// Format:
/// ```text
/// [len=13:1] [type=0x54:1] [subtype:1] [seqnbr:1] [id1:1] [id2:1]
/// [temp_hi:1] [temp_lo:1] [humidity:1] [hum_status:1]
/// [baro_hi:1] [baro_lo:1] [forecast:1] [status:1]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TempHumidBaro {
    /// Protocol variant within the family.
    pub subtype: u8,
    /// Sequence number.
    pub seqnbr: u8,
    /// First sensor id byte.
    pub id1: u8,
    /// Second sensor id byte.
    pub id2: u8,
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub humidity: u8,
    /// Raw humidity status code.
    pub humidity_status: u8,
    /// Barometric pressure in hPa.
    pub baro: u16,
    /// Raw forecast code.
    pub forecast: u8,
    /// Battery level (0-15).
    pub battery: u8,
    /// Signal strength (0-15).
    pub rssi: u8,
    /// Subtype rendered as a sensor model list.
    pub type_label: String,
    /// Humidity status rendered as a label.
    pub humidity_status_label: &'static str,
    /// Forecast rendered as a label.
    pub forecast_label: &'static str,
    /// Canonical device identity.
    pub id_string: String,
}

impl TempHumidBaro {
    /// Wire discriminator for this family.
    pub const PACKET_TYPE: u8 = 0x54;

    /// Fixed packet size including the length byte.
    pub const SIZE: usize = 14;

    /// Maps a subtype code to the sensor models it covers.
    #[must_use]
    pub fn type_label(subtype: u8) -> String {
        let label = match subtype {
            0x01 => "BTHR918",
            0x02 => "BTHR918N, BTHR968",
            _ => return unknown_type_label(Self::PACKET_TYPE, subtype),
        };
        label.to_owned()
    }

    /// Decodes a received buffer.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        check_frame(data, Self::PACKET_TYPE, Self::SIZE)?;
        let subtype = data[2];
        let humidity_status = data[9];
        let forecast = data[12];
        Ok(Self {
            subtype,
            seqnbr: data[3],
            id1: data[4],
            id2: data[5],
            temperature: decode_temperature(data[6], data[7]),
            humidity: data[8],
            humidity_status,
            baro: u16::from_be_bytes([data[10], data[11]]),
            forecast,
            battery: data[13] & 0x0F,
            rssi: data[13] >> 4,
            type_label: Self::type_label(subtype),
            humidity_status_label: humidity_status_label(humidity_status),
            forecast_label: forecast_label(forecast),
            id_string: sensor_id_string(data[4], data[5]),
        })
    }
}

impl fmt::Display for TempHumidBaro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TempHumidBaro [subtype={}, seqnbr={}, id={}, temp={}, humidity={}, humidity_status={}, baro={}, forecast={}, battery={}, rssi={}]",
            self.type_label,
            self.seqnbr,
            self.id_string,
            self.temperature,
            self.humidity,
            self.humidity_status_label,
            self.baro,
            self.forecast_label,
            self.battery,
            self.rssi
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_sign() {
        // hi=0x80 sets the sign flag, magnitude 0x000A = 1.0
        assert!((decode_temperature(0x80, 0x0A) - (-1.0)).abs() < f32::EPSILON);
        assert!((decode_temperature(0x00, 0x0A) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_temp_decode() {
        // id 96:03, temp 21.5, battery 9, rssi 6
        let data = [0x08, 0x50, 0x02, 0x11, 0x96, 0x03, 0x00, 0xD7, 0x69];
        let pkt = Temp::decode(&data).unwrap();
        assert_eq!(pkt.id_string, "96:03");
        assert!((pkt.temperature - 21.5).abs() < f32::EPSILON);
        assert_eq!(pkt.battery, 9);
        assert_eq!(pkt.rssi, 6);
        assert_eq!(
            pkt.type_label,
            "THC238/268,THN132,THWR288,THRN122,THN122,AW129/131"
        );
    }

    #[test]
    fn test_temp_negative_reading() {
        let data = [0x08, 0x50, 0x01, 0x00, 0x01, 0x02, 0x80, 0x0A, 0x00];
        let pkt = Temp::decode(&data).unwrap();
        assert!((pkt.temperature - (-1.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_humid_decode() {
        let data = [0x08, 0x51, 0x01, 0x05, 0xAB, 0xCD, 0x3C, 0x01, 0x42];
        let pkt = Humid::decode(&data).unwrap();
        assert_eq!(pkt.humidity, 60);
        assert_eq!(pkt.humidity_status, 0x01);
        assert_eq!(pkt.humidity_status_label, "comfort");
        assert_eq!(pkt.type_label, "LaCrosse TX3");
        assert_eq!(pkt.id_string, "ab:cd");
    }

    #[test]
    fn test_humidity_status_fallback() {
        let data = [0x08, 0x51, 0x01, 0x00, 0x00, 0x01, 0x32, 0x09, 0x00];
        let pkt = Humid::decode(&data).unwrap();
        assert_eq!(pkt.humidity_status, 0x09);
        assert_eq!(pkt.humidity_status_label, "unknown humidity");
    }

    #[test]
    fn test_temp_humid_decode() {
        let data = [
            0x0A, 0x52, 0x01, 0x2A, 0x96, 0x03, 0x00, 0xD7, 0x36, 0x02, 0x79,
        ];
        let pkt = TempHumid::decode(&data).unwrap();
        assert!((pkt.temperature - 21.5).abs() < f32::EPSILON);
        assert_eq!(pkt.humidity, 54);
        assert_eq!(pkt.humidity_status_label, "normal");
        assert_eq!(pkt.battery, 9);
        assert_eq!(pkt.rssi, 7);
    }

    #[test]
    fn test_baro_decode() {
        // 0x03F8 = 1016 hPa, forecast sunny
        let data = [0x09, 0x53, 0x01, 0x00, 0x12, 0x34, 0x03, 0xF8, 0x01, 0x50];
        let pkt = Baro::decode(&data).unwrap();
        assert_eq!(pkt.baro, 1016);
        assert_eq!(pkt.forecast_label, "sunny");
        // No documented subtypes yet, always the fallback
        assert_eq!(pkt.type_label, "Unknown type (0x53/0x01)");
    }

    #[test]
    fn test_temp_humid_baro_decode() {
        let data = [
            0x0D, 0x54, 0x02, 0x07, 0xE9, 0x00, 0x00, 0xD2, 0x2D, 0x00, 0x03, 0xF9, 0x03, 0x59,
        ];
        let pkt = TempHumidBaro::decode(&data).unwrap();
        assert_eq!(pkt.type_label, "BTHR918N, BTHR968");
        assert!((pkt.temperature - 21.0).abs() < f32::EPSILON);
        assert_eq!(pkt.humidity, 45);
        assert_eq!(pkt.humidity_status_label, "dry");
        assert_eq!(pkt.baro, 1017);
        assert_eq!(pkt.forecast, 0x03);
        assert_eq!(pkt.forecast_label, "cloudy");
        assert_eq!(pkt.battery, 9);
        assert_eq!(pkt.rssi, 5);
    }

    #[test]
    fn test_forecast_fallback() {
        let data = [0x09, 0x53, 0x00, 0x00, 0x00, 0x01, 0x03, 0xE8, 0x07, 0x00];
        let pkt = Baro::decode(&data).unwrap();
        assert_eq!(pkt.forecast, 0x07);
        assert_eq!(pkt.forecast_label, "unknown forecast");
    }

    #[test]
    fn test_decode_rejects_length_byte_mismatch() {
        let data = [0x09, 0x50, 0x01, 0x00, 0x01, 0x02, 0x00, 0x0A, 0x00];
        assert!(matches!(
            Temp::decode(&data),
            Err(DecodeError::LengthMismatch {
                expected: 8,
                header: 9,
                ..
            })
        ));
    }
}
