//! Event abstraction over decoded packets.
//!
//! An event pairs the derived [`Device`] with an ordered mapping from
//! measurement or command name to value. Sensor events compose their
//! mapping from the packet's capability mix (temperature, humidity,
//! barometer), never from the concrete variant, since some wire formats
//! combine capabilities.

use std::fmt;

use crate::device::Device;
use crate::protocol::{Lighting2, Packet};

/// A single event value, either numeric or string-typed.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer value (counts, codes, nibbles, percentages).
    Int(i64),
    /// Floating-point value (temperature).
    Float(f64),
    /// String-typed value (labels).
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => v.fmt(f),
            Self::Float(v) => v.fmt(f),
            Self::Text(v) => v.fmt(f),
        }
    }
}

/// An event derived from a decoded packet.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A sensor reading.
    Sensor(SensorEvent),
    /// A control command observed on the air.
    Control(ControlEvent),
}

impl Event {
    /// Wraps a decoded packet into the matching event kind.
    #[must_use]
    pub fn from_packet(packet: &Packet) -> Self {
        if packet.is_sensor() {
            Self::Sensor(SensorEvent::from_packet(packet))
        } else {
            Self::Control(ControlEvent::from_packet(packet))
        }
    }

    /// The device this event belongs to.
    #[must_use]
    pub const fn device(&self) -> &Device {
        match self {
            Self::Sensor(e) => &e.device,
            Self::Control(e) => &e.device,
        }
    }

    /// The ordered name/value pairs carried by this event.
    #[must_use]
    pub fn values(&self) -> &[(&'static str, Value)] {
        match self {
            Self::Sensor(e) => &e.values,
            Self::Control(e) => &e.values,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => e.fmt(f),
            Self::Control(e) => e.fmt(f),
        }
    }
}

fn fmt_values(
    f: &mut fmt::Formatter<'_>,
    values: &[(&'static str, Value)],
) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (name, value)) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "'{name}': {value}")?;
    }
    write!(f, "}}")
}

/// A sensor reading event.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorEvent {
    /// The reporting device.
    pub device: Device,
    /// Ordered measurement name to value mapping.
    pub values: Vec<(&'static str, Value)>,
}

impl SensorEvent {
    /// Builds the value mapping from the packet's capability mix, in fixed
    /// precedence: temperature, humidity, barometer, then battery and
    /// signal strength unconditionally.
    #[must_use]
    pub fn from_packet(packet: &Packet) -> Self {
        let mut values = Vec::new();
        if let Some(temperature) = packet.temperature() {
            values.push(("Temperature", Value::Float(f64::from(temperature))));
        }
        if let Some(humidity) = packet.humidity() {
            values.push(("Humidity", Value::Int(humidity.value.into())));
            values.push((
                "Humidity status",
                Value::Text(humidity.status_label.to_owned()),
            ));
            values.push(("Humidity status numeric", Value::Int(humidity.status.into())));
        }
        if let Some(barometer) = packet.barometer() {
            values.push(("Barometer", Value::Int(barometer.pressure.into())));
            values.push(("Forecast", Value::Text(barometer.forecast_label.to_owned())));
            values.push(("Forecast numeric", Value::Int(barometer.forecast.into())));
        }
        if let Some(battery) = packet.battery() {
            values.push(("Battery numeric", Value::Int(battery.into())));
        }
        values.push(("Rssi numeric", Value::Int(packet.rssi().into())));

        Self {
            device: Device::from_packet(packet),
            values,
        }
    }
}

impl fmt::Display for SensorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SensorEvent device=[{}] values=", self.device)?;
        fmt_values(f, &self.values)
    }
}

/// A control command event from a lighting family.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlEvent {
    /// The commanded device, carrying addressing for re-encoding.
    pub device: Device,
    /// Ordered command name to value mapping.
    pub values: Vec<(&'static str, Value)>,
}

impl ControlEvent {
    /// Builds the value mapping for a lighting packet: command label, dim
    /// level for Lighting2 set-level commands (rescaled from the wire's
    /// 0-15 to a 0-100 percentage, truncating), battery for Lighting3, and
    /// signal strength last.
    #[must_use]
    pub fn from_packet(packet: &Packet) -> Self {
        let mut values = Vec::new();
        if let Some(label) = packet.command_label() {
            values.push(("Command", Value::Text(label.to_owned())));
        }
        if let Packet::Lighting2(p) = packet {
            if p.cmnd == Lighting2::CMND_SET_LEVEL || p.cmnd == Lighting2::CMND_SET_GROUP_LEVEL {
                values.push(("Dim level", Value::Int(i64::from(p.level) * 100 / 15)));
            }
        }
        if let Packet::Lighting3(p) = packet {
            values.push(("Battery numeric", Value::Int(p.battery.into())));
        }
        values.push(("Rssi numeric", Value::Int(packet.rssi().into())));

        Self {
            device: Device::from_packet(packet),
            values,
        }
    }
}

impl fmt::Display for ControlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ControlEvent device=[{}] values=", self.device)?;
        fmt_values(f, &self.values)
    }
}
