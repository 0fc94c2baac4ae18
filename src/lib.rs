//! # rfxcodec
//!
//! Packet codec and device abstractions for RFXtrx home-automation RF
//! bridges.
//!
//! The crate decodes and encodes the fixed-layout binary packets the
//! bridge exchanges over its serial link, and exposes the decoded fields
//! as typed, string-annotated domain objects. It performs no I/O: the
//! transport hands in one already-framed buffer per call and sends the
//! buffers the command builders return.
//!
//! ## Quick Start
//!
//! ```
//! use rfxcodec::{Event, parse};
//!
//! # fn main() -> Result<(), rfxcodec::Error> {
//! // A temperature/humidity reading as received from the bridge
//! let raw = [0x0A, 0x52, 0x01, 0x2A, 0x96, 0x03, 0x00, 0xD7, 0x36, 0x02, 0x79];
//!
//! let packet = parse(&raw)?.expect("recognized packet type");
//! let event = Event::from_packet(&packet);
//!
//! println!("{}: {:?}", event.device(), event.values());
//! # Ok(())
//! # }
//! ```
//!
//! Commanding a lighting device observed on the air:
//!
//! ```
//! use rfxcodec::{Device, build_on, parse};
//!
//! # fn main() -> Result<(), rfxcodec::Error> {
//! let raw = [0x07, 0x10, 0x01, 0x2A, 0x43, 0x03, 0x01, 0x80];
//! let packet = parse(&raw)?.expect("recognized packet type");
//!
//! let device = Device::from_packet(&packet);
//! let outgoing = build_on(&device)?;
//! // hand `outgoing` to the transport
//! # assert_eq!(outgoing[6], 0x01);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`protocol`] - Per-family packet structs, byte layouts and the
//!   dispatch-by-discriminator parser
//! - [`device`] - Stable device identity derived from decoded packets
//! - [`event`] - Sensor and control events with ordered name/value pairs
//! - [`command`] - Outgoing on/off/dim packet builders
//! - [`error`] - Error types
//!
//! Decoding and encoding are pure, synchronous and stateless; the codec
//! holds no resources and needs no locking.

pub mod command;
pub mod device;
pub mod error;
pub mod event;
pub mod protocol;

// Re-exports for convenience
pub use command::{build_dim, build_off, build_on};
pub use device::{Device, LightingAddress};
pub use error::{DecodeError, Error, Result};
pub use event::{ControlEvent, Event, SensorEvent, Value};
pub use protocol::{
    Baro, BarometerReading, Humid, HumidityReading, Lighting1, Lighting2, Lighting3, Packet, Temp,
    TempHumid, TempHumidBaro, parse,
};
