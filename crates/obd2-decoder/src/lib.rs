//! SAE J1979 (OBD-II) positive-response decoder.
//!
//! Turns raw ECU response bytes — supported-PID bitmaps, emission PIDs,
//! DTCs, and VIN — into structured values. Transport (ISO-TP reassembly,
//! CAN framing, request scheduling) is out of scope; this crate starts from
//! an already-reassembled positive-response payload.
//!
//! The PID table itself is supplied by the caller through the
//! [`DecoderDictionary`] trait and installed on a [`Decoder`] with
//! [`Decoder::set_decoder_dictionary`]; nothing here ships vehicle-specific
//! PID definitions.

pub mod decoder;
pub mod dictionary;
pub mod dtc;
pub mod emission;
pub mod envelope;
pub mod error;
pub mod supported_pids;
pub mod types;
pub mod vin;

pub use decoder::Decoder;
pub use dictionary::{DecoderDictionary, PidEntry, StaticDictionary};
pub use error::{DecodeError, DecodeResult};
pub use types::{DtcInfo, EmissionInfo, Sid, SignalFormula};
