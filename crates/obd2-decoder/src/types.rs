//! Core SID/PID constants and the shared data model for decode results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Offset added to a request mode to get the positive-response SID byte.
pub const RESPONSE_SID_OFFSET: u8 = 0x40;

/// PIDs that carry no data themselves; each requests the supported-PID
/// bitmap for the next 32 PIDs in its SID's namespace.
pub const RANGE_SELECTOR_PIDS: [u8; 8] =
    [0x00, 0x20, 0x40, 0x60, 0x80, 0xA0, 0xC0, 0xE0];

/// Returns true if `pid` is one of the distinguished range-selector PIDs.
pub fn is_range_selector(pid: u8) -> bool {
    RANGE_SELECTOR_PIDS.contains(&pid)
}

/// OBD-II Service Identifier (SAE J1979 Mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sid {
    /// Mode 0x01: show current data.
    CurrentData,
    /// Mode 0x02: show freeze frame data.
    FreezeFrame,
    /// Mode 0x03: show stored DTCs.
    StoredDtcs,
    /// Mode 0x07: show pending DTCs.
    PendingDtcs,
    /// Mode 0x0A: show permanent DTCs.
    PermanentDtcs,
    /// Mode 0x09: request vehicle information.
    VehicleInfo,
}

impl Sid {
    /// The raw 8-bit request mode for this service.
    pub fn as_u8(self) -> u8 {
        match self {
            Sid::CurrentData => 0x01,
            Sid::FreezeFrame => 0x02,
            Sid::StoredDtcs => 0x03,
            Sid::PendingDtcs => 0x07,
            Sid::PermanentDtcs => 0x0A,
            Sid::VehicleInfo => 0x09,
        }
    }

    /// The positive-response marker byte, `0x40 + sid`.
    pub fn positive_response_byte(self) -> u8 {
        self.as_u8() + RESPONSE_SID_OFFSET
    }
}

/// One numeric field embedded in a PID's data bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalFormula {
    /// Opaque identifier surfaced to the caller.
    pub signal_id: String,
    /// Zero-based bit index within the PID's data, MSB-first.
    pub first_bit_position: u16,
    /// Width of the field in bits.
    pub size_in_bits: u16,
    /// Multiplied with the raw integer value.
    pub factor: f64,
    /// Added after scaling.
    pub offset: f64,
}

impl SignalFormula {
    pub fn new(
        signal_id: impl Into<String>,
        first_bit_position: u16,
        size_in_bits: u16,
        factor: f64,
        offset: f64,
    ) -> Self {
        Self {
            signal_id: signal_id.into(),
            first_bit_position,
            size_in_bits,
            factor,
            offset,
        }
    }
}

/// Result of an emission-PID decode: the SID echoed back plus every decoded
/// signal. Insertion order is not significant; a duplicate `signal_id`
/// within one PID's formula list resolves last-write-wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionInfo {
    pub sid: Sid,
    pub signals: HashMap<String, f64>,
}

/// Result of a DTC decode: the SID plus the DTC strings in payload order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DtcInfo {
    pub sid: Sid,
    pub codes: Vec<String>,
}
