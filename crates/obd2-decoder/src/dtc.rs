//! DTC decoder plus a static description/severity lookup table. The lookup
//! table never changes `DtcInfo`'s shape — it's a separate, optional lookup
//! a caller reaches for after decoding.

use serde::{Deserialize, Serialize};

use crate::envelope::validate_envelope;
use crate::error::{DecodeError, DecodeResult};
use crate::types::{DtcInfo, Sid};

/// Minimum payload length: positive-response byte + count byte.
const MIN_LEN: usize = 2;

/// Decodes a Service 03/07/0A "DTCs" response into SID + ordered codes.
pub fn decode_dtcs(sid: Sid, data: &[u8]) -> DecodeResult<DtcInfo> {
    validate_envelope(sid, data, MIN_LEN)?;

    let count = data[1] as usize;
    if count == 0 {
        return Ok(DtcInfo {
            sid,
            codes: Vec::new(),
        });
    }

    let expected_len = 2 + 2 * count;
    if data.len() != expected_len {
        return Err(DecodeError::InvalidResponseShape(format!(
            "corrupt DTC frame: count={count} implies {expected_len} bytes, got {}",
            data.len()
        )));
    }

    let codes = data[2..]
        .chunks_exact(2)
        .map(|pair| format_dtc(pair[0], pair[1]))
        .collect();

    Ok(DtcInfo { sid, codes })
}

/// Formats one 2-byte DTC record into its canonical 5-character form, e.g.
/// `P0123`.
fn format_dtc(byte0: u8, byte1: u8) -> String {
    let domain = match (byte0 >> 6) & 0x03 {
        0b00 => 'P',
        0b01 => 'C',
        0b10 => 'B',
        0b11 => 'U',
        _ => unreachable!("two bits can only take 4 values"),
    };

    let digit1 = (byte0 & 0x30) >> 4;
    let digit2 = byte0 & 0x0F;
    let digit3 = (byte1 >> 4) & 0x0F;
    let digit4 = byte1 & 0x0F;

    format!("{domain}{digit1:X}{digit2:X}{digit3:X}{digit4:X}")
}

// ---------------------------------------------------------------------------
// DTC description / severity enrichment
// ---------------------------------------------------------------------------

/// Category derived from a DTC's leading letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DtcCategory {
    /// P — Powertrain (engine, transmission).
    Powertrain,
    /// C — Chassis (ABS, steering).
    Chassis,
    /// B — Body (airbags, AC, lighting).
    Body,
    /// U — Network/communication (CAN bus errors).
    Network,
}

impl DtcCategory {
    /// Parses the category from a formatted DTC string's leading letter.
    pub fn parse(code: &str) -> Option<Self> {
        match code.chars().next()? {
            'P' | 'p' => Some(DtcCategory::Powertrain),
            'C' | 'c' => Some(DtcCategory::Chassis),
            'B' | 'b' => Some(DtcCategory::Body),
            'U' | 'u' => Some(DtcCategory::Network),
            _ => None,
        }
    }
}

/// Severity classification of a DTC, as carried in the static database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DtcSeverity {
    Info,
    Warning,
    Critical,
}

/// A DTC database entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DtcEntry {
    pub description: &'static str,
    pub severity: DtcSeverity,
}

/// Looks up a formatted DTC code (e.g. `"P0300"`) in the static database.
/// Case-insensitive. Returns `None` for codes not in the table — this is
/// expected for most manufacturer-specific and rare codes; it is not a
/// decode failure.
pub fn lookup(code: &str) -> Option<DtcEntry> {
    let code = code.to_uppercase();
    match code.as_str() {
        "P0100" => Some(DtcEntry {
            description: "Mass or Volume Air Flow Circuit Malfunction",
            severity: DtcSeverity::Warning,
        }),
        "P0171" => Some(DtcEntry {
            description: "System Too Lean (Bank 1)",
            severity: DtcSeverity::Warning,
        }),
        "P0172" => Some(DtcEntry {
            description: "System Too Rich (Bank 1)",
            severity: DtcSeverity::Warning,
        }),
        "P0300" => Some(DtcEntry {
            description: "Random/Multiple Cylinder Misfire Detected",
            severity: DtcSeverity::Critical,
        }),
        "P0301" => Some(DtcEntry {
            description: "Cylinder 1 Misfire Detected",
            severity: DtcSeverity::Critical,
        }),
        "P0420" => Some(DtcEntry {
            description: "Catalyst System Efficiency Below Threshold (Bank 1)",
            severity: DtcSeverity::Warning,
        }),
        "P0440" => Some(DtcEntry {
            description: "Evaporative Emission Control System Malfunction",
            severity: DtcSeverity::Info,
        }),
        "P0500" => Some(DtcEntry {
            description: "Vehicle Speed Sensor Malfunction",
            severity: DtcSeverity::Warning,
        }),
        "P0700" => Some(DtcEntry {
            description: "Transmission Control System Malfunction",
            severity: DtcSeverity::Critical,
        }),
        "C0035" => Some(DtcEntry {
            description: "Left Front Wheel Speed Sensor Circuit",
            severity: DtcSeverity::Warning,
        }),
        "C0604" => Some(DtcEntry {
            description: "PCM Internal Control Module Random Access Memory Error",
            severity: DtcSeverity::Critical,
        }),
        "B1000" => Some(DtcEntry {
            description: "ECU Malfunction — Internal",
            severity: DtcSeverity::Critical,
        }),
        "B1318" => Some(DtcEntry {
            description: "Battery Voltage Low",
            severity: DtcSeverity::Warning,
        }),
        "U0100" => Some(DtcEntry {
            description: "Lost Communication With ECM/PCM",
            severity: DtcSeverity::Critical,
        }),
        "U0140" => Some(DtcEntry {
            description: "Lost Communication With Body Control Module",
            severity: DtcSeverity::Warning,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_p_code() {
        assert_eq!(format_dtc(0x01, 0x23), "P0123");
    }

    #[test]
    fn formats_c_code() {
        assert_eq!(format_dtc(0x46, 0x04), "C0604");
    }

    #[test]
    fn formats_b_and_u_codes() {
        assert_eq!(format_dtc(0x80, 0x00), "B0000");
        assert_eq!(format_dtc(0xC1, 0x00), "U0100");
    }

    #[test]
    fn decode_two_dtcs() {
        let data = [0x43, 0x02, 0x01, 0x23, 0x46, 0x04];
        let info = decode_dtcs(Sid::StoredDtcs, &data).unwrap();
        assert_eq!(info.sid, Sid::StoredDtcs);
        assert_eq!(info.codes, vec!["P0123", "C0604"]);
    }

    #[test]
    fn zero_count_is_success_with_no_codes() {
        let data = [0x43, 0x00];
        let info = decode_dtcs(Sid::StoredDtcs, &data).unwrap();
        assert!(info.codes.is_empty());
    }

    #[test]
    fn corrupt_frame_length_fails() {
        let data = [0x43, 0x02, 0x01, 0x23];
        let err = decode_dtcs(Sid::StoredDtcs, &data).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidResponseShape(_)));
    }

    #[test]
    fn bad_envelope_fails() {
        let data = [0x53, 0x00];
        let err = decode_dtcs(Sid::StoredDtcs, &data).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidEnvelope(_)));
    }

    #[test]
    fn pending_and_permanent_dtcs_use_their_own_sid() {
        let data = [Sid::PendingDtcs.positive_response_byte(), 0x01, 0x03, 0x00];
        let info = decode_dtcs(Sid::PendingDtcs, &data).unwrap();
        assert_eq!(info.codes, vec!["P0300"]);
    }

    #[test]
    fn lookup_known_and_unknown_codes() {
        let entry = lookup("p0300").unwrap();
        assert_eq!(entry.severity, DtcSeverity::Critical);
        assert!(lookup("P9999").is_none());
    }

    #[test]
    fn category_parsing() {
        assert_eq!(DtcCategory::parse("P0300"), Some(DtcCategory::Powertrain));
        assert_eq!(DtcCategory::parse("C0035"), Some(DtcCategory::Chassis));
        assert_eq!(DtcCategory::parse("B1000"), Some(DtcCategory::Body));
        assert_eq!(DtcCategory::parse("U0100"), Some(DtcCategory::Network));
        assert_eq!(DtcCategory::parse(""), None);
    }
}
