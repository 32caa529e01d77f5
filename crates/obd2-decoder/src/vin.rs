//! VIN decoder.

use crate::error::{DecodeError, DecodeResult};

/// Minimum payload length: SID + PID + count-of-data-items byte.
const MIN_LEN: usize = 3;

/// Positive-response byte for SID 0x09 (vehicle information).
const VEHICLE_INFO_RESPONSE: u8 = 0x49;

/// PID 0x02: Vehicle Identification Number.
const VIN_PID: u8 = 0x02;

/// Decodes a Service 09 / PID 02 response into the VIN string.
///
/// No character-set validation is performed; bytes that aren't valid UTF-8
/// are replaced rather than rejected, since this layer's only job is to
/// extract the substring — a caller that cares about ISO 3779 character
/// rules validates it separately.
pub fn decode_vin(data: &[u8]) -> DecodeResult<String> {
    if data.len() < MIN_LEN {
        return Err(DecodeError::InvalidEnvelope(format!(
            "payload too short: got {} bytes, need at least {MIN_LEN}",
            data.len()
        )));
    }
    if data[0] != VEHICLE_INFO_RESPONSE {
        return Err(DecodeError::InvalidEnvelope(format!(
            "expected positive-response byte 0x{VEHICLE_INFO_RESPONSE:02X}, got 0x{:02X}",
            data[0]
        )));
    }
    if data[1] != VIN_PID {
        return Err(DecodeError::InvalidEnvelope(format!(
            "expected VIN PID 0x{VIN_PID:02X}, got 0x{:02X}",
            data[1]
        )));
    }

    let vin = String::from_utf8_lossy(&data[3..]).into_owned();
    if vin.is_empty() {
        return Err(DecodeError::InvalidResponseShape(
            "VIN payload carried no characters".into(),
        ));
    }

    Ok(vin)
}
