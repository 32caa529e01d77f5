//! Positive-response envelope validation.

use crate::error::{DecodeError, DecodeResult};
use crate::types::Sid;

/// Confirms `data` begins with `0x40 + sid` and meets `min_len`.
///
/// Failure yields a single `InvalidEnvelope`; no partial structure is
/// returned to the caller on failure.
pub fn validate_envelope(sid: Sid, data: &[u8], min_len: usize) -> DecodeResult<()> {
    if data.len() < min_len {
        return Err(DecodeError::InvalidEnvelope(format!(
            "payload too short: got {} bytes, need at least {min_len}",
            data.len()
        )));
    }

    let expected = sid.positive_response_byte();
    if data[0] != expected {
        return Err(DecodeError::InvalidEnvelope(format!(
            "expected positive-response byte 0x{expected:02X}, got 0x{:02X}",
            data[0]
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_envelope() {
        let data = [0x41, 0x0C, 0x1A, 0xF8];
        assert!(validate_envelope(Sid::CurrentData, &data, 2).is_ok());
    }

    #[test]
    fn rejects_wrong_marker_byte() {
        let data = [0x51, 0x0C, 0x1A, 0xF8];
        let err = validate_envelope(Sid::CurrentData, &data, 2).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidEnvelope(_)));
    }

    #[test]
    fn rejects_short_payload() {
        let data = [0x41];
        let err = validate_envelope(Sid::CurrentData, &data, 2).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidEnvelope(_)));
    }

    #[test]
    fn any_non_marker_first_byte_fails_for_every_service() {
        for sid in [
            Sid::CurrentData,
            Sid::FreezeFrame,
            Sid::StoredDtcs,
            Sid::PendingDtcs,
            Sid::PermanentDtcs,
            Sid::VehicleInfo,
        ] {
            let bad = sid.positive_response_byte().wrapping_add(1);
            let data = [bad, 0x00, 0x00, 0x00];
            assert!(validate_envelope(sid, &data, 2).is_err());
        }
    }
}
