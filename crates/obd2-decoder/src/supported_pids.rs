//! Supported-PID bitmap decoder.

use crate::dictionary::DecoderDictionary;
use crate::envelope::validate_envelope;
use crate::error::{DecodeError, DecodeResult};
use crate::types::{Sid, is_range_selector};

/// Minimum payload length: positive-response byte + one range selector + 4
/// bitmap bytes.
const MIN_LEN: usize = 6;

/// Decodes a Service 01/02 "supported PIDs" response into a sorted,
/// deduplicated list of PIDs the ECU advertises within `sid`'s namespace.
///
/// A payload may carry more than one 5-byte `[selector, b0, b1, b2, b3]`
/// record back to back; every record present is walked.
pub fn decode_supported_pids(
    sid: Sid,
    data: &[u8],
    dictionary: &dyn DecoderDictionary,
) -> DecodeResult<Vec<u8>> {
    validate_envelope(sid, data, MIN_LEN)?;

    let mut range_index: i64 = 0;
    let mut advertised = Vec::new();

    for i in 1..data.len() {
        if (i - 1) % 5 == 0 {
            range_index += 1;
            continue;
        }

        let byte = data[i];
        for j in 0..8i64 {
            if byte & (1 << j) == 0 {
                continue;
            }

            let pid_num = (i as i64 - range_index) * 8 - j;
            if !(0..=0xFF).contains(&pid_num) {
                continue;
            }
            let pid = pid_num as u8;

            if is_range_selector(pid) {
                continue;
            }
            if !dictionary.contains(pid) {
                tracing::trace!(pid = pid, "supported-pid bit set for PID not in dictionary, discarding");
                continue;
            }

            advertised.push(pid);
        }
    }

    advertised.sort_unstable();
    advertised.dedup();

    if advertised.is_empty() {
        return Err(DecodeError::InvalidResponseShape(
            "no supported PIDs resolved in payload".into(),
        ));
    }

    Ok(advertised)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::StaticDictionary;

    fn dict_with(pids: &[u8]) -> StaticDictionary {
        StaticDictionary::from_entries(pids.iter().map(|&p| (p, 1, Vec::new())))
    }

    #[test]
    fn single_range_scenario() {
        // 0x41 0x00 0x80 0x18 0x00 0x13 advertises PIDs 0x01, 0x0C, 0x0D,
        // 0x1C, 0x1F (excluding the 0x20 range selector bit).
        let data = [0x41, 0x00, 0x80, 0x18, 0x00, 0x13];
        let dict = dict_with(&[0x01, 0x0C, 0x0D, 0x1C, 0x1F, 0x20]);

        let pids = decode_supported_pids(Sid::CurrentData, &data, &dict).unwrap();
        assert_eq!(pids, vec![0x01, 0x0C, 0x0D, 0x1C, 0x1F]);
    }

    #[test]
    fn excludes_pids_absent_from_dictionary() {
        let data = [0x41, 0x00, 0x80, 0x18, 0x00, 0x13];
        let dict = dict_with(&[0x0C, 0x1F]); // 0x01 and 0x1C deliberately unknown

        let pids = decode_supported_pids(Sid::CurrentData, &data, &dict).unwrap();
        assert_eq!(pids, vec![0x0C, 0x1F]);
    }

    #[test]
    fn multi_range_payload_walks_every_record() {
        // Record 1: selector 0x00, bitmap advertises PID 0x01 only (0x80).
        // Record 2: selector 0x20, bitmap advertises PID 0x21 only (0x80).
        let data = [
            0x41, 0x00, 0x80, 0x00, 0x00, 0x00, 0x20, 0x80, 0x00, 0x00, 0x00,
        ];
        let dict = dict_with(&[0x01, 0x21]);

        let pids = decode_supported_pids(Sid::CurrentData, &data, &dict).unwrap();
        assert_eq!(pids, vec![0x01, 0x21]);
    }

    #[test]
    fn fails_when_nothing_resolves() {
        let data = [0x41, 0x00, 0x00, 0x00, 0x00, 0x00];
        let dict = dict_with(&[]);

        let err = decode_supported_pids(Sid::CurrentData, &data, &dict).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidResponseShape(_)));
    }

    #[test]
    fn rejects_bad_envelope() {
        let data = [0x51, 0x00, 0x80, 0x18, 0x00, 0x13];
        let dict = dict_with(&[0x01, 0x0C]);
        let err = decode_supported_pids(Sid::CurrentData, &data, &dict).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidEnvelope(_)));
    }

    #[test]
    fn rejects_too_short_payload() {
        let data = [0x41, 0x00, 0x80];
        let dict = dict_with(&[0x01]);
        let err = decode_supported_pids(Sid::CurrentData, &data, &dict).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidEnvelope(_)));
    }

    #[test]
    fn result_is_sorted_and_deduplicated() {
        // Two overlapping bit patterns both resolving to PID 0x0C plus a
        // lower PID, to exercise sort+dedup even though the natural walk
        // order is already monotonic for a single range.
        let data = [0x41, 0x00, 0x00, 0x18, 0x00, 0x00];
        let dict = dict_with(&[0x0C, 0x0D]);

        let pids = decode_supported_pids(Sid::CurrentData, &data, &dict).unwrap();
        assert_eq!(pids, vec![0x0C, 0x0D]);
        let mut sorted = pids.clone();
        sorted.sort_unstable();
        assert_eq!(pids, sorted);
    }
}
