//! Emission-PID decoder and its two validators.
//!
//! The walk is deliberately tolerant of a dictionary miss mid-payload: it
//! aborts and keeps whatever signals it already collected, rather than
//! discarding the whole response. `is_pid_response_valid` is the strict
//! shape validator — this crate runs it as a diagnostic pre-check (logged,
//! not fatal) rather than a hard gate, since gating the walk on it would
//! turn a single unknown trailing PID into a total failure instead of
//! softly discarding just that PID's record. This decision is recorded in
//! DESIGN.md.

use std::collections::HashMap;

use crate::dictionary::DecoderDictionary;
use crate::envelope::validate_envelope;
use crate::error::{DecodeError, DecodeResult};
use crate::types::{EmissionInfo, Sid, SignalFormula};

/// Minimum payload length: just the positive-response/SID byte.
const MIN_LEN: usize = 1;

/// Decodes a Service 01/02 emission-PID response into signal values.
///
/// `pids` is the expected PID list (the request this response answers). It
/// is used for the shape pre-check; the walk itself is driven purely by
/// what's actually in `data` and the dictionary.
pub fn decode_emission_pids(
    sid: Sid,
    pids: &[u8],
    data: &[u8],
    dictionary: &dyn DecoderDictionary,
) -> DecodeResult<EmissionInfo> {
    validate_envelope(sid, data, MIN_LEN)?;

    if !is_pid_response_valid(pids, data, dictionary) {
        tracing::trace!(
            "payload PID/length layout did not match the expected request list; \
             continuing with a tolerant walk"
        );
    }

    let mut signals = HashMap::new();
    let mut cursor = 1usize;

    while cursor < data.len() {
        let pid = data[cursor];
        let Some(len) = dictionary.size_in_bytes(pid) else {
            tracing::warn!(pid = pid, "unknown PID mid-payload, aborting emission walk");
            break;
        };

        let data_start = cursor + 1;
        let remaining = data.len().saturating_sub(data_start);
        if remaining < len {
            tracing::warn!(
                pid = pid,
                needed = len,
                available = remaining,
                "partial PID record, terminating walk"
            );
            break;
        }

        let pid_data = &data[data_start..data_start + len];
        for formula in dictionary.signals(pid) {
            if !is_formula_valid(pid, formula, dictionary) {
                tracing::warn!(
                    pid = pid,
                    signal_id = %formula.signal_id,
                    "invalid signal formula, skipping"
                );
                continue;
            }

            let value = extract_signal(pid_data, formula);
            signals.insert(formula.signal_id.clone(), value);
        }

        cursor = data_start + len;
    }

    if signals.is_empty() {
        return Err(DecodeError::InvalidResponseShape(
            "no signals decoded from emission payload".into(),
        ));
    }

    Ok(EmissionInfo { sid, signals })
}

/// Extracts and scales one signal's raw value from its PID's data bytes.
fn extract_signal(pid_data: &[u8], formula: &SignalFormula) -> f64 {
    let byte_index = (formula.first_bit_position / 8) as usize;

    let raw: u64 = if formula.size_in_bits < 8 {
        let byte = pid_data[byte_index] as u16;
        let shift = formula.first_bit_position % 8;
        let mask: u16 = 0xFF >> (8 - formula.size_in_bits);
        ((byte >> shift) & mask) as u64
    } else {
        let n_bytes = (formula.size_in_bits / 8) as usize;
        pid_data[byte_index..byte_index + n_bytes]
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | b as u64)
    };

    raw as f64 * formula.factor + formula.offset
}

/// Response shape validator: walks `data` expecting, in order, each PID
/// from `pids` followed by `dictionary[pid].size_in_bytes` data bytes,
/// landing exactly on `data.len()`.
pub fn is_pid_response_valid(pids: &[u8], data: &[u8], dictionary: &dyn DecoderDictionary) -> bool {
    let mut cursor = 1usize;

    for &pid in pids {
        if cursor >= data.len() || data[cursor] != pid {
            return false;
        }
        let Some(len) = dictionary.size_in_bytes(pid) else {
            return false;
        };
        cursor += 1;
        if cursor + len > data.len() {
            return false;
        }
        cursor += len;
    }

    cursor == data.len()
}

/// Formula validator: the formula's bit range must lie within the PID's
/// declared byte window, and byte-align when `size_in_bits >= 8`.
pub fn is_formula_valid(pid: u8, f: &SignalFormula, dictionary: &dyn DecoderDictionary) -> bool {
    let Some(size_in_bytes) = dictionary.size_in_bytes(pid) else {
        return false;
    };
    let total_bits = size_in_bytes as u16 * 8;

    if f.first_bit_position >= total_bits {
        return false;
    }
    if f.first_bit_position + f.size_in_bits > total_bits {
        return false;
    }
    if f.size_in_bits >= 8 && (f.size_in_bits % 8 != 0 || f.first_bit_position % 8 != 0) {
        return false;
    }

    true
}
