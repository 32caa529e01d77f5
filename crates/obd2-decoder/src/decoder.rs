//! Top-level decoder facade.
//!
//! Holds a single swappable decoder dictionary behind a `RwLock`. Decoding a
//! response never mutates the dictionary; swapping it never blocks a decode
//! for longer than the read lock is held. There is no background refresh —
//! callers push a new dictionary in whenever they have one.

use std::sync::{Arc, RwLock};

use crate::dictionary::DecoderDictionary;
use crate::error::{DecodeError, DecodeResult};
use crate::types::{DtcInfo, EmissionInfo, Sid};
use crate::{dtc, emission, supported_pids, vin};

/// A synchronous OBD-II response decoder with a hot-swappable PID dictionary.
pub struct Decoder {
    dictionary: RwLock<Option<Arc<dyn DecoderDictionary>>>,
}

impl Decoder {
    /// A decoder with no dictionary set. Supported-PID and emission decodes
    /// fail with `MissingDictionary` until one is installed; DTC and VIN
    /// decodes work immediately since neither needs one.
    pub fn new() -> Self {
        Self {
            dictionary: RwLock::new(None),
        }
    }

    /// Atomically replaces the decoder dictionary used by subsequent calls.
    /// In-flight decodes keep using the dictionary they started with.
    pub fn set_decoder_dictionary(&self, dictionary: Arc<dyn DecoderDictionary>) {
        *self.dictionary.write().unwrap() = Some(dictionary);
        tracing::info!("decoder dictionary replaced");
    }

    fn dictionary(&self) -> DecodeResult<Arc<dyn DecoderDictionary>> {
        self.dictionary
            .read()
            .unwrap()
            .clone()
            .ok_or(DecodeError::MissingDictionary)
    }

    /// Decodes a Service 01/02 "supported PIDs" response.
    pub fn decode_supported_pids(&self, sid: Sid, data: &[u8]) -> DecodeResult<Vec<u8>> {
        let dictionary = self.dictionary()?;
        supported_pids::decode_supported_pids(sid, data, dictionary.as_ref())
    }

    /// Decodes a Service 01/02 emission-PID response.
    pub fn decode_emission_pids(
        &self,
        sid: Sid,
        pids: &[u8],
        data: &[u8],
    ) -> DecodeResult<EmissionInfo> {
        let dictionary = self.dictionary()?;
        emission::decode_emission_pids(sid, pids, data, dictionary.as_ref())
    }

    /// Decodes a Service 03/07/0A DTC response. Needs no dictionary.
    pub fn decode_dtcs(&self, sid: Sid, data: &[u8]) -> DecodeResult<DtcInfo> {
        dtc::decode_dtcs(sid, data)
    }

    /// Decodes a Service 09/PID 02 VIN response. Needs no dictionary.
    pub fn decode_vin(&self, data: &[u8]) -> DecodeResult<String> {
        vin::decode_vin(data)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}
