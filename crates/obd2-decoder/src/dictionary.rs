//! The decoder dictionary contract (consumed, not owned, by this crate) and
//! a ready-made in-memory implementation.
//!
//! Provisioning a dictionary from a cloud manifest, a config file, or any
//! other upstream source is out of scope here — callers build one however
//! they like and hand it to `Decoder::set_decoder_dictionary`.

use std::collections::HashMap;

use crate::types::SignalFormula;

/// A PID's decoding metadata: its fixed data length and embedded signals.
#[derive(Debug, Clone, PartialEq)]
pub struct PidEntry {
    pub size_in_bytes: usize,
    pub signals: Vec<SignalFormula>,
}

/// Maps PID to its byte length and bit-level signal layout.
///
/// Immutable for the lifetime of a single decode call; replaced wholesale
/// between calls, never mutated in place.
pub trait DecoderDictionary: Send + Sync {
    /// Whether this dictionary has an entry for `pid`.
    fn contains(&self, pid: u8) -> bool;

    /// The fixed data length in bytes for `pid`, if known.
    fn size_in_bytes(&self, pid: u8) -> Option<usize>;

    /// The signal formulas embedded in `pid`'s data, in declared order.
    /// Empty if `pid` is unknown or carries no signals.
    fn signals(&self, pid: u8) -> &[SignalFormula];
}

/// A simple in-memory dictionary, built once and shared behind an `Arc`.
///
/// This is the reference implementation used by this crate's own tests; it
/// is also a reasonable choice for any small deployment that hand-assembles
/// its PID table instead of parsing one from a manifest.
#[derive(Debug, Clone, Default)]
pub struct StaticDictionary {
    entries: HashMap<u8, PidEntry>,
}

impl StaticDictionary {
    /// An empty dictionary with no known PIDs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from `(pid, size_in_bytes, signals)` tuples.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u8, usize, Vec<SignalFormula>)>,
    {
        let mut map = HashMap::new();
        for (pid, size_in_bytes, signals) in entries {
            map.insert(
                pid,
                PidEntry {
                    size_in_bytes,
                    signals,
                },
            );
        }
        Self { entries: map }
    }

    /// Insert or replace a single PID's entry, builder-style.
    pub fn with_pid(
        mut self,
        pid: u8,
        size_in_bytes: usize,
        signals: Vec<SignalFormula>,
    ) -> Self {
        self.entries.insert(
            pid,
            PidEntry {
                size_in_bytes,
                signals,
            },
        );
        self
    }
}

impl DecoderDictionary for StaticDictionary {
    fn contains(&self, pid: u8) -> bool {
        self.entries.contains_key(&pid)
    }

    fn size_in_bytes(&self, pid: u8) -> Option<usize> {
        self.entries.get(&pid).map(|e| e.size_in_bytes)
    }

    fn signals(&self, pid: u8) -> &[SignalFormula] {
        self.entries
            .get(&pid)
            .map(|e| e.signals.as_slice())
            .unwrap_or(&[])
    }
}
