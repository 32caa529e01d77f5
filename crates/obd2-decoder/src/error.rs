//! Decode error types.

use thiserror::Error;

/// Errors that can occur while decoding an OBD-II positive response.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid envelope: {0}")]
    InvalidEnvelope(String),

    #[error("invalid response shape: {0}")]
    InvalidResponseShape(String),

    #[error("no decoder dictionary is set")]
    MissingDictionary,

    #[error("PID 0x{pid:02X} is not present in the decoder dictionary")]
    UnknownPid { pid: u8 },

    #[error("signal '{signal_id}' on PID 0x{pid:02X} has an invalid formula")]
    InvalidFormula { pid: u8, signal_id: String },
}

/// Convenience alias for decode results.
pub type DecodeResult<T> = Result<T, DecodeError>;
