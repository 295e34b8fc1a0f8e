//! Error type shared by catalog construction, decoding and CSV ingestion.
//!
//! Queries never fail: a miss is `None` or an empty `Vec`. Errors only come
//! out of the places where data enters the engine.

/// Errors raised while building or decoding a catalog.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input violated the catalog contract (column lengths, coordinate ranges, CSV shape).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The persisted catalog bytes could not be decoded.
    #[error("failed to decode catalog: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// The catalog could not be encoded.
    #[error("failed to encode catalog: {0}")]
    Encode(#[from] bincode::error::EncodeError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
