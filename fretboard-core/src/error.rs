use thiserror::Error;

/// Errors raised by the pitch engine, the shape resolver and the chord repository.
///
/// A chord that simply has no voicing in a fret window is *not* an error at
/// the resolver level: the search returns an empty sequence instead.
#[derive(Debug, Error)]
pub enum FretboardError {
    #[error("instrument must have at least one string")]
    EmptyInstrument,

    #[error("invalid fret window [{min}, {max}]: bounds must be non-negative and min <= max")]
    InvalidFretWindow { min: i32, max: i32 },

    #[error("required pitch-class set is empty")]
    EmptyPitchClassSet,

    #[error("pitch class must be 0-11, got {0}")]
    InvalidPitchClass(u8),

    #[error("invalid note: {0}")]
    InvalidNote(String),

    #[error("invalid interval pattern: {0}")]
    InvalidIntervalPattern(String),

    #[error("unknown chord quality: {0}")]
    UnknownQuality(String),

    #[error("unknown instrument preset: {0}")]
    UnknownInstrument(String),

    #[error("chord name must not be empty")]
    EmptyChordName,

    #[error("chord '{name}' has no playable shape in the configured fret window")]
    Unplayable { name: String },

    #[error("chord '{name}' uses frets outside the window [{min}, {max}]")]
    OutsideWindow { name: String, min: u8, max: u8 },

    #[error("chord '{name}' is voiced for a different instrument")]
    InstrumentMismatch { name: String },

    #[error("unsupported document version {0}")]
    UnsupportedVersion(u32),

    #[error("invalid chord document: {0}")]
    InvalidDocument(String),

    #[cfg(feature = "serde")]
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FretboardError>;
