//! # Fretboard Core
//!
//! Pitch arithmetic and chord-shape search for stringed instruments, with no
//! terminal or I/O dependencies.
//!
//! A chord is spelled with [`chord_of`] and then handed to [`find_shape`]
//! together with an [`Instrument`] and a fret window. The result is every
//! voicing that sounds exactly the chord's tones, easiest to finger first.
//!
//! ## Features
//!
//! - **serde**: chord documents (`document` module) read and written as JSON
//! - **colored**: colored terminal output for named chords
//!
//! ## Example
//!
//! ```ignore
//! use fretboard_core::{chord_of, find_shape, Instrument, Note, MAJOR};
//!
//! let c_major = chord_of("C1".parse::<Note>()?, &MAJOR);
//! let shapes = find_shape(&Instrument::standard_guitar(), 0, 3, &c_major)?;
//! println!("{}", shapes[0]); // 0-1-0-x-x-0
//! ```

#[cfg(feature = "serde")]
pub mod document;
pub mod error;
pub mod repository;
pub mod resolver;
pub mod types;

// Re-export commonly used types
pub use error::{FretboardError, Result};
pub use repository::ChordRepository;
pub use resolver::{best_shape, find_shape, find_shapes_in, FretWindow};
pub use types::{
    chord_of, Chord, FrettedNote, Instrument, IntervalPattern, Note, PitchClass, PitchClassSet,
    Quality, Shape, DIMINISHED, DOMINANT_SEVENTH, MAJOR, MAJOR_SEVENTH, MINOR, SEVENTH,
};
