// fretboard-core/src/types/mod.rs

pub mod chord;
pub mod instrument;
pub mod interval;
pub mod note;
pub mod shape;

pub use chord::Chord;
pub use instrument::Instrument;
pub use interval::{
    chord_of, IntervalPattern, Quality, DIMINISHED, DOMINANT_SEVENTH, MAJOR, MAJOR_SEVENTH,
    MINOR, SEVENTH,
};
pub use note::{Note, PitchClass, PitchClassSet};
pub use shape::{FrettedNote, Shape};
