//! Tuned stringed instruments
//!
//! An instrument is a list of open-string notes plus the highest playable
//! fret. Strings are kept in the order they were declared; the presets declare
//! the highest-pitched (treble) string first.

use crate::error::{FretboardError, Result};
use crate::types::note::{Note, PitchClass};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    strings: Vec<Note>,
    fret_count: u8,
}

impl Instrument {
    /// Create an instrument. `fret_count` is inclusive and counts the nut as fret 0.
    pub fn new(fret_count: u8, strings: Vec<Note>) -> Result<Self> {
        if strings.is_empty() {
            return Err(FretboardError::EmptyInstrument);
        }
        Ok(Instrument {
            strings,
            fret_count,
        })
    }

    /// Build an instrument from note names such as `["E2", "B2", "G1"]`
    pub fn from_tuning<S: AsRef<str>>(fret_count: u8, tuning: &[S]) -> Result<Self> {
        let strings = tuning
            .iter()
            .map(|name| name.as_ref().parse::<Note>())
            .collect::<Result<Vec<_>>>()?;
        Self::new(fret_count, strings)
    }

    /// Six-string guitar in standard tuning, treble side first, 19 frets
    pub fn standard_guitar() -> Self {
        Self::preset_unchecked(
            19,
            &[
                (PitchClass::E, 2),
                (PitchClass::B, 2),
                (PitchClass::G, 1),
                (PitchClass::D, 1),
                (PitchClass::A, 1),
                (PitchClass::E, 0),
            ],
        )
    }

    /// Standard guitar with the low E string dropped to D
    pub fn drop_d_guitar() -> Self {
        Self::preset_unchecked(
            19,
            &[
                (PitchClass::E, 2),
                (PitchClass::B, 2),
                (PitchClass::G, 1),
                (PitchClass::D, 1),
                (PitchClass::A, 1),
                (PitchClass::D, 0),
            ],
        )
    }

    /// Soprano ukulele, re-entrant G-C-E-A tuning, A string first
    pub fn ukulele() -> Self {
        Self::preset_unchecked(
            12,
            &[
                (PitchClass::A, 4),
                (PitchClass::E, 4),
                (PitchClass::C, 4),
                (PitchClass::G, 4),
            ],
        )
    }

    /// Four-string bass, G string first
    pub fn bass_guitar() -> Self {
        Self::preset_unchecked(
            20,
            &[
                (PitchClass::G, 1),
                (PitchClass::D, 1),
                (PitchClass::A, 0),
                (PitchClass::E, 0),
            ],
        )
    }

    pub const PRESETS: [&'static str; 4] = ["guitar", "drop-d", "ukulele", "bass"];

    /// Look up a built-in instrument by name
    pub fn preset(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "guitar" | "standard" => Ok(Self::standard_guitar()),
            "drop-d" | "dropd" => Ok(Self::drop_d_guitar()),
            "ukulele" | "uke" => Ok(Self::ukulele()),
            "bass" => Ok(Self::bass_guitar()),
            _ => Err(FretboardError::UnknownInstrument(name.to_string())),
        }
    }

    // Presets always have at least one string
    fn preset_unchecked(fret_count: u8, strings: &[(PitchClass, i32)]) -> Self {
        Instrument {
            strings: strings
                .iter()
                .map(|&(pitch_class, octave)| Note::new(pitch_class, octave))
                .collect(),
            fret_count,
        }
    }

    pub fn strings(&self) -> &[Note] {
        &self.strings
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    pub fn fret_count(&self) -> u8 {
        self.fret_count
    }

    /// The note sounded by `string` stopped at `fret`, or `None` when either is out of range
    pub fn note_at(&self, string: usize, fret: u8) -> Option<Note> {
        if fret > self.fret_count {
            return None;
        }
        self.strings
            .get(string)
            .map(|open| open.transpose(fret as i32))
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tuning: Vec<String> = self.strings.iter().map(|n| n.to_string()).collect();
        write!(f, "[{}] ({} frets)", tuning.join(", "), self.fret_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_guitar() {
        let guitar = Instrument::standard_guitar();
        assert_eq!(guitar.string_count(), 6);
        assert_eq!(guitar.fret_count(), 19);
        assert_eq!(guitar.strings()[0], "E2".parse().unwrap());
        assert_eq!(guitar.strings()[5], "E0".parse().unwrap());
    }

    #[test]
    fn test_empty_instrument_rejected() {
        assert!(matches!(
            Instrument::new(12, vec![]),
            Err(FretboardError::EmptyInstrument)
        ));
    }

    #[test]
    fn test_from_tuning() {
        let mandolin = Instrument::from_tuning(17, &["E5", "A4", "D4", "G3"]).unwrap();
        assert_eq!(mandolin.string_count(), 4);
        assert!(Instrument::from_tuning(17, &["E5", "Q4"]).is_err());
    }

    #[test]
    fn test_note_at_crosses_octave() {
        let guitar = Instrument::standard_guitar();
        // B string, first fret: C, one octave up
        let note = guitar.note_at(1, 1).unwrap();
        assert_eq!(note.pitch_class(), PitchClass::C);
        assert_eq!(note.octave(), 3);

        assert_eq!(guitar.note_at(0, 20), None);
        assert_eq!(guitar.note_at(6, 0), None);
    }

    #[test]
    fn test_presets() {
        for name in Instrument::PRESETS {
            assert!(Instrument::preset(name).is_ok());
        }
        assert!(Instrument::preset("banjo").is_err());
    }
}
