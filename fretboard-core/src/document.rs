//! Chord documents
//!
//! The interchange form of a named chord: plain, versioned JSON records that
//! are checked field by field when read back. Every fretted-note record has
//! the same fields; a muted string carries `null` for its fret, pitch and
//! octave.
//!
//! ```json
//! {
//!   "version": 1,
//!   "name": "CMaj",
//!   "pitch_classes": ["C", "E", "G"],
//!   "fretted_note": [
//!     { "string": 0, "fret": 0, "muted": false, "pitch": "E", "octave": 2 },
//!     { "string": 3, "fret": null, "muted": true, "pitch": null, "octave": null }
//!   ]
//! }
//! ```

use crate::error::{FretboardError, Result};
use crate::repository::ChordRepository;
use crate::types::{Chord, FrettedNote, Instrument, Note, PitchClass, PitchClassSet, Shape};
use serde::{Deserialize, Serialize};

/// Schema version written by this crate
pub const DOCUMENT_VERSION: u32 = 1;

/// One string of a voicing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrettedNoteRecord {
    pub string: usize,
    pub fret: Option<u8>,
    pub muted: bool,
    pub pitch: Option<String>,
    pub octave: Option<i32>,
}

impl From<&FrettedNote> for FrettedNoteRecord {
    fn from(fretted: &FrettedNote) -> Self {
        match *fretted {
            FrettedNote::Muted { string } => FrettedNoteRecord {
                string,
                fret: None,
                muted: true,
                pitch: None,
                octave: None,
            },
            FrettedNote::Fretted { string, fret, note } => FrettedNoteRecord {
                string,
                fret: Some(fret),
                muted: false,
                pitch: Some(note.pitch_class().name().to_string()),
                octave: Some(note.octave()),
            },
        }
    }
}

impl FrettedNoteRecord {
    fn to_fretted_note(&self, expected_string: usize) -> Result<FrettedNote> {
        if self.string != expected_string {
            return Err(invalid(format!(
                "expected string {} but found string {}",
                expected_string, self.string
            )));
        }

        match (self.muted, self.fret, &self.pitch, self.octave) {
            (true, None, None, None) => Ok(FrettedNote::Muted {
                string: self.string,
            }),
            (false, Some(fret), Some(pitch), Some(octave)) => {
                let pitch_class: PitchClass = pitch
                    .parse()
                    .map_err(|_| invalid(format!("string {}: unknown pitch '{}'", self.string, pitch)))?;
                Ok(FrettedNote::Fretted {
                    string: self.string,
                    fret,
                    note: Note::new(pitch_class, octave),
                })
            }
            (true, ..) => Err(invalid(format!(
                "string {} is muted but carries a fret or pitch",
                self.string
            ))),
            (false, ..) => Err(invalid(format!(
                "string {} is sounding but lacks a fret, pitch or octave",
                self.string
            ))),
        }
    }
}

/// A named chord in interchange form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChordDocument {
    pub version: u32,
    pub name: String,
    pub pitch_classes: Vec<String>,
    pub fretted_note: Vec<FrettedNoteRecord>,
}

impl From<&Chord> for ChordDocument {
    fn from(chord: &Chord) -> Self {
        ChordDocument {
            version: DOCUMENT_VERSION,
            name: chord.name().to_string(),
            pitch_classes: chord
                .pitch_classes()
                .iter()
                .map(|pc| pc.name().to_string())
                .collect(),
            fretted_note: chord.shape().iter().map(FrettedNoteRecord::from).collect(),
        }
    }
}

impl ChordDocument {
    /// Check the document's structure and rebuild the chord it describes.
    ///
    /// With an instrument, the voicing must also fit it: same number of
    /// strings, frets within range, and each sounding note equal to the open
    /// string stopped at that fret.
    pub fn to_chord(&self, instrument: Option<&Instrument>) -> Result<Chord> {
        if self.version != DOCUMENT_VERSION {
            return Err(FretboardError::UnsupportedVersion(self.version));
        }
        if self.name.trim().is_empty() {
            return Err(FretboardError::EmptyChordName);
        }
        if self.fretted_note.is_empty() {
            return Err(invalid("a chord needs at least one string".to_string()));
        }

        let notes = self
            .fretted_note
            .iter()
            .enumerate()
            .map(|(i, record)| record.to_fretted_note(i))
            .collect::<Result<Vec<_>>>()?;
        let shape = Shape::new(notes);

        let pitch_classes = self
            .pitch_classes
            .iter()
            .map(|name| name.parse::<PitchClass>())
            .collect::<Result<PitchClassSet>>()?;
        if pitch_classes.is_empty() {
            return Err(FretboardError::EmptyPitchClassSet);
        }
        if shape.pitch_classes() != pitch_classes {
            return Err(invalid(format!(
                "voicing sounds {} but the chord is {}",
                shape.pitch_classes(),
                pitch_classes
            )));
        }

        if let Some(instrument) = instrument {
            check_against(&shape, instrument)?;
        }

        Ok(Chord::new(self.name.trim(), pitch_classes, shape))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A listing of chords, as returned for "all chords"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChordCollection {
    pub version: u32,
    pub chords: Vec<ChordDocument>,
}

impl ChordCollection {
    pub fn from_repository(repository: &ChordRepository) -> Self {
        ChordCollection {
            version: DOCUMENT_VERSION,
            chords: repository.all().map(ChordDocument::from).collect(),
        }
    }

    pub fn to_chords(&self, instrument: Option<&Instrument>) -> Result<Vec<Chord>> {
        if self.version != DOCUMENT_VERSION {
            return Err(FretboardError::UnsupportedVersion(self.version));
        }
        self.chords
            .iter()
            .map(|document| document.to_chord(instrument))
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Write one chord as a JSON document
pub fn write_chord(chord: &Chord) -> Result<String> {
    ChordDocument::from(chord).to_json()
}

/// Parse and validate one chord document
pub fn read_chord(json: &str, instrument: Option<&Instrument>) -> Result<Chord> {
    ChordDocument::from_json(json)?.to_chord(instrument)
}

fn check_against(shape: &Shape, instrument: &Instrument) -> Result<()> {
    if shape.len() != instrument.string_count() {
        return Err(invalid(format!(
            "voicing has {} strings but the instrument has {}",
            shape.len(),
            instrument.string_count()
        )));
    }
    for fretted in shape.iter() {
        if let FrettedNote::Fretted { string, fret, note } = *fretted {
            match instrument.note_at(string, fret) {
                Some(expected) if expected == note => {}
                Some(expected) => {
                    return Err(invalid(format!(
                        "string {} fret {} sounds {}, not {}",
                        string, fret, expected, note
                    )))
                }
                None => {
                    return Err(invalid(format!(
                        "fret {} is beyond the instrument's {} frets",
                        fret,
                        instrument.fret_count()
                    )))
                }
            }
        }
    }
    Ok(())
}

fn invalid(message: String) -> FretboardError {
    FretboardError::InvalidDocument(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c_major() -> Chord {
        ChordRepository::standard()
            .unwrap()
            .get("CMaj")
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_round_trip_preserves_shape() {
        let chord = c_major();
        let json = write_chord(&chord).unwrap();
        let parsed = read_chord(&json, Some(&Instrument::standard_guitar())).unwrap();
        assert_eq!(parsed, chord);
        assert_eq!(parsed.shape(), chord.shape());
    }

    #[test]
    fn test_muted_record_layout() {
        let record = FrettedNoteRecord::from(&FrettedNote::muted(4));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["muted"], true);
        assert!(json["fret"].is_null());
        assert!(json["pitch"].is_null());
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut document = ChordDocument::from(&c_major());
        document.version = 2;
        assert!(matches!(
            document.to_chord(None),
            Err(FretboardError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn test_rejects_inconsistent_mute() {
        let mut document = ChordDocument::from(&c_major());
        document.fretted_note[0].muted = true;
        assert!(matches!(
            document.to_chord(None),
            Err(FretboardError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_order_strings() {
        let mut document = ChordDocument::from(&c_major());
        document.fretted_note.swap(0, 1);
        assert!(document.to_chord(None).is_err());
    }

    #[test]
    fn test_rejects_note_that_disagrees_with_instrument() {
        let mut document = ChordDocument::from(&c_major());
        // Claim the open high E string sounds E3
        document.fretted_note[0].octave = Some(3);
        assert!(document.to_chord(None).is_ok());
        assert!(document
            .to_chord(Some(&Instrument::standard_guitar()))
            .is_err());
    }

    #[test]
    fn test_rejects_foreign_tone() {
        let mut document = ChordDocument::from(&c_major());
        document.pitch_classes = vec!["C".to_string(), "E".to_string()];
        assert!(document.to_chord(None).is_err());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let json = r#"{"version":1,"name":"X","pitch_classes":["E"],"fretted_note":[],"extra":1}"#;
        assert!(matches!(
            ChordDocument::from_json(json),
            Err(FretboardError::Json(_))
        ));
    }

    #[test]
    fn test_collection_round_trip() {
        let repository = ChordRepository::standard().unwrap();
        let collection = ChordCollection::from_repository(&repository);
        let json = collection.to_json().unwrap();
        let chords = ChordCollection::from_json(&json)
            .unwrap()
            .to_chords(Some(repository.instrument()))
            .unwrap();
        assert_eq!(chords.len(), 10);
        assert!(chords.iter().zip(repository.all()).all(|(a, b)| a == b));
    }
}
