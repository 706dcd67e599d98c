use crate::types::instrument::Instrument;
use crate::types::note::{Note, PitchClassSet};
use std::fmt;

/// What one string does in a voicing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrettedNote {
    Muted { string: usize },
    Fretted { string: usize, fret: u8, note: Note },
}

impl FrettedNote {
    /// Stop `string` of `instrument` at `fret`; `None` when the fret or string does not exist
    pub fn fretted(instrument: &Instrument, string: usize, fret: u8) -> Option<Self> {
        instrument
            .note_at(string, fret)
            .map(|note| FrettedNote::Fretted { string, fret, note })
    }

    pub fn muted(string: usize) -> Self {
        FrettedNote::Muted { string }
    }

    pub fn string(&self) -> usize {
        match *self {
            FrettedNote::Muted { string } | FrettedNote::Fretted { string, .. } => string,
        }
    }

    pub fn fret(&self) -> Option<u8> {
        match *self {
            FrettedNote::Muted { .. } => None,
            FrettedNote::Fretted { fret, .. } => Some(fret),
        }
    }

    pub fn note(&self) -> Option<Note> {
        match *self {
            FrettedNote::Muted { .. } => None,
            FrettedNote::Fretted { note, .. } => Some(note),
        }
    }

    pub fn is_muted(&self) -> bool {
        matches!(self, FrettedNote::Muted { .. })
    }

    /// Sounding with no finger on it
    pub fn is_open(&self) -> bool {
        matches!(self, FrettedNote::Fretted { fret: 0, .. })
    }

    /// Sounding and held down behind a fret
    pub fn needs_finger(&self) -> bool {
        matches!(self, FrettedNote::Fretted { fret, .. } if *fret > 0)
    }
}

impl fmt::Display for FrettedNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fret() {
            Some(fret) => write!(f, "{}", fret),
            None => write!(f, "x"),
        }
    }
}

/// One complete voicing: exactly one [`FrettedNote`] per string, in string order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    notes: Vec<FrettedNote>,
}

impl Shape {
    /// Wrap per-string entries. Entries must be ordered by string index, one per string.
    pub fn new(notes: Vec<FrettedNote>) -> Self {
        debug_assert!(notes.iter().enumerate().all(|(i, n)| n.string() == i));
        Shape { notes }
    }

    pub fn fretted_notes(&self) -> &[FrettedNote] {
        &self.notes
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrettedNote> {
        self.notes.iter()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Sounding notes, in string order
    pub fn notes(&self) -> Vec<Note> {
        self.notes.iter().filter_map(FrettedNote::note).collect()
    }

    pub fn pitch_classes(&self) -> PitchClassSet {
        self.notes
            .iter()
            .filter_map(FrettedNote::note)
            .map(|note| note.pitch_class())
            .collect()
    }

    /// Number of strings that need a finger (neither muted nor open)
    pub fn finger_count(&self) -> usize {
        self.notes.iter().filter(|n| n.needs_finger()).count()
    }

    /// Distance between the highest and lowest stopped fret; 0 with no stopped strings
    pub fn span(&self) -> u8 {
        let stopped = self
            .notes
            .iter()
            .filter(|n| n.needs_finger())
            .filter_map(FrettedNote::fret);
        let (min, max) = stopped.fold((u8::MAX, 0), |(lo, hi), fret| (lo.min(fret), hi.max(fret)));
        max.saturating_sub(min)
    }

    /// Sum of the fret numbers of all sounding strings
    pub fn fret_total(&self) -> u32 {
        self.notes
            .iter()
            .filter_map(FrettedNote::fret)
            .map(u32::from)
            .sum()
    }
}

impl fmt::Display for Shape {
    /// Compact form in string order, e.g. `0-1-0-x-x-0`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.notes.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", parts.join("-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::note::PitchClass;

    fn open_c_major() -> Shape {
        let guitar = Instrument::standard_guitar();
        Shape::new(vec![
            FrettedNote::fretted(&guitar, 0, 0).unwrap(),
            FrettedNote::fretted(&guitar, 1, 1).unwrap(),
            FrettedNote::fretted(&guitar, 2, 0).unwrap(),
            FrettedNote::fretted(&guitar, 3, 2).unwrap(),
            FrettedNote::fretted(&guitar, 4, 3).unwrap(),
            FrettedNote::muted(5),
        ])
    }

    #[test]
    fn test_fretted_note_accessors() {
        let guitar = Instrument::standard_guitar();
        let open = FrettedNote::fretted(&guitar, 0, 0).unwrap();
        assert!(open.is_open());
        assert!(!open.needs_finger());

        let muted = FrettedNote::muted(3);
        assert!(muted.is_muted());
        assert_eq!(muted.fret(), None);
        assert_eq!(muted.note(), None);
        assert_eq!(muted.string(), 3);

        assert!(FrettedNote::fretted(&guitar, 0, 20).is_none());
    }

    #[test]
    fn test_shape_metrics() {
        let shape = open_c_major();
        assert_eq!(shape.len(), 6);
        assert_eq!(shape.finger_count(), 3);
        assert_eq!(shape.span(), 2);
        assert_eq!(shape.fret_total(), 6);

        let expected: PitchClassSet = [PitchClass::C, PitchClass::E, PitchClass::G]
            .into_iter()
            .collect();
        assert_eq!(shape.pitch_classes(), expected);
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(open_c_major().to_string(), "0-1-0-2-3-x");
    }

    #[test]
    fn test_span_without_stopped_strings() {
        let guitar = Instrument::standard_guitar();
        let shape = Shape::new(
            (0..6)
                .map(|s| FrettedNote::fretted(&guitar, s, 0).unwrap())
                .collect(),
        );
        assert_eq!(shape.span(), 0);
        assert_eq!(shape.finger_count(), 0);
    }
}
