//! Named chord collection
//!
//! The repository owns the chords the application knows about. Each chord is
//! resolved to a voicing once, when it is added, using the repository's
//! instrument and fret window. There is no shared instance: callers create a
//! repository and pass it by reference to whatever needs it.

use crate::error::{FretboardError, Result};
use crate::resolver::{best_shape, FretWindow};
use crate::types::{
    chord_of, Chord, FrettedNote, Instrument, Note, PitchClass, PitchClassSet, Quality,
};
use log::{info, warn};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct ChordRepository {
    instrument: Instrument,
    window: FretWindow,
    // Keyed by lower-cased name
    chords: BTreeMap<String, Chord>,
}

impl ChordRepository {
    /// An empty repository for `instrument`, searching within `window`
    pub fn new(instrument: Instrument, window: FretWindow) -> Self {
        ChordRepository {
            instrument,
            window,
            chords: BTreeMap::new(),
        }
    }

    /// Standard six-string guitar, open position, seeded with the stock chord library
    pub fn standard() -> Result<Self> {
        let mut repository = Self::new(Instrument::standard_guitar(), FretWindow::OPEN_POSITION);
        repository.seed_stock_chords()?;
        Ok(repository)
    }

    /// Add CMaj, DMaj, DMin, D7, DMaj7, EMaj, EMin, AMaj, AMin and ADim
    pub fn seed_stock_chords(&mut self) -> Result<()> {
        let c1 = Note::new(PitchClass::C, 1);
        let d1 = Note::new(PitchClass::D, 1);
        let e0 = Note::new(PitchClass::E, 0);
        let a1 = Note::new(PitchClass::A, 1);

        let stock = [
            (c1, Quality::Major),
            (d1, Quality::Major),
            (d1, Quality::Minor),
            (d1, Quality::Seventh),
            (d1, Quality::MajorSeventh),
            (e0, Quality::Major),
            (e0, Quality::Minor),
            (a1, Quality::Major),
            (a1, Quality::Minor),
            (a1, Quality::Diminished),
        ];
        for (root, quality) in stock {
            self.add_chord(root, quality)?;
        }
        Ok(())
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn window(&self) -> FretWindow {
        self.window
    }

    /// All chords, ordered by name (case-insensitive)
    pub fn all(&self) -> impl Iterator<Item = &Chord> {
        self.chords.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.chords.values().map(Chord::name)
    }

    /// Case-insensitive lookup; `None` for an unknown name
    pub fn get(&self, name: &str) -> Option<&Chord> {
        self.chords.get(&Self::key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.chords.contains_key(&Self::key(name))
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Resolve `pitch_classes` to a voicing and store it under `name`,
    /// replacing any chord already stored under that name.
    ///
    /// Fails with [`FretboardError::Unplayable`] when the chord has no voicing
    /// in this repository's window; the repository is left unchanged.
    pub fn add(&mut self, name: &str, pitch_classes: PitchClassSet) -> Result<&Chord> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FretboardError::EmptyChordName);
        }

        let shape = match best_shape(&self.instrument, self.window, &pitch_classes)? {
            Some(shape) => shape,
            None => {
                warn!(
                    "{} {} has no shape within frets {}-{}",
                    name,
                    pitch_classes,
                    self.window.min(),
                    self.window.max()
                );
                return Err(FretboardError::Unplayable {
                    name: name.to_string(),
                });
            }
        };

        info!("Added chord {} as {}", name, shape);
        let key = Self::key(name);
        self.chords
            .insert(key.clone(), Chord::new(name, pitch_classes, shape));
        Ok(&self.chords[&key])
    }

    /// Add the chord built on `root` with `quality`, named e.g. `DMaj7`
    pub fn add_chord(&mut self, root: Note, quality: Quality) -> Result<&Chord> {
        let name = format!("{}{}", root.pitch_class(), quality.suffix());
        self.add(&name, chord_of(root, &quality.pattern()))
    }

    /// Store a chord whose voicing was produced elsewhere, e.g. read from a document.
    ///
    /// The voicing must belong to this repository's instrument and stay inside
    /// its fret window. Returns the chord it replaced, if any.
    pub fn insert(&mut self, chord: Chord) -> Result<Option<Chord>> {
        let shape = chord.shape();
        let fits_instrument = shape.len() == self.instrument.string_count()
            && shape.iter().all(|fretted| match (fretted.fret(), fretted.note()) {
                (Some(fret), Some(note)) => {
                    self.instrument.note_at(fretted.string(), fret) == Some(note)
                }
                _ => true,
            });
        if !fits_instrument {
            return Err(FretboardError::InstrumentMismatch {
                name: chord.name().to_string(),
            });
        }

        if shape
            .iter()
            .filter_map(FrettedNote::fret)
            .any(|fret| !self.window.contains(fret))
        {
            warn!(
                "{} ({}) leaves frets {}-{}",
                chord.name(),
                shape,
                self.window.min(),
                self.window.max()
            );
            return Err(FretboardError::OutsideWindow {
                name: chord.name().to_string(),
                min: self.window.min(),
                max: self.window.max(),
            });
        }

        info!("Imported chord {} as {}", chord.name(), shape);
        Ok(self.chords.insert(Self::key(chord.name()), chord))
    }

    /// Remove a chord by name, returning it if it existed
    pub fn remove(&mut self, name: &str) -> Option<Chord> {
        let removed = self.chords.remove(&Self::key(name));
        if let Some(chord) = &removed {
            info!("Removed chord {}", chord.name());
        }
        removed
    }

    /// Switch to another instrument or fret window and re-resolve every chord.
    ///
    /// Chords with no voicing under the new settings are dropped; their names
    /// are returned.
    pub fn reconfigure(&mut self, instrument: Instrument, window: FretWindow) -> Result<Vec<String>> {
        let previous = std::mem::take(&mut self.chords);
        self.instrument = instrument;
        self.window = window;

        let mut dropped = Vec::new();
        for chord in previous.into_values() {
            match self.add(chord.name(), chord.pitch_classes()) {
                Ok(_) => {}
                Err(FretboardError::Unplayable { name }) => dropped.push(name),
                Err(e) => return Err(e),
            }
        }
        Ok(dropped)
    }

    fn key(name: &str) -> String {
        Chord::name_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_repository() {
        let repository = ChordRepository::standard().unwrap();
        assert_eq!(repository.len(), 10);

        let names: Vec<&str> = repository.names().collect();
        for expected in ["CMaj", "DMaj", "DMin", "D7", "DMaj7", "EMaj", "EMin", "AMaj", "AMin", "ADim"] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let repository = ChordRepository::standard().unwrap();
        let chord = repository.get("cmaj").unwrap();
        assert_eq!(chord.name(), "CMaj");
        assert!(repository.get("CMAJ").is_some());
        assert!(repository.get("Gsus4").is_none());
    }

    #[test]
    fn test_add_replaces_existing() {
        let mut repository = ChordRepository::standard().unwrap();
        let g_major: PitchClassSet = "G B D".parse().unwrap();
        repository.add("cmaj", g_major).unwrap();

        assert_eq!(repository.len(), 10);
        assert_eq!(repository.get("CMaj").unwrap().pitch_classes(), g_major);
    }

    #[test]
    fn test_add_unplayable_leaves_repository_unchanged() {
        let narrow = FretWindow::new(0, 0).unwrap();
        let mut repository = ChordRepository::new(Instrument::standard_guitar(), narrow);
        let c_major: PitchClassSet = "C E G".parse().unwrap();

        let result = repository.add("CMaj", c_major);
        assert!(matches!(result, Err(FretboardError::Unplayable { .. })));
        assert!(repository.is_empty());
    }

    #[test]
    fn test_add_rejects_empty_pitch_classes() {
        let mut repository = ChordRepository::new(Instrument::standard_guitar(), FretWindow::default());
        assert!(matches!(
            repository.add("Nothing", PitchClassSet::new()),
            Err(FretboardError::EmptyPitchClassSet)
        ));
    }

    fn single_note_chord(instrument: &Instrument, fret: u8) -> Chord {
        let mut notes = vec![FrettedNote::fretted(instrument, 0, fret).unwrap()];
        notes.extend((1..instrument.string_count()).map(FrettedNote::muted));
        let shape = crate::types::Shape::new(notes);
        Chord::new("Lead", shape.pitch_classes(), shape)
    }

    #[test]
    fn test_insert_respects_fret_window() {
        let mut repository = ChordRepository::standard().unwrap();
        let guitar = Instrument::standard_guitar();

        let high = single_note_chord(&guitar, 5);
        assert_eq!(high.shape().to_string(), "5-x-x-x-x-x");
        assert!(matches!(
            repository.insert(high),
            Err(FretboardError::OutsideWindow { min: 0, max: 3, .. })
        ));
        assert!(!repository.contains("lead"));

        let low = single_note_chord(&guitar, 3);
        assert!(repository.insert(low.clone()).unwrap().is_none());
        let replaced = repository.insert(low).unwrap();
        assert_eq!(replaced.map(|c| c.name().to_string()), Some("Lead".to_string()));
    }

    #[test]
    fn test_insert_rejects_other_instrument() {
        let mut repository = ChordRepository::standard().unwrap();
        let ukulele_chord = single_note_chord(&Instrument::ukulele(), 0);
        assert!(matches!(
            repository.insert(ukulele_chord),
            Err(FretboardError::InstrumentMismatch { .. })
        ));
    }

    #[test]
    fn test_remove() {
        let mut repository = ChordRepository::standard().unwrap();
        let removed = repository.remove("adim").unwrap();
        assert_eq!(removed.name(), "ADim");
        assert_eq!(repository.len(), 9);
        assert!(repository.remove("ADim").is_none());
    }

    #[test]
    fn test_generated_names() {
        let mut repository = ChordRepository::new(Instrument::standard_guitar(), FretWindow::default());
        let g = Note::new(PitchClass::G, 0);
        let chord = repository.add_chord(g, Quality::Seventh).unwrap();
        assert_eq!(chord.name(), "G7");
    }

    #[test]
    fn test_reconfigure_drops_unplayable() {
        let mut repository = ChordRepository::standard().unwrap();
        let dropped = repository
            .reconfigure(Instrument::standard_guitar(), FretWindow::new(0, 0).unwrap())
            .unwrap();

        // Every stock chord except E minor needs a stopped string
        assert_eq!(repository.len(), 1);
        assert!(repository.contains("EMin"));
        assert_eq!(dropped.len(), 9);
        assert_eq!(repository.window(), FretWindow::new(0, 0).unwrap());
    }

    #[test]
    fn test_shapes_stay_in_window() {
        let repository = ChordRepository::standard().unwrap();
        for chord in repository.all() {
            for fretted in chord.shape().iter() {
                if let Some(fret) = fretted.fret() {
                    assert!(fret <= 3, "{} uses fret {}", chord.name(), fret);
                }
            }
            assert_eq!(chord.shape().pitch_classes(), chord.pitch_classes());
        }
    }
}
