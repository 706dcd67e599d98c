use crate::error::{FretboardError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, RangeInclusive, Sub};
use std::str::FromStr;

/// One of the twelve semitone classes, octave-independent.
/// 0=C, 1=C#/Db, 2=D, 3=D#/Eb, 4=E, 5=F, 6=F#/Gb, 7=G, 8=G#/Ab, 9=A, 10=A#/Bb, 11=B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);
    pub const C_SHARP: PitchClass = PitchClass(1);
    pub const D: PitchClass = PitchClass(2);
    pub const D_SHARP: PitchClass = PitchClass(3);
    pub const E: PitchClass = PitchClass(4);
    pub const F: PitchClass = PitchClass(5);
    pub const F_SHARP: PitchClass = PitchClass(6);
    pub const G: PitchClass = PitchClass(7);
    pub const G_SHARP: PitchClass = PitchClass(8);
    pub const A: PitchClass = PitchClass(9);
    pub const A_SHARP: PitchClass = PitchClass(10);
    pub const B: PitchClass = PitchClass(11);

    /// Create a pitch class from its chromatic index (0-11)
    pub fn new(index: u8) -> Result<Self> {
        if index > 11 {
            return Err(FretboardError::InvalidPitchClass(index));
        }
        Ok(PitchClass(index))
    }

    /// Create a pitch class from any integer, wrapping modulo 12
    pub fn wrapping(index: i32) -> Self {
        PitchClass(index.rem_euclid(12) as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Move up (or down, for negative values) by a number of semitones
    pub fn shifted(self, semitones: i32) -> Self {
        Self::wrapping(self.0 as i32 + semitones)
    }

    /// Display name, spelled with sharps
    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "C",
            1 => "C#",
            2 => "D",
            3 => "D#",
            4 => "E",
            5 => "F",
            6 => "F#",
            7 => "G",
            8 => "G#",
            9 => "A",
            10 => "A#",
            _ => "B",
        }
    }

    /// Parse a bare note name (no octave). Accepts sharps (`#`, legacy `s`) and flats (`b`).
    fn parse_name(name: &str) -> Option<Self> {
        let index = match name.to_uppercase().as_str() {
            "C" => 0,
            "C#" | "CS" | "DB" => 1,
            "D" => 2,
            "D#" | "DS" | "EB" => 3,
            "E" | "FB" => 4,
            "F" | "E#" => 5,
            "F#" | "FS" | "GB" => 6,
            "G" => 7,
            "G#" | "GS" | "AB" => 8,
            "A" => 9,
            "A#" | "AS" | "BB" => 10,
            "B" | "CB" => 11,
            _ => return None,
        };
        Some(PitchClass(index))
    }
}

impl FromStr for PitchClass {
    type Err = FretboardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_name(s.trim()).ok_or_else(|| FretboardError::InvalidNote(s.to_string()))
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of pitch classes, iterated in ascending chromatic order.
///
/// Stored as a 12-bit mask so that the resolver can compare the tones of a
/// candidate voicing against the required set with a single equality check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PitchClassSet(u16);

impl PitchClassSet {
    pub fn new() -> Self {
        PitchClassSet(0)
    }

    pub fn insert(&mut self, pitch_class: PitchClass) -> bool {
        let bit = 1u16 << pitch_class.index();
        let added = self.0 & bit == 0;
        self.0 |= bit;
        added
    }

    pub fn contains(&self, pitch_class: PitchClass) -> bool {
        self.0 & (1u16 << pitch_class.index()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: PitchClassSet) -> PitchClassSet {
        PitchClassSet(self.0 | other.0)
    }

    pub fn is_subset(&self, other: &PitchClassSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = PitchClass> + '_ {
        (0..12u8)
            .filter(move |&i| self.0 & (1u16 << i) != 0)
            .map(PitchClass)
    }
}

impl FromIterator<PitchClass> for PitchClassSet {
    fn from_iter<I: IntoIterator<Item = PitchClass>>(iter: I) -> Self {
        let mut set = PitchClassSet::new();
        for pitch_class in iter {
            set.insert(pitch_class);
        }
        set
    }
}

impl FromStr for PitchClassSet {
    type Err = FretboardError;

    /// Parse a comma- or space-separated list of note names, e.g. `"C, E, G"`
    fn from_str(s: &str) -> Result<Self> {
        s.trim_matches(|c| c == '{' || c == '}' || c == '[' || c == ']')
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(str::parse::<PitchClass>)
            .collect()
    }
}

impl fmt::Display for PitchClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(PitchClass::name).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// Octaves accepted when parsing a note
pub const OCTAVE_RANGE: RangeInclusive<i32> = -1000..=1000;

/// A pitch class placed in a specific octave.
///
/// Equality is exact (same class, same octave); use [`Note::same_pitch_class`]
/// for octave-independent comparison. Notes order by absolute pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    pitch_class: PitchClass,
    octave: i32,
}

impl Note {
    pub fn new(pitch_class: PitchClass, octave: i32) -> Self {
        Note {
            pitch_class,
            octave,
        }
    }

    pub fn pitch_class(&self) -> PitchClass {
        self.pitch_class
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Semitones above C of octave 0
    pub fn absolute_pitch(&self) -> i64 {
        i64::from(self.octave) * 12 + i64::from(self.pitch_class.index())
    }

    pub fn same_pitch_class(&self, other: &Note) -> bool {
        self.pitch_class == other.pitch_class
    }

    /// Transpose the note by a number of semitones
    pub fn transpose(self, semitones: i32) -> Note {
        self.shifted_by(i64::from(semitones))
    }

    // Octaves saturate at the ends of the i32 range
    fn shifted_by(self, semitones: i64) -> Note {
        let shifted = i64::from(self.pitch_class.index()) + semitones;
        let octave = i64::from(self.octave) + shifted.div_euclid(12);
        Note {
            pitch_class: PitchClass(shifted.rem_euclid(12) as u8),
            octave: octave.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
        }
    }
}

impl PartialOrd for Note {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Note {
    fn cmp(&self, other: &Self) -> Ordering {
        self.absolute_pitch().cmp(&other.absolute_pitch())
    }
}

impl FromStr for Note {
    type Err = FretboardError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        // Note name is a letter plus an optional accidental; whatever follows is the octave
        let mut name_end = 0;
        let mut chars = s.char_indices();
        if let Some((_, first)) = chars.next() {
            name_end = first.len_utf8();
        }
        if let Some((i, c)) = chars.next() {
            if matches!(c, '#' | 'b' | 'B' | 's' | 'S') {
                name_end = i + c.len_utf8();
            }
        }

        let (name, octave_part) = s.split_at(name_end);
        let pitch_class = PitchClass::parse_name(name)
            .ok_or_else(|| FretboardError::InvalidNote(s.to_string()))?;

        let octave = if octave_part.is_empty() {
            4
        } else {
            octave_part
                .parse::<i32>()
                .ok()
                .filter(|octave| OCTAVE_RANGE.contains(octave))
                .ok_or_else(|| FretboardError::InvalidNote(s.to_string()))?
        };

        // Cb and B# belong to the neighbouring octave
        let letter = name.chars().next().map(|c| c.to_ascii_uppercase());
        let octave = match (letter, pitch_class) {
            (Some('C'), PitchClass::B) => octave - 1,
            (Some('B'), PitchClass::C) => octave + 1,
            _ => octave,
        };

        Ok(Note::new(pitch_class, octave))
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class, self.octave)
    }
}

// Arithmetic operations for transposition
impl Add<i32> for Note {
    type Output = Note;

    fn add(self, semitones: i32) -> Self::Output {
        self.transpose(semitones)
    }
}

impl Sub<i32> for Note {
    type Output = Note;

    fn sub(self, semitones: i32) -> Self::Output {
        self.shifted_by(-i64::from(semitones))
    }
}

// Ascending interval between pitch classes, ignoring octave
impl Sub<Note> for Note {
    type Output = u8;

    fn sub(self, other: Note) -> Self::Output {
        (self.pitch_class.index() as i32 - other.pitch_class.index() as i32).rem_euclid(12) as u8
    }
}
