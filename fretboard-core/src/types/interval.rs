//! Interval patterns and chord qualities
//!
//! An interval pattern is the list of semitone offsets that, applied to a
//! root note, spell a chord. The built-in patterns are plain data checked at
//! compile time; patterns typed in by a user go through
//! [`IntervalPattern::try_from_offsets`].

use crate::error::{FretboardError, Result};
use crate::types::note::{Note, PitchClassSet};
use std::fmt;
use std::str::FromStr;

/// Ordered semitone offsets from a chord root.
///
/// Invariants: non-empty, first offset is 0, every offset in `0..12`, no
/// duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalPattern {
    offsets: [u8; 12],
    len: u8,
}

pub const MAJOR: IntervalPattern = IntervalPattern::new(&[0, 4, 7]);
pub const MINOR: IntervalPattern = IntervalPattern::new(&[0, 3, 7]);
pub const SEVENTH: IntervalPattern = IntervalPattern::new(&[0, 4, 7, 10]);
pub const DOMINANT_SEVENTH: IntervalPattern = SEVENTH;
pub const MAJOR_SEVENTH: IntervalPattern = IntervalPattern::new(&[0, 4, 7, 11]);
pub const DIMINISHED: IntervalPattern = IntervalPattern::new(&[0, 3, 6]);

impl IntervalPattern {
    /// Build a pattern in a const context. A malformed pattern fails to compile
    /// when used to initialise a `const`.
    const fn new(offsets: &[u8]) -> Self {
        match Self::check(offsets) {
            Ok(()) => {}
            Err(reason) => panic!("{}", reason),
        }

        let mut stored = [0u8; 12];
        let mut i = 0;
        while i < offsets.len() {
            stored[i] = offsets[i];
            i += 1;
        }
        IntervalPattern {
            offsets: stored,
            len: offsets.len() as u8,
        }
    }

    /// Build a pattern from runtime data, rejecting malformed offsets
    pub fn try_from_offsets(offsets: &[u8]) -> Result<Self> {
        Self::check(offsets)
            .map(|()| Self::new(offsets))
            .map_err(|reason| FretboardError::InvalidIntervalPattern(reason.to_string()))
    }

    const fn check(offsets: &[u8]) -> std::result::Result<(), &'static str> {
        if offsets.is_empty() {
            return Err("pattern must not be empty");
        }
        if offsets[0] != 0 {
            return Err("pattern must start at the root (offset 0)");
        }
        let mut seen = 0u16;
        let mut i = 0;
        while i < offsets.len() {
            let offset = offsets[i];
            if offset >= 12 {
                return Err("offsets must lie within one octave (0-11)");
            }
            if seen & (1u16 << offset) != 0 {
                return Err("pattern contains a duplicate offset");
            }
            seen |= 1u16 << offset;
            i += 1;
        }
        Ok(())
    }

    pub fn offsets(&self) -> &[u8] {
        &self.offsets[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl FromStr for IntervalPattern {
    type Err = FretboardError;

    /// Parse either a quality name (`maj`, `dim`, ...) or a comma-separated
    /// list of offsets such as `0,4,7,9`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(quality) = s.parse::<Quality>() {
            return Ok(quality.pattern());
        }

        let offsets = s
            .trim_matches(|c| c == '{' || c == '}' || c == '[' || c == ']')
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<u8>()
                    .map_err(|_| FretboardError::UnknownQuality(s.to_string()))
            })
            .collect::<Result<Vec<u8>>>()?;
        Self::try_from_offsets(&offsets)
    }
}

impl fmt::Display for IntervalPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.offsets().iter().map(|o| o.to_string()).collect();
        write!(f, "{{{}}}", parts.join(","))
    }
}

/// The chord qualities that have a conventional name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    Major,
    Minor,
    Seventh,
    MajorSeventh,
    Diminished,
}

impl Quality {
    pub const ALL: [Quality; 5] = [
        Quality::Major,
        Quality::Minor,
        Quality::Seventh,
        Quality::MajorSeventh,
        Quality::Diminished,
    ];

    pub fn pattern(self) -> IntervalPattern {
        match self {
            Quality::Major => MAJOR,
            Quality::Minor => MINOR,
            Quality::Seventh => SEVENTH,
            Quality::MajorSeventh => MAJOR_SEVENTH,
            Quality::Diminished => DIMINISHED,
        }
    }

    /// Suffix used when generating chord names, e.g. `D` + `Maj7`
    pub fn suffix(self) -> &'static str {
        match self {
            Quality::Major => "Maj",
            Quality::Minor => "Min",
            Quality::Seventh => "7",
            Quality::MajorSeventh => "Maj7",
            Quality::Diminished => "Dim",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Quality::Major => "major",
            Quality::Minor => "minor",
            Quality::Seventh => "dominant seventh",
            Quality::MajorSeventh => "major seventh",
            Quality::Diminished => "diminished",
        }
    }
}

impl FromStr for Quality {
    type Err = FretboardError;

    fn from_str(s: &str) -> Result<Self> {
        // `M` and `m` are the only case-sensitive spellings
        match s.trim() {
            "M" => return Ok(Quality::Major),
            "m" => return Ok(Quality::Minor),
            _ => {}
        }
        match s.trim().to_lowercase().as_str() {
            "maj" | "major" => Ok(Quality::Major),
            "min" | "minor" => Ok(Quality::Minor),
            "7" | "dom7" | "seventh" => Ok(Quality::Seventh),
            "maj7" | "major7" => Ok(Quality::MajorSeventh),
            "dim" | "diminished" => Ok(Quality::Diminished),
            _ => Err(FretboardError::UnknownQuality(s.to_string())),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Spell a chord as the set of pitch classes it contains
pub fn chord_of(root: Note, pattern: &IntervalPattern) -> PitchClassSet {
    pattern
        .offsets()
        .iter()
        .map(|&offset| root.pitch_class().shifted(offset as i32))
        .collect()
}
