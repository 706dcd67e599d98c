use crate::types::note::PitchClassSet;
use crate::types::shape::Shape;
#[cfg(feature = "colored")]
use colored::*;
use std::fmt;

/// A named chord together with the voicing chosen for it.
///
/// Built by the repository when a chord is added and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    name: String,
    pitch_classes: PitchClassSet,
    shape: Shape,
}

impl Chord {
    pub fn new(name: impl Into<String>, pitch_classes: PitchClassSet, shape: Shape) -> Self {
        Chord {
            name: name.into(),
            pitch_classes,
            shape,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tones the chord was defined from
    pub fn pitch_classes(&self) -> PitchClassSet {
        self.pitch_classes
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Case-insensitive name comparison, using the same rule as [`Chord::name_key`]
    pub fn is_named(&self, name: &str) -> bool {
        Self::name_key(&self.name) == Self::name_key(name)
    }

    /// Normalized form of a chord name: trimmed and lower-cased
    pub fn name_key(name: &str) -> String {
        name.trim().to_lowercase()
    }
}

#[cfg(feature = "colored")]
impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let notes: Vec<String> = self
            .shape
            .notes()
            .iter()
            .map(|n| n.to_string().cyan().to_string())
            .collect();

        write!(
            f,
            "{} {} [{}]",
            self.name.bold(),
            self.shape.to_string().bright_green(),
            notes.join(", ")
        )
    }
}

// Plain Display impl for non-colored builds
#[cfg(not(feature = "colored"))]
impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let notes: Vec<String> = self.shape.notes().iter().map(|n| n.to_string()).collect();
        write!(f, "{} {} [{}]", self.name, self.shape, notes.join(", "))
    }
}
