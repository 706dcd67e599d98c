//! Fretboard shape search
//!
//! Given an instrument, a fret window and the pitch classes a chord needs,
//! find every assignment of "muted" or "stopped at fret n" to each string
//! whose sounding notes spell exactly that chord, and rank them by how easy
//! they are to finger.
//!
//! The search space is `(window width + 2) ^ strings`, small for real
//! instruments and narrow windows, so the candidates are enumerated
//! exhaustively. The only pruning is discarding per-string options that would
//! sound a tone outside the chord, since no voicing containing one can match.

use crate::error::{FretboardError, Result};
use crate::types::{FrettedNote, Instrument, PitchClassSet, Shape};
use log::debug;
use std::cmp::Ordering;

/// Inclusive range of frets the search may use on every string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FretWindow {
    min: u8,
    max: u8,
}

impl FretWindow {
    /// Window used for the stock chord library: open position, first three frets
    pub const OPEN_POSITION: FretWindow = FretWindow { min: 0, max: 3 };

    pub fn new(min_fret: i32, max_fret: i32) -> Result<Self> {
        if min_fret < 0 || max_fret < 0 || min_fret > max_fret || max_fret > u8::MAX as i32 {
            return Err(FretboardError::InvalidFretWindow {
                min: min_fret,
                max: max_fret,
            });
        }
        Ok(FretWindow {
            min: min_fret as u8,
            max: max_fret as u8,
        })
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn contains(&self, fret: u8) -> bool {
        (self.min..=self.max).contains(&fret)
    }
}

impl Default for FretWindow {
    fn default() -> Self {
        Self::OPEN_POSITION
    }
}

/// Find every voicing of `required` on `instrument` within `[min_fret, max_fret]`,
/// best first.
///
/// Returns an empty vector when the chord cannot be played in that window.
/// Fails only for structurally invalid input: a negative or inverted window,
/// or an empty pitch-class set.
pub fn find_shape(
    instrument: &Instrument,
    min_fret: i32,
    max_fret: i32,
    required: &PitchClassSet,
) -> Result<Vec<Shape>> {
    let window = FretWindow::new(min_fret, max_fret)?;
    find_shapes_in(instrument, window, required)
}

/// The single best voicing, if there is one
pub fn best_shape(
    instrument: &Instrument,
    window: FretWindow,
    required: &PitchClassSet,
) -> Result<Option<Shape>> {
    Ok(find_shapes_in(instrument, window, required)?
        .into_iter()
        .next())
}

/// [`find_shape`] with an already validated window
pub fn find_shapes_in(
    instrument: &Instrument,
    window: FretWindow,
    required: &PitchClassSet,
) -> Result<Vec<Shape>> {
    if required.is_empty() {
        return Err(FretboardError::EmptyPitchClassSet);
    }
    if instrument.string_count() == 0 {
        return Err(FretboardError::EmptyInstrument);
    }

    let candidates = string_candidates(instrument, window, required);

    // A required tone that no string can produce makes the chord unplayable
    let reachable: PitchClassSet = candidates
        .iter()
        .flatten()
        .filter_map(FrettedNote::note)
        .map(|note| note.pitch_class())
        .collect();
    if !required.is_subset(&reachable) {
        debug!(
            "{} unreachable on {} within frets {}-{}",
            required,
            instrument,
            window.min(),
            window.max()
        );
        return Ok(Vec::new());
    }

    let mut shapes = Vec::new();
    let mut examined = 0usize;
    let mut choice = vec![0usize; candidates.len()];

    loop {
        examined += 1;
        let sounding: PitchClassSet = choice
            .iter()
            .zip(&candidates)
            .filter_map(|(&pick, options)| options[pick].note())
            .map(|note| note.pitch_class())
            .collect();

        // Muting every string yields an empty set, which never equals a non-empty target
        if sounding == *required {
            let notes = choice
                .iter()
                .zip(&candidates)
                .map(|(&pick, options)| options[pick])
                .collect();
            shapes.push(Shape::new(notes));
        }

        if !advance(&mut choice, &candidates) {
            break;
        }
    }

    // Stable sort, so complete ties keep enumeration order
    shapes.sort_by(compare_shapes);

    debug!(
        "{} on {} within frets {}-{}: {} of {} combinations match",
        required,
        instrument,
        window.min(),
        window.max(),
        shapes.len(),
        examined
    );

    Ok(shapes)
}

/// Options for each string: usable frets in ascending order, then muted
fn string_candidates(
    instrument: &Instrument,
    window: FretWindow,
    required: &PitchClassSet,
) -> Vec<Vec<FrettedNote>> {
    let highest = window.max().min(instrument.fret_count());
    (0..instrument.string_count())
        .map(|string| {
            let mut options: Vec<FrettedNote> = (window.min()..=highest)
                .filter_map(|fret| FrettedNote::fretted(instrument, string, fret))
                .filter(|fretted| {
                    fretted
                        .note()
                        .is_some_and(|note| required.contains(note.pitch_class()))
                })
                .collect();
            options.push(FrettedNote::muted(string));
            options
        })
        .collect()
}

/// Step the odometer; the first string is the most significant digit.
/// Returns false once every combination has been visited.
fn advance(choice: &mut [usize], candidates: &[Vec<FrettedNote>]) -> bool {
    for position in (0..choice.len()).rev() {
        choice[position] += 1;
        if choice[position] < candidates[position].len() {
            return true;
        }
        choice[position] = 0;
    }
    false
}

/// Preference order: fewer fingers, tighter span, closer to the nut, then
/// string by string with lower frets first and muted last.
fn compare_shapes(a: &Shape, b: &Shape) -> Ordering {
    a.finger_count()
        .cmp(&b.finger_count())
        .then_with(|| a.span().cmp(&b.span()))
        .then_with(|| a.fret_total().cmp(&b.fret_total()))
        .then_with(|| string_order_key(a).cmp(&string_order_key(b)))
}

fn string_order_key(shape: &Shape) -> Vec<u16> {
    shape
        .iter()
        .map(|n| n.fret().map_or(u16::MAX, u16::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{chord_of, Note, MAJOR};

    fn c_major() -> PitchClassSet {
        chord_of("C1".parse::<Note>().unwrap(), &MAJOR)
    }

    #[test]
    fn test_window_validation() {
        assert!(FretWindow::new(0, 3).is_ok());
        assert!(FretWindow::new(2, 2).is_ok());
        assert!(matches!(
            FretWindow::new(-1, 3),
            Err(FretboardError::InvalidFretWindow { min: -1, max: 3 })
        ));
        assert!(FretWindow::new(4, 3).is_err());
        assert!(FretWindow::new(0, 300).is_err());
    }

    #[test]
    fn test_invalid_input_rejected_before_search() {
        let guitar = Instrument::standard_guitar();
        assert!(matches!(
            find_shape(&guitar, 0, 3, &PitchClassSet::new()),
            Err(FretboardError::EmptyPitchClassSet)
        ));
        assert!(find_shape(&guitar, 3, 0, &c_major()).is_err());
        assert!(find_shape(&guitar, -2, 3, &c_major()).is_err());
    }

    #[test]
    fn test_string_candidates_order() {
        let guitar = Instrument::standard_guitar();
        let candidates = string_candidates(&guitar, FretWindow::OPEN_POSITION, &c_major());
        assert_eq!(candidates.len(), 6);

        // High E string: E (open), G (3rd fret), then muted
        let frets: Vec<Option<u8>> = candidates[0].iter().map(|c| c.fret()).collect();
        assert_eq!(frets, vec![Some(0), Some(3), None]);

        // A string: only C at the 3rd fret
        let frets: Vec<Option<u8>> = candidates[4].iter().map(|c| c.fret()).collect();
        assert_eq!(frets, vec![Some(3), None]);
    }

    #[test]
    fn test_window_clamped_to_fret_count() {
        let short = Instrument::from_tuning(2, &["E2"]).unwrap();
        let required: PitchClassSet = "E".parse().unwrap();
        let shapes = find_shape(&short, 0, 10, &required).unwrap();
        assert!(shapes.iter().all(|s| s.iter().all(|n| n.fret().unwrap_or(0) <= 2)));
        assert_eq!(shapes.len(), 1);
    }

    #[test]
    fn test_single_string_instrument() {
        let monochord = Instrument::from_tuning(12, &["A2"]).unwrap();
        let required: PitchClassSet = "B".parse().unwrap();
        let shapes = find_shape(&monochord, 0, 5, &required).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].to_string(), "2");
    }

    #[test]
    fn test_string_order_key_puts_muted_last() {
        let guitar = Instrument::standard_guitar();
        let shape = Shape::new(vec![
            FrettedNote::muted(0),
            FrettedNote::fretted(&guitar, 1, 0).unwrap(),
            FrettedNote::fretted(&guitar, 2, 0).unwrap(),
            FrettedNote::fretted(&guitar, 3, 0).unwrap(),
            FrettedNote::fretted(&guitar, 4, 2).unwrap(),
            FrettedNote::muted(5),
        ]);
        assert_eq!(string_order_key(&shape), vec![u16::MAX, 0, 0, 0, 2, u16::MAX]);
    }
}
