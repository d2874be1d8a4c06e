//! # Interval Resolver
//!
//! Labels a note with its scale degree relative to a major key.
//!
//! ## Algorithm
//! The label depends only on the raw semitone distance from the key's tonic,
//! never on whether the note belongs to the key's scale. A borrowed note such
//! as `F#` in C major still resolves, to `♭5`.
//!
//! ```text
//! distance: 0  1   2  3   4  5  6   7  8   9  10  11
//! label:    1  ♭2  2  ♭3  3  4  ♭5  5  ♭6  6  ♭7  7
//! ```
//!
//! ## Tritone
//! Distance 6 is always reported as `♭5`. `♯4` names the same interval, so
//! comparisons should go through [`IntervalLabel::matches`] rather than
//! string equality.
//!
//! ## Example
//! ```rust
//! use keywheel::{resolve_interval, IntervalLabel};
//!
//! assert_eq!(resolve_interval("G", "E")?, IntervalLabel::Sixth);
//! assert_eq!(resolve_interval("C", "F#")?.to_string(), "♭5");
//! assert!(resolve_interval("C", "F#")?.matches("♯4"));
//! # Ok::<(), keywheel::TheoryError>(())
//! ```

use crate::error::Result;
use crate::pitch::{parse_pitch, Key, PitchClass};
use serde::{Serialize, Serializer};
use std::fmt;

/// Scale-degree label for a semitone distance above the tonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalLabel {
    Root,
    FlatSecond,
    Second,
    FlatThird,
    Third,
    Fourth,
    FlatFifth,
    Fifth,
    FlatSixth,
    Sixth,
    FlatSeventh,
    Seventh,
}

/// Labels indexed by semitone distance.
const BY_DISTANCE: [IntervalLabel; 12] = [
    IntervalLabel::Root,
    IntervalLabel::FlatSecond,
    IntervalLabel::Second,
    IntervalLabel::FlatThird,
    IntervalLabel::Third,
    IntervalLabel::Fourth,
    IntervalLabel::FlatFifth,
    IntervalLabel::Fifth,
    IntervalLabel::FlatSixth,
    IntervalLabel::Sixth,
    IntervalLabel::FlatSeventh,
    IntervalLabel::Seventh,
];

impl IntervalLabel {
    pub fn from_distance(semitones: u8) -> Self {
        BY_DISTANCE[(semitones % 12) as usize]
    }

    pub fn semitones(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IntervalLabel::Root => "1",
            IntervalLabel::FlatSecond => "♭2",
            IntervalLabel::Second => "2",
            IntervalLabel::FlatThird => "♭3",
            IntervalLabel::Third => "3",
            IntervalLabel::Fourth => "4",
            IntervalLabel::FlatFifth => "♭5",
            IntervalLabel::Fifth => "5",
            IntervalLabel::FlatSixth => "♭6",
            IntervalLabel::Sixth => "6",
            IntervalLabel::FlatSeventh => "♭7",
            IntervalLabel::Seventh => "7",
        }
    }

    /// Parse a degree label.
    ///
    /// Accepts the canonical glyphs, ASCII `b`/`#` forms, and the `♯4`
    /// spelling of the tritone. Returns `None` for anything else.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        let first = label.chars().next()?;
        let rest = &label[first.len_utf8()..];
        let (accidental, degree) = match first {
            '♭' | 'b' => (-1, rest),
            '♯' | '#' => (1, rest),
            _ => (0, label),
        };

        let natural: i32 = match degree {
            "1" => 0,
            "2" => 2,
            "3" => 4,
            "4" => 5,
            "5" => 7,
            "6" => 9,
            "7" => 11,
            _ => return None,
        };

        let label = Self::from_distance((natural + accidental).rem_euclid(12) as u8);
        // Only spellings that round-trip onto the fixed table (plus ♯4) count.
        let canonical_accidental = match label {
            IntervalLabel::FlatSecond
            | IntervalLabel::FlatThird
            | IntervalLabel::FlatSixth
            | IntervalLabel::FlatSeventh => -1,
            IntervalLabel::FlatFifth if accidental != 0 => accidental,
            _ => 0,
        };
        (canonical_accidental == accidental).then_some(label)
    }

    /// Semantic comparison against a written label.
    ///
    /// `♭5` and `♯4` both denote the tritone, so each matches the other.
    pub fn matches(self, label: &str) -> bool {
        Self::parse(label) == Some(self)
    }

    /// True for the seven degrees of the major scale.
    pub fn is_diatonic(self) -> bool {
        matches!(
            self,
            IntervalLabel::Root
                | IntervalLabel::Second
                | IntervalLabel::Third
                | IntervalLabel::Fourth
                | IntervalLabel::Fifth
                | IntervalLabel::Sixth
                | IntervalLabel::Seventh
        )
    }

    /// Alternate spelling accepted for this label, if any.
    pub fn alternate(self) -> Option<&'static str> {
        match self {
            IntervalLabel::FlatFifth => Some("♯4"),
            _ => None,
        }
    }
}

impl fmt::Display for IntervalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IntervalLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Label `note` relative to the tonic of `key`.
pub fn interval_between(key: &Key, note: PitchClass) -> IntervalLabel {
    IntervalLabel::from_distance(key.tonic().semitones_to(note))
}

/// Resolve the scale-degree label of `note` in the major key named `key`.
///
/// # Errors
/// Returns [`TheoryError::UnknownPitchName`](crate::TheoryError::UnknownPitchName)
/// if either name is outside the supported alphabet.
pub fn resolve_interval(key: &str, note: &str) -> Result<IntervalLabel> {
    let key: Key = key.parse()?;
    let note = parse_pitch(note)?;
    Ok(interval_between(&key, note))
}
