//! # Pitch and Key Model
//!
//! Canonical pitch classes and the twelve major keys laid out on the
//! circle of fifths.
//!
//! ## Pitch Classes
//! A pitch class is stored as semitones above C (`0..=11`). Names are parsed
//! leniently: a letter `A`-`G` (either case) plus at most one accidental.
//!
//! | Accidental | Accepted forms  |
//! |------------|-----------------|
//! | sharp      | `#` `♯` `s`     |
//! | flat       | `b` `♭` `f`     |
//! | natural    | none, `♮`       |
//!
//! So `F#`, `F♯`, `Fs`, `Gb`, `G♭` and `Gf` all name the same pitch class.
//! Edge spellings such as `Cb`, `E#`, `Fb` and `B#` are accepted and wrap
//! around the octave.
//!
//! ## Circle of Fifths
//! Key positions are fixed data, not derived from semitone arithmetic:
//!
//! ```text
//! position:  0  1  2  3  4  5  6   7   8   9   10  11
//! key:       C  G  D  A  E  B  F#  Db  Ab  Eb  Bb  F
//! ```
//!
//! ## Related Modules
//! - `interval` - resolves scale-degree labels from a `Key` and a `PitchClass`
//! - `wheel` - turns `Key::position` into a wheel rotation

use crate::error::{Result, TheoryError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PITCH_CLASS_COUNT: u8 = 12;

/// Tonic semitone for each circle-of-fifths position.
const CIRCLE_OF_FIFTHS: [u8; 12] = [0, 7, 2, 9, 4, 11, 6, 1, 8, 3, 10, 5];

/// Display names for every circle-of-fifths position.
const KEY_NAMES: [&str; 12] = [
    "C", "G", "D", "A", "E", "B", "F#", "Db", "Ab", "Eb", "Bb", "F",
];

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Semitone steps of the major scale from the tonic.
const MAJOR_SCALE_STEPS: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Which accidental to use when naming a black-key pitch class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

/// One of the twelve pitch classes, as semitones above C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    /// Build a pitch class from any semitone count, wrapping into the octave.
    pub fn from_semitone(semitone: i32) -> Self {
        PitchClass(semitone.rem_euclid(PITCH_CLASS_COUNT as i32) as u8)
    }

    pub fn semitone(self) -> u8 {
        self.0
    }

    /// Upward distance in semitones from `self` to `target`, in `0..=11`.
    pub fn semitones_to(self, target: PitchClass) -> u8 {
        (target.0 + PITCH_CLASS_COUNT - self.0) % PITCH_CLASS_COUNT
    }

    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_semitone(self.0 as i32 + semitones)
    }

    pub fn is_natural(self) -> bool {
        SHARP_NAMES[self.0 as usize].len() == 1
    }

    pub fn name(self, spelling: Spelling) -> &'static str {
        match spelling {
            Spelling::Sharps => SHARP_NAMES[self.0 as usize],
            Spelling::Flats => FLAT_NAMES[self.0 as usize],
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name(Spelling::Sharps))
    }
}

impl FromStr for PitchClass {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        let unknown = || TheoryError::UnknownPitchName(s.to_string());
        let mut chars = s.trim().chars();

        let base: i32 = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => 0,
            Some('D') => 2,
            Some('E') => 4,
            Some('F') => 5,
            Some('G') => 7,
            Some('A') => 9,
            Some('B') => 11,
            _ => return Err(unknown()),
        };

        let accidental: i32 = match chars.next() {
            None | Some('♮') => 0,
            Some('#') | Some('♯') | Some('s') => 1,
            Some('b') | Some('♭') | Some('f') => -1,
            Some(_) => return Err(unknown()),
        };

        if chars.next().is_some() {
            return Err(unknown());
        }

        Ok(PitchClass::from_semitone(base + accidental))
    }
}

/// Parse a pitch name, failing with `UnknownPitchName` for anything outside
/// the supported alphabet.
pub fn parse_pitch(name: &str) -> Result<PitchClass> {
    name.parse()
}

/// Semitone distance `(target - origin) mod 12` between two named pitches.
pub fn semitone_distance(origin: &str, target: &str) -> Result<u8> {
    Ok(parse_pitch(origin)?.semitones_to(parse_pitch(target)?))
}

/// The other common spelling of a pitch name ("F#" <-> "Gb").
///
/// Natural notes have no common alternate spelling and yield `None`.
///
/// # Example
/// ```
/// use keywheel::pitch::enharmonic_equivalent;
///
/// assert_eq!(enharmonic_equivalent("F#").unwrap(), Some("Gb"));
/// assert_eq!(enharmonic_equivalent("Bb").unwrap(), Some("A#"));
/// assert_eq!(enharmonic_equivalent("D").unwrap(), None);
/// ```
pub fn enharmonic_equivalent(name: &str) -> Result<Option<&'static str>> {
    let pitch = parse_pitch(name)?;
    if pitch.is_natural() {
        return Ok(None);
    }
    let sharp = pitch.name(Spelling::Sharps);
    let flat = pitch.name(Spelling::Flats);
    // Name the spelling the caller did not use.
    let written_flat = name.trim().chars().nth(1).map_or(false, |c| matches!(c, 'b' | '♭' | 'f'));
    Ok(Some(if written_flat { sharp } else { flat }))
}

/// Whether two spellings name the same pitch class.
pub fn are_enharmonic(a: &str, b: &str) -> Result<bool> {
    Ok(parse_pitch(a)? == parse_pitch(b)?)
}

/// A major key, identified by its tonic and its circle-of-fifths position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    tonic: PitchClass,
    position: u8,
}

impl Key {
    /// The key at `position` on the circle of fifths, wrapping modulo 12.
    pub fn from_position(position: i32) -> Self {
        let position = position.rem_euclid(PITCH_CLASS_COUNT as i32) as u8;
        Key {
            tonic: PitchClass(CIRCLE_OF_FIFTHS[position as usize]),
            position,
        }
    }

    pub fn from_tonic(tonic: PitchClass) -> Self {
        let position = CIRCLE_OF_FIFTHS
            .iter()
            .position(|&semitone| semitone == tonic.0)
            .unwrap_or_default();
        Key {
            tonic,
            position: position as u8,
        }
    }

    /// All twelve keys in circle-of-fifths order, starting at C.
    pub fn all() -> impl Iterator<Item = Key> {
        (0..PITCH_CLASS_COUNT as i32).map(Key::from_position)
    }

    pub fn tonic(&self) -> PitchClass {
        self.tonic
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn name(&self) -> &'static str {
        KEY_NAMES[self.position as usize]
    }

    /// Flat keys sit at positions 7 through 11; F# is written with sharps.
    pub fn spelling(&self) -> Spelling {
        if self.position >= 7 {
            Spelling::Flats
        } else {
            Spelling::Sharps
        }
    }

    /// Name a pitch class the way this key's signature would spell it.
    pub fn spell(&self, pitch: PitchClass) -> &'static str {
        pitch.name(self.spelling())
    }

    /// The seven pitch classes of this major scale, tonic first.
    pub fn scale(&self) -> [PitchClass; 7] {
        MAJOR_SCALE_STEPS.map(|step| self.tonic.transpose(step as i32))
    }

    /// Tonic of the relative minor, a minor third below.
    pub fn relative_minor(&self) -> PitchClass {
        self.tonic.transpose(-3)
    }

    /// The neighbouring key `steps` fifths away (positive = clockwise).
    pub fn step(&self, steps: i32) -> Key {
        Key::from_position(self.position as i32 + steps.rem_euclid(PITCH_CLASS_COUNT as i32))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Key::from_tonic(parse_pitch(s)?))
    }
}
