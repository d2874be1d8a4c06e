//! # Guitar Voicing Catalog
//!
//! Record shapes for the static chord-voicing catalog.
//!
//! ## Catalog Format
//! Catalogs are YAML with camelCase keys:
//!
//! ```yaml
//! instrument:
//!   name: guitar
//!   strings: 6
//!   fretsOnChord: 4
//!   tunings:
//!     standard: [E, A, D, G, B, E]
//! chords:
//!   C:
//!     - key: C
//!       suffix: major
//!       positions:
//!         - frets: [-1, 3, 2, 0, 1, 0]
//!           fingers: [0, 3, 2, 0, 1, 0]
//!           baseFret: 1
//!           barres: []
//! ```
//!
//! ## Fret Values
//! - `-1` - muted string
//! - `0` - open string
//! - `n > 0` - fretted, relative to `baseFret` (1 = the base fret itself)
//!
//! Strings are indexed low to high, `0` being the low E string.
//!
//! Barre values use the same relative numbering as `frets`. A barre only
//! counts when at least two strings sit at its fret.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MUTED: i8 = -1;

/// One playable shape for a chord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuitarVoicing {
    pub frets: Vec<i8>,
    #[serde(default)]
    pub fingers: Vec<u8>,
    #[serde(default)]
    pub barres: Vec<i8>,
    #[serde(default = "default_base_fret")]
    pub base_fret: u8,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub capo: bool,
}

fn default_base_fret() -> u8 {
    1
}

impl GuitarVoicing {
    pub fn new(frets: Vec<i8>, barres: Vec<i8>) -> Self {
        Self {
            fingers: vec![0; frets.len()],
            frets,
            barres,
            base_fret: 1,
            capo: false,
        }
    }

    pub fn with_fingers(mut self, fingers: Vec<u8>) -> Self {
        self.fingers = fingers;
        self
    }

    pub fn with_base_fret(mut self, base_fret: u8) -> Self {
        self.base_fret = base_fret;
        self
    }

    /// Lowest and highest string index fretted at `fret`.
    ///
    /// Returns `None` when fewer than two strings share that fret, since a
    /// single string cannot form a barre.
    pub fn barre_span(&self, fret: i8) -> Option<(usize, usize)> {
        let mut strings = self
            .frets
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f == fret)
            .map(|(i, _)| i);
        let first = strings.next()?;
        let last = strings.last()?;
        Some((first, last))
    }

    /// Absolute fret on the neck for a string.
    ///
    /// `None` if the string is muted or the fret falls off a `u8` neck.
    pub fn absolute_fret(&self, string: usize) -> Option<u8> {
        match *self.frets.get(string)? {
            f if f < 0 => None,
            0 => Some(0),
            f => {
                let fret = (f as u16 + self.base_fret as u16).checked_sub(1)?;
                u8::try_from(fret).ok()
            }
        }
    }

    pub fn is_muted(&self, string: usize) -> bool {
        self.frets.get(string).map_or(false, |&f| f < 0)
    }
}

/// Every voicing stored for one (root, quality) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chord {
    pub key: String,
    pub suffix: String,
    #[serde(default)]
    pub positions: Vec<GuitarVoicing>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    #[serde(default)]
    pub name: Option<String>,
    pub strings: u8,
    #[serde(default)]
    pub frets_on_chord: Option<u8>,
    #[serde(default)]
    pub tunings: BTreeMap<String, Vec<String>>,
}

impl Default for Instrument {
    fn default() -> Self {
        Self {
            name: Some("guitar".to_string()),
            strings: 6,
            frets_on_chord: Some(4),
            tunings: BTreeMap::new(),
        }
    }
}

/// A full voicing catalog, chords grouped by root.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub instrument: Instrument,
    #[serde(default)]
    pub chords: BTreeMap<String, Vec<Chord>>,
}

impl Catalog {
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Chords across all roots, in root order.
    pub fn chords(&self) -> impl Iterator<Item = &Chord> {
        self.chords.values().flatten()
    }

    pub fn find(&self, root: &str, suffix: &str) -> Option<&Chord> {
        self.chords
            .get(root)?
            .iter()
            .find(|c| c.suffix == suffix)
    }

    pub fn voicing_count(&self) -> usize {
        self.chords().map(|c| c.positions.len()).sum()
    }
}
