//! # Voicing Playability Audit
//!
//! Detects finger layouts in stored guitar voicings that a hand cannot play.
//!
//! ## Checks
//! Every check runs on every voicing; findings accumulate instead of
//! stopping at the first one.
//!
//! ### Behind Barre
//! A barre at fret `B` spans from the lowest to the highest string fretted
//! at `B`. Any other fretted string inside that span must sit above `B`: a
//! note nearer the nut would need a finger underneath the barring finger.
//! Open and muted strings are exempt.
//!
//! ### Barre Overlap
//! Two barres at different frets cannot share any string in their spans.
//!
//! Barre values of `0` or below are ignored, since open and muted strings
//! are not pressed.
//!
//! ### Shape
//! When a `fingers` array is present it must have one entry per string.
//!
//! ## Entry Points
//! - [`validate_voicing`] - a single record
//! - [`audit_chord`] / [`audit_catalog`] - map the same check over stored data
//!
//! ## Example
//! ```rust
//! use keywheel::{validate_voicing, GuitarVoicing};
//!
//! // Barre at 3 over strings 0-3 with string 1 fretted at 2.
//! let voicing = GuitarVoicing::new(vec![3, 2, 3, 3, -1, -1], vec![3]);
//! let issues = validate_voicing("G", "custom", &voicing);
//! assert_eq!(issues.len(), 1);
//! ```

use crate::voicing::{Catalog, Chord, GuitarVoicing};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// What is wrong with a voicing.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IssueKind {
    #[error("string {string} is fretted at {fret}, behind the barre at fret {barre_fret}")]
    BehindBarre {
        barre_fret: i8,
        string: usize,
        fret: i8,
    },

    #[error("barres at frets {first_fret} and {second_fret} overlap on strings {strings:?}")]
    BarreOverlap {
        first_fret: i8,
        second_fret: i8,
        strings: Vec<usize>,
    },

    #[error("voicing has {frets} fret values but {fingers} finger values")]
    ShapeMismatch { frets: usize, fingers: usize },
}

/// A single audit finding, carrying the chord it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub root: String,
    pub quality: String,
    pub kind: IssueKind,
    pub voicing: GuitarVoicing,
}

impl ValidationIssue {
    pub fn description(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} (frets {:?}, barres {:?}, base fret {})",
            self.root, self.quality, self.kind, self.voicing.frets, self.voicing.barres, self.voicing.base_fret
        )
    }
}

/// Result of auditing many voicings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuditReport {
    pub voicings_checked: usize,
    pub issues: Vec<ValidationIssue>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn merge(&mut self, other: AuditReport) {
        self.voicings_checked += other.voicings_checked;
        self.issues.extend(other.issues);
    }
}

/// Check one voicing of the chord `root` + `quality`.
///
/// Returns an empty list when the voicing is playable. Never mutates the
/// voicing.
pub fn validate_voicing(root: &str, quality: &str, voicing: &GuitarVoicing) -> Vec<ValidationIssue> {
    let barres = active_barres(voicing);

    let mut kinds = check_behind_barre(voicing, &barres);
    kinds.extend(check_barre_overlap(&barres));
    kinds.extend(check_shape(voicing));

    debug!(root, quality, frets = ?voicing.frets, issues = kinds.len(), "validated voicing");

    kinds
        .into_iter()
        .map(|kind| {
            warn!(root, quality, "{}", kind);
            ValidationIssue {
                root: root.to_string(),
                quality: quality.to_string(),
                kind,
                voicing: voicing.clone(),
            }
        })
        .collect()
}

/// Audit every voicing stored for a chord.
pub fn audit_chord(chord: &Chord) -> AuditReport {
    AuditReport {
        voicings_checked: chord.positions.len(),
        issues: chord
            .positions
            .iter()
            .flat_map(|v| validate_voicing(&chord.key, &chord.suffix, v))
            .collect(),
    }
}

/// Audit a whole catalog.
pub fn audit_catalog(catalog: &Catalog) -> AuditReport {
    let mut report = AuditReport::default();
    for chord in catalog.chords() {
        report.merge(audit_chord(chord));
    }
    report
}

/// A barre fret with the string span it covers.
#[derive(Debug, Clone, Copy)]
struct Barre {
    fret: i8,
    low: usize,
    high: usize,
}

/// Declared barres that really cover two or more strings, deduplicated.
///
/// Open and muted values are never barres: nothing is pressed.
fn active_barres(voicing: &GuitarVoicing) -> Vec<Barre> {
    let mut barres: Vec<Barre> = Vec::new();
    for &fret in &voicing.barres {
        if fret <= 0 || barres.iter().any(|b| b.fret == fret) {
            continue;
        }
        if let Some((low, high)) = voicing.barre_span(fret) {
            barres.push(Barre { fret, low, high });
        }
    }
    barres
}

fn check_behind_barre(voicing: &GuitarVoicing, barres: &[Barre]) -> Vec<IssueKind> {
    let mut issues = Vec::new();
    for barre in barres {
        for string in barre.low..=barre.high {
            let fret = voicing.frets[string];
            if fret > 0 && fret != barre.fret && fret < barre.fret {
                issues.push(IssueKind::BehindBarre {
                    barre_fret: barre.fret,
                    string,
                    fret,
                });
            }
        }
    }
    issues
}

fn check_barre_overlap(barres: &[Barre]) -> Vec<IssueKind> {
    let mut issues = Vec::new();
    for (i, a) in barres.iter().enumerate() {
        for b in &barres[i + 1..] {
            let low = a.low.max(b.low);
            let high = a.high.min(b.high);
            if low <= high {
                issues.push(IssueKind::BarreOverlap {
                    first_fret: a.fret.min(b.fret),
                    second_fret: a.fret.max(b.fret),
                    strings: (low..=high).collect(),
                });
            }
        }
    }
    issues
}

fn check_shape(voicing: &GuitarVoicing) -> Option<IssueKind> {
    let (frets, fingers) = (voicing.frets.len(), voicing.fingers.len());
    (fingers != 0 && fingers != frets).then_some(IssueKind::ShapeMismatch { frets, fingers })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voicing::MUTED;

    fn overlaps(issues: &[ValidationIssue]) -> Vec<&IssueKind> {
        issues
            .iter()
            .map(|i| &i.kind)
            .filter(|k| matches!(k, IssueKind::BarreOverlap { .. }))
            .collect()
    }

    #[test]
    fn test_open_string_under_barre_is_fine() {
        let v = GuitarVoicing::new(vec![3, 0, 3, 3, MUTED, MUTED], vec![3]);
        assert!(validate_voicing("G", "test", &v).is_empty());
    }

    #[test]
    fn test_note_behind_barre() {
        let v = GuitarVoicing::new(vec![3, 2, 3, 3, MUTED, MUTED], vec![3]);
        let issues = validate_voicing("G", "test", &v);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].kind,
            IssueKind::BehindBarre {
                barre_fret: 3,
                string: 1,
                fret: 2
            }
        );
        assert_eq!(issues[0].root, "G");
        assert_eq!(issues[0].quality, "test");
        assert_eq!(issues[0].voicing, v);
        assert_eq!(
            issues[0].description(),
            "string 1 is fretted at 2, behind the barre at fret 3"
        );
    }

    #[test]
    fn test_note_above_barre_is_fine() {
        // Standard E-shape barre chord: notes above the barre are playable.
        let v = GuitarVoicing::new(vec![1, 3, 3, 2, 1, 1], vec![1]);
        assert!(validate_voicing("F", "major", &v).is_empty());
    }

    #[test]
    fn test_muted_strings_are_exempt() {
        let v = GuitarVoicing::new(vec![3, MUTED, 3, 3, 3, 3], vec![3]);
        assert!(validate_voicing("G", "test", &v).is_empty());
    }

    #[test]
    fn test_disjoint_barres() {
        let v = GuitarVoicing::new(vec![1, 1, 3, 3, MUTED, MUTED], vec![1, 3]);
        let issues = validate_voicing("X", "test", &v);
        assert!(overlaps(&issues).is_empty());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_overlapping_barres() {
        let v = GuitarVoicing::new(vec![1, 3, 1, 3, MUTED, MUTED], vec![1, 3]);
        let issues = validate_voicing("X", "test", &v);
        let found = overlaps(&issues);
        assert_eq!(found.len(), 1);
        assert_eq!(
            *found[0],
            IssueKind::BarreOverlap {
                first_fret: 1,
                second_fret: 3,
                strings: vec![1, 2],
            }
        );
        // String 2 at fret 1 also sits behind the barre at 3.
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_single_string_is_not_a_barre() {
        let v = GuitarVoicing::new(vec![MUTED, 3, 2, 0, 1, 0], vec![3]);
        assert!(validate_voicing("C", "major", &v).is_empty());
    }

    #[test]
    fn test_open_and_muted_barre_values_are_ignored() {
        let v = GuitarVoicing::new(vec![0, 3, 0, 3, MUTED, MUTED], vec![0, 3]);
        assert!(validate_voicing("X", "test", &v).is_empty());

        let v = GuitarVoicing::new(vec![MUTED, 2, MUTED, 2, 0, 0], vec![MUTED, 2, 0]);
        assert!(validate_voicing("X", "test", &v).is_empty());
    }

    #[test]
    fn test_duplicate_barre_entries_count_once() {
        let v = GuitarVoicing::new(vec![3, 2, 3, 3, MUTED, MUTED], vec![3, 3]);
        assert_eq!(validate_voicing("G", "test", &v).len(), 1);
    }

    #[test]
    fn test_finger_count_mismatch() {
        let v = GuitarVoicing::new(vec![MUTED, 3, 2, 0, 1, 0], vec![]).with_fingers(vec![0, 3, 2, 0, 1]);
        let issues = validate_voicing("C", "major", &v);
        assert_eq!(
            issues.iter().map(|i| &i.kind).collect::<Vec<_>>(),
            vec![&IssueKind::ShapeMismatch { frets: 6, fingers: 5 }]
        );
    }

    #[test]
    fn test_checks_accumulate() {
        let v = GuitarVoicing::new(vec![1, 3, 1, 3, 2, MUTED], vec![1, 3]).with_fingers(vec![1]);
        let issues = validate_voicing("X", "test", &v);
        let behind = issues
            .iter()
            .filter(|i| matches!(i.kind, IssueKind::BehindBarre { .. }))
            .count();
        assert_eq!(behind, 1);
        assert_eq!(overlaps(&issues).len(), 1);
        assert!(issues
            .iter()
            .any(|i| matches!(i.kind, IssueKind::ShapeMismatch { .. })));
    }

    #[test]
    fn test_audit_chord_counts_voicings() {
        let chord = Chord {
            key: "G".to_string(),
            suffix: "test".to_string(),
            positions: vec![
                GuitarVoicing::new(vec![3, 0, 3, 3, MUTED, MUTED], vec![3]),
                GuitarVoicing::new(vec![3, 2, 3, 3, MUTED, MUTED], vec![3]),
            ],
        };
        let report = audit_chord(&chord);
        assert_eq!(report.voicings_checked, 2);
        assert_eq!(report.issues.len(), 1);
        assert!(!report.is_clean());
        assert_eq!(report.issues[0].voicing, chord.positions[1]);
    }

    #[test]
    fn test_issue_serializes_with_type_tag() {
        let v = GuitarVoicing::new(vec![3, 2, 3, 3, MUTED, MUTED], vec![3]);
        let issues = validate_voicing("G", "test", &v);
        let json = serde_json::to_value(&issues[0]).unwrap();
        assert_eq!(json["kind"]["type"], "behind_barre");
        assert_eq!(json["voicing"]["baseFret"], 1);
    }
}
