//! # keywheel
//!
//! Music-theory and chord-voicing engine behind the songwriting key wheel.
//!
//! Three pure entry points serve the UI layer:
//! - [`resolve_interval`] - scale-degree label of a note in a major key
//! - [`compute_wheel_rotation`] - shortest-path wheel rotation for a key jump
//! - [`validate_voicing`] - playability findings for a stored guitar voicing
//!
//! Nothing here performs I/O or holds shared state; catalog loading is the
//! only fallible step besides parsing pitch names.

pub mod audit;
pub mod error;
pub mod interval;
pub mod pitch;
pub mod voicing;
pub mod wheel;

pub use audit::{audit_catalog, audit_chord, validate_voicing, AuditReport, IssueKind, ValidationIssue};
pub use error::*;
pub use interval::{interval_between, resolve_interval, IntervalLabel};
pub use pitch::{Key, PitchClass, Spelling};
pub use voicing::{Catalog, Chord, GuitarVoicing, Instrument};
pub use wheel::{compute_wheel_rotation, KeyWheel, WheelMode};

/// Load and audit a catalog from YAML source.
pub fn audit_yaml(source: &str) -> Result<AuditReport> {
    let catalog = Catalog::from_yaml(source)?;
    Ok(audit_catalog(&catalog))
}

/// Audit every catalog bundled with the crate.
pub fn audit_embedded() -> Result<AuditReport> {
    let mut report = AuditReport::default();
    for catalog in keywheel_voicings::get_all_catalogs() {
        tracing::info!(catalog = %catalog.name, "auditing embedded catalog");
        report.merge(audit_yaml(catalog.content)?);
    }
    Ok(report)
}
