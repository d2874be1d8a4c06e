//! # Error Types
//!
//! Errors surfaced by the theory engine.
//!
//! Only bad input is an error here. Playability findings from the voicing
//! audit are ordinary values (see `audit::ValidationIssue`) and are never
//! returned through `Err`.
//!
//! ## Usage
//! ```rust
//! use keywheel::{resolve_interval, TheoryError};
//!
//! match resolve_interval("C", "H") {
//!     Ok(label) => println!("{}", label),
//!     Err(TheoryError::UnknownPitchName(name)) => eprintln!("no such pitch: {}", name),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TheoryError {
    /// A note or key name outside the supported 12-pitch alphabet.
    ///
    /// # Example
    /// ```
    /// # use keywheel::TheoryError;
    /// let err = TheoryError::UnknownPitchName("X#".to_string());
    /// assert_eq!(err.to_string(), "Unknown pitch name: 'X#'");
    /// ```
    #[error("Unknown pitch name: '{0}'")]
    UnknownPitchName(String),

    /// A voicing catalog that could not be deserialised.
    #[error("Invalid voicing catalog: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for TheoryError {
    fn from(e: serde_yaml::Error) -> Self {
        TheoryError::Catalog(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TheoryError>;
