//! Error types for the fallible controller surfaces.
//!
//! Almost everything here is infallible by construction: out-of-range
//! environment inputs are clamped, degenerate geometry is floored, and an
//! empty fleet is a valid (trivial) fleet. The one thing a caller can get
//! wrong is naming a formation that does not exist.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwarmError {
    /// The requested formation name is not recognized; targets unchanged.
    #[error("unknown formation \"{0}\"")]
    UnknownFormation(String),
}
