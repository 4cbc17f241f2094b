//! Password derivation.
//!
//! This module contains the derivation half of the core:
//! - Hash strategies behind a common capability
//! - Digest-to-text encodings
//! - Truncation, substitution rules and affixes
//! - The pipeline tying them together

pub mod encoder;
pub mod hasher;
pub mod pipeline;
pub mod postprocess;

// Re-export main functionality
pub use encoder::Encoding;
pub use hasher::{HashAlgorithm, HashFunction};
pub use pipeline::{derive, generate, generate_with};
pub use postprocess::{apply_substitutions, finish};
