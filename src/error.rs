//! Error types for profile validation, suffix data and configuration loading.

use thiserror::Error;

use crate::types::RegionTag;

/// Errors surfaced by the derivation core.
///
/// Unparseable input text and unknown suffixes are never errors: the
/// segmenter and splitter degrade instead. Only bad configuration fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PwmError {
    /// A region tag appears more than once in a profile.
    #[error("Duplicate region in profile: {0}")]
    DuplicateRegion(RegionTag),

    /// A region name is not one of protocol, subdomain, domain, tail.
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    /// The hash algorithm id is not supported.
    #[error("Unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),

    /// The encoding id is not supported.
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    /// A custom alphabet is missing, too small, or repeats a character.
    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// The target length is zero, too large, or otherwise unusable.
    #[error("Invalid length: must be between 1 and 1024 or \"unbounded\"")]
    InvalidLength,

    /// The iteration count is zero.
    #[error("Invalid iteration count: must be at least 1")]
    InvalidIterations,

    /// Prefix and suffix leave no room inside the target length.
    #[error("Prefix and suffix ({affixes} chars) do not fit in length {length}")]
    AffixesExceedLength { affixes: usize, length: usize },

    /// A line of a suffix data file is malformed.
    #[error("Invalid suffix rule on line {line}: {rule:?}")]
    InvalidSuffixRule { line: usize, rule: String },

    /// A profile file could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A file could not be read.
    #[error("I/O error: {0}")]
    Io(String),

    /// The requested profile name is not defined.
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// The HMAC key could not be installed.
    #[error("Invalid key length")]
    InvalidKey,
}

impl From<toml::de::Error> for PwmError {
    fn from(err: toml::de::Error) -> Self {
        PwmError::Config(err.to_string())
    }
}

impl From<std::io::Error> for PwmError {
    fn from(err: std::io::Error) -> Self {
        PwmError::Io(err.to_string())
    }
}

impl From<hmac::digest::InvalidLength> for PwmError {
    fn from(_: hmac::digest::InvalidLength) -> Self {
        PwmError::InvalidKey
    }
}
