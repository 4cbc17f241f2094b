//! pwmaker - deterministic site password derivation
//!
//! This crate derives a site-specific password from a master secret and a
//! URL without storing the password anywhere. It has two halves:
//!
//! - **Context normalization**: split a URL into protocol, subdomain,
//!   registrable domain and tail using an effective-suffix table, then
//!   reassemble the regions a profile selects.
//! - **Derivation**: hash the normalized context under the master secret,
//!   encode the digest into an alphabet and post-process it to the
//!   profile's length, affixes and substitution rules.
//!
//! # Features
//!
//! - **Deterministic**: the same text, secret and profile always give the same output
//! - **Suffix-aware**: `www.google.co.uk` and `www.google.act.edu.au` split at the right label
//! - **Verbatim**: regions are copied from the input, never re-formatted
//! - **Pluggable**: suffix tables and hash algorithms sit behind small traits
//!
//! # Quick Start
//!
//! ```
//! use pwmaker::{context_for, generate, segment, HashAlgorithm, Length, Profile, RegionSet};
//!
//! // Normalize a URL to the regions a profile cares about
//! let regions: RegionSet = "protocol,domain,tail".parse()?;
//! let context = context_for("http://www.google.com:8080/search?q=password+maker", regions);
//! assert_eq!(context, "http://google.com:8080/search?q=password+maker");
//!
//! // Inspect the raw regions
//! let parsed = segment("sub.domain.www.google.co.uk");
//! assert_eq!(parsed.subdomain, "sub.domain.www");
//! assert_eq!(parsed.domain, "google.co.uk");
//!
//! // Derive a password
//! let profile = Profile::default()
//!     .with_algorithm(HashAlgorithm::HmacSha256)
//!     .with_length(Length::chars(16)?);
//! let password = generate("https://www.example.com/login", b"master secret", &profile)?;
//! assert_eq!(password.chars().count(), 16);
//! # Ok::<(), pwmaker::PwmError>(())
//! ```
//!
//! # Regions
//!
//! | Region    | `http://www.google.com:8080/search?q=x` |
//! |-----------|------------------------------------------|
//! | protocol  | `http://`                                |
//! | subdomain | `www`                                    |
//! | domain    | `google.com`                             |
//! | tail      | `:8080/search?q=x`                       |
//!
//! Text that is not URL-like (`This is Not A Url`) is used unmodified, as is
//! any text normalized with an empty region selection.
//!
//! # Error Handling
//!
//! Normalization never fails. Derivation returns `Result<String, PwmError>`
//! and only fails on an invalid profile, before any hashing happens:
//!
//! - Duplicate regions or unknown region, algorithm or encoding ids
//! - Zero or over-long length, or zero iterations
//! - Prefix and suffix longer than the target length
//! - Custom alphabets that are too small or repeat characters

// Re-export normalization
pub use self::url::{
    context_for, context_with, normalize, segment, segment_with, split_host, split_host_with,
    ParsedUrl, PublicSuffixList, SuffixRule, SuffixRules, SuffixTable,
};

// Re-export derivation
pub use self::core::{derive, generate, generate_with, Encoding, HashAlgorithm, HashFunction};

// Re-export public types
pub use error::PwmError;
pub use profile::Profile;
pub use types::{CharClass, Length, RegionSet, RegionTag, SubstitutionRule};

// Module declarations
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod profile;
pub mod types;
pub mod url;
