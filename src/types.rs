//! Core value types shared by the normalizer and the derivation pipeline.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PwmError;

/// One of the four ordered regions a URL is segmented into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionTag {
    /// Scheme plus `://`
    Protocol,
    /// Labels in front of the registrable domain
    Subdomain,
    /// Registrable label plus effective suffix
    Domain,
    /// Port, path, query and anchor, with the leading delimiter
    #[serde(alias = "port_path_anchor_query")]
    Tail,
}

impl RegionTag {
    /// All tags in output order.
    pub const ALL: [RegionTag; 4] = [
        RegionTag::Protocol,
        RegionTag::Subdomain,
        RegionTag::Domain,
        RegionTag::Tail,
    ];

    fn bit(self) -> u8 {
        match self {
            RegionTag::Protocol => 1 << 0,
            RegionTag::Subdomain => 1 << 1,
            RegionTag::Domain => 1 << 2,
            RegionTag::Tail => 1 << 3,
        }
    }

    /// Config name of the tag.
    pub fn as_str(self) -> &'static str {
        match self {
            RegionTag::Protocol => "protocol",
            RegionTag::Subdomain => "subdomain",
            RegionTag::Domain => "domain",
            RegionTag::Tail => "tail",
        }
    }
}

impl fmt::Display for RegionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionTag {
    type Err = PwmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "protocol" => Ok(RegionTag::Protocol),
            "subdomain" => Ok(RegionTag::Subdomain),
            "domain" => Ok(RegionTag::Domain),
            "tail" | "port_path_anchor_query" => Ok(RegionTag::Tail),
            other => Err(PwmError::UnknownRegion(other.to_string())),
        }
    }
}

/// A duplicate-free selection of regions.
///
/// Iteration always yields tags in the fixed order Protocol, Subdomain,
/// Domain, Tail regardless of how the set was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RegionSet(u8);

impl RegionSet {
    /// The empty selection (normalizes to the identity).
    pub const fn empty() -> Self {
        RegionSet(0)
    }

    /// Build a set from a list of tags, rejecting duplicates.
    ///
    /// # Examples
    ///
    /// ```
    /// use pwmaker::{RegionSet, RegionTag, PwmError};
    ///
    /// let set = RegionSet::from_tags(&[RegionTag::Tail, RegionTag::Domain]).unwrap();
    /// assert_eq!(set.iter().collect::<Vec<_>>(), vec![RegionTag::Domain, RegionTag::Tail]);
    ///
    /// let dup = RegionSet::from_tags(&[RegionTag::Domain, RegionTag::Domain]);
    /// assert_eq!(dup, Err(PwmError::DuplicateRegion(RegionTag::Domain)));
    /// ```
    pub fn from_tags(tags: &[RegionTag]) -> Result<Self, PwmError> {
        let mut set = RegionSet::empty();
        for &tag in tags {
            if set.contains(tag) {
                return Err(PwmError::DuplicateRegion(tag));
            }
            set = set.with(tag);
        }
        Ok(set)
    }

    /// Return a copy of the set with `tag` added.
    pub fn with(self, tag: RegionTag) -> Self {
        RegionSet(self.0 | tag.bit())
    }

    pub fn contains(self, tag: RegionTag) -> bool {
        self.0 & tag.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate selected tags in output order.
    pub fn iter(self) -> impl Iterator<Item = RegionTag> {
        RegionTag::ALL.into_iter().filter(move |tag| self.contains(*tag))
    }
}

impl FromStr for RegionSet {
    type Err = PwmError;

    /// Parse a comma-separated list such as `protocol,domain`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tags = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(RegionTag::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        RegionSet::from_tags(&tags)
    }
}

/// Target output length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Length {
    /// Exactly this many characters, prefix and suffix included.
    Bounded(NonZeroUsize),
    /// The full encoded digest plus prefix and suffix.
    Unbounded,
}

impl Length {
    /// Largest bounded length accepted.
    pub const MAX_CHARS: usize = 1024;

    /// Build a bounded length, rejecting zero and anything over [`Length::MAX_CHARS`].
    pub fn chars(n: usize) -> Result<Self, PwmError> {
        if n > Length::MAX_CHARS {
            return Err(PwmError::InvalidLength);
        }
        NonZeroUsize::new(n).map(Length::Bounded).ok_or(PwmError::InvalidLength)
    }

    /// The bound, if any.
    pub fn bound(self) -> Option<usize> {
        match self {
            Length::Bounded(n) => Some(n.get()),
            Length::Unbounded => None,
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::Bounded(NonZeroUsize::new(8).unwrap_or(NonZeroUsize::MIN))
    }
}

/// Symbols of the printable alphabet, also used as the `Symbol` class.
pub const SYMBOLS: &str = "`~!@#$%^&*()_-+={}|[]\\:\";'<>?,./";

/// Character classes a substitution rule can enforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    Digit,
    Lower,
    Upper,
    Symbol,
}

impl CharClass {
    /// Characters used when a missing class has to be inserted.
    pub fn alphabet(self) -> &'static str {
        match self {
            CharClass::Digit => "0123456789",
            CharClass::Lower => "abcdefghijklmnopqrstuvwxyz",
            CharClass::Upper => "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            CharClass::Symbol => SYMBOLS,
        }
    }

    pub fn matches(self, c: char) -> bool {
        match self {
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Lower => c.is_lowercase(),
            CharClass::Upper => c.is_uppercase(),
            CharClass::Symbol => SYMBOLS.contains(c),
        }
    }
}

/// One post-processing step applied to the generated body, in list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionRule {
    /// Replace every occurrence of `from` with `to`.
    Replace { from: char, to: char },
    /// Ensure at least one character of the class is present.
    Require(CharClass),
}
