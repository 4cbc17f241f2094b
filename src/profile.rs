//! Generation profiles.

use crate::core::encoder::{check_alphabet, Encoding};
use crate::core::hasher::HashAlgorithm;
use crate::error::PwmError;
use crate::types::{Length, RegionSet, RegionTag, SubstitutionRule};

/// The bundle of region selection and derivation parameters behind one
/// password configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Regions of the input URL that form the context
    pub regions: RegionSet,
    pub algorithm: HashAlgorithm,
    pub encoding: Encoding,
    /// Final output length, prefix and suffix included
    pub length: Length,
    /// Hash rounds, at least 1
    pub iterations: u32,
    pub prefix: String,
    pub suffix: String,
    /// Account name mixed into the hashed message
    pub username: String,
    /// Per-site modifier mixed into the hashed message
    pub modifier: String,
    /// Applied in order to the generated body
    pub substitutions: Vec<SubstitutionRule>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            regions: RegionSet::empty().with(RegionTag::Domain),
            algorithm: HashAlgorithm::default(),
            encoding: Encoding::default(),
            length: Length::default(),
            iterations: 1,
            prefix: String::new(),
            suffix: String::new(),
            username: String::new(),
            modifier: String::new(),
            substitutions: Vec::new(),
        }
    }
}

impl Profile {
    pub fn with_regions(mut self, regions: RegionSet) -> Self {
        self.regions = regions;
        self
    }

    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_length(mut self, length: Length) -> Self {
        self.length = length;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifier = modifier.into();
        self
    }

    pub fn with_substitution(mut self, rule: SubstitutionRule) -> Self {
        self.substitutions.push(rule);
        self
    }

    /// Characters taken up by prefix and suffix.
    pub fn affix_len(&self) -> usize {
        self.prefix.chars().count() + self.suffix.chars().count()
    }

    /// Characters of generated text between prefix and suffix, if bounded.
    pub fn body_len(&self) -> Option<usize> {
        self.length.bound().map(|n| n.saturating_sub(self.affix_len()))
    }

    /// Check the invariants the pipeline relies on.
    ///
    /// Region sets are duplicate-free and algorithm ids are closed by
    /// construction; what remains is iteration count, the custom alphabet
    /// and whether the affixes fit in the target length.
    pub fn validate(&self) -> Result<(), PwmError> {
        if self.iterations == 0 {
            return Err(PwmError::InvalidIterations);
        }

        if let Encoding::Custom(chars) = &self.encoding {
            check_alphabet(chars)?;
        }

        if let Some(length) = self.length.bound() {
            if length > Length::MAX_CHARS {
                return Err(PwmError::InvalidLength);
            }
            let affixes = self.affix_len();
            if affixes > length {
                return Err(PwmError::AffixesExceedLength { affixes, length });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;

    #[test]
    fn test_default_profile_is_valid() {
        let profile = Profile::default();
        assert!(profile.validate().is_ok());
        assert!(profile.regions.contains(RegionTag::Domain));
        assert_eq!(profile.regions.len(), 1);
        assert_eq!(profile.body_len(), Some(8));
    }

    #[test]
    fn test_affixes_must_fit() {
        let profile = Profile::default()
            .with_length(Length::chars(4).unwrap())
            .with_prefix("ab")
            .with_suffix("cde");
        assert_eq!(
            profile.validate(),
            Err(PwmError::AffixesExceedLength { affixes: 5, length: 4 })
        );

        let exact = Profile::default()
            .with_length(Length::chars(5).unwrap())
            .with_prefix("ab")
            .with_suffix("cde");
        assert!(exact.validate().is_ok());
        assert_eq!(exact.body_len(), Some(0));
    }

    #[test]
    fn test_unbounded_ignores_affix_length() {
        let profile = Profile::default()
            .with_length(Length::Unbounded)
            .with_prefix("a-very-long-prefix");
        assert!(profile.validate().is_ok());
        assert_eq!(profile.body_len(), None);
    }

    #[test]
    fn test_oversized_length_rejected() {
        let huge = NonZeroUsize::new(usize::MAX).unwrap();
        let profile = Profile::default().with_length(Length::Bounded(huge));
        assert_eq!(profile.validate(), Err(PwmError::InvalidLength));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let profile = Profile::default().with_iterations(0);
        assert_eq!(profile.validate(), Err(PwmError::InvalidIterations));
    }

    #[test]
    fn test_hand_built_custom_alphabet_checked() {
        let profile = Profile::default().with_encoding(Encoding::Custom(vec!['x', 'x']));
        assert!(matches!(profile.validate(), Err(PwmError::InvalidAlphabet(_))));
    }

    #[test]
    fn test_affixes_counted_in_chars() {
        let profile = Profile::default().with_prefix("é").with_suffix("ü");
        assert_eq!(profile.affix_len(), 2);
    }
}
