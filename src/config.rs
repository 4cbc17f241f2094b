//! Profile configuration loaded from `~/.config/pwmaker/profiles.toml`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::encoder::Encoding;
use crate::error::PwmError;
use crate::profile::Profile;
use crate::types::{Length, RegionSet, RegionTag, SubstitutionRule};

/// Name of the profile used when none is requested.
pub const DEFAULT_PROFILE: &str = "default";

/// Length as written in a profile file: a positive integer or `"unbounded"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LengthSpec {
    Chars(i64),
    Keyword(String),
}

impl TryFrom<LengthSpec> for Length {
    type Error = PwmError;

    fn try_from(spec: LengthSpec) -> Result<Self, Self::Error> {
        match spec {
            LengthSpec::Chars(n) => usize::try_from(n)
                .map_err(|_| PwmError::InvalidLength)
                .and_then(Length::chars),
            LengthSpec::Keyword(word) if word.eq_ignore_ascii_case("unbounded") => Ok(Length::Unbounded),
            _ => Err(PwmError::InvalidLength),
        }
    }
}

/// One `[profiles.<name>]` table before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileSpec {
    /// Region names in any order; duplicates are rejected.
    pub regions: Vec<RegionTag>,
    pub algorithm: String,
    pub encoding: String,
    /// Only used with `encoding = "custom"`.
    pub alphabet: Option<String>,
    pub length: LengthSpec,
    pub iterations: u32,
    pub prefix: String,
    pub suffix: String,
    pub username: String,
    pub modifier: String,
    pub substitutions: Vec<SubstitutionRule>,
}

impl Default for ProfileSpec {
    fn default() -> Self {
        Self {
            regions: vec![RegionTag::Domain],
            algorithm: "md5".to_string(),
            encoding: "printable".to_string(),
            alphabet: None,
            length: LengthSpec::Chars(8),
            iterations: 1,
            prefix: String::new(),
            suffix: String::new(),
            username: String::new(),
            modifier: String::new(),
            substitutions: Vec::new(),
        }
    }
}

impl TryFrom<ProfileSpec> for Profile {
    type Error = PwmError;

    fn try_from(spec: ProfileSpec) -> Result<Self, Self::Error> {
        let encoding = match (spec.encoding.trim().eq_ignore_ascii_case("custom"), spec.alphabet) {
            (true, Some(alphabet)) => Encoding::custom(&alphabet)?,
            (true, None) => {
                return Err(PwmError::InvalidAlphabet(
                    "custom encoding requires an alphabet".to_string(),
                ))
            }
            (false, Some(_)) => {
                return Err(PwmError::InvalidAlphabet(
                    "alphabet is only allowed with encoding = \"custom\"".to_string(),
                ))
            }
            (false, None) => spec.encoding.parse()?,
        };

        let profile = Profile {
            regions: RegionSet::from_tags(&spec.regions)?,
            algorithm: spec.algorithm.parse()?,
            encoding,
            length: spec.length.try_into()?,
            iterations: spec.iterations,
            prefix: spec.prefix,
            suffix: spec.suffix,
            username: spec.username,
            modifier: spec.modifier,
            substitutions: spec.substitutions,
        };
        profile.validate()?;
        Ok(profile)
    }
}

/// Contents of a profile file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileSpec>,
}

impl Default for ProfileFile {
    /// A file holding only the built-in `default` profile.
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(DEFAULT_PROFILE.to_string(), ProfileSpec::default());
        Self { profiles }
    }
}

impl ProfileFile {
    /// Parse TOML profile definitions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pwmaker::config::ProfileFile;
    ///
    /// let file = ProfileFile::parse(r#"
    ///     [profiles.work]
    ///     regions = ["subdomain", "domain"]
    ///     algorithm = "hmac-sha256"
    ///     length = 16
    /// "#).unwrap();
    /// let profile = file.profile("work").unwrap();
    /// assert_eq!(profile.length.bound(), Some(16));
    /// ```
    pub fn parse(text: &str) -> Result<Self, PwmError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a profile file.
    pub fn load(path: &Path) -> Result<Self, PwmError> {
        let text = fs::read_to_string(path)?;
        let file = ProfileFile::parse(&text)?;
        debug!(path = %path.display(), profiles = file.profiles.len(), "profiles loaded");
        Ok(file)
    }

    /// Read `path` if it exists, otherwise fall back to the built-in default.
    pub fn load_or_default(path: &Path) -> Result<Self, PwmError> {
        if path.exists() {
            ProfileFile::load(path)
        } else {
            debug!(path = %path.display(), "no profile file, using built-in default");
            Ok(ProfileFile::default())
        }
    }

    /// Build and validate the named profile.
    pub fn profile(&self, name: &str) -> Result<Profile, PwmError> {
        let spec = self
            .profiles
            .get(name)
            .ok_or_else(|| PwmError::ProfileNotFound(name.to_string()))?;
        Profile::try_from(spec.clone())
    }

    /// Profile names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

/// Default location of the profile file under the XDG config home.
pub fn config_path() -> Result<PathBuf, PwmError> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pwmaker")
        .map_err(|err| PwmError::Config(err.to_string()))?;
    Ok(xdg_dirs.get_config_file("profiles.toml"))
}
