//! The derivation pipeline: combine, hash, encode, post-process.

use tracing::debug;

use crate::core::postprocess::finish;
use crate::error::PwmError;
use crate::profile::Profile;
use crate::url::normalizer::context_with;
use crate::url::suffix::{SuffixRules, SuffixTable};

/// Derive the password for a normalized context.
///
/// The message is `context + username + modifier` and the master secret is
/// the key. Bounded profiles that need more text than one digest provides
/// draw further blocks from `message + "\n" + n`. The result is fully
/// determined by the three arguments.
///
/// # Arguments
///
/// * `context` - Normalized context, usually from [`crate::context_for`]
/// * `secret` - Master secret bytes, never logged or kept
/// * `profile` - Derivation parameters, validated before any hashing
///
/// # Examples
///
/// ```
/// use pwmaker::{derive, Profile, Length};
///
/// let profile = Profile::default().with_length(Length::chars(12).unwrap());
/// let password = derive("google.com", b"master", &profile).unwrap();
/// assert_eq!(password.chars().count(), 12);
/// assert_eq!(password, derive("google.com", b"master", &profile).unwrap());
/// ```
pub fn derive(context: &str, secret: &[u8], profile: &Profile) -> Result<String, PwmError> {
    profile.validate()?;

    debug!(
        algorithm = %profile.algorithm,
        encoding = %profile.encoding,
        iterations = profile.iterations,
        length = ?profile.length.bound(),
        "deriving password"
    );

    let mut message =
        Vec::with_capacity(context.len() + profile.username.len() + profile.modifier.len());
    message.extend_from_slice(context.as_bytes());
    message.extend_from_slice(profile.username.as_bytes());
    message.extend_from_slice(profile.modifier.as_bytes());

    let digest = profile.algorithm.digest(secret, &message, profile.iterations)?;
    let mut encoded = profile.encoding.encode(&digest);

    if let Some(needed) = profile.body_len() {
        let mut have = encoded.chars().count();
        let mut block = 1u32;
        while have < needed {
            let mut extended = message.clone();
            extended.push(b'\n');
            extended.extend_from_slice(block.to_string().as_bytes());

            let digest = profile.algorithm.digest(secret, &extended, profile.iterations)?;
            let more = profile.encoding.encode(&digest);
            have += more.chars().count();
            encoded.push_str(&more);
            block += 1;
        }
        debug!(blocks = block, "encoded text extended");
    }

    Ok(finish(&encoded, profile))
}

/// Normalize `text` with the profile's regions, then derive.
pub fn generate(text: &str, secret: &[u8], profile: &Profile) -> Result<String, PwmError> {
    generate_with(text, secret, profile, SuffixTable::builtin())
}

/// Like [`generate`], splitting domains with `rules`.
pub fn generate_with(
    text: &str,
    secret: &[u8],
    profile: &Profile,
    rules: &dyn SuffixRules,
) -> Result<String, PwmError> {
    profile.validate()?;
    let context = context_with(text, profile.regions, rules);
    derive(&context, secret, profile)
}
