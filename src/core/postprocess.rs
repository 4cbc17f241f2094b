//! Truncation, substitution rules and literal affixes.

use crate::profile::Profile;
use crate::types::SubstitutionRule;

/// Turn encoded text into the final output for `profile`.
///
/// The body is the encoded text cut to the profile's body length (left as is
/// when shorter or when the length is unbounded). Substitution rules rewrite
/// the body only; prefix and suffix are attached verbatim afterwards.
pub fn finish(encoded: &str, profile: &Profile) -> String {
    let body: Vec<char> = match profile.body_len() {
        Some(len) => encoded.chars().take(len).collect(),
        None => encoded.chars().collect(),
    };
    let body = apply_substitutions(body, &profile.substitutions);

    let mut out = String::with_capacity(profile.prefix.len() + body.len() + profile.suffix.len());
    out.push_str(&profile.prefix);
    out.extend(body);
    out.push_str(&profile.suffix);
    out
}

/// Apply substitution rules in order.
///
/// `Require` rules claim the position that satisfies them, so a later
/// `Require` never overwrites a character an earlier one depends on.
pub fn apply_substitutions(mut body: Vec<char>, rules: &[SubstitutionRule]) -> Vec<char> {
    let mut claimed = vec![false; body.len()];

    for rule in rules {
        match *rule {
            SubstitutionRule::Replace { from, to } => {
                for c in body.iter_mut().filter(|c| **c == from) {
                    *c = to;
                }
            }
            SubstitutionRule::Require(class) => {
                if let Some(idx) = body.iter().position(|c| class.matches(*c)) {
                    claimed[idx] = true;
                    continue;
                }

                let free: Vec<usize> = (0..body.len()).filter(|idx| !claimed[*idx]).collect();
                if free.is_empty() {
                    continue;
                }

                // Seed arithmetic stays in u64 so every target picks the same slot.
                let seed = checksum(&body);
                let alphabet: Vec<char> = class.alphabet().chars().collect();
                let slots = free.len() as u64;
                let idx = free[(seed % slots) as usize];
                body[idx] = alphabet[((seed / slots) % alphabet.len() as u64) as usize];
                claimed[idx] = true;
            }
        }
    }

    body
}

fn checksum(body: &[char]) -> u64 {
    body.iter()
        .fold(0u64, |acc, c| acc.wrapping_mul(31).wrapping_add(u64::from(*c)))
}
