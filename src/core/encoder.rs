//! Digest-to-text encodings.

use std::fmt;
use std::str::FromStr;

use crate::error::PwmError;
use crate::types::SYMBOLS;

const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";

/// Output alphabet for the encode stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// Lowercase hexadecimal, two characters per byte
    Hex,
    /// `A-Z a-z 0-9`
    Alphanumeric,
    /// Alphanumerics plus punctuation
    #[default]
    Printable,
    /// `A-Z a-z`
    Letters,
    /// `0-9`
    Digits,
    /// A caller-supplied alphabet of distinct characters
    Custom(Vec<char>),
}

impl Encoding {
    /// Build a custom encoding, rejecting alphabets with fewer than two
    /// characters or repeated characters.
    pub fn custom(alphabet: &str) -> Result<Self, PwmError> {
        let chars: Vec<char> = alphabet.chars().collect();
        check_alphabet(&chars)?;
        Ok(Encoding::Custom(chars))
    }

    /// Config id of the encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Hex => "hex",
            Encoding::Alphanumeric => "alnum",
            Encoding::Printable => "printable",
            Encoding::Letters => "letters",
            Encoding::Digits => "digits",
            Encoding::Custom(_) => "custom",
        }
    }

    /// The characters digits are drawn from, in digit-value order.
    pub fn alphabet(&self) -> Vec<char> {
        match self {
            Encoding::Hex => "0123456789abcdef".chars().collect(),
            Encoding::Alphanumeric => UPPER.chars().chain(LOWER.chars()).chain(DIGITS.chars()).collect(),
            Encoding::Printable => UPPER
                .chars()
                .chain(LOWER.chars())
                .chain(DIGITS.chars())
                .chain(SYMBOLS.chars())
                .collect(),
            Encoding::Letters => UPPER.chars().chain(LOWER.chars()).collect(),
            Encoding::Digits => DIGITS.chars().collect(),
            Encoding::Custom(chars) => chars.clone(),
        }
    }

    /// Encode digest bytes as text.
    ///
    /// The bytes are read as one big-endian number and written in base N
    /// over the alphabet, most significant digit first. Leading zero digits
    /// are kept, so the output length depends only on the input length.
    ///
    /// # Examples
    ///
    /// ```
    /// use pwmaker::Encoding;
    ///
    /// assert_eq!(Encoding::Hex.encode(&[0x00, 0xff]), "00ff");
    /// assert_eq!(Encoding::Digits.encode(&[0x01, 0x00]), "00256");
    /// ```
    pub fn encode(&self, bytes: &[u8]) -> String {
        match self {
            Encoding::Hex => hex::encode(bytes),
            other => to_base(bytes, &other.alphabet()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = PwmError;

    /// Parse a built-in encoding id. `custom` needs an alphabet and must be
    /// built with [`Encoding::custom`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(Encoding::Hex),
            "alnum" | "alphanumeric" => Ok(Encoding::Alphanumeric),
            "printable" => Ok(Encoding::Printable),
            "letters" => Ok(Encoding::Letters),
            "digits" => Ok(Encoding::Digits),
            "custom" => Err(PwmError::InvalidAlphabet("custom encoding requires an alphabet".to_string())),
            _ => Err(PwmError::UnknownEncoding(s.to_string())),
        }
    }
}

pub(crate) fn check_alphabet(chars: &[char]) -> Result<(), PwmError> {
    if chars.len() < 2 {
        return Err(PwmError::InvalidAlphabet(format!(
            "need at least 2 characters, got {}",
            chars.len()
        )));
    }
    for (idx, c) in chars.iter().enumerate() {
        if chars[..idx].contains(c) {
            return Err(PwmError::InvalidAlphabet(format!("repeated character {:?}", c)));
        }
    }
    Ok(())
}

/// Number of base-`base` digits needed for `byte_len` bytes.
fn digit_count(byte_len: usize, base: usize) -> usize {
    ((byte_len * 8) as f64 / (base as f64).log2()).ceil() as usize
}

fn to_base(bytes: &[u8], alphabet: &[char]) -> String {
    let base = alphabet.len() as u64;
    let count = digit_count(bytes.len(), alphabet.len());

    let mut dividend: Vec<u64> = bytes.iter().map(|&b| u64::from(b)).collect();
    let mut digits = Vec::with_capacity(count);

    for _ in 0..count {
        let mut quotient = Vec::with_capacity(dividend.len());
        let mut remainder = 0u64;
        for &d in &dividend {
            let x = (remainder << 8) + d;
            let q = x / base;
            remainder = x % base;
            if !quotient.is_empty() || q > 0 {
                quotient.push(q);
            }
        }
        digits.push(remainder as usize);
        dividend = quotient;
    }

    digits.iter().rev().map(|&d| alphabet[d]).collect()
}
