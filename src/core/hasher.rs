//! Hash strategies for the derivation pipeline.
//!
//! Every algorithm is exposed through the [`HashFunction`] capability:
//! consume a key and a message, produce fixed-size digest bytes. Plain
//! digests hash `key || message`; HMAC variants use the key as MAC key.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use md5::Md5;
use ripemd::Ripemd160;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use crate::error::PwmError;

/// Capability implemented by every supported hash construction.
pub trait HashFunction: Send + Sync {
    /// Hash `message` under `key`.
    fn hash(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>, PwmError>;
}

/// Plain digest over `key || message`.
pub struct Unkeyed<D>(PhantomData<fn() -> D>);

impl<D: Digest> HashFunction for Unkeyed<D> {
    fn hash(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>, PwmError> {
        let mut hasher = D::new();
        Digest::update(&mut hasher, key);
        Digest::update(&mut hasher, message);
        Ok(Digest::finalize(hasher).to_vec())
    }
}

/// MAC with `key` as the secret key.
pub struct Keyed<M>(PhantomData<fn() -> M>);

impl<M: Mac + hmac::digest::KeyInit> HashFunction for Keyed<M> {
    fn hash(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>, PwmError> {
        let mut mac = <M as hmac::digest::KeyInit>::new_from_slice(key)?;
        Mac::update(&mut mac, message);
        Ok(Mac::finalize(mac).into_bytes().to_vec())
    }
}

/// BLAKE3 keyed hash. The variable-length key is first hashed down to the
/// 32-byte key BLAKE3 requires.
pub struct Blake3Keyed;

impl HashFunction for Blake3Keyed {
    fn hash(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>, PwmError> {
        let derived_key = blake3::hash(key);
        Ok(blake3::keyed_hash(derived_key.as_bytes(), message).as_bytes().to_vec())
    }
}

static MD5: Unkeyed<Md5> = Unkeyed(PhantomData);
static SHA1: Unkeyed<Sha1> = Unkeyed(PhantomData);
static SHA256: Unkeyed<Sha256> = Unkeyed(PhantomData);
static SHA512: Unkeyed<Sha512> = Unkeyed(PhantomData);
static RIPEMD160: Unkeyed<Ripemd160> = Unkeyed(PhantomData);
static HMAC_MD5: Keyed<Hmac<Md5>> = Keyed(PhantomData);
static HMAC_SHA1: Keyed<Hmac<Sha1>> = Keyed(PhantomData);
static HMAC_SHA256: Keyed<Hmac<Sha256>> = Keyed(PhantomData);
static HMAC_SHA512: Keyed<Hmac<Sha512>> = Keyed(PhantomData);
static HMAC_RIPEMD160: Keyed<Hmac<Ripemd160>> = Keyed(PhantomData);
static BLAKE3: Blake3Keyed = Blake3Keyed;

/// Supported hash algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    #[default]
    Md5,
    Sha1,
    Sha256,
    Sha512,
    Ripemd160,
    Blake3,
    HmacMd5,
    HmacSha1,
    HmacSha256,
    HmacSha512,
    HmacRipemd160,
}

impl HashAlgorithm {
    /// All algorithms, in id order.
    pub const ALL: [HashAlgorithm; 11] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
        HashAlgorithm::Ripemd160,
        HashAlgorithm::Blake3,
        HashAlgorithm::HmacMd5,
        HashAlgorithm::HmacSha1,
        HashAlgorithm::HmacSha256,
        HashAlgorithm::HmacSha512,
        HashAlgorithm::HmacRipemd160,
    ];

    /// Config id of the algorithm.
    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Ripemd160 => "ripemd160",
            HashAlgorithm::Blake3 => "blake3",
            HashAlgorithm::HmacMd5 => "hmac-md5",
            HashAlgorithm::HmacSha1 => "hmac-sha1",
            HashAlgorithm::HmacSha256 => "hmac-sha256",
            HashAlgorithm::HmacSha512 => "hmac-sha512",
            HashAlgorithm::HmacRipemd160 => "hmac-ripemd160",
        }
    }

    /// Digest size in bytes.
    pub fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Md5 | HashAlgorithm::HmacMd5 => 16,
            HashAlgorithm::Sha1
            | HashAlgorithm::HmacSha1
            | HashAlgorithm::Ripemd160
            | HashAlgorithm::HmacRipemd160 => 20,
            HashAlgorithm::Sha256 | HashAlgorithm::HmacSha256 | HashAlgorithm::Blake3 => 32,
            HashAlgorithm::Sha512 | HashAlgorithm::HmacSha512 => 64,
        }
    }

    /// The strategy implementing this algorithm.
    pub fn function(self) -> &'static dyn HashFunction {
        match self {
            HashAlgorithm::Md5 => &MD5,
            HashAlgorithm::Sha1 => &SHA1,
            HashAlgorithm::Sha256 => &SHA256,
            HashAlgorithm::Sha512 => &SHA512,
            HashAlgorithm::Ripemd160 => &RIPEMD160,
            HashAlgorithm::Blake3 => &BLAKE3,
            HashAlgorithm::HmacMd5 => &HMAC_MD5,
            HashAlgorithm::HmacSha1 => &HMAC_SHA1,
            HashAlgorithm::HmacSha256 => &HMAC_SHA256,
            HashAlgorithm::HmacSha512 => &HMAC_SHA512,
            HashAlgorithm::HmacRipemd160 => &HMAC_RIPEMD160,
        }
    }

    /// Hash `message` under `key`, then feed the digest back `iterations - 1` times.
    ///
    /// # Arguments
    ///
    /// * `key` - Master secret bytes
    /// * `message` - Context bytes for the first round
    /// * `iterations` - Total rounds, at least 1
    pub fn digest(self, key: &[u8], message: &[u8], iterations: u32) -> Result<Vec<u8>, PwmError> {
        if iterations == 0 {
            return Err(PwmError::InvalidIterations);
        }
        let function = self.function();
        let mut digest = function.hash(key, message)?;
        for _ in 1..iterations {
            digest = function.hash(key, &digest)?;
        }
        Ok(digest)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = PwmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_ascii_lowercase().replace('_', "-");
        HashAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == id)
            .ok_or_else(|| PwmError::UnknownAlgorithm(s.to_string()))
    }
}
