//! Key types for AES-256.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::Block;
use crate::error::{Error, Result};

/// Key length in bytes.
pub const KEY_SIZE: usize = 32;
/// Number of 32-bit words in the expanded key schedule.
pub const SCHEDULE_WORDS: usize = 60;
/// Number of round keys (14 rounds plus the initial whitening key).
pub const ROUND_KEY_COUNT: usize = 15;

/// AES-256 key wrapper. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Aes256Key(pub [u8; KEY_SIZE]);

impl From<[u8; KEY_SIZE]> for Aes256Key {
    fn from(value: [u8; KEY_SIZE]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Aes256Key {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let key: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| Error::InvalidKeyLength {
            expected: KEY_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self(key))
    }
}

impl fmt::Debug for Aes256Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Aes256Key(..)")
    }
}

/// The 60 big-endian words produced by key expansion.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeySchedule(pub [u32; SCHEDULE_WORDS]);

impl KeySchedule {
    /// All schedule words, `w[0]..w[59]`.
    #[inline]
    pub fn words(&self) -> &[u32; SCHEDULE_WORDS] {
        &self.0
    }

    /// The four words that make up round key `round`.
    #[inline]
    pub fn round_words(&self, round: usize) -> &[u32] {
        &self.0[round * 4..round * 4 + 4]
    }
}

impl fmt::Debug for KeySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeySchedule(..)")
    }
}

/// Expanded round keys for AES-256, each laid out in wire (column-major) order.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys(pub [Block; ROUND_KEY_COUNT]);

impl RoundKeys {
    /// Returns the round key at the requested index (0..=14).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.0[round]
    }

    /// Number of round keys held.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RoundKeys(..)")
    }
}
