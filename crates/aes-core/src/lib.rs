//! Reference AES-256 block cipher.
//!
//! This crate follows FIPS-197 for a 256-bit key and provides:
//! - The S-box, inverse S-box and round constants.
//! - GF(2^8) multiplication used by MixColumns.
//! - The 60-word key schedule and its 15 round keys.
//! - Single-block encryption and decryption, one-shot or with a cached schedule.
//!
//! Modes of operation and padding are left to callers, which hand this crate
//! one 16-byte block at a time. Table lookups index directly on secret data, so
//! the implementation is not side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod gf256;
mod key;
mod sbox;
mod state;

pub use crate::block::{block_from_slice, hamming_distance, xor_in_place, Block, BLOCK_SIZE};
pub use crate::cipher::{
    decrypt, decrypt_block, encrypt, encrypt_block, expand_key, expand_round_keys, round_keys,
    try_decrypt, try_encrypt, Aes256,
};
pub use crate::error::{Error, Result};
pub use crate::gf256::{gf_mul, xtime};
pub use crate::key::{
    Aes256Key, KeySchedule, RoundKeys, KEY_SIZE, ROUND_KEY_COUNT, SCHEDULE_WORDS,
};
pub use crate::sbox::{inv_sbox, sbox, INV_SBOX, RCON, SBOX};
pub use crate::state::{rotate_row_left, rotate_row_right, State};
