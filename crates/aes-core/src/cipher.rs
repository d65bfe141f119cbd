//! AES-256 key schedule and block encryption/decryption.

use crate::block::{block_from_slice, Block};
use crate::error::Result;
use crate::key::{Aes256Key, KeySchedule, RoundKeys, ROUND_KEY_COUNT, SCHEDULE_WORDS};
use crate::sbox::{sbox, RCON};
use crate::state::State;

/// Words in the cipher key (`Nk`).
const NK: usize = 8;
/// Number of rounds (`Nr`).
const ROUNDS: usize = 14;

fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

fn sub_word(word: u32) -> u32 {
    let [b0, b1, b2, b3] = word.to_be_bytes();
    u32::from_be_bytes([sbox(b0), sbox(b1), sbox(b2), sbox(b3)])
}

/// Expands a 256-bit key into the 60-word schedule.
pub fn expand_key(key: &Aes256Key) -> KeySchedule {
    let mut w = [0u32; SCHEDULE_WORDS];
    for (word, chunk) in w.iter_mut().zip(key.0.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for i in NK..SCHEDULE_WORDS {
        let mut temp = w[i - 1];
        if i % NK == 0 {
            temp = sub_word(rot_word(temp)) ^ RCON[i / NK];
        } else if i % NK == 4 {
            temp = sub_word(temp);
        }
        w[i] = w[i - NK] ^ temp;
    }

    KeySchedule(w)
}

/// Reshapes the schedule into 15 round keys in wire order.
///
/// Byte `4 * col + row` of round key `r` is byte `row` (big-endian) of
/// `w[4r + col]`, which `State::add_round_key` lands on `state[row][col]`.
pub fn round_keys(schedule: &KeySchedule) -> RoundKeys {
    let mut round_keys = [[0u8; 16]; ROUND_KEY_COUNT];
    for (round, rk) in round_keys.iter_mut().enumerate() {
        for (col, &word) in schedule.round_words(round).iter().enumerate() {
            rk[col * 4..col * 4 + 4].copy_from_slice(&word.to_be_bytes());
        }
    }
    RoundKeys(round_keys)
}

/// Expands a key straight into round keys.
pub fn expand_round_keys(key: &Aes256Key) -> RoundKeys {
    round_keys(&expand_key(key))
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = State::from_block(block);

    state.add_round_key(round_keys.get(0));

    for round in 1..ROUNDS {
        state.sub_bytes();
        state.shift_rows();
        state.mix_columns();
        state.add_round_key(round_keys.get(round));
    }

    state.sub_bytes();
    state.shift_rows();
    state.add_round_key(round_keys.get(ROUNDS));

    state.to_block()
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = State::from_block(block);

    state.add_round_key(round_keys.get(ROUNDS));
    for round in (1..ROUNDS).rev() {
        state.inv_shift_rows();
        state.inv_sub_bytes();
        state.add_round_key(round_keys.get(round));
        state.inv_mix_columns();
    }
    state.inv_shift_rows();
    state.inv_sub_bytes();
    state.add_round_key(round_keys.get(0));

    state.to_block()
}

/// Encrypts one block under `key`, deriving the schedule for this call only.
pub fn encrypt(plaintext: &Block, key: &[u8; 32]) -> Block {
    let key = Aes256Key::from(*key);
    encrypt_block(plaintext, &expand_round_keys(&key))
}

/// Decrypts one block under `key`, deriving the schedule for this call only.
pub fn decrypt(ciphertext: &Block, key: &[u8; 32]) -> Block {
    let key = Aes256Key::from(*key);
    decrypt_block(ciphertext, &expand_round_keys(&key))
}

/// Length-checked form of [`encrypt`] for untyped buffers.
pub fn try_encrypt(plaintext: &[u8], key: &[u8]) -> Result<Block> {
    let key = Aes256Key::try_from(key)?;
    let block = block_from_slice(plaintext)?;
    Ok(encrypt_block(&block, &expand_round_keys(&key)))
}

/// Length-checked form of [`decrypt`] for untyped buffers.
pub fn try_decrypt(ciphertext: &[u8], key: &[u8]) -> Result<Block> {
    let key = Aes256Key::try_from(key)?;
    let block = block_from_slice(ciphertext)?;
    Ok(decrypt_block(&block, &expand_round_keys(&key)))
}

/// AES-256 cipher holding an expanded schedule for reuse across many blocks.
#[derive(Clone, Debug)]
pub struct Aes256 {
    round_keys: RoundKeys,
}

impl Aes256 {
    /// Expands `key` once.
    pub fn new(key: &Aes256Key) -> Self {
        Self {
            round_keys: expand_round_keys(key),
        }
    }

    /// Builds a cipher from an untyped key buffer.
    pub fn from_slice(key: &[u8]) -> Result<Self> {
        Ok(Self::new(&Aes256Key::try_from(key)?))
    }

    /// Round keys in use.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// Encrypts one block.
    #[inline]
    pub fn encrypt_block(&self, block: &Block) -> Block {
        encrypt_block(block, &self.round_keys)
    }

    /// Decrypts one block.
    #[inline]
    pub fn decrypt_block(&self, block: &Block) -> Block {
        decrypt_block(block, &self.round_keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::hamming_distance;
    use crate::Error;
    use rand::{Rng, RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn unhex<const N: usize>(s: &str) -> [u8; N] {
        hex::decode(s).unwrap().try_into().unwrap()
    }

    // FIPS-197 appendix C.3.
    const FIPS_KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
    const FIPS_PLAIN: &str = "00112233445566778899aabbccddeeff";
    const FIPS_CIPHER: &str = "8ea2b7ca516745bfeafc49904b496089";

    // NIST SP 800-38A F.1.5 (ECB-AES256.Encrypt), used block by block.
    const SP800_KEY: &str = "603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4";
    const SP800_BLOCKS: [(&str, &str); 4] = [
        (
            "6bc1bee22e409f96e93d7e117393172a",
            "f3eed1bdb5d2a03c064b5a7e3db181f8",
        ),
        (
            "ae2d8a571e03ac9c9eb76fac45af8e51",
            "591ccb10d410ed26dc5ba74a31362870",
        ),
        (
            "30c81c46a35ce411e5fbc1191a0a52ef",
            "b6ed21b99ca6f4f9f153e7b1beafed1d",
        ),
        (
            "f69f2445df4f9b17ad2b417be66c3710",
            "23304b7a39f9f3ff067d8d8f9e24ecc7",
        ),
    ];

    #[test]
    fn encrypt_matches_fips197_vector() {
        let ct = encrypt(&unhex(FIPS_PLAIN), &unhex(FIPS_KEY));
        assert_eq!(ct, unhex::<16>(FIPS_CIPHER));
    }

    #[test]
    fn decrypt_matches_fips197_vector() {
        let pt = decrypt(&unhex(FIPS_CIPHER), &unhex(FIPS_KEY));
        assert_eq!(pt, unhex::<16>(FIPS_PLAIN));
    }

    #[test]
    fn sp800_38a_ecb_vectors() {
        let key: [u8; 32] = unhex(SP800_KEY);
        for (plain, cipher) in SP800_BLOCKS {
            assert_eq!(encrypt(&unhex(plain), &key), unhex::<16>(cipher));
            assert_eq!(decrypt(&unhex(cipher), &key), unhex::<16>(plain));
        }
    }

    #[test]
    fn all_zero_key_and_block() {
        let ct = encrypt(&[0u8; 16], &[0u8; 32]);
        assert_eq!(hex::encode(ct), "dc95c078a2408989ad48a21492842087");
        assert_eq!(decrypt(&ct, &[0u8; 32]), [0u8; 16]);
    }

    #[test]
    fn key_expansion_matches_fips197_appendix_a3() {
        let schedule = expand_key(&Aes256Key::from(unhex::<32>(SP800_KEY)));
        let w = schedule.words();
        assert_eq!(w.len(), 60);
        assert_eq!(w[0], 0x603deb10);
        assert_eq!(w[7], 0x0914dff4);
        assert_eq!(w[8], 0x9ba35411);
        assert_eq!(w[9], 0x8e6925af);
        assert_eq!(w[10], 0xa51a8b5f);
        assert_eq!(w[11], 0x2067fcde);
        assert_eq!(w[12], 0xa8b09c1a);
        assert_eq!(w[59], 0x706c631e);
    }

    #[test]
    fn first_two_round_keys_are_the_raw_key() {
        let key: [u8; 32] = unhex(FIPS_KEY);
        let rks = expand_round_keys(&Aes256Key::from(key));
        assert_eq!(rks.len(), 15);
        assert_eq!(rks.get(0), &key[..16]);
        assert_eq!(rks.get(1), &key[16..]);
        assert_eq!(
            hex::encode(rks.get(14)),
            "24fc79ccbf0979e9371ac23c6d68de36"
        );
    }

    #[test]
    fn slice_entry_points_validate_lengths() {
        let key: [u8; 32] = unhex(FIPS_KEY);
        let plain: [u8; 16] = unhex(FIPS_PLAIN);
        assert_eq!(
            try_encrypt(&plain, &key).unwrap(),
            unhex::<16>(FIPS_CIPHER)
        );
        assert_eq!(
            try_decrypt(&unhex::<16>(FIPS_CIPHER), &key).unwrap(),
            plain
        );
        assert_eq!(
            try_encrypt(&plain, &key[..16]),
            Err(Error::InvalidKeyLength {
                expected: 32,
                actual: 16
            })
        );
        assert_eq!(
            try_decrypt(&plain[..15], &key),
            Err(Error::InvalidBlockLength {
                expected: 16,
                actual: 15
            })
        );
        assert!(Aes256::from_slice(&[0u8; 33]).is_err());
    }

    #[test]
    fn cached_schedule_matches_one_shot_calls() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for _ in 0..32 {
            let mut key = [0u8; 32];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key);
            rng.fill_bytes(&mut block);
            let cipher = Aes256::new(&Aes256Key::from(key));
            assert_eq!(cipher.encrypt_block(&block), encrypt(&block, &key));
            assert_eq!(cipher.decrypt_block(&block), decrypt(&block, &key));
        }
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = ChaCha20Rng::from_seed([8u8; 32]);
        for _ in 0..100 {
            let mut key = [0u8; 32];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key);
            rng.fill_bytes(&mut block);
            assert_eq!(decrypt(&encrypt(&block, &key), &key), block);
            assert_eq!(encrypt(&decrypt(&block, &key), &key), block);
        }
    }

    #[test]
    fn deterministic() {
        let key: [u8; 32] = unhex(SP800_KEY);
        let block = [0x3cu8; 16];
        let first = encrypt(&block, &key);
        for _ in 0..10 {
            assert_eq!(encrypt(&block, &key), first);
        }
    }

    #[test]
    fn distinct_keys_give_distinct_ciphertexts() {
        let mut rng = ChaCha20Rng::from_seed([9u8; 32]);
        let block = [0u8; 16];
        let mut k1 = [0u8; 32];
        for _ in 0..32 {
            rng.fill_bytes(&mut k1);
            let mut k2 = k1;
            k2[rng.gen_range(0..32usize)] ^= 1u8 << rng.gen_range(0..8u32);
            assert_ne!(encrypt(&block, &k1), encrypt(&block, &k2));
        }
    }

    #[test]
    fn single_bit_flips_avalanche() {
        let mut rng = ChaCha20Rng::from_seed([10u8; 32]);
        let samples = 64u32;
        let mut plain_flips = 0;
        let mut key_flips = 0;
        for _ in 0..samples {
            let mut key = [0u8; 32];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key);
            rng.fill_bytes(&mut block);
            let base = encrypt(&block, &key);

            let mut flipped_block = block;
            flipped_block[rng.gen_range(0..16usize)] ^= 1u8 << rng.gen_range(0..8u32);
            plain_flips += hamming_distance(&base, &encrypt(&flipped_block, &key));

            let mut flipped_key = key;
            flipped_key[rng.gen_range(0..32usize)] ^= 1u8 << rng.gen_range(0..8u32);
            key_flips += hamming_distance(&base, &encrypt(&block, &flipped_key));
        }
        for average in [plain_flips / samples, key_flips / samples] {
            assert!((32..=96).contains(&average), "average flips {average}");
        }
    }
}
