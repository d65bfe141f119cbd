//! The 4×4 byte state matrix and the round transformations acting on it.

use crate::block::Block;
use crate::gf256::gf_mul;
use crate::sbox::{inv_sbox, sbox};

const MIX: [[u8; 4]; 4] = [
    [0x02, 0x03, 0x01, 0x01],
    [0x01, 0x02, 0x03, 0x01],
    [0x01, 0x01, 0x02, 0x03],
    [0x03, 0x01, 0x01, 0x02],
];

const INV_MIX: [[u8; 4]; 4] = [
    [0x0e, 0x0b, 0x0d, 0x09],
    [0x09, 0x0e, 0x0b, 0x0d],
    [0x0d, 0x09, 0x0e, 0x0b],
    [0x0b, 0x0d, 0x09, 0x0e],
];

/// Cipher state indexed `[row][col]`.
///
/// Wire byte `4 * col + row` lives at `state.0[row][col]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct State(pub [[u8; 4]; 4]);

impl State {
    /// Loads a block column by column.
    pub fn from_block(block: &Block) -> Self {
        let mut state = [[0u8; 4]; 4];
        for (col, chunk) in block.chunks_exact(4).enumerate() {
            for (row, &byte) in chunk.iter().enumerate() {
                state[row][col] = byte;
            }
        }
        Self(state)
    }

    /// Writes the state back out column by column.
    pub fn to_block(&self) -> Block {
        let mut block = [0u8; 16];
        for (col, chunk) in block.chunks_exact_mut(4).enumerate() {
            for (row, byte) in chunk.iter_mut().enumerate() {
                *byte = self.0[row][col];
            }
        }
        block
    }

    /// Applies SubBytes in place.
    #[inline]
    pub fn sub_bytes(&mut self) {
        for byte in self.0.iter_mut().flatten() {
            *byte = sbox(*byte);
        }
    }

    /// Applies the inverse SubBytes transformation.
    #[inline]
    pub fn inv_sub_bytes(&mut self) {
        for byte in self.0.iter_mut().flatten() {
            *byte = inv_sbox(*byte);
        }
    }

    /// Rotates row `r` left by `r` positions; row 0 is untouched.
    #[inline]
    pub fn shift_rows(&mut self) {
        for r in 1..4 {
            rotate_row_left(&mut self.0[r], r);
        }
    }

    /// Rotates row `r` right by `r` positions.
    #[inline]
    pub fn inv_shift_rows(&mut self) {
        for r in 1..4 {
            rotate_row_right(&mut self.0[r], r);
        }
    }

    /// MixColumns over all four columns.
    #[inline]
    pub fn mix_columns(&mut self) {
        self.multiply_columns(&MIX);
    }

    /// Inverse MixColumns over all four columns.
    #[inline]
    pub fn inv_mix_columns(&mut self) {
        self.multiply_columns(&INV_MIX);
    }

    /// XORs a round key, given in wire order, into the state.
    #[inline]
    pub fn add_round_key(&mut self, round_key: &Block) {
        for (col, chunk) in round_key.chunks_exact(4).enumerate() {
            for (row, &k) in chunk.iter().enumerate() {
                self.0[row][col] ^= k;
            }
        }
    }

    fn column(&self, col: usize) -> [u8; 4] {
        [self.0[0][col], self.0[1][col], self.0[2][col], self.0[3][col]]
    }

    /// Replaces each column `a` with `matrix · a` over GF(2^8).
    fn multiply_columns(&mut self, matrix: &[[u8; 4]; 4]) {
        for col in 0..4 {
            let column = self.column(col);
            for (row, coeffs) in matrix.iter().enumerate() {
                self.0[row][col] = coeffs
                    .iter()
                    .zip(column.iter())
                    .fold(0u8, |acc, (&c, &a)| acc ^ gf_mul(c, a));
            }
        }
    }
}

/// Left-rotates a row by `shift` (0..=3) using a fixed 3-byte temporary.
#[inline]
pub fn rotate_row_left(row: &mut [u8; 4], shift: usize) {
    debug_assert!(shift < 4);
    let mut tmp = [0u8; 3];
    tmp[..shift].copy_from_slice(&row[..shift]);
    row.copy_within(shift.., 0);
    row[4 - shift..].copy_from_slice(&tmp[..shift]);
}

/// Right-rotates a row by `shift` (0..=3) using a fixed 3-byte temporary.
#[inline]
pub fn rotate_row_right(row: &mut [u8; 4], shift: usize) {
    debug_assert!(shift < 4);
    let mut tmp = [0u8; 3];
    tmp[..shift].copy_from_slice(&row[4 - shift..]);
    row.copy_within(..4 - shift, shift);
    row[..shift].copy_from_slice(&tmp[..shift]);
}
