//! Block representation helpers.

/// Size of an AES block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// AES block of 16 bytes.
pub type Block = [u8; BLOCK_SIZE];

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Copies a slice into a block, rejecting anything that is not exactly 16 bytes.
pub fn block_from_slice(bytes: &[u8]) -> crate::Result<Block> {
    bytes
        .try_into()
        .map_err(|_| crate::Error::InvalidBlockLength {
            expected: BLOCK_SIZE,
            actual: bytes.len(),
        })
}

/// Number of bit positions in which two blocks differ.
pub fn hamming_distance(a: &Block, b: &Block) -> u32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x ^ y).count_ones()).sum()
}
