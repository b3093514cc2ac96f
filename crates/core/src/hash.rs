//! Field-fold hashing for the engine's hash indexes.
//!
//! Index keys are tuples of 32-bit fields (integers, or the 32-bit hash
//! of a fixed string). Each field is mixed into the accumulator with the
//! MurmurHash3 32-bit block step, and `finish` applies the finaliser.
//! All arithmetic is wrapping unsigned 32-bit, so the result is identical
//! on every platform and across runs.

use core::hash::{BuildHasherDefault, Hasher};

const SEED: u32 = 0xCAFE_BABE; // -889275714
const C1: u32 = 0xCC9E_2D51; // -862048943
const C2: u32 = 0x1B87_3593; // 461845907
const ROUND: u32 = 0xE654_6B64; // -430675100
const FIN1: u32 = 0x85EB_CA6B; // -2048144789
const FIN2: u32 = 0xC2B2_AE35; // -1028477387

/// A `Hasher` that folds 32-bit field writes with the MurmurHash3 block
/// step and finalises on `finish`.
///
/// Plug into hash containers via [`FieldFoldBuild`].
#[derive(Clone, Debug)]
pub struct FieldFold {
    h: u32,
}

/// `BuildHasher` for [`FieldFold`].
pub type FieldFoldBuild = BuildHasherDefault<FieldFold>;

impl Default for FieldFold {
    fn default() -> Self {
        Self { h: SEED }
    }
}

impl FieldFold {
    #[inline]
    fn mix(&mut self, field: u32) {
        let mut k = field.wrapping_mul(C1);
        k = k.rotate_left(15);
        k = k.wrapping_mul(C2);
        let h = (self.h ^ k).rotate_left(13);
        self.h = h.wrapping_mul(5).wrapping_add(ROUND);
    }

    #[inline]
    fn fold64(&mut self, v: u64) {
        self.mix(((v >> 32) ^ v) as u32);
    }
}

impl Hasher for FieldFold {
    fn finish(&self) -> u64 {
        let mut h = self.h ^ 2;
        h ^= h >> 16;
        h = h.wrapping_mul(FIN1);
        h ^= h >> 13;
        h = h.wrapping_mul(FIN2);
        h ^= h >> 16;
        h as u64
    }

    fn write(&mut self, bytes: &[u8]) {
        // Generic fallback: fold little-endian 32-bit words, zero-padding
        // the tail.
        let mut chunks = bytes.chunks_exact(4);
        for chunk in &mut chunks {
            let mut word = [0u8; 4];
            word.copy_from_slice(chunk);
            self.mix(u32::from_le_bytes(word));
        }
        let rest = chunks.remainder();
        if !rest.is_empty() {
            let mut word = [0u8; 4];
            word[..rest.len()].copy_from_slice(rest);
            self.mix(u32::from_le_bytes(word));
        }
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.mix(i as u32);
    }

    #[inline]
    fn write_i8(&mut self, i: i8) {
        self.mix(i as u32);
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.mix(i as u32);
    }

    #[inline]
    fn write_i16(&mut self, i: i16) {
        self.mix(i as u32);
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.mix(i);
    }

    #[inline]
    fn write_i32(&mut self, i: i32) {
        self.mix(i as u32);
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.fold64(i);
    }

    #[inline]
    fn write_i64(&mut self, i: i64) {
        self.fold64(i as u64);
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.fold64(i as u64);
    }

    #[inline]
    fn write_isize(&mut self, i: isize) {
        self.fold64(i as u64);
    }
}

/// Hashes a value through a fresh [`FieldFold`], for tests and debugging.
pub fn fold32<T: core::hash::Hash>(value: &T) -> u32 {
    let mut hasher = FieldFold::default();
    value.hash(&mut hasher);
    hasher.finish() as u32
}
