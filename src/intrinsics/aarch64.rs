//! ARM NEON + Crypto Extensions optimized implementation.

#![allow(unsafe_code)]

#[cfg(target_arch = "aarch64")]
use core::arch::aarch64::*;

/// ARM Crypto round function.
///
/// AESE adds the round key before SubBytes, so the keyed round is built from
/// a zero-key AESE + AESMC pair with the round key XORed in afterwards.
#[target_feature(enable = "neon,aes")]
unsafe fn aes_round_impl(block: &[u8; 16], round_key: &[u8; 16]) -> [u8; 16] {
    let state = vld1q_u8(block.as_ptr());
    let rk = vld1q_u8(round_key.as_ptr());

    let mixed = vaesmcq_u8(vaeseq_u8(state, vdupq_n_u8(0)));
    let result = veorq_u8(mixed, rk);

    let mut output = [0u8; 16];
    vst1q_u8(output.as_mut_ptr(), result);
    output
}

/// Safe wrapper around the ARM round implementation.
#[inline]
pub fn aes_round(block: &[u8; 16], round_key: &[u8; 16]) -> [u8; 16] {
    unsafe { aes_round_impl(block, round_key) }
}

/// ARM Crypto full-block encryption.
///
/// The AESE pre-addition folds the first ten round keys into the AESE calls;
/// the last round key is XORed in after the final (MixColumns-free) round.
#[target_feature(enable = "neon,aes")]
unsafe fn aes_encrypt_impl(round_keys: &[[u8; 16]; 11], block: &[u8; 16]) -> [u8; 16] {
    let mut state = vld1q_u8(block.as_ptr());

    for rk in &round_keys[..9] {
        state = vaesmcq_u8(vaeseq_u8(state, vld1q_u8(rk.as_ptr())));
    }
    state = vaeseq_u8(state, vld1q_u8(round_keys[9].as_ptr()));
    state = veorq_u8(state, vld1q_u8(round_keys[10].as_ptr()));

    let mut output = [0u8; 16];
    vst1q_u8(output.as_mut_ptr(), state);
    output
}

/// Safe wrapper around the ARM encryption implementation.
#[inline]
pub fn aes_encrypt(round_keys: &[[u8; 16]; 11], block: &[u8; 16]) -> [u8; 16] {
    unsafe { aes_encrypt_impl(round_keys, block) }
}
