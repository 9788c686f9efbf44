//! x86-64 AES-NI optimized implementation.

#![allow(unsafe_code)]

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

/// x86-64 AES-NI round function.
///
/// The aesenc instruction computes exactly one full round including the
/// round-key addition, so the whole operation is a single instruction.
#[target_feature(enable = "aes")]
unsafe fn aes_round_impl(block: &[u8; 16], round_key: &[u8; 16]) -> [u8; 16] {
    let state = _mm_loadu_si128(block.as_ptr() as *const __m128i);
    let rk = _mm_loadu_si128(round_key.as_ptr() as *const __m128i);

    let result = _mm_aesenc_si128(state, rk);

    let mut output = [0u8; 16];
    _mm_storeu_si128(output.as_mut_ptr() as *mut __m128i, result);
    output
}

/// Safe wrapper around the x86-64 round implementation.
#[inline]
pub fn aes_round(block: &[u8; 16], round_key: &[u8; 16]) -> [u8; 16] {
    unsafe { aes_round_impl(block, round_key) }
}

/// x86-64 AES-NI full-block encryption.
#[target_feature(enable = "aes")]
unsafe fn aes_encrypt_impl(round_keys: &[[u8; 16]; 11], block: &[u8; 16]) -> [u8; 16] {
    let mut state = _mm_loadu_si128(block.as_ptr() as *const __m128i);
    state = _mm_xor_si128(
        state,
        _mm_loadu_si128(round_keys[0].as_ptr() as *const __m128i),
    );

    for rk in &round_keys[1..10] {
        state = _mm_aesenc_si128(state, _mm_loadu_si128(rk.as_ptr() as *const __m128i));
    }
    state = _mm_aesenclast_si128(
        state,
        _mm_loadu_si128(round_keys[10].as_ptr() as *const __m128i),
    );

    let mut output = [0u8; 16];
    _mm_storeu_si128(output.as_mut_ptr() as *mut __m128i, state);
    output
}

/// Safe wrapper around the x86-64 encryption implementation.
#[inline]
pub fn aes_encrypt(round_keys: &[[u8; 16]; 11], block: &[u8; 16]) -> [u8; 16] {
    unsafe { aes_encrypt_impl(round_keys, block) }
}
