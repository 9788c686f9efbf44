//! Platform-specific intrinsics for AES operations.

/// One full AES round: AddRoundKey(MixColumns(ShiftRows(SubBytes(x))), k).
///
/// This is always the full round including MixColumns, never the final-round
/// AES variant. The implementation is selected at compile time based on the
/// target architecture and available features.
#[inline]
pub fn aes_round(block: &[u8; 16], round_key: &[u8; 16]) -> [u8; 16] {
    #[cfg(all(
        target_arch = "aarch64",
        target_feature = "neon",
        target_feature = "aes"
    ))]
    {
        aarch64::aes_round(block, round_key)
    }
    #[cfg(all(target_arch = "x86_64", target_feature = "aes"))]
    {
        x86_64::aes_round(block, round_key)
    }
    #[cfg(not(any(
        all(
            target_arch = "aarch64",
            target_feature = "neon",
            target_feature = "aes"
        ),
        all(target_arch = "x86_64", target_feature = "aes")
    )))]
    {
        fallback::aes_round(block, round_key)
    }
}

/// Standard AES-128 encryption of one block under an expanded schedule:
/// ten rounds, the last one without MixColumns.
#[inline]
pub fn aes_encrypt(round_keys: &[[u8; 16]; 11], block: &[u8; 16]) -> [u8; 16] {
    #[cfg(all(
        target_arch = "aarch64",
        target_feature = "neon",
        target_feature = "aes"
    ))]
    {
        aarch64::aes_encrypt(round_keys, block)
    }
    #[cfg(all(target_arch = "x86_64", target_feature = "aes"))]
    {
        x86_64::aes_encrypt(round_keys, block)
    }
    #[cfg(not(any(
        all(
            target_arch = "aarch64",
            target_feature = "neon",
            target_feature = "aes"
        ),
        all(target_arch = "x86_64", target_feature = "aes")
    )))]
    {
        fallback::aes_encrypt(round_keys, block)
    }
}

#[cfg(all(
    target_arch = "aarch64",
    target_feature = "neon",
    target_feature = "aes"
))]
mod aarch64;

#[cfg(all(target_arch = "x86_64", target_feature = "aes"))]
mod x86_64;

mod fallback;
