//! # LeMac - Fast AES-Based Message Authentication
//!
//! This crate implements the LeMac family of message authentication codes:
//! a keyed, nonce-taking 128-bit MAC built from the AES round function, plus
//! two parallel variants (LeMac-X2, LeMac-X4) that process two or four lanes
//! simultaneously to exploit wide SIMD AES pipelines.
//!
//! ## Features
//!
//! - **High Performance**: routes every AES round through hardware AES
//!   instructions (x86-64 AES-NI, ARMv8 Crypto Extensions) when available
//! - **One-Shot**: a message is authenticated in a single call; there is no
//!   streaming state to manage
//! - **Shareable Contexts**: key expansion happens once; the resulting
//!   context is immutable and can serve any number of calls, including from
//!   multiple threads
//! - **No-std Compatible**: no allocation, no I/O, no error paths
//!
//! ## Usage
//!
//! ```rust
//! use lemac::LeMac;
//!
//! let key = [0u8; 16];
//! let nonce = [0u8; 16];
//!
//! let mac = LeMac::new(&key);
//! let tag = mac.mac(b"a short message", &nonce);
//! assert!(mac.verify(b"a short message", &nonce, &tag));
//! ```
//!
//! The three variants share one key/nonce/tag geometry but are distinct MAC
//! families: the lane count enters the key schedule as a domain separator,
//! so `LeMac`, `LeMacX2` and `LeMacX4` tags over identical inputs are
//! unrelated.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

mod aes;
mod core;
mod intrinsics;
mod utils;

#[cfg(test)]
mod tests;

macro_rules! lemac_variant {
    ($name:ident, $degree:literal, $doc:expr) => {
        #[doc = $doc]
        ///
        /// Construction is the expensive step; reuse one value for as many
        /// `mac` calls as needed. All methods take `&self` and the expanded
        /// key material is wiped on drop.
        #[derive(Clone)]
        pub struct $name {
            ctx: crate::core::Context<$degree>,
        }

        impl $name {
            /// The size in bytes of a key.
            pub const KEY_SIZE: usize = 16;

            /// The size in bytes of a nonce.
            pub const NONCE_SIZE: usize = 16;

            /// The size in bytes of an authentication tag.
            pub const TAG_SIZE: usize = 16;

            /// The number of AES lanes processed in parallel.
            pub const PARALLELISM: usize = $degree;

            /// Message absorption granularity in bytes. Informational;
            /// inputs of any length are accepted.
            pub const BLOCK_SIZE: usize = 64 * $degree;

            /// Expands `key` into an immutable context.
            pub fn new(key: &[u8; 16]) -> Self {
                Self {
                    ctx: crate::core::Context::new(key),
                }
            }

            /// Computes the 128-bit tag of `msg` under `nonce`.
            ///
            /// Deterministic in `(key, nonce, msg)`; never mutates the
            /// context.
            pub fn mac(&self, msg: &[u8], nonce: &[u8; 16]) -> [u8; 16] {
                self.ctx.mac(msg, nonce)
            }

            /// Recomputes the tag of `msg` under `nonce` and compares it
            /// against `tag` in constant time.
            pub fn verify(&self, msg: &[u8], nonce: &[u8; 16], tag: &[u8; 16]) -> bool {
                crate::utils::ct_eq(&self.ctx.mac(msg, nonce), tag)
            }
        }
    };
}

lemac_variant!(
    LeMac,
    1,
    "LeMac with a single AES lane: 64-byte absorption blocks."
);
lemac_variant!(
    LeMacX2,
    2,
    "LeMac-X2 with two parallel AES lanes: 128-byte absorption blocks."
);
lemac_variant!(
    LeMacX4,
    4,
    "LeMac-X4 with four parallel AES lanes: 256-byte absorption blocks."
);
