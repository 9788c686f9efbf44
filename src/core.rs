//! Core LeMac engine, generic over the parallelism degree.
//!
//! The degree `D` fixes the data-path width: every state position holds `D`
//! independent AES lanes and one absorption round consumes `64 * D` message
//! bytes. The degree also flows into the key schedule as a domain separator,
//! so the variants produce unrelated tags for identical inputs.

use crate::aes::AesKey;
use crate::intrinsics;
use crate::utils::xor_block;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// `D` independent 128-bit AES states, lane 0 at the lowest address.
#[derive(Clone, Copy, Zeroize)]
pub(crate) struct WideBlock<const D: usize>([[u8; 16]; D]);

impl<const D: usize> WideBlock<D> {
    const ZERO: Self = Self([[0u8; 16]; D]);

    /// Loads `16 * D` bytes, lanes in order.
    #[inline]
    fn from_bytes(bytes: &[u8]) -> Self {
        debug_assert_eq!(bytes.len(), 16 * D);
        let mut lanes = [[0u8; 16]; D];
        for (lane, chunk) in lanes.iter_mut().zip(bytes.chunks_exact(16)) {
            lane.copy_from_slice(chunk);
        }
        Self(lanes)
    }

    /// Lanewise XOR.
    #[inline]
    fn xor(&self, other: &Self) -> Self {
        let mut lanes = [[0u8; 16]; D];
        for i in 0..D {
            lanes[i] = xor_block(&self.0[i], &other.0[i]);
        }
        Self(lanes)
    }

    /// One full AES round per lane, including MixColumns.
    #[inline]
    fn aes_round(&self, round_key: &Self) -> Self {
        let mut lanes = [[0u8; 16]; D];
        for i in 0..D {
            lanes[i] = intrinsics::aes_round(&self.0[i], &round_key.0[i]);
        }
        Self(lanes)
    }

    /// XOR-folds the lanes into a single 128-bit value.
    #[inline]
    fn fold_lanes(&self) -> [u8; 16] {
        let mut out = self.0[0];
        for lane in &self.0[1..] {
            out = xor_block(&out, lane);
        }
        out
    }
}

/// Absorption automaton: nine state blocks plus the four-block rolling
/// register feeding state position 3.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct State<const D: usize> {
    s: [WideBlock<D>; 9],
    rr: WideBlock<D>,
    r0: WideBlock<D>,
    r1: WideBlock<D>,
    r2: WideBlock<D>,
}

impl<const D: usize> State<D> {
    fn new(init_state: &[WideBlock<D>; 9]) -> Self {
        Self {
            s: *init_state,
            rr: WideBlock::ZERO,
            r0: WideBlock::ZERO,
            r1: WideBlock::ZERO,
            r2: WideBlock::ZERO,
        }
    }

    /// Absorbs one superblock of four message blocks.
    ///
    /// Every right-hand side must read pre-round values. The descending walk
    /// writes each position from a strictly older one, position 0 uses the
    /// snapshot of position 8 taken on entry, and the register rotates only
    /// after the state update so position 3 sees the old r1 and r2.
    #[inline]
    fn update(
        &mut self,
        m0: &WideBlock<D>,
        m1: &WideBlock<D>,
        m2: &WideBlock<D>,
        m3: &WideBlock<D>,
    ) {
        let t = self.s[8];

        self.s[8] = self.s[7].aes_round(m3);
        self.s[7] = self.s[6].aes_round(m1);
        self.s[6] = self.s[5].aes_round(m1);
        self.s[5] = self.s[4].aes_round(m0);
        self.s[4] = self.s[3].aes_round(m0);
        self.s[3] = self.s[2].aes_round(&self.r1.xor(&self.r2));
        self.s[2] = self.s[1].aes_round(m3);
        self.s[1] = self.s[0].aes_round(m3);
        self.s[0] = self.s[0].xor(&t).xor(m2);

        self.r2 = self.r1;
        self.r1 = self.r0;
        self.r0 = self.rr.xor(m1);
        self.rr = *m2;
    }

    /// Splits a `64 * D`-byte superblock into its four blocks in file order
    /// and absorbs it.
    #[inline]
    fn update_bytes(&mut self, superblock: &[u8]) {
        let width = 16 * D;
        debug_assert_eq!(superblock.len(), 4 * width);

        let m0 = WideBlock::from_bytes(&superblock[..width]);
        let m1 = WideBlock::from_bytes(&superblock[width..2 * width]);
        let m2 = WideBlock::from_bytes(&superblock[2 * width..3 * width]);
        let m3 = WideBlock::from_bytes(&superblock[3 * width..]);
        self.update(&m0, &m1, &m2, &m3);
    }
}

/// Immutable expanded key material, shared by any number of `mac` calls.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct Context<const D: usize> {
    init_state: [WideBlock<D>; 9],
    subkeys: [WideBlock<D>; 18],
    nonce_key: AesKey,
    finalize_key: AesKey,
}

impl<const D: usize> Context<D> {
    /// Derives the initial state, the eighteen subkeys and the two auxiliary
    /// AES keys from a 16-byte master key.
    pub fn new(key: &[u8; 16]) -> Self {
        let master = AesKey::expand(key);

        let mut init_state = [WideBlock::ZERO; 9];
        for (position, block) in init_state.iter_mut().enumerate() {
            *block = derive_block(&master, position);
        }
        let mut subkeys = [WideBlock::ZERO; 18];
        for (i, block) in subkeys.iter_mut().enumerate() {
            *block = derive_block(&master, i + 9);
        }

        // The auxiliary keys are shared across degrees: their derivation
        // inputs carry zero lane and degree bytes.
        let nonce_key = AesKey::expand(&master.encrypt(&aux_input(27)));
        let finalize_key = AesKey::expand(&master.encrypt(&aux_input(28)));

        Self {
            init_state,
            subkeys,
            nonce_key,
            finalize_key,
        }
    }

    /// Computes the 128-bit tag of `msg` under `nonce`.
    pub fn mac(&self, msg: &[u8], nonce: &[u8; 16]) -> [u8; 16] {
        let state = self.absorb(msg);
        self.finalize(&state, nonce)
    }

    fn absorb(&self, msg: &[u8]) -> State<D> {
        let superblock = 64 * D;
        let mut state = State::new(&self.init_state);

        let mut chunks = msg.chunks_exact(superblock);
        for chunk in chunks.by_ref() {
            state.update_bytes(chunk);
        }

        // Last superblock: leftover bytes, a 0x01 marker, zeros. The marker
        // always lands inside the buffer, so padding is injective.
        let rest = chunks.remainder();
        let mut last = [0u8; 256];
        last[..rest.len()].copy_from_slice(rest);
        last[rest.len()] = 0x01;
        state.update_bytes(&last[..superblock]);

        // Four blank rounds flush the message through the full state.
        for _ in 0..4 {
            state.update(
                &WideBlock::ZERO,
                &WideBlock::ZERO,
                &WideBlock::ZERO,
                &WideBlock::ZERO,
            );
        }
        state
    }

    fn finalize(&self, state: &State<D>, nonce: &[u8; 16]) -> [u8; 16] {
        let mut acc = aes_modified(&self.subkeys[..10], &state.s[0]);
        for i in 1..9 {
            acc = acc.xor(&aes_modified(&self.subkeys[i..i + 10], &state.s[i]));
        }

        let folded = acc.fold_lanes();
        let masked = xor_block(&xor_block(&folded, nonce), &self.nonce_key.encrypt(nonce));
        self.finalize_key.encrypt(&masked)
    }
}

/// Ten AES rounds over a sliding subkey window: the first window entry is
/// XORed in, the remaining nine key full rounds, and a final full round runs
/// under the all-zero key. The last round keeps MixColumns, so this is
/// deliberately not standard AES encryption.
fn aes_modified<const D: usize>(window: &[WideBlock<D>], x: &WideBlock<D>) -> WideBlock<D> {
    debug_assert_eq!(window.len(), 10);

    let mut y = x.xor(&window[0]);
    for round_key in &window[1..] {
        y = y.aes_round(round_key);
    }
    y.aes_round(&WideBlock::ZERO)
}

/// Encrypts the position/lane/degree-tagged counter blocks for one logical
/// position and packs the lanes into a wide block.
fn derive_block<const D: usize>(master: &AesKey, position: usize) -> WideBlock<D> {
    let mut lanes = [[0u8; 16]; D];
    for (lane, out) in lanes.iter_mut().enumerate() {
        let mut input = [0u8; 16];
        input[..8].copy_from_slice(&(position as u64).to_le_bytes());
        input[14] = lane as u8;
        input[15] = (D - 1) as u8;
        *out = master.encrypt(&input);
    }
    WideBlock(lanes)
}

fn aux_input(position: u64) -> [u8; 16] {
    let mut input = [0u8; 16];
    input[..8].copy_from_slice(&position.to_le_bytes());
    input
}
