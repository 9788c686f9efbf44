//! Algebraic properties: determinism, separation, boundaries, avalanche.

use crate::{LeMac, LeMacX2, LeMacX4};

/// Small deterministic generator so the randomized tests are repeatable.
struct XorShift64(u64);

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn fill(&mut self, buf: &mut [u8]) {
        for chunk in buf.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn array16(&mut self) -> [u8; 16] {
        let mut buf = [0u8; 16];
        self.fill(&mut buf);
        buf
    }
}

fn bit_difference(a: &[u8; 16], b: &[u8; 16]) -> u32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x ^ y).count_ones()).sum()
}

#[test]
fn test_tags_are_deterministic() {
    let key = [0x21u8; 16];
    let nonce = [0x43u8; 16];
    let msg = b"determinism across repeated calls";

    let mac = LeMac::new(&key);
    assert_eq!(mac.mac(msg, &nonce), mac.mac(msg, &nonce));

    let mac2 = LeMacX2::new(&key);
    assert_eq!(mac2.mac(msg, &nonce), mac2.mac(msg, &nonce));

    let mac4 = LeMacX4::new(&key);
    assert_eq!(mac4.mac(msg, &nonce), mac4.mac(msg, &nonce));
}

#[test]
fn test_one_context_matches_fresh_contexts() {
    let key = [0x77u8; 16];
    let nonce = [0x0fu8; 16];

    let shared = LeMac::new(&key);
    let t1 = shared.mac(b"first message", &nonce);
    let t2 = shared.mac(b"second message", &nonce);

    assert_eq!(t1, LeMac::new(&key).mac(b"first message", &nonce));
    assert_eq!(t2, LeMac::new(&key).mac(b"second message", &nonce));
}

#[test]
fn test_trailing_zero_byte_changes_tag() {
    let key = [0x33u8; 16];
    let nonce = [0x44u8; 16];
    let mac = LeMac::new(&key);

    let mut msg = vec![0x55u8; 70];
    let short = mac.mac(&msg[..69], &nonce);
    msg[69] = 0x00;
    let long = mac.mac(&msg, &nonce);
    assert_ne!(short, long);
}

#[test]
fn test_variants_domain_separate() {
    let key = [0u8; 16];
    let nonce = [0u8; 16];
    let msg = [0u8; 16];

    let mac1 = LeMac::new(&key);
    let mac2 = LeMacX2::new(&key);
    let mac4 = LeMacX4::new(&key);

    let t1 = mac1.mac(&msg, &nonce);
    let t2 = mac2.mac(&msg, &nonce);
    let t4 = mac4.mac(&msg, &nonce);

    // Stable per variant, unrelated across variants.
    assert_eq!(t2, mac2.mac(&msg, &nonce));
    assert_eq!(t4, mac4.mac(&msg, &nonce));
    assert_ne!(t1, t2);
    assert_ne!(t1, t4);
    assert_ne!(t2, t4);
}

fn check_boundary_lengths(parallelism: usize, mac_of: &dyn Fn(&[u8]) -> [u8; 16]) {
    let block = 64 * parallelism;
    let lengths = [
        0,
        1,
        63 * parallelism,
        block - 1,
        block,
        block + 1,
        3 * block + 17,
    ];
    let msg = vec![0xa5u8; 3 * block + 17];

    let tags: Vec<[u8; 16]> = lengths.iter().map(|&len| mac_of(&msg[..len])).collect();
    for (i, &len_i) in lengths.iter().enumerate() {
        assert_eq!(tags[i], mac_of(&msg[..len_i]), "length {len_i} not stable");
        for (j, &len_j) in lengths.iter().enumerate().skip(i + 1) {
            if len_i != len_j {
                assert_ne!(tags[i], tags[j], "lengths {len_i} and {len_j} collide");
            }
        }
    }
}

#[test]
fn test_boundary_lengths_all_variants() {
    let key = [0x5cu8; 16];
    let nonce = [0x11u8; 16];

    let mac1 = LeMac::new(&key);
    check_boundary_lengths(1, &|msg| mac1.mac(msg, &nonce));
    let mac2 = LeMacX2::new(&key);
    check_boundary_lengths(2, &|msg| mac2.mac(msg, &nonce));
    let mac4 = LeMacX4::new(&key);
    check_boundary_lengths(4, &|msg| mac4.mac(msg, &nonce));
}

#[test]
fn test_message_bit_avalanche() {
    let mut rng = XorShift64::new(0x9e37_79b9_7f4a_7c15);
    let mut total = 0u64;
    const TRIALS: u64 = 48;

    for _ in 0..TRIALS {
        let key = rng.array16();
        let nonce = rng.array16();
        let mut msg = [0u8; 40];
        rng.fill(&mut msg);

        let mac = LeMac::new(&key);
        let base = mac.mac(&msg, &nonce);

        let bit = (rng.next_u64() % (40 * 8)) as usize;
        msg[bit / 8] ^= 1 << (bit % 8);
        total += u64::from(bit_difference(&base, &mac.mac(&msg, &nonce)));
    }

    let average = total as f64 / TRIALS as f64;
    assert!(average >= 40.0, "message avalanche too weak: {average}");
}

#[test]
fn test_nonce_bit_avalanche() {
    let mut rng = XorShift64::new(0xd1b5_4a32_d192_ed03);
    let mut total = 0u64;
    const TRIALS: u64 = 48;

    for _ in 0..TRIALS {
        let key = rng.array16();
        let mut nonce = rng.array16();
        let mut msg = [0u8; 40];
        rng.fill(&mut msg);

        let mac = LeMac::new(&key);
        let base = mac.mac(&msg, &nonce);

        let bit = (rng.next_u64() % 128) as usize;
        nonce[bit / 8] ^= 1 << (bit % 8);
        total += u64::from(bit_difference(&base, &mac.mac(&msg, &nonce)));
    }

    let average = total as f64 / TRIALS as f64;
    assert!(average >= 40.0, "nonce avalanche too weak: {average}");
}

#[test]
fn test_key_bit_avalanche() {
    let mut rng = XorShift64::new(0x94d0_49bb_1331_11eb);
    let mut total = 0u64;
    const TRIALS: u64 = 48;

    for _ in 0..TRIALS {
        let mut key = rng.array16();
        let nonce = rng.array16();
        let mut msg = [0u8; 40];
        rng.fill(&mut msg);

        let base = LeMac::new(&key).mac(&msg, &nonce);

        let bit = (rng.next_u64() % 128) as usize;
        key[bit / 8] ^= 1 << (bit % 8);
        total += u64::from(bit_difference(&base, &LeMac::new(&key).mac(&msg, &nonce)));
    }

    let average = total as f64 / TRIALS as f64;
    assert!(average >= 40.0, "key avalanche too weak: {average}");
}

#[test]
fn test_verify_rejects_any_flipped_tag_bit() {
    let key = [0x18u8; 16];
    let nonce = [0x29u8; 16];
    let msg = b"verification round trip";

    let mac = LeMacX2::new(&key);
    let tag = mac.mac(msg, &nonce);
    assert!(mac.verify(msg, &nonce, &tag));

    for byte in 0..16 {
        let mut bad = tag;
        bad[byte] ^= 0x80;
        assert!(!mac.verify(msg, &nonce, &bad));
    }
}
