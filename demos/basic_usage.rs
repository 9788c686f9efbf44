//! Basic usage example for the LeMac message authentication codes.

use lemac::{LeMac, LeMacX2, LeMacX4};

fn main() {
    println!("LeMac Basic Usage Example");
    println!("=========================");

    // Example 1: Computing and verifying a tag
    basic_example();

    // Example 2: Reusing one context for many messages
    reuse_example();

    // Example 3: The three variants are distinct MAC families
    variant_example();
}

fn basic_example() {
    println!("\n1. Tag Computation/Verification:");

    let key = [0x01; 16]; // 128-bit key
    let nonce = [0x02; 16]; // 128-bit nonce
    let message = b"Hello, LeMac! This message gets authenticated.";

    let mac = LeMac::new(&key);
    let tag = mac.mac(message, &nonce);
    println!("  Message: {:?}", String::from_utf8_lossy(message));
    println!("  Tag: {:02x?}", &tag[..8]); // Show first 8 bytes

    assert!(mac.verify(message, &nonce, &tag));
    println!("  ✓ Tag verifies!");

    let mut tampered = *message;
    tampered[0] ^= 1;
    assert!(!mac.verify(&tampered, &nonce, &tag));
    println!("  ✓ Tampered message rejected!");
}

fn reuse_example() {
    println!("\n2. Context Reuse:");

    let key = [0x03; 16];
    let mac = LeMac::new(&key);

    for (i, msg) in [&b"first"[..], b"second", b"third"].iter().enumerate() {
        let mut nonce = [0u8; 16];
        nonce[0] = i as u8; // One nonce per message
        let tag = mac.mac(msg, &nonce);
        println!("  msg {} -> tag {:02x?}...", i, &tag[..4]);
    }

    println!("  ✓ One key expansion served all messages!");
}

fn variant_example() {
    println!("\n3. Parallel Variants:");

    let key = [0x04; 16];
    let nonce = [0x05; 16];
    let message = vec![0xaa; 1024];

    let t1 = LeMac::new(&key).mac(&message, &nonce);
    let t2 = LeMacX2::new(&key).mac(&message, &nonce);
    let t4 = LeMacX4::new(&key).mac(&message, &nonce);

    println!(
        "  LeMac    (block {:>3}): {:02x?}...",
        LeMac::BLOCK_SIZE,
        &t1[..4]
    );
    println!(
        "  LeMac-X2 (block {:>3}): {:02x?}...",
        LeMacX2::BLOCK_SIZE,
        &t2[..4]
    );
    println!(
        "  LeMac-X4 (block {:>3}): {:02x?}...",
        LeMacX4::BLOCK_SIZE,
        &t4[..4]
    );

    assert_ne!(t1, t2);
    assert_ne!(t2, t4);
    println!("  ✓ Same inputs, unrelated tags per variant!");
}
