//! Session id generation and admin key hashing.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes in a session id (hex-encoded to twice this length).
const SESSION_ID_BYTES: usize = 16;

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generates a fresh ephemeral session id: 32 lowercase hex characters.
pub fn generate_session_id() -> String {
    let mut bytes = [0u8; SESSION_ID_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Checks a presented admin key against the expected key.
///
/// Both sides are hashed first so the comparison always runs over 64 bytes,
/// and the byte comparison does not short-circuit.
pub fn admin_key_matches(presented: &str, expected: &str) -> bool {
    let a = sha256_hex(presented);
    let b = sha256_hex(expected);
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
