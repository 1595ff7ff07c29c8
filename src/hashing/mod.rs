//! BLAKE3 helpers for content addressing and feature hashing.

/// 64-bit digest (first 8 bytes of BLAKE3, little-endian).
///
/// Used for bucketing, where a rare collision only blurs two features together.
/// Use [`content_key`] when the hash names stored content.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}

/// Full 256-bit BLAKE3 digest as lowercase hex; names archived documents.
#[inline]
pub fn content_key(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Content key for a job description, insensitive to surrounding whitespace.
#[inline]
pub fn job_description_key(text: &str) -> String {
    content_key(text.trim().as_bytes())
}
