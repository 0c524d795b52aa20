//! Content hashing for generated artifact names

use md5::{Digest, Md5};

/// Length of a [`content_hash`] in hex characters
pub const HASH_LEN: usize = 32;

/// Hash a string into a 32 character lowercase hex identifier.
///
/// Used for content-addressed file names, not for security.
pub fn content_hash(s: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(s.as_bytes());
    format!("{:x}", hasher.finalize())
}
