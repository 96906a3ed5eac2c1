//! MD5 password hashing, as both clients and servers compute it.
//!
//! The scheme is `"md5" + hex(md5(hex(md5(password + username)) + salt))`:
//! a 35-byte string whose exact shape is part of the wire contract - the
//! counterpart performs the identical computation and expects byte equality.

/// Compute the salted md5 credential for `user`/`password`.
///
/// Deterministic in its three inputs. The output is always the literal
/// `md5` prefix followed by 32 lowercase hex characters.
pub fn md5_credential(user: &str, password: &str, salt: &[u8; 4]) -> String {
    fn md5_hex(bytes: &[u8]) -> String {
        let digest = md5::compute(bytes);
        format!("{:x}", digest)
    }
    let inner = md5_hex(format!("{password}{user}").as_bytes());
    let mut outer = Vec::with_capacity(inner.len() + 4);
    outer.extend_from_slice(inner.as_bytes());
    outer.extend_from_slice(salt);
    format!("md5{}", md5_hex(&outer))
}

/// Constant-time byte slice comparison.
///
/// Returns true if slices are equal, using constant-time comparison
/// to prevent timing side-channel attacks on credential verification.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    // XOR all bytes, OR results together - any difference results in non-zero
    let result = a
        .iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y));

    result == 0
}
