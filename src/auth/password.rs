//! Password hashing
//!
//! PBKDF2-HMAC-SHA256 with a random per-user salt, stored as
//! `pbkdf2-sha256$<iterations>$<salt hex>$<hash hex>`.

use pbkdf2::pbkdf2_hmac;
use rand::Rng;
use sha2::Sha256;

const ITERATIONS: u32 = 600_000;
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

/// Hash a password for storage.
pub fn hash_password(password: &str) -> String {
    let salt: [u8; SALT_LEN] = rand::thread_rng().gen();
    let mut derived = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, ITERATIONS, &mut derived);

    format!(
        "pbkdf2-sha256${}${}${}",
        ITERATIONS,
        hex::encode(salt),
        hex::encode(derived)
    )
}

/// Verify a password against a stored hash string.
///
/// Malformed stored values verify as false rather than erroring; a user row
/// with a corrupt hash simply cannot log in.
pub fn verify_password(stored: &str, password: &str) -> bool {
    let mut parts = stored.split('$');

    let (Some(scheme), Some(iterations), Some(salt), Some(expected), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };

    if scheme != "pbkdf2-sha256" {
        return false;
    }

    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    let Ok(salt) = hex::decode(salt) else {
        return false;
    };
    let Ok(expected) = hex::decode(expected) else {
        return false;
    };
    if expected.len() != HASH_LEN {
        return false;
    }

    let mut derived = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, iterations, &mut derived);

    derived[..] == expected[..]
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low-iteration hash so the tests stay fast.
    fn quick_hash(password: &str) -> String {
        let salt = [7u8; SALT_LEN];
        let mut derived = [0u8; HASH_LEN];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, 1000, &mut derived);
        format!(
            "pbkdf2-sha256$1000${}${}",
            hex::encode(salt),
            hex::encode(derived)
        )
    }

    #[test]
    fn test_verify_round_trip() {
        let stored = quick_hash("hunter2");
        assert!(verify_password(&stored, "hunter2"));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let stored = quick_hash("hunter2");
        assert!(!verify_password(&stored, "hunter3"));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(!verify_password("", "hunter2"));
        assert!(!verify_password("plaintext", "hunter2"));
        assert!(!verify_password("pbkdf2-sha256$abc$zz$zz", "hunter2"));
        assert!(!verify_password("md5$1000$00$00", "hunter2"));
    }

    #[test]
    fn test_hash_embeds_scheme_and_salt() {
        let stored = hash_password("secret");
        let parts: Vec<&str> = stored.split('$').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "pbkdf2-sha256");
        assert_eq!(parts[2].len(), SALT_LEN * 2);
        assert_eq!(parts[3].len(), HASH_LEN * 2);
    }
}
