use pbkdf2::pbkdf2;
use rand::Rng;

use crate::{HmacSha256, PBKDF2_ITERATIONS, SALT_LENGTH};

/// Function to generate a random per-record salt
fn generate_random_salt() -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..SALT_LENGTH).map(|_| rng.gen()).collect()
}

/// Function to derive a 32-byte key from a password using PBKDF2
fn derive_key(password: &str, salt: &[u8]) -> Vec<u8> {
    let mut key = vec![0u8; 32];
    pbkdf2::<HmacSha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    key
}

/// Hash a password with a fresh random salt.
///
/// The stored form is `<hex salt>$<hex key>` so the salt travels with the
/// record and each record gets its own. The credential store only ever sees
/// this opaque string, never the plaintext.
pub fn hash_password(password: &str) -> String {
    let salt = generate_random_salt();
    let key = derive_key(password, &salt);
    format!("{}${}", hex::encode(&salt), hex::encode(key))
}

/// Verify a password against a stored `salt$key` hash.
///
/// A malformed stored hash verifies as false rather than erroring; the row
/// was written out-of-band and we treat garbage the same as a wrong password.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let (salt_hex, key_hex) = match stored.split_once('$') {
        Some(parts) => parts,
        None => {
            log::warn!("stored password hash is not in salt$key form");
            return false;
        }
    };
    let salt = match hex::decode(salt_hex) {
        Ok(salt) => salt,
        Err(_) => return false,
    };
    let key = derive_key(password, &salt);
    hex::encode(key) == key_hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("Password123!");
        assert!(verify_password("Password123!", &hash));
        assert!(!verify_password("password123!", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn test_fresh_salt_per_hash() {
        let first = hash_password("same-password");
        let second = hash_password("same-password");
        assert_ne!(first, second);

        // Both must still verify despite differing salts
        assert!(verify_password("same-password", &first));
        assert!(verify_password("same-password", &second));
    }

    #[test]
    fn test_hash_format() {
        let hash = hash_password("pw1");
        let (salt_hex, key_hex) = hash.split_once('$').unwrap();
        assert_eq!(salt_hex.len(), SALT_LENGTH * 2);
        assert_eq!(key_hex.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() || c == '$'));
    }

    #[test]
    fn test_malformed_stored_hash() {
        assert!(!verify_password("pw1", "not-a-hash"));
        assert!(!verify_password("pw1", "zzzz$abcd"));
        assert!(!verify_password("pw1", ""));
    }
}
