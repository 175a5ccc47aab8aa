//! Short code generation.
//!
//! Three policies, tried in this order by
//! [`crate::application::services::UrlService`]:
//!
//! 1. [`deterministic_candidate`] - hash of the URL, same input gives same code
//! 2. [`random_candidate`] - fresh random code, used on collision
//! 3. [`counter_encode`] - base62 of a sequence number, last-resort tie-break
//!
//! All codes are drawn from [`ALPHABET`].

use base64::Engine as _;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Short code alphabet: `a-z`, `A-Z`, `0-9`, in that order.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const BASE: u64 = ALPHABET.len() as u64;

/// Length of hash-derived and random candidates.
pub const CANDIDATE_LENGTH: usize = 6;

/// Longest short code the store accepts.
pub const MAX_CODE_LENGTH: usize = 10;

/// Number of digest bytes fed to the base64 encoder.
const DIGEST_PREFIX_BYTES: usize = 8;

/// Derives a 6-character candidate from the URL's bytes.
///
/// Takes the first 8 bytes of the SHA-256 digest, encodes them as URL-safe
/// base64 without padding and keeps the first 6 characters. The two URL-safe
/// symbols outside the alphabet are folded back in by reducing their base64
/// value modulo 62 (`-` is 62 and becomes `A`, `_` is 63 and becomes `B`).
///
/// # Examples
///
/// ```ignore
/// let a = deterministic_candidate("https://example.com/very/long/url");
/// let b = deterministic_candidate("https://example.com/very/long/url");
/// assert_eq!(a, b);
/// ```
pub fn deterministic_candidate(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .encode(&digest[..DIGEST_PREFIX_BYTES]);

    encoded
        .chars()
        .take(CANDIDATE_LENGTH)
        .map(|c| match c {
            '-' => 'A',
            '_' => 'B',
            other => other,
        })
        .collect()
}

/// Generates a random 6-character candidate.
///
/// Draws a 128-bit value from the thread-local CSPRNG and maps each of its
/// six leading hex nibbles through `nibble % 62` into the alphabet. Nibbles
/// never exceed 15, so only the first 16 symbols (`a`-`p`) appear.
pub fn random_candidate() -> String {
    let id: u128 = rand::rng().random();

    (0..CANDIDATE_LENGTH)
        .map(|i| {
            let nibble = ((id >> (124 - 4 * i)) & 0xF) as u64;
            ALPHABET[(nibble % BASE) as usize] as char
        })
        .collect()
}

/// Encodes `n` in base 62, most significant symbol first.
///
/// No leading-zero padding is applied. Zero encodes to `"a"`, the first
/// alphabet symbol, so the result is never empty.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(counter_encode(0), "a");
/// assert_eq!(counter_encode(61), "9");
/// assert_eq!(counter_encode(62), "ba");
/// ```
pub fn counter_encode(mut n: u64) -> String {
    if n == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    let mut symbols = Vec::new();
    while n > 0 {
        symbols.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }
    symbols.reverse();

    symbols.into_iter().map(char::from).collect()
}

/// Returns true if `code` is 1-10 characters drawn from [`ALPHABET`].
pub fn is_valid_short_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn in_alphabet(code: &str) -> bool {
        code.bytes().all(|b| ALPHABET.contains(&b))
    }

    #[test]
    fn test_alphabet_has_62_unique_symbols() {
        let unique: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), 62);
        assert_eq!(ALPHABET[0], b'a');
        assert_eq!(ALPHABET[26], b'A');
        assert_eq!(ALPHABET[52], b'0');
    }

    #[test]
    fn test_deterministic_candidate_is_stable() {
        let url = "https://example.com/very/long/url";
        assert_eq!(deterministic_candidate(url), deterministic_candidate(url));
    }

    #[test]
    fn test_deterministic_candidate_known_value() {
        assert_eq!(
            deterministic_candidate("https://example.com/very/long/url"),
            "jsWWxE"
        );
        assert_eq!(deterministic_candidate("https://example.com"), "EAaArV");
    }

    #[test]
    fn test_deterministic_candidate_folds_url_safe_symbols() {
        // Raw URL-safe base64 prefix for this input is "QFG7-y".
        let code = deterministic_candidate("https://example.com/p/10");
        assert_eq!(code, "QFG7Ay");
    }

    #[test]
    fn test_deterministic_candidate_shape() {
        for i in 0..500 {
            let code = deterministic_candidate(&format!("https://example.com/page/{i}"));
            assert_eq!(code.len(), CANDIDATE_LENGTH);
            assert!(in_alphabet(&code), "unexpected symbol in {code}");
        }
    }

    #[test]
    fn test_deterministic_candidate_differs_per_url() {
        assert_ne!(
            deterministic_candidate("https://example.com/a"),
            deterministic_candidate("https://example.com/b")
        );
    }

    #[test]
    fn test_random_candidate_shape() {
        for _ in 0..500 {
            let code = random_candidate();
            assert_eq!(code.len(), CANDIDATE_LENGTH);
            assert!(code.bytes().all(|b| (b'a'..=b'p').contains(&b)));
        }
    }

    #[test]
    fn test_random_candidate_varies() {
        let codes: HashSet<_> = (0..100).map(|_| random_candidate()).collect();
        assert!(codes.len() > 90);
    }

    #[test]
    fn test_counter_encode_edges() {
        assert_eq!(counter_encode(0), "a");
        assert_eq!(counter_encode(1), "b");
        assert_eq!(counter_encode(61), "9");
        assert_eq!(counter_encode(62), "ba");
        assert_eq!(counter_encode(62 * 62), "baa");
    }

    #[test]
    fn test_counter_encode_stays_within_max_length() {
        let code = counter_encode(u64::MAX);
        assert!(code.len() <= 11);
        assert!(in_alphabet(&code));

        let code = counter_encode(62u64.pow(10) - 1);
        assert_eq!(code.len(), MAX_CODE_LENGTH);
    }

    #[test]
    fn test_is_valid_short_code() {
        assert!(is_valid_short_code("a"));
        assert!(is_valid_short_code("abcXYZ0189"));
        assert!(!is_valid_short_code(""));
        assert!(!is_valid_short_code("abcdefghijk"));
        assert!(!is_valid_short_code("abc-12"));
        assert!(!is_valid_short_code("abc_12"));
        assert!(!is_valid_short_code("health.ico"));
    }
}
