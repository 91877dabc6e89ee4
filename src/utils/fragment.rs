//! Fragment (short identifier) encoding.
//!
//! A fragment is the base-62 rendering of a counter value, left-padded with
//! `'0'` to [`FRAGMENT_WIDTH`] characters. The alphabet is digits, then upper
//! case, then lower case letters, so fragments never need URL escaping.
//!
//! Encoding is pure and injective: distinct counters always produce distinct
//! fragments, which is what makes the shared store counter sufficient for
//! uniqueness. The width is a minimum; counters that need more than nine digits
//! produce longer fragments instead of being truncated.

/// Symbols in digit order.
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const BASE: u64 = ALPHABET.len() as u64;

/// Minimum fragment length.
pub const FRAGMENT_WIDTH: usize = 9;

/// Padding symbol (the zero digit, so padding does not change the value).
pub const PADDING: char = '0';

/// Encodes a counter value as a fixed-minimum-width base-62 fragment.
///
/// # Examples
///
/// ```
/// use redirector::utils::fragment::encode_fragment;
///
/// assert_eq!(encode_fragment(0), "000000000");
/// assert_eq!(encode_fragment(1), "000000001");
/// assert_eq!(encode_fragment(62), "000000010");
/// ```
pub fn encode_fragment(counter: u64) -> String {
    // u64::MAX needs 11 base-62 digits.
    let mut digits = [0u8; 11];
    let mut len = 0;
    let mut n = counter;

    loop {
        digits[len] = ALPHABET[(n % BASE) as usize];
        len += 1;
        n /= BASE;
        if n == 0 {
            break;
        }
    }

    let mut fragment = String::with_capacity(len.max(FRAGMENT_WIDTH));
    for _ in len..FRAGMENT_WIDTH {
        fragment.push(PADDING);
    }
    fragment.extend(digits[..len].iter().rev().map(|&b| b as char));
    fragment
}

/// Recovers the counter value a fragment was minted from.
///
/// Returns `None` for empty input, symbols outside the alphabet, or values that
/// overflow `u64`.
pub fn decode_fragment(fragment: &str) -> Option<u64> {
    if fragment.is_empty() {
        return None;
    }

    fragment.bytes().try_fold(0u64, |acc, b| {
        let digit = ALPHABET.iter().position(|&c| c == b)? as u64;
        acc.checked_mul(BASE)?.checked_add(digit)
    })
}
