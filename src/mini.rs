//! Mini RSA: the same construction on 64-bit words.
//!
//! Keys have a 64-bit modulus built from two 32-bit primes, which makes them
//! trivially breakable. The module exists to exercise the number theory
//! behind RSA (modular arithmetic without overflow, extended Euclid,
//! Miller-Rabin) with plain `u64` values that are easy to inspect.
//!
//! ```
//! use rsa_pss::mini::{mini_cipher, MiniKeyPair};
//! use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
//!
//! let mut rng = ChaCha8Rng::from_seed([7; 32]);
//! let key = MiniKeyPair::generate(&mut rng);
//!
//! let c = mini_cipher(0x1234_5678_9abc, key.e, key.n).unwrap();
//! assert_eq!(mini_cipher(c, key.d, key.n).unwrap(), 0x1234_5678_9abc);
//! ```

use rand_core::CryptoRngCore;

use crate::errors::{Error, Result};

/// Witnesses that make Miller-Rabin exact for every `u64`.
const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Every generated modulus is at least `2^63`.
const MIN_MODULUS: u64 = 1 << 63;

/// A mini RSA key: public exponent `e`, private exponent `d`, modulus `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiniKeyPair {
    /// Public exponent.
    pub e: u64,
    /// Private exponent.
    pub d: u64,
    /// Modulus, `p * q >= 2^63`.
    pub n: u64,
}

impl MiniKeyPair {
    /// Generates a key from two random 32-bit primes.
    ///
    /// `e` is drawn at random below `lambda(n) = lcm(p - 1, q - 1)` until it
    /// is invertible. Like the full-size generator this loops until it
    /// succeeds.
    pub fn generate<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Self {
        let (p, q, n) = loop {
            let p = random_prime(rng);
            let q = random_prime(rng);
            if p == q {
                continue;
            }

            let n = p * q;
            if n >= MIN_MODULUS {
                break (p, q, n);
            }
            log::trace!("mini modulus {:#x} below 2^63, retrying", n);
        };

        let lambda = (p - 1) / gcd(p - 1, q - 1) * (q - 1);

        loop {
            let e = random_below(rng, lambda);
            if e < 2 {
                continue;
            }
            if let Some(d) = mod_inverse(e, lambda) {
                return Self { e, d, n };
            }
        }
    }
}

/// Computes `m^k mod n`, refusing any `m` that is not below `n`.
///
/// Encryption uses `k = e`, decryption `k = d`.
pub fn mini_cipher(m: u64, k: u64, n: u64) -> Result<u64> {
    if m >= n {
        return Err(Error::OutOfRange);
    }

    Ok(pow_rem(m, k, n))
}

/// Greatest common divisor by Euclid's algorithm; `gcd(0, 0) = 0`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Inverse of `a` modulo `m`, if `gcd(a, m) = 1`.
///
/// The result lies in `[0, m)`. Returns `None` for `m < 2` and whenever no
/// inverse exists.
pub fn mod_inverse(a: u64, m: u64) -> Option<u64> {
    if m < 2 {
        return None;
    }

    // Extended Euclid on (a mod m, m), tracking only the coefficient of a.
    let (mut r0, mut r1) = (i128::from(m), i128::from(a % m));
    let (mut t0, mut t1) = (0i128, 1i128);

    while r1 != 0 {
        let q = r0 / r1;
        (r0, r1) = (r1, r0 - q * r1);
        (t0, t1) = (t1, t0 - q * t1);
    }

    if r0 != 1 {
        return None;
    }

    u64::try_from(t0.rem_euclid(i128::from(m))).ok()
}

/// `(a + b) mod m` without overflow, or `None` if `m` is zero.
pub fn mod_add(a: u64, b: u64, m: u64) -> Option<u64> {
    let (a, b) = (a.checked_rem(m)?, b % m);
    if a >= m - b {
        Some(a - (m - b))
    } else {
        Some(a + b)
    }
}

/// `(a - b) mod m` without underflow, or `None` if `m` is zero.
pub fn mod_sub(a: u64, b: u64, m: u64) -> Option<u64> {
    let (a, b) = (a.checked_rem(m)?, b % m);
    if a >= b {
        Some(a - b)
    } else {
        Some(m - (b - a))
    }
}

/// `(a * b) mod m` without overflow, or `None` if `m` is zero.
pub fn mod_mul(a: u64, b: u64, m: u64) -> Option<u64> {
    (m != 0).then(|| mul_rem(a, b, m))
}

/// `a^b mod m` by square-and-multiply, or `None` if `m` is zero.
pub fn mod_pow(a: u64, b: u64, m: u64) -> Option<u64> {
    (m != 0).then(|| pow_rem(a, b, m))
}

/// `m` must be non-zero.
#[inline]
fn mul_rem(a: u64, b: u64, m: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(m)) as u64
}

/// `m` must be non-zero.
fn pow_rem(a: u64, mut b: u64, m: u64) -> u64 {
    let mut base = a % m;
    let mut acc = 1 % m;

    while b > 0 {
        if b & 1 == 1 {
            acc = mul_rem(acc, base, m);
        }
        base = mul_rem(base, base, m);
        b >>= 1;
    }

    acc
}

/// Deterministic Miller-Rabin primality test, exact for every `u64`.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for p in WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }

    // n - 1 = q * 2^k with q odd
    let k = (n - 1).trailing_zeros();
    let q = (n - 1) >> k;

    'witness: for a in WITNESSES {
        let mut x = pow_rem(a, q, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..k {
            x = mul_rem(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }

    true
}

/// Odd 32-bit prime with the top bit set.
fn random_prime<R: CryptoRngCore + ?Sized>(rng: &mut R) -> u64 {
    loop {
        let candidate = u64::from(rng.next_u32() | 0x8000_0001);
        if is_prime(candidate) {
            return candidate;
        }
    }
}

/// Uniform value in `[0, bound)` by rejection sampling. `bound` must be
/// non-zero.
fn random_below<R: CryptoRngCore + ?Sized>(rng: &mut R, bound: u64) -> u64 {
    let mask = u64::MAX >> bound.leading_zeros();
    loop {
        let x = rng.next_u64() & mask;
        if x < bound {
            return x;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    use rand_core::RngCore;

    fn trial_division(n: u64) -> bool {
        n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
    }

    #[test]
    fn test_modular_arithmetic() {
        let m = u64::MAX - 58; // largest prime below 2^64
        assert_eq!(mod_add(m - 1, m - 1, m), Some(m - 2));
        assert_eq!(mod_add(u64::MAX, 1, 10), Some(6));
        assert_eq!(mod_sub(3, 5, 7), Some(5));
        assert_eq!(mod_sub(u64::MAX, 0, m), Some(58));
        assert_eq!(mod_mul(m - 1, m - 1, m), Some(1));
        assert_eq!(mod_pow(2, 10, 1000), Some(24));
        assert_eq!(mod_pow(5, 0, 1), Some(0));
        assert_eq!(mod_pow(3, m - 1, m), Some(1));
    }

    #[test]
    fn test_modular_arithmetic_zero_modulus() {
        assert_eq!(mod_add(1, 2, 0), None);
        assert_eq!(mod_sub(1, 2, 0), None);
        assert_eq!(mod_mul(1, 2, 0), None);
        assert_eq!(mod_pow(1, 2, 0), None);
        assert_eq!(mod_pow(0, 0, 0), None);
        assert_eq!(mini_cipher(0, 3, 0), Err(Error::OutOfRange));
    }

    #[test]
    fn test_modular_arithmetic_matches_wide_ints() {
        let mut rng = ChaCha8Rng::from_seed([5; 32]);
        for _ in 0..1000 {
            let (a, b) = (rng.next_u64(), rng.next_u64());
            let m = rng.next_u64() | 1;
            let wide = |x: u128| Some((x % u128::from(m)) as u64);

            assert_eq!(mod_add(a, b, m), wide(u128::from(a) + u128::from(b)));
            assert_eq!(
                mod_sub(a, b, m),
                wide(u128::from(a) + u128::from(m) * 2 - u128::from(b % m))
            );
            assert_eq!(mod_mul(a, b, m), wide(u128::from(a) * u128::from(b)));
        }
    }

    #[test]
    fn test_gcd_and_inverse() {
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd(12, 0), 12);
        assert_eq!(gcd(0, 12), 12);
        assert_eq!(gcd(84, 36), 12);
        assert_eq!(gcd(17, 780), 1);

        assert_eq!(mod_inverse(17, 780), Some(413));
        assert_eq!(mod_inverse(3, 11), Some(4));
        assert_eq!(mod_inverse(1, 2), Some(1));
        assert_eq!(mod_inverse(6, 9), None);
        assert_eq!(mod_inverse(0, 9), None);
        assert_eq!(mod_inverse(5, 1), None);
        assert_eq!(mod_inverse(5, 0), None);

        let m = u64::MAX - 58;
        let inv = mod_inverse(u64::MAX, m).unwrap();
        assert_eq!(mod_mul(u64::MAX, inv, m), Some(1));
    }

    #[test]
    fn test_is_prime_matches_trial_division() {
        for n in 0..20_000u64 {
            assert_eq!(is_prime(n), trial_division(n), "n = {}", n);
        }
    }

    #[test]
    fn test_is_prime_large() {
        assert!(is_prime(u64::MAX - 58));
        assert!(is_prime(4_294_967_291));
        assert!(!is_prime(u64::MAX));
        assert!(!is_prime(4_294_967_297)); // 641 * 6700417
        // Carmichael number and strong pseudoprimes to small bases
        assert!(!is_prime(561));
        assert!(!is_prime(3_215_031_751));
        assert!(!is_prime(3_825_123_056_546_413_051));
    }

    #[test]
    fn test_cipher_range_check() {
        assert_eq!(mini_cipher(3233, 17, 3233), Err(Error::OutOfRange));
        assert_eq!(mini_cipher(1, 17, 0), Err(Error::OutOfRange));
        // n = 61 * 53, e = 17, d = 413
        assert_eq!(mini_cipher(65, 17, 3233), Ok(2790));
        assert_eq!(mini_cipher(2790, 413, 3233), Ok(65));
    }

    #[test]
    fn test_generate_and_roundtrip() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        for _ in 0..8 {
            let key = MiniKeyPair::generate(&mut rng);
            assert!(key.n >= MIN_MODULUS);
            assert!(key.e > 1);

            for _ in 0..32 {
                let m = rng.next_u64() % key.n;
                let c = mini_cipher(m, key.e, key.n).unwrap();
                assert_eq!(mini_cipher(c, key.d, key.n).unwrap(), m);
            }
        }
    }
}
