//! Generate prime components for the RSA Private Key

use num_bigint::{prime::probably_prime, BigUint, IntoBigUint, ModInverse, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::errors::{Error, Result};
use crate::key::{ExponentMode, KeyGenParams};

/// Public exponent used by [`ExponentMode::Fixed`].
const EXP: u32 = 65537;

/// Miller-Rabin rounds per prime candidate (plus a Lucas test).
const PRIME_TEST_ROUNDS: usize = 50;

pub(crate) struct RsaKeyComponents {
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
    pub primes: [BigUint; 2],
}

/// Counts random candidate draws against an optional limit.
struct Attempts {
    used: usize,
    limit: Option<usize>,
}

impl Attempts {
    fn new(limit: Option<usize>) -> Self {
        Self { used: 0, limit }
    }

    fn next(&mut self) -> Result<()> {
        if matches!(self.limit, Some(limit) if self.used >= limit) {
            log::debug!("key generation gave up after {} candidates", self.used);
            return Err(Error::KeyGenerationExhausted);
        }
        self.used += 1;
        Ok(())
    }
}

/// Generates a two-prime RSA key as described by `params`.
///
/// Both primes are `bits / 2` bits long; pairs are redrawn until they differ
/// and their product has its top bit set. The private exponent is the
/// inverse of `e` modulo Carmichael's `lambda(n) = lcm(p - 1, q - 1)`.
///
/// Without a limit in `params` this loops until it succeeds, which happens
/// with overwhelming probability but after an unbounded number of draws.
/// Every draw is independent, so a caller wanting cancellation can cap the
/// attempts and retry.
pub(crate) fn generate_key_components<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    params: &KeyGenParams,
) -> Result<RsaKeyComponents> {
    let bit_size = params.size().bits();
    let prime_bits = params.size().prime_bits();
    let mut attempts = Attempts::new(params.max_attempts());

    loop {
        let p = generate_prime(rng, prime_bits, &mut attempts)?;
        let q = generate_prime(rng, prime_bits, &mut attempts)?;

        if p == q {
            log::trace!("drew the same prime twice, retrying");
            continue;
        }

        let n = &p * &q;
        if n.bits() != bit_size {
            log::trace!("modulus has {} bits instead of {}, retrying", n.bits(), bit_size);
            continue;
        }

        let lambda = (&p - BigUint::one()).lcm(&(&q - BigUint::one()));

        let e = match params.exponent() {
            ExponentMode::Fixed => {
                let e = BigUint::from(EXP);
                if !e.gcd(&lambda).is_one() {
                    log::trace!("65537 divides lambda(n), retrying");
                    continue;
                }
                e
            }
            ExponentMode::Random => generate_exponent(rng, &lambda, &mut attempts)?,
        };

        let d = match e.clone().mod_inverse(&lambda).and_then(|d| d.into_biguint()) {
            Some(d) => d,
            None => continue,
        };

        log::debug!(
            "generated {}-bit RSA key after {} candidates",
            bit_size,
            attempts.used
        );

        return Ok(RsaKeyComponents {
            n,
            e,
            d,
            primes: [p, q],
        });
    }
}

/// Draws odd `bit_length`-bit candidates with the top bit set until one is
/// probably prime.
fn generate_prime<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_length: usize,
    attempts: &mut Attempts,
) -> Result<BigUint> {
    let len = (bit_length + 7) / 8;
    let unused = len * 8 - bit_length;
    let mut bytes = Zeroizing::new(vec![0u8; len]);

    loop {
        attempts.next()?;
        rng.fill_bytes(&mut bytes);

        bytes[0] &= 0xff >> unused;
        bytes[0] |= 0x80 >> unused;
        bytes[len - 1] |= 1;

        let candidate = BigUint::from_bytes_be(&bytes);
        if probably_prime(&candidate, PRIME_TEST_ROUNDS) {
            return Ok(candidate);
        }
    }
}

/// Draws `e` uniformly from `[0, lambda)` until `e > 1` and `gcd(e, lambda) = 1`.
fn generate_exponent<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    lambda: &BigUint,
    attempts: &mut Attempts,
) -> Result<BigUint> {
    loop {
        attempts.next()?;
        let e = rng.gen_biguint_below(lambda);

        if e > BigUint::one() && e.gcd(lambda).is_one() {
            return Ok(e);
        }
    }
}
