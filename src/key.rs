use alloc::vec::Vec;
use core::fmt;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::algorithms::generate::{generate_key_components, RsaKeyComponents};
use crate::algorithms::pad::{uint_to_be_pad, uint_to_zeroizing_be_pad};
use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Smallest supported modulus, in bits.
const MIN_MODULUS_BITS: usize = 32;

/// Width of an RSA modulus.
///
/// The modulus of every key occupies exactly [`bits`](Self::bits) bits, so
/// keys, signatures and encoded messages all share the byte width
/// [`bytes`](Self::bytes).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ModulusSize {
    bits: usize,
}

impl ModulusSize {
    /// 1024-bit modulus.
    pub const RSA_1024: Self = Self { bits: 1024 };
    /// 2048-bit modulus.
    pub const RSA_2048: Self = Self { bits: 2048 };
    /// 3072-bit modulus.
    pub const RSA_3072: Self = Self { bits: 3072 };
    /// 4096-bit modulus.
    pub const RSA_4096: Self = Self { bits: 4096 };

    /// Validates a modulus size: a whole number of bytes, at least 32 bits.
    pub const fn new(bits: usize) -> Result<Self> {
        if bits < MIN_MODULUS_BITS || bits % 8 != 0 {
            return Err(Error::InvalidModulusSize);
        }
        Ok(Self { bits })
    }

    /// Size of the modulus in bits.
    pub const fn bits(self) -> usize {
        self.bits
    }

    /// Size of the modulus in bytes.
    pub const fn bytes(self) -> usize {
        self.bits / 8
    }

    /// Size of each of the two prime factors in bits.
    pub const fn prime_bits(self) -> usize {
        self.bits / 2
    }
}

impl Default for ModulusSize {
    fn default() -> Self {
        Self::RSA_2048
    }
}

/// How the public exponent is chosen during key generation.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub enum ExponentMode {
    /// `e = 65537`.
    #[default]
    Fixed,
    /// `e` drawn uniformly below `lcm(p - 1, q - 1)` and coprime to it.
    Random,
}

impl From<u32> for ExponentMode {
    /// `0` selects [`ExponentMode::Fixed`], anything else [`ExponentMode::Random`].
    fn from(mode: u32) -> Self {
        match mode {
            0 => ExponentMode::Fixed,
            _ => ExponentMode::Random,
        }
    }
}

/// Key generation parameters.
///
/// Key generation searches for primes by drawing random candidates, so it
/// terminates with overwhelming probability but not within a fixed bound.
/// [`with_max_attempts`](Self::with_max_attempts) caps the number of
/// candidate draws (prime candidates and exponent candidates alike), turning
/// an unlucky search into [`Error::KeyGenerationExhausted`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyGenParams {
    size: ModulusSize,
    exponent: ExponentMode,
    max_attempts: Option<usize>,
}

impl KeyGenParams {
    /// Parameters for a key of the given size with `e = 65537` and no
    /// attempt limit.
    pub const fn new(size: ModulusSize) -> Self {
        Self {
            size,
            exponent: ExponentMode::Fixed,
            max_attempts: None,
        }
    }

    /// Selects how the public exponent is chosen.
    pub const fn with_exponent(mut self, exponent: ExponentMode) -> Self {
        self.exponent = exponent;
        self
    }

    /// Limits the total number of random candidates drawn.
    pub const fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Requested modulus size.
    pub const fn size(&self) -> ModulusSize {
        self.size
    }

    /// Requested exponent mode.
    pub const fn exponent(&self) -> ExponentMode {
        self.exponent
    }

    /// Candidate draw limit, if any.
    pub const fn max_attempts(&self) -> Option<usize> {
        self.max_attempts
    }
}

/// Represents the public part of an RSA key.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct RsaPublicKey {
    /// Modulus: product of prime numbers `p` and `q`
    n: BigUint,
    /// Public exponent
    e: BigUint,
}

/// Represents a whole RSA key, public and private parts.
#[derive(Clone)]
pub struct RsaPrivateKey {
    /// Public components of the private key.
    pubkey_components: RsaPublicKey,
    /// Private exponent
    d: BigUint,
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl RsaPublicKey {
    /// Create a new public key from its components.
    ///
    /// The modulus must be odd, at least 32 bits and a whole number of bytes
    /// wide with its top bit set; the exponent must satisfy `1 < e < n`.
    pub fn new(n: BigUint, e: BigUint) -> Result<Self> {
        check_public(&n, &e)?;
        Ok(Self { n, e })
    }

    /// Create a new public key from `K`-byte big-endian strings.
    pub fn from_be_bytes(n: &[u8], e: &[u8]) -> Result<Self> {
        if e.len() != n.len() {
            return Err(Error::InvalidLength);
        }

        let n_int = BigUint::from_bytes_be(n);
        if n_int.bits() != n.len() * 8 {
            return Err(Error::InvalidModulus);
        }

        Self::new(n_int, BigUint::from_bytes_be(e))
    }

    /// Width of the modulus.
    pub fn modulus_size(&self) -> ModulusSize {
        ModulusSize { bits: self.n.bits() }
    }

    /// Modulus as a `K`-byte big-endian string.
    pub fn n_bytes(&self) -> Vec<u8> {
        self.n.to_bytes_be()
    }

    /// Public exponent as a `K`-byte big-endian string.
    ///
    /// The constructors guarantee `e < n`, so [`Error::Internal`] here means
    /// that invariant was broken.
    pub fn e_bytes(&self) -> Result<Vec<u8>> {
        uint_to_be_pad(&self.e, self.size()).map_err(|_| Error::Internal)
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.pubkey_components.n
    }

    fn e(&self) -> &BigUint {
        &self.pubkey_components.e
    }
}

impl PrivateKeyParts for RsaPrivateKey {
    fn d(&self) -> &BigUint {
        &self.d
    }
}

impl RsaPrivateKey {
    /// Generate a new key of the given size with the given exponent mode.
    ///
    /// Does not bound the search; see [`KeyGenParams`].
    pub fn new<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        size: ModulusSize,
        exponent: ExponentMode,
    ) -> Result<Self> {
        Self::generate(rng, &KeyGenParams::new(size).with_exponent(exponent))
    }

    /// Generate a new key according to `params`.
    pub fn generate<R: CryptoRngCore + ?Sized>(rng: &mut R, params: &KeyGenParams) -> Result<Self> {
        let RsaKeyComponents {
            n,
            e,
            d,
            mut primes,
        } = generate_key_components(rng, params)?;
        primes.zeroize();

        Self::from_components(n, e, d)
    }

    /// Constructs an RSA key pair from its components.
    ///
    /// Only the shape of the key is checked: the public part as in
    /// [`RsaPublicKey::new`] and `0 < d < n`.
    pub fn from_components(n: BigUint, e: BigUint, d: BigUint) -> Result<Self> {
        let pubkey_components = RsaPublicKey::new(n, e)?;

        if d.is_zero() || d >= pubkey_components.n {
            return Err(Error::InvalidExponent);
        }

        Ok(Self {
            pubkey_components,
            d,
        })
    }

    /// Constructs an RSA key pair from `K`-byte big-endian strings.
    pub fn from_be_bytes(n: &[u8], e: &[u8], d: &[u8]) -> Result<Self> {
        if d.len() != n.len() {
            return Err(Error::InvalidLength);
        }

        let pubkey_components = RsaPublicKey::from_be_bytes(n, e)?;
        let RsaPublicKey { n, e } = pubkey_components;
        Self::from_components(n, e, BigUint::from_bytes_be(d))
    }

    /// Get the public key from the private key, cloning `n` and `e`.
    pub fn to_public_key(&self) -> RsaPublicKey {
        self.pubkey_components.clone()
    }

    /// Width of the modulus.
    pub fn modulus_size(&self) -> ModulusSize {
        self.pubkey_components.modulus_size()
    }

    /// Modulus as a `K`-byte big-endian string.
    pub fn n_bytes(&self) -> Vec<u8> {
        self.pubkey_components.n_bytes()
    }

    /// Public exponent as a `K`-byte big-endian string.
    pub fn e_bytes(&self) -> Result<Vec<u8>> {
        self.pubkey_components.e_bytes()
    }

    /// Private exponent as a `K`-byte big-endian string, wiped on drop.
    ///
    /// [`RsaPrivateKey::from_components`] guarantees `d < n`.
    pub fn d_bytes(&self) -> Result<Zeroizing<Vec<u8>>> {
        uint_to_zeroizing_be_pad(&self.d, self.size()).map_err(|_| Error::Internal)
    }
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("n", &self.pubkey_components.n)
            .field("e", &self.pubkey_components.e)
            .finish_non_exhaustive()
    }
}

impl PartialEq for RsaPrivateKey {
    #[inline]
    fn eq(&self, other: &RsaPrivateKey) -> bool {
        self.pubkey_components == other.pubkey_components && self.d == other.d
    }
}

impl Eq for RsaPrivateKey {}

impl Zeroize for RsaPrivateKey {
    fn zeroize(&mut self) {
        self.d.zeroize();
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for RsaPrivateKey {}

impl From<RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: RsaPrivateKey) -> Self {
        (&private_key).into()
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: &RsaPrivateKey) -> Self {
        private_key.to_public_key()
    }
}

fn check_public(n: &BigUint, e: &BigUint) -> Result<()> {
    let bits = n.bits();
    if bits < MIN_MODULUS_BITS || bits % 8 != 0 || n.is_even() {
        return Err(Error::InvalidModulus);
    }

    if e <= &BigUint::one() || e >= n {
        return Err(Error::InvalidExponent);
    }

    Ok(())
}
