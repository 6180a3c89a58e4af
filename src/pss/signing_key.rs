use super::{sign, sign_digest, Signature, VerifyingKey};
use crate::key::{ExponentMode, KeyGenParams, ModulusSize};
use crate::{Result, RsaPrivateKey};
use core::marker::PhantomData;
use digest::{core_api::BlockSizeUser, Digest, FixedOutputReset};
use rand_core::CryptoRngCore;
use signature::{
    hazmat::RandomizedPrehashSigner, Keypair, RandomizedDigestSigner, RandomizedSigner,
};
use zeroize::ZeroizeOnDrop;

#[cfg(feature = "getrandom")]
use {
    rand_core::OsRng,
    signature::{hazmat::PrehashSigner, Signer},
};

/// Signing key for producing RSASSA-PSS signatures as described in
/// [RFC8017 § 8.1].
///
/// The salt is always as long as the output of `D` and is drawn fresh from
/// the caller's RNG for every signature, so signing the same message twice
/// gives different signatures. A modulus narrower than `2 * hLen + 2` bytes
/// cannot sign with `D` and fails with
/// [`Error::HashTooLong`](crate::Error::HashTooLong).
///
/// [RFC8017 § 8.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.1
#[derive(Debug, Clone)]
pub struct SigningKey<D>
where
    D: Digest,
{
    inner: RsaPrivateKey,
    phantom: PhantomData<D>,
}

impl<D> SigningKey<D>
where
    D: Digest,
{
    /// Create a new RSASSA-PSS signing key.
    pub fn new(key: RsaPrivateKey) -> Self {
        Self {
            inner: key,
            phantom: Default::default(),
        }
    }

    /// Generate a new random RSASSA-PSS signing key with `e = 65537`.
    pub fn random<R: CryptoRngCore + ?Sized>(rng: &mut R, size: ModulusSize) -> Result<Self> {
        Self::random_with_params(rng, &KeyGenParams::new(size).with_exponent(ExponentMode::Fixed))
    }

    /// Generate a new random RSASSA-PSS signing key according to `params`.
    pub fn random_with_params<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        params: &KeyGenParams,
    ) -> Result<Self> {
        Ok(Self::new(RsaPrivateKey::generate(rng, params)?))
    }
}

//
// `*Signer` trait impls
//

/// Signs a digest already fed with the message.
impl<D> RandomizedDigestSigner<D, Signature> for SigningKey<D>
where
    D: Digest + FixedOutputReset,
{
    fn try_sign_digest_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        digest: D,
    ) -> signature::Result<Signature> {
        sign_digest::<_, D>(rng, &self.inner, &digest.finalize())?
            .as_slice()
            .try_into()
    }
}

impl<D> RandomizedSigner<Signature> for SigningKey<D>
where
    D: Digest + FixedOutputReset + BlockSizeUser,
{
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> signature::Result<Signature> {
        sign::<D, _>(rng, &self.inner, msg)?.as_slice().try_into()
    }
}

/// `prehash` must be exactly as long as the output of `D`.
impl<D> RandomizedPrehashSigner<Signature> for SigningKey<D>
where
    D: Digest + FixedOutputReset,
{
    fn sign_prehash_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        prehash: &[u8],
    ) -> signature::Result<Signature> {
        sign_digest::<_, D>(rng, &self.inner, prehash)?
            .as_slice()
            .try_into()
    }
}

/// Draws the salt from [`OsRng`].
#[cfg(feature = "getrandom")]
impl<D> PrehashSigner<Signature> for SigningKey<D>
where
    D: Digest + FixedOutputReset,
{
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<Signature> {
        self.sign_prehash_with_rng(&mut OsRng, prehash)
    }
}

/// Draws the salt from [`OsRng`].
#[cfg(feature = "getrandom")]
impl<D> Signer<Signature> for SigningKey<D>
where
    D: Digest + FixedOutputReset + BlockSizeUser,
{
    fn try_sign(&self, msg: &[u8]) -> signature::Result<Signature> {
        self.try_sign_with_rng(&mut OsRng, msg)
    }
}

//
// Other trait impls
//

impl<D> AsRef<RsaPrivateKey> for SigningKey<D>
where
    D: Digest,
{
    fn as_ref(&self) -> &RsaPrivateKey {
        &self.inner
    }
}

impl<D> From<RsaPrivateKey> for SigningKey<D>
where
    D: Digest,
{
    fn from(key: RsaPrivateKey) -> Self {
        Self::new(key)
    }
}

impl<D> From<SigningKey<D>> for RsaPrivateKey
where
    D: Digest,
{
    fn from(key: SigningKey<D>) -> Self {
        key.inner
    }
}

impl<D> Keypair for SigningKey<D>
where
    D: Digest,
{
    type VerifyingKey = VerifyingKey<D>;
    fn verifying_key(&self) -> Self::VerifyingKey {
        VerifyingKey::new(self.inner.to_public_key())
    }
}

impl<D> ZeroizeOnDrop for SigningKey<D> where D: Digest {}
