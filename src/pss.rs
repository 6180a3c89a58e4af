//! Support for the [Probabilistic Signature Scheme] (PSS) a.k.a. RSASSA-PSS.
//!
//! Designed by Mihir Bellare and Phillip Rogaway. Specified in [RFC8017 § 8.1].
//!
//! Salts are always as long as the digest output and the encoded message
//! spans the whole modulus width, so a signature for a `K`-byte key is
//! exactly `K` bytes long.
//!
//! # Usage
//!
//! See [code example in the toplevel rustdoc](../index.html#pss-signatures).
//!
//! [Probabilistic Signature Scheme]: https://en.wikipedia.org/wiki/Probabilistic_signature_scheme
//! [RFC8017 § 8.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.1

mod signature;
mod signing_key;
mod verifying_key;

pub use self::{signature::Signature, signing_key::SigningKey, verifying_key::VerifyingKey};

use alloc::vec::Vec;
use digest::{core_api::BlockSizeUser, Digest, FixedOutputReset};
use num_bigint::BigUint;
use rand_core::CryptoRngCore;

use crate::algorithms::pad::uint_to_be_pad;
use crate::algorithms::pss::*;
use crate::algorithms::rsa::{rsa_decrypt, rsa_encrypt};
use crate::errors::{Error, Result, VerifyError};
use crate::key::{RsaPrivateKey, RsaPublicKey};
use crate::traits::PublicKeyParts;

/// Signs `msg` with `priv_key`, hashing it with `D` and drawing a salt from
/// `rng`.
///
/// Returns a signature exactly as long as the modulus.
pub fn sign<D, R>(rng: &mut R, priv_key: &RsaPrivateKey, msg: &[u8]) -> Result<Vec<u8>>
where
    D: Digest + FixedOutputReset + BlockSizeUser,
    R: CryptoRngCore + ?Sized,
{
    let em = pss_encode::<D, _>(rng, msg, priv_key.size())?;
    sign_encoded(priv_key, &em)
}

/// Checks that `sig` is a signature of `msg` under `pub_key`.
///
/// Every kind of rejection is reported as [`Error::Verification`]; the
/// underlying reason is only logged.
pub fn verify<D>(pub_key: &RsaPublicKey, msg: &[u8], sig: &[u8]) -> Result<()>
where
    D: Digest + FixedOutputReset + BlockSizeUser,
{
    verify_message::<D>(pub_key, msg, &BigUint::from_bytes_be(sig), sig.len())
}

pub(crate) fn verify_message<D>(
    pub_key: &RsaPublicKey,
    msg: &[u8],
    sig: &BigUint,
    sig_len: usize,
) -> Result<()>
where
    D: Digest + FixedOutputReset + BlockSizeUser,
{
    let em = recover_encoded(pub_key, sig, sig_len)?;
    pss_verify::<D>(msg, &em).map_err(rejected)
}

/// Signs an already computed message digest.
pub(crate) fn sign_digest<R, D>(
    rng: &mut R,
    priv_key: &RsaPrivateKey,
    hashed: &[u8],
) -> Result<Vec<u8>>
where
    R: CryptoRngCore + ?Sized,
    D: Digest + FixedOutputReset,
{
    let em = emsa_pss_encode_with_rng::<D, _>(rng, hashed, priv_key.size())?;
    sign_encoded(priv_key, &em)
}

/// Checks a signature against an already computed message digest.
pub(crate) fn verify_digest<D>(
    pub_key: &RsaPublicKey,
    hashed: &[u8],
    sig: &BigUint,
    sig_len: usize,
) -> Result<()>
where
    D: Digest + FixedOutputReset,
{
    let em = recover_encoded(pub_key, sig, sig_len)?;
    emsa_pss_verify::<D>(hashed, &em).map_err(rejected)
}

fn sign_encoded(priv_key: &RsaPrivateKey, em: &[u8]) -> Result<Vec<u8>> {
    let s = rsa_decrypt(priv_key, &BigUint::from_bytes_be(em)).map_err(|err| {
        log::warn!("encoded message does not fit below the modulus: {}", err);
        err
    })?;

    uint_to_be_pad(&s, priv_key.size())
}

/// Applies the public permutation to a signature, yielding the `K`-byte
/// encoded message.
fn recover_encoded(pub_key: &RsaPublicKey, sig: &BigUint, sig_len: usize) -> Result<Vec<u8>> {
    if sig_len != pub_key.size() {
        log::debug!(
            "signature is {} bytes, expected {}",
            sig_len,
            pub_key.size()
        );
        return Err(Error::Verification);
    }

    let m = rsa_encrypt(pub_key, sig).map_err(|_| {
        log::debug!("signature representative is not below the modulus");
        Error::Verification
    })?;

    uint_to_be_pad(&m, pub_key.size())
}

fn rejected(err: VerifyError) -> Error {
    log::debug!("PSS verification failed: {}", err);
    err.into()
}
