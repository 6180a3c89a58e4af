//! EMSA-PSS encoding and verification, [RFC8017 § 9.1].
//!
//! The salt is always as long as the digest output. With `hLen` the digest
//! size and `emLen` the modulus size in bytes, an encoded message is laid out
//! as:
//!
//! ```text
//! EM = maskedDB (emLen - hLen - 1) || H (hLen) || 0xbc
//! DB = 0x00 .. 0x00 (emLen - 2 hLen - 2) || 0x01 || salt (hLen)
//! ```
//!
//! [RFC8017 § 9.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-9.1

use alloc::vec::Vec;
use digest::{core_api::BlockSizeUser, Digest, FixedOutputReset};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConstantTimeEq};

use super::mgf::mgf1_xor;
use crate::errors::{Error, Result, VerifyError};

/// Fixed zero prefix of `M'`.
const PREFIX: [u8; 8] = [0u8; 8];

/// Final byte of every encoded message.
const TRAILER: u8 = 0xbc;

/// Digests with a 64-byte block (SHA-1, SHA-224, SHA-256) append a 64-bit
/// bit count, which caps their input at 2^61 - 1 bytes.
const MAX_MD64_INPUT_LEN: u64 = (1 << 61) - 1;

/// Rejects messages longer than the input limit of `D`.
pub(crate) fn check_message_len<D: BlockSizeUser>(len: usize) -> Result<()> {
    if D::block_size() == 64 && len as u64 > MAX_MD64_INPUT_LEN {
        return Err(Error::MessageTooLong);
    }
    Ok(())
}

/// Smallest encoded message that fits `H`, the trailer, the `0x01`
/// separator and a salt as long as the digest.
#[inline]
fn min_em_len(h_len: usize) -> usize {
    2 * h_len + 2
}

/// `H = D(0x00 * 8 || m_hash || salt)`, leaving `hash` reset.
fn hash_m_prime<D>(hash: &mut D, m_hash: &[u8], salt: &[u8]) -> digest::Output<D>
where
    D: Digest + FixedOutputReset,
{
    Digest::update(hash, PREFIX);
    Digest::update(hash, m_hash);
    Digest::update(hash, salt);
    hash.finalize_reset()
}

/// Builds an `em_len`-byte encoded message from a message digest and salt.
///
/// `m_hash` and `salt` must both be exactly as long as the output of `D`.
pub fn emsa_pss_encode<D>(m_hash: &[u8], salt: &[u8], em_len: usize) -> Result<Vec<u8>>
where
    D: Digest + FixedOutputReset,
{
    let h_len = <D as Digest>::output_size();

    if m_hash.len() != h_len || salt.len() != h_len {
        return Err(Error::InvalidLength);
    }

    if em_len < min_em_len(h_len) {
        return Err(Error::HashTooLong);
    }

    let db_len = em_len - h_len - 1;
    let ps_len = db_len - h_len - 1;

    let mut em = vec![0u8; em_len];
    let (db, rest) = em.split_at_mut(db_len);
    let (h, trailer) = rest.split_at_mut(h_len);

    let mut hash = D::new();
    h.copy_from_slice(&hash_m_prime(&mut hash, m_hash, salt));

    // PS is already zero.
    db[ps_len] = 0x01;
    db[ps_len + 1..].copy_from_slice(salt);

    mgf1_xor(db, &mut hash, h)?;

    // Keeps the encoded integer below a modulus of exactly 8 * em_len bits.
    db[0] &= 0x7f;

    trailer[0] = TRAILER;

    Ok(em)
}

/// Draws a fresh salt from `rng` and encodes `m_hash`.
pub(crate) fn emsa_pss_encode_with_rng<D, R>(
    rng: &mut R,
    m_hash: &[u8],
    em_len: usize,
) -> Result<Vec<u8>>
where
    D: Digest + FixedOutputReset,
    R: CryptoRngCore + ?Sized,
{
    let mut salt = vec![0u8; <D as Digest>::output_size()];
    rng.fill_bytes(&mut salt);

    emsa_pss_encode::<D>(m_hash, &salt, em_len)
}

/// Hashes `msg`, draws a salt and returns the `em_len`-byte encoded message.
pub fn pss_encode<D, R>(rng: &mut R, msg: &[u8], em_len: usize) -> Result<Vec<u8>>
where
    D: Digest + FixedOutputReset + BlockSizeUser,
    R: CryptoRngCore + ?Sized,
{
    check_message_len::<D>(msg.len())?;
    let m_hash = D::digest(msg);

    emsa_pss_encode_with_rng::<D, _>(rng, &m_hash, em_len)
}

/// Checks that `em` is a valid encoding of the message digest `m_hash`.
///
/// The first failing check determines the error. An `em` too short to hold
/// the layout is reported as [`VerifyError::InvalidPadding`], an `m_hash` of
/// the wrong length as [`VerifyError::HashMismatch`].
pub fn emsa_pss_verify<D>(m_hash: &[u8], em: &[u8]) -> core::result::Result<(), VerifyError>
where
    D: Digest + FixedOutputReset,
{
    let h_len = <D as Digest>::output_size();
    let em_len = em.len();

    if em_len < min_em_len(h_len) {
        return Err(VerifyError::InvalidPadding);
    }

    if em[em_len - 1] != TRAILER {
        return Err(VerifyError::InvalidTrailer);
    }

    if em[0] & 0x80 != 0 {
        return Err(VerifyError::InvalidLeadBit);
    }

    let db_len = em_len - h_len - 1;
    let ps_len = db_len - h_len - 1;
    let (masked_db, rest) = em.split_at(db_len);
    let h = &rest[..h_len];

    let mut hash = D::new();
    let mut db = masked_db.to_vec();
    mgf1_xor(&mut db, &mut hash, h).map_err(|_| VerifyError::InvalidPadding)?;

    // The leading byte is ignored when it is padding. At the minimum length
    // it is the separator and only its top bit was cleared by the encoder.
    if ps_len > 0 {
        db[0] = 0x00;
    } else {
        db[0] &= 0x7f;
    }

    let (ps, rest) = db.split_at(ps_len);
    let padding_ok = ps
        .iter()
        .fold(Choice::from(1u8), |acc, b| acc & b.ct_eq(&0x00))
        & rest[0].ct_eq(&0x01);
    if !bool::from(padding_ok) {
        return Err(VerifyError::InvalidPadding);
    }

    let salt = &rest[1..];
    let h0 = hash_m_prime(&mut hash, m_hash, salt);

    if m_hash.len() != h_len || !bool::from(h0.as_slice().ct_eq(h)) {
        return Err(VerifyError::HashMismatch);
    }

    Ok(())
}

/// Hashes `msg` and checks `em` against it.
pub fn pss_verify<D>(msg: &[u8], em: &[u8]) -> core::result::Result<(), VerifyError>
where
    D: Digest + FixedOutputReset + BlockSizeUser,
{
    // A message the digest cannot absorb has no valid encoding.
    if check_message_len::<D>(msg.len()).is_err() {
        return Err(VerifyError::HashMismatch);
    }

    emsa_pss_verify::<D>(&D::digest(msg), em)
}
