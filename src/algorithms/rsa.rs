//! The RSA trapdoor permutation

use alloc::vec::Vec;
use num_bigint::BigUint;

use super::pad::uint_to_be_pad;
use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// ⚠️ Computes `x^exp mod n`, refusing any `x` that is not below `n`.
///
/// This is the single permutation behind both signing (with `d`) and
/// verification (with `e`). A zero modulus rejects every input as out of
/// range.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_permute(x: &BigUint, exp: &BigUint, n: &BigUint) -> Result<BigUint> {
    if x >= n {
        return Err(Error::OutOfRange);
    }

    Ok(x.modpow(exp, n))
}

/// ⚠️ Applies the permutation to fixed-width big-endian byte strings.
///
/// `block`, `exponent` and `modulus` must all be `K` bytes long; the result
/// is `K` bytes, left padded with zeros.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
pub fn rsa_apply(block: &[u8], exponent: &[u8], modulus: &[u8]) -> Result<Vec<u8>> {
    let k = modulus.len();
    if block.len() != k || exponent.len() != k {
        return Err(Error::InvalidLength);
    }

    let y = rsa_permute(
        &BigUint::from_bytes_be(block),
        &BigUint::from_bytes_be(exponent),
        &BigUint::from_bytes_be(modulus),
    )?;

    uint_to_be_pad(&y, k)
}

/// ⚠️ Raw RSA with the public exponent of `key`. No padding is performed.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_encrypt<K: PublicKeyParts>(key: &K, m: &BigUint) -> Result<BigUint> {
    rsa_permute(m, key.e(), key.n())
}

/// ⚠️ Raw RSA with the private exponent of `key`. No padding is performed.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_decrypt<K: PrivateKeyParts>(key: &K, c: &BigUint) -> Result<BigUint> {
    rsa_permute(c, key.d(), key.n())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // n = 61 * 53, lambda = lcm(60, 52) = 780, 17 * 2753 = 60 * 780 + 1
    const N: [u8; 2] = hex!("0ca1");
    const E: [u8; 2] = hex!("0011");
    const D: [u8; 2] = hex!("0ac1");

    #[test]
    fn test_apply_known_answer() {
        let c = rsa_apply(&hex!("0041"), &E, &N).unwrap();
        assert_eq!(c, hex!("0ae6"));

        let m = rsa_apply(&c, &D, &N).unwrap();
        assert_eq!(m, hex!("0041"));
    }

    #[test]
    fn test_apply_pads_small_results() {
        assert_eq!(rsa_apply(&hex!("0001"), &D, &N).unwrap(), hex!("0001"));
        assert_eq!(rsa_apply(&hex!("0000"), &E, &N).unwrap(), hex!("0000"));
    }

    #[test]
    fn test_apply_roundtrip_all_blocks() {
        for m in 0u16..0x0ca1 {
            let block = m.to_be_bytes();
            let c = rsa_apply(&block, &E, &N).unwrap();
            assert_eq!(rsa_apply(&c, &D, &N).unwrap(), block);
        }
    }

    #[test]
    fn test_apply_out_of_range() {
        assert_eq!(rsa_apply(&N, &E, &N), Err(Error::OutOfRange));
        assert_eq!(rsa_apply(&hex!("ffff"), &D, &N), Err(Error::OutOfRange));
        assert_eq!(
            rsa_apply(&hex!("0001"), &E, &hex!("0000")),
            Err(Error::OutOfRange)
        );
    }

    #[test]
    fn test_apply_length_mismatch() {
        assert_eq!(rsa_apply(&hex!("41"), &E, &N), Err(Error::InvalidLength));
        assert_eq!(
            rsa_apply(&hex!("0041"), &hex!("000011"), &N),
            Err(Error::InvalidLength)
        );
    }
}
