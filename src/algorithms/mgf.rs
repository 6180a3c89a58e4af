//! MGF1 mask generation function, RFC 8017 § B.2.1

use alloc::vec::Vec;
use digest::{Digest, FixedOutputReset};

use crate::errors::{Error, Result};

/// Largest number of digest blocks MGF1 may emit: the counter is 32 bits wide.
const MAX_BLOCKS: u64 = 1 << 32;

fn check_mask_len(mask_len: usize, h_len: usize) -> Result<()> {
    if mask_len as u64 > MAX_BLOCKS * h_len as u64 {
        return Err(Error::MaskTooLong);
    }
    Ok(())
}

/// XORs the MGF1 stream for `seed` into `out`, covering all of `out`.
///
/// `digest` is reset after every block, so it can be reused by the caller.
pub(crate) fn mgf1_xor<D>(out: &mut [u8], digest: &mut D, seed: &[u8]) -> Result<()>
where
    D: Digest + FixedOutputReset,
{
    let h_len = <D as Digest>::output_size();
    check_mask_len(out.len(), h_len)?;

    for (counter, block) in out.chunks_mut(h_len).enumerate() {
        Digest::update(digest, seed);
        Digest::update(digest, (counter as u32).to_be_bytes());
        let mask = digest.finalize_reset();

        for (o, m) in block.iter_mut().zip(mask.iter()) {
            *o ^= *m;
        }
    }

    Ok(())
}

/// Expands `seed` into a mask of exactly `mask_len` bytes:
/// `D(seed || 0x00000000) || D(seed || 0x00000001) || ...`, truncated.
pub fn mgf1<D>(seed: &[u8], mask_len: usize) -> Result<Vec<u8>>
where
    D: Digest + FixedOutputReset,
{
    check_mask_len(mask_len, <D as Digest>::output_size())?;

    let mut mask = vec![0u8; mask_len];
    mgf1_xor(&mut mask, &mut D::new(), seed)?;
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use sha1::Sha1;
    use sha2::Sha256;

    #[test]
    fn test_mgf1_first_block_is_digest_of_seed_and_zero_counter() {
        let seed = b"seed";
        let mask = mgf1::<Sha256>(seed, 32).unwrap();
        let expected = Sha256::new()
            .chain_update(seed)
            .chain_update([0, 0, 0, 0])
            .finalize();
        assert_eq!(mask.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_mgf1_second_block_uses_counter_one() {
        let seed = b"seed";
        let mask = mgf1::<Sha256>(seed, 40).unwrap();
        let second = Sha256::new()
            .chain_update(seed)
            .chain_update([0, 0, 0, 1])
            .finalize();
        assert_eq!(mask.len(), 40);
        assert_eq!(&mask[32..], &second[..8]);
    }

    #[test]
    fn test_mgf1_known_answer() {
        // MGF1-SHA1("foo", 3) from the PKCS #1 test suite used by many ports.
        assert_eq!(mgf1::<Sha1>(b"foo", 3).unwrap(), hex!("1ac907"));
        assert_eq!(mgf1::<Sha1>(b"foo", 5).unwrap(), hex!("1ac9075cd4"));
        assert_eq!(mgf1::<Sha1>(b"bar", 5).unwrap(), hex!("bc0c655e01"));
    }

    #[test]
    fn test_mgf1_deterministic_and_prefix_stable() {
        let seed = hex!("0123456789abcdef");
        let long = mgf1::<Sha256>(&seed, 95).unwrap();
        assert_eq!(long, mgf1::<Sha256>(&seed, 95).unwrap());

        for len in [0, 1, 31, 32, 33, 64, 94] {
            assert_eq!(mgf1::<Sha256>(&seed, len).unwrap(), &long[..len]);
        }
    }

    #[test]
    fn test_mgf1_xor_is_involution() {
        let seed = b"mask";
        let original = [0x5au8; 50];
        let mut buf = original;
        let mut digest = Sha256::new();

        mgf1_xor(&mut buf, &mut digest, seed).unwrap();
        assert_ne!(buf, original);
        mgf1_xor(&mut buf, &mut digest, seed).unwrap();
        assert_eq!(buf, original);
    }

    #[test]
    fn test_mask_len_limit() {
        assert!(check_mask_len(32 << 32, 32).is_ok());
        assert_eq!(check_mask_len((32 << 32) + 1, 32), Err(Error::MaskTooLong));
    }
}
