//! Fixed-width big-endian export of `BigUint` values

use alloc::vec::Vec;
use num_bigint::BigUint;
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Copies `input` into a zeroed buffer of `width` bytes, right aligned.
///
/// A value wider than `width` is an error, never truncated.
#[inline]
fn left_pad(input: &[u8], width: usize) -> Result<Vec<u8>> {
    if input.len() > width {
        return Err(Error::InvalidLength);
    }

    let mut out = vec![0u8; width];
    out[width - input.len()..].copy_from_slice(input);
    Ok(out)
}

/// Exports `input` as exactly `width` big-endian bytes.
#[inline]
pub(crate) fn uint_to_be_pad(input: &BigUint, width: usize) -> Result<Vec<u8>> {
    left_pad(&input.to_bytes_be(), width)
}

/// Like [`uint_to_be_pad`], for secret values: the intermediate and the
/// returned buffer are wiped when dropped.
#[inline]
pub(crate) fn uint_to_zeroizing_be_pad(
    input: &BigUint,
    width: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    let raw = Zeroizing::new(input.to_bytes_be());
    left_pad(&raw, width).map(Zeroizing::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_pad() {
        let input = [0xaa, 0xbb, 0xcc];

        let padded = left_pad(&input, 5).unwrap();
        assert_eq!(padded, [0x00, 0x00, 0xaa, 0xbb, 0xcc]);

        let exact = left_pad(&input, 3).unwrap();
        assert_eq!(exact, input);

        assert_eq!(left_pad(&input, 2), Err(Error::InvalidLength));
    }

    #[test]
    fn test_zero_exports_as_all_zero() {
        let out = uint_to_be_pad(&BigUint::from(0u32), 4).unwrap();
        assert_eq!(out, [0u8; 4]);
    }

    #[test]
    fn test_zeroizing_pad_matches_plain() {
        let value = BigUint::from(0x0102_0304u32);
        let plain = uint_to_be_pad(&value, 8).unwrap();
        let secret = uint_to_zeroizing_be_pad(&value, 8).unwrap();
        assert_eq!(plain.as_slice(), secret.as_slice());
    }
}
