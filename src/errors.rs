//! Error types.

/// Alias for [`core::result::Result`] with the `rsa_pss` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Message exceeds the input limit of the digest.
    MessageTooLong,

    /// Digest output is too large to fit in an encoded message for this modulus.
    HashTooLong,

    /// Requested mask is longer than MGF1 can produce (2^32 digest blocks).
    MaskTooLong,

    /// Integer value of a block is not below the modulus.
    OutOfRange,

    /// Signature is invalid.
    Verification,

    /// Modulus size is not a whole number of bytes or is too small.
    InvalidModulusSize,

    /// Invalid modulus.
    InvalidModulus,

    /// Invalid exponent.
    InvalidExponent,

    /// Input does not have the expected length.
    InvalidLength,

    /// Key generation hit its configured attempt limit.
    KeyGenerationExhausted,

    /// A key invariant that the constructors establish does not hold.
    Internal,
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::MessageTooLong => write!(f, "message too long"),
            Error::HashTooLong => write!(f, "hash too long for modulus"),
            Error::MaskTooLong => write!(f, "mask too long"),
            Error::OutOfRange => write!(f, "message representative out of range"),
            Error::Verification => write!(f, "verification error"),
            Error::InvalidModulusSize => write!(f, "invalid modulus size"),
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::InvalidExponent => write!(f, "invalid exponent"),
            Error::InvalidLength => write!(f, "invalid length"),
            Error::KeyGenerationExhausted => write!(f, "key generation attempts exhausted"),
            Error::Internal => write!(f, "internal error"),
        }
    }
}

impl From<Error> for signature::Error {
    fn from(err: Error) -> Self {
        #[cfg(feature = "std")]
        {
            Self::from_source(err)
        }
        #[cfg(not(feature = "std"))]
        {
            let _ = err;
            Self::new()
        }
    }
}

/// Reason an encoded message was rejected during PSS verification.
///
/// Decoding stops at the first failing check, in the order the variants are
/// listed. Callers of the high-level API only ever see
/// [`Error::Verification`]; distinguishing the reasons outwardly would turn
/// the verifier into an oracle.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum VerifyError {
    /// Last byte of the encoded message is not `0xbc`.
    InvalidTrailer,

    /// Most significant bit of the encoded message is set.
    InvalidLeadBit,

    /// Unmasked data block does not start with `00 .. 00 01`.
    InvalidPadding,

    /// Recomputed hash does not match the one carried in the encoded message.
    HashMismatch,
}

impl core::fmt::Display for VerifyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            VerifyError::InvalidTrailer => write!(f, "invalid trailer byte"),
            VerifyError::InvalidLeadBit => write!(f, "leading bit is set"),
            VerifyError::InvalidPadding => write!(f, "invalid padding"),
            VerifyError::HashMismatch => write!(f, "hash mismatch"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for VerifyError {}

impl From<VerifyError> for Error {
    fn from(_: VerifyError) -> Self {
        Error::Verification
    }
}
