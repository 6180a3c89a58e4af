//! ⚠️ Low-level "hazmat" RSA-PSS building blocks.
//!
//! # ☢️️ WARNING: HAZARDOUS API ☢️
//!
//! This module holds the raw RSA permutation, the MGF1 mask generator and the
//! EMSA-PSS encoding steps on their own. Applying the permutation to data
//! that was not produced by a well-reviewed padding scheme is insecure, so
//! there are very few valid uses cases for this API. It's intended to be used
//! for implementing well-reviewed higher-level constructions and for testing
//! against known-answer vectors.
//!
//! We do NOT recommend using it to implement any algorithm which has not
//! received extensive peer review by cryptographers.

pub use crate::algorithms::mgf::mgf1;
pub use crate::algorithms::pss::{emsa_pss_encode, emsa_pss_verify, pss_encode, pss_verify};
pub use crate::algorithms::rsa::{rsa_apply, rsa_decrypt, rsa_encrypt, rsa_permute};
pub use crate::errors::VerifyError;
