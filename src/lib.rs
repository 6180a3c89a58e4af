#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo_small.png")]
#![warn(missing_docs)]

//! # Supported algorithms
//!
//! This crate implements the RSASSA-PSS signature scheme described in
//! [RFC8017 § 8.1] with a salt as long as the digest output:
//!
//! - [key generation](#key-generation) with a fixed or random public exponent
//! - [PSS signatures](#pss-signatures) through the [`signature`] traits or
//!   the plain [`pss::sign`] and [`pss::verify`] functions
//! - the raw permutation, MGF1 and the EMSA-PSS steps in `hazmat`
//!   (behind the `hazmat` feature)
//! - a 64-bit [`mini`] RSA for experimenting with the number theory
//!
//! # Usage
//!
//! ## Key generation
//!
//! ```
//! use rsa_pss::{ExponentMode, KeyGenParams, ModulusSize, RsaPrivateKey, RsaPublicKey};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let private_key = RsaPrivateKey::new(&mut rng, ModulusSize::RSA_1024, ExponentMode::Fixed)
//!     .expect("failed to generate a key");
//! let public_key = RsaPublicKey::from(&private_key);
//! assert_eq!(public_key.n_bytes().len(), 128);
//!
//! // Bounded search with a random public exponent
//! let params = KeyGenParams::new(ModulusSize::RSA_1024)
//!     .with_exponent(ExponentMode::Random)
//!     .with_max_attempts(1_000_000);
//! let private_key = RsaPrivateKey::generate(&mut rng, &params).expect("failed to generate a key");
//! assert_eq!(private_key.d_bytes().unwrap().len(), 128);
//! ```
//!
//! ## PSS signatures
//!
//! Note: requires `sha2` feature of `rsa-pss` crate is enabled.
//!
#![cfg_attr(feature = "sha2", doc = "```")]
#![cfg_attr(not(feature = "sha2"), doc = "```ignore")]
//! use rsa_pss::ModulusSize;
//! use rsa_pss::pss::SigningKey;
//! use rsa_pss::signature::{Keypair, RandomizedSigner, SignatureEncoding, Verifier};
//! use rsa_pss::sha2::Sha256;
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let signing_key = SigningKey::<Sha256>::random(&mut rng, ModulusSize::RSA_1024)
//!     .expect("failed to generate a key");
//! let verifying_key = signing_key.verifying_key();
//!
//! // Sign
//! let data = b"hello world";
//! let signature = signing_key.sign_with_rng(&mut rng, data);
//! assert_eq!(signature.to_bytes().len(), 128);
//!
//! // Verify
//! verifying_key.verify(data, &signature).expect("failed to verify");
//! ```
//!
//! The same without the trait machinery:
//!
#![cfg_attr(feature = "sha2", doc = "```")]
#![cfg_attr(not(feature = "sha2"), doc = "```ignore")]
//! use rsa_pss::{pss, ExponentMode, ModulusSize, RsaPrivateKey, RsaPublicKey};
//! use rsa_pss::sha2::Sha384;
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let private_key = RsaPrivateKey::new(&mut rng, ModulusSize::RSA_1024, ExponentMode::Fixed)
//!     .expect("failed to generate a key");
//! let public_key = RsaPublicKey::from(&private_key);
//!
//! let signature = pss::sign::<Sha384, _>(&mut rng, &private_key, b"test").expect("failed to sign");
//! pss::verify::<Sha384>(&public_key, b"test", &signature).expect("failed to verify");
//! assert!(pss::verify::<Sha384>(&public_key, b"tset", &signature).is_err());
//! ```
//!
//! [RFC8017 § 8.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.1

#[cfg(doctest)]
pub struct ReadmeDoctests;

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use num_bigint::BigUint;
pub use rand_core;
pub use signature;

mod algorithms;
pub mod errors;
pub mod mini;
pub mod pss;
pub mod traits;

mod key;

#[cfg(feature = "sha2")]
pub use sha2;

pub use crate::{
    errors::{Error, Result, VerifyError},
    key::{ExponentMode, KeyGenParams, ModulusSize, RsaPrivateKey, RsaPublicKey},
    traits::{PrivateKeyParts, PublicKeyParts},
};

#[cfg(feature = "hazmat")]
pub mod hazmat;
