//! Property-based tests.

use proptest::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use rsa_pss::{
    pss,
    signature::{Keypair, RandomizedSigner, SignatureEncoding, Verifier},
    ExponentMode, ModulusSize, RsaPrivateKey,
};
use sha2::Sha256;

prop_compose! {
    // WARNING: do *NOT* copy and paste this code. It's insecure and optimized for test speed.
    fn private_key()(seed in any::<[u8; 32]>()) -> RsaPrivateKey {
        let mut rng = ChaCha8Rng::from_seed(seed);
        RsaPrivateKey::new(&mut rng, ModulusSize::new(576).unwrap(), ExponentMode::Fixed).unwrap()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn pss_sign_roundtrip(
        private_key in private_key(),
        msg in any::<Vec<u8>>(),
        seed in any::<[u8; 32]>(),
    ) {
        let mut rng = ChaCha8Rng::from_seed(seed);
        let signing_key = pss::SigningKey::<Sha256>::new(private_key);
        let signature_bytes = signing_key.sign_with_rng(&mut rng, &msg).to_bytes();
        prop_assert_eq!(signature_bytes.len(), 72);

        let verifying_key = signing_key.verifying_key();
        let signature = pss::Signature::try_from(&*signature_bytes).unwrap();
        prop_assert!(verifying_key.verify(&msg, &signature).is_ok());
    }

    #[test]
    fn pss_rejects_bit_flips(
        private_key in private_key(),
        msg in any::<Vec<u8>>(),
        bit in 0usize..576,
    ) {
        let mut rng = ChaCha8Rng::from_seed([0; 32]);
        let public_key = private_key.to_public_key();
        let mut sig = pss::sign::<Sha256, _>(&mut rng, &private_key, &msg).unwrap();

        sig[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(pss::verify::<Sha256>(&public_key, &msg, &sig).is_err());
    }

    #[test]
    fn pss_rejects_other_messages(
        private_key in private_key(),
        msg in any::<Vec<u8>>(),
        other in any::<Vec<u8>>(),
    ) {
        prop_assume!(msg != other);

        let mut rng = ChaCha8Rng::from_seed([0; 32]);
        let sig = pss::sign::<Sha256, _>(&mut rng, &private_key, &msg).unwrap();
        prop_assert!(pss::verify::<Sha256>(&private_key.to_public_key(), &other, &sig).is_err());
    }
}

#[cfg(feature = "hazmat")]
mod hazmat {
    use super::*;
    use rsa_pss::hazmat::mgf1;

    proptest! {
        #[test]
        fn mgf1_is_prefix_stable(
            seed in any::<Vec<u8>>(),
            len in 0usize..512,
            shorter in 0usize..512,
        ) {
            let shorter = shorter.min(len);
            let mask = mgf1::<Sha256>(&seed, len).unwrap();

            prop_assert_eq!(mask.len(), len);
            prop_assert_eq!(&mask, &mgf1::<Sha256>(&seed, len).unwrap());
            prop_assert_eq!(&mask[..shorter], &mgf1::<Sha256>(&seed, shorter).unwrap()[..]);
        }
    }
}
