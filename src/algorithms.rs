//! Useful algorithms related to RSA-PSS.

pub(crate) mod generate;
#[cfg_attr(not(feature = "hazmat"), allow(dead_code))]
pub(crate) mod mgf;
pub(crate) mod pad;
pub(crate) mod pss;
#[cfg_attr(not(feature = "hazmat"), allow(dead_code))]
pub(crate) mod rsa;
