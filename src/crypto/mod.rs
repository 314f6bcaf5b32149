pub mod hasher;
pub mod sha512;
pub mod signer;
