use sha2::{Digest, Sha512};

use super::hasher::Hasher;

#[derive(Debug, Default, Clone, Copy)]
pub struct Sha512Hasher;

impl Hasher for Sha512Hasher {
    fn digest(&self, input: &[u8]) -> String {
        format!("{:x}", Sha512::digest(input))
    }
}
