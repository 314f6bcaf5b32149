pub trait Hasher {
    /// Lowercase hex digest of `input`.
    fn digest(&self, input: &[u8]) -> String;
}
