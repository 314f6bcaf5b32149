pub mod client;
pub mod envelope;

pub use client::ApiClient;
pub use envelope::Envelope;
