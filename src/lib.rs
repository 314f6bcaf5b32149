//! Ranked friends panel for the Codeforces API.
//!
//! The crate signs `user.friends` requests, looks up ratings for the returned
//! handles and orders them with pinned handles first. A small axum server
//! exposes the resulting view model to whatever shell renders the panel.

pub mod api;
pub mod config;
pub mod crypto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod panel;
pub mod pins;
pub mod pipeline;
pub mod store;
