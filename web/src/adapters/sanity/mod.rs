//! Sanity adapter
//!
//! Implementation of the Sanity HTTP API client and the pitch repository on top of it.

pub mod client;
pub mod pitch_repo;

pub use client::SanityClient;
pub use pitch_repo::SanityPitchRepository;
