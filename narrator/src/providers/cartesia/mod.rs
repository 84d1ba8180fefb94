//! Cartesia text-to-speech client.
//!
//! Only the byte-synthesis endpoint is implemented: one JSON request in,
//! one complete audio file out.

mod audio;
mod client;
mod config;

pub use client::Cartesia;
pub use config::CartesiaConfig;
