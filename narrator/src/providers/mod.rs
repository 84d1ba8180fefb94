//! Speech provider implementations.
//!
//! - [`cartesia`] - Cartesia TTS API
//! - [`mock`] - scripted in-process provider for tests

pub mod cartesia;
pub mod mock;

pub use cartesia::{Cartesia, CartesiaConfig};
pub use mock::MockSpeech;
