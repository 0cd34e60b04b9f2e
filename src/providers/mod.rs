//! Remote completion providers.
//!
//! [`CompletionProvider`] is the seam between guarded calls and a hosted
//! model. [`GeminiClient`] is the built-in implementation; anything else can
//! be plugged in via [`HeimdallBuilder::provider()`](crate::HeimdallBuilder::provider).

pub mod gemini;
pub mod traits;

pub use gemini::{GeminiClient, GeminiConfig};
pub use traits::CompletionProvider;
