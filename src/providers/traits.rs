//! Provider trait for remote text completion.
//!
//! A provider is a black box: prompt in, completion out. It may fail with
//! network, authentication, quota or malformed-response errors; callers
//! going through [`GuardedCallGate`](crate::gate::GuardedCallGate) never see
//! those errors.
//!
//! # Example
//!
//! ```ignore
//! struct Canned;
//!
//! #[async_trait]
//! impl CompletionProvider for Canned {
//!     fn name(&self) -> &str { "canned" }
//!
//!     async fn complete(&self, _prompt: &str) -> Result<String> {
//!         Ok("Always the same answer.".into())
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::Result;

/// Remote text-completion capability.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Complete a single text prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
