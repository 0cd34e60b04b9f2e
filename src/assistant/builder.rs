//! Builder for configuring assistant instances

use std::sync::Arc;

use tracing::info;

use super::Assistant;
use crate::cache::CacheConfig;
use crate::gate::{GateConfig, GuardedCallGate, RateGate};
use crate::providers::{CompletionProvider, GeminiClient, GeminiConfig};
use crate::{HeimdallError, Result};

/// Main entry point for creating assistant instances.
pub struct Heimdall;

impl Heimdall {
    /// Create a new builder for configuring the assistant.
    pub fn builder() -> HeimdallBuilder {
        HeimdallBuilder::new()
    }
}

/// Builder for configuring assistant instances.
pub struct HeimdallBuilder {
    gemini_key: Option<String>,
    gemini_config: GeminiConfig,
    provider: Option<Arc<dyn CompletionProvider>>,
    chat_gate: GateConfig,
    tools_gate: GateConfig,
    interview_gate: GateConfig,
    chat_cache: CacheConfig,
    tools_cache: CacheConfig,
}

impl HeimdallBuilder {
    pub fn new() -> Self {
        Self {
            gemini_key: None,
            gemini_config: GeminiConfig::default(),
            provider: None,
            chat_gate: GateConfig::chat(),
            tools_gate: GateConfig::default(),
            interview_gate: GateConfig::interview(),
            chat_cache: CacheConfig::chat(),
            tools_cache: CacheConfig::default(),
        }
    }

    /// Configure the Gemini provider.
    pub fn gemini(mut self, api_key: impl Into<String>) -> Self {
        self.gemini_key = Some(api_key.into());
        self
    }

    /// Override the Gemini model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.gemini_config.model = model.into();
        self
    }

    /// Replace the full Gemini client configuration.
    pub fn gemini_config(mut self, config: GeminiConfig) -> Self {
        self.gemini_config = config;
        self
    }

    /// Use a custom provider. Takes precedence over [`gemini()`](Self::gemini).
    pub fn provider(mut self, provider: Arc<dyn CompletionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Rate limits for career chat (default: [`GateConfig::chat()`]).
    pub fn chat_gate(mut self, config: GateConfig) -> Self {
        self.chat_gate = config;
        self
    }

    /// Rate limits shared by all structured tools (default: [`GateConfig::default()`]).
    pub fn tools_gate(mut self, config: GateConfig) -> Self {
        self.tools_gate = config;
        self
    }

    /// Pacing for interview turns and feedback (default: [`GateConfig::interview()`]).
    pub fn interview_gate(mut self, config: GateConfig) -> Self {
        self.interview_gate = config;
        self
    }

    pub fn chat_cache(mut self, config: CacheConfig) -> Self {
        self.chat_cache = config;
        self
    }

    /// Cache settings applied to each tool's own cache.
    pub fn tools_cache(mut self, config: CacheConfig) -> Self {
        self.tools_cache = config;
        self
    }

    /// Build the assistant.
    ///
    /// Fails with [`HeimdallError::NoProvider`] when neither a Gemini key
    /// nor a custom provider was given.
    pub fn build(self) -> Result<Assistant> {
        let provider: Arc<dyn CompletionProvider> = match (self.provider, self.gemini_key) {
            (Some(provider), _) => provider,
            (None, Some(key)) => Arc::new(GeminiClient::new(key, self.gemini_config)?),
            (None, None) => return Err(HeimdallError::NoProvider),
        };

        info!(
            provider = provider.name(),
            chat_min_interval = ?self.chat_gate.min_interval,
            tools_min_interval = ?self.tools_gate.min_interval,
            interview_min_interval = ?self.interview_gate.min_interval,
            "building assistant"
        );

        let tools = Arc::new(RateGate::new("tools", self.tools_gate));
        let interview = Arc::new(RateGate::new("interview", self.interview_gate));
        let cache = &self.tools_cache;

        Ok(Assistant {
            chat: GuardedCallGate::new(
                "chat",
                Arc::clone(&provider),
                self.chat_gate,
                &self.chat_cache,
            ),
            resume: tool_gate("resume_review", &provider, &tools, cache),
            job_fit: tool_gate("job_fit", &provider, &tools, cache),
            cover_letter: tool_gate("cover_letter", &provider, &tools, cache),
            rewrite: tool_gate("resume_rewrite", &provider, &tools, cache),
            rewrite_summary: tool_gate("rewrite_summary", &provider, &tools, cache),
            interview: tool_gate("interview", &provider, &interview, cache),
            feedback: tool_gate("interview_feedback", &provider, &interview, cache),
            tools,
            interview_pacing: interview,
        })
    }
}

fn tool_gate<T: Clone + Send + Sync + 'static>(
    name: &str,
    provider: &Arc<dyn CompletionProvider>,
    gate: &Arc<RateGate>,
    cache: &CacheConfig,
) -> GuardedCallGate<T> {
    GuardedCallGate::with_shared_gate(name, Arc::clone(provider), Arc::clone(gate), cache)
}

impl Default for HeimdallBuilder {
    fn default() -> Self {
        Self::new()
    }
}
