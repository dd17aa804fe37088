//! Completion seam used by the answer flow.

use std::{future::Future, pin::Pin};

use ai_llm_service::error_handler::AiLlmError;
use ai_llm_service::service_profiles::LlmServiceProfiles;

/// Something that turns a prompt into answer text with the echoed prompt removed.
pub trait CompletionBackend: Send + Sync {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AiLlmError>> + Send + 'a>>;
}

impl CompletionBackend for LlmServiceProfiles {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AiLlmError>> + Send + 'a>> {
        Box::pin(LlmServiceProfiles::complete(self, prompt))
    }
}
