//! Text-generation seam.
//!
//! Pipelines depend on [`TextGenerator`] instead of [`OllamaService`] so a
//! client is constructed once by the caller and passed in, and tests can
//! substitute a stub that counts calls.

use std::future::Future;
use std::pin::Pin;

use crate::error_handler::Result;
use crate::services::ollama_service::OllamaService;

/// Boxed future returned by [`TextGenerator::generate`].
pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// Anything that can turn a prompt into generated text with a named model.
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` to `model` and returns the generated text.
    fn generate<'a>(&'a self, prompt: &'a str, model: &'a str) -> GenerateFuture<'a>;
}

impl TextGenerator for OllamaService {
    fn generate<'a>(&'a self, prompt: &'a str, model: &'a str) -> GenerateFuture<'a> {
        Box::pin(self.generate_with_model(prompt, model))
    }
}
