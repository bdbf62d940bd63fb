//! Turns a study request into validated domain objects: prompt, model call,
//! JSON extraction, validation, all under a bounded retry loop.

pub mod client;
pub mod error;
pub mod extractor;
pub mod prompt;
pub mod request;
pub mod result;
pub mod retry;
pub mod validator;

pub use client::{GeminiClient, GenerationClient, SamplingProfile};
pub use error::{ErrorKind, GenerationError, GenerationFailure};
pub use request::{GenerationRequest, TaskKind, DEFAULT_LANGUAGE};
pub use result::GenerationResult;
pub use retry::{GenerationPipeline, RetryPolicy};
pub use validator::GeneratedItem;
