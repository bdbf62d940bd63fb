use std::{sync::Arc, time::Duration};

use crate::generation::{
    client::{GenerationClient, SamplingProfile},
    error::{GenerationError, GenerationFailure},
    extractor::extract_json,
    prompt::build_prompt,
    request::GenerationRequest,
    result::GenerationResult,
    validator::GeneratedItem,
};

pub const MAX_ATTEMPTS: u32 = 3;
pub const RETRY_BASE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            base_delay: RETRY_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Linear backoff: attempt `n` (1-based) waits `(n - 1) * base_delay`.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        self.base_delay * attempt.saturating_sub(1)
    }
}

/// Drives generate, extract and validate under a shared retry budget.
/// Attempts are strictly sequential and each runs to completion.
#[derive(Clone)]
pub struct GenerationPipeline {
    client: Arc<dyn GenerationClient>,
    policy: RetryPolicy,
}

impl GenerationPipeline {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self::with_policy(client, RetryPolicy::default())
    }

    pub fn with_policy(client: Arc<dyn GenerationClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Builds the prompt once, then retries generation until a batch of `T`
    /// validates or the budget is spent.
    pub async fn generate<T: GeneratedItem>(&self, request: &GenerationRequest) -> GenerationResult<T> {
        debug_assert_eq!(request.task(), T::TASK);

        let prompt = build_prompt(request);
        log::info!(
            "Generating {} (count={}, language={})",
            request.task(),
            request.count(),
            request.language()
        );

        self.run_with(&prompt, request.task().profile(), |raw| {
            extract_json(raw).and_then(T::validate)
        })
        .await
        .into()
    }

    /// The retry loop with a caller-supplied parser, for tasks such as chat
    /// that do not produce JSON.
    ///
    /// `MissingApiKey` and `InvalidApiKey` end the loop on first sight; the
    /// configuration cannot change between attempts.
    pub async fn run_with<T, F>(
        &self,
        prompt: &str,
        profile: SamplingProfile,
        parse: F,
    ) -> Result<T, GenerationFailure>
    where
        F: Fn(&str) -> Result<T, GenerationError>,
    {
        let mut attempt = 1;
        loop {
            let outcome = match self.client.generate(prompt, profile).await {
                Ok(raw) => parse(&raw),
                Err(error) => Err(error),
            };

            let error = match outcome {
                Ok(value) => {
                    if attempt > 1 {
                        log::info!("Generation succeeded on attempt {}", attempt);
                    }
                    return Ok(value);
                }
                Err(error) => error,
            };

            let kind = error.kind();
            if let GenerationError::InvalidAiResponse { raw } = &error {
                log::debug!("Unparseable AI response: {}", raw);
            }

            if attempt >= self.policy.max_attempts || kind.is_configuration_error() {
                log::error!(
                    "Generation failed after {} attempt(s) ({:?}): {}",
                    attempt,
                    kind,
                    error
                );
                return Err(GenerationFailure::from_error(&error, attempt));
            }

            log::warn!(
                "Generation attempt {}/{} failed ({:?}): {}",
                attempt,
                self.policy.max_attempts,
                kind,
                error
            );
            attempt += 1;
            tokio::time::sleep(self.policy.delay_before(attempt)).await;
        }
    }
}
