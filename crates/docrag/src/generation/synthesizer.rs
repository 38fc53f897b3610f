//! Answer synthesis through the generation collaborator

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::providers::LlmProvider;

/// Runs prompts through the generation collaborator and post-processes output.
///
/// Calls into the generator are serialized through an internal gate: the
/// backend may not tolerate concurrent invocation, and retrieval never waits
/// on this lock.
pub struct AnswerSynthesizer {
    generator: Arc<dyn LlmProvider>,
    gate: Mutex<()>,
}

impl AnswerSynthesizer {
    /// Create a synthesizer bound to a generation collaborator
    pub fn new(generator: Arc<dyn LlmProvider>) -> Self {
        Self {
            generator,
            gate: Mutex::new(()),
        }
    }

    /// Run one prompt through the generator.
    ///
    /// Collaborator failures surface as `Generation` errors; success returns
    /// the output with leading and trailing whitespace removed, nothing else.
    pub async fn synthesize(&self, prompt: &str) -> Result<String> {
        let _guard = self.gate.lock().await;

        let raw = self.generator.generate(prompt).await.map_err(|e| match e {
            Error::Generation(_) => e,
            other => Error::generation(other.to_string()),
        })?;

        Ok(raw.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct EchoGenerator;

    #[async_trait]
    impl LlmProvider for EchoGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            Ok(format!("  echo: {}  \n", prompt))
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-1"
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl LlmProvider for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(Error::generation("connection refused"))
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(false)
        }

        fn name(&self) -> &str {
            "failing"
        }

        fn model(&self) -> &str {
            "none"
        }
    }

    /// Counts how many generate calls are in flight at once
    struct ConcurrencyProbe {
        in_flight: AtomicUsize,
        max_seen: AtomicUsize,
    }

    #[async_trait]
    impl LlmProvider for ConcurrencyProbe {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_seen.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok("ok".to_string())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "probe"
        }

        fn model(&self) -> &str {
            "probe"
        }
    }

    #[tokio::test]
    async fn output_is_trimmed() {
        let synthesizer = AnswerSynthesizer::new(Arc::new(EchoGenerator));

        let answer = synthesizer.synthesize("hello").await.unwrap();
        assert_eq!(answer, "echo: hello");
    }

    #[tokio::test]
    async fn collaborator_failure_surfaces_as_generation_error() {
        let synthesizer = AnswerSynthesizer::new(Arc::new(FailingGenerator));

        let err = synthesizer.synthesize("hello").await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[tokio::test]
    async fn generator_calls_are_serialized() {
        let probe = Arc::new(ConcurrencyProbe {
            in_flight: AtomicUsize::new(0),
            max_seen: AtomicUsize::new(0),
        });
        let synthesizer = Arc::new(AnswerSynthesizer::new(probe.clone()));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let synthesizer = Arc::clone(&synthesizer);
            handles.push(tokio::spawn(async move {
                synthesizer.synthesize("p").await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(probe.max_seen.load(Ordering::SeqCst), 1);
    }
}
