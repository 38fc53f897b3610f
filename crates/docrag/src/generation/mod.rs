//! Prompt construction and answer synthesis

pub mod prompt;
pub mod synthesizer;

pub use prompt::PromptBuilder;
pub use synthesizer::AnswerSynthesizer;
