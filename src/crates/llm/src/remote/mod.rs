//! Remote (cloud-hosted) LLM providers.

pub mod groq;

pub use groq::GroqClient;
