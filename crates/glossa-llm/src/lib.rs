//! # glossa-llm
//!
//! The AI-completion collaborator for the Glossa lesson generator.
//!
//! - **[`provider::CompletionProvider`]**: the single external capability the
//!   pipeline consumes — `complete(prompt, options) -> String`, network-bound
//!   and fallible
//! - **[`anthropic::AnthropicProvider`]**: concrete client for the Messages API
//! - **[`mock::MockProvider`]**: scripted deterministic provider for tests
//! - **[`reliable::ReliableProvider`]**: retry + circuit breaker decorator
//!
//! ## Crate Position
//!
//! Depends on `glossa-core`. Depended on by `glossa-engine`.

#![deny(unsafe_code)]

pub mod anthropic;
pub mod mock;
pub mod provider;
pub mod reliable;

pub use anthropic::{AnthropicConfig, AnthropicProvider};
pub use mock::{MockCompletion, MockProvider};
pub use provider::{CompletionOptions, CompletionProvider};
pub use reliable::{ReliableConfig, ReliableProvider};
