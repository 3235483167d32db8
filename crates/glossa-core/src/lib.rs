//! # glossa-core
//!
//! Foundation types, errors, and utilities for the Glossa lesson generator.
//!
//! This crate provides the shared vocabulary that the other Glossa crates
//! depend on:
//!
//! - **Proficiency**: [`level::CefrLevel`] — the A1..C1 complexity order
//! - **Lessons**: [`lesson::LessonType`], [`lesson::Phase`],
//!   [`lesson::LessonContent`] and its sections
//! - **Shared context**: [`context::SharedContext`], built once per request
//!   and read by every section generator
//! - **Dialogue**: [`dialogue::DialogueLine`] with gap marking
//! - **Progress**: [`progress::ProgressUpdate`] observer events
//! - **Validation**: [`validation::ValidationResult`] advisory findings
//! - **Errors**: [`errors::GatewayError`] hierarchy via `thiserror`
//! - **Text**: UTF-8-safe truncation and sentence-boundary summarization
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by `glossa-llm` and `glossa-engine`.

#![deny(unsafe_code)]

pub mod context;
pub mod dialogue;
pub mod errors;
pub mod lesson;
pub mod level;
pub mod progress;
pub mod text;
pub mod validation;

pub use context::SharedContext;
pub use dialogue::{DialogueLine, GAP_TOKEN};
pub use errors::GatewayError;
pub use lesson::{LessonContent, LessonMetadata, LessonSection, LessonType, Phase, SectionBody};
pub use level::CefrLevel;
pub use progress::ProgressUpdate;
pub use validation::ValidationResult;
