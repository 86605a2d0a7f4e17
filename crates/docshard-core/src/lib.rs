//! Docshard Core - Partition OpenAPI documents into LLM-sized Markdown shards
//!
//! This crate provides the engine for converting a single OpenAPI/Swagger
//! JSON document into a set of size-bounded Markdown files: per-tag chunk
//! files under a token budget, one reference page per named schema, a
//! top-level index, and a machine-readable manifest.
//!
//! # Main Components
//!
//! - **Document Model**: tolerant typed view over the parsed document
//! - **Rendering**: example synthesis, reference discovery, and
//!   per-operation Markdown blocks
//! - **Chunk Packing**: pure token-budgeted grouping of rendered blocks
//! - **Generation**: the orchestrated run writing the output tree
//!
//! # Example
//!
//! ```no_run
//! use docshard_core::{generate, ApiDocument, GenerateOptions};
//!
//! fn example() -> docshard_core::Result<()> {
//!     let doc = ApiDocument::from_path(std::path::Path::new("openapi.json"))?;
//!     let summary = generate(&doc, &GenerateOptions::default())?;
//!     println!("{} chunk files", summary.chunk_files);
//!     Ok(())
//! }
//! ```

pub mod chunk;
pub mod document;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod pages;
pub mod render;
pub mod text;

// Re-export main types for convenience
pub use chunk::{Chunk, ChunkLimits, ChunkPlanner};
pub use document::{ApiDocument, Operation, Parameter, RequestBody};
pub use error::{Error, Result};
pub use generator::{generate, GenerateOptions, GenerationSummary};
pub use manifest::{Manifest, OperationRecord};
pub use render::{extract_schema_refs, render_operation, synthesize, RenderedOperation};
pub use text::{escape_markdown, estimate_tokens, slugify};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
