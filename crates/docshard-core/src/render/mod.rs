//! Markdown rendering: example synthesis, reference discovery, and
//! per-operation block generation

pub mod example;
pub mod operation;
pub mod refs;

pub use example::synthesize;
pub use operation::{render_operation, RenderedOperation};
pub use refs::extract_schema_refs;
