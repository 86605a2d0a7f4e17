//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod build;
mod completions;
mod inspect;

pub use build::handle_build;
pub use completions::handle_completions;
pub use inspect::handle_inspect;

use crate::error::Error;
use docshard_core::ApiDocument;
use std::fs;
use std::path::Path;
use tracing::{debug, error};

/// Load and parse the input document shared by the build and inspect commands
fn load_document(path: &Path) -> crate::error::Result<ApiDocument> {
    if !path.exists() {
        error!("Document not found: {}", path.display());
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    debug!("Reading API document");
    let content = fs::read_to_string(path)?;
    debug!("Document read, {} bytes", content.len());

    ApiDocument::from_json(&content).map_err(|e| match e {
        docshard_core::Error::Json { .. } => Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "OpenAPI JSON".to_string(),
        },
        other => Error::Core(other),
    })
}
