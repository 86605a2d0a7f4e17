//! End-to-end generation: document in, output tree out
//!
//! Control flow follows the emission-order contract: schema pages first,
//! then per-tag chunk files, and the index and manifest last so their
//! listings describe files that already exist. All accumulated state
//! (groups, manifest records) is threaded through explicitly and returned;
//! nothing is global.

use crate::chunk::{ChunkLimits, ChunkPlanner};
use crate::document::{ApiDocument, Operation};
use crate::error::{Error, Result};
use crate::manifest::{render_index, Manifest, OperationRecord};
use crate::pages::write_schema_pages;
use crate::render::render_operation;
use crate::text::slugify;
use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Options for one generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Source document label recorded in the manifest
    pub source_label: String,
    /// Output directory; created if missing, contents overwritten
    pub out_dir: PathBuf,
    pub limits: ChunkLimits,
    /// Index title override; defaults to the document's `info.title`
    pub index_title: Option<String>,
    /// Run id recorded in the manifest, correlating it with logs
    pub run_id: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            source_label: String::new(),
            out_dir: PathBuf::from("api-md"),
            limits: ChunkLimits::default(),
            index_title: None,
            run_id: None,
        }
    }
}

/// Counters describing what a run produced
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    pub out_dir: PathBuf,
    pub tags: usize,
    pub operations: usize,
    pub chunk_files: usize,
    pub schema_files: usize,
}

/// Convert a document into the full output tree
pub fn generate(doc: &ApiDocument, opts: &GenerateOptions) -> Result<GenerationSummary> {
    let categories = opts.out_dir.join("categories");
    fs::create_dir_all(&categories)
        .map_err(|e| Error::io(format!("creating {}", categories.display()), e))?;

    let schema_pages = write_schema_pages(doc, &opts.out_dir)?;
    info!(schemas = schema_pages.len(), "schema pages written");

    // Group operations by tag, then order each group by (path, method)
    // and the tags themselves case-insensitively.
    let mut groups: IndexMap<String, Vec<(String, String, Operation)>> = IndexMap::new();
    for (method, path, op) in doc.operations() {
        for tag in op.effective_tags() {
            groups
                .entry(tag)
                .or_default()
                .push((method.clone(), path.clone(), op.clone()));
        }
    }
    for ops in groups.values_mut() {
        ops.sort_by(|a, b| (&a.1, &a.0).cmp(&(&b.1, &b.0)));
    }
    let mut tags: Vec<String> = groups.keys().cloned().collect();
    tags.sort_by_key(|tag| tag.to_lowercase());

    let mut manifest_groups: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut ops_index: Vec<OperationRecord> = Vec::new();
    let mut operations_total = 0usize;
    let mut chunk_files_total = 0usize;

    for tag in &tags {
        let Some(ops) = groups.get(tag) else {
            continue;
        };
        let tag_slug = slugify(tag);
        let tag_dir = categories.join(&tag_slug);
        fs::create_dir_all(&tag_dir)
            .map_err(|e| Error::io(format!("creating {}", tag_dir.display()), e))?;

        let mut planner = ChunkPlanner::new(tag, opts.limits);
        for (method, path, op) in ops {
            let rendered = render_operation(method, path, op);
            let chunk_no = planner.push(&rendered.markdown);
            ops_index.push(OperationRecord {
                tag: tag.clone(),
                file: format!(
                    "categories/{tag_slug}/{}",
                    chunk_file_name(&tag_slug, chunk_no)
                ),
                method: method.clone(),
                path: path.clone(),
                operation_id: op.operation_id.clone().unwrap_or_default(),
                schema_refs: rendered.refs.into_iter().collect(),
            });
            operations_total += 1;
        }

        let chunks = planner.finish();
        let mut files = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let file_name = chunk_file_name(&tag_slug, chunk.index);
            let path = tag_dir.join(&file_name);
            fs::write(&path, &chunk.body)
                .map_err(|e| Error::io(format!("writing {}", path.display()), e))?;
            files.push(format!("categories/{tag_slug}/{file_name}"));
        }
        debug!(tag = %tag, chunks = chunks.len(), "tag chunks written");
        chunk_files_total += chunks.len();
        manifest_groups.insert(tag.clone(), files);
    }

    // Index and manifest go last, once everything they list exists.
    let title = opts
        .index_title
        .clone()
        .unwrap_or_else(|| index_title_for(doc));
    let index_path = opts.out_dir.join("00-index.md");
    fs::write(&index_path, render_index(&title, &manifest_groups))
        .map_err(|e| Error::io(format!("writing {}", index_path.display()), e))?;

    let manifest = Manifest {
        source: opts.source_label.clone(),
        generator: format!("docshard {}", crate::VERSION),
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        run_id: opts.run_id.clone(),
        chunk_token_budget: opts.limits.token_budget,
        min_ops_per_chunk: opts.limits.min_ops_per_chunk,
        groups: manifest_groups,
        ops_index,
        schemas: schema_pages,
    };
    let manifest_path = opts.out_dir.join("manifest.json");
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)
        .map_err(|e| Error::io(format!("writing {}", manifest_path.display()), e))?;

    let summary = GenerationSummary {
        out_dir: opts.out_dir.clone(),
        tags: tags.len(),
        operations: operations_total,
        chunk_files: chunk_files_total,
        schema_files: manifest.schemas.len(),
    };
    info!(
        tags = summary.tags,
        operations = summary.operations,
        chunk_files = summary.chunk_files,
        schema_files = summary.schema_files,
        "generation complete"
    );
    Ok(summary)
}

fn chunk_file_name(tag_slug: &str, chunk_no: usize) -> String {
    format!("{tag_slug}--chunk-{chunk_no:03}.md")
}

fn index_title_for(doc: &ApiDocument) -> String {
    let base = doc.title().unwrap_or("API");
    format!("{base} → Markdown (LLM-ready)")
}
