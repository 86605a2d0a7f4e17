//! Inspect command handler and related utilities

use crate::cli::{InspectArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use docshard_core::ApiDocument;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{info, instrument};

/// Statistics reported for an inspected document
#[derive(Debug, Serialize)]
struct DocumentReport {
    title: Option<String>,
    version: Option<String>,
    operations: usize,
    tags: usize,
    schemas: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    by_tag: Vec<TagCount>,
}

#[derive(Debug, Serialize)]
struct TagCount {
    tag: String,
    operations: usize,
}

/// Handle the inspect command
#[instrument(skip(_config, output), fields(file = %args.document.display()))]
pub fn handle_inspect(
    args: InspectArgs,
    _config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::with_details("inspect_command", &format!("file: {}", args.document.display()));
    info!("Starting inspection");
    output.info(&format!("Inspecting {}", args.document.display()))?;

    let doc = super::load_document(&args.document)?;
    let report = build_report(&doc, args.detailed);
    info!(
        operations = report.operations,
        tags = report.tags,
        schemas = report.schemas,
        "Document inspected"
    );

    output.success("✓ Document loaded")?;
    match output.format() {
        OutputFormat::Human => {
            output.section("Document Overview")?;
            output.writeln(&format!(
                "  Title:      {}",
                report.title.as_deref().unwrap_or("(none)")
            ))?;
            output.writeln(&format!(
                "  Version:    {}",
                report.version.as_deref().unwrap_or("(none)")
            ))?;
            output.writeln(&format!("  Operations: {}", report.operations))?;
            output.writeln(&format!("  Tags:       {}", report.tags))?;
            output.writeln(&format!("  Schemas:    {}", report.schemas))?;

            if !report.by_tag.is_empty() {
                output.section("Operations by Tag")?;
                for entry in &report.by_tag {
                    output.writeln(&format!("  - {}: {}", entry.tag, entry.operations))?;
                }
            }
        }
        _ => {
            output.data(&report)?;
        }
    }

    Ok(())
}

fn build_report(doc: &ApiDocument, detailed: bool) -> DocumentReport {
    let ops = doc.operations();
    let mut tag_counts: IndexMap<String, usize> = IndexMap::new();
    for (_, _, op) in &ops {
        for tag in op.effective_tags() {
            *tag_counts.entry(tag).or_insert(0) += 1;
        }
    }
    tag_counts.sort_by(|tag_a, _, tag_b, _| tag_a.to_lowercase().cmp(&tag_b.to_lowercase()));

    DocumentReport {
        title: doc.title().map(str::to_owned),
        version: doc.version().map(str::to_owned),
        operations: ops.len(),
        tags: tag_counts.len(),
        schemas: doc.schemas().count(),
        by_tag: if detailed {
            tag_counts
                .into_iter()
                .map(|(tag, operations)| TagCount { tag, operations })
                .collect()
        } else {
            Vec::new()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_counts_tags_and_operations() {
        let doc = ApiDocument::from_value(json!({
            "info": {"title": "Shop API", "version": "1.2.0"},
            "paths": {
                "/a": {"get": {"tags": ["Orders"]}, "post": {"tags": ["Orders", "beta"]}},
                "/b": {"get": {}}
            },
            "components": {"schemas": {"Order": {"type": "object"}}}
        }))
        .unwrap();

        let report = build_report(&doc, true);
        assert_eq!(report.title.as_deref(), Some("Shop API"));
        assert_eq!(report.version.as_deref(), Some("1.2.0"));
        assert_eq!(report.operations, 3);
        assert_eq!(report.tags, 3);
        assert_eq!(report.schemas, 1);

        let by_tag: Vec<(String, usize)> = report
            .by_tag
            .into_iter()
            .map(|t| (t.tag, t.operations))
            .collect();
        assert_eq!(
            by_tag,
            vec![
                ("beta".to_string(), 1),
                ("misc".to_string(), 1),
                ("Orders".to_string(), 2)
            ]
        );
    }

    #[test]
    fn test_report_omits_breakdown_unless_detailed() {
        let doc = ApiDocument::from_value(json!({
            "paths": {"/a": {"get": {}}}
        }))
        .unwrap();
        let report = build_report(&doc, false);
        assert!(report.by_tag.is_empty());
        assert_eq!(report.operations, 1);
    }
}
