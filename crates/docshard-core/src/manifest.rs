//! Machine-readable manifest and top-level index document
//!
//! The manifest aggregates everything a downstream consumer needs to
//! navigate the generated tree: chunk files per tag, one record per
//! emitted operation, and the schema page map. The index is the
//! human-facing counterpart.

use indexmap::IndexMap;
use serde::Serialize;

/// Structured record describing one generation run's output layout
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    /// Source document path as given by the caller
    pub source: String,
    /// Generator name and version
    pub generator: String,
    /// RFC 3339 generation timestamp
    pub generated_at: String,
    /// Run id correlating the manifest with the run's logs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    pub chunk_token_budget: usize,
    pub min_ops_per_chunk: usize,
    /// Tag → chunk file list, in emission order
    pub groups: IndexMap<String, Vec<String>>,
    /// One record per operation, in emission order
    pub ops_index: Vec<OperationRecord>,
    /// Schema name → reference page path, in document order
    pub schemas: IndexMap<String, String>,
}

/// Per-operation manifest entry
#[derive(Debug, Clone, Serialize)]
pub struct OperationRecord {
    pub tag: String,
    /// Chunk file the operation block was written to
    pub file: String,
    pub method: String,
    pub path: String,
    #[serde(rename = "operationId")]
    pub operation_id: String,
    /// Referenced schema names, sorted and de-duplicated
    pub schema_refs: Vec<String>,
}

/// Render the `00-index.md` document
pub fn render_index(title: &str, groups: &IndexMap<String, Vec<String>>) -> String {
    let mut lines = vec![format!("# {title}\n"), "## Categories\n".to_string()];
    for (tag, files) in groups {
        if files.is_empty() {
            continue;
        }
        let links = files
            .iter()
            .map(|file| {
                let name = file.rsplit('/').next().unwrap_or(file);
                format!("[{name}](./{file})")
            })
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("- **{tag}** → {links}"));
    }
    let mut index = lines.join("\n");
    index.push('\n');
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_manifest_serializes_with_wire_field_names() {
        let mut groups = IndexMap::new();
        groups.insert(
            "health".to_string(),
            vec!["categories/health/health--chunk-001.md".to_string()],
        );
        let manifest = Manifest {
            source: "openapi.json".to_string(),
            generator: "docshard 0.1.0".to_string(),
            generated_at: "2025-01-01T00:00:00Z".to_string(),
            run_id: None,
            chunk_token_budget: 1500,
            min_ops_per_chunk: 1,
            groups,
            ops_index: vec![OperationRecord {
                tag: "health".to_string(),
                file: "categories/health/health--chunk-001.md".to_string(),
                method: "GET".to_string(),
                path: "/v1/ping".to_string(),
                operation_id: "ping".to_string(),
                schema_refs: vec![],
            }],
            schemas: IndexMap::new(),
        };
        let value = serde_json::to_value(&manifest).unwrap();
        assert_eq!(value["ops_index"][0]["operationId"], json!("ping"));
        assert_eq!(value["chunk_token_budget"], json!(1500));
        assert!(value.get("run_id").is_none());
        assert_eq!(
            value["groups"]["health"][0],
            json!("categories/health/health--chunk-001.md")
        );
    }

    #[test]
    fn test_index_lists_tags_with_chunk_links() {
        let mut groups = IndexMap::new();
        groups.insert(
            "Orders".to_string(),
            vec![
                "categories/orders/orders--chunk-001.md".to_string(),
                "categories/orders/orders--chunk-002.md".to_string(),
            ],
        );
        groups.insert("empty".to_string(), vec![]);
        let index = render_index("Shop API", &groups);
        assert!(index.starts_with("# Shop API\n\n## Categories\n\n"));
        assert!(index.contains(
            "- **Orders** → [orders--chunk-001.md](./categories/orders/orders--chunk-001.md), \
             [orders--chunk-002.md](./categories/orders/orders--chunk-002.md)"
        ));
        assert!(!index.contains("empty"));
        assert!(index.ends_with('\n'));
    }
}
