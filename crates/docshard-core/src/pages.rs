//! Standalone reference pages for named schemas
//!
//! Every entry under `components.schemas` becomes one Markdown file with
//! the schema name, its description, a brief top-level field outline, and
//! the full raw schema as formatted JSON. The returned map (name →
//! relative path) feeds the manifest.

use crate::document::ApiDocument;
use crate::error::{Error, Result};
use crate::text::{escape_markdown, slugify};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Maximum fields shown in a schema outline
const OUTLINE_FIELD_CAP: usize = 20;

/// Write one page per named schema under `common-types/`
///
/// Returns the schema-name → relative-path mapping in document order.
pub fn write_schema_pages(doc: &ApiDocument, out_dir: &Path) -> Result<IndexMap<String, String>> {
    let base = out_dir.join("common-types");
    fs::create_dir_all(&base).map_err(|e| Error::io(format!("creating {}", base.display()), e))?;

    let mut pages = IndexMap::new();
    for (name, schema) in doc.schemas() {
        let file_name = format!("{}.md", slugify(name));
        let path = base.join(&file_name);
        debug!(schema = %name, file = %file_name, "writing schema page");
        fs::write(&path, render_schema_page(name, schema))
            .map_err(|e| Error::io(format!("writing {}", path.display()), e))?;
        pages.insert(name.clone(), format!("common-types/{file_name}"));
    }
    Ok(pages)
}

fn render_schema_page(name: &str, schema: &Value) -> String {
    let mut content = format!("# {name}\n\n");

    if let Some(desc) = schema.get("description").and_then(Value::as_str) {
        let desc = escape_markdown(desc);
        if !desc.is_empty() {
            content.push_str(&desc);
            content.push_str("\n\n");
        }
    }

    if let Some(outline) = schema_outline(name, schema) {
        content.push_str("## Top-level fields\n");
        content.push_str(&outline);
        content.push_str("\n\n");
    }

    content.push_str("## Full schema (JSON)\n");
    let pretty = serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string());
    content.push_str(&format!("```json\n{pretty}\n```\n"));
    content
}

/// Brief field outline for object-like schemas, or `None`
fn schema_outline(name: &str, schema: &Value) -> Option<String> {
    let props = flattened_properties(schema);
    if props.is_empty() {
        return None;
    }
    let mut lines = vec![format!("- `{name}` (top-level fields):")];
    for (field, prop) in props.iter().take(OUTLINE_FIELD_CAP) {
        match prop.get("$ref").and_then(Value::as_str) {
            Some(target) => {
                lines.push(format!("  - `{field}` → `$ref` {}", ref_name(target)));
            }
            None => {
                let declared = prop.get("type").and_then(Value::as_str).unwrap_or("object");
                lines.push(format!("  - `{field}`: `{declared}`"));
            }
        }
    }
    Some(lines.join("\n"))
}

/// Top-level properties, flattening one level of combinator children
fn flattened_properties(schema: &Value) -> Map<String, Value> {
    let Some(obj) = schema.as_object() else {
        return Map::new();
    };
    if obj.get("type").and_then(Value::as_str) == Some("object") {
        return obj
            .get("properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
    }
    for combinator in ["allOf", "oneOf", "anyOf"] {
        if let Some(branches) = obj.get(combinator).and_then(Value::as_array) {
            let mut merged = Map::new();
            for branch in branches {
                for (field, prop) in flattened_properties(branch) {
                    merged.insert(field, prop);
                }
            }
            return merged;
        }
    }
    Map::new()
}

/// Last path segment of a `$ref` target
fn ref_name(target: &str) -> &str {
    target.rsplit('/').next().unwrap_or(target)
}
