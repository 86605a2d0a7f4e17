//! Markdown rendering for a single API operation
//!
//! One `(method, path, operation)` triple becomes a self-contained block:
//! summary, parameters by location, request example, success-response
//! example, and links to related schema pages. Pure transform; the caller
//! reuses the returned reference set for manifest bookkeeping.

use crate::document::{Operation, Parameter};
use crate::render::example::synthesize;
use crate::render::refs::extract_schema_refs;
use crate::text::{escape_markdown, slugify};
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;

/// Parameter locations, in display order
const LOCATIONS: [&str; 4] = ["path", "query", "header", "cookie"];

/// Success status codes, in preference order
const SUCCESS_CODES: [&str; 4] = ["200", "201", "202", "204"];

/// A rendered operation block plus the schema names it references
#[derive(Debug, Clone)]
pub struct RenderedOperation {
    pub markdown: String,
    pub refs: BTreeSet<String>,
}

/// Render one operation to a Markdown block
pub fn render_operation(method: &str, path: &str, op: &Operation) -> RenderedOperation {
    let mut block = String::new();

    let summary = op
        .summary
        .as_deref()
        .map(|s| escape_markdown(s).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "No summary.".to_string());
    block.push_str(&format!("## {method} {path}\n\n**Summary:** {summary}\n\n"));

    if let Some(id) = op.operation_id.as_deref().filter(|id| !id.is_empty()) {
        block.push_str(&format!("**operationId:** `{id}`\n\n"));
    }

    if let Some(desc) = op.description.as_deref() {
        let desc = escape_markdown(desc).trim().to_string();
        if !desc.is_empty() {
            block.push_str(&desc);
            block.push_str("\n\n");
        }
    }

    block.push_str("**Parameters (path/query/header/cookie):**\n");
    block.push_str(&render_parameters(&op.parameters));
    block.push('\n');

    block.push_str("**Request body (minimal valid example):**\n");
    match &op.request_body {
        Some(body) => {
            let example = schema_example(select_content_schema(&body.content))
                .unwrap_or_else(|| json!({"note": "no example"}));
            push_json_block(&mut block, &example);
        }
        None => block.push_str("_no request body_\n\n"),
    }

    block.push_str("**Success response (example):**\n");
    let success = SUCCESS_CODES
        .iter()
        .find_map(|code| op.responses.get(*code));
    let example = match success {
        Some(Value::Object(response)) => {
            let schema = response
                .get("content")
                .and_then(Value::as_object)
                .and_then(select_content_schema);
            schema_example(schema).unwrap_or_else(|| json!({"result": "ok"}))
        }
        _ => json!({"result": "ok"}),
    };
    push_json_block(&mut block, &example);

    let refs = extract_schema_refs(op.raw());
    if !refs.is_empty() {
        block.push_str("**Related schemas:**\n");
        for name in &refs {
            let page = slugify(name);
            block.push_str(&format!(
                "- `{name}` — see [../common-types/{page}.md](../common-types/{page}.md)\n"
            ));
        }
        block.push('\n');
    }

    RenderedOperation {
        markdown: block,
        refs,
    }
}

/// Render the parameter section body
///
/// Parameters are grouped under the four fixed location buckets; entries
/// with an unrecognized location are not displayed.
fn render_parameters(params: &[Parameter]) -> String {
    if params.is_empty() {
        return "- none\n".to_string();
    }

    let mut buckets: [Vec<String>; 4] = Default::default();
    for param in params {
        let Some(slot) = LOCATIONS.iter().position(|loc| *loc == param.location) else {
            continue;
        };
        let requirement = if param.required { "required" } else { "optional" };
        let desc = param
            .description
            .as_deref()
            .map(|d| escape_markdown(d).trim().to_string())
            .unwrap_or_default();
        let line = if desc.is_empty() {
            format!("- `{}` ({requirement})", param.name)
        } else {
            format!("- `{}` ({requirement}) — {desc}", param.name)
        };
        buckets[slot].push(line);
    }

    let parts: Vec<String> = LOCATIONS
        .iter()
        .zip(&buckets)
        .filter(|(_, lines)| !lines.is_empty())
        .map(|(loc, lines)| format!("_{loc}_:\n{}", lines.join("\n")))
        .collect();

    if parts.is_empty() {
        String::new()
    } else {
        format!("{}\n", parts.join("\n"))
    }
}

/// Pick the schema from a media-type-keyed content map
///
/// Prefers exact `application/json` or any `+json` suffix in declaration
/// order, then falls back to the first entry with a usable schema.
pub fn select_content_schema(content: &Map<String, Value>) -> Option<&Value> {
    content
        .iter()
        .find_map(|(content_type, media)| {
            if content_type == "application/json" || content_type.ends_with("+json") {
                usable_schema(media)
            } else {
                None
            }
        })
        .or_else(|| content.values().find_map(usable_schema))
}

fn usable_schema(media: &Value) -> Option<&Value> {
    match media.as_object()?.get("schema")? {
        Value::Null => None,
        Value::Object(m) if m.is_empty() => None,
        schema => Some(schema),
    }
}

/// Literal example, else a synthesized one unless it is effectively empty
fn schema_example(schema: Option<&Value>) -> Option<Value> {
    let schema = schema?;
    if let Some(literal) = schema.get("example") {
        return Some(literal.clone());
    }
    synthesize(schema).filter(|example| !is_empty_example(example))
}

/// Empty object/list or null counts as "no example" for a synthesized value
fn is_empty_example(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(m) => m.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

fn push_json_block(block: &mut String, value: &Value) {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    block.push_str(&format!("```json\n{pretty}\n```\n\n"));
}
