//! Typed view over an OpenAPI-style API description document
//!
//! The document is parsed once into a raw `serde_json::Value` and kept
//! read-only; operations get a tolerant typed wrapper while schema
//! fragments stay as raw values, since every schema walk in this crate is
//! best-effort. Map order follows the source document (`preserve_order`),
//! which the content-type fallback and schema page ordering rely on.

use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::warn;

/// HTTP methods recognized as operations under a path item
pub const HTTP_METHODS: &[&str] = &[
    "GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS", "HEAD", "TRACE",
];

/// A parsed API description document
#[derive(Debug, Clone)]
pub struct ApiDocument {
    root: Value,
}

impl ApiDocument {
    /// Wrap an already-parsed JSON value
    pub fn from_value(root: Value) -> Result<Self> {
        if !root.is_object() {
            return Err(Error::document(
                "top level of the API document must be a JSON object",
            ));
        }
        Ok(Self { root })
    }

    /// Parse a document from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(text)
            .map_err(|e| Error::json("parsing API document", e))?;
        Self::from_value(root)
    }

    /// Load and parse a document from a file
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
        Self::from_json(&text)
    }

    /// The raw parsed document
    pub fn raw(&self) -> &Value {
        &self.root
    }

    /// `info.title`, when present
    pub fn title(&self) -> Option<&str> {
        self.root.pointer("/info/title")?.as_str()
    }

    /// `info.version`, when present
    pub fn version(&self) -> Option<&str> {
        self.root.pointer("/info/version")?.as_str()
    }

    /// Named schemas under `components.schemas`, in document order
    pub fn schemas(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.root
            .pointer("/components/schemas")
            .and_then(Value::as_object)
            .into_iter()
            .flatten()
    }

    /// All operations in document order as `(METHOD, path, operation)`
    ///
    /// Path items and method values that are not JSON objects, and
    /// operation objects whose fields have unusable shapes, are skipped
    /// with a warning instead of aborting the run.
    pub fn operations(&self) -> Vec<(String, String, Operation)> {
        let mut out = Vec::new();
        let Some(paths) = self.root.get("paths").and_then(Value::as_object) else {
            return out;
        };
        for (path, item) in paths {
            let Some(methods) = item.as_object() else {
                warn!(path = %path, "skipping non-object path item");
                continue;
            };
            for (method, value) in methods {
                let method_uc = method.to_uppercase();
                if !HTTP_METHODS.contains(&method_uc.as_str()) {
                    continue;
                }
                match Operation::from_value(value) {
                    Some(op) => out.push((method_uc, path.clone(), op)),
                    None => {
                        warn!(method = %method_uc, path = %path, "skipping malformed operation");
                    }
                }
            }
        }
        out
    }
}

/// One HTTP method/path pairing from the document
#[derive(Debug, Clone)]
pub struct Operation {
    raw: Value,
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub operation_id: Option<String>,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    pub responses: Map<String, Value>,
}

/// Serde mirror with tolerant defaults; `Operation` adds the raw value
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OperationFields {
    tags: Option<Vec<String>>,
    summary: Option<String>,
    description: Option<String>,
    #[serde(rename = "operationId")]
    operation_id: Option<String>,
    parameters: Option<Vec<Parameter>>,
    #[serde(rename = "requestBody")]
    request_body: Option<Value>,
    responses: Option<Map<String, Value>>,
}

impl Operation {
    /// Parse an operation from its raw JSON value
    ///
    /// Returns `None` when the value is not an object or its recognized
    /// fields cannot be interpreted.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let fields: OperationFields = serde_json::from_value(value.clone()).ok()?;
        Some(Self {
            raw: value.clone(),
            tags: fields.tags.unwrap_or_default(),
            summary: fields.summary,
            description: fields.description,
            operation_id: fields.operation_id,
            parameters: fields.parameters.unwrap_or_default(),
            request_body: RequestBody::from_value(fields.request_body.as_ref()),
            responses: fields.responses.unwrap_or_default(),
        })
    }

    /// The full raw operation object, used for reference scanning
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Tags the operation is grouped under, defaulting to `misc`
    pub fn effective_tags(&self) -> Vec<String> {
        if self.tags.is_empty() {
            vec!["misc".to_string()]
        } else {
            self.tags.clone()
        }
    }
}

/// A single operation parameter
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    pub required: bool,
    pub description: Option<String>,
}

impl Default for Parameter {
    fn default() -> Self {
        Self {
            name: String::new(),
            location: "query".to_string(),
            required: false,
            description: None,
        }
    }
}

/// Request body with media-type-keyed content
#[derive(Debug, Clone, Default)]
pub struct RequestBody {
    pub content: Map<String, Value>,
}

impl RequestBody {
    /// A request body counts as present only when the `requestBody` value
    /// is a non-empty object.
    fn from_value(value: Option<&Value>) -> Option<Self> {
        let obj = value?.as_object().filter(|m| !m.is_empty())?;
        Some(Self {
            content: obj
                .get("content")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_requires_object_root() {
        assert!(ApiDocument::from_value(json!([1, 2, 3])).is_err());
        assert!(ApiDocument::from_value(json!({})).is_ok());
    }

    #[test]
    fn test_operations_filter_methods_and_keep_order() {
        let doc = ApiDocument::from_value(json!({
            "paths": {
                "/b": {"get": {"summary": "b"}, "parameters": [], "x-ext": 1},
                "/a": {"post": {}, "purge": {}}
            }
        }))
        .unwrap();
        let ops = doc.operations();
        let keys: Vec<(String, String)> = ops
            .iter()
            .map(|(m, p, _)| (m.clone(), p.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("GET".to_string(), "/b".to_string()),
                ("POST".to_string(), "/a".to_string())
            ]
        );
    }

    #[test]
    fn test_effective_tags_default_to_misc() {
        let op = Operation::from_value(&json!({})).unwrap();
        assert_eq!(op.effective_tags(), vec!["misc".to_string()]);

        let op = Operation::from_value(&json!({"tags": null})).unwrap();
        assert_eq!(op.effective_tags(), vec!["misc".to_string()]);

        let op = Operation::from_value(&json!({"tags": ["Orders"]})).unwrap();
        assert_eq!(op.effective_tags(), vec!["Orders".to_string()]);
    }

    #[test]
    fn test_request_body_presence() {
        let op = Operation::from_value(&json!({"requestBody": {}})).unwrap();
        assert!(op.request_body.is_none());

        let op = Operation::from_value(&json!({
            "requestBody": {"content": {"application/json": {"schema": {"type": "object"}}}}
        }))
        .unwrap();
        let body = op.request_body.unwrap();
        assert!(body.content.contains_key("application/json"));
    }

    #[test]
    fn test_parameter_location_defaults_to_query() {
        let op = Operation::from_value(&json!({
            "parameters": [{"name": "limit"}]
        }))
        .unwrap();
        assert_eq!(op.parameters[0].location, "query");
        assert!(!op.parameters[0].required);
    }
}
