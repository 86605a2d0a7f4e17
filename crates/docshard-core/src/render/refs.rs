//! Schema cross-reference discovery
//!
//! References are found by serializing the subtree and scanning for the
//! literal `#/components/schemas/<name>` pattern. This deliberately also
//! catches references embedded in free-text descriptions, matching the
//! shallow one-level reporting contract; nested refs inside referenced
//! schemas are not followed.

use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::OnceLock;

static SCHEMA_REF: OnceLock<Regex> = OnceLock::new();

fn schema_ref_pattern() -> &'static Regex {
    SCHEMA_REF.get_or_init(|| {
        Regex::new(r"#/components/schemas/([A-Za-z0-9_.-]+)")
            .unwrap_or_else(|e| panic!("invalid schema ref pattern: {e}"))
    })
}

/// Collect the names of all schemas referenced anywhere in a subtree
///
/// The result is de-duplicated and sorted.
pub fn extract_schema_refs(value: &Value) -> BTreeSet<String> {
    let serialized = value.to_string();
    schema_ref_pattern()
        .captures_iter(&serialized)
        .map(|cap| cap[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_nested_refs_deduplicated() {
        let value = json!({
            "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/Order"}}}},
            "responses": {
                "200": {"content": {"application/json": {"schema": {
                    "type": "array",
                    "items": {"$ref": "#/components/schemas/Order"}
                }}}},
                "404": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
        });
        let refs = extract_schema_refs(&value);
        assert_eq!(
            refs.into_iter().collect::<Vec<_>>(),
            vec!["ApiError".to_string(), "Order".to_string()]
        );
    }

    #[test]
    fn test_finds_refs_mentioned_in_descriptions() {
        let value = json!({"description": "see #/components/schemas/Legacy.Type for details"});
        let refs = extract_schema_refs(&value);
        assert!(refs.contains("Legacy.Type"));
    }

    #[test]
    fn test_no_refs() {
        assert!(extract_schema_refs(&json!({"summary": "plain"})).is_empty());
    }
}
