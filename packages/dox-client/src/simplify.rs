//! Reduce a completed job result to the fields worth showing.
//!
//! The result keeps `id`, `fileName`, `documentType`, `languageCodes` and the
//! extraction, where every header field and line item field is cut down to
//! `name`, `category`, `value`, `rawValue`, `type` and `label`. Keys missing
//! from the input are an error; nothing is filled in. Values are copied as
//! they are, whatever their JSON type (including `null`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DoxError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedResult {
    pub id: Value,
    pub file_name: Value,
    pub document_type: Value,
    pub language_codes: Value,
    pub extraction: SimplifiedExtraction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedExtraction {
    pub header_fields: Vec<SimplifiedField>,
    pub line_items: Vec<Vec<SimplifiedField>>,
}

/// A single extracted field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedField {
    pub name: Value,
    pub category: Value,
    pub value: Value,
    pub raw_value: Value,
    #[serde(rename = "type")]
    pub field_type: Value,
    pub label: Value,
}

/// Project a raw job result onto [`SimplifiedResult`].
///
/// Unknown keys are dropped at every level.
pub fn simplify(result: &Value) -> Result<SimplifiedResult> {
    SimplifiedResult::deserialize(result)
        .map_err(|e| DoxError::Parse(format!("cannot simplify result: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(name: &str) -> Value {
        json!({
            "name": name,
            "category": "amounts",
            "value": 12.5,
            "rawValue": "12,50",
            "type": "number",
            "label": "Net Amount",
            "page": 1,
            "confidence": 0.93,
            "coordinates": {"x": 0.1, "y": 0.2, "w": 0.3, "h": 0.05},
            "model": "lineItemModel"
        })
    }

    fn full_result() -> Value {
        json!({
            "status": "DONE",
            "id": "1234",
            "fileName": "test.pdf",
            "documentType": "invoice",
            "created": "2024-01-01T00:00:00Z",
            "finished": "2024-01-01T00:00:05Z",
            "country": "DE",
            "languageCodes": ["de"],
            "extraction": {
                "headerFields": [field("grossAmount"), field("netAmount")],
                "lineItems": [[field("description"), field("quantity")], [field("unitPrice")]]
            }
        })
    }

    #[test]
    fn test_simplify_keeps_only_documented_keys() {
        let simplified = serde_json::to_value(simplify(&full_result()).unwrap()).unwrap();

        let mut top: Vec<&str> = simplified
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        top.sort_unstable();
        assert_eq!(
            top,
            ["documentType", "extraction", "fileName", "id", "languageCodes"]
        );

        let field_keys = |v: &Value| {
            let mut keys: Vec<String> = v.as_object().unwrap().keys().cloned().collect();
            keys.sort_unstable();
            keys
        };
        let expected = ["category", "label", "name", "rawValue", "type", "value"];

        for header in simplified["extraction"]["headerFields"].as_array().unwrap() {
            assert_eq!(field_keys(header), expected);
        }
        let line_items = simplified["extraction"]["lineItems"].as_array().unwrap();
        assert_eq!(line_items.len(), 2);
        assert_eq!(line_items[0].as_array().unwrap().len(), 2);
        for item in line_items.iter().flat_map(|row| row.as_array().unwrap()) {
            assert_eq!(field_keys(item), expected);
        }
    }

    #[test]
    fn test_simplify_preserves_values() {
        let simplified = simplify(&full_result()).unwrap();
        assert_eq!(simplified.id, "1234");
        assert_eq!(simplified.language_codes, json!(["de"]));
        let first = &simplified.extraction.header_fields[0];
        assert_eq!(first.name, "grossAmount");
        assert_eq!(first.value, json!(12.5));
        assert_eq!(first.raw_value, json!("12,50"));
        assert_eq!(first.field_type, "number");
    }

    #[test]
    fn test_simplify_is_idempotent() {
        let once = simplify(&full_result()).unwrap();
        let twice = simplify(&serde_json::to_value(&once).unwrap()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_simplify_fails_on_missing_key() {
        let mut result = full_result();
        result["extraction"]["headerFields"][0]
            .as_object_mut()
            .unwrap()
            .remove("label");

        let err = simplify(&result).unwrap_err();
        assert!(matches!(err, DoxError::Parse(ref msg) if msg.contains("label")));
    }

    #[test]
    fn test_simplify_copies_null_and_non_string_values() {
        let mut result = full_result();
        result["fileName"] = Value::Null;
        result["extraction"]["headerFields"][0]["category"] = Value::Null;
        result["extraction"]["lineItems"][0][0]["name"] = json!(7);
        result["extraction"]["lineItems"][0][0]["type"] = json!({"kind": "number"});

        let simplified = simplify(&result).unwrap();
        assert_eq!(simplified.file_name, Value::Null);
        assert_eq!(simplified.extraction.header_fields[0].category, Value::Null);
        let item = &simplified.extraction.line_items[0][0];
        assert_eq!(item.name, json!(7));
        assert_eq!(item.field_type, json!({"kind": "number"}));
    }

    #[test]
    fn test_simplify_fails_without_extraction() {
        let mut result = full_result();
        result.as_object_mut().unwrap().remove("extraction");
        assert!(simplify(&result).is_err());
    }
}
