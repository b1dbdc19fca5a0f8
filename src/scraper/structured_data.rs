use serde::Deserialize;
use serde_json::{Map, Value};

/// A JSON-LD block: either one object or a list whose first entry is used.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StructuredData {
    Object(Map<String, Value>),
    List(Vec<Value>),
}

impl StructuredData {
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw.trim())
    }

    /// Collapse to the single object fields are read from.
    pub fn into_object(self) -> Option<Map<String, Value>> {
        match self {
            StructuredData::Object(map) => Some(map),
            StructuredData::List(values) => match values.into_iter().next() {
                Some(Value::Object(map)) => Some(map),
                _ => None,
            },
        }
    }

    /// `mpn` if present, else `sku`.
    pub fn product_code(self) -> Option<String> {
        let object = self.into_object()?;
        ["mpn", "sku"]
            .iter()
            .find_map(|key| object.get(*key).and_then(scalar_text))
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
