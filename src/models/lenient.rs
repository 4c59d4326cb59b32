//! Tolerant field deserializers.
//!
//! Records come from a backend we do not own, so scalar fields accept numbers or
//! numeric strings and sequences accept `null`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Number or numeric string; anything else (including non-finite values) is `None`.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_in))
}

pub fn number_in(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// String, or a scalar rendered as one.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Like [`text`], but `null` or a non-scalar reads as an empty string.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.unwrap_or_default())
}

/// Sequence where `null` means empty.
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_in() {
        assert_eq!(number_in(&json!(4.5)), Some(4.5));
        assert_eq!(number_in(&json!(" 120 ")), Some(120.0));
        assert_eq!(number_in(&json!("abc")), None);
        assert_eq!(number_in(&json!(null)), None);
        assert_eq!(number_in(&json!("NaN")), None);
    }

    #[derive(Debug, Deserialize)]
    struct Named {
        #[serde(default, deserialize_with = "string")]
        name: String,
    }

    #[test]
    fn test_string_reads_null_as_empty() {
        let named: Named = serde_json::from_value(json!({ "name": null })).unwrap();
        assert_eq!(named.name, "");
        let named: Named = serde_json::from_value(json!({ "name": 7 })).unwrap();
        assert_eq!(named.name, "7");
        let named: Named = serde_json::from_value(json!({})).unwrap();
        assert_eq!(named.name, "");
    }
}
