//! Lenient deserializers for upstream payloads that mix numbers and strings.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts a JSON string or number and yields its string form.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Optional float from a number or numeric string; anything else is `None`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Optional unsigned integer from a number or numeric string.
pub fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    })
}

/// Null-tolerant string list.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Treats an explicit `null` like a missing key.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "lenient_f64")]
        ratio: Option<f64>,
        #[serde(default, deserialize_with = "lenient_u64")]
        count: Option<u64>,
        #[serde(default, deserialize_with = "string_list")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "null_default")]
        weight: i64,
    }

    #[test]
    fn numbers_and_strings_both_accepted() {
        let s: Sample = serde_json::from_value(json!({
            "id": 1673723677362319866u64,
            "ratio": "45.25",
            "count": "1200",
            "tags": null
        }))
        .unwrap();

        assert_eq!(s.id, "1673723677362319866");
        assert_eq!(s.ratio, Some(45.25));
        assert_eq!(s.count, Some(1200));
        assert!(s.tags.is_empty());
    }

    #[test]
    fn garbage_numbers_become_none() {
        let s: Sample = serde_json::from_value(json!({
            "id": "abc",
            "ratio": "n/a",
            "count": true
        }))
        .unwrap();

        assert_eq!(s.id, "abc");
        assert_eq!(s.ratio, None);
        assert_eq!(s.count, None);
    }

    #[test]
    fn explicit_null_takes_the_default() {
        let s: Sample = serde_json::from_value(json!({ "id": 7, "weight": null })).unwrap();
        assert_eq!(s.weight, 0);

        let s: Sample = serde_json::from_value(json!({ "id": 7, "weight": 3 })).unwrap();
        assert_eq!(s.weight, 3);
    }
}
