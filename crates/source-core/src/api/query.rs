//! Query string encoding for list parameters.
//!
//! Scalars become `key=value`, arrays become repeated `key[]=value`, and
//! unset fields are skipped.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

pub(crate) fn to_query_pairs<T: Serialize>(params: &T) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(params).context("Failed to serialize query parameters")?;
    let mut pairs = Vec::new();
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                push_value(&mut pairs, key, value);
            }
        }
        Value::Null => {}
        other => anyhow::bail!("Query parameters must be an object, got {}", other),
    }
    Ok(pairs)
}

fn push_value(pairs: &mut Vec<(String, String)>, key: String, value: Value) {
    match value {
        Value::Null => {}
        Value::String(s) => pairs.push((key, s)),
        Value::Array(items) => {
            let key = format!("{}[]", key);
            for item in items {
                push_value(pairs, key.clone(), item);
            }
        }
        other => pairs.push((key, other.to_string())),
    }
}
