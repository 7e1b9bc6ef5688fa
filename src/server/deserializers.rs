use serde::{Deserialize, Deserializer};
use serde_json::Value;

// query flags are matched case-insensitively and anything unrecognized is
// treated as if the flag was not sent
pub fn deserialize_bool_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }))
}

// non-numeric values are dropped instead of rejecting the whole query
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|value| value.trim().parse::<i64>().ok()))
}

/// Integer sent either as a JSON number or as a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub struct LooseI64(pub i64);

impl TryFrom<Value> for LooseI64 {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let parsed = match &value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed
            .map(LooseI64)
            .ok_or_else(|| format!("Wrong value {value}, can not parse to integer"))
    }
}
