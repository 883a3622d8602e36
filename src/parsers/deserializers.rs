use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Custom deserializer for `lastUpdated` that accepts both "Nh" strings and bare numbers.
/// Numbers are normalized to the "Nh" form so display and export stay uniform.
pub fn deserialize_last_updated<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => {
            let hours = n.as_u64().ok_or_else(|| Error::custom("invalid lastUpdated number"))?;
            Ok(Some(format!("{}h", hours)))
        }
        Some(_) => Err(Error::custom("lastUpdated must be a string or number")),
    }
}

/// Parse an "Nh" age string into hours.
///
/// Reads the leading run of digits after trimming, so "30h" → 30 and "12 h" → 12.
/// Anything without a leading number is 0; ages too large for `u32` saturate.
pub fn parse_hours(text: &str) -> u32 {
    let digits: String = text.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    // Only overflow can fail once there is at least one digit
    digits.parse().unwrap_or(u32::MAX)
}
