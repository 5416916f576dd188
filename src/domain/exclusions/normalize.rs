use regex::Regex;
use serde_json::Value as JsonValue;
use std::sync::OnceLock;

fn leading_integer() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\s*([+-]?\d+)").expect("leading integer pattern is valid"))
}

/// Integer-cast an arbitrary submitted value.
///
/// Integers pass through, floats are truncated, strings yield their leading
/// integer (or 0), booleans become 1/0, null is 0 and non-empty containers are 1.
pub fn coerce_to_int(value: &JsonValue) -> i64 {
    match value {
        JsonValue::Null => 0,
        JsonValue::Bool(flag) => i64::from(*flag),
        JsonValue::Number(number) => {
            if let Some(int) = number.as_i64() {
                int
            } else if number.as_u64().is_some() {
                i64::MAX
            } else {
                number
                    .as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
                    .unwrap_or(0)
            }
        }
        JsonValue::String(raw) => parse_leading_integer(raw),
        JsonValue::Array(items) => i64::from(!items.is_empty()),
        JsonValue::Object(fields) => i64::from(!fields.is_empty()),
    }
}

fn parse_leading_integer(raw: &str) -> i64 {
    let Some(captures) = leading_integer().captures(raw) else {
        return 0;
    };
    let digits = &captures[1];
    digits.parse::<i64>().unwrap_or_else(|_| {
        if digits.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}

/// Coerce, drop non-positive values and deduplicate keeping first occurrence.
pub fn normalize_ids<'a, I>(raw: I) -> Vec<i64>
where
    I: IntoIterator<Item = &'a JsonValue>,
{
    let mut seen = std::collections::HashSet::new();
    raw.into_iter()
        .map(coerce_to_int)
        .filter(|id| *id > 0)
        .filter(|id| seen.insert(*id))
        .collect()
}
