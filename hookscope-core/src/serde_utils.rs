use crate::errors::{HookscopeError, Result};

/// Serializes a value to pretty JSON with canonical error handling.
pub fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| HookscopeError::SerializationError(err.to_string()))
}

/// Deserializes a JSON string into the provided type with shared error semantics.
pub fn from_json_str<T: serde::de::DeserializeOwned>(input: &str) -> Result<T> {
    serde_json::from_str(input).map_err(|err| HookscopeError::DeserializationError(err.to_string()))
}

/// Deserializes every non-blank line of an NDJSON document.
///
/// Lines that fail to parse are returned as errors alongside their
/// 1-based line number so callers can decide whether to skip them.
pub fn from_ndjson_str<T: serde::de::DeserializeOwned>(
    input: &str,
) -> Vec<std::result::Result<T, (usize, HookscopeError)>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| from_json_str(line).map_err(|err| (index + 1, err)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_output_parses_back() {
        let value = serde_json::json!({"key": "value"});
        let json = to_pretty_json(&value).expect("serialize");
        let decoded: serde_json::Value = from_json_str(&json).expect("deserialize");
        assert_eq!(decoded["key"], "value");
    }

    #[test]
    fn ndjson_skips_blank_lines_and_reports_line_numbers() {
        let input = "{\"a\":1}\n\n   \nnot json\n{\"a\":2}\n";
        let parsed = from_ndjson_str::<serde_json::Value>(input);
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].as_ref().expect("first line")["a"], 1);
        match &parsed[1] {
            Err((line, HookscopeError::DeserializationError(_))) => assert_eq!(*line, 4),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(parsed[2].as_ref().expect("last line")["a"], 2);
    }
}
