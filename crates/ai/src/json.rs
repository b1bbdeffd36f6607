//! Pulling JSON objects out of free-form model output.

use serde::de::DeserializeOwned;

use crate::error::AiError;

/// Returns the first balanced `{...}` in `text`.
///
/// Braces inside string literals are ignored, so a `}` in a quoted value does
/// not end the object early.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extracts the first JSON object from `text` and deserializes it.
pub fn parse_json_response<T: DeserializeOwned>(text: &str) -> Result<T, AiError> {
    let json = extract_json_object(text)
        .ok_or_else(|| AiError::invalid_response("no JSON object found"))?;
    serde_json::from_str(json).map_err(|e| AiError::invalid_response(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_extracts_object_from_prose() {
        let text = "Sure! Here you go:\n```json\n{\"isValid\": true}\n```\nAnything else?";
        assert_eq!(extract_json_object(text), Some("{\"isValid\": true}"));
    }

    #[test]
    fn test_first_balanced_object_wins() {
        let text = r#"{"a": {"b": 1}} trailing {"c": 2}"#;
        assert_eq!(extract_json_object(text), Some(r#"{"a": {"b": 1}}"#));
    }

    #[test]
    fn test_braces_in_strings_are_ignored() {
        let text = r#"{"feedback": "use } and { freely", "quote": "say \"hi\" }"} done"#;
        let json = extract_json_object(text).unwrap();
        let value: Value = serde_json::from_str(json).unwrap();
        assert_eq!(value["feedback"], "use } and { freely");
    }

    #[test]
    fn test_unbalanced_or_missing() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("{\"open\": true"), None);
    }

    #[test]
    fn test_parse_errors_are_invalid_response() {
        let err = parse_json_response::<Value>("{not json}").unwrap_err();
        assert_eq!(err.code(), "INVALID_RESPONSE");
        let err = parse_json_response::<Value>("nothing").unwrap_err();
        assert_eq!(err.code(), "INVALID_RESPONSE");
    }
}
