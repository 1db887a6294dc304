//! JSON output formatting.

/// Format a value as indented JSON, ready to pipe into `jq`.
pub fn format_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_json_is_indented() {
        let value = serde_json::json!({ "status": "ok" });
        assert_eq!(format_json(&value), "{\n  \"status\": \"ok\"\n}");
    }
}
