use anyhow::{Context, Result};

/// Formats a second count as `m:ss`.
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Decodes the JSON-encoded keyword list carried by reading material.
///
/// A missing or blank string means there are no keywords.
pub fn decode_keywords(raw: Option<&str>) -> Result<Vec<String>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(raw)
            .with_context(|| format!("Invalid reading material keywords {raw:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(59), "0:59");
        assert_eq!(format_time(61), "1:01");
        assert_eq!(format_time(15 * 60), "15:00");
    }

    #[test]
    fn decodes_keyword_strings() {
        let keywords = decode_keywords(Some(r#"["cell", "mitosis"]"#)).unwrap();

        assert_eq!(keywords, vec!["cell".to_owned(), "mitosis".to_owned()]);
        assert!(decode_keywords(None).unwrap().is_empty());
        assert!(decode_keywords(Some("  ")).unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_keywords() {
        assert!(decode_keywords(Some("cell, mitosis")).is_err());
        assert!(decode_keywords(Some("[1, 2]")).is_err());
    }
}
