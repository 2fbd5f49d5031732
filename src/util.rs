use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use crate::error::{FolioError, Result};

/// UTC calendar day of an instant, the key every day bucket is built on.
pub fn day_key(timestamp: &DateTime<Utc>) -> NaiveDate {
    timestamp.date_naive()
}

pub fn day_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Accepts RFC3339 instants or bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&datetime));
        }
    }

    Err(FolioError::Parse(format!("Unrecognized timestamp: {input:?}")))
}

pub fn short_sha(sha: &str) -> String {
    sha.chars().take(7).collect()
}

pub fn subject_line(message: &str) -> &str {
    message.lines().next().unwrap_or("")
}

pub fn is_markdown_path(path: &str) -> bool {
    let lower = path.to_lowercase();
    lower.ends_with(".md") || lower.ends_with(".markdown")
}

/// Syntax-highlighting language for a path, `text` when unknown.
pub fn language_for_path(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "ts" | "tsx" => "typescript",
        "js" | "jsx" => "javascript",
        "json" => "json",
        "css" => "css",
        "html" => "html",
        "md" | "markdown" => "markdown",
        "py" => "python",
        "rs" => "rust",
        "go" => "go",
        "toml" => "toml",
        "yml" | "yaml" => "yaml",
        _ => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_key_uses_utc_calendar() {
        let ts = parse_timestamp("2024-03-10T23:30:00-02:00").unwrap();
        assert_eq!(day_string(day_key(&ts)), "2024-03-11");
    }

    #[test]
    fn parse_timestamp_accepts_plain_dates() {
        let ts = parse_timestamp("2024-01-05").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-05T00:00:00+00:00");
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        let err = parse_timestamp("last tuesday").unwrap_err();
        assert!(matches!(err, FolioError::Parse(_)));
    }

    #[test]
    fn subject_and_sha() {
        assert_eq!(subject_line("Fix build\n\nLonger body"), "Fix build");
        assert_eq!(subject_line(""), "");
        assert_eq!(short_sha("0123456789abcdef"), "0123456");
        assert_eq!(short_sha("abc"), "abc");
    }

    #[test]
    fn markdown_and_language_detection() {
        assert!(is_markdown_path("docs/README.MD"));
        assert!(is_markdown_path("notes.markdown"));
        assert!(!is_markdown_path("src/main.rs"));
        assert_eq!(language_for_path("src/app/page.tsx"), "typescript");
        assert_eq!(language_for_path("Makefile"), "text");
        assert_eq!(language_for_path("lib.RS"), "rust");
    }
}
