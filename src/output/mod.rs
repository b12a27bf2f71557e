// Output formatting: terminal tables and JSON for trend reports.

pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Respects UTF-8 character boundaries, so it never panics on multi-byte
/// characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Render a full trend report as pretty-printed JSON.
pub fn report_json(report: &crate::pipeline::trending::TrendReport) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
