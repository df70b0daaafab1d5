//! Sanitizers applied to free text coming from submitted forms.

/// Replaces characters significant in HTML markup with their entities,
/// so the value can be embedded into a page as is.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Trims surrounding whitespace.
pub fn sanitize_text(input: Option<&str>) -> String {
    input.map(|s| s.trim().to_string()).unwrap_or_default()
}
