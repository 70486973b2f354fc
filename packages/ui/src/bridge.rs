//! Helpers for the `document::eval` JavaScript bridge.

/// Escapes `s` as a double-quoted JavaScript string literal.
pub(crate) fn js_string_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '<' => out.push_str("\\u003c"),
            c if c < '\x20' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_quotes_and_control_chars() {
        assert_eq!(js_string_escape("a\"b"), "\"a\\\"b\"");
        assert_eq!(js_string_escape("x\ny"), "\"x\\ny\"");
        assert_eq!(js_string_escape("</script>"), "\"\\u003c/script>\"");
    }
}
