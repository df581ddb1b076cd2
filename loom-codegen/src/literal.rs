//! Quoting of string and character literals.
//!
//! Go and Java share the C escape set for the characters that matter in
//! generated code, so both renderers use these helpers.

/// `s` as a double quoted literal.
pub fn quote_str(s: &str) -> String {
    quote(s, '"')
}

/// `c` as a single quoted literal. `value` holds exactly one character.
pub fn quote_char(value: &str) -> String {
    quote(value, '\'')
}

fn quote(s: &str, delim: char) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}
