//! Shared identifier and case utilities for code generation.

/// Split a string into words on `_`, `-`, whitespace and lower-to-upper
/// case transitions.
fn words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in s.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld")
pub fn to_pascal_case(s: &str) -> String {
    words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert a string to snake_case (e.g., "HelloWorld" -> "hello_world")
pub fn to_snake_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Convert a string to SCREAMING_SNAKE_CASE (e.g., "notFound" -> "NOT_FOUND")
pub fn to_screaming_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

/// Upper-case the first rune so the identifier is exported in Go terms.
///
/// `id` is special-cased to `ID`.
pub fn make_public(s: &str) -> String {
    if s == "id" {
        return "ID".to_string();
    }
    capitalize(s)
}

/// Lower-case the first rune so the identifier is package-private in Go terms.
///
/// `ID` is special-cased to `id`.
pub fn make_private(s: &str) -> String {
    if s == "ID" {
        return "id".to_string();
    }
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Strip everything which is not valid inside an identifier. A leading
/// digit is prefixed with an underscore.
pub fn make_identifier(s: &str) -> String {
    let ident: String = s
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    match ident.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{ident}"),
        _ => ident,
    }
}
