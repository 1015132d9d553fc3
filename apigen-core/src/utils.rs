//! Shared string utilities for code generation.

/// Split a string into identifier words.
///
/// Any character outside `[a-zA-Z0-9]` separates words, as do lower-to-upper
/// transitions (`petId` -> `pet`, `Id`) and the end of an acronym
/// (`HTTPServer` -> `HTTP`, `Server`).
pub fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();

    for chunk in s.split(|c: char| !c.is_ascii_alphanumeric()) {
        if chunk.is_empty() {
            continue;
        }

        let chars: Vec<char> = chunk.chars().collect();
        let mut start = 0;
        for i in 1..chars.len() {
            let prev = chars[i - 1];
            let cur = chars[i];
            let next = chars.get(i + 1).copied();

            let camel_hump = cur.is_ascii_uppercase()
                && (prev.is_ascii_lowercase() || prev.is_ascii_digit());
            let acronym_end = cur.is_ascii_uppercase()
                && prev.is_ascii_uppercase()
                && next.is_some_and(|n| n.is_ascii_lowercase());

            if camel_hump || acronym_end {
                words.push(chars[start..i].iter().collect());
                start = i;
            }
        }
        words.push(chars[start..].iter().collect());
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_ascii_uppercase().to_string() + chars.as_str(),
    }
}

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld")
///
/// Only the first letter of each word is touched, so acronyms survive
/// (`pet_DTO` -> `PetDTO`).
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert a string to camelCase (e.g., "get_pets_id" -> "getPetsId")
pub fn to_camel_case(s: &str) -> String {
    split_words(s)
        .iter()
        .enumerate()
        .map(|(i, w)| {
            if i == 0 {
                w.to_ascii_lowercase()
            } else {
                capitalize(w)
            }
        })
        .collect()
}

/// Convert a string to snake_case (e.g., "HelloWorld" -> "hello_world")
pub fn to_snake_case(s: &str) -> String {
    join_lowercase(s, "_")
}

fn join_lowercase(s: &str, separator: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Whether a character belongs to a CJK script (Han, Kana or Hangul).
pub fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{3040}'..='\u{30FF}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{AC00}'..='\u{D7AF}'
    )
}

/// Whether a string contains at least one CJK character.
pub fn contains_cjk(s: &str) -> bool {
    s.chars().any(is_cjk)
}
