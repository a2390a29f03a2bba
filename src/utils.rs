// SPDX-License-Identifier: GPL-3.0-only

/// Transforms a kebab-case entry name into a space-separated string where
/// each word starts with an uppercase letter.
pub fn capitalize_string(input: &str) -> String {
    input
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Helper to scale some remote measurements such as weight:
/// the wire reports tenths of the display unit.
pub fn scale_number(value: i64) -> f64 {
    (value as f64) / 10.0
}

/// Extracts the entry name from a listing reference URL,
/// e.g. `.../catalog/pikachu/` yields `pikachu`.
pub fn entry_name_from_url(url: &str) -> Option<&str> {
    let name = url.trim_end_matches('/').split('/').next_back()?;
    (!name.is_empty()).then_some(name)
}
