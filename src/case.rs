// SPDX-License-Identifier: GPL-3.0-only

use serde_json::Value;

/// Converts an underscore_separated string to camelCase.
///
/// Only an underscore directly followed by an ASCII lowercase letter marks a
/// word boundary; everything else passes through, so already-camelCase input
/// comes back unchanged.
pub fn to_camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(current) = chars.next() {
        if current == '_' && chars.peek().is_some_and(|next| next.is_ascii_lowercase()) {
            // Consume the letter and promote it to the word boundary.
            let letter = chars.next().unwrap_or_default();
            out.push(letter.to_ascii_uppercase());
        } else {
            out.push(current);
        }
    }

    out
}

/// Converts a camelCase string to underscore_separated form.
///
/// Each ASCII uppercase letter is replaced by an underscore plus its
/// lowercase form; input without uppercase letters comes back unchanged.
pub fn to_snake_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);

    for current in input.chars() {
        if current.is_ascii_uppercase() {
            out.push('_');
            out.push(current.to_ascii_lowercase());
        } else {
            out.push(current);
        }
    }

    out
}

/// Recursively rewrites every object key of a JSON tree to camelCase.
///
/// Arrays recurse element by element, scalars and null pass through, and the
/// shape of the tree is preserved exactly.
pub fn camelize_keys(value: Value) -> Value {
    transform_keys(value, &to_camel_case)
}

/// Recursively rewrites every object key of a JSON tree to
/// underscore_separated form.
pub fn snakeify_keys(value: Value) -> Value {
    transform_keys(value, &to_snake_case)
}

fn transform_keys(value: Value, convert: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| transform_keys(item, convert))
                .collect(),
        ),
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(key, field)| (convert(&key), transform_keys(field, convert)))
                .collect(),
        ),
        scalar => scalar,
    }
}
