//! Tool name normalization.

use std::collections::HashSet;

/// Normalize an identifier to `snake_case`.
///
/// Word boundaries are inserted between a lowercase letter or digit and a
/// following capital, and inside capital runs before a capital followed by
/// a lowercase letter (`HTTPServer` → `http_server`). Every character
/// outside `[a-z0-9_]` becomes `_` and leading underscores are removed.
/// The result is never empty; an input with nothing left yields `"tool"`.
pub fn snake_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }

        let lower = c.to_ascii_lowercase();
        if lower.is_ascii_lowercase() || lower.is_ascii_digit() || lower == '_' {
            out.push(lower);
        } else {
            out.push('_');
        }
    }

    let trimmed = out.trim_start_matches('_');
    if trimmed.is_empty() {
        "tool".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Hands out names unique within one discovery result.
///
/// The first claim of a name returns it unchanged; later claims get `_2`,
/// `_3`, ... appended.
#[derive(Debug, Default)]
pub struct UniqueNames {
    taken: HashSet<String>,
}

impl UniqueNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, base: String) -> String {
        if self.taken.insert(base.clone()) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}_{n}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
